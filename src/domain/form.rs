//! Dialog form model and field validation.
//!
//! A [`Form`] is an ordered list of [`FormField`]s with one focused field. The
//! dialog state machine edits forms through [`Form::push_char`],
//! [`Form::backspace`] and [`Form::focus_next`], and calls [`Form::validate`]
//! before anything is committed.

use crate::domain::error::{Result, ZadminError};
use chrono::NaiveDate;

/// Input format accepted by date fields and date filters.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Value accepted by [`FieldRule::Limit`] fields for "no limit".
pub const UNLIMITED: &str = "unlimited";

/// Validation rule attached to a form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRule {
    /// Any value, including empty.
    Optional,
    /// Must contain non-whitespace text.
    Required,
    /// Must look like an email address.
    Email,
    /// Non-negative money amount with at most two decimals (`9.99`, `$12`).
    NonNegativeAmount,
    /// Integer of at least 1.
    PositiveInteger,
    /// Either [`UNLIMITED`] or an integer of at least 1.
    Limit,
    /// One of a fixed set of options; typing cycles through them.
    OneOf(Vec<String>),
    /// Empty, or a `YYYY-MM-DD` calendar date.
    Date,
}

/// One labelled input in a dialog form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    /// Stable key used to read the value back.
    pub key: &'static str,
    /// Label shown next to the input.
    pub label: &'static str,
    /// Current raw text.
    pub value: String,
    /// Validation rule checked on submit.
    pub rule: FieldRule,
}

impl FormField {
    fn check(&self) -> Result<()> {
        let value = self.value.trim();
        let fail = |message: &str| Err(ZadminError::validation(self.key, message));

        match &self.rule {
            FieldRule::Optional => Ok(()),
            FieldRule::Required if value.is_empty() => {
                fail(&format!("{} is required", self.label))
            }
            FieldRule::Required => Ok(()),
            FieldRule::Email => match value.split_once('@') {
                Some((user, domain)) if !user.is_empty() && domain.contains('.') => Ok(()),
                _ => fail("Enter a valid email address"),
            },
            FieldRule::NonNegativeAmount => parse_cents(value)
                .map(|_| ())
                .ok_or_else(|| {
                    ZadminError::validation(self.key, format!("{} must be a non-negative amount", self.label))
                }),
            FieldRule::PositiveInteger => match value.parse::<u32>() {
                Ok(n) if n >= 1 => Ok(()),
                _ => fail(&format!("{} must be at least 1", self.label)),
            },
            FieldRule::Limit => parse_limit(value)
                .map(|_| ())
                .ok_or_else(|| {
                    ZadminError::validation(
                        self.key,
                        format!("{} must be at least 1 or \"{UNLIMITED}\"", self.label),
                    )
                }),
            FieldRule::OneOf(options) => {
                if options.iter().any(|o| o == value) {
                    Ok(())
                } else {
                    fail(&format!("Choose a {}", self.label.to_lowercase()))
                }
            }
            FieldRule::Date if value.is_empty() => Ok(()),
            FieldRule::Date => parse_date(value)
                .map(|_| ())
                .ok_or_else(|| ZadminError::validation(self.key, "Use the YYYY-MM-DD format")),
        }
    }

    /// Steps a choice field to the next option, wrapping.
    fn cycle(&mut self, options: &[String]) {
        let next = options
            .iter()
            .position(|o| *o == self.value)
            .map_or(0, |i| (i + 1) % options.len());
        if let Some(option) = options.get(next) {
            self.value.clone_from(option);
        }
    }
}

/// An ordered set of fields edited inside a dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    /// Dialog title, e.g. "Delete Jane Smith".
    pub title: String,
    /// Optional explanatory line under the title.
    pub message: Option<String>,
    /// Fields in display order.
    pub fields: Vec<FormField>,
    /// Index of the focused field.
    pub focus: usize,
}

impl Form {
    /// Creates an empty form. Forms without fields act as plain confirmations.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: None,
            fields: Vec::new(),
            focus: 0,
        }
    }

    /// Sets the explanatory message.
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Appends a field with an initial value.
    ///
    /// Choice fields with an empty initial value start on their first option.
    #[must_use]
    pub fn field(
        mut self,
        key: &'static str,
        label: &'static str,
        rule: FieldRule,
        value: impl Into<String>,
    ) -> Self {
        let mut value = value.into();
        if let FieldRule::OneOf(options) = &rule {
            if value.is_empty() {
                value = options.first().cloned().unwrap_or_default();
            }
        }
        self.fields.push(FormField {
            key,
            label,
            value,
            rule,
        });
        self
    }

    /// Raw value of `key`, or `""` when the form has no such field.
    #[must_use]
    pub fn value(&self, key: &str) -> &str {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .map_or("", |f| f.value.trim())
    }

    /// Validates every field in order, returning the first failure.
    ///
    /// # Errors
    ///
    /// Returns [`ZadminError::Validation`] naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        self.fields.iter().try_for_each(FormField::check)
    }

    /// Moves focus to the next field, wrapping.
    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    /// Moves focus to the previous field, wrapping.
    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Applies a typed character to the focused field.
    ///
    /// Text fields append the character. Choice fields cycle on space and
    /// otherwise jump to the first option starting with the character.
    pub fn push_char(&mut self, c: char) {
        let Some(field) = self.fields.get_mut(self.focus) else {
            return;
        };

        if let FieldRule::OneOf(options) = field.rule.clone() {
            if c == ' ' {
                field.cycle(&options);
            } else if let Some(option) = options
                .iter()
                .find(|o| o.chars().next().is_some_and(|first| first.eq_ignore_ascii_case(&c)))
            {
                field.value.clone_from(option);
            }
            return;
        }

        field.value.push(c);
    }

    /// Removes the last character of the focused text field.
    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            if !matches!(field.rule, FieldRule::OneOf(_)) {
                field.value.pop();
            }
        }
    }

    /// Parses an [`FieldRule::NonNegativeAmount`] field into cents.
    ///
    /// # Errors
    ///
    /// Returns [`ZadminError::Validation`] when the value is not an amount.
    pub fn cents(&self, key: &'static str) -> Result<i64> {
        parse_cents(self.value(key))
            .ok_or_else(|| ZadminError::validation(key, "must be a non-negative amount"))
    }

    /// Parses a [`FieldRule::Limit`] field; `None` means unlimited.
    ///
    /// # Errors
    ///
    /// Returns [`ZadminError::Validation`] when the value is not a limit.
    pub fn limit(&self, key: &'static str) -> Result<Option<u32>> {
        parse_limit(self.value(key))
            .ok_or_else(|| ZadminError::validation(key, "must be at least 1"))
    }

    /// Parses a [`FieldRule::Date`] field; `None` when empty.
    ///
    /// # Errors
    ///
    /// Returns [`ZadminError::Validation`] when the value is not a date.
    pub fn date(&self, key: &'static str) -> Result<Option<NaiveDate>> {
        let value = self.value(key);
        if value.is_empty() {
            return Ok(None);
        }
        parse_date(value)
            .map(Some)
            .ok_or_else(|| ZadminError::validation(key, "Use the YYYY-MM-DD format"))
    }
}

/// Parses `YYYY-MM-DD`.
#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Parses a non-negative money amount into cents without going through floats.
///
/// ```
/// use zadmin::domain::form::parse_cents;
///
/// assert_eq!(parse_cents("9.99"), Some(999));
/// assert_eq!(parse_cents("$12"), Some(1200));
/// assert_eq!(parse_cents("0.5"), Some(50));
/// assert_eq!(parse_cents("-1"), None);
/// assert_eq!(parse_cents("1.234"), None);
/// ```
#[must_use]
pub fn parse_cents(value: &str) -> Option<i64> {
    let value = value.trim();
    let value = value.strip_prefix('$').unwrap_or(value);
    let (whole, frac) = value.split_once('.').unwrap_or((value, ""));

    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if whole.is_empty() || !all_digits(whole) || !all_digits(frac) || frac.len() > 2 {
        return None;
    }

    let whole: i64 = whole.parse().ok()?;
    let frac: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().ok()? * 10,
        _ => frac.parse().ok()?,
    };
    whole.checked_mul(100)?.checked_add(frac)
}

/// Formats cents as a dollar amount, e.g. `$9.99`.
#[must_use]
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    format!("{sign}${}.{:02}", cents / 100, cents % 100)
}

fn parse_limit(value: &str) -> Option<Option<u32>> {
    let value = value.trim();
    if value.eq_ignore_ascii_case(UNLIMITED) {
        return Some(None);
    }
    match value.parse::<u32>() {
        Ok(n) if n >= 1 => Some(Some(n)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan_form() -> Form {
        Form::new("Create plan")
            .field("name", "Plan name", FieldRule::Required, "")
            .field("price", "Price", FieldRule::NonNegativeAmount, "9.99")
            .field("limit", "QR code limit", FieldRule::Limit, "50")
            .field(
                "cycle",
                "Billing cycle",
                FieldRule::OneOf(vec!["monthly".into(), "quarterly".into(), "biannual".into()]),
                "",
            )
    }

    #[test]
    fn required_field_blocks_validation() {
        let form = plan_form();
        let err = form.validate().unwrap_err();
        assert!(matches!(err, ZadminError::Validation { ref field, .. } if field == "name"));
    }

    #[test]
    fn whitespace_does_not_satisfy_required() {
        let mut form = plan_form();
        form.push_char(' ');
        assert!(form.validate().is_err());
        form.push_char('X');
        assert!(form.validate().is_ok());
    }

    #[test]
    fn amount_and_limit_rules() {
        let mut form = plan_form();
        form.fields[0].value = "Pro".into();
        form.fields[1].value = "-3".into();
        assert!(form.validate().is_err());

        form.fields[1].value = "3".into();
        form.fields[2].value = "0".into();
        assert!(form.validate().is_err());

        form.fields[2].value = "Unlimited".into();
        assert!(form.validate().is_ok());
        assert_eq!(form.limit("limit").unwrap(), None);
        assert_eq!(form.cents("price").unwrap(), 300);
    }

    #[test]
    fn choice_fields_start_on_first_option_and_cycle() {
        let mut form = plan_form();
        assert_eq!(form.value("cycle"), "monthly");

        form.focus = 3;
        form.push_char(' ');
        assert_eq!(form.value("cycle"), "quarterly");
        form.push_char('b');
        assert_eq!(form.value("cycle"), "biannual");
        form.push_char(' ');
        assert_eq!(form.value("cycle"), "monthly");

        form.backspace();
        assert_eq!(form.value("cycle"), "monthly");
    }

    #[test]
    fn focus_wraps() {
        let mut form = plan_form();
        form.focus_prev();
        assert_eq!(form.focus, 3);
        form.focus_next();
        assert_eq!(form.focus, 0);
    }

    #[test]
    fn date_rule_allows_empty() {
        let mut form = Form::new("Filter by date").field("date", "Date", FieldRule::Date, "");
        assert!(form.validate().is_ok());
        assert_eq!(form.date("date").unwrap(), None);

        form.fields[0].value = "2024-13-01".into();
        assert!(form.validate().is_err());

        form.fields[0].value = "2024-01-15".into();
        assert_eq!(
            form.date("date").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
    }

    #[test]
    fn formats_cents() {
        assert_eq!(format_cents(999), "$9.99");
        assert_eq!(format_cents(0), "$0.00");
        assert_eq!(format_cents(-1250), "-$12.50");
    }
}
