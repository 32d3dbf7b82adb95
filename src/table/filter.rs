//! Filter predicate composition.
//!
//! A [`FilterState`] maps filter keys (declared by [`Record::filters`]) to the
//! value the user picked. A record passes when it satisfies every active
//! filter; inactive filters (empty text, category `"all"`, no date) are simply
//! absent from the map.

use crate::domain::error::{Result, ZadminError};
use crate::domain::form::{parse_date, DATE_FORMAT};
use crate::domain::record::{FieldValue, FilterKind, FilterSpec, Record};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Category value meaning "do not filter".
pub const ALL: &str = "all";

/// Option lists supplied at runtime, keyed by filter or form field key.
///
/// An entry replaces the options the record type declares, for values that
/// live in another collection (the plan names a user can be on).
pub type Choices = BTreeMap<&'static str, Vec<String>>;

/// An active filter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    /// Lowercased search text.
    Text(String),
    /// Selected option.
    Category(String),
    Date(NaiveDate),
}

impl FilterValue {
    /// Text shown in the filter bar.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Text(text) | Self::Category(text) => text.clone(),
            Self::Date(date) => date.format(DATE_FORMAT).to_string(),
        }
    }
}

/// Active filters of one table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    values: BTreeMap<&'static str, FilterValue>,
}

impl FilterState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets filter `key` from raw user input.
    ///
    /// Empty input, and `"all"` for category filters, deactivates the filter.
    /// Category options come from `choices` when it has an entry for `key`.
    /// Returns `true` when the active filters changed.
    ///
    /// # Errors
    ///
    /// - [`ZadminError::Config`] when `key` is not one of `specs`
    /// - [`ZadminError::Validation`] for an unknown category option or an
    ///   unparsable date; the previous value is kept
    pub fn set(
        &mut self,
        specs: &[FilterSpec],
        choices: &Choices,
        key: &str,
        raw: &str,
    ) -> Result<bool> {
        let spec = find(specs, key)?;
        let raw = raw.trim();

        let value = match spec.kind {
            _ if raw.is_empty() => None,
            FilterKind::Text { .. } => Some(FilterValue::Text(raw.to_lowercase())),
            FilterKind::Category { .. } if raw.eq_ignore_ascii_case(ALL) => None,
            FilterKind::Category { .. } => {
                let option = category_options(spec, choices)
                    .into_iter()
                    .find(|o| o.eq_ignore_ascii_case(raw))
                    .ok_or_else(|| {
                        ZadminError::validation(spec.key, format!("Unknown {} \"{raw}\"", spec.label))
                    })?;
                Some(FilterValue::Category(option))
            }
            FilterKind::Date { .. } => {
                let date = parse_date(raw).ok_or_else(|| {
                    ZadminError::validation(spec.key, "Use the YYYY-MM-DD format")
                })?;
                Some(FilterValue::Date(date))
            }
        };

        match value {
            Some(value) => {
                let changed = self.values.get(spec.key) != Some(&value);
                self.values.insert(spec.key, value);
                Ok(changed)
            }
            None => Ok(self.values.remove(spec.key).is_some()),
        }
    }

    /// Steps category filter `key` through `all -> option 1 -> ... -> all`.
    ///
    /// # Errors
    ///
    /// Returns [`ZadminError::Config`] when `key` is unknown or not a category.
    pub fn cycle(&mut self, specs: &[FilterSpec], choices: &Choices, key: &str) -> Result<()> {
        let spec = find(specs, key)?;
        let FilterKind::Category { .. } = spec.kind else {
            return Err(ZadminError::Config(format!("filter {key} cannot be cycled")));
        };
        let options = category_options(spec, choices);

        let current = match self.values.get(spec.key) {
            Some(FilterValue::Category(value)) => options.iter().position(|o| o == value),
            _ => None,
        };
        let next = match current {
            None => options.first(),
            Some(i) => options.get(i + 1),
        };
        match next {
            Some(option) => {
                self.values
                    .insert(spec.key, FilterValue::Category(option.clone()));
            }
            None => {
                self.values.remove(spec.key);
            }
        }
        Ok(())
    }

    /// Deactivates every filter.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.values.get(key)
    }

    /// Returns `true` when `record` satisfies every active filter.
    #[must_use]
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        let specs = R::filters();
        self.values.iter().all(|(key, value)| {
            specs
                .iter()
                .find(|spec| spec.key == *key)
                .map_or(true, |spec| passes(spec.kind, value, record))
        })
    }

    /// Records passing every active filter, in source order.
    #[must_use]
    pub fn apply<'a, R: Record>(&self, records: &'a [R]) -> Vec<&'a R> {
        let filtered: Vec<&R> = records.iter().filter(|r| self.matches(*r)).collect();
        tracing::trace!(
            kind = R::KIND,
            total = records.len(),
            filtered_count = filtered.len(),
            "filters applied"
        );
        filtered
    }

    /// `(label, value)` pairs of the active filters, in declaration order.
    #[must_use]
    pub fn describe(&self, specs: &[FilterSpec]) -> Vec<(&'static str, String)> {
        specs
            .iter()
            .filter_map(|spec| {
                self.values
                    .get(spec.key)
                    .map(|value| (spec.label, value.display()))
            })
            .collect()
    }
}

fn find<'a>(specs: &'a [FilterSpec], key: &str) -> Result<&'a FilterSpec> {
    specs
        .iter()
        .find(|spec| spec.key == key)
        .ok_or_else(|| ZadminError::Config(format!("unknown filter key: {key}")))
}

fn category_options(spec: &FilterSpec, choices: &Choices) -> Vec<String> {
    match (choices.get(spec.key), spec.kind) {
        (Some(options), _) => options.clone(),
        (None, FilterKind::Category { options, .. }) => {
            options.iter().map(|o| (*o).to_string()).collect()
        }
        (None, _) => Vec::new(),
    }
}

fn passes<R: Record>(kind: FilterKind, value: &FilterValue, record: &R) -> bool {
    match (kind, value) {
        (FilterKind::Text { fields }, FilterValue::Text(needle)) => fields.iter().any(|field| {
            matches!(record.field(field), Some(FieldValue::Text(text)) if text.to_lowercase().contains(needle.as_str()))
        }),
        (FilterKind::Category { field, .. }, FilterValue::Category(option)) => {
            matches!(record.field(field), Some(FieldValue::Text(text)) if text == option)
        }
        (FilterKind::Date { field }, FilterValue::Date(date)) => record
            .field(field)
            .and_then(|v| v.as_date())
            .is_some_and(|d| d == *date),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Role, User, UserStatus};

    fn user(id: u64, name: &str, role: Role, joined: (i32, u32, u32)) -> User {
        User {
            id,
            name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
            role,
            status: UserStatus::Active,
            plan: "Free".into(),
            joined: NaiveDate::from_ymd_opt(joined.0, joined.1, joined.2).unwrap(),
        }
    }

    fn users() -> Vec<User> {
        vec![
            user(1, "John", Role::Admin, (2024, 1, 5)),
            user(2, "Jane", Role::Editor, (2024, 1, 5)),
            user(3, "Bob", Role::Viewer, (2024, 2, 1)),
        ]
    }

    #[test]
    fn text_search_matches_any_field_case_insensitively() {
        let mut filters = FilterState::new();
        filters.set(User::filters(), &Choices::new(), "search", "JANE@").unwrap();
        let names: Vec<_> = filters.apply(&users()).iter().map(|u| u.id).collect();
        assert_eq!(names, vec![2]);
    }

    #[test]
    fn filters_combine_with_and() {
        let records = users();
        let mut filters = FilterState::new();
        filters.set(User::filters(), &Choices::new(), "joined", "2024-01-05").unwrap();
        assert_eq!(filters.apply(&records).len(), 2);

        filters.set(User::filters(), &Choices::new(), "role", "admin").unwrap();
        let ids: Vec<_> = filters.apply(&records).iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn all_and_empty_deactivate() {
        let mut filters = FilterState::new();
        assert!(filters.set(User::filters(), &Choices::new(), "role", "Admin").unwrap());
        assert!(!filters.set(User::filters(), &Choices::new(), "role", "Admin").unwrap());
        assert!(filters.set(User::filters(), &Choices::new(), "role", "all").unwrap());
        assert!(filters.is_empty());

        filters.set(User::filters(), &Choices::new(), "search", "x").unwrap();
        filters.set(User::filters(), &Choices::new(), "search", "  ").unwrap();
        assert!(filters.is_empty());
    }

    #[test]
    fn invalid_input_is_rejected_and_previous_value_kept() {
        let mut filters = FilterState::new();
        filters.set(User::filters(), &Choices::new(), "joined", "2024-01-05").unwrap();

        let err = filters.set(User::filters(), &Choices::new(), "joined", "05/01/2024").unwrap_err();
        assert!(matches!(err, ZadminError::Validation { .. }));
        assert_eq!(
            filters.get("joined"),
            Some(&FilterValue::Date(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()))
        );

        let err = filters.set(User::filters(), &Choices::new(), "role", "Owner").unwrap_err();
        assert!(matches!(err, ZadminError::Validation { .. }));

        let err = filters.set(User::filters(), &Choices::new(), "country", "NL").unwrap_err();
        assert!(matches!(err, ZadminError::Config(_)));
    }

    #[test]
    fn cycle_walks_options_and_back_to_all() {
        let mut filters = FilterState::new();
        let mut seen = Vec::new();
        for _ in 0..4 {
            filters.cycle(User::filters(), &Choices::new(), "role").unwrap();
            seen.push(filters.get("role").map(FilterValue::display));
        }
        assert_eq!(
            seen,
            vec![
                Some("Admin".to_string()),
                Some("Editor".to_string()),
                Some("Viewer".to_string()),
                None
            ]
        );
        assert!(filters.cycle(User::filters(), &Choices::new(), "search").is_err());
    }

    #[test]
    fn supplied_choices_replace_declared_options() {
        let mut choices = Choices::new();
        choices.insert("plan", vec!["Free".to_string(), "Gold".to_string()]);

        let mut filters = FilterState::new();
        filters.set(User::filters(), &choices, "plan", "gold").unwrap();
        assert_eq!(filters.get("plan"), Some(&FilterValue::Category("Gold".into())));
        assert!(filters.set(User::filters(), &choices, "plan", "Premium").is_err());

        filters.clear();
        filters.cycle(User::filters(), &choices, "plan").unwrap();
        filters.cycle(User::filters(), &choices, "plan").unwrap();
        assert_eq!(filters.get("plan").map(FilterValue::display).as_deref(), Some("Gold"));
    }

    #[test]
    fn describe_lists_active_filters_in_declaration_order() {
        let mut filters = FilterState::new();
        filters.set(User::filters(), &Choices::new(), "status", "Active").unwrap();
        filters.set(User::filters(), &Choices::new(), "search", "jo").unwrap();
        assert_eq!(
            filters.describe(User::filters()),
            vec![("Search", "jo".to_string()), ("Status", "Active".to_string())]
        );
    }
}
