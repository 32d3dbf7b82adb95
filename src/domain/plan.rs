//! Subscription plans shown on the plan management page.

use crate::domain::error::{Result, ZadminError};
use crate::domain::form::{format_cents, FieldRule, Form, UNLIMITED};
use crate::domain::record::{
    ActionKind, Column, FieldValue, FilterKind, FilterSpec, Record, RecordId, SEARCH_FILTER,
};
use crate::domain::user::choice;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    Monthly,
    Quarterly,
    Biannual,
}

impl BillingCycle {
    pub const ALL: &'static [&'static str] = &["monthly", "quarterly", "biannual"];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Biannual => "biannual",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "monthly" => Some(Self::Monthly),
            "quarterly" => Some(Self::Quarterly),
            "biannual" => Some(Self::Biannual),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    Active,
    Inactive,
}

impl PlanStatus {
    pub const ALL: &'static [&'static str] = &["active", "inactive"];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }
}

/// A subscription plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub id: RecordId,
    pub name: String,
    pub description: String,
    pub features: Vec<String>,
    /// Maximum QR codes per subscriber; `None` is unlimited.
    pub qr_limit: Option<u32>,
    /// Price per billing cycle in cents.
    pub price: i64,
    pub billing_cycle: BillingCycle,
    pub status: PlanStatus,
    pub subscribers: u64,
}

/// One attribute that changed between two versions of a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanDiff {
    /// History action, e.g. "Price Updated".
    pub action: &'static str,
    pub old_value: String,
    pub new_value: String,
}

impl Plan {
    /// Display form of the QR code limit.
    #[must_use]
    pub fn limit_text(&self) -> String {
        self.qr_limit
            .map_or_else(|| "Unlimited".to_string(), |n| n.to_string())
    }

    /// Changes from `self` to `edited`, in a fixed attribute order.
    ///
    /// ```
    /// use zadmin::domain::{BillingCycle, Plan, PlanStatus};
    ///
    /// let basic = Plan {
    ///     id: 2,
    ///     name: "Basic".into(),
    ///     description: "For individuals".into(),
    ///     features: vec![],
    ///     qr_limit: Some(50),
    ///     price: 799,
    ///     billing_cycle: BillingCycle::Monthly,
    ///     status: PlanStatus::Active,
    ///     subscribers: 856,
    /// };
    /// let repriced = Plan { price: 999, ..basic.clone() };
    ///
    /// let diff = basic.diff(&repriced);
    /// assert_eq!(diff.len(), 1);
    /// assert_eq!(diff[0].action, "Price Updated");
    /// assert_eq!(diff[0].new_value, "$9.99");
    /// ```
    #[must_use]
    pub fn diff(&self, edited: &Self) -> Vec<PlanDiff> {
        let mut changes = Vec::new();
        let mut push = |action, old: String, new: String| {
            if old != new {
                changes.push(PlanDiff {
                    action,
                    old_value: old,
                    new_value: new,
                });
            }
        };

        push("Renamed", self.name.clone(), edited.name.clone());
        push(
            "Description Updated",
            self.description.clone(),
            edited.description.clone(),
        );
        push(
            "Features Updated",
            self.features.join(", "),
            edited.features.join(", "),
        );
        push(
            "Updated QR Code Limit",
            self.limit_text(),
            edited.limit_text(),
        );
        push(
            "Price Updated",
            format_cents(self.price),
            format_cents(edited.price),
        );
        push(
            "Billing Cycle Updated",
            self.billing_cycle.as_str().to_string(),
            edited.billing_cycle.as_str().to_string(),
        );
        push(
            "Status Changed",
            self.status.as_str().to_string(),
            edited.status.as_str().to_string(),
        );
        changes
    }

    fn form(title: String, plan: Option<&Self>) -> Form {
        let features = plan.map(|p| p.features.join(", ")).unwrap_or_default();
        let limit = plan.map_or_else(String::new, |p| match p.qr_limit {
            Some(n) => n.to_string(),
            None => UNLIMITED.to_string(),
        });
        let price = plan.map_or_else(String::new, |p| {
            format_cents(p.price).trim_start_matches('$').to_string()
        });

        Form::new(title)
            .field("name", "Plan name", FieldRule::Required, plan.map_or("", |p| p.name.as_str()))
            .field(
                "description",
                "Description",
                FieldRule::Required,
                plan.map_or("", |p| p.description.as_str()),
            )
            .field("features", "Features (comma separated)", FieldRule::Required, features)
            .field("qr_limit", "QR code limit", FieldRule::Limit, limit)
            .field("price", "Price", FieldRule::NonNegativeAmount, price)
            .field(
                "billing_cycle",
                "Billing cycle",
                choice(BillingCycle::ALL),
                plan.map_or("", |p| p.billing_cycle.as_str()),
            )
            .field(
                "status",
                "Status",
                choice(PlanStatus::ALL),
                plan.map_or("", |p| p.status.as_str()),
            )
    }

    fn parse_form(form: &Form) -> Result<PlanInput> {
        let features: Vec<String> = form
            .value("features")
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect();
        if features.is_empty() {
            return Err(ZadminError::validation("features", "List at least one feature"));
        }
        let billing_cycle = BillingCycle::parse(form.value("billing_cycle"))
            .ok_or_else(|| ZadminError::validation("billing_cycle", "Choose a billing cycle"))?;
        let status = PlanStatus::parse(form.value("status"))
            .ok_or_else(|| ZadminError::validation("status", "Choose a status"))?;
        Ok(PlanInput {
            features,
            qr_limit: form.limit("qr_limit")?,
            price: form.cents("price")?,
            billing_cycle,
            status,
        })
    }
}

/// Plan attributes parsed from a create or edit form.
struct PlanInput {
    features: Vec<String>,
    qr_limit: Option<u32>,
    price: i64,
    billing_cycle: BillingCycle,
    status: PlanStatus,
}

const COLUMNS: &[Column] = &[
    Column::new("name", "Plan", 12),
    Column::new("price", "Price", 9),
    Column::new("billing_cycle", "Cycle", 10),
    Column::new("qr_limit", "QR Limit", 9),
    Column::new("status", "Status", 9),
    Column::new("subscribers", "Subscribers", 11),
];

const FILTERS: &[FilterSpec] = &[
    FilterSpec {
        key: SEARCH_FILTER,
        label: "Search",
        kind: FilterKind::Text {
            fields: &["name", "description"],
        },
    },
    FilterSpec {
        key: "status",
        label: "Status",
        kind: FilterKind::Category {
            field: "status",
            options: PlanStatus::ALL,
        },
    },
    FilterSpec {
        key: "billing_cycle",
        label: "Cycle",
        kind: FilterKind::Category {
            field: "billing_cycle",
            options: BillingCycle::ALL,
        },
    },
];

const ACTIONS: &[ActionKind] = &[
    ActionKind::Details,
    ActionKind::Edit,
    ActionKind::ToggleStatus,
    ActionKind::Delete,
];

impl Record for Plan {
    const KIND: &'static str = "plan";

    fn id(&self) -> RecordId {
        self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        match key {
            "name" => Some(FieldValue::Text(&self.name)),
            "description" => Some(FieldValue::Text(&self.description)),
            "price" => Some(FieldValue::Number(self.price)),
            "billing_cycle" => Some(FieldValue::Text(self.billing_cycle.as_str())),
            "status" => Some(FieldValue::Text(self.status.as_str())),
            "subscribers" => Some(FieldValue::Number(
                i64::try_from(self.subscribers).unwrap_or(i64::MAX),
            )),
            _ => None,
        }
    }

    fn cell(&self, key: &str) -> String {
        match key {
            "price" => format_cents(self.price),
            "qr_limit" => self.limit_text(),
            _ => self.field(key).map(|v| v.to_string()).unwrap_or_default(),
        }
    }

    fn columns() -> &'static [Column] {
        COLUMNS
    }

    fn filters() -> &'static [FilterSpec] {
        FILTERS
    }

    fn actions() -> &'static [ActionKind] {
        ACTIONS
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Plan", self.name.clone()),
            ("Description", self.description.clone()),
            ("Features", self.features.join(", ")),
            ("QR code limit", self.limit_text()),
            (
                "Price",
                format!("{} / {}", format_cents(self.price), self.billing_cycle.as_str()),
            ),
            ("Status", self.status.as_str().to_string()),
            ("Subscribers", self.subscribers.to_string()),
        ]
    }

    fn transition(&self, kind: ActionKind) -> Option<Self> {
        if kind != ActionKind::ToggleStatus {
            return None;
        }
        let status = match self.status {
            PlanStatus::Active => PlanStatus::Inactive,
            PlanStatus::Inactive => PlanStatus::Active,
        };
        Some(Self {
            status,
            ..self.clone()
        })
    }

    fn edit_form(&self) -> Option<Form> {
        Some(Self::form(format!("Edit {}", self.name), Some(self)))
    }

    fn apply_form(&self, form: &Form) -> Result<Self> {
        let input = Self::parse_form(form)?;
        Ok(Self {
            name: form.value("name").to_string(),
            description: form.value("description").to_string(),
            features: input.features,
            qr_limit: input.qr_limit,
            price: input.price,
            billing_cycle: input.billing_cycle,
            status: input.status,
            ..self.clone()
        })
    }

    fn create_form() -> Option<Form> {
        Some(Self::form("Create plan".to_string(), None))
    }

    fn from_form(id: RecordId, form: &Form) -> Result<Self> {
        let input = Self::parse_form(form)?;
        Ok(Self {
            id,
            name: form.value("name").to_string(),
            description: form.value("description").to_string(),
            features: input.features,
            qr_limit: input.qr_limit,
            price: input.price,
            billing_cycle: input.billing_cycle,
            status: input.status,
            subscribers: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn premium() -> Plan {
        Plan {
            id: 3,
            name: "Premium".into(),
            description: "For growing teams".into(),
            features: vec!["Analytics".into(), "Custom domains".into()],
            qr_limit: Some(200),
            price: 2999,
            billing_cycle: BillingCycle::Monthly,
            status: PlanStatus::Active,
            subscribers: 342,
        }
    }

    fn fill(form: &mut Form, key: &str, value: &str) {
        if let Some(field) = form.fields.iter_mut().find(|f| f.key == key) {
            field.value = value.to_string();
        }
    }

    #[test]
    fn create_form_rejects_bad_input() {
        let mut form = Plan::create_form().unwrap();
        assert!(form.validate().is_err());

        fill(&mut form, "name", "Team");
        fill(&mut form, "description", "Shared workspace");
        fill(&mut form, "features", "Analytics, SSO");
        fill(&mut form, "qr_limit", "0");
        fill(&mut form, "price", "19");
        assert!(form.validate().is_err());

        fill(&mut form, "qr_limit", "100");
        fill(&mut form, "price", "-19");
        assert!(form.validate().is_err());

        fill(&mut form, "price", "19.50");
        form.validate().unwrap();
        let plan = Plan::from_form(9, &form).unwrap();
        assert_eq!(plan.features, vec!["Analytics", "SSO"]);
        assert_eq!(plan.price, 1950);
        assert_eq!(plan.subscribers, 0);
        assert_eq!(plan.status, PlanStatus::Active);
    }

    #[test]
    fn edit_keeps_identity_and_reports_diff() {
        let plan = premium();
        let mut form = plan.edit_form().unwrap();
        assert_eq!(form.value("price"), "29.99");
        fill(&mut form, "qr_limit", "500");

        let edited = plan.apply_form(&form).unwrap();
        assert_eq!(edited.id, plan.id);
        assert_eq!(edited.subscribers, plan.subscribers);

        let diff = plan.diff(&edited);
        assert_eq!(
            diff,
            vec![PlanDiff {
                action: "Updated QR Code Limit",
                old_value: "200".into(),
                new_value: "500".into(),
            }]
        );
    }

    #[test]
    fn unlimited_limit_is_shown_and_parsed() {
        let mut form = premium().edit_form().unwrap();
        fill(&mut form, "qr_limit", "unlimited");
        let edited = premium().apply_form(&form).unwrap();
        assert_eq!(edited.qr_limit, None);
        assert_eq!(edited.cell("qr_limit"), "Unlimited");
    }

    #[test]
    fn status_edit_is_recorded_as_a_change() {
        let plan = premium();
        let mut form = plan.edit_form().unwrap();
        assert_eq!(form.value("status"), "active");
        fill(&mut form, "status", "inactive");

        let edited = plan.apply_form(&form).unwrap();
        assert_eq!(edited.status, PlanStatus::Inactive);
        let diff = plan.diff(&edited);
        assert_eq!(diff.len(), 1);
        assert_eq!(diff[0].action, "Status Changed");
        assert_eq!(diff[0].old_value, "active");
    }

    #[test]
    fn create_form_starts_active() {
        let form = Plan::create_form().unwrap();
        assert_eq!(form.value("status"), "active");
        assert_eq!(form.value("billing_cycle"), "monthly");
    }
}
