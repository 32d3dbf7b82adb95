//! Plan modification history entries.
//!
//! History is append-only from the console's point of view: entries are created
//! when a plan edit is committed and can be inspected or searched, never edited.

use crate::domain::form::DATE_FORMAT;
use crate::domain::plan::PlanDiff;
use crate::domain::record::{
    ActionKind, Column, FieldValue, FilterKind, FilterSpec, Record, RecordId, SEARCH_FILTER,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One recorded change to a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanChange {
    pub id: RecordId,
    pub plan: String,
    pub action: String,
    pub old_value: String,
    pub new_value: String,
    pub changed_by: String,
    pub date: NaiveDate,
    /// Subscribers affected by the change.
    pub affected_users: u64,
}

impl PlanChange {
    /// Builds a history entry from one attribute diff.
    #[must_use]
    pub fn from_diff(
        id: RecordId,
        plan: &str,
        diff: PlanDiff,
        changed_by: &str,
        date: NaiveDate,
        affected_users: u64,
    ) -> Self {
        Self {
            id,
            plan: plan.to_string(),
            action: diff.action.to_string(),
            old_value: diff.old_value,
            new_value: diff.new_value,
            changed_by: changed_by.to_string(),
            date,
            affected_users,
        }
    }
}

const COLUMNS: &[Column] = &[
    Column::new("plan", "Plan", 11),
    Column::new("action", "Action", 22),
    Column::new("change", "Change", 20),
    Column::new("changed_by", "By", 18),
    Column::new("date", "Date", 10),
    Column::new("affected_users", "Affected", 8),
];

const FILTERS: &[FilterSpec] = &[
    FilterSpec {
        key: SEARCH_FILTER,
        label: "Search",
        kind: FilterKind::Text {
            fields: &["plan", "action", "changed_by"],
        },
    },
    FilterSpec {
        key: "date",
        label: "Date",
        kind: FilterKind::Date { field: "date" },
    },
];

const ACTIONS: &[ActionKind] = &[ActionKind::Details];

impl Record for PlanChange {
    const KIND: &'static str = "history entry";

    fn id(&self) -> RecordId {
        self.id
    }

    fn label(&self) -> String {
        format!("{} {}", self.plan, self.action)
    }

    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        match key {
            "plan" => Some(FieldValue::Text(&self.plan)),
            "action" => Some(FieldValue::Text(&self.action)),
            "old_value" => Some(FieldValue::Text(&self.old_value)),
            "new_value" => Some(FieldValue::Text(&self.new_value)),
            "changed_by" => Some(FieldValue::Text(&self.changed_by)),
            "date" => Some(FieldValue::Date(self.date)),
            "affected_users" => Some(FieldValue::Number(
                i64::try_from(self.affected_users).unwrap_or(i64::MAX),
            )),
            _ => None,
        }
    }

    fn cell(&self, key: &str) -> String {
        if key == "change" {
            return format!("{} -> {}", self.old_value, self.new_value);
        }
        self.field(key).map(|v| v.to_string()).unwrap_or_default()
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
            ("Plan", self.plan.clone()),
            ("Action", self.action.clone()),
            ("Old value", self.old_value.clone()),
            ("New value", self.new_value.clone()),
            ("Changed by", self.changed_by.clone()),
            ("Date", self.date.format(DATE_FORMAT).to_string()),
            ("Affected users", self.affected_users.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_cell_shows_old_and_new() {
        let diff = PlanDiff {
            action: "Price Updated",
            old_value: "$7.99".into(),
            new_value: "$9.99".into(),
        };
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let entry = PlanChange::from_diff(2, "Basic", diff, "admin@example.com", date, 856);

        assert_eq!(entry.cell("change"), "$7.99 -> $9.99");
        assert_eq!(entry.cell("affected_users"), "856");
        assert_eq!(entry.label(), "Basic Price Updated");
    }
}
