//! User accounts shown on the user management page.

use crate::domain::error::{Result, ZadminError};
use crate::domain::form::{FieldRule, Form, DATE_FORMAT};
use crate::domain::page::{NavTarget, PageKind};
use crate::domain::record::{
    ActionKind, Column, FieldValue, FilterKind, FilterSpec, Record, RecordId, SEARCH_FILTER,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Plan names a user can be assigned to.
pub const PLAN_NAMES: &[&str] = &["Free", "Basic", "Premium", "Enterprise"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Editor,
    Viewer,
}

impl Role {
    pub const ALL: &'static [&'static str] = &["Admin", "Editor", "Viewer"];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Editor => "Editor",
            Self::Viewer => "Viewer",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Admin" => Some(Self::Admin),
            "Editor" => Some(Self::Editor),
            "Viewer" => Some(Self::Viewer),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserStatus {
    Active,
    Suspended,
}

impl UserStatus {
    pub const ALL: &'static [&'static str] = &["Active", "Suspended"];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Suspended => "Suspended",
        }
    }

    /// The other status.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Suspended,
            Self::Suspended => Self::Active,
        }
    }
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: UserStatus,
    /// Name of the subscribed plan.
    pub plan: String,
    pub joined: NaiveDate,
}

impl User {
    /// Returns a copy subscribed to `plan`.
    #[must_use]
    pub fn with_plan(&self, plan: &str) -> Self {
        Self {
            plan: plan.to_string(),
            ..self.clone()
        }
    }
}

const COLUMNS: &[Column] = &[
    Column::new("name", "Name", 18),
    Column::new("email", "Email", 24),
    Column::new("role", "Role", 8),
    Column::new("status", "Status", 10),
    Column::new("plan", "Plan", 11),
    Column::new("joined", "Joined", 10),
];

const FILTERS: &[FilterSpec] = &[
    FilterSpec {
        key: SEARCH_FILTER,
        label: "Search",
        kind: FilterKind::Text {
            fields: &["name", "email"],
        },
    },
    FilterSpec {
        key: "role",
        label: "Role",
        kind: FilterKind::Category {
            field: "role",
            options: Role::ALL,
        },
    },
    FilterSpec {
        key: "status",
        label: "Status",
        kind: FilterKind::Category {
            field: "status",
            options: UserStatus::ALL,
        },
    },
    FilterSpec {
        key: "plan",
        label: "Plan",
        kind: FilterKind::Category {
            field: "plan",
            options: PLAN_NAMES,
        },
    },
    FilterSpec {
        key: "joined",
        label: "Joined",
        kind: FilterKind::Date { field: "joined" },
    },
];

const ACTIONS: &[ActionKind] = &[
    ActionKind::View,
    ActionKind::Details,
    ActionKind::Edit,
    ActionKind::ToggleStatus,
    ActionKind::Delete,
];

impl Record for User {
    const KIND: &'static str = "user";

    fn id(&self) -> RecordId {
        self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        match key {
            "name" => Some(FieldValue::Text(&self.name)),
            "email" => Some(FieldValue::Text(&self.email)),
            "role" => Some(FieldValue::Text(self.role.as_str())),
            "status" => Some(FieldValue::Text(self.status.as_str())),
            "plan" => Some(FieldValue::Text(&self.plan)),
            "joined" => Some(FieldValue::Date(self.joined)),
            _ => None,
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
            ("Name", self.name.clone()),
            ("Email", self.email.clone()),
            ("Role", self.role.as_str().to_string()),
            ("Status", self.status.as_str().to_string()),
            ("Plan", self.plan.clone()),
            ("Joined", self.joined.format(DATE_FORMAT).to_string()),
        ]
    }

    fn transition(&self, kind: ActionKind) -> Option<Self> {
        match kind {
            ActionKind::ToggleStatus => Some(Self {
                status: self.status.toggled(),
                ..self.clone()
            }),
            _ => None,
        }
    }

    /// Users link to the QR codes they own.
    fn view_target(&self) -> Option<NavTarget> {
        Some(NavTarget::new(PageKind::QrCodes, &self.email))
    }

    fn edit_form(&self) -> Option<Form> {
        Some(
            Form::new(format!("Edit {}", self.name))
                .field("name", "Name", FieldRule::Required, &self.name)
                .field("email", "Email", FieldRule::Email, &self.email)
                .field("role", "Role", choice(Role::ALL), self.role.as_str())
                .field("plan", "Plan", choice(PLAN_NAMES), &self.plan),
        )
    }

    fn apply_form(&self, form: &Form) -> Result<Self> {
        let role = Role::parse(form.value("role"))
            .ok_or_else(|| ZadminError::validation("role", "Choose a role"))?;
        Ok(Self {
            name: form.value("name").to_string(),
            email: form.value("email").to_string(),
            role,
            plan: form.value("plan").to_string(),
            ..self.clone()
        })
    }
}

pub(crate) fn choice(options: &[&str]) -> FieldRule {
    FieldRule::OneOf(options.iter().map(|o| (*o).to_string()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> User {
        User {
            id: 2,
            name: "Jane Smith".into(),
            email: "jane@example.com".into(),
            role: Role::Editor,
            status: UserStatus::Active,
            plan: "Premium".into(),
            joined: NaiveDate::from_ymd_opt(2023, 11, 2).unwrap(),
        }
    }

    #[test]
    fn toggle_flips_between_active_and_suspended() {
        let user = jane();
        let suspended = user.transition(ActionKind::ToggleStatus).unwrap();
        assert_eq!(suspended.status, UserStatus::Suspended);
        let active = suspended.transition(ActionKind::ToggleStatus).unwrap();
        assert_eq!(active, user);
        assert!(user.transition(ActionKind::Send).is_none());
    }

    #[test]
    fn edit_form_round_trips_through_apply() {
        let user = jane();
        let mut form = user.edit_form().unwrap();
        assert!(form.validate().is_ok());

        form.focus = 2;
        form.push_char('a');
        let edited = user.apply_form(&form).unwrap();
        assert_eq!(edited.role, Role::Admin);
        assert_eq!(edited.id, user.id);
        assert_eq!(edited.joined, user.joined);
    }

    #[test]
    fn view_links_to_owned_qr_codes() {
        let target = jane().view_target().unwrap();
        assert_eq!(target.page, PageKind::QrCodes);
        assert_eq!(target.query, "jane@example.com");
    }
}
