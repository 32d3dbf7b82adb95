//! QR codes shown on the monitoring page.

use crate::domain::form::DATE_FORMAT;
use crate::domain::page::{NavTarget, PageKind};
use crate::domain::record::{
    ActionKind, Column, FieldValue, FilterKind, FilterSpec, Record, RecordId, SEARCH_FILTER,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QrKind {
    Dynamic,
    Static,
}

impl QrKind {
    pub const ALL: &'static [&'static str] = &["Dynamic", "Static"];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dynamic => "Dynamic",
            Self::Static => "Static",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QrStatus {
    Active,
    Inactive,
}

impl QrStatus {
    pub const ALL: &'static [&'static str] = &["Active", "Inactive"];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

/// A generated QR code and its scan counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrCode {
    pub id: RecordId,
    pub label: String,
    /// Email of the owning user.
    pub owner: String,
    pub kind: QrKind,
    pub status: QrStatus,
    pub scans: u64,
    pub unique_scans: u64,
    pub created: NaiveDate,
}

impl QrCode {
    /// Share of scans that came from distinct visitors, in whole percent.
    #[must_use]
    pub fn unique_ratio(&self) -> u64 {
        if self.scans == 0 {
            0
        } else {
            self.unique_scans * 100 / self.scans
        }
    }
}

const COLUMNS: &[Column] = &[
    Column::new("label", "Label", 20),
    Column::new("owner", "Owner", 22),
    Column::new("kind", "Type", 8),
    Column::new("status", "Status", 9),
    Column::new("scans", "Scans", 7),
    Column::new("created", "Created", 10),
];

const FILTERS: &[FilterSpec] = &[
    FilterSpec {
        key: SEARCH_FILTER,
        label: "Search",
        kind: FilterKind::Text {
            fields: &["label", "owner"],
        },
    },
    FilterSpec {
        key: "kind",
        label: "Type",
        kind: FilterKind::Category {
            field: "kind",
            options: QrKind::ALL,
        },
    },
    FilterSpec {
        key: "status",
        label: "Status",
        kind: FilterKind::Category {
            field: "status",
            options: QrStatus::ALL,
        },
    },
    FilterSpec {
        key: "created",
        label: "Created",
        kind: FilterKind::Date { field: "created" },
    },
];

const ACTIONS: &[ActionKind] = &[
    ActionKind::View,
    ActionKind::Details,
    ActionKind::Deactivate,
    ActionKind::Delete,
];

impl Record for QrCode {
    const KIND: &'static str = "QR code";

    fn id(&self) -> RecordId {
        self.id
    }

    fn label(&self) -> String {
        self.label.clone()
    }

    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        match key {
            "label" => Some(FieldValue::Text(&self.label)),
            "owner" => Some(FieldValue::Text(&self.owner)),
            "kind" => Some(FieldValue::Text(self.kind.as_str())),
            "status" => Some(FieldValue::Text(self.status.as_str())),
            "scans" => Some(FieldValue::Number(saturating_i64(self.scans))),
            "unique_scans" => Some(FieldValue::Number(saturating_i64(self.unique_scans))),
            "created" => Some(FieldValue::Date(self.created)),
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

    /// Analytics projection.
    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Label", self.label.clone()),
            ("Owner", self.owner.clone()),
            ("Type", self.kind.as_str().to_string()),
            ("Status", self.status.as_str().to_string()),
            ("Total scans", self.scans.to_string()),
            ("Unique scans", self.unique_scans.to_string()),
            ("Unique ratio", format!("{}%", self.unique_ratio())),
            ("Created", self.created.format(DATE_FORMAT).to_string()),
        ]
    }

    fn transition(&self, kind: ActionKind) -> Option<Self> {
        match (kind, self.status) {
            (ActionKind::Deactivate, QrStatus::Active) => Some(Self {
                status: QrStatus::Inactive,
                ..self.clone()
            }),
            _ => None,
        }
    }

    fn view_target(&self) -> Option<NavTarget> {
        Some(NavTarget::new(PageKind::Users, &self.owner))
    }
}

fn saturating_i64(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
