//! Payment transactions shown on the billing page.

use crate::domain::form::{format_cents, DATE_FORMAT};
use crate::domain::page::{NavTarget, PageKind};
use crate::domain::record::{
    ActionKind, Column, FieldValue, FilterKind, FilterSpec, Record, RecordId, SEARCH_FILTER,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Card,
    PayPal,
    BankTransfer,
}

impl PaymentMethod {
    pub const ALL: &'static [&'static str] = &["Card", "PayPal", "Bank Transfer"];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Card => "Card",
            Self::PayPal => "PayPal",
            Self::BankTransfer => "Bank Transfer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Paid,
    Pending,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub const ALL: &'static [&'static str] = &["Paid", "Pending", "Failed", "Refunded"];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paid => "Paid",
            Self::Pending => "Pending",
            Self::Failed => "Failed",
            Self::Refunded => "Refunded",
        }
    }
}

/// A single payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: RecordId,
    /// Email of the paying user.
    pub user_email: String,
    /// Amount in cents.
    pub amount: i64,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub date: NaiveDate,
}

const COLUMNS: &[Column] = &[
    Column::new("id", "Invoice", 9),
    Column::new("user_email", "User", 24),
    Column::new("amount", "Amount", 10),
    Column::new("method", "Method", 14),
    Column::new("status", "Status", 9),
    Column::new("date", "Date", 10),
];

const FILTERS: &[FilterSpec] = &[
    FilterSpec {
        key: SEARCH_FILTER,
        label: "Search",
        kind: FilterKind::Text {
            fields: &["user_email"],
        },
    },
    FilterSpec {
        key: "status",
        label: "Status",
        kind: FilterKind::Category {
            field: "status",
            options: PaymentStatus::ALL,
        },
    },
    FilterSpec {
        key: "method",
        label: "Method",
        kind: FilterKind::Category {
            field: "method",
            options: PaymentMethod::ALL,
        },
    },
    FilterSpec {
        key: "date",
        label: "Date",
        kind: FilterKind::Date { field: "date" },
    },
];

const ACTIONS: &[ActionKind] = &[ActionKind::View, ActionKind::Details];

impl Record for Transaction {
    const KIND: &'static str = "transaction";

    fn id(&self) -> RecordId {
        self.id
    }

    fn label(&self) -> String {
        format!("INV-{:04}", self.id)
    }

    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        match key {
            "user_email" => Some(FieldValue::Text(&self.user_email)),
            "amount" => Some(FieldValue::Number(self.amount)),
            "method" => Some(FieldValue::Text(self.method.as_str())),
            "status" => Some(FieldValue::Text(self.status.as_str())),
            "date" => Some(FieldValue::Date(self.date)),
            _ => None,
        }
    }

    fn cell(&self, key: &str) -> String {
        match key {
            "id" => self.label(),
            "amount" => format_cents(self.amount),
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
            ("Invoice", self.label()),
            ("User", self.user_email.clone()),
            ("Amount", format_cents(self.amount)),
            ("Method", self.method.as_str().to_string()),
            ("Status", self.status.as_str().to_string()),
            ("Date", self.date.format(DATE_FORMAT).to_string()),
        ]
    }

    fn view_target(&self) -> Option<NavTarget> {
        Some(NavTarget::new(PageKind::Users, &self.user_email))
    }
}
