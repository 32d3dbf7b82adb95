//! Outgoing notifications composed by administrators.

use crate::domain::error::{Result, ZadminError};
use crate::domain::form::{FieldRule, Form, DATE_FORMAT};
use crate::domain::record::{
    ActionKind, Column, FieldValue, FilterKind, FilterSpec, Record, RecordId, SEARCH_FILTER,
};
use crate::domain::user::choice;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Audience {
    All,
    Free,
    Paid,
    Admins,
}

impl Audience {
    pub const ALL: &'static [&'static str] = &["All users", "Free users", "Paid users", "Admins"];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "All users",
            Self::Free => "Free users",
            Self::Paid => "Paid users",
            Self::Admins => "Admins",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "All users" => Some(Self::All),
            "Free users" => Some(Self::Free),
            "Paid users" => Some(Self::Paid),
            "Admins" => Some(Self::Admins),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Channel {
    Email,
    Push,
    InApp,
}

impl Channel {
    pub const ALL: &'static [&'static str] = &["Email", "Push", "In-app"];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::Push => "Push",
            Self::InApp => "In-app",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Email" => Some(Self::Email),
            "Push" => Some(Self::Push),
            "In-app" => Some(Self::InApp),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryStatus {
    Draft,
    Scheduled,
    Sent,
}

impl DeliveryStatus {
    pub const ALL: &'static [&'static str] = &["Draft", "Scheduled", "Sent"];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Scheduled => "Scheduled",
            Self::Sent => "Sent",
        }
    }
}

/// A notification addressed to a user segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: RecordId,
    pub title: String,
    pub body: String,
    pub audience: Audience,
    pub channel: Channel,
    pub status: DeliveryStatus,
    /// Send date, or the scheduled date for pending notifications.
    pub date: NaiveDate,
}

const COLUMNS: &[Column] = &[
    Column::new("title", "Title", 26),
    Column::new("audience", "Audience", 11),
    Column::new("channel", "Channel", 8),
    Column::new("status", "Status", 10),
    Column::new("date", "Date", 10),
];

const FILTERS: &[FilterSpec] = &[
    FilterSpec {
        key: SEARCH_FILTER,
        label: "Search",
        kind: FilterKind::Text {
            fields: &["title", "body"],
        },
    },
    FilterSpec {
        key: "status",
        label: "Status",
        kind: FilterKind::Category {
            field: "status",
            options: DeliveryStatus::ALL,
        },
    },
    FilterSpec {
        key: "channel",
        label: "Channel",
        kind: FilterKind::Category {
            field: "channel",
            options: Channel::ALL,
        },
    },
    FilterSpec {
        key: "date",
        label: "Date",
        kind: FilterKind::Date { field: "date" },
    },
];

const ACTIONS: &[ActionKind] = &[
    ActionKind::Details,
    ActionKind::Edit,
    ActionKind::Send,
    ActionKind::Delete,
];

impl Notification {
    fn form(title: String, existing: Option<&Self>) -> Form {
        Form::new(title)
            .field("title", "Title", FieldRule::Required, existing.map_or("", |n| n.title.as_str()))
            .field("body", "Message", FieldRule::Required, existing.map_or("", |n| n.body.as_str()))
            .field(
                "audience",
                "Audience",
                choice(Audience::ALL),
                existing.map_or("", |n| n.audience.as_str()),
            )
            .field(
                "channel",
                "Channel",
                choice(Channel::ALL),
                existing.map_or("", |n| n.channel.as_str()),
            )
            .field(
                "date",
                "Schedule for (YYYY-MM-DD)",
                FieldRule::Date,
                existing.map_or_else(String::new, |n| n.date.format(DATE_FORMAT).to_string()),
            )
    }

    fn parse_form(form: &Form) -> Result<(Audience, Channel, Option<NaiveDate>)> {
        let audience = Audience::parse(form.value("audience"))
            .ok_or_else(|| ZadminError::validation("audience", "Choose an audience"))?;
        let channel = Channel::parse(form.value("channel"))
            .ok_or_else(|| ZadminError::validation("channel", "Choose a channel"))?;
        Ok((audience, channel, form.date("date")?))
    }
}

impl Record for Notification {
    const KIND: &'static str = "notification";

    fn id(&self) -> RecordId {
        self.id
    }

    fn label(&self) -> String {
        self.title.clone()
    }

    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        match key {
            "title" => Some(FieldValue::Text(&self.title)),
            "body" => Some(FieldValue::Text(&self.body)),
            "audience" => Some(FieldValue::Text(self.audience.as_str())),
            "channel" => Some(FieldValue::Text(self.channel.as_str())),
            "status" => Some(FieldValue::Text(self.status.as_str())),
            "date" => Some(FieldValue::Date(self.date)),
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
            ("Title", self.title.clone()),
            ("Message", self.body.clone()),
            ("Audience", self.audience.as_str().to_string()),
            ("Channel", self.channel.as_str().to_string()),
            ("Status", self.status.as_str().to_string()),
            ("Date", self.date.format(DATE_FORMAT).to_string()),
        ]
    }

    /// Sending is only possible once.
    fn transition(&self, kind: ActionKind) -> Option<Self> {
        match (kind, self.status) {
            (ActionKind::Send, DeliveryStatus::Draft | DeliveryStatus::Scheduled) => Some(Self {
                status: DeliveryStatus::Sent,
                date: chrono::Utc::now().date_naive(),
                ..self.clone()
            }),
            _ => None,
        }
    }

    fn edit_form(&self) -> Option<Form> {
        if self.status == DeliveryStatus::Sent {
            return None;
        }
        Some(Self::form(format!("Edit {}", self.title), Some(self)))
    }

    fn apply_form(&self, form: &Form) -> Result<Self> {
        let (audience, channel, date) = Self::parse_form(form)?;
        Ok(Self {
            title: form.value("title").to_string(),
            body: form.value("body").to_string(),
            audience,
            channel,
            status: if date.is_some() {
                DeliveryStatus::Scheduled
            } else {
                DeliveryStatus::Draft
            },
            date: date.unwrap_or(self.date),
            ..self.clone()
        })
    }

    fn create_form() -> Option<Form> {
        Some(Self::form("New notification".to_string(), None))
    }

    /// A date makes the notification scheduled, otherwise it is a draft dated today.
    fn from_form(id: RecordId, form: &Form) -> Result<Self> {
        let (audience, channel, date) = Self::parse_form(form)?;
        Ok(Self {
            id,
            title: form.value("title").to_string(),
            body: form.value("body").to_string(),
            audience,
            channel,
            status: if date.is_some() {
                DeliveryStatus::Scheduled
            } else {
                DeliveryStatus::Draft
            },
            date: date.unwrap_or_else(|| chrono::Utc::now().date_naive()),
        })
    }
}
