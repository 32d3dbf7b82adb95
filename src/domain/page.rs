//! Console pages and cross-page navigation targets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One page (section) of the admin console.
///
/// Each page owns exactly one data table. The order of [`PageKind::ALL`] is the
/// tab order shown in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    /// User management.
    Users,
    /// Billing and payments (transactions).
    Billing,
    /// QR code monitoring.
    QrCodes,
    /// Subscription plan management.
    Plans,
    /// Plan modification history.
    History,
    /// Outgoing notifications.
    Notifications,
}

impl PageKind {
    /// All pages in tab order.
    pub const ALL: [Self; 6] = [
        Self::Users,
        Self::Billing,
        Self::QrCodes,
        Self::Plans,
        Self::History,
        Self::Notifications,
    ];

    /// Tab title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Users => "Users",
            Self::Billing => "Billing",
            Self::QrCodes => "QR Codes",
            Self::Plans => "Plans",
            Self::History => "Plan History",
            Self::Notifications => "Notifications",
        }
    }

    /// Page heading shown above the table.
    #[must_use]
    pub const fn heading(self) -> &'static str {
        match self {
            Self::Users => "User Management",
            Self::Billing => "Billing & Payments",
            Self::QrCodes => "QR Code Monitoring",
            Self::Plans => "Plan Management",
            Self::History => "Modification History",
            Self::Notifications => "Notifications",
        }
    }

    /// Configuration key accepted by `start_page`.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Billing => "billing",
            Self::QrCodes => "qr",
            Self::Plans => "plans",
            Self::History => "history",
            Self::Notifications => "notifications",
        }
    }

    /// Parses a configuration key (case-insensitive).
    ///
    /// ```
    /// use zadmin::domain::PageKind;
    ///
    /// assert_eq!(PageKind::from_key("QR"), Some(PageKind::QrCodes));
    /// assert_eq!(PageKind::from_key("dashboard"), None);
    /// ```
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|page| page.key().eq_ignore_ascii_case(key))
    }

    /// Position in tab order.
    #[must_use]
    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|page| *page == self)
            .unwrap_or_default()
    }

    /// Next page in tab order, wrapping.
    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous page in tab order, wrapping.
    #[must_use]
    pub fn prev(self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.index() + len - 1) % len]
    }

    /// Page selected by the number keys `1..=6`.
    #[must_use]
    pub fn from_digit(digit: char) -> Option<Self> {
        let n = digit.to_digit(10)? as usize;
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Hand-off to another page, e.g. "view profile" of a user.
///
/// The receiving page switches to `page` and applies `query` as its text
/// search filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavTarget {
    /// Destination page.
    pub page: PageKind,
    /// Identifier to search for on the destination page (usually an email).
    pub query: String,
}

impl NavTarget {
    /// Creates a navigation target.
    pub fn new(page: PageKind, query: impl Into<String>) -> Self {
        Self {
            page,
            query: query.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_order_wraps_both_ways() {
        assert_eq!(PageKind::Notifications.next(), PageKind::Users);
        assert_eq!(PageKind::Users.prev(), PageKind::Notifications);
        assert_eq!(PageKind::Billing.next(), PageKind::QrCodes);
    }

    #[test]
    fn digits_map_to_tabs() {
        assert_eq!(PageKind::from_digit('1'), Some(PageKind::Users));
        assert_eq!(PageKind::from_digit('6'), Some(PageKind::Notifications));
        assert_eq!(PageKind::from_digit('0'), None);
        assert_eq!(PageKind::from_digit('7'), None);
    }
}
