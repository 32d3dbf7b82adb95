//! Seed collections for the console pages.
//!
//! The console has no backend: every page starts from a static collection
//! loaded once at startup through a [`SeedSource`]. Two sources exist:
//!
//! - [`EmbeddedSeed`]: the demo data compiled into the plugin (default)
//! - [`JsonFileSeed`]: a JSON file chosen with the `seed_file` option
//!
//! Both produce a [`SeedData`] that has passed [`SeedData::validate`].
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "users": [{ "id": 1, "name": "John Doe", "email": "john@example.com",
//!               "role": "Admin", "status": "Active", "plan": "Basic",
//!               "joined": "2023-06-12" }],
//!   "transactions": [],
//!   "qr_codes": [],
//!   "plans": [],
//!   "history": [],
//!   "notifications": []
//! }
//! ```
//!
//! Missing collections default to empty.

pub mod file;
pub mod source;

pub use file::JsonFileSeed;
pub use source::{EmbeddedSeed, SeedSource};

use crate::domain::error::{Result, ZadminError};
use crate::domain::{Notification, Plan, PlanChange, QrCode, Record, Transaction, User};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Seed file format version understood by this build.
pub const SEED_VERSION: u32 = 1;

/// All page collections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedData {
    /// Version of the seed format.
    pub version: u32,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub qr_codes: Vec<QrCode>,
    #[serde(default)]
    pub plans: Vec<Plan>,
    #[serde(default)]
    pub history: Vec<PlanChange>,
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

impl Default for SeedData {
    fn default() -> Self {
        Self {
            version: SEED_VERSION,
            users: Vec::new(),
            transactions: Vec::new(),
            qr_codes: Vec::new(),
            plans: Vec::new(),
            history: Vec::new(),
            notifications: Vec::new(),
        }
    }
}

impl SeedData {
    /// Parses and validates seed JSON.
    ///
    /// # Errors
    ///
    /// - [`ZadminError::Json`] when the text is not valid seed JSON
    /// - [`ZadminError::Seed`] when [`SeedData::validate`] fails
    pub fn from_json(text: &str) -> Result<Self> {
        let data: Self = serde_json::from_str(text)?;
        data.validate()?;
        Ok(data)
    }

    /// Checks the format version and that ids are unique per collection.
    ///
    /// # Errors
    ///
    /// Returns [`ZadminError::Seed`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.version != SEED_VERSION {
            return Err(ZadminError::Seed(format!(
                "unsupported seed version {} (expected {SEED_VERSION})",
                self.version
            )));
        }
        unique_ids(&self.users)?;
        unique_ids(&self.transactions)?;
        unique_ids(&self.qr_codes)?;
        unique_ids(&self.plans)?;
        unique_ids(&self.history)?;
        unique_ids(&self.notifications)?;
        Ok(())
    }
}

fn unique_ids<R: Record>(records: &[R]) -> Result<()> {
    let mut seen = BTreeSet::new();
    match records.iter().find(|r| !seen.insert(r.id())) {
        Some(dup) => Err(ZadminError::Seed(format!(
            "duplicate {} id {}",
            R::KIND,
            dup.id()
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_collections_default_to_empty() {
        let data = SeedData::from_json(r#"{ "version": 1 }"#).unwrap();
        assert!(data.users.is_empty());
        assert!(data.notifications.is_empty());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let json = r#"{
            "version": 1,
            "plans": [
                { "id": 1, "name": "Free", "description": "d", "features": [], "qr_limit": 5,
                  "price": 0, "billing_cycle": "monthly", "status": "active", "subscribers": 0 },
                { "id": 1, "name": "Basic", "description": "d", "features": [], "qr_limit": 50,
                  "price": 999, "billing_cycle": "monthly", "status": "active", "subscribers": 0 }
            ]
        }"#;
        let err = SeedData::from_json(json).unwrap_err();
        assert!(matches!(err, ZadminError::Seed(ref msg) if msg.contains("duplicate plan id 1")));
    }

    #[test]
    fn unknown_version_is_rejected() {
        let err = SeedData::from_json(r#"{ "version": 7 }"#).unwrap_err();
        assert!(matches!(err, ZadminError::Seed(_)));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = SeedData::from_json("{ users: ").unwrap_err();
        assert!(matches!(err, ZadminError::Json(_)));
    }
}
