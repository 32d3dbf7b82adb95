//! Seed source abstraction.
//!
//! Pages never reach for global data: `initialize` is handed a [`SeedSource`]
//! and builds every table from the [`SeedData`] it returns. Tests inject their
//! own collections the same way.

use super::SeedData;
use crate::domain::error::Result;

/// Provides the initial collections for every page.
///
/// # Examples
///
/// ```
/// use zadmin::seed::{EmbeddedSeed, SeedSource};
///
/// let data = EmbeddedSeed.load()?;
/// assert!(!data.users.is_empty());
/// # Ok::<(), zadmin::ZadminError>(())
/// ```
pub trait SeedSource {
    /// Short description for logs ("embedded", a file path).
    fn describe(&self) -> String;

    /// Loads and validates the collections.
    ///
    /// # Errors
    ///
    /// Returns an error when the data cannot be read, parsed or validated.
    fn load(&self) -> Result<SeedData>;
}

/// Demo data compiled into the plugin.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSeed;

const EMBEDDED_SEED: &str = include_str!("seed.json");

impl SeedSource for EmbeddedSeed {
    fn describe(&self) -> String {
        "embedded".to_string()
    }

    fn load(&self) -> Result<SeedData> {
        SeedData::from_json(EMBEDDED_SEED)
    }
}

/// In-memory collections, used by tests and embedders.
impl SeedSource for SeedData {
    fn describe(&self) -> String {
        "in-memory".to_string()
    }

    fn load(&self) -> Result<SeedData> {
        self.validate()?;
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_seed_is_valid_and_populated() {
        let data = EmbeddedSeed.load().unwrap();
        assert_eq!(data.users.len(), 12);
        assert_eq!(data.plans.len(), 4);
        assert_eq!(data.history.len(), 2);
        assert!(!data.transactions.is_empty());
        assert!(!data.qr_codes.is_empty());
        assert!(!data.notifications.is_empty());
    }

    #[test]
    fn embedded_plans_match_plan_names() {
        let data = EmbeddedSeed.load().unwrap();
        let names: Vec<_> = data.plans.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, crate::domain::PLAN_NAMES);
        assert!(data
            .users
            .iter()
            .all(|u| crate::domain::PLAN_NAMES.contains(&u.plan.as_str())));
    }
}
