//! JSON seed file source.

use super::{SeedData, SeedSource};
use crate::domain::error::Result;
use std::path::PathBuf;

/// Seed collections read from a JSON file.
///
/// The file is read on every [`SeedSource::load`] call; the console only
/// loads once, at startup.
#[derive(Debug, Clone)]
pub struct JsonFileSeed {
    path: PathBuf,
}

impl JsonFileSeed {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SeedSource for JsonFileSeed {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<SeedData> {
        tracing::debug!(path = ?self.path, "loading seed file");
        let text = std::fs::read_to_string(&self.path)?;
        let data = SeedData::from_json(&text)?;
        tracing::info!(
            path = ?self.path,
            users = data.users.len(),
            plans = data.plans.len(),
            "seed file loaded"
        );
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ZadminError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn loads_collections_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "version": 1,
                "users": [{{ "id": 7, "name": "Ann Lee", "email": "ann@example.com",
                            "role": "Viewer", "status": "Suspended", "plan": "Free",
                            "joined": "2024-02-29" }}]
            }}"#
        )
        .unwrap();

        let data = JsonFileSeed::new(file.path()).load().unwrap();
        assert_eq!(data.users.len(), 1);
        assert_eq!(data.users[0].email, "ann@example.com");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonFileSeed::new(dir.path().join("absent.json"))
            .load()
            .unwrap_err();
        assert!(matches!(err, ZadminError::Io(_)));
    }
}
