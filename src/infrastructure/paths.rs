//! Path helpers for the Zellij sandbox environment.
//!
//! In the plugin sandbox the host filesystem is mounted under `/host` and the
//! plugin's own data directory under `/data`.

use std::path::PathBuf;

/// Returns the plugin data directory (`/data`), where the log file lives.
///
/// # Examples
///
/// ```
/// use zadmin::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/data"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/data")
}

/// Expands tilde paths to use the `/host` prefix for the Zellij sandbox.
///
/// Used for the `seed_file` and `theme_file` configuration values.
///
/// # Examples
///
/// ```
/// use zadmin::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/seed.json"), "/host/seed.json");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}
