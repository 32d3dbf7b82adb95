//! zadmin: A Zellij plugin admin console.
//!
//! zadmin renders a keyboard-driven admin console inside a Zellij pane:
//! - Six pages (users, billing, QR codes, plans, plan history, notifications),
//!   each a filterable, paginated data table
//! - Text, category and date filters combined with AND semantics
//! - Bulk selection with a tri-state header checkbox
//! - Row actions that mutate immediately, ask for confirmation in a dialog,
//!   navigate to another page or show a details overlay
//! - Create/edit forms with field validation, bulk plan assignment and an
//!   audit trail of plan changes

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Action emission                                  │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Table Layer   │   │ Seed Layer    │
//! │ (ui/)         │   │ (table/)      │   │ (seed/)       │
//! │ - Rendering   │   │ - Filters     │   │ - Embedded    │
//! │ - Theming     │   │ - Pagination  │   │ - JSON file   │
//! │ - Components  │   │ - Selection   │   │ - Validation  │
//! │               │   │ - Dialogs     │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Records, forms, errors (domain/)                 │
//! │  - Sandbox paths (infrastructure/)                  │
//! │  - Rotating log file (observability/)               │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use zadmin::{handle_event, initialize, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (should_render, _actions) = handle_event(&mut state, &Event::NextPage)?;
//! assert!(should_render);
//! # Ok::<(), zadmin::ZadminError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod seed;
pub mod table;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, SearchFocus};
pub use domain::{PageKind, Result, ZadminError};
pub use ui::Theme;

use seed::{EmbeddedSeed, JsonFileSeed, SeedData, SeedSource};
use std::collections::BTreeMap;
use table::DEFAULT_PAGE_SIZE;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// Configuration values are provided via Zellij's KDL layout configuration
/// and passed to the plugin during initialization.
///
/// # Example
///
/// ```kdl
/// plugin location="file:/path/to/zadmin.wasm" {
///     page_size "20"
///     start_page "plans"
///     seed_file "~/admin/seed.json"
///     theme "catppuccin-latte"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Rows per table page. Default: 10
    pub page_size: usize,

    /// Page shown on load.
    ///
    /// Options: `users`, `billing`, `qr`, `plans`, `history`,
    /// `notifications`. Default: `users`
    pub start_page: PageKind,

    /// JSON file with the initial collections.
    ///
    /// Paths starting with `~` are resolved under `/host`. When unset or
    /// unreadable the embedded demo data is used.
    pub seed_file: Option<String>,

    /// Built-in theme name to use.
    ///
    /// Options: `catppuccin-mocha`, `catppuccin-latte`, `catppuccin-frappe`,
    /// `catppuccin-macchiato`. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    ///
    /// Takes precedence over `theme_name`. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// Log level directive for the log file.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            start_page: PageKind::Users,
            seed_file: None,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// # Parameters
    ///
    /// * `config` - Configuration map from Zellij
    ///
    /// # Parsing Rules
    ///
    /// - `page_size`: String → `usize` (falls back to 10 on parse error or zero)
    /// - `start_page`: page key (falls back to `users` when unknown)
    /// - `seed_file`, `theme`, `theme_file`, `trace_level`: String →
    ///   `Option<String>`, blank values ignored
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use zadmin::{Config, PageKind};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("page_size".to_string(), "0".to_string());
    /// map.insert("start_page".to_string(), "qr".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.page_size, 10);
    /// assert_eq!(config.start_page, PageKind::QrCodes);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let text = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let page_size = config
            .get("page_size")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        let start_page = config
            .get("start_page")
            .and_then(|s| PageKind::from_key(s))
            .unwrap_or(PageKind::Users);

        Self {
            page_size,
            start_page,
            seed_file: text("seed_file"),
            theme_name: text("theme"),
            theme_file: text("theme_file"),
            trace_level: text("trace_level"),
        }
    }

    /// Seed source selected by `seed_file`.
    #[must_use]
    pub fn seed_source(&self) -> Box<dyn SeedSource> {
        match &self.seed_file {
            Some(path) => Box::new(JsonFileSeed::new(infrastructure::expand_tilde(path))),
            None => Box::new(EmbeddedSeed),
        }
    }
}

/// Loads the configured seed, falling back to the embedded data.
fn load_seed(config: &Config) -> SeedData {
    let source = config.seed_source();
    match source.load() {
        Ok(data) => {
            tracing::info!(source = %source.describe(), "seed loaded");
            data
        }
        Err(e) => {
            tracing::warn!(source = %source.describe(), error = %e, "failed to load seed, using embedded data");
            EmbeddedSeed.load().unwrap_or_else(|e| {
                tracing::error!(error = %e, "embedded seed is invalid, starting empty");
                SeedData::default()
            })
        }
    }
}

/// Resolves the theme from `theme_file`, then `theme`, then the default.
fn load_theme(config: &Config) -> Theme {
    if let Some(theme_file) = &config.theme_file {
        match Theme::from_file(infrastructure::expand_tilde(theme_file)) {
            Ok(theme) => return theme,
            Err(e) => {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
            }
        }
    }

    config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
        Theme::from_name(theme_name).unwrap_or_else(|| {
            tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
            Theme::default()
        })
    })
}

/// Initializes the plugin with configuration.
///
/// Creates a new `AppState` with:
/// - Seed collections from `seed_file` (or the embedded demo data)
/// - Loaded theme (from file, name, or default)
/// - The configured page size and start page
///
/// Startup failures never abort the plugin: each falls back to its default
/// and is logged.
///
/// # Example
///
/// ```rust
/// use zadmin::{initialize, Config, PageKind};
///
/// let config = Config {
///     start_page: PageKind::Plans,
///     ..Default::default()
/// };
///
/// let state = initialize(&config);
/// assert_eq!(state.active, PageKind::Plans);
/// ```
pub fn initialize(config: &Config) -> AppState {
    let _span = tracing::debug_span!("initialize").entered();

    let seed = load_seed(config);
    let theme = load_theme(config);
    tracing::debug!(theme = %theme.name, page_size = config.page_size, "initializing console");

    let mut state = AppState::new(seed, config.page_size, theme);
    state.switch_page(config.start_page);
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TablePage;
    use std::io::Write;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn config_defaults_on_bad_values() {
        let config = Config::from_zellij(&map(&[
            ("page_size", "many"),
            ("start_page", "dashboard"),
            ("theme", "  "),
        ]));
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.start_page, PageKind::Users);
        assert!(config.theme_name.is_none());
    }

    #[test]
    fn config_reads_every_key() {
        let config = Config::from_zellij(&map(&[
            ("page_size", "25"),
            ("start_page", "notifications"),
            ("seed_file", "~/seed.json"),
            ("theme", "catppuccin-latte"),
            ("theme_file", "/tmp/theme.toml"),
            ("trace_level", "debug"),
        ]));
        assert_eq!(config.page_size, 25);
        assert_eq!(config.start_page, PageKind::Notifications);
        assert_eq!(config.seed_file.as_deref(), Some("~/seed.json"));
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
        assert_eq!(config.theme_file.as_deref(), Some("/tmp/theme.toml"));
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
        assert_eq!(config.seed_source().describe(), "/host/seed.json");
    }

    #[test]
    fn missing_seed_file_falls_back_to_embedded() {
        let config = Config {
            seed_file: Some("/nonexistent/seed.json".to_string()),
            theme_name: Some("no-such-theme".to_string()),
            ..Default::default()
        };
        let state = initialize(&config);
        assert_eq!(state.users.len(), 12);
        assert_eq!(state.theme.name, "catppuccin-mocha");
    }

    #[test]
    fn seed_file_replaces_embedded_data() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "version": 1, "users": [] }}"#).unwrap();

        let config = Config {
            seed_file: Some(file.path().display().to_string()),
            ..Default::default()
        };
        let state = initialize(&config);
        assert_eq!(state.users.len(), 0);
        assert_eq!(state.plans.len(), 0);
    }
}
