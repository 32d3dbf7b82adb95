//! Zellij plugin wrapper and entry point.
//!
//! This module provides the thin integration layer between the zadmin library
//! and the Zellij plugin system. It implements the `ZellijPlugin` trait to
//! handle Zellij events and lifecycle.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Register for Key and `PermissionRequestResult` events
//! 3. **Update**: Map keys to library events, delegate to `handle_event`,
//!    execute the returned actions
//! 4. **Render**: Call library render function
//!
//! # Event Mapping
//!
//! Keys are mapped according to the current input mode:
//!
//! - Details overlay: any key → `Event::DismissInfo`
//! - Dialog: characters edit the focused field, `Tab`/`Shift+Tab` move
//!   between fields, `Enter` submits, `Esc` cancels
//! - Search (typing): characters edit the query, `Enter` focuses the results,
//!   `Esc` clears the search
//! - Normal and search (navigating): the command keys below
//!
//! # Keybindings
//!
//! Global (all modes except dialogs):
//! - `Ctrl+n`: Move down
//! - `Ctrl+p`: Move up
//!
//! Normal mode:
//! - `j`/`k` (`Down`/`Up`): Row cursor
//! - `h`/`l` (`Left`/`Right`): Previous/next page of the table
//! - `g`/`G`: First/last page
//! - `Tab`/`Shift+Tab`, `1`..`6`: Switch console page
//! - `/`: Search
//! - `f`/`c`: Focus next filter / cycle its value
//! - `d`: Date filter, `x`: clear filters
//! - `Space`: Toggle row, `a`: toggle all, `A`: clear selection
//! - `Enter`: View, `i`: details, `e`: edit, `D`: delete
//! - `t`: toggle status, `z`: deactivate, `s`: send, `n`: create
//! - `B`: delete selected, `P`: assign plan to selected users
//! - `E`/`X`/`R`: export CSV/XLSX/PDF, `+`/`-`: page size
//! - `q`: Close plugin

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use zadmin::app::{ExportFormat, Notice};
use zadmin::domain::ActionKind;
use zadmin::{handle_event, Action, Config, Event, InputMode, PageKind, SearchFocus};

register_plugin!(State);

/// Plugin state wrapper.
///
/// Wraps the library's `AppState` with Zellij-specific concerns.
struct State {
    /// Core application state from library layer.
    app: zadmin::app::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: zadmin::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// Called once during plugin startup. Parses configuration, initializes
    /// tracing and application state, requests permissions and subscribes to
    /// events.
    ///
    /// # Permissions
    ///
    /// Requests:
    /// - `ChangeApplicationState`: Hide the plugin pane on `q`
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        zadmin::observability::init_tracing(&config);

        let _guard = tracing::debug_span!("plugin_load").entered();

        tracing::debug!(config = ?config, "parsed configuration");
        self.app = zadmin::initialize(&config);

        request_permission(&[PermissionType::ChangeApplicationState]);
        subscribe(&[EventType::Key, EventType::PermissionRequestResult]);

        tracing::info!(page = %self.app.active, "plugin loaded");
    }

    /// Handles incoming Zellij events.
    ///
    /// # Returns
    ///
    /// - `true` if the plugin UI should re-render
    /// - `false` if the event was ignored or resulted in no state changes
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                tracing::debug!(status = ?status, "permission request answered");
                return false;
            }
            _ => return false,
        };

        self.dispatch(&our_event)
    }

    /// Renders the plugin UI.
    ///
    /// # Parameters
    ///
    /// * `rows` - Terminal height in rows
    /// * `cols` - Terminal width in columns
    fn render(&mut self, rows: usize, cols: usize) {
        zadmin::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Runs `event` through the library and executes the resulting actions.
    fn dispatch(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.app, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled"
                );
                actions
                    .into_iter()
                    .fold(should_render, |render, action| self.execute_action(action) || render)
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    /// Maps a key press to a library event for the current input mode.
    ///
    /// Returns `None` for keys without a binding.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        let shift = key.has_modifiers(&[KeyModifier::Shift]);

        match self.app.input_mode {
            InputMode::Info => Some(Event::DismissInfo),
            InputMode::Dialog => match key.bare_key {
                BareKey::Esc => Some(Event::Escape),
                BareKey::Enter => Some(Event::Submit),
                BareKey::Tab if shift => Some(Event::PrevField),
                BareKey::Tab | BareKey::Down => Some(Event::NextField),
                BareKey::Up => Some(Event::PrevField),
                BareKey::Backspace => Some(Event::Backspace),
                BareKey::Char(c) => Some(Event::Char(c)),
                _ => None,
            },
            InputMode::Search(SearchFocus::Typing) => {
                if let Some(event) = Self::map_global_key(key) {
                    return Some(event);
                }
                match key.bare_key {
                    BareKey::Esc => Some(Event::ExitSearch),
                    BareKey::Enter | BareKey::Down => Some(Event::FocusResults),
                    BareKey::Backspace => Some(Event::Backspace),
                    BareKey::Char(c) => Some(Event::Char(c)),
                    _ => None,
                }
            }
            InputMode::Normal | InputMode::Search(SearchFocus::Navigating) => {
                Self::map_global_key(key).or_else(|| self.map_command_key(key, shift))
            }
        }
    }

    fn map_global_key(key: &KeyWithModifier) -> Option<Event> {
        if !key.has_modifiers(&[KeyModifier::Ctrl]) {
            return None;
        }
        match key.bare_key {
            BareKey::Char('n') => Some(Event::KeyDown),
            BareKey::Char('p') => Some(Event::KeyUp),
            _ => None,
        }
    }

    fn map_command_key(&self, key: &KeyWithModifier, shift: bool) -> Option<Event> {
        let event = match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Left | BareKey::Char('h') => Event::PrevPage,
            BareKey::Right | BareKey::Char('l') => Event::NextPage,
            BareKey::Char('g') => Event::FirstPage,
            BareKey::Char('G') => Event::LastPage,
            BareKey::Tab if shift => Event::PrevSection,
            BareKey::Tab => Event::NextSection,
            BareKey::Char(c @ '1'..='6') => Event::GoToSection(PageKind::from_digit(c)?),
            BareKey::Char('/') => match self.app.input_mode {
                InputMode::Search(_) => Event::FocusSearchBar,
                _ => Event::SearchMode,
            },
            BareKey::Esc => Event::Escape,
            BareKey::Char('f') => Event::FocusNextFilter,
            BareKey::Char('c') => Event::CycleFilter,
            BareKey::Char('d') => Event::DateFilter,
            BareKey::Char('x') => Event::ClearFilters,
            BareKey::Char(' ') => Event::ToggleRow,
            BareKey::Char('a') => Event::ToggleAll,
            BareKey::Char('A') => Event::ClearSelection,
            BareKey::Enter => Event::RowAction(ActionKind::View),
            BareKey::Char('i') => Event::RowAction(ActionKind::Details),
            BareKey::Char('e') => Event::RowAction(ActionKind::Edit),
            BareKey::Char('D') => Event::RowAction(ActionKind::Delete),
            BareKey::Char('t') => Event::RowAction(ActionKind::ToggleStatus),
            BareKey::Char('z') => Event::RowAction(ActionKind::Deactivate),
            BareKey::Char('s') => Event::RowAction(ActionKind::Send),
            BareKey::Char('n') => Event::Create,
            BareKey::Char('B') => Event::BulkDelete,
            BareKey::Char('P') => Event::BulkAssignPlan,
            BareKey::Char(c @ ('E' | 'X' | 'R')) => Event::Export(ExportFormat::from_key(c)?),
            BareKey::Char('+' | '=') => Event::GrowPageSize,
            BareKey::Char('-') => Event::ShrinkPageSize,
            BareKey::Char('q') => Event::CloseFocus,
            _ => return None,
        };
        Some(event)
    }

    /// Executes a side effect action. Returns `true` when the UI changed.
    ///
    /// # Action Types
    ///
    /// - `CloseFocus`: Hide plugin UI
    /// - `Navigate`: Fed back into the library as `Event::NavigateTo`
    /// - `Notify`: Show the notice in the status line
    /// - `Export`: Logged and acknowledged with a notice
    fn execute_action(&mut self, action: Action) -> bool {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
                false
            }
            Action::Navigate(target) => self.dispatch(&Event::NavigateTo(target)),
            Action::Notify(notice) => {
                self.app.show_notice(notice);
                true
            }
            Action::Export { page, format, ids } => {
                tracing::info!(page = %page, format = format.extension(), rows = ids.len(), "export requested");
                self.app.show_notice(Notice::info(format!(
                    "Exporting {} {} rows as {}",
                    ids.len(),
                    page.title(),
                    format.extension().to_uppercase()
                )));
                true
            }
        }
    }
}
