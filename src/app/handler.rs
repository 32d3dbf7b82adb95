//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user input,
//! translating it into state changes and action sequences. It is the single
//! entry point for every state change in the console.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the plugin runtime (key presses, fed-back navigation)
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` and [`TablePage`] methods
//! 4. Recoverable errors are turned into notices or dropped
//! 5. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! Events fall into several categories:
//! - **Navigation**: `KeyDown`, `KeyUp`, `NextPage`, `NextSection`, `GoToSection`
//! - **Input**: `Char`, `Backspace`, `Escape`, `NextField`, `Submit`
//! - **Filters**: `SearchMode`, `FocusNextFilter`, `CycleFilter`, `DateFilter`
//! - **Selection**: `ToggleRow`, `ToggleAll`, `ClearSelection`
//! - **Actions**: `RowAction`, `Create`, `BulkDelete`, `BulkAssignPlan`, `Export`
//!
//! # Example
//!
//! ```rust
//! use zadmin::app::{handle_event, AppState, Event};
//! use zadmin::seed::{EmbeddedSeed, SeedSource};
//! use zadmin::ui::theme::Theme;
//!
//! let mut state = AppState::new(EmbeddedSeed.load()?, 10, Theme::default());
//! let (should_render, actions) = handle_event(&mut state, &Event::KeyDown)?;
//! assert!(should_render);
//! assert!(actions.is_empty());
//! # Ok::<(), zadmin::ZadminError>(())
//! ```
//!
//! [`TablePage`]: crate::table::TablePage

use super::actions::{Action, ExportFormat, Notice};
use super::modes::{InputMode, SearchFocus};
use super::state::AppState;
use crate::domain::error::{Result, ZadminError};
use crate::domain::page::{NavTarget, PageKind};
use crate::domain::record::ActionKind;
use crate::table::Dispatch;

/// Events triggered by user input or fed back from actions.
///
/// Each event represents a discrete occurrence that may cause state changes
/// and action emissions. The event handler processes these sequentially,
/// ensuring deterministic state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the row cursor down by one row (wraps within the page).
    KeyDown,
    /// Moves the row cursor up by one row (wraps within the page).
    KeyUp,

    NextPage,
    PrevPage,
    FirstPage,
    LastPage,

    /// Shows the next console page (tab).
    NextSection,
    /// Shows the previous console page (tab).
    PrevSection,
    /// Shows a specific console page.
    GoToSection(PageKind),

    /// Enters search mode with typing focus.
    SearchMode,
    /// Focuses the search input field (from navigating mode).
    FocusSearchBar,
    /// Focuses the search results (from typing mode).
    FocusResults,
    /// Exits search mode and clears the query.
    ExitSearch,

    /// Appends a character to the search query or the focused dialog field.
    Char(char),
    /// Removes the last character from the search query or dialog field.
    Backspace,
    /// Cancels the innermost mode: dialog, details, search, then notice.
    Escape,

    /// Moves the filter focus to the next category filter.
    FocusNextFilter,
    /// Cycles the focused category filter through its options.
    CycleFilter,
    /// Opens the date filter prompt.
    DateFilter,
    /// Removes every filter of the page, search included.
    ClearFilters,

    /// Toggles the bulk selection of the row under the cursor.
    ToggleRow,
    /// Header checkbox: selects every filtered row, or clears the selection.
    ToggleAll,
    ClearSelection,

    /// Runs a row action on the record under the cursor.
    RowAction(ActionKind),
    /// Opens the create form of the page.
    Create,
    /// Opens the bulk delete confirmation for the selection.
    BulkDelete,
    /// Opens the bulk plan assignment dialog (users page).
    BulkAssignPlan,

    /// Focuses the next dialog field.
    NextField,
    /// Focuses the previous dialog field.
    PrevField,
    /// Submits the open dialog.
    Submit,
    /// Closes the details overlay.
    DismissInfo,

    /// Requests an export of the filtered rows.
    Export(ExportFormat),
    GrowPageSize,
    ShrinkPageSize,

    /// Switches page and applies the target as the text filter.
    ///
    /// Fed back by the runtime after an [`Action::Navigate`].
    NavigateTo(NavTarget),

    /// Closes the floating pane and hides the plugin UI.
    CloseFocus,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Parameters
///
/// * `state` - Mutable reference to application state
/// * `event` - Event to process
///
/// # Returns
///
/// `(should_render, actions)`: whether the UI changed, and the side effects
/// to execute in sequence.
///
/// # Errors
///
/// Recoverable errors never escape: validation failures become error notices
/// (or stay inline in the open dialog), and missing records, busy dialogs and
/// unsupported operations are logged and ignored. Other errors are returned.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event type.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event, page = %state.active)
        .entered();

    let outcome = match apply(state, event) {
        Ok(outcome) => Ok(outcome),
        Err(err) => recover(state, err),
    };
    state.sync_mode();
    outcome
}

/// Turns recoverable errors into notices or no-ops.
fn recover(state: &AppState, err: ZadminError) -> Result<(bool, Vec<Action>)> {
    match err {
        ZadminError::Validation { field, message } => {
            if state.page().dialog().is_open() {
                tracing::debug!(%field, %message, "validation error shown in dialog");
                Ok((true, vec![]))
            } else {
                tracing::debug!(%field, %message, "validation error");
                Ok((true, vec![Action::Notify(Notice::error(message))]))
            }
        }
        ZadminError::NotFound { id } => {
            tracing::debug!(record_id = id, "record no longer exists");
            Ok((true, vec![]))
        }
        ZadminError::DialogBusy => {
            tracing::debug!("dialog already open");
            Ok((false, vec![]))
        }
        ZadminError::Config(message) => {
            tracing::debug!(%message, "operation not available");
            Ok((false, vec![]))
        }
        err => Err(err),
    }
}

#[allow(clippy::too_many_lines)]
fn apply(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    match event {
        Event::KeyDown => {
            state.page_mut().move_cursor(1);
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.page_mut().move_cursor(-1);
            Ok((true, vec![]))
        }
        Event::NextPage => Ok((state.page_mut().next_page(), vec![])),
        Event::PrevPage => Ok((state.page_mut().prev_page(), vec![])),
        Event::FirstPage => Ok((state.page_mut().first_page(), vec![])),
        Event::LastPage => Ok((state.page_mut().last_page(), vec![])),

        Event::NextSection => Ok((state.switch_page(state.active.next()), vec![])),
        Event::PrevSection => Ok((state.switch_page(state.active.prev()), vec![])),
        Event::GoToSection(kind) => Ok((state.switch_page(*kind), vec![])),

        Event::SearchMode => {
            tracing::debug!("entering search mode");
            state.search_query = state.page().search_text();
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusSearchBar => {
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            state.input_mode = if state.search_query.is_empty() {
                InputMode::Normal
            } else {
                InputMode::Search(SearchFocus::Navigating)
            };
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            exit_search(state)?;
            Ok((true, vec![]))
        }

        Event::Char(c) => match state.input_mode {
            InputMode::Dialog => {
                state.page_mut().dialog_mut().push_char(*c);
                Ok((true, vec![]))
            }
            InputMode::Search(SearchFocus::Typing) => {
                let mut query = state.search_query.clone();
                query.push(*c);
                state.set_search(&query)?;
                tracing::trace!(
                    query = %state.search_query,
                    filtered_count = state.page().filtered_len(),
                    "search query updated"
                );
                Ok((true, vec![]))
            }
            _ => Ok((false, vec![])),
        },
        Event::Backspace => match state.input_mode {
            InputMode::Dialog => {
                state.page_mut().dialog_mut().backspace();
                Ok((true, vec![]))
            }
            InputMode::Search(SearchFocus::Typing) => {
                let mut query = state.search_query.clone();
                query.pop();
                state.set_search(&query)?;
                Ok((true, vec![]))
            }
            _ => Ok((false, vec![])),
        },
        Event::Escape => match state.input_mode {
            InputMode::Dialog => {
                if let Some(pending) = state.page_mut().dialog_mut().cancel() {
                    tracing::debug!(kind = ?pending.kind, "dialog cancelled");
                }
                Ok((true, vec![]))
            }
            InputMode::Info => {
                state.info = None;
                Ok((true, vec![]))
            }
            InputMode::Search(_) => {
                exit_search(state)?;
                Ok((true, vec![]))
            }
            InputMode::Normal => Ok((state.notice.take().is_some(), vec![])),
        },

        Event::FocusNextFilter => {
            state.page_mut().focus_next_filter();
            Ok((true, vec![]))
        }
        Event::CycleFilter => {
            state.page_mut().cycle_focused_filter()?;
            Ok((true, vec![]))
        }
        Event::DateFilter => {
            state.page_mut().open_date_filter()?;
            Ok((true, vec![]))
        }
        Event::ClearFilters => {
            state.page_mut().clear_filters();
            state.search_query.clear();
            if matches!(state.input_mode, InputMode::Search(_)) {
                state.input_mode = InputMode::Normal;
            }
            Ok((true, vec![]))
        }

        Event::ToggleRow => {
            let has_row = state.page().cursor_id().is_some();
            let selected = state.page_mut().toggle_row();
            tracing::trace!(selected, "row toggled");
            Ok((has_row, vec![]))
        }
        Event::ToggleAll => {
            state.page_mut().toggle_header();
            Ok((true, vec![]))
        }
        Event::ClearSelection => {
            state.page_mut().clear_selection();
            Ok((true, vec![]))
        }

        Event::RowAction(kind) => {
            let dispatch = state.page_mut().row_action(*kind)?;
            Ok(apply_dispatch(state, dispatch))
        }
        Event::Create => {
            state.page_mut().open_create()?;
            Ok((true, vec![]))
        }
        Event::BulkDelete => {
            state.page_mut().open_bulk_delete()?;
            Ok((true, vec![]))
        }
        Event::BulkAssignPlan => {
            if state.active != PageKind::Users {
                return Ok((false, vec![]));
            }
            state.open_assign_plan()?;
            Ok((true, vec![]))
        }

        Event::NextField => {
            state.page_mut().dialog_mut().focus_next();
            Ok((true, vec![]))
        }
        Event::PrevField => {
            state.page_mut().dialog_mut().focus_prev();
            Ok((true, vec![]))
        }
        Event::Submit => {
            let actions = state
                .submit_dialog()?
                .map(|message| vec![Action::Notify(Notice::info(message))])
                .unwrap_or_default();
            Ok((true, actions))
        }
        Event::DismissInfo => Ok((state.info.take().is_some(), vec![])),

        Event::Export(format) => {
            let ids = state.page().filtered_ids();
            tracing::debug!(page = %state.active, format = ?format, rows = ids.len(), "export requested");
            Ok((
                false,
                vec![Action::Export {
                    page: state.active,
                    format: *format,
                    ids,
                }],
            ))
        }
        Event::GrowPageSize => Ok((state.step_page_size(true)?.is_some(), vec![])),
        Event::ShrinkPageSize => Ok((state.step_page_size(false)?.is_some(), vec![])),

        Event::NavigateTo(target) => {
            tracing::debug!(page = %target.page, query = %target.query, "navigating");
            state.switch_page(target.page);
            state.page_mut().clear_filters();
            state.set_search(&target.query)?;
            if !target.query.is_empty() {
                state.input_mode = InputMode::Search(SearchFocus::Navigating);
            }
            Ok((true, vec![]))
        }

        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
    }
}

/// Maps a row action outcome to state changes and actions.
fn apply_dispatch(state: &mut AppState, dispatch: Dispatch) -> (bool, Vec<Action>) {
    match dispatch {
        Dispatch::Mutated { message } => (true, vec![Action::Notify(Notice::info(message))]),
        Dispatch::Confirm(pending) => {
            tracing::debug!(kind = ?pending.kind, record_id = ?pending.record_id, "dialog opened");
            (true, vec![])
        }
        Dispatch::Navigate(target) => (false, vec![Action::Navigate(target)]),
        Dispatch::Inform(details) => {
            state.info = Some(details);
            (true, vec![])
        }
        Dispatch::Unsupported => {
            tracing::debug!("action not available for this row");
            (false, vec![])
        }
    }
}

fn exit_search(state: &mut AppState) -> Result<()> {
    tracing::debug!(query = %state.search_query, "exiting search mode");
    state.set_search("")?;
    state.input_mode = InputMode::Normal;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::actions::Severity;
    use crate::seed::{EmbeddedSeed, SeedSource};
    use crate::ui::theme::Theme;

    fn state() -> AppState {
        AppState::new(EmbeddedSeed.load().unwrap(), 10, Theme::default())
    }

    fn send(state: &mut AppState, events: &[Event]) -> Vec<Action> {
        events
            .iter()
            .flat_map(|e| handle_event(state, e).unwrap().1)
            .collect()
    }

    #[test]
    fn typing_in_search_filters_the_page() {
        let mut state = state();
        send(
            &mut state,
            &[Event::SearchMode, Event::Char('j'), Event::Char('a'), Event::Char('n')],
        );
        assert_eq!(state.page().filtered_len(), 1);

        send(&mut state, &[Event::FocusResults]);
        assert_eq!(state.input_mode, InputMode::Search(SearchFocus::Navigating));

        send(&mut state, &[Event::Escape]);
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.page().filtered_len(), 12);
    }

    #[test]
    fn toggle_status_emits_info_notice() {
        let mut state = state();
        let actions = send(&mut state, &[Event::RowAction(ActionKind::ToggleStatus)]);
        assert_eq!(
            actions,
            vec![Action::Notify(Notice::info("John Doe status updated"))]
        );
    }

    #[test]
    fn bulk_assign_without_selection_is_an_error_notice() {
        let mut state = state();
        let actions = send(&mut state, &[Event::BulkAssignPlan]);
        let [Action::Notify(notice)] = actions.as_slice() else {
            panic!("expected a single notice, got {actions:?}");
        };
        assert_eq!(notice.severity, Severity::Error);
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn dialog_keys_edit_and_escape_cancels() {
        let mut state = state();
        send(&mut state, &[Event::RowAction(ActionKind::Delete)]);
        assert_eq!(state.input_mode, InputMode::Dialog);

        let actions = send(&mut state, &[Event::Submit]);
        assert!(actions.is_empty());
        assert!(state.page().dialog().pending().unwrap().error.is_some());

        send(&mut state, &[Event::Char('x'), Event::Escape]);
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.page().len(), 12);
    }

    #[test]
    fn details_overlay_is_dismissed() {
        let mut state = state();
        send(&mut state, &[Event::RowAction(ActionKind::Details)]);
        assert_eq!(state.input_mode, InputMode::Info);
        assert!(state.info.is_some());

        send(&mut state, &[Event::DismissInfo]);
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.info.is_none());
    }

    #[test]
    fn navigation_round_trip_filters_target_page() {
        let mut state = state();
        send(&mut state, &[Event::GoToSection(PageKind::Billing)]);
        let actions = send(&mut state, &[Event::RowAction(ActionKind::View)]);
        let [Action::Navigate(target)] = actions.as_slice() else {
            panic!("expected navigation, got {actions:?}");
        };
        assert_eq!(target.page, PageKind::Users);

        send(&mut state, &[Event::NavigateTo(target.clone())]);
        assert_eq!(state.active, PageKind::Users);
        assert_eq!(state.page().filtered_len(), 1);
        assert_eq!(state.input_mode, InputMode::Search(SearchFocus::Navigating));
    }

    #[test]
    fn unavailable_operations_are_ignored() {
        let mut state = state();
        let (render, actions) = handle_event(&mut state, &Event::Create).unwrap();
        assert!(!render);
        assert!(actions.is_empty());

        let (render, _) = handle_event(&mut state, &Event::RowAction(ActionKind::Send)).unwrap();
        assert!(!render);
    }

    #[test]
    fn export_carries_filtered_ids() {
        let mut state = state();
        state.page_mut().set_filter("role", "Admin").unwrap();
        let actions = send(&mut state, &[Event::Export(ExportFormat::Csv)]);
        let [Action::Export { page, ids, .. }] = actions.as_slice() else {
            panic!("expected export, got {actions:?}");
        };
        assert_eq!(*page, PageKind::Users);
        assert_eq!(ids.len(), state.page().filtered_len());
    }

    #[test]
    fn unchecking_a_row_also_renders() {
        let mut state = state();
        let (render, _) = handle_event(&mut state, &Event::ToggleRow).unwrap();
        assert!(render);
        assert_eq!(state.page().selected_ids(), vec![1]);

        let (render, _) = handle_event(&mut state, &Event::ToggleRow).unwrap();
        assert!(render);
        assert!(state.page().selected_ids().is_empty());
    }

    #[test]
    fn toggling_an_empty_page_does_not_render() {
        let mut state = state();
        state.set_search("no such user").unwrap();
        let (render, _) = handle_event(&mut state, &Event::ToggleRow).unwrap();
        assert!(!render);
    }

    #[test]
    fn every_export_format_reaches_the_runtime() {
        let mut state = state();
        for key in ['E', 'X', 'R'] {
            let format = ExportFormat::from_key(key).unwrap();
            let actions = send(&mut state, &[Event::Export(format)]);
            assert!(matches!(
                actions.as_slice(),
                [Action::Export { format: f, .. }] if *f == format
            ));
        }
    }
}
