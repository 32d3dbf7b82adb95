//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the central state container for the plugin.
//! It owns one [`DataTable`] per console page and the state shared across
//! pages: the active page, the input mode, the latest notice and the details
//! overlay.
//!
//! # Architecture
//!
//! Generic table operations go through [`TablePage`] on the active page
//! ([`AppState::page`], [`AppState::page_mut`]). Operations that need the
//! concrete record type live here: committing dialogs (so plan edits can be
//! written to the history page) and assigning plans to users.
//!
//! # Example
//!
//! ```rust
//! use zadmin::app::AppState;
//! use zadmin::seed::{EmbeddedSeed, SeedSource};
//! use zadmin::ui::theme::Theme;
//!
//! let seed = EmbeddedSeed.load().unwrap();
//! let state = AppState::new(seed, 10, Theme::default());
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert_eq!(viewmodel.tabs.len(), 6);
//! ```

use super::actions::{Notice, Severity};
use super::modes::{InputMode, SearchFocus};
use crate::domain::error::{Result, ZadminError};
use crate::domain::form::{FieldRule, Form};
use crate::domain::page::PageKind;
use crate::domain::record::{Record, SEARCH_FILTER};
use crate::domain::{Notification, Plan, PlanChange, PlanStatus, QrCode, Transaction, User};
use crate::seed::SeedData;
use crate::table::{
    Applied, Change, DataTable, DetailsView, PendingAction, PendingKind, Submitted, TablePage,
};
use crate::ui::helpers::truncate;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    EmptyState, FilterBarInfo, FooterInfo, HeaderInfo, NoticeView, SearchBarInfo, TabInfo,
    UIViewModel,
};

/// Page sizes offered by `+` and `-`.
pub const PAGE_SIZES: [usize; 5] = [5, 10, 20, 50, 100];

/// Operator recorded in plan history entries.
pub const DEFAULT_OPERATOR: &str = "admin@example.com";

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    pub users: DataTable<User>,
    pub transactions: DataTable<Transaction>,
    pub qr_codes: DataTable<QrCode>,
    pub plans: DataTable<Plan>,
    pub history: DataTable<PlanChange>,
    pub notifications: DataTable<Notification>,

    /// Page shown in the console.
    pub active: PageKind,

    /// Current input handling mode.
    ///
    /// Kept in step with the active page's dialog and the details overlay by
    /// [`AppState::sync_mode`].
    pub input_mode: InputMode,

    /// Search text being typed.
    ///
    /// Mirrors the active page's search filter while in search mode.
    pub search_query: String,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Latest notice shown in the status line.
    pub notice: Option<Notice>,

    /// Details overlay.
    pub info: Option<DetailsView>,

    /// Name recorded as `changed_by` in plan history.
    pub operator: String,
}

impl AppState {
    /// Creates the state from seed collections, showing the users page.
    #[must_use]
    pub fn new(seed: SeedData, page_size: usize, theme: Theme) -> Self {
        let mut state = Self {
            users: DataTable::new(seed.users, page_size),
            transactions: DataTable::new(seed.transactions, page_size),
            qr_codes: DataTable::new(seed.qr_codes, page_size),
            plans: DataTable::new(seed.plans, page_size),
            history: DataTable::new(seed.history, page_size),
            notifications: DataTable::new(seed.notifications, page_size),
            active: PageKind::Users,
            input_mode: InputMode::Normal,
            search_query: String::new(),
            theme,
            notice: None,
            info: None,
            operator: DEFAULT_OPERATOR.to_string(),
        };
        state.refresh_plan_choices();
        state
    }

    /// Points the users' plan filter and plan field at the plans collection.
    ///
    /// Plan names a user is still on are kept even when the plan is gone.
    pub fn refresh_plan_choices(&mut self) {
        let mut names: Vec<String> = self.plans.records().iter().map(|p| p.name.clone()).collect();
        for user in self.users.records() {
            if !names.contains(&user.plan) {
                names.push(user.plan.clone());
            }
        }
        tracing::trace!(count = names.len(), "plan choices refreshed");
        self.users.set_choices("plan", names);
    }

    /// Table of `kind`.
    #[must_use]
    pub fn table(&self, kind: PageKind) -> &dyn TablePage {
        match kind {
            PageKind::Users => &self.users,
            PageKind::Billing => &self.transactions,
            PageKind::QrCodes => &self.qr_codes,
            PageKind::Plans => &self.plans,
            PageKind::History => &self.history,
            PageKind::Notifications => &self.notifications,
        }
    }

    pub fn table_mut(&mut self, kind: PageKind) -> &mut dyn TablePage {
        match kind {
            PageKind::Users => &mut self.users,
            PageKind::Billing => &mut self.transactions,
            PageKind::QrCodes => &mut self.qr_codes,
            PageKind::Plans => &mut self.plans,
            PageKind::History => &mut self.history,
            PageKind::Notifications => &mut self.notifications,
        }
    }

    /// Table of the active page.
    #[must_use]
    pub fn page(&self) -> &dyn TablePage {
        self.table(self.active)
    }

    pub fn page_mut(&mut self) -> &mut dyn TablePage {
        self.table_mut(self.active)
    }

    /// Shows page `kind`. Returns `false` when it is already active.
    ///
    /// Leaves search mode; the page keeps its own filters.
    pub fn switch_page(&mut self, kind: PageKind) -> bool {
        if self.active == kind {
            return false;
        }
        tracing::debug!(from = %self.active, to = %kind, "page switched");
        self.active = kind;
        self.search_query = self.page().search_text();
        self.input_mode = InputMode::Normal;
        self.sync_mode();
        true
    }

    /// Re-derives the input mode after dialogs opened or closed.
    pub fn sync_mode(&mut self) {
        let dialog_open = self.page().dialog().is_open();
        self.input_mode = match self.input_mode {
            _ if dialog_open => InputMode::Dialog,
            _ if self.info.is_some() => InputMode::Info,
            InputMode::Dialog | InputMode::Info => InputMode::Normal,
            mode => mode,
        };
    }

    /// Replaces the search text of the active page.
    ///
    /// # Errors
    ///
    /// Propagates filter errors (none for text search in practice).
    pub fn set_search(&mut self, query: &str) -> Result<()> {
        self.search_query = query.to_string();
        self.page_mut().set_filter(SEARCH_FILTER, query)
    }

    pub fn show_notice(&mut self, notice: Notice) {
        tracing::debug!(message = %notice.message, severity = ?notice.severity, "notice");
        self.notice = Some(notice);
    }

    /// Steps the page size to the next (`grow`) or previous entry of
    /// [`PAGE_SIZES`]. Returns the new size, or `None` at either end.
    ///
    /// # Errors
    ///
    /// Propagates [`TablePage::set_page_size`] errors.
    pub fn step_page_size(&mut self, grow: bool) -> Result<Option<usize>> {
        let current = self.page().page_size();
        let next = if grow {
            PAGE_SIZES.iter().copied().find(|size| *size > current)
        } else {
            PAGE_SIZES.iter().rev().copied().find(|size| *size < current)
        };
        match next {
            Some(size) => {
                self.page_mut().set_page_size(size)?;
                Ok(Some(size))
            }
            None => Ok(None),
        }
    }

    /// Opens the bulk plan assignment dialog for the selected users.
    ///
    /// # Errors
    ///
    /// - [`ZadminError::Validation`] when no user is selected
    /// - [`ZadminError::Config`] when no plan is active
    /// - [`ZadminError::DialogBusy`] when a dialog is open
    pub fn open_assign_plan(&mut self) -> Result<()> {
        let ids = self.users.selected_ids();
        if ids.is_empty() {
            return Err(ZadminError::validation(
                "selection",
                "No users selected. Select users to assign a plan",
            ));
        }
        let plans: Vec<String> = self
            .plans
            .records()
            .iter()
            .filter(|p| p.status == PlanStatus::Active)
            .map(|p| p.name.clone())
            .collect();
        if plans.is_empty() {
            return Err(ZadminError::Config("no active plan to assign".to_string()));
        }

        let form = Form::new(format!("Assign plan to {} users", ids.len()))
            .message("Space cycles through the active plans")
            .field("plan", "Plan", FieldRule::OneOf(plans), "");
        self.users
            .dialog_mut()
            .open(PendingAction::new(PendingKind::AssignPlan(ids), None, form))
    }

    /// Commits the active page's dialog.
    ///
    /// Returns the notice message of the applied change, or `None` when no
    /// dialog was open or the dialog only set a filter.
    ///
    /// # Errors
    ///
    /// Propagates [`DataTable::submit`] errors; validation errors leave the
    /// dialog open.
    pub fn submit_dialog(&mut self) -> Result<Option<String>> {
        let _span = tracing::debug_span!("submit_dialog", page = %self.active).entered();

        let message = match self.active {
            PageKind::Users => {
                let submitted = self.users.submit()?;
                self.finish_external(submitted)
            }
            PageKind::Billing => {
                let submitted = self.transactions.submit()?;
                self.finish_external(submitted)
            }
            PageKind::QrCodes => {
                let submitted = self.qr_codes.submit()?;
                self.finish_external(submitted)
            }
            PageKind::History => {
                let submitted = self.history.submit()?;
                self.finish_external(submitted)
            }
            PageKind::Notifications => {
                let submitted = self.notifications.submit()?;
                self.finish_external(submitted)
            }
            PageKind::Plans => {
                let submitted = self.plans.submit()?;
                if let Some(Submitted::Applied(Applied {
                    change: Change::Replaced { before, after },
                    ..
                })) = &submitted
                {
                    self.record_plan_history(before, after);
                }
                self.finish_external(submitted)
            }
        };
        self.refresh_plan_choices();
        self.sync_mode();
        message
    }

    /// Appends one history entry per changed plan attribute.
    pub fn record_plan_history(&mut self, before: &Plan, after: &Plan) {
        let today = chrono::Utc::now().date_naive();
        let operator = self.operator.clone();
        for diff in before.diff(after) {
            let id = self.history.insert_with(|id| {
                PlanChange::from_diff(
                    id,
                    &after.name,
                    diff,
                    &operator,
                    today,
                    after.subscribers,
                )
            });
            tracing::debug!(record_id = id, plan = %after.name, "plan history recorded");
        }
    }

    /// Applies the parts of a submit the owning table cannot: plan assignment
    /// and date filters.
    fn finish_external<R: Record>(
        &mut self,
        submitted: Option<Submitted<R>>,
    ) -> Result<Option<String>> {
        match submitted {
            None => Ok(None),
            Some(Submitted::Applied(applied)) => Ok(Some(applied.message)),
            Some(Submitted::External(pending)) => self.apply_external(&pending),
        }
    }

    fn apply_external(&mut self, pending: &PendingAction) -> Result<Option<String>> {
        match &pending.kind {
            PendingKind::AssignPlan(ids) => {
                let plan = pending.form.value("plan").to_string();
                let updated = self.users.update_where(ids, |user| user.with_plan(&plan));
                self.users.clear_selection();
                tracing::debug!(plan = %plan, updated, "plan assigned");
                Ok(Some(format!("Assigned {plan} to {updated} users")))
            }
            PendingKind::DateFilter(key) => {
                let value = pending.form.value("date").to_string();
                self.page_mut().set_filter(key, &value)?;
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    /// Computes a renderable UI view model from current state and terminal dimensions.
    ///
    /// # Parameters
    ///
    /// * `rows` - Terminal height in character cells
    /// * `cols` - Terminal width in character cells
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let page = self.page();
        let mut table = page.table_view();

        let available_rows = self.calculate_available_rows(rows);
        if table.rows.len() > available_rows {
            let cursor = table.rows.iter().position(|r| r.is_cursor).unwrap_or(0);
            let start = (cursor + 1).saturating_sub(available_rows);
            table.rows = table.rows.split_off(start);
            table.rows.truncate(available_rows);
        }

        let empty_state = table.rows.is_empty().then(|| EmptyState {
            message: format!("No {}s found", page.noun()),
            subtitle: if page.is_empty() {
                "This page has no records yet".to_string()
            } else {
                "Press x to clear filters".to_string()
            },
        });

        UIViewModel {
            tabs: PageKind::ALL
                .iter()
                .map(|kind| TabInfo {
                    title: kind.title().to_string(),
                    is_active: *kind == self.active,
                })
                .collect(),
            header: HeaderInfo {
                title: " zadmin ".to_string(),
                heading: self.active.heading().to_string(),
            },
            filter_bar: FilterBarInfo {
                chips: page.filter_chips(),
            },
            search_bar: self.compute_search_bar(),
            table,
            empty_state,
            dialog: page.dialog_view(),
            info: self.info.clone(),
            notice: self.notice.as_ref().map(|n| NoticeView {
                message: truncate(&n.message, cols.saturating_sub(2)),
                is_error: n.severity == Severity::Error,
            }),
            footer: self.compute_footer(),
        }
    }

    /// Footer keybinding hints for the current mode.
    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Search(SearchFocus::Typing) => {
                "Esc: clear search  Enter: done  Type to filter".to_string()
            }
            InputMode::Search(SearchFocus::Navigating) => {
                "Esc: clear search  /: edit query  j/k: rows  h/l: pages  Enter: view".to_string()
            }
            InputMode::Dialog => {
                "Tab: next field  Enter: confirm  Esc: cancel".to_string()
            }
            InputMode::Info => "any key: close".to_string(),
            InputMode::Normal => self.normal_footer(),
        };

        FooterInfo { keybindings }
    }

    fn normal_footer(&self) -> String {
        let mut hints = vec!["j/k: rows", "h/l: pages", "Tab: section", "/: search", "f/c: filter"];
        if self.active == PageKind::Users {
            hints.push("P: assign plan");
        }
        if matches!(self.active, PageKind::Plans | PageKind::Notifications) {
            hints.push("n: new");
        }
        hints.extend(["Space: select", "B: delete selected", "E/X/R: export", "q: quit"]);
        hints.join("  ")
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        match self.input_mode {
            InputMode::Search(focus) => Some(SearchBarInfo {
                query: self.search_query.clone(),
                is_typing: focus == SearchFocus::Typing,
            }),
            _ => None,
        }
    }

    /// Rows left for table rows after tabs, header, filter bar, column
    /// header, pager, notice and footer (9 rows), plus the search bar (3 rows)
    /// when shown.
    const fn calculate_available_rows(&self, total_rows: usize) -> usize {
        match self.input_mode {
            InputMode::Search(_) => total_rows.saturating_sub(12),
            _ => total_rows.saturating_sub(9),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::{EmbeddedSeed, SeedSource};
    use crate::table::HeaderCheck;

    fn state() -> AppState {
        AppState::new(EmbeddedSeed.load().unwrap(), 5, Theme::default())
    }

    #[test]
    fn pages_keep_their_own_filters() {
        let mut state = state();
        state.set_search("jane").unwrap();
        assert_eq!(state.page().filtered_len(), 1);

        state.switch_page(PageKind::Plans);
        assert_eq!(state.page().filtered_len(), 4);
        assert!(state.search_query.is_empty());

        state.switch_page(PageKind::Users);
        assert_eq!(state.search_query, "jane");
        assert_eq!(state.page().filtered_len(), 1);
    }

    #[test]
    fn page_size_steps_through_presets() {
        let mut state = state();
        assert_eq!(state.step_page_size(true).unwrap(), Some(10));
        assert_eq!(state.step_page_size(false).unwrap(), Some(5));
        assert_eq!(state.step_page_size(false).unwrap(), None);
    }

    #[test]
    fn assign_plan_updates_selected_users_and_clears_selection() {
        let mut state = state();
        state.users.toggle_row();
        state.users.move_cursor(1);
        state.users.toggle_row();
        state.open_assign_plan().unwrap();
        state.sync_mode();
        assert_eq!(state.input_mode, InputMode::Dialog);

        state.users.dialog_mut().push_char('e');
        let message = state.submit_dialog().unwrap();
        assert_eq!(message.as_deref(), Some("Assigned Enterprise to 2 users"));
        assert_eq!(state.users.get(1).unwrap().plan, "Enterprise");
        assert_eq!(state.users.get(2).unwrap().plan, "Enterprise");
        assert_eq!(state.users.table_view().header_check, HeaderCheck::None);
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn assign_plan_without_selection_is_rejected() {
        let mut state = state();
        let err = state.open_assign_plan().unwrap_err();
        assert!(matches!(err, ZadminError::Validation { .. }));
        assert!(!state.users.dialog().is_open());
    }

    #[test]
    fn plan_edit_is_recorded_in_history() {
        let mut state = state();
        state.switch_page(PageKind::Plans);
        let before = state.history.len();

        state.plans.dispatch(2, crate::domain::ActionKind::Edit).unwrap();
        let dialog = state.plans.dialog_mut();
        for _ in 0..4 {
            dialog.focus_next();
        }
        dialog.backspace();
        dialog.backspace();
        dialog.backspace();
        dialog.backspace();
        for c in "12.50".chars() {
            dialog.push_char(c);
        }

        let message = state.submit_dialog().unwrap();
        assert_eq!(message.as_deref(), Some("Updated plan Basic"));
        assert_eq!(state.history.len(), before + 1);

        let entry = state.history.records().last().unwrap();
        assert_eq!(entry.action, "Price Updated");
        assert_eq!(entry.old_value, "$9.99");
        assert_eq!(entry.new_value, "$12.50");
        assert_eq!(entry.affected_users, 856);
    }

    #[test]
    fn date_filter_dialog_sets_filter() {
        let mut state = state();
        state.page_mut().open_date_filter().unwrap();
        for c in "2024-01-15".chars() {
            state.page_mut().dialog_mut().push_char(c);
        }
        assert_eq!(state.submit_dialog().unwrap(), None);
        assert_eq!(state.page().filtered_len(), 2);
    }

    #[test]
    fn viewmodel_marks_active_tab_and_empty_state() {
        let mut state = state();
        state.set_search("nobody-matches-this").unwrap();
        let vm = state.compute_viewmodel(30, 100);
        assert!(vm.tabs[0].is_active);
        assert!(vm.table.rows.is_empty());
        assert_eq!(vm.empty_state.unwrap().message, "No users found");
    }

    #[test]
    fn viewmodel_windows_rows_around_cursor() {
        let mut state = state();
        state.step_page_size(true).unwrap();
        state.users.move_cursor(-1);
        let vm = state.compute_viewmodel(13, 100);
        assert_eq!(vm.table.rows.len(), 4);
        assert!(vm.table.rows.last().unwrap().is_cursor);
    }
}
