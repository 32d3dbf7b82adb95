//! Generic filterable, paginated data table with row actions.
//!
//! [`DataTable`] owns one page's collection together with its filter,
//! pagination, selection and dialog state. It is the only place the
//! collection is mutated, and after every mutation it re-establishes the
//! table invariants:
//!
//! - the selection only holds ids present in the collection
//! - the current page lies in `[1, total_pages]`
//! - the row cursor points at a row of the current page
//!
//! # Architecture
//!
//! ```text
//! records ──▶ FilterState::apply ──▶ PageState::slice ──▶ TableView rows
//!    ▲                                                        │
//!    │            DataTable::dispatch / DataTable::submit     │
//!    └────────────────────── Mutation ◀───────────────────────┘
//! ```
//!
//! The application layer reaches tables of different record types through
//! the object-safe [`TablePage`] trait.
//!
//! # Example
//!
//! ```
//! use zadmin::seed::{EmbeddedSeed, SeedSource};
//! use zadmin::table::{DataTable, TablePage};
//!
//! let seed = EmbeddedSeed.load().unwrap();
//! let mut users = DataTable::new(seed.users, 2);
//! users.set_filter("role", "Admin").unwrap();
//! assert!(users.filtered_len() <= users.len());
//! ```

pub mod dialog;
pub mod dispatch;
pub mod filter;
pub mod pagination;
pub mod selection;

#[cfg(test)]
mod properties;

pub use dialog::{Dialog, PendingAction, PendingKind};
pub use dispatch::{Applied, Change, DetailsView, Dispatch, Submitted};
pub use filter::{Choices, FilterState, FilterValue, ALL};
pub use pagination::{PageState, DEFAULT_PAGE_SIZE};
pub use selection::{HeaderCheck, SelectionSet};

use crate::domain::error::{Result, ZadminError};
use crate::domain::form::{FieldRule, Form};
use crate::domain::record::{ActionKind, FilterKind, Record, RecordId, SEARCH_FILTER};
use crate::ui::viewmodel::{
    ColumnHeader, DialogField, DialogView, FilterChip, PagerInfo, RowView, TableView,
};

/// One console page's collection and table state.
#[derive(Debug, Clone)]
pub struct DataTable<R: Record> {
    records: Vec<R>,
    filters: FilterState,
    page: PageState,
    selection: SelectionSet,
    dialog: Dialog,
    /// Row cursor within the current page.
    cursor: usize,
    /// Index into the category filters of `R`.
    focused_filter: usize,
    /// Runtime options for category filters and choice fields.
    choices: Choices,
}

impl<R: Record> DataTable<R> {
    /// Creates a table over `records` showing `page_size` rows per page.
    #[must_use]
    pub fn new(records: Vec<R>, page_size: usize) -> Self {
        Self {
            records,
            filters: FilterState::new(),
            page: PageState::new(page_size),
            selection: SelectionSet::new(),
            dialog: Dialog::Closed,
            cursor: 0,
            focused_filter: 0,
            choices: Choices::new(),
        }
    }

    /// The whole collection in source order.
    #[must_use]
    pub fn records(&self) -> &[R] {
        &self.records
    }

    #[must_use]
    pub fn get(&self, id: RecordId) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    #[must_use]
    pub const fn filters(&self) -> &FilterState {
        &self.filters
    }

    #[must_use]
    pub const fn page_state(&self) -> &PageState {
        &self.page
    }

    #[must_use]
    pub const fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Records matching the active filters, in source order.
    #[must_use]
    pub fn filtered(&self) -> Vec<&R> {
        self.filters.apply(&self.records)
    }

    /// Records on the current page.
    #[must_use]
    pub fn visible(&self) -> Vec<&R> {
        let filtered = self.filtered();
        self.page.slice(&filtered).to_vec()
    }

    /// Record under the row cursor.
    #[must_use]
    pub fn cursor_record(&self) -> Option<&R> {
        self.visible().get(self.cursor).copied()
    }

    /// Next free id: one past the largest id in the collection.
    #[must_use]
    pub fn next_id(&self) -> RecordId {
        self.records.iter().map(Record::id).max().map_or(1, |id| id + 1)
    }

    /// Appends a record built from the next free id.
    pub fn insert_with(&mut self, build: impl FnOnce(RecordId) -> R) -> RecordId {
        let id = self.next_id();
        self.records.push(build(id));
        self.sync();
        id
    }

    /// Replaces each record in `ids` with `update(record)`. Missing ids are
    /// skipped. Returns the number of records updated.
    pub fn update_where(&mut self, ids: &[RecordId], update: impl Fn(&R) -> R) -> usize {
        let mut updated = 0;
        for record in self.records.iter_mut().filter(|r| ids.contains(&r.id())) {
            *record = update(record);
            updated += 1;
        }
        self.sync();
        updated
    }

    /// Replaces the options of the category filter and choice fields named
    /// `key`.
    pub fn set_choices(&mut self, key: &'static str, options: Vec<String>) {
        self.choices.insert(key, options);
    }

    /// Swaps in runtime options for the choice fields of `form`.
    ///
    /// A prefilled value missing from the runtime options stays selectable.
    fn with_choices(&self, mut form: Form) -> Form {
        for field in &mut form.fields {
            let Some(options) = self.choices.get(field.key) else {
                continue;
            };
            if !matches!(field.rule, FieldRule::OneOf(_)) {
                continue;
            }
            let mut options = options.clone();
            if field.value.is_empty() {
                field.value = options.first().cloned().unwrap_or_default();
            } else if !options.contains(&field.value) {
                options.push(field.value.clone());
            }
            field.rule = FieldRule::OneOf(options);
        }
        form
    }

    /// Re-establishes the selection, page and cursor invariants.
    fn sync(&mut self) {
        let records = &self.records;
        self.selection
            .retain(|id| records.iter().any(|r| r.id() == id));
        let filtered_len = self.filtered_len();
        self.page.clamp(filtered_len);
        let rows = self.page.bounds(filtered_len).len();
        self.cursor = self.cursor.min(rows.saturating_sub(1));
    }

    /// Called after the filtered set changed shape: back to page 1, first row.
    fn restart(&mut self) {
        self.page.reset();
        self.cursor = 0;
        self.sync();
    }

    fn category_filters() -> impl Iterator<Item = &'static str> {
        R::filters()
            .iter()
            .filter(|spec| matches!(spec.kind, FilterKind::Category { .. }))
            .map(|spec| spec.key)
    }

    fn date_filter() -> Option<(&'static str, &'static str)> {
        R::filters().iter().find_map(|spec| match spec.kind {
            FilterKind::Date { .. } => Some((spec.key, spec.label)),
            _ => None,
        })
    }
}

/// Type-erased access to a [`DataTable`] for the application layer.
///
/// Every operation that does not need the concrete record type lives here, so
/// the event handler can work on whichever page is active.
pub trait TablePage {
    /// Singular noun of the record type.
    fn noun(&self) -> &'static str;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn filtered_len(&self) -> usize;

    /// Ids of the records matching the active filters.
    fn filtered_ids(&self) -> Vec<RecordId>;

    /// Sets filter `key` from raw input. A change returns to page 1.
    ///
    /// # Errors
    ///
    /// See [`FilterState::set`].
    fn set_filter(&mut self, key: &str, raw: &str) -> Result<()>;

    /// Current text search value.
    fn search_text(&self) -> String;

    /// Moves the filter focus to the next category filter.
    fn focus_next_filter(&mut self);

    /// Cycles the focused category filter.
    ///
    /// # Errors
    ///
    /// Returns [`ZadminError::Config`] when the page has no category filter.
    fn cycle_focused_filter(&mut self) -> Result<()>;

    /// Opens the date filter prompt.
    ///
    /// # Errors
    ///
    /// [`ZadminError::Config`] when the page has no date filter,
    /// [`ZadminError::DialogBusy`] when a dialog is open.
    fn open_date_filter(&mut self) -> Result<()>;

    fn clear_filters(&mut self);

    fn next_page(&mut self) -> bool;
    fn prev_page(&mut self) -> bool;
    fn first_page(&mut self) -> bool;
    fn last_page(&mut self) -> bool;

    /// Changes the page size and returns to page 1.
    ///
    /// # Errors
    ///
    /// Returns [`ZadminError::Validation`] for zero.
    fn set_page_size(&mut self, page_size: usize) -> Result<()>;

    fn page_size(&self) -> usize;

    /// Moves the row cursor by `delta`, wrapping within the current page.
    fn move_cursor(&mut self, delta: isize);

    /// Id of the record under the cursor.
    fn cursor_id(&self) -> Option<RecordId>;

    /// Toggles the bulk selection of the row under the cursor.
    fn toggle_row(&mut self) -> bool;

    /// Header checkbox click over the filtered rows.
    fn toggle_header(&mut self);

    fn clear_selection(&mut self);

    fn selected_ids(&self) -> Vec<RecordId>;

    /// Runs a row action on the record under the cursor.
    ///
    /// # Errors
    ///
    /// See [`DataTable::dispatch`].
    fn row_action(&mut self, kind: ActionKind) -> Result<Dispatch>;

    /// Opens the create form.
    ///
    /// # Errors
    ///
    /// [`ZadminError::Config`] when the page cannot create records,
    /// [`ZadminError::DialogBusy`] when a dialog is open.
    fn open_create(&mut self) -> Result<()>;

    /// Opens the bulk delete confirmation over the selection.
    ///
    /// # Errors
    ///
    /// [`ZadminError::Validation`] when nothing is selected,
    /// [`ZadminError::DialogBusy`] when a dialog is open.
    fn open_bulk_delete(&mut self) -> Result<()>;

    fn dialog(&self) -> &Dialog;

    fn dialog_mut(&mut self) -> &mut Dialog;

    /// Renderable table for the current page.
    fn table_view(&self) -> TableView;

    /// Filter bar chips in declaration order; the search filter is omitted.
    fn filter_chips(&self) -> Vec<FilterChip>;

    /// Renderable dialog, when one is open.
    fn dialog_view(&self) -> Option<DialogView> {
        self.dialog().pending().map(|pending| DialogView {
            title: pending.form.title.clone(),
            message: pending.form.message.clone(),
            fields: pending
                .form
                .fields
                .iter()
                .enumerate()
                .map(|(i, field)| DialogField {
                    label: field.label.to_string(),
                    value: field.value.clone(),
                    is_focused: i == pending.form.focus,
                    is_choice: matches!(field.rule, FieldRule::OneOf(_)),
                })
                .collect(),
            error: pending.error.clone(),
        })
    }
}

impl<R: Record> TablePage for DataTable<R> {
    fn noun(&self) -> &'static str {
        R::KIND
    }

    fn len(&self) -> usize {
        self.records.len()
    }

    fn filtered_len(&self) -> usize {
        self.records.iter().filter(|r| self.filters.matches(*r)).count()
    }

    fn filtered_ids(&self) -> Vec<RecordId> {
        self.filtered().iter().map(|r| r.id()).collect()
    }

    fn set_filter(&mut self, key: &str, raw: &str) -> Result<()> {
        if self.filters.set(R::filters(), &self.choices, key, raw)? {
            tracing::debug!(kind = R::KIND, key, value = raw, "filter changed");
            self.restart();
        }
        Ok(())
    }

    fn search_text(&self) -> String {
        self.filters
            .get(SEARCH_FILTER)
            .map(FilterValue::display)
            .unwrap_or_default()
    }

    fn focus_next_filter(&mut self) {
        let count = Self::category_filters().count();
        if count > 0 {
            self.focused_filter = (self.focused_filter + 1) % count;
        }
    }

    fn cycle_focused_filter(&mut self) -> Result<()> {
        let key = Self::category_filters()
            .nth(self.focused_filter)
            .ok_or_else(|| ZadminError::Config(format!("{} page has no category filter", R::KIND)))?;
        self.filters.cycle(R::filters(), &self.choices, key)?;
        self.restart();
        Ok(())
    }

    fn open_date_filter(&mut self) -> Result<()> {
        let (key, label) = Self::date_filter()
            .ok_or_else(|| ZadminError::Config(format!("{} page has no date filter", R::KIND)))?;
        let current = self
            .filters
            .get(key)
            .map(FilterValue::display)
            .unwrap_or_default();
        let form = Form::new(format!("Filter by {}", label.to_lowercase()))
            .message("Enter a date as YYYY-MM-DD, or leave empty to show all")
            .field("date", label, FieldRule::Date, current);
        self.dialog
            .open(PendingAction::new(PendingKind::DateFilter(key), None, form))
    }

    fn clear_filters(&mut self) {
        if !self.filters.is_empty() {
            self.filters.clear();
            self.restart();
        }
    }

    fn next_page(&mut self) -> bool {
        let moved = self.page.next(self.filtered_len());
        if moved {
            self.cursor = 0;
        }
        moved
    }

    fn prev_page(&mut self) -> bool {
        let moved = self.page.prev(self.filtered_len());
        if moved {
            self.cursor = 0;
        }
        moved
    }

    fn first_page(&mut self) -> bool {
        let moved = self.page.first();
        if moved {
            self.cursor = 0;
        }
        moved
    }

    fn last_page(&mut self) -> bool {
        let moved = self.page.last(self.filtered_len());
        if moved {
            self.cursor = 0;
        }
        moved
    }

    fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        self.page.set_page_size(page_size)?;
        self.restart();
        Ok(())
    }

    fn page_size(&self) -> usize {
        self.page.page_size()
    }

    fn move_cursor(&mut self, delta: isize) {
        let rows = self.page.bounds(self.filtered_len()).len();
        if rows == 0 {
            return;
        }
        let rows = rows as isize;
        let cursor = self.cursor as isize;
        self.cursor = (cursor + delta).rem_euclid(rows) as usize;
    }

    fn cursor_id(&self) -> Option<RecordId> {
        self.cursor_record().map(Record::id)
    }

    fn toggle_row(&mut self) -> bool {
        match self.cursor_id() {
            Some(id) => self.selection.toggle(id),
            None => false,
        }
    }

    fn toggle_header(&mut self) {
        let candidates = self.filtered_ids();
        self.selection.toggle_header(&candidates);
    }

    fn clear_selection(&mut self) {
        self.selection.clear();
    }

    fn selected_ids(&self) -> Vec<RecordId> {
        self.selection.ids()
    }

    fn row_action(&mut self, kind: ActionKind) -> Result<Dispatch> {
        match self.cursor_id() {
            Some(id) => self.dispatch(id, kind),
            None => Ok(Dispatch::Unsupported),
        }
    }

    fn open_create(&mut self) -> Result<()> {
        let form = R::create_form()
            .map(|form| self.with_choices(form))
            .ok_or_else(|| ZadminError::Config(format!("{} records cannot be created", R::KIND)))?;
        self.dialog
            .open(PendingAction::new(PendingKind::Create, None, form))
    }

    fn open_bulk_delete(&mut self) -> Result<()> {
        if self.selection.is_empty() {
            return Err(ZadminError::validation(
                "selection",
                format!("Select at least one {} first", R::KIND),
            ));
        }
        let ids = self.selection.ids();
        let form = Form::new(format!("Delete {} selected {}s", ids.len(), R::KIND))
            .message("This cannot be undone")
            .field("reason", "Reason", FieldRule::Required, "");
        self.dialog
            .open(PendingAction::new(PendingKind::BulkDelete(ids), None, form))
    }

    fn dialog(&self) -> &Dialog {
        &self.dialog
    }

    fn dialog_mut(&mut self) -> &mut Dialog {
        &mut self.dialog
    }

    fn table_view(&self) -> TableView {
        let filtered = self.filtered();
        let candidates: Vec<RecordId> = filtered.iter().map(|r| r.id()).collect();
        let rows = self
            .page
            .slice(&filtered)
            .iter()
            .enumerate()
            .map(|(i, record)| RowView {
                cells: R::columns().iter().map(|c| record.cell(c.key)).collect(),
                is_checked: self.selection.is_selected(record.id()),
                is_cursor: i == self.cursor,
            })
            .collect();

        TableView {
            columns: R::columns()
                .iter()
                .map(|c| ColumnHeader {
                    title: c.title.to_string(),
                    width: c.width,
                })
                .collect(),
            header_check: self.selection.header_state(&candidates),
            rows,
            pager: PagerInfo {
                page: self.page.page(),
                total_pages: self.page.total_pages(filtered.len()),
                page_size: self.page.page_size(),
                filtered: filtered.len(),
                total: self.records.len(),
                selected: self.selection.count(),
            },
        }
    }

    fn filter_chips(&self) -> Vec<FilterChip> {
        let focused = Self::category_filters().nth(self.focused_filter);
        R::filters()
            .iter()
            .filter(|spec| spec.key != SEARCH_FILTER)
            .map(|spec| FilterChip {
                label: spec.label.to_string(),
                value: self
                    .filters
                    .get(spec.key)
                    .map_or_else(|| ALL.to_string(), FilterValue::display),
                is_focused: focused == Some(spec.key),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Role, User, UserStatus};
    use chrono::NaiveDate;

    fn users(n: u64) -> Vec<User> {
        (1..=n)
            .map(|id| User {
                id,
                name: format!("User {id}"),
                email: format!("user{id}@example.com"),
                role: if id % 2 == 0 { Role::Admin } else { Role::Viewer },
                status: UserStatus::Active,
                plan: "Free".into(),
                joined: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            })
            .collect()
    }

    #[test]
    fn filter_change_returns_to_first_page() {
        let mut table = DataTable::new(users(9), 2);
        table.last_page();
        assert_eq!(table.page_state().page(), 5);

        table.set_filter("role", "Admin").unwrap();
        assert_eq!(table.page_state().page(), 1);
        assert_eq!(table.filtered_len(), 4);
        assert_eq!(table.table_view().pager.total_pages, 2);
    }

    #[test]
    fn cursor_wraps_within_page() {
        let mut table = DataTable::new(users(5), 2);
        table.move_cursor(-1);
        assert_eq!(table.cursor_id(), Some(2));
        table.move_cursor(1);
        assert_eq!(table.cursor_id(), Some(1));

        table.last_page();
        table.move_cursor(1);
        assert_eq!(table.cursor_id(), Some(5));
    }

    #[test]
    fn header_toggle_covers_filtered_rows_on_every_page() {
        let mut table = DataTable::new(users(6), 2);
        table.set_filter("role", "Viewer").unwrap();
        table.toggle_header();
        assert_eq!(table.selected_ids(), vec![1, 3, 5]);
        assert_eq!(table.table_view().header_check, HeaderCheck::All);

        table.clear_filters();
        assert_eq!(table.table_view().header_check, HeaderCheck::Some);
    }

    #[test]
    fn bulk_delete_requires_selection() {
        let mut table = DataTable::new(users(3), 10);
        let err = table.open_bulk_delete().unwrap_err();
        assert!(matches!(err, ZadminError::Validation { .. }));
        assert!(!table.dialog().is_open());
    }

    #[test]
    fn chips_show_all_for_inactive_filters() {
        let mut table = DataTable::new(users(3), 10);
        table.focus_next_filter();
        table.cycle_focused_filter().unwrap();
        let chips = table.filter_chips();
        let status = chips.iter().find(|c| c.label == "Status").unwrap();
        assert_eq!(status.value, "Active");
        assert!(status.is_focused);
        let role = chips.iter().find(|c| c.label == "Role").unwrap();
        assert_eq!(role.value, ALL);
    }

    #[test]
    fn insert_uses_next_free_id() {
        let mut table = DataTable::new(users(3), 10);
        let id = table.insert_with(|id| User {
            id,
            ..users(1).remove(0)
        });
        assert_eq!(id, 4);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn edit_form_offers_runtime_choices() {
        let mut table = DataTable::new(users(2), 10);
        table.set_choices("plan", vec!["Gold".to_string()]);

        table.dispatch(1, ActionKind::Edit).unwrap();
        let pending = table.dialog().pending().unwrap();
        let plan = pending.form.fields.iter().find(|f| f.key == "plan").unwrap();
        assert_eq!(plan.value, "Free");
        assert_eq!(
            plan.rule,
            FieldRule::OneOf(vec!["Gold".to_string(), "Free".to_string()])
        );

        table.set_filter("plan", "Gold").unwrap();
        assert_eq!(table.filtered_len(), 0);
        assert!(table.set_filter("plan", "Premium").is_err());
    }

    #[test]
    fn date_filter_prompt_opens_once() {
        let mut table = DataTable::new(users(3), 10);
        table.open_date_filter().unwrap();
        assert!(matches!(
            table.open_date_filter(),
            Err(ZadminError::DialogBusy)
        ));
    }
}
