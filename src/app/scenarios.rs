//! End-to-end console scenarios driven through `handle_event`.

use super::{handle_event, Action, AppState, Event, InputMode, Notice, Severity};
use crate::domain::{ActionKind, PageKind, Role, User, UserStatus};
use crate::seed::{EmbeddedSeed, SeedData, SeedSource};
use crate::table::{HeaderCheck, TablePage};
use crate::ui::Theme;
use chrono::NaiveDate;

fn user(id: u64, name: &str, role: Role) -> User {
    User {
        id,
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        role,
        status: UserStatus::Active,
        plan: "Free".to_string(),
        joined: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
    }
}

/// Five users, two of them admins.
fn five_users(page_size: usize) -> AppState {
    let seed = SeedData {
        users: vec![
            user(1, "Ann", Role::Viewer),
            user(2, "Ben", Role::Admin),
            user(3, "Cal", Role::Editor),
            user(4, "Dee", Role::Admin),
            user(5, "Eve", Role::Viewer),
        ],
        ..SeedData::default()
    };
    AppState::new(seed, page_size, Theme::default())
}

fn demo() -> AppState {
    AppState::new(EmbeddedSeed.load().unwrap(), 10, Theme::default())
}

fn send(state: &mut AppState, event: Event) -> Vec<Action> {
    handle_event(state, &event).unwrap().1
}

fn type_text(state: &mut AppState, text: &str) {
    for c in text.chars() {
        send(state, Event::Char(c));
    }
}

#[test]
fn role_filter_paginates_over_matching_users() {
    let mut state = five_users(1);

    // The first category filter is the role; one cycle selects "Admin".
    send(&mut state, Event::CycleFilter);
    assert_eq!(state.users.filtered_len(), 2);

    let view = state.users.table_view();
    assert_eq!(view.pager.total_pages, 2);
    assert_eq!(view.pager.page, 1);
    assert_eq!(state.users.cursor_id(), Some(2));

    send(&mut state, Event::NextPage);
    assert_eq!(state.users.table_view().pager.page, 2);
    assert_eq!(state.users.cursor_id(), Some(4));

    let (moved, _) = handle_event(&mut state, &Event::NextPage).unwrap();
    assert!(!moved);
}

#[test]
fn delete_requires_a_reason() {
    let mut state = five_users(10);

    send(&mut state, Event::RowAction(ActionKind::Delete));
    assert_eq!(state.input_mode, InputMode::Dialog);

    let actions = send(&mut state, Event::Submit);
    assert!(actions.is_empty());
    assert_eq!(state.users.len(), 5);
    let pending = state.users.dialog().pending().unwrap();
    assert!(pending.error.is_some());

    type_text(&mut state, "duplicate account");
    let actions = send(&mut state, Event::Submit);
    assert_eq!(
        actions,
        vec![Action::Notify(Notice::info("Deleted user Ann"))]
    );
    assert_eq!(state.users.len(), 4);
    assert!(state.users.get(1).is_none());
    assert_eq!(state.input_mode, InputMode::Normal);
}

#[test]
fn select_all_only_covers_filtered_rows() {
    let mut state = five_users(10);

    send(&mut state, Event::CycleFilter);
    send(&mut state, Event::ToggleAll);
    assert_eq!(state.users.selected_ids(), vec![2, 4]);
    assert_eq!(state.users.table_view().header_check, HeaderCheck::All);

    send(&mut state, Event::ClearFilters);
    assert_eq!(state.users.selected_ids(), vec![2, 4]);
    assert_eq!(state.users.table_view().header_check, HeaderCheck::Some);

    send(&mut state, Event::ToggleAll);
    assert_eq!(state.users.selected_ids().len(), 5);
    send(&mut state, Event::ToggleAll);
    assert!(state.users.selected_ids().is_empty());
}

#[test]
fn bulk_delete_removes_every_selected_user() {
    let mut state = five_users(10);

    send(&mut state, Event::CycleFilter);
    send(&mut state, Event::ToggleAll);
    send(&mut state, Event::ClearFilters);
    send(&mut state, Event::BulkDelete);
    type_text(&mut state, "cleanup");

    let actions = send(&mut state, Event::Submit);
    assert_eq!(actions, vec![Action::Notify(Notice::info("Deleted 2 users"))]);
    assert_eq!(state.users.filtered_ids(), vec![1, 3, 5]);
    assert!(state.users.selected_ids().is_empty());
}

#[test]
fn plan_form_rejects_invalid_values_until_fixed() {
    let mut state = demo();
    let before = state.plans.len();

    send(&mut state, Event::GoToSection(PageKind::Plans));
    send(&mut state, Event::Create);
    assert_eq!(state.input_mode, InputMode::Dialog);

    // Everything empty.
    send(&mut state, Event::Submit);
    assert!(state.plans.dialog().is_open());

    type_text(&mut state, "Team");
    send(&mut state, Event::NextField);
    type_text(&mut state, "Shared workspace");
    send(&mut state, Event::NextField);
    type_text(&mut state, "Analytics, SSO");
    send(&mut state, Event::NextField);
    type_text(&mut state, "0");
    send(&mut state, Event::NextField);
    type_text(&mut state, "-5");
    send(&mut state, Event::NextField);
    type_text(&mut state, "m");

    // Zero QR limit.
    send(&mut state, Event::Submit);
    assert!(state.plans.dialog().is_open());
    assert_eq!(state.plans.len(), before);

    send(&mut state, Event::PrevField);
    send(&mut state, Event::PrevField);
    send(&mut state, Event::Backspace);
    type_text(&mut state, "100");

    // Negative price.
    send(&mut state, Event::Submit);
    assert!(state.plans.dialog().is_open());
    assert_eq!(state.plans.len(), before);

    send(&mut state, Event::NextField);
    send(&mut state, Event::Backspace);
    send(&mut state, Event::Backspace);
    type_text(&mut state, "19.50");

    let actions = send(&mut state, Event::Submit);
    assert_eq!(actions, vec![Action::Notify(Notice::info("Created plan Team"))]);
    assert_eq!(state.plans.len(), before + 1);
    assert!(!state.plans.dialog().is_open());
}

#[test]
fn cancelled_dialog_changes_nothing() {
    let mut state = five_users(10);

    send(&mut state, Event::RowAction(ActionKind::Edit));
    type_text(&mut state, " Jr");
    send(&mut state, Event::Escape);

    assert_eq!(state.input_mode, InputMode::Normal);
    assert_eq!(state.users.get(1).unwrap().name, "Ann");
}

#[test]
fn bulk_assign_without_selection_reports_error() {
    let mut state = demo();

    let (render, actions) = handle_event(&mut state, &Event::BulkAssignPlan).unwrap();
    assert!(render);
    let [Action::Notify(notice)] = actions.as_slice() else {
        panic!("expected one notice, got {actions:?}");
    };
    assert_eq!(notice.severity, Severity::Error);
    assert!(notice.message.starts_with("No users selected"));
    assert!(!state.users.dialog().is_open());
}

#[test]
fn toggling_status_notifies() {
    let mut state = five_users(10);

    let actions = send(&mut state, Event::RowAction(ActionKind::ToggleStatus));
    assert_eq!(
        actions,
        vec![Action::Notify(Notice::info("Ann status updated"))]
    );
    assert_eq!(state.users.get(1).unwrap().status, UserStatus::Suspended);
}

#[test]
fn transaction_view_lands_on_filtered_users() {
    let mut state = demo();

    send(&mut state, Event::GoToSection(PageKind::Billing));
    let email = state.transactions.cursor_record().unwrap().user_email.clone();

    let actions = send(&mut state, Event::RowAction(ActionKind::View));
    let [Action::Navigate(target)] = actions.as_slice() else {
        panic!("expected a navigation, got {actions:?}");
    };
    assert_eq!(target.page, PageKind::Users);

    let target = target.clone();
    send(&mut state, Event::NavigateTo(target));
    assert_eq!(state.active, PageKind::Users);
    assert_eq!(state.search_query, email);

    let filtered = state.users.filtered();
    assert!(!filtered.is_empty());
    assert!(filtered.iter().all(|u| u.email == email));
}

#[test]
fn details_overlay_closes_on_any_key() {
    let mut state = five_users(10);

    send(&mut state, Event::RowAction(ActionKind::Details));
    assert_eq!(state.input_mode, InputMode::Info);
    assert_eq!(state.info.as_ref().unwrap().title, "Ann");

    send(&mut state, Event::DismissInfo);
    assert_eq!(state.input_mode, InputMode::Normal);
    assert!(state.info.is_none());
}

#[test]
fn newly_created_plan_can_be_filtered_and_edited() {
    let mut state = demo();

    send(&mut state, Event::GoToSection(PageKind::Plans));
    send(&mut state, Event::Create);
    type_text(&mut state, "Gold");
    send(&mut state, Event::NextField);
    type_text(&mut state, "Top tier");
    send(&mut state, Event::NextField);
    type_text(&mut state, "Everything");
    send(&mut state, Event::NextField);
    type_text(&mut state, "unlimited");
    send(&mut state, Event::NextField);
    type_text(&mut state, "99");
    let actions = send(&mut state, Event::Submit);
    assert_eq!(actions, vec![Action::Notify(Notice::info("Created plan Gold"))]);

    send(&mut state, Event::GoToSection(PageKind::Users));
    send(&mut state, Event::ToggleRow);
    send(&mut state, Event::BulkAssignPlan);
    type_text(&mut state, "g");
    let actions = send(&mut state, Event::Submit);
    assert_eq!(
        actions,
        vec![Action::Notify(Notice::info("Assigned Gold to 1 users"))]
    );

    state.users.set_filter("plan", "Gold").unwrap();
    assert_eq!(state.users.filtered_ids(), vec![1]);

    send(&mut state, Event::RowAction(ActionKind::Edit));
    let actions = send(&mut state, Event::Submit);
    assert_eq!(
        actions,
        vec![Action::Notify(Notice::info("Updated user John Doe"))]
    );
    assert_eq!(state.users.get(1).unwrap().plan, "Gold");
}

#[test]
fn renamed_plan_joins_the_user_plan_options() {
    let mut state = demo();

    send(&mut state, Event::GoToSection(PageKind::Plans));
    send(&mut state, Event::RowAction(ActionKind::Edit));
    type_text(&mut state, " Plus");
    send(&mut state, Event::Submit);
    let renamed = state.plans.records()[0].name.clone();
    assert!(renamed.ends_with(" Plus"));

    send(&mut state, Event::GoToSection(PageKind::Users));
    state.users.set_filter("plan", &renamed).unwrap();
    assert_eq!(state.users.filtered_len(), 0);
}
