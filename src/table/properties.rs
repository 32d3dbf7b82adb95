//! Property tests for filter composition and pagination.

use super::{DataTable, PageState, TablePage};
use crate::domain::{Role, User, UserStatus, PLAN_NAMES};
use chrono::NaiveDate;
use proptest::prelude::*;

const NAMES: &[&str] = &["Ann", "Ben", "Cal", "Dee", "Eve", "Finn"];

fn arb_user() -> impl Strategy<Value = (usize, usize, bool, usize, u32)> {
    (0..NAMES.len(), 0..3usize, any::<bool>(), 0..PLAN_NAMES.len(), 1..4u32)
}

fn build(specs: Vec<(usize, usize, bool, usize, u32)>) -> Vec<User> {
    specs
        .into_iter()
        .zip(1u64..)
        .map(|((name, role, active, plan, day), id)| User {
            id,
            name: NAMES[name].to_string(),
            email: format!("{}{id}@example.com", NAMES[name].to_lowercase()),
            role: [Role::Admin, Role::Editor, Role::Viewer][role],
            status: if active {
                UserStatus::Active
            } else {
                UserStatus::Suspended
            },
            plan: PLAN_NAMES[plan].to_string(),
            joined: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
        })
        .collect()
}

proptest! {
    #[test]
    fn filtered_set_is_exactly_the_matching_records(
        specs in prop::collection::vec(arb_user(), 0..40),
        search in prop::option::of(0..NAMES.len()),
        role in prop::option::of(0..3usize),
        plan in prop::option::of(0..PLAN_NAMES.len()),
        day in prop::option::of(1..4u32),
    ) {
        let users = build(specs);
        let mut table = DataTable::new(users.clone(), 10);

        let needle = search.map(|i| NAMES[i].to_lowercase());
        let role = role.map(|i| ["Admin", "Editor", "Viewer"][i]);
        let plan = plan.map(|i| PLAN_NAMES[i]);
        let date = day.map(|d| NaiveDate::from_ymd_opt(2024, 5, d).unwrap());

        if let Some(needle) = &needle {
            table.set_filter("search", needle).unwrap();
        }
        if let Some(role) = role {
            table.set_filter("role", role).unwrap();
        }
        if let Some(plan) = plan {
            table.set_filter("plan", plan).unwrap();
        }
        if let Some(date) = date {
            table.set_filter("joined", &date.format("%Y-%m-%d").to_string()).unwrap();
        }

        let expected: Vec<u64> = users
            .iter()
            .filter(|u| {
                needle.as_ref().map_or(true, |n| {
                    u.name.to_lowercase().contains(n.as_str()) || u.email.contains(n.as_str())
                })
            })
            .filter(|u| role.map_or(true, |r| u.role.as_str() == r))
            .filter(|u| plan.map_or(true, |p| u.plan == p))
            .filter(|u| date.map_or(true, |d| u.joined == d))
            .map(|u| u.id)
            .collect();

        prop_assert_eq!(table.filtered_ids(), expected);
        prop_assert!(table.filtered_len() <= table.len());
    }

    #[test]
    fn pages_partition_the_collection(total in 0..300usize, page_size in 1..25usize) {
        let mut pages = PageState::new(page_size);
        let total_pages = pages.total_pages(total);
        prop_assert!(total_pages >= 1);

        let mut seen = 0;
        for page in 1..=total_pages {
            pages.go_to(page, total);
            prop_assert_eq!(pages.page(), page);
            let bounds = pages.bounds(total);
            prop_assert_eq!(bounds.start, seen);
            prop_assert!(bounds.len() <= page_size);
            seen += bounds.len();
        }
        prop_assert_eq!(seen, total);
        prop_assert!(!pages.next(total));
    }

    #[test]
    fn table_paging_visits_every_filtered_row_once(
        specs in prop::collection::vec(arb_user(), 0..60),
        page_size in 1..12usize,
    ) {
        let users = build(specs);
        let mut table = DataTable::new(users, page_size);
        table.set_filter("status", "Active").unwrap();

        let mut visited: Vec<u64> = table.visible().iter().map(|u| u.id).collect();
        while table.next_page() {
            let rows = table.visible();
            prop_assert!(!rows.is_empty() && rows.len() <= page_size);
            visited.extend(rows.iter().map(|u| u.id));
        }
        prop_assert_eq!(visited, table.filtered_ids());
    }
}
