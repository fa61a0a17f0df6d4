//! Directory search tests.
// crates/booking-directory/tests/search.rs
// ============================================================================
// Module: Directory Search Tests
// Description: Substring filtering, bio emptiness, and empty states.
// Purpose: Keep search case-insensitive and order-preserving.
// ============================================================================

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    reason = "Test-only assertions use unwrap/expect for clarity."
)]

mod common;

use booking_directory::DirectoryMember;
use booking_directory::EmptyState;
use booking_directory::build_directory_page;
use booking_directory::empty_state;
use booking_directory::filter_members;
use booking_directory::is_bio_empty;
use booking_directory::resolve_org_domain;
use proptest::prelude::*;

fn sample_members() -> Vec<DirectoryMember> {
    let settings = common::settings();
    let domain = resolve_org_domain(None, Some("acme"), &settings);
    build_directory_page(Some(common::sample_org()), domain, &settings).unwrap().members
}

fn usernames(members: &[&DirectoryMember]) -> Vec<String> {
    members.iter().map(|m| m.username.clone()).collect()
}

#[test]
fn blank_query_returns_everyone() {
    let members = sample_members();
    assert_eq!(filter_members(&members, "").len(), 3);
    assert_eq!(filter_members(&members, "   ").len(), 3);
}

#[test]
fn query_matches_name_or_bio_case_insensitively() {
    let members = sample_members();
    assert_eq!(usernames(&filter_members(&members, "GRACE")), ["grace"]);
    assert_eq!(usernames(&filter_members(&members, "engine")), ["ada", "linus"]);
}

#[test]
fn query_is_not_trimmed_when_matching() {
    let members = sample_members();
    assert!(filter_members(&members, " hopper ").is_empty());
    assert_eq!(usernames(&filter_members(&members, " hopper")), ["grace"]);
}

#[test]
fn members_without_bio_match_on_name_only() {
    let members = sample_members();
    assert!(filter_members(&members, "kernel").iter().all(|m| m.username == "linus"));
    assert!(filter_members(&members, "nobody").is_empty());
}

#[test]
fn bio_emptiness_strips_one_empty_paragraph() {
    assert!(is_bio_empty(None));
    assert!(is_bio_empty(Some("")));
    assert!(is_bio_empty(Some("<p><br></p>")));
    assert!(!is_bio_empty(Some("<p><br></p><p><br></p>")));
    assert!(!is_bio_empty(Some("Hello")));
}

#[test]
fn empty_state_depends_on_query() {
    assert_eq!(empty_state(0, ""), Some(EmptyState::NoMembers));
    assert_eq!(empty_state(0, "zed"), Some(EmptyState::NoResults));
    assert_eq!(empty_state(0, " "), Some(EmptyState::NoResults));
    assert_eq!(empty_state(2, "zed"), None);
}

proptest! {
    #[test]
    fn filtered_members_are_an_ordered_subset(query in ".{0,6}") {
        let members = sample_members();
        let filtered = filter_members(&members, &query);
        prop_assert!(filtered.len() <= members.len());
        let mut cursor = members.iter();
        for member in &filtered {
            prop_assert!(cursor.any(|candidate| candidate == *member));
        }
    }

    #[test]
    fn matches_contain_the_lowercased_query(query in "[a-zA-Z ]{1,4}") {
        let members = sample_members();
        let needle = query.to_lowercase();
        for member in filter_members(&members, &query) {
            if query.trim().is_empty() {
                continue;
            }
            let name = member.name.clone().unwrap_or_default().to_lowercase();
            let bio = member.bio.clone().unwrap_or_default().to_lowercase();
            prop_assert!(name.contains(&needle) || bio.contains(&needle));
        }
    }
}
