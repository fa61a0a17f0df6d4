// crates/booking-directory/src/search.rs
// ============================================================================
// Module: Directory Search
// Description: Case-insensitive member search and empty-state selection.
// Purpose: Filter directory members by name or bio substring.
// Dependencies: crate::page
// ============================================================================

//! ## Overview
//! Search is a linear substring filter. A blank query (after trimming) returns
//! every member. Otherwise the lowercased query, untrimmed, must occur in the
//! lowercased name or bio. Order is preserved.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::page::DirectoryMember;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Markup left behind by rich-text editors for an empty bio.
const EMPTY_PARAGRAPH: &str = "<p><br></p>";

// ============================================================================
// SECTION: Search
// ============================================================================

/// Returns the members matching the query, in input order.
#[must_use]
pub fn filter_members<'a>(members: &'a [DirectoryMember], query: &str) -> Vec<&'a DirectoryMember> {
    if query.trim().is_empty() {
        return members.iter().collect();
    }
    let needle = query.to_lowercase();
    members
        .iter()
        .filter(|member| {
            contains_lowercase(member.name.as_deref(), &needle)
                || contains_lowercase(member.bio.as_deref(), &needle)
        })
        .collect()
}

/// Returns true when the lowercased field contains the needle.
fn contains_lowercase(field: Option<&str>, needle: &str) -> bool {
    field.is_some_and(|text| text.to_lowercase().contains(needle))
}

/// Returns true when a bio has no displayable content.
#[must_use]
pub fn is_bio_empty(bio: Option<&str>) -> bool {
    bio.is_none_or(|text| text.replacen(EMPTY_PARAGRAPH, "", 1).is_empty())
}

// ============================================================================
// SECTION: Empty States
// ============================================================================

/// Reason the member grid is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyState {
    /// A search query matched nobody.
    NoResults,
    /// The organization has no listed members.
    NoMembers,
}

/// Selects the empty state for a filtered result, if the grid is empty.
#[must_use]
pub fn empty_state(filtered_len: usize, query: &str) -> Option<EmptyState> {
    if filtered_len > 0 {
        return None;
    }
    if query.is_empty() { Some(EmptyState::NoMembers) } else { Some(EmptyState::NoResults) }
}
