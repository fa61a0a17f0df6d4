// crates/booking-cli/src/report.rs
// ============================================================================
// Module: CLI Reports
// Description: JSON report shapes printed by CLI commands.
// Purpose: Keep command output stable and free of stored key values.
// Dependencies: booking-app-keys, booking-directory, serde
// ============================================================================

//! ## Overview
//! Reports are the only data the CLI prints. Key check reports carry the
//! outcome and validation messages, never the stored keys themselves.

// ============================================================================
// SECTION: Imports
// ============================================================================

use booking_app_keys::KeysCheck;
use booking_app_keys::SchemaRegistry;
use booking_directory::DirectoryPage;
use booking_directory::EmptyState;
use booking_directory::OrgSummary;
use booking_directory::empty_state;
use booking_directory::filter_members;
use serde::Serialize;

// ============================================================================
// SECTION: App Key Reports
// ============================================================================

/// Result of `booking apps check`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeysCheckReport {
    /// Checked app slug.
    pub app: String,
    /// Whether the app counts as configured.
    pub configured: bool,
    /// Requirement outcome label.
    pub requirement: &'static str,
    /// Validation messages (empty unless unsatisfied).
    pub errors: Vec<String>,
}

impl KeysCheckReport {
    /// Builds a report from a check outcome.
    #[must_use]
    pub fn new(app: &str, outcome: &KeysCheck) -> Self {
        Self {
            app: app.to_string(),
            configured: outcome.is_configured(),
            requirement: outcome.label(),
            errors: outcome
                .violation()
                .map(|violation| violation.messages().to_vec())
                .unwrap_or_default(),
        }
    }
}

/// One row of `booking apps list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppListEntry {
    /// App slug.
    pub app: String,
    /// Whether the app declares a key schema.
    pub declares_keys: bool,
    /// Kind of the declared schema, if any.
    pub schema_kind: Option<&'static str>,
}

/// Lists configured apps in input order, followed by any registered apps not
/// named in `slugs`.
#[must_use]
pub fn app_listing<'a>(
    slugs: impl IntoIterator<Item = &'a str>,
    registry: &SchemaRegistry,
) -> Vec<AppListEntry> {
    let mut entries: Vec<AppListEntry> = slugs
        .into_iter()
        .map(|slug| AppListEntry {
            app: slug.to_string(),
            declares_keys: registry.contains(slug),
            schema_kind: registry.get(slug).map(|schema| schema.kind_label()),
        })
        .collect();
    for (app, schema) in registry.iter() {
        if !entries.iter().any(|entry| entry.app == app.as_str()) {
            entries.push(AppListEntry {
                app: app.to_string(),
                declares_keys: true,
                schema_kind: Some(schema.kind_label()),
            });
        }
    }
    entries
}

// ============================================================================
// SECTION: Directory Reports
// ============================================================================

/// Member card as printed by `booking directory show`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberCard {
    /// User identifier.
    pub id: u64,
    /// Display name.
    pub name: Option<String>,
    /// Username used in booking links.
    pub username: String,
    /// Booking page URL.
    pub profile_url: String,
    /// Avatar image URL.
    pub avatar_url: Option<String>,
    /// Bio, omitted when it has no displayable content.
    pub bio: Option<String>,
}

/// Result of `booking directory show`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryReport {
    /// Organization header.
    pub org: OrgSummary,
    /// Whether the request host is an organization subdomain.
    pub is_valid_org_domain: bool,
    /// Organization slug taken from the host or the route fallback.
    pub current_org_domain: Option<String>,
    /// Search query applied to the member list.
    pub query: String,
    /// Members matching the query.
    pub members: Vec<MemberCard>,
    /// Why the member grid is empty, if it is.
    pub empty_state: Option<EmptyState>,
}

impl DirectoryReport {
    /// Filters the page by `query` and renders the visible member cards.
    #[must_use]
    pub fn new(page: &DirectoryPage, query: &str) -> Self {
        let members: Vec<MemberCard> = filter_members(&page.members, query)
            .into_iter()
            .map(|member| MemberCard {
                id: member.id,
                name: member.name.clone(),
                username: member.username.clone(),
                profile_url: member.profile_url(),
                avatar_url: member.avatar_url.clone(),
                bio: member.has_bio().then(|| member.bio.clone()).flatten(),
            })
            .collect();
        Self {
            org: page.org.clone(),
            is_valid_org_domain: page.is_valid_org_domain,
            current_org_domain: page.current_org_domain.clone(),
            query: query.to_string(),
            empty_state: empty_state(members.len(), query),
            members,
        }
    }
}
