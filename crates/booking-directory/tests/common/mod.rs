// crates/booking-directory/tests/common/mod.rs
// ============================================================================
// Module: Common Test Fixtures
// Description: Sample organization records for directory tests.
// Purpose: Provide reusable fixtures for deterministic directory tests.
// Dependencies: booking-directory
// ============================================================================

//! ## Overview
//! The sample organization mixes accepted and pending members, members without
//! usernames, and bios that are only editor markup.

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]

use booking_directory::DomainSettings;
use booking_directory::MemberRecord;
use booking_directory::OrganizationRecord;

/// Builds a member record with the common fields set.
pub fn member(id: u64, name: &str, username: Option<&str>, bio: Option<&str>) -> MemberRecord {
    MemberRecord {
        id,
        name: Some(name.to_string()),
        username: username.map(str::to_string),
        bio: bio.map(str::to_string),
        avatar_url: None,
        organization_id: Some(1),
        accepted: true,
    }
}

/// Organization with a representative member mix.
pub fn sample_org() -> OrganizationRecord {
    let mut pending = member(3, "Pending Pat", Some("pat"), None);
    pending.accepted = false;
    OrganizationRecord {
        name: Some("Acme".to_string()),
        slug: Some("acme".to_string()),
        logo_url: Some("https://cdn.cal.local/acme.png".to_string()),
        is_organization: true,
        members: vec![
            member(1, "Ada Lovelace", Some("ada"), Some("Scaling analytical engines")),
            member(2, "Grace Hopper", Some("grace"), Some("<p><br></p>")),
            pending,
            member(4, "No Username", None, Some("Engines too")),
            member(5, "Empty Username", Some(""), None),
            member(6, "Linus", Some("linus"), Some("Kernel and ENGINE tuning")),
        ],
    }
}

/// Default domain settings.
pub fn settings() -> DomainSettings {
    DomainSettings::default()
}
