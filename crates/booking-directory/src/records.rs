// crates/booking-directory/src/records.rs
// ============================================================================
// Module: Directory Records
// Description: Organization and member records handed over by the data layer.
// Purpose: Define the input shapes the directory is composed from.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Records arrive already fetched; the directory never queries storage. Every
//! text field is optional because profiles are frequently incomplete.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Records
// ============================================================================

/// Organization member as stored by the data layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
    /// User identifier.
    pub id: u64,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Username used in booking links.
    #[serde(default)]
    pub username: Option<String>,
    /// Free-form bio (markdown).
    #[serde(default)]
    pub bio: Option<String>,
    /// Avatar image URL.
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Owning organization identifier.
    #[serde(default)]
    pub organization_id: Option<u64>,
    /// Whether the member accepted the organization invite.
    #[serde(default)]
    pub accepted: bool,
}

/// Team or organization with its members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationRecord {
    /// Organization display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Organization slug.
    #[serde(default)]
    pub slug: Option<String>,
    /// Logo image URL.
    #[serde(default)]
    pub logo_url: Option<String>,
    /// Whether the team is an organization (plain teams have no directory).
    #[serde(default)]
    pub is_organization: bool,
    /// Members in data-layer order.
    #[serde(default)]
    pub members: Vec<MemberRecord>,
}
