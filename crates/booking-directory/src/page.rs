// crates/booking-directory/src/page.rs
// ============================================================================
// Module: Directory Page Model
// Description: Projection of an organization record into the directory page.
// Purpose: Keep only bookable members and attach their booking URLs.
// Dependencies: crate::{domain, records}, serde, thiserror
// ============================================================================

//! ## Overview
//! A directory page exists only for organizations. Members are listed when
//! they accepted the invite and have a username to book against; data-layer
//! order is preserved. Every member shares the organization's booker URL.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use thiserror::Error;

use crate::domain::DomainSettings;
use crate::domain::OrgDomain;
use crate::domain::booker_base_url;
use crate::records::MemberRecord;
use crate::records::OrganizationRecord;
use crate::search::is_bio_empty;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Directory composition errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DirectoryError {
    /// No organization matched the request.
    #[error("organization not found")]
    NotFound,
    /// The team exists but is not an organization.
    #[error("team is not an organization")]
    NotOrganization,
}

impl DirectoryError {
    /// Returns the stable error code for this directory error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::NotOrganization => "not_organization",
        }
    }
}

// ============================================================================
// SECTION: Page Types
// ============================================================================

/// Organization header shown above the member grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrgSummary {
    /// Organization display name.
    pub name: Option<String>,
    /// Organization slug.
    pub slug: Option<String>,
    /// Logo image URL.
    pub logo_url: Option<String>,
}

/// Member card data for the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryMember {
    /// User identifier.
    pub id: u64,
    /// Display name.
    pub name: Option<String>,
    /// Username used in booking links.
    pub username: String,
    /// Free-form bio (markdown).
    pub bio: Option<String>,
    /// Avatar image URL.
    pub avatar_url: Option<String>,
    /// Owning organization identifier.
    pub organization_id: Option<u64>,
    /// Base URL booking links start from.
    pub booker_url: String,
}

impl DirectoryMember {
    /// Returns the member's booking page URL.
    #[must_use]
    pub fn profile_url(&self) -> String {
        format!("{}/{}", self.booker_url, self.username)
    }

    /// Returns true when the bio has displayable content.
    #[must_use]
    pub fn has_bio(&self) -> bool {
        !is_bio_empty(self.bio.as_deref())
    }

    /// Projects a member record; members without a username are skipped.
    fn from_record(record: MemberRecord, booker_url: &str) -> Option<Self> {
        let username = record.username.filter(|username| !username.is_empty())?;
        Some(Self {
            id: record.id,
            name: record.name,
            username,
            bio: record.bio,
            avatar_url: record.avatar_url,
            organization_id: record.organization_id,
            booker_url: booker_url.to_string(),
        })
    }
}

/// Directory page model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryPage {
    /// Organization header.
    pub org: OrgSummary,
    /// Bookable members in data-layer order.
    pub members: Vec<DirectoryMember>,
    /// Whether the request host is an organization subdomain.
    pub is_valid_org_domain: bool,
    /// Organization slug taken from the host or the route fallback.
    pub current_org_domain: Option<String>,
}

// ============================================================================
// SECTION: Composition
// ============================================================================

/// Builds the directory page for a fetched organization.
///
/// # Errors
///
/// Returns [`DirectoryError`] when no organization was found or the team is
/// not an organization.
pub fn build_directory_page(
    org: Option<OrganizationRecord>,
    domain: OrgDomain,
    settings: &DomainSettings,
) -> Result<DirectoryPage, DirectoryError> {
    let org = org.ok_or(DirectoryError::NotFound)?;
    if !org.is_organization {
        return Err(DirectoryError::NotOrganization);
    }
    let booker_url = booker_base_url(org.slug.as_deref(), settings);
    let members = org
        .members
        .into_iter()
        .filter(|member| member.accepted)
        .filter_map(|member| DirectoryMember::from_record(member, &booker_url))
        .collect();
    Ok(DirectoryPage {
        org: OrgSummary {
            name: org.name,
            slug: org.slug,
            logo_url: org.logo_url,
        },
        members,
        is_valid_org_domain: domain.is_valid_org_domain,
        current_org_domain: domain.current_org_domain,
    })
}
