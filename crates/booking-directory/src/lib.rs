// crates/booking-directory/src/lib.rs
// ============================================================================
// Module: Booking Directory Library
// Description: Public API surface for the organization member directory.
// Purpose: Compose directory pages from organization records and search them.
// Dependencies: crate::{records, domain, page, search}
// ============================================================================

//! ## Overview
//! The organization directory lists an organization's accepted members so
//! visitors can book time with them. This crate owns the pure parts of that
//! feature: resolving the organization domain from a request host, projecting
//! fetched records into a [`DirectoryPage`], and the case-insensitive search
//! over member names and bios. Fetching records and rendering pages belong to
//! the caller.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod domain;
pub mod page;
pub mod records;
pub mod search;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use domain::DomainSettings;
pub use domain::OrgDomain;
pub use domain::booker_base_url;
pub use domain::resolve_org_domain;
pub use domain::slugify;
pub use page::DirectoryError;
pub use page::DirectoryMember;
pub use page::DirectoryPage;
pub use page::OrgSummary;
pub use page::build_directory_page;
pub use records::MemberRecord;
pub use records::OrganizationRecord;
pub use search::EmptyState;
pub use search::empty_state;
pub use search::filter_members;
pub use search::is_bio_empty;
