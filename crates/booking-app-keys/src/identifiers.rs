// crates/booking-app-keys/src/identifiers.rs
// ============================================================================
// Module: App Identifiers
// Description: Opaque identifier for installable apps.
// Purpose: Provide a strongly typed, serializable app key with a stable string form.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Apps are identified by their directory name (the "slug"). The identifier is
//! opaque: the checker only uses it as a registry key. Slug syntax is enforced
//! at the config boundary, not by this wrapper.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::borrow::Borrow;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// App identifier (the app's directory name).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppSlug(String);

impl AppSlug {
    /// Creates a new app identifier.
    #[must_use]
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for AppSlug {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for AppSlug {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl Borrow<str> for AppSlug {
    fn borrow(&self) -> &str {
        &self.0
    }
}
