// crates/booking-app-keys/src/checker.rs
// ============================================================================
// Module: App Key Requirement Checker
// Description: Decide whether an app's stored keys satisfy its declared schema.
// Purpose: Provide a total, pure predicate over (app, stored keys, registry).
// Dependencies: crate::{registry, schema}, serde, serde_json
// ============================================================================

//! ## Overview
//! An app is configured when it declares no key schema, or when its stored
//! keys validate against the declared schema. Absent keys are treated as JSON
//! `null`. The two outcomes "no schema" and "schema rejects" are kept apart in
//! [`KeysCheck`]; the boolean form [`has_required_app_keys`] is derived from it.
//!
//! The checker performs no I/O, keeps no state, and never fails.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::registry::SchemaRegistry;
use crate::schema::SchemaViolation;

// ============================================================================
// SECTION: Check Outcome
// ============================================================================

/// Outcome of an app key requirement check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "requirement", rename_all = "snake_case")]
pub enum KeysCheck {
    /// The app declares no key schema.
    NoRequirement,
    /// The stored keys satisfy the declared schema.
    Satisfied,
    /// The stored keys violate the declared schema.
    Unsatisfied {
        /// Validation diagnostics.
        violation: SchemaViolation,
    },
}

impl KeysCheck {
    /// Returns true when the app counts as configured.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        matches!(self, Self::NoRequirement | Self::Satisfied)
    }

    /// Returns a stable label for the outcome.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::NoRequirement => "no_requirement",
            Self::Satisfied => "satisfied",
            Self::Unsatisfied {
                ..
            } => "unsatisfied",
        }
    }

    /// Returns the violation when the keys were rejected.
    #[must_use]
    pub const fn violation(&self) -> Option<&SchemaViolation> {
        match self {
            Self::Unsatisfied {
                violation,
            } => Some(violation),
            Self::NoRequirement | Self::Satisfied => None,
        }
    }
}

// ============================================================================
// SECTION: Checks
// ============================================================================

/// Checks stored keys for an app and reports the outcome with diagnostics.
#[must_use]
pub fn check_app_keys(registry: &SchemaRegistry, app: &str, keys: Option<&Value>) -> KeysCheck {
    let Some(schema) = registry.get(app) else {
        return KeysCheck::NoRequirement;
    };
    match schema.validate(keys.unwrap_or(&Value::Null)) {
        Ok(()) => KeysCheck::Satisfied,
        Err(violation) => KeysCheck::Unsatisfied {
            violation,
        },
    }
}

/// Returns true when the app has every key its schema requires.
#[must_use]
pub fn has_required_app_keys(registry: &SchemaRegistry, app: &str, keys: Option<&Value>) -> bool {
    check_app_keys(registry, app, keys).is_configured()
}

// ============================================================================
// SECTION: Checker Handle
// ============================================================================

/// Shareable checker bound to one registry.
#[derive(Debug, Clone)]
pub struct AppKeysChecker {
    /// Registry consulted for every check.
    registry: Arc<SchemaRegistry>,
}

impl AppKeysChecker {
    /// Creates a checker over a shared registry.
    #[must_use]
    pub const fn new(registry: Arc<SchemaRegistry>) -> Self {
        Self {
            registry,
        }
    }

    /// Returns the registry backing this checker.
    #[must_use]
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Returns true when the app is configured.
    #[must_use]
    pub fn is_configured(&self, app: &str, keys: Option<&Value>) -> bool {
        has_required_app_keys(&self.registry, app, keys)
    }

    /// Checks the app and returns the detailed outcome.
    #[must_use]
    pub fn check(&self, app: &str, keys: Option<&Value>) -> KeysCheck {
        check_app_keys(&self.registry, app, keys)
    }
}
