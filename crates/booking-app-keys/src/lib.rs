// crates/booking-app-keys/src/lib.rs
// ============================================================================
// Module: Booking App Keys Library
// Description: Public API surface for app key requirement checks.
// Purpose: Expose app identifiers, key schemas, the schema registry, and audit sinks.
// Dependencies: crate::{identifiers, schema, registry, checker, audit}
// ============================================================================

//! ## Overview
//! `booking-app-keys` decides whether an installed app (a third-party
//! integration such as a calendar or payment provider) has the keys it needs.
//! Each app may declare a key schema in a read-only [`SchemaRegistry`]. An app
//! without a schema is always configured; an app with a schema is configured
//! only when its stored keys validate.
//!
//! The check itself is total and side-effect free. Audit sinks live alongside
//! it so callers can record outcomes without logging stored key values.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod checker;
pub mod identifiers;
pub mod registry;
pub mod schema;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::AppKeysAuditSink;
pub use audit::FileAuditSink;
pub use audit::KeysCheckAuditEvent;
pub use audit::NoopAuditSink;
pub use audit::RegistryAuditEvent;
pub use audit::StderrAuditSink;
pub use checker::AppKeysChecker;
pub use checker::KeysCheck;
pub use checker::check_app_keys;
pub use checker::has_required_app_keys;
pub use identifiers::AppSlug;
pub use registry::RegistryError;
pub use registry::SchemaRegistry;
pub use registry::SchemaRegistryBuilder;
pub use registry::global_registry;
pub use registry::install_global_registry;
pub use schema::JsonKeySchema;
pub use schema::KeyKind;
pub use schema::KeyRule;
pub use schema::KeySchema;
pub use schema::RequiredKeys;
pub use schema::SchemaCompileError;
pub use schema::SchemaViolation;
