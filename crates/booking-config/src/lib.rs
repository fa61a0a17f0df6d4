// crates/booking-config/src/lib.rs
// ============================================================================
// Module: Booking Config Library
// Description: Canonical config model, validation, and registry construction.
// Purpose: Single source of truth for booking.toml semantics.
// Dependencies: booking-app-keys, booking-directory, serde, toml
// ============================================================================

//! ## Overview
//! `booking-config` defines the canonical configuration model for the booking
//! app-keys and directory tooling. It provides strict, fail-closed validation,
//! builds the app key [`booking_app_keys::SchemaRegistry`] from declared app
//! schemas, and ships a canonical example config.
//!
//! Security posture: config inputs and referenced schema files are untrusted.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;
pub mod registry;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
pub use registry::RegistryBuildError;
pub use registry::build_registry;
