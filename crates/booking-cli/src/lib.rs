// crates/booking-cli/src/lib.rs
// ============================================================================
// Module: Booking CLI Library
// Description: Shared helpers for the booking command-line interface.
// Purpose: Provide bounded input reads and report shaping for the binary.
// Dependencies: booking-app-keys, booking-directory, serde, serde_json
// ============================================================================

//! ## Overview
//! This library houses the pieces of the `booking` binary that are worth
//! testing on their own: size-limited input reads and the JSON reports the
//! commands print. The binary entry point (`src/main.rs`) wires them to clap.
//!
//! Security posture: CLI inputs are untrusted and size-limited before parsing.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Bounded file and stdin reads.
pub mod input;
/// JSON report types printed by the CLI.
pub mod report;
