// crates/booking-app-keys/src/audit.rs
// ============================================================================
// Module: App Keys Audit Logging
// Description: Structured audit events for key checks and registry loads.
// Purpose: Emit redacted JSON-line audit logs without hard dependencies.
// Dependencies: crate::checker, serde, serde_json
// ============================================================================

//! ## Overview
//! This module defines audit event payloads and sinks for app key checks. It
//! is intentionally lightweight so deployments can route events to their
//! preferred logging pipeline without redesign.
//! Security posture: stored keys carry secrets; events record outcomes and
//! counts only, never key values or validator messages.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::checker::KeysCheck;
use crate::identifiers::AppSlug;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Key check audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct KeysCheckAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Checked app identifier.
    pub app: AppSlug,
    /// Requirement outcome label.
    pub requirement: &'static str,
    /// Whether the app counts as configured.
    pub configured: bool,
    /// Number of violation messages (zero unless unsatisfied).
    pub violation_count: usize,
    /// Redaction classification for payload logging.
    pub redaction: &'static str,
}

/// Registry load audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct RegistryAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Number of apps with a key schema.
    pub app_count: usize,
    /// Label describing where the registry came from.
    pub source: String,
}

impl KeysCheckAuditEvent {
    /// Creates a key check audit event from a check outcome.
    #[must_use]
    pub fn new(app: AppSlug, outcome: &KeysCheck) -> Self {
        Self {
            event: "app_keys_check",
            timestamp_ms: now_ms(),
            app,
            requirement: outcome.label(),
            configured: outcome.is_configured(),
            violation_count: outcome.violation().map_or(0, |violation| violation.messages().len()),
            redaction: "keys_omitted",
        }
    }
}

impl RegistryAuditEvent {
    /// Creates a registry load audit event with a consistent timestamp.
    #[must_use]
    pub fn new(app_count: usize, source: impl Into<String>) -> Self {
        Self {
            event: "app_keys_registry",
            timestamp_ms: now_ms(),
            app_count,
            source: source.into(),
        }
    }
}

/// Returns the current time in milliseconds since the Unix epoch.
fn now_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for app key events.
pub trait AppKeysAuditSink: Send + Sync {
    /// Record a key check audit event.
    fn record_check(&self, event: &KeysCheckAuditEvent);

    /// Record a registry load audit event.
    fn record_registry(&self, _event: &RegistryAuditEvent) {}
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl AppKeysAuditSink for StderrAuditSink {
    fn record_check(&self, event: &KeysCheckAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }

    fn record_registry(&self, event: &RegistryAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Appends one serialized payload as a line.
    fn append<T: Serialize>(&self, event: &T) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

impl AppKeysAuditSink for FileAuditSink {
    fn record_check(&self, event: &KeysCheckAuditEvent) {
        self.append(event);
    }

    fn record_registry(&self, event: &RegistryAuditEvent) {
        self.append(event);
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl AppKeysAuditSink for NoopAuditSink {
    fn record_check(&self, _event: &KeysCheckAuditEvent) {}

    fn record_registry(&self, _event: &RegistryAuditEvent) {}
}
