// crates/booking-app-keys/tests/common/mod.rs
// ============================================================================
// Module: Common Test Fixtures
// Description: Shared registries and schemas for app key tests.
// Purpose: Provide reusable fixtures for deterministic checker tests.
// Dependencies: booking-app-keys
// ============================================================================

//! ## Overview
//! Fixtures mirror two common app shapes: an OAuth app that needs a client id
//! and secret, and a webhook app described by a raw JSON Schema document.

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]

use booking_app_keys::JsonKeySchema;
use booking_app_keys::KeyKind;
use booking_app_keys::KeyRule;
use booking_app_keys::RequiredKeys;
use booking_app_keys::SchemaRegistry;
use serde_json::Value;
use serde_json::json;

/// App with no key schema.
pub const BASIC_APP: &str = "basic-integration";
/// App requiring `clientId` and `clientSecret`.
pub const OAUTH_APP: &str = "oauth-integration";
/// App described by a JSON Schema document.
pub const WEBHOOK_APP: &str = "webhook-integration";

/// Declarative schema for the OAuth app.
pub fn oauth_keys() -> RequiredKeys {
    RequiredKeys::new(vec![
        KeyRule::required("clientId", KeyKind::String),
        KeyRule::required("clientSecret", KeyKind::String),
    ])
    .expect("oauth rules are valid")
}

/// JSON Schema document for the webhook app.
pub fn webhook_schema_document() -> Value {
    json!({
        "type": "object",
        "properties": {
            "signing_secret": { "type": "string", "minLength": 1 },
            "retries": { "type": "integer", "minimum": 0 }
        },
        "required": ["signing_secret"]
    })
}

/// Registry with the OAuth and webhook apps registered.
pub fn sample_registry() -> SchemaRegistry {
    let mut builder = SchemaRegistry::builder();
    builder.register(OAUTH_APP, oauth_keys()).expect("register oauth");
    builder
        .register(
            WEBHOOK_APP,
            JsonKeySchema::compile(&webhook_schema_document()).expect("compile webhook schema"),
        )
        .expect("register webhook");
    builder.build()
}
