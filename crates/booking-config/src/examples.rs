// crates/booking-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payloads.
// Purpose: Deterministic examples for docs and tooling.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example `booking.toml`. The output is deterministic and must
//! always pass [`crate::BookingConfig::from_toml_str`].

/// Returns a canonical example `booking.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[registry]
max_schema_bytes = 1048576

[audit]
sink = "stderr"
# sink = "file"
# path = "booking-audit.jsonl"

[directory]
root_domain = "cal.example"
scheme = "https"
web_app_url = "https://app.cal.example"
reserved_subdomains = ["app", "www", "api", "console", "auth"]

[[apps]]
slug = "googlecalendar"
required_keys = [
  { name = "client_id", kind = "string" },
  { name = "client_secret", kind = "string" },
  { name = "redirect_uri", kind = "string", optional = true },
]

[[apps]]
slug = "stripe"
schema = { type = "object", required = ["client_id", "public_key", "webhook_secret"], properties = { client_id = { type = "string", minLength = 1 }, public_key = { type = "string", pattern = "^pk_" }, webhook_secret = { type = "string", minLength = 1 } } }

[[apps]]
slug = "zapier"
required_keys = [{ name = "invite_link", kind = "string" }]

# [[apps]]
# slug = "giphy"
# schema_path = "schemas/giphy.json"

[[apps]]
slug = "jitsi"
"#,
    )
}
