// crates/booking-cli/src/tests/report.rs
// ============================================================================
// Module: CLI Report Tests
// Description: Unit tests for CLI report shaping.
// Purpose: Ensure reports carry outcomes without stored key values.
// Dependencies: booking-app-keys, booking-directory
// ============================================================================

//! ## Overview
//! Validates key check reports, app listings, and directory reports.

use booking_app_keys::JsonKeySchema;
use booking_app_keys::KeyKind;
use booking_app_keys::KeyRule;
use booking_app_keys::RequiredKeys;
use booking_app_keys::SchemaRegistry;
use booking_app_keys::check_app_keys;
use booking_directory::DomainSettings;
use booking_directory::EmptyState;
use booking_directory::MemberRecord;
use booking_directory::OrganizationRecord;
use booking_directory::build_directory_page;
use booking_directory::resolve_org_domain;
use serde_json::json;

use crate::report::AppListEntry;
use crate::report::DirectoryReport;
use crate::report::KeysCheckReport;
use crate::report::app_listing;

fn registry() -> SchemaRegistry {
    let mut builder = SchemaRegistry::builder();
    builder
        .register(
            "zapier",
            RequiredKeys::new(vec![KeyRule::required("invite_link", KeyKind::String)]).unwrap(),
        )
        .unwrap();
    builder.build()
}

#[test]
fn keys_check_report_omits_key_values() {
    let registry = registry();
    let keys = json!({"invite_link": "", "secret": "hunter2"});
    let outcome = check_app_keys(&registry, "zapier", Some(&keys));
    let report = KeysCheckReport::new("zapier", &outcome);
    assert!(!report.configured);
    assert_eq!(report.requirement, "unsatisfied");
    assert!(!report.errors.is_empty());
    let rendered = serde_json::to_string(&report).unwrap();
    assert!(!rendered.contains("hunter2"));
}

#[test]
fn keys_check_report_omits_values_rejected_by_json_schema() {
    let mut builder = SchemaRegistry::builder();
    builder
        .register(
            "stripe",
            JsonKeySchema::compile(&json!({
                "type": "object",
                "properties": { "public_key": { "type": "string", "pattern": "^pk_" } }
            }))
            .unwrap(),
        )
        .unwrap();
    let registry = builder.build();
    let keys = json!({"public_key": "sk_live_SECRET123"});
    let report = KeysCheckReport::new("stripe", &check_app_keys(&registry, "stripe", Some(&keys)));
    assert!(!report.configured);
    assert_eq!(report.errors, ["`/public_key` does not match pattern `^pk_`"]);
    let rendered = serde_json::to_string(&report).unwrap();
    assert!(!rendered.contains("SECRET123"));
}

#[test]
fn keys_check_report_for_unregistered_app() {
    let outcome = check_app_keys(&registry(), "jitsi", None);
    let report = KeysCheckReport::new("jitsi", &outcome);
    assert_eq!(
        report,
        KeysCheckReport {
            app: "jitsi".to_string(),
            configured: true,
            requirement: "no_requirement",
            errors: Vec::new(),
        }
    );
}

#[test]
fn app_listing_keeps_config_order_and_appends_registered() {
    let entries = app_listing(["jitsi", "alpha"], &registry());
    assert_eq!(
        entries,
        vec![
            AppListEntry {
                app: "jitsi".to_string(),
                declares_keys: false,
                schema_kind: None,
            },
            AppListEntry {
                app: "alpha".to_string(),
                declares_keys: false,
                schema_kind: None,
            },
            AppListEntry {
                app: "zapier".to_string(),
                declares_keys: true,
                schema_kind: Some("required_keys"),
            },
        ]
    );
}

fn org() -> OrganizationRecord {
    let member = |id: u64, name: &str, bio: Option<&str>| MemberRecord {
        id,
        name: Some(name.to_string()),
        username: Some(name.to_lowercase()),
        bio: bio.map(str::to_string),
        avatar_url: None,
        organization_id: Some(7),
        accepted: true,
    };
    OrganizationRecord {
        name: Some("Acme".to_string()),
        slug: Some("acme".to_string()),
        logo_url: None,
        is_organization: true,
        members: vec![
            member(1, "Ada", Some("Compilers")),
            member(2, "Grace", Some("<p><br></p>")),
        ],
    }
}

#[test]
fn directory_report_filters_and_builds_urls() {
    let settings = DomainSettings::default();
    let domain = resolve_org_domain(Some("acme.cal.local"), None, &settings);
    let page = build_directory_page(Some(org()), domain, &settings).unwrap();
    let report = DirectoryReport::new(&page, "compil");
    assert!(report.is_valid_org_domain);
    assert_eq!(report.members.len(), 1);
    let card = &report.members[0];
    assert_eq!(card.profile_url, "https://acme.cal.local/ada");
    assert_eq!(card.bio.as_deref(), Some("Compilers"));
    assert_eq!(report.empty_state, None);
}

#[test]
fn directory_report_hides_empty_bios_and_reports_empty_states() {
    let settings = DomainSettings::default();
    let domain = resolve_org_domain(None, Some("acme"), &settings);
    let page = build_directory_page(Some(org()), domain, &settings).unwrap();
    let all = DirectoryReport::new(&page, "");
    assert_eq!(all.members.len(), 2);
    assert_eq!(all.members[1].bio, None);
    let none = DirectoryReport::new(&page, "zzz");
    assert!(none.members.is_empty());
    assert_eq!(none.empty_state, Some(EmptyState::NoResults));
}
