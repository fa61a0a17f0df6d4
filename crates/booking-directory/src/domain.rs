// crates/booking-directory/src/domain.rs
// ============================================================================
// Module: Organization Domains
// Description: Org subdomain resolution, booker URLs, and slug normalization.
// Purpose: Map request hosts and route params onto organization identities.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Organizations are served from `<org>.<root_domain>`. A request whose host is
//! such a subdomain identifies the organization directly and counts as a valid
//! org domain. Otherwise the route's `orgSlug` parameter is used as a fallback,
//! and the domain is not considered valid.
//! Security posture: host headers are untrusted; only a single DNS label in
//! front of the configured root domain is accepted, and reserved labels never
//! name an organization whether they arrive by host or by route.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Settings
// ============================================================================

/// Domain settings shared by host resolution and booker URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainSettings {
    /// Root domain organizations are served under (no leading dot).
    pub root_domain: String,
    /// URL scheme for organization booker URLs.
    pub scheme: String,
    /// Booker URL used when an organization has no slug.
    pub web_app_url: String,
    /// Subdomains that never name an organization.
    pub reserved_subdomains: Vec<String>,
}

impl Default for DomainSettings {
    fn default() -> Self {
        Self {
            root_domain: "cal.local".to_string(),
            scheme: "https".to_string(),
            web_app_url: "https://app.cal.local".to_string(),
            reserved_subdomains: ["app", "www", "api", "console", "auth"]
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Organization domain resolved for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrgDomain {
    /// Whether the request host is an organization subdomain.
    pub is_valid_org_domain: bool,
    /// Organization slug taken from the host or the route fallback.
    pub current_org_domain: Option<String>,
}

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Resolves the organization domain from the request host and route param.
#[must_use]
pub fn resolve_org_domain(
    host: Option<&str>,
    org_slug_param: Option<&str>,
    settings: &DomainSettings,
) -> OrgDomain {
    if let Some(subdomain) = host.and_then(|host| org_subdomain(host, settings)) {
        return OrgDomain {
            is_valid_org_domain: true,
            current_org_domain: Some(subdomain),
        };
    }
    OrgDomain {
        is_valid_org_domain: false,
        current_org_domain: org_slug_param
            .map(str::trim)
            .filter(|slug| !slug.is_empty() && !is_reserved(slug, settings))
            .map(str::to_string),
    }
}

/// Extracts a non-reserved organization label from a host header value.
fn org_subdomain(host: &str, settings: &DomainSettings) -> Option<String> {
    let hostname = strip_port(host.trim()).trim_end_matches('.').to_ascii_lowercase();
    let root = settings.root_domain.trim().trim_matches('.').to_ascii_lowercase();
    if root.is_empty() {
        return None;
    }
    let label = hostname.strip_suffix(&root)?.strip_suffix('.')?;
    if label.is_empty() || label.contains('.') {
        return None;
    }
    if is_reserved(label, settings) {
        return None;
    }
    Some(label.to_string())
}

/// Returns true when the label is a reserved subdomain.
fn is_reserved(label: &str, settings: &DomainSettings) -> bool {
    settings.reserved_subdomains.iter().any(|reserved| reserved.eq_ignore_ascii_case(label))
}

/// Removes a trailing `:port` from a host value.
fn strip_port(host: &str) -> &str {
    match host.rsplit_once(':') {
        Some((name, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => name,
        _ => host,
    }
}

// ============================================================================
// SECTION: URLs and Slugs
// ============================================================================

/// Returns the base URL booking links for the organization start from.
#[must_use]
pub fn booker_base_url(org_slug: Option<&str>, settings: &DomainSettings) -> String {
    match org_slug.map(str::trim).filter(|slug| !slug.is_empty()) {
        Some(slug) => format!("{}://{}.{}", settings.scheme, slug, settings.root_domain),
        None => settings.web_app_url.trim_end_matches('/').to_string(),
    }
}

/// Normalizes free text into a lowercase, dash-separated slug.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    //! Unit tests for host parsing helpers.

    use super::*;

    #[test]
    fn strip_port_keeps_plain_hosts() {
        assert_eq!(strip_port("acme.cal.local"), "acme.cal.local");
        assert_eq!(strip_port("acme.cal.local:3000"), "acme.cal.local");
        assert_eq!(strip_port("acme.cal.local:"), "acme.cal.local:");
    }

    #[test]
    fn subdomain_requires_single_label() {
        let settings = DomainSettings::default();
        assert_eq!(org_subdomain("a.b.cal.local", &settings), None);
        assert_eq!(org_subdomain("cal.local", &settings), None);
        assert_eq!(org_subdomain("evilcal.local", &settings), None);
    }
}
