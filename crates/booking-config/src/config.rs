// crates/booking-config/src/config.rs
// ============================================================================
// Module: Booking Configuration
// Description: Configuration loading and validation for booking tooling.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: booking-app-keys, booking-directory, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Missing or invalid configuration fails closed. Relative schema paths are
//! resolved against the directory holding the config file.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use booking_app_keys::AppKeysAuditSink;
use booking_app_keys::FileAuditSink;
use booking_app_keys::KeyRule;
use booking_app_keys::NoopAuditSink;
use booking_app_keys::StderrAuditSink;
use booking_directory::DomainSettings;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "booking.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "BOOKING_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Default max key schema size (bytes).
pub(crate) const DEFAULT_SCHEMA_MAX_BYTES: usize = 1024 * 1024;
/// Maximum allowed key schema size in bytes.
pub(crate) const MAX_SCHEMA_MAX_BYTES: usize = 10 * 1024 * 1024;
/// Maximum length of an app slug.
pub(crate) const MAX_APP_SLUG_LENGTH: usize = 128;
/// Maximum number of configured apps.
pub(crate) const MAX_APPS: usize = 1024;
/// Maximum number of rules in one `required_keys` list.
pub(crate) const MAX_REQUIRED_KEYS: usize = 64;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Booking tooling configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BookingConfig {
    /// Key schema registry limits.
    #[serde(default)]
    pub registry: RegistryConfig,
    /// Audit logging configuration.
    #[serde(default)]
    pub audit: AuditConfig,
    /// Organization directory domain configuration.
    #[serde(default)]
    pub directory: DirectoryConfig,
    /// App key schema declarations.
    #[serde(default)]
    pub apps: Vec<AppConfig>,
    /// Directory holding the loaded config file (not serialized).
    #[serde(skip)]
    pub source_dir: Option<PathBuf>,
}

impl BookingConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let mut config = Self::from_toml_str(content)?;
        config.source_dir = resolved.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        self.registry.validate()?;
        self.audit.validate()?;
        self.directory.validate()?;
        if self.apps.len() > MAX_APPS {
            return Err(ConfigError::Invalid("too many apps".to_string()));
        }
        let mut slugs = BTreeSet::new();
        for app in &self.apps {
            app.validate()?;
            if !slugs.insert(app.slug.as_str()) {
                return Err(ConfigError::Invalid(format!("duplicate app slug: {}", app.slug)));
            }
        }
        Ok(())
    }

    /// Resolves an app schema path against the config file directory.
    #[must_use]
    pub fn resolve_schema_path(&self, path: &Path) -> PathBuf {
        match &self.source_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

/// Key schema registry limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Maximum size of a key schema file in bytes.
    #[serde(default = "default_schema_max_bytes")]
    pub max_schema_bytes: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_schema_bytes: default_schema_max_bytes(),
        }
    }
}

impl RegistryConfig {
    /// Validates registry limits.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_schema_bytes == 0 {
            return Err(ConfigError::Invalid(
                "registry.max_schema_bytes must be greater than zero".to_string(),
            ));
        }
        if self.max_schema_bytes > MAX_SCHEMA_MAX_BYTES {
            return Err(ConfigError::Invalid(format!(
                "registry.max_schema_bytes must be <= {MAX_SCHEMA_MAX_BYTES}"
            )));
        }
        Ok(())
    }
}

/// Audit sink selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkType {
    /// Discard audit events.
    #[default]
    None,
    /// Write JSON lines to stderr.
    Stderr,
    /// Append JSON lines to a file.
    File,
}

/// Audit logging configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Selected audit sink.
    #[serde(default)]
    pub sink: AuditSinkType,
    /// Audit log path (file sink only).
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl AuditConfig {
    /// Validates audit sink settings.
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, &self.path) {
            (AuditSinkType::File, None) => {
                Err(ConfigError::Invalid("audit.sink=file requires audit.path".to_string()))
            }
            (AuditSinkType::File, Some(path)) => {
                validate_path_string("audit.path", &path.to_string_lossy())
            }
            (AuditSinkType::None | AuditSinkType::Stderr, Some(_)) => Err(ConfigError::Invalid(
                "audit.path is only allowed with audit.sink=file".to_string(),
            )),
            (AuditSinkType::None | AuditSinkType::Stderr, None) => Ok(()),
        }
    }

    /// Opens the configured audit sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the audit log file cannot be opened.
    pub fn open_sink(&self) -> Result<Box<dyn AppKeysAuditSink>, ConfigError> {
        match (self.sink, &self.path) {
            (AuditSinkType::None, _) => Ok(Box::new(NoopAuditSink)),
            (AuditSinkType::Stderr, _) => Ok(Box::new(StderrAuditSink)),
            (AuditSinkType::File, Some(path)) => {
                let sink = FileAuditSink::new(path).map_err(|err| {
                    ConfigError::Io(format!("audit log {}: {err}", path.display()))
                })?;
                Ok(Box::new(sink))
            }
            (AuditSinkType::File, None) => {
                Err(ConfigError::Invalid("audit.sink=file requires audit.path".to_string()))
            }
        }
    }
}

/// Organization directory domain configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DirectoryConfig {
    /// Root domain organizations are served under.
    #[serde(default = "default_root_domain")]
    pub root_domain: String,
    /// URL scheme for organization booker URLs.
    #[serde(default = "default_scheme")]
    pub scheme: String,
    /// Booker URL used when an organization has no slug.
    #[serde(default = "default_web_app_url")]
    pub web_app_url: String,
    /// Subdomains that never name an organization.
    #[serde(default = "default_reserved_subdomains")]
    pub reserved_subdomains: Vec<String>,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            root_domain: default_root_domain(),
            scheme: default_scheme(),
            web_app_url: default_web_app_url(),
            reserved_subdomains: default_reserved_subdomains(),
        }
    }
}

impl DirectoryConfig {
    /// Validates directory domain settings.
    fn validate(&self) -> Result<(), ConfigError> {
        let root = self.root_domain.trim();
        if root.is_empty() {
            return Err(ConfigError::Invalid("directory.root_domain must be set".to_string()));
        }
        if root.contains("://") || root.contains('/') || root.starts_with('.') {
            return Err(ConfigError::Invalid(
                "directory.root_domain must be a bare domain name".to_string(),
            ));
        }
        if self.scheme != "https" && self.scheme != "http" {
            return Err(ConfigError::Invalid(
                "directory.scheme must be http or https".to_string(),
            ));
        }
        if !(self.web_app_url.starts_with("https://") || self.web_app_url.starts_with("http://")) {
            return Err(ConfigError::Invalid(
                "directory.web_app_url must be an http(s) URL".to_string(),
            ));
        }
        if self.reserved_subdomains.iter().any(|label| label.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "directory.reserved_subdomains entries must be non-empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the domain settings used by directory composition.
    #[must_use]
    pub fn domain_settings(&self) -> DomainSettings {
        DomainSettings {
            root_domain: self.root_domain.trim().to_string(),
            scheme: self.scheme.clone(),
            web_app_url: self.web_app_url.clone(),
            reserved_subdomains: self.reserved_subdomains.clone(),
        }
    }
}

/// App key schema declaration.
///
/// # Invariants
/// - At most one of `schema_path`, `schema`, and `required_keys` is set.
/// - None of them set means the app declares no key requirement.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// App slug (directory name).
    pub slug: String,
    /// Path to a JSON Schema file describing the keys.
    #[serde(default)]
    pub schema_path: Option<PathBuf>,
    /// Inline JSON Schema describing the keys.
    #[serde(default)]
    pub schema: Option<Value>,
    /// Declarative key rules.
    #[serde(default)]
    pub required_keys: Option<Vec<KeyRule>>,
}

impl AppConfig {
    /// Validates the app declaration.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_app_slug(&self.slug)?;
        let sources = [
            self.schema_path.is_some(),
            self.schema.is_some(),
            self.required_keys.is_some(),
        ];
        if sources.iter().filter(|set| **set).count() > 1 {
            return Err(ConfigError::Invalid(format!(
                "app {} must set at most one of schema_path, schema, required_keys",
                self.slug
            )));
        }
        if let Some(path) = &self.schema_path {
            validate_path_string(&format!("apps.{}.schema_path", self.slug), &path.to_string_lossy())?;
        }
        if let Some(schema) = &self.schema
            && !(schema.is_object() || schema.is_boolean())
        {
            return Err(ConfigError::Invalid(format!(
                "app {} schema must be a table or boolean",
                self.slug
            )));
        }
        if let Some(rules) = &self.required_keys {
            if rules.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "app {} required_keys must list at least one key",
                    self.slug
                )));
            }
            if rules.len() > MAX_REQUIRED_KEYS {
                return Err(ConfigError::Invalid(format!(
                    "app {} required_keys exceeds {MAX_REQUIRED_KEYS} entries",
                    self.slug
                )));
            }
        }
        Ok(())
    }

    /// Returns true when the app declares a key schema.
    #[must_use]
    pub const fn declares_schema(&self) -> bool {
        self.schema_path.is_some() || self.schema.is_some() || self.required_keys.is_some()
    }
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default for [`RegistryConfig::max_schema_bytes`].
const fn default_schema_max_bytes() -> usize {
    DEFAULT_SCHEMA_MAX_BYTES
}

/// Default for [`DirectoryConfig::root_domain`].
fn default_root_domain() -> String {
    DomainSettings::default().root_domain
}

/// Default for [`DirectoryConfig::scheme`].
fn default_scheme() -> String {
    DomainSettings::default().scheme
}

/// Default for [`DirectoryConfig::web_app_url`].
fn default_web_app_url() -> String {
    DomainSettings::default().web_app_url
}

/// Default for [`DirectoryConfig::reserved_subdomains`].
fn default_reserved_subdomains() -> Vec<String> {
    DomainSettings::default().reserved_subdomains
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} component too long")));
        }
    }
    Ok(())
}

/// Validates an app slug's length and character set.
fn validate_app_slug(slug: &str) -> Result<(), ConfigError> {
    if slug.is_empty() {
        return Err(ConfigError::Invalid("app slug must be non-empty".to_string()));
    }
    if slug.len() > MAX_APP_SLUG_LENGTH {
        return Err(ConfigError::Invalid(format!(
            "app slug exceeds {MAX_APP_SLUG_LENGTH} characters"
        )));
    }
    if !slug.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_')
    {
        return Err(ConfigError::Invalid(format!(
            "app slug {slug} must use lowercase letters, digits, '-' or '_'"
        )));
    }
    Ok(())
}
