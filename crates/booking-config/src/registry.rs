// crates/booking-config/src/registry.rs
// ============================================================================
// Module: Registry Construction
// Description: Builds the app key schema registry from configuration.
// Purpose: Load, size-check, parse, and compile every declared key schema.
// Dependencies: booking-app-keys, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Each `[[apps]]` entry contributes at most one schema. File schemas are
//! read with a size limit before parsing; inline schemas and declarative rule
//! lists are compiled directly. Apps that declare nothing stay unregistered
//! and therefore carry no key requirement.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::sync::Arc;

use booking_app_keys::JsonKeySchema;
use booking_app_keys::KeySchema;
use booking_app_keys::RegistryError;
use booking_app_keys::RequiredKeys;
use booking_app_keys::SchemaCompileError;
use booking_app_keys::SchemaRegistry;
use serde_json::Value;
use thiserror::Error;

use crate::config::AppConfig;
use crate::config::BookingConfig;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while building the registry from configuration.
#[derive(Debug, Error)]
pub enum RegistryBuildError {
    /// A schema file could not be read.
    #[error("unable to read key schema {path}: {error}")]
    SchemaRead {
        /// Schema file path.
        path: String,
        /// Underlying I/O error.
        error: String,
    },
    /// A schema file exceeded the configured size limit.
    #[error("key schema {path} exceeds {limit} bytes")]
    SchemaTooLarge {
        /// Schema file path.
        path: String,
        /// Configured byte limit.
        limit: usize,
    },
    /// A schema file was not valid JSON.
    #[error("unable to parse key schema {path}: {error}")]
    SchemaParse {
        /// Schema file path.
        path: String,
        /// Parse error detail.
        error: String,
    },
    /// A schema failed to compile.
    #[error("key schema for {app} failed to compile: {source}")]
    SchemaCompile {
        /// App slug.
        app: String,
        /// Compile failure.
        source: SchemaCompileError,
    },
    /// Registry assembly failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl RegistryBuildError {
    /// Returns the stable error code for this build error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::SchemaRead {
                ..
            } => "schema_read",
            Self::SchemaTooLarge {
                ..
            } => "schema_too_large",
            Self::SchemaParse {
                ..
            } => "schema_parse",
            Self::SchemaCompile {
                ..
            } => "schema_compile",
            Self::Registry(err) => err.code(),
        }
    }
}

// ============================================================================
// SECTION: Construction
// ============================================================================

/// Builds the key schema registry declared by the configuration.
///
/// # Errors
///
/// Returns [`RegistryBuildError`] when any declared schema cannot be loaded
/// or compiled, or when two apps share a slug.
pub fn build_registry(config: &BookingConfig) -> Result<SchemaRegistry, RegistryBuildError> {
    let mut builder = SchemaRegistry::builder();
    for app in &config.apps {
        if let Some(schema) = compile_app_schema(config, app)? {
            builder.register_shared(app.slug.as_str(), schema)?;
        }
    }
    Ok(builder.build())
}

/// Compiles the schema declared by one app entry, if any.
fn compile_app_schema(
    config: &BookingConfig,
    app: &AppConfig,
) -> Result<Option<Arc<dyn KeySchema>>, RegistryBuildError> {
    let compile_error = |source| RegistryBuildError::SchemaCompile {
        app: app.slug.clone(),
        source,
    };
    if let Some(rules) = &app.required_keys {
        let schema = RequiredKeys::new(rules.clone()).map_err(compile_error)?;
        return Ok(Some(Arc::new(schema)));
    }
    let document = match (&app.schema, &app.schema_path) {
        (Some(inline), _) => inline.clone(),
        (None, Some(path)) => {
            let resolved = config.resolve_schema_path(path);
            read_schema_file(&resolved, config.registry.max_schema_bytes)?
        }
        (None, None) => return Ok(None),
    };
    let schema = JsonKeySchema::compile(&document).map_err(compile_error)?;
    Ok(Some(Arc::new(schema)))
}

/// Reads and parses a JSON Schema file under a size limit.
fn read_schema_file(path: &Path, limit: usize) -> Result<Value, RegistryBuildError> {
    let display = path.display().to_string();
    let bytes = fs::read(path).map_err(|err| RegistryBuildError::SchemaRead {
        path: display.clone(),
        error: err.to_string(),
    })?;
    if bytes.len() > limit {
        return Err(RegistryBuildError::SchemaTooLarge {
            path: display,
            limit,
        });
    }
    serde_json::from_slice(&bytes).map_err(|err| RegistryBuildError::SchemaParse {
        path: display,
        error: err.to_string(),
    })
}
