// crates/booking-app-keys/src/registry.rs
// ============================================================================
// Module: App Key Schema Registry
// Description: Read-only mapping from app identifiers to key schemas.
// Purpose: Resolve the key schema (or its absence) for an app by slug.
// Dependencies: crate::{identifiers, schema}, thiserror
// ============================================================================

//! ## Overview
//! The schema registry maps each app slug to the key schema that app declares.
//! Apps without an entry declare no key requirement; that is a valid state and
//! not a lookup failure. Registries are assembled through
//! [`SchemaRegistryBuilder`] and are immutable once built, so concurrent reads
//! need no locking.
//!
//! A process-wide registry may be installed exactly once with
//! [`install_global_registry`] and read through [`global_registry`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::sync::OnceLock;

use thiserror::Error;

use crate::identifiers::AppSlug;
use crate::schema::KeySchema;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Schema registry errors.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Two schemas were registered for the same app.
    #[error("duplicate app key schema: {app}")]
    DuplicateApp {
        /// Duplicated app identifier.
        app: AppSlug,
    },
    /// A process-wide registry was already installed.
    #[error("global app key schema registry already installed")]
    GlobalAlreadyInstalled,
}

impl RegistryError {
    /// Returns the stable error code for this registry error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::DuplicateApp {
                ..
            } => "duplicate_app",
            Self::GlobalAlreadyInstalled => "global_already_installed",
        }
    }
}

// ============================================================================
// SECTION: Schema Registry
// ============================================================================

/// Immutable registry of app key schemas keyed by app slug.
#[derive(Clone, Default)]
pub struct SchemaRegistry {
    /// Key schemas keyed by app identifier.
    schemas: BTreeMap<AppSlug, Arc<dyn KeySchema>>,
}

impl SchemaRegistry {
    /// Returns a registry with no schemas; every app is unconstrained.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Starts building a registry.
    #[must_use]
    pub fn builder() -> SchemaRegistryBuilder {
        SchemaRegistryBuilder::new()
    }

    /// Returns the key schema declared by the app, if any.
    #[must_use]
    pub fn get(&self, app: &str) -> Option<&dyn KeySchema> {
        self.schemas.get(app).map(AsRef::as_ref)
    }

    /// Returns true when the app declares a key schema.
    #[must_use]
    pub fn contains(&self, app: &str) -> bool {
        self.schemas.contains_key(app)
    }

    /// Returns the number of apps with a key schema.
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Returns true when no app declares a key schema.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Iterates registered apps and their schemas in slug order.
    pub fn iter(&self) -> impl Iterator<Item = (&AppSlug, &dyn KeySchema)> {
        self.schemas.iter().map(|(app, schema)| (app, schema.as_ref()))
    }
}

impl fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let apps: Vec<&str> = self.schemas.keys().map(AppSlug::as_str).collect();
        f.debug_struct("SchemaRegistry").field("apps", &apps).finish()
    }
}

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Builder that collects app key schemas and rejects duplicates.
#[derive(Default)]
pub struct SchemaRegistryBuilder {
    /// Schemas registered so far.
    schemas: BTreeMap<AppSlug, Arc<dyn KeySchema>>,
}

impl SchemaRegistryBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a key schema for the app.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateApp`] when the app already has a schema.
    pub fn register(
        &mut self,
        app: impl Into<AppSlug>,
        schema: impl KeySchema + 'static,
    ) -> Result<&mut Self, RegistryError> {
        self.register_shared(app, Arc::new(schema))
    }

    /// Registers an already shared key schema for the app.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateApp`] when the app already has a schema.
    pub fn register_shared(
        &mut self,
        app: impl Into<AppSlug>,
        schema: Arc<dyn KeySchema>,
    ) -> Result<&mut Self, RegistryError> {
        let app = app.into();
        if self.schemas.contains_key(&app) {
            return Err(RegistryError::DuplicateApp {
                app,
            });
        }
        self.schemas.insert(app, schema);
        Ok(self)
    }

    /// Finishes the registry.
    #[must_use]
    pub fn build(self) -> SchemaRegistry {
        SchemaRegistry {
            schemas: self.schemas,
        }
    }
}

impl fmt::Debug for SchemaRegistryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let apps: Vec<&str> = self.schemas.keys().map(AppSlug::as_str).collect();
        f.debug_struct("SchemaRegistryBuilder").field("apps", &apps).finish()
    }
}

// ============================================================================
// SECTION: Process-Wide Registry
// ============================================================================

/// Process-wide registry slot, written at most once.
static GLOBAL_REGISTRY: OnceLock<Arc<SchemaRegistry>> = OnceLock::new();

/// Installs the process-wide registry.
///
/// # Errors
///
/// Returns [`RegistryError::GlobalAlreadyInstalled`] when a registry is already installed.
pub fn install_global_registry(
    registry: SchemaRegistry,
) -> Result<Arc<SchemaRegistry>, RegistryError> {
    let shared = Arc::new(registry);
    GLOBAL_REGISTRY.set(Arc::clone(&shared)).map_err(|_| RegistryError::GlobalAlreadyInstalled)?;
    Ok(shared)
}

/// Returns the process-wide registry when one has been installed.
#[must_use]
pub fn global_registry() -> Option<Arc<SchemaRegistry>> {
    GLOBAL_REGISTRY.get().cloned()
}
