// crates/booking-app-keys/src/schema.rs
// ============================================================================
// Module: App Key Schemas
// Description: Key schema abstraction plus JSON Schema and declarative impls.
// Purpose: Turn schema validation into a total, non-panicking predicate with diagnostics.
// Dependencies: jsonschema, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A [`KeySchema`] describes the shape an app's stored keys must have. The only
//! capability it exposes is [`KeySchema::validate`], which never fails for
//! malformed input: a rejection is returned as a [`SchemaViolation`] value.
//!
//! Two implementations ship with the crate:
//! - [`JsonKeySchema`]: a compiled JSON Schema (Draft 2020-12).
//! - [`RequiredKeys`]: a declarative list of [`KeyRule`]s for the common
//!   "object with required, non-empty fields" shape.
//!
//! Security posture: stored keys are untrusted and may hold secrets.
//! [`RequiredKeys`] messages name keys and expectations but never echo key
//! values. [`JsonKeySchema`] messages are rebuilt from the failing instance
//! path and keyword, so they quote schema limits but never the stored value.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fmt;

use jsonschema::Draft;
use jsonschema::ValidationError;
use jsonschema::Validator;
use jsonschema::error::ValidationErrorKind;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum number of violation messages retained per validation.
pub const MAX_VIOLATION_MESSAGES: usize = 16;

// ============================================================================
// SECTION: Violations
// ============================================================================

/// Validation failure details for a stored key value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaViolation {
    /// Human-readable violation messages in detection order.
    errors: Vec<String>,
}

impl SchemaViolation {
    /// Creates a violation from a list of messages.
    ///
    /// Messages beyond [`MAX_VIOLATION_MESSAGES`] are dropped.
    #[must_use]
    pub fn new(mut errors: Vec<String>) -> Self {
        if errors.is_empty() {
            errors.push("key schema validation failed".to_string());
        }
        errors.truncate(MAX_VIOLATION_MESSAGES);
        Self {
            errors,
        }
    }

    /// Creates a violation with a single message.
    #[must_use]
    pub fn single(message: impl Into<String>) -> Self {
        Self::new(vec![message.into()])
    }

    /// Returns the violation messages.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.errors
    }

    /// Returns the violation messages joined into one line.
    #[must_use]
    pub fn summary(&self) -> String {
        self.errors.join("; ")
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while building a key schema.
#[derive(Debug, Error)]
pub enum SchemaCompileError {
    /// The JSON Schema document is invalid.
    #[error("key schema compilation failed: {0}")]
    Invalid(String),
    /// A declarative rule has an empty key name.
    #[error("required_keys rule name must be non-empty")]
    EmptyKeyName,
    /// A declarative rule names the same key twice.
    #[error("required_keys rule duplicated: {0}")]
    DuplicateKey(String),
}

impl SchemaCompileError {
    /// Returns the stable error code for this compile error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Invalid(_) => "schema_invalid",
            Self::EmptyKeyName => "rule_name_empty",
            Self::DuplicateKey(_) => "rule_duplicated",
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Key schema contract for one app.
///
/// # Invariants
/// - `validate` is total: it returns for every input and never panics.
/// - `validate` is pure: repeated calls with the same value agree.
pub trait KeySchema: Send + Sync {
    /// Validates stored keys, returning diagnostics on rejection.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaViolation`] when the value does not satisfy the schema.
    fn validate(&self, keys: &Value) -> Result<(), SchemaViolation>;

    /// Returns a stable label naming the schema flavor.
    fn kind_label(&self) -> &'static str;
}

// ============================================================================
// SECTION: JSON Schema
// ============================================================================

/// Key schema backed by a compiled JSON Schema document.
pub struct JsonKeySchema {
    /// Compiled validator.
    validator: Validator,
    /// Source schema document.
    source: Value,
}

impl JsonKeySchema {
    /// Compiles a JSON Schema document with Draft 2020-12 semantics.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaCompileError::Invalid`] when the document is not a valid schema.
    pub fn compile(schema: &Value) -> Result<Self, SchemaCompileError> {
        let validator = jsonschema::options()
            .with_draft(Draft::Draft202012)
            .build(schema)
            .map_err(|err| SchemaCompileError::Invalid(err.to_string()))?;
        Ok(Self {
            validator,
            source: schema.clone(),
        })
    }

    /// Returns the source schema document.
    #[must_use]
    pub const fn source(&self) -> &Value {
        &self.source
    }
}

impl fmt::Debug for JsonKeySchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonKeySchema").field("source", &self.source).finish_non_exhaustive()
    }
}

impl KeySchema for JsonKeySchema {
    fn validate(&self, keys: &Value) -> Result<(), SchemaViolation> {
        if self.validator.is_valid(keys) {
            return Ok(());
        }
        let errors = self
            .validator
            .iter_errors(keys)
            .take(MAX_VIOLATION_MESSAGES)
            .map(|err| describe_validation_error(&err))
            .collect();
        Err(SchemaViolation::new(errors))
    }

    fn kind_label(&self) -> &'static str {
        "json_schema"
    }
}

/// Renders a validator error without the rejected instance value.
fn describe_validation_error(err: &ValidationError<'_>) -> String {
    let path = match err.instance_path.as_str() {
        "" => "keys",
        pointer => pointer,
    };
    match &err.kind {
        ValidationErrorKind::Required {
            property,
        } => match property.as_str() {
            Some(name) => format!("missing required key `{name}`"),
            None => format!("`{path}` is missing a required key"),
        },
        ValidationErrorKind::Type {
            ..
        } => format!("`{path}` has the wrong type"),
        ValidationErrorKind::MinLength {
            limit,
        } => format!("`{path}` is shorter than {limit} characters"),
        ValidationErrorKind::MaxLength {
            limit,
        } => format!("`{path}` is longer than {limit} characters"),
        ValidationErrorKind::Pattern {
            pattern,
        } => format!("`{path}` does not match pattern `{pattern}`"),
        ValidationErrorKind::MinItems {
            limit,
        } => format!("`{path}` has fewer than {limit} items"),
        ValidationErrorKind::MinProperties {
            limit,
        } => format!("`{path}` has fewer than {limit} keys"),
        ValidationErrorKind::AdditionalProperties {
            unexpected,
        } => format!("`{path}` has unexpected keys: {}", unexpected.join(", ")),
        _ => {
            let keyword = err.schema_path.as_str().rsplit('/').next().unwrap_or_default();
            format!("`{path}` failed `{keyword}`")
        }
    }
}

// ============================================================================
// SECTION: Declarative Rules
// ============================================================================

/// Expected JSON type for a declared key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyKind {
    /// JSON string.
    #[default]
    String,
    /// JSON boolean.
    Boolean,
    /// Any JSON number.
    Number,
    /// JSON number without a fractional part.
    Integer,
    /// JSON object.
    Object,
    /// JSON array.
    Array,
    /// Any JSON value.
    Any,
}

impl KeyKind {
    /// Returns a stable label for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Object => "object",
            Self::Array => "array",
            Self::Any => "any",
        }
    }

    /// Returns true when the value has this kind.
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Boolean => value.is_boolean(),
            Self::Number => value.is_number(),
            Self::Integer => {
                value.is_i64()
                    || value.is_u64()
                    || value.as_f64().is_some_and(|number| number.fract() == 0.0)
            }
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
            Self::Any => true,
        }
    }
}

/// Returns true when a value counts as empty for `non_empty` rules.
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Default for [`KeyRule::non_empty`].
const fn default_non_empty() -> bool {
    true
}

/// One declared key in a [`RequiredKeys`] schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyRule {
    /// Key name inside the stored object.
    pub name: String,
    /// Expected JSON type.
    #[serde(default)]
    pub kind: KeyKind,
    /// Whether empty strings, arrays, objects, or null are rejected.
    #[serde(default = "default_non_empty")]
    pub non_empty: bool,
    /// Whether the key may be absent.
    #[serde(default)]
    pub optional: bool,
}

impl KeyRule {
    /// Creates a required, non-empty rule for the key.
    #[must_use]
    pub fn required(name: impl Into<String>, kind: KeyKind) -> Self {
        Self {
            name: name.into(),
            kind,
            non_empty: true,
            optional: false,
        }
    }

    /// Creates an optional, non-empty rule for the key.
    #[must_use]
    pub fn optional(name: impl Into<String>, kind: KeyKind) -> Self {
        Self {
            optional: true,
            ..Self::required(name, kind)
        }
    }

    /// Returns the rule with emptiness allowed.
    #[must_use]
    pub fn allow_empty(mut self) -> Self {
        self.non_empty = false;
        self
    }

    /// Checks one present value against the rule.
    fn check(&self, value: &Value, errors: &mut Vec<String>) {
        if !self.kind.matches(value) {
            errors.push(format!("key `{}` must be {}", self.name, article_kind(self.kind)));
            return;
        }
        if self.non_empty && is_empty_value(value) {
            errors.push(format!("key `{}` must be non-empty", self.name));
        }
    }

    /// Returns the JSON Schema fragment for the rule value.
    fn json_schema_fragment(&self) -> Value {
        let mut fragment = Map::new();
        if self.kind != KeyKind::Any {
            fragment.insert("type".to_string(), json!(self.kind.as_str()));
        }
        if self.non_empty {
            match self.kind {
                KeyKind::String => {
                    fragment.insert("minLength".to_string(), json!(1));
                }
                KeyKind::Array => {
                    fragment.insert("minItems".to_string(), json!(1));
                }
                KeyKind::Object => {
                    fragment.insert("minProperties".to_string(), json!(1));
                }
                KeyKind::Any => {
                    fragment.insert("not".to_string(), json!({ "enum": [null, "", [], {}] }));
                }
                KeyKind::Boolean | KeyKind::Number | KeyKind::Integer => {}
            }
        }
        Value::Object(fragment)
    }
}

/// Returns the kind label with an indefinite article for messages.
const fn article_kind(kind: KeyKind) -> &'static str {
    match kind {
        KeyKind::String => "a string",
        KeyKind::Boolean => "a boolean",
        KeyKind::Number => "a number",
        KeyKind::Integer => "an integer",
        KeyKind::Object => "an object",
        KeyKind::Array => "an array",
        KeyKind::Any => "any value",
    }
}

/// Returns a stable type label for a JSON value.
const fn value_type_label(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Declarative key schema: an object with the listed keys.
///
/// # Invariants
/// - Rule names are non-empty and unique.
/// - Keys not named by any rule are tolerated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredKeys {
    /// Key rules in declaration order.
    rules: Vec<KeyRule>,
}

impl RequiredKeys {
    /// Builds a declarative schema from key rules.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaCompileError`] when a rule name is empty or duplicated.
    pub fn new(rules: Vec<KeyRule>) -> Result<Self, SchemaCompileError> {
        let mut seen = BTreeSet::new();
        for rule in &rules {
            if rule.name.trim().is_empty() {
                return Err(SchemaCompileError::EmptyKeyName);
            }
            if !seen.insert(rule.name.as_str()) {
                return Err(SchemaCompileError::DuplicateKey(rule.name.clone()));
            }
        }
        Ok(Self {
            rules,
        })
    }

    /// Returns the declared rules.
    #[must_use]
    pub fn rules(&self) -> &[KeyRule] {
        &self.rules
    }

    /// Renders the rules as an equivalent JSON Schema document.
    #[must_use]
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for rule in &self.rules {
            properties.insert(rule.name.clone(), rule.json_schema_fragment());
            if !rule.optional {
                required.push(Value::String(rule.name.clone()));
            }
        }
        json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

impl KeySchema for RequiredKeys {
    fn validate(&self, keys: &Value) -> Result<(), SchemaViolation> {
        let Value::Object(map) = keys else {
            return Err(SchemaViolation::single(format!(
                "keys must be an object (got {})",
                value_type_label(keys)
            )));
        };
        let mut errors = Vec::new();
        for rule in &self.rules {
            match map.get(&rule.name) {
                Some(value) => rule.check(value, &mut errors),
                None if rule.optional => {}
                None => errors.push(format!("missing required key `{}`", rule.name)),
            }
        }
        if errors.is_empty() { Ok(()) } else { Err(SchemaViolation::new(errors)) }
    }

    fn kind_label(&self) -> &'static str {
        "required_keys"
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
