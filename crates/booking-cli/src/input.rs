// crates/booking-cli/src/input.rs
// ============================================================================
// Module: CLI Input Helpers
// Description: Size-limited reads of files and stdin.
// Purpose: Fail closed on oversized or malformed CLI inputs.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Every file the CLI reads goes through [`read_bytes_with_limit`]. The input
//! name `-` selects stdin. Reads stop one byte past the limit so oversized
//! inputs are detected without buffering them whole.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum size of any CLI input file.
pub const MAX_INPUT_BYTES: usize = 1024 * 1024;
/// Input name that selects stdin.
pub const STDIN_INPUT: &str = "-";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors returned by bounded input reads.
#[derive(Debug, Error)]
pub enum InputError {
    /// Input I/O failure.
    #[error("unable to read {source_name}: {error}")]
    Io {
        /// Input name (path or `-`).
        source_name: String,
        /// Underlying I/O error.
        error: std::io::Error,
    },
    /// Input size exceeds the limit.
    #[error("{source_name} exceeds size limit ({size} > {limit} bytes)")]
    TooLarge {
        /// Input name (path or `-`).
        source_name: String,
        /// Observed size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
    /// Input was not valid JSON for the expected type.
    #[error("invalid json in {source_name}: {error}")]
    Json {
        /// Input name (path or `-`).
        source_name: String,
        /// Parse error.
        error: serde_json::Error,
    },
}

// ============================================================================
// SECTION: Reads
// ============================================================================

/// Reads from a reader while enforcing a hard size limit.
///
/// # Errors
///
/// Returns [`InputError`] when reading fails or the input exceeds `max_bytes`.
pub fn read_reader_with_limit(
    reader: impl Read,
    source_name: &str,
    max_bytes: usize,
) -> Result<Vec<u8>, InputError> {
    let limit = u64::try_from(max_bytes).unwrap_or(u64::MAX);
    let mut limited = reader.take(limit.saturating_add(1));
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes).map_err(|error| InputError::Io {
        source_name: source_name.to_string(),
        error,
    })?;
    if bytes.len() > max_bytes {
        return Err(InputError::TooLarge {
            source_name: source_name.to_string(),
            size: u64::try_from(bytes.len()).unwrap_or(u64::MAX),
            limit: max_bytes,
        });
    }
    Ok(bytes)
}

/// Reads a file from disk while enforcing a hard size limit.
///
/// # Errors
///
/// Returns [`InputError`] when the file cannot be read or is too large.
pub fn read_bytes_with_limit(path: &Path, max_bytes: usize) -> Result<Vec<u8>, InputError> {
    let source_name = path.display().to_string();
    let io_error = |error| InputError::Io {
        source_name: source_name.clone(),
        error,
    };
    let file = File::open(path).map_err(io_error)?;
    let size = file.metadata().map_err(io_error)?.len();
    if size > u64::try_from(max_bytes).unwrap_or(u64::MAX) {
        return Err(InputError::TooLarge {
            source_name,
            size,
            limit: max_bytes,
        });
    }
    read_reader_with_limit(file, &source_name, max_bytes)
}

/// Reads an input by name; `-` reads stdin.
///
/// # Errors
///
/// Returns [`InputError`] when the input cannot be read or is too large.
pub fn read_input(name: &str, max_bytes: usize) -> Result<Vec<u8>, InputError> {
    if name == STDIN_INPUT {
        return read_reader_with_limit(std::io::stdin().lock(), "stdin", max_bytes);
    }
    read_bytes_with_limit(Path::new(name), max_bytes)
}

/// Parses JSON input bytes into `T`.
///
/// # Errors
///
/// Returns [`InputError::Json`] when the bytes do not parse.
pub fn parse_json<T: DeserializeOwned>(bytes: &[u8], source_name: &str) -> Result<T, InputError> {
    serde_json::from_slice(bytes).map_err(|error| InputError::Json {
        source_name: source_name.to_string(),
        error,
    })
}

/// Reads and parses a JSON input by name; `-` reads stdin.
///
/// # Errors
///
/// Returns [`InputError`] when reading or parsing fails.
pub fn read_json_input<T: DeserializeOwned>(name: &str) -> Result<T, InputError> {
    let bytes = read_input(name, MAX_INPUT_BYTES)?;
    parse_json(&bytes, name)
}
