// crates/booking-cli/src/tests/input.rs
// ============================================================================
// Module: CLI Input Tests
// Description: Unit tests for bounded CLI input reads.
// Purpose: Ensure size limits fail closed and JSON errors name their source.
// Dependencies: booking-cli input helpers, tempfile
// ============================================================================

//! ## Overview
//! Validates `read_bytes_with_limit` and `read_reader_with_limit` enforce
//! size limits for CLI inputs.
//!
//! Security posture: CLI inputs are untrusted; size limits must fail closed.

use std::io::Cursor;

use proptest::prelude::*;
use serde_json::Value;
use tempfile::NamedTempFile;

use crate::input::InputError;
use crate::input::parse_json;
use crate::input::read_bytes_with_limit;
use crate::input::read_reader_with_limit;

#[test]
fn read_bytes_with_limit_accepts_exact_size() {
    let file = NamedTempFile::new().unwrap();
    std::fs::write(file.path(), b"abcd").unwrap();
    let bytes = read_bytes_with_limit(file.path(), 4).unwrap();
    assert_eq!(bytes, b"abcd");
}

#[test]
fn read_bytes_with_limit_rejects_oversized_file() {
    let file = NamedTempFile::new().unwrap();
    std::fs::write(file.path(), b"abcde").unwrap();
    let err = read_bytes_with_limit(file.path(), 4).unwrap_err();
    match err {
        InputError::TooLarge {
            size,
            limit,
            ..
        } => {
            assert_eq!(size, 5);
            assert_eq!(limit, 4);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn read_bytes_with_limit_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_bytes_with_limit(&dir.path().join("absent.json"), 4).unwrap_err();
    assert!(matches!(err, InputError::Io { .. }));
}

#[test]
fn parse_json_names_the_source() {
    let err = parse_json::<Value>(b"{ nope", "keys.json").unwrap_err();
    assert!(err.to_string().contains("keys.json"));
}

proptest! {
    #[test]
    fn reader_limit_matches_length(len in 0_usize..64, limit in 0_usize..64) {
        let data = vec![b'x'; len];
        let result = read_reader_with_limit(Cursor::new(data), "stdin", limit);
        prop_assert_eq!(result.is_ok(), len <= limit);
    }
}
