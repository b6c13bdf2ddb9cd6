// deploy-graph-core/tests/version.rs
// ============================================================================
// Module: Dotted Version Tests
// Description: Tests for dotted-numeric version parsing and ordering.
// ============================================================================
//! ## Overview
//! Validates that version comparison is numeric per-component, not
//! lexicographic, and that missing trailing components compare as zero.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use deploy_graph_core::Version;

// ============================================================================
// SECTION: Ordering
// ============================================================================

/// Tests that ordering is numeric, not a lexicographic string comparison.
#[test]
fn test_numeric_not_lexicographic_ordering() {
    let v2_1 = Version::parse("2.1.0").unwrap();
    let v2_10 = Version::parse("2.10.0").unwrap();

    assert!(v2_1 < v2_10, "2.1.0 must sort before 2.10.0 numerically");
}

/// Tests the exact chain called out for the cross-dependency version gate.
#[test]
fn test_cross_dependency_threshold_chain() {
    let versions: Vec<Version> = ["2.0.0", "2.1.0", "2.1.1", "2.10.0"]
        .iter()
        .map(|raw| Version::parse(raw).unwrap())
        .collect();

    for window in versions.windows(2) {
        assert!(window[0] < window[1], "{window:?} must be strictly increasing");
    }
}

/// Tests that a version with fewer components than another is zero-padded.
#[test]
fn test_missing_components_pad_with_zero() {
    let short = Version::parse("2.0").unwrap();
    let long = Version::parse("2.0.0").unwrap();

    assert_eq!(short, long);
}

/// Tests that an unparseable version string is rejected.
#[test]
fn test_rejects_non_numeric_component() {
    assert!(Version::parse("2.x.0").is_err());
}

/// Tests that an empty string is rejected.
#[test]
fn test_rejects_empty_string() {
    assert!(Version::parse("").is_err());
}

/// Tests round-trip display formatting.
#[test]
fn test_display_round_trip() {
    let version = Version::parse("2.10.3").unwrap();
    assert_eq!(version.to_display_string(), "2.10.3");
}
