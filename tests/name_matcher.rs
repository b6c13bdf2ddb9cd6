// deploy-graph-core/tests/name_matcher.rs
// ============================================================================
// Module: Name Matcher Tests
// Description: Tests for literal-vs-pattern classification and matching.
// ============================================================================
//! ## Overview
//! Validates that alphanumeric/underscore/hyphen names are treated as exact
//! ids while anything else is compiled and matched as a glob pattern.

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

use deploy_graph_core::NameRef;

/// Tests that a plain id is classified literal and matches only itself.
#[test]
fn test_literal_name_matches_only_itself() {
    let name_ref = NameRef::compile("netconfig").unwrap();

    assert!(name_ref.matches("netconfig"));
    assert!(!name_ref.matches("netconfig_start"));
    assert_eq!(name_ref.as_literal(), Some("netconfig"));
}

/// Tests that a wildcard pattern matches the names it should.
#[test]
fn test_wildcard_pattern_matches_prefix() {
    let name_ref = NameRef::compile("netconfig*").unwrap();

    assert!(name_ref.matches("netconfig_start"));
    assert!(name_ref.matches("netconfig"));
    assert!(!name_ref.matches("other_task"));
    assert_eq!(name_ref.as_literal(), None);
}

/// Tests that a hyphenated name is still treated as literal.
#[test]
fn test_hyphenated_name_is_literal() {
    let name_ref = NameRef::compile("pre-deploy").unwrap();
    assert_eq!(name_ref.as_literal(), Some("pre-deploy"));
}
