// deploy-graph-core/tests/version_gate.rs
// ============================================================================
// Module: Version Gate Tests
// Description: Tests for the cross-dependency version threshold enforcement.
// ============================================================================
//! ## Overview
//! Validates that `stage` tasks bypass the gate unconditionally, that a
//! too-old version is rejected, and that an unparseable version is rejected
//! distinctly.

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

use deploy_graph_core::config::GraphSerializerConfig;
use deploy_graph_core::runtime::version_gate;
use deploy_graph_core::CatalogTask;
use deploy_graph_core::GraphError;
use deploy_graph_core::TaskId;
use deploy_graph_core::TaskType;
use serde_json::Map;

fn task_with(task_type: TaskType, version: &str) -> CatalogTask {
    CatalogTask {
        id: TaskId::new("some_task"),
        task_type,
        version: version.to_owned(),
        role: None,
        groups: None,
        tasks: Vec::new(),
        requires: Vec::new(),
        required_for: Vec::new(),
        cross_depends: Vec::new(),
        cross_depended_by: Vec::new(),
        skipped: None,
        extra: Map::new(),
    }
}

/// Tests that a `stage` task bypasses the gate even with an old version.
#[test]
fn test_stage_task_bypasses_gate() {
    let config = GraphSerializerConfig::default();
    let task = task_with(TaskType::Stage, "0.1.0");

    assert!(version_gate::check(&task, &config).is_ok());
}

/// Tests that a non-stage task below the threshold is rejected.
#[test]
fn test_rejects_version_below_threshold() {
    let config = GraphSerializerConfig::default();
    let task = task_with(TaskType::Custom("net_config".to_owned()), "1.0.0");

    let error = version_gate::check(&task, &config).unwrap_err();
    assert!(matches!(error, GraphError::TaskVersionUnsupported { .. }));
}

/// Tests that a non-stage task at the threshold is accepted.
#[test]
fn test_accepts_version_at_threshold() {
    let config = GraphSerializerConfig::default();
    let task = task_with(TaskType::Custom("net_config".to_owned()), "2.0.0");

    assert!(version_gate::check(&task, &config).is_ok());
}

/// Tests that an unparseable version is rejected distinctly.
#[test]
fn test_rejects_unparseable_version() {
    let config = GraphSerializerConfig::default();
    let task = task_with(TaskType::Custom("net_config".to_owned()), "not-a-version");

    let error = version_gate::check(&task, &config).unwrap_err();
    assert!(matches!(error, GraphError::InvalidVersion { .. }));
}
