// deploy-graph-core/tests/chain_builder.rs
// ============================================================================
// Module: Chain Builder Tests
// Description: Tests for chain id assignment and forward requires wiring.
// ============================================================================
//! ## Overview
//! Validates the single-record passthrough case and the multi-record
//! `_start`/`#k`/`_end` chain, including the same-node-vs-cross-node
//! branching of the forward `requires` link.

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

use deploy_graph_core::CatalogTask;
use deploy_graph_core::ChainBuilder;
use deploy_graph_core::GraphTrace;
use deploy_graph_core::NodeId;
use deploy_graph_core::OutputRecord;
use deploy_graph_core::TaskId;
use deploy_graph_core::TaskType;
use serde_json::Map;

/// Builds a bare catalog task with the given id and no dependency references.
fn bare_task(id: &str) -> CatalogTask {
    CatalogTask {
        id: TaskId::new(id),
        task_type: TaskType::Custom("x".to_owned()),
        version: "1.0.0".to_owned(),
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

/// Tests that a single-record output keeps the origin id unchanged.
#[test]
fn test_single_record_keeps_origin_id() {
    let origin = bare_task("netconfig");
    let raw = vec![OutputRecord::new(
        TaskId::new("ignored"),
        TaskType::Custom("net_config".to_owned()),
        vec![Some(NodeId::new("node-1"))],
    )];
    let mut trace = GraphTrace::new();

    let chained = ChainBuilder::build(&origin, raw, &mut trace);

    assert_eq!(chained.len(), 1);
    assert_eq!(chained[0].id, origin.id);
    assert!(chained[0].requires_refs.is_empty());
    assert!(trace.events().is_empty());
}

/// Tests that the single-record case inherits all four dependency fields.
#[test]
fn test_single_record_inherits_all_dependency_fields() {
    let mut origin = bare_task("netconfig");
    origin.requires = vec!["pre".to_owned()];
    origin.required_for = vec!["post".to_owned()];
    let raw = vec![OutputRecord::new(
        TaskId::new("ignored"),
        TaskType::Custom("net_config".to_owned()),
        vec![Some(NodeId::new("node-1"))],
    )];
    let mut trace = GraphTrace::new();

    let chained = ChainBuilder::build(&origin, raw, &mut trace);

    assert_eq!(chained[0].requires_refs, vec!["pre".to_owned()]);
    assert_eq!(chained[0].required_for_refs, vec!["post".to_owned()]);
}

/// Tests that same-node chain links use a plain name reference.
#[test]
fn test_multi_record_same_node_links_by_name() {
    let origin = bare_task("netconfig");
    let node = Some(NodeId::new("node-1"));
    let raw = vec![
        OutputRecord::new(TaskId::new("ignored"), TaskType::Custom("x".to_owned()), vec![node.clone()]),
        OutputRecord::new(TaskId::new("ignored"), TaskType::Custom("x".to_owned()), vec![node.clone()]),
        OutputRecord::new(TaskId::new("ignored"), TaskType::Custom("x".to_owned()), vec![node]),
    ];
    let mut trace = GraphTrace::new();

    let chained = ChainBuilder::build(&origin, raw, &mut trace);

    assert_eq!(chained[0].id, origin.id.chain_start());
    assert_eq!(chained[1].id, origin.id.chain_interior(1));
    assert_eq!(chained[2].id, origin.id.chain_end());

    assert_eq!(chained[1].requires_refs, vec![origin.id.chain_start().to_string()]);
    assert_eq!(chained[2].requires_refs, vec![origin.id.chain_interior(1).to_string()]);
    assert!(chained[0].requires_refs.is_empty());
    assert_eq!(trace.events().len(), 2);
}

/// Tests that only the first and last chain links inherit the origin's
/// external dependency references, not the interior links.
#[test]
fn test_multi_record_distributes_origin_dependencies_to_ends_only() {
    let mut origin = bare_task("netconfig");
    origin.requires = vec!["pre".to_owned()];
    origin.required_for = vec!["post".to_owned()];
    let node = Some(NodeId::new("node-1"));
    let raw = vec![
        OutputRecord::new(TaskId::new("ignored"), TaskType::Custom("x".to_owned()), vec![node.clone()]),
        OutputRecord::new(TaskId::new("ignored"), TaskType::Custom("x".to_owned()), vec![node.clone()]),
        OutputRecord::new(TaskId::new("ignored"), TaskType::Custom("x".to_owned()), vec![node]),
    ];
    let mut trace = GraphTrace::new();

    let chained = ChainBuilder::build(&origin, raw, &mut trace);

    assert!(chained[0].requires_refs.contains(&"pre".to_owned()));
    assert!(chained[0].required_for_refs.is_empty());
    assert!(chained[1].requires_refs.iter().all(|r| r != "pre"));
    assert!(chained[1].required_for_refs.is_empty());
    assert!(chained[2].required_for_refs.contains(&"post".to_owned()));
    assert!(!chained[2].requires_refs.contains(&"pre".to_owned()));
}

/// Tests that cross-node chain links resolve to an already-bound edge.
#[test]
fn test_multi_record_cross_node_links_by_edge() {
    let origin = bare_task("copy_files");
    let raw = vec![
        OutputRecord::new(
            TaskId::new("ignored"),
            TaskType::Custom("x".to_owned()),
            vec![Some(NodeId::new("node-1"))],
        ),
        OutputRecord::new(
            TaskId::new("ignored"),
            TaskType::Custom("x".to_owned()),
            vec![Some(NodeId::new("node-2"))],
        ),
    ];
    let mut trace = GraphTrace::new();

    let chained = ChainBuilder::build(&origin, raw, &mut trace);

    assert!(chained[1].requires_refs.is_empty());
    assert_eq!(chained[1].requires_ex.len(), 1);
    assert_eq!(chained[1].requires_ex[0].name, origin.id.chain_start());
    assert_eq!(chained[1].requires_ex[0].node_id, Some(NodeId::new("node-1")));
}
