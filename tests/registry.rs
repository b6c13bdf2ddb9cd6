// deploy-graph-core/tests/registry.rs
// ============================================================================
// Module: Serializer Registry Tests
// Description: Tests for built-in factory lookup and the no-op serializer.
// ============================================================================
//! ## Overview
//! Validates that `stage` and `skipped` always resolve to a factory, that an
//! unregistered custom type does not, and that the no-op serializer resolves
//! its task's role selector into a bare record (dependency references are
//! attached later, by the chain builder).

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

use deploy_graph_core::{
    CatalogTask, Node, NodeId, RoleName, RoleSelector, SerializerFactory, SerializerRegistry,
    StandardRoleResolver, TaskId, TaskSerializer, TaskType,
};
use serde_json::Map;

fn stage_task() -> CatalogTask {
    CatalogTask {
        id: TaskId::new("deploy_start"),
        task_type: TaskType::Stage,
        version: "1.0.0".to_owned(),
        role: Some(RoleSelector::All),
        groups: None,
        tasks: Vec::new(),
        requires: vec!["other_task".to_owned()],
        required_for: Vec::new(),
        cross_depends: Vec::new(),
        cross_depended_by: Vec::new(),
        skipped: None,
        extra: Map::new(),
    }
}

/// Tests that the built-in factories are present by default.
#[test]
fn test_builtin_types_are_registered() {
    let registry: SerializerRegistry<()> = SerializerRegistry::new();

    assert!(registry.factory_for(&TaskType::Stage).is_some());
    assert!(registry.factory_for(&TaskType::Skipped).is_some());
    assert!(
        registry
            .factory_for(&TaskType::Custom("net_config".to_owned()))
            .is_none()
    );
}

/// Tests that the no-op serializer resolves its role into a bare record.
#[test]
fn test_noop_serializer_resolves_role() {
    let registry: SerializerRegistry<()> = SerializerRegistry::new();
    let task = stage_task();
    let nodes = vec![Node::new(NodeId::new("node-1"), [RoleName::new("controller")])];
    let resolver = StandardRoleResolver::new(nodes.clone());
    let node_ids: Vec<NodeId> = nodes.iter().map(|n| n.id.clone()).collect();

    let factory = registry.factory_for(&task.task_type).unwrap();
    let serializer = factory.build(&task, &(), &node_ids, Box::new(resolver));

    assert!(serializer.should_execute());
    let records = serializer.serialize();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].uids, vec![Some(NodeId::new("node-1"))]);
    assert!(records[0].requires_refs.is_empty());
}

/// Tests that a `skipped` task is still emitted, as a `skipped`-typed record.
#[test]
fn test_skipped_task_emits_skipped_placeholder() {
    let registry: SerializerRegistry<()> = SerializerRegistry::new();
    let mut task = stage_task();
    task.skipped = Some(true);
    let nodes = vec![Node::new(NodeId::new("node-1"), [RoleName::new("controller")])];
    let resolver = StandardRoleResolver::new(nodes.clone());
    let node_ids: Vec<NodeId> = nodes.iter().map(|n| n.id.clone()).collect();

    let factory = registry.factory_for(&task.task_type).unwrap();
    let serializer = factory.build(&task, &(), &node_ids, Box::new(resolver));

    assert!(!serializer.should_execute());
    let records = serializer.serialize();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].record_type, TaskType::Skipped);
}
