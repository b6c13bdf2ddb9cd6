// deploy-graph-core/tests/determinism.rs
// ============================================================================
// Module: Determinism Property Tests
// Description: Property-based tests for run-to-run determinism.
// ============================================================================
//! ## Overview
//! Generates small random catalogs and checks that serializing the same
//! catalog against the same node inventory twice always produces the same
//! placement key order, independent of catalog task id text (§5, §8).

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
use deploy_graph_core::{
    CatalogTask, GraphSerializer, Node, NodeId, RoleName, RoleSelector, SerializerRegistry,
    TaskId, TaskType,
};
use proptest::prelude::*;
use serde_json::Map;

fn node_inventory(count: usize) -> Vec<Node> {
    (0..count)
        .map(|index| Node::new(NodeId::new(format!("node-{index}")), [RoleName::new("generic")]))
        .collect()
}

fn custom_task(id: &str) -> CatalogTask {
    CatalogTask {
        id: TaskId::new(id),
        task_type: TaskType::Custom("generic_step".to_owned()),
        version: "2.0.0".to_owned(),
        role: Some(RoleSelector::All),
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

proptest! {
    /// Tests that two runs over the same catalog always agree on placement
    /// key order, for catalogs of varying size and node counts.
    #[test]
    fn test_placement_order_is_stable_across_runs(
        task_count in 0usize..8,
        node_count in 1usize..4,
    ) {
        let catalog: Vec<CatalogTask> = (0..task_count)
            .map(|index| custom_task(&format!("task_{index}")))
            .collect();
        let nodes = node_inventory(node_count);

        let registry_a: SerializerRegistry<()> = SerializerRegistry::new();
        let registry_b: SerializerRegistry<()> = SerializerRegistry::new();
        let config = GraphSerializerConfig::default();

        let (placement_a, _) = GraphSerializer::new(registry_a)
            .serialize(&(), nodes.clone(), catalog.clone(), &config)
            .unwrap();
        let (placement_b, _) = GraphSerializer::new(registry_b)
            .serialize(&(), nodes, catalog, &config)
            .unwrap();

        let keys_a: Vec<_> = placement_a.keys().collect();
        let keys_b: Vec<_> = placement_b.keys().collect();
        prop_assert_eq!(keys_a, keys_b);

        for node_id in placement_a.keys() {
            let ids_a: Vec<_> = placement_a[node_id].keys().collect();
            let ids_b: Vec<_> = placement_b[node_id].keys().collect();
            prop_assert_eq!(ids_a, ids_b);
        }
    }
}
