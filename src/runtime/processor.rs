// deploy-graph-core/src/runtime/processor.rs
// ============================================================================
// Module: Chain Builder
// Description: Turns one serializer's raw output records into a linked chain.
// Purpose: Assign chain ids (`_start`/`#k`/`_end`) and wire forward
//          `requires` edges between consecutive chain links (§4.4).
// Dependencies: crate::{core, trace}
// ============================================================================

//! ## Overview
//! A [`crate::interfaces::TaskSerializer`] may expand one catalog task into
//! more than one output record (for example, one record per node a role
//! selector resolved to). When it does, the chain builder renames the
//! records `<id>_start`, `<id>#1` .. `<id>#(n-2)`, `<id>_end` and links each
//! one to require its predecessor, so that downstream dependency resolution
//! sees a linear sequence rather than a flat, unordered set. A
//! single-record output keeps its origin id unchanged and is not linked to
//! anything.
//!
//! Linking is asymmetric by design: only the successor gains a `requires`
//! (or `requires_ex`) entry pointing at its predecessor. The predecessor
//! never gains a matching `required_for` entry; that direction is left to
//! whatever explicit `required_for` references the catalog task declared.
//!
//! The origin catalog task's own dependency references are distributed
//! across the chain rather than copied onto every link: the first record
//! inherits `requires`/`cross-depends`, the last inherits
//! `required_for`/`cross-depended-by`, interior records inherit neither, and
//! a single-record "chain" inherits all four.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::identifiers::TaskId;
use crate::core::record::CatalogTask;
use crate::core::record::DependencyEdge;
use crate::core::record::OutputRecord;
use crate::runtime::trace::GraphTrace;
use crate::runtime::trace::TraceEvent;

// ============================================================================
// SECTION: Chain Builder
// ============================================================================

/// Assigns chain ids and forward links to one task's raw serializer output.
pub struct ChainBuilder;

impl ChainBuilder {
    /// Builds the chained record sequence for `origin`'s raw serializer
    /// output.
    ///
    /// `raw` is the unmodified output of
    /// [`crate::interfaces::TaskSerializer::serialize`]. A single record is
    /// renamed to `origin.id` and inherits all four of `origin`'s dependency
    /// fields (§4.4 step 3). Two or more records are renamed to their chain
    /// ids and linked in sequence: the first inherits only `requires`/
    /// `cross-depends`, the last inherits only `required_for`/
    /// `cross-depended-by`, and interior records inherit neither (§4.4 step
    /// 4), emitting a [`TraceEvent`] for each inter-link wiring.
    pub fn build(origin: &CatalogTask, mut raw: Vec<OutputRecord>, trace: &mut GraphTrace) -> Vec<OutputRecord> {
        match raw.len() {
            0 => Vec::new(),
            1 => {
                raw[0].id = origin.id.clone();
                raw[0].requires_refs = origin.requires.clone();
                raw[0].required_for_refs = origin.required_for.clone();
                raw[0].cross_depends = origin.cross_depends.clone();
                raw[0].cross_depended_by = origin.cross_depended_by.clone();
                raw
            }
            n => {
                let last_index = n - 1;
                for (index, record) in raw.iter_mut().enumerate() {
                    record.id = chain_id(&origin.id, index, n);
                    if index == 0 {
                        record.requires_refs = origin.requires.clone();
                        record.cross_depends = origin.cross_depends.clone();
                    } else if index == last_index {
                        record.required_for_refs = origin.required_for.clone();
                        record.cross_depended_by = origin.cross_depended_by.clone();
                    }
                }
                for index in 1..raw.len() {
                    let (left, right) = raw.split_at_mut(index);
                    let predecessor = &left[index - 1];
                    let successor = &mut right[0];
                    link(predecessor, successor, trace);
                }
                raw
            }
        }
    }
}

/// Derives the chain id for position `index` of `total` in `origin_id`'s chain.
fn chain_id(origin_id: &TaskId, index: usize, total: usize) -> TaskId {
    if index == 0 {
        origin_id.chain_start()
    } else if index == total - 1 {
        origin_id.chain_end()
    } else {
        origin_id.chain_interior(index)
    }
}

/// Wires `successor` to require `predecessor`, same-node by plain id
/// reference, cross-node by an already-resolved [`DependencyEdge`] per
/// predecessor node id.
fn link(predecessor: &OutputRecord, successor: &mut OutputRecord, trace: &mut GraphTrace) {
    if predecessor.uids == successor.uids {
        successor.requires_refs.push(predecessor.id.to_string());
        trace.record(TraceEvent::ChainLinkedSameNode {
            task_id: successor.id.clone(),
            predecessor_id: predecessor.id.clone(),
        });
    } else {
        for node_id in &predecessor.uids {
            successor.requires_ex.push(DependencyEdge {
                name: predecessor.id.clone(),
                node_id: node_id.clone(),
            });
            trace.record(TraceEvent::ChainLinkedCrossNode {
                task_id: successor.id.clone(),
                predecessor_id: predecessor.id.clone(),
                predecessor_node: node_id.clone(),
            });
        }
    }
}
