// deploy-graph-core/src/runtime/trace.rs
// ============================================================================
// Module: Graph Trace
// Description: Structurally-typed diagnostic events collected during a run.
// Purpose: Substitute for a side-effecting logger in a pure, synchronous core.
// Dependencies: crate::core::identifiers
// ============================================================================

//! ## Overview
//! The core performs no I/O (§5), so it cannot call out to a logging facade
//! without breaking its purity guarantee. Instead it collects a flat list of
//! [`TraceEvent`]s as it runs and returns them alongside the placement map;
//! a caller that wants textual logs renders the trace itself, at whatever
//! verbosity it wants.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::identifiers::NodeId;
use crate::core::identifiers::TaskId;

// ============================================================================
// SECTION: Trace Events
// ============================================================================

/// One diagnostic event observed during a serialization run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    /// A chain link was wired to its predecessor on the same node.
    ChainLinkedSameNode {
        /// Id of the chain link that gained the dependency.
        task_id: TaskId,
        /// Id of the predecessor it now requires.
        predecessor_id: TaskId,
    },
    /// A chain link was wired to its predecessor across nodes.
    ChainLinkedCrossNode {
        /// Id of the chain link that gained the dependency.
        task_id: TaskId,
        /// Id of the predecessor it now requires.
        predecessor_id: TaskId,
        /// Node the predecessor ran on.
        predecessor_node: Option<NodeId>,
    },
    /// An existing placement was overwritten by a same-id record of a
    /// different, non-`skipped` type (§4.8).
    SkipOverridden {
        /// Node the placement lives on.
        node_id: Option<NodeId>,
        /// Id of the placed record.
        task_id: TaskId,
    },
    /// A same-node or cross-node dependency reference resolved to nothing.
    UnresolvedDependency {
        /// Node the reference was evaluated from.
        node_id: Option<NodeId>,
        /// The unresolved reference text.
        reference: String,
    },
}

// ============================================================================
// SECTION: Trace Collector
// ============================================================================

/// An in-memory collector of [`TraceEvent`]s for one serialization run.
#[derive(Debug, Clone, Default)]
pub struct GraphTrace {
    /// Events in the order they were recorded.
    events: Vec<TraceEvent>,
}

impl GraphTrace {
    /// Creates an empty trace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an event.
    pub fn record(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    /// Returns the recorded events in the order they occurred.
    #[must_use]
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }
}
