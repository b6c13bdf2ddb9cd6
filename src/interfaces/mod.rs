// deploy-graph-core/src/interfaces/mod.rs
// ============================================================================
// Module: Deploy Graph Interfaces
// Description: Backend-agnostic contracts for task serializers and plugin hooks.
// Purpose: Define the extension surface the graph serializer drives without
//          embedding any specific serializer's implementation.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! These traits are the "external collaborators" named in the scope section:
//! the registry of per-task-type serializers and the plugin pre/post
//! deployment hook sources are supplied by the embedding application, not by
//! this crate. The core only depends on the shape of their output.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::identifiers::NodeId;
use crate::core::record::CatalogTask;
use crate::core::record::OutputRecord;
use crate::runtime::role_resolver::RoleResolver;

// ============================================================================
// SECTION: Task Serializer
// ============================================================================

/// A serializer instance bound to one catalog task and its candidate nodes.
///
/// Implementations must be synchronous and side-effect free: a serialization
/// run is a pure function of its inputs (§5).
pub trait TaskSerializer {
    /// Returns whether the task is active given the bound inputs.
    fn should_execute(&self) -> bool;

    /// Produces the (possibly empty, possibly chained) sequence of output
    /// records for this task.
    fn serialize(&self) -> Vec<OutputRecord>;
}

/// Constructs a [`TaskSerializer`] for one catalog task.
///
/// `C` is the opaque cluster handle; the core never reads its fields.
pub trait SerializerFactory<C> {
    /// Builds a serializer bound to `task`, `cluster`, `nodes`, and `resolver`.
    fn build(
        &self,
        task: &CatalogTask,
        cluster: &C,
        nodes: &[NodeId],
        resolver: Box<dyn RoleResolver>,
    ) -> Box<dyn TaskSerializer>;
}

// ============================================================================
// SECTION: Serializer Error
// ============================================================================

/// Error propagated unchanged from an external [`TaskSerializer`].
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct SerializerError(pub String);

impl SerializerError {
    /// Creates a new serializer error with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

// ============================================================================
// SECTION: Plugin Hook Source
// ============================================================================

/// Source of synthetic plugin deployment hook records (§4.3, §6).
///
/// One instance covers one direction (pre- or post-deployment); the graph
/// serializer concatenates `begin_tasks` then `end_tasks` and feeds the
/// result through the same chain-building path as any other task, so a
/// source that yields more than one record per call still gets `_start`/
/// `#k`/`_end` wiring.
pub trait PluginHookSource<C> {
    /// Yields the "begin" records for this hook direction.
    fn begin_tasks(
        &self,
        cluster: &C,
        nodes: &[NodeId],
        resolver: &dyn RoleResolver,
    ) -> Vec<OutputRecord>;

    /// Yields the "end" records for this hook direction.
    fn end_tasks(
        &self,
        cluster: &C,
        nodes: &[NodeId],
        resolver: &dyn RoleResolver,
    ) -> Vec<OutputRecord>;
}

/// A [`PluginHookSource`] that yields no records in either direction.
///
/// The default when an embedding application has no plugins wired in.
pub struct NullPluginHookSource;

impl<C> PluginHookSource<C> for NullPluginHookSource {
    fn begin_tasks(
        &self,
        _cluster: &C,
        _nodes: &[NodeId],
        _resolver: &dyn RoleResolver,
    ) -> Vec<OutputRecord> {
        Vec::new()
    }

    fn end_tasks(
        &self,
        _cluster: &C,
        _nodes: &[NodeId],
        _resolver: &dyn RoleResolver,
    ) -> Vec<OutputRecord> {
        Vec::new()
    }
}
