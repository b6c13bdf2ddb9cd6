// deploy-graph-core/src/runtime/registry.rs
// ============================================================================
// Module: Serializer Registry
// Description: Dispatches a catalog task to the serializer factory for its type.
// Purpose: Hold the built-in `stage`/`skipped` serializer plus implementation-
//          registered factories for every other task type (§4.2, §6).
// Dependencies: crate::{core, interfaces, runtime::role_resolver}
// ============================================================================

//! ## Overview
//! [`SerializerRegistry`] is a small, per-cluster-type lookup table keyed by
//! the catalog task's `type` string. `stage` and `skipped` are always
//! present and backed by [`NoopSerializerFactory`]; any other type the
//! embedding application has not registered a factory for falls back to the
//! same no-op behavior at the call site in
//! [`crate::runtime::serializer::GraphSerializer`], so an un-registered
//! custom type degrades to plain placement plus dependency wiring rather
//! than aborting the run.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;

use crate::core::identifiers::NodeId;
use crate::core::model::ResolvePolicy;
use crate::core::model::TaskType;
use crate::core::record::CatalogTask;
use crate::core::record::OutputRecord;
use crate::interfaces::SerializerFactory;
use crate::interfaces::TaskSerializer;
use crate::runtime::role_resolver::RoleResolver;

// ============================================================================
// SECTION: Serializer Registry
// ============================================================================

/// Maps catalog task type strings to the factory that serializes them.
pub struct SerializerRegistry<C> {
    /// Factories keyed by their catalog task type string.
    factories: HashMap<String, Box<dyn SerializerFactory<C>>>,
}

impl<C> SerializerRegistry<C> {
    /// Creates a registry pre-populated with the built-in `stage` and
    /// `skipped` no-op factories.
    #[must_use]
    pub fn new() -> Self {
        let mut factories: HashMap<String, Box<dyn SerializerFactory<C>>> = HashMap::new();
        factories.insert(TaskType::STAGE.to_owned(), Box::new(NoopSerializerFactory));
        factories.insert(
            TaskType::SKIPPED.to_owned(),
            Box::new(NoopSerializerFactory),
        );
        Self { factories }
    }

    /// Registers `factory` for `type_key`, replacing any existing factory
    /// registered for the same key (including the built-in ones).
    pub fn register(&mut self, type_key: impl Into<String>, factory: Box<dyn SerializerFactory<C>>) {
        self.factories.insert(type_key.into(), factory);
    }

    /// Returns the factory registered for `task_type`, if any.
    #[must_use]
    pub fn factory_for(&self, task_type: &TaskType) -> Option<&dyn SerializerFactory<C>> {
        self.factories
            .get(task_type.as_str())
            .map(std::convert::AsRef::as_ref)
    }
}

impl<C> Default for SerializerRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// SECTION: No-Op Serializer
// ============================================================================

/// A pass-through serializer used for `stage` and `skipped` catalog tasks,
/// and as the fallback for any task type with no registered factory.
///
/// It resolves the task's own role selector (via the supplied resolver) and
/// emits a single bare record; the chain builder attaches the task's
/// declared dependency references afterward (§4.4). When the task is
/// flagged `skipped`, the emitted record's type is forced to
/// [`TaskType::Skipped`] rather than suppressed, so the record stays
/// graph-connected for other tasks that depend on it (§4.8).
struct NoopSerializer {
    /// The bound catalog task, carried through unchanged.
    task: CatalogTask,
    /// Resolved target node ids (or `[None]` for a node-independent task).
    uids: Vec<Option<NodeId>>,
}

impl TaskSerializer for NoopSerializer {
    fn should_execute(&self) -> bool {
        !self.task.skipped.unwrap_or(false)
    }

    fn serialize(&self) -> Vec<OutputRecord> {
        let record_type = if self.should_execute() {
            self.task.task_type.clone()
        } else {
            TaskType::Skipped
        };

        let record = OutputRecord::new(self.task.id.clone(), record_type, self.uids.clone());
        vec![record]
    }
}

/// Builds [`NoopSerializer`] instances.
pub struct NoopSerializerFactory;

impl<C> SerializerFactory<C> for NoopSerializerFactory {
    fn build(
        &self,
        task: &CatalogTask,
        _cluster: &C,
        _nodes: &[NodeId],
        resolver: Box<dyn RoleResolver>,
    ) -> Box<dyn TaskSerializer> {
        let uids = match task.effective_role_selector() {
            Some(selector) => resolver
                .resolve(selector, ResolvePolicy::All)
                .into_iter()
                .map(Some)
                .collect(),
            None => vec![None],
        };
        Box::new(NoopSerializer {
            task: task.clone(),
            uids,
        })
    }
}
