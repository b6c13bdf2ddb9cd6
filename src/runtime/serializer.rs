// deploy-graph-core/src/runtime/serializer.rs
// ============================================================================
// Module: Graph Serializer
// Description: The top-level driver: dispatch, chain-build, place, and wire.
// Purpose: Turn a node inventory and a catalog task list into a deterministic
//          per-node placement map of fully materialized output records.
// Dependencies: crate::{core, config, error, interfaces, runtime::*}, indexmap
// ============================================================================

//! ## Overview
//! [`GraphSerializer::serialize`] is the single entry point of this crate.
//! It runs in four passes over the catalog:
//!
//! 1. Dispatch each non-group task to its registered serializer; if it
//!    yielded at least one record, enforce the §4.7 version gate on the
//!    origin task, then chain-build and place the result (§4.2, §4.4). A
//!    serializer that yields nothing is skipped with no gate check, and
//!    `group` tasks are never gated themselves — only their members are.
//! 2. Expand `group` tasks by resolving their role selector once and
//!    recursing into their member tasks under a [`NullResolver`] pinned to
//!    that resolution, so members ignore their own `role`/`groups` field
//!    (§4.5).
//! 3. Resolve same-node `requires`/`required_for` name references against
//!    the current node's bucket and the null bucket (§4.6).
//! 4. Resolve cross-node `cross-depends`/`cross-depended-by` references by
//!    role (§4.7).
//!
//! The whole run is a pure function of its inputs: the same catalog, node
//! inventory, and configuration always produce the same placement map and
//! [`GraphTrace`] (§5).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::collections::HashSet;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::config::GraphSerializerConfig;
use crate::core::identifiers::NodeId;
use crate::core::identifiers::TaskId;
use crate::core::model::Node;
use crate::core::model::ResolvePolicy;
use crate::core::model::RoleSelector;
use crate::core::model::TaskType;
use crate::core::record::CatalogTask;
use crate::core::record::CrossDependencyRef;
use crate::core::record::DependencyEdge;
use crate::core::record::OutputRecord;
use crate::error::GraphError;
use crate::interfaces::NullPluginHookSource;
use crate::interfaces::PluginHookSource;
use crate::interfaces::SerializerFactory;
use crate::interfaces::TaskSerializer;
use crate::runtime::name_matcher::NameRef;
use crate::runtime::preprocessor;
use crate::runtime::preprocessor::PluginHookFactory;
use crate::runtime::processor::ChainBuilder;
use crate::runtime::registry::NoopSerializerFactory;
use crate::runtime::registry::SerializerRegistry;
use crate::runtime::role_resolver::NullResolver;
use crate::runtime::role_resolver::RoleResolver;
use crate::runtime::role_resolver::StandardRoleResolver;
use crate::runtime::trace::GraphTrace;
use crate::runtime::trace::TraceEvent;
use crate::runtime::version_gate;

// ============================================================================
// SECTION: Placement Map Type
// ============================================================================

/// Per-node, insertion-ordered placement of output records.
///
/// The outer key is `None` for the null/common bucket, `Some(node_id)`
/// otherwise; both levels preserve first-insertion order so two runs over
/// the same inputs produce identically ordered output (§5).
pub type PlacementMap = IndexMap<Option<NodeId>, IndexMap<TaskId, OutputRecord>>;

/// Origin id's chain endpoints, used to attach pattern-matched dependency
/// references to the correct end of a multi-record chain (§4.6).
#[derive(Debug, Clone)]
struct ChainEnds {
    /// Id of the chain's first record (`<origin>_start`, or the origin id
    /// itself when the chain has only one record).
    start: TaskId,
    /// Id of the chain's last record (`<origin>_end`, or the origin id
    /// itself when the chain has only one record).
    end: TaskId,
}

// ============================================================================
// SECTION: Graph Serializer
// ============================================================================

/// Drives one deployment task graph serialization run.
pub struct GraphSerializer<C> {
    /// Per-task-type serializer factories.
    registry: SerializerRegistry<C>,
    /// Plugin pre/post deployment hook source; defaults to the null source.
    plugin_hooks: Rc<dyn PluginHookSource<C>>,
}

impl<C> GraphSerializer<C> {
    /// Creates a serializer with no plugin hook source.
    #[must_use]
    pub fn new(registry: SerializerRegistry<C>) -> Self {
        Self {
            registry,
            plugin_hooks: Rc::new(NullPluginHookSource),
        }
    }

    /// Attaches a plugin hook source, enabling `plugin_pre_deployment_hook`/
    /// `plugin_post_deployment_hook` anchors to be injected and dispatched.
    #[must_use]
    pub fn with_plugin_hooks(mut self, source: Rc<dyn PluginHookSource<C>>) -> Self {
        self.plugin_hooks = source;
        self
    }

    /// Serializes `catalog` against `nodes` into a deterministic placement
    /// map and diagnostic trace.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError`] on an unparseable or version-gated task, or an
    /// unknown group member. The run aborts on the first error; there is no
    /// partial output (§7).
    pub fn serialize(
        &self,
        cluster: &C,
        nodes: Vec<Node>,
        mut catalog: Vec<CatalogTask>,
        config: &GraphSerializerConfig,
    ) -> Result<(PlacementMap, GraphTrace), GraphError> {
        let mut trace = GraphTrace::new();
        preprocessor::inject_plugin_hooks(&mut catalog, config);

        let node_ids: Vec<NodeId> = nodes.iter().map(|node| node.id.clone()).collect();
        let default_resolver = StandardRoleResolver::new(nodes);
        let (pre_factory, post_factory) = PluginHookFactory::pair(Rc::clone(&self.plugin_hooks));

        let catalog_by_id: IndexMap<TaskId, CatalogTask> = catalog
            .into_iter()
            .map(|task| (task.id.clone(), task))
            .collect();

        let group_members: HashSet<TaskId> = catalog_by_id
            .values()
            .filter(|task| task.task_type == TaskType::Group)
            .flat_map(|task| task.tasks.iter().cloned())
            .collect();

        let mut placement = PlacementMap::new();
        let mut chain_index: HashMap<TaskId, ChainEnds> = HashMap::new();
        let mut visited: HashSet<TaskId> = HashSet::new();

        for task_id in catalog_by_id.keys() {
            if group_members.contains(task_id) {
                continue;
            }
            self.process_task(
                task_id,
                &catalog_by_id,
                cluster,
                &node_ids,
                &default_resolver,
                &pre_factory,
                &post_factory,
                &mut placement,
                &mut chain_index,
                &mut visited,
                &mut trace,
                config,
            )?;
        }

        materialize_same_node(&mut placement, &chain_index, &mut trace);
        materialize_cross_node(&mut placement, &chain_index, &default_resolver, &mut trace);

        Ok((placement, trace))
    }

    #[allow(
        clippy::too_many_arguments,
        reason = "Each parameter is a distinct piece of per-call context; bundling them into a \
                  struct would only move the same count into field access without reducing it."
    )]
    fn process_task(
        &self,
        task_id: &TaskId,
        catalog_by_id: &IndexMap<TaskId, CatalogTask>,
        cluster: &C,
        node_ids: &[NodeId],
        resolver: &dyn RoleResolver,
        pre_factory: &PluginHookFactory<C>,
        post_factory: &PluginHookFactory<C>,
        placement: &mut PlacementMap,
        chain_index: &mut HashMap<TaskId, ChainEnds>,
        visited: &mut HashSet<TaskId>,
        trace: &mut GraphTrace,
        config: &GraphSerializerConfig,
    ) -> Result<(), GraphError> {
        if !visited.insert(task_id.clone()) {
            return Ok(());
        }

        let Some(task) = catalog_by_id.get(task_id) else {
            return Ok(());
        };

        if task.task_type == TaskType::Group {
            let selector = task.effective_role_selector().cloned().unwrap_or(RoleSelector::All);
            let group_nodes = resolver.resolve(&selector, ResolvePolicy::All);
            let group_resolver = NullResolver::new(group_nodes);

            for member_id in &task.tasks {
                if !catalog_by_id.contains_key(member_id) {
                    return Err(GraphError::UnknownGroupMember {
                        group_id: task_id.to_string(),
                        member_id: member_id.to_string(),
                    });
                }
                self.process_task(
                    member_id,
                    catalog_by_id,
                    cluster,
                    node_ids,
                    &group_resolver,
                    pre_factory,
                    post_factory,
                    placement,
                    chain_index,
                    visited,
                    trace,
                    config,
                )?;
            }
            return Ok(());
        }

        let resolver_box = resolver.boxed_clone();
        let raw = match task.task_type {
            TaskType::PluginPreDeploymentHook => {
                pre_factory.build(task, cluster, node_ids, resolver_box).serialize()
            }
            TaskType::PluginPostDeploymentHook => {
                post_factory.build(task, cluster, node_ids, resolver_box).serialize()
            }
            _ => match self.registry.factory_for(&task.task_type) {
                Some(factory) => factory.build(task, cluster, node_ids, resolver_box).serialize(),
                None => NoopSerializerFactory
                    .build(task, cluster, node_ids, resolver_box)
                    .serialize(),
            },
        };

        if raw.is_empty() {
            return Ok(());
        }

        version_gate::check(task, config)?;

        let mut chained = ChainBuilder::build(task, raw, trace);
        if let Some(first) = chained.first() {
            if let Some(last) = chained.last() {
                chain_index.insert(
                    task_id.clone(),
                    ChainEnds {
                        start: first.id.clone(),
                        end: last.id.clone(),
                    },
                );
            }
        }

        for record in &mut chained {
            record.requires.append(&mut record.requires_ex);
            record.required_for.append(&mut record.required_for_ex);
        }

        for record in chained {
            place_record(placement, record, trace);
        }

        Ok(())
    }
}

// ============================================================================
// SECTION: Placement
// ============================================================================

/// Places `record` into every node bucket named by its `uids`, applying the
/// update policy per bucket: a record with no existing placement is placed
/// outright; one with the same id and the same type keeps the existing
/// placement; one with the same id and a different type replaces it, unless
/// the new record's type is itself `skipped` (§4.8). A record with no
/// `uids` entries at all is placed once, in the null bucket.
fn place_record(placement: &mut PlacementMap, record: OutputRecord, trace: &mut GraphTrace) {
    if record.uids.is_empty() {
        place_one(placement, None, record, trace);
        return;
    }

    let targets = record.uids.clone();
    let mut targets = targets.into_iter();
    let last = targets.next_back();
    for node_id in targets {
        place_one(placement, node_id, record.clone(), trace);
    }
    if let Some(node_id) = last {
        place_one(placement, node_id, record, trace);
    }
}

/// Places `record` into the single bucket named by `node_id`.
fn place_one(
    placement: &mut PlacementMap,
    node_id: Option<NodeId>,
    record: OutputRecord,
    trace: &mut GraphTrace,
) {
    let bucket = placement.entry(node_id.clone()).or_default();

    match bucket.get(&record.id) {
        None => {
            bucket.insert(record.id.clone(), record);
        }
        Some(existing) if existing.record_type == record.record_type => {}
        Some(_) if record.record_type != TaskType::Skipped => {
            trace.record(TraceEvent::SkipOverridden {
                node_id,
                task_id: record.id.clone(),
            });
            bucket.insert(record.id.clone(), record);
        }
        Some(_) => {}
    }
}

// ============================================================================
// SECTION: Same-Node Dependency Materialization
// ============================================================================

/// Resolves every placed record's same-node `requires`/`required_for` name
/// references in place, searching each node's own bucket plus the null
/// bucket (§4.6).
fn materialize_same_node(
    placement: &mut PlacementMap,
    chain_index: &HashMap<TaskId, ChainEnds>,
    trace: &mut GraphTrace,
) {
    let node_keys: Vec<Option<NodeId>> = placement.keys().cloned().collect();

    for node_id in &node_keys {
        let task_ids: Vec<TaskId> = placement[node_id].keys().cloned().collect();

        for task_id in task_ids {
            let (requires_refs, required_for_refs) = {
                let record = &placement[node_id][&task_id];
                (record.requires_refs.clone(), record.required_for_refs.clone())
            };

            for reference in &requires_refs {
                let matches = find_same_node_matches(placement, node_id, reference, chain_index, false);
                if matches.is_empty() {
                    trace.record(TraceEvent::UnresolvedDependency {
                        node_id: node_id.clone(),
                        reference: reference.clone(),
                    });
                }
                if let Some(bucket) = placement.get_mut(node_id) {
                    if let Some(record) = bucket.get_mut(&task_id) {
                        for edge in matches {
                            if !record.requires.contains(&edge) {
                                record.requires.push(edge);
                            }
                        }
                    }
                }
            }

            for reference in &required_for_refs {
                let matches = find_same_node_matches(placement, node_id, reference, chain_index, true);
                if matches.is_empty() {
                    trace.record(TraceEvent::UnresolvedDependency {
                        node_id: node_id.clone(),
                        reference: reference.clone(),
                    });
                }
                if let Some(bucket) = placement.get_mut(node_id) {
                    if let Some(record) = bucket.get_mut(&task_id) {
                        for edge in matches {
                            if !record.required_for.contains(&edge) {
                                record.required_for.push(edge);
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Resolves one same-node reference against `[node_id, null bucket]`,
/// attaching pattern matches to the chain end appropriate for the
/// reference's direction (`is_required_for` attaches to the chain start,
/// a plain `requires` reference attaches to the chain end).
fn find_same_node_matches(
    placement: &PlacementMap,
    node_id: &Option<NodeId>,
    reference: &str,
    chain_index: &HashMap<TaskId, ChainEnds>,
    is_required_for: bool,
) -> Vec<DependencyEdge> {
    let Ok(name_ref) = NameRef::compile(reference) else {
        return Vec::new();
    };

    let search_buckets: Vec<&Option<NodeId>> = if node_id.is_some() {
        vec![node_id, &None]
    } else {
        vec![&None]
    };

    let mut matches = Vec::new();
    for bucket_key in search_buckets {
        let Some(bucket) = placement.get(bucket_key) else {
            continue;
        };
        for id in bucket.keys() {
            if name_ref.matches(id.as_str()) {
                matches.push(DependencyEdge {
                    name: id.clone(),
                    node_id: bucket_key.clone(),
                });
            }
        }
        if let Some(literal) = name_ref.as_literal() {
            if !bucket.contains_key(&TaskId::new(literal)) {
                if let Some(ends) = chain_index.get(&TaskId::new(literal)) {
                    let attach = if is_required_for { &ends.start } else { &ends.end };
                    if bucket.contains_key(attach) {
                        matches.push(DependencyEdge {
                            name: attach.clone(),
                            node_id: bucket_key.clone(),
                        });
                    }
                }
            }
        }
    }
    matches
}

// ============================================================================
// SECTION: Cross-Node Dependency Materialization
// ============================================================================

/// Resolves every placed record's `cross-depends`/`cross-depended-by`
/// references in place, after the version gate has already run (§4.7).
fn materialize_cross_node(
    placement: &mut PlacementMap,
    chain_index: &HashMap<TaskId, ChainEnds>,
    resolver: &dyn RoleResolver,
    trace: &mut GraphTrace,
) {
    let node_keys: Vec<Option<NodeId>> = placement.keys().cloned().collect();

    for node_id in &node_keys {
        let task_ids: Vec<TaskId> = placement[node_id].keys().cloned().collect();

        for task_id in task_ids {
            let (cross_depends, cross_depended_by) = {
                let record = &placement[node_id][&task_id];
                (record.cross_depends.clone(), record.cross_depended_by.clone())
            };

            for cross_ref in &cross_depends {
                let matches = resolve_cross_reference(
                    placement,
                    node_id,
                    cross_ref,
                    chain_index,
                    resolver,
                    false,
                );
                if matches.is_empty() {
                    trace.record(TraceEvent::UnresolvedDependency {
                        node_id: node_id.clone(),
                        reference: cross_ref.name.clone(),
                    });
                }
                if let Some(bucket) = placement.get_mut(node_id) {
                    if let Some(record) = bucket.get_mut(&task_id) {
                        for edge in matches {
                            if !record.requires.contains(&edge) {
                                record.requires.push(edge);
                            }
                        }
                    }
                }
            }

            for cross_ref in &cross_depended_by {
                let matches = resolve_cross_reference(
                    placement,
                    node_id,
                    cross_ref,
                    chain_index,
                    resolver,
                    true,
                );
                if matches.is_empty() {
                    trace.record(TraceEvent::UnresolvedDependency {
                        node_id: node_id.clone(),
                        reference: cross_ref.name.clone(),
                    });
                }
                if let Some(bucket) = placement.get_mut(node_id) {
                    if let Some(record) = bucket.get_mut(&task_id) {
                        for edge in matches {
                            if !record.required_for.contains(&edge) {
                                record.required_for.push(edge);
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Resolves one cross-node reference: `self` restricts the search to the
/// dependent's own node, `all` (or no role) searches every node, and any
/// other selector is resolved through `resolver` under the reference's
/// policy (default `all`).
fn resolve_cross_reference(
    placement: &PlacementMap,
    from_node: &Option<NodeId>,
    cross_ref: &CrossDependencyRef,
    chain_index: &HashMap<TaskId, ChainEnds>,
    resolver: &dyn RoleResolver,
    is_required_for: bool,
) -> Vec<DependencyEdge> {
    let Ok(name_ref) = NameRef::compile(&cross_ref.name) else {
        return Vec::new();
    };
    let policy = cross_ref.policy.unwrap_or_default();

    let candidate_nodes: Vec<Option<NodeId>> = match &cross_ref.role {
        Some(RoleSelector::SelfRole) => vec![from_node.clone()],
        Some(RoleSelector::All) | None => placement.keys().cloned().collect(),
        Some(selector) => {
            let resolved = resolver.resolve(selector, policy);
            resolved.into_iter().map(Some).collect()
        }
    };

    let mut matches = Vec::new();
    for node_key in candidate_nodes {
        let Some(bucket) = placement.get(&node_key) else {
            continue;
        };
        for id in bucket.keys() {
            if name_ref.matches(id.as_str()) {
                matches.push(DependencyEdge {
                    name: id.clone(),
                    node_id: node_key.clone(),
                });
            }
        }
        if let Some(literal) = name_ref.as_literal() {
            if !bucket.contains_key(&TaskId::new(literal)) {
                if let Some(ends) = chain_index.get(&TaskId::new(literal)) {
                    let attach = if is_required_for { &ends.start } else { &ends.end };
                    if bucket.contains_key(attach) {
                        matches.push(DependencyEdge {
                            name: attach.clone(),
                            node_id: node_key.clone(),
                        });
                    }
                }
            }
        }
    }
    matches
}
