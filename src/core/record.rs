// deploy-graph-core/src/core/record.rs
// ============================================================================
// Module: Catalog Task and Output Record
// Description: The open input record and the per-node output record it expands into.
// Purpose: Carry dependency references through chain-building and materialization.
// Dependencies: crate::core::{identifiers, model}, serde, serde_json
// ============================================================================

//! ## Overview
//! [`CatalogTask`] is the open, catalog-facing input record (§3). Unknown
//! fields are preserved in `extra` so catalog authors can attach
//! implementation-specific metadata a specific serializer understands.
//!
//! [`OutputRecord`] is the single record type threaded through the whole
//! pipeline: the chain builder ([`crate::runtime::processor`]) fills in the
//! unresolved `requires`/`required_for` name references and the already
//! node-resolved `requires_ex`/`required_for_ex` chain edges; dependency
//! materialization ([`crate::runtime::serializer`]) later folds all four
//! into the two public, resolved `requires`/`required_for` edge lists and
//! clears the transient fields (§4.6).

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::core::identifiers::NodeId;
use crate::core::identifiers::TaskId;
use crate::core::model::ResolvePolicy;
use crate::core::model::RoleSelector;
use crate::core::model::TaskType;
use crate::core::version::Version;

// ============================================================================
// SECTION: Cross-Dependency Reference
// ============================================================================

/// One entry of a `cross-depends`/`cross-depended-by` list on a catalog task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossDependencyRef {
    /// Name (literal or pattern) of the referenced task.
    pub name: String,
    /// Role selector restricting which nodes are searched; defaults to `all`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<RoleSelector>,
    /// Resolve policy applied to `role`; defaults to `all`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<ResolvePolicy>,
}

// ============================================================================
// SECTION: Catalog Task
// ============================================================================

/// The default catalog task version when the field is absent.
pub const DEFAULT_TASK_VERSION: &str = "1.0.0";

/// An open, catalog-facing input record (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogTask {
    /// Task identifier, unique within the catalog.
    pub id: TaskId,
    /// Task type, dispatched to a serializer by the registry.
    #[serde(rename = "type")]
    pub task_type: TaskType,
    /// Declared catalog version; gates cross-dependency participation (§4.7).
    #[serde(default = "default_task_version")]
    pub version: String,
    /// Role selector for non-group tasks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<RoleSelector>,
    /// Role selector used instead of `role` when both could apply (§4.3).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<RoleSelector>,
    /// Member task ids, meaningful only when `type` is `group`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<TaskId>,
    /// Same-node dependency references (this task depends on these).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<String>,
    /// Same-node dependency references (these depend on this task).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_for: Vec<String>,
    /// Cross-node dependency references (this task depends on these).
    #[serde(
        rename = "cross-depends",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub cross_depends: Vec<CrossDependencyRef>,
    /// Cross-node dependency references (these depend on this task).
    #[serde(
        rename = "cross-depended-by",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub cross_depended_by: Vec<CrossDependencyRef>,
    /// Explicit skip flag; consumed (removed) during placement (§4.5).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skipped: Option<bool>,
    /// Catalog-specific fields this core does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Default value for [`CatalogTask::version`] when the field is absent.
fn default_task_version() -> String {
    DEFAULT_TASK_VERSION.to_owned()
}

impl CatalogTask {
    /// Returns the declared version, parsed for the version gate (§4.7).
    ///
    /// # Errors
    ///
    /// Returns [`crate::core::version::VersionParseError`] when `version` is
    /// not dotted-numeric.
    pub fn parsed_version(&self) -> Result<Version, crate::core::version::VersionParseError> {
        Version::parse(&self.version)
    }

    /// Returns the effective role selector: `groups` when present, else `role`.
    #[must_use]
    pub fn effective_role_selector(&self) -> Option<&RoleSelector> {
        self.groups.as_ref().or(self.role.as_ref())
    }
}

// ============================================================================
// SECTION: Dependency Edge
// ============================================================================

/// A materialized dependency edge: "the record named `name` placed at
/// `node_id`".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    /// Id of the resolved dependency record.
    pub name: TaskId,
    /// Node the resolved dependency record is placed at.
    pub node_id: Option<NodeId>,
}

// ============================================================================
// SECTION: Output Record
// ============================================================================

/// A record produced by a serializer, wrapped into chain form by the task
/// processor, and finally materialized by the graph serializer.
///
/// Fields are grouped by pipeline phase: `uids` is consumed at placement;
/// the `*_refs`/`cross_*` fields are consumed at dependency materialization;
/// `requires`/`required_for` hold the final, resolved edges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputRecord {
    /// Record identifier (the origin id, or a chain-derived id).
    pub id: TaskId,
    /// Record type; overwritten with `skipped` when the placement is inactive.
    #[serde(rename = "type")]
    pub record_type: TaskType,
    /// Target node ids; consumed (cleared) once the record is placed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub uids: Vec<Option<NodeId>>,
    /// Unresolved same-node `requires` name references.
    #[serde(skip)]
    pub requires_refs: Vec<String>,
    /// Unresolved same-node `required_for` name references.
    #[serde(skip)]
    pub required_for_refs: Vec<String>,
    /// Unresolved cross-node `cross-depends` references.
    #[serde(skip)]
    pub cross_depends: Vec<CrossDependencyRef>,
    /// Unresolved cross-node `cross-depended-by` references.
    #[serde(skip)]
    pub cross_depended_by: Vec<CrossDependencyRef>,
    /// Already-resolved intra-chain `requires` edges (§4.4).
    #[serde(skip)]
    pub requires_ex: Vec<DependencyEdge>,
    /// Already-resolved intra-chain `required_for` edges (§4.4).
    #[serde(skip)]
    pub required_for_ex: Vec<DependencyEdge>,
    /// Final, materialized `requires` edges.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<DependencyEdge>,
    /// Final, materialized `required_for` edges.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_for: Vec<DependencyEdge>,
    /// Passthrough fields a specific serializer attaches and only it understands.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OutputRecord {
    /// Creates a bare output record with no dependency fields set.
    #[must_use]
    pub fn new(id: TaskId, record_type: TaskType, uids: Vec<Option<NodeId>>) -> Self {
        Self {
            id,
            record_type,
            uids,
            requires_refs: Vec::new(),
            required_for_refs: Vec::new(),
            cross_depends: Vec::new(),
            cross_depended_by: Vec::new(),
            requires_ex: Vec::new(),
            required_for_ex: Vec::new(),
            requires: Vec::new(),
            required_for: Vec::new(),
            extra: Map::new(),
        }
    }
}
