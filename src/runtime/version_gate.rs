// deploy-graph-core/src/runtime/version_gate.rs
// ============================================================================
// Module: Version Gate
// Description: Enforces the minimum catalog task version for cross-dependencies.
// Purpose: Reject non-stage tasks whose declared version is too old to
//          participate in cross-node wiring (§4.7).
// Dependencies: crate::{config, core, error}
// ============================================================================

//! ## Overview
//! Every non-`stage` catalog task must declare a version at least as new as
//! [`crate::config::GraphSerializerConfig::min_cross_dependency_version`] to
//! take part in cross-dependency resolution. `stage` tasks are anchors, not
//! deployable units, and bypass the check unconditionally.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::config::GraphSerializerConfig;
use crate::core::record::CatalogTask;
use crate::core::model::TaskType;
use crate::error::GraphError;

// ============================================================================
// SECTION: Gate
// ============================================================================

/// Checks `task` against `config`'s cross-dependency version threshold.
///
/// # Errors
///
/// Returns [`GraphError::InvalidVersion`] when the declared version does not
/// parse as dotted-numeric, or [`GraphError::TaskVersionUnsupported`] when it
/// parses but falls below the configured threshold.
pub fn check(task: &CatalogTask, config: &GraphSerializerConfig) -> Result<(), GraphError> {
    if task.task_type == TaskType::Stage {
        return Ok(());
    }

    let version = task
        .parsed_version()
        .map_err(|_| GraphError::InvalidVersion {
            task_id: task.id.to_string(),
            version: task.version.clone(),
        })?;

    if version < config.min_cross_dependency_version {
        return Err(GraphError::TaskVersionUnsupported {
            task_id: task.id.to_string(),
            version: task.version.clone(),
        });
    }

    Ok(())
}
