// deploy-graph-core/src/error.rs
// ============================================================================
// Module: Deploy Graph Errors
// Description: The single failure surface for a serialization run.
// Purpose: Give every fatal condition a typed, attributable representation.
// Dependencies: crate::interfaces, thiserror
// ============================================================================

//! ## Overview
//! A serialization run either succeeds with a complete placement map or
//! fails with one of the conditions below (§7). There is no partial output:
//! any error aborts the run.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::interfaces::SerializerError;

// ============================================================================
// SECTION: Graph Error
// ============================================================================

/// The failure surface for [`crate::runtime::serializer::GraphSerializer::serialize`].
#[derive(Debug, Clone, Error)]
pub enum GraphError {
    /// A non-stage task declared a version below the cross-dependency threshold.
    #[error("task '{task_id}' does not support cross-dependencies (version {version})")]
    TaskVersionUnsupported {
        /// Id of the offending task.
        task_id: String,
        /// The task's declared version string.
        version: String,
    },
    /// A group task referenced a sub-task id absent from the catalog.
    #[error("group '{group_id}' references unknown task '{member_id}'")]
    UnknownGroupMember {
        /// Id of the group task.
        group_id: String,
        /// Id of the missing member task.
        member_id: String,
    },
    /// A declared task version could not be parsed as dotted-numeric.
    #[error("task '{task_id}' has an unparseable version '{version}'")]
    InvalidVersion {
        /// Id of the offending task.
        task_id: String,
        /// The unparseable version string.
        version: String,
    },
    /// An external serializer reported an error while serializing a task.
    #[error("serializer failed for task '{task_id}': {source}")]
    Serializer {
        /// Id of the task being serialized when the error occurred.
        task_id: String,
        /// The underlying serializer error.
        #[source]
        source: SerializerError,
    },
}
