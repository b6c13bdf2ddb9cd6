// deploy-graph-core/src/core/mod.rs
// ============================================================================
// Module: Deploy Graph Core Types
// Description: Canonical topology, selector, catalog, and record types.
// Purpose: Provide stable, serializable types shared by every runtime component.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Core types define the node/role topology, the open catalog task record,
//! and the output record that flows through chain building, placement, and
//! dependency materialization. These types are the canonical source of
//! truth for the runtime pipeline in [`crate::runtime`].

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod identifiers;
pub mod model;
pub mod record;
pub mod version;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use identifiers::NodeId;
pub use identifiers::RoleName;
pub use identifiers::TaskId;
pub use model::Node;
pub use model::ResolvePolicy;
pub use model::RoleSelector;
pub use model::TaskType;
pub use record::CatalogTask;
pub use record::CrossDependencyRef;
pub use record::DependencyEdge;
pub use record::OutputRecord;
pub use record::DEFAULT_TASK_VERSION;
pub use version::Version;
pub use version::VersionParseError;
