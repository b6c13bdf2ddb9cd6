// deploy-graph-core/src/config.rs
// ============================================================================
// Module: Deploy Graph Serializer Configuration
// Description: The one runtime-tunable knob the pipeline has.
// Purpose: Carry the cross-dependency version threshold per run.
// Dependencies: crate::core::version
// ============================================================================

//! ## Overview
//! Configuration is constructed once per call to the top-level `serialize`
//! entry point and never mutated mid-run (§5). Today it carries a single
//! field; it is a struct rather than a bare argument so a future knob (for
//! example, a different chain-id suffix scheme) can be added without
//! breaking the entry point's signature.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::version::Version;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for one [`crate::runtime::serializer::GraphSerializer`] run.
#[derive(Debug, Clone, Copy)]
pub struct GraphSerializerConfig {
    /// Minimum declared task version that may participate in cross-dependency
    /// wiring (§4.7). Tasks of type `stage` bypass this check entirely.
    pub min_cross_dependency_version: Version,
}

impl Default for GraphSerializerConfig {
    fn default() -> Self {
        Self {
            min_cross_dependency_version: Version::from_components([2, 0, 0]),
        }
    }
}
