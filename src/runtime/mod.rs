// deploy-graph-core/src/runtime/mod.rs
// ============================================================================
// Module: Deploy Graph Runtime
// Description: The executable pipeline: resolution, chaining, dispatch, trace.
// Purpose: Wire the core types and external interfaces into one serialize() call.
// Dependencies: crate::{core, interfaces, config, error}
// ============================================================================

//! ## Overview
//! The runtime module contains every stateful or sequencing concern of the
//! pipeline described in the overview: role resolution, name matching,
//! serializer dispatch, chain building, version gating, plugin hook
//! injection, dependency materialization, and run tracing. None of it is
//! reachable without going through [`serializer::GraphSerializer`].

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod name_matcher;
pub mod preprocessor;
pub mod processor;
pub mod registry;
pub mod role_resolver;
pub mod serializer;
pub mod trace;
pub mod version_gate;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use name_matcher::NameRef;
pub use preprocessor::PluginHookFactory;
pub use processor::ChainBuilder;
pub use registry::NoopSerializerFactory;
pub use registry::SerializerRegistry;
pub use role_resolver::NullResolver;
pub use role_resolver::RoleResolver;
pub use role_resolver::StandardRoleResolver;
pub use serializer::GraphSerializer;
pub use serializer::PlacementMap;
pub use trace::GraphTrace;
pub use trace::TraceEvent;
