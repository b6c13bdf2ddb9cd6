// deploy-graph-core/src/runtime/preprocessor.rs
// ============================================================================
// Module: Plugin Hook Preprocessor
// Description: Injects synthetic plugin pre/post deployment hook anchors.
// Purpose: Wire `plugin_pre_deployment_hook`/`plugin_post_deployment_hook`
//          catalog tasks into the stage graph before the run proper (§4.3, §6).
// Dependencies: crate::{config, core, interfaces, runtime::role_resolver}
// ============================================================================

//! ## Overview
//! Plugins contribute deployment hooks that must run before the first real
//! deployment task and after the last one, without the catalog author having
//! to hand-wire every task to them. This module appends two synthetic
//! catalog tasks, `plugin_pre_deployment_hook` and
//! `plugin_post_deployment_hook`, anchored onto the well-known
//! `pre_deployment_end`/`deploy_start`/`post_deployment_end` stage anchor ids
//! via `requires`/`required_for`, and adapts a [`PluginHookSource`] into a
//! [`SerializerFactory`] so the registry can dispatch to it like any other
//! task type.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::rc::Rc;

use serde_json::Map;

use crate::config::GraphSerializerConfig;
use crate::core::identifiers::NodeId;
use crate::core::identifiers::TaskId;
use crate::core::model::TaskType;
use crate::core::record::CatalogTask;
use crate::core::record::OutputRecord;
use crate::interfaces::PluginHookSource;
use crate::interfaces::SerializerFactory;
use crate::interfaces::TaskSerializer;
use crate::runtime::role_resolver::RoleResolver;

/// Stage id that every deployment graph begins with.
pub const DEPLOY_START_ID: &str = "deploy_start";
/// Anchor id marking the end of the `pre_deployment` stage.
pub const PRE_DEPLOYMENT_END_ID: &str = "pre_deployment_end";
/// Anchor id marking the end of the `post_deployment` stage.
pub const POST_DEPLOYMENT_END_ID: &str = "post_deployment_end";

// ============================================================================
// SECTION: Catalog Injection
// ============================================================================

/// Appends the synthetic pre/post deployment hook tasks to `catalog`.
///
/// The pre-hook declares `requires: [pre_deployment_end]` so it runs only
/// after the `pre_deployment` stage has finished, and `required_for:
/// [deploy_start]` so the deploy stage waits on it. The post-hook declares
/// `requires: [post_deployment_end]` so it runs after the `post_deployment`
/// stage. Both declare a version equal to the configured cross-dependency
/// threshold so they are always eligible for cross-node wiring regardless of
/// catalog defaults.
pub fn inject_plugin_hooks(catalog: &mut Vec<CatalogTask>, config: &GraphSerializerConfig) {
    let version = config.min_cross_dependency_version.to_display_string();

    catalog.push(CatalogTask {
        id: TaskId::new(TaskType::PLUGIN_PRE_DEPLOYMENT_HOOK),
        task_type: TaskType::PluginPreDeploymentHook,
        version: version.clone(),
        role: None,
        groups: None,
        tasks: Vec::new(),
        requires: vec![PRE_DEPLOYMENT_END_ID.to_owned()],
        required_for: vec![DEPLOY_START_ID.to_owned()],
        cross_depends: Vec::new(),
        cross_depended_by: Vec::new(),
        skipped: None,
        extra: Map::new(),
    });

    catalog.push(CatalogTask {
        id: TaskId::new(TaskType::PLUGIN_POST_DEPLOYMENT_HOOK),
        task_type: TaskType::PluginPostDeploymentHook,
        version,
        role: None,
        groups: None,
        tasks: Vec::new(),
        requires: vec![POST_DEPLOYMENT_END_ID.to_owned()],
        required_for: Vec::new(),
        cross_depends: Vec::new(),
        cross_depended_by: Vec::new(),
        skipped: None,
        extra: Map::new(),
    });
}

// ============================================================================
// SECTION: Plugin Hook Serializer Factory
// ============================================================================

/// Direction a [`PluginHookSource`] is being adapted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HookDirection {
    /// Serves `begin_tasks` for the pre-deployment anchor.
    Pre,
    /// Serves `end_tasks` for the post-deployment anchor.
    Post,
}

/// Adapts a [`PluginHookSource`] into a [`SerializerFactory`] so the
/// registry can dispatch `plugin_pre_deployment_hook`/
/// `plugin_post_deployment_hook` catalog tasks to it.
pub struct PluginHookFactory<C> {
    /// Shared plugin hook source, one instance for both directions.
    source: Rc<dyn PluginHookSource<C>>,
    /// Which side of the source this factory instance serves.
    direction: HookDirection,
}

impl<C> PluginHookFactory<C> {
    /// Builds the factory pair for `source`: pre-deployment then
    /// post-deployment, in that order, ready to be registered under
    /// [`TaskType::PLUGIN_PRE_DEPLOYMENT_HOOK`] and
    /// [`TaskType::PLUGIN_POST_DEPLOYMENT_HOOK`] respectively.
    #[must_use]
    pub fn pair(source: Rc<dyn PluginHookSource<C>>) -> (Self, Self) {
        (
            Self {
                source: Rc::clone(&source),
                direction: HookDirection::Pre,
            },
            Self {
                source,
                direction: HookDirection::Post,
            },
        )
    }
}

impl<C> SerializerFactory<C> for PluginHookFactory<C> {
    fn build(
        &self,
        task: &CatalogTask,
        cluster: &C,
        nodes: &[NodeId],
        resolver: Box<dyn RoleResolver>,
    ) -> Box<dyn TaskSerializer> {
        let records = match self.direction {
            HookDirection::Pre => self.source.begin_tasks(cluster, nodes, resolver.as_ref()),
            HookDirection::Post => self.source.end_tasks(cluster, nodes, resolver.as_ref()),
        };
        Box::new(PluginHookSerializer {
            task_id: task.id.clone(),
            skipped: task.skipped.unwrap_or(false),
            records,
        })
    }
}

/// Serializer bound to one plugin hook anchor's precomputed records.
struct PluginHookSerializer {
    /// Id of the anchor catalog task, used as the skip-placeholder id.
    task_id: TaskId,
    /// Whether the anchor catalog task was flagged `skipped`.
    skipped: bool,
    /// Records already produced by the plugin hook source.
    records: Vec<OutputRecord>,
}

impl TaskSerializer for PluginHookSerializer {
    fn should_execute(&self) -> bool {
        !self.skipped && !self.records.is_empty()
    }

    fn serialize(&self) -> Vec<OutputRecord> {
        if self.should_execute() {
            self.records.clone()
        } else {
            vec![OutputRecord::new(
                self.task_id.clone(),
                TaskType::Skipped,
                vec![None],
            )]
        }
    }
}
