// deploy-graph-core/src/core/model.rs
// ============================================================================
// Module: Deploy Graph Topology and Selector Model
// Description: Nodes, role selectors, resolve policy, and task type classification.
// Purpose: Provide the input-facing types the pipeline resolves against.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! The topology model is intentionally small: a node is just an id plus a
//! set of role names, and a role selector is one of the four forms the
//! orchestrator's task catalog actually uses (a single role, a list of
//! roles, the `all` wildcard, or `self`, valid only inside cross-dependency
//! selectors).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::RoleName;

// ============================================================================
// SECTION: Node
// ============================================================================

/// A cluster node tagged with the roles it carries.
///
/// Inventory is fixed for the duration of one serialization run; the core
/// never mutates a [`Node`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Node identifier.
    pub id: crate::core::identifiers::NodeId,
    /// Roles carried by this node.
    pub roles: BTreeSet<RoleName>,
}

impl Node {
    /// Creates a new node with the given id and roles.
    #[must_use]
    pub fn new(
        id: impl Into<crate::core::identifiers::NodeId>,
        roles: impl IntoIterator<Item = RoleName>,
    ) -> Self {
        Self {
            id: id.into(),
            roles: roles.into_iter().collect(),
        }
    }

    /// Returns whether this node carries the given role.
    #[must_use]
    pub fn has_role(&self, role: &RoleName) -> bool {
        self.roles.contains(role)
    }
}

// ============================================================================
// SECTION: Role Selector
// ============================================================================

/// A role selector as it appears on a catalog task's `role`/`groups` field,
/// or on a cross-dependency entry's `role` field.
///
/// The wire form is either a single string (a literal role name, or the
/// reserved `all`/`self` tokens) or a list of role name strings; `serde`'s
/// `#[serde(untagged)]` cannot tell a plain `Role` string apart from the
/// reserved tokens, so this type is given a hand-written (de)serialization
/// instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleSelector {
    /// A single role name.
    Role(RoleName),
    /// A list of role names; a node matches if it carries any of them.
    Roles(Vec<RoleName>),
    /// The wildcard selector: every node in the inventory.
    All,
    /// Valid only inside a cross-dependency entry: the dependent's own node.
    SelfRole,
}

impl RoleSelector {
    const ALL_TOKEN: &'static str = "all";
    const SELF_TOKEN: &'static str = "self";
}

impl Serialize for RoleSelector {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Role(role) => serializer.serialize_str(role.as_str()),
            Self::Roles(roles) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(roles.len()))?;
                for role in roles {
                    seq.serialize_element(role.as_str())?;
                }
                seq.end()
            }
            Self::All => serializer.serialize_str(Self::ALL_TOKEN),
            Self::SelfRole => serializer.serialize_str(Self::SELF_TOKEN),
        }
    }
}

impl<'de> Deserialize<'de> for RoleSelector {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            One(String),
            Many(Vec<RoleName>),
        }

        Ok(match Wire::deserialize(deserializer)? {
            Wire::One(value) if value == RoleSelector::ALL_TOKEN => RoleSelector::All,
            Wire::One(value) if value == RoleSelector::SELF_TOKEN => RoleSelector::SelfRole,
            Wire::One(value) => RoleSelector::Role(RoleName::new(value)),
            Wire::Many(roles) => RoleSelector::Roles(roles),
        })
    }
}

// ============================================================================
// SECTION: Resolve Policy
// ============================================================================

/// Policy applied when a role selector resolves to multiple candidate nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolvePolicy {
    /// Every matching node.
    All,
    /// A single, deterministically chosen matching node.
    Any,
}

impl Default for ResolvePolicy {
    fn default() -> Self {
        Self::All
    }
}

// ============================================================================
// SECTION: Task Type
// ============================================================================

/// Classification of a catalog task's `type` field.
///
/// Reserved values are given their own variant; anything else is carried as
/// [`TaskType::Custom`] and dispatched through the implementation-provided
/// registry (see [`crate::runtime::registry::SerializerRegistry`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TaskType {
    /// A synchronization anchor; always runs, never gated by a serializer.
    Stage,
    /// A group that propagates its resolved role set to member tasks.
    Group,
    /// A placeholder marking a record as inactive but graph-connected.
    Skipped,
    /// Synthetic pre-deployment plugin hook anchor.
    PluginPreDeploymentHook,
    /// Synthetic post-deployment plugin hook anchor.
    PluginPostDeploymentHook,
    /// Any implementation-defined type, dispatched via the registry.
    Custom(String),
}

impl TaskType {
    /// Canonical wire string for the `stage` type.
    pub const STAGE: &'static str = "stage";
    /// Canonical wire string for the `group` type.
    pub const GROUP: &'static str = "group";
    /// Canonical wire string for the `skipped` type.
    pub const SKIPPED: &'static str = "skipped";
    /// Canonical wire string for the pre-deployment plugin hook type.
    pub const PLUGIN_PRE_DEPLOYMENT_HOOK: &'static str = "plugin_pre_deployment_hook";
    /// Canonical wire string for the post-deployment plugin hook type.
    pub const PLUGIN_POST_DEPLOYMENT_HOOK: &'static str = "plugin_post_deployment_hook";

    /// Returns the canonical wire string for this type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Stage => Self::STAGE,
            Self::Group => Self::GROUP,
            Self::Skipped => Self::SKIPPED,
            Self::PluginPreDeploymentHook => Self::PLUGIN_PRE_DEPLOYMENT_HOOK,
            Self::PluginPostDeploymentHook => Self::PLUGIN_POST_DEPLOYMENT_HOOK,
            Self::Custom(other) => other,
        }
    }
}

impl From<String> for TaskType {
    fn from(value: String) -> Self {
        match value.as_str() {
            Self::STAGE => Self::Stage,
            Self::GROUP => Self::Group,
            Self::SKIPPED => Self::Skipped,
            Self::PLUGIN_PRE_DEPLOYMENT_HOOK => Self::PluginPreDeploymentHook,
            Self::PLUGIN_POST_DEPLOYMENT_HOOK => Self::PluginPostDeploymentHook,
            _ => Self::Custom(value),
        }
    }
}

impl From<&str> for TaskType {
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}

impl From<TaskType> for String {
    fn from(value: TaskType) -> Self {
        value.as_str().to_owned()
    }
}

impl Serialize for TaskType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TaskType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from(raw))
    }
}
