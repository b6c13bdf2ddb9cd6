// deploy-graph-core/src/runtime/role_resolver.rs
// ============================================================================
// Module: Role Resolver
// Description: Resolves a role selector against the node inventory.
// Purpose: Turn a RoleSelector + ResolvePolicy into a concrete node id list.
// Dependencies: crate::core::{identifiers, model}
// ============================================================================

//! ## Overview
//! A resolver answers one question: given a [`RoleSelector`] and a
//! [`ResolvePolicy`], which node ids match? [`StandardRoleResolver`] answers
//! it against the full node inventory, in the order nodes were supplied.
//! [`NullResolver`] instead ignores the selector entirely and always returns
//! a pre-bound set; group expansion (§4.5) uses it to make every member task
//! resolve against the group's already-resolved node set rather than its own
//! `role` field.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::identifiers::NodeId;
use crate::core::model::Node;
use crate::core::model::ResolvePolicy;
use crate::core::model::RoleSelector;

// ============================================================================
// SECTION: Role Resolver Trait
// ============================================================================

/// Resolves a role selector to a concrete, ordered list of node ids.
pub trait RoleResolver {
    /// Returns the node ids matching `selector` under `policy`.
    ///
    /// Order is the resolver's node-inventory order; [`ResolvePolicy::Any`]
    /// narrows the result to its first element.
    fn resolve(&self, selector: &RoleSelector, policy: ResolvePolicy) -> Vec<NodeId>;

    /// Returns a boxed clone of this resolver, so one `&dyn RoleResolver`
    /// borrow can be turned into the owned `Box<dyn RoleResolver>` a
    /// [`crate::interfaces::SerializerFactory`] expects.
    fn boxed_clone(&self) -> Box<dyn RoleResolver>;
}

// ============================================================================
// SECTION: Standard Role Resolver
// ============================================================================

/// Resolves selectors against a fixed node inventory, in inventory order.
#[derive(Debug, Clone)]
pub struct StandardRoleResolver {
    /// Node inventory, in the order resolution iterates and `Any` picks from.
    nodes: Vec<Node>,
}

impl StandardRoleResolver {
    /// Creates a resolver over the given node inventory.
    ///
    /// The inventory's order is preserved and used as the resolver's stable
    /// ordering for [`ResolvePolicy::Any`].
    #[must_use]
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    fn matches(&self, selector: &RoleSelector, node: &Node) -> bool {
        match selector {
            RoleSelector::Role(role) => node.has_role(role),
            RoleSelector::Roles(roles) => roles.iter().any(|role| node.has_role(role)),
            RoleSelector::All => true,
            // `self` only makes sense relative to a dependent task's own
            // node; a standard resolver has no such context and treats it
            // as matching nothing, the caller is expected to special-case it
            // before reaching the resolver (see `runtime::serializer`).
            RoleSelector::SelfRole => false,
        }
    }
}

impl RoleResolver for StandardRoleResolver {
    fn resolve(&self, selector: &RoleSelector, policy: ResolvePolicy) -> Vec<NodeId> {
        let matching = self
            .nodes
            .iter()
            .filter(|node| self.matches(selector, node))
            .map(|node| node.id.clone());

        match policy {
            ResolvePolicy::All => matching.collect(),
            ResolvePolicy::Any => matching.take(1).collect(),
        }
    }

    fn boxed_clone(&self) -> Box<dyn RoleResolver> {
        Box::new(self.clone())
    }
}

// ============================================================================
// SECTION: Null Resolver
// ============================================================================

/// A resolver that ignores its selector and policy, returning a pinned set.
///
/// Used when a group task has already resolved its role selector to a node
/// set and member tasks must resolve against that same set regardless of
/// their own `role` field (§4.5).
#[derive(Debug, Clone)]
pub struct NullResolver {
    /// The fixed node id set returned regardless of selector or policy.
    pinned: Vec<NodeId>,
}

impl NullResolver {
    /// Creates a resolver pinned to the given node id set.
    #[must_use]
    pub fn new(pinned: Vec<NodeId>) -> Self {
        Self { pinned }
    }
}

impl RoleResolver for NullResolver {
    fn resolve(&self, _selector: &RoleSelector, _policy: ResolvePolicy) -> Vec<NodeId> {
        self.pinned.clone()
    }

    fn boxed_clone(&self) -> Box<dyn RoleResolver> {
        Box::new(self.clone())
    }
}
