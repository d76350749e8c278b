//! Activating and deactivating a layout tree
//!
//! ## Two-Phase Activation
//!
//! A relation may tie together two elements that are far apart in the tree,
//! e.g. a deeply nested element pinned to an anchor of a distant ancestor.
//! The layout system accepts such a constraint only once both elements share
//! a common container. Activation therefore runs two passes over the whole
//! subtree and never interleaves them:
//!
//! 1. **Composition**: insert every child's element into its parent's
//!    element (pre-order), turning off the child's intrinsic frame
//! 2. **Resolution**: resolve every node's self-relations, then each child's
//!    parent-relations against the parent element, recursively
//!
//! Deactivation mirrors both effects per node.

use tracing::{debug, trace};

use crate::backend::LayoutBackend;
use crate::relation::{ParentRelation, SelfRelation};

use super::Node;

impl<B: LayoutBackend> Node<B> {
    /// Build the element hierarchy, then resolve every relation in the tree.
    ///
    /// Errors come from the backend rejecting a constraint and are returned
    /// as-is; elements composed so far stay composed.
    ///
    /// # Panics
    ///
    /// Panics if a node with children has an unconfigured containment
    /// strategy.
    pub fn activate(&self, backend: &mut B) -> Result<&Self, B::Error> {
        debug!(root = ?self.element, nodes = self.node_count(), "activating layout tree");
        self.compose(backend);
        self.resolve(backend)?;
        Ok(self)
    }

    /// Revert every relation in the tree and detach every child element.
    ///
    /// Children that are not attached to their node's parent element are left
    /// alone, so deactivating an inactive tree changes nothing.
    pub fn deactivate(&self, backend: &mut B) -> &Self {
        debug!(root = ?self.element, "deactivating layout tree");
        self.dismantle(backend);
        self
    }

    /// Ask the backend to measure the tree again
    pub fn invalidate(&self, backend: &mut B) -> &Self {
        backend.invalidate(self.element);
        self
    }

    fn compose(&self, backend: &mut B) {
        for child in self.children.iter() {
            trace!(parent = ?self.element, child = ?child.element, "composing");
            backend.set_intrinsic_frame(child.element, false);
            self.containment.contain(backend, self.element, child);
            child.compose(backend);
        }
    }

    fn resolve(&self, backend: &mut B) -> Result<(), B::Error> {
        self.self_relations.resolve(backend)?;
        for child in self.children.iter() {
            trace!(parent = ?self.element, child = ?child.element, "resolving");
            child.parent_relations.resolve(backend, self.element)?;
            child.resolve(backend)?;
        }
        Ok(())
    }

    fn dismantle(&self, backend: &mut B) {
        self.self_relations.revert(backend);
        for child in self.children.iter() {
            child.dismantle(backend);
            child.parent_relations.revert(backend, self.element);
            if backend.remove_child(self.element, child.element) {
                backend.set_intrinsic_frame(child.element, true);
            }
        }
    }
}
