//! Layout tree nodes
//!
//! A [`Node`] pairs an element handle with its children, its deferred
//! relations and the strategy it uses to insert children into its element.
//! Nodes are persistent values: every builder operation returns a new node
//! that shares the untouched parts of the original, which stays valid and
//! inert.

pub mod activation;
pub mod pinnable;

pub use pinnable::Pinnable;

use std::fmt;
use std::rc::Rc;

use crate::backend::LayoutBackend;
use crate::relation::{Relation, SharedParentRelation, SharedSelfRelation};

type ContainFn<B> = dyn Fn(&mut B, <B as LayoutBackend>::Element, &Node<B>);

/// How a node inserts a child's element into its own element
pub enum Containment<B: LayoutBackend> {
    /// Append the child after existing children
    Append,
    /// Caller-supplied insertion, given the parent element and the child node
    Custom(Rc<ContainFn<B>>),
    /// No strategy; containing a child is a programming error
    Unconfigured,
}

impl<B: LayoutBackend> Containment<B> {
    pub fn custom(contain: impl Fn(&mut B, B::Element, &Node<B>) + 'static) -> Self {
        Containment::Custom(Rc::new(contain))
    }

    /// Insert `child` into `parent`.
    ///
    /// # Panics
    ///
    /// Panics when the strategy is [`Containment::Unconfigured`].
    pub fn contain(&self, backend: &mut B, parent: B::Element, child: &Node<B>) {
        match self {
            Containment::Append => backend.add_child(parent, child.element()),
            Containment::Custom(contain) => contain(backend, parent, child),
            Containment::Unconfigured => panic!(
                "no containment strategy configured for {:?}; cannot insert child {:?}",
                parent,
                child.element()
            ),
        }
    }
}

impl<B: LayoutBackend> Default for Containment<B> {
    fn default() -> Self {
        Containment::Append
    }
}

impl<B: LayoutBackend> Clone for Containment<B> {
    fn clone(&self) -> Self {
        match self {
            Containment::Append => Containment::Append,
            Containment::Custom(contain) => Containment::Custom(Rc::clone(contain)),
            Containment::Unconfigured => Containment::Unconfigured,
        }
    }
}

impl<B: LayoutBackend> fmt::Debug for Containment<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Containment::Append => f.write_str("Append"),
            Containment::Custom(_) => f.write_str("Custom"),
            Containment::Unconfigured => f.write_str("Unconfigured"),
        }
    }
}

/// An immutable layout tree node
pub struct Node<B: LayoutBackend> {
    element: B::Element,
    children: Rc<[Node<B>]>,
    self_relations: Rc<[SharedSelfRelation<B>]>,
    parent_relations: Rc<[SharedParentRelation<B>]>,
    containment: Containment<B>,
}

impl<B: LayoutBackend> Node<B> {
    /// A leaf node for `element` that appends children
    pub fn new(element: B::Element) -> Self {
        Self {
            element,
            children: Rc::from(Vec::new()),
            self_relations: Rc::from(Vec::new()),
            parent_relations: Rc::from(Vec::new()),
            containment: Containment::Append,
        }
    }

    /// A leaf node with no containment strategy.
    ///
    /// Children must come with a strategy through `contain` or `using`;
    /// activating it with children otherwise panics.
    pub fn unconfigured(element: B::Element) -> Self {
        Self {
            containment: Containment::Unconfigured,
            ..Self::new(element)
        }
    }

    pub fn element(&self) -> B::Element {
        self.element
    }

    pub fn children(&self) -> &[Node<B>] {
        &self.children
    }

    pub fn self_relations(&self) -> &[SharedSelfRelation<B>] {
        &self.self_relations
    }

    pub fn parent_relations(&self) -> &[SharedParentRelation<B>] {
        &self.parent_relations
    }

    pub fn containment(&self) -> &Containment<B> {
        &self.containment
    }

    /// Total number of nodes in this subtree, including this one
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }

    pub(crate) fn with_relations(&self, relations: impl IntoIterator<Item = Relation<B>>) -> Self {
        let mut on_self = Vec::new();
        let mut on_parent = Vec::new();
        for relation in relations {
            match relation {
                Relation::OnSelf(r) => on_self.push(r),
                Relation::OnParent(r) => on_parent.push(r),
            }
        }
        Self {
            self_relations: extended(&self.self_relations, on_self),
            parent_relations: extended(&self.parent_relations, on_parent),
            ..self.clone()
        }
    }

    pub(crate) fn with_children(
        &self,
        children: impl IntoIterator<Item = Node<B>>,
        containment: Option<Containment<B>>,
    ) -> Self {
        Self {
            children: extended(&self.children, children),
            containment: containment.unwrap_or_else(|| self.containment.clone()),
            ..self.clone()
        }
    }
}

/// `base` followed by `more`, sharing `base` when there is nothing to add
fn extended<T: Clone>(base: &Rc<[T]>, more: impl IntoIterator<Item = T>) -> Rc<[T]> {
    let more: Vec<T> = more.into_iter().collect();
    if more.is_empty() {
        return Rc::clone(base);
    }
    base.iter().cloned().chain(more).collect()
}

impl<B: LayoutBackend> Clone for Node<B> {
    fn clone(&self) -> Self {
        Self {
            element: self.element,
            children: Rc::clone(&self.children),
            self_relations: Rc::clone(&self.self_relations),
            parent_relations: Rc::clone(&self.parent_relations),
            containment: self.containment.clone(),
        }
    }
}

impl<B: LayoutBackend> fmt::Debug for Node<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("element", &self.element)
            .field("self_relations", &self.self_relations.len())
            .field("parent_relations", &self.parent_relations.len())
            .field("containment", &self.containment)
            .field("children", &self.children)
            .finish()
    }
}

impl<B: LayoutBackend> Pinnable<B> for Node<B> {
    fn to_node(&self) -> Node<B> {
        self.clone()
    }

    fn element(&self) -> B::Element {
        self.element
    }
}
