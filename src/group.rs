//! Building child lists with conditionals and nested groups
//!
//! A [`GroupBuilder`] accumulates [`Group`] values; [`Group::flatten`] then
//! turns the result into a plain, ordered list of nodes. Groups never reach a
//! layout tree: only the flattened nodes do.

use crate::backend::LayoutBackend;
use crate::node::{Node, Pinnable};

/// Either one node or an ordered collection of groups
pub enum Group<B: LayoutBackend> {
    Leaf(Node<B>),
    Nested(Vec<Group<B>>),
}

impl<B: LayoutBackend> Group<B> {
    /// The leaf nodes in pre-order
    pub fn flatten(self) -> Vec<Node<B>> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(self, out: &mut Vec<Node<B>>) {
        match self {
            Group::Leaf(node) => out.push(node),
            Group::Nested(groups) => {
                for group in groups {
                    group.flatten_into(out);
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Group::Leaf(_) => false,
            Group::Nested(groups) => groups.iter().all(Group::is_empty),
        }
    }
}

impl<B: LayoutBackend> From<Node<B>> for Group<B> {
    fn from(node: Node<B>) -> Self {
        Group::Leaf(node)
    }
}

impl<B: LayoutBackend> std::fmt::Debug for Group<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Group::Leaf(node) => write!(f, "Leaf({:?})", node.element()),
            Group::Nested(groups) => f.debug_list().entries(groups).finish(),
        }
    }
}

/// Accumulates children for [`Pinnable::add_group`]
pub struct GroupBuilder<B: LayoutBackend> {
    items: Vec<Group<B>>,
}

impl<B: LayoutBackend> GroupBuilder<B> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, item: impl Pinnable<B>) -> &mut Self {
        self.items.push(Group::Leaf(item.to_node()));
        self
    }

    /// Push `item` if present
    pub fn push_some<P: Pinnable<B>>(&mut self, item: Option<P>) -> &mut Self {
        if let Some(item) = item {
            self.push(item);
        }
        self
    }

    /// Push the result of `make` when `condition` holds
    pub fn push_if<P: Pinnable<B>>(&mut self, condition: bool, make: impl FnOnce() -> P) -> &mut Self {
        if condition {
            self.push(make());
        }
        self
    }

    /// Push the result of `first` or `second` depending on `condition`
    pub fn push_either<P: Pinnable<B>, Q: Pinnable<B>>(
        &mut self,
        condition: bool,
        first: impl FnOnce() -> P,
        second: impl FnOnce() -> Q,
    ) -> &mut Self {
        if condition {
            self.push(first())
        } else {
            self.push(second())
        }
    }

    /// Push a nested group built by `build`
    pub fn group(&mut self, build: impl FnOnce(&mut GroupBuilder<B>)) -> &mut Self {
        let mut nested = GroupBuilder::new();
        build(&mut nested);
        self.items.push(nested.build());
        self
    }

    pub fn build(self) -> Group<B> {
        Group::Nested(self.items)
    }
}

impl<B: LayoutBackend> Default for GroupBuilder<B> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;

    #[test]
    fn test_flatten_is_pre_order() {
        let mut canvas = Canvas::new();
        let ids: Vec<_> = ["a", "b", "c", "d"].iter().map(|n| canvas.element(*n)).collect();
        let leaf = |i: usize| Group::from(Node::<Canvas>::new(ids[i]));

        let group = Group::Nested(vec![
            leaf(0),
            Group::Nested(vec![leaf(1), Group::Nested(vec![]), leaf(2)]),
            leaf(3),
        ]);
        let flat: Vec<_> = group.flatten().iter().map(Node::element).collect();

        assert_eq!(flat, ids);
    }

    #[test]
    fn test_empty_groups() {
        let mut canvas = Canvas::new();
        let a = canvas.element("a");

        assert!(Group::<Canvas>::Nested(vec![Group::Nested(vec![])]).is_empty());
        assert!(!Group::Nested(vec![Group::from(Node::<Canvas>::new(a))]).is_empty());
        assert!(GroupBuilder::<Canvas>::new().build().flatten().is_empty());
    }
}
