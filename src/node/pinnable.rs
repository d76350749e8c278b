//! Fluent tree-building operations
//!
//! Every operation is a default method of [`Pinnable`], so it is available on
//! [`Node`] and on any backend element handle that implements `Pinnable`.
//! Each one returns a new node; the receiver is never modified.

use crate::anchor::{Anchor, AnchorAxis, AnchorKey, Dimension, LinearAxis};
use crate::attribute::{Attribute, Priority, RelationKind};
use crate::backend::{ConstraintSpec, LayoutBackend, Target};
use crate::config::PinOptions;
use crate::group::GroupBuilder;
use crate::relation::{Center, EdgePin, Relation, StaticConstraint};

use super::{Containment, Node};

/// A value that can take part in a layout tree.
///
/// Implement [`to_node`](Pinnable::to_node) for an element handle to give it
/// the whole builder vocabulary as a childless, relation-free leaf.
pub trait Pinnable<B: LayoutBackend> {
    /// The node this value stands for
    fn to_node(&self) -> Node<B>;

    /// The element this value wraps
    fn element(&self) -> B::Element {
        self.to_node().element()
    }

    /// An anchor on this value's element
    fn anchor<K: AnchorAxis>(&self, key: AnchorKey<K>) -> Anchor<B, K> {
        Anchor::new(Target::Element(self.element()), key)
    }

    // ========================================================================
    // Composition
    // ========================================================================

    /// Append relations; each goes to the self or parent list by its kind
    fn appending<I>(&self, relations: I) -> Node<B>
    where
        I: IntoIterator,
        I::Item: Into<Relation<B>>,
    {
        self.to_node().with_relations(relations.into_iter().map(Into::into))
    }

    /// Append children, keeping the current containment strategy
    fn add<I>(&self, children: I) -> Node<B>
    where
        I: IntoIterator,
        I::Item: Pinnable<B>,
    {
        self.to_node()
            .with_children(children.into_iter().map(|c| c.to_node()), None)
    }

    /// Append the flattened result of a group builder
    fn add_group(&self, build: impl FnOnce(&mut GroupBuilder<B>)) -> Node<B> {
        let mut builder = GroupBuilder::new();
        build(&mut builder);
        self.to_node().with_children(builder.build().flatten(), None)
    }

    /// Append children and replace the containment strategy
    fn contain<I>(&self, children: I, containment: Containment<B>) -> Node<B>
    where
        I: IntoIterator,
        I::Item: Pinnable<B>,
    {
        self.to_node().with_children(
            children.into_iter().map(|c| c.to_node()),
            Some(containment),
        )
    }

    /// Replace the containment strategy only
    fn using(&self, containment: Containment<B>) -> Node<B> {
        self.to_node()
            .with_children(std::iter::empty(), Some(containment))
    }

    // ========================================================================
    // Edge pins (resolved against the parent)
    // ========================================================================

    /// Pin the given attributes to the same attributes of the parent
    fn pin_to(&self, attributes: &[Attribute]) -> Node<B> {
        self.pin_to_with(attributes, PinOptions::default())
    }

    /// Pin the given attributes to the parent with explicit options
    fn pin_to_with(&self, attributes: &[Attribute], options: PinOptions) -> Node<B> {
        self.appending([EdgePin::new(self.element(), attributes, options)])
    }

    /// Pin all four edges to the parent's edges, inset by `padding`
    fn pin_to_edges(&self, padding: f64) -> Node<B> {
        self.pin_to_with(Attribute::EDGES, PinOptions::new().with_padding(padding))
    }

    /// Pin all four edges to the parent's margin edges, inset by `padding`
    fn pin_to_margin_edges(&self, padding: f64) -> Node<B> {
        self.pin_to_with(
            Attribute::MARGIN_EDGES,
            PinOptions::new().with_padding(padding),
        )
    }

    // ========================================================================
    // Anchor pins (self-contained)
    // ========================================================================

    /// Pin one of this element's anchors to another anchor on the same axis
    fn pin_anchor<K: AnchorAxis>(
        &self,
        own: AnchorKey<K>,
        to: Anchor<B, K>,
        constant: f64,
    ) -> Node<B> {
        self.pin_anchor_with(own, to, constant, Priority::REQUIRED)
    }

    /// Like [`pin_anchor`](Pinnable::pin_anchor), at the given priority
    fn pin_anchor_with<K: AnchorAxis>(
        &self,
        own: AnchorKey<K>,
        to: Anchor<B, K>,
        constant: f64,
        priority: Priority,
    ) -> Node<B> {
        let spec = ConstraintSpec::between(
            Target::Element(self.element()),
            own.attribute(),
            RelationKind::Equal,
            to.target(),
            to.attribute(),
        )
        .with_constant(constant)
        .with_priority(priority);
        self.appending([StaticConstraint::new(spec)])
    }

    /// Pin one of this element's anchors to another of its own anchors
    fn pin_anchor_to_own<K: AnchorAxis>(
        &self,
        own: AnchorKey<K>,
        other: AnchorKey<K>,
        constant: f64,
    ) -> Node<B> {
        let to = self.anchor(other);
        self.pin_anchor(own, to, constant)
    }

    // ========================================================================
    // Size
    // ========================================================================

    /// Fix the width and height
    fn size(&self, width: f64, height: f64) -> Node<B> {
        self.size_with(AnchorKey::WIDTH, RelationKind::Equal, width, Priority::REQUIRED)
            .size_with(AnchorKey::HEIGHT, RelationKind::Equal, height, Priority::REQUIRED)
    }

    /// Fix both dimensions to `side`
    fn size_square(&self, side: f64) -> Node<B> {
        self.size(side, side)
    }

    /// Fix the width
    fn size_width(&self, width: f64) -> Node<B> {
        self.size_with(AnchorKey::WIDTH, RelationKind::Equal, width, Priority::REQUIRED)
    }

    /// Fix the height
    fn size_height(&self, height: f64) -> Node<B> {
        self.size_with(AnchorKey::HEIGHT, RelationKind::Equal, height, Priority::REQUIRED)
    }

    /// Relate one dimension to a constant
    fn size_with(
        &self,
        dimension: AnchorKey<Dimension>,
        relation: RelationKind,
        value: f64,
        priority: Priority,
    ) -> Node<B> {
        let spec = ConstraintSpec::constant(
            Target::Element(self.element()),
            dimension.attribute(),
            relation,
            value,
        )
        .with_priority(priority);
        self.appending([StaticConstraint::new(spec)])
    }

    // ========================================================================
    // Centering
    // ========================================================================

    /// Center this element between two anchors on the same axis
    fn center_between<K: LinearAxis>(&self, start: Anchor<B, K>, end: Anchor<B, K>) -> Node<B> {
        self.appending([Center::new(self.element(), start, end)])
    }
}

impl<B: LayoutBackend, P: Pinnable<B> + ?Sized> Pinnable<B> for &P {
    fn to_node(&self) -> Node<B> {
        (**self).to_node()
    }
}
