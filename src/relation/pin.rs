//! Pinning a child's edges to its parent's edges

use std::fmt;

use crate::attribute::Attribute;
use crate::backend::{ConstraintSpec, LayoutBackend, Target};
use crate::config::PinOptions;
use crate::normalize::{normalize, NormalizedAttribute};

use super::constraint::LiveConstraints;
use super::{ParentRelation, Relation};

/// Parent-relation pinning attributes of an element to the same attributes
/// of its parent, one constraint per attribute.
pub struct EdgePin<B: LayoutBackend> {
    element: B::Element,
    pins: Vec<NormalizedAttribute>,
    options: PinOptions,
    live: LiveConstraints<B>,
}

impl<B: LayoutBackend> EdgePin<B> {
    pub fn new(element: B::Element, attributes: &[Attribute], options: PinOptions) -> Self {
        let pins = attributes
            .iter()
            .map(|&attribute| normalize(attribute, options.padding))
            .collect();
        Self {
            element,
            pins,
            options,
            live: LiveConstraints::new(),
        }
    }

    pub fn pins(&self) -> &[NormalizedAttribute] {
        &self.pins
    }

    fn specs(&self, parent: B::Element) -> Vec<ConstraintSpec<B>> {
        self.pins
            .iter()
            .map(|pin| {
                ConstraintSpec::between(
                    Target::Element(self.element),
                    pin.child,
                    self.options.relation,
                    Target::Element(parent),
                    pin.parent,
                )
                .with_multiplier(self.options.multiplier)
                .with_constant(pin.offset)
                .with_priority(self.options.priority)
            })
            .collect()
    }
}

impl<B: LayoutBackend> ParentRelation<B> for EdgePin<B> {
    fn resolve(&self, backend: &mut B, parent: B::Element) -> Result<(), B::Error> {
        self.live.replace(backend, self.specs(parent))
    }

    fn revert(&self, backend: &mut B, _parent: B::Element) {
        self.live.clear(backend);
    }

    fn live_count(&self) -> usize {
        self.live.len()
    }
}

impl<B: LayoutBackend> fmt::Debug for EdgePin<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdgePin")
            .field("element", &self.element)
            .field("pins", &self.pins)
            .field("options", &self.options)
            .finish()
    }
}

impl<B: LayoutBackend> From<EdgePin<B>> for Relation<B> {
    fn from(relation: EdgePin<B>) -> Self {
        Relation::on_parent(relation)
    }
}
