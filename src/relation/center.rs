//! Centering an element between two arbitrary anchors
//!
//! The two anchors need not belong to the same item, so the relation spans
//! them with an invisible guide added to the parent and centers the element
//! on the guide. The guide is made on first resolve and reused afterwards;
//! it belongs to the parent only between resolve and revert.

use std::cell::Cell;
use std::fmt;

use tracing::warn;

use crate::anchor::{Anchor, LinearAxis};
use crate::attribute::RelationKind;
use crate::backend::{ConstraintSpec, LayoutBackend, Target};

use super::constraint::LiveConstraints;
use super::{ParentRelation, Relation};

pub struct Center<B: LayoutBackend, K: LinearAxis> {
    element: B::Element,
    start: Anchor<B, K>,
    end: Anchor<B, K>,
    guide: Cell<Option<B::Guide>>,
    attached: Cell<bool>,
    live: LiveConstraints<B>,
}

impl<B: LayoutBackend, K: LinearAxis> Center<B, K> {
    /// Center `element` between `start` and `end`
    pub fn new(element: B::Element, start: Anchor<B, K>, end: Anchor<B, K>) -> Self {
        Self {
            element,
            start,
            end,
            guide: Cell::new(None),
            attached: Cell::new(false),
            live: LiveConstraints::new(),
        }
    }

    /// The guide, once resolved
    pub fn guide(&self) -> Option<B::Guide> {
        self.guide.get()
    }

    fn guide_or_make(&self, backend: &mut B) -> B::Guide {
        match self.guide.get() {
            Some(guide) => guide,
            None => {
                let guide = backend.make_guide();
                self.guide.set(Some(guide));
                guide
            }
        }
    }

    fn specs(&self, guide: B::Guide) -> Vec<ConstraintSpec<B>> {
        let guide = Target::Guide(guide);
        vec![
            ConstraintSpec::between(
                guide,
                K::START,
                RelationKind::Equal,
                self.start.target(),
                self.start.attribute(),
            ),
            ConstraintSpec::between(
                guide,
                K::END,
                RelationKind::Equal,
                self.end.target(),
                self.end.attribute(),
            ),
            ConstraintSpec::between(
                Target::Element(self.element),
                K::CENTER,
                RelationKind::Equal,
                guide,
                K::CENTER,
            ),
        ]
    }
}

impl<B: LayoutBackend, K: LinearAxis> ParentRelation<B> for Center<B, K> {
    fn resolve(&self, backend: &mut B, parent: B::Element) -> Result<(), B::Error> {
        let guide = self.guide_or_make(backend);
        if self.attached.replace(true) {
            warn!(guide = ?guide, "centering resolved again without revert");
        }
        backend.add_guide(parent, guide);
        self.live.replace(backend, self.specs(guide))
    }

    fn revert(&self, backend: &mut B, parent: B::Element) {
        self.live.clear(backend);
        if self.attached.replace(false) {
            if let Some(guide) = self.guide.get() {
                backend.remove_guide(parent, guide);
            }
        }
    }

    fn live_count(&self) -> usize {
        self.live.len()
    }
}

impl<B: LayoutBackend, K: LinearAxis> fmt::Debug for Center<B, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Center")
            .field("element", &self.element)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("guide", &self.guide.get())
            .field("attached", &self.attached.get())
            .finish()
    }
}

impl<B: LayoutBackend, K: LinearAxis> From<Center<B, K>> for Relation<B> {
    fn from(relation: Center<B, K>) -> Self {
        Relation::on_parent(relation)
    }
}
