//! Deferred geometric relations
//!
//! A relation is declared while a tree is built and turned into live
//! constraints only when the tree is activated. There are two capabilities:
//!
//! - [`SelfRelation`]: everything it needs is known when it is declared
//! - [`ParentRelation`]: it needs the element of the node's future parent
//!
//! An ordered slice of either capability is itself an instance of that
//! capability; resolving or reverting it visits members front to back.
//!
//! Relations live behind `Rc` and are shared by every node derived from the
//! node that declared them, so their state uses interior mutability.

pub mod center;
pub mod constraint;
pub mod pin;

pub use center::Center;
pub use constraint::{LiveConstraints, ParentConstraints, SelfConstraints, StaticConstraint};
pub use pin::EdgePin;

use std::fmt;
use std::rc::Rc;

use crate::backend::LayoutBackend;

/// A relation that resolves without knowing a parent element
pub trait SelfRelation<B: LayoutBackend> {
    /// Build (or rebuild) and activate the underlying constraints
    fn resolve(&self, backend: &mut B) -> Result<(), B::Error>;

    /// Deactivate the underlying constraints and drop any artifacts
    fn revert(&self, backend: &mut B);

    /// Number of constraints currently active on behalf of this relation
    fn live_count(&self) -> usize;
}

/// A relation that resolves against the element of its node's parent
pub trait ParentRelation<B: LayoutBackend> {
    /// Build and activate the underlying constraints against `parent`
    fn resolve(&self, backend: &mut B, parent: B::Element) -> Result<(), B::Error>;

    /// Deactivate the underlying constraints and remove guides from `parent`
    fn revert(&self, backend: &mut B, parent: B::Element);

    /// Number of constraints currently active on behalf of this relation
    fn live_count(&self) -> usize;
}

pub type SharedSelfRelation<B> = Rc<dyn SelfRelation<B>>;
pub type SharedParentRelation<B> = Rc<dyn ParentRelation<B>>;

impl<B: LayoutBackend, R: SelfRelation<B>> SelfRelation<B> for [R] {
    fn resolve(&self, backend: &mut B) -> Result<(), B::Error> {
        for relation in self {
            relation.resolve(backend)?;
        }
        Ok(())
    }

    fn revert(&self, backend: &mut B) {
        for relation in self {
            relation.revert(backend);
        }
    }

    fn live_count(&self) -> usize {
        self.iter().map(|r| r.live_count()).sum()
    }
}

impl<B: LayoutBackend, R: SelfRelation<B> + ?Sized> SelfRelation<B> for Rc<R> {
    fn resolve(&self, backend: &mut B) -> Result<(), B::Error> {
        (**self).resolve(backend)
    }

    fn revert(&self, backend: &mut B) {
        (**self).revert(backend)
    }

    fn live_count(&self) -> usize {
        (**self).live_count()
    }
}

impl<B: LayoutBackend, R: ParentRelation<B>> ParentRelation<B> for [R] {
    fn resolve(&self, backend: &mut B, parent: B::Element) -> Result<(), B::Error> {
        for relation in self {
            relation.resolve(backend, parent)?;
        }
        Ok(())
    }

    fn revert(&self, backend: &mut B, parent: B::Element) {
        for relation in self {
            relation.revert(backend, parent);
        }
    }

    fn live_count(&self) -> usize {
        self.iter().map(|r| r.live_count()).sum()
    }
}

impl<B: LayoutBackend, R: ParentRelation<B> + ?Sized> ParentRelation<B> for Rc<R> {
    fn resolve(&self, backend: &mut B, parent: B::Element) -> Result<(), B::Error> {
        (**self).resolve(backend, parent)
    }

    fn revert(&self, backend: &mut B, parent: B::Element) {
        (**self).revert(backend, parent)
    }

    fn live_count(&self) -> usize {
        (**self).live_count()
    }
}

/// Either kind of relation, as accepted by `appending`
pub enum Relation<B: LayoutBackend> {
    OnSelf(SharedSelfRelation<B>),
    OnParent(SharedParentRelation<B>),
}

impl<B: LayoutBackend> Relation<B> {
    pub fn on_self(relation: impl SelfRelation<B> + 'static) -> Self {
        Relation::OnSelf(Rc::new(relation))
    }

    pub fn on_parent(relation: impl ParentRelation<B> + 'static) -> Self {
        Relation::OnParent(Rc::new(relation))
    }
}

impl<B: LayoutBackend> Clone for Relation<B> {
    fn clone(&self) -> Self {
        match self {
            Relation::OnSelf(r) => Relation::OnSelf(Rc::clone(r)),
            Relation::OnParent(r) => Relation::OnParent(Rc::clone(r)),
        }
    }
}

impl<B: LayoutBackend> fmt::Debug for Relation<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::OnSelf(r) => write!(f, "Relation::OnSelf(live: {})", r.live_count()),
            Relation::OnParent(r) => write!(f, "Relation::OnParent(live: {})", r.live_count()),
        }
    }
}

impl<B: LayoutBackend> From<SharedSelfRelation<B>> for Relation<B> {
    fn from(relation: SharedSelfRelation<B>) -> Self {
        Relation::OnSelf(relation)
    }
}

impl<B: LayoutBackend> From<SharedParentRelation<B>> for Relation<B> {
    fn from(relation: SharedParentRelation<B>) -> Self {
        Relation::OnParent(relation)
    }
}
