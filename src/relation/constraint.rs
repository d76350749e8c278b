//! Constraint-backed relations
//!
//! [`StaticConstraint`] builds its constraint once and toggles it on every
//! resolve and revert. [`SelfConstraints`] and [`ParentConstraints`] rebuild
//! their constraints from a factory on every resolve and discard them on
//! revert.

use std::cell::{Cell, RefCell};
use std::fmt;

use tracing::{trace, warn};

use crate::backend::{ConstraintSpec, LayoutBackend};

use super::{ParentRelation, SelfRelation};

/// The constraints a relation currently has active
pub struct LiveConstraints<B: LayoutBackend> {
    constraints: RefCell<Vec<B::Constraint>>,
}

impl<B: LayoutBackend> LiveConstraints<B> {
    pub fn new() -> Self {
        Self {
            constraints: RefCell::new(Vec::new()),
        }
    }

    /// Build and activate `specs`, replacing whatever was recorded before.
    ///
    /// Constraints are recorded before activation so that a failed activation
    /// still leaves them reachable by [`clear`](Self::clear).
    pub fn replace(
        &self,
        backend: &mut B,
        specs: Vec<ConstraintSpec<B>>,
    ) -> Result<(), B::Error> {
        let built: Vec<B::Constraint> = specs
            .into_iter()
            .map(|spec| {
                trace!(%spec, "building constraint");
                backend.make_constraint(spec)
            })
            .collect();

        let stale = self.constraints.replace(built.clone());
        if !stale.is_empty() {
            warn!(
                count = stale.len(),
                "relation resolved again without revert; previous constraints stay active"
            );
        }

        for constraint in &built {
            backend.activate(constraint)?;
        }
        Ok(())
    }

    /// Deactivate and release everything recorded
    pub fn clear(&self, backend: &mut B) {
        for constraint in self.constraints.take() {
            backend.release(constraint);
        }
    }

    pub fn len(&self) -> usize {
        self.constraints.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<B: LayoutBackend> Default for LiveConstraints<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: LayoutBackend> fmt::Debug for LiveConstraints<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.constraints.borrow().iter()).finish()
    }
}

/// A single constraint, built on first resolve and toggled afterwards
pub struct StaticConstraint<B: LayoutBackend> {
    spec: ConstraintSpec<B>,
    constraint: RefCell<Option<B::Constraint>>,
    active: Cell<bool>,
}

impl<B: LayoutBackend> StaticConstraint<B> {
    pub fn new(spec: ConstraintSpec<B>) -> Self {
        Self {
            spec,
            constraint: RefCell::new(None),
            active: Cell::new(false),
        }
    }

    pub fn spec(&self) -> &ConstraintSpec<B> {
        &self.spec
    }

    /// The backend constraint, once built
    pub fn constraint(&self) -> Option<B::Constraint> {
        self.constraint.borrow().clone()
    }
}

impl<B: LayoutBackend> SelfRelation<B> for StaticConstraint<B> {
    fn resolve(&self, backend: &mut B) -> Result<(), B::Error> {
        let constraint = self
            .constraint
            .borrow_mut()
            .get_or_insert_with(|| backend.make_constraint(self.spec.clone()))
            .clone();
        backend.activate(&constraint)?;
        self.active.set(true);
        Ok(())
    }

    fn revert(&self, backend: &mut B) {
        if self.active.replace(false) {
            if let Some(constraint) = self.constraint.borrow().as_ref() {
                backend.deactivate(constraint);
            }
        }
    }

    fn live_count(&self) -> usize {
        usize::from(self.active.get())
    }
}

impl<B: LayoutBackend> fmt::Debug for StaticConstraint<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticConstraint")
            .field("spec", &self.spec)
            .field("active", &self.active.get())
            .finish()
    }
}

type SelfFactory<B> = dyn Fn() -> Vec<ConstraintSpec<B>>;
type ParentFactory<B> = dyn Fn(<B as LayoutBackend>::Element) -> Vec<ConstraintSpec<B>>;

/// Constraints rebuilt from a factory on every resolve
pub struct SelfConstraints<B: LayoutBackend> {
    make: Box<SelfFactory<B>>,
    live: LiveConstraints<B>,
}

impl<B: LayoutBackend> SelfConstraints<B> {
    pub fn new(make: impl Fn() -> Vec<ConstraintSpec<B>> + 'static) -> Self {
        Self {
            make: Box::new(make),
            live: LiveConstraints::new(),
        }
    }
}

impl<B: LayoutBackend> SelfRelation<B> for SelfConstraints<B> {
    fn resolve(&self, backend: &mut B) -> Result<(), B::Error> {
        self.live.replace(backend, (self.make)())
    }

    fn revert(&self, backend: &mut B) {
        self.live.clear(backend);
    }

    fn live_count(&self) -> usize {
        self.live.len()
    }
}

/// Constraints rebuilt from the parent element on every resolve
pub struct ParentConstraints<B: LayoutBackend> {
    make: Box<ParentFactory<B>>,
    live: LiveConstraints<B>,
}

impl<B: LayoutBackend> ParentConstraints<B> {
    pub fn new(make: impl Fn(B::Element) -> Vec<ConstraintSpec<B>> + 'static) -> Self {
        Self {
            make: Box::new(make),
            live: LiveConstraints::new(),
        }
    }

    /// A factory producing exactly one constraint
    pub fn single(make: impl Fn(B::Element) -> ConstraintSpec<B> + 'static) -> Self {
        Self::new(move |parent| vec![make(parent)])
    }
}

impl<B: LayoutBackend> ParentRelation<B> for ParentConstraints<B> {
    fn resolve(&self, backend: &mut B, parent: B::Element) -> Result<(), B::Error> {
        self.live.replace(backend, (self.make)(parent))
    }

    fn revert(&self, backend: &mut B, _parent: B::Element) {
        self.live.clear(backend);
    }

    fn live_count(&self) -> usize {
        self.live.len()
    }
}

impl<B: LayoutBackend> From<StaticConstraint<B>> for super::Relation<B> {
    fn from(relation: StaticConstraint<B>) -> Self {
        super::Relation::on_self(relation)
    }
}

impl<B: LayoutBackend> From<SelfConstraints<B>> for super::Relation<B> {
    fn from(relation: SelfConstraints<B>) -> Self {
        super::Relation::on_self(relation)
    }
}

impl<B: LayoutBackend> From<ParentConstraints<B>> for super::Relation<B> {
    fn from(relation: ParentConstraints<B>) -> Self {
        super::Relation::on_parent(relation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::{Attribute, RelationKind};
    use crate::backend::Target;
    use crate::canvas::{Canvas, Rect};
    use crate::node::Pinnable;
    use crate::relation::Relation;

    fn width_spec(element: crate::canvas::ElementId, value: f64) -> ConstraintSpec<Canvas> {
        ConstraintSpec::constant(
            Target::Element(element),
            Attribute::Width,
            RelationKind::GreaterOrEqual,
            value,
        )
    }

    #[test]
    fn test_static_constraint_is_built_once() {
        let mut canvas = Canvas::new();
        let a = canvas.element("a");
        let relation = StaticConstraint::new(width_spec(a, 10.0));

        relation.resolve(&mut canvas).unwrap();
        let first = relation.constraint();
        relation.revert(&mut canvas);
        assert_eq!(relation.live_count(), 0);

        relation.resolve(&mut canvas).unwrap();
        assert_eq!(relation.constraint(), first);
        assert_eq!(relation.live_count(), 1);
        assert_eq!(canvas.constraints_on(a).len(), 1);
    }

    #[test]
    fn test_self_constraints_rebuild_on_every_resolve() {
        let mut canvas = Canvas::new();
        let a = canvas.element("a");
        let relation = SelfConstraints::new(move || vec![width_spec(a, 5.0), width_spec(a, 6.0)]);

        relation.resolve(&mut canvas).unwrap();
        let first = canvas.constraints_on(a).to_vec();
        assert_eq!(first.len(), 2);

        relation.revert(&mut canvas);
        assert_eq!(relation.live_count(), 0);
        assert!(canvas.constraints_on(a).is_empty());
        assert!(first.iter().all(|&id| !canvas.is_active(id)));

        relation.resolve(&mut canvas).unwrap();
        assert_eq!(relation.live_count(), 2);
        let second = canvas.constraints_on(a).to_vec();
        assert_eq!(second.len(), 2);
        assert!(second.iter().all(|&id| canvas.is_active(id)));
    }

    #[test]
    fn test_resolving_twice_leaks_previous_constraints() {
        let mut canvas = Canvas::new();
        let a = canvas.element("a");
        let relation = SelfConstraints::new(move || vec![width_spec(a, 5.0)]);

        relation.resolve(&mut canvas).unwrap();
        relation.resolve(&mut canvas).unwrap();

        assert_eq!(relation.live_count(), 1);
        assert_eq!(canvas.constraints_on(a).len(), 2);
    }

    #[test]
    fn test_parent_constraints_see_the_parent_element() {
        let mut canvas = Canvas::new();
        let root = canvas.element_with_frame("root", Rect::new(0.0, 0.0, 100.0, 50.0));
        let child = canvas.element("child");
        let relation = ParentConstraints::single(move |parent| {
            ConstraintSpec::between(
                Target::Element(child),
                Attribute::Width,
                RelationKind::Equal,
                Target::Element(parent),
                Attribute::Height,
            )
        });

        let tree = root.add([child.appending([Relation::from(relation)])]);
        tree.activate(&mut canvas).unwrap();

        let installed = canvas.constraints_on(root);
        assert_eq!(installed.len(), 1);
        let spec = canvas.constraint_spec(installed[0]).unwrap();
        assert_eq!(spec.to_item, Some(Target::Element(root)));
        assert_eq!(tree.children()[0].parent_relations().live_count(), 1);

        tree.deactivate(&mut canvas);
        assert_eq!(tree.children()[0].parent_relations().live_count(), 0);
    }
}
