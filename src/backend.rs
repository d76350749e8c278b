//! The capability interface a layout tree drives
//!
//! A layout tree never owns elements or constraints. It drives them through
//! a [`LayoutBackend`], which hands out cheap handles for elements, guides
//! and constraints and performs every mutation on their behalf. The
//! bundled [`Canvas`](crate::canvas::Canvas) is one such backend; a native
//! toolkit binding is another.

use std::fmt;
use std::hash::Hash;

use crate::attribute::{Attribute, Priority, RelationKind};

/// Operations a layout system must offer to host layout trees
pub trait LayoutBackend: Sized + 'static {
    /// Handle to a visual element
    type Element: Copy + Eq + Hash + fmt::Debug + 'static;
    /// Handle to an invisible guide
    type Guide: Copy + Eq + fmt::Debug + 'static;
    /// Handle to a constraint built from a [`ConstraintSpec`]
    type Constraint: Clone + fmt::Debug + 'static;
    /// Failure reported when a constraint cannot be activated
    type Error: std::error::Error + 'static;

    /// Insert `child` into `parent`, after any existing children
    fn add_child(&mut self, parent: Self::Element, child: Self::Element);

    /// Detach `child` if it is currently a child of `parent`.
    ///
    /// Returns whether anything was removed.
    fn remove_child(&mut self, parent: Self::Element, child: Self::Element) -> bool;

    /// Enable or disable the element's own frame-derived sizing
    fn set_intrinsic_frame(&mut self, element: Self::Element, enabled: bool);

    /// Request a new measurement pass rooted at `element`
    fn invalidate(&mut self, element: Self::Element);

    /// Build an inactive constraint
    fn make_constraint(&mut self, spec: ConstraintSpec<Self>) -> Self::Constraint;

    /// Activate a constraint. Activating an active constraint is a no-op.
    fn activate(&mut self, constraint: &Self::Constraint) -> Result<(), Self::Error>;

    /// Deactivate a constraint. Deactivating an inactive constraint is a no-op.
    fn deactivate(&mut self, constraint: &Self::Constraint);

    /// Deactivate a constraint and drop it for good
    fn release(&mut self, constraint: Self::Constraint) {
        self.deactivate(&constraint);
    }

    /// Allocate a guide that belongs to no element yet
    fn make_guide(&mut self) -> Self::Guide;

    fn add_guide(&mut self, owner: Self::Element, guide: Self::Guide);

    fn remove_guide(&mut self, owner: Self::Element, guide: Self::Guide);
}

/// Something a constraint can refer to
pub enum Target<B: LayoutBackend> {
    Element(B::Element),
    Guide(B::Guide),
}

impl<B: LayoutBackend> Clone for Target<B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: LayoutBackend> Copy for Target<B> {}

impl<B: LayoutBackend> PartialEq for Target<B> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Target::Element(a), Target::Element(b)) => a == b,
            (Target::Guide(a), Target::Guide(b)) => a == b,
            _ => false,
        }
    }
}

impl<B: LayoutBackend> fmt::Debug for Target<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Element(e) => write!(f, "{:?}", e),
            Target::Guide(g) => write!(f, "{:?}", g),
        }
    }
}

/// Full description of a linear constraint:
/// `item.attribute <relation> to_item.to_attribute * multiplier + constant`
pub struct ConstraintSpec<B: LayoutBackend> {
    pub item: Target<B>,
    pub attribute: Attribute,
    pub relation: RelationKind,
    pub to_item: Option<Target<B>>,
    pub to_attribute: Attribute,
    pub multiplier: f64,
    pub constant: f64,
    pub priority: Priority,
}

impl<B: LayoutBackend> ConstraintSpec<B> {
    /// Relate an attribute of `item` to an attribute of `to_item`
    pub fn between(
        item: Target<B>,
        attribute: Attribute,
        relation: RelationKind,
        to_item: Target<B>,
        to_attribute: Attribute,
    ) -> Self {
        Self {
            item,
            attribute,
            relation,
            to_item: Some(to_item),
            to_attribute,
            multiplier: 1.0,
            constant: 0.0,
            priority: Priority::REQUIRED,
        }
    }

    /// Relate an attribute of `item` to a constant
    pub fn constant(item: Target<B>, attribute: Attribute, relation: RelationKind, value: f64) -> Self {
        Self {
            item,
            attribute,
            relation,
            to_item: None,
            to_attribute: Attribute::NotAnAttribute,
            multiplier: 1.0,
            constant: value,
            priority: Priority::REQUIRED,
        }
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    pub fn with_constant(mut self, constant: f64) -> Self {
        self.constant = constant;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

impl<B: LayoutBackend> Clone for ConstraintSpec<B> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<B: LayoutBackend> PartialEq for ConstraintSpec<B> {
    fn eq(&self, other: &Self) -> bool {
        self.item == other.item
            && self.attribute == other.attribute
            && self.relation == other.relation
            && self.to_item == other.to_item
            && self.to_attribute == other.to_attribute
            && self.multiplier == other.multiplier
            && self.constant == other.constant
            && self.priority == other.priority
    }
}

impl<B: LayoutBackend> fmt::Debug for ConstraintSpec<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl<B: LayoutBackend> fmt::Display for ConstraintSpec<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}.{} {} ", self.item, self.attribute, self.relation)?;
        match &self.to_item {
            Some(to) => {
                write!(f, "{:?}.{}", to, self.to_attribute)?;
                if self.multiplier != 1.0 {
                    write!(f, " * {}", self.multiplier)?;
                }
                if self.constant != 0.0 {
                    write!(f, " + {}", self.constant)?;
                }
            }
            None => write!(f, "{}", self.constant)?,
        }
        if !self.priority.is_required() {
            write!(f, " @{}", self.priority)?;
        }
        Ok(())
    }
}
