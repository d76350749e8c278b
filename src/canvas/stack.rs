//! Stack elements
//!
//! A stack element arranges its *arranged children* one after another along
//! its axis, separated by its spacing, and stretches each of them across the
//! other axis. Arrangement constraints belong to the stack itself: they are
//! rebuilt whenever the arranged children change and are never reported by
//! [`Canvas::constraints_on`].

use tracing::warn;

use crate::attribute::{Attribute, Priority, RelationKind};
use crate::backend::{ConstraintSpec, LayoutBackend, Target};
use crate::node::{Containment, Node, Pinnable};

use super::types::{ElementId, StackAxis};
use super::Canvas;

pub(crate) struct Arrangement {
    axis: StackAxis,
    spacing: f64,
    arranged: Vec<ElementId>,
    chain: Vec<kasuari::Constraint>,
}

impl Arrangement {
    fn new(axis: StackAxis, spacing: f64) -> Self {
        Self {
            axis,
            spacing,
            arranged: Vec::new(),
            chain: Vec::new(),
        }
    }

    pub fn axis(&self) -> StackAxis {
        self.axis
    }
}

impl Canvas {
    /// Create a detached stack element using the configured spacing
    pub fn stack_element(&mut self, name: impl Into<String>, axis: StackAxis) -> ElementId {
        let id = self.element(name);
        self.elements[id.0].arrangement = Some(Arrangement::new(axis, self.config.stack_spacing));
        id
    }

    pub fn is_stack(&self, element: ElementId) -> bool {
        self.elements[element.0].arrangement.is_some()
    }

    /// Arranged children in order; empty for plain elements
    pub fn arranged_children(&self, stack: ElementId) -> &[ElementId] {
        self.elements[stack.0]
            .arrangement
            .as_ref()
            .map(|a| a.arranged.as_slice())
            .unwrap_or(&[])
    }

    pub fn set_stack_spacing(&mut self, stack: ElementId, spacing: f64) {
        if let Some(arrangement) = self.elements[stack.0].arrangement.as_mut() {
            arrangement.spacing = spacing;
            self.rearrange(stack);
        }
    }

    /// Add `child` to `stack` and append it to the arrangement.
    ///
    /// On a plain element this is the same as adding a child.
    pub fn add_arranged_child(&mut self, stack: ElementId, child: ElementId) {
        self.add_child(stack, child);
        if !self.is_stack(stack) {
            warn!(element = %self.name(stack), "arranging child of a plain element");
            return;
        }
        if let Some(arrangement) = self.elements[stack.0].arrangement.as_mut() {
            arrangement.arranged.push(child);
        }
        self.rearrange(stack);
    }

    pub(crate) fn remove_arranged(&mut self, stack: ElementId, child: ElementId) {
        let Some(arrangement) = self.elements[stack.0].arrangement.as_mut() else {
            return;
        };
        let before = arrangement.arranged.len();
        arrangement.arranged.retain(|&c| c != child);
        if arrangement.arranged.len() != before {
            self.rearrange(stack);
        }
    }

    /// Replace the arrangement constraints of `stack`
    fn rearrange(&mut self, stack: ElementId) {
        let Some(arrangement) = self.elements[stack.0].arrangement.as_mut() else {
            return;
        };
        let stale = std::mem::take(&mut arrangement.chain);
        let (axis, spacing) = (arrangement.axis, arrangement.spacing);
        let arranged = arrangement.arranged.clone();
        for constraint in &stale {
            self.solver.remove(constraint);
        }

        let (start, end, cross) = match axis {
            StackAxis::Vertical => (
                Attribute::Top,
                Attribute::Bottom,
                [Attribute::Leading, Attribute::Trailing],
            ),
            StackAxis::Horizontal => (
                Attribute::Leading,
                Attribute::Trailing,
                [Attribute::Top, Attribute::Bottom],
            ),
        };
        let link = |item: ElementId, attribute, to: ElementId, to_attribute| {
            ConstraintSpec::<Canvas>::between(
                Target::Element(item),
                attribute,
                RelationKind::Equal,
                Target::Element(to),
                to_attribute,
            )
            .with_priority(Priority::DEFAULT_HIGH)
        };

        let mut specs = Vec::new();
        let mut previous: Option<ElementId> = None;
        for &child in &arranged {
            specs.push(match previous {
                None => link(child, start, stack, start),
                Some(previous) => link(child, start, previous, end).with_constant(spacing),
            });
            for attribute in cross {
                specs.push(link(child, attribute, stack, attribute));
            }
            previous = Some(child);
        }

        let mut chain = Vec::with_capacity(specs.len());
        for spec in &specs {
            let description = self.describe_spec(spec);
            let added = self
                .build(spec)
                .and_then(|built| self.solver.add(&built, &description).map(|()| built));
            match added {
                Ok(built) => chain.push(built),
                Err(e) => warn!(error = %e, constraint = %description, "skipping arrangement constraint"),
            }
        }
        if let Some(arrangement) = self.elements[stack.0].arrangement.as_mut() {
            arrangement.chain = chain;
        }
    }
}

/// Tree-building for stack elements
pub trait StackPinnable: Pinnable<Canvas> {
    /// Append `children` as arranged children of this stack element
    fn stack<I>(&self, children: I) -> Node<Canvas>
    where
        I: IntoIterator,
        I::Item: Pinnable<Canvas>,
    {
        self.contain(
            children,
            Containment::custom(|canvas: &mut Canvas, stack, child: &Node<Canvas>| {
                canvas.add_arranged_child(stack, child.element())
            }),
        )
    }
}

impl<P: Pinnable<Canvas> + ?Sized> StackPinnable for P {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arranged_children_follow_removal() {
        let mut canvas = Canvas::new();
        let stack = canvas.stack_element("stack", StackAxis::Vertical);
        let a = canvas.element("a");
        let b = canvas.element("b");

        canvas.add_arranged_child(stack, a);
        canvas.add_arranged_child(stack, b);
        assert_eq!(canvas.arranged_children(stack), &[a, b]);

        canvas.remove_child(stack, a);
        assert_eq!(canvas.arranged_children(stack), &[b]);
        assert_eq!(canvas.children(stack), &[b]);
    }

    #[test]
    fn test_plain_element_arranges_nothing() {
        let mut canvas = Canvas::new();
        let plain = canvas.element("plain");
        let child = canvas.element("child");

        canvas.add_arranged_child(plain, child);

        assert!(!canvas.is_stack(plain));
        assert!(canvas.arranged_children(plain).is_empty());
        assert_eq!(canvas.children(plain), &[child]);
    }
}
