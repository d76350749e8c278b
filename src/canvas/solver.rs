//! Constraint solver integration for the canvas
//!
//! This module wraps the kasuari Cassowary solver: it turns attributes of
//! elements and guides into solver expressions, maps priorities to
//! strengths, and caches the solved variable values.

use std::collections::HashMap;

use kasuari::{
    AddConstraintError, Constraint, Expression, Solver as KasuariSolver, Strength,
    Variable as KasuariVariable, WeightedRelation::*,
};
use tracing::{trace, warn};

use crate::attribute::{Attribute, Priority, RelationKind};

use super::error::CanvasError;
use super::types::{Insets, LayoutDirection, Rect};

/// The four solver variables behind one element or guide
#[derive(Debug, Clone, Copy)]
pub(crate) struct ItemVars {
    pub x: KasuariVariable,
    pub y: KasuariVariable,
    pub width: KasuariVariable,
    pub height: KasuariVariable,
}

impl ItemVars {
    pub fn new() -> Self {
        Self {
            x: KasuariVariable::new(),
            y: KasuariVariable::new(),
            width: KasuariVariable::new(),
            height: KasuariVariable::new(),
        }
    }

    fn with_values(&self, frame: Rect) -> [(KasuariVariable, f64); 4] {
        [
            (self.x, frame.x),
            (self.y, frame.y),
            (self.width, frame.width),
            (self.height, frame.height),
        ]
    }
}

/// Solver strength for a priority
pub(crate) fn strength_for(priority: Priority) -> Strength {
    if priority.is_required() {
        Strength::REQUIRED
    } else if priority.value() >= Priority::DEFAULT_HIGH.value() {
        Strength::STRONG
    } else if priority.value() >= Priority::DEFAULT_LOW.value() {
        Strength::MEDIUM
    } else {
        Strength::WEAK
    }
}

/// Expression for `attribute` of an item, in canvas coordinates.
///
/// In right-to-left layouts leading is the right edge and trailing the left
/// one. Baselines fall back to the top and bottom edges. Returns `None` for
/// [`Attribute::NotAnAttribute`].
pub(crate) fn attribute_expression(
    vars: &ItemVars,
    margins: &Insets,
    attribute: Attribute,
    direction: LayoutDirection,
) -> Option<Expression> {
    let rtl = direction == LayoutDirection::RightToLeft;
    let left = || -> Expression { vars.x.into() };
    let right = || vars.x + vars.width;
    let left_margin = || vars.x + margins.left;
    let right_margin = || vars.x + vars.width + (-margins.right);

    let expr: Expression = match attribute {
        Attribute::Left => left(),
        Attribute::Right => right(),
        Attribute::Top | Attribute::FirstBaseline => vars.y.into(),
        Attribute::Bottom | Attribute::LastBaseline => vars.y + vars.height,
        Attribute::Leading if rtl => right(),
        Attribute::Leading => left(),
        Attribute::Trailing if rtl => left(),
        Attribute::Trailing => right(),
        Attribute::Width => vars.width.into(),
        Attribute::Height => vars.height.into(),
        Attribute::CenterX => vars.x + vars.width * 0.5,
        Attribute::CenterY => vars.y + vars.height * 0.5,
        Attribute::LeftMargin => left_margin(),
        Attribute::RightMargin => right_margin(),
        Attribute::TopMargin => vars.y + margins.top,
        Attribute::BottomMargin => vars.y + vars.height + (-margins.bottom),
        Attribute::LeadingMargin if rtl => right_margin(),
        Attribute::LeadingMargin => left_margin(),
        Attribute::TrailingMargin if rtl => left_margin(),
        Attribute::TrailingMargin => right_margin(),
        Attribute::CenterXWithinMargins => {
            vars.x + vars.width * 0.5 + (margins.left - margins.right) * 0.5
        }
        Attribute::CenterYWithinMargins => {
            vars.y + vars.height * 0.5 + (margins.top - margins.bottom) * 0.5
        }
        Attribute::NotAnAttribute => return None,
    };
    Some(expr)
}

/// Relation and constant of a constraint whose first attribute is `attribute`.
///
/// Constraints on a leading or trailing edge are measured along the reading
/// direction: in right-to-left layouts the constant is negated and an
/// inequality reversed, so a positive offset still points towards trailing.
pub(crate) fn directed(
    attribute: Attribute,
    relation: RelationKind,
    constant: f64,
    direction: LayoutDirection,
) -> (RelationKind, f64) {
    if direction == LayoutDirection::RightToLeft && attribute.is_directional() {
        (relation.reversed(), -constant)
    } else {
        (relation, constant)
    }
}

/// `lhs <relation> multiplier * rhs + constant`, or `lhs <relation> constant`
/// without a right-hand item
pub(crate) fn linear_constraint(
    lhs: Expression,
    relation: RelationKind,
    rhs: Option<Expression>,
    multiplier: f64,
    constant: f64,
    strength: Strength,
) -> Constraint {
    let weighted = match relation {
        RelationKind::LessOrEqual => LE(strength),
        RelationKind::Equal => EQ(strength),
        RelationKind::GreaterOrEqual => GE(strength),
    };
    match rhs {
        Some(rhs) => lhs | weighted | multiplier * rhs + constant,
        None => lhs | weighted | constant,
    }
}

/// Wrapper around the kasuari solver that remembers solved values
pub(crate) struct LayoutSolver {
    solver: KasuariSolver,
    values: HashMap<KasuariVariable, f64>,
}

impl LayoutSolver {
    pub fn new() -> Self {
        Self {
            solver: KasuariSolver::new(),
            values: HashMap::new(),
        }
    }

    /// Add a constraint; `description` names it in errors
    pub fn add(&mut self, constraint: &Constraint, description: &str) -> Result<(), CanvasError> {
        trace!(constraint = description, "adding to solver");
        self.solver
            .add_constraint(constraint.clone())
            .map_err(|e| match e {
                AddConstraintError::UnsatisfiableConstraint => {
                    CanvasError::unsatisfiable(description)
                }
                AddConstraintError::DuplicateConstraint => {
                    CanvasError::internal(format!("duplicate constraint: {}", description))
                }
                AddConstraintError::InternalSolverError(msg) => CanvasError::internal(format!(
                    "internal solver error for {}: {}",
                    description, msg
                )),
            })
    }

    pub fn remove(&mut self, constraint: &Constraint) {
        if let Err(e) = self.solver.remove_constraint(constraint) {
            warn!(error = ?e, "constraint was not in the solver");
        }
    }

    /// Start suggesting `frame` for an item
    pub fn add_suggestions(&mut self, vars: &ItemVars, frame: Rect) -> Result<(), CanvasError> {
        for (var, _) in vars.with_values(frame) {
            self.solver
                .add_edit_variable(var, Strength::STRONG)
                .map_err(|e| CanvasError::internal(format!("failed to add edit variable: {}", e)))?;
        }
        self.suggest(vars, frame)
    }

    /// Update the suggestion for an item already being suggested
    pub fn suggest(&mut self, vars: &ItemVars, frame: Rect) -> Result<(), CanvasError> {
        for (var, value) in vars.with_values(frame) {
            self.solver
                .suggest_value(var, value)
                .map_err(|e| CanvasError::internal(format!("failed to suggest value: {}", e)))?;
        }
        Ok(())
    }

    pub fn remove_suggestions(&mut self, vars: &ItemVars) {
        for (var, _) in vars.with_values(Rect::zero()) {
            if let Err(e) = self.solver.remove_edit_variable(var) {
                warn!(error = ?e, "edit variable was not in the solver");
            }
        }
    }

    /// Pull pending changes from the solver into the value cache
    pub fn refresh(&mut self) {
        for (var, value) in self.solver.fetch_changes() {
            self.values.insert(*var, *value);
        }
    }

    /// Solved value; variables the solver never reported are zero
    pub fn value(&self, var: KasuariVariable) -> f64 {
        self.values.get(&var).copied().unwrap_or(0.0)
    }

    /// Solved frame of an item
    pub fn frame(&self, vars: &ItemVars) -> Rect {
        Rect::new(
            self.value(vars.x),
            self.value(vars.y),
            self.value(vars.width),
            self.value(vars.height),
        )
    }
}

impl Default for LayoutSolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required(lhs: Expression, rhs: Option<Expression>, constant: f64) -> Constraint {
        linear_constraint(
            lhs,
            RelationKind::Equal,
            rhs,
            1.0,
            constant,
            Strength::REQUIRED,
        )
    }

    #[test]
    fn test_stronger_priority_wins() {
        let mut solver = LayoutSolver::new();
        let vars = ItemVars::new();
        let width = || -> Expression { vars.width.into() };
        let preferred = |value: f64, priority: Priority| {
            linear_constraint(
                width(),
                RelationKind::Equal,
                None,
                1.0,
                value,
                strength_for(priority),
            )
        };

        solver
            .add(&preferred(200.0, Priority::DEFAULT_LOW), "low")
            .unwrap();
        solver
            .add(&preferred(100.0, Priority::DEFAULT_HIGH), "high")
            .unwrap();
        solver
            .add(&preferred(300.0, Priority::FITTING_SIZE_LEVEL), "fitting")
            .unwrap();
        solver.refresh();

        assert!((solver.value(vars.width) - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_not_an_attribute_has_no_expression() {
        let vars = ItemVars::new();
        let expr = attribute_expression(
            &vars,
            &Insets::zero(),
            Attribute::NotAnAttribute,
            LayoutDirection::LeftToRight,
        );
        assert!(expr.is_none());
    }

    #[test]
    fn test_suggested_frame_is_solved() {
        let mut solver = LayoutSolver::new();
        let vars = ItemVars::new();
        let frame = Rect::new(5.0, 10.0, 100.0, 50.0);

        solver.add_suggestions(&vars, frame).unwrap();
        solver.refresh();

        assert!(solver.frame(&vars).approx_eq(&frame, 0.001));
    }

    #[test]
    fn test_edges_relative_to_suggested_item() {
        let mut solver = LayoutSolver::new();
        let parent = ItemVars::new();
        let child = ItemVars::new();
        let margins = Insets::uniform(8.0);
        let ltr = LayoutDirection::LeftToRight;
        let expr = |vars: &ItemVars, attribute| {
            attribute_expression(vars, &margins, attribute, ltr).unwrap()
        };

        solver
            .add_suggestions(&parent, Rect::new(0.0, 0.0, 200.0, 100.0))
            .unwrap();
        for (child_attr, parent_attr, offset) in [
            (Attribute::Leading, Attribute::LeadingMargin, 0.0),
            (Attribute::Trailing, Attribute::Trailing, -10.0),
            (Attribute::Top, Attribute::Top, 5.0),
            (Attribute::Height, Attribute::NotAnAttribute, 20.0),
        ] {
            let rhs = (parent_attr != Attribute::NotAnAttribute).then(|| expr(&parent, parent_attr));
            solver
                .add(&required(expr(&child, child_attr), rhs, offset), "test")
                .unwrap();
        }
        solver.refresh();

        let frame = solver.frame(&child);
        assert!(
            frame.approx_eq(&Rect::new(8.0, 5.0, 182.0, 20.0), 0.001),
            "unexpected frame {}",
            frame
        );
    }

    #[test]
    fn test_directed_constants() {
        let rtl = LayoutDirection::RightToLeft;
        let ltr = LayoutDirection::LeftToRight;

        assert_eq!(
            directed(Attribute::Leading, RelationKind::GreaterOrEqual, 4.0, rtl),
            (RelationKind::LessOrEqual, -4.0)
        );
        assert_eq!(
            directed(Attribute::TrailingMargin, RelationKind::Equal, -2.0, rtl),
            (RelationKind::Equal, 2.0)
        );
        assert_eq!(
            directed(Attribute::Left, RelationKind::GreaterOrEqual, 4.0, rtl),
            (RelationKind::GreaterOrEqual, 4.0)
        );
        assert_eq!(
            directed(Attribute::Leading, RelationKind::LessOrEqual, 4.0, ltr),
            (RelationKind::LessOrEqual, 4.0)
        );
    }

    #[test]
    fn test_right_to_left_leading_is_the_right_edge() {
        let mut solver = LayoutSolver::new();
        let parent = ItemVars::new();
        let child = ItemVars::new();
        let rtl = LayoutDirection::RightToLeft;
        let expr = |vars: &ItemVars, attribute| {
            attribute_expression(vars, &Insets::zero(), attribute, rtl).unwrap()
        };

        solver
            .add_suggestions(&parent, Rect::new(0.0, 0.0, 200.0, 100.0))
            .unwrap();
        let (_, constant) = directed(Attribute::Leading, RelationKind::Equal, 10.0, rtl);
        solver
            .add(
                &required(
                    expr(&child, Attribute::Leading),
                    Some(expr(&parent, Attribute::Leading)),
                    constant,
                ),
                "leading",
            )
            .unwrap();
        solver
            .add(&required(expr(&child, Attribute::Width), None, 30.0), "width")
            .unwrap();
        solver.refresh();

        let frame = solver.frame(&child);
        assert!((frame.right() - 190.0).abs() < 0.001, "unexpected frame {}", frame);
        assert!((frame.x - 160.0).abs() < 0.001, "unexpected frame {}", frame);
    }

    #[test]
    fn test_conflicting_required_constraints() {
        let mut solver = LayoutSolver::new();
        let vars = ItemVars::new();
        let width = || -> Expression { vars.width.into() };

        solver.add(&required(width(), None, 100.0), "first").unwrap();
        let result = solver.add(&required(width(), None, 200.0), "second");

        match result {
            Err(CanvasError::Unsatisfiable { constraint }) => assert_eq!(constraint, "second"),
            other => panic!("Expected Unsatisfiable error, got: {:?}", other),
        }
    }
}
