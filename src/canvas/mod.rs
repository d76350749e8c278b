//! A platform-free layout backend
//!
//! [`Canvas`] owns every element, guide and constraint in an arena and hands
//! out copyable ids. It keeps the element hierarchy, installs each active
//! constraint on the nearest common ancestor of the items it relates, and
//! feeds the active constraints to a Cassowary solver to produce frames.
//!
//! # Example
//!
//! ```rust
//! use pin_layout::canvas::{Canvas, Rect};
//! use pin_layout::Pinnable;
//!
//! let mut canvas = Canvas::new();
//! let root = canvas.element_with_frame("root", Rect::new(0.0, 0.0, 300.0, 200.0));
//! let card = canvas.element("card");
//!
//! let tree = root.add([card.pin_to_edges(10.0)]);
//! tree.activate(&mut canvas).unwrap();
//! canvas.layout();
//!
//! assert!(canvas.frame(card).approx_eq(&Rect::new(10.0, 10.0, 280.0, 180.0), 0.001));
//! ```

pub mod config;
pub mod error;
mod solver;
pub mod stack;
pub mod types;

pub use config::CanvasConfig;
pub use error::{CanvasError, ConfigError};
pub use stack::StackPinnable;
pub use types::{ConstraintId, ElementId, GuideId, Insets, LayoutDirection, Rect, StackAxis};

use std::fmt::Write as _;

use tracing::{debug, trace, warn};

use crate::attribute::Attribute;
use crate::backend::{ConstraintSpec, LayoutBackend, Target};
use crate::node::{Node, Pinnable};

use solver::{
    attribute_expression, directed, linear_constraint, strength_for, ItemVars, LayoutSolver,
};
use stack::Arrangement;

struct ElementData {
    name: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    guides: Vec<GuideId>,
    constraints: Vec<ConstraintId>,
    frame: Rect,
    margins: Insets,
    intrinsic_frame: bool,
    invalidations: usize,
    arrangement: Option<Arrangement>,
    vars: ItemVars,
}

struct GuideData {
    owner: Option<ElementId>,
    vars: ItemVars,
}

struct ConstraintData {
    spec: ConstraintSpec<Canvas>,
    /// Element the constraint is installed on and its solver form, while active
    installed: Option<(ElementId, kasuari::Constraint)>,
}

/// Arena of elements, guides and constraints backed by a constraint solver.
///
/// Ids are only meaningful for the canvas that issued them; passing an id
/// from another canvas panics.
pub struct Canvas {
    config: CanvasConfig,
    elements: Vec<ElementData>,
    guides: Vec<GuideData>,
    constraints: Vec<Option<ConstraintData>>,
    /// Released constraint slots, reused by `make_constraint`
    free_constraints: Vec<usize>,
    solver: LayoutSolver,
}

impl Canvas {
    pub fn new() -> Self {
        Self::with_config(CanvasConfig::default())
    }

    pub fn with_config(config: CanvasConfig) -> Self {
        Self {
            config,
            elements: Vec::new(),
            guides: Vec::new(),
            constraints: Vec::new(),
            free_constraints: Vec::new(),
            solver: LayoutSolver::new(),
        }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    // ========================================================================
    // Elements
    // ========================================================================

    /// Create a detached element with an empty intrinsic frame
    pub fn element(&mut self, name: impl Into<String>) -> ElementId {
        self.element_with_frame(name, Rect::zero())
    }

    /// Create a detached element whose intrinsic frame is `frame`
    pub fn element_with_frame(&mut self, name: impl Into<String>, frame: Rect) -> ElementId {
        let id = ElementId(self.elements.len());
        let vars = ItemVars::new();
        if let Err(e) = self.solver.add_suggestions(&vars, frame) {
            warn!(error = %e, "could not suggest intrinsic frame");
        }
        self.elements.push(ElementData {
            name: name.into(),
            parent: None,
            children: Vec::new(),
            guides: Vec::new(),
            constraints: Vec::new(),
            frame,
            margins: self.config.default_margins,
            intrinsic_frame: true,
            invalidations: 0,
            arrangement: None,
            vars,
        });
        id
    }

    /// Look up an element by name
    pub fn lookup(&self, name: &str) -> Result<ElementId, CanvasError> {
        self.elements
            .iter()
            .position(|e| e.name == name)
            .map(ElementId)
            .ok_or_else(|| CanvasError::UnknownElement(name.to_string()))
    }

    pub fn name(&self, element: ElementId) -> &str {
        &self.data(element).name
    }

    pub fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.data(element).parent
    }

    /// Children in insertion order
    pub fn children(&self, element: ElementId) -> &[ElementId] {
        &self.data(element).children
    }

    pub fn guides_of(&self, element: ElementId) -> &[GuideId] {
        &self.data(element).guides
    }

    /// Active constraints installed on `element`
    pub fn constraints_on(&self, element: ElementId) -> &[ConstraintId] {
        &self.data(element).constraints
    }

    pub fn has_intrinsic_frame(&self, element: ElementId) -> bool {
        self.data(element).intrinsic_frame
    }

    /// Number of times `invalidate` was called for `element`
    pub fn invalidation_count(&self, element: ElementId) -> usize {
        self.data(element).invalidations
    }

    /// The frame the element suggests while its intrinsic frame is on
    pub fn intrinsic_frame(&self, element: ElementId) -> Rect {
        self.data(element).frame
    }

    pub fn set_frame(&mut self, element: ElementId, frame: Rect) {
        let data = &mut self.elements[element.0];
        data.frame = frame;
        if data.intrinsic_frame {
            let vars = data.vars;
            if let Err(e) = self.solver.suggest(&vars, frame) {
                warn!(error = %e, "could not suggest intrinsic frame");
            }
        }
    }

    pub fn margins(&self, element: ElementId) -> Insets {
        self.data(element).margins
    }

    /// Change an element's layout margins.
    ///
    /// Constraints activated afterwards see the new margins.
    pub fn set_margins(&mut self, element: ElementId, margins: Insets) {
        self.elements[element.0].margins = margins;
    }

    // ========================================================================
    // Guides and constraints
    // ========================================================================

    pub fn guide_owner(&self, guide: GuideId) -> Option<ElementId> {
        self.guides[guide.0].owner
    }

    /// Whether the constraint is installed on an element
    pub fn is_active(&self, constraint: ConstraintId) -> bool {
        self.constraint_data(constraint)
            .is_some_and(|data| data.installed.is_some())
    }

    /// Description of a constraint that has not been released
    pub fn constraint_spec(&self, constraint: ConstraintId) -> Option<&ConstraintSpec<Canvas>> {
        self.constraint_data(constraint).map(|data| &data.spec)
    }

    // ========================================================================
    // Solving
    // ========================================================================

    /// Bring solved frames up to date with the active constraints
    pub fn layout(&mut self) {
        self.solver.refresh();
    }

    /// Solved frame as of the last [`layout`](Self::layout) or invalidation
    pub fn frame(&self, element: ElementId) -> Rect {
        self.solver.frame(&self.data(element).vars)
    }

    /// Solved frame of a guide as of the last [`layout`](Self::layout) or invalidation
    pub fn guide_frame(&self, guide: GuideId) -> Rect {
        self.solver.frame(&self.guides[guide.0].vars)
    }

    /// Indented dump of the subtree at `root` with solved frames
    pub fn describe(&self, root: ElementId) -> String {
        let mut out = String::new();
        self.describe_into(root, 0, &mut out);
        out.truncate(out.trim_end().len());
        out
    }

    fn describe_into(&self, element: ElementId, depth: usize, out: &mut String) {
        let data = self.data(element);
        let _ = write!(
            out,
            "{:indent$}{} {}",
            "",
            data.name,
            self.frame(element),
            indent = depth * 2
        );
        if let Some(arrangement) = &data.arrangement {
            let _ = write!(out, " stack={:?}", arrangement.axis());
        }
        if !data.constraints.is_empty() {
            let _ = write!(out, " constraints={}", data.constraints.len());
        }
        if !data.guides.is_empty() {
            let _ = write!(out, " guides={}", data.guides.len());
        }
        out.push('\n');
        for &child in &data.children {
            self.describe_into(child, depth + 1, out);
        }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn data(&self, element: ElementId) -> &ElementData {
        &self.elements[element.0]
    }

    fn constraint_data(&self, constraint: ConstraintId) -> Option<&ConstraintData> {
        self.constraints.get(constraint.0).and_then(Option::as_ref)
    }

    fn target_name(&self, target: Target<Canvas>) -> String {
        match target {
            Target::Element(element) => self.data(element).name.clone(),
            Target::Guide(guide) => format!("guide#{}", guide.0),
        }
    }

    /// The element whose ancestor chain a target starts at
    fn target_owner(&self, target: Target<Canvas>) -> Result<ElementId, CanvasError> {
        match target {
            Target::Element(element) => Ok(element),
            Target::Guide(guide) => self
                .guide_owner(guide)
                .ok_or(CanvasError::GuideNotInstalled(guide)),
        }
    }

    /// `element` followed by its ancestors, innermost first
    fn ancestors(&self, element: ElementId) -> Vec<ElementId> {
        let mut chain = vec![element];
        let mut current = element;
        while let Some(parent) = self.data(current).parent {
            chain.push(parent);
            current = parent;
        }
        chain
    }

    fn nearest_common_ancestor(&self, a: ElementId, b: ElementId) -> Option<ElementId> {
        let chain = self.ancestors(a);
        self.ancestors(b)
            .into_iter()
            .find(|candidate| chain.contains(candidate))
    }

    /// The element a constraint is installed on while active
    fn installation_element(&self, spec: &ConstraintSpec<Canvas>) -> Result<ElementId, CanvasError> {
        let first = self.target_owner(spec.item)?;
        let Some(to) = spec.to_item else {
            return Ok(first);
        };
        let second = self.target_owner(to)?;
        self.nearest_common_ancestor(first, second).ok_or_else(|| {
            CanvasError::no_common_ancestor(self.target_name(spec.item), self.target_name(to))
        })
    }

    fn expression(
        &self,
        target: Target<Canvas>,
        attribute: Attribute,
    ) -> Result<kasuari::Expression, CanvasError> {
        let (vars, margins) = match target {
            Target::Element(element) => {
                let data = self.data(element);
                (data.vars, data.margins)
            }
            Target::Guide(guide) => (self.guides[guide.0].vars, Insets::zero()),
        };
        attribute_expression(&vars, &margins, attribute, self.config.layout_direction)
            .ok_or(CanvasError::MissingAttribute { attribute })
    }

    /// Solver form of a constraint description
    fn build(&self, spec: &ConstraintSpec<Canvas>) -> Result<kasuari::Constraint, CanvasError> {
        let lhs = self.expression(spec.item, spec.attribute)?;
        let rhs = match spec.to_item {
            Some(to) => {
                if spec.attribute.axis() != spec.to_attribute.axis() {
                    return Err(CanvasError::AxisMismatch {
                        attribute: spec.attribute,
                        to_attribute: spec.to_attribute,
                    });
                }
                Some(self.expression(to, spec.to_attribute)?)
            }
            None => None,
        };
        let (relation, constant) = directed(
            spec.attribute,
            spec.relation,
            spec.constant,
            self.config.layout_direction,
        );
        Ok(linear_constraint(
            lhs,
            relation,
            rhs,
            spec.multiplier,
            constant,
            strength_for(spec.priority),
        ))
    }

    /// Human-readable form of a constraint using element names
    fn describe_spec(&self, spec: &ConstraintSpec<Canvas>) -> String {
        let mut out = format!(
            "{}.{} {} ",
            self.target_name(spec.item),
            spec.attribute,
            spec.relation
        );
        match spec.to_item {
            Some(to) => {
                let _ = write!(out, "{}.{}", self.target_name(to), spec.to_attribute);
                if spec.multiplier != 1.0 {
                    let _ = write!(out, " * {}", spec.multiplier);
                }
                if spec.constant != 0.0 {
                    let _ = write!(out, " + {}", spec.constant);
                }
            }
            None => {
                let _ = write!(out, "{}", spec.constant);
            }
        }
        out
    }

    fn detach(&mut self, child: ElementId) {
        if let Some(parent) = self.data(child).parent {
            self.remove_child(parent, child);
        }
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutBackend for Canvas {
    type Element = ElementId;
    type Guide = GuideId;
    type Constraint = ConstraintId;
    type Error = CanvasError;

    fn add_child(&mut self, parent: ElementId, child: ElementId) {
        self.detach(child);
        trace!(parent = %self.data(parent).name, child = %self.data(child).name, "add child");
        self.elements[parent.0].children.push(child);
        self.elements[child.0].parent = Some(parent);
    }

    fn remove_child(&mut self, parent: ElementId, child: ElementId) -> bool {
        if self.data(child).parent != Some(parent) {
            return false;
        }
        trace!(parent = %self.data(parent).name, child = %self.data(child).name, "remove child");
        self.elements[parent.0].children.retain(|&c| c != child);
        self.elements[child.0].parent = None;
        self.remove_arranged(parent, child);
        true
    }

    fn set_intrinsic_frame(&mut self, element: ElementId, enabled: bool) {
        let data = &mut self.elements[element.0];
        if data.intrinsic_frame == enabled {
            return;
        }
        data.intrinsic_frame = enabled;
        let (vars, frame) = (data.vars, data.frame);
        if enabled {
            if let Err(e) = self.solver.add_suggestions(&vars, frame) {
                warn!(error = %e, "could not suggest intrinsic frame");
            }
        } else {
            self.solver.remove_suggestions(&vars);
        }
    }

    /// Re-measure: solved frames are brought up to date immediately
    fn invalidate(&mut self, element: ElementId) {
        let data = &mut self.elements[element.0];
        data.invalidations += 1;
        debug!(element = %data.name, "invalidated");
        self.layout();
    }

    fn make_constraint(&mut self, spec: ConstraintSpec<Canvas>) -> ConstraintId {
        let data = Some(ConstraintData {
            spec,
            installed: None,
        });
        match self.free_constraints.pop() {
            Some(index) => {
                self.constraints[index] = data;
                ConstraintId(index)
            }
            None => {
                self.constraints.push(data);
                ConstraintId(self.constraints.len() - 1)
            }
        }
    }

    fn activate(&mut self, constraint: &ConstraintId) -> Result<(), CanvasError> {
        let data = self
            .constraint_data(*constraint)
            .ok_or(CanvasError::UnknownConstraint(*constraint))?;
        if data.installed.is_some() {
            return Ok(());
        }
        let spec = data.spec.clone();
        let owner = self.installation_element(&spec)?;
        let built = self.build(&spec)?;
        let description = self.describe_spec(&spec);
        self.solver.add(&built, &description)?;

        debug!(constraint = %description, on = %self.data(owner).name, "installed");
        self.elements[owner.0].constraints.push(*constraint);
        if let Some(data) = self.constraints[constraint.0].as_mut() {
            data.installed = Some((owner, built));
        }
        Ok(())
    }

    fn deactivate(&mut self, constraint: &ConstraintId) {
        let Some(data) = self
            .constraints
            .get_mut(constraint.0)
            .and_then(Option::as_mut)
        else {
            return;
        };
        if let Some((owner, built)) = data.installed.take() {
            self.solver.remove(&built);
            self.elements[owner.0].constraints.retain(|c| c != constraint);
        }
    }

    fn release(&mut self, constraint: ConstraintId) {
        self.deactivate(&constraint);
        if let Some(slot) = self.constraints.get_mut(constraint.0) {
            if slot.take().is_some() {
                self.free_constraints.push(constraint.0);
            }
        }
    }

    fn make_guide(&mut self) -> GuideId {
        let id = GuideId(self.guides.len());
        self.guides.push(GuideData {
            owner: None,
            vars: ItemVars::new(),
        });
        id
    }

    fn add_guide(&mut self, owner: ElementId, guide: GuideId) {
        if let Some(previous) = self.guides[guide.0].owner {
            self.remove_guide(previous, guide);
        }
        self.guides[guide.0].owner = Some(owner);
        self.elements[owner.0].guides.push(guide);
    }

    fn remove_guide(&mut self, owner: ElementId, guide: GuideId) {
        if self.guides[guide.0].owner != Some(owner) {
            return;
        }
        self.guides[guide.0].owner = None;
        self.elements[owner.0].guides.retain(|&g| g != guide);
    }
}

impl Pinnable<Canvas> for ElementId {
    fn to_node(&self) -> Node<Canvas> {
        Node::new(*self)
    }

    fn element(&self) -> ElementId {
        *self
    }
}

impl From<ElementId> for Target<Canvas> {
    fn from(element: ElementId) -> Self {
        Target::Element(element)
    }
}

impl From<GuideId> for Target<Canvas> {
    fn from(guide: GuideId) -> Self {
        Target::Guide(guide)
    }
}
