//! Layout attributes, relation kinds and priorities
//!
//! These are the vocabulary shared by every constraint description: which
//! edge, axis or dimension of an item is constrained, how the two sides are
//! related, and how strongly the relation must hold.

use std::fmt;

/// An attribute of an item's alignment rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Left,
    Right,
    Top,
    Bottom,
    Leading,
    Trailing,
    Width,
    Height,
    CenterX,
    CenterY,
    LastBaseline,
    FirstBaseline,
    LeftMargin,
    RightMargin,
    TopMargin,
    BottomMargin,
    LeadingMargin,
    TrailingMargin,
    CenterXWithinMargins,
    CenterYWithinMargins,
    /// Placeholder for the second item of a constant constraint
    NotAnAttribute,
}

/// The geometric axis an attribute belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeAxis {
    Horizontal,
    Vertical,
    /// Width or height
    Dimension,
    None,
}

impl Attribute {
    /// The width and height of the alignment rectangle.
    pub const SIZE: &'static [Attribute] = &[Attribute::Width, Attribute::Height];

    /// The center along both axes.
    pub const CENTER: &'static [Attribute] = &[Attribute::CenterX, Attribute::CenterY];

    /// The top and bottom edges.
    pub const VERTICAL_EDGES: &'static [Attribute] = &[Attribute::Top, Attribute::Bottom];

    /// The leading and trailing edges.
    pub const HORIZONTAL_EDGES: &'static [Attribute] = &[Attribute::Leading, Attribute::Trailing];

    /// Vertical edges followed by horizontal edges.
    pub const EDGES: &'static [Attribute] = &[
        Attribute::Top,
        Attribute::Bottom,
        Attribute::Leading,
        Attribute::Trailing,
    ];

    /// The top and bottom margin edges.
    pub const VERTICAL_MARGIN_EDGES: &'static [Attribute] =
        &[Attribute::TopMargin, Attribute::BottomMargin];

    /// The leading and trailing margin edges.
    pub const HORIZONTAL_MARGIN_EDGES: &'static [Attribute] =
        &[Attribute::LeadingMargin, Attribute::TrailingMargin];

    /// Vertical margin edges followed by horizontal margin edges.
    pub const MARGIN_EDGES: &'static [Attribute] = &[
        Attribute::TopMargin,
        Attribute::BottomMargin,
        Attribute::LeadingMargin,
        Attribute::TrailingMargin,
    ];

    /// Whether this attribute measures against the item's layout margins
    pub fn is_margin(self) -> bool {
        matches!(
            self,
            Attribute::LeftMargin
                | Attribute::RightMargin
                | Attribute::TopMargin
                | Attribute::BottomMargin
                | Attribute::LeadingMargin
                | Attribute::TrailingMargin
                | Attribute::CenterXWithinMargins
                | Attribute::CenterYWithinMargins
        )
    }

    /// The plain edge for a margin attribute; other attributes map to themselves.
    pub fn non_margin(self) -> Attribute {
        match self {
            Attribute::LeftMargin => Attribute::Left,
            Attribute::RightMargin => Attribute::Right,
            Attribute::TopMargin => Attribute::Top,
            Attribute::BottomMargin => Attribute::Bottom,
            Attribute::LeadingMargin => Attribute::Leading,
            Attribute::TrailingMargin => Attribute::Trailing,
            Attribute::CenterXWithinMargins => Attribute::CenterX,
            Attribute::CenterYWithinMargins => Attribute::CenterY,
            other => other,
        }
    }

    /// Whether a positive offset on this attribute moves an item outward.
    ///
    /// Trailing, right and bottom edges (margin or not) grow toward the far
    /// side of the container.
    pub fn is_far_edge(self) -> bool {
        matches!(
            self,
            Attribute::Trailing
                | Attribute::TrailingMargin
                | Attribute::Right
                | Attribute::RightMargin
                | Attribute::Bottom
                | Attribute::BottomMargin
        )
    }

    /// Whether the attribute follows the layout direction
    pub fn is_directional(self) -> bool {
        matches!(
            self,
            Attribute::Leading
                | Attribute::Trailing
                | Attribute::LeadingMargin
                | Attribute::TrailingMargin
        )
    }

    /// The axis the attribute is measured along; only attributes on the
    /// same axis can be related to each other
    pub fn axis(self) -> AttributeAxis {
        match self.non_margin() {
            Attribute::Left
            | Attribute::Right
            | Attribute::Leading
            | Attribute::Trailing
            | Attribute::CenterX => AttributeAxis::Horizontal,
            Attribute::Top
            | Attribute::Bottom
            | Attribute::CenterY
            | Attribute::LastBaseline
            | Attribute::FirstBaseline => AttributeAxis::Vertical,
            Attribute::Width | Attribute::Height => AttributeAxis::Dimension,
            _ => AttributeAxis::None,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Attribute::Left => "left",
            Attribute::Right => "right",
            Attribute::Top => "top",
            Attribute::Bottom => "bottom",
            Attribute::Leading => "leading",
            Attribute::Trailing => "trailing",
            Attribute::Width => "width",
            Attribute::Height => "height",
            Attribute::CenterX => "center_x",
            Attribute::CenterY => "center_y",
            Attribute::LastBaseline => "last_baseline",
            Attribute::FirstBaseline => "first_baseline",
            Attribute::LeftMargin => "left_margin",
            Attribute::RightMargin => "right_margin",
            Attribute::TopMargin => "top_margin",
            Attribute::BottomMargin => "bottom_margin",
            Attribute::LeadingMargin => "leading_margin",
            Attribute::TrailingMargin => "trailing_margin",
            Attribute::CenterXWithinMargins => "center_x_within_margins",
            Attribute::CenterYWithinMargins => "center_y_within_margins",
            Attribute::NotAnAttribute => "none",
        };
        f.write_str(name)
    }
}

/// How the two sides of a constraint relate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RelationKind {
    LessOrEqual,
    #[default]
    Equal,
    GreaterOrEqual,
}

impl RelationKind {
    /// The relation with its sides swapped
    pub fn reversed(self) -> RelationKind {
        match self {
            RelationKind::LessOrEqual => RelationKind::GreaterOrEqual,
            RelationKind::Equal => RelationKind::Equal,
            RelationKind::GreaterOrEqual => RelationKind::LessOrEqual,
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RelationKind::LessOrEqual => "<=",
            RelationKind::Equal => "=",
            RelationKind::GreaterOrEqual => ">=",
        })
    }
}

/// Priority of a constraint, from 1 (weakest) to 1000 (required)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Priority(f32);

impl Priority {
    pub const REQUIRED: Priority = Priority(1000.0);
    pub const DEFAULT_HIGH: Priority = Priority(750.0);
    pub const DEFAULT_LOW: Priority = Priority(250.0);
    pub const FITTING_SIZE_LEVEL: Priority = Priority(50.0);

    /// Create a priority, clamped to `1..=1000`
    pub fn new(value: f32) -> Self {
        Self(value.clamp(1.0, 1000.0))
    }

    pub fn value(self) -> f32 {
        self.0
    }

    pub fn is_required(self) -> bool {
        self.0 >= Self::REQUIRED.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::REQUIRED
    }
}

impl From<f32> for Priority {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
