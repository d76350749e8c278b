//! Core value types for the canvas backend

use std::fmt;

use serde::Deserialize;

/// Handle to an element owned by a [`Canvas`](super::Canvas)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) usize);

/// Handle to a guide owned by a [`Canvas`](super::Canvas)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GuideId(pub(crate) usize);

/// Handle to a constraint owned by a [`Canvas`](super::Canvas)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConstraintId(pub(crate) usize);

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether every coordinate is within `tolerance` of `other`'s
    pub fn approx_eq(&self, other: &Rect, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.width - other.width).abs() <= tolerance
            && (self.height - other.height).abs() <= tolerance
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.1}, {:.1}, {:.1} x {:.1})",
            tidy(self.x),
            tidy(self.y),
            tidy(self.width),
            tidy(self.height)
        )
    }
}

/// Round to one decimal; adding 0.0 turns -0.0 into 0.0
fn tidy(value: f64) -> f64 {
    (value * 10.0).round() / 10.0 + 0.0
}

/// Layout margins of an element
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Insets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Insets {
    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    pub fn uniform(inset: f64) -> Self {
        Self::new(inset, inset, inset, inset)
    }

    pub fn zero() -> Self {
        Self::uniform(0.0)
    }
}

impl Default for Insets {
    fn default() -> Self {
        Self::uniform(8.0)
    }
}

/// Direction in which leading and trailing run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

/// Axis along which a stack arranges its children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackAxis {
    Horizontal,
    Vertical,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(rect.right(), 40.0);
        assert_eq!(rect.bottom(), 60.0);
        assert_eq!(rect.center(), (25.0, 40.0));
    }

    #[test]
    fn test_rect_display_normalizes_negative_zero() {
        let rect = Rect::new(-0.0000001, 0.04, 10.0, 9.96);
        assert_eq!(rect.to_string(), "(0.0, 0.0, 10.0 x 10.0)");
    }

    #[test]
    fn test_default_insets() {
        assert_eq!(Insets::default(), Insets::uniform(8.0));
    }
}
