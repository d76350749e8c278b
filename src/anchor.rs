//! Axis-typed anchors
//!
//! An [`AnchorKey`] names one attribute of an item and carries its axis in
//! the type, so an x-axis anchor can only be related to another x-axis
//! anchor. An [`Anchor`] binds a key to a concrete element or guide.

use std::fmt;
use std::marker::PhantomData;

use crate::attribute::Attribute;
use crate::backend::{LayoutBackend, Target};

/// Horizontal positions (leading, trailing, left, right, center x)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XAxis;

/// Vertical positions (top, bottom, center y, baselines)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YAxis;

/// Width and height
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimension;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::XAxis {}
    impl Sealed for super::YAxis {}
    impl Sealed for super::Dimension {}
}

/// Marker for the three anchor axes
pub trait AnchorAxis: sealed::Sealed + Copy + 'static {}

impl AnchorAxis for XAxis {}
impl AnchorAxis for YAxis {}
impl AnchorAxis for Dimension {}

/// A positional axis with a start, an end and a center
pub trait LinearAxis: AnchorAxis {
    const START: Attribute;
    const END: Attribute;
    const CENTER: Attribute;
}

impl LinearAxis for XAxis {
    const START: Attribute = Attribute::Leading;
    const END: Attribute = Attribute::Trailing;
    const CENTER: Attribute = Attribute::CenterX;
}

impl LinearAxis for YAxis {
    const START: Attribute = Attribute::Top;
    const END: Attribute = Attribute::Bottom;
    const CENTER: Attribute = Attribute::CenterY;
}

/// An attribute tagged with its axis
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct AnchorKey<K> {
    attribute: Attribute,
    axis: PhantomData<K>,
}

impl<K> AnchorKey<K> {
    const fn new(attribute: Attribute) -> Self {
        Self {
            attribute,
            axis: PhantomData,
        }
    }

    pub fn attribute(self) -> Attribute {
        self.attribute
    }
}

impl<K> fmt::Debug for AnchorKey<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnchorKey({})", self.attribute)
    }
}

impl AnchorKey<XAxis> {
    pub const LEADING: Self = Self::new(Attribute::Leading);
    pub const TRAILING: Self = Self::new(Attribute::Trailing);
    pub const LEFT: Self = Self::new(Attribute::Left);
    pub const RIGHT: Self = Self::new(Attribute::Right);
    pub const CENTER_X: Self = Self::new(Attribute::CenterX);
}

impl AnchorKey<YAxis> {
    pub const TOP: Self = Self::new(Attribute::Top);
    pub const BOTTOM: Self = Self::new(Attribute::Bottom);
    pub const CENTER_Y: Self = Self::new(Attribute::CenterY);
    pub const FIRST_BASELINE: Self = Self::new(Attribute::FirstBaseline);
    pub const LAST_BASELINE: Self = Self::new(Attribute::LastBaseline);
}

impl AnchorKey<Dimension> {
    pub const WIDTH: Self = Self::new(Attribute::Width);
    pub const HEIGHT: Self = Self::new(Attribute::Height);
}

/// An anchor on a concrete element or guide
pub struct Anchor<B: LayoutBackend, K> {
    target: Target<B>,
    key: AnchorKey<K>,
}

impl<B: LayoutBackend, K: AnchorAxis> Anchor<B, K> {
    pub fn new(target: impl Into<Target<B>>, key: AnchorKey<K>) -> Self {
        Self {
            target: target.into(),
            key,
        }
    }

    pub fn target(&self) -> Target<B> {
        self.target
    }

    pub fn attribute(&self) -> Attribute {
        self.key.attribute
    }
}

impl<B: LayoutBackend, K: AnchorAxis> Clone for Anchor<B, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: LayoutBackend, K: AnchorAxis> Copy for Anchor<B, K> {}

impl<B: LayoutBackend, K> fmt::Debug for Anchor<B, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}.{}", self.target, self.key.attribute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_keys_carry_attributes() {
        assert_eq!(AnchorKey::LEADING.attribute(), Attribute::Leading);
        assert_eq!(AnchorKey::CENTER_Y.attribute(), Attribute::CenterY);
        assert_eq!(AnchorKey::HEIGHT.attribute(), Attribute::Height);
    }

    #[test]
    fn test_linear_axes() {
        assert_eq!(<XAxis as LinearAxis>::CENTER, Attribute::CenterX);
        assert_eq!(<YAxis as LinearAxis>::START, Attribute::Top);
        assert_eq!(<YAxis as LinearAxis>::END, Attribute::Bottom);
    }
}
