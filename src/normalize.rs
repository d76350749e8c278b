//! Attribute and offset normalization for edge pins
//!
//! When a child is pinned to one of its parent's attributes, the declared
//! attribute names the parent side. The child side always uses the plain
//! edge, so pinning to `leading_margin` measures the child's `leading`
//! against the parent's margin region. Offsets read as inward padding: a
//! positive padding on a far edge (trailing, right, bottom) is negated so it
//! pulls the child back inside the parent.

use crate::attribute::Attribute;

/// Result of normalizing one declared attribute
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedAttribute {
    /// Attribute used for the child item
    pub child: Attribute,
    /// Attribute used for the parent item (the declared one)
    pub parent: Attribute,
    /// Signed constant passed to the constraint
    pub offset: f64,
}

/// Normalize a declared attribute and padding
pub fn normalize(attribute: Attribute, offset: f64) -> NormalizedAttribute {
    NormalizedAttribute {
        child: attribute.non_margin(),
        parent: attribute,
        offset: semantic_offset(attribute, offset),
    }
}

/// Offset that pushes an item inward from the edge named by `attribute`
pub fn semantic_offset(attribute: Attribute, offset: f64) -> f64 {
    if attribute.is_far_edge() {
        -offset
    } else {
        offset
    }
}
