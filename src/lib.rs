//! Pin Layout - declarative layout trees for constraint-based layout
//!
//! This library lets you describe a hierarchy of elements together with the
//! geometric relations between them as an immutable tree of [`Node`]s, and
//! then turn the whole tree into a live element hierarchy with active
//! constraints in one call.
//!
//! # Example
//!
//! ```rust
//! use pin_layout::canvas::{Canvas, Rect};
//! use pin_layout::{Attribute, Pinnable};
//!
//! let mut canvas = Canvas::new();
//! let root = canvas.element_with_frame("root", Rect::new(0.0, 0.0, 320.0, 480.0));
//! let title = canvas.element("title");
//! let body = canvas.element("body");
//!
//! let tree = root.add([
//!     title
//!         .size_height(44.0)
//!         .pin_to(&[Attribute::Top, Attribute::Leading, Attribute::Trailing]),
//!     body.pin_anchor(pin_layout::AnchorKey::TOP, title.anchor(pin_layout::AnchorKey::BOTTOM), 8.0)
//!         .pin_to(&[Attribute::Bottom, Attribute::Leading, Attribute::Trailing]),
//! ]);
//!
//! tree.activate(&mut canvas).unwrap();
//! canvas.layout();
//! assert!(canvas.frame(body).approx_eq(&Rect::new(0.0, 52.0, 320.0, 428.0), 0.001));
//!
//! tree.deactivate(&mut canvas);
//! assert!(canvas.children(root).is_empty());
//! ```
//!
//! The tree itself is backend-agnostic: it drives any [`LayoutBackend`].
//! The bundled [`canvas::Canvas`] backend solves layouts with a Cassowary
//! solver and needs no UI toolkit.

pub mod anchor;
pub mod attribute;
pub mod backend;
pub mod canvas;
pub mod config;
pub mod group;
pub mod node;
pub mod normalize;
pub mod relation;

pub use anchor::{Anchor, AnchorKey, Dimension, LinearAxis, XAxis, YAxis};
pub use attribute::{Attribute, Priority, RelationKind};
pub use backend::{ConstraintSpec, LayoutBackend, Target};
pub use config::PinOptions;
pub use group::{Group, GroupBuilder};
pub use node::{Containment, Node, Pinnable};
pub use normalize::{normalize, NormalizedAttribute};
pub use relation::{ParentRelation, Relation, SelfRelation};
