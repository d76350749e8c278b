//! Error types for the canvas backend

use thiserror::Error;

use crate::attribute::Attribute;

use super::types::{ConstraintId, GuideId};

/// Errors reported while activating constraints or solving the canvas
#[derive(Debug, Error)]
pub enum CanvasError {
    /// The constrained items live in disjoint hierarchies
    #[error("no common ancestor for '{first}' and '{second}'")]
    NoCommonAncestor { first: String, second: String },

    /// A constraint refers to a guide that is not added to any element
    #[error("guide {0:?} is not added to an element")]
    GuideNotInstalled(GuideId),

    /// Lookup of an element name that does not exist
    #[error("unknown element '{0}'")]
    UnknownElement(String),

    /// A constraint handle that was released or never issued
    #[error("unknown constraint {0:?}")]
    UnknownConstraint(ConstraintId),

    /// A constraint names an attribute with no geometric meaning
    #[error("attribute '{attribute}' cannot be constrained")]
    MissingAttribute { attribute: Attribute },

    /// The two attributes of a constraint lie on different axes
    #[error("cannot relate '{attribute}' to '{to_attribute}': different axes")]
    AxisMismatch {
        attribute: Attribute,
        to_attribute: Attribute,
    },

    /// A required constraint conflicts with the active ones
    #[error("unsatisfiable constraint {constraint}: conflicts with existing constraints")]
    Unsatisfiable { constraint: String },

    #[error("internal solver error: {0}")]
    Internal(String),
}

impl CanvasError {
    pub fn no_common_ancestor(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self::NoCommonAncestor {
            first: first.into(),
            second: second.into(),
        }
    }

    pub fn unsatisfiable(constraint: impl Into<String>) -> Self {
        Self::Unsatisfiable {
            constraint: constraint.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

/// Errors that can occur when loading a canvas configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read canvas configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse canvas configuration TOML: {0}")]
    Parse(#[from] toml::de::Error),
}
