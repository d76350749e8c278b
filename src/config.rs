//! Options for edge pins

use crate::attribute::{Priority, RelationKind};

/// Options applied to every attribute of a `pin_to_with` call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinOptions {
    /// Relation between the child's edge and the parent's edge
    pub relation: RelationKind,

    /// Multiplier applied to the parent's attribute
    pub multiplier: f64,

    /// Inward padding; negated for trailing, right and bottom edges
    pub padding: f64,

    /// Priority of every generated constraint
    pub priority: Priority,
}

impl Default for PinOptions {
    fn default() -> Self {
        Self {
            relation: RelationKind::Equal,
            multiplier: 1.0,
            padding: 0.0,
            priority: Priority::REQUIRED,
        }
    }
}

impl PinOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_relation(mut self, relation: RelationKind) -> Self {
        self.relation = relation;
        self
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = PinOptions::default();
        assert_eq!(options.relation, RelationKind::Equal);
        assert_eq!(options.multiplier, 1.0);
        assert_eq!(options.padding, 0.0);
        assert_eq!(options.priority, Priority::REQUIRED);
    }

    #[test]
    fn test_builder_pattern() {
        let options = PinOptions::new()
            .with_padding(16.0)
            .with_relation(RelationKind::GreaterOrEqual)
            .with_priority(Priority::DEFAULT_HIGH);

        assert_eq!(options.padding, 16.0);
        assert_eq!(options.relation, RelationKind::GreaterOrEqual);
        assert_eq!(options.priority, Priority::DEFAULT_HIGH);
        assert_eq!(options.multiplier, 1.0);
    }
}
