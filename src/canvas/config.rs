//! Canvas configuration
//!
//! Every field has a default, so a configuration file only names what it
//! changes:
//!
//! ```toml
//! layout_direction = "right-to-left"
//! stack_spacing = 4.0
//!
//! [default_margins]
//! top = 16.0
//! bottom = 16.0
//! ```

use std::path::Path;

use serde::Deserialize;

use super::error::ConfigError;
use super::types::{Insets, LayoutDirection};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Which physical edge leading and trailing refer to
    pub layout_direction: LayoutDirection,

    /// Layout margins given to every new element
    pub default_margins: Insets,

    /// Gap between arranged children of new stack elements
    pub stack_spacing: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            layout_direction: LayoutDirection::LeftToRight,
            default_margins: Insets::default(),
            stack_spacing: 0.0,
        }
    }
}

impl CanvasConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn with_layout_direction(mut self, direction: LayoutDirection) -> Self {
        self.layout_direction = direction;
        self
    }

    pub fn with_default_margins(mut self, margins: Insets) -> Self {
        self.default_margins = margins;
        self
    }

    pub fn with_stack_spacing(mut self, spacing: f64) -> Self {
        self.stack_spacing = spacing;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = CanvasConfig::from_str("").unwrap();
        assert_eq!(config, CanvasConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config = CanvasConfig::from_str(
            r#"
layout_direction = "right-to-left"
stack_spacing = 4.0

[default_margins]
top = 16.0
"#,
        )
        .unwrap();

        assert_eq!(config.layout_direction, LayoutDirection::RightToLeft);
        assert_eq!(config.stack_spacing, 4.0);
        assert_eq!(config.default_margins.top, 16.0);
        assert_eq!(config.default_margins.left, 8.0);
    }

    #[test]
    fn test_invalid_direction_is_a_parse_error() {
        let result = CanvasConfig::from_str(r#"layout_direction = "diagonal""#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_from_missing_file() {
        let result = CanvasConfig::from_file(Path::new("/nonexistent/canvas.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
