//! Editor-wide tunables.
//!
//! [`EditorConfig`] can be built in code or loaded from JSON. Missing fields fall
//! back to the defaults listed on each field.
//!
//! ```
//! use node_group_editor::EditorConfig;
//!
//! let config = EditorConfig::from_json(r#"{ "nested_group_z_step": 4 }"#).unwrap();
//! assert_eq!(config.nested_group_z_step, 4);
//! assert!(config.group_mode_default);
//! ```

use crate::error::ConfigError;
use crate::placement::PlacementInsets;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Base z-index of ordinary nodes (default: 100).
    pub node_z_index: i32,
    /// Base z-index of comment nodes (default: 0). Comments render below nodes.
    pub commenter_z_index: i32,
    /// Base z-index raise applied to a comment nested in another comment
    /// (default: 2, one layer for each of the unselected/selected pair).
    pub nested_group_z_step: i32,
    /// Whether new comment nodes start in group mode (default: true).
    pub group_mode_default: bool,
    /// Width a comment node takes when placed without an explicit size (default: 170).
    pub comment_default_width: f32,
    /// Frame around the content area when a comment is placed with an explicit size.
    pub comment_insets: PlacementInsets,
    /// Name given to new comment nodes (default: "Comment").
    pub default_comment_name: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            node_z_index: 100,
            commenter_z_index: 0,
            nested_group_z_step: 2,
            group_mode_default: true,
            comment_default_width: 170.0,
            comment_insets: PlacementInsets::default(),
            default_comment_name: "Comment".to_string(),
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values the grouping and placement code relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.nested_group_z_step <= 0 {
            return Err(ConfigError::InvalidZStep(self.nested_group_z_step));
        }
        if !(self.comment_default_width > 0.0) {
            return Err(ConfigError::InvalidCommentWidth(self.comment_default_width));
        }
        let insets = &self.comment_insets;
        for (name, value) in [("left", insets.left), ("top", insets.top), ("bottom", insets.bottom)] {
            if value < 0.0 {
                return Err(ConfigError::NegativeInset { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EditorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = EditorConfig::from_json("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_from_json_overrides_fields() {
        let config = EditorConfig::from_json(
            r#"{ "node_z_index": 10, "group_mode_default": false, "comment_insets": { "left": 4.0 } }"#,
        )
        .unwrap();
        assert_eq!(config.node_z_index, 10);
        assert!(!config.group_mode_default);
        assert_eq!(config.comment_insets.left, 4.0);
        assert_eq!(config.comment_insets.top, PlacementInsets::default().top);
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        let err = EditorConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validate_rejects_zero_step() {
        let err = EditorConfig::from_json(r#"{ "nested_group_z_step": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidZStep(0)));
    }

    #[test]
    fn test_validate_rejects_negative_inset() {
        let mut config = EditorConfig::default();
        config.comment_insets.bottom = -1.0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::NegativeInset { name: "bottom", .. }));
    }

    #[test]
    fn test_validate_rejects_zero_width() {
        let config = EditorConfig { comment_default_width: 0.0, ..EditorConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidCommentWidth(_))));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = EditorConfig { commenter_z_index: -5, ..EditorConfig::default() };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(EditorConfig::from_json(&json).unwrap(), config);
    }
}
