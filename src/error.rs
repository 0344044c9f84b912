use thiserror::Error;

/// Errors raised while loading an [`EditorConfig`](crate::config::EditorConfig).
///
/// Geometry and grouping operations never fail; configuration is the only
/// fallible surface of the crate.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse editor config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("nested group z step must be positive, got {0}")]
    InvalidZStep(i32),

    #[error("comment inset `{name}` must not be negative, got {value}")]
    NegativeInset { name: &'static str, value: f32 },

    #[error("default comment width must be positive, got {0}")]
    InvalidCommentWidth(f32),
}
