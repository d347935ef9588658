use thiserror::Error;

/// Errors raised while turning configuration into brush settings.
///
/// Painting itself never fails: out-of-range requests such as undoing past
/// the first snapshot or stepping past the largest brush are silently clamped.
#[derive(Debug, Error)]
pub enum PaintError {
    #[error("invalid hex color `{0}`, expected #RRGGBB")]
    InvalidColor(String),

    #[error("unsupported brush size {0}px")]
    UnsupportedBrushSize(u32),

    #[error("the {0} palette must contain at least one color")]
    EmptyPalette(&'static str),

    #[error("history limit must be at least 1")]
    InvalidHistoryLimit,

    #[error("failed to parse config: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for configuration operations
pub type PaintResult<T> = Result<T, PaintError>;
