// File: crates/figpolish-core/src/error.rs
// Summary: Error type shared by the figure model and the polishing helpers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FigError {
    /// Bad numeric unit, bad selector, caption overflow, stale handle, ...
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("render failed: {0}")]
    Render(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("style sheet: {0}")]
    Style(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, FigError>;

pub(crate) fn invalid(msg: impl Into<String>) -> FigError {
    FigError::InvalidInput(msg.into())
}
