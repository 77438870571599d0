//! Error types for spanlight

use thiserror::Error;

/// Result type alias for spanlight operations
pub type Result<T> = std::result::Result<T, HighlightError>;

/// Highlighting error types
///
/// The span pipeline itself has no fatal paths; these errors surface only at
/// the edges that callers drive directly, such as loading a configuration
/// file or compiling a rule pattern. A generator that returns an error is
/// logged and treated as an empty pass, never propagated to the editing
/// surface.
#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("span generation failed: {0}")]
    Generator(String),
}
