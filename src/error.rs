//! Error type shared by the color/style engine and the layout pipeline.

use thiserror::Error;

/// Everything that can abort a chart render.
///
/// All variants are synchronous and render-local: nothing here is transient,
/// so callers never retry.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChartError {
    /// The dataset or an option does not have the required shape.
    #[error("invalid chart input: {0}")]
    Validation(String),

    /// More distinct category names than color pairs, with no wraparound.
    #[error("color pool exhausted: {needed} categories need a pair, but only {available} pairs are available")]
    ColorPoolExhausted { needed: usize, available: usize },

    /// An explicit binding contradicts one already made within the same render.
    #[error("inconsistent {kind} override for '{name}': already bound to {existing}, requested {requested}")]
    InconsistentOverride {
        kind: &'static str,
        name: String,
        existing: String,
        requested: String,
    },

    /// The rendering backend refused a drawing instruction.
    #[error("rendering backend error: {0}")]
    Backend(String),
}

impl ChartError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        ChartError::Validation(msg.into())
    }
}

/// Result alias for the core pipeline.
pub type Result<T> = std::result::Result<T, ChartError>;
