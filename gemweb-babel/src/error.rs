//! Error types for gemtext conversion and format operations

use thiserror::Error;

/// Errors raised while turning gemtext into a document.
///
/// Every variant is fatal for the document being converted: the pipeline
/// stops at the first one and produces no partial output. Line numbers are
/// 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// A `=>` line with nothing after the marker
    #[error("line {line}: link line has no URL")]
    MalformedLinkLine { line: usize },

    /// A closing fence that carries text after the marker
    #[error("line {line}: closing preformatting toggle carries alt text {alt_text:?}")]
    UnexpectedClosingAltText { line: usize, alt_text: String },

    /// Preformatted content or a closing fence reached the block builder while
    /// it had no preformatted block open
    #[error("line {line}: preformatted line outside of a preformatted block")]
    UnbalancedPreformatting { line: usize },
}

impl ConversionError {
    /// Source line the error points at.
    pub fn line(&self) -> usize {
        match self {
            ConversionError::MalformedLinkLine { line }
            | ConversionError::UnexpectedClosingAltText { line, .. }
            | ConversionError::UnbalancedPreformatting { line } => *line,
        }
    }
}

/// Errors that can occur during format operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// The source text could not be converted into a document
    #[error("Parse error: {0}")]
    Conversion(#[from] ConversionError),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Format does not support the requested operation
    #[error("Operation not supported: {0}")]
    NotSupported(String),
}
