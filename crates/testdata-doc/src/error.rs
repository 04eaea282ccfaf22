//! Error types for document rendering.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while rendering or writing a document.
#[derive(Debug, Error)]
pub enum DocError {
    /// Layout or PDF encoding failed, including unreadable font data.
    #[error("PDF rendering error: {0}")]
    Render(#[from] genpdf::error::Error),

    /// A rendered PDF could not be parsed back.
    #[error("PDF parse error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// The requested font family has no regular face.
    #[error("font family {family} not found in {}", dir.display())]
    FontNotFound {
        /// Directory searched.
        dir: PathBuf,
        /// Family file name stem.
        family: String,
    },

    /// None of the known system font directories holds a usable family.
    #[error("no TrueType font family found in the system font directories")]
    NoSystemFont,

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
