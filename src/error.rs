//! Error types for the PDF strip splitter

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the PDF strip splitter
#[derive(Error, Debug)]
pub enum Error {
    /// A token of the split configuration could not be parsed
    #[error("Invalid split token '{token}': {reason}")]
    InvalidSplitToken { token: String, reason: String },

    /// Input file does not exist
    #[error("Input file '{}' does not exist", .0.display())]
    FileNotFound(PathBuf),

    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid PDF (no pages)
    #[error("PDF has no pages: {}", .0.display())]
    EmptyPdf(PathBuf),

    /// A page is missing something we need to split it
    #[error("Malformed page {page}: {reason}")]
    MalformedPage { page: u32, reason: String },
}

/// Broad category of an [`Error`], used to pick the process exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed split configuration
    Parse,
    /// Input path failed validation before any processing
    Validation,
    /// The document could not be opened, composed or saved
    Document,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidSplitToken { .. } => ErrorKind::Parse,
            Error::FileNotFound(_) => ErrorKind::Validation,
            Error::Pdf(_) | Error::Io(_) | Error::EmptyPdf(_) | Error::MalformedPage { .. } => {
                ErrorKind::Document
            }
        }
    }

    /// Process exit code for this error (success is 0)
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::Parse => 2,
            ErrorKind::Validation => 3,
            ErrorKind::Document => 4,
        }
    }
}
