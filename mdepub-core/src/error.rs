//! Error types for mdepub Core

use thiserror::Error;

/// Result type alias using MdepubError
pub type Result<T> = std::result::Result<T, MdepubError>;

/// Top-level error type for all mdepub operations
#[derive(Debug, Error)]
pub enum MdepubError {
    #[error("Compile error: {0}")]
    Compile(#[from] CompileError),

    #[error("Package write error: {0}")]
    Write(#[from] PackageWriteError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors detected while compiling sources into a package.
///
/// All of these are raised before any output bytes exist.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompileError {
    #[error("No source documents supplied")]
    EmptySourceSet,

    #[error("Invalid metadata: {0}")]
    InvalidMetadata(String),

    #[error("Unsupported markup in {document}: {construct}")]
    UnsupportedMarkup { document: String, construct: String },
}

/// Failure while serializing or writing a package
#[derive(Debug, Error)]
#[error("Failed to write package: {0}")]
pub struct PackageWriteError(#[from] pub std::io::Error);

impl PackageWriteError {
    /// The underlying I/O failure
    pub fn io_error(&self) -> &std::io::Error {
        &self.0
    }
}

impl From<zip::result::ZipError> for PackageWriteError {
    fn from(err: zip::result::ZipError) -> Self {
        Self(err.into())
    }
}

/// A markup construct outside the supported subset
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{construct}")]
pub struct MarkupViolation {
    pub construct: String,
}

impl MarkupViolation {
    pub fn new(construct: impl Into<String>) -> Self {
        Self {
            construct: construct.into(),
        }
    }
}
