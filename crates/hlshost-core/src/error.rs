//! Unified error type for hlshost.
//!
//! Parsing, loading and serving all funnel their failures into [`Error`],
//! which carries enough context for the HTTP layer to derive a status code via
//! [`Error::http_status`].

use std::fmt;
use std::path::PathBuf;

/// Unified error type covering all failure modes in hlshost.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested entity could not be found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity (e.g. "media playlist", "segment").
        entity: String,
        /// The identifier that was looked up.
        id: String,
    },

    /// Request data failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A segment name whose suffix matches no known container family.
    #[error("Unsupported container: {name}")]
    UnsupportedContainer {
        /// The offending segment name or URI.
        name: String,
    },

    /// A playlist source file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A playlist file was readable but its content is malformed.
    #[error("Parse error in {}: {message}", path.display())]
    Parse {
        /// The playlist file being parsed.
        path: PathBuf,
        /// Human-readable error description.
        message: String,
    },

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Catch-all for unexpected internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error to an appropriate HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::NotFound { .. } => 404,
            Error::Validation(_) => 400,
            Error::UnsupportedContainer { .. } => 400,
            Error::Read { .. } => 500,
            Error::Parse { .. } => 500,
            Error::Io { .. } => 500,
            Error::Internal(_) => 500,
        }
    }

    /// Convenience constructor for [`Error::NotFound`].
    pub fn not_found(entity: impl Into<String>, id: impl fmt::Display) -> Self {
        Error::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Convenience constructor for [`Error::Parse`].
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::UnsupportedContainer`].
    pub fn unsupported_container(name: impl Into<String>) -> Self {
        Error::UnsupportedContainer { name: name.into() }
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
