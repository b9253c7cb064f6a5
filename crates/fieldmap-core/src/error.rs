//! Error types for fieldmap.
//!
//! Field resolution itself never fails: mappings swallow their errors into
//! "no value". The variants below surface at the edges, when a collaborator
//! cannot read a resource, a configuration file is malformed, or the search
//! engine rejects a schema or document.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for fieldmap operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur across the fieldmap crates.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// I/O error with the path that caused it.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be loaded or is inconsistent.
    #[error("Configuration error: {message}")]
    Config {
        /// What is wrong with the configuration.
        message: String,
    },

    /// A resource or other named item does not exist.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Identifier that was looked up (usually a root path).
        id: String,
        /// Kind of item (e.g. "resource").
        kind: String,
    },

    /// Content extraction failed for a resource.
    #[error("Extraction failed for {path}: {message}")]
    Extraction {
        /// Root path of the resource.
        path: String,
        /// Failure description.
        message: String,
    },

    /// A string value could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A mapping type token is not one of the known types.
    #[error("Unknown mapping type: '{0}'")]
    UnknownMappingType(String),

    /// Geo link-following went deeper than allowed.
    #[error("Link depth {depth} exceeds maximum {max} at {path}")]
    LinkDepthExceeded {
        /// Depth that would have been reached.
        depth: usize,
        /// Configured maximum.
        max: usize,
        /// Root path of the resource whose link could not be followed.
        path: String,
    },

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A generic operation failure (search engine errors and the like).
    #[error("Operation failed: {0}")]
    Operation(String),
}

impl Error {
    /// Creates an I/O error tagged with the path involved.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Creates a not-found error.
    pub fn not_found<I: Into<String>, K: Into<String>>(id: I, kind: K) -> Self {
        Error::NotFound {
            id: id.into(),
            kind: kind.into(),
        }
    }

    /// Creates an extraction error.
    pub fn extraction<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Error::Extraction {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a parse error.
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Error::Parse(message.into())
    }

    /// Creates an operation error.
    pub fn operation<S: Into<String>>(message: S) -> Self {
        Error::Operation(message.into())
    }

    /// Returns `true` for errors that only affect a single resource or value.
    ///
    /// These are the errors a mapping logs and then treats as "no value".
    /// Configuration, I/O and engine errors are not per-resource.
    pub fn is_per_resource(&self) -> bool {
        match self {
            Error::NotFound { .. }
            | Error::Extraction { .. }
            | Error::Parse(_)
            | Error::LinkDepthExceeded { .. }
            | Error::Serialization(_) => true,
            Error::Io { .. }
            | Error::Config { .. }
            | Error::UnknownMappingType(_)
            | Error::Operation(_) => false,
        }
    }
}
