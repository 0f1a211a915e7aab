//! Error types for tree operations.

use crate::path::Path;

/// Errors surfaced by tree operations.
///
/// Lookup misses are not errors: reads return `None` or `false` instead.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A mapping was required but something else was supplied.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// A strict removal targeted a key that does not exist.
    #[error("key not found: {path}")]
    KeyNotFound { path: Path },

    /// A value could not be deserialized into the requested type.
    #[error("decode error: {message}")]
    Decode { message: String },

    /// A Rust value could not be serialized into a tree value.
    #[error("encode error: {message}")]
    Encode { message: String },
}

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Error::InvalidInput {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Error::Decode {
            message: message.into(),
        }
    }

    pub fn encode(message: impl Into<String>) -> Self {
        Error::Encode {
            message: message.into(),
        }
    }
}
