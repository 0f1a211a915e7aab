use std::io;
use std::path::PathBuf;

use crate::DocumentFormat;

/// Failures while reading a configuration document into a tree.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    /// The path does not name a regular file.
    #[error("The configuration file {} does not exist", .path.display())]
    NotFound { path: PathBuf },

    /// The file exists but could not be read.
    #[error("The configuration file {} failed to open with: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The text is not valid in the document's format, or holds a mapping key
    /// with no path form.
    #[error("The configuration file {} could not be parsed as {format}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        format: DocumentFormat,
        message: String,
    },

    /// The document decoded to something other than a mapping.
    #[error("The configuration file {} could not be loaded as a mapping (found {found})", .path.display())]
    NotAMapping { path: PathBuf, found: &'static str },

    /// The default location was asked for but there is no home directory.
    #[error("No home directory found to locate the default configuration file")]
    NoHomeDirectory,

    /// The tree refused the decoded document.
    #[error("{0}")]
    Store(#[from] pathconf_core::Error),
}
