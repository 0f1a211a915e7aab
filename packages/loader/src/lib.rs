//! Load configuration documents into a [`PathTree`](pathconf_store::PathTree).
//!
//! The file is read and decoded before the tree is touched; only the final
//! `add_to_root` runs under the tree's lock.

mod document;
mod error;

pub use document::{
    load_properties, DocumentFormat, DocumentLoader, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILE,
};
pub use error::LoadError;
