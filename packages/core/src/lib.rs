//! Core pathconf: the tree and the addresses into it.
//!
//! - `Value`: a node of the configuration tree (scalar, sequence or mapping)
//! - `Path`: a dot-separated address into the tree
//! - `Error`: failures surfaced by tree operations
//!
//! # Example
//!
//! ```rust
//! use pathconf_core::{Path, Value};
//!
//! let path = Path::parse("base.dir.root");
//! assert_eq!(path.len(), 3);
//!
//! let mut tree = Value::map();
//! tree.set(&path, Value::from("/x"));
//! assert_eq!(tree.get(&path), Some(&Value::from("/x")));
//! ```

mod convert;
mod error;
mod path;
mod value;

pub use convert::{from_value, to_value};
pub use error::Error;
pub use path::Path;
pub use value::Value;
