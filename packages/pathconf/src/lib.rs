//! pathconf: a thread-safe configuration tree addressed by dot-separated paths.
//!
//! Configuration lives in one [`PathTree`], created at startup and shared
//! (`Arc<PathTree>`) with everything that needs it. Documents on disk are
//! merged in with a [`DocumentLoader`]; in-memory updates go through
//! [`PathTree::set`].
//!
//! ```rust
//! use std::sync::Arc;
//! use pathconf::{PathTree, Value};
//!
//! let config = Arc::new(PathTree::new());
//! config.insert("base.dir", [("root", "/x"), ("data", "d")].into_iter().collect::<Value>());
//! config.set("base.dir", [("extra", "e")].into_iter().collect::<Value>());
//!
//! assert_eq!(config.get("base.dir.root"), Some(Value::from("/x")));
//! assert_eq!(config.get("base.dir.extra"), Some(Value::from("e")));
//! ```

pub use pathconf_core::{from_value, to_value, Error, Path, Value};
pub use pathconf_loader::{load_properties, DocumentFormat, DocumentLoader, LoadError};
pub use pathconf_store::PathTree;
