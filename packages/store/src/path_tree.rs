//! The locked configuration tree.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::de::DeserializeOwned;
use serde::Serialize;

use pathconf_core::{from_value, to_value, Error, Path, Value};

use crate::value_utils;

/// A thread-safe configuration tree addressed by dot-separated paths.
///
/// Every operation takes the tree's single lock exactly once, so no
/// operation ever observes another one half-applied. Reads hand back owned
/// copies: mutating what `get` or `get_all` returned never reaches the tree.
///
/// One instance is meant to be created at startup and shared, typically as
/// an `Arc<PathTree>`, with everything that reads configuration.
///
/// # Example
///
/// ```rust
/// use pathconf_store::PathTree;
/// use pathconf_core::Value;
///
/// let tree = PathTree::new();
/// tree.insert("base.dir.root", "/x");
/// tree.set("base.dir.data", "d");
///
/// assert_eq!(tree.get("base.dir.root"), Some(Value::from("/x")));
/// assert_eq!(tree.get("base.dir.data"), Some(Value::from("d")));
/// assert!(tree.is_key("base.dir"));
/// assert!(tree.remove("base.dir.root"));
/// assert_eq!(tree.get("base.dir.root"), None);
/// ```
#[derive(Debug, Default)]
pub struct PathTree {
    root: Mutex<BTreeMap<String, Value>>,
}

impl PathTree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tree holding `root`, which must be a map.
    pub fn with_data(root: Value) -> Result<Self, Error> {
        Ok(Self {
            root: Mutex::new(expect_map(root)?),
        })
    }

    /// Get a copy of the value at `path`.
    ///
    /// Returns `None` when the path is empty, a segment is missing, or the
    /// walk runs into a non-map value. A stored null comes back as
    /// `Some(Value::Null)`.
    pub fn get(&self, path: impl Into<Path>) -> Option<Value> {
        let path = path.into();
        let root = self.lock();
        value_utils::get_path(&root, &path).cloned()
    }

    /// Get the value at `path` deserialized into `T`.
    pub fn get_as<T: DeserializeOwned>(&self, path: impl Into<Path>) -> Result<Option<T>, Error> {
        let Some(value) = self.get(path) else {
            return Ok(None);
        };
        from_value(value).map(Some)
    }

    /// Get a copy of the whole tree. Always a `Value::Map`.
    pub fn get_all(&self) -> Value {
        Value::Map(self.lock().clone())
    }

    /// Check whether the last segment of `path` is a key of its parent.
    ///
    /// Missing or non-map intermediate nodes are treated as empty mappings.
    pub fn is_key(&self, path: impl Into<Path>) -> bool {
        let path = path.into();
        value_utils::contains_path(&self.lock(), &path)
    }

    /// Set `value` at `path`, merging into any existing branch.
    ///
    /// See [`value_utils::set_path`] for the merge rules. An empty path is a
    /// no-op.
    pub fn set(&self, path: impl Into<Path>, value: impl Into<Value>) {
        let path = path.into();
        if path.is_empty() {
            return;
        }
        log::trace!("Setting {}", path);
        value_utils::set_path(&mut self.lock(), &path, value.into());
    }

    /// Place `value` at exactly `path`, creating every missing branch.
    ///
    /// Unlike [`set`](Self::set), whatever was stored at `path` is replaced
    /// rather than merged into. An empty path is a no-op.
    pub fn insert(&self, path: impl Into<Path>, value: impl Into<Value>) {
        let path = path.into();
        log::trace!("Inserting {}", path);
        value_utils::insert_path(&mut self.lock(), &path, value.into());
    }

    /// Add a mapping at the root of the tree.
    ///
    /// With `replace`, the whole tree is swapped for `mapping`. Use with
    /// caution: every existing key is dropped. Otherwise each top-level key
    /// of `mapping` is applied as a [`set`](Self::set), all under one lock.
    ///
    /// # Errors
    ///
    /// `Error::InvalidInput` if `mapping` is not a map. The tree is left
    /// untouched.
    pub fn add_to_root(&self, mapping: Value, replace: bool) -> Result<(), Error> {
        let mapping = expect_map(mapping)?;
        let mut root = self.lock();
        if replace {
            log::debug!("Replacing configuration tree ({} top-level keys)", mapping.len());
            *root = mapping;
        } else {
            for (key, value) in mapping {
                value_utils::set_path(&mut root, &Path::parse(&key), value);
            }
        }
        Ok(())
    }

    /// Serialize `data` and add it at the root, as [`add_to_root`](Self::add_to_root).
    pub fn add_to_root_from<T: Serialize>(&self, data: &T, replace: bool) -> Result<(), Error> {
        self.add_to_root(to_value(data)?, replace)
    }

    /// Remove the value at `path`.
    ///
    /// Returns `false` when there was nothing to remove, including when an
    /// intermediate segment is missing.
    pub fn remove(&self, path: impl Into<Path>) -> bool {
        let path = path.into();
        log::trace!("Removing {}", path);
        value_utils::remove_path(&mut self.lock(), &path).is_some()
    }

    /// Remove the value at `path` and return it.
    ///
    /// # Errors
    ///
    /// `Error::KeyNotFound` if there was nothing to remove.
    pub fn take(&self, path: impl Into<Path>) -> Result<Value, Error> {
        let path = path.into();
        value_utils::remove_path(&mut self.lock(), &path).ok_or(Error::KeyNotFound { path })
    }

    /// Drop every key.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of top-level keys.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // Mutations never panic partway through, so a poisoned map is still
    // consistent.
    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, Value>> {
        self.root.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn expect_map(value: Value) -> Result<BTreeMap<String, Value>, Error> {
    match value {
        Value::Map(map) => Ok(map),
        other => Err(Error::invalid_input(format!(
            "expected a map at the root, found {}",
            other.kind()
        ))),
    }
}
