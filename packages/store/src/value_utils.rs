//! Utilities for navigating and merging Value trees.
//!
//! These operate on an already-borrowed root mapping. `PathTree` takes its
//! lock once and hands the guarded map down here, so nothing in this module
//! ever touches the lock.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use pathconf_core::{Path, Value};

/// Resolve a path against the root mapping.
///
/// Fails to find (rather than erroring) on a missing segment or a non-map
/// node with segments left to walk.
pub fn get_path<'a>(root: &'a BTreeMap<String, Value>, path: &Path) -> Option<&'a Value> {
    let first = path.components.first()?;
    root.get(first)?.get(&path.slice(1, path.len()))
}

/// Check whether the leaf of `path` is a key of its parent mapping.
///
/// Missing or non-map intermediate nodes count as empty mappings.
pub fn contains_path(root: &BTreeMap<String, Value>, path: &Path) -> bool {
    let Some((parent_path, leaf)) = path.split_leaf() else {
        return false;
    };

    let mut parent = Some(root);
    for component in parent_path.iter() {
        parent = parent
            .and_then(|map| map.get(component))
            .and_then(Value::as_map);
    }

    parent.is_some_and(|map| map.contains_key(leaf))
}

/// Remove the leaf of `path` from its parent mapping.
///
/// Returns `None` when the parent is missing, is not a map, or lacks the leaf.
pub fn remove_path(root: &mut BTreeMap<String, Value>, path: &Path) -> Option<Value> {
    let (parent_path, leaf) = path.split_leaf()?;
    if parent_path.is_empty() {
        return root.remove(leaf);
    }
    match get_path_mut(root, &parent_path)? {
        Value::Map(map) => map.remove(leaf),
        _ => None,
    }
}

fn get_path_mut<'a>(root: &'a mut BTreeMap<String, Value>, path: &Path) -> Option<&'a mut Value> {
    let (first, rest) = path.components.split_first()?;
    let mut cursor = root.get_mut(first)?;
    for component in rest {
        cursor = match cursor {
            Value::Map(map) => map.get_mut(component)?,
            _ => return None,
        };
    }
    Some(cursor)
}

/// Set `value` at `path`, merging into whatever already lives there.
///
/// The walk descends through every segment already present in the tree. When
/// `value` is a map that itself holds the current segment as a key, the walk
/// descends into `value` too, so `set("base.dir", {dir: {x: 1}})` lands `x`
/// under `base.dir` rather than `base.dir.dir`.
///
/// - At the first missing segment, the (descended) value is assigned to that
///   key as it is. Segments after it are not created: `set("x.y.z", 1)` on an
///   empty tree stores `1` under `x`.
/// - A non-map node met with segments remaining has no key for the next
///   segment, so that segment is the first missing one: the node becomes a
///   map holding only it.
/// - If every segment exists, the value is deep-merged into the node found.
///
/// Keys not named by `path` or `value` are never removed. Use [`insert_path`]
/// to place a value at exactly `path`.
pub fn set_path(root: &mut BTreeMap<String, Value>, path: &Path, value: Value) {
    let mut branch = root;
    let mut value = value;

    for (position, segment) in path.iter().enumerate() {
        let node = match branch.entry(segment.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(value);
                return;
            }
            Entry::Occupied(slot) => slot.into_mut(),
        };
        value = descend(value, segment);

        let Some(next_segment) = path.components.get(position + 1) else {
            deep_merge(node, value);
            return;
        };

        branch = match node {
            Value::Map(next) => next,
            scalar => {
                *scalar = Value::Map(BTreeMap::from([(next_segment.clone(), value)]));
                return;
            }
        };
    }
}

/// Place `value` at exactly `path`, creating a branch for every missing
/// segment and replacing any non-map node in the way.
///
/// Whatever was stored at `path` is overwritten, not merged, and no lockstep
/// descent into `value` happens. The empty path is a no-op.
pub fn insert_path(root: &mut BTreeMap<String, Value>, path: &Path, value: Value) {
    let Some(first) = path.components.first() else {
        return;
    };
    root.entry(first.clone())
        .or_default()
        .set(&path.slice(1, path.len()), value);
}

/// Merge `value` into `node`.
///
/// Where both sides hold maps the merge recurses key by key; anywhere else
/// the incoming value overwrites. Arrays are therefore replaced, never
/// concatenated.
pub fn deep_merge(node: &mut Value, value: Value) {
    match (node, value) {
        (Value::Map(branch), Value::Map(incoming)) => {
            for (key, incoming_value) in incoming {
                match branch.get_mut(&key) {
                    Some(existing) => deep_merge(existing, incoming_value),
                    None => {
                        branch.insert(key, incoming_value);
                    }
                }
            }
        }
        (node, value) => *node = value,
    }
}

/// Step into `value` at `segment` when it is a map holding that key.
fn descend(value: Value, segment: &str) -> Value {
    match value {
        Value::Map(mut fragment) => match fragment.remove(segment) {
            Some(inner) => inner,
            None => Value::Map(fragment),
        },
        other => other,
    }
}
