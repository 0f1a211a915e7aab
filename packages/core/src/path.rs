//! Dot-separated addresses into the configuration tree.

use std::fmt;

/// An address into the configuration tree.
///
/// A path is the ordered list of mapping keys walked from the root, written
/// as a dot-separated string: `base.dir.root` addresses the value `"/x"` in
/// `{ base: { dir: { root: "/x" } } }`. There is no escaping, so a key can
/// never contain a literal `.`.
///
/// The empty path (from `""`, `"."` or a `None` key) addresses nothing. Tree
/// operations treat it as a miss rather than as the root.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Path {
    pub components: Vec<String>,
}

impl Path {
    /// Parse a dot-separated key.
    ///
    /// Empty segments are dropped, which normalizes leading, trailing and
    /// doubled dots.
    ///
    /// ```rust
    /// use pathconf_core::Path;
    ///
    /// assert_eq!(Path::parse("base.dir").len(), 2);
    /// assert_eq!(Path::parse("base..dir."), Path::parse("base.dir"));
    /// assert!(Path::parse("").is_empty());
    /// ```
    pub fn parse(s: &str) -> Self {
        Path {
            components: s
                .split('.')
                .filter(|c| !c.is_empty())
                .map(|c| c.to_string())
                .collect(),
        }
    }

    /// Check if this path addresses nothing.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Get the number of segments.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Iterate over segments.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.components.iter()
    }

    /// Split into the parent path and the leaf segment.
    ///
    /// Returns `None` for the empty path.
    pub fn split_leaf(&self) -> Option<(Path, &str)> {
        let (leaf, parent) = self.components.split_last()?;
        Some((
            Path {
                components: parent.to_vec(),
            },
            leaf.as_str(),
        ))
    }

    /// Get a slice of segments as a new path.
    pub fn slice(&self, start: usize, end: usize) -> Path {
        Path {
            components: self.components[start..end].to_vec(),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.components.join("."))
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Path::parse(s)
    }
}

impl From<String> for Path {
    fn from(s: String) -> Self {
        Path::parse(&s)
    }
}

impl From<&String> for Path {
    fn from(s: &String) -> Self {
        Path::parse(s)
    }
}

impl From<Option<&str>> for Path {
    fn from(s: Option<&str>) -> Self {
        s.map(Path::parse).unwrap_or_default()
    }
}

impl From<&Path> for Path {
    fn from(p: &Path) -> Self {
        p.clone()
    }
}
