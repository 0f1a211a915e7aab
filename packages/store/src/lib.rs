//! A thread-safe configuration tree addressed by dot-separated paths.
//!
//! [`PathTree`] owns a single root mapping behind one lock. Reads return
//! copies, writes merge into existing branches instead of replacing them.

pub mod path_tree;
pub mod value_utils;

pub use pathconf_core::{Error, Path, Value};

pub use path_tree::PathTree;
