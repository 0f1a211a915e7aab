use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use pathconf_core::Value;
use pathconf_store::PathTree;

use crate::LoadError;

/// Directory under the home directory holding the default document.
pub const DEFAULT_CONFIG_DIR: &str = ".cs_cfg";

/// File name of the default document.
pub const DEFAULT_CONFIG_FILE: &str = "base_config.yaml";

/// Text format of a configuration document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    /// Pick the format from the file extension. Anything other than `.json`
    /// is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }

    /// Decode `text` into a tree node.
    ///
    /// YAML is parsed to a document first so that tags can be dropped and
    /// their inner value kept. Scalar mapping keys are stringified (`1: a`
    /// becomes key `"1"`); sequence or mapping keys are an error.
    fn decode(self, text: &str) -> Result<Value, String> {
        match self {
            DocumentFormat::Yaml => {
                let document: serde_yaml::Value =
                    serde_yaml::from_str(text).map_err(|e| e.to_string())?;
                serde_yaml::from_value(document).map_err(|e| e.to_string())
            }
            DocumentFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Yaml => write!(f, "yaml"),
            DocumentFormat::Json => write!(f, "json"),
        }
    }
}

/// Reads a configuration document from disk and installs it in a tree.
///
/// # Example
///
/// ```rust,no_run
/// use pathconf_loader::DocumentLoader;
/// use pathconf_store::PathTree;
///
/// let tree = PathTree::new();
/// DocumentLoader::new("~/.cs_cfg/data_config.yaml")
///     .load_into(&tree, false)
///     .unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct DocumentLoader {
    path: PathBuf,
    format: DocumentFormat,
}

impl DocumentLoader {
    /// Create a loader for `path`. A leading `~` is expanded to the home
    /// directory.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = expand_home(path.as_ref());
        let format = DocumentFormat::from_path(&path);
        DocumentLoader { path, format }
    }

    /// Create a loader for `~/.cs_cfg/base_config.yaml`.
    pub fn default_location() -> Result<Self, LoadError> {
        let home = dirs::home_dir().ok_or(LoadError::NoHomeDirectory)?;
        Ok(Self::new(home.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILE)))
    }

    /// Override the format guessed from the extension.
    #[must_use]
    pub fn with_format(mut self, format: DocumentFormat) -> Self {
        self.format = format;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    /// Read and decode the document. The result is always a `Value::Map`.
    pub fn read(&self) -> Result<Value, LoadError> {
        if !self.path.is_file() {
            return Err(LoadError::NotFound {
                path: self.path.clone(),
            });
        }

        log::debug!("Reading {} as {}...", self.path.display(), self.format);
        let text = fs::read_to_string(&self.path).map_err(|source| LoadError::Io {
            path: self.path.clone(),
            source,
        })?;

        let document = self
            .format
            .decode(&text)
            .map_err(|message| LoadError::Parse {
                path: self.path.clone(),
                format: self.format,
                message,
            })?;

        if !document.is_map() {
            return Err(LoadError::NotAMapping {
                path: self.path.clone(),
                found: document.kind(),
            });
        }
        Ok(document)
    }

    /// Read the document and add it at the root of `tree`.
    ///
    /// With `replace`, every existing key of the tree is dropped first;
    /// otherwise the document is merged into the tree. Nothing is changed if
    /// the document cannot be read.
    pub fn load_into(&self, tree: &PathTree, replace: bool) -> Result<(), LoadError> {
        let document = self.read()?;
        tree.add_to_root(document, replace)?;
        log::debug!("Loaded {} into configuration tree", self.path.display());
        Ok(())
    }
}

/// Load `config_file` (or the default document) into `tree`.
pub fn load_properties(
    tree: &PathTree,
    config_file: Option<&Path>,
    replace: bool,
) -> Result<(), LoadError> {
    let loader = match config_file {
        Some(path) => DocumentLoader::new(path),
        None => DocumentLoader::default_location()?,
    };
    loader.load_into(tree, replace)
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("a/config.json")),
            DocumentFormat::Json
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("a/config.JSON")),
            DocumentFormat::Json
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("config.yaml")),
            DocumentFormat::Yaml
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("config.dat")),
            DocumentFormat::Yaml
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("config")),
            DocumentFormat::Yaml
        );
    }

    #[test]
    fn tilde_is_expanded() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let loader = DocumentLoader::new("~/.cs_cfg/data_config.yaml");
        assert_eq!(loader.path(), home.join(".cs_cfg/data_config.yaml"));
    }

    #[test]
    fn tilde_inside_path_is_kept() {
        let loader = DocumentLoader::new("configs/~/x.yaml");
        assert_eq!(loader.path(), Path::new("configs/~/x.yaml"));
    }

    #[test]
    fn default_location_points_at_base_config() {
        if dirs::home_dir().is_none() {
            return;
        }
        let loader = DocumentLoader::default_location().unwrap();
        assert!(loader.path().ends_with(".cs_cfg/base_config.yaml"));
        assert_eq!(loader.format(), DocumentFormat::Yaml);
    }

    #[test]
    fn with_format_overrides_extension() {
        let loader = DocumentLoader::new("settings.conf").with_format(DocumentFormat::Json);
        assert_eq!(loader.format(), DocumentFormat::Json);
    }

    #[test]
    fn decode_json_and_yaml() {
        let json = DocumentFormat::Json.decode(r#"{"a": {"b": [1, 2]}}"#).unwrap();
        let yaml = DocumentFormat::Yaml.decode("a:\n  b: [1, 2]\n").unwrap();
        assert_eq!(json, yaml);
    }

    #[test]
    fn yaml_nested_document() {
        let value = DocumentFormat::Yaml
            .decode("base:\n  dictionary:\n    root_dir: '/opt/data_files'\n    data_dir: 'data'\n")
            .unwrap();
        assert_eq!(
            value.get(&pathconf_core::Path::parse("base.dictionary.root_dir")),
            Some(&Value::from("/opt/data_files"))
        );
    }

    #[test]
    fn yaml_empty_entry_is_null() {
        let value = DocumentFormat::Yaml
            .decode("to_int:\nto_category:\n  - 'Attr04'\n")
            .unwrap();
        assert_eq!(value.get(&"to_int".into()), Some(&Value::Null));
        assert_eq!(
            value.get(&"to_category".into()),
            Some(&Value::from(vec!["Attr04"]))
        );
    }

    #[test]
    fn yaml_scalars() {
        let value = DocumentFormat::Yaml
            .decode("int: 3\nfloat: 1.5\nflag: true\nbig: 18446744073709551615\nratio: .nan\n")
            .unwrap();
        assert_eq!(value.get(&"int".into()), Some(&Value::Integer(3)));
        assert_eq!(value.get(&"float".into()), Some(&Value::Float(1.5)));
        assert_eq!(value.get(&"flag".into()), Some(&Value::Bool(true)));
        assert!(matches!(value.get(&"big".into()), Some(Value::Float(_))));
        assert!(matches!(value.get(&"ratio".into()), Some(Value::Float(f)) if f.is_nan()));
    }

    #[test]
    fn yaml_scalar_keys_are_stringified() {
        let value = DocumentFormat::Yaml.decode("1: one\ntrue: yes\n").unwrap();
        assert_eq!(value.get(&"1".into()), Some(&Value::from("one")));
        assert!(value.get(&"true".into()).is_some());
    }

    #[test]
    fn yaml_tags_are_dropped() {
        let value = DocumentFormat::Yaml.decode("root: !custom '/x'\n").unwrap();
        assert_eq!(value.get(&"root".into()), Some(&Value::from("/x")));
    }

    #[test]
    fn yaml_complex_keys_are_rejected() {
        let err = DocumentFormat::Yaml.decode("? [a, b]\n: value\n").unwrap_err();
        assert!(err.contains("unsupported mapping key"));
    }

    #[test]
    fn decode_reports_syntax_errors() {
        assert!(DocumentFormat::Json.decode("{not json").is_err());
        assert!(DocumentFormat::Yaml.decode("a: [unclosed").is_err());
    }
}
