//! Config templates: the default document for one target binary.
//!
//! Templates are explicit values handed to builder constructors, never
//! loaded implicitly at construction time, so unit tests can run fully
//! in-memory.

use crate::config::tree::ConfigTree;
use crate::error::ConfigError;
use std::path::Path;

/// Default configuration document plus the canonical filename the target
/// binary expects (used whenever a destination path is a directory).
#[derive(Debug, Clone)]
pub struct ConfigTemplate {
    tree: ConfigTree,
    canonical_filename: String,
}

impl ConfigTemplate {
    /// Parse a template from embedded YAML text.
    pub fn from_str(yaml: &str, canonical_filename: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            tree: ConfigTree::from_str(yaml)?,
            canonical_filename: canonical_filename.to_string(),
        })
    }

    /// Load a template from an on-disk YAML document.
    pub fn from_path(path: &Path, canonical_filename: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            tree: ConfigTree::from_path(path)?,
            canonical_filename: canonical_filename.to_string(),
        })
    }

    /// Empty template for commands that emit no config file.
    pub fn empty() -> Self {
        Self {
            tree: ConfigTree::new(),
            canonical_filename: String::new(),
        }
    }

    pub fn canonical_filename(&self) -> &str {
        &self.canonical_filename
    }

    /// A fresh working tree seeded from this template.
    pub fn instantiate(&self) -> ConfigTree {
        self.tree.clone()
    }
}
