//! In-memory YAML configuration document with dot-path mutation,
//! deep merge, null pruning, and on-demand persistence.

use crate::error::ConfigError;
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};

/// Mutable configuration document for one target binary.
///
/// Seeded from a template, mutated field-by-field through dot paths,
/// and persisted exactly when the caller asks for it.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigTree {
    root: Mapping,
}

impl Default for ConfigTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigTree {
    /// Empty document.
    pub fn new() -> Self {
        Self {
            root: Mapping::new(),
        }
    }

    /// Parse a document from YAML text. A non-mapping document yields
    /// an empty tree (target binaries only consume mapping-shaped configs).
    pub fn from_str(yaml: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_yaml::from_str(yaml)?;
        Ok(Self::from_value(value))
    }

    /// Wrap an already-parsed YAML value.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Mapping(root) => Self { root },
            _ => Self::new(),
        }
    }

    /// Load a document from disk.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&text)
    }

    /// Set a leaf at a `.`-separated path, creating intermediate mappings
    /// as needed. Any non-mapping intermediate is overwritten with an
    /// empty mapping. `None` is a no-op: the existing value survives.
    pub fn set_path(&mut self, dot_path: &str, value: Option<Value>) -> &mut Self {
        let Some(value) = value else {
            return self;
        };
        let segments: Vec<&str> = dot_path.split('.').collect();
        let (leaf, parents) = match segments.split_last() {
            Some(split) => split,
            None => return self,
        };

        let mut cursor = &mut self.root;
        for segment in parents {
            let key = Value::String((*segment).to_string());
            let slot = cursor
                .entry(key)
                .or_insert_with(|| Value::Mapping(Mapping::new()));
            if !slot.is_mapping() {
                *slot = Value::Mapping(Mapping::new());
            }
            let Value::Mapping(next) = slot else {
                unreachable!("intermediate slot was just made a mapping");
            };
            cursor = next;
        }
        cursor.insert(Value::String((*leaf).to_string()), value);
        self
    }

    /// Remove a subtree at a `.`-separated path. Missing paths are a no-op.
    pub fn delete_field(&mut self, dot_path: &str) -> &mut Self {
        let segments: Vec<&str> = dot_path.split('.').collect();
        let (leaf, parents) = match segments.split_last() {
            Some(split) => split,
            None => return self,
        };

        let mut cursor = &mut self.root;
        for segment in parents {
            match cursor.get_mut(*segment) {
                Some(Value::Mapping(next)) => cursor = next,
                _ => return self,
            }
        }
        cursor.remove(*leaf);
        self
    }

    /// Read a value at a `.`-separated path.
    pub fn get_path(&self, dot_path: &str) -> Option<&Value> {
        let mut segments = dot_path.split('.');
        let first = segments.next()?;
        let mut current = self.root.get(first)?;
        for segment in segments {
            current = current.as_mapping()?.get(segment)?;
        }
        Some(current)
    }

    /// Deep-merge an overlay document onto this tree.
    ///
    /// Null overlay fields are never applied (the existing value survives);
    /// any present value, including `false`, `0`, and `""`, overwrites the
    /// leaf; mappings merge recursively; sequences replace wholesale with
    /// order-preserving de-duplication.
    pub fn merge_from(&mut self, overlay: &Value) -> &mut Self {
        if let Value::Mapping(overlay) = overlay {
            merge_mapping(&mut self.root, overlay);
        }
        self
    }

    /// Drop every null-valued field, at any depth.
    pub fn prune(&mut self) -> &mut Self {
        prune_mapping(&mut self.root);
        self
    }

    /// Serialize to YAML text with nulls pruned.
    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        let mut pruned = self.clone();
        pruned.prune();
        serde_yaml::to_string(&Value::Mapping(pruned.root)).map_err(ConfigError::Serialize)
    }

    /// Persist the document.
    ///
    /// `None` destination is a no-op. When the destination does not already
    /// end in `canonical_filename` it is treated as a directory and the
    /// filename is appended. Directories are created recursively. Returns
    /// the path actually written.
    pub fn save(
        &self,
        dest: Option<&Path>,
        canonical_filename: &str,
    ) -> Result<Option<PathBuf>, ConfigError> {
        let Some(dest) = dest else {
            return Ok(None);
        };
        let path = if dest
            .file_name()
            .map(|name| name == canonical_filename)
            .unwrap_or(false)
        {
            dest.to_path_buf()
        } else {
            dest.join(canonical_filename)
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: path.clone(),
                source,
            })?;
        }

        let yaml = self.to_yaml_string()?;
        std::fs::write(&path, yaml).map_err(|source| ConfigError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(Some(path))
    }
}

fn merge_mapping(dst: &mut Mapping, src: &Mapping) {
    for (key, value) in src {
        if value.is_null() {
            continue;
        }
        match dst.get_mut(key) {
            Some(slot) => merge_value(slot, value),
            None => {
                dst.insert(key.clone(), merged_clone(value));
            }
        }
    }
}

fn merge_value(dst: &mut Value, src: &Value) {
    match (dst, src) {
        (_, Value::Null) => {}
        (Value::Mapping(dst), Value::Mapping(src)) => merge_mapping(dst, src),
        (dst, src) => *dst = merged_clone(src),
    }
}

/// Clone an overlay value for insertion, applying sequence de-duplication.
fn merged_clone(value: &Value) -> Value {
    match value {
        Value::Sequence(items) => {
            let mut seen: Vec<Value> = Vec::with_capacity(items.len());
            for item in items {
                if !seen.contains(item) {
                    seen.push(item.clone());
                }
            }
            Value::Sequence(seen)
        }
        Value::Mapping(map) => {
            let mut out = Mapping::new();
            for (key, item) in map {
                if !item.is_null() {
                    out.insert(key.clone(), merged_clone(item));
                }
            }
            Value::Mapping(out)
        }
        other => other.clone(),
    }
}

fn prune_mapping(map: &mut Mapping) {
    let keys: Vec<Value> = map
        .iter()
        .filter(|(_, value)| value.is_null())
        .map(|(key, _)| key.clone())
        .collect();
    for key in keys {
        map.remove(key);
    }
    for (_, value) in map.iter_mut() {
        prune_value(value);
    }
}

fn prune_value(value: &mut Value) {
    match value {
        Value::Mapping(map) => prune_mapping(map),
        Value::Sequence(items) => {
            items.retain(|item| !item.is_null());
            for item in items {
                prune_value(item);
            }
        }
        _ => {}
    }
}
