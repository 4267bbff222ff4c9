//! Canonical setting store shared by the CLI argument vector and the
//! config document.
//!
//! Every logical option is recorded exactly once, tagged with the CLI
//! flag and/or config dot-path it targets. The two output artifacts are
//! pure projections ([`Settings::to_args`] and [`Settings::apply_to`]),
//! so a new option can never silently reach one destination and not the
//! other, and the "skip if undefined" rule lives in a single place.

use crate::command::argvec;
use crate::config::ConfigTree;

/// A typed option value.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Str(String),
    Num(i64),
    Bool(bool),
    List(Vec<String>),
}

impl SettingValue {
    /// Projection into the YAML config document.
    pub fn to_yaml(&self) -> serde_yaml::Value {
        match self {
            SettingValue::Str(s) => serde_yaml::Value::String(s.clone()),
            SettingValue::Num(n) => serde_yaml::Value::from(*n),
            SettingValue::Bool(b) => serde_yaml::Value::Bool(*b),
            SettingValue::List(items) => serde_yaml::Value::Sequence(
                items
                    .iter()
                    .map(|item| serde_yaml::Value::String(item.clone()))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Str(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::Str(value)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        SettingValue::Num(value)
    }
}

impl From<u16> for SettingValue {
    fn from(value: u16) -> Self {
        SettingValue::Num(i64::from(value))
    }
}

impl From<u32> for SettingValue {
    fn from(value: u32) -> Self {
        SettingValue::Num(i64::from(value))
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<Vec<String>> for SettingValue {
    fn from(value: Vec<String>) -> Self {
        SettingValue::List(value)
    }
}

impl From<&[&str]> for SettingValue {
    fn from(value: &[&str]) -> Self {
        SettingValue::List(value.iter().map(|s| s.to_string()).collect())
    }
}

/// One recorded option: where it goes, and what it carries.
#[derive(Debug, Clone, PartialEq)]
pub struct Setting {
    /// CLI flag name (without leading `--`), when the option is an argument.
    pub flag: Option<String>,
    /// Config document dot-path, when the option lands in the document.
    pub path: Option<String>,
    pub value: SettingValue,
}

/// Insertion-ordered setting collection.
///
/// Re-setting an existing logical key updates the value in place; the
/// original position is kept, so token order stays deterministic across
/// identical setter sequences.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    entries: Vec<(String, Setting)>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Record an argument-only option. `None` is a no-op.
    pub fn set_flag(&mut self, flag: &str, value: Option<SettingValue>) {
        self.set(flag, Some(flag), None, value);
    }

    /// Record a document-only option. `None` is a no-op.
    pub fn set_config(&mut self, path: &str, value: Option<SettingValue>) {
        self.set(path, None, Some(path), value);
    }

    /// Record an option that lands in both destinations. `None` is a no-op.
    pub fn set_dual(&mut self, flag: &str, path: &str, value: Option<SettingValue>) {
        self.set(flag, Some(flag), Some(path), value);
    }

    fn set(&mut self, key: &str, flag: Option<&str>, path: Option<&str>, value: Option<SettingValue>) {
        let Some(value) = value else {
            return;
        };
        let setting = Setting {
            flag: flag.map(str::to_string),
            path: path.map(str::to_string),
            value,
        };
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| k == key) {
            entry.1 = setting;
        } else {
            self.entries.push((key.to_string(), setting));
        }
    }

    /// Project the argument vector, in insertion order.
    pub fn to_args(&self) -> Vec<String> {
        argvec::serialize(self.entries.iter().filter_map(|(_, setting)| {
            setting
                .flag
                .as_deref()
                .map(|flag| (flag, &setting.value))
        }))
    }

    /// Project every document-bound setting onto a config tree.
    pub fn apply_to(&self, tree: &mut ConfigTree) {
        for (_, setting) in &self.entries {
            if let Some(path) = setting.path.as_deref() {
                tree.set_path(path, Some(setting.value.to_yaml()));
            }
        }
    }
}
