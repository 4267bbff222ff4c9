//! The single CLI token serializer.
//!
//! Every place that turns settings into argv tokens goes through
//! [`serialize`]; the rules must never be re-implemented per builder.

use crate::command::settings::SettingValue;

/// Serialize `(flag, value)` pairs into argv tokens, preserving pair order.
///
/// Rules: `true` becomes a bare `--flag`; `false` is omitted entirely;
/// lists become one comma-joined value token (an empty list is omitted
/// like `false`); numbers and strings become `--flag <value>`.
pub fn serialize<'a>(pairs: impl Iterator<Item = (&'a str, &'a SettingValue)>) -> Vec<String> {
    let mut tokens = Vec::new();
    for (flag, value) in pairs {
        match value {
            SettingValue::Bool(true) => tokens.push(format!("--{}", flag)),
            SettingValue::Bool(false) => {}
            SettingValue::List(items) if items.is_empty() => {}
            SettingValue::List(items) => {
                tokens.push(format!("--{}", flag));
                tokens.push(items.join(","));
            }
            SettingValue::Num(n) => {
                tokens.push(format!("--{}", flag));
                tokens.push(n.to_string());
            }
            SettingValue::Str(s) => {
                tokens.push(format!("--{}", flag));
                tokens.push(s.clone());
            }
        }
    }
    tokens
}
