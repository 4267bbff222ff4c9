//! Property-based tests for argument-vector determinism guarantees

use fabnet::command::{SettingValue, Settings};
use proptest::prelude::*;

fn flag_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9.]{0,15}"
}

fn setting_value() -> impl Strategy<Value = SettingValue> {
    prop_oneof![
        "[a-zA-Z0-9:/._-]{0,20}".prop_map(SettingValue::Str),
        any::<i64>().prop_map(SettingValue::Num),
        any::<bool>().prop_map(SettingValue::Bool),
        prop::collection::vec("[a-z0-9.:]{1,10}", 0..4)
            .prop_map(SettingValue::List),
    ]
}

/// Test that identical setter sequences serialize identically
#[test]
fn test_serialization_determinism_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &prop::collection::vec((flag_name(), setting_value()), 0..12),
            |entries| {
                let build = || {
                    let mut settings = Settings::new();
                    for (flag, value) in &entries {
                        settings.set_flag(flag, Some(value.clone()));
                    }
                    settings.to_args()
                };
                assert_eq!(build(), build());
                Ok(())
            },
        )
        .unwrap();
}

/// Test the four serialization rules hold for any single setting
#[test]
fn test_serialization_rules_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(flag_name(), setting_value()), |(flag, value)| {
            let mut settings = Settings::new();
            settings.set_flag(&flag, Some(value.clone()));
            let args = settings.to_args();

            match value {
                SettingValue::Bool(true) => {
                    assert_eq!(args, vec![format!("--{}", flag)]);
                }
                SettingValue::Bool(false) => {
                    assert!(args.is_empty(), "false flags must be omitted");
                }
                SettingValue::Str(s) => {
                    assert_eq!(args, vec![format!("--{}", flag), s]);
                }
                SettingValue::Num(n) => {
                    assert_eq!(args, vec![format!("--{}", flag), n.to_string()]);
                }
                SettingValue::List(items) if items.is_empty() => {
                    assert!(args.is_empty(), "empty lists must be omitted");
                }
                SettingValue::List(items) => {
                    assert_eq!(args, vec![format!("--{}", flag), items.join(",")]);
                }
            }
            Ok(())
        })
        .unwrap();
}

/// Test that re-setting a key never changes its position
#[test]
fn test_reset_position_stability_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(
                prop::collection::vec(flag_name(), 1..8),
                any::<prop::sample::Index>(),
                any::<i64>(),
            ),
            |(mut flags, index, replacement)| {
                flags.dedup();
                let target = index.get(&flags).clone();

                let mut settings = Settings::new();
                for (i, flag) in flags.iter().enumerate() {
                    settings.set_flag(flag, Some(SettingValue::Num(i as i64)));
                }
                let before = settings.to_args();
                settings.set_flag(&target, Some(SettingValue::Num(replacement)));
                let after = settings.to_args();

                // Same flag order in both projections.
                let order = |args: &[String]| {
                    args.iter()
                        .filter(|t| t.starts_with("--"))
                        .cloned()
                        .collect::<Vec<_>>()
                };
                assert_eq!(order(&before), order(&after));
                Ok(())
            },
        )
        .unwrap();
}

/// Test that None setters never affect the projection
#[test]
fn test_none_noop_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &prop::collection::vec((flag_name(), setting_value()), 0..8),
            |entries| {
                let mut settings = Settings::new();
                for (flag, value) in &entries {
                    settings.set_flag(flag, Some(value.clone()));
                }
                let before = settings.to_args();
                for (flag, _) in &entries {
                    settings.set_flag(flag, None);
                }
                settings.set_flag("never-set", None);
                assert_eq!(settings.to_args(), before);
                Ok(())
            },
        )
        .unwrap();
}
