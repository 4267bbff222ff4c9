//! Integration tests for config document handling and tool configuration.

use fabnet::config::{ConfigLoader, ConfigTree};
use tempfile::TempDir;

#[test]
fn test_overlay_merge_semantics() {
    let mut tree = ConfigTree::from_str(
        r#"
port: 7054
tls:
  enabled: true
  certfile: ca-cert.pem
csr:
  hosts: [localhost]
"#,
    )
    .unwrap();

    let overlay: serde_yaml::Value = serde_yaml::from_str(
        r#"
port: 8054
tls:
  enabled: false
  certfile: null
csr:
  hosts: [ca.org1, ca.org1, localhost]
"#,
    )
    .unwrap();
    tree.merge_from(&overlay);

    // Scalars overwrite, including falsy ones.
    assert_eq!(tree.get_path("port"), Some(&serde_yaml::Value::from(8054)));
    assert_eq!(
        tree.get_path("tls.enabled"),
        Some(&serde_yaml::Value::Bool(false))
    );
    // Null never lands; the base value survives.
    assert_eq!(
        tree.get_path("tls.certfile"),
        Some(&serde_yaml::Value::String("ca-cert.pem".into()))
    );
    // Sequences replace wholesale, deduplicated.
    assert_eq!(
        tree.get_path("csr.hosts"),
        Some(&serde_yaml::Value::Sequence(vec![
            serde_yaml::Value::String("ca.org1".into()),
            serde_yaml::Value::String("localhost".into()),
        ]))
    );
}

#[test]
fn test_serialization_prunes_nested_nulls() {
    let tree = ConfigTree::from_str(
        r#"
ca:
  name: ca-org1
  keyfile: null
signing:
  profiles:
    tls:
      expiry: null
"#,
    )
    .unwrap();
    let yaml = tree.to_yaml_string().unwrap();
    assert!(!yaml.contains("keyfile"));
    assert!(!yaml.contains("expiry"));
    assert!(yaml.contains("ca-org1"));
}

#[test]
fn test_save_appends_canonical_filename_and_creates_dirs() {
    let temp = TempDir::new().unwrap();
    let dest = temp.path().join("deep/nested/dir");
    let tree = ConfigTree::from_str("port: 7054").unwrap();

    let written = tree.save(Some(&dest), "orderer.yaml").unwrap().unwrap();
    assert_eq!(written, dest.join("orderer.yaml"));
    assert!(written.exists());

    // A destination already ending in the filename is used as-is.
    let direct = tree
        .save(Some(&dest.join("orderer.yaml")), "orderer.yaml")
        .unwrap()
        .unwrap();
    assert_eq!(direct, dest.join("orderer.yaml"));
}

#[test]
fn test_set_path_creates_intermediate_mappings() {
    let mut tree = ConfigTree::new();
    tree.set_path(
        "General.TLS.Enabled",
        Some(serde_yaml::Value::Bool(true)),
    );
    assert_eq!(
        tree.get_path("General.TLS.Enabled"),
        Some(&serde_yaml::Value::Bool(true))
    );
    // None is a no-op, not a deletion.
    tree.set_path("General.TLS.Enabled", None);
    assert_eq!(
        tree.get_path("General.TLS.Enabled"),
        Some(&serde_yaml::Value::Bool(true))
    );
}

#[test]
fn test_tool_config_file_and_defaults() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("fabnet.toml"),
        r#"
bin_dir = "/opt/fabric/bin"

[poll]
max_attempts = 5
"#,
    )
    .unwrap();

    let config = ConfigLoader::load(temp.path()).unwrap();
    assert_eq!(
        config.bin_dir.as_deref(),
        Some(std::path::Path::new("/opt/fabric/bin"))
    );
    assert_eq!(config.poll.max_attempts, 5);
    // Untouched keys keep their defaults.
    assert_eq!(config.poll.interval_ms, 30_000);
    assert_eq!(config.out_dir, std::path::PathBuf::from(".fabnet"));
}
