//! Unused-key guard.
//!
//! Validates:
//! 1) Unused keys are reported in WARN mode without error.
//! 2) Unused keys fail in FAIL mode.
//! 3) Keys under consumed prefixes (including list items) are not flagged.
//! 4) An empty config is clean.

use dlv_config::{load_layered_yaml_from_strings, report_unused_keys, UnusedKeyPolicy};

const YAML_WITH_EXTRA: &str = r#"
server:
  bind_addr: "127.0.0.1:8899"
  cors_origins:
    - "http://localhost:3000"
    - "http://localhost:5173"
  bind_addr_v6: "[::1]:8899"
escrow:
  release_after_days: 7
"#;

#[test]
fn warn_mode_reports_unused_keys_without_error() {
    let loaded = load_layered_yaml_from_strings(&[YAML_WITH_EXTRA]).unwrap();
    let report = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Warn)
        .expect("warn mode must not error");

    assert_eq!(
        report.unused_leaf_pointers,
        vec![
            "/escrow/release_after_days".to_string(),
            "/server/bind_addr_v6".to_string(),
        ],
        "unused pointers must be sorted and must not include consumed list items"
    );
}

#[test]
fn fail_mode_errors_on_unused_keys() {
    let loaded = load_layered_yaml_from_strings(&[YAML_WITH_EXTRA]).unwrap();
    let err = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Fail).unwrap_err();
    let msg = err.to_string();

    assert!(msg.contains("CONFIG_UNUSED_KEYS"), "{msg}");
    assert!(msg.contains("2 unused"), "{msg}");
}

#[test]
fn consumed_only_config_is_clean_in_fail_mode() {
    let yaml = r#"
server:
  bind_addr: "127.0.0.1:8899"
  body_limit_bytes: 1024
logging:
  filter: "debug"
"#;
    let loaded = load_layered_yaml_from_strings(&[yaml]).unwrap();
    let report = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Fail).unwrap();
    assert!(report.is_clean());
}

#[test]
fn empty_config_is_clean() {
    let loaded = load_layered_yaml_from_strings(&["{}"]).unwrap();
    let report = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Fail).unwrap();
    assert!(report.is_clean());
}
