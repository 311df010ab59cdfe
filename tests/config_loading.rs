//! Configuration loading tests against documents on disk.

use std::sync::Arc;
use std::thread;

use serde_json::json;
use switcher::config::{load_config, ConfigError, RuleError};
use switcher::observability::LogLevel;

mod common;

#[test]
fn test_minimal_document_loads() {
    let doc = common::json_document(
        "info",
        &[json!({
            "name": "web",
            "listen": "0.0.0.0:8080",
            "enable_regexp": false,
            "targets": [{"address": "127.0.0.1:3000"}]
        })],
    );
    let file = common::write_config(&doc, "json");

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.rules.len(), 1);
    assert_eq!(config.rules[0].targets.len(), 1);
    assert_eq!(config.rules[0].first_packet_timeout, 0);
    assert!(config.rules[0].blacklist.is_empty());
}

#[test]
fn test_empty_rule_set() {
    let file = common::write_config(&common::json_document("info", &[]), "json");

    let err = load_config(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyRuleSet));
}

#[test]
fn test_unknown_log_level() {
    let doc = common::json_document(
        "verbose",
        &[json!({"name": "a", "listen": ":1", "targets": [{"address": ":2"}]})],
    );
    let file = common::write_config(&doc, "json");

    let err = load_config(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidLogLevel(_)));
}

#[test]
fn test_invalid_regexp_stops_validation() {
    let doc = common::json_document(
        "debug",
        &[
            json!({
                "name": "mux",
                "listen": "0.0.0.0:443",
                "enable_regexp": true,
                "targets": [
                    {"regexp": "^SSH-", "address": "127.0.0.1:22"},
                    {"regexp": "(unclosed", "address": "127.0.0.1:8443"}
                ]
            }),
            json!({"name": "", "listen": "", "targets": []}),
        ],
    );
    let file = common::write_config(&doc, "json");

    let err = load_config(file.path()).unwrap_err();
    match &err {
        ConfigError::Rule { index: 0, source: RuleError::InvalidRegexp { index: 1, .. } } => {}
        other => panic!("unexpected error: {other}"),
    }
    assert!(err
        .to_string()
        .starts_with("verify rule failed at pos 0 : invalid regexp at pos 1 : "));
}

#[test]
fn test_empty_targets_rejected() {
    let doc = common::json_document(
        "info",
        &[json!({
            "name": "web",
            "listen": "0.0.0.0:8080",
            "enable_regexp": true,
            "first_packet_timeout": 100,
            "blacklist": {"1.2.3.4": true},
            "targets": []
        })],
    );
    let file = common::write_config(&doc, "json");

    let err = load_config(file.path()).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Rule { index: 0, source: RuleError::InvalidTargets }
    ));
}

#[test]
fn test_regexp_ignored_when_disabled() {
    let doc = common::json_document(
        "warn",
        &[json!({
            "name": "plain",
            "listen": "0.0.0.0:9000",
            "targets": [{"regexp": "(unclosed", "address": "127.0.0.1:9001"}]
        })],
    );
    let file = common::write_config(&doc, "json");

    let config = load_config(file.path()).unwrap();
    assert!(config.rules[0].targets[0].matcher.is_none());
}

#[test]
fn test_malformed_document() {
    let file = common::write_config("{\"log_level\": \"info\", \"rules\": [", "json");

    let err = load_config(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
}

#[test]
fn test_toml_document() {
    let doc = r#"
log_level = "trace"

[[rules]]
name = "tls-or-ssh"
listen = "0.0.0.0:443"
enable_regexp = true

[[rules.targets]]
regexp = "^SSH-"
address = "127.0.0.1:22"

[[rules.targets]]
regexp = "^\\x16\\x03"
address = "127.0.0.1:8443"

[rules.blacklist]
"192.0.2.7" = true
"#;
    let file = common::write_config(doc, "toml");

    let config = load_config(file.path()).unwrap();
    let rule = &config.rules[0];
    assert_eq!(config.log_level, LogLevel::Trace);
    assert_eq!(rule.first_packet_timeout, 5000);
    assert_eq!(rule.blacklist.get("192.0.2.7"), Some(&true));
    assert_eq!(
        rule.match_target(&[0x16, 0x03, 0x01]).map(|t| t.address.as_str()),
        Some("127.0.0.1:8443")
    );
}

#[test]
fn test_rules_keep_document_order() {
    let rules: Vec<_> = (0..5)
        .map(|i| {
            json!({
                "name": format!("rule-{i}"),
                "listen": format!("0.0.0.0:{}", 7000 + i),
                "targets": [{"address": "127.0.0.1:1"}]
            })
        })
        .collect();
    let file = common::write_config(&common::json_document("error", &rules), "json");

    let config = load_config(file.path()).unwrap();
    let names: Vec<_> = config.rules.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["rule-0", "rule-1", "rule-2", "rule-3", "rule-4"]);
}

#[test]
fn test_configuration_shared_across_threads() {
    let doc = common::json_document(
        "info",
        &[json!({
            "name": "ssh",
            "listen": "0.0.0.0:2222",
            "enable_regexp": true,
            "targets": [{"regexp": "^SSH-", "address": "127.0.0.1:22"}]
        })],
    );
    let file = common::write_config(&doc, "json");
    let config = Arc::new(load_config(file.path()).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let config = Arc::clone(&config);
            thread::spawn(move || config.rules[0].match_target(b"SSH-2.0-client").is_some())
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
