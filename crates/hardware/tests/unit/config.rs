//! Configuration Tests.
//!
//! Verifies JSON defaults, overrides, unknown-field rejection and file loading.

use std::io::Write;

use pipesim_core::common::error::ConfigError;
use pipesim_core::config::{Config, GeneralConfig, LoadConsumerForwarding, PipelineConfig};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn empty_object_is_default() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config, Config::default());
    assert!(config.general.print_states);
    assert!(config.general.print_program);
    assert_eq!(config.general.max_cycles, None);
    assert_eq!(
        config.pipeline.load_consumer_forwarding,
        LoadConsumerForwarding::Complete
    );
}

#[test]
fn full_config_overrides_everything() {
    let json = r#"{
        "general": { "print_states": false, "print_program": false, "max_cycles": 500 },
        "pipeline": { "load_consumer_forwarding": "Legacy" }
    }"#;
    assert_eq!(
        Config::from_json(json).unwrap(),
        Config {
            general: GeneralConfig {
                print_states: false,
                print_program: false,
                max_cycles: Some(500),
            },
            pipeline: PipelineConfig {
                load_consumer_forwarding: LoadConsumerForwarding::Legacy,
            },
        }
    );
}

#[rstest]
#[case::top_level(r#"{ "verbose": true }"#)]
#[case::general(r#"{ "general": { "print_stats": true } }"#)]
#[case::pipeline(r#"{ "pipeline": { "width": 2 } }"#)]
fn unknown_fields_are_rejected(#[case] json: &str) {
    let result = Config::from_json(json);
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[rstest]
#[case("\"legacy\"")]
#[case("\"None\"")]
#[case("1")]
fn bad_policy_names_are_rejected(#[case] value: &str) {
    let pipeline = format!(r#"{{ "load_consumer_forwarding": {value} }}"#);
    let json = format!(r#"{{ "pipeline": {pipeline} }}"#);
    assert!(Config::from_json(&json).is_err());
}

#[test]
fn loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "general": {{ "max_cycles": 12 }} }}"#).unwrap();
    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.general.max_cycles, Some(12));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::from_file(dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}
