//! Tests for loading settings.
use json_table::prelude::*;

#[test]
fn test_partial_settings_fall_back_to_defaults() {
    let settings = Settings::from_json(
        r#"{ "endpoint": "https://example.org/services/apexrest/jsontable", "schema": "legacy", "filterPreset": "dc" }"#,
    )
    .unwrap();

    assert_eq!(settings.schema, RequestSchema::Legacy);
    assert_eq!(settings.filter_preset, FilterPreset::Dc);
    assert_eq!(settings.output_format, OutputFormat::Grid);
    assert_eq!(settings.result_theme, "default");

    let options = settings.initial_options();
    assert_eq!(options.list_name_filter, "data");
    assert!(options.source_text.is_empty());
}

#[test]
fn test_output_format_uses_canonical_names() {
    let settings = Settings::from_json(r#"{ "outputFormat": "raw-keyvalue-pair" }"#).unwrap();
    assert_eq!(settings.output_format, OutputFormat::RawKeyvaluePair);

    let err = Settings::from_json(r#"{ "outputFormat": "xml" }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_invalid_endpoint_is_rejected() {
    let err = Settings::from_json(r#"{ "endpoint": "ftp://example.org" }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { key: "endpoint", .. }));
}

#[test]
fn test_missing_file_reports_path() {
    let err = Settings::from_file("does/not/exist.json").unwrap_err();
    assert!(err.to_string().contains("does/not/exist.json"));
}
