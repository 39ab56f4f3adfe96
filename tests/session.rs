//! End-to-end tests of a session: options -> gateway -> dispatcher -> surface,
//! with every failure reported once through the error sink.
mod common;
use common::*;
use json_table::prelude::*;
use serde_json::json;
use std::sync::Arc;
use tokio_test::block_on;

struct Harness {
    gateway: Arc<StubGateway>,
    surface: Arc<RecordingSurface>,
    sink: Arc<RecordingSink>,
    session: Session,
}

fn harness(gateway: StubGateway) -> Harness {
    let gateway = Arc::new(gateway);
    let surface = Arc::new(RecordingSurface::default());
    let sink = Arc::new(RecordingSink::default());
    let session = Session::new(gateway.clone(), surface.clone(), sink.clone());
    gateway.watch(session.loading_flag());
    Harness {
        gateway,
        surface,
        sink,
        session,
    }
}

#[test]
fn test_create_table_shows_grid() {
    let mut h = harness(StubGateway::answering(table_response()));
    h.session.set_source_text(SOQL_SOURCE);
    h.session.select_preset(FilterPreset::Soql);

    block_on(h.session.create_table()).unwrap();

    assert_eq!(h.surface.count(), 1);
    let presentation = h.surface.last().unwrap();
    assert_eq!(presentation.format, OutputFormat::Grid);
    assert!(matches!(presentation.config, PresentationConfig::Grid(_)));
    assert!(h.sink.messages().is_empty());
    assert!(!h.session.is_loading());

    let request = h.gateway.last_request().unwrap();
    assert_eq!(request.source_text, SOQL_SOURCE);
    assert_eq!(request.list_name_filter, "records");
    assert_eq!(
        request.attribute_filter,
        "status, warnings, totalSize, done, nextRecordsUrl, attributes"
    );
}

#[test]
fn test_loading_flag_is_up_during_the_call() {
    let h = harness(StubGateway::answering(table_response()));
    assert!(!h.session.is_loading());

    block_on(h.session.create_table()).unwrap();

    assert_eq!(*h.gateway.loading_seen.lock().unwrap(), vec![true]);
    assert!(!h.session.is_loading());
}

#[test]
fn test_conversion_error_is_alerted_and_clears_loading() {
    let h = harness(StubGateway::failing("Unexpected character at input 'x'"));

    let err = block_on(h.session.create_table()).unwrap_err();

    assert!(matches!(err, ActionError::Conversion(_)));
    assert_eq!(h.sink.messages(), vec!["Unexpected character at input 'x'"]);
    let alert = h.sink.alerts.lock().unwrap()[0].clone();
    assert_eq!(alert.label, "Error");
    assert_eq!(alert.theme, "error");
    assert_eq!(h.surface.count(), 0);
    assert!(!h.session.is_loading());
}

#[test]
fn test_presentation_error_is_alerted_and_clears_loading() {
    // The service answered with text although a grid was requested.
    let mut h = harness(StubGateway::answering(ConversionResponse::text("a,b\n1,2")));
    h.session.select_output_format(OutputFormat::KeyvalueGrid);

    let err = block_on(h.session.create_table()).unwrap_err();

    assert!(matches!(err, ActionError::Presentation(_)));
    assert_eq!(h.sink.messages().len(), 1);
    assert_eq!(h.surface.count(), 0);
    assert!(!h.session.is_loading());
}

#[test]
fn test_format_error_keeps_source_and_clears_loading() {
    let mut h = harness(StubGateway::answering(table_response()));
    h.session.set_source_text("{\"broken\": ");

    let err = h.session.prettify_source().unwrap_err();

    assert!(matches!(err, ActionError::Format(_)));
    assert_eq!(h.session.options().source_text, "{\"broken\": ");
    assert_eq!(h.session.prettify_variant(), ButtonVariant::Destructive);
    assert_eq!(h.sink.messages().len(), 1);
    assert!(!h.session.is_loading());
    assert!(h.gateway.requests.lock().unwrap().is_empty());
}

#[test]
fn test_prettify_replaces_source() {
    let mut h = harness(StubGateway::answering(table_response()));
    h.session.set_source_text("{\"a\":[1,2]}");

    h.session.prettify_source().unwrap();

    assert_eq!(
        h.session.options().source_text,
        "{\n    \"a\": [\n        1,\n        2\n    ]\n}"
    );
    assert_eq!(h.session.prettify_variant(), ButtonVariant::Success);
    assert!(!h.session.is_loading());
}

#[test]
fn test_selected_format_drives_the_result() {
    let mut h = harness(StubGateway::answering(ConversionResponse::new(json!({"a": 1}))));
    h.session.select_output_format(OutputFormat::RawIndexed);
    h.session.set_result_theme("material");

    block_on(h.session.create_table()).unwrap();

    assert_eq!(
        h.gateway.last_request().unwrap().output_format,
        OutputFormat::RawIndexed
    );
    let presentation = h.surface.last().unwrap();
    assert_eq!(presentation.theme, "material");
    let PresentationConfig::Text(text) = presentation.config else {
        panic!("expected a text config");
    };
    assert_eq!(text.content, "{\n    \"a\": 1\n}");
}

#[test]
fn test_session_from_settings() {
    let settings = Settings {
        output_format: OutputFormat::CsvText,
        filter_preset: FilterPreset::Saql,
        number_column: true,
        result_theme: "monokai".to_string(),
        ..Settings::default()
    };
    let session = Session::from_settings(
        &settings,
        Arc::new(StubGateway::answering(ConversionResponse::text(""))),
        Arc::new(RecordingSurface::default()),
        Arc::new(RecordingSink::default()),
    );

    let options = session.options();
    assert_eq!(options.output_format, OutputFormat::CsvText);
    assert_eq!(options.filter_preset, FilterPreset::Saql);
    assert_eq!(options.list_name_filter, "records");
    assert!(options.number_column);
    assert_eq!(session.result_theme(), "monokai");
}

#[test]
fn test_session_survives_failures() {
    let mut h = harness(StubGateway::failing("Service unavailable"));
    h.session.set_source_text("{}");

    assert!(block_on(h.session.create_table()).is_err());
    assert!(block_on(h.session.create_table()).is_err());
    h.session.prettify_source().unwrap();

    assert_eq!(h.sink.messages().len(), 2);
    assert_eq!(h.gateway.requests.lock().unwrap().len(), 2);
    assert!(!h.session.is_loading());
}
