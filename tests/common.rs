//! Common test utilities: fixtures and test doubles for the session collaborators.
use async_trait::async_trait;
use json_table::prelude::*;
use serde_json::json;
use std::sync::Mutex;

/// A gateway that answers every request with the same result and remembers
/// what it was asked, and whether the loading flag was up at the time.
#[allow(dead_code)]
pub struct StubGateway {
    result: std::result::Result<ConversionResponse, ConversionError>,
    loading: Mutex<Option<LoadingFlag>>,
    pub requests: Mutex<Vec<ConversionRequest>>,
    pub loading_seen: Mutex<Vec<bool>>,
}

#[allow(dead_code)]
impl StubGateway {
    pub fn answering(response: ConversionResponse) -> Self {
        Self::with_result(Ok(response))
    }

    pub fn failing(message: &str) -> Self {
        Self::with_result(Err(ConversionError::new(message)))
    }

    fn with_result(result: std::result::Result<ConversionResponse, ConversionError>) -> Self {
        Self {
            result,
            loading: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
            loading_seen: Mutex::new(Vec::new()),
        }
    }

    pub fn watch(&self, flag: LoadingFlag) {
        *self.loading.lock().unwrap() = Some(flag);
    }

    pub fn last_request(&self) -> Option<ConversionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ConversionGateway for StubGateway {
    async fn convert(
        &self,
        request: &ConversionRequest,
    ) -> std::result::Result<ConversionResponse, ConversionError> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(flag) = self.loading.lock().unwrap().as_ref() {
            self.loading_seen.lock().unwrap().push(flag.is_loading());
        }
        self.result.clone()
    }
}

/// A surface that records every presentation it is asked to show.
#[derive(Default)]
#[allow(dead_code)]
pub struct RecordingSurface {
    pub shown: Mutex<Vec<Presentation>>,
}

#[allow(dead_code)]
impl RecordingSurface {
    pub fn count(&self) -> usize {
        self.shown.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<Presentation> {
        self.shown.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl PresentationSurface for RecordingSurface {
    async fn show(&self, presentation: Presentation) {
        self.shown.lock().unwrap().push(presentation);
    }
}

/// An error sink that records every alert.
#[derive(Default)]
#[allow(dead_code)]
pub struct RecordingSink {
    pub alerts: Mutex<Vec<Alert>>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn messages(&self) -> Vec<String> {
        self.alerts
            .lock()
            .unwrap()
            .iter()
            .map(|a| a.message.clone())
            .collect()
    }
}

impl ErrorSink for RecordingSink {
    fn alert(&self, alert: Alert) {
        self.alerts.lock().unwrap().push(alert);
    }
}

/// A small SOQL style query result.
#[allow(dead_code)]
pub const SOQL_SOURCE: &str = r#"{
    "totalSize": 2,
    "done": true,
    "records": [
        {"attributes": {"type": "Account"}, "Id": "001A", "Name": "Acme"},
        {"attributes": {"type": "Account"}, "Id": "001B", "Name": "Globex"}
    ]
}"#;

/// The table the service would return for [`SOQL_SOURCE`].
#[allow(dead_code)]
pub fn table_response() -> ConversionResponse {
    ConversionResponse::new(json!({
        "columns": ["Id", "Name", "longColumnNameHere"],
        "data": [
            {"Id": "001A", "Name": "Acme", "longColumnNameHere": 1},
            {"Id": "001B", "Name": "Globex, Inc.", "longColumnNameHere": null}
        ]
    }))
}

/// A raw key/value payload as the service returns it for the raw formats.
#[allow(dead_code)]
pub fn raw_response() -> ConversionResponse {
    ConversionResponse::new(json!({
        "records": [
            {"Id": "001A", "Name": "Acme"},
            {"Id": "001B", "Name": "Globex"}
        ],
        "totalSize": 2
    }))
}
