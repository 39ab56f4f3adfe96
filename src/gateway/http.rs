use super::{ConversionGateway, RequestSchema};
use crate::error::ConversionError;
use crate::request::ConversionRequest;
use crate::response::ConversionResponse;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

/// Talks to the conversion service over HTTP.
///
/// Each call is a `POST <endpoint>/<method>` with the encoded parameters as
/// the JSON body. A 2xx answer is the response payload; anything else is an
/// error whose message is taken from the body when it has one.
pub struct HttpGateway {
    client: reqwest::Client,
    endpoint: String,
    schema: RequestSchema,
}

impl HttpGateway {
    pub fn new(endpoint: impl Into<String>, schema: RequestSchema) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint, schema)
    }

    pub fn with_client(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        schema: RequestSchema,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            schema,
        }
    }

    pub fn schema(&self) -> RequestSchema {
        self.schema
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), method)
    }
}

#[async_trait]
impl ConversionGateway for HttpGateway {
    async fn convert(
        &self,
        request: &ConversionRequest,
    ) -> Result<ConversionResponse, ConversionError> {
        let call = self.schema.encode(request)?;
        let url = self.method_url(call.method);
        debug!(method = call.method, %url, format = %request.output_format, "calling conversion service");

        let response = self
            .client
            .post(&url)
            .json(&call.params)
            .send()
            .await
            .map_err(|e| ConversionError::new(format!("Conversion service unreachable: {}", e)))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            ConversionError::new(format!("Failed to read conversion response: {}", e))
        })?;

        if !status.is_success() {
            warn!(%status, method = call.method, "conversion service reported a failure");
            return Err(ConversionError::new(error_message(&body).unwrap_or_else(
                || format!("Conversion service returned {}", status),
            )));
        }

        serde_json::from_str::<Value>(&body)
            .map(ConversionResponse::new)
            .map_err(|e| {
                ConversionError::new(format!("Conversion service returned invalid JSON: {}", e))
            })
    }
}

/// Pulls a message out of the error bodies the service produces:
/// `{"message": ..}`, `{"body": {"message": ..}}` or `[{"message": ..}]`.
fn error_message(body: &str) -> Option<String> {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => {
            let candidate = match &value {
                Value::Array(items) => items.first()?,
                other => other,
            };
            candidate
                .get("message")
                .or_else(|| candidate.get("body").and_then(|b| b.get("message")))
                .and_then(Value::as_str)
                .map(str::to_string)
        }
        Err(_) => {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
    }
}
