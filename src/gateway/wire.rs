use crate::error::ConversionError;
use crate::format::OutputFormat;
use crate::request::ConversionRequest;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which request shape the issuing surface speaks.
///
/// The two shapes are never merged: a surface picks one and the service
/// endpoint is expected to match it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestSchema {
    /// One method per format and only the five base fields.
    Legacy,
    /// A single `createTable` method taking the format as a parameter.
    #[default]
    Extended,
}

/// A method name plus its JSON parameters, ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcCall {
    pub method: &'static str,
    pub params: Value,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BaseParams<'a> {
    json_string: &'a str,
    number_column: bool,
    attribute_filter: &'a str,
    list_name_filter: &'a str,
    cache_bust: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExtendedParams<'a> {
    #[serde(flatten)]
    base: BaseParams<'a>,
    include_child_lists: bool,
    path: &'a str,
    output_format_value: &'static str,
}

impl RequestSchema {
    /// Encodes a request in this schema.
    ///
    /// Fails without touching the network when the legacy schema is asked
    /// for a format it has no method for.
    pub fn encode(self, request: &ConversionRequest) -> Result<RpcCall, ConversionError> {
        let base = BaseParams {
            json_string: &request.source_text,
            number_column: request.number_column,
            attribute_filter: &request.attribute_filter,
            list_name_filter: &request.list_name_filter,
            cache_bust: request.cache_bust,
        };

        let (method, params) = match self {
            RequestSchema::Legacy => {
                let method = legacy_method(request.output_format).ok_or_else(|| {
                    ConversionError::new(format!(
                        "Output format '{}' is not supported by the legacy request schema",
                        request.output_format
                    ))
                })?;
                (method, serde_json::to_value(base))
            }
            RequestSchema::Extended => (
                "createTable",
                serde_json::to_value(ExtendedParams {
                    base,
                    include_child_lists: request.include_child_lists,
                    path: &request.path,
                    output_format_value: request.output_format.wire_value(),
                }),
            ),
        };

        let params = params.map_err(|e| {
            ConversionError::new(format!("Failed to encode request parameters: {}", e))
        })?;
        Ok(RpcCall { method, params })
    }
}

fn legacy_method(format: OutputFormat) -> Option<&'static str> {
    match format {
        OutputFormat::Grid => Some("createTable"),
        OutputFormat::KeyvalueGrid => Some("createKeyValueTable"),
        OutputFormat::CsvText => Some("createCsv"),
        OutputFormat::ConsoleText => Some("createConsole"),
        OutputFormat::RawKeyvalue
        | OutputFormat::RawIndexed
        | OutputFormat::RawKeyvaluePair
        | OutputFormat::RawCsv => None,
    }
}
