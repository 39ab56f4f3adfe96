use crate::format::OutputFormat;
use thiserror::Error;

/// Errors reported by the conversion service, or raised before a call reaches it.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ConversionError {
    pub message: String,
}

impl ConversionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors that can occur while building a presentation configuration from a response.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PresentationError {
    #[error("Expected a table payload with 'columns' and 'data' for format '{format}': {message}")]
    TableShape {
        format: OutputFormat,
        message: String,
    },

    #[error("Expected a text payload for format '{format}', but found {found}")]
    TextShape {
        format: OutputFormat,
        found: &'static str,
    },

    #[error("Failed to serialize the result for format '{format}': {message}")]
    Serialization {
        format: OutputFormat,
        message: String,
    },

    #[error("Failed to export the grid as CSV: {0}")]
    Export(String),
}

/// Errors raised by the local prettify transform.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("Source text is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Failed to re-serialize JSON: {0}")]
    Serialization(String),
}

/// Errors that can occur while loading settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read settings file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid setting '{key}': {message}")]
    Invalid { key: &'static str, message: String },
}

/// Any failure of a user action. Every variant ends up as one alert.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ActionError {
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Presentation(#[from] PresentationError),

    #[error(transparent)]
    Format(#[from] FormatError),
}
