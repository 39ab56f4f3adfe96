use crate::error::ConfigError;
use crate::format::OutputFormat;
use crate::gateway::RequestSchema;
use crate::preset::FilterPreset;
use crate::request::ConversionOptions;
use serde::{Deserialize, Serialize};
use std::fs;

/// Settings of a json-table front end, usually loaded from a JSON file.
///
/// Every field has a default, so a settings file only needs the values it
/// changes:
///
/// ```json
/// { "endpoint": "https://example.org/services/apexrest/jsontable", "schema": "legacy" }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Base URL of the conversion service; method names are appended to it.
    pub endpoint: String,
    pub schema: RequestSchema,
    pub output_format: OutputFormat,
    pub filter_preset: FilterPreset,
    pub number_column: bool,
    /// Theme handed to the result viewer.
    pub result_theme: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080/jsontable".to_string(),
            schema: RequestSchema::Extended,
            output_format: OutputFormat::Grid,
            filter_preset: FilterPreset::None,
            number_column: false,
            result_theme: "default".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = self.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                key: "endpoint",
                message: format!("expected an http(s) URL, found '{}'", self.endpoint),
            });
        }
        if self.result_theme.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "resultTheme",
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// The option state a new session starts with.
    pub fn initial_options(&self) -> ConversionOptions {
        let mut options = ConversionOptions {
            number_column: self.number_column,
            output_format: self.output_format,
            ..ConversionOptions::default()
        };
        options.apply_preset(self.filter_preset);
        options
    }
}
