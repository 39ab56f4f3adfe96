//! Turns a conversion response into the configuration of a presentation surface.
//!
//! Every [`OutputFormat`] maps to exactly one [`FormatProfile`], and the
//! profile's family decides how the payload is read:
//!
//! * table formats deserialize `{columns, data}` into a [`GridConfig`];
//! * formatted text (CSV, console) is shown verbatim and never re-encoded;
//! * raw formats are pretty-printed with four-space indentation.

use crate::error::PresentationError;
use crate::format::{FormatFamily, OutputFormat};
use crate::prettify::to_pretty_json;
use crate::response::{ConversionResponse, Row};
use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

const NARROW_COLUMN_WIDTH: u32 = 120;
const NARROW_LABEL_LIMIT: usize = 10;
const WIDTH_PER_CHARACTER: u32 = 12;

/// Initial width of a grid column, derived from its label length.
///
/// Length is measured in UTF-16 code units, the unit grid hosts measure
/// labels in. Labels shorter than ten units get a fixed width; longer ones
/// grow linearly. Nothing is truncated.
pub fn column_width(label: &str) -> u32 {
    let length = label.encode_utf16().count();
    if length < NARROW_LABEL_LIMIT {
        NARROW_COLUMN_WIDTH
    } else {
        length as u32 * WIDTH_PER_CHARACTER
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridColumn {
    pub label: String,
    pub field_name: String,
    pub initial_width: u32,
}

impl GridColumn {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            field_name: label.to_string(),
            initial_width: column_width(label),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridConfig {
    pub columns: Vec<GridColumn>,
    pub rows: Vec<Row>,
}

impl GridConfig {
    /// Renders the grid as CSV with a header line, rows in column order.
    pub fn to_csv(&self) -> Result<String, PresentationError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(true)
            .from_writer(Vec::new());

        writer
            .write_record(self.columns.iter().map(|column| column.label.as_str()))
            .map_err(export_error)?;
        for row in &self.rows {
            writer
                .write_record(
                    self.columns
                        .iter()
                        .map(|column| cell_text(row.get(&column.field_name))),
                )
                .map_err(export_error)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| PresentationError::Export(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| PresentationError::Export(e.to_string()))
    }
}

fn export_error(e: csv::Error) -> PresentationError {
    PresentationError::Export(e.to_string())
}

/// Plain-text rendering of a grid cell.
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Which buttons the text viewer offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ButtonVisibility {
    pub copy: bool,
    pub download: bool,
    pub prettify: bool,
    pub close: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextConfig {
    pub content: String,
    pub file_name: String,
    pub file_extension: String,
    pub mime_type: String,
    pub include_timestamp_in_filename: bool,
    pub buttons: ButtonVisibility,
}

impl TextConfig {
    /// The file name offered for download, stamped with `at` when the
    /// timestamp flag is set.
    pub fn download_file_name(&self, at: NaiveDateTime) -> String {
        if self.include_timestamp_in_filename {
            format!(
                "{}_{}{}",
                self.file_name,
                at.format("%Y%m%d_%H%M%S"),
                self.file_extension
            )
        } else {
            format!("{}{}", self.file_name, self.file_extension)
        }
    }
}

/// The configuration handed to a presentation surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PresentationConfig {
    Grid(GridConfig),
    Text(TextConfig),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalSize {
    Small,
    Medium,
    Large,
}

/// A configuration plus the chrome the surface host needs to open it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    pub format: OutputFormat,
    pub size: ModalSize,
    pub header: &'static str,
    /// Syntax highlighting mode of the text viewer; `None` for grids.
    pub syntax_mode: Option<&'static str>,
    pub theme: String,
    pub config: PresentationConfig,
}

impl Presentation {
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }
}

/// Download metadata of a text format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadProfile {
    pub file_name: &'static str,
    pub extension: &'static str,
    pub mime_type: &'static str,
}

/// Static presentation settings of one output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatProfile {
    pub header: &'static str,
    pub size: ModalSize,
    pub syntax_mode: Option<&'static str>,
    pub download: Option<DownloadProfile>,
}

const CSV_MIME: &str = "text/csv; charset=utf-8;";
const TEXT_MIME: &str = "text/plain; charset=utf-8;";
const JSON_MIME: &str = "application/json; charset=utf-8;";
const JSON_MODE: &str = "text/javascript";

const fn json_download(file_name: &'static str) -> Option<DownloadProfile> {
    Some(DownloadProfile {
        file_name,
        extension: ".json",
        mime_type: JSON_MIME,
    })
}

/// Looks up the presentation settings of a format.
pub fn profile(format: OutputFormat) -> FormatProfile {
    match format {
        OutputFormat::Grid => FormatProfile {
            header: "Data Table Result",
            size: ModalSize::Large,
            syntax_mode: None,
            download: None,
        },
        OutputFormat::KeyvalueGrid => FormatProfile {
            header: "Key / Value Pair Table Result",
            size: ModalSize::Large,
            syntax_mode: None,
            download: None,
        },
        OutputFormat::CsvText => FormatProfile {
            header: "CSV String",
            size: ModalSize::Large,
            syntax_mode: Some("csv"),
            download: Some(DownloadProfile {
                file_name: "JSONTableCsvString",
                extension: ".csv",
                mime_type: CSV_MIME,
            }),
        },
        OutputFormat::ConsoleText => FormatProfile {
            header: "Console String Result",
            size: ModalSize::Large,
            syntax_mode: Some("text/plain"),
            download: Some(DownloadProfile {
                file_name: "JSONTableConsoleString",
                extension: ".txt",
                mime_type: TEXT_MIME,
            }),
        },
        OutputFormat::RawKeyvalue => FormatProfile {
            header: "RAW Key/Value Result",
            size: ModalSize::Medium,
            syntax_mode: Some(JSON_MODE),
            download: json_download("JSONTableKeyValueData"),
        },
        OutputFormat::RawIndexed => FormatProfile {
            header: "RAW Indexed Data Result",
            size: ModalSize::Medium,
            syntax_mode: Some(JSON_MODE),
            download: json_download("JSONTableIndexedData"),
        },
        OutputFormat::RawKeyvaluePair => FormatProfile {
            header: "RAW Key/Value Pair Data Result",
            size: ModalSize::Medium,
            syntax_mode: Some(JSON_MODE),
            download: json_download("JSONTableKeyValuePairData"),
        },
        OutputFormat::RawCsv => FormatProfile {
            header: "RAW CSV Data Result",
            size: ModalSize::Medium,
            syntax_mode: Some(JSON_MODE),
            download: json_download("JSONTableCsvData"),
        },
    }
}

/// Selects and configures the presentation surface for a response.
pub struct ResultDispatcher;

impl ResultDispatcher {
    /// Builds the surface configuration for `response`, read as `format`.
    ///
    /// # Returns
    ///
    /// * `Ok(PresentationConfig::Grid)` for the table formats.
    /// * `Ok(PresentationConfig::Text)` for every other format.
    /// * `Err(PresentationError)` if the payload does not have the shape the
    ///   format implies, or cannot be serialized. No partial configuration is
    ///   ever returned.
    pub fn dispatch(
        format: OutputFormat,
        response: &ConversionResponse,
    ) -> Result<PresentationConfig, PresentationError> {
        let family = format.family();
        debug!(%format, ?family, "dispatching conversion response");

        match family {
            FormatFamily::Table => Self::grid(format, response).map(PresentationConfig::Grid),
            FormatFamily::Formatted => {
                let content = response
                    .as_text()
                    .ok_or(PresentationError::TextShape {
                        format,
                        found: response.kind(),
                    })?
                    .to_string();
                Ok(PresentationConfig::Text(Self::text(format, content, false)))
            }
            FormatFamily::Raw => {
                let content = to_pretty_json(response.value()).map_err(|e| {
                    PresentationError::Serialization {
                        format,
                        message: e.to_string(),
                    }
                })?;
                Ok(PresentationConfig::Text(Self::text(format, content, true)))
            }
        }
    }

    /// Like [`ResultDispatcher::dispatch`], wrapped with the surface chrome.
    pub fn present(
        format: OutputFormat,
        response: &ConversionResponse,
    ) -> Result<Presentation, PresentationError> {
        let config = Self::dispatch(format, response)?;
        let profile = profile(format);
        Ok(Presentation {
            format,
            size: profile.size,
            header: profile.header,
            syntax_mode: profile.syntax_mode,
            theme: "default".to_string(),
            config,
        })
    }

    fn grid(
        format: OutputFormat,
        response: &ConversionResponse,
    ) -> Result<GridConfig, PresentationError> {
        let table = response
            .to_table()
            .map_err(|e| PresentationError::TableShape {
                format,
                message: e.to_string(),
            })?;

        let columns = table
            .columns
            .iter()
            .map(|label| GridColumn::new(label))
            .collect();

        Ok(GridConfig {
            columns,
            rows: table.data,
        })
    }

    fn text(format: OutputFormat, content: String, prettify: bool) -> TextConfig {
        // Only called for text families, which always carry download metadata.
        let download = profile(format).download.unwrap_or(DownloadProfile {
            file_name: "JSONTableResult",
            extension: ".txt",
            mime_type: TEXT_MIME,
        });

        TextConfig {
            content,
            file_name: download.file_name.to_string(),
            file_extension: download.extension.to_string(),
            mime_type: download.mime_type.to_string(),
            include_timestamp_in_filename: true,
            buttons: ButtonVisibility {
                copy: true,
                download: true,
                prettify,
                close: true,
            },
        }
    }
}
