use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The presentation format the user picked for a conversion.
///
/// The format decides both what shape the service returns and which
/// surface shows it, so it travels with the request as plain data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Grid,
    KeyvalueGrid,
    CsvText,
    ConsoleText,
    RawKeyvalue,
    RawIndexed,
    RawKeyvaluePair,
    RawCsv,
}

/// How a format's response has to be treated before it can be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatFamily {
    /// `{columns, data}` rendered in a grid.
    Table,
    /// Text the service already formatted; shown verbatim.
    Formatted,
    /// Structured data the dispatcher pretty-prints itself.
    Raw,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 8] = [
        OutputFormat::Grid,
        OutputFormat::KeyvalueGrid,
        OutputFormat::CsvText,
        OutputFormat::ConsoleText,
        OutputFormat::RawKeyvalue,
        OutputFormat::RawIndexed,
        OutputFormat::RawKeyvaluePair,
        OutputFormat::RawCsv,
    ];

    pub fn family(self) -> FormatFamily {
        match self {
            OutputFormat::Grid | OutputFormat::KeyvalueGrid => FormatFamily::Table,
            OutputFormat::CsvText | OutputFormat::ConsoleText => FormatFamily::Formatted,
            OutputFormat::RawKeyvalue
            | OutputFormat::RawIndexed
            | OutputFormat::RawKeyvaluePair
            | OutputFormat::RawCsv => FormatFamily::Raw,
        }
    }

    /// Canonical identifier, as used in settings files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Grid => "grid",
            OutputFormat::KeyvalueGrid => "keyvalue-grid",
            OutputFormat::CsvText => "csv-text",
            OutputFormat::ConsoleText => "console-text",
            OutputFormat::RawKeyvalue => "raw-keyvalue",
            OutputFormat::RawIndexed => "raw-indexed",
            OutputFormat::RawKeyvaluePair => "raw-keyvalue-pair",
            OutputFormat::RawCsv => "raw-csv",
        }
    }

    /// The value the conversion service expects in `outputFormatValue`.
    pub fn wire_value(self) -> &'static str {
        match self {
            OutputFormat::Grid => "lwctable",
            OutputFormat::KeyvalueGrid => "lwckeyvaluetable",
            OutputFormat::CsvText => "csvstring",
            OutputFormat::ConsoleText => "consolestring",
            OutputFormat::RawKeyvalue => "rawkeyvalue",
            OutputFormat::RawIndexed => "rawindexed",
            OutputFormat::RawKeyvaluePair => "rawkeyvaluepair",
            OutputFormat::RawCsv => "rawcsv",
        }
    }

    /// Human-readable label for option pickers.
    pub fn label(self) -> &'static str {
        match self {
            OutputFormat::Grid => "Datatable",
            OutputFormat::KeyvalueGrid => "Key/Value table",
            OutputFormat::CsvText => "CSV String",
            OutputFormat::ConsoleText => "Console String",
            OutputFormat::RawKeyvalue => "RAW Key/Value data",
            OutputFormat::RawIndexed => "RAW Indexed data",
            OutputFormat::RawKeyvaluePair => "RAW Key/Value Pair data",
            OutputFormat::RawCsv => "RAW CSV Data",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    /// Accepts both the canonical identifier and the service wire value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == needle || format.wire_value() == needle)
            .ok_or_else(|| format!("unknown output format: '{}'", needle))
    }
}
