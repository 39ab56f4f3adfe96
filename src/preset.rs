use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named filter presets for common query APIs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterPreset {
    #[default]
    None,
    Soql,
    Saql,
    Dc,
}

/// The attribute and list-name filter strings a preset stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPair {
    pub attribute_filter: &'static str,
    pub list_name_filter: &'static str,
}

/// Static lookup from a preset to its filter strings.
pub struct FilterPresetCatalog;

impl FilterPresetCatalog {
    pub fn resolve(preset: FilterPreset) -> FilterPair {
        let (attribute_filter, list_name_filter) = match preset {
            FilterPreset::None => ("", ""),
            FilterPreset::Soql => (
                "status, warnings, totalSize, done, nextRecordsUrl, attributes",
                "records",
            ),
            FilterPreset::Saql => (
                "metadata, warnings, query, action, responseId, responseTime",
                "records",
            ),
            FilterPreset::Dc => (
                "done, endTime, metadata, queryId, rowCount, startTime, nextBatchId",
                "data",
            ),
        };
        FilterPair {
            attribute_filter,
            list_name_filter,
        }
    }
}

impl FilterPreset {
    pub const ALL: [FilterPreset; 4] = [
        FilterPreset::None,
        FilterPreset::Soql,
        FilterPreset::Saql,
        FilterPreset::Dc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FilterPreset::None => "none",
            FilterPreset::Soql => "soql",
            FilterPreset::Saql => "saql",
            FilterPreset::Dc => "dc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterPreset::None => "None",
            FilterPreset::Soql => "SOQL",
            FilterPreset::Saql => "SAQL",
            FilterPreset::Dc => "Data Cloud",
        }
    }
}

impl fmt::Display for FilterPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        FilterPreset::ALL
            .into_iter()
            .find(|preset| preset.as_str() == needle)
            .ok_or_else(|| format!("unknown filter preset: '{}'", needle))
    }
}
