use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A single record of a table result, normally an object keyed by column name.
/// Rows are passed through as the service sent them.
pub type Row = Value;

/// The payload returned by the conversion service.
///
/// Its shape depends on the output format of the request: table formats
/// carry `{columns, data}`, formatted text formats carry a string and the
/// raw formats carry arbitrary JSON. The wrapper does not check which one
/// it holds; the dispatcher does that lazily.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversionResponse(pub Value);

/// The table payload of the grid formats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    pub columns: Vec<String>,
    /// A missing or `null` data list reads as no rows.
    #[serde(default, deserialize_with = "rows_or_empty")]
    pub data: Vec<Row>,
}

fn rows_or_empty<'de, D>(deserializer: D) -> Result<Vec<Row>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Row>>::deserialize(deserializer)?.unwrap_or_default())
}

impl ConversionResponse {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self(Value::String(text.into()))
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    pub fn as_text(&self) -> Option<&str> {
        self.0.as_str()
    }

    pub fn to_table(&self) -> Result<TableData, serde_json::Error> {
        TableData::deserialize(&self.0)
    }

    /// A short name for the JSON kind held, for error messages.
    pub fn kind(&self) -> &'static str {
        match &self.0 {
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Array(_) => "an array",
            Value::Object(_) => "an object",
        }
    }
}

impl From<Value> for ConversionResponse {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<TableData> for ConversionResponse {
    fn from(table: TableData) -> Self {
        // Serializing strings and JSON maps cannot fail.
        Self(serde_json::to_value(table).unwrap_or(Value::Null))
    }
}
