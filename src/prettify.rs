use crate::error::FormatError;
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

const INDENT: &[u8] = b"    ";

/// Serializes a value as JSON indented with four spaces.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut serializer)?;
    // serde_json only ever writes valid UTF-8.
    Ok(String::from_utf8(buf).unwrap_or_default())
}

/// Re-indents JSON source text with four spaces.
///
/// The input is left to the caller; on failure nothing is replaced.
pub fn prettify(text: &str) -> Result<String, FormatError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| FormatError::InvalidJson(e.to_string()))?;
    to_pretty_json(&value).map_err(|e| FormatError::Serialization(e.to_string()))
}

/// Visual state of the prettify control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    #[default]
    Neutral,
    Success,
    Destructive,
}
