//! JSON import/export of quote collections
//!
//! The wire form is a UTF-8 JSON array of `{"text": ..., "category": ...}`
//! objects in collection order. The same form is used for the persisted
//! `quotes` key and for exported files.

use crate::domain::Quote;
use crate::error::{QuoteError, Result};

/// Serialize quotes to a JSON byte stream
pub fn serialize(quotes: &[Quote]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(quotes)?)
}

/// Serialize quotes to a JSON string (persisted form)
pub fn serialize_to_string(quotes: &[Quote]) -> Result<String> {
    Ok(serde_json::to_string(quotes)?)
}

/// Deserialize a JSON byte stream into quotes.
///
/// The whole batch is rejected when the stream is not a JSON array, when an
/// element is missing `text` or `category`, or when either field is empty.
pub fn deserialize(bytes: &[u8]) -> Result<Vec<Quote>> {
    let value: serde_json::Value = serde_json::from_slice(bytes)
        .map_err(|e| QuoteError::Parse(format!("invalid JSON: {}", e)))?;

    let items = match value {
        serde_json::Value::Array(items) => items,
        other => {
            return Err(QuoteError::Parse(format!(
                "expected a JSON array, found {}",
                json_kind(&other)
            )))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let quote: Quote = serde_json::from_value(item)
                .map_err(|e| QuoteError::Parse(format!("entry {}: {}", index, e)))?;
            quote
                .validate()
                .map_err(|e| QuoteError::Parse(format!("entry {}: {}", index, e)))?;
            Ok(quote)
        })
        .collect()
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
