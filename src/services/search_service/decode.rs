use crate::models::IndexDefinition;
use serde_json::{Map, Value};

/// Error texts the backend uses when `FT.INFO` names an index that does not exist.
pub const MISSING_INDEX_MARKERS: [&str; 3] =
    ["Unknown index name", "no such index", "ERR no such index"];

/// Strings verbatim, every other value as compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Decodes an `FT._LIST` reply into index names.
pub fn decode_index_list(reply: &Value) -> Vec<String> {
    match reply {
        Value::Array(items) => items.iter().map(display_value).collect(),
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Array(items)) => items.iter().map(display_value).collect(),
            Ok(_) => Vec::new(),
            Err(_) => text.split_whitespace().map(str::to_string).collect(),
        },
        _ => Vec::new(),
    }
}

/// Decodes an `FT.INFO` reply. `None` means the index does not exist or the
/// reply had no usable shape.
pub fn decode_index_definition(reply: &Value) -> Option<IndexDefinition> {
    match reply {
        Value::Array(items) => Some(IndexDefinition::Fields(fold_pairs(items))),
        Value::String(text) => {
            if MISSING_INDEX_MARKERS.iter().any(|marker| text.contains(marker)) {
                return None;
            }
            match serde_json::from_str::<Value>(text) {
                Ok(parsed) => Some(IndexDefinition::Parsed(parsed)),
                Err(_) => Some(IndexDefinition::Raw { raw: text.clone() }),
            }
        }
        _ => None,
    }
}

// Later duplicates win; a trailing key without a value is dropped.
fn fold_pairs(items: &[Value]) -> Map<String, Value> {
    let mut fields = Map::new();
    for pair in items.chunks_exact(2) {
        fields.insert(display_value(&pair[0]), pair[1].clone());
    }
    fields
}
