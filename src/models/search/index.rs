use serde::Serialize;
use serde_json::{Map, Value};

/// Metadata of a Redis Search index, in whichever shape the `FT.INFO` reply
/// allowed it to be rebuilt.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum IndexDefinition {
    /// Folded from an alternating key/value array.
    Fields(Map<String, Value>),
    /// The reply was a string that did not parse as JSON.
    Raw { raw: String },
    /// The reply was a JSON-encoded string.
    Parsed(Value),
}

impl IndexDefinition {
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            IndexDefinition::Fields(fields) => fields.get(key),
            IndexDefinition::Parsed(value) => value.get(key),
            IndexDefinition::Raw { .. } => None,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            IndexDefinition::Fields(fields) => fields.len(),
            IndexDefinition::Parsed(Value::Object(fields)) => fields.len(),
            IndexDefinition::Parsed(_) | IndexDefinition::Raw { .. } => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_value(&self) -> Value {
        match self {
            IndexDefinition::Fields(fields) => Value::Object(fields.clone()),
            IndexDefinition::Raw { raw } => {
                let mut wrapped = Map::new();
                wrapped.insert("raw".to_string(), Value::String(raw.clone()));
                Value::Object(wrapped)
            }
            IndexDefinition::Parsed(value) => value.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn raw_definition_serializes_as_wrapped_string() {
        let definition = IndexDefinition::Raw {
            raw: "index_name idx".to_string(),
        };
        assert_eq!(serde_json::to_value(&definition).unwrap(), json!({"raw": "index_name idx"}));
        assert_eq!(definition.to_value(), json!({"raw": "index_name idx"}));
        assert!(definition.get("raw").is_none());
    }

    #[test]
    fn fields_serialize_as_plain_object() {
        let mut fields = Map::new();
        fields.insert("index_name".into(), json!("idx:a"));
        let definition = IndexDefinition::Fields(fields);
        assert_eq!(serde_json::to_value(&definition).unwrap(), json!({"index_name": "idx:a"}));
        assert_eq!(definition.get("index_name"), Some(&json!("idx:a")));
        assert_eq!(definition.len(), 1);
    }
}
