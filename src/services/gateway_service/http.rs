use crate::error::Result;
use reqwest::{RequestBuilder, StatusCode};
use serde_json::{Map, Value};

/// Status and body of a backend reply. The body is JSON when it parses,
/// the raw text otherwise, and an empty object when there is no body.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: StatusCode,
    pub data: Value,
}

pub async fn send(request: RequestBuilder) -> Result<Reply> {
    let response = request.send().await?;
    let status = response.status();
    let text = response.text().await?;
    Ok(Reply {
        status,
        data: decode_body(text),
    })
}

pub fn decode_body(text: String) -> Value {
    if text.is_empty() {
        return Value::Object(Map::new());
    }
    match serde_json::from_str::<Value>(&text) {
        Ok(data) => data,
        Err(_) => Value::String(text),
    }
}
