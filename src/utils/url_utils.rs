use crate::error::{GatewayError, Result};
use crate::utils::storage::{UiStorage, APP_PORT_KEY};
use reqwest::Url;
use serde_json::Value;

pub const DEFAULT_APP_PORT: u16 = 5001;

/// Port of the backend as persisted in UI storage, `5001` when unset or `0`.
pub fn app_port<S: UiStorage + ?Sized>(storage: &S) -> Result<u16> {
    match storage.get_field(APP_PORT_KEY)? {
        None | Some(Value::Null) => Ok(DEFAULT_APP_PORT),
        Some(Value::Number(number)) if number.as_u64() == Some(0) => Ok(DEFAULT_APP_PORT),
        Some(Value::Number(number)) => number
            .as_u64()
            .and_then(|port| u16::try_from(port).ok())
            .ok_or_else(|| GatewayError::Config(format!("invalid {}: {}", APP_PORT_KEY, number))),
        Some(Value::String(text)) if text.trim().is_empty() => Ok(DEFAULT_APP_PORT),
        Some(Value::String(text)) => text
            .trim()
            .parse::<u16>()
            .map_err(|_| GatewayError::Config(format!("invalid {}: {:?}", APP_PORT_KEY, text))),
        Some(other) => Err(GatewayError::Config(format!(
            "invalid {}: {}",
            APP_PORT_KEY, other
        ))),
    }
}

pub fn base_url_for_port(port: u16) -> Result<Url> {
    Url::parse(&format!("http://localhost:{}", port))
        .map_err(|e| GatewayError::InvalidUrl(e.to_string()))
}

// No reachability check: a dead backend only shows up on the first request.
pub fn resolve_base_url<S: UiStorage + ?Sized>(storage: &S) -> Result<Url> {
    base_url_for_port(app_port(storage)?)
}

/// Appends percent-encoded path segments to the backend base url.
pub fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| GatewayError::InvalidUrl(format!("{} cannot be a base url", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::storage::MemoryStorage;
    use serde_json::json;

    #[test]
    fn default_port_when_unset() {
        let storage = MemoryStorage::new();
        assert_eq!(resolve_base_url(&storage).unwrap().as_str(), "http://localhost:5001/");

        let storage = MemoryStorage::new().with_field(APP_PORT_KEY, json!(""));
        assert_eq!(app_port(&storage).unwrap(), DEFAULT_APP_PORT);

        let storage = MemoryStorage::new().with_field(APP_PORT_KEY, Value::Null);
        assert_eq!(app_port(&storage).unwrap(), DEFAULT_APP_PORT);

        let storage = MemoryStorage::new().with_field(APP_PORT_KEY, json!(0));
        assert_eq!(resolve_base_url(&storage).unwrap().as_str(), "http://localhost:5001/");
    }

    #[test]
    fn port_from_number_or_string() {
        let storage = MemoryStorage::new().with_field(APP_PORT_KEY, json!(5540));
        assert_eq!(resolve_base_url(&storage).unwrap().as_str(), "http://localhost:5540/");

        let storage = MemoryStorage::new().with_field(APP_PORT_KEY, json!("5541"));
        assert_eq!(app_port(&storage).unwrap(), 5541);
    }

    #[test]
    fn invalid_port_is_a_config_error() {
        let storage = MemoryStorage::new().with_field(APP_PORT_KEY, json!("abc"));
        assert!(matches!(app_port(&storage), Err(GatewayError::Config(_))));

        let storage = MemoryStorage::new().with_field(APP_PORT_KEY, json!(70000));
        assert!(matches!(app_port(&storage), Err(GatewayError::Config(_))));
    }

    #[test]
    fn endpoint_encodes_segments() {
        let base = base_url_for_port(5001).unwrap();
        let url = endpoint(&base, &["databases", "db1", "cli"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5001/databases/db1/cli");

        let url = endpoint(&base, &["databases", "a/b c"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5001/databases/a%2Fb%20c");
    }
}
