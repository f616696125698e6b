use super::module::RedisModule;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// Reads an explicit `null` the same way as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectionType {
    Standalone,
    Cluster,
    Sentinel,
    #[serde(other)]
    Unknown,
}

impl ConnectionType {
    pub fn display_name(&self) -> &'static str {
        match self {
            ConnectionType::Standalone => "Standalone",
            ConnectionType::Cluster => "OSS Cluster",
            ConnectionType::Sentinel => "Sentinel",
            ConnectionType::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let type_str = match self {
            ConnectionType::Standalone => "STANDALONE",
            ConnectionType::Cluster => "CLUSTER",
            ConnectionType::Sentinel => "SENTINEL",
            ConnectionType::Unknown => "UNKNOWN",
        };
        write!(f, "{}", type_str)
    }
}

/// Read-only snapshot of a database registered in the backend.
///
/// Nothing is cached between fetches, so two snapshots of the same id may
/// disagree.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseInstance {
    pub id: String,
    pub name: String,
    pub host: String,
    pub port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_type: Option<ConnectionType>,
    #[serde(default)]
    pub modules: Vec<RedisModule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_connection: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl DatabaseInstance {
    pub fn new(id: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        let host = host.into();
        DatabaseInstance {
            id: id.into(),
            name: format!("{}:{}", host, port),
            host,
            port,
            connection_type: None,
            modules: Vec::new(),
            db: None,
            provider: None,
            version: None,
            last_connection: None,
            created_at: None,
        }
    }

    pub fn with_modules<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modules = names.into_iter().map(RedisModule::new).collect();
        self
    }

    pub fn has_search_module(&self) -> bool {
        self.modules.iter().any(RedisModule::is_search)
    }

    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// Database record exactly as the backend returns it; every field but the id
// is optional.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawDatabase {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub host: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub port: u16,
    #[serde(default)]
    pub connection_type: Option<ConnectionType>,
    #[serde(default)]
    pub modules: Option<Vec<RedisModule>>,
    #[serde(default)]
    pub db: Option<u32>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub last_connection: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn parse_timestamp(value: Option<String>) -> Option<DateTime<Utc>> {
    value
        .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
        .map(|date| date.with_timezone(&Utc))
}

impl From<RawDatabase> for DatabaseInstance {
    fn from(raw: RawDatabase) -> Self {
        let name = match raw.name {
            Some(name) if !name.is_empty() => name,
            _ => format!("{}:{}", raw.host, raw.port),
        };

        DatabaseInstance {
            id: raw.id,
            name,
            host: raw.host,
            port: raw.port,
            connection_type: raw.connection_type,
            modules: raw.modules.unwrap_or_default(),
            db: raw.db,
            provider: raw.provider,
            version: raw.version,
            last_connection: parse_timestamp(raw.last_connection),
            created_at: parse_timestamp(raw.created_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn from_json(value: serde_json::Value) -> DatabaseInstance {
        serde_json::from_value::<RawDatabase>(value).unwrap().into()
    }

    #[test]
    fn name_falls_back_to_endpoint() {
        let db = from_json(json!({"id": "a", "host": "127.0.0.1", "port": 6379}));
        assert_eq!(db.name, "127.0.0.1:6379");
        assert!(db.modules.is_empty());

        let empty_name = from_json(json!({"id": "a", "name": "", "host": "h", "port": 1}));
        assert_eq!(empty_name.name, "h:1");
    }

    #[test]
    fn null_modules_become_empty() {
        let db = from_json(json!({"id": "a", "host": "h", "port": 1, "modules": null}));
        assert!(db.modules.is_empty());
        assert!(!db.has_search_module());
    }

    #[test]
    fn null_fields_keep_the_record() {
        let db = from_json(json!({
            "id": "db1",
            "host": null,
            "port": null,
            "modules": [{"name": "search"}, {"name": null, "version": 1}]
        }));
        assert_eq!(db.host, "");
        assert_eq!(db.port, 0);
        assert_eq!(db.modules.len(), 2);
        assert_eq!(db.modules[1].name, "");
        assert!(db.has_search_module());

        assert!(serde_json::from_value::<RawDatabase>(json!({"id": null, "host": "h"})).is_err());
    }

    #[test]
    fn full_record_is_mapped() {
        let db = from_json(json!({
            "id": "d061eff6",
            "name": "local",
            "host": "127.0.0.1",
            "port": 6380,
            "db": 0,
            "connectionType": "STANDALONE",
            "provider": "REDIS_STACK",
            "lastConnection": "2025-07-17T20:16:45.773Z",
            "createdAt": "not a date",
            "modules": [{"name": "ReJSON"}, {"name": "Search", "version": 21010}],
            "tags": []
        }));
        assert_eq!(db.name, "local");
        assert_eq!(db.connection_type, Some(ConnectionType::Standalone));
        assert!(db.last_connection.is_some());
        assert!(db.created_at.is_none());
        assert!(db.has_search_module());
    }

    #[test]
    fn unknown_connection_type_is_tolerated() {
        let db = from_json(json!({
            "id": "a",
            "host": "h",
            "port": 1,
            "connectionType": "ENTERPRISE"
        }));
        assert_eq!(db.connection_type, Some(ConnectionType::Unknown));
        assert_eq!(ConnectionType::Cluster.display_name(), "OSS Cluster");
        assert_eq!(ConnectionType::Sentinel.to_string(), "SENTINEL");
    }

    #[test]
    fn serialized_snapshot_reads_back_as_raw_record() {
        let db = DatabaseInstance::new("x", "10.0.0.1", 7000).with_modules(["bf"]);
        let encoded = serde_json::to_value(&db).unwrap();
        assert_eq!(encoded["name"], "10.0.0.1:7000");
        assert!(encoded.get("connectionType").is_none());
        assert_eq!(from_json(encoded), db);
    }
}
