use crate::models::{ConnectionType, DatabaseInstance, RedisModule};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use std::collections::HashMap;

/// Canned data served by the mock backend.
#[derive(Debug, Clone, Default)]
pub struct Fixtures {
    pub databases: Vec<DatabaseInstance>,
    pub indexes: HashMap<String, Vec<String>>,
    pub index_definitions: HashMap<String, Value>,
    // Matched by case-insensitive prefix, in insertion order, before any FT.* handling.
    pub command_responses: Vec<(String, Value)>,
}

impl Fixtures {
    pub fn with_database(mut self, database: DatabaseInstance) -> Self {
        self.databases.push(database);
        self
    }

    pub fn with_indexes<I, S>(mut self, database_id: &str, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.indexes
            .insert(database_id.to_string(), names.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_index_definition(mut self, index_name: &str, definition: Value) -> Self {
        self.index_definitions.insert(index_name.to_string(), definition);
        self
    }

    pub fn with_command_response(mut self, command: &str, reply: Value) -> Self {
        self.command_responses.push((command.to_string(), reply));
        self
    }

    pub fn database(&self, database_id: &str) -> Option<&DatabaseInstance> {
        self.databases.iter().find(|db| db.id == database_id)
    }

    /// Reply the mock backend gives to `command` on `database_id`.
    pub fn reply_to(&self, database_id: &str, command: &str) -> Value {
        let upper = command.trim().to_uppercase();

        if let Some((_, reply)) = self
            .command_responses
            .iter()
            .find(|(known, _)| upper.starts_with(&known.to_uppercase()))
        {
            return reply.clone();
        }

        if upper.starts_with("FT._LIST") {
            let names = self.indexes.get(database_id).cloned().unwrap_or_default();
            return json!(names);
        }

        if upper.starts_with("FT.INFO") {
            let definition = command
                .split_whitespace()
                .nth(1)
                .and_then(|name| self.index_definitions.get(name));
            return match definition {
                Some(Value::Object(fields)) => Value::Array(
                    fields
                        .iter()
                        .flat_map(|(key, value)| [Value::String(key.clone()), value.clone()])
                        .collect(),
                ),
                Some(other) => other.clone(),
                None => json!("ERR no such index"),
            };
        }

        if upper.starts_with("FT.SEARCH") {
            return json!([
                "2",
                "user:1",
                ["name", "John Doe", "email", "john@example.com", "age", "30"],
                "user:2",
                ["name", "Jane Smith", "email", "jane@example.com", "age", "25"]
            ]);
        }

        json!(format!("Mock response for: {}", command))
    }

    /// Three local Redis Stack databases with a handful of JSON and HASH indexes.
    pub fn demo() -> Self {
        let stack_modules = |search_version: u64, search_semver: &str| {
            vec![
                module("timeseries", Some(11205), Some("1.12.5")),
                module("redisgears_2", Some(20020), None),
                module("search", Some(search_version), Some(search_semver)),
                module("ReJSON", Some(20808), Some("2.8.8")),
                module("bf", Some(20805), Some("2.8.5")),
            ]
        };

        let first = demo_database(
            "d061eff6-58e4-486e-8cb5-ac6e250a7e39",
            6379,
            "REDIS_COMMUNITY_EDITION",
            "7.4.4",
            "2025-07-18T14:09:43.605Z",
            "2025-03-10T12:35:42.000Z",
            stack_modules(21015, "2.10.15"),
        );
        let second = demo_database(
            "19a7bb8e-75e4-4249-8092-137451a50eae",
            6380,
            "REDIS_STACK",
            "7.4.2",
            "2025-07-17T20:16:45.773Z",
            "2025-04-03T12:10:42.000Z",
            stack_modules(21010, "2.10.10"),
        );
        let third = demo_database(
            "1b1f8c08-f7d5-47a4-b225-eddb93b71c34",
            6381,
            "REDIS_STACK",
            "7.4.2",
            "2025-07-17T19:43:29.168Z",
            "2025-05-07T08:08:15.000Z",
            stack_modules(21010, "2.10.10"),
        );

        Fixtures::default()
            .with_indexes(
                &first.id,
                ["idx:smpl_bicycle", "idx:user_prefs", "idx:smpl_restaurant"],
            )
            .with_indexes(
                &second.id,
                [
                    "idx:bikes_vss",
                    "idx:smpl_bicycle",
                    "idx:user_prefs",
                    "idx:bicycle",
                    "idx:smpl_restaurant",
                ],
            )
            .with_indexes(&third.id, ["idx:smpl_bicycle", "idx:smpl_restaurant"])
            .with_database(first)
            .with_database(second)
            .with_database(third)
            .with_index_definition("idx:bikes_vss", bikes_vss())
            .with_index_definition("idx:smpl_bicycle", smpl_bicycle())
            .with_index_definition("idx:user_prefs", user_prefs())
            .with_index_definition("idx:bicycle", bicycle())
            .with_index_definition("idx:smpl_restaurant", smpl_restaurant())
            .with_command_response("INFO server", info_server())
            .with_command_response("PING", json!("PONG"))
            .with_command_response("SET test_key test_value", json!("OK"))
            .with_command_response("GET test_key", json!("test_value"))
            .with_command_response(
                "KEYS *",
                json!(["user:1", "user:2", "product:1", "product:2", "order:1"]),
            )
            .with_command_response("DBSIZE", json!("1234"))
    }
}

fn module(name: &str, version: Option<u64>, semantic_version: Option<&str>) -> RedisModule {
    RedisModule {
        name: name.to_string(),
        version,
        semantic_version: semantic_version.map(str::to_string),
    }
}

fn demo_database(
    id: &str,
    port: u16,
    provider: &str,
    version: &str,
    last_connection: &str,
    created_at: &str,
    modules: Vec<RedisModule>,
) -> DatabaseInstance {
    let mut database = DatabaseInstance::new(id, "127.0.0.1", port);
    database.db = Some(0);
    database.connection_type = Some(ConnectionType::Standalone);
    database.provider = Some(provider.to_string());
    database.version = Some(version.to_string());
    database.last_connection = last_connection.parse::<DateTime<Utc>>().ok();
    database.created_at = created_at.parse::<DateTime<Utc>>().ok();
    database.modules = modules;
    database
}

fn text_field(identifier: &str, attribute: &str) -> Value {
    json!({"identifier": identifier, "attribute": attribute, "type": "TEXT", "WEIGHT": "1"})
}

fn tag_field(identifier: &str, attribute: &str, separator: &str) -> Value {
    json!({"identifier": identifier, "attribute": attribute, "type": "TAG", "SEPARATOR": separator})
}

fn numeric_field(identifier: &str, attribute: &str) -> Value {
    json!({"identifier": identifier, "attribute": attribute, "type": "NUMERIC"})
}

fn bikes_vss() -> Value {
    json!({
        "index_name": "idx:bikes_vss",
        "attributes": [
            {
                "identifier": "model",
                "attribute": "model",
                "type": "TEXT",
                "WEIGHT": "1",
                "SORTABLE": true,
                "NOSTEM": true
            },
            {
                "identifier": "brand",
                "attribute": "brand",
                "type": "TEXT",
                "WEIGHT": "1",
                "SORTABLE": true,
                "NOSTEM": true
            },
            {
                "identifier": "price",
                "attribute": "price",
                "type": "NUMERIC",
                "SORTABLE": true,
                "UNF": true
            },
            tag_field("type", "type", ","),
            tag_field("material", "material", ","),
            {
                "identifier": "weight",
                "attribute": "weight",
                "type": "NUMERIC",
                "SORTABLE": true,
                "UNF": true
            },
            {
                "identifier": "description_embeddings",
                "attribute": "description_embeddings",
                "type": "VECTOR",
                "algorithm": "FLAT",
                "data_type": "FLOAT32",
                "dim": 768,
                "distance_metric": "L2"
            }
        ],
        "documents_type": "HASH"
    })
}

fn smpl_bicycle() -> Value {
    json!({
        "index_name": "idx:smpl_bicycle",
        "attributes": [
            text_field("$.brand", "brand"),
            text_field("$.model", "model"),
            text_field("$.description", "description"),
            numeric_field("$.price", "price"),
            tag_field("$.condition", "condition", ","),
            tag_field("$.type", "type", ""),
            tag_field("$.helmet_included", "helmet_included", ""),
            tag_field("$.specs.material", "material", ""),
            numeric_field("$.specs.weight", "weight")
        ],
        "documents_type": "JSON"
    })
}

fn user_prefs() -> Value {
    json!({
        "index_name": "idx:user_prefs",
        "attributes": [
            text_field("$.descr", "$.descr"),
            tag_field("$.labels", "$.labels", ","),
            {
                "identifier": "$.vector_embedding",
                "attribute": "vector",
                "type": "VECTOR",
                "algorithm": "HNSW",
                "data_type": "FLOAT32",
                "dim": 3,
                "distance_metric": "COSINE",
                "M": 16,
                "ef_construction": 200
            }
        ],
        "documents_type": "JSON"
    })
}

fn bicycle() -> Value {
    json!({
        "index_name": "idx:bicycle",
        "attributes": [
            text_field("$.brand", "brand"),
            text_field("$.model", "model"),
            text_field("$.description", "description"),
            numeric_field("$.price", "price"),
            {
                "identifier": "$.condition",
                "attribute": "condition",
                "type": "TAG",
                "SEPARATOR": ",",
                "INDEXEMPTY": "INDEXMISSING"
            }
        ],
        "documents_type": "JSON"
    })
}

fn smpl_restaurant() -> Value {
    json!({
        "index_name": "idx:smpl_restaurant",
        "attributes": [
            tag_field("$.cuisine", "cuisine", ""),
            text_field("$.name", "restaunt_name"),
            {"identifier": "$.location", "attribute": "location", "type": "GEO"}
        ],
        "documents_type": "JSON"
    })
}

fn info_server() -> Value {
    json!({
        "redis_version": "7.4.4",
        "redis_mode": "standalone",
        "os": "Linux 5.4.0-74-generic x86_64",
        "arch_bits": "64",
        "multiplexing_api": "epoll",
        "gcc_version": "9.4.0",
        "process_id": "1234",
        "run_id": "abcdef1234567890abcdef1234567890abcdef12",
        "tcp_port": "6379",
        "uptime_in_seconds": "123456",
        "uptime_in_days": "1",
        "hz": "10",
        "executable": "/usr/local/bin/redis-server",
        "config_file": "/etc/redis/redis.conf"
    })
}
