use super::database::null_as_default;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Module names that indicate Redis Search support, compared case-insensitively.
pub const SEARCH_MODULE_NAMES: [&str; 4] = ["search", "searchlight", "ft", "ftl"];

// A module loaded into a database, as reported by the backend
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RedisModule {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_version: Option<String>,
}

impl RedisModule {
    pub fn new(name: impl Into<String>) -> Self {
        RedisModule {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn is_search(&self) -> bool {
        let name = self.name.to_lowercase();
        SEARCH_MODULE_NAMES.contains(&name.as_str())
    }

    pub fn known(&self) -> Option<KnownModule> {
        KnownModule::from_name(&self.name)
    }
}

// Default modules the GUI knows how to present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownModule {
    Ai,
    Graph,
    Gears,
    Bloom,
    ReJson,
    Search,
    SearchLight,
    TimeSeries,
    Ft,
    Ftl,
    RedisGears,
    RedisGears2,
}

impl KnownModule {
    pub fn from_name(name: &str) -> Option<Self> {
        let module = match name.to_lowercase().as_str() {
            "ai" => KnownModule::Ai,
            "graph" => KnownModule::Graph,
            "rg" => KnownModule::Gears,
            "bf" => KnownModule::Bloom,
            "rejson" => KnownModule::ReJson,
            "search" => KnownModule::Search,
            "searchlight" => KnownModule::SearchLight,
            "timeseries" => KnownModule::TimeSeries,
            "ft" => KnownModule::Ft,
            "ftl" => KnownModule::Ftl,
            "redisgears" => KnownModule::RedisGears,
            "redisgears_2" => KnownModule::RedisGears2,
            _ => return None,
        };
        Some(module)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KnownModule::Ai => "ai",
            KnownModule::Graph => "graph",
            KnownModule::Gears => "rg",
            KnownModule::Bloom => "bf",
            KnownModule::ReJson => "ReJSON",
            KnownModule::Search => "search",
            KnownModule::SearchLight => "searchlight",
            KnownModule::TimeSeries => "timeseries",
            KnownModule::Ft => "ft",
            KnownModule::Ftl => "ftl",
            KnownModule::RedisGears => "redisgears",
            KnownModule::RedisGears2 => "redisgears_2",
        }
    }

    pub fn is_search(&self) -> bool {
        matches!(
            self,
            KnownModule::Search | KnownModule::SearchLight | KnownModule::Ft | KnownModule::Ftl
        )
    }
}

impl fmt::Display for KnownModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
