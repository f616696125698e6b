// src/models/database/mod.rs

pub mod database;
pub mod module;

pub use database::{ConnectionType, DatabaseInstance, RawDatabase};
pub use module::{KnownModule, RedisModule, SEARCH_MODULE_NAMES};
