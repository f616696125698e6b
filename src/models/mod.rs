// src/models/mod.rs

pub mod cli;
pub mod database;
pub mod search;

pub use cli::{CliCommandResponse, CommandStatus, OutputFormat, SendCommandRequest};
pub use database::{ConnectionType, DatabaseInstance, KnownModule, RedisModule};
pub use search::IndexDefinition;
