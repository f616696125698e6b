// src/services/host_service/mod.rs

pub mod host;

pub use host::{current_database, open_cli, CommandHost, HostCommands, ADD_CLI_COMMAND};
