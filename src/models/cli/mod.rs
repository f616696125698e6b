// src/models/cli/mod.rs

pub mod cli;

pub use cli::{
    CliCommandResponse, CommandStatus, CreateCliResponse, OutputFormat, SendCommandRequest,
};
