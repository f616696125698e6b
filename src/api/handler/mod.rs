// src/api/handler/mod.rs

pub mod handler;

pub use handler::{
    create_cli_handler, delete_cli_handler, list_databases_handler, send_command_handler,
};
