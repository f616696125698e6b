//! Client for the local Redis GUI backend: database listing, one-shot CLI
//! sessions and Redis Search index introspection, plus a mock backend that
//! serves the same HTTP surface.

pub mod api;
pub mod error;
pub mod extension;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{GatewayError, Result};
pub use extension::ExtensionApi;
pub use models::{
    CliCommandResponse, CommandStatus, ConnectionType, DatabaseInstance, IndexDefinition,
    RedisModule,
};
pub use services::{BackendGateway, CommandHost, HostCommands};
pub use utils::{FileStorage, MemoryStorage, UiStorage};
