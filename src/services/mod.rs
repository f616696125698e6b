pub mod gateway_service;
pub mod host_service;
pub mod search_service;

pub use gateway_service::BackendGateway;
pub use host_service::{current_database, open_cli, CommandHost, HostCommands, ADD_CLI_COMMAND};
pub use search_service::{get_index_definition, list_indexes};
