use crate::error::Result;
use crate::models::IndexDefinition;
use crate::services::gateway_service::BackendGateway;
use crate::services::search_service::decode::{decode_index_definition, decode_index_list};
use log::warn;

pub const LIST_INDEXES_COMMAND: &str = "FT._LIST";
pub const INDEX_INFO_COMMAND: &str = "FT.INFO";

// The capability check always runs first so databases without Search never
// see an FT.* command.

/// Names of the Search indexes of a database; empty without a Search module.
/// Fails with `DatabaseNotFound` for an unknown id.
pub async fn list_indexes(gateway: &BackendGateway, database_id: &str) -> Result<Vec<String>> {
    let database = gateway.require_database(database_id).await?;
    if !database.has_search_module() {
        warn!("Database '{}' does not have Redis Search module loaded", database_id);
        return Ok(Vec::new());
    }

    match gateway.run_command(database_id, LIST_INDEXES_COMMAND).await? {
        Some(reply) if reply.is_success() => Ok(decode_index_list(&reply.response)),
        _ => Ok(Vec::new()),
    }
}

pub async fn get_index_definition(
    gateway: &BackendGateway,
    database_id: &str,
    index_name: &str,
) -> Result<Option<IndexDefinition>> {
    let database = gateway.require_database(database_id).await?;
    if !database.has_search_module() {
        warn!("Database '{}' does not have Redis Search module loaded", database_id);
        return Ok(None);
    }

    let command = format!("{} {}", INDEX_INFO_COMMAND, index_name);
    match gateway.run_command(database_id, &command).await? {
        Some(reply) if reply.is_success() => Ok(decode_index_definition(&reply.response)),
        _ => Ok(None),
    }
}
