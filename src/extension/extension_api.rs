use crate::error::Result;
use crate::models::{CliCommandResponse, DatabaseInstance, IndexDefinition};
use crate::services::{get_index_definition, list_indexes, open_cli, BackendGateway, HostCommands};
use crate::utils::UiStorage;
use log::error;
use reqwest::Client;
use serde_json::Value;

/// API handed to other extensions.
///
/// Every operation swallows its failures into an empty or absent result, so
/// "nothing found" and "request failed" look the same here. Use
/// [`BackendGateway`] and the search/host services directly to tell them apart.
pub struct ExtensionApi<S, H> {
    http: Client,
    storage: S,
    host: H,
}

impl<S: UiStorage, H: HostCommands> ExtensionApi<S, H> {
    pub fn new(storage: S, host: H) -> Self {
        Self::with_client(Client::new(), storage, host)
    }

    pub fn with_client(http: Client, storage: S, host: H) -> Self {
        ExtensionApi { http, storage, host }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    // The port is looked up again on every call.
    fn gateway(&self) -> Result<BackendGateway> {
        BackendGateway::from_storage(self.http.clone(), &self.storage)
    }

    pub async fn get_all_databases(&self) -> Vec<DatabaseInstance> {
        let result: Result<Vec<DatabaseInstance>> =
            async { self.gateway()?.list_databases().await }.await;
        result.unwrap_or_else(|e| {
            error!("Error getting all databases: {}", e);
            Vec::new()
        })
    }

    pub async fn get_database_by_id(&self, database_id: &str) -> Option<DatabaseInstance> {
        let result: Result<Option<DatabaseInstance>> =
            async { self.gateway()?.get_database_by_id(database_id).await }.await;
        result.unwrap_or_else(|e| {
            error!("Error getting database by ID '{}': {}", database_id, e);
            None
        })
    }

    pub async fn has_redis_search_module(&self, database_id: &str) -> bool {
        let result: Result<bool> =
            async { self.gateway()?.has_search_module(database_id).await }.await;
        result.unwrap_or_else(|e| {
            error!("Error checking Redis Search module for database '{}': {}", database_id, e);
            false
        })
    }

    pub async fn get_all_indexes(&self, database_id: &str) -> Vec<String> {
        let result: Result<Vec<String>> =
            async { list_indexes(&self.gateway()?, database_id).await }.await;
        result.unwrap_or_else(|e| {
            error!("Error getting indexes for database '{}': {}", database_id, e);
            Vec::new()
        })
    }

    pub async fn get_index_definition(
        &self,
        database_id: &str,
        index_name: &str,
    ) -> Option<IndexDefinition> {
        let result: Result<Option<IndexDefinition>> =
            async { get_index_definition(&self.gateway()?, database_id, index_name).await }.await;
        result.unwrap_or_else(|e| {
            error!(
                "Error getting index definition for '{}' in database '{}': {}",
                index_name, database_id, e
            );
            None
        })
    }

    pub async fn open_cli_for_database(&self, database_id: &str) -> bool {
        let result: Result<DatabaseInstance> = async {
            open_cli(&self.gateway()?, &self.storage, &self.host, database_id).await
        }
        .await;
        match result {
            Ok(_) => true,
            Err(e) => {
                error!("Error opening CLI for database '{}': {}", database_id, e);
                false
            }
        }
    }

    /// Raw reply of an arbitrary command; `None` when it could not be run or
    /// the reply was null.
    pub async fn execute_redis_command(&self, database_id: &str, command: &str) -> Option<Value> {
        let result: Result<Option<CliCommandResponse>> =
            async { self.gateway()?.run_command(database_id, command).await }.await;
        match result {
            Ok(reply) => reply
                .map(|reply| reply.response)
                .filter(|response| !response.is_null()),
            Err(e) => {
                error!(
                    "Error executing command '{}' on database '{}': {}",
                    command, database_id, e
                );
                None
            }
        }
    }
}
