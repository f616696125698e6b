use crate::error::{GatewayError, Result};
use crate::models::cli::{CliCommandResponse, CreateCliResponse, SendCommandRequest};
use crate::models::database::{DatabaseInstance, RawDatabase};
use crate::services::gateway_service::http;
use crate::utils::{endpoint, resolve_base_url, UiStorage};
use log::{debug, error, warn};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde_json::Value;
use std::time::Duration;

/// HTTP client for the local backend that owns the Redis connections.
///
/// Every call goes to the network; nothing is cached and nothing is retried.
#[derive(Debug, Clone)]
pub struct BackendGateway {
    http: Client,
    base_url: Url,
}

impl BackendGateway {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: Url) -> Self {
        BackendGateway { http, base_url }
    }

    /// Gateway pointed at the port currently persisted in UI storage.
    pub fn from_storage<S: UiStorage + ?Sized>(http: Client, storage: &S) -> Result<Self> {
        Ok(Self::with_client(http, resolve_base_url(storage)?))
    }

    pub fn build_client(timeout: Option<Duration>) -> Result<Client> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn request(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header(CONTENT_TYPE, "application/json")
    }

    /// `GET /databases`. An unexpected status or a body that is not an array
    /// yields an empty list; only transport failures are errors.
    pub async fn list_databases(&self) -> Result<Vec<DatabaseInstance>> {
        let url = endpoint(&self.base_url, &["databases"])?;
        let reply = http::send(self.request(self.http.get(url))).await?;

        if reply.status != StatusCode::OK {
            warn!("Listing databases failed with status {}", reply.status);
            return Ok(Vec::new());
        }

        let records = match reply.data {
            Value::Array(records) => records,
            _ => {
                warn!("Listing databases returned a non-array body");
                return Ok(Vec::new());
            }
        };

        let databases = records
            .into_iter()
            .filter_map(|record| match serde_json::from_value::<RawDatabase>(record) {
                Ok(raw) => Some(DatabaseInstance::from(raw)),
                Err(e) => {
                    warn!("Skipping unreadable database record: {}", e);
                    None
                }
            })
            .collect();
        Ok(databases)
    }

    pub async fn get_database_by_id(&self, database_id: &str) -> Result<Option<DatabaseInstance>> {
        let databases = self.list_databases().await?;
        Ok(databases.into_iter().find(|db| db.id == database_id))
    }

    pub async fn require_database(&self, database_id: &str) -> Result<DatabaseInstance> {
        self.get_database_by_id(database_id)
            .await?
            .ok_or_else(|| GatewayError::DatabaseNotFound(database_id.to_string()))
    }

    /// False for unknown databases as well as databases without Search.
    pub async fn has_search_module(&self, database_id: &str) -> Result<bool> {
        let database = self.get_database_by_id(database_id).await?;
        Ok(database.is_some_and(|db| db.has_search_module()))
    }

    /// Runs one command through a fresh CLI session.
    ///
    /// The session is deleted exactly once after the command, whatever the
    /// command did. Returns `None` when the session could not be created or
    /// the backend did not answer the command with 200.
    pub async fn run_command(
        &self,
        database_id: &str,
        command: &str,
    ) -> Result<Option<CliCommandResponse>> {
        let session = match self.open_session(database_id).await? {
            Some(session) => session,
            None => return Ok(None),
        };
        debug!("Opened CLI session {} on database '{}'", session, database_id);

        let outcome = self.send_command(database_id, &session, command).await;
        let cleanup = self.close_session(database_id, &session).await;

        match (outcome, cleanup) {
            (Ok(reply), Ok(())) => Ok(reply),
            (Ok(_), Err(cleanup_error)) => {
                error!("Failed to cleanup CLI client {}: {}", session, cleanup_error);
                Err(cleanup_error)
            }
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(cleanup_error)) => {
                error!("Failed to cleanup CLI client {}: {}", session, cleanup_error);
                Err(e)
            }
        }
    }

    async fn open_session(&self, database_id: &str) -> Result<Option<String>> {
        let url = endpoint(&self.base_url, &["databases", database_id, "cli"])?;
        let reply = http::send(self.request(self.http.post(url))).await?;

        if reply.status != StatusCode::CREATED {
            warn!(
                "Failed to create CLI client for database '{}': status {}",
                database_id, reply.status
            );
            return Ok(None);
        }

        let created: CreateCliResponse = serde_json::from_value(reply.data).unwrap_or_default();
        match created.uuid.filter(|uuid| !uuid.is_empty()) {
            Some(uuid) => Ok(Some(uuid)),
            None => {
                warn!("No CLI client UUID received for database '{}'", database_id);
                Ok(None)
            }
        }
    }

    async fn send_command(
        &self,
        database_id: &str,
        session: &str,
        command: &str,
    ) -> Result<Option<CliCommandResponse>> {
        let url = endpoint(
            &self.base_url,
            &["databases", database_id, "cli", session, "send-command"],
        )?;
        let body = SendCommandRequest::raw(command);
        let reply = http::send(self.request(self.http.post(url)).json(&body)).await?;

        if reply.status != StatusCode::OK {
            warn!(
                "Command '{}' on database '{}' failed with status {}",
                command, database_id, reply.status
            );
            return Ok(None);
        }

        match serde_json::from_value::<CliCommandResponse>(reply.data) {
            Ok(response) => Ok(Some(response)),
            Err(e) => {
                warn!("Unreadable reply to command '{}': {}", command, e);
                Ok(None)
            }
        }
    }

    // The backend's answer to the delete is not inspected.
    async fn close_session(&self, database_id: &str, session: &str) -> Result<()> {
        let url = endpoint(&self.base_url, &["databases", database_id, "cli", session])?;
        let reply = http::send(self.request(self.http.delete(url))).await?;
        debug!("Closed CLI session {} (status {})", session, reply.status);
        Ok(())
    }
}
