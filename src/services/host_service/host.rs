use crate::error::{GatewayError, Result};
use crate::models::DatabaseInstance;
use crate::services::gateway_service::BackendGateway;
use crate::utils::{UiStorage, CURRENT_DATABASE_KEY};
use log::{info, warn};
use serde_json::{json, Value};
use std::future::Future;
use tokio::process::Command;

/// Editor command that opens a CLI view for the selected database.
pub const ADD_CLI_COMMAND: &str = "RedisForVSCode.addCli";

/// Named commands executed by the host application.
pub trait HostCommands: Send + Sync {
    fn execute_command(
        &self,
        command: &str,
        payload: Value,
    ) -> impl Future<Output = Result<()>> + Send;
}

// Forwards host commands to an external program as
// `<program> <command> <payload-json>`, or only logs them when no program is set.
#[derive(Debug, Clone, Default)]
pub struct CommandHost {
    program: Option<String>,
}

impl CommandHost {
    pub fn new(program: Option<String>) -> Self {
        CommandHost { program }
    }

    pub fn logging() -> Self {
        CommandHost::default()
    }
}

impl HostCommands for CommandHost {
    async fn execute_command(&self, command: &str, payload: Value) -> Result<()> {
        let program = match &self.program {
            Some(program) => program,
            None => {
                info!("Host command {} requested with payload {}", command, payload);
                return Ok(());
            }
        };

        let output = Command::new(program)
            .arg(command)
            .arg(payload.to_string())
            .output()
            .await?;

        if !output.status.success() {
            return Err(GatewayError::HostCommand {
                command: command.to_string(),
                reason: format!(
                    "{} exited with {}: {}",
                    program,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }
        Ok(())
    }
}

/// Marks the database as the current selection and asks the host to open a
/// CLI view for it.
pub async fn open_cli<S, H>(
    gateway: &BackendGateway,
    storage: &S,
    host: &H,
    database_id: &str,
) -> Result<DatabaseInstance>
where
    S: UiStorage + ?Sized,
    H: HostCommands,
{
    let database = gateway.require_database(database_id).await?;
    let record = serde_json::to_value(&database)?;

    storage.set_field(CURRENT_DATABASE_KEY, record.clone())?;
    host.execute_command(ADD_CLI_COMMAND, json!({ "data": { "database": record } }))
        .await?;

    info!("Opened CLI for database '{}' ({})", database.name, database.id);
    Ok(database)
}

pub fn current_database<S: UiStorage + ?Sized>(storage: &S) -> Result<Option<DatabaseInstance>> {
    match storage.get_field(CURRENT_DATABASE_KEY)? {
        None | Some(Value::Null) => Ok(None),
        Some(record) => match serde_json::from_value(record) {
            Ok(database) => Ok(Some(database)),
            Err(e) => {
                warn!("Stored current database is unreadable: {}", e);
                Ok(None)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::MemoryStorage;

    #[test]
    fn current_database_roundtrip() {
        let storage = MemoryStorage::new();
        assert_eq!(current_database(&storage).unwrap(), None);

        let db = DatabaseInstance::new("db1", "127.0.0.1", 6379).with_modules(["search"]);
        storage
            .set_field(CURRENT_DATABASE_KEY, serde_json::to_value(&db).unwrap())
            .unwrap();
        assert_eq!(current_database(&storage).unwrap(), Some(db));

        storage.set_field(CURRENT_DATABASE_KEY, json!("garbage")).unwrap();
        assert_eq!(current_database(&storage).unwrap(), None);
    }

    #[tokio::test]
    async fn logging_host_accepts_every_command() {
        let host = CommandHost::logging();
        host.execute_command(ADD_CLI_COMMAND, json!({})).await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_program_is_reported() {
        let host = CommandHost::new(Some("false".to_string()));
        let err = host.execute_command(ADD_CLI_COMMAND, json!({})).await.unwrap_err();
        assert!(matches!(err, GatewayError::HostCommand { .. }));

        let host = CommandHost::new(Some("true".to_string()));
        host.execute_command(ADD_CLI_COMMAND, json!({})).await.unwrap();
    }
}
