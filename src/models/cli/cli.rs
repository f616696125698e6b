use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum OutputFormat {
    #[default]
    Raw,
    Text,
}

// Body of POST /databases/{id}/cli/{uuid}/send-command
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SendCommandRequest {
    pub command: String,
    pub output_format: OutputFormat,
}

impl SendCommandRequest {
    pub fn raw(command: impl Into<String>) -> Self {
        SendCommandRequest {
            command: command.into(),
            output_format: OutputFormat::Raw,
        }
    }
}

// Reply of POST /databases/{id}/cli
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CreateCliResponse {
    #[serde(default)]
    pub uuid: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CommandStatus {
    Success,
    Fail,
    #[default]
    #[serde(other)]
    Unknown,
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status_str = match self {
            CommandStatus::Success => "success",
            CommandStatus::Fail => "fail",
            CommandStatus::Unknown => "unknown",
        };
        write!(f, "{}", status_str)
    }
}

/// Decoded reply of a single command sent through a CLI session.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CliCommandResponse {
    #[serde(default)]
    pub response: Value,
    #[serde(default)]
    pub status: CommandStatus,
}

impl CliCommandResponse {
    pub fn success(response: Value) -> Self {
        CliCommandResponse {
            response,
            status: CommandStatus::Success,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == CommandStatus::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn send_command_body_uses_raw_output() {
        let body = serde_json::to_value(SendCommandRequest::raw("FT._LIST")).unwrap();
        assert_eq!(body, json!({"command": "FT._LIST", "outputFormat": "RAW"}));
    }

    #[test]
    fn command_response_tolerates_missing_fields() {
        let reply: CliCommandResponse = serde_json::from_value(json!({"response": "OK"})).unwrap();
        assert_eq!(reply.status, CommandStatus::Unknown);
        assert!(!reply.is_success());

        let reply: CliCommandResponse =
            serde_json::from_value(json!({"response": ["a"], "status": "success"})).unwrap();
        assert!(reply.is_success());

        let reply: CliCommandResponse =
            serde_json::from_value(json!({"status": "queued"})).unwrap();
        assert_eq!(reply.status, CommandStatus::Unknown);
        assert_eq!(reply.response, Value::Null);
    }

    #[test]
    fn create_reply_without_uuid() {
        let reply: CreateCliResponse = serde_json::from_value(json!({})).unwrap();
        assert!(reply.uuid.is_none());
    }
}
