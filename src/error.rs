use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("database with ID '{0}' not found")]
    DatabaseNotFound(String),

    #[error("invalid backend url: {0}")]
    InvalidUrl(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("host command '{command}' failed: {reason}")]
    HostCommand { command: String, reason: String },
}

pub type Result<T> = std::result::Result<T, GatewayError>;
