use crate::error::{GatewayError, Result};
use dotenv::dotenv;
use log::LevelFilter;
use std::path::PathBuf;
use std::time::Duration;

pub const STORAGE_ENV: &str = "REDIS_GATEWAY_STORAGE";
pub const LOG_LEVEL_ENV: &str = "REDIS_GATEWAY_LOG_LEVEL";
pub const LOG_FILE_ENV: &str = "REDIS_GATEWAY_LOG_FILE";
pub const HOST_PROGRAM_ENV: &str = "REDIS_GATEWAY_HOST_PROGRAM";
pub const TIMEOUT_ENV: &str = "REDIS_GATEWAY_TIMEOUT_MS";

pub const DEFAULT_STORAGE_PATH: &str = ".redis-gateway/storage.json";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub storage_path: PathBuf,
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,
    pub host_program: Option<String>,
    pub request_timeout: Option<Duration>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            log_level: LevelFilter::Info,
            log_file: None,
            host_program: None,
            request_timeout: None,
        }
    }
}

impl Settings {
    /// Loads `.env` (if any) and reads the settings from the environment.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut settings = Settings::default();

        if let Some(path) = get(STORAGE_ENV) {
            settings.storage_path = PathBuf::from(path);
        }
        if let Some(level) = get(LOG_LEVEL_ENV) {
            settings.log_level = level.trim().parse::<LevelFilter>().map_err(|_| {
                GatewayError::Config(format!("{} has invalid value {:?}", LOG_LEVEL_ENV, level))
            })?;
        }
        settings.log_file = get(LOG_FILE_ENV).map(PathBuf::from);
        settings.host_program = get(HOST_PROGRAM_ENV);
        if let Some(millis) = get(TIMEOUT_ENV) {
            let millis = millis.trim().parse::<u64>().map_err(|_| {
                GatewayError::Config(format!("{} has invalid value {:?}", TIMEOUT_ENV, millis))
            })?;
            settings.request_timeout = Some(Duration::from_millis(millis));
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(pairs: &[(&str, &str)]) -> Result<Settings> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        assert_eq!(settings_from(&[]).unwrap(), Settings::default());
    }

    #[test]
    fn reads_every_variable() {
        let settings = settings_from(&[
            (STORAGE_ENV, "/tmp/ui.json"),
            (LOG_LEVEL_ENV, "debug"),
            (LOG_FILE_ENV, "/tmp/gateway.log"),
            (HOST_PROGRAM_ENV, "code-bridge"),
            (TIMEOUT_ENV, "2500"),
        ])
        .unwrap();

        assert_eq!(settings.storage_path, PathBuf::from("/tmp/ui.json"));
        assert_eq!(settings.log_level, LevelFilter::Debug);
        assert_eq!(settings.log_file, Some(PathBuf::from("/tmp/gateway.log")));
        assert_eq!(settings.host_program.as_deref(), Some("code-bridge"));
        assert_eq!(settings.request_timeout, Some(Duration::from_millis(2500)));
    }

    #[test]
    fn blank_values_are_ignored() {
        let settings = settings_from(&[(LOG_FILE_ENV, "  "), (TIMEOUT_ENV, "")]).unwrap();
        assert_eq!(settings.log_file, None);
        assert_eq!(settings.request_timeout, None);
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(matches!(
            settings_from(&[(TIMEOUT_ENV, "soon")]),
            Err(GatewayError::Config(_))
        ));
        assert!(matches!(
            settings_from(&[(LOG_LEVEL_ENV, "loud")]),
            Err(GatewayError::Config(_))
        ));
    }
}
