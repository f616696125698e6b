pub mod config;
pub mod log_utils;
pub mod storage;
pub mod url_utils;

pub use config::Settings;
pub use log_utils::init_logging;
pub use storage::{FileStorage, MemoryStorage, UiStorage, APP_PORT_KEY, CURRENT_DATABASE_KEY};
pub use url_utils::{app_port, base_url_for_port, endpoint, resolve_base_url, DEFAULT_APP_PORT};
