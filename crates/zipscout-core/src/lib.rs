mod app_config;
mod config;
mod row;

pub use app_config::{AppConfig, DEFAULT_API_BASE_URL, DEFAULT_OUTPUT_PATH};
pub use config::{load_app_config, load_app_config_from_env};
pub use row::{ResultRow, CSV_HEADER, MISSING_FIELD};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
