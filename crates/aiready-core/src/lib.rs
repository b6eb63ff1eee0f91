use thiserror::Error;

mod app_config;
mod config;
mod report;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use report::{
    AggregateDelta, Comparison, Dimension, DimensionDelta, Leader, Report, ScoreSet, Signal,
    SignalKey, SignalSet, SCHEMA_VERSION,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
