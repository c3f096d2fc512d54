//! Configuration loading and CLI definitions.

mod cli;
mod defaults;
mod loader;
mod types;
mod validate;

pub use cli::{CliOverrides, apply_overrides};
pub use loader::{ConfigError, load_config};
pub use types::{
    Config, LoggingConfig, MetricsConfig, QuotaConfig, ServerConfig, StoreBackend, StoreConfig,
};
pub use validate::validate_config;
