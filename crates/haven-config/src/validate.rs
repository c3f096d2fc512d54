//! Configuration validation.

use std::net::SocketAddr;

use crate::loader::ConfigError;
use crate::types::{Config, StoreBackend};

pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.listen.parse::<SocketAddr>().is_err() {
        return Err(ConfigError::Validation(format!(
            "server.listen is not a socket address: {}",
            config.server.listen
        )));
    }
    if config.store.backend == StoreBackend::Redis && config.store.redis_url.trim().is_empty() {
        return Err(ConfigError::Validation(
            "store.redis_url is required for the redis backend".into(),
        ));
    }
    if config.quota.free_daily_messages == 0 {
        return Err(ConfigError::Validation(
            "quota.free_daily_messages must be > 0".into(),
        ));
    }
    if let Some(listen) = &config.metrics.listen
        && listen.parse::<SocketAddr>().is_err()
    {
        return Err(ConfigError::Validation(format!(
            "metrics.listen is not a socket address: {listen}"
        )));
    }
    if let Some(level) = &config.logging.level {
        let valid = ["trace", "debug", "info", "warn", "error"];
        if !valid.contains(&level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "logging.level must be one of: {valid:?}"
            )));
        }
    }
    if let Some(format) = &config.logging.format {
        let valid = ["pretty", "compact", "json"];
        if !valid.contains(&format.as_str()) {
            return Err(ConfigError::Validation(format!(
                "logging.format must be one of: {valid:?}"
            )));
        }
    }
    Ok(())
}
