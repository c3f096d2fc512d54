//! CLI override definitions and application logic.

use clap::Parser;

use crate::Config;
use crate::types::StoreBackend;

#[derive(Debug, Clone, Parser, Default)]
pub struct CliOverrides {
    /// Override HTTP listen address, e.g. 0.0.0.0:8080
    #[arg(long)]
    pub listen: Option<String>,
    /// Override store backend (memory, redis)
    #[arg(long, value_enum)]
    pub store_backend: Option<StoreBackend>,
    /// Override Redis connection URL
    #[arg(long)]
    pub redis_url: Option<String>,
    /// Override free-plan daily message allowance
    #[arg(long)]
    pub free_daily_messages: Option<u32>,
    /// Override metrics listen address
    #[arg(long)]
    pub metrics_listen: Option<String>,
    /// Override log level (trace/debug/info/warn/error)
    #[arg(long)]
    pub log_level: Option<String>,
    /// Override log format (pretty/compact/json)
    #[arg(long)]
    pub log_format: Option<String>,
}

pub fn apply_overrides(config: &mut Config, overrides: &CliOverrides) {
    if let Some(v) = &overrides.listen {
        config.server.listen = v.clone();
    }
    if let Some(v) = overrides.store_backend {
        config.store.backend = v;
    }
    if let Some(v) = &overrides.redis_url {
        config.store.redis_url = v.clone();
    }
    if let Some(v) = overrides.free_daily_messages {
        config.quota.free_daily_messages = v;
    }
    if let Some(v) = &overrides.metrics_listen {
        config.metrics.listen = Some(v.clone());
    }
    if let Some(v) = &overrides.log_level {
        config.logging.level = Some(v.clone());
    }
    if let Some(v) = &overrides.log_format {
        config.logging.format = Some(v.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_apply_over_defaults() {
        let mut config = Config::default();
        let overrides = CliOverrides {
            listen: Some("0.0.0.0:9000".into()),
            store_backend: Some(StoreBackend::Redis),
            free_daily_messages: Some(5),
            ..Default::default()
        };
        apply_overrides(&mut config, &overrides);

        assert_eq!(config.server.listen, "0.0.0.0:9000");
        assert_eq!(config.store.backend, StoreBackend::Redis);
        assert_eq!(config.quota.free_daily_messages, 5);
    }

    #[test]
    fn absent_overrides_leave_config_alone() {
        let mut config = Config::default();
        apply_overrides(&mut config, &CliOverrides::default());
        assert_eq!(config.server.listen, "127.0.0.1:8080");
    }
}
