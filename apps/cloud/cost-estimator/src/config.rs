//! Configuration for the cost estimator

use core_config::{env_first, env_parse, ConfigError, Environment, FromEnv, LogFormat};

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub log_format: LogFormat,
    /// Region assumed for resources when the plan does not declare one
    pub default_region: Option<String>,
}

impl FromEnv for Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        let log_format = env_parse::<LogFormat>("LOG_FORMAT")?
            .unwrap_or_else(|| environment.default_log_format());

        Ok(Config {
            environment,
            log_format,
            default_region: env_first(&["AWS_DEFAULT_REGION", "AWS_REGION"]),
        })
    }
}

impl Config {
    /// Region to assume, preferring an explicit override
    pub fn region_or_default(&self, region: Option<String>) -> Option<String> {
        region
            .filter(|r| !r.trim().is_empty())
            .or_else(|| self.default_region.clone())
    }
}
