//! Gateway configuration: the shared application config plus CORS settings

use std::env;

use sg_shared::AppConfig;

/// Cross-origin settings read from `ALLOWED_ORIGINS` and `CORS_MAX_AGE`
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Origins accepted in production
    pub allowed_origins: Vec<String>,
    /// Preflight cache lifetime in seconds
    pub max_age: usize,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            max_age: 3600,
        }
    }
}

impl CorsConfig {
    pub fn from_env() -> Self {
        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|value| parse_origins(&value))
            .unwrap_or_default();
        let max_age = env::var("CORS_MAX_AGE")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(3600);

        Self {
            allowed_origins,
            max_age,
        }
    }
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

/// Everything the gateway binary needs at startup
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub app: AppConfig,
    pub cors: CorsConfig,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            app: AppConfig::from_env(),
            cors: CorsConfig::from_env(),
        }
    }

    pub fn is_development(&self) -> bool {
        self.app.environment.is_development()
    }

    pub fn is_production(&self) -> bool {
        self.app.environment.is_production()
    }
}
