use serde::Deserialize;
use service_core::config::{self as core_config, get_env, is_production};
use service_core::error::AppError;
use std::env;

const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
    pub cors: CorsConfig,
    pub log_level: String,
    /// OTLP collector; traces are only exported when set.
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl InvoiceConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common_config = core_config::Config::load()?;
        let is_prod = is_production();

        Ok(InvoiceConfig {
            common: common_config,
            mongodb: MongoConfig {
                // MONGO_DB_URI is the variable older deployments set
                uri: get_env("MONGODB_URI", &["MONGO_DB_URI"], None, is_prod)?,
                database: get_env("MONGODB_DATABASE", &[], Some("invoice_db"), is_prod)?,
            },
            cors: CorsConfig {
                allowed_origins: parse_origins(&get_env(
                    "CORS_ALLOWED_ORIGINS",
                    &[],
                    Some(DEFAULT_CORS_ORIGIN),
                    is_prod,
                )?),
            },
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|s| !s.is_empty()),
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
