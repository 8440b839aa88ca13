use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::env;

/// Settings shared by every service, read from `configuration.*` and `APP__*`.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8080
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

/// `ENVIRONMENT=prod` turns every defaulted setting into a required one.
pub fn is_production() -> bool {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod"
}

/// Reads `key`, falling back to `aliases` in order, then to `default`.
///
/// In production a missing key is an error even when a default exists.
pub fn get_env(
    key: &str,
    aliases: &[&str],
    default: Option<&str>,
    is_prod: bool,
) -> Result<String, AppError> {
    let found = std::iter::once(key)
        .chain(aliases.iter().copied())
        .find_map(|k| env::var(k).ok());

    match found {
        Some(val) => Ok(val),
        None => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
