//! Gateway config loader (strict parsing).

pub mod schema;

use std::fs;

use remedy_core::error::{Result, RemedyError};

pub use schema::{DecisionLogSection, GatewayConfig, GatewaySection};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "REMEDY_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "remedy.yaml";

pub fn load_from_file(path: &str) -> Result<GatewayConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| RemedyError::Internal(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<GatewayConfig> {
    let cfg: GatewayConfig = serde_yaml::from_str(s)
        .map_err(|e| RemedyError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Config path from `REMEDY_CONFIG`, falling back to `remedy.yaml`.
pub fn config_path() -> String {
    std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}
