use std::net::SocketAddr;
use std::path::PathBuf;

use serde::Deserialize;
use remedy_core::error::{Result, RemedyError};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub decision_log: DecisionLogSection,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(RemedyError::UnsupportedVersion);
        }

        self.gateway.validate()?;
        self.decision_log.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_demo_mode")]
    pub demo_mode: bool,

    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            demo_mode: default_demo_mode(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if !(256..=1_048_576).contains(&self.max_body_bytes) {
            return Err(RemedyError::BadRequest(
                "gateway.max_body_bytes must be between 256 and 1048576".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            RemedyError::BadRequest(format!("gateway.listen must be a valid SocketAddr: {e}"))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:5000".into()
}
fn default_demo_mode() -> bool {
    true
}
fn default_max_body_bytes() -> usize {
    16 * 1024
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecisionLogSection {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_log_path")]
    pub path: PathBuf,

    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl Default for DecisionLogSection {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

impl DecisionLogSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=65_536).contains(&self.queue_capacity) {
            return Err(RemedyError::BadRequest(
                "decision_log.queue_capacity must be between 1 and 65536".into(),
            ));
        }
        if self.enabled && self.path.as_os_str().is_empty() {
            return Err(RemedyError::BadRequest(
                "decision_log.path must not be empty when enabled".into(),
            ));
        }
        Ok(())
    }
}

fn default_log_path() -> PathBuf {
    PathBuf::from("decisions.jsonl")
}
fn default_queue_capacity() -> usize {
    1024
}
