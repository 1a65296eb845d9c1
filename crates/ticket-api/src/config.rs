//! Server settings read from the environment.
use std::{env, path::PathBuf};

use tracing::info;

/// Default listen address
pub const DEFAULT_ADDR: &str = "0.0.0.0:8787";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `TICKET_API_ADDR`
    pub addr: String,
    /// `TICKET_VERIFIER_CONFIG`, a YAML verifier config. Built-in defaults when unset.
    pub verifier_config: Option<PathBuf>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let addr = env::var("TICKET_API_ADDR").unwrap_or_else(|_| {
            info!("TICKET_API_ADDR not set, using default: {DEFAULT_ADDR}");
            DEFAULT_ADDR.to_string()
        });

        let verifier_config = env::var("TICKET_VERIFIER_CONFIG").ok().map(PathBuf::from);
        if verifier_config.is_none() {
            info!("TICKET_VERIFIER_CONFIG not set, using built-in verifier defaults");
        }

        Self {
            addr,
            verifier_config,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            verifier_config: None,
        }
    }
}
