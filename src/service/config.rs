use std::path::PathBuf;

use crate::foundation::error::{OrreryError, OrreryResult};

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_BIND: &str = "0.0.0.0";
pub const DEFAULT_ARTIFACT: &str = "static/orbits.gif";

pub const ENV_PORT: &str = "PORT";
pub const ENV_BIND: &str = "ORRERY_BIND";
pub const ENV_ARTIFACT: &str = "ORRERY_ARTIFACT";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    /// Relative paths resolve against the process working directory.
    pub artifact_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            port: DEFAULT_PORT,
            artifact_path: PathBuf::from(DEFAULT_ARTIFACT),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> OrreryResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source; unset or blank values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> OrreryResult<Self> {
        let mut cfg = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(port) = get(ENV_PORT) {
            cfg.port = port.trim().parse::<u16>().map_err(|e| {
                OrreryError::validation(format!("{ENV_PORT}='{port}' is not a valid port: {e}"))
            })?;
        }
        if let Some(bind) = get(ENV_BIND) {
            cfg.bind = bind.trim().to_string();
        }
        if let Some(path) = get(ENV_ARTIFACT) {
            cfg.artifact_path = PathBuf::from(path);
        }
        Ok(cfg)
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/service/config.rs"]
mod tests;
