//! Gateway configuration from the environment
//!
//! Every setting has a default, so a bare `worldcup-gateway` started from the
//! repository root serves `data/` on 127.0.0.1:8050.

use anyhow::{Context, Result};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 8050;
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_COUNTRIES_FILE: &str = "countries.csv";
pub const DEFAULT_FINALS_FILE: &str = "world_cup_finals_data.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub bind_addr: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub countries_file: String,
    pub finals_file: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            countries_file: DEFAULT_COUNTRIES_FILE.to_string(),
            finals_file: DEFAULT_FINALS_FILE.to_string(),
        }
    }
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let port = match lookup("WORLDCUP_GATEWAY_PORT").or_else(|| lookup("PORT")) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("invalid port '{}'", raw))?,
            None => defaults.port,
        };

        Ok(Self {
            bind_addr: lookup("WORLDCUP_BIND_ADDR").unwrap_or(defaults.bind_addr),
            port,
            data_dir: lookup("WORLDCUP_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            countries_file: lookup("WORLDCUP_COUNTRIES_FILE").unwrap_or(defaults.countries_file),
            finals_file: lookup("WORLDCUP_FINALS_FILE").unwrap_or(defaults.finals_file),
        })
    }

    pub fn countries_path(&self) -> PathBuf {
        self.data_dir.join(&self.countries_file)
    }

    pub fn finals_path(&self) -> PathBuf {
        self.data_dir.join(&self.finals_file)
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}
