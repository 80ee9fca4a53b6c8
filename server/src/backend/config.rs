//! Runtime configuration read from the environment.
//!
//! `main` loads a `.env` file first (through `dotenvy`), so every setting can
//! live there or in the real environment. Unset variables fall back to the
//! defaults below; set-but-invalid ones are reported as errors.

use anyhow::{anyhow, Context, Result};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DATA_DIR_VAR: &str = "SHOP_TRACKER_DATA_DIR";
pub const BIND_ADDR_VAR: &str = "SHOP_TRACKER_BIND_ADDR";
pub const SCAN_INTERVAL_VAR: &str = "SHOP_TRACKER_SCAN_INTERVAL_SECS";
pub const CORS_ORIGIN_VAR: &str = "SHOP_TRACKER_CORS_ORIGIN";

const DEFAULT_DATA_FOLDER: &str = "Vehicle Service Tracker";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_SCAN_INTERVAL_SECS: u64 = 60;
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Directory holding the JSON store
    pub data_dir: PathBuf,
    pub bind_addr: SocketAddr,
    /// Alert scanner cadence
    pub scan_interval: Duration,
    /// Front-end origin allowed by CORS
    pub cors_origin: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_dir = match get(DATA_DIR_VAR) {
            Some(dir) => PathBuf::from(dir.trim()),
            None => default_data_dir()?,
        };

        let bind_addr = get(BIND_ADDR_VAR)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .trim()
            .parse::<SocketAddr>()
            .with_context(|| format!("{} must be a socket address like {}", BIND_ADDR_VAR, DEFAULT_BIND_ADDR))?;

        let scan_secs = match get(SCAN_INTERVAL_VAR) {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{} must be a whole number of seconds", SCAN_INTERVAL_VAR))?,
            None => DEFAULT_SCAN_INTERVAL_SECS,
        };
        if scan_secs == 0 {
            return Err(anyhow!("{} must be greater than zero", SCAN_INTERVAL_VAR));
        }

        let cors_origin = get(CORS_ORIGIN_VAR)
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());

        Ok(Self {
            data_dir,
            bind_addr,
            scan_interval: Duration::from_secs(scan_secs),
            cors_origin,
        })
    }
}

/// ~/Documents/Vehicle Service Tracker
fn default_data_dir() -> Result<PathBuf> {
    let documents = dirs::document_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Documents")))
        .ok_or_else(|| anyhow!("Could not determine home directory; set {}", DATA_DIR_VAR))?;
    Ok(documents.join(DEFAULT_DATA_FOLDER))
}
