use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::batches::CONTINUOUS_ADDRESSES;
use crate::error::{Error, Result};
use crate::message::{Destination, Session};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_DURATION_SECS: f64 = 10.0;
pub const DEFAULT_INTERVAL_SECS: f64 = 0.1;

/// Run configuration. Every key is optional in the JSON file; missing keys
/// keep their defaults.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub continuous: ContinuousConfig,
    /// Fixed RNG seed for reproducible payloads.
    pub seed: Option<u64>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ContinuousConfig {
    pub duration_secs: f64,
    pub interval_secs: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            continuous: ContinuousConfig::default(),
            seed: None,
        }
    }
}

impl Default for ContinuousConfig {
    fn default() -> Self {
        ContinuousConfig {
            duration_secs: DEFAULT_DURATION_SECS,
            interval_secs: DEFAULT_INTERVAL_SECS,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn destination(&self) -> Result<Destination> {
        if self.host.trim().is_empty() {
            return Err(Error::Config("host must not be empty".to_string()));
        }
        Ok(Destination::new(self.host.trim(), self.port))
    }

    /// Continuous session over the default address pool.
    pub fn session(&self) -> Result<Session> {
        let duration = seconds("duration", self.continuous.duration_secs)?;
        let interval = seconds("interval", self.continuous.interval_secs)?;
        if interval.is_zero() {
            return Err(Error::Config("interval must be greater than zero".to_string()));
        }
        Ok(Session {
            addresses: CONTINUOUS_ADDRESSES.iter().map(|a| a.to_string()).collect(),
            interval,
            duration,
        })
    }
}

fn seconds(name: &str, value: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(value)
        .map_err(|e| Error::Config(format!("{} of {} seconds: {}", name, value, e)))
}
