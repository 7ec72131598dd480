//! TOML configuration for the `swapvdf` binary.
//!
//! Every key is optional; a missing file section falls back to the reference
//! modulus and `DEFAULT_DELAY`.

use serde::Deserialize;
use std::{fs, path::Path};
use swapvdf_vdf::{constants, VdfParams, VdfResult};

/// Errors raised while loading a config file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Deployment parameters and logging verbosity
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// RSA modulus `N`, decimal or `0x` hex
    pub modulus: String,

    /// Number of sequential squarings `T`
    pub delay: u64,

    /// Logging verbosity (`error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: Option<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            modulus: constants::DEFAULT_MODULUS_DEC.to_string(),
            delay: constants::DEFAULT_DELAY,
            log_level: Some("info".to_string()),
        }
    }
}

impl CliConfig {
    /// Load a configuration file from the given path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(&path)?;
        Self::from_toml_str(&data)
    }

    pub fn from_toml_str(data: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str::<CliConfig>(data)?)
    }

    /// Validated `(N, T)` for the engine.
    ///
    /// The modulus string goes through the same normalization as any other
    /// numeric input, so `"0x..."` and `"4.4e76"`-style values are accepted.
    pub fn params(&self) -> VdfResult<VdfParams> {
        VdfParams::from_numberish(self.modulus.as_str(), self.delay)
    }
}
