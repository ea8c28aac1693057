//! Configuration system for the pipeline simulator.
//!
//! This module defines the configuration structures used to parameterize
//! the simulator. It provides:
//! 1. **Structures:** Hierarchical config for general output settings and the pipeline.
//! 2. **Enums:** The forwarding policy for load consumers.
//! 3. **Loading:** JSON parsing from a string or a file.
//!
//! Every field has a default, so `{}` is a complete configuration. Unknown
//! fields are rejected to catch misspelled options.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::error::ConfigError;

/// Forwarding behavior for a `lw` whose base register is produced by an
/// `add`/`nor` three decode-cycles ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum LoadConsumerForwarding {
    /// Forward from WB/END like every other consumer (default).
    #[default]
    Complete,
    /// Skip that one forwarding path; the `lw` reads the register file,
    /// which does not yet hold the producer's value.
    Legacy,
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use pipesim_core::config::{Config, LoadConsumerForwarding};
///
/// let json = r#"{
///     "general": { "print_states": false },
///     "pipeline": { "load_consumer_forwarding": "Legacy" }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(!config.general.print_states);
/// assert!(config.general.print_program);
/// assert_eq!(
///     config.pipeline.load_consumer_forwarding,
///     LoadConsumerForwarding::Legacy
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Output and run-control settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Pipeline behavior
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`Config::from_json`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}

/// General simulation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Print the machine state before every cycle
    #[serde(default = "GeneralConfig::default_true")]
    pub print_states: bool,

    /// Echo the loaded instruction memory before simulating
    #[serde(default = "GeneralConfig::default_true")]
    pub print_program: bool,

    /// Abort the run after this many cycles (no limit when absent)
    #[serde(default)]
    pub max_cycles: Option<u32>,
}

impl GeneralConfig {
    const fn default_true() -> bool {
        true
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            print_states: true,
            print_program: true,
            max_cycles: None,
        }
    }
}

/// Pipeline configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Forwarding policy for `lw` consumers
    #[serde(default)]
    pub load_consumer_forwarding: LoadConsumerForwarding,
}
