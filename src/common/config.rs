//! # Configuration Utilities
//!
//! Settings for the command-line tool, read from an optional TOML file.
//!
//! ```toml
//! [output]
//! suffix = "_out"
//!
//! [logging]
//! level = "debug"
//! ```
//!
//! Every key has a default, so any section or the whole file may be omitted.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Load a TOML configuration file and deserialize it into the specified type.
///
/// # Arguments
/// - `path`: Path to the TOML configuration file
///
/// # Returns
/// - `Ok(T)`: Successfully loaded and parsed configuration
/// - `Err`: File I/O or parsing error
///
/// # Example
/// ```ignore
/// let config: StegConfig = load_config("stegger.toml")?;
/// ```
pub fn load_config<T, P>(path: P) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Unable to read config {}", path.display()))?;
    let config: T = toml::from_str(&content)
        .with_context(|| format!("Invalid config {}", path.display()))?;
    Ok(config)
}

/// Top-level tool configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StegConfig {
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// Where altered images are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Appended to the input file stem when no output path is given
    /// (e.g. `kitten.png` -> `kitten_out.png`)
    pub suffix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            suffix: "_out".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of `error`, `warn`, `info`, `debug`, `trace`
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl StegConfig {
    /// Load from `path` if given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => load_config(path),
            None => Ok(Self::default()),
        }
    }
}
