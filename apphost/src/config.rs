//! Host configuration
//!
//! JSON, every field optional:
//!
//! ```json
//! {
//!   "process_name": "main",
//!   "multi_process": true,
//!   "hub_process": ":router",
//!   "log_level": "info",
//!   "spokes": [{ "process": "main", "address": "unix:///tmp/main.sock" }]
//! }
//! ```

use core_types::ProcessName;
use hub_router::{StaticTopology, DEFAULT_HUB_PROCESS};
use serde::{Deserialize, Serialize};
use services_process_selector::{CmdlineIdentity, EnvIdentity, FixedIdentity, ProcessSelector};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "APPHOST_CONFIG";

/// Environment variable naming this process, read ahead of `process_name`
pub const PROCESS_NAME_ENV: &str = "APPHOST_PROCESS_NAME";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// One spoke the hub connects to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpokeConfig {
    pub process: ProcessName,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    /// Logical name of this process; unset means the host default
    pub process_name: Option<ProcessName>,
    /// Overrides the application's own multi-process answer
    pub multi_process: Option<bool>,
    /// Reserved name of the hub process
    pub hub_process: ProcessName,
    pub log_level: String,
    pub spokes: Vec<SpokeConfig>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            process_name: None,
            multi_process: None,
            hub_process: ProcessName::new(DEFAULT_HUB_PROCESS),
            log_level: "info".to_string(),
            spokes: Vec::new(),
        }
    }
}

impl HostConfig {
    /// Parses and validates a JSON document
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: HostConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Loads from `path`, else from `APPHOST_CONFIG`, else defaults
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        let from_env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        match path.map(Path::to_path_buf).or(from_env) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Identity source for the running process
    ///
    /// An explicit `process` name wins. Otherwise the command line is used
    /// when `from_cmdline` is set, else `APPHOST_PROCESS_NAME`, falling back to
    /// `process_name` and then `default`.
    pub fn process_selector(
        &self,
        process: Option<&str>,
        from_cmdline: bool,
        default: &str,
    ) -> ProcessSelector {
        self.selector_from(PROCESS_NAME_ENV, process, from_cmdline, default)
    }

    fn selector_from(
        &self,
        variable: &str,
        process: Option<&str>,
        from_cmdline: bool,
        default: &str,
    ) -> ProcessSelector {
        match process {
            Some(name) => ProcessSelector::new(FixedIdentity::new(name)),
            None if from_cmdline => ProcessSelector::new(CmdlineIdentity::new().basename()),
            None => {
                let fallback = self
                    .process_name
                    .clone()
                    .unwrap_or_else(|| ProcessName::new(default));
                ProcessSelector::new(EnvIdentity::new(variable).with_fallback(fallback))
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hub_process.is_empty() {
            return Err(ConfigError::Invalid(
                "hub_process must not be empty".to_string(),
            ));
        }
        if matches!(&self.process_name, Some(name) if name.is_empty()) {
            return Err(ConfigError::Invalid(
                "process_name must not be empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for spoke in &self.spokes {
            if spoke.process.is_empty() {
                return Err(ConfigError::Invalid(
                    "spoke process must not be empty".to_string(),
                ));
            }
            if spoke.process == self.hub_process {
                return Err(ConfigError::Invalid(format!(
                    "hub process {} cannot be a spoke",
                    spoke.process
                )));
            }
            if !seen.insert(&spoke.process) {
                return Err(ConfigError::Invalid(format!(
                    "spoke {} listed twice",
                    spoke.process
                )));
            }
        }
        Ok(())
    }

    /// Spokes as a topology for the hub
    pub fn topology(&self) -> StaticTopology {
        self.spokes
            .iter()
            .fold(StaticTopology::new(), |topology, spoke| {
                topology.spoke(spoke.process.clone(), spoke.address.clone())
            })
    }
}
