//! Messaging configuration
//!
//! A [`Config`] carries the program name used to prefix every message and the
//! optional usage block (a usage message plus one or more synopsis lines)
//! printed by [`Messenger::usage`](crate::output::Messenger::usage).
//!
//! Configuration can be built in code through [`ConfigOptions`] or loaded from
//! a TOML file:
//!
//! ```toml
//! prog_name = "myprog"
//! usage_message = "Fetch or update the contents of a remote URL."
//! synopses = ["fetch  [-v] URL", "upload [-v] URL FILENAME"]
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot specify a usage message without synopses")]
    UsageWithoutSynopses,

    #[error("cannot specify synopses without a usage message")]
    SynopsesWithoutUsage,

    #[error("there must be at least one synopsis")]
    EmptySynopses,

    #[error("cannot call usage() without configuring usage message and synopses")]
    UsageNotConfigured,

    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Fields accepted by [`Config::configure`]. Every field is optional.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigOptions {
    pub prog_name: Option<String>,
    pub usage_message: Option<String>,
    pub synopses: Option<Vec<String>>,
}

/// The usage message and its synopses. Never exists with zero synopses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Usage {
    message: String,
    synopses: Vec<String>,
}

impl Usage {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn synopses(&self) -> &[String] {
        &self.synopses
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    prog_name: String,
    usage: Option<Usage>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(default_prog_name())
    }
}

impl Config {
    /// Create a config with the given program name and no usage block
    pub fn new(prog_name: impl Into<String>) -> Self {
        Self {
            prog_name: prog_name.into(),
            usage: None,
        }
    }

    pub fn prog_name(&self) -> &str {
        &self.prog_name
    }

    pub fn usage(&self) -> Option<&Usage> {
        self.usage.as_ref()
    }

    /// Apply `options` on top of the current configuration
    ///
    /// The usage message and the synopses must be given together, and there
    /// must be at least one synopsis. On error nothing is changed.
    pub fn configure(&mut self, options: ConfigOptions) -> Result<(), ConfigError> {
        let usage = match (options.usage_message, options.synopses) {
            (Some(_), None) => return Err(ConfigError::UsageWithoutSynopses),
            (None, Some(_)) => return Err(ConfigError::SynopsesWithoutUsage),
            (Some(_), Some(synopses)) if synopses.is_empty() => {
                return Err(ConfigError::EmptySynopses)
            }
            (Some(message), Some(synopses)) => Some(Usage { message, synopses }),
            (None, None) => None,
        };

        if let Some(prog_name) = options.prog_name {
            debug!(prog_name = %prog_name, "Configured program name");
            self.prog_name = prog_name;
        }

        if let Some(usage) = usage {
            debug!(synopses = usage.synopses.len(), "Configured usage");
            self.usage = Some(usage);
        }

        Ok(())
    }

    /// Builder-style [`configure`](Self::configure)
    pub fn with(mut self, options: ConfigOptions) -> Result<Self, ConfigError> {
        self.configure(options)?;
        Ok(self)
    }

    /// Load configure options from a TOML file
    pub fn load(path: &Path) -> Result<ConfigOptions, ConfigError> {
        debug!(path = %path.display(), "Loading config file");
        let contents = fs::read_to_string(path)?;
        let options: ConfigOptions = toml::from_str(&contents)?;
        Ok(options)
    }
}

/// Base name of the running executable
///
/// Taken from `argv[0]`, then from the executable path, then the crate name.
pub fn default_prog_name() -> String {
    std::env::args_os()
        .next()
        .map(PathBuf::from)
        .or_else(|| std::env::current_exe().ok())
        .and_then(|path| {
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}
