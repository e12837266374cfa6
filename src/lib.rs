//! cmdutil library
//!
//! Common pieces for small command-line programs: usage messages, warnings
//! and fatal errors prefixed with the program name, an opt-in clean exit on
//! broken pipes, and a one-keypress yes/no confirmation prompt.
//!
//! ```no_run
//! use cmdutil::{Config, ConfigOptions, Messenger};
//!
//! let config = Config::default()
//!     .with(ConfigOptions {
//!         prog_name: Some("myprog".to_string()),
//!         usage_message: Some("Fetch the contents of a URL.".to_string()),
//!         synopses: Some(vec!["[-v] URL".to_string()]),
//!     })
//!     .unwrap();
//! let mut messenger = Messenger::new(config);
//! messenger.usage_with("no URL specified").unwrap().exit();
//! ```

pub mod cli;
pub mod config;
pub mod confirm;
pub mod exit;
pub mod logging;
pub mod output;

pub use config::{Config, ConfigError, ConfigOptions};
#[cfg(unix)]
pub use confirm::confirm_stdio;
pub use confirm::{confirm, ConfirmError, ConfirmOptions, Input};
pub use exit::{broken_pipe_exit, exit_on_broken_pipe, Exit};
pub use output::Messenger;

// Test utilities should only be available in test mode
#[cfg(test)]
pub mod test_utils;
