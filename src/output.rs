//! Usage messages, warnings and fatal errors
//!
//! Every line is prefixed with the configured program name and written to
//! the error stream:
//!
//! ```text
//! myprog: no URL specified
//! usage: myprog fetch  [-v] URL
//!        myprog upload [-v] URL FILENAME
//! Fetch or update the contents of a remote URL.
//! ```
//!
//! A message is anything that implements [`Display`]. Errors print their own
//! message; use [`warnx!`](crate::warnx) and [`failx!`](crate::failx) for
//! `format!`-style interpolation.

use crate::config::{Config, ConfigError};
use crate::exit::Exit;
use std::fmt::Display;
use std::io::{self, Write};
use tracing::debug;

const USAGE_PREFIX: &str = "usage: ";

/// Writes messages for one [`Config`] to one sink
#[derive(Debug)]
pub struct Messenger<W = io::Stderr> {
    config: Config,
    out: W,
}

impl Messenger<io::Stderr> {
    /// Messenger writing to standard error
    pub fn new(config: Config) -> Self {
        Self::with_writer(config, io::stderr())
    }
}

impl Default for Messenger<io::Stderr> {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl<W: Write> Messenger<W> {
    pub fn with_writer(config: Config, out: W) -> Self {
        Self { config, out }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Print `<prog>: <message>`
    pub fn warn(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(self.out, "{}: {}", self.config.prog_name(), message)?;
        self.out.flush()
    }

    /// Print the usage block and return the usage exit (status 2)
    pub fn usage(&mut self) -> Result<Exit, ConfigError> {
        self.emit_usage(None::<&str>)
    }

    /// Print `message` as a warning, then the usage block
    pub fn usage_with(&mut self, message: impl Display) -> Result<Exit, ConfigError> {
        self.emit_usage(Some(message))
    }

    /// Print `message` as a warning and return an exit with `status`
    ///
    /// `None` means the default failure status of 1.
    pub fn fail(&mut self, status: Option<i32>, message: impl Display) -> Exit {
        if let Err(e) = self.warn(message) {
            debug!(error = %e, "Failed to write failure message");
        }
        status.map_or(Exit::FAILURE, Exit::new)
    }

    fn emit_usage(&mut self, warning: Option<impl Display>) -> Result<Exit, ConfigError> {
        let usage = self
            .config
            .usage()
            .ok_or(ConfigError::UsageNotConfigured)?
            .clone();

        if let Some(message) = warning {
            if let Err(e) = self.warn(message) {
                debug!(error = %e, "Failed to write usage warning");
            }
        }

        if let Err(e) = self.write_usage(usage.synopses(), usage.message()) {
            debug!(error = %e, "Failed to write usage");
        }
        Ok(Exit::USAGE)
    }

    fn write_usage(&mut self, synopses: &[String], message: &str) -> io::Result<()> {
        let prog_name = self.config.prog_name();
        for (i, synopsis) in synopses.iter().enumerate() {
            if i == 0 {
                writeln!(self.out, "{}{} {}", USAGE_PREFIX, prog_name, synopsis)?;
            } else {
                writeln!(
                    self.out,
                    "{:width$}{} {}",
                    "",
                    prog_name,
                    synopsis,
                    width = USAGE_PREFIX.len()
                )?;
            }
        }
        writeln!(self.out, "{}", message)?;
        self.out.flush()
    }
}

/// `format!`-style [`Messenger::warn`]
///
/// ```
/// # let mut messenger = cmdutil::Messenger::with_writer(cmdutil::Config::new("prog"), Vec::new());
/// cmdutil::warnx!(messenger, "val={}", 5).unwrap();
/// assert_eq!(messenger.into_inner(), b"prog: val=5\n");
/// ```
#[macro_export]
macro_rules! warnx {
    ($messenger:expr, $($arg:tt)+) => {
        $messenger.warn(::std::format_args!($($arg)+))
    };
}

/// `format!`-style [`Messenger::fail`], with an optional leading `status = N,`
///
/// ```
/// # let mut messenger = cmdutil::Messenger::with_writer(cmdutil::Config::new("prog"), Vec::new());
/// let exit = cmdutil::failx!(messenger, status = 3, "bad {}", "thing");
/// assert_eq!(exit.code(), 3);
/// let exit = cmdutil::failx!(messenger, "bad thing");
/// assert_eq!(exit.code(), 1);
/// ```
#[macro_export]
macro_rules! failx {
    ($messenger:expr, status = $status:expr, $($arg:tt)+) => {
        $messenger.fail(::std::option::Option::Some($status), ::std::format_args!($($arg)+))
    };
    ($messenger:expr, $($arg:tt)+) => {
        $messenger.fail(::std::option::Option::None, ::std::format_args!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigOptions;

    fn messenger() -> Messenger<Vec<u8>> {
        Messenger::with_writer(Config::new("myprog"), Vec::new())
    }

    fn configured() -> Messenger<Vec<u8>> {
        let config = Config::new("myprog")
            .with(ConfigOptions {
                prog_name: None,
                usage_message: Some("Fetch or update the contents of a remote URL.".to_string()),
                synopses: Some(vec![
                    "fetch  [-v] URL".to_string(),
                    "upload [-v] URL FILENAME".to_string(),
                ]),
            })
            .unwrap();
        Messenger::with_writer(config, Vec::new())
    }

    fn text(messenger: Messenger<Vec<u8>>) -> String {
        String::from_utf8(messenger.into_inner()).unwrap()
    }

    #[test]
    fn test_warn_error_uses_its_message() {
        let mut m = messenger();
        let err = io::Error::new(io::ErrorKind::Other, "boom");
        m.warn(&err).unwrap();
        assert_eq!(text(m), "myprog: boom\n");
    }

    #[test]
    fn test_warn_formatted() {
        let mut m = messenger();
        warnx!(m, "val={}", 5).unwrap();
        assert_eq!(text(m), "myprog: val=5\n");
    }

    #[test]
    fn test_warn_is_repeatable() {
        let mut m = messenger();
        m.warn("same").unwrap();
        m.warn("same").unwrap();
        assert_eq!(text(m), "myprog: same\nmyprog: same\n");
    }

    #[test]
    fn test_fail_with_status() {
        let mut m = messenger();
        let exit = m.fail(Some(3), "bad thing");
        assert_eq!(exit.code(), 3);
        assert_eq!(text(m), "myprog: bad thing\n");
    }

    #[test]
    fn test_fail_default_status() {
        let mut m = messenger();
        let exit = m.fail(None, "bad thing");
        assert_eq!(exit, Exit::FAILURE);
        assert_eq!(text(m), "myprog: bad thing\n");
    }

    #[test]
    fn test_failx_macro() {
        let mut m = messenger();
        let exit = failx!(m, status = 4, "{} of {}", 1, 2);
        assert_eq!(exit.code(), 4);
        let exit = failx!(m, "plain {}", "text");
        assert_eq!(exit.code(), 1);
        assert_eq!(text(m), "myprog: 1 of 2\nmyprog: plain text\n");
    }

    #[test]
    fn test_usage() {
        let mut m = configured();
        let exit = m.usage().unwrap();
        assert_eq!(exit, Exit::USAGE);
        assert_eq!(
            text(m),
            "usage: myprog fetch  [-v] URL\n       \
             myprog upload [-v] URL FILENAME\n\
             Fetch or update the contents of a remote URL.\n"
        );
    }

    #[test]
    fn test_usage_with_warning() {
        let mut m = configured();
        let err = io::Error::new(io::ErrorKind::Other, "no URL specified");
        let exit = m.usage_with(&err).unwrap();
        assert_eq!(exit.code(), 2);

        let output = text(m);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "myprog: no URL specified");
        assert_eq!(lines[1], "usage: myprog fetch  [-v] URL");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_usage_line_count_matches_synopses() {
        for count in 1..5 {
            let synopses: Vec<String> = (0..count).map(|i| format!("cmd{}", i)).collect();
            let config = Config::new("p")
                .with(ConfigOptions {
                    prog_name: None,
                    usage_message: Some("body".to_string()),
                    synopses: Some(synopses),
                })
                .unwrap();
            let mut m = Messenger::with_writer(config, Vec::new());
            m.usage().unwrap();

            let output = text(m);
            let lines: Vec<&str> = output.lines().collect();
            assert_eq!(lines.len(), count + 1);
            assert_eq!(lines.iter().filter(|l| l.contains(" p cmd")).count(), count);
            assert_eq!(lines[count], "body");
        }
    }

    #[test]
    fn test_usage_without_config() {
        let mut m = messenger();
        let result = m.usage();
        assert!(matches!(result, Err(ConfigError::UsageNotConfigured)));
        assert!(m.get_ref().is_empty());
    }
}
