//! One-keypress yes/no confirmation
//!
//! [`confirm`] writes a prompt, reads a single byte and resolves to `true`
//! only if that byte is `y` or `Y`. On a terminal the input is switched to
//! raw mode for the duration of the prompt so the key is delivered without
//! waiting for Enter, and switched back afterwards.
//!
//! # Limitations
//!
//! Only one confirmation may run against a given terminal at a time. Raw mode
//! is process-wide state and concurrent prompts would restore it in the
//! wrong order. This is not checked.
//!
//! End of input is reported by [`Input::try_read_byte`] the same way as "no
//! data yet". If the input reached end-of-stream before the prompt started
//! and its [`Input::readable`] signal never fires again, the confirmation
//! waits forever. There is no timeout.

#[cfg(unix)]
mod terminal;

#[cfg(unix)]
pub use terminal::TerminalInput;

use std::future::Future;
use std::io::{self, Write};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ConfirmError {
    #[error("confirmation message must not be empty")]
    EmptyMessage,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone)]
pub struct ConfirmOptions {
    /// Prompt text, written without a trailing newline
    pub message: String,
}

impl ConfirmOptions {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Byte source a confirmation reads its answer from
pub trait Input {
    /// Whether this input is an interactive terminal. Raw mode is only
    /// touched when this returns true.
    fn is_terminal(&self) -> bool;

    fn is_raw(&self) -> io::Result<bool>;

    fn set_raw_mode(&mut self, enabled: bool) -> io::Result<()>;

    /// Read one byte without blocking
    ///
    /// `None` means no byte is available right now, which includes
    /// end-of-stream.
    fn try_read_byte(&mut self) -> io::Result<Option<u8>>;

    /// Resolve once data (or end-of-stream) can be read
    ///
    /// An implementation that never resolves after end-of-stream leaves the
    /// confirmation pending forever.
    fn readable(&mut self) -> impl Future<Output = io::Result<()>>;
}

/// Turns raw mode back off when a confirmation that turned it on ends,
/// including on error or when the future is dropped
struct RawModeGuard<'a, I: Input> {
    input: &'a mut I,
    restore: bool,
}

impl<'a, I: Input> RawModeGuard<'a, I> {
    fn enter(input: &'a mut I) -> io::Result<Self> {
        let mut restore = false;
        if input.is_terminal() && !input.is_raw()? {
            input.set_raw_mode(true)?;
            debug!("Enabled raw mode");
            restore = true;
        }
        Ok(Self { input, restore })
    }

    fn input(&mut self) -> &mut I {
        self.input
    }

    fn finish(mut self) -> io::Result<()> {
        if self.restore {
            self.restore = false;
            self.input.set_raw_mode(false)?;
            debug!("Restored raw mode");
        }
        Ok(())
    }
}

impl<I: Input> Drop for RawModeGuard<'_, I> {
    fn drop(&mut self) {
        if self.restore {
            if let Err(e) = self.input.set_raw_mode(false) {
                warn!(error = %e, "Failed to restore terminal mode");
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Prompt,
    Attempt,
    Pending,
    Finalize(Option<u8>),
}

/// Ask `options.message` on `output` and read the answer from `input`
///
/// Resolves to `true` iff the first byte read is `y` or `Y`. End of input
/// counts as no. See the [module docs](self) for the cases where this never
/// resolves.
pub async fn confirm<W, I>(
    options: &ConfirmOptions,
    output: &mut W,
    input: &mut I,
) -> Result<bool, ConfirmError>
where
    W: Write,
    I: Input,
{
    if options.message.is_empty() {
        return Err(ConfirmError::EmptyMessage);
    }

    let mut guard = RawModeGuard::enter(input)?;
    let mut state = State::Prompt;

    loop {
        debug!(?state, "Confirmation state");
        state = match state {
            State::Prompt => {
                output.write_all(options.message.as_bytes())?;
                output.flush()?;
                State::Attempt
            }
            State::Attempt => match guard.input().try_read_byte()? {
                Some(byte) => {
                    // Resolve on a later poll, never inline
                    tokio::task::yield_now().await;
                    State::Finalize(Some(byte))
                }
                None => State::Pending,
            },
            State::Pending => {
                guard.input().readable().await?;
                State::Finalize(guard.input().try_read_byte()?)
            }
            State::Finalize(byte) => {
                writeln!(output)?;
                output.flush()?;
                guard.finish()?;
                return Ok(is_affirmative(byte));
            }
        };
    }
}

/// [`confirm`] on standard output and standard input
///
/// Must be awaited inside a tokio runtime: waiting for input uses
/// [`tokio::task::spawn_blocking`], which panics without one.
#[cfg(unix)]
pub async fn confirm_stdio(options: &ConfirmOptions) -> Result<bool, ConfirmError> {
    let mut input = TerminalInput::stdin();
    confirm(options, &mut io::stdout(), &mut input).await
}

fn is_affirmative(byte: Option<u8>) -> bool {
    matches!(byte, Some(b) if b.eq_ignore_ascii_case(&b'y'))
}
