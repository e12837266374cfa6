//! Process termination
//!
//! Library functions never call [`std::process::exit`] themselves. Operations
//! that end the program return an [`Exit`] and the entry point decides when
//! to act on it.

use std::io::{self, Write};
use tracing::debug;

/// An exit status the caller is expected to terminate with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "an Exit does nothing until `exit()` is called"]
pub struct Exit {
    code: i32,
}

impl Exit {
    pub const SUCCESS: Exit = Exit { code: 0 };
    pub const FAILURE: Exit = Exit { code: 1 };
    pub const USAGE: Exit = Exit { code: 2 };

    pub fn new(code: i32) -> Self {
        Self { code }
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    /// Terminate the process with this status
    pub fn exit(self) -> ! {
        debug!(code = self.code, "Exiting");
        std::process::exit(self.code)
    }
}

/// The exit to take for an output error, if it is a broken pipe
pub fn broken_pipe_exit(err: &io::Error) -> Option<Exit> {
    (err.kind() == io::ErrorKind::BrokenPipe).then_some(Exit::SUCCESS)
}

/// Writer that exits the process with status 0 when the reader goes away
///
/// Commands that stream unbounded output into a pipe (`cmd | head`) wrap
/// their stdout with [`exit_on_broken_pipe`]. Any other error is returned.
#[derive(Debug)]
pub struct ExitOnBrokenPipe<W> {
    inner: W,
}

/// Opt in to exiting cleanly on a broken pipe for `writer`
pub fn exit_on_broken_pipe<W: Write>(writer: W) -> ExitOnBrokenPipe<W> {
    ExitOnBrokenPipe { inner: writer }
}

impl<W> ExitOnBrokenPipe<W> {
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

fn check<T>(result: io::Result<T>) -> io::Result<T> {
    if let Err(err) = &result {
        if let Some(exit) = broken_pipe_exit(err) {
            exit.exit();
        }
    }
    result
}

impl<W: Write> Write for ExitOnBrokenPipe<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        check(self.inner.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        check(self.inner.flush())
    }
}
