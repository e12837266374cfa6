//! Standard input as a confirmation [`Input`]
//!
//! Raw mode uses termios directly. Only the input side is changed (no
//! canonical mode, no echo, no signal keys) so that newlines written while
//! the prompt is active still return the carriage.

use super::Input;
use std::io::{self, IsTerminal};
use std::os::fd::{AsRawFd, BorrowedFd, FromRawFd, OwnedFd, RawFd};
use tracing::debug;

const STDIN_FD: RawFd = libc::STDIN_FILENO;

pub struct TerminalInput {
    fd: RawFd,
    /// Attributes saved when raw mode was turned on, restored when turned off
    saved: Option<libc::termios>,
}

impl std::fmt::Debug for TerminalInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalInput")
            .field("fd", &self.fd)
            .field("saved", &self.saved.is_some())
            .finish()
    }
}

impl TerminalInput {
    pub fn stdin() -> Self {
        Self {
            fd: STDIN_FD,
            saved: None,
        }
    }

    fn attributes(&self) -> io::Result<libc::termios> {
        // SAFETY: termios is plain data and tcgetattr fills it completely on success
        let mut termios: libc::termios = unsafe { std::mem::zeroed() };
        // SAFETY: the pointer is to a live, writable termios
        cvt(unsafe { libc::tcgetattr(self.fd, &mut termios) })?;
        Ok(termios)
    }

    fn set_attributes(&self, termios: &libc::termios) -> io::Result<()> {
        // SAFETY: the pointer is to a live termios read by the call only
        cvt(unsafe { libc::tcsetattr(self.fd, libc::TCSADRAIN, termios) })?;
        Ok(())
    }

    fn read_nonblocking(&self) -> io::Result<Option<u8>> {
        // SAFETY: F_GETFL takes no argument and touches no memory
        let flags = cvt(unsafe { libc::fcntl(self.fd, libc::F_GETFL) })?;
        let nonblocking = flags & libc::O_NONBLOCK != 0;
        if !nonblocking {
            // SAFETY: F_SETFL takes an int and touches no memory
            cvt(unsafe { libc::fcntl(self.fd, libc::F_SETFL, flags | libc::O_NONBLOCK) })?;
        }

        let result = read_byte(self.fd);

        if !nonblocking {
            // SAFETY: as above, restoring the flags read earlier
            cvt(unsafe { libc::fcntl(self.fd, libc::F_SETFL, flags) })?;
        }
        result
    }
}

fn read_byte(fd: RawFd) -> io::Result<Option<u8>> {
    let mut byte = 0u8;
    loop {
        // SAFETY: reads at most one byte into a live local
        let n = unsafe { libc::read(fd, (&mut byte as *mut u8).cast(), 1) };
        if n == 1 {
            return Ok(Some(byte));
        }
        if n == 0 {
            debug!("Read reached end of input");
            return Ok(None);
        }

        let err = io::Error::last_os_error();
        match err.kind() {
            io::ErrorKind::Interrupted => continue,
            io::ErrorKind::WouldBlock => return Ok(None),
            _ => return Err(err),
        }
    }
}

/// Pipe whose write end is closed to cancel a [`wait_readable`]
fn cancel_pipe() -> io::Result<(OwnedFd, OwnedFd)> {
    let mut fds = [0 as RawFd; 2];
    // SAFETY: pipe writes two descriptors into the array
    cvt(unsafe { libc::pipe(fds.as_mut_ptr()) })?;
    // SAFETY: both descriptors were just created and are owned by nobody else
    let (rx, tx) = unsafe { (OwnedFd::from_raw_fd(fds[0]), OwnedFd::from_raw_fd(fds[1])) };
    for fd in [&rx, &tx] {
        // SAFETY: F_SETFD takes an int and touches no memory
        cvt(unsafe { libc::fcntl(fd.as_raw_fd(), libc::F_SETFD, libc::FD_CLOEXEC) })?;
    }
    Ok((rx, tx))
}

/// Block until `fd` is readable or hung up, or until every write end of
/// `cancel` is closed
fn wait_readable(fd: RawFd, cancel: OwnedFd) -> io::Result<()> {
    let mut pollfds = [
        libc::pollfd {
            fd,
            events: libc::POLLIN,
            revents: 0,
        },
        libc::pollfd {
            fd: cancel.as_raw_fd(),
            events: libc::POLLIN,
            revents: 0,
        },
    ];
    loop {
        // SAFETY: the array is live for the call and its length is passed
        match cvt(unsafe { libc::poll(pollfds.as_mut_ptr(), 2, -1) }) {
            Ok(_) => {
                if pollfds[0].revents == 0 {
                    debug!(fd, "Readable wait cancelled");
                    return Err(io::ErrorKind::Interrupted.into());
                }
                return Ok(());
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

fn cvt(ret: libc::c_int) -> io::Result<libc::c_int> {
    if ret == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok(ret)
    }
}

fn make_raw(termios: &mut libc::termios) {
    termios.c_iflag &= !(libc::BRKINT | libc::ICRNL | libc::INPCK | libc::ISTRIP | libc::IXON);
    termios.c_cflag |= libc::CS8;
    termios.c_lflag &= !(libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG);
    termios.c_cc[libc::VMIN] = 1;
    termios.c_cc[libc::VTIME] = 0;
}

impl Input for TerminalInput {
    fn is_terminal(&self) -> bool {
        // SAFETY: the descriptor stays open for the lifetime of self
        unsafe { BorrowedFd::borrow_raw(self.fd) }.is_terminal()
    }

    fn is_raw(&self) -> io::Result<bool> {
        Ok(self.attributes()?.c_lflag & libc::ICANON == 0)
    }

    fn set_raw_mode(&mut self, enabled: bool) -> io::Result<()> {
        if enabled {
            let original = self.attributes()?;
            let mut raw = original;
            make_raw(&mut raw);
            self.set_attributes(&raw)?;
            self.saved = Some(original);
        } else if let Some(original) = self.saved.take() {
            self.set_attributes(&original)?;
        } else {
            let mut cooked = self.attributes()?;
            cooked.c_iflag |= libc::ICRNL;
            cooked.c_lflag |= libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG;
            self.set_attributes(&cooked)?;
        }
        debug!(enabled, fd = self.fd, "Set terminal raw mode");
        Ok(())
    }

    fn try_read_byte(&mut self) -> io::Result<Option<u8>> {
        self.read_nonblocking()
    }

    /// Waits on a blocking thread. Dropping the returned future closes the
    /// cancel pipe, which releases that thread so the runtime can shut down.
    async fn readable(&mut self) -> io::Result<()> {
        let fd = self.fd;
        let (cancel_rx, cancel_tx) = cancel_pipe()?;
        let result = tokio::task::spawn_blocking(move || wait_readable(fd, cancel_rx)).await;
        drop(cancel_tx);
        result.map_err(io::Error::other)?
    }
}
