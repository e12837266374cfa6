//! Test utilities for confirmation prompts
//!
//! [`ScriptedInput`] stands in for a terminal or pipe so the confirmation
//! state machine can be driven without a real tty.

#![allow(dead_code)]

use crate::confirm::Input;
use std::collections::VecDeque;
use std::io;

#[derive(Debug, Clone, Copy)]
enum Readable {
    Ready,
    Never,
}

/// Scripted byte source
///
/// Each call to `try_read_byte` pops the next scripted result; an empty
/// script reads as `None`.
#[derive(Debug)]
pub struct ScriptedInput {
    reads: VecDeque<io::Result<Option<u8>>>,
    readable: Readable,
    readable_calls: usize,
    terminal: bool,
    raw: bool,
    raw_changes: Vec<bool>,
}

impl ScriptedInput {
    fn new(reads: Vec<io::Result<Option<u8>>>, readable: Readable) -> Self {
        Self {
            reads: reads.into(),
            readable,
            readable_calls: 0,
            terminal: false,
            raw: false,
            raw_changes: Vec::new(),
        }
    }

    /// A byte is already waiting when the prompt starts
    pub fn immediate(byte: u8) -> Self {
        Self::new(vec![Ok(Some(byte))], Readable::Ready)
    }

    /// Nothing at first; after the readable signal, `byte` (or end-of-stream)
    pub fn after_readable(byte: Option<u8>) -> Self {
        Self::new(vec![Ok(None), Ok(byte)], Readable::Ready)
    }

    /// Nothing is ever available and the readable signal never fires
    pub fn never_readable() -> Self {
        Self::new(vec![Ok(None)], Readable::Never)
    }

    /// The first read fails
    pub fn failing_read() -> Self {
        Self::new(
            vec![Err(io::Error::new(io::ErrorKind::Other, "read failed"))],
            Readable::Ready,
        )
    }

    /// Behave as a terminal whose raw mode starts as `raw`
    pub fn terminal(mut self, raw: bool) -> Self {
        self.terminal = true;
        self.raw = raw;
        self
    }

    pub fn raw(&self) -> bool {
        self.raw
    }

    /// Every `set_raw_mode` call, in order
    pub fn raw_changes(&self) -> &[bool] {
        &self.raw_changes
    }

    pub fn readable_calls(&self) -> usize {
        self.readable_calls
    }
}

impl Input for ScriptedInput {
    fn is_terminal(&self) -> bool {
        self.terminal
    }

    fn is_raw(&self) -> io::Result<bool> {
        Ok(self.raw)
    }

    fn set_raw_mode(&mut self, enabled: bool) -> io::Result<()> {
        assert!(self.terminal, "raw mode set on a non-terminal");
        self.raw = enabled;
        self.raw_changes.push(enabled);
        Ok(())
    }

    fn try_read_byte(&mut self) -> io::Result<Option<u8>> {
        self.reads.pop_front().unwrap_or(Ok(None))
    }

    async fn readable(&mut self) -> io::Result<()> {
        self.readable_calls += 1;
        match self.readable {
            Readable::Ready => Ok(()),
            Readable::Never => std::future::pending().await,
        }
    }
}
