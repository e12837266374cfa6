//! Common test utilities for cmdutil integration tests
//!
//! Runs the `cmdutil-demo` binary with piped standard streams and provides
//! isolated config files.

#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

/// Path of the demo binary built for this test run
pub fn demo_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_cmdutil-demo"))
}

/// Run the demo with `args`, feeding `stdin` and then closing it
pub fn run_demo(args: &[&str], stdin: &[u8]) -> Output {
    let mut child = Command::new(demo_bin())
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn cmdutil-demo");

    {
        let mut child_stdin = child.stdin.take().expect("stdin is piped");
        // The child may exit before reading; ignore the resulting broken pipe
        let _ = child_stdin.write_all(stdin);
    }

    child.wait_with_output().expect("Failed to wait for cmdutil-demo")
}

pub fn stderr_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stderr)
        .lines()
        .map(str::to_string)
        .collect()
}

/// A TOML config file in its own temporary directory
pub struct TestConfig {
    _dir: tempfile::TempDir,
    pub path: PathBuf,
}

impl TestConfig {
    pub fn new(contents: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("cmdutil.toml");
        fs::write(&path, contents).expect("Failed to write test config");
        Self { _dir: dir, path }
    }

    pub fn path_str(&self) -> String {
        self.path.to_string_lossy().to_string()
    }
}
