// src/exec/runner.rs

//! Pluggable command runner abstraction.
//!
//! Everything that starts an external process (the target application, and
//! the TASKLIST / `ps` / PowerShell fallbacks of the process locator) talks
//! to a `CommandRunner` instead of `std::process::Command` directly. Tests can
//! then swap in a fake runner that records invocations and returns scripted
//! output.

use std::fmt::Debug;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::errors::{BridgeError, Result};
use crate::fs::decode;

/// Captured result of a finished process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// Exit code, or `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Only an explicit zero exit status counts as success.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Trait abstracting how external commands are run.
///
/// Implementations block until the process exits. No timeout is applied.
pub trait CommandRunner: Send + Sync + Debug {
    /// Run `program` with `args`, capturing stdout and stderr.
    ///
    /// Returns `Err` only when the process could not be started. A process
    /// that starts and exits non-zero is an `Ok` with that exit code.
    fn run(&self, program: &Path, args: &[String]) -> Result<CommandOutput>;
}

/// Real runner used in production, built on `std::process::Command`.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, program: &Path, args: &[String]) -> Result<CommandOutput> {
        debug!(program = ?program, ?args, "spawning process");

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| BridgeError::SpawnFailed {
                program: program.display().to_string(),
                source,
            })?;

        let result = CommandOutput {
            code: output.status.code(),
            stdout: decode(&output.stdout),
            stderr: decode(&output.stderr),
        };

        debug!(
            program = ?program,
            exit_code = ?result.code,
            "process exited"
        );

        Ok(result)
    }
}
