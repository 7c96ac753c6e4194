use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use wingbridge::errors::{BridgeError, Result};
use wingbridge::exec::{CommandOutput, CommandRunner};

/// One recorded call to [`FakeCommandRunner::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
}

/// Scripted result of one run.
#[derive(Debug, Clone)]
pub enum FakeResponse {
    Exit {
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },
    /// The program could not be started at all.
    SpawnError(io::ErrorKind),
}

impl FakeResponse {
    pub fn ok(stdout: &str) -> Self {
        FakeResponse::Exit {
            code: Some(0),
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }

    pub fn exit(code: i32, stderr: &str) -> Self {
        FakeResponse::Exit {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }
}

/// A fake runner that:
/// - records every invocation
/// - answers with queued responses, then with the default response.
#[derive(Debug, Clone)]
pub struct FakeCommandRunner {
    calls: Arc<Mutex<Vec<Invocation>>>,
    queued: Arc<Mutex<VecDeque<FakeResponse>>>,
    default: FakeResponse,
}

impl FakeCommandRunner {
    /// Runner whose commands all succeed with empty output.
    pub fn succeeding() -> Self {
        Self::with_default(FakeResponse::ok(""))
    }

    pub fn with_default(default: FakeResponse) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            queued: Arc::new(Mutex::new(VecDeque::new())),
            default,
        }
    }

    /// Answer the next call with `response`.
    pub fn push(&self, response: FakeResponse) {
        self.queued.lock().unwrap().push_back(response);
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for FakeCommandRunner {
    fn run(&self, program: &Path, args: &[String]) -> Result<CommandOutput> {
        self.calls.lock().unwrap().push(Invocation {
            program: program.to_path_buf(),
            args: args.to_vec(),
        });

        let response = self
            .queued
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.default.clone());

        match response {
            FakeResponse::Exit {
                code,
                stdout,
                stderr,
            } => Ok(CommandOutput {
                code,
                stdout,
                stderr,
            }),
            FakeResponse::SpawnError(kind) => Err(BridgeError::SpawnFailed {
                program: program.display().to_string(),
                source: io::Error::from(kind),
            }),
        }
    }
}
