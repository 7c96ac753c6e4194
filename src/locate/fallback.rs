// src/locate/fallback.rs

//! Enumeration by shelling out to the platform's process listing tools.
//!
//! Slower than [`super::native`], but needs nothing beyond what ships with
//! the OS. Windows is the fully supported platform here (TASKLIST plus a
//! PowerShell CIM query for executable paths); Linux and macOS use `ps`, with
//! `/proc/<pid>/exe` or `ps -o comm=` for paths.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::anyhow;
use tracing::{debug, trace};

use super::{ProcessEnumerator, ProcessRecord};
use crate::errors::Result;
use crate::exec::CommandRunner;

/// Which family of tools the fallback shells out to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackPlatform {
    Windows,
    Linux,
    MacOs,
    Other,
}

impl FallbackPlatform {
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            FallbackPlatform::Windows
        } else if cfg!(target_os = "linux") {
            FallbackPlatform::Linux
        } else if cfg!(target_os = "macos") {
            FallbackPlatform::MacOs
        } else {
            FallbackPlatform::Other
        }
    }

    /// The listing tool and its arguments.
    pub fn listing_command(self) -> (&'static str, Vec<String>) {
        match self {
            FallbackPlatform::Windows => (
                "tasklist",
                vec!["/FO".to_string(), "CSV".to_string(), "/NH".to_string()],
            ),
            _ => ("ps", vec!["-eo".to_string(), "pid=,comm=".to_string()]),
        }
    }
}

/// Enumerator that parses the text output of TASKLIST / `ps`.
#[derive(Debug)]
pub struct FallbackCliEnumerator {
    runner: Arc<dyn CommandRunner>,
    platform: FallbackPlatform,
}

impl FallbackCliEnumerator {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self::for_platform(runner, FallbackPlatform::current())
    }

    pub fn for_platform(runner: Arc<dyn CommandRunner>, platform: FallbackPlatform) -> Self {
        Self { runner, platform }
    }

    fn run_trimmed(&self, program: &str, args: &[String]) -> Option<String> {
        match self.runner.run(Path::new(program), args) {
            Ok(out) if out.success() => {
                let text = out.stdout.trim();
                if text.is_empty() {
                    None
                } else {
                    Some(text.to_string())
                }
            }
            Ok(out) => {
                debug!(program, exit_code = ?out.code, stderr = %out.stderr.trim(), "lookup command failed");
                None
            }
            Err(e) => {
                debug!(program, error = %e, "lookup command could not be started");
                None
            }
        }
    }
}

impl ProcessEnumerator for FallbackCliEnumerator {
    fn processes(&self) -> Result<Vec<ProcessRecord>> {
        let (program, args) = self.platform.listing_command();
        let out = self.runner.run(Path::new(program), &args)?;
        if !out.success() {
            return Err(anyhow!(
                "{program} exited with {:?}: {}",
                out.code,
                out.stderr.trim()
            )
            .into());
        }

        let records = match self.platform {
            FallbackPlatform::Windows => parse_tasklist_csv(&out.stdout),
            _ => parse_ps_output(&out.stdout),
        };
        trace!(count = records.len(), program, "enumerated processes via CLI");
        Ok(records)
    }

    fn exe_path(&self, pid: u32) -> Option<PathBuf> {
        match self.platform {
            FallbackPlatform::Windows => {
                let query = format!(
                    "(Get-CimInstance Win32_Process -Filter 'ProcessId={pid}').ExecutablePath"
                );
                let args = vec![
                    "-NoProfile".to_string(),
                    "-Command".to_string(),
                    query,
                ];
                self.run_trimmed("powershell.exe", &args).map(PathBuf::from)
            }
            FallbackPlatform::Linux => std::fs::read_link(format!("/proc/{pid}/exe")).ok(),
            FallbackPlatform::MacOs => {
                let args = vec![
                    "-o".to_string(),
                    "comm=".to_string(),
                    "-p".to_string(),
                    pid.to_string(),
                ];
                self.run_trimmed("ps", &args)
                    .map(PathBuf::from)
                    .filter(|p| p.is_absolute())
            }
            FallbackPlatform::Other => None,
        }
    }
}

/// Parse `TASKLIST /FO CSV /NH` output.
///
/// Each row looks like `"cascadeur.exe","4242","Console","1","123,456 K"`.
/// Rows that do not start with a quoted name and a numeric PID (such as the
/// "INFO: No tasks are running" notice) are skipped.
pub fn parse_tasklist_csv(output: &str) -> Vec<ProcessRecord> {
    output
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            let inner = line.strip_prefix('"')?;
            let mut fields = inner.split("\",\"");
            let name = fields.next()?;
            let pid: u32 = fields.next()?.trim_end_matches('"').parse().ok()?;
            if name.is_empty() {
                return None;
            }
            Some(ProcessRecord::new(pid, name, None))
        })
        .collect()
}

/// Parse `ps -eo pid=,comm=` output.
///
/// On macOS `comm` is the full executable path; it is used as the record's
/// path and its file name as the process name.
pub fn parse_ps_output(output: &str) -> Vec<ProcessRecord> {
    output
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            let (pid, comm) = line.split_once(char::is_whitespace)?;
            let pid: u32 = pid.parse().ok()?;
            let comm = comm.trim();
            if comm.is_empty() {
                return None;
            }

            let path = Path::new(comm);
            if path.is_absolute() {
                let name = path.file_name()?.to_string_lossy().into_owned();
                Some(ProcessRecord::new(pid, name, Some(path.to_path_buf())))
            } else {
                Some(ProcessRecord::new(pid, comm, None))
            }
        })
        .collect()
}
