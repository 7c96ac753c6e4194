// src/locate/locator.rs

use std::path::PathBuf;

use tracing::{debug, warn};

use super::{ProcessEnumerator, ProcessRecord};
use crate::types::EnumerationBackend;

/// Name and PID lookups over a pluggable [`ProcessEnumerator`].
///
/// None of the lookups fail: an enumeration error is logged and treated as
/// "no processes", so callers only ever see empty results.
#[derive(Debug)]
pub struct ProcessLocator {
    backend: EnumerationBackend,
    enumerator: Box<dyn ProcessEnumerator>,
}

impl ProcessLocator {
    pub fn new(backend: EnumerationBackend, enumerator: Box<dyn ProcessEnumerator>) -> Self {
        Self {
            backend,
            enumerator,
        }
    }

    /// The backend this locator was built for.
    pub fn backend(&self) -> EnumerationBackend {
        self.backend
    }

    /// All running processes, ordered by ascending PID.
    pub fn processes(&self) -> Vec<ProcessRecord> {
        let mut records = match self.enumerator.processes() {
            Ok(records) => records,
            Err(e) => {
                warn!(backend = %self.backend, error = %e, "process enumeration failed");
                return Vec::new();
            }
        };
        records.sort_by_key(|r| r.pid);
        records
    }

    /// Executable paths of every running process named exactly `name`.
    ///
    /// Matches whose path cannot be resolved are skipped.
    pub fn find_executable_paths_by_name(&self, name: &str) -> Vec<PathBuf> {
        let paths: Vec<PathBuf> = self
            .processes()
            .into_iter()
            .filter(|r| r.name == name)
            .filter_map(|r| {
                let pid = r.pid;
                let exe = r.exe.or_else(|| self.enumerator.exe_path(pid));
                if exe.is_none() {
                    debug!(pid, name, "skipping process with unreadable executable path");
                }
                exe
            })
            .collect();

        debug!(name, matches = paths.len(), "looked up executable paths by name");
        paths
    }

    /// Executable path of the process with the given PID.
    pub fn get_exe_path_from_pid(&self, pid: u32) -> Option<PathBuf> {
        let exe = self.enumerator.exe_path(pid);
        if exe.is_none() {
            debug!(pid, backend = %self.backend, "could not resolve executable path");
        }
        exe
    }

    /// PID of the first process named exactly `name`.
    pub fn process_id(&self, name: &str) -> Option<u32> {
        self.processes()
            .into_iter()
            .find(|r| r.name == name)
            .map(|r| r.pid)
    }
}
