// src/locate/native.rs

//! In-process enumeration through `sysinfo`.

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System, UpdateKind};
use tracing::trace;

use super::{ProcessEnumerator, ProcessRecord};
use crate::errors::Result;

/// Enumerator backed by a `sysinfo::System`.
///
/// The process table is refreshed on every call; nothing is served from a
/// previous snapshot.
#[derive(Debug)]
pub struct NativeEnumerator {
    system: Mutex<System>,
}

impl NativeEnumerator {
    pub fn new() -> Self {
        Self {
            system: Mutex::new(System::new()),
        }
    }

    fn system(&self) -> MutexGuard<'_, System> {
        self.system.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn refresh_kind() -> ProcessRefreshKind {
        ProcessRefreshKind::new().with_exe(UpdateKind::OnlyIfNotSet)
    }
}

impl Default for NativeEnumerator {
    fn default() -> Self {
        Self::new()
    }
}

/// `sysinfo` reports an empty path for processes it may not inspect.
fn readable_exe(exe: Option<&std::path::Path>) -> Option<PathBuf> {
    exe.filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.to_path_buf())
}

impl ProcessEnumerator for NativeEnumerator {
    fn processes(&self) -> Result<Vec<ProcessRecord>> {
        let mut system = self.system();
        system.refresh_processes_specifics(ProcessesToUpdate::All, true, Self::refresh_kind());

        let records: Vec<ProcessRecord> = system
            .processes()
            .values()
            // On Linux every thread shows up as its own entry.
            .filter(|p| p.thread_kind().is_none())
            .map(|p| {
                ProcessRecord::new(
                    p.pid().as_u32(),
                    p.name().to_string_lossy(),
                    readable_exe(p.exe()),
                )
            })
            .collect();

        trace!(count = records.len(), "enumerated processes via sysinfo");
        Ok(records)
    }

    fn exe_path(&self, pid: u32) -> Option<PathBuf> {
        let pid = Pid::from_u32(pid);
        let mut system = self.system();
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            Self::refresh_kind(),
        );
        system.process(pid).and_then(|p| readable_exe(p.exe()))
    }
}
