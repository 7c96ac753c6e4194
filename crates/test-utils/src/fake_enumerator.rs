use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use wingbridge::errors::Result;
use wingbridge::locate::{ProcessEnumerator, ProcessRecord};

/// A fake process table.
///
/// Clones share the same table, so a test can keep a handle and "start" or
/// "stop" processes after the locator has been built.
#[derive(Debug, Clone, Default)]
pub struct FakeProcessEnumerator {
    table: Arc<Mutex<Vec<ProcessRecord>>>,
    /// PIDs passed to `exe_path`, in call order.
    exe_lookups: Arc<Mutex<Vec<u32>>>,
    /// When set, `processes()` fails with this message.
    failure: Arc<Mutex<Option<String>>>,
}

impl FakeProcessEnumerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_processes(records: Vec<ProcessRecord>) -> Self {
        let fake = Self::new();
        for r in records {
            fake.start(r);
        }
        fake
    }

    /// Add a process to the table.
    pub fn start(&self, record: ProcessRecord) {
        self.table.lock().unwrap().push(record);
    }

    /// Remove a process from the table.
    pub fn stop(&self, pid: u32) {
        self.table.lock().unwrap().retain(|r| r.pid != pid);
    }

    /// Make every following enumeration fail.
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    pub fn exe_lookups(&self) -> Vec<u32> {
        self.exe_lookups.lock().unwrap().clone()
    }
}

impl ProcessEnumerator for FakeProcessEnumerator {
    fn processes(&self) -> Result<Vec<ProcessRecord>> {
        if let Some(ref message) = *self.failure.lock().unwrap() {
            return Err(anyhow::anyhow!(message.clone()).into());
        }
        Ok(self.table.lock().unwrap().clone())
    }

    fn exe_path(&self, pid: u32) -> Option<PathBuf> {
        self.exe_lookups.lock().unwrap().push(pid);
        self.table
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.pid == pid)
            .and_then(|r| r.exe.clone())
    }
}
