// src/locate/mod.rs

//! Process discovery.
//!
//! Finds the PID and executable path of a named running process. The
//! enumeration itself is pluggable:
//!
//! - [`native`] enumerates in-process through `sysinfo`.
//! - [`fallback`] shells out to TASKLIST / `ps` / PowerShell and parses text.
//! - [`probe`] decides at startup which of the two is usable and builds the
//!   matching [`ProcessEnumerator`].
//!
//! [`locator::ProcessLocator`] implements the name / PID queries on top of
//! whichever enumerator it is given.

pub mod fallback;
pub mod locator;
pub mod native;
pub mod probe;

use std::fmt::Debug;
use std::path::PathBuf;

use crate::errors::Result;

pub use fallback::FallbackCliEnumerator;
pub use locator::ProcessLocator;
pub use native::NativeEnumerator;
pub use probe::{UnavailableEnumerator, build_enumerator, probe_backend};

/// A running process as seen at lookup time. Never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    pub pid: u32,
    /// Executable path, when the enumerator could read it cheaply.
    pub exe: Option<PathBuf>,
    pub name: String,
}

impl ProcessRecord {
    pub fn new(pid: u32, name: impl Into<String>, exe: Option<PathBuf>) -> Self {
        Self {
            pid,
            exe,
            name: name.into(),
        }
    }
}

/// Source of process information.
pub trait ProcessEnumerator: Send + Sync + Debug {
    /// Snapshot of the running processes.
    ///
    /// Processes that vanish or deny access while being read are left out
    /// rather than failing the whole call.
    fn processes(&self) -> Result<Vec<ProcessRecord>>;

    /// Executable path of a single process, or `None` on any failure.
    fn exe_path(&self, pid: u32) -> Option<PathBuf>;
}
