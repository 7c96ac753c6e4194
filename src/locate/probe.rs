// src/locate/probe.rs

//! Startup capability probing for the process locator.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use super::fallback::{FallbackCliEnumerator, FallbackPlatform};
use super::native::NativeEnumerator;
use super::{ProcessEnumerator, ProcessLocator, ProcessRecord};
use crate::errors::Result;
use crate::exec::CommandRunner;
use crate::types::EnumerationBackend;

/// Enumerator for systems where nothing works: reports no processes and no
/// paths.
#[derive(Debug, Clone, Default)]
pub struct UnavailableEnumerator;

impl ProcessEnumerator for UnavailableEnumerator {
    fn processes(&self) -> Result<Vec<ProcessRecord>> {
        Ok(Vec::new())
    }

    fn exe_path(&self, _pid: u32) -> Option<PathBuf> {
        None
    }
}

/// Decide which enumeration backend this system supports.
///
/// 1. `native` when `sysinfo` supports the platform.
/// 2. `fallback-cli` when the platform listing tool runs successfully.
/// 3. `unavailable` otherwise.
pub fn probe_backend(runner: &dyn CommandRunner) -> EnumerationBackend {
    if sysinfo::IS_SUPPORTED_SYSTEM {
        return EnumerationBackend::Native;
    }

    let (program, args) = FallbackPlatform::current().listing_command();
    match runner.run(Path::new(program), &args) {
        Ok(out) if out.success() => EnumerationBackend::FallbackCli,
        Ok(out) => {
            warn!(program, exit_code = ?out.code, "process listing tool failed; process lookup unavailable");
            EnumerationBackend::Unavailable
        }
        Err(e) => {
            warn!(program, error = %e, "process listing tool missing; process lookup unavailable");
            EnumerationBackend::Unavailable
        }
    }
}

/// Build the enumerator for `backend`.
pub fn build_enumerator(
    backend: EnumerationBackend,
    runner: Arc<dyn CommandRunner>,
) -> Box<dyn ProcessEnumerator> {
    match backend {
        EnumerationBackend::Native => Box::new(NativeEnumerator::new()),
        EnumerationBackend::FallbackCli => Box::new(FallbackCliEnumerator::new(runner)),
        EnumerationBackend::Unavailable => Box::new(UnavailableEnumerator),
    }
}

impl ProcessLocator {
    /// Build a locator for a forced backend, or probe one when `forced` is
    /// `None`.
    pub fn for_system(forced: Option<EnumerationBackend>, runner: Arc<dyn CommandRunner>) -> Self {
        let backend = match forced {
            Some(backend) => backend,
            None => probe_backend(runner.as_ref()),
        };
        info!(%backend, forced = forced.is_some(), "process locator backend selected");
        ProcessLocator::new(backend, build_enumerator(backend, runner))
    }
}
