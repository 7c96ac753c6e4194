// src/dispatch/mod.rs

//! Editor-side delivery of code to target applications.
//!
//! - [`Dispatcher`] is the contract every target-application adapter
//!   implements.
//! - [`cascadeur`] is the adapter for Cascadeur.
//! - [`command`] builds the payloads and synthesized receive commands.
//! - [`hub`] owns the adapters of one editor session and picks the active one.

pub mod cascadeur;
pub mod command;
pub mod hub;

use std::fmt::Debug;

use crate::fs::DEFAULT_TEMP_FILENAME;
use crate::locate::ProcessRecord;

pub use cascadeur::CascadeurDispatcher;
pub use command::{CommandPayload, build_receive_command, python_quote};
pub use hub::{DispatchHub, build_dispatcher};

/// Capability set of a target-application adapter.
///
/// None of the operations fail: an unreachable target shows up as `false`
/// plus a log line, never as an error, so the editor stays responsive.
pub trait Dispatcher: Debug {
    /// Name the adapter is registered under.
    fn name(&self) -> &str;

    /// File name of this adapter's temp file.
    fn temp_filename(&self) -> &str {
        DEFAULT_TEMP_FILENAME
    }

    /// True iff the target is running and its executable path resolves.
    ///
    /// Used to pick a default adapter when none is active.
    fn can_dispatch(&mut self) -> bool;

    /// True iff `process` belongs to this adapter's application family.
    ///
    /// On a match the PID is cached for later lookups; the hub also promotes
    /// the adapter to active. A non-match leaves the cache untouched.
    fn owns_process(&mut self, process: &ProcessRecord) -> bool;

    /// Deliver a payload. Returns whether the target accepted it.
    fn send(&mut self, payload: &CommandPayload) -> bool;

    /// Run `command` inside the target. True iff the target exited with
    /// status 0.
    fn send_python_command(&mut self, command: &str) -> bool;
}
