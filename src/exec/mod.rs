// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`runner`] provides the `CommandRunner` trait and the concrete
//!   `ProcessRunner` used in production, which tests replace with a fake.

pub mod runner;

pub use runner::{CommandOutput, CommandRunner, ProcessRunner};
