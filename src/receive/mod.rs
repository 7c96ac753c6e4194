// src/receive/mod.rs

//! Target-side half of the bridge.
//!
//! Code sent by the editor ends up calling [`Receiver::receive`], which either
//! executes a file or imports/reloads a named module and runs its entry point.
//! Loaded modules live in an explicit [`ModuleRegistry`].

pub mod importer;
pub mod registry;

pub use importer::{ImportOutcome, ImportReport, ModuleFinder, Receiver, ScriptHost};
pub use registry::{EntryPoint, ExtensionModule, ModuleRegistry, SceneHandle};
