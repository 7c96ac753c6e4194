// src/dispatch/cascadeur.rs

//! Adapter for the Cascadeur animation tool.
//!
//! Code is delivered by running a second `cascadeur` process with
//! `--run-python-code <command>`, which forwards the command to the running
//! instance and exits.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::Dispatcher;
use super::command::{CommandPayload, build_receive_command};
use crate::config::AdapterConfig;
use crate::exec::CommandRunner;
use crate::locate::{ProcessLocator, ProcessRecord};

#[derive(Debug)]
pub struct CascadeurDispatcher {
    name: String,
    settings: AdapterConfig,
    locator: Arc<ProcessLocator>,
    runner: Arc<dyn CommandRunner>,
    /// PID handed over by the editor through `owns_process`.
    known_pid: Option<u32>,
}

impl CascadeurDispatcher {
    pub fn new(
        name: impl Into<String>,
        settings: AdapterConfig,
        locator: Arc<ProcessLocator>,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        Self {
            name: name.into(),
            settings,
            locator,
            runner,
            known_pid: None,
        }
    }

    pub fn settings(&self) -> &AdapterConfig {
        &self.settings
    }

    /// PID cached by the last successful `owns_process`, if still valid.
    pub fn known_pid(&self) -> Option<u32> {
        self.known_pid
    }

    /// Executable path of the running instance.
    ///
    /// Tries the cached PID first and forgets it if it no longer resolves.
    /// Otherwise the first process named exactly `process_name` wins.
    pub fn get_running_path(&mut self) -> Option<PathBuf> {
        if let Some(pid) = self.known_pid {
            match self.locator.get_exe_path_from_pid(pid) {
                Some(path) => return Some(path),
                None => {
                    debug!(adapter = %self.name, pid, "cached pid is stale; clearing");
                    self.known_pid = None;
                }
            }
        }

        self.locator
            .find_executable_paths_by_name(&self.settings.process_name)
            .into_iter()
            .next()
    }

    /// Command that makes the target call back into the receive entry point.
    pub fn receive_command(&self, module_path: &str, file_path: &str) -> String {
        build_receive_command(
            &self.settings.receive_module,
            &self.settings.receive_function,
            module_path,
            file_path,
        )
    }
}

impl Dispatcher for CascadeurDispatcher {
    fn name(&self) -> &str {
        &self.name
    }

    fn temp_filename(&self) -> &str {
        &self.settings.temp_filename
    }

    fn can_dispatch(&mut self) -> bool {
        self.get_running_path().is_some()
    }

    fn owns_process(&mut self, process: &ProcessRecord) -> bool {
        let owned = process.name.contains(&self.settings.match_substring);
        if owned {
            debug!(adapter = %self.name, pid = process.pid, "claimed process");
            self.known_pid = Some(process.pid);
        }
        owned
    }

    fn send(&mut self, payload: &CommandPayload) -> bool {
        let command = if payload.has_selection() {
            payload.highlighted_text.clone()
        } else {
            self.receive_command(&payload.module_path, &payload.file_path)
        };

        debug!(
            adapter = %self.name,
            doc_type = %payload.doc_type,
            selection = payload.has_selection(),
            "sending payload"
        );
        self.send_python_command(&command)
    }

    fn send_python_command(&mut self, command: &str) -> bool {
        let Some(exe_path) = self.get_running_path() else {
            warn!(adapter = %self.name, "no instance of {} is running", self.settings.process_name);
            return false;
        };

        let args = vec![self.settings.run_flag.clone(), command.to_string()];
        let output = match self.runner.run(&exe_path, &args) {
            Ok(output) => output,
            Err(e) => {
                warn!(adapter = %self.name, exe = ?exe_path, error = %e, "command failed to start");
                return false;
            }
        };

        if !output.stdout.trim().is_empty() {
            info!(adapter = %self.name, "stdout: {}", output.stdout.trim_end());
        }
        if !output.stderr.trim().is_empty() {
            info!(adapter = %self.name, "stderr: {}", output.stderr.trim_end());
        }

        if output.success() {
            true
        } else {
            warn!(
                adapter = %self.name,
                exit_code = ?output.code,
                stderr = %output.stderr.trim(),
                "command failed"
            );
            false
        }
    }
}
