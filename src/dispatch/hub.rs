// src/dispatch/hub.rs

//! The set of adapters of one editor session.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::Dispatcher;
use super::cascadeur::CascadeurDispatcher;
use super::command::CommandPayload;
use crate::config::{AdapterConfig, ConfigFile};
use crate::exec::CommandRunner;
use crate::locate::{ProcessLocator, ProcessRecord};
use crate::types::AdapterKind;

/// Build the adapter for one `[adapter.<name>]` entry.
pub fn build_dispatcher(
    name: &str,
    settings: &AdapterConfig,
    locator: Arc<ProcessLocator>,
    runner: Arc<dyn CommandRunner>,
) -> Box<dyn Dispatcher> {
    match settings.kind {
        AdapterKind::Cascadeur => Box::new(CascadeurDispatcher::new(
            name,
            settings.clone(),
            locator,
            runner,
        )),
    }
}

/// Owns the adapters and tracks which one is active.
///
/// Resolution order when sending:
/// 1. the active adapter (set by [`DispatchHub::claim`] or
///    [`DispatchHub::activate`]),
/// 2. the configured default adapter,
/// 3. the first adapter whose `can_dispatch()` is true.
#[derive(Debug, Default)]
pub struct DispatchHub {
    dispatchers: Vec<Box<dyn Dispatcher>>,
    active: Option<usize>,
    default_adapter: Option<String>,
}

impl DispatchHub {
    pub fn new(dispatchers: Vec<Box<dyn Dispatcher>>) -> Self {
        Self {
            dispatchers,
            active: None,
            default_adapter: None,
        }
    }

    /// One adapter per `[adapter.<name>]`, in name order.
    pub fn from_config(
        cfg: &ConfigFile,
        locator: Arc<ProcessLocator>,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        let dispatchers = cfg
            .adapter
            .iter()
            .map(|(name, settings)| {
                build_dispatcher(name, settings, Arc::clone(&locator), Arc::clone(&runner))
            })
            .collect();

        Self {
            dispatchers,
            active: None,
            default_adapter: cfg.dispatch.default_adapter.clone(),
        }
    }

    pub fn with_default(mut self, name: impl Into<String>) -> Self {
        self.default_adapter = Some(name.into());
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.dispatchers.iter().map(|d| d.name())
    }

    pub fn len(&self) -> usize {
        self.dispatchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dispatchers.is_empty()
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut dyn Dispatcher> {
        let idx = self.index_of(name)?;
        Some(self.dispatchers[idx].as_mut())
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active.map(|i| self.dispatchers[i].name())
    }

    /// Make `name` the active adapter. Returns false for unknown names.
    pub fn activate(&mut self, name: &str) -> bool {
        match self.index_of(name) {
            Some(idx) => {
                self.active = Some(idx);
                true
            }
            None => false,
        }
    }

    /// Offer an externally connected process to every adapter.
    ///
    /// The first adapter that owns it becomes active; its name is returned.
    /// When nobody owns it the active adapter is left as it was.
    pub fn claim(&mut self, process: &ProcessRecord) -> Option<&str> {
        let idx = self
            .dispatchers
            .iter_mut()
            .position(|d| d.owns_process(process));

        match idx {
            Some(idx) => {
                self.active = Some(idx);
                let name = self.dispatchers[idx].name();
                info!(adapter = name, pid = process.pid, process = %process.name, "adapter claimed process");
                Some(name)
            }
            None => {
                debug!(pid = process.pid, process = %process.name, "no adapter owns process");
                None
            }
        }
    }

    /// The adapter that should receive the next payload.
    pub fn resolve(&mut self) -> Option<&mut dyn Dispatcher> {
        let idx = match self.active {
            Some(idx) => Some(idx),
            None => self
                .default_adapter
                .as_deref()
                .and_then(|name| self.index_of(name))
                .or_else(|| self.dispatchers.iter_mut().position(|d| d.can_dispatch())),
        }?;
        Some(self.dispatchers[idx].as_mut())
    }

    /// Send `payload` through the resolved adapter.
    pub fn send(&mut self, payload: &CommandPayload) -> bool {
        match self.resolve() {
            Some(dispatcher) => dispatcher.send(payload),
            None => {
                warn!("no adapter can dispatch; is the target application running?");
                false
            }
        }
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.dispatchers.iter().position(|d| d.name() == name)
    }
}
