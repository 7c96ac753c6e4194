// src/receive/importer.rs

//! Target-side import/reload of editor code.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing::{debug, info, warn};

use super::registry::{ExtensionModule, ModuleRegistry, SceneHandle};
use crate::errors::{BridgeError, Result};
use crate::fs::{FileSystem, read_text};

/// The host runtime's import mechanism.
pub trait ModuleFinder {
    /// Load `name` for the first time.
    ///
    /// Must return [`BridgeError::ModuleNotFound`] when the module does not
    /// exist; that case is recovered through the file fallback. Any other
    /// error is passed on to the caller.
    fn find(&mut self, name: &str) -> Result<Box<dyn ExtensionModule>>;
}

/// Services the host application exposes to received code.
pub trait ScriptHost {
    /// Execute `source` in the host's global execution context.
    fn exec_source(&mut self, source: &str, origin: &Path) -> anyhow::Result<()>;

    /// The scene currently open in the host, if any.
    fn current_scene(&self) -> Option<SceneHandle>;
}

/// How an import request was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    /// Module was already loaded and got reloaded in place.
    Reloaded,
    /// Module was loaded fresh through the finder.
    Imported,
    /// Module was not found; the fallback file was executed instead.
    ExecutedFile,
    /// The fallback file did not exist.
    FileMissing,
    /// Module was not found and no fallback file was given.
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    pub outcome: ImportOutcome,
    /// Whether the module's entry point was called afterwards.
    pub ran_entry_point: bool,
}

/// Receive side of the bridge: a module registry plus the host services it
/// needs.
pub struct Receiver<F, H> {
    registry: ModuleRegistry,
    finder: F,
    host: H,
    fs: Arc<dyn FileSystem>,
}

impl<F: ModuleFinder, H: ScriptHost> Receiver<F, H> {
    pub fn new(finder: F, host: H, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            registry: ModuleRegistry::new(),
            finder,
            host,
            fs,
        }
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ModuleRegistry {
        &mut self.registry
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn finder_mut(&mut self) -> &mut F {
        &mut self.finder
    }

    /// Entry point referenced by synthesized commands.
    ///
    /// An empty `module_path` means "just run the file".
    pub fn receive(&mut self, module_path: &str, file_path: &str) -> Result<ImportReport> {
        let file = (!file_path.is_empty()).then(|| Path::new(file_path));

        if module_path.is_empty() {
            let outcome = match file {
                Some(path) => self.read_file(path)?,
                None => {
                    warn!("receive called without a module or a file");
                    ImportOutcome::NotFound
                }
            };
            return Ok(ImportReport {
                outcome,
                ran_entry_point: false,
            });
        }

        self.import_module(module_path, file)
    }

    /// Make sure `module_name` runs its latest code, then call its entry
    /// point.
    ///
    /// 1. Already registered: reload in place (the file is never consulted).
    /// 2. Otherwise import through the finder; when it is not found and a
    ///    `file_path` is given, execute that file instead.
    /// 3. If the module is registered now, run its entry point.
    pub fn import_module(
        &mut self,
        module_name: &str,
        file_path: Option<&Path>,
    ) -> Result<ImportReport> {
        let outcome = if let Some(module) = self.registry.get_mut(module_name) {
            info!(module = module_name, "reloading module");
            module
                .reload()
                .map_err(|source| BridgeError::ImportFailed {
                    module: module_name.to_string(),
                    source,
                })?;
            ImportOutcome::Reloaded
        } else {
            info!(module = module_name, "attempting module import");
            match self.finder.find(module_name) {
                Ok(module) => {
                    self.registry.insert(module_name, module);
                    ImportOutcome::Imported
                }
                Err(BridgeError::ModuleNotFound(_)) => match file_path {
                    Some(path) => {
                        debug!(module = module_name, file = ?path, "module not found; falling back to file");
                        self.read_file(path)?
                    }
                    None => {
                        warn!(module = module_name, "module not found and no file to fall back to");
                        ImportOutcome::NotFound
                    }
                },
                Err(e) => return Err(e),
            }
        };

        let ran_entry_point = self.post_module_import(module_name)?;
        Ok(ImportReport {
            outcome,
            ran_entry_point,
        })
    }

    /// Execute the contents of `path` in the host's global context.
    pub fn read_file(&mut self, path: &Path) -> Result<ImportOutcome> {
        if !self.fs.exists(path) {
            warn!(file = ?path, "no temp file exists");
            return Ok(ImportOutcome::FileMissing);
        }

        info!(file = ?path, "executing code from file");
        let source = read_text(self.fs.as_ref(), path)?;
        self.host
            .exec_source(&source, path)
            .with_context(|| format!("executing {:?}", path))?;
        Ok(ImportOutcome::ExecutedFile)
    }

    /// Call the entry point of `module_name` if it is registered and has one.
    ///
    /// Returns whether an entry point ran.
    fn post_module_import(&mut self, module_name: &str) -> Result<bool> {
        let scene = self.host.current_scene();
        let Some(module) = self.registry.get_mut(module_name) else {
            return Ok(false);
        };
        let Some(entry) = module.entry_point() else {
            debug!(module = module_name, "module has no entry point");
            return Ok(false);
        };

        debug!(module = module_name, wants_scene = entry.wants_scene(), "calling entry point");
        entry
            .invoke(scene.as_ref())
            .with_context(|| format!("running entry point of module '{}'", module_name))?;
        Ok(true)
    }
}
