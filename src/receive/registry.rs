// src/receive/registry.rs

//! Explicit registry of loaded extension modules.

use std::collections::BTreeMap;
use std::fmt;

use anyhow::Result;

/// Opaque handle to the host application's current scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneHandle(pub String);

/// A module's `run` entry point.
///
/// Entry points say up front whether they want the scene, so the helper never
/// has to inspect a callback's signature.
pub enum EntryPoint {
    /// `run()`
    Plain(Box<dyn FnMut() -> Result<()>>),
    /// `run(scene)`; receives `None` when the host has no scene to offer.
    WithScene(Box<dyn FnMut(Option<&SceneHandle>) -> Result<()>>),
}

impl EntryPoint {
    pub fn plain(f: impl FnMut() -> Result<()> + 'static) -> Self {
        EntryPoint::Plain(Box::new(f))
    }

    pub fn with_scene(f: impl FnMut(Option<&SceneHandle>) -> Result<()> + 'static) -> Self {
        EntryPoint::WithScene(Box::new(f))
    }

    pub fn wants_scene(&self) -> bool {
        matches!(self, EntryPoint::WithScene(_))
    }

    /// Call the entry point with whatever argument it declared.
    pub fn invoke(&mut self, scene: Option<&SceneHandle>) -> Result<()> {
        match self {
            EntryPoint::Plain(f) => f(),
            EntryPoint::WithScene(f) => f(scene),
        }
    }
}

impl fmt::Debug for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryPoint::Plain(_) => f.write_str("EntryPoint::Plain"),
            EntryPoint::WithScene(_) => f.write_str("EntryPoint::WithScene"),
        }
    }
}

/// A loaded, reloadable unit of extension code.
pub trait ExtensionModule {
    /// Reload the module's code in place.
    fn reload(&mut self) -> Result<()>;

    /// The module's `run` entry point, if it has one.
    fn entry_point(&mut self) -> Option<&mut EntryPoint>;
}

/// Loaded modules by name.
#[derive(Default)]
pub struct ModuleRegistry {
    modules: BTreeMap<String, Box<dyn ExtensionModule>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    /// Register `module` under `name`, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, module: Box<dyn ExtensionModule>) {
        self.modules.insert(name.into(), module);
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn ExtensionModule + 'static)> {
        self.modules.get_mut(name).map(|m| m.as_mut())
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleRegistry")
            .field("modules", &self.modules.keys().collect::<Vec<_>>())
            .finish()
    }
}
