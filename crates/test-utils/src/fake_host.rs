use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::anyhow;
use wingbridge::errors::{BridgeError, Result};
use wingbridge::receive::{EntryPoint, ExtensionModule, ModuleFinder, SceneHandle, ScriptHost};

/// Shared log of what happened on the receive side, in order.
pub type EventLog = Rc<RefCell<Vec<String>>>;

pub fn event_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// Host that records executed sources instead of running them.
#[derive(Debug, Default)]
pub struct FakeHost {
    pub executed: Vec<(PathBuf, String)>,
    pub scene: Option<SceneHandle>,
    /// When set, `exec_source` fails.
    pub fail_exec: bool,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scene(name: &str) -> Self {
        Self {
            scene: Some(SceneHandle(name.to_string())),
            ..Self::default()
        }
    }
}

impl ScriptHost for FakeHost {
    fn exec_source(&mut self, source: &str, origin: &Path) -> anyhow::Result<()> {
        if self.fail_exec {
            return Err(anyhow!("SyntaxError in {:?}", origin));
        }
        self.executed.push((origin.to_path_buf(), source.to_string()));
        Ok(())
    }

    fn current_scene(&self) -> Option<SceneHandle> {
        self.scene.clone()
    }
}

/// Module that logs reloads and entry point calls.
pub struct FakeModule {
    name: String,
    log: EventLog,
    entry: Option<EntryPoint>,
    fail_reload: bool,
}

impl FakeModule {
    /// Module without an entry point.
    pub fn new(name: &str, log: EventLog) -> Self {
        Self {
            name: name.to_string(),
            log,
            entry: None,
            fail_reload: false,
        }
    }

    /// Module whose `run()` takes no arguments.
    pub fn with_plain_run(name: &str, log: EventLog) -> Self {
        let entry_log = Rc::clone(&log);
        let entry_name = name.to_string();
        let mut module = Self::new(name, log);
        module.entry = Some(EntryPoint::plain(move || {
            entry_log.borrow_mut().push(format!("run:{entry_name}"));
            Ok(())
        }));
        module
    }

    /// Module whose `run(scene)` wants the scene.
    pub fn with_scene_run(name: &str, log: EventLog) -> Self {
        let entry_log = Rc::clone(&log);
        let entry_name = name.to_string();
        let mut module = Self::new(name, log);
        module.entry = Some(EntryPoint::with_scene(move |scene| {
            let scene = scene.map(|s| s.0.as_str()).unwrap_or("None");
            entry_log
                .borrow_mut()
                .push(format!("run:{entry_name}:{scene}"));
            Ok(())
        }));
        module
    }

    pub fn failing_reload(mut self) -> Self {
        self.fail_reload = true;
        self
    }
}

impl ExtensionModule for FakeModule {
    fn reload(&mut self) -> anyhow::Result<()> {
        if self.fail_reload {
            return Err(anyhow!("reload of {} failed", self.name));
        }
        self.log.borrow_mut().push(format!("reload:{}", self.name));
        Ok(())
    }

    fn entry_point(&mut self) -> Option<&mut EntryPoint> {
        self.entry.as_mut()
    }
}

type ModuleFactory = Box<dyn Fn() -> FakeModule>;

/// Import mechanism that knows a fixed set of modules.
#[derive(Default)]
pub struct FakeFinder {
    available: HashMap<String, ModuleFactory>,
    broken: HashMap<String, String>,
    /// Names passed to `find`, in call order.
    pub lookups: Vec<String>,
}

impl FakeFinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn provide(mut self, name: &str, factory: impl Fn() -> FakeModule + 'static) -> Self {
        self.available.insert(name.to_string(), Box::new(factory));
        self
    }

    /// Module that exists but fails to import with `message`.
    pub fn broken(mut self, name: &str, message: &str) -> Self {
        self.broken.insert(name.to_string(), message.to_string());
        self
    }
}

impl ModuleFinder for FakeFinder {
    fn find(&mut self, name: &str) -> Result<Box<dyn ExtensionModule>> {
        self.lookups.push(name.to_string());
        if let Some(message) = self.broken.get(name) {
            return Err(BridgeError::ImportFailed {
                module: name.to_string(),
                source: anyhow!(message.clone()),
            });
        }
        match self.available.get(name) {
            Some(factory) => Ok(Box::new(factory())),
            None => Err(BridgeError::ModuleNotFound(name.to_string())),
        }
    }
}
