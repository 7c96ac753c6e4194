#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use wingbridge::config::{AdapterConfig, ConfigFile, RawConfigFile};
use wingbridge::dispatch::CascadeurDispatcher;
use wingbridge::locate::{ProcessLocator, ProcessRecord};
use wingbridge::types::{AdapterKind, EnumerationBackend};

use crate::fake_enumerator::FakeProcessEnumerator;
use crate::fake_runner::FakeCommandRunner;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn with_adapter(mut self, name: &str, adapter: AdapterConfig) -> Self {
        self.config.adapter.insert(name.to_string(), adapter);
        self
    }

    pub fn with_backend(mut self, backend: EnumerationBackend) -> Self {
        self.config.locator.backend = Some(backend);
        self
    }

    pub fn with_default_adapter(mut self, name: &str) -> Self {
        self.config.dispatch.default_adapter = Some(name.to_string());
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `AdapterConfig`, starting from a Cascadeur adapter that
/// matches `cascadeur.exe` on every platform.
pub struct AdapterConfigBuilder {
    adapter: AdapterConfig,
}

impl AdapterConfigBuilder {
    pub fn new() -> Self {
        Self {
            adapter: AdapterConfig {
                kind: AdapterKind::Cascadeur,
                process_name: "cascadeur.exe".to_string(),
                ..AdapterConfig::default()
            },
        }
    }

    pub fn process_name(mut self, name: &str) -> Self {
        self.adapter.process_name = name.to_string();
        self
    }

    pub fn match_substring(mut self, s: &str) -> Self {
        self.adapter.match_substring = s.to_string();
        self
    }

    pub fn run_flag(mut self, flag: &str) -> Self {
        self.adapter.run_flag = flag.to_string();
        self
    }

    pub fn temp_filename(mut self, name: &str) -> Self {
        self.adapter.temp_filename = name.to_string();
        self
    }

    pub fn receive(mut self, module: &str, function: &str) -> Self {
        self.adapter.receive_module = module.to_string();
        self.adapter.receive_function = function.to_string();
        self
    }

    pub fn build(self) -> AdapterConfig {
        self.adapter
    }
}

impl Default for AdapterConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The process from the Cascadeur scenario: pid 4242 at
/// `/opt/app/cascadeur.exe`.
pub fn cascadeur_process() -> ProcessRecord {
    ProcessRecord::new(4242, "cascadeur.exe", Some(PathBuf::from("/opt/app/cascadeur.exe")))
}

/// Locator over a fake process table.
pub fn fake_locator(enumerator: &FakeProcessEnumerator) -> Arc<ProcessLocator> {
    Arc::new(ProcessLocator::new(
        EnumerationBackend::Native,
        Box::new(enumerator.clone()),
    ))
}

/// Cascadeur adapter wired to fakes, plus the handles to inspect them.
pub struct CascadeurFixture {
    pub dispatcher: CascadeurDispatcher,
    pub processes: FakeProcessEnumerator,
    pub runner: FakeCommandRunner,
}

impl CascadeurFixture {
    pub fn new(processes: FakeProcessEnumerator, runner: FakeCommandRunner) -> Self {
        Self::with_settings(AdapterConfigBuilder::new().build(), processes, runner)
    }

    pub fn with_settings(
        settings: AdapterConfig,
        processes: FakeProcessEnumerator,
        runner: FakeCommandRunner,
    ) -> Self {
        let dispatcher = CascadeurDispatcher::new(
            "cascadeur",
            settings,
            fake_locator(&processes),
            Arc::new(runner.clone()),
        );
        Self {
            dispatcher,
            processes,
            runner,
        }
    }
}
