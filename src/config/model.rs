// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::types::{AdapterKind, EnumerationBackend};

/// Name under which the built-in Cascadeur adapter is registered when the
/// config does not declare any adapter.
pub const DEFAULT_ADAPTER_NAME: &str = "cascadeur";

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [locator]
/// backend = "native"
///
/// [dispatch]
/// default_adapter = "cascadeur"
///
/// [adapter.cascadeur]
/// kind = "cascadeur"
/// process_name = "cascadeur.exe"
/// ```
///
/// All sections are optional and have reasonable defaults. This is the
/// unvalidated form; convert it with `ConfigFile::try_from`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    /// `[locator]` section.
    #[serde(default)]
    pub locator: LocatorSection,

    /// `[dispatch]` section.
    #[serde(default)]
    pub dispatch: DispatchSection,

    /// All adapters from `[adapter.<name>]`.
    #[serde(default)]
    pub adapter: BTreeMap<String, AdapterConfig>,
}

/// Validated configuration.
///
/// Only constructible through validation (see `validate.rs`), so holders of a
/// `ConfigFile` can rely on every adapter entry being usable.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub locator: LocatorSection,
    pub dispatch: DispatchSection,
    pub adapter: BTreeMap<String, AdapterConfig>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        locator: LocatorSection,
        dispatch: DispatchSection,
        adapter: BTreeMap<String, AdapterConfig>,
    ) -> Self {
        Self {
            locator,
            dispatch,
            adapter,
        }
    }

    /// Built-in configuration: automatic backend probing and a single
    /// Cascadeur adapter.
    pub fn builtin() -> Self {
        let mut adapter = BTreeMap::new();
        adapter.insert(DEFAULT_ADAPTER_NAME.to_string(), AdapterConfig::default());
        Self::new_unchecked(LocatorSection::default(), DispatchSection::default(), adapter)
    }
}

/// `[locator]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LocatorSection {
    /// Force a specific enumeration backend. When absent the backend is
    /// probed at startup.
    #[serde(default)]
    pub backend: Option<EnumerationBackend>,
}

/// `[dispatch]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DispatchSection {
    /// Adapter to use when the caller does not name one and no adapter has
    /// claimed a process. It is used even when its application is not
    /// running. Only without a default is the first adapter that can
    /// dispatch picked.
    #[serde(default)]
    pub default_adapter: Option<String>,
}

/// `[adapter.<name>]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct AdapterConfig {
    #[serde(default)]
    pub kind: AdapterKind,

    /// Exact process name matched during enumeration.
    #[serde(default = "default_process_name")]
    pub process_name: String,

    /// Substring that marks an externally supplied process as ours
    /// (case-sensitive).
    #[serde(default = "default_match_substring")]
    pub match_substring: String,

    /// Flag passed to the target executable before the command string.
    #[serde(default = "default_run_flag")]
    pub run_flag: String,

    /// File name (not path) of this adapter's temp file.
    #[serde(default = "default_temp_filename")]
    pub temp_filename: String,

    /// Module imported by the synthesized receive command.
    #[serde(default = "default_receive_module")]
    pub receive_module: String,

    /// Fully-qualified receive function called by the synthesized command.
    ///
    /// Nothing in this crate provides it: the host-side Python shim must be
    /// installed in the target as `receive_module` and expose this function,
    /// forwarding to `Receiver::receive`. Point both fields at your own shim
    /// if it lives elsewhere.
    #[serde(default = "default_receive_function")]
    pub receive_function: String,
}

fn default_process_name() -> String {
    if cfg!(windows) {
        "cascadeur.exe".to_string()
    } else {
        "cascadeur".to_string()
    }
}

fn default_match_substring() -> String {
    "cascadeur".to_string()
}

fn default_run_flag() -> String {
    "--run-python-code".to_string()
}

fn default_temp_filename() -> String {
    "cascadeur_code.txt".to_string()
}

fn default_receive_module() -> String {
    "wingbridge".to_string()
}

fn default_receive_function() -> String {
    "wingbridge.cascadeur.receive".to_string()
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            kind: AdapterKind::default(),
            process_name: default_process_name(),
            match_substring: default_match_substring(),
            run_flag: default_run_flag(),
            temp_filename: default_temp_filename(),
            receive_module: default_receive_module(),
            receive_function: default_receive_function(),
        }
    }
}
