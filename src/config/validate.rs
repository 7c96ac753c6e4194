// src/config/validate.rs

use std::path::Path;

use crate::config::model::{
    AdapterConfig, ConfigFile, DEFAULT_ADAPTER_NAME, RawConfigFile,
};
use crate::errors::{BridgeError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::BridgeError;

    fn try_from(mut raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        if raw.adapter.is_empty() {
            raw.adapter
                .insert(DEFAULT_ADAPTER_NAME.to_string(), AdapterConfig::default());
        }
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.locator, raw.dispatch, raw.adapter))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    for (name, adapter) in cfg.adapter.iter() {
        validate_adapter(name, adapter)?;
    }
    validate_default_adapter(cfg)?;
    Ok(())
}

fn validate_adapter(name: &str, adapter: &AdapterConfig) -> Result<()> {
    if name.trim().is_empty() {
        return Err(BridgeError::ConfigError(
            "adapter names must not be empty".to_string(),
        ));
    }

    let required = [
        ("process_name", &adapter.process_name),
        ("match_substring", &adapter.match_substring),
        ("run_flag", &adapter.run_flag),
        ("temp_filename", &adapter.temp_filename),
        ("receive_module", &adapter.receive_module),
        ("receive_function", &adapter.receive_function),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(BridgeError::ConfigError(format!(
                "[adapter.{name}].{field} must not be empty"
            )));
        }
    }

    // The temp file always lives in the platform temp dir.
    let temp = Path::new(&adapter.temp_filename);
    if temp.file_name().map(|f| f != temp.as_os_str()).unwrap_or(true) {
        return Err(BridgeError::ConfigError(format!(
            "[adapter.{name}].temp_filename must be a bare file name (got {:?})",
            adapter.temp_filename
        )));
    }

    Ok(())
}

fn validate_default_adapter(cfg: &RawConfigFile) -> Result<()> {
    if let Some(ref default) = cfg.dispatch.default_adapter {
        if !cfg.adapter.contains_key(default) {
            return Err(BridgeError::ConfigError(format!(
                "[dispatch].default_adapter refers to unknown adapter '{}'",
                default
            )));
        }
    }
    Ok(())
}
