// tests/config_loading.rs

mod common;
use crate::common::init_tracing;

use std::error::Error;
use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;
use wingbridge::config::{ConfigFile, DEFAULT_ADAPTER_NAME, load_and_validate, load_or_default};
use wingbridge::errors::BridgeError;
use wingbridge::types::{AdapterKind, EnumerationBackend};

type TestResult = Result<(), Box<dyn Error>>;

fn write_config(contents: &str) -> Result<NamedTempFile, Box<dyn Error>> {
    let mut file = NamedTempFile::new()?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(file)
}

fn demo_config_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/Wingbridge.toml")
}

#[test]
fn demo_config_loads() -> TestResult {
    init_tracing();

    let cfg = load_and_validate(demo_config_path())?;
    assert_eq!(cfg.locator.backend, Some(EnumerationBackend::Native));
    assert_eq!(cfg.dispatch.default_adapter.as_deref(), Some("cascadeur"));

    let adapter = &cfg.adapter["cascadeur"];
    assert_eq!(adapter.kind, AdapterKind::Cascadeur);
    assert_eq!(adapter.process_name, "cascadeur.exe");
    assert_eq!(adapter.run_flag, "--run-python-code");
    assert_eq!(adapter.temp_filename, "cascadeur_code.txt");
    Ok(())
}

#[test]
fn empty_file_gets_builtin_cascadeur_adapter() -> TestResult {
    let file = write_config("")?;
    let cfg = load_and_validate(file.path())?;

    assert_eq!(cfg.locator.backend, None);
    assert_eq!(cfg.dispatch.default_adapter, None);
    assert_eq!(cfg.adapter.len(), 1);

    let adapter = &cfg.adapter[DEFAULT_ADAPTER_NAME];
    assert_eq!(adapter.kind, AdapterKind::Cascadeur);
    assert_eq!(adapter.match_substring, "cascadeur");
    assert_eq!(adapter.receive_module, "wingbridge");
    assert_eq!(adapter.receive_function, "wingbridge.cascadeur.receive");
    if cfg!(windows) {
        assert_eq!(adapter.process_name, "cascadeur.exe");
    } else {
        assert_eq!(adapter.process_name, "cascadeur");
    }
    Ok(())
}

#[test]
fn adapter_fields_default_individually() -> TestResult {
    let file = write_config(
        r#"
[adapter.portable]
process_name = "cascadeur_portable"
temp_filename = "portable_code.txt"
"#,
    )?;
    let cfg = load_and_validate(file.path())?;

    assert_eq!(cfg.adapter.len(), 1);
    let adapter = &cfg.adapter["portable"];
    assert_eq!(adapter.process_name, "cascadeur_portable");
    assert_eq!(adapter.temp_filename, "portable_code.txt");
    assert_eq!(adapter.run_flag, "--run-python-code");
    Ok(())
}

#[test]
fn backend_aliases_parse_from_toml() -> TestResult {
    let cases = [
        ("fallback-cli", EnumerationBackend::FallbackCli),
        ("fallback", EnumerationBackend::FallbackCli),
        ("cli", EnumerationBackend::FallbackCli),
        ("none", EnumerationBackend::Unavailable),
        ("Native", EnumerationBackend::Native),
    ];
    for (spelling, expected) in cases {
        let file = write_config(&format!("[locator]\nbackend = \"{spelling}\"\n"))?;
        let cfg = load_and_validate(file.path())?;
        assert_eq!(cfg.locator.backend, Some(expected), "spelling {spelling:?}");
        assert_eq!(spelling.parse::<EnumerationBackend>()?, expected);
    }
    Ok(())
}

#[test]
fn unknown_backend_is_a_toml_error() -> TestResult {
    let file = write_config("[locator]\nbackend = \"magic\"\n")?;
    let err = load_and_validate(file.path());
    assert!(matches!(err, Err(BridgeError::TomlError(_))));
    Ok(())
}

#[test]
fn unknown_default_adapter_is_rejected() -> TestResult {
    let file = write_config(
        r#"
[dispatch]
default_adapter = "maya"

[adapter.cascadeur]
"#,
    )?;
    match load_and_validate(file.path()) {
        Err(BridgeError::ConfigError(msg)) => {
            assert!(msg.contains("unknown adapter 'maya'"), "unexpected: {msg}");
        }
        other => panic!("expected ConfigError, got {other:?}"),
    }
    Ok(())
}

#[test]
fn empty_process_name_is_rejected() -> TestResult {
    let file = write_config("[adapter.cascadeur]\nprocess_name = \"  \"\n")?;
    match load_and_validate(file.path()) {
        Err(BridgeError::ConfigError(msg)) => {
            assert_eq!(msg, "[adapter.cascadeur].process_name must not be empty");
        }
        other => panic!("expected ConfigError, got {other:?}"),
    }
    Ok(())
}

#[test]
fn temp_filename_with_directory_is_rejected() -> TestResult {
    let file = write_config("[adapter.cascadeur]\ntemp_filename = \"sub/code.txt\"\n")?;
    assert!(matches!(
        load_and_validate(file.path()),
        Err(BridgeError::ConfigError(_))
    ));
    Ok(())
}

#[test]
fn explicit_missing_config_is_an_io_error() {
    let missing = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("does-not-exist.toml");
    assert!(matches!(
        load_or_default(Some(&missing)),
        Err(BridgeError::IoError(_))
    ));
}

#[test]
fn builtin_matches_empty_config() -> TestResult {
    let file = write_config("")?;
    let loaded = load_and_validate(file.path())?;
    let builtin = ConfigFile::builtin();

    assert_eq!(
        builtin.adapter.keys().collect::<Vec<_>>(),
        loaded.adapter.keys().collect::<Vec<_>>()
    );
    assert_eq!(
        builtin.adapter[DEFAULT_ADAPTER_NAME].process_name,
        loaded.adapter[DEFAULT_ADAPTER_NAME].process_name
    );
    Ok(())
}
