// tests/cli_args.rs

mod common;
use crate::common::init_tracing;

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use wingbridge::cli::{CliArgs, Command};
use wingbridge::types::EnumerationBackend;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn send_with_module_and_file() -> TestResult {
    let args = CliArgs::try_parse_from([
        "wingbridge",
        "send",
        "--module",
        "tools.rig",
        "--file",
        "/tmp/rig.py",
        "--pid",
        "4242",
    ])?;

    let Command::Send(send) = args.command else {
        return Err("expected send".into());
    };
    assert_eq!(send.module_path, "tools.rig");
    assert_eq!(send.file_path, "/tmp/rig.py");
    assert_eq!(send.target.pid, Some(4242));
    assert_eq!(send.text, None);
    assert!(!send.stdin);
    Ok(())
}

#[test]
fn text_and_stdin_conflict() {
    let result = CliArgs::try_parse_from(["wingbridge", "send", "--text", "x", "--stdin"]);
    assert!(result.is_err());
}

#[test]
fn global_flags_after_subcommand() -> TestResult {
    let args = CliArgs::try_parse_from([
        "wingbridge",
        "locate",
        "cascadeur.exe",
        "--backend",
        "fallback",
        "--config",
        "demos/Wingbridge.toml",
    ])?;

    assert_eq!(args.backend, Some(EnumerationBackend::FallbackCli));
    assert_eq!(args.config, Some(PathBuf::from("demos/Wingbridge.toml")));
    assert!(matches!(args.command, Command::Locate { ref name } if name == "cascadeur.exe"));
    Ok(())
}

#[test]
fn invalid_backend_is_rejected() {
    let result = CliArgs::try_parse_from(["wingbridge", "--backend", "magic", "status"]);
    assert!(result.is_err());
}

#[test]
fn exec_takes_raw_command() -> TestResult {
    let args = CliArgs::try_parse_from([
        "wingbridge",
        "exec",
        "--adapter",
        "cascadeur",
        "print('a & b')",
    ])?;

    match args.command {
        Command::Exec { target, command } => {
            assert_eq!(target.adapter.as_deref(), Some("cascadeur"));
            assert_eq!(command, "print('a & b')");
        }
        other => return Err(format!("unexpected command {other:?}").into()),
    }
    Ok(())
}

#[test]
fn dry_run_with_demo_config_touches_no_processes() -> TestResult {
    init_tracing();

    let config = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/Wingbridge.toml");
    let args = CliArgs::try_parse_from([
        "wingbridge".into(),
        "--dry-run".into(),
        "--config".into(),
        config.into_os_string(),
        "status".into(),
    ])?;

    assert!(wingbridge::run(args)?);
    Ok(())
}
