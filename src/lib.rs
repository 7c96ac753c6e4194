// src/lib.rs

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod locate;
pub mod logging;
pub mod receive;
pub mod types;

use std::io::Read;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, info};

use crate::cli::{CliArgs, Command, SendArgs, TargetArgs};
use crate::config::{ConfigFile, load_or_default};
use crate::dispatch::{CommandPayload, DispatchHub, Dispatcher};
use crate::exec::{CommandRunner, ProcessRunner};
use crate::fs::{RealFileSystem, write_temp_file};
use crate::locate::{ProcessLocator, ProcessRecord};
use crate::types::EnumerationBackend;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - backend probing and the process locator
/// - the adapters of this session
///
/// Returns `Ok(false)` when the command ran but did not achieve its goal
/// (target not running, delivery failed, nothing found), so the caller can
/// turn it into a non-zero exit code.
pub fn run(args: CliArgs) -> Result<bool> {
    let cfg = load_or_default(args.config.as_deref())?;

    if args.dry_run {
        print_dry_run(&cfg, &args);
        return Ok(true);
    }

    let forced = args.backend.or(cfg.locator.backend);

    match args.command {
        Command::Status => {
            let (runner, locator) = system_locator(forced);
            let mut hub = DispatchHub::from_config(&cfg, Arc::clone(&locator), runner);
            print_status(&mut hub, &locator);
            Ok(true)
        }
        Command::Locate { name } => {
            let (_, locator) = system_locator(forced);
            let pid = locator.process_id(&name);
            match pid {
                Some(pid) => println!("pid: {pid}"),
                None => println!("pid: none"),
            }
            for path in locator.find_executable_paths_by_name(&name) {
                println!("exe: {}", path.display());
            }
            Ok(pid.is_some())
        }
        Command::ExePath { pid } => {
            let (_, locator) = system_locator(forced);
            match locator.get_exe_path_from_pid(pid) {
                Some(path) => {
                    println!("{}", path.display());
                    Ok(true)
                }
                None => Ok(false),
            }
        }
        Command::Send(send) => {
            let payload = build_payload(&send)?;
            let (runner, locator) = system_locator(forced);
            let mut hub = DispatchHub::from_config(&cfg, Arc::clone(&locator), runner);
            let Some(dispatcher) = select_dispatcher(&mut hub, &locator, &send.target)? else {
                return Ok(false);
            };
            Ok(dispatcher.send(&payload))
        }
        Command::Exec { target, command } => {
            let (runner, locator) = system_locator(forced);
            let mut hub = DispatchHub::from_config(&cfg, Arc::clone(&locator), runner);
            let Some(dispatcher) = select_dispatcher(&mut hub, &locator, &target)? else {
                return Ok(false);
            };
            Ok(dispatcher.send_python_command(&command))
        }
        Command::WriteTemp { target, text } => write_temp(&cfg, &target, text),
    }
}

/// Real process runner plus a locator for the forced or probed backend.
fn system_locator(
    forced: Option<EnumerationBackend>,
) -> (Arc<dyn CommandRunner>, Arc<ProcessLocator>) {
    let runner: Arc<dyn CommandRunner> = Arc::new(ProcessRunner);
    let locator = Arc::new(ProcessLocator::for_system(forced, Arc::clone(&runner)));
    (runner, locator)
}

/// Pick the adapter for a send: claim `--pid` first, then honour
/// `--adapter`, then fall back to the hub's own resolution.
fn select_dispatcher<'a>(
    hub: &'a mut DispatchHub,
    locator: &ProcessLocator,
    target: &TargetArgs,
) -> Result<Option<&'a mut dyn Dispatcher>> {
    if let Some(pid) = target.pid {
        let record = locator
            .processes()
            .into_iter()
            .find(|r| r.pid == pid)
            .unwrap_or_else(|| ProcessRecord::new(pid, String::new(), None));
        if hub.claim(&record).is_none() {
            info!(pid, "no adapter owns the given process");
        }
    }

    if let Some(ref name) = target.adapter {
        if !hub.activate(name) {
            return Err(anyhow!("unknown adapter '{name}'"));
        }
    }

    let dispatcher = hub.resolve();
    if dispatcher.is_none() {
        eprintln!("no adapter can dispatch; is the target application running?");
    }
    Ok(dispatcher)
}

fn build_payload(send: &SendArgs) -> Result<CommandPayload> {
    let text = if send.stdin {
        read_stdin()?
    } else {
        send.text.clone().unwrap_or_default()
    };

    Ok(CommandPayload {
        highlighted_text: text,
        module_path: send.module_path.clone(),
        file_path: send.file_path.clone(),
        doc_type: send.doc_type.clone(),
    })
}

fn write_temp(cfg: &ConfigFile, target: &TargetArgs, text: Option<String>) -> Result<bool> {
    let name = target
        .adapter
        .clone()
        .or_else(|| cfg.dispatch.default_adapter.clone())
        .or_else(|| cfg.adapter.keys().next().cloned())
        .ok_or_else(|| anyhow!("no adapters configured"))?;
    let adapter = cfg
        .adapter
        .get(&name)
        .ok_or_else(|| anyhow!("unknown adapter '{name}'"))?;

    let text = match text {
        Some(text) => text,
        None => read_stdin()?,
    };

    let path = write_temp_file(&RealFileSystem, &adapter.temp_filename, &text)?;
    println!("{path}");
    Ok(true)
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("reading text from stdin")?;
    Ok(text)
}

fn print_status(hub: &mut DispatchHub, locator: &ProcessLocator) {
    println!("wingbridge status");
    println!("  locator.backend = {}", locator.backend());
    println!();

    let names: Vec<String> = hub.names().map(|s| s.to_string()).collect();
    println!("adapters ({}):", names.len());
    for name in names {
        if let Some(dispatcher) = hub.get_mut(&name) {
            let ready = dispatcher.can_dispatch();
            println!("  - {name}: {}", if ready { "ready" } else { "not running" });
        }
    }
}

/// Dry-run output: resolved config, no process lookups.
fn print_dry_run(cfg: &ConfigFile, args: &CliArgs) {
    println!("wingbridge dry-run");
    match args.backend.or(cfg.locator.backend) {
        Some(backend) => println!("  locator.backend = {backend}"),
        None => println!("  locator.backend = (probe)"),
    }
    if let Some(ref default) = cfg.dispatch.default_adapter {
        println!("  dispatch.default_adapter = {default}");
    }
    println!();

    println!("adapters ({}):", cfg.adapter.len());
    for (name, adapter) in cfg.adapter.iter() {
        println!("  - {name}");
        println!("      kind: {:?}", adapter.kind);
        println!("      process_name: {}", adapter.process_name);
        println!("      match_substring: {}", adapter.match_substring);
        println!("      run_flag: {}", adapter.run_flag);
        println!("      temp_filename: {}", adapter.temp_filename);
        println!(
            "      receive: import {}; {}(...)",
            adapter.receive_module, adapter.receive_function
        );
    }

    debug!("dry-run complete (no process lookups)");
}
