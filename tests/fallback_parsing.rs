// tests/fallback_parsing.rs

mod common;
use crate::common::{FakeCommandRunner, FakeResponse, init_tracing};

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use wingbridge::locate::fallback::{
    FallbackCliEnumerator, FallbackPlatform, parse_ps_output, parse_tasklist_csv,
};
use wingbridge::locate::{ProcessEnumerator, ProcessLocator, ProcessRecord};
use wingbridge::types::EnumerationBackend;

type TestResult = Result<(), Box<dyn Error>>;

const TASKLIST: &str = "\
\"System Idle Process\",\"0\",\"Services\",\"0\",\"8 K\"
\"explorer.exe\",\"5120\",\"Console\",\"1\",\"120,332 K\"
\"cascadeur.exe\",\"4242\",\"Console\",\"1\",\"1,204,556 K\"
";

#[test]
fn tasklist_rows_become_records() {
    let records = parse_tasklist_csv(TASKLIST);
    assert_eq!(
        records,
        vec![
            ProcessRecord::new(0, "System Idle Process", None),
            ProcessRecord::new(5120, "explorer.exe", None),
            ProcessRecord::new(4242, "cascadeur.exe", None),
        ]
    );
}

#[test]
fn tasklist_info_line_is_not_a_process() {
    let out = "INFO: No tasks are running which match the specified criteria.\r\n";
    assert!(parse_tasklist_csv(out).is_empty());
    assert!(parse_tasklist_csv("").is_empty());
}

#[test]
fn tasklist_handles_crlf_line_endings() {
    let out = "\"cascadeur.exe\",\"4242\",\"Console\",\"1\",\"10 K\"\r\n\"a.exe\",\"7\",\"Console\",\"1\",\"1 K\"\r\n";
    let pids: Vec<u32> = parse_tasklist_csv(out).iter().map(|r| r.pid).collect();
    assert_eq!(pids, vec![4242, 7]);
}

#[test]
fn ps_output_on_linux_has_bare_names() {
    let out = "    1 systemd\n  812 sshd\n 4242 cascadeur\n";
    assert_eq!(
        parse_ps_output(out),
        vec![
            ProcessRecord::new(1, "systemd", None),
            ProcessRecord::new(812, "sshd", None),
            ProcessRecord::new(4242, "cascadeur", None),
        ]
    );
}

#[test]
fn ps_output_on_macos_carries_paths() {
    let out = "  301 /Applications/Cascadeur.app/Contents/MacOS/cascadeur\n  302 /usr/sbin/cfprefsd\n";
    let records = parse_ps_output(out);

    assert_eq!(records[0].name, "cascadeur");
    assert_eq!(
        records[0].exe,
        Some(PathBuf::from(
            "/Applications/Cascadeur.app/Contents/MacOS/cascadeur"
        ))
    );
    assert_eq!(records[1].name, "cfprefsd");
}

#[test]
fn ps_header_and_garbage_lines_are_skipped() {
    let out = "  PID COMMAND\nnot-a-pid thing\n   42\n   43 kworker/0:1\n";
    assert_eq!(
        parse_ps_output(out),
        vec![ProcessRecord::new(43, "kworker/0:1", None)]
    );
}

#[test]
fn windows_fallback_uses_tasklist_and_powershell() -> TestResult {
    init_tracing();

    let runner = FakeCommandRunner::succeeding();
    runner.push(FakeResponse::ok(TASKLIST));
    runner.push(FakeResponse::ok(
        "C:\\Program Files\\Cascadeur\\cascadeur.exe\r\n",
    ));

    let enumerator =
        FallbackCliEnumerator::for_platform(Arc::new(runner.clone()), FallbackPlatform::Windows);
    let locator = ProcessLocator::new(EnumerationBackend::FallbackCli, Box::new(enumerator));

    assert_eq!(
        locator.find_executable_paths_by_name("cascadeur.exe"),
        vec![PathBuf::from("C:\\Program Files\\Cascadeur\\cascadeur.exe")]
    );

    let calls = runner.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].program, PathBuf::from("tasklist"));
    assert_eq!(calls[0].args, vec!["/FO", "CSV", "/NH"]);
    assert_eq!(calls[1].program, PathBuf::from("powershell.exe"));
    assert!(calls[1].args.last().ok_or("no query")?.contains("ProcessId=4242"));
    Ok(())
}

#[test]
fn windows_exe_lookup_with_empty_answer_is_none() {
    init_tracing();

    let runner = FakeCommandRunner::with_default(FakeResponse::ok("\r\n"));
    let enumerator =
        FallbackCliEnumerator::for_platform(Arc::new(runner), FallbackPlatform::Windows);
    assert_eq!(enumerator.exe_path(4242), None);
}

#[test]
fn macos_exe_lookup_accepts_only_absolute_paths() {
    init_tracing();

    let runner = FakeCommandRunner::succeeding();
    runner.push(FakeResponse::ok("/Applications/Cascadeur.app/Contents/MacOS/cascadeur\n"));
    runner.push(FakeResponse::ok("cascadeur\n"));

    let enumerator =
        FallbackCliEnumerator::for_platform(Arc::new(runner.clone()), FallbackPlatform::MacOs);
    assert_eq!(
        enumerator.exe_path(301),
        Some(PathBuf::from(
            "/Applications/Cascadeur.app/Contents/MacOS/cascadeur"
        ))
    );
    assert_eq!(enumerator.exe_path(301), None);
    assert_eq!(runner.calls()[0].args, vec!["-o", "comm=", "-p", "301"]);
}

#[test]
fn failing_listing_tool_reads_as_no_processes() {
    init_tracing();

    let runner = FakeCommandRunner::with_default(FakeResponse::exit(1, "Access denied"));
    let enumerator =
        FallbackCliEnumerator::for_platform(Arc::new(runner.clone()), FallbackPlatform::Linux);
    assert!(enumerator.processes().is_err());

    let locator = ProcessLocator::new(EnumerationBackend::FallbackCli, Box::new(enumerator));
    assert!(locator.processes().is_empty());
    assert_eq!(locator.process_id("cascadeur"), None);
}

#[test]
fn missing_listing_tool_reads_as_no_processes() {
    init_tracing();

    let runner =
        FakeCommandRunner::with_default(FakeResponse::SpawnError(std::io::ErrorKind::NotFound));
    let enumerator =
        FallbackCliEnumerator::for_platform(Arc::new(runner), FallbackPlatform::MacOs);
    let locator = ProcessLocator::new(EnumerationBackend::FallbackCli, Box::new(enumerator));

    assert!(locator.find_executable_paths_by_name("cascadeur").is_empty());
}
