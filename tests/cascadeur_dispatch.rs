// tests/cascadeur_dispatch.rs

mod common;
use crate::common::builders::{AdapterConfigBuilder, CascadeurFixture, cascadeur_process};
use crate::common::{FakeCommandRunner, FakeProcessEnumerator, FakeResponse, init_tracing};

use std::io;
use std::path::PathBuf;

use wingbridge::dispatch::{CommandPayload, Dispatcher};
use wingbridge::locate::ProcessRecord;

fn idle_fixture() -> CascadeurFixture {
    CascadeurFixture::new(FakeProcessEnumerator::new(), FakeCommandRunner::succeeding())
}

fn running_fixture(runner: FakeCommandRunner) -> CascadeurFixture {
    CascadeurFixture::new(
        FakeProcessEnumerator::with_processes(vec![cascadeur_process()]),
        runner,
    )
}

#[test]
fn can_dispatch_follows_the_process_table() {
    init_tracing();

    let mut fx = idle_fixture();
    assert!(!fx.dispatcher.can_dispatch());

    fx.processes.start(cascadeur_process());
    assert!(fx.dispatcher.can_dispatch());
    assert_eq!(
        fx.dispatcher.get_running_path(),
        Some(PathBuf::from("/opt/app/cascadeur.exe"))
    );

    fx.processes.stop(4242);
    assert!(!fx.dispatcher.can_dispatch());
}

#[test]
fn process_without_readable_path_cannot_dispatch() {
    init_tracing();

    let mut fx = CascadeurFixture::new(
        FakeProcessEnumerator::with_processes(vec![ProcessRecord::new(
            4242,
            "cascadeur.exe",
            None,
        )]),
        FakeCommandRunner::succeeding(),
    );
    assert!(!fx.dispatcher.can_dispatch());
}

#[test]
fn send_python_command_without_target_does_not_spawn() {
    init_tracing();

    let mut fx = idle_fixture();
    assert!(!fx.dispatcher.send_python_command("print('hello')"));
    assert!(fx.runner.calls().is_empty());
}

#[test]
fn send_python_command_spawns_exe_with_run_flag() {
    init_tracing();

    let mut fx = running_fixture(FakeCommandRunner::succeeding());
    assert!(fx.dispatcher.send_python_command("print('hello')"));

    let calls = fx.runner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].program, PathBuf::from("/opt/app/cascadeur.exe"));
    assert_eq!(
        calls[0].args,
        vec!["--run-python-code".to_string(), "print('hello')".to_string()]
    );
}

#[test]
fn command_containing_ampersand_stays_one_argument() {
    init_tracing();

    let mut fx = running_fixture(FakeCommandRunner::succeeding());
    assert!(fx.dispatcher.send_python_command("a = 1 & 3"));
    assert_eq!(fx.runner.calls()[0].args[1], "a = 1 & 3");
}

#[test]
fn non_zero_exit_is_reported_as_failure() {
    init_tracing();

    let mut fx = running_fixture(FakeCommandRunner::with_default(FakeResponse::exit(
        120,
        "Traceback (most recent call last)",
    )));
    assert!(!fx.dispatcher.send_python_command("raise SystemExit(120)"));
    assert_eq!(fx.runner.calls().len(), 1);
}

#[test]
fn killed_process_without_exit_code_is_a_failure() {
    init_tracing();

    let mut fx = running_fixture(FakeCommandRunner::with_default(FakeResponse::Exit {
        code: None,
        stdout: String::new(),
        stderr: String::new(),
    }));
    assert!(!fx.dispatcher.send_python_command("pass"));
}

#[test]
fn spawn_error_is_reported_as_failure() {
    init_tracing();

    let mut fx = running_fixture(FakeCommandRunner::with_default(FakeResponse::SpawnError(
        io::ErrorKind::PermissionDenied,
    )));
    assert!(!fx.dispatcher.send_python_command("pass"));

    let mut fx = running_fixture(FakeCommandRunner::with_default(FakeResponse::SpawnError(
        io::ErrorKind::NotFound,
    )));
    assert!(!fx.dispatcher.send_python_command("pass"));
}

#[test]
fn send_with_selection_delivers_it_verbatim() {
    init_tracing();

    let mut fx = running_fixture(FakeCommandRunner::succeeding());
    let payload = CommandPayload::text("import csc\nprint(csc)").with_doc_type("python");

    assert!(fx.dispatcher.send(&payload));
    assert_eq!(fx.runner.calls()[0].args[1], "import csc\nprint(csc)");
}

#[test]
fn send_without_selection_calls_receive_entry_point() {
    init_tracing();

    let mut fx = running_fixture(FakeCommandRunner::succeeding());
    let payload = CommandPayload::module("tools.rig", "/home/anim/tools/rig.py");

    assert!(fx.dispatcher.send(&payload));
    assert_eq!(
        fx.runner.calls()[0].args[1],
        "import wingbridge; wingbridge.cascadeur.receive('tools.rig','/home/anim/tools/rig.py')"
    );
}

#[test]
fn receive_command_escapes_windows_paths_and_quotes() {
    let fx = idle_fixture();
    assert_eq!(
        fx.dispatcher
            .receive_command("", r"C:\Users\o'neil\AppData\Local\Temp\cascadeur_code.txt"),
        r"import wingbridge; wingbridge.cascadeur.receive('','C:\\Users\\o\'neil\\AppData\\Local\\Temp\\cascadeur_code.txt')"
    );
}

#[test]
fn receive_command_uses_configured_entry_point() {
    let settings = AdapterConfigBuilder::new()
        .receive("studio_bridge", "studio_bridge.hooks.receive")
        .build();
    let fx = CascadeurFixture::with_settings(
        settings,
        FakeProcessEnumerator::new(),
        FakeCommandRunner::succeeding(),
    );
    assert_eq!(
        fx.dispatcher.receive_command("anim.walk", ""),
        "import studio_bridge; studio_bridge.hooks.receive('anim.walk','')"
    );
}

#[test]
fn owns_process_caches_pid_on_match_only() {
    init_tracing();

    let mut fx = idle_fixture();
    assert_eq!(fx.dispatcher.known_pid(), None);

    assert!(!fx.dispatcher.owns_process(&ProcessRecord::new(11, "blender.exe", None)));
    assert_eq!(fx.dispatcher.known_pid(), None);

    assert!(fx.dispatcher.owns_process(&ProcessRecord::new(77, "cascadeur.exe", None)));
    assert_eq!(fx.dispatcher.known_pid(), Some(77));

    // A later non-match leaves the cached pid alone.
    assert!(!fx.dispatcher.owns_process(&ProcessRecord::new(12, "maya.exe", None)));
    assert_eq!(fx.dispatcher.known_pid(), Some(77));
}

#[test]
fn owns_process_is_case_sensitive_substring_match() {
    let mut fx = idle_fixture();

    assert!(!fx.dispatcher.owns_process(&ProcessRecord::new(1, "Cascadeur.exe", None)));
    assert!(fx.dispatcher.owns_process(&ProcessRecord::new(2, "cascadeur", None)));
    assert!(fx.dispatcher.owns_process(&ProcessRecord::new(3, "my-cascadeur-build.exe", None)));
    assert_eq!(fx.dispatcher.known_pid(), Some(3));
}

#[test]
fn cached_pid_is_preferred_over_name_search() {
    init_tracing();

    let helper = ProcessRecord::new(
        5000,
        "cascadeur_portable",
        Some(PathBuf::from("/opt/portable/cascadeur_portable")),
    );
    let mut fx = CascadeurFixture::new(
        FakeProcessEnumerator::with_processes(vec![cascadeur_process(), helper.clone()]),
        FakeCommandRunner::succeeding(),
    );

    assert!(fx.dispatcher.owns_process(&helper));
    assert_eq!(
        fx.dispatcher.get_running_path(),
        Some(PathBuf::from("/opt/portable/cascadeur_portable"))
    );
    assert_eq!(fx.processes.exe_lookups(), vec![5000]);
    assert_eq!(fx.dispatcher.known_pid(), Some(5000));
}

#[test]
fn stale_cached_pid_is_cleared_and_name_search_used() {
    init_tracing();

    let mut fx = running_fixture(FakeCommandRunner::succeeding());

    // Claimed process has exited since.
    assert!(fx.dispatcher.owns_process(&ProcessRecord::new(99, "cascadeur.exe", None)));
    assert_eq!(
        fx.dispatcher.get_running_path(),
        Some(PathBuf::from("/opt/app/cascadeur.exe"))
    );
    assert_eq!(fx.dispatcher.known_pid(), None);
}

#[test]
fn adapter_reports_its_temp_filename() {
    let fx = idle_fixture();
    assert_eq!(fx.dispatcher.temp_filename(), "cascadeur_code.txt");
    assert_eq!(fx.dispatcher.name(), "cascadeur");
}
