use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

// The launcher resolves scripts/ next to its own binary, so each test copies
// the built binary into a temp dir and lays the scripts out beside it.
fn install_launcher(dir: &Path) -> PathBuf {
    let built = env!("CARGO_BIN_EXE_venture");
    let installed = dir.join("venture");
    fs::copy(built, &installed).expect("copy venture binary");
    installed
}

fn write_script(base: &Path, name: &str, body: &str) {
    let scripts = base.join("scripts");
    fs::create_dir_all(&scripts).expect("create scripts dir");
    // No executable bit on purpose: scripts are arguments to bash.
    fs::write(scripts.join(format!("{}.sh", name)), format!("#!/bin/bash\n{}\n", body))
        .expect("write script");
}

fn run_with_stdin(mut cmd: Command, input: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn venture");
    child
        .stdin
        .take()
        .expect("child stdin")
        .write_all(input.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("wait for venture")
}

#[test]
fn exit_selection_ends_session_with_success() {
    let install = TempDir::new().expect("install dir");
    let launcher = install_launcher(install.path());

    let output = run_with_stdin(Command::new(&launcher), "6\n");

    assert!(output.status.success(), "status: {:?}", output.status);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("select an operation"), "stdout: {stdout:?}");
    assert!(stdout.contains("6) Exit"), "stdout: {stdout:?}");
}

#[test]
fn closed_stdin_ends_session_with_success() {
    let install = TempDir::new().expect("install dir");
    let launcher = install_launcher(install.path());

    let output = Command::new(&launcher)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("run venture");

    assert!(output.status.success(), "status: {:?}", output.status);
}

#[test]
fn missing_script_is_reported_and_the_menu_continues() {
    let install = TempDir::new().expect("install dir");
    let launcher = install_launcher(install.path());

    // doctor has no script, ENTER through the pause, then exit.
    let output = run_with_stdin(Command::new(&launcher), "doctor\n\nexit\n");

    assert!(output.status.success(), "status: {:?}", output.status);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Error: Command 'doctor' not found."),
        "stderr: {stderr:?}"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.matches("select an operation").count() >= 2,
        "expected the menu to be redrawn, stdout: {stdout:?}"
    );
}

#[test]
fn launched_script_sees_invocation_cwd_and_project_root() {
    let install = TempDir::new().expect("install dir");
    let workdir = TempDir::new().expect("work dir");
    let workdir_path = workdir.path().canonicalize().expect("canonical workdir");
    let launcher = install_launcher(install.path());

    let record = install.path().join("contract.txt");
    write_script(
        install.path(),
        "doctor",
        &format!("printf '%s\\n%s\\n' \"$PWD\" \"$VENTURE_PROJECT_ROOT\" > '{}'", record.display()),
    );
    let log_path = install.path().join("venture.log");

    let mut cmd = Command::new(&launcher);
    cmd.current_dir(&workdir_path);
    cmd.env("VENTURE_LOG_PATH", &log_path);
    let output = run_with_stdin(cmd, "1\n\n6\n");

    assert!(output.status.success(), "status: {:?}", output.status);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Launching doctor..."), "stdout: {stdout:?}");

    let lines: Vec<String> = fs::read_to_string(&record)
        .expect("read contract record")
        .lines()
        .map(String::from)
        .collect();
    let expected = workdir_path.display().to_string();
    assert_eq!(lines, vec![expected.clone(), expected]);

    let log = fs::read_to_string(&log_path).expect("read event log");
    assert!(log.contains("launch start command=doctor"), "log: {log:?}");
    assert!(log.contains("launch exit command=doctor code=0"), "log: {log:?}");
    assert!(log.contains("quit reason=user_exit"), "log: {log:?}");
}

#[test]
fn child_failure_does_not_change_launcher_exit_status() {
    let install = TempDir::new().expect("install dir");
    let launcher = install_launcher(install.path());
    write_script(install.path(), "ship", "exit 42");

    let output = run_with_stdin(Command::new(&launcher), "ship\n\nexit\n");

    assert!(
        output.status.success(),
        "a failing script must not fail the launcher, status: {:?}",
        output.status
    );
}

#[test]
fn unexpected_arguments_fail_fast() {
    let install = TempDir::new().expect("install dir");
    let launcher = install_launcher(install.path());

    let output = Command::new(&launcher)
        .arg("--frobnicate")
        .stdin(Stdio::null())
        .output()
        .expect("run venture");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error"), "stderr: {stderr:?}");
}
