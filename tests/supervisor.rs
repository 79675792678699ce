//! Crate-level behavior: the boundary scenarios from SPEC_FULL.md §8,
//! driving the built `nurse` binary against real executables. These
//! need a real fork+exec(+ptrace), so they live here rather than as
//! unit tests, following the same `assert_cmd`/`predicates`/`tempfile`
//! approach the most directly comparable tool in the retrieval pack
//! uses for its own CLI-level tests.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn untraced_run_of_true_exits_zero() {
    Command::cargo_bin("nurse")
        .unwrap()
        .arg("--")
        .arg("/bin/true")
        .assert()
        .success();
}

#[test]
fn resource_limit_is_applied_and_benign_program_still_succeeds() {
    Command::cargo_bin("nurse")
        .unwrap()
        .args(["NOFILE", "64", "64", "--", "/bin/true"])
        .assert()
        .success();
}

#[test]
fn convenience_form_runs_without_separator() {
    Command::cargo_bin("nurse")
        .unwrap()
        .arg("/bin/true")
        .assert()
        .success();
}

#[test]
fn supervisor_succeeds_in_normal_mode_even_when_child_fails() {
    Command::cargo_bin("nurse")
        .unwrap()
        .arg("--")
        .arg("/bin/false")
        .assert()
        .success();
}

#[test]
fn propagate_mode_surfaces_child_failure_as_supervisor_exit() {
    Command::cargo_bin("nurse")
        .unwrap()
        .env("NURSE_HACK_REPORT_EXIT_FAIL", "1")
        .arg("--")
        .arg("/bin/false")
        .assert()
        .failure()
        .code(1);
}

#[test]
fn missing_policy_file_disables_tracing_but_limits_still_apply() {
    Command::cargo_bin("nurse")
        .unwrap()
        .env("PLIMIT_CONFIG_FILE", "/nonexistent/nurse-test.conf")
        .args(["NOFILE", "64", "64", "--", "/bin/true"])
        .assert()
        .success();
}

#[test]
fn policy_kills_child_on_first_denied_write() {
    let mut policy_file = NamedTempFile::new().unwrap();
    writeln!(policy_file, "SYS_write 0").unwrap();
    writeln!(policy_file, "SYS_exit_group -1").unwrap();
    writeln!(policy_file, "SYS_brk -1").unwrap();
    writeln!(policy_file, "SYS_mmap -1").unwrap();
    writeln!(policy_file, "SYS_execve -1").unwrap();

    // `/bin/echo` makes at least one `write` syscall; under a policy
    // that denies it outright, the supervisor kills the child but
    // still reports success itself (normal mode never mirrors the
    // child's outcome).
    Command::cargo_bin("nurse")
        .unwrap()
        .env("PLIMIT_CONFIG_FILE", policy_file.path())
        .arg("--")
        .arg("/bin/echo")
        .arg("hello")
        .assert()
        .success()
        .stdout(predicate::str::contains("hello").not());
}

#[test]
fn debug_json_summary_is_emitted_when_requested() {
    Command::cargo_bin("nurse")
        .unwrap()
        .env("NURSE_DEBUG_JSON", "1")
        .arg("--")
        .arg("/bin/true")
        .assert()
        .success()
        .stderr(predicate::str::contains("==NURSE==").and(predicate::str::contains("exit_code")));
}

#[test]
fn usage_error_on_empty_invocation_exits_one() {
    Command::cargo_bin("nurse").unwrap().assert().failure().code(1);
}
