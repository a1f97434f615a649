// Regression tests for the vgcolour binary surface.
// Requires: assert_cmd, predicates crates in [dev-dependencies]

use std::fs;

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

const SAMPLE_LOG: &str = "\
==123== Memcheck, a memory error detector\n\
==123== Invalid read of size 4\n\
==123==    at 0x4005BD: main (test.c:7)\n\
the program printed this\n\
==123== ERROR SUMMARY: 1 errors from 1 contexts (suppressed: 0 from 0)\n";

#[test]
fn colourises_a_log_file_without_escapes_when_told_not_to() {
    let log = "tests/sample_run.log";
    fs::write(log, SAMPLE_LOG).unwrap();

    let mut cmd = Command::cargo_bin("vgcolour").unwrap();
    cmd.args(["--colour", "never", "-i", log]);
    cmd.assert()
        .success()
        .stdout(contains("Invalid read of size 4"))
        .stdout(contains("at 0x4005BD: main (test.c:7)"))
        .stdout(contains("the program printed this"))
        .stdout(contains("\x1b").not());

    let _ = fs::remove_file(log);
}

#[test]
fn always_colour_emits_escape_sequences() {
    let log = "tests/sample_run_coloured.log";
    fs::write(log, SAMPLE_LOG).unwrap();

    let mut cmd = Command::cargo_bin("vgcolour").unwrap();
    cmd.args(["--colour", "always", "-i", log]);
    cmd.assert().success().stdout(contains("\x1b"));

    let _ = fs::remove_file(log);
}

#[test]
fn missing_log_file_is_fatal() {
    let mut cmd = Command::cargo_bin("vgcolour").unwrap();
    cmd.args(["-i", "tests/this_file_does_not_exist.log"]);
    cmd.assert()
        .failure()
        .stderr(contains("Error:"))
        .stderr(contains("this_file_does_not_exist.log"));
}
