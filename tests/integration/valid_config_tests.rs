//! Tests that valid config files are accepted and actually take effect.

use assert_cmd::prelude::*;
use predicates::prelude::*;

use crate::util::cpuload_command;

#[test]
fn test_empty_config() {
    cpuload_command(&["-C", "./tests/valid_configs/empty_config.toml", "-n", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[1] CPU:"));
}

#[test]
fn test_all_options() {
    cpuload_command(&["-C", "./tests/valid_configs/all_options.toml", "-n", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cpu0:"))
        .stdout(predicate::str::contains("load average:"));
}

#[test]
fn test_ticks_only() {
    cpuload_command(&["-C", "./tests/valid_configs/ticks_only.toml", "-n", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Load source: ticks"))
        .stdout(predicate::str::contains("(ticks)"));
}
