//! These tests are mostly here just to ensure that invalid results will be
//! caught when passing arguments.

use assert_cmd::prelude::*;
use predicates::prelude::*;

use crate::util::{cpuload_command, no_cfg_cpuload_command};

#[test]
fn test_small_rate() {
    no_cfg_cpuload_command()
        .arg("-r")
        .arg("249")
        .assert()
        .failure()
        .stderr(predicate::str::contains("'--rate' must be at least"));
}

#[test]
fn test_invalid_rate() {
    no_cfg_cpuload_command()
        .arg("-r")
        .arg("soon")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "'--rate' was set with an invalid value",
        ));
}

#[test]
fn test_zero_samples() {
    no_cfg_cpuload_command()
        .args(["-n", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'--samples"));
}

#[test]
fn test_unknown_argument() {
    no_cfg_cpuload_command()
        .arg("--tree")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected argument '--tree'"));
}

#[test]
fn test_missing_explicit_config() {
    cpuload_command(&["-C", "./tests/valid_configs/does_not_exist.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unable to read the config file"));
}

#[test]
fn test_help() {
    cpuload_command(&["--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CPU Options"))
        .stdout(predicate::str::contains("--disable_native"));
}

#[test]
fn test_version() {
    cpuload_command(&["-V"])
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_single_sample() {
    no_cfg_cpuload_command()
        .args(["-n", "1", "-r", "250"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Processors:"))
        .stdout(predicate::str::contains("Load source:"))
        .stdout(predicate::str::contains("[1] CPU:"))
        .stdout(predicate::str::contains("[2] CPU:").not());
}

#[test]
fn test_sample_flags() {
    no_cfg_cpuload_command()
        .args([
            "-n",
            "2",
            "-r",
            "250ms",
            "--per_core",
            "--load_average",
            "--ticks_only",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("[2] CPU:"))
        .stdout(predicate::str::contains("(ticks)"))
        .stdout(predicate::str::contains("cpu0:"))
        .stdout(predicate::str::contains("load average:"));
}

#[test]
fn test_disable_native() {
    no_cfg_cpuload_command()
        .args(["-n", "1", "-r", "250", "--disable_native"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Load source: ticks"));
}
