//! These tests are for testing some invalid config-file-specific options.

use assert_cmd::prelude::*;
use predicates::prelude::*;

use crate::util::cpuload_command;

#[test]
fn test_toml_mismatch_type() {
    cpuload_command(&["-C", "./tests/invalid_configs/toml_mismatch_type.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid type"));
}

#[test]
fn test_invalid_rate() {
    cpuload_command(&["-C", "./tests/invalid_configs/invalid_rate.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "'rate' was set with an invalid value",
        ));
}

#[test]
fn test_small_rate() {
    cpuload_command(&["-C", "./tests/invalid_configs/small_rate.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'rate' must be at least"));
}

#[test]
fn test_invalid_native_throttle() {
    cpuload_command(&["-C", "./tests/invalid_configs/invalid_native_throttle.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "'native_throttle' was set with an invalid value",
        ));
}

/// This test isn't really needed as this is technically covered by TOML spec.
/// However, I feel like it's worth checking anyways - not like it takes long.
#[test]
fn test_duplicate_key() {
    cpuload_command(&["-C", "./tests/invalid_configs/duplicate_key.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate key"));
}

#[test]
fn test_lone_bracket() {
    cpuload_command(&["-C", "./tests/invalid_configs/lone_bracket.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file error"));
}
