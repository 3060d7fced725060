//! Integration tests for cpuload.

mod util;

mod arg_tests;
mod invalid_config_tests;
mod processor_tests;
mod valid_config_tests;
