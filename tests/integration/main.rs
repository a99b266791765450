//! Integration test harness

mod cli_test;
mod helpers;
mod supervisor_test;
