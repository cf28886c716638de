//! CLI help output specs
//!
//! Verify help text displays for all commands.

use crate::prelude::*;

#[test]
fn zfsh_no_args_shows_usage_and_exits_zero() {
    cli().passes().stdout_has("Usage:");
}

#[test]
fn zfsh_help_lists_subcommands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("list")
        .stdout_has("diff")
        .stdout_has("snapshot")
        .stdout_has("pools");
}

#[test]
fn zfsh_prop_help_shows_subcommands() {
    cli()
        .args(&["prop", "--help"])
        .passes()
        .stdout_has("get")
        .stdout_has("set");
}

#[test]
fn zfsh_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.2");
}

#[test]
fn unknown_dataset_type_is_a_usage_error() {
    cli()
        .args(&["list", "-t", "pool"])
        .fails()
        .stderr_has("unknown dataset kind");
}
