//! Help output specs

use crate::prelude::*;

#[test]
fn help_lists_subcommands() {
    let temp = Project::empty();
    temp.strand()
        .args(&["--help"])
        .passes()
        .stdout_has("count")
        .stdout_has("stress")
        .stdout_has("banner")
        .stdout_has("--config");
}

#[test]
fn count_help_documents_flags() {
    let temp = Project::empty();
    temp.strand()
        .args(&["count", "--help"])
        .passes()
        .stdout_has("--log")
        .stdout_has("--for")
        .stdout_has("--limit");
}

#[test]
fn missing_subcommand_fails() {
    let temp = Project::empty();
    temp.strand().fails().stderr_has("Usage");
}
