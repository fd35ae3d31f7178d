use assert_cmd::Command;

/// Helper to get a Command for the rulegraph binary.
#[allow(deprecated)]
fn rulegraph_cmd() -> Command {
    Command::cargo_bin("rulegraph").unwrap()
}

#[test]
fn help_works() {
    rulegraph_cmd().arg("--help").assert().success();
}

#[test]
fn subcommand_help_works() {
    rulegraph_cmd()
        .args(["evaluate", "--help"])
        .assert()
        .success();
}
