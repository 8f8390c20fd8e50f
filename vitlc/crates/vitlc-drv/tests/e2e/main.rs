//! End-to-end tests for the vitlc binary.

mod cli_tests;
mod compile_tests;

use std::path::{Path, PathBuf};

use assert_cmd::Command;

/// Path to the vitlc binary under test.
pub fn vitlc_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_vitlc"))
}

/// A command running in `dir` with a clean configuration environment.
pub fn vitlc_in(dir: &Path) -> Command {
    let mut cmd = Command::new(vitlc_bin());
    cmd.current_dir(dir);
    cmd.env_remove("VITLC_CONFIG");
    cmd.env_remove("NO_COLOR");
    for (name, _) in std::env::vars() {
        if name.starts_with("VITLC_") {
            cmd.env_remove(name);
        }
    }
    cmd
}
