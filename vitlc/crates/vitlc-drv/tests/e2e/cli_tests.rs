//! CLI surface tests: help, version, usage errors, warnings, and
//! configuration defaults.

use predicates::prelude::*;
use tempfile::TempDir;

use crate::vitlc_in;

#[test]
fn test_help_exits_zero() {
    let dir = TempDir::new().unwrap();
    vitlc_in(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("USAGE").and(predicate::str::contains("vitlc")));
}

#[test]
fn test_short_help_flag() {
    let dir = TempDir::new().unwrap();
    vitlc_in(dir.path())
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("-emit-ir"));
}

#[test]
fn test_version_prints_name_and_version() {
    let dir = TempDir::new().unwrap();
    let expected = format!("vitlc {}\n", env!("CARGO_PKG_VERSION"));
    vitlc_in(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn test_missing_input_is_usage_error() {
    let dir = TempDir::new().unwrap();
    vitlc_in(dir.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("usage:").and(predicate::str::contains("missing input")));
}

#[test]
fn test_invalid_opt_level_is_usage_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("m.vitl"), "fn main() {}\n").unwrap();
    vitlc_in(dir.path())
        .args(["m.vitl", "-O9"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("-O9"));
}

#[test]
fn test_unknown_flag_warns_but_compiles() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("m.vitl"), "fn main() {}\n").unwrap();
    vitlc_in(dir.path())
        .args(["m.vitl", "--wat", "-o", "m.o"])
        .assert()
        .success()
        .stderr(predicate::str::contains("unknown option '--wat'"));
    assert!(dir.path().join("m.o").exists());
}

#[test]
fn test_extra_positional_warns_but_compiles() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.vitl"), "fn main() {}\n").unwrap();
    vitlc_in(dir.path())
        .args(["a.vitl", "b.vitl", "-o", "a.o"])
        .assert()
        .success()
        .stderr(predicate::str::contains("ignoring extra argument 'b.vitl'"));
}

#[test]
fn test_config_file_supplies_output_default() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("vitlc.ini"),
        "[build]\noutput = from-config/out.o\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("m.vitl"), "fn main() {}\n").unwrap();

    vitlc_in(dir.path()).arg("m.vitl").assert().success();
    assert!(dir.path().join("from-config/out.o").exists());
}

#[test]
fn test_env_beats_config_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("vitlc.ini"),
        "[build]\noutput = from-file.o\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("m.vitl"), "fn main() {}\n").unwrap();

    vitlc_in(dir.path())
        .env("VITLC_BUILD__OUTPUT", "from-env.o")
        .arg("m.vitl")
        .assert()
        .success();
    assert!(dir.path().join("from-env.o").exists());
    assert!(!dir.path().join("from-file.o").exists());
}

#[test]
fn test_flag_beats_env_and_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("m.vitl"), "fn main() {}\n").unwrap();

    vitlc_in(dir.path())
        .env("VITLC_BUILD__OUTPUT", "from-env.o")
        .args(["m.vitl", "-o", "from-flag.o"])
        .assert()
        .success();
    assert!(dir.path().join("from-flag.o").exists());
}

#[test]
fn test_broken_config_file_is_reported() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("vitlc.ini"), "[unclosed\n").unwrap();
    std::fs::write(dir.path().join("m.vitl"), "fn main() {}\n").unwrap();

    vitlc_in(dir.path())
        .arg("m.vitl")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("vitlc.ini:1"));
}
