//! Compilation pipeline tests: emission formats, dumps, and exit codes.

use predicates::prelude::*;
use tempfile::TempDir;

use crate::vitlc_in;

#[test]
fn test_stdin_to_ir_text() {
    let dir = TempDir::new().unwrap();
    vitlc_in(dir.path())
        .args(["-", "-emit-ir", "-o", "out/x.ir"])
        .write_stdin("let x = 1\n")
        .assert()
        .success();

    let text = std::fs::read_to_string(dir.path().join("out/x.ir")).unwrap();
    assert!(text.starts_with("; IR"), "{text}");
}

#[test]
fn test_object_emission_magic() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("hello.vitl"),
        "module hello\nfn main() {}\n",
    )
    .unwrap();

    vitlc_in(dir.path())
        .args(["hello.vitl", "-o", "build/h.o"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ok → build/h.o"));

    let bytes = std::fs::read(dir.path().join("build/h.o")).unwrap();
    assert_eq!(&bytes[..7], &[0x56, 0x4C, 0x42, 0x49, 0x4E, 0x00, 0x01]);
}

#[test]
fn test_output_directories_are_created() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("m.vitl"), "fn main() {}\n").unwrap();

    vitlc_in(dir.path())
        .args(["m.vitl", "-o", "deep/nested/dirs/m.o"])
        .assert()
        .success();
    assert!(dir.path().join("deep/nested/dirs/m.o").exists());
}

#[test]
fn test_existing_output_is_replaced() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("m.vitl"), "fn main() {}\n").unwrap();
    std::fs::write(dir.path().join("m.o"), vec![0xAB; 4096]).unwrap();

    vitlc_in(dir.path())
        .args(["m.vitl", "-o", "m.o"])
        .assert()
        .success();
    let bytes = std::fs::read(dir.path().join("m.o")).unwrap();
    assert!(bytes.starts_with(b"VLBIN"));
    assert!(bytes.len() < 4096);
}

#[test]
fn test_ir_to_stdout() {
    let dir = TempDir::new().unwrap();
    vitlc_in(dir.path())
        .args(["-", "-emit-ir", "-o", "-"])
        .write_stdin("fn main() {}\n")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("; IR"));
}

#[test]
fn test_lex_failure_exit_code_and_message() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("bad.vitl"), "let s = \"abc\n").unwrap();

    vitlc_in(dir.path())
        .arg("bad.vitl")
        .assert()
        .code(10)
        .stderr(predicate::str::contains(
            "unterminated or invalid string literal",
        ));
}

#[test]
fn test_lex_failure_from_stdin() {
    let dir = TempDir::new().unwrap();
    vitlc_in(dir.path())
        .arg("-")
        .write_stdin("\"abc")
        .assert()
        .code(10)
        .stderr(predicate::str::contains("error:1:1:"));
}

#[test]
fn test_parse_failure_exit_code() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("p.vitl"), "fn (x) {}\n").unwrap();

    vitlc_in(dir.path())
        .arg("p.vitl")
        .assert()
        .code(11)
        .stderr(predicate::str::contains("expected function name"));
}

#[test]
fn test_semantic_failure_exit_code() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("d.vitl"), "fn f() {}\nfn f() {}\n").unwrap();

    vitlc_in(dir.path())
        .arg("d.vitl")
        .assert()
        .code(12)
        .stderr(predicate::str::contains("duplicate definition of 'f'"));
}

#[test]
fn test_missing_input_file_exit_code() {
    let dir = TempDir::new().unwrap();
    vitlc_in(dir.path()).arg("absent.vitl").assert().code(3);
}

#[test]
fn test_dump_tokens_output() {
    let dir = TempDir::new().unwrap();
    vitlc_in(dir.path())
        .args(["-", "--dump-tokens", "-o", "t.o"])
        .write_stdin("let x = 0xFF\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("KW_LET  @1:1  lex=\"let\"")
                .and(predicate::str::contains("IDENT  @1:5  lex=\"x\""))
                .and(predicate::str::contains("INT  @1:9  lex=\"0xFF\"  int=255"))
                .and(predicate::str::contains("-- 4 token(s)")),
        );
}

#[test]
fn test_dump_ast_writes_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("m.vitl"),
        "module demo\nimport std::io\nfn main() {}\n",
    )
    .unwrap();

    vitlc_in(dir.path())
        .args(["m.vitl", "--dump-ast=dump/ast.txt", "-o", "m.o"])
        .assert()
        .success();

    let text = std::fs::read_to_string(dir.path().join("dump/ast.txt")).unwrap();
    assert!(text.contains("module demo"));
    assert!(text.contains("import std::io"));
    assert!(text.contains("fn main"));
}

#[test]
fn test_time_flag_reports_phases() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("m.vitl"), "fn main() {}\n").unwrap();

    vitlc_in(dir.path())
        .args(["m.vitl", "--time", "-o", "m.o"])
        .assert()
        .success()
        .stderr(
            predicate::str::contains("read")
                .and(predicate::str::contains("lex"))
                .and(predicate::str::contains("emit"))
                .and(predicate::str::contains("total")),
        );
}

#[test]
fn test_trace_flag_logs_phases() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("m.vitl"), "fn main() {}\n").unwrap();

    vitlc_in(dir.path())
        .args(["m.vitl", "--trace", "-o", "m.o"])
        .assert()
        .success()
        .stderr(predicate::str::contains("lexing").and(predicate::str::contains("parsing")));
}

#[test]
fn test_comments_and_literals_compile() {
    let dir = TempDir::new().unwrap();
    let source = "\
module demo

// a line comment
/* a /* nested */ block comment */
const GREETING = \"hi\\n\"
const INITIAL = 'a'
const MASK = 0b1010
let ratio = 2.5e-3

fn main() {
    let local = GREETING
}
";
    std::fs::write(dir.path().join("demo.vitl"), source).unwrap();

    vitlc_in(dir.path())
        .args(["demo.vitl", "-emit-ir", "-o", "demo.ir"])
        .assert()
        .success();

    let text = std::fs::read_to_string(dir.path().join("demo.ir")).unwrap();
    assert!(text.contains("; module demo"));
    assert!(text.contains("func @main"));
    assert!(text.contains("const @GREETING"));
}
