//! Driver options and command-line parsing.
//!
//! The flag surface uses single-dash long options (`-emit-ir`, `-O2`,
//! `-I dir`) alongside `--` flags, and the first free positional becomes
//! the input, so the loop here is hand-rolled. Unrecognized arguments are
//! warnings, not failures; exit code 2 is reserved for a missing input and
//! malformed values of known flags.

use thiserror::Error;
use vitlc_cfg::Config;

/// Default output path when neither `-o` nor configuration names one.
pub const DEFAULT_OUTPUT: &str = "out/a.out";

/// Capacity of the include directory list; extra `-I` entries are dropped
/// with a warning.
pub const MAX_INCLUDE_DIRS: usize = 32;

/// One compilation's options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Input source path; `-` reads standard input.
    pub input_path: String,
    /// Output path; `-` writes standard output.
    pub output_path: String,
    /// Ordered include directories.
    pub include_dirs: Vec<String>,
    /// Emit textual IR instead of a binary object.
    pub emit_ir: bool,
    /// Print the token stream and a summary during the lex phase.
    pub dump_tokens: bool,
    /// Write an AST dump to this path after parsing.
    pub dump_ast: Option<String>,
    /// Optimization level 0..=3; stored for downstream phases.
    pub opt_level: u8,
    /// Verbose phase logging.
    pub trace: bool,
    /// Report per-phase wall times.
    pub time_it: bool,
}

/// What an invocation asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum Cli {
    /// Compile with these options; `warnings` are reported once logging is
    /// up.
    Run {
        options: Options,
        warnings: Vec<String>,
    },
    Help,
    Version,
}

/// CLI misuse: missing input or a malformed value for a known flag.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct UsageError(pub String);

/// The help text printed for `-h`/`--help`.
pub const HELP: &str = "\
vitlc - compiler for the Vitte/Vitl language

USAGE:
    vitlc <input> [options]

ARGS:
    <input>            source file, or '-' to read standard input

OPTIONS:
    -o <path>          output path (default: out/a.out, '-' for stdout)
    -I <dir>           append a directory to the include path
    -O0 .. -O3         optimization level (stored for later phases)
    -emit-ir           emit textual IR instead of a binary object
    --dump-tokens      print the token stream and a summary
    --dump-ast=<file>  write a textual AST dump after parsing
    --trace            verbose phase logging
    --time             report per-phase wall times
    -v, --version      print version and exit
    -h, --help         print this help and exit
";

/// One-line usage reminder for error paths.
pub const USAGE: &str = "usage: vitlc <input> [-o <path>] [-I <dir>] [-O0..3] [-emit-ir] [--dump-tokens] [--dump-ast=<file>] [--trace] [--time]";

/// The version line printed for `-v`/`--version`.
pub fn version_line() -> String {
    format!("vitlc {}", env!("CARGO_PKG_VERSION"))
}

/// Parses argv into a [`Cli`], taking defaults from `config`.
///
/// Configuration supplies `build.output` and `build.opt_level` when the
/// corresponding flags are absent; `${…}` references in the configured
/// output are expanded.
pub fn parse_args(args: &[String], config: &Config) -> Result<Cli, UsageError> {
    let mut input: Option<String> = None;
    let mut output: Option<String> = None;
    let mut include_dirs = Vec::new();
    let mut emit_ir = false;
    let mut dump_tokens = false;
    let mut dump_ast = None;
    let mut opt_level: Option<u8> = None;
    let mut trace = false;
    let mut time_it = false;
    let mut warnings = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Cli::Help),
            "-v" | "--version" => return Ok(Cli::Version),
            "-o" => {
                let value = iter
                    .next()
                    .ok_or_else(|| UsageError("missing value for -o".to_string()))?;
                output = Some(value.clone());
            }
            "-I" => {
                let dir = iter
                    .next()
                    .ok_or_else(|| UsageError("missing value for -I".to_string()))?;
                if include_dirs.len() < MAX_INCLUDE_DIRS {
                    include_dirs.push(dir.clone());
                } else {
                    warnings.push(format!(
                        "include path limit ({MAX_INCLUDE_DIRS}) reached; ignoring '{dir}'"
                    ));
                }
            }
            "-emit-ir" => emit_ir = true,
            "--dump-tokens" => dump_tokens = true,
            "--trace" => trace = true,
            "--time" => time_it = true,
            "-" => assign_input(&mut input, arg, &mut warnings),
            _ => {
                if let Some(value) = arg.strip_prefix("--dump-ast=") {
                    if value.is_empty() {
                        return Err(UsageError("missing value for --dump-ast".to_string()));
                    }
                    dump_ast = Some(value.to_string());
                } else if arg == "--dump-ast" {
                    return Err(UsageError("missing value for --dump-ast".to_string()));
                } else if let Some(level) = arg.strip_prefix("-O") {
                    match level {
                        "0" => opt_level = Some(0),
                        "1" => opt_level = Some(1),
                        "2" => opt_level = Some(2),
                        "3" => opt_level = Some(3),
                        _ => {
                            return Err(UsageError(format!(
                                "invalid optimization level '{arg}'"
                            )))
                        }
                    }
                } else if arg.starts_with('-') {
                    warnings.push(format!("unknown option '{arg}'"));
                } else {
                    assign_input(&mut input, arg, &mut warnings);
                }
            }
        }
    }

    let Some(input_path) = input else {
        return Err(UsageError("missing input file".to_string()));
    };

    let output_path = match output {
        Some(path) => path,
        None => config.expand(config.get_str_or("build.output", DEFAULT_OUTPUT)),
    };
    let opt_level = match opt_level {
        Some(level) => level,
        None => config
            .get_i64_or("build.opt_level", 0)
            .ok()
            .and_then(|v| u8::try_from(v).ok())
            .filter(|v| *v <= 3)
            .unwrap_or(0),
    };

    Ok(Cli::Run {
        options: Options {
            input_path,
            output_path,
            include_dirs,
            emit_ir,
            dump_tokens,
            dump_ast,
            opt_level,
            trace,
            time_it,
        },
        warnings,
    })
}

fn assign_input(input: &mut Option<String>, arg: &str, warnings: &mut Vec<String>) {
    if input.is_none() {
        *input = Some(arg.to_string());
    } else {
        warnings.push(format!("ignoring extra argument '{arg}'"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    fn parse_ok(args: &[&str]) -> (Options, Vec<String>) {
        match parse_args(&strings(args), &Config::new()).unwrap() {
            Cli::Run { options, warnings } => (options, warnings),
            other => panic!("expected Run, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults() {
        let (options, warnings) = parse_ok(&["main.vitl"]);
        assert_eq!(options.input_path, "main.vitl");
        assert_eq!(options.output_path, DEFAULT_OUTPUT);
        assert_eq!(options.opt_level, 0);
        assert!(!options.emit_ir);
        assert!(!options.dump_tokens);
        assert_eq!(options.dump_ast, None);
        assert!(!options.trace);
        assert!(!options.time_it);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_all_flags() {
        let (options, _) = parse_ok(&[
            "-o",
            "build/x.o",
            "-I",
            "lib",
            "-I",
            "vendor",
            "-O2",
            "-emit-ir",
            "--dump-tokens",
            "--dump-ast=ast.txt",
            "--trace",
            "--time",
            "src/main.vitl",
        ]);
        assert_eq!(options.input_path, "src/main.vitl");
        assert_eq!(options.output_path, "build/x.o");
        assert_eq!(options.include_dirs, vec!["lib", "vendor"]);
        assert_eq!(options.opt_level, 2);
        assert!(options.emit_ir);
        assert!(options.dump_tokens);
        assert_eq!(options.dump_ast.as_deref(), Some("ast.txt"));
        assert!(options.trace);
        assert!(options.time_it);
    }

    #[test]
    fn test_stdin_sentinel() {
        let (options, _) = parse_ok(&["-", "-emit-ir"]);
        assert_eq!(options.input_path, "-");
    }

    #[test]
    fn test_help_and_version_win() {
        let cli = parse_args(&strings(&["--help", "x.vitl"]), &Config::new()).unwrap();
        assert_eq!(cli, Cli::Help);
        let cli = parse_args(&strings(&["-v"]), &Config::new()).unwrap();
        assert_eq!(cli, Cli::Version);
    }

    #[test]
    fn test_missing_input_is_usage_error() {
        let err = parse_args(&strings(&["-emit-ir"]), &Config::new()).unwrap_err();
        assert!(err.to_string().contains("missing input"));
    }

    #[test]
    fn test_missing_flag_values() {
        assert!(parse_args(&strings(&["x.vitl", "-o"]), &Config::new()).is_err());
        assert!(parse_args(&strings(&["x.vitl", "-I"]), &Config::new()).is_err());
        assert!(parse_args(&strings(&["x.vitl", "--dump-ast"]), &Config::new()).is_err());
    }

    #[test]
    fn test_invalid_opt_level() {
        let err = parse_args(&strings(&["x.vitl", "-O9"]), &Config::new()).unwrap_err();
        assert!(err.to_string().contains("-O9"));
    }

    #[test]
    fn test_unknown_flag_warns() {
        let (options, warnings) = parse_ok(&["--wat", "x.vitl"]);
        assert_eq!(options.input_path, "x.vitl");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("--wat"));
    }

    #[test]
    fn test_extra_positional_warns() {
        let (options, warnings) = parse_ok(&["a.vitl", "b.vitl"]);
        assert_eq!(options.input_path, "a.vitl");
        assert!(warnings[0].contains("b.vitl"));
    }

    #[test]
    fn test_include_dir_overflow_warns_and_drops() {
        let mut args: Vec<String> = vec!["x.vitl".to_string()];
        for i in 0..MAX_INCLUDE_DIRS + 3 {
            args.push("-I".to_string());
            args.push(format!("dir{i}"));
        }
        let Cli::Run { options, warnings } = parse_args(&args, &Config::new()).unwrap() else {
            panic!("expected Run");
        };
        assert_eq!(options.include_dirs.len(), MAX_INCLUDE_DIRS);
        assert_eq!(warnings.len(), 3);
    }

    #[test]
    fn test_config_supplies_defaults() {
        let mut config = Config::new();
        config.set("build.name", "demo");
        config.set("build.output", "target/${build.name}.o");
        config.set("build.opt_level", "2");

        let Cli::Run { options, .. } =
            parse_args(&strings(&["x.vitl"]), &config).unwrap()
        else {
            panic!("expected Run");
        };
        assert_eq!(options.output_path, "target/demo.o");
        assert_eq!(options.opt_level, 2);
    }

    #[test]
    fn test_flags_beat_config() {
        let mut config = Config::new();
        config.set("build.output", "from-config.o");
        let Cli::Run { options, .. } =
            parse_args(&strings(&["x.vitl", "-o", "cli.o", "-O1"]), &config).unwrap()
        else {
            panic!("expected Run");
        };
        assert_eq!(options.output_path, "cli.o");
        assert_eq!(options.opt_level, 1);
    }

    #[test]
    fn test_version_line() {
        assert_eq!(version_line(), format!("vitlc {}", env!("CARGO_PKG_VERSION")));
    }
}
