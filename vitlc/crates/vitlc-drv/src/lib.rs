//! vitlc-drv - Compilation driver.
//!
//! Sequences the pipeline Read → Lex → Parse → (dump AST?) → Lower → Emit,
//! maps each failure kind to its exit code, and owns the process-facing
//! concerns: argv, configuration defaults, logging, timings, and the
//! one-line diagnostics on standard error.
//!
//! Exit codes: 0 ok, 2 usage, 3 I/O, 10 lex, 11 parse, 12 semantic,
//! 13 emit.

pub mod options;

use std::io::IsTerminal;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Context;
use thiserror::Error;
use tracing::{debug, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vitlc_ast::{ast_dump, parse, ParseError};
use vitlc_cfg::{Config, ConfigError};
use vitlc_ir::{emit_object, emit_text, lower, SemanticError};
use vitlc_lex::{Lexer, Token, TokenKind};
use vitlc_util::{fsx, ColorChoice, Diagnostic, IoError, SourceBuffer};

pub use options::{parse_args, Cli, Options, UsageError};

/// Success.
pub const RC_OK: i32 = 0;
/// CLI misuse.
pub const RC_EARGS: i32 = 2;
/// Read/write/mkdir failure.
pub const RC_EIO: i32 = 3;
/// Lexical fault in the input.
pub const RC_ELEX: i32 = 10;
/// Syntax error.
pub const RC_EPARSE: i32 = 11;
/// Semantic error while lowering.
pub const RC_ESEM: i32 = 12;
/// Emission failure.
pub const RC_EGEN: i32 = 13;

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV: &str = "VITLC_CONFIG";
/// Environment prefix merged into the configuration.
pub const ENV_PREFIX: &str = "VITLC_";
/// Configuration file picked up from the working directory when present.
pub const CONFIG_FILE_NAME: &str = "vitlc.ini";

/// A failed phase, carrying everything needed for the diagnostic line.
#[derive(Debug, Error)]
enum CompileError {
    #[error("{0}")]
    Io(#[from] IoError),
    /// Pre-rendered caret diagnostic from the lex phase.
    #[error("{0}")]
    Lex(String),
    #[error("{input}:{source}")]
    Parse { input: String, source: ParseError },
    #[error("{0}")]
    Semantic(#[from] SemanticError),
    #[error("{0}")]
    Emit(IoError),
}

impl CompileError {
    fn exit_code(&self) -> i32 {
        match self {
            CompileError::Io(_) => RC_EIO,
            CompileError::Lex(_) => RC_ELEX,
            CompileError::Parse { .. } => RC_EPARSE,
            CompileError::Semantic(_) => RC_ESEM,
            CompileError::Emit(_) => RC_EGEN,
        }
    }
}

/// Runs one compiler invocation and returns its exit code.
pub fn run(args: &[String]) -> i32 {
    let config = match load_config() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("vitlc: {error}");
            return RC_EARGS;
        }
    };

    let (options, warnings) = match parse_args(args, &config) {
        Ok(Cli::Help) => {
            print!("{}", options::HELP);
            return RC_OK;
        }
        Ok(Cli::Version) => {
            println!("{}", options::version_line());
            return RC_OK;
        }
        Ok(Cli::Run { options, warnings }) => (options, warnings),
        Err(UsageError(message)) => {
            eprintln!("vitlc: {message}");
            eprintln!("{}", options::USAGE);
            return RC_EARGS;
        }
    };

    let color = color_choice(&config).enabled(std::io::stderr().is_terminal());
    if let Err(error) = init_logging(options.trace, color) {
        eprintln!("vitlc: {error:#}");
    }
    for warning in &warnings {
        warn!("{warning}");
    }

    match compile(&options, color) {
        Ok(()) => RC_OK,
        Err(error) => {
            eprintln!("{error}");
            error.exit_code()
        }
    }
}

/// Merges configuration sources: an explicit or discovered INI file, then
/// the `VITLC_` environment view. Compile flags stay on the command line.
fn load_config() -> Result<Config, ConfigError> {
    let mut config = Config::new();
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        config.load_file(Path::new(&path))?;
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        config.load_file(Path::new(CONFIG_FILE_NAME))?;
    }
    config.load_env(ENV_PREFIX);
    Ok(config)
}

fn color_choice(config: &Config) -> ColorChoice {
    match config.get_str_or("color", "auto") {
        "always" => ColorChoice::Always,
        "never" => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

fn init_logging(trace: bool, ansi: bool) -> anyhow::Result<()> {
    let filter = if trace {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let layer = fmt::layer()
        .with_ansi(ansi)
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .context("failed to initialize logging")
}

/// Runs the phase pipeline for one input.
fn compile(options: &Options, color: bool) -> Result<(), CompileError> {
    let total_start = Instant::now();
    let mut timings: Vec<(&'static str, Duration)> = Vec::new();

    debug!("reading {}", options.input_path);
    let source = timed(&mut timings, "read", || {
        SourceBuffer::read(&options.input_path)
    })?;

    debug!("lexing {} ({} bytes)", source.name(), source.len());
    let token_count = timed(&mut timings, "lex", || {
        lex_phase(&source, options.dump_tokens, color)
    })?;
    debug!("lexed {token_count} token(s)");

    debug!("parsing");
    let ast = timed(&mut timings, "parse", || parse(&source)).map_err(|source_err| {
        CompileError::Parse {
            input: source.name().to_string(),
            source: source_err,
        }
    })?;
    debug!("parsed {}", ast.summary());

    if let Some(path) = &options.dump_ast {
        debug!("dumping AST to {path}");
        ast_dump(&ast, path)?;
    }

    debug!("lowering");
    let ir = timed(&mut timings, "lower", || lower(&ast))?;

    debug!(
        "emitting {} to {} (opt level {})",
        if options.emit_ir { "IR text" } else { "object" },
        options.output_path,
        options.opt_level
    );
    timed(&mut timings, "emit", || {
        if options.emit_ir {
            emit_text(&ir, &options.output_path)
        } else {
            emit_object(&ir, &options.output_path)
        }
    })
    .map_err(CompileError::Emit)?;

    if options.time_it {
        report_timings(&timings, total_start.elapsed());
    } else if options.output_path == fsx::STDIO_PATH {
        // Keep the payload on stdout clean.
        eprintln!("ok → {}", options.output_path);
    } else {
        println!("ok → {}", options.output_path);
    }
    Ok(())
}

fn timed<T>(
    timings: &mut Vec<(&'static str, Duration)>,
    name: &'static str,
    f: impl FnOnce() -> T,
) -> T {
    let start = Instant::now();
    let result = f();
    timings.push((name, start.elapsed()));
    result
}

fn report_timings(timings: &[(&'static str, Duration)], total: Duration) {
    for (name, elapsed) in timings {
        eprintln!("{name:<8}{:>10.3} ms", elapsed.as_secs_f64() * 1e3);
    }
    eprintln!("{:<8}{:>10.3} ms", "total", total.as_secs_f64() * 1e3);
}

/// Drains the token stream, printing it when asked.
///
/// The first `Error` token aborts the compilation with a rendered caret
/// diagnostic; the dump flag only adds output.
fn lex_phase(source: &SourceBuffer, dump: bool, color: bool) -> Result<u64, CompileError> {
    let mut lexer = Lexer::new(source);
    let mut count = 0u64;
    loop {
        let token = lexer.next_token();
        match &token.kind {
            TokenKind::Eof => break,
            TokenKind::Error(message) => {
                let diag = Diagnostic::new(token.pos, message.clone());
                return Err(CompileError::Lex(format!(
                    "{}: {}",
                    source.name(),
                    diag.render(source, color)
                )));
            }
            _ => {}
        }
        if dump {
            println!("{}", dump_line(&token));
        }
        count += 1;
    }
    if dump {
        println!("-- {count} token(s)");
    }
    Ok(count)
}

/// One `--dump-tokens` line: kind, position, lexeme, numeric payload.
fn dump_line(token: &Token<'_>) -> String {
    let mut line = format!(
        "{}  @{}:{}  lex=\"{}\"",
        token.kind.dump_name(),
        token.pos.line,
        token.pos.column,
        token.raw_lossy()
    );
    match &token.kind {
        TokenKind::Int(value) => line.push_str(&format!("  int={value}")),
        TokenKind::Float(value) => line.push_str(&format!("  float={value}")),
        TokenKind::Bool(value) => line.push_str(&format!("  bool={value}")),
        _ => {}
    }
    line
}
