//! `compile-dfa <input-path> <output-path>`
//!
//! Selects a backend by the last byte of the output path: `c` emits a
//! goto-based matcher function, anything else emits a DOT graph. Mirrors
//! `examples/original_source/src/compileDFA.c`'s `main` exactly, down to
//! the start/stop bracketing of the logger around the whole run.

mod error;

use clap::Parser;
use dfa_compiler::{backend, dfa::builder, logging, xml};
use error::CliError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "compile-dfa")]
struct Args {
    /// Path to the XML-like DFA description.
    input: PathBuf,
    /// Path to write the emitted matcher or graph to.
    output: PathBuf,
    /// Override the log file path (defaults to $DFA_COMPILER_LOG or "log.txt").
    #[arg(long)]
    log: Option<PathBuf>,
    /// Only log errors to stdout (the log file always gets everything).
    #[arg(long)]
    quiet: bool,
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            // clap exits 0 for --help/--version; every other parse failure is
            // an argument error and spec.md §6 reserves exit code 1 for that,
            // matching compileDFA.c's `if (argc < 3) { ...; exit(1); }`.
            match err.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                    std::process::exit(0)
                }
                _ => std::process::exit(1),
            }
        }
    };

    let log_path = args
        .log
        .clone()
        .or_else(|| std::env::var_os(logging::LOG_PATH_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(logging::DEFAULT_LOG_PATH));
    let _guard = logging::start(&log_path, args.quiet);

    if let Err(err) = run(&args) {
        tracing::error!(%err, "compilation failed");
        eprintln!("compile-dfa: {err}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let bytes =
        std::fs::read(&args.input).map_err(|e| CliError::InputRead(args.input.clone(), e))?;
    let input = String::from_utf8(bytes).map_err(|_| CliError::InvalidUtf8(args.input.clone()))?;

    let doc = xml::parse(&input)?;
    let automaton = builder::build(&doc)?;

    let use_code_backend = args
        .output
        .to_str()
        .and_then(|s| s.as_bytes().last())
        .map(|&b| b == b'c')
        .unwrap_or(false);

    let output_text = if use_code_backend {
        backend::code::emit(&automaton)
    } else {
        backend::dot::build_graph(&automaton).to_dot()
    };

    std::fs::write(&args.output, output_text)
        .map_err(|e| CliError::OutputWrite(args.output.clone(), e))?;

    tracing::info!(
        input = %args.input.display(),
        output = %args.output.display(),
        backend = if use_code_backend { "code" } else { "graph" },
        "compiled successfully"
    );
    Ok(())
}
