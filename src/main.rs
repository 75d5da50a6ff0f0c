use anyhow::{Context, Result};
use clap::Parser;
use monkey_interpreter::object::Object;
use monkey_interpreter::{parse, repl, run};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Runs Monkey programs. Starts an interactive prompt when no script is given.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Script to run.
    file: Option<PathBuf>,

    /// Print the parsed program instead of evaluating it.
    #[arg(long)]
    ast: bool,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let path = match args.file {
        Some(path) => path,
        None => {
            let stdin = io::stdin();
            repl::start(stdin.lock(), io::stdout())?;
            return Ok(ExitCode::SUCCESS);
        }
    };
    let source = fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    tracing::info!(path = %path.display(), ast = args.ast, "running script");

    if args.ast {
        return match parse(&source) {
            Ok(program) => {
                println!("{}", program);
                Ok(ExitCode::SUCCESS)
            }
            Err(errors) => Ok(report_parse_errors(&errors.to_string())),
        };
    }

    match run(&source) {
        Ok(evaluated) => {
            println!("{}", evaluated);
            if let Object::Error { .. } = evaluated {
                return Ok(ExitCode::FAILURE);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(errors) => Ok(report_parse_errors(&errors.to_string())),
    }
}

fn report_parse_errors(errors: &str) -> ExitCode {
    eprintln!("parser errors:");
    for line in errors.lines() {
        eprintln!("\t{}", line);
    }
    ExitCode::FAILURE
}
