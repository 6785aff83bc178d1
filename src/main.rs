//! CLI tool to validate grep-style filter expressions.

use std::fs;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use grep_expr::{Error, ValidationResult, Validator, render};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "grepcheck",
    version,
    about = "Validate piped grep-style filter expressions"
)]
struct Args {
    /// Expressions to validate; read from --file or stdin when absent
    expressions: Vec<String>,

    /// Validate each line of a file
    #[arg(long, short)]
    file: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text, env = "GREPCHECK_FORMAT")]
    format: Format,

    /// Supported flag letters, replacing the default set
    #[arg(long, env = "GREPCHECK_FLAGS")]
    flags: Option<String>,

    /// Treat warnings as failures
    #[arg(long)]
    deny_warnings: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> ExitCode {
    // stdout carries results; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "grep_expr=warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(2)
        }
    }
}

/// Returns whether every expression passed.
fn run(args: &Args) -> Result<bool, Error> {
    let validator = match &args.flags {
        Some(letters) => Validator::new().try_supported_flags(letters)?,
        None => Validator::new(),
    };

    let inputs = read_inputs(args)?;
    tracing::debug!(count = inputs.len(), "validating expressions");

    let mut passed = true;
    for input in &inputs {
        let result = validator.validate(input);
        passed &= accepts(&result, args.deny_warnings);

        match args.format {
            Format::Text => {
                if inputs.len() > 1 {
                    println!("{input}");
                }
                print!("{}", render(input, &result));
            }
            Format::Json => println!("{}", serde_json::to_string(&result)?),
        }
    }

    Ok(passed)
}

fn accepts(result: &ValidationResult, deny_warnings: bool) -> bool {
    result.is_valid && !(deny_warnings && result.has_warnings())
}

fn read_inputs(args: &Args) -> Result<Vec<String>, Error> {
    if !args.expressions.is_empty() {
        return Ok(args.expressions.clone());
    }

    if let Some(path) = &args.file {
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        return Ok(content.lines().map(str::to_string).collect());
    }

    io::stdin()
        .lock()
        .lines()
        .collect::<Result<_, _>>()
        .map_err(|source| Error::Io {
            path: PathBuf::from("<stdin>"),
            source,
        })
}
