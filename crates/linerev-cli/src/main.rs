use std::{
    fs::File,
    io::{self, BufReader, BufWriter},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use linerev::{DEFAULT_LINE_MAX, GrowthMode, LineReverser, ReverseOptions, RunSummary};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "rev", version, disable_version_flag = true)]
#[command(
    about = "Reverse the bytes of every line.",
    long_about = "Reverse the bytes of every line.\n\n\
                  Reads FILE if given, standard input otherwise, and writes each line \
                  with its bytes in reverse order. The newline stays at the end of the line."
)]
struct Cli {
    /// File to reverse. Standard input is used when omitted.
    file: Option<PathBuf>,

    /// Line length, in bytes, the buffer holds before it has to grow.
    #[arg(
        long,
        value_name = "BYTES",
        default_value_t = DEFAULT_LINE_MAX,
        value_parser = parse_line_max
    )]
    line_max: usize,

    /// Never grow the buffer; fail on lines longer than --line-max.
    #[arg(long)]
    bounded: bool,

    /// Print version.
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: (),
}

impl Cli {
    fn options(&self) -> ReverseOptions {
        ReverseOptions {
            line_max: self.line_max,
            growth: if self.bounded {
                GrowthMode::Bounded
            } else {
                GrowthMode::Growable
            },
            ..Default::default()
        }
    }
}

fn parse_line_max(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<RunSummary> {
    let mut reverser = LineReverser::new(cli.options()).context("cannot allocate line buffer")?;
    let mut sink = BufWriter::new(io::stdout().lock());

    let summary = match &cli.file {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
            tracing::debug!(path = %path.display(), "reversing file");
            reverser.run(&mut BufReader::new(file), &mut sink)?
        }
        None => {
            tracing::debug!("reversing standard input");
            reverser.run(&mut io::stdin().lock(), &mut sink)?
        }
    };
    Ok(summary)
}

fn main() -> ExitCode {
    init_tracing();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if let Err(error) = e.print() {
                tracing::warn!(%error, "cannot print usage");
                return ExitCode::FAILURE;
            }
            // --help and --version land here too and are not failures.
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(&cli) {
        Ok(summary) => {
            tracing::info!(
                lines = summary.lines,
                bytes = summary.bytes,
                growths = summary.growths,
                "done"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("rev: {e:#}");
            ExitCode::FAILURE
        }
    }
}
