//! Thin demo CLI: loads a JSON trace-class fixture and runs the resolver
//! over it, reporting the outcome through `log`.

use clap::Parser;
use ctf_metadata::TraceClass;
use std::path::PathBuf;
use std::process::ExitCode;

/// Resolve sequence-length and variant-tag references in a CTF trace-class fixture.
#[derive(Parser)]
struct Args {
    /// Path to a JSON-encoded trace class.
    fixture: PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let text = match std::fs::read_to_string(&args.fixture) {
        Ok(text) => text,
        Err(err) => {
            log::error!("reading {}: {err}", args.fixture.display());
            return ExitCode::FAILURE;
        }
    };

    let mut trace: TraceClass = match serde_json::from_str(&text) {
        Ok(trace) => trace,
        Err(err) => {
            log::error!("parsing {}: {err}", args.fixture.display());
            return ExitCode::FAILURE;
        }
    };

    match ctf_resolver::resolve_trace_class(&mut trace) {
        Ok(()) => {
            println!("{}", serde_json::to_string_pretty(&trace).expect("trace class serializes"));
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("resolution failed: {err}");
            ExitCode::FAILURE
        }
    }
}
