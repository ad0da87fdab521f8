//! `astgen` binary: writes the generated header into an output directory.

use astgen::cli::{Invocation, parse_args};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = match parse_args(std::env::args_os()) {
        Invocation::Generate(cli) => cli,
        Invocation::Exit(message) => {
            print!("{}", message);
            return ExitCode::SUCCESS;
        }
    };

    init_tracing(cli.verbose);

    match cli.run() {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Logs to stderr; `RUST_LOG` applies unless `--verbose` forces debug.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
