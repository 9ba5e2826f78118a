use std::process::ExitCode;

use clap::Parser;

use obscurix::config::{Config, DEFAULT_MAX_CALL_DEPTH};
use obscurix::error::RunError;
use obscurix::logging;
use obscurix::runtime::{report, Runtime, Status};

/// Obscurix language interpreter.
#[derive(Parser, Debug)]
#[clap(version, about, after_help = "Enjoy this wonderfully obscure language!")]
struct Args {
    /// The .obx file to execute.
    filename: String,

    /// Enable debug logging to trace execution steps.
    #[clap(long)]
    debug: bool,

    /// Nested function calls allowed before a call fails.
    #[clap(long, default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_depth: usize,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.debug);

    let config = Config::default()
        .with_debug(args.debug)
        .with_max_call_depth(args.max_depth);

    let outcome = Runtime::new(&args.filename, config).map(|runtime| runtime.run());
    if let Err(error) = &outcome {
        report(error);
    }

    ExitCode::from(exit_status(&outcome))
}

/// 0 when the program completed, 2 when the source file is missing, 1 for any other failure.
fn exit_status(outcome: &Result<Status, RunError>) -> u8 {
    match outcome {
        Ok(Status::Completed) => 0,
        Ok(Status::Failed) => 1,
        Err(RunError::FileNotFound { .. }) => 2,
        Err(_) => 1,
    }
}
