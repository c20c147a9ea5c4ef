//! nccl-test-runner entry point.
//!
//! Parses overrides, loads configuration, and runs the launch pipeline.
//! Usage errors never reach terraform or kubectl.

mod cli_parser;

use std::process::ExitCode;

use nccl_test_runner::cli::{parse_args, write_report, Invocation, Overrides};
use nccl_test_runner::{logging, Launcher, RunnerConfig, RunnerError};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let overrides = match parse_args(&args) {
        Ok(Invocation::Run(overrides)) => overrides,
        Ok(Invocation::Help) => {
            cli_parser::print_usage();
            return ExitCode::SUCCESS;
        }
        Ok(Invocation::Version) => {
            println!("nccl-test-runner {}", env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Run 'nccl-test-runner --help' for usage.");
            return ExitCode::from(RunnerError::from(e).exit_code());
        }
    };

    logging::init();

    match run(&overrides).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "NCCL test submission failed");
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(overrides: &Overrides) -> Result<(), RunnerError> {
    let config = RunnerConfig::load()?;
    let launcher = Launcher::from_config(&config)?;
    let submission = launcher.run(overrides).await?;

    let mut stdout = std::io::stdout().lock();
    write_report(&mut stdout, &submission)
}
