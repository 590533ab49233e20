//! qnote - notes, code snippets and todos in a local SQLite database

pub mod cli;
pub mod domain;
pub mod store;

use anyhow::Result;
use clap::Parser;

use cli::Cli;
use domain::ValidationError;
use store::StoreError;

/// Exit status for a failed run.
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_VALIDATION: u8 = 2;
pub const EXIT_NOT_FOUND: u8 = 3;

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    cli::handlers::dispatch(&cli)
}

/// Sets up stderr logging. `RUST_LOG` overrides the `-v` level.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_module_path(verbosity > 1)
        .try_init();
}

/// Picks the process exit status for an error from its cause chain.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    for cause in err.chain() {
        if let Some(store_err) = cause.downcast_ref::<StoreError>() {
            return match store_err {
                StoreError::NotFound { .. } => EXIT_NOT_FOUND,
                StoreError::Validation(_) => EXIT_VALIDATION,
                _ => EXIT_FAILURE,
            };
        }
        if cause.downcast_ref::<ValidationError>().is_some() {
            return EXIT_VALIDATION;
        }
    }
    EXIT_FAILURE
}
