//! ada-bundler - assembles application bundles from `bundle.yaml`.
//!
//! Copies configuration, data and the executable into an OSX `.app` or a
//! Windows/Linux directory, then writes `Info.plist` or the executable's icon.

use ada_bundler::{
    BundlerError,
    cli::{self, Args, Environment},
};
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse_args();

    // Run CLI and get exit code
    let exit_code = match Environment::from_process() {
        Ok(env) => match cli::run(args, &env).await {
            Ok(code) => code,
            Err(e) => report(&e),
        },
        Err(e) => report(&e),
    };

    process::exit(exit_code);
}

fn report(error: &BundlerError) -> i32 {
    eprintln!("Error: {}", error);
    for suggestion in error.recovery_suggestions() {
        eprintln!("  hint: {}", suggestion);
    }
    1
}
