//! Entrypoint for the `storefront` binary.
//!
//! Delegates to [`storefront_cli::run`], which loads configuration, installs
//! telemetry, resolves the authentication endpoint and prints it.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    storefront_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
