//! Command-line runtime for the `storefront` binary.
//!
//! A run loads layered configuration, installs structured telemetry,
//! resolves the store front authentication endpoint once and prints it on
//! stdout. Configuration loading and the HTTP transport are injected so tests
//! can substitute both along with the output streams.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use storefront_bag::{BagResolver, BagTransport, Diagnostics, HttpTransport, ResolvedEndpoint};
use storefront_config::Config;

mod config;
mod errors;
mod telemetry;

pub(crate) use config::{ConfigLoader, OrthoConfigLoader};
pub(crate) use errors::AppError;
pub use telemetry::effective_log_filter;

/// Runs the CLI using the provided arguments and IO handles.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    run_with_loader(args, stdout, stderr, &OrthoConfigLoader, HttpTransport::new())
}

pub(crate) fn run_with_loader<I, W, E, L, T>(
    args: I,
    stdout: &mut W,
    stderr: &mut E,
    loader: &L,
    transport: T,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
    T: BagTransport,
{
    let args: Vec<OsString> = args.into_iter().collect();
    let result = loader
        .load(&args)
        .and_then(|config| resolve(config, transport))
        .and_then(|endpoint| writeln!(stdout, "{endpoint}").map_err(AppError::Output));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(target: "storefront::cli", %error, "resolution failed");
            let _ = writeln!(stderr, "{error}");
            ExitCode::FAILURE
        }
    }
}

fn resolve<T>(config: Config, transport: T) -> Result<ResolvedEndpoint, AppError>
where
    T: BagTransport,
{
    telemetry::initialise(&config)?;
    let diagnostics = Arc::new(Diagnostics::new(config.verbose()));
    let resolver = BagResolver::new(config, transport, diagnostics);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(AppError::Runtime)?;
    Ok(runtime.block_on(resolver.resolve())?)
}

#[cfg(test)]
mod tests;
