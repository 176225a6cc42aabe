//! Error type for the CLI runtime.

use std::io;
use std::sync::Arc;

use storefront_bag::ResolveError;
use thiserror::Error;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("failed to initialise telemetry: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] io::Error),
    #[error("failed to resolve auth endpoint: {0}")]
    Resolve(#[from] ResolveError),
    #[error("failed to write resolved endpoint: {0}")]
    Output(#[source] io::Error),
}
