//! Configuration loading seam for the CLI.

use std::ffi::OsString;

use ortho_config::OrthoConfig;

use storefront_config::Config;

use crate::errors::AppError;

pub(crate) trait ConfigLoader {
    /// Loads configuration from defaults, files, environment and `args`.
    fn load(&self, args: &[OsString]) -> Result<Config, AppError>;
}

/// Loader backed by the `ortho_config` layering.
pub(crate) struct OrthoConfigLoader;

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        Config::load_from_iter(args.iter().cloned()).map_err(AppError::LoadConfiguration)
    }
}
