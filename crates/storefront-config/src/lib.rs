//! Shared configuration for the storefront bootstrap tooling.
//!
//! Settings are layered by [`ortho_config`]: built-in defaults, then a
//! `storefront.toml` configuration file, then `STOREFRONT_*` environment
//! variables, and finally command-line flags. The resulting [`Config`] is the
//! connection-parameter provider consumed by the bag resolver: it carries the
//! device identifier sent with the bootstrap request, the TLS settings, the
//! user agent and the connect/read timeouts, alongside the logging controls
//! used by the binaries.

use std::time::Duration;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

mod defaults;
mod logging;
mod tls;

pub use defaults::{
    DEFAULT_DEVICE_IDENTIFIER, DEFAULT_LOG_FILTER, DEFAULT_TIMEOUT_CONNECT_SECS,
    DEFAULT_TIMEOUT_READ_SECS, DEFAULT_USER_AGENT, default_device_identifier,
    default_log_filter_string, default_log_format, default_timeout_connect_secs,
    default_timeout_read_secs, default_user_agent,
};
pub use logging::LogFormat;
pub use tls::{TlsConfiguration, TlsVersion};

/// Resolved configuration for the storefront binaries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "STOREFRONT")]
pub struct Config {
    /// Identifier sent as the `guid` query parameter of the bootstrap request.
    #[serde(default = "default_device_identifier")]
    #[ortho_config(default = default_device_identifier())]
    pub device_identifier: String,
    /// `User-Agent` header value presented to the store front.
    #[serde(default = "default_user_agent")]
    #[ortho_config(default = default_user_agent())]
    pub user_agent: String,
    /// Connection establishment timeout, in seconds.
    #[serde(default = "default_timeout_connect_secs")]
    #[ortho_config(default = DEFAULT_TIMEOUT_CONNECT_SECS)]
    pub timeout_connect_secs: u64,
    /// Read timeout applied to the response, in seconds.
    #[serde(default = "default_timeout_read_secs")]
    #[ortho_config(default = DEFAULT_TIMEOUT_READ_SECS)]
    pub timeout_read_secs: u64,
    /// Optional PEM bundle of additional trusted root certificates.
    #[serde(default)]
    pub tls_ca_bundle: Option<Utf8PathBuf>,
    /// Lowest TLS protocol version accepted during the handshake.
    #[serde(default)]
    #[ortho_config(default = TlsVersion::Tls12)]
    pub tls_min_version: TlsVersion,
    /// Enables verbose traffic diagnostics.
    #[serde(default)]
    #[ortho_config(default = false)]
    pub verbose: bool,
    /// Tracing filter expression.
    #[serde(default = "default_log_filter_string")]
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Output format for structured logs.
    #[serde(default = "default_log_format")]
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device_identifier: default_device_identifier(),
            user_agent: default_user_agent(),
            timeout_connect_secs: DEFAULT_TIMEOUT_CONNECT_SECS,
            timeout_read_secs: DEFAULT_TIMEOUT_READ_SECS,
            tls_ca_bundle: None,
            tls_min_version: TlsVersion::default(),
            verbose: false,
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Device identifier sent with the bootstrap request.
    #[must_use]
    pub fn device_identifier(&self) -> &str {
        &self.device_identifier
    }

    /// User agent presented to the store front.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Connection establishment timeout.
    #[must_use]
    pub const fn timeout_connect(&self) -> Duration {
        Duration::from_secs(self.timeout_connect_secs)
    }

    /// Response read timeout.
    #[must_use]
    pub const fn timeout_read(&self) -> Duration {
        Duration::from_secs(self.timeout_read_secs)
    }

    /// TLS parameters assembled from the flattened `tls_*` settings.
    #[must_use]
    pub fn tls(&self) -> TlsConfiguration {
        TlsConfiguration::new(self.tls_ca_bundle.clone(), self.tls_min_version)
    }

    /// Whether verbose traffic diagnostics are enabled.
    #[must_use]
    pub const fn verbose(&self) -> bool {
        self.verbose
    }

    /// Tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Structured log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }
}
