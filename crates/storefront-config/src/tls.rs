//! TLS settings for the bootstrap connection.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Minimum TLS protocol version accepted during the handshake.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, Hash, EnumString, Display,
)]
pub enum TlsVersion {
    /// TLS 1.2.
    #[default]
    #[serde(rename = "1.2")]
    #[strum(to_string = "1.2", serialize = "tls1.2")]
    Tls12,
    /// TLS 1.3.
    #[serde(rename = "1.3")]
    #[strum(to_string = "1.3", serialize = "tls1.3")]
    Tls13,
}

/// TLS parameters handed to the HTTP transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlsConfiguration {
    ca_bundle: Option<Utf8PathBuf>,
    min_version: TlsVersion,
}

impl TlsConfiguration {
    /// Builds TLS parameters from an optional CA bundle and a minimum version.
    #[must_use]
    pub const fn new(ca_bundle: Option<Utf8PathBuf>, min_version: TlsVersion) -> Self {
        Self {
            ca_bundle,
            min_version,
        }
    }

    /// PEM bundle of additional trusted roots, if configured.
    #[must_use]
    pub fn ca_bundle(&self) -> Option<&Utf8Path> {
        self.ca_bundle.as_deref()
    }

    /// Lowest accepted protocol version.
    #[must_use]
    pub const fn min_version(&self) -> TlsVersion {
        self.min_version
    }
}
