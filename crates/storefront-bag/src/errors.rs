//! Error types surfaced by bag resolution.

use std::io;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Failures raised by a [`crate::BagTransport`] while exchanging the
/// bootstrap request.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The configured CA bundle could not be read.
    #[error("failed to read CA bundle '{path}': {source}")]
    CaBundle {
        /// Location of the bundle.
        path: Utf8PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: io::Error,
    },
    /// The HTTP client could not be constructed from the connection settings.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    /// Sending the request, following its redirects or reading the body
    /// failed.
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
    /// A lower-level I/O failure reported by a non-HTTP transport.
    #[error("transport I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Errors returned by [`crate::BagResolver::resolve`].
///
/// Only transport failures are reported. Malformed URLs, empty bodies,
/// undecodable documents and missing fields resolve to the default
/// endpoint instead.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The bootstrap exchange failed below the document layer.
    #[error("bootstrap request to {url} failed: {source}")]
    Transport {
        /// Bootstrap URL that was being fetched.
        url: String,
        /// Underlying transport failure.
        #[source]
        source: TransportError,
    },
}

impl ResolveError {
    pub(crate) fn transport(url: &url::Url, source: TransportError) -> Self {
        Self::Transport {
            url: url.to_string(),
            source,
        }
    }
}
