//! HTTP seam used to fetch the bag.
//!
//! [`BagTransport`] performs exactly one exchange per call. [`HttpTransport`]
//! is the production implementation: it builds a fresh `reqwest` client from
//! the request's connection settings, sends the request over HTTP/1.1 and
//! drops the client when the exchange ends, whichever way it ends.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::redirect::{Attempt, Policy};
use storefront_config::{TlsConfiguration, TlsVersion};
use url::Url;

use crate::errors::TransportError;

/// Upper bound on redirects followed for a single request.
pub const MAX_REDIRECTS: usize = 8;

/// Everything needed to issue one bootstrap GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BagRequest {
    url: Url,
    headers: Vec<(String, String)>,
    tls: TlsConfiguration,
    timeout_connect: Duration,
    timeout_read: Duration,
}

impl BagRequest {
    /// Builds a GET request with connection settings.
    #[must_use]
    pub const fn new(
        url: Url,
        headers: Vec<(String, String)>,
        tls: TlsConfiguration,
        timeout_connect: Duration,
        timeout_read: Duration,
    ) -> Self {
        Self {
            url,
            headers,
            tls,
            timeout_connect,
            timeout_read,
        }
    }

    /// Target URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Request headers in send order.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// TLS parameters.
    #[must_use]
    pub const fn tls(&self) -> &TlsConfiguration {
        &self.tls
    }

    /// Connection establishment timeout.
    #[must_use]
    pub const fn timeout_connect(&self) -> Duration {
        self.timeout_connect
    }

    /// Response read timeout.
    #[must_use]
    pub const fn timeout_read(&self) -> Duration {
        self.timeout_read
    }
}

/// Response returned by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BagResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl BagResponse {
    /// Builds a response. `body` is `None` when it could not be read.
    #[must_use]
    pub const fn new(status: u16, headers: Vec<(String, String)>, body: Option<Vec<u8>>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers in received order.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Response body, if it was read.
    #[must_use]
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Consumes the response, returning its body.
    #[must_use]
    pub fn into_body(self) -> Option<Vec<u8>> {
        self.body
    }
}

/// Performs the bootstrap exchange.
pub trait BagTransport: Send + Sync {
    /// Sends `request` and returns the response.
    ///
    /// Implementations report connection, TLS, timeout and redirect failures
    /// as errors, including failures while reading the body. A response
    /// without a body is reported as `None`.
    fn fetch(
        &self,
        request: &BagRequest,
    ) -> impl Future<Output = Result<BagResponse, TransportError>> + Send;
}

impl<T> BagTransport for Arc<T>
where
    T: BagTransport,
{
    fn fetch(
        &self,
        request: &BagRequest,
    ) -> impl Future<Output = Result<BagResponse, TransportError>> + Send {
        (**self).fetch(request)
    }
}

/// `reqwest`-backed transport.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpTransport;

impl HttpTransport {
    /// Builds the transport.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl BagTransport for HttpTransport {
    async fn fetch(&self, request: &BagRequest) -> Result<BagResponse, TransportError> {
        let client = build_client(request).await?;

        let mut builder = client.get(request.url().clone());
        for (name, value) in request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(TransportError::Request)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_owned(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(TransportError::Request)?
            .to_vec();

        Ok(BagResponse::new(status, headers, Some(body)))
    }
}

async fn build_client(request: &BagRequest) -> Result<reqwest::Client, TransportError> {
    let tls = request.tls();
    let mut builder = reqwest::Client::builder()
        .http1_only()
        .redirect(redirect_policy())
        .connect_timeout(request.timeout_connect())
        .read_timeout(request.timeout_read())
        .min_tls_version(match tls.min_version() {
            TlsVersion::Tls12 => reqwest::tls::Version::TLS_1_2,
            TlsVersion::Tls13 => reqwest::tls::Version::TLS_1_3,
        });

    if let Some(path) = tls.ca_bundle() {
        let pem = tokio::fs::read(path)
            .await
            .map_err(|source| TransportError::CaBundle {
                path: path.to_path_buf(),
                source,
            })?;
        for certificate in
            reqwest::Certificate::from_pem_bundle(&pem).map_err(TransportError::Client)?
        {
            builder = builder.add_root_certificate(certificate);
        }
    }

    builder.build().map_err(TransportError::Client)
}

fn redirect_policy() -> Policy {
    Policy::custom(|attempt: Attempt<'_>| {
        if attempt.previous().len() > MAX_REDIRECTS {
            attempt.error("too many redirects")
        } else if attempt.previous().contains(attempt.url()) {
            attempt.error("redirect cycle detected")
        } else {
            attempt.follow()
        }
    })
}
