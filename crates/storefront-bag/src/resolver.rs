//! Resolves the authentication endpoint from the store front bag.
//!
//! Resolution is a chain of steps: build the bootstrap URL, fetch it, read
//! the body, decode the property list and extract `authenticateAccount`.
//! Every step except the fetch degrades to [`ResolvedEndpoint::fallback`]
//! when it fails, logging the reason at debug level. A failed fetch is
//! returned to the caller as [`ResolveError`].

use std::fmt;
use std::io::Cursor;
use std::sync::Arc;

use plist::{Dictionary, Value};
use url::Url;

use crate::diagnostics::Diagnostics;
use crate::endpoint::ResolvedEndpoint;
use crate::errors::ResolveError;
use crate::provider::BagConfiguration;
use crate::transport::{BagRequest, BagResponse, BagTransport};

/// Location of the bag served by the store front.
pub const BOOTSTRAP_URL: &str = "https://init.itunes.apple.com/bag.xml";

/// Bag key holding the authentication endpoint.
pub const AUTH_ENDPOINT_KEY: &str = "authenticateAccount";

const DEVICE_QUERY_PARAMETER: &str = "guid";

/// Reason a resolution fell back to the default endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Degradation {
    UrlConstruction,
    EmptyBody,
    UndecodableDocument,
    MissingAuthEndpoint,
}

impl fmt::Display for Degradation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::UrlConstruction => "failed to construct URL",
            Self::EmptyBody => "empty response body",
            Self::UndecodableDocument => "failed to parse plist",
            Self::MissingAuthEndpoint => "no authenticateAccount in plist",
        };
        write!(formatter, "bag: {reason}, using default auth endpoint")
    }
}

enum Failure {
    Degraded(Degradation),
    Fatal(ResolveError),
}

impl From<Degradation> for Failure {
    fn from(degradation: Degradation) -> Self {
        Self::Degraded(degradation)
    }
}

impl From<ResolveError> for Failure {
    fn from(error: ResolveError) -> Self {
        Self::Fatal(error)
    }
}

/// Fetches the bag and extracts the authentication endpoint.
///
/// The resolver holds no per-call state: each [`resolve`](Self::resolve)
/// issues one request, with no caching and no retry, so a resolver may be
/// shared between tasks.
#[derive(Debug)]
pub struct BagResolver<C, T> {
    config: C,
    transport: T,
    diagnostics: Arc<Diagnostics>,
    bootstrap_url: String,
}

impl<C, T> BagResolver<C, T>
where
    C: BagConfiguration,
    T: BagTransport,
{
    /// Builds a resolver for the store front bootstrap host.
    pub fn new(config: C, transport: T, diagnostics: Arc<Diagnostics>) -> Self {
        Self {
            config,
            transport,
            diagnostics,
            bootstrap_url: BOOTSTRAP_URL.to_owned(),
        }
    }

    /// Points the resolver at another bag location.
    #[must_use]
    pub fn with_bootstrap_url(mut self, url: impl Into<String>) -> Self {
        self.bootstrap_url = url.into();
        self
    }

    /// Diagnostics context used by this resolver.
    #[must_use]
    pub fn diagnostics(&self) -> &Arc<Diagnostics> {
        &self.diagnostics
    }

    /// Resolves the authentication endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Transport`] when the bootstrap request cannot
    /// be completed. Every other failure yields the default endpoint.
    pub async fn resolve(&self) -> Result<ResolvedEndpoint, ResolveError> {
        match self.try_resolve().await {
            Ok(endpoint) => {
                self.diagnostics
                    .info(format_args!("bag: auth endpoint resolved to {endpoint}"));
                Ok(endpoint)
            }
            Err(Failure::Degraded(degradation)) => {
                self.diagnostics.debug(degradation);
                Ok(ResolvedEndpoint::fallback())
            }
            Err(Failure::Fatal(error)) => Err(error),
        }
    }

    async fn try_resolve(&self) -> Result<ResolvedEndpoint, Failure> {
        let url = self.bag_url()?;
        let response = self.fetch(url).await?;
        let body = non_empty_body(response)?;
        let bag = decode_bag(&body)?;
        Ok(auth_endpoint(&bag)?)
    }

    fn bag_url(&self) -> Result<Url, Degradation> {
        let mut url =
            Url::parse(&self.bootstrap_url).map_err(|_| Degradation::UrlConstruction)?;
        if url.cannot_be_a_base() {
            return Err(Degradation::UrlConstruction);
        }
        url.query_pairs_mut()
            .clear()
            .append_pair(DEVICE_QUERY_PARAMETER, self.config.device_identifier());
        Ok(url)
    }

    async fn fetch(&self, url: Url) -> Result<BagResponse, ResolveError> {
        let headers = vec![
            ("User-Agent".to_owned(), self.config.user_agent().to_owned()),
            ("Accept".to_owned(), "application/xml".to_owned()),
        ];
        self.diagnostics.log_request("GET", url.as_str(), &headers);

        let request = BagRequest::new(
            url,
            headers,
            self.config.tls(),
            self.config.timeout_connect(),
            self.config.timeout_read(),
        );
        let response = self
            .transport
            .fetch(&request)
            .await
            .map_err(|source| ResolveError::transport(request.url(), source))?;

        self.diagnostics.log_response(
            response.status(),
            response.headers(),
            response.body().map(<[u8]>::len),
        );
        Ok(response)
    }
}

fn non_empty_body(response: BagResponse) -> Result<Vec<u8>, Degradation> {
    response
        .into_body()
        .filter(|body| !body.is_empty())
        .ok_or(Degradation::EmptyBody)
}

fn decode_bag(body: &[u8]) -> Result<Dictionary, Degradation> {
    Value::from_reader(Cursor::new(body))
        .ok()
        .and_then(Value::into_dictionary)
        .ok_or(Degradation::UndecodableDocument)
}

fn auth_endpoint(bag: &Dictionary) -> Result<ResolvedEndpoint, Degradation> {
    bag.get(AUTH_ENDPOINT_KEY)
        .and_then(Value::as_string)
        .and_then(|raw| Url::parse(raw).ok())
        .map(ResolvedEndpoint::new)
        .ok_or(Degradation::MissingAuthEndpoint)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn xml_bag(entries: &str) -> Vec<u8> {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <plist version=\"1.0\"><dict>{entries}</dict></plist>"
        )
        .into_bytes()
    }

    #[rstest]
    fn degradation_messages_name_the_reason() {
        assert_eq!(
            Degradation::EmptyBody.to_string(),
            "bag: empty response body, using default auth endpoint"
        );
        assert_eq!(
            Degradation::MissingAuthEndpoint.to_string(),
            "bag: no authenticateAccount in plist, using default auth endpoint"
        );
    }

    #[rstest]
    fn decode_rejects_non_dictionary_documents() {
        let body = b"<?xml version=\"1.0\"?><plist version=\"1.0\"><array/></plist>";
        assert_eq!(decode_bag(body), Err(Degradation::UndecodableDocument));
    }

    #[rstest]
    fn decode_rejects_garbage() {
        assert_eq!(
            decode_bag(b"{\"authenticateAccount\": 1}"),
            Err(Degradation::UndecodableDocument)
        );
    }

    #[rstest]
    #[case("<key>authenticateAccount</key><string>not a url</string>")]
    #[case("<key>authenticateAccount</key><integer>7</integer>")]
    #[case("<key>somethingElse</key><string>https://example.test/auth</string>")]
    fn extraction_requires_an_absolute_url_string(#[case] entries: &str) {
        let bag = decode_bag(&xml_bag(entries)).expect("bag should decode");
        assert_eq!(auth_endpoint(&bag), Err(Degradation::MissingAuthEndpoint));
    }

    #[rstest]
    fn extraction_returns_the_configured_url() {
        let bag = decode_bag(&xml_bag(
            "<key>authenticateAccount</key><string>https://example.test/auth</string>",
        ))
        .expect("bag should decode");
        let endpoint = auth_endpoint(&bag).expect("endpoint should resolve");
        assert_eq!(endpoint.auth_endpoint().as_str(), "https://example.test/auth");
    }
}
