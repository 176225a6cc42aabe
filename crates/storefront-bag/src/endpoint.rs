//! The value produced by bag resolution.

use std::fmt;
use std::sync::LazyLock;

use url::Url;

/// Authentication endpoint used whenever the bag cannot supply one.
pub const DEFAULT_AUTH_ENDPOINT: &str =
    "https://buy.itunes.apple.com/WebObjects/MZFinance.woa/wa/authenticate";

#[expect(
    clippy::expect_used,
    reason = "the default endpoint is a compile-time constant known to parse"
)]
static DEFAULT_AUTH_URL: LazyLock<Url> = LazyLock::new(|| {
    Url::parse(DEFAULT_AUTH_ENDPOINT).expect("default auth endpoint is a valid URL")
});

/// Authentication endpoint resolved from the bag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedEndpoint {
    auth_endpoint: Url,
}

impl ResolvedEndpoint {
    /// Wraps an authentication URL.
    #[must_use]
    pub const fn new(auth_endpoint: Url) -> Self {
        Self { auth_endpoint }
    }

    /// The default endpoint used when resolution degrades.
    #[must_use]
    pub fn fallback() -> Self {
        Self::new(DEFAULT_AUTH_URL.clone())
    }

    /// Whether this is the default endpoint.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.auth_endpoint == *DEFAULT_AUTH_URL
    }

    /// URL to send authentication requests to.
    #[must_use]
    pub const fn auth_endpoint(&self) -> &Url {
        &self.auth_endpoint
    }

    /// Consumes the value, returning the URL.
    #[must_use]
    pub fn into_url(self) -> Url {
        self.auth_endpoint
    }
}

impl fmt::Display for ResolvedEndpoint {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.auth_endpoint, formatter)
    }
}
