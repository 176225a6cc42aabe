//! Store front bag resolution.
//!
//! Before authenticating, a client fetches the store front "bag", a small
//! property list published at a fixed bootstrap URL, and reads the
//! authentication endpoint from it. [`BagResolver`] performs that lookup and
//! falls back to [`DEFAULT_AUTH_ENDPOINT`] whenever the bag is unusable: a
//! bootstrap URL that cannot be built, an empty body, a document that does
//! not decode, or a missing `authenticateAccount` entry. Transport failures
//! are not masked; they surface as [`ResolveError`] so callers can apply
//! their own policy.
//!
//! Traffic and degradation reasons are reported through an explicit
//! [`Diagnostics`] context. Request records redact credentials before they
//! reach the configured [`LogSink`].
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use storefront_bag::{BagResolver, Diagnostics, HttpTransport};
//! use storefront_config::Config;
//!
//! # async fn resolve() -> Result<(), storefront_bag::ResolveError> {
//! let diagnostics = Arc::new(Diagnostics::new(true));
//! let resolver = BagResolver::new(Config::default(), HttpTransport::new(), diagnostics);
//! let endpoint = resolver.resolve().await?;
//! println!("authenticate against {endpoint}");
//! # Ok(())
//! # }
//! ```
//!
//! The crate also defines [`ArtifactDescriptor`], the record handed to
//! download pipelines once an artifact has been purchased.

mod descriptor;
mod diagnostics;
mod endpoint;
mod errors;
mod provider;
mod resolver;
mod transport;

pub use descriptor::{ArtifactDescriptor, ArtifactMetadata, DescriptorError, SignatureBlob};
pub use diagnostics::{
    Diagnostics, LogEntry, LogLevel, LogSink, REDACTION_MARKER, RecordingSink, RequestRecord,
    ResponseRecord, TracingSink, is_sensitive_header,
};
pub use endpoint::{DEFAULT_AUTH_ENDPOINT, ResolvedEndpoint};
pub use errors::{ResolveError, TransportError};
pub use provider::BagConfiguration;
pub use resolver::{AUTH_ENDPOINT_KEY, BOOTSTRAP_URL, BagResolver};
pub use transport::{BagRequest, BagResponse, BagTransport, HttpTransport, MAX_REDIRECTS};

#[cfg(test)]
mod tests;
