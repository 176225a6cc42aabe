//! Connection parameters consumed by the resolver.

use std::sync::Arc;
use std::time::Duration;

use storefront_config::{Config, TlsConfiguration};

/// Read-only source of the settings used for the bootstrap request.
pub trait BagConfiguration: Send + Sync {
    /// Identifier sent as the `guid` query parameter.
    fn device_identifier(&self) -> &str;

    /// TLS parameters for the connection.
    fn tls(&self) -> TlsConfiguration;

    /// `User-Agent` header value.
    fn user_agent(&self) -> &str;

    /// Connection establishment timeout.
    fn timeout_connect(&self) -> Duration;

    /// Response read timeout.
    fn timeout_read(&self) -> Duration;
}

impl BagConfiguration for Config {
    fn device_identifier(&self) -> &str {
        Self::device_identifier(self)
    }

    fn tls(&self) -> TlsConfiguration {
        Self::tls(self)
    }

    fn user_agent(&self) -> &str {
        Self::user_agent(self)
    }

    fn timeout_connect(&self) -> Duration {
        Self::timeout_connect(self)
    }

    fn timeout_read(&self) -> Duration {
        Self::timeout_read(self)
    }
}

impl<T> BagConfiguration for Arc<T>
where
    T: BagConfiguration + ?Sized,
{
    fn device_identifier(&self) -> &str {
        (**self).device_identifier()
    }

    fn tls(&self) -> TlsConfiguration {
        (**self).tls()
    }

    fn user_agent(&self) -> &str {
        (**self).user_agent()
    }

    fn timeout_connect(&self) -> Duration {
        (**self).timeout_connect()
    }

    fn timeout_read(&self) -> Duration {
        (**self).timeout_read()
    }
}
