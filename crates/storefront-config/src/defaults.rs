//! Built-in configuration values used when no layer overrides them.

use crate::logging::LogFormat;

/// Device identifier used when none is configured.
pub const DEFAULT_DEVICE_IDENTIFIER: &str = "000000000000";

/// User agent presented to the store front by default.
pub const DEFAULT_USER_AGENT: &str = "Configurator/2.17 (Macintosh; OS X 15.2; 24C5089c) AppleWebKit/0620.1.16.11.6";

/// Default connection timeout, in seconds.
pub const DEFAULT_TIMEOUT_CONNECT_SECS: u64 = 10;

/// Default response read timeout, in seconds.
pub const DEFAULT_TIMEOUT_READ_SECS: u64 = 30;

/// Default log filter expression used by the binaries.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Owned device identifier used where allocation is required (e.g. serde).
#[must_use]
pub fn default_device_identifier() -> String {
    DEFAULT_DEVICE_IDENTIFIER.to_owned()
}

/// Owned user agent used where allocation is required (e.g. serde).
#[must_use]
pub fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_owned()
}

/// Default connection timeout, in seconds.
#[must_use]
pub const fn default_timeout_connect_secs() -> u64 {
    DEFAULT_TIMEOUT_CONNECT_SECS
}

/// Default response read timeout, in seconds.
#[must_use]
pub const fn default_timeout_read_secs() -> u64 {
    DEFAULT_TIMEOUT_READ_SECS
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binaries.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Json
}
