//! Diagnostics context for bag resolution.
//!
//! [`Diagnostics`] carries the verbosity switch and the sink that receives
//! rendered messages. It is constructed explicitly by the embedding
//! application and shared by reference with every resolver, so there is no
//! process-wide logging state. Informational and error messages always reach
//! the sink; debug messages and traffic records are skipped entirely, before
//! any formatting, unless verbose mode is enabled.
//!
//! Request records redact the value of every header whose name contains
//! `token`, `password` or `authorization` (ignoring case), which covers
//! custom headers as well as the well-known ones.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// Replacement emitted in place of sensitive header values.
pub const REDACTION_MARKER: &str = "<redacted>";

const SENSITIVE_HEADER_FRAGMENTS: &[&str] = &["token", "password", "authorization"];

/// Severity attached to a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    /// Verbose-only troubleshooting output.
    Debug,
    /// Informational output that is always emitted.
    Info,
    /// Error output that is always emitted.
    Error,
}

/// Destination for rendered diagnostic messages.
pub trait LogSink: Send + Sync {
    /// Receives one rendered message.
    fn emit(&self, level: LogLevel, message: &str);
}

impl<T> LogSink for Arc<T>
where
    T: LogSink + ?Sized,
{
    fn emit(&self, level: LogLevel, message: &str) {
        (**self).emit(level, message);
    }
}

/// Sink that forwards messages to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn emit(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Debug => tracing::debug!(target: "storefront::bag", "{message}"),
            LogLevel::Info => tracing::info!(target: "storefront::bag", "{message}"),
            LogLevel::Error => tracing::error!(target: "storefront::bag", "{message}"),
        }
    }
}

/// Message captured by a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Severity of the message.
    pub level: LogLevel,
    /// Rendered message text.
    pub message: String,
}

/// Sink that keeps every message in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    entries: Mutex<Vec<LogEntry>>,
}

impl RecordingSink {
    /// Builds an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the messages recorded so far.
    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Messages recorded at the given level.
    #[must_use]
    pub fn messages_at(&self, level: LogLevel) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|entry| entry.level == level)
            .map(|entry| entry.message)
            .collect()
    }
}

impl LogSink for RecordingSink {
    fn emit(&self, level: LogLevel, message: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(LogEntry {
                level,
                message: message.to_owned(),
            });
    }
}

/// Returns `true` when a header's value must not be logged.
#[must_use]
pub fn is_sensitive_header(name: &str) -> bool {
    let lowered = name.to_ascii_lowercase();
    SENSITIVE_HEADER_FRAGMENTS
        .iter()
        .any(|fragment| lowered.contains(fragment))
}

/// Snapshot of an outbound request, rendered with sensitive values redacted.
#[derive(Debug, Clone, Copy)]
pub struct RequestRecord<'a, N, V> {
    method: &'a str,
    url: &'a str,
    headers: &'a [(N, V)],
}

impl<'a, N, V> RequestRecord<'a, N, V> {
    /// Captures the parts of a request that are logged.
    #[must_use]
    pub const fn new(method: &'a str, url: &'a str, headers: &'a [(N, V)]) -> Self {
        Self {
            method,
            url,
            headers,
        }
    }
}

impl<N, V> fmt::Display for RequestRecord<'_, N, V>
where
    N: AsRef<str>,
    V: AsRef<str>,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, ">>> {} {}", self.method, self.url)?;
        for (name, value) in self.headers {
            let name = name.as_ref();
            let value = if is_sensitive_header(name) {
                REDACTION_MARKER
            } else {
                value.as_ref()
            };
            write!(formatter, "\n    {name}: {value}")?;
        }
        Ok(())
    }
}

/// Snapshot of an inbound response. Header values are rendered verbatim.
#[derive(Debug, Clone, Copy)]
pub struct ResponseRecord<'a, N, V> {
    status: u16,
    headers: &'a [(N, V)],
    body_size: Option<usize>,
}

impl<'a, N, V> ResponseRecord<'a, N, V> {
    /// Captures the parts of a response that are logged.
    #[must_use]
    pub const fn new(status: u16, headers: &'a [(N, V)], body_size: Option<usize>) -> Self {
        Self {
            status,
            headers,
            body_size,
        }
    }
}

impl<N, V> fmt::Display for ResponseRecord<'_, N, V>
where
    N: AsRef<str>,
    V: AsRef<str>,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "<<< {}", self.status)?;
        if let Some(size) = self.body_size {
            write!(formatter, " ({size} bytes)")?;
        }
        for (name, value) in self.headers {
            write!(formatter, "\n    {}: {}", name.as_ref(), value.as_ref())?;
        }
        Ok(())
    }
}

/// Logging context shared by resolvers.
pub struct Diagnostics {
    verbose: AtomicBool,
    sink: RwLock<Arc<dyn LogSink>>,
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Diagnostics")
            .field("verbose", &self.is_verbose())
            .finish_non_exhaustive()
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Diagnostics {
    /// Builds a context that forwards to `tracing`.
    #[must_use]
    pub fn new(verbose: bool) -> Self {
        Self::with_sink(verbose, Arc::new(TracingSink))
    }

    /// Builds a context that forwards to the supplied sink.
    #[must_use]
    pub fn with_sink(verbose: bool, sink: Arc<dyn LogSink>) -> Self {
        Self {
            verbose: AtomicBool::new(verbose),
            sink: RwLock::new(sink),
        }
    }

    /// Whether verbose output is enabled.
    #[must_use]
    pub fn is_verbose(&self) -> bool {
        self.verbose.load(Ordering::Relaxed)
    }

    /// Toggles verbose output.
    pub fn set_verbose(&self, verbose: bool) {
        self.verbose.store(verbose, Ordering::Relaxed);
    }

    /// Replaces the sink receiving subsequent messages.
    pub fn set_sink(&self, sink: Arc<dyn LogSink>) {
        *self.sink.write().unwrap_or_else(PoisonError::into_inner) = sink;
    }

    /// Emits an informational message.
    pub fn info(&self, message: impl fmt::Display) {
        self.emit(LogLevel::Info, &message);
    }

    /// Emits a debug message when verbose output is enabled.
    pub fn debug(&self, message: impl fmt::Display) {
        if !self.is_verbose() {
            return;
        }
        self.emit(LogLevel::Debug, &message);
    }

    /// Emits an error message.
    pub fn error(&self, message: impl fmt::Display) {
        self.emit(LogLevel::Error, &message);
    }

    /// Logs an outbound request when verbose output is enabled.
    pub fn log_request<N, V>(&self, method: &str, url: &str, headers: &[(N, V)])
    where
        N: AsRef<str>,
        V: AsRef<str>,
    {
        if !self.is_verbose() {
            return;
        }
        self.debug(RequestRecord::new(method, url, headers));
    }

    /// Logs an inbound response when verbose output is enabled.
    pub fn log_response<N, V>(&self, status: u16, headers: &[(N, V)], body_size: Option<usize>)
    where
        N: AsRef<str>,
        V: AsRef<str>,
    {
        if !self.is_verbose() {
            return;
        }
        self.debug(ResponseRecord::new(status, headers, body_size));
    }

    fn emit(&self, level: LogLevel, message: &dyn fmt::Display) {
        let sink = Arc::clone(&self.sink.read().unwrap_or_else(PoisonError::into_inner));
        sink.emit(level, &message.to_string());
    }
}
