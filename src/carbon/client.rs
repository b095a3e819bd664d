use std::time::Duration;

use crate::carbon::batch::encode_prefixed_batch;
use crate::carbon::clock::{Clock, SystemClock};
use crate::carbon::connection::{ConnectionHandle, TcpConnector, TcpTransport, Transport};
use crate::carbon::plaintext::encode_prefixed_line;
use crate::carbon::sender::{self, SendStatus};
use crate::carbon::Sample;
use crate::MetricResult;
use tracing::warn;

/// Trait defining the interface for submitting metrics to a carbon daemon.
pub trait CarbonSink {
    /// Sends one metric using the plaintext protocol, stamped with the current time.
    ///
    /// # Errors
    /// Validation errors ([`crate::MetricsError::is_validation`]) mean nothing
    /// was sent. [`crate::MetricsError::TransportWrite`] means the write failed.
    fn send_plaintext<V>(&self, metric_path: &str, value: V) -> MetricResult<SendStatus>
    where
        V: Into<Sample>;

    /// Sends a batch of metrics as one pickle protocol frame. All entries share
    /// one timestamp.
    ///
    /// # Errors
    /// Validation errors ([`crate::MetricsError::is_validation`]) mean nothing
    /// was sent. [`crate::MetricsError::TransportWrite`] means the write failed.
    fn send_pickle<I, P, V>(&self, entries: I) -> MetricResult<SendStatus>
    where
        I: IntoIterator<Item = (P, V)>,
        P: AsRef<str>,
        V: Into<Sample>;
}

/// Configuration options for [`CarbonClient::connect`].
#[derive(Debug, Clone)]
pub struct CarbonClientOptions {
    /// Upper bound for each TCP connection attempt. `None` leaves it to the OS.
    pub connect_timeout: Option<Duration>,
    /// Disables Nagle's algorithm so every metric leaves immediately.
    pub nodelay: bool,
    /// Prefix prepended verbatim to all metric paths. Include a trailing dot if desired
    /// (e.g., `"myapp."` results in `"myapp.metric"`).
    pub metric_prefix: String,
}

impl Default for CarbonClientOptions {
    fn default() -> Self {
        Self {
            connect_timeout: None,
            nodelay: true,
            metric_prefix: String::new(),
        }
    }
}

/// A carbon client bound to one connection.
///
/// The client is `Send + Sync` when its transport and clock are, and can be shared
/// across threads via `Arc<CarbonClient>`. Each call encodes independently; writes
/// to the shared connection are serialized.
///
/// # Example
///
/// ```no_run
/// use carbon_client::{CarbonClient, CarbonClientOptions, CarbonSink};
///
/// let options = CarbonClientOptions {
///     metric_prefix: "myapp.".to_string(),
///     ..CarbonClientOptions::default()
/// };
/// let client = CarbonClient::connect("127.0.0.1", 2004, options)?;
/// client.send_pickle([("requests", 40), ("errors", 2)])?;
/// # Ok::<(), carbon_client::MetricsError>(())
/// ```
pub struct CarbonClient<T = TcpTransport, C = SystemClock> {
    handle: ConnectionHandle<T>,
    clock: C,
    metric_prefix: String,
}

impl CarbonClient {
    /// Connects to the carbon daemon at `(host, port)`.
    ///
    /// # Errors
    /// Returns [`crate::MetricsError::Resolution`] or [`crate::MetricsError::Connection`]
    /// if the single connection attempt fails. There is no degraded mode.
    pub fn connect(host: &str, port: u16, options: CarbonClientOptions) -> MetricResult<Self> {
        let connector = TcpConnector::new(options.connect_timeout, options.nodelay);
        let handle = ConnectionHandle::open_with(&connector, host, port).into_connected()?;
        Ok(Self::with_clock(handle, SystemClock::new(), options.metric_prefix))
    }
}

impl<T: Transport, C: Clock> CarbonClient<T, C> {
    /// Builds a client around an existing handle and clock.
    ///
    /// The handle may be in the failed state; every send then reports
    /// [`SendStatus::NotConnected`].
    pub fn with_clock(handle: ConnectionHandle<T>, clock: C, metric_prefix: String) -> Self {
        Self {
            handle,
            clock,
            metric_prefix,
        }
    }

    /// The connection this client writes to.
    pub const fn handle(&self) -> &ConnectionHandle<T> {
        &self.handle
    }

    /// The clock stamping outgoing metrics.
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Sends already formatted plaintext lines as-is.
    ///
    /// # Errors
    /// Returns [`crate::MetricsError::TransportWrite`] if the write fails.
    pub fn send_raw_plaintext(&self, lines: &str) -> MetricResult<SendStatus> {
        sender::send_plaintext(&self.handle, lines)
    }
}

impl<T: Transport, C: Clock> CarbonSink for CarbonClient<T, C> {
    fn send_plaintext<V>(&self, metric_path: &str, value: V) -> MetricResult<SendStatus>
    where
        V: Into<Sample>,
    {
        let line = encode_prefixed_line(&self.clock, &self.metric_prefix, metric_path, &value.into())
            .inspect_err(|err| warn!("Plaintext metric not sent: {err}"))?;
        sender::send_plaintext(&self.handle, &line)
    }

    fn send_pickle<I, P, V>(&self, entries: I) -> MetricResult<SendStatus>
    where
        I: IntoIterator<Item = (P, V)>,
        P: AsRef<str>,
        V: Into<Sample>,
    {
        let frame = encode_prefixed_batch(&self.clock, &self.metric_prefix, entries)
            .inspect_err(|err| warn!("Pickle batch not sent: {err}"))?;
        sender::send_pickle(&self.handle, &frame)
    }
}

impl<T, C> std::fmt::Debug for CarbonClient<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarbonClient")
            .field("handle", &self.handle)
            .field("metric_prefix", &self.metric_prefix)
            .finish_non_exhaustive()
    }
}
