use thiserror::Error;

/// Errors that can occur while encoding and transmitting metrics.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// The carbon host name could not be resolved.
    #[error("Could not resolve carbon host {host}: {source}")]
    Resolution {
        /// Host name as given by the caller.
        host: String,
        /// Underlying resolver error.
        #[source]
        source: std::io::Error,
    },

    /// The carbon daemon refused the connection or was unreachable.
    #[error("Could not connect to carbon server {endpoint}: {source}")]
    Connection {
        /// `host:port` the connection was attempted against.
        endpoint: String,
        /// Error of the last connection attempt.
        #[source]
        source: std::io::Error,
    },

    /// A metric path was empty.
    #[error("Metric path cannot be empty")]
    EmptyMetricPath,

    /// A batch had no entries.
    #[error("No data to send")]
    EmptyBatch,

    /// A pickle payload is longer than the 4-byte length header can describe.
    #[error("Pickle payload of {0} bytes does not fit the length header")]
    PayloadTooLarge(usize),

    /// Writing to an established connection failed.
    #[error("Transport write error: {0}")]
    TransportWrite(#[from] std::io::Error),
}

impl MetricsError {
    /// Returns `true` for per-call input errors. Nothing was sent and the
    /// connection is still usable.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyMetricPath | Self::EmptyBatch | Self::PayloadTooLarge(_)
        )
    }

    /// Returns `true` for errors the caller is not expected to recover from:
    /// startup connection failures and transport write failures.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Resolution { .. } | Self::Connection { .. } | Self::TransportWrite(_)
        )
    }
}
