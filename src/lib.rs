//! # carbon-client
//!
//! A small client for feeding a Graphite carbon daemon over a persistent TCP connection.
//!
//! ## Features
//!
//! - **Plaintext protocol**: one `<path> <value> <timestamp>\n` line per metric
//! - **Pickle protocol**: a 4-byte big-endian length header followed by a pickle
//!   protocol 2 payload of `[(path, (timestamp, value)), ...]`, byte-compatible with CPython
//! - **Explicit connection health**: a handle that failed to connect never writes
//! - **Injected clock**: timestamps come from a [`Clock`] so tests can freeze time
//!
//! ## Quick Start
//!
//! ```no_run
//! use carbon_client::{CarbonClient, CarbonClientOptions, CarbonSink, Sample};
//! use carbon_client::{pickle, plaintext};
//!
//! let client = CarbonClient::connect("127.0.0.1", 2003, CarbonClientOptions::default())?;
//!
//! // Direct API
//! client.send_plaintext("service.requests.count", Sample::Int(40))?;
//!
//! // Convenience macros
//! plaintext!(client, "service.cpu.load", 0.75)?;
//! # let client = CarbonClient::connect("127.0.0.1", 2004, CarbonClientOptions::default())?;
//! pickle!(client, ("service.disk.used", 91), ("service.disk.free", 9))?;
//! # Ok::<(), carbon_client::MetricsError>(())
//! ```

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![warn(clippy::missing_errors_doc)]
#![warn(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

// https://graphite.readthedocs.io/en/latest/feeding-carbon.html
mod carbon;
mod error;

pub use carbon::batch::{encode_batch, HEADER_LEN};
pub use carbon::client::{CarbonClient, CarbonClientOptions, CarbonSink};
pub use carbon::clock::{Clock, FixedClock, SystemClock};
pub use carbon::connection::{
    ConnectionHandle, ConnectionState, Connector, TcpConnector, TcpTransport, Transport,
};
pub use carbon::pickle::{dumps, BatchEntry, PICKLE_PROTOCOL};
pub use carbon::plaintext::{encode_line, format_with_timestamp};
pub use carbon::sender::{send_pickle, send_plaintext, SendStatus};
pub use carbon::startup::{connect_or_exit, ExitHook, ProcessExit, FATAL_EXIT_STATUS};
pub use carbon::{Sample, DEFAULT_PICKLE_PORT, DEFAULT_PLAINTEXT_PORT};
pub use error::MetricsError;

/// Result type for metric operations.
///
/// Wraps errors that can occur during metric encoding and transmission.
pub type MetricResult<T> = Result<T, MetricsError>;
