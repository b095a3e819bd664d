use crate::carbon::connection::{ConnectionHandle, Transport};
use crate::MetricResult;
use tracing::{debug, warn};

/// Outcome of a send that did not fail at the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendStatus {
    /// The whole buffer was written; carries its length in bytes.
    Sent(usize),
    /// Nothing to send. The transport was not touched.
    EmptyPayload,
    /// The handle is not connected. The transport was not touched.
    NotConnected,
}

impl SendStatus {
    /// `true` if bytes were written.
    #[must_use]
    pub const fn is_sent(self) -> bool {
        matches!(self, Self::Sent(_))
    }
}

/// Sends one or more already formatted plaintext lines.
///
/// # Errors
/// Returns [`crate::MetricsError::TransportWrite`] if the write fails on a connected handle.
pub fn send_plaintext<T: Transport>(
    handle: &ConnectionHandle<T>,
    lines: &str,
) -> MetricResult<SendStatus> {
    if !lines.is_empty() {
        debug!("Executing insert plain text with data: {}", lines.trim_end());
    }
    gated_write(handle, lines.as_bytes())
}

/// Sends one pickle frame (header and payload) as a single write.
///
/// # Errors
/// Returns [`crate::MetricsError::TransportWrite`] if the write fails on a connected handle.
pub fn send_pickle<T: Transport>(
    handle: &ConnectionHandle<T>,
    frame: &[u8],
) -> MetricResult<SendStatus> {
    if !frame.is_empty() {
        debug!("Executing insert with pickle frame of {} bytes", frame.len());
    }
    gated_write(handle, frame)
}

fn gated_write<T: Transport>(handle: &ConnectionHandle<T>, bytes: &[u8]) -> MetricResult<SendStatus> {
    if bytes.is_empty() {
        warn!("You cannot send empty data, please check the data you are sending");
        return Ok(SendStatus::EmptyPayload);
    }

    // checked under the same lock the write happens with
    let Some(mut transport) = handle.lock() else {
        warn!(
            "Connection to the carbon server {} was not established",
            handle.endpoint()
        );
        return Ok(SendStatus::NotConnected);
    };

    transport.write_all(bytes)?;
    Ok(SendStatus::Sent(bytes.len()))
}
