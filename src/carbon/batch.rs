use crate::carbon::clock::Clock;
use crate::carbon::pickle::{payload_len_hint, BatchEntry, PickleWriter};
use crate::carbon::Sample;
use crate::{MetricResult, MetricsError};
use tracing::debug;

/// Size of the big-endian length header in front of every pickle payload.
pub const HEADER_LEN: usize = 4;

/// Encodes `entries` as one pickle protocol frame: a 4-byte big-endian payload
/// length followed by the pickled `[(path, (timestamp, value)), ...]`.
///
/// Every entry is stamped with the same timestamp, read once from `clock`.
/// Entry order is preserved.
///
/// # Errors
/// - [`MetricsError::EmptyBatch`] if `entries` is empty.
/// - [`MetricsError::EmptyMetricPath`] if any path is empty. Nothing is encoded.
/// - [`MetricsError::PayloadTooLarge`] if the payload length does not fit in a `u32`.
pub fn encode_batch<C, I, P, S>(clock: &C, entries: I) -> MetricResult<Vec<u8>>
where
    C: Clock,
    I: IntoIterator<Item = (P, S)>,
    P: AsRef<str>,
    S: Into<Sample>,
{
    encode_prefixed_batch(clock, "", entries)
}

pub(crate) fn encode_prefixed_batch<C, I, P, S>(
    clock: &C,
    prefix: &str,
    entries: I,
) -> MetricResult<Vec<u8>>
where
    C: Clock,
    I: IntoIterator<Item = (P, S)>,
    P: AsRef<str>,
    S: Into<Sample>,
{
    let timestamp = clock.now();
    let entries = entries
        .into_iter()
        .map(|(path, value)| {
            let path = path.as_ref();
            if path.is_empty() {
                return Err(MetricsError::EmptyMetricPath);
            }
            let mut full_path = String::with_capacity(prefix.len() + path.len());
            full_path.push_str(prefix);
            full_path.push_str(path);
            Ok(BatchEntry {
                path: full_path,
                timestamp,
                value: value.into(),
            })
        })
        .collect::<MetricResult<Vec<_>>>()?;

    if entries.is_empty() {
        return Err(MetricsError::EmptyBatch);
    }

    debug!("Metric data = {entries:?}");
    frame(&entries)
}

/// Writes the header and payload into one buffer without copying the payload.
fn frame(entries: &[BatchEntry]) -> MetricResult<Vec<u8>> {
    let mut buf = Vec::with_capacity(HEADER_LEN + payload_len_hint(entries));
    buf.extend_from_slice(&[0; HEADER_LEN]);
    PickleWriter::new(&mut buf).dump_entries(entries);

    let payload_len = buf.len() - HEADER_LEN;
    let header = u32::try_from(payload_len)
        .map_err(|_| MetricsError::PayloadTooLarge(payload_len))?
        .to_be_bytes();
    buf[..HEADER_LEN].copy_from_slice(&header);
    Ok(buf)
}
