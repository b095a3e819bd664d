use crate::carbon::clock::Clock;
use crate::carbon::Sample;
use crate::{MetricResult, MetricsError};
use tracing::debug;

/// Renders `"<value> <timestamp>"` with the timestamp taken from `clock`.
///
/// Example: `77 1234423`
pub fn format_with_timestamp<C: Clock>(clock: &C, value: &Sample) -> String {
    let mut out = String::with_capacity(value.plaintext_len_hint() + 21);
    push_value_and_timestamp(&mut out, value, clock.now());
    debug!("Formatted data: {out}");
    out
}

/// Encodes one plaintext protocol line: `"<metric_path> <value> <timestamp>\n"`.
///
/// The timestamp is read from `clock` during this call. The path and value are
/// not escaped, so embedded spaces or newlines produce a malformed line.
///
/// # Errors
/// Returns [`MetricsError::EmptyMetricPath`] if `metric_path` is empty.
pub fn encode_line<C: Clock>(clock: &C, metric_path: &str, value: &Sample) -> MetricResult<String> {
    encode_prefixed_line(clock, "", metric_path, value)
}

pub(crate) fn encode_prefixed_line<C: Clock>(
    clock: &C,
    prefix: &str,
    metric_path: &str,
    value: &Sample,
) -> MetricResult<String> {
    if metric_path.is_empty() {
        return Err(MetricsError::EmptyMetricPath);
    }

    let mut line = String::with_capacity(line_len_hint(prefix, metric_path, value));
    line.push_str(prefix);
    line.push_str(metric_path);
    line.push(' ');
    push_value_and_timestamp(&mut line, value, clock.now());
    line.push('\n');

    debug!("Metric data: {}", line.trim_end());
    Ok(line)
}

fn push_value_and_timestamp(out: &mut String, value: &Sample, timestamp: u64) {
    value.write_plaintext(out);
    out.push(' ');
    out.push_str(itoa::Buffer::new().format(timestamp));
}

#[inline]
fn line_len_hint(prefix: &str, metric_path: &str, value: &Sample) -> usize {
    // "{prefix}{path} {value} {timestamp}\n"
    prefix.len() + metric_path.len() + value.plaintext_len_hint() + 20 + 3
}
