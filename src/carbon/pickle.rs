//! Pickle protocol 2 writer for the carbon batch shape `[(path, (timestamp, value)), ...]`.
//!
//! Only the opcodes needed for lists, 2-tuples, strings, integers and floats are
//! emitted, in the same order and with the same memo indices as CPython's
//! `pickle.dumps(obj, protocol=2)`, so the output is byte-identical.

use crate::carbon::Sample;

/// Pickle protocol version written in the `PROTO` opcode.
pub const PICKLE_PROTOCOL: u8 = 2;

// CPython emits list items in runs of this size.
const BATCH_SIZE: usize = 1000;

const PROTO: u8 = 0x80;
const STOP: u8 = b'.';
const MARK: u8 = b'(';
const EMPTY_LIST: u8 = b']';
const APPEND: u8 = b'a';
const APPENDS: u8 = b'e';
const TUPLE2: u8 = 0x86;
const BINPUT: u8 = b'q';
const LONG_BINPUT: u8 = b'r';
const BINUNICODE: u8 = b'X';
const BININT: u8 = b'J';
const BININT1: u8 = b'K';
const BININT2: u8 = b'M';
const LONG1: u8 = 0x8a;
const BINFLOAT: u8 = b'G';

/// One metric of a pickle batch. The timestamp is filled in by the batch encoder.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchEntry {
    /// Full metric path, prefix included.
    pub path: String,
    /// Seconds since the Unix epoch.
    pub timestamp: u64,
    /// Metric value.
    pub value: Sample,
}

pub(crate) struct PickleWriter<'buf> {
    buf: &'buf mut Vec<u8>,
    memo: u32,
}

impl<'buf> PickleWriter<'buf> {
    pub fn new(buf: &'buf mut Vec<u8>) -> Self {
        Self { buf, memo: 0 }
    }

    /// Appends the complete pickle of `entries` (header opcode through `STOP`).
    pub fn dump_entries(mut self, entries: &[BatchEntry]) {
        self.buf.extend_from_slice(&[PROTO, PICKLE_PROTOCOL]);
        self.buf.push(EMPTY_LIST);
        self.put();

        // APPEND only for a one-item list; every run of a longer list uses
        // MARK .. APPENDS, even a trailing run of one
        if let [entry] = entries {
            self.entry(entry);
            self.buf.push(APPEND);
        } else {
            for chunk in entries.chunks(BATCH_SIZE) {
                self.buf.push(MARK);
                for entry in chunk {
                    self.entry(entry);
                }
                self.buf.push(APPENDS);
            }
        }

        self.buf.push(STOP);
    }

    fn entry(&mut self, entry: &BatchEntry) {
        self.string(&entry.path);
        self.int(i128::from(entry.timestamp));
        self.sample(&entry.value);
        self.buf.push(TUPLE2);
        self.put();
        self.buf.push(TUPLE2);
        self.put();
    }

    fn sample(&mut self, value: &Sample) {
        match value {
            Sample::Int(v) => self.int(i128::from(*v)),
            Sample::UInt(v) => self.int(i128::from(*v)),
            Sample::Float(v) => self.float(*v),
            Sample::Text(s) => self.string(s),
        }
    }

    fn put(&mut self) {
        if let Ok(index) = u8::try_from(self.memo) {
            self.buf.extend_from_slice(&[BINPUT, index]);
        } else {
            self.buf.push(LONG_BINPUT);
            self.buf.extend_from_slice(&self.memo.to_le_bytes());
        }
        self.memo += 1;
    }

    fn string(&mut self, value: &str) {
        self.buf.push(BINUNICODE);
        // Strings come from metric paths and rendered samples; a 4 GiB string is not a metric.
        #[allow(clippy::cast_possible_truncation)]
        self.buf
            .extend_from_slice(&(value.len() as u32).to_le_bytes());
        self.buf.extend_from_slice(value.as_bytes());
        self.put();
    }

    fn int(&mut self, value: i128) {
        if let Ok(v) = u8::try_from(value) {
            self.buf.extend_from_slice(&[BININT1, v]);
        } else if let Ok(v) = u16::try_from(value) {
            self.buf.push(BININT2);
            self.buf.extend_from_slice(&v.to_le_bytes());
        } else if let Ok(v) = i32::try_from(value) {
            self.buf.push(BININT);
            self.buf.extend_from_slice(&v.to_le_bytes());
        } else {
            let bytes = encode_long(value);
            self.buf.push(LONG1);
            #[allow(clippy::cast_possible_truncation)]
            self.buf.push(bytes.len() as u8);
            self.buf.extend_from_slice(&bytes);
        }
    }

    fn float(&mut self, value: f64) {
        self.buf.push(BINFLOAT);
        self.buf.extend_from_slice(&value.to_be_bytes());
    }
}

/// Minimal little-endian two's complement bytes of `value`, as `LONG1` expects.
fn encode_long(value: i128) -> Vec<u8> {
    if value == 0 {
        return Vec::new();
    }
    let bit_length = (i128::BITS - value.unsigned_abs().leading_zeros()) as usize;
    let mut len = (bit_length >> 3) + 1;
    let bytes = value.to_le_bytes();
    if value < 0 && len > 1 && bytes[len - 1] == 0xff && bytes[len - 2] & 0x80 != 0 {
        len -= 1;
    }
    bytes[..len].to_vec()
}

/// Pickles `entries` into a fresh buffer, without the length header.
///
/// Paths and timestamps are written as given; use [`crate::encode_batch`] for
/// validated, framed batches.
#[must_use]
pub fn dumps(entries: &[BatchEntry]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(payload_len_hint(entries));
    PickleWriter::new(&mut buf).dump_entries(entries);
    buf
}

pub(crate) fn payload_len_hint(entries: &[BatchEntry]) -> usize {
    // per entry: string opcode + len + put, timestamp, value, two tuples with puts
    entries
        .iter()
        .map(|entry| entry.path.len() + entry.value.plaintext_len_hint() + 24)
        .sum::<usize>()
        + 8
}
