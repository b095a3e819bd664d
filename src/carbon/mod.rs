use std::fmt;
use std::sync::Arc;

pub mod batch;
pub mod client;
pub mod clock;
pub mod connection;
pub mod macros;
pub mod pickle;
pub mod plaintext;
pub mod sender;
pub mod startup;

/// Port the carbon daemon listens on for the plaintext protocol.
pub const DEFAULT_PLAINTEXT_PORT: u16 = 2003;

/// Port the carbon daemon listens on for the pickle protocol.
pub const DEFAULT_PICKLE_PORT: u16 = 2004;

/// A value recorded for a metric path.
///
/// # Choosing the Right Variant
///
/// | Variant | Plaintext rendering | Pickle opcode |
/// |---------|---------------------|---------------|
/// | `Sample::Int` | decimal | `BININT1` / `BININT2` / `BININT` / `LONG1` |
/// | `Sample::UInt` | decimal | same as `Int`, `LONG1` above `i32::MAX` |
/// | `Sample::Float` | shortest round-trip, `40.0` for integral values, `1e+20` outside `[1e-4, 1e16)` | `BINFLOAT` |
/// | `Sample::Text` | verbatim | `BINUNICODE` |
///
/// Most callers never name a variant: every primitive number and string
/// converts with `Sample::from`.
#[derive(Debug, Clone, PartialEq)]
pub enum Sample {
    /// A signed integer.
    Int(i64),
    /// An unsigned integer, kept separate so `u64::MAX` survives intact.
    UInt(u64),
    /// A floating point number.
    Float(f64),
    /// Any value already rendered as text. Written as-is.
    Text(Arc<str>),
}

impl Sample {
    /// Appends the plaintext rendering of this sample to `out`.
    pub fn write_plaintext(&self, out: &mut String) {
        match self {
            Self::Int(v) => out.push_str(itoa::Buffer::new().format(*v)),
            Self::UInt(v) => out.push_str(itoa::Buffer::new().format(*v)),
            Self::Float(v) => push_float(out, *v),
            Self::Text(s) => out.push_str(s),
        }
    }

    /// Upper bound of the plaintext rendering length, used to size buffers.
    pub(crate) fn plaintext_len_hint(&self) -> usize {
        match self {
            Self::Int(_) | Self::UInt(_) => 20,
            Self::Float(_) => 24,
            Self::Text(s) => s.len(),
        }
    }
}

fn push_float(out: &mut String, value: f64) {
    if value.is_nan() {
        out.push_str("nan");
    } else if value.is_infinite() {
        out.push_str(if value.is_sign_positive() { "inf" } else { "-inf" });
    } else if value.abs() >= 1e16 || (value.abs() > 0.0 && value.abs() < 1e-4) {
        push_exponent_float(out, value);
    } else {
        let start = out.len();
        out.push_str(&value.to_string());
        if !out[start..].contains('.') {
            out.push_str(".0");
        }
    }
}

// `1e+16`, `-2.5e-05`: at least two exponent digits, explicit sign
fn push_exponent_float(out: &mut String, value: f64) {
    let rendered = format!("{value:e}");
    let (mantissa, exponent) = rendered.split_once('e').unwrap_or((rendered.as_str(), "0"));
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    out.push_str(mantissa);
    out.push('e');
    out.push(sign);
    if digits.len() < 2 {
        out.push('0');
    }
    out.push_str(digits);
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::with_capacity(self.plaintext_len_hint());
        self.write_plaintext(&mut out);
        f.write_str(&out)
    }
}

macro_rules! sample_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for Sample {
            fn from(value: $t) -> Self {
                Self::Int(i64::from(value))
            }
        })*
    };
}

macro_rules! sample_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for Sample {
            fn from(value: $t) -> Self {
                Self::UInt(u64::from(value))
            }
        })*
    };
}

sample_from_signed!(i8, i16, i32, i64);
sample_from_unsigned!(u8, u16, u32, u64);

impl From<isize> for Sample {
    fn from(value: isize) -> Self {
        // isize is at most 64 bits on every supported target
        #[allow(clippy::cast_possible_truncation)]
        Self::Int(value as i64)
    }
}

impl From<usize> for Sample {
    fn from(value: usize) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        Self::UInt(value as u64)
    }
}

impl From<f32> for Sample {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for Sample {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Sample {
    fn from(value: &str) -> Self {
        Self::Text(Arc::from(value))
    }
}

impl From<String> for Sample {
    fn from(value: String) -> Self {
        Self::Text(Arc::from(value))
    }
}

impl From<Arc<str>> for Sample {
    fn from(value: Arc<str>) -> Self {
        Self::Text(value)
    }
}
