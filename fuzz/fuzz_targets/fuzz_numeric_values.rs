#![no_main]

use carbon_client::{encode_batch, format_with_timestamp, FixedClock, Sample};
use libfuzzer_sys::fuzz_target;

// Fuzz target focusing on numeric edge cases
fuzz_target!(|data: &[u8]| {
    if data.len() < 16 {
        return;
    }

    let clock = FixedClock::new(u64::from_le_bytes([
        data[0], data[1], data[2], data[3], data[4], data[5], data[6], data[7],
    ]));
    let bits = u64::from_le_bytes([
        data[8], data[9], data[10], data[11], data[12], data[13], data[14], data[15],
    ]);

    #[allow(clippy::cast_possible_wrap)]
    let samples = [
        Sample::from(bits),
        Sample::from(bits as i64),
        Sample::from(f64::from_bits(bits)),
        Sample::from(0),
        Sample::from(u64::MAX),
        Sample::from(i64::MIN),
        Sample::from(f64::NAN),
        Sample::from(f64::NEG_INFINITY),
    ];

    for sample in &samples {
        let text = format_with_timestamp(&clock, sample);
        assert!(!text.contains('\n'));
        assert_eq!(text.split(' ').count(), 2);
    }

    let entries = samples.iter().map(|sample| ("fuzz.numeric", sample.clone()));
    assert!(encode_batch(&clock, entries).is_ok());
});
