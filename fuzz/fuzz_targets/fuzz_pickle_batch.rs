#![no_main]

use carbon_client::{encode_batch, FixedClock, Sample, HEADER_LEN};
use libfuzzer_sys::fuzz_target;

// Splits the input into paths on '\n'; each path gets one byte-derived value
fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let entries: Vec<(&str, Sample)> = text
        .split('\n')
        .enumerate()
        .map(|(i, path)| {
            let value = match i % 3 {
                0 => Sample::from(path.len()),
                1 => Sample::from(-(i as i64) * 1_000_003),
                _ => Sample::from(path),
            };
            (path, value)
        })
        .collect();

    let any_empty = entries.iter().any(|(path, _)| path.is_empty());
    match encode_batch(&FixedClock::new(1_539_872_837), entries) {
        Ok(frame) => {
            assert!(!any_empty);
            let declared = u32::from_be_bytes([frame[0], frame[1], frame[2], frame[3]]) as usize;
            assert_eq!(declared, frame.len() - HEADER_LEN);
            assert_eq!(frame[HEADER_LEN..HEADER_LEN + 2], [0x80, 0x02]);
            assert_eq!(frame.last(), Some(&b'.'));
        }
        Err(err) => {
            assert!(err.is_validation());
            assert!(any_empty);
        }
    }
});
