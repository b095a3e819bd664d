#![no_main]

use carbon_client::{encode_line, FixedClock, MetricsError, Sample};
use libfuzzer_sys::fuzz_target;

// Arbitrary paths: empty is rejected, anything else yields "<path> 1 42\n"
fuzz_target!(|data: &[u8]| {
    let path = String::from_utf8_lossy(data);
    match encode_line(&FixedClock::new(42), &path, &Sample::from(1)) {
        Ok(line) => {
            assert!(!path.is_empty());
            assert_eq!(line.len(), path.len() + " 1 42\n".len());
            assert!(line.starts_with(path.as_ref()));
            assert!(line.ends_with(" 1 42\n"));
        }
        Err(MetricsError::EmptyMetricPath) => assert!(path.is_empty()),
        Err(err) => panic!("unexpected error: {err}"),
    }
});
