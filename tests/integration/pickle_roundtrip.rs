use crate::support::{batch_entries, unix_now, unpickle, PickleValue};
use carbon_client::{encode_batch, FixedClock, Sample, SystemClock, HEADER_LEN};

#[test]
fn single_entry_round_trips() {
    let before = unix_now();
    let frame = encode_batch(&SystemClock::new(), [("a.b.c", 40)]).unwrap();
    let after = unix_now();

    let declared = u32::from_be_bytes(frame[..HEADER_LEN].try_into().unwrap()) as usize;
    assert_eq!(declared, frame.len() - HEADER_LEN);

    let entries = batch_entries(unpickle(&frame[HEADER_LEN..]));
    assert_eq!(entries.len(), 1);
    let (path, ts, value) = &entries[0];
    assert_eq!(path, "a.b.c");
    assert!(i128::from(before) <= *ts && *ts <= i128::from(after));
    assert_eq!(value, &PickleValue::Int(40));
}

#[test]
fn mixed_values_round_trip_in_order() {
    let clock = FixedClock::new(1_539_872_837);
    let entries = [
        ("svc.requests", Sample::from(40)),
        ("svc.latency", Sample::from(12.25)),
        ("svc.bytes", Sample::from(u64::MAX)),
        ("svc.delta", Sample::from(-70_000)),
        ("svc.version", Sample::from("1.2.3")),
    ];
    let frame = encode_batch(&clock, entries.clone()).unwrap();
    let decoded = batch_entries(unpickle(&frame[HEADER_LEN..]));

    let expected = [
        PickleValue::Int(40),
        PickleValue::Float(12.25),
        PickleValue::Int(i128::from(u64::MAX)),
        PickleValue::Int(-70_000),
        PickleValue::Str("1.2.3".to_string()),
    ];
    assert_eq!(decoded.len(), entries.len());
    for ((path, ts, value), ((want_path, _), want_value)) in
        decoded.iter().zip(entries.iter().zip(expected.iter()))
    {
        assert_eq!(path, want_path);
        assert_eq!(*ts, 1_539_872_837);
        assert_eq!(value, want_value);
    }
}

#[test]
fn all_entries_share_one_timestamp() {
    let paths: Vec<String> = (0..1500).map(|i| format!("host{i}.cpu")).collect();
    let frame = encode_batch(&SystemClock::new(), paths.iter().map(|p| (p, 1))).unwrap();
    let decoded = batch_entries(unpickle(&frame[HEADER_LEN..]));

    assert_eq!(decoded.len(), 1500);
    let first_ts = decoded[0].1;
    assert!(decoded.iter().all(|(_, ts, _)| *ts == first_ts));
    assert!(decoded.iter().zip(&paths).all(|((path, _, _), want)| path == want));
}
