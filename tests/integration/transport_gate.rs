use carbon_client::{
    pickle, plaintext, send_pickle, send_plaintext, CarbonClient, CarbonSink, ConnectionHandle,
    ConnectionState, FixedClock, MetricsError, SendStatus, Transport,
};
use parking_lot::Mutex;
use std::sync::Arc;

/// A transport that records every write call.
#[derive(Clone, Default)]
pub struct RecordingTransport {
    writes: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl RecordingTransport {
    fn write_count(&self) -> usize {
        self.writes.lock().len()
    }

    fn all_text(&self) -> String {
        let writes = self.writes.lock();
        String::from_utf8(writes.concat()).unwrap()
    }
}

impl Transport for RecordingTransport {
    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        self.writes.lock().push(buf.to_vec());
        Ok(())
    }
}

fn refused() -> MetricsError {
    MetricsError::Connection {
        endpoint: "carbon:2003".to_string(),
        source: std::io::ErrorKind::ConnectionRefused.into(),
    }
}

#[test]
fn failed_handle_reports_not_connected() {
    let handle: ConnectionHandle<RecordingTransport> = ConnectionHandle::failed("carbon:2003", refused());
    assert_eq!(handle.state(), ConnectionState::Failed);

    for payload in ["a 1 2\n", "x", "some.metric 40 1539872837\n"] {
        assert_eq!(send_plaintext(&handle, payload).unwrap(), SendStatus::NotConnected);
        assert_eq!(send_pickle(&handle, payload.as_bytes()).unwrap(), SendStatus::NotConnected);
    }
    assert!(handle.failure().is_some_and(MetricsError::is_fatal));
}

#[test]
fn empty_payload_never_invokes_write() {
    let transport = RecordingTransport::default();
    let connected = ConnectionHandle::from_transport("carbon:2003", transport.clone());
    let failed: ConnectionHandle<RecordingTransport> = ConnectionHandle::failed("carbon:2003", refused());

    for handle in [&connected, &failed] {
        assert_eq!(send_plaintext(handle, "").unwrap(), SendStatus::EmptyPayload);
        assert_eq!(send_pickle(handle, &[]).unwrap(), SendStatus::EmptyPayload);
    }
    assert_eq!(transport.write_count(), 0);
}

#[test]
fn client_with_frozen_clock_writes_exact_lines() {
    let transport = RecordingTransport::default();
    let client = CarbonClient::with_clock(
        ConnectionHandle::from_transport("carbon:2003", transport.clone()),
        FixedClock::new(1_539_872_837),
        String::new(),
    );

    client.send_plaintext("Wham.Jira.Rio.Critical", 40).unwrap();
    plaintext!(client, "Wham.Jira.Rio.Major", 2.5).unwrap();

    assert_eq!(
        transport.all_text(),
        "Wham.Jira.Rio.Critical 40 1539872837\nWham.Jira.Rio.Major 2.5 1539872837\n"
    );
    assert_eq!(transport.write_count(), 2);
}

#[test]
fn each_pickle_batch_is_one_write() {
    let transport = RecordingTransport::default();
    let client = CarbonClient::with_clock(
        ConnectionHandle::from_transport("carbon:2004", transport.clone()),
        FixedClock::new(1_539_872_837),
        "prod.".to_string(),
    );

    pickle!(client, ("a", 1), ("b", 2), ("c", 3)).unwrap();
    pickle!(client, ("d", 4)).unwrap();

    let writes = transport.writes.lock();
    assert_eq!(writes.len(), 2);
    for frame in writes.iter() {
        let declared = u32::from_be_bytes(frame[..4].try_into().unwrap()) as usize;
        assert_eq!(declared, frame.len() - 4);
    }
}

#[test]
fn invalid_input_is_reported_and_skipped() {
    let transport = RecordingTransport::default();
    let client = CarbonClient::with_clock(
        ConnectionHandle::from_transport("carbon:2003", transport.clone()),
        FixedClock::new(1),
        String::new(),
    );

    assert!(matches!(client.send_plaintext("", 1), Err(MetricsError::EmptyMetricPath)));
    assert!(matches!(
        client.send_pickle(Vec::<(&str, i32)>::new()),
        Err(MetricsError::EmptyBatch)
    ));
    assert!(matches!(
        client.send_pickle([("ok", 1), ("", 2)]),
        Err(MetricsError::EmptyMetricPath)
    ));

    // the client keeps working afterwards
    assert!(client.send_plaintext("ok", 1).unwrap().is_sent());
    assert_eq!(transport.write_count(), 1);
}
