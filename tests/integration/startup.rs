use crate::support::closed_port;
use carbon_client::{
    connect_or_exit, CarbonClient, CarbonClientOptions, ConnectionHandle, ConnectionState,
    MetricsError, FATAL_EXIT_STATUS,
};
use std::sync::atomic::{AtomicI32, Ordering};
use std::time::Duration;

#[test]
fn unreachable_port_leaves_handle_disconnected() {
    let handle = ConnectionHandle::open("127.0.0.1", closed_port());
    assert_eq!(handle.state(), ConnectionState::Failed);
    assert!(!handle.is_connected());
    assert!(matches!(handle.failure(), Some(MetricsError::Connection { .. })));
}

#[test]
fn unreachable_port_terminates_with_non_zero_status() {
    let exit_status = AtomicI32::new(0);
    let client = connect_or_exit(
        "127.0.0.1",
        closed_port(),
        CarbonClientOptions {
            connect_timeout: Some(Duration::from_secs(2)),
            ..CarbonClientOptions::default()
        },
        &|status: i32| exit_status.store(status, Ordering::SeqCst),
    );

    assert!(client.is_none());
    assert_eq!(exit_status.load(Ordering::SeqCst), FATAL_EXIT_STATUS);
    assert_ne!(FATAL_EXIT_STATUS, 0);
}

#[test]
fn unresolvable_host_is_fatal() {
    let err = CarbonClient::connect("carbon.invalid", 2003, CarbonClientOptions::default())
        .unwrap_err();
    assert!(matches!(err, MetricsError::Resolution { ref host, .. } if host == "carbon.invalid"));
    assert!(err.is_fatal());
    assert!(!err.is_validation());
}
