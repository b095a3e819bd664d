/// Macro for sending one metric over the plaintext protocol.
///
/// Expands to [`CarbonSink::send_plaintext`](crate::CarbonSink::send_plaintext) with the
/// value converted through [`Sample::from`](crate::Sample). The trait must be in scope.
///
/// # Examples
///
/// ```no_run
/// use carbon_client::{plaintext, CarbonClient, CarbonClientOptions, CarbonSink};
///
/// let client = CarbonClient::connect("127.0.0.1", 2003, CarbonClientOptions::default())?;
///
/// plaintext!(client, "service.requests.count", 40)?;
/// plaintext!(client, "service.cpu.load", 0.75)?;
/// plaintext!(client, "service.release", format!("v{}", 3))?;
/// # Ok::<(), carbon_client::MetricsError>(())
/// ```
#[macro_export]
macro_rules! plaintext {
    ($client:expr, $metric:expr, $value:expr) => {
        $client.send_plaintext($metric, $crate::Sample::from($value))
    };
}

/// Macro for sending any number of `(path, value)` pairs as one pickle frame.
///
/// Values may have different types; each is converted through
/// [`Sample::from`](crate::Sample). All entries share one timestamp.
///
/// # Examples
///
/// ```no_run
/// use carbon_client::{pickle, CarbonClient, CarbonClientOptions, CarbonSink};
///
/// let client = CarbonClient::connect("127.0.0.1", 2004, CarbonClientOptions::default())?;
///
/// pickle!(client, ("service.disk.used", 91), ("service.load", 0.5))?;
/// pickle!(client, ("service.heartbeat", 1))?;
/// # Ok::<(), carbon_client::MetricsError>(())
/// ```
#[macro_export]
macro_rules! pickle {
    ($client:expr $(, ($metric:expr, $value:expr))+ $(,)?) => {
        {
            let entries = [$(($metric, $crate::Sample::from($value))),+];
            $client.send_pickle(entries)
        }
    };
}
