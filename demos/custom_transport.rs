use carbon_client::{
    CarbonClient, CarbonSink, ConnectionHandle, FixedClock, MetricResult, Transport,
};

/// Prints everything instead of opening a socket.
struct StdoutTransport;

impl Transport for StdoutTransport {
    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        match std::str::from_utf8(buf) {
            Ok(text) => print!("{text}"),
            Err(_) => println!("<{} bytes> {buf:02x?}", buf.len()),
        }
        Ok(())
    }
}

fn main() -> MetricResult<()> {
    let client = CarbonClient::with_clock(
        ConnectionHandle::from_transport("stdout", StdoutTransport),
        FixedClock::new(1_539_872_837),
        String::new(),
    );

    client.send_plaintext("Wham.Jira.Rio.Critical", 40)?;
    client.send_pickle([("a.b.c", 40)])?;
    Ok(())
}
