use carbon_client::{
    plaintext, CarbonClient, CarbonClientOptions, CarbonSink, DEFAULT_PLAINTEXT_PORT,
};
use std::time::Duration;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let options = CarbonClientOptions {
        connect_timeout: Some(Duration::from_secs(2)),
        metric_prefix: "demo.".to_string(),
        ..CarbonClientOptions::default()
    };

    let client = match CarbonClient::connect("127.0.0.1", DEFAULT_PLAINTEXT_PORT, options) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("cannot start: {err}");
            std::process::exit(1);
        }
    };

    let sends = [
        client.send_plaintext("requests.count", 40),
        client.send_plaintext("cpu.load", 0.75),
        plaintext!(client, "release", "v3"),
        client.send_raw_plaintext("demo.raw.metric 1 1539872837\n"),
    ];
    for status in sends {
        match status {
            Ok(status) => println!("{status:?}"),
            Err(err) => eprintln!("send failed: {err}"),
        }
    }
}
