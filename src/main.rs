use carbon_client::{
    connect_or_exit, encode_line, CarbonClientOptions, CarbonSink, ProcessExit, SystemClock,
    DEFAULT_PLAINTEXT_PORT,
};
use std::time::Instant;

const CARBON_HOST: &str = "127.0.0.1";

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let Some(client) = connect_or_exit(
        CARBON_HOST,
        DEFAULT_PLAINTEXT_PORT,
        CarbonClientOptions::default(),
        &ProcessExit,
    ) else {
        return;
    };

    let instant = Instant::now();
    for i in 0..100u32 {
        if let Err(err) = client.send_plaintext("Wham.Jira.Rio.Critical", 40 + i % 3) {
            tracing::error!("send failed: {err}");
            std::process::exit(1);
        }
    }

    // Same line the client just sent, built by hand
    match encode_line(&SystemClock::new(), "Wham.Jira.Rio.Critical", &40.into()) {
        Ok(line) => tracing::info!("last line: {}", line.trim_end()),
        Err(err) => tracing::warn!("{err}"),
    }

    println!("elapsed: {:?}ms", instant.elapsed().as_millis());
}
