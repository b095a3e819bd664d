use carbon_client::{
    pickle, CarbonClient, CarbonClientOptions, CarbonSink, Sample, DEFAULT_PICKLE_PORT,
};

fn main() -> Result<(), carbon_client::MetricsError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let client = CarbonClient::connect("127.0.0.1", DEFAULT_PICKLE_PORT, CarbonClientOptions::default())?;

    // One frame, one timestamp for every entry
    let disks: Vec<(String, Sample)> = (0..4)
        .map(|i| (format!("host.disk{i}.used_pct"), Sample::from(60 + i * 7)))
        .collect();
    println!("disks: {:?}", client.send_pickle(disks)?);

    println!(
        "mixed: {:?}",
        pickle!(client, ("host.load", 0.42), ("host.procs", 311u32), ("host.state", "ok"))?
    );
    Ok(())
}
