use carbon_client::{CarbonClient, CarbonClientOptions, CarbonSink, DEFAULT_PICKLE_PORT};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let client = match CarbonClient::connect("127.0.0.1", DEFAULT_PICKLE_PORT, CarbonClientOptions::default()) {
        Ok(client) => Arc::new(client),
        Err(err) => {
            eprintln!("cannot start: {err}");
            std::process::exit(1);
        }
    };

    let instant = Instant::now();
    let workers: Vec<_> = (0..4)
        .map(|worker| {
            let client = Arc::clone(&client);
            thread::spawn(move || {
                for i in 0..1000u32 {
                    let batch = [
                        (format!("workers.w{worker}.iterations"), i),
                        (format!("workers.w{worker}.queue"), i % 17),
                    ];
                    if let Err(err) = client.send_pickle(batch) {
                        eprintln!("worker {worker}: {err}");
                        return;
                    }
                }
            })
        })
        .collect();

    for worker in workers {
        if worker.join().is_err() {
            eprintln!("worker panicked");
        }
    }
    println!("elapsed: {:?}ms", instant.elapsed().as_millis());
}
