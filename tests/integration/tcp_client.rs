use crate::support::{batch_entries, spawn_tcp_receiver, split_frames, unix_now, unpickle, PickleValue};
use carbon_client::{CarbonClient, CarbonClientOptions, CarbonSink, SendStatus};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn connect(port: u16, metric_prefix: &str) -> CarbonClient {
    let options = CarbonClientOptions {
        connect_timeout: Some(Duration::from_secs(2)),
        nodelay: true,
        metric_prefix: metric_prefix.to_string(),
    };
    CarbonClient::connect("127.0.0.1", port, options).expect("daemon should be reachable")
}

#[test]
fn plaintext_lines_reach_the_daemon() {
    let (port, receiver) = spawn_tcp_receiver();
    let client = connect(port, "");

    let before = unix_now();
    assert_eq!(
        client.send_plaintext("Wham.Jira.Rio.Critical", 40).unwrap(),
        SendStatus::Sent(37)
    );
    client.send_plaintext("Wham.Jira.Rio.Load", 0.5).unwrap();
    let after = unix_now();
    drop(client);

    let received = String::from_utf8(receiver.join().unwrap()).unwrap();
    let lines: Vec<&str> = received.lines().collect();
    assert_eq!(lines.len(), 2);

    for (line, (path, value)) in lines
        .iter()
        .zip([("Wham.Jira.Rio.Critical", "40"), ("Wham.Jira.Rio.Load", "0.5")])
    {
        let fields: Vec<&str> = line.split(' ').collect();
        assert_eq!(fields[0], path);
        assert_eq!(fields[1], value);
        let ts: u64 = fields[2].parse().unwrap();
        assert!(before <= ts && ts <= after);
    }
    assert!(received.ends_with('\n'));
}

#[test]
fn pickle_frames_reach_the_daemon() {
    let (port, receiver) = spawn_tcp_receiver();
    let client = connect(port, "myapp.");

    client.send_pickle([("requests", 40), ("errors", 2)]).unwrap();
    client.send_pickle([("load", 0.25)]).unwrap();
    drop(client);

    let received = receiver.join().unwrap();
    let frames = split_frames(&received);
    assert_eq!(frames.len(), 2);

    let first = batch_entries(unpickle(frames[0]));
    assert_eq!(first[0].0, "myapp.requests");
    assert_eq!(first[0].2, PickleValue::Int(40));
    assert_eq!(first[1].0, "myapp.errors");
    assert_eq!(first[0].1, first[1].1);

    let second = batch_entries(unpickle(frames[1]));
    assert_eq!(second, vec![("myapp.load".to_string(), second[0].1, PickleValue::Float(0.25))]);
}

#[test]
fn concurrent_senders_do_not_interleave_frames() {
    let (port, receiver) = spawn_tcp_receiver();
    let client = Arc::new(connect(port, ""));
    let num_threads = 8;
    let frames_per_thread = 200;

    let handles: Vec<_> = (0..num_threads)
        .map(|thread_id| {
            let client = Arc::clone(&client);
            thread::spawn(move || {
                for i in 0..frames_per_thread {
                    let entries: Vec<(String, u32)> = (0..5)
                        .map(|k| (format!("parallel.thread{thread_id}.m{k}"), i))
                        .collect();
                    client.send_pickle(entries).expect("send failed");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }
    drop(client);

    let received = receiver.join().unwrap();
    let frames = split_frames(&received);
    assert_eq!(frames.len(), num_threads * frames_per_thread as usize);
    for frame in frames {
        let entries = batch_entries(unpickle(frame));
        assert_eq!(entries.len(), 5);
        let thread_prefix = entries[0].0.rsplit_once('.').unwrap().0.to_string();
        assert!(entries.iter().all(|(path, _, _)| path.starts_with(&thread_prefix)));
    }
}
