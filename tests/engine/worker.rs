//! The same scenarios driven through a `SearchWorker` thread.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::common::init_tracing;
use loupe::{Error, Reply, Request, SearchWorker, WorkerConfig};
use serde_json::{json, Value};

const TIMEOUT: Duration = Duration::from_secs(10);

fn spawn() -> (SearchWorker, std::sync::mpsc::Receiver<Reply>) {
    init_tracing();
    SearchWorker::spawn(WorkerConfig::default().with_thread_name("loupe-test-worker")).unwrap()
}

#[test]
fn remove_after_add_observes_the_add() {
    let (worker, replies) = spawn();
    worker
        .post(Request::new(1, "addDocument", json!({"id": "a", "body": "alpha"})))
        .unwrap();
    worker
        .post(Request::new(2, "removeDocument", json!({"id": "a"})))
        .unwrap();
    worker.post(Request::new(3, "getStats", Value::Null)).unwrap();

    let replies: Vec<Reply> = (0..3).map(|_| replies.recv_timeout(TIMEOUT).unwrap()).collect();
    assert_eq!(replies[0].id(), &json!(1));
    assert_eq!(replies[1].id(), &json!(2));
    assert_eq!(replies[2].data().unwrap()["documentCount"], 0);
    assert_eq!(replies[2].data().unwrap()["tokenCount"], 0);
}

#[test]
fn properties_hold_through_worker() {
    let (worker, replies) = spawn();
    let script = vec![
        ("addDocument", json!({"id": "c1", "title": "Payment Terms"})),
        ("search", json!({"query": "PAYMENT"})),
        ("addDocument", json!({"id": "k", "body": "contract"})),
        ("search", json!({"query": "contrakt", "options": {"fuzzy": true}})),
        ("search", json!({"query": "contrakt"})),
        ("search", json!({"query": "payment", "options": {"fields": ["body"]}})),
        ("bogus", Value::Null),
        ("clear", Value::Null),
        ("getStats", Value::Null),
    ];
    let count = script.len();
    for (i, (operation, data)) in script.into_iter().enumerate() {
        worker.post(Request::new(i, operation, data)).unwrap();
    }
    let out: Vec<Reply> = (0..count)
        .map(|_| replies.recv_timeout(TIMEOUT).unwrap())
        .collect();

    for (i, reply) in out.iter().enumerate() {
        assert_eq!(reply.id(), &json!(i));
    }
    assert_eq!(out[1].data().unwrap()[0]["id"], "c1");
    assert_eq!(out[3].data().unwrap()[0]["id"], "k");
    assert_eq!(out[4].data(), Some(&json!([])));
    assert_eq!(out[5].data(), Some(&json!([])));
    assert_eq!(out[6].error_message(), Some("Unknown operation: bogus"));
    assert_eq!(out[8].data().unwrap()["documentCount"], 0);
    assert_eq!(out[8].data().unwrap()["tokenCount"], 0);
}

#[test]
fn concurrent_producers_are_serialized() {
    let (worker, replies) = spawn();
    let worker = Arc::new(worker);
    let producers = 4;
    let per_producer = 25;

    let handles: Vec<_> = (0..producers)
        .map(|p| {
            let worker = Arc::clone(&worker);
            thread::spawn(move || {
                for i in 0..per_producer {
                    let id = format!("p{}-{}", p, i);
                    worker
                        .post(Request::new(
                            id.clone(),
                            "addDocument",
                            json!({"id": id, "body": format!("shared producer{}", p)}),
                        ))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    worker.post(Request::new("stats", "getStats", Value::Null)).unwrap();

    let mut last_seen = vec![None::<usize>; producers];
    let mut stats = None;
    for _ in 0..producers * per_producer + 1 {
        let reply = replies.recv_timeout(TIMEOUT).unwrap();
        assert!(!reply.is_error());
        let id = reply.id().as_str().unwrap().to_string();
        if id == "stats" {
            stats = reply.data().cloned();
            continue;
        }
        // per-producer order is preserved
        let (p, i) = id[1..].split_once('-').unwrap();
        let (p, i): (usize, usize) = (p.parse().unwrap(), i.parse().unwrap());
        assert!(last_seen[p].map_or(true, |prev| prev < i));
        last_seen[p] = Some(i);
    }

    let stats = stats.unwrap();
    assert_eq!(stats["documentCount"], producers * per_producer);
    // "shared" plus one "producerN" token per producer
    assert_eq!(stats["tokenCount"], producers + 1);
}

#[test]
fn try_post_after_shutdown_fails() {
    let (worker, _replies) = spawn();
    worker.shutdown();
    assert_eq!(
        worker.try_post(Request::new(1, "getStats", Value::Null)),
        Err(Error::WorkerStopped)
    );
}

#[test]
fn raw_json_through_worker() {
    let (worker, replies) = spawn();
    worker
        .post_json(r#"{"id": 1, "type": "addDocument", "data": {"id": "a", "title": "alpha"}}"#)
        .unwrap();
    worker.post_json("{broken").unwrap();
    worker
        .post_json(r#"{"id": 3, "type": "search", "data": {"query": "alpha"}}"#)
        .unwrap();

    let first = replies.recv_timeout(TIMEOUT).unwrap();
    let second = replies.recv_timeout(TIMEOUT).unwrap();
    let third = replies.recv_timeout(TIMEOUT).unwrap();
    assert!(!first.is_error());
    assert!(second.is_error());
    assert_eq!(second.id(), &Value::Null);
    assert_eq!(third.data().unwrap()[0]["id"], "a");
}
