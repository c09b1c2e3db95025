//! Identical message sequences produce identical replies.

use crate::common::{assert_invariants, Harness};
use serde_json::{json, Value};

fn script() -> Vec<(&'static str, Value)> {
    vec![
        ("addDocuments", json!([
            {"id": "c1", "title": "Master services contract", "tags": ["legal", "vendor"]},
            {"id": "c2", "title": "Payment terms", "body": "Net 30 to pay invoices"},
            {"id": "c3", "title": "Contract renewal", "body": "renewal terms and payment"},
            {"id": "c4", "title": "Vendor onboarding"}
        ])),
        ("search", json!({"query": "contract payment terms"})),
        ("search", json!({"query": "contrakt", "options": {"fuzzy": true}})),
        ("addDocument", json!({"id": "c2", "title": "Payment schedule"})),
        ("search", json!({"query": "terms", "options": {"fields": ["title", "body"]}})),
        ("removeDocument", json!({"id": "c1"})),
        ("search", json!({"query": "vendor legal", "options": {"sortBy": "none"}})),
        ("getStats", Value::Null),
    ]
}

fn run() -> (Vec<Value>, Harness) {
    let mut h = Harness::new();
    let replies = script()
        .into_iter()
        .map(|(operation, data)| serde_json::to_value(h.send(operation, data)).unwrap())
        .collect();
    (replies, h)
}

#[test]
fn same_script_same_replies() {
    let (first, h1) = run();
    let (second, h2) = run();
    assert_eq!(first, second);
    assert_invariants(&h1);
    assert_invariants(&h2);
}

#[test]
fn scripted_results() {
    let (replies, _) = run();

    // "contract payment terms": c3 matches all three, c2 two, c1 one
    let ids: Vec<_> = replies[1]["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|hit| (hit["id"].clone(), hit["score"].clone()))
        .collect();
    assert_eq!(
        ids,
        vec![
            (json!("c3"), json!(3)),
            (json!("c2"), json!(2)),
            (json!("c1"), json!(1)),
        ]
    );

    // c2 was replaced, so "terms" only finds c3 now
    let hits = replies[4]["data"].as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["id"], "c3");

    // c1 removed: only c4 has "vendor"
    let hits = replies[6]["data"].as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["id"], "c4");

    assert_eq!(replies[7]["data"]["documentCount"], 3);
}
