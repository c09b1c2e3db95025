//! Message boundary: correlation ids, error replies, malformed input.

use crate::common::{init_tracing, Harness};
use loupe::{handle_json, Executor, Reply};
use serde_json::{json, Value};

fn raw(executor: &mut Executor, text: &str) -> Value {
    serde_json::from_str(&handle_json(executor, text)).expect("reply is valid JSON")
}

#[test]
fn unknown_operation_is_an_error_reply() {
    init_tracing();
    let mut executor = Executor::new();
    let reply = raw(&mut executor, r#"{"id": 42, "type": "bogus", "data": {}}"#);
    assert_eq!(
        reply,
        json!({"id": 42, "type": "error", "error": "Unknown operation: bogus"})
    );
}

#[test]
fn success_reply_shape() {
    init_tracing();
    let mut executor = Executor::new();
    let reply = raw(
        &mut executor,
        r#"{"id": "req-1", "type": "addDocument", "data": {"id": "a", "title": "alpha"}}"#,
    );
    assert_eq!(
        reply,
        json!({"id": "req-1", "type": "result", "data": {"success": true}})
    );
}

#[test]
fn every_request_gets_exactly_one_reply_with_its_id() {
    let mut h = Harness::new();
    // Harness::send asserts the echoed id for every message
    h.send("addDocument", json!({"id": "a", "body": "alpha"}));
    h.send("addDocument", json!({"no": "id"}));
    h.send("addDocuments", json!("not an array"));
    h.send("search", json!({"query": "alpha"}));
    h.send("removeDocument", json!({"id": "a"}));
    h.send("getStats", Value::Null);
    h.send("clear", Value::Null);
    h.send("bogus", Value::Null);
}

#[test]
fn id_of_any_shape_is_echoed() {
    init_tracing();
    let mut executor = Executor::new();
    for id in [json!(null), json!(3.5), json!("x"), json!([1, 2]), json!({"k": "v"})] {
        let message = json!({"id": id, "type": "getStats"});
        let reply = raw(&mut executor, &message.to_string());
        assert_eq!(reply["id"], id);
        assert_eq!(reply["type"], "result");
    }
}

#[test]
fn missing_id_is_echoed_as_null() {
    init_tracing();
    let mut executor = Executor::new();
    let reply = raw(&mut executor, r#"{"type": "clear"}"#);
    assert_eq!(reply["id"], Value::Null);
    assert_eq!(reply["type"], "result");
}

#[test]
fn malformed_messages_become_error_replies() {
    init_tracing();
    let mut executor = Executor::new();

    let reply = raw(&mut executor, "not json at all");
    assert_eq!(reply["type"], "error");
    assert_eq!(reply["id"], Value::Null);

    let reply = raw(&mut executor, r#"{"id": 9, "type": 17}"#);
    assert_eq!(reply["type"], "error");
    assert_eq!(reply["id"], 9);

    let reply = raw(&mut executor, r#"[1, 2, 3]"#);
    assert_eq!(reply["type"], "error");
}

#[test]
fn errors_do_not_disturb_state() {
    let mut h = Harness::new();
    h.add(json!({"id": "a", "body": "alpha"}));
    let before = h.stats();

    assert!(h.send("bogus", Value::Null).is_error());
    assert!(h.send("addDocument", json!(["not", "an", "object"])).is_error());
    assert!(h.send("search", json!({"query": 1})).is_error());

    assert_eq!(h.stats(), before);
    assert_eq!(h.ids("alpha", json!({})), vec!["a"]);
}

#[test]
fn reply_decodes_into_typed_form() {
    let mut h = Harness::new();
    match h.send("getStats", Value::Null) {
        Reply::Result { data, .. } => assert_eq!(data["documentCount"], 0),
        Reply::Error { error, .. } => panic!("unexpected error: {}", error),
    }
}
