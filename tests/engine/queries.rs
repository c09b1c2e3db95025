//! Query behavior: tokenization symmetry, ranking, fuzzy, field scoping.

use crate::common::Harness;
use serde_json::json;

#[test]
fn search_is_case_insensitive() {
    let mut h = Harness::new();
    h.add(json!({"id": "c1", "title": "Payment Terms"}));

    let lower = h.ok("search", json!({"query": "payment"}));
    let upper = h.ok("search", json!({"query": "PAYMENT"}));
    assert_eq!(lower, upper);
    assert_eq!(lower[0]["id"], "c1");
}

#[test]
fn punctuation_in_query_is_ignored() {
    let mut h = Harness::new();
    h.add(json!({"id": "c1", "title": "Payment-terms, net."}));
    assert_eq!(h.ids("terms!!", json!({})), vec!["c1"]);
}

#[test]
fn ranking_by_distinct_matched_tokens() {
    let mut h = Harness::new();
    h.add(json!({"id": "D2", "body": "alpha"}));
    h.add(json!({"id": "D1", "body": "alpha beta"}));

    assert_eq!(
        h.search("alpha beta", json!({})),
        vec![("D1".to_string(), 2), ("D2".to_string(), 1)]
    );
}

#[test]
fn repeated_tokens_score_once() {
    let mut h = Harness::new();
    h.add(json!({"id": "a", "body": "alpha alpha alpha", "title": "alpha"}));

    let hits = h.ok("search", json!({"query": "alpha Alpha ALPHA"}));
    assert_eq!(hits[0]["score"], 1);
    assert_eq!(hits[0]["matches"], json!(["alpha"]));
}

#[test]
fn matches_list_query_tokens_in_query_order() {
    let mut h = Harness::new();
    h.add(json!({"id": "a", "body": "gamma alpha beta"}));

    let hits = h.ok("search", json!({"query": "beta gamma missing alpha"}));
    assert_eq!(hits[0]["matches"], json!(["beta", "gamma", "alpha"]));
    assert_eq!(hits[0]["score"], 3);
}

#[test]
fn equal_scores_are_ordered_by_id() {
    let mut h = Harness::new();
    for id in ["delta", "alpha", "charlie", "bravo"] {
        h.add(json!({"id": id, "body": "shared"}));
    }
    assert_eq!(
        h.ids("shared", json!({})),
        vec!["alpha", "bravo", "charlie", "delta"]
    );
}

#[test]
fn fuzzy_tolerates_small_edits() {
    let mut h = Harness::new();
    h.add(json!({"id": "k", "title": "Service contract"}));

    assert_eq!(h.ids("contrakt", json!({"fuzzy": true})), vec!["k"]);
    assert!(h.ids("contrakt", json!({"fuzzy": false})).is_empty());
    assert!(h.ids("contrakt", json!({})).is_empty());
}

#[test]
fn fuzzy_threshold_scales_with_length() {
    let mut h = Harness::new();
    h.add(json!({"id": "k", "title": "cat contract"}));

    // "cot" allows floor(3/3) = 1 edit
    assert_eq!(h.ids("cot", json!({"fuzzy": true})), vec!["k"]);
    // "cxx" is two edits from "cat"
    assert!(h.ids("cxx", json!({"fuzzy": true})).is_empty());
    // "kontrakt" is two edits from "contract", allowed for length 8
    assert_eq!(h.ids("kontrakt", json!({"fuzzy": true})), vec!["k"]);
    // three edits is too many
    assert!(h.ids("kontrakz", json!({"fuzzy": true})).is_empty());
}

#[test]
fn fuzzy_respects_field_scope() {
    let mut h = Harness::new();
    h.add(json!({"id": "k", "title": "summary", "body": "contract"}));

    assert!(h
        .ids("contrakt", json!({"fuzzy": true, "fields": ["title"]}))
        .is_empty());
    assert_eq!(
        h.ids("contrakt", json!({"fuzzy": true, "fields": ["body"]})),
        vec!["k"]
    );
}

#[test]
fn field_scoping_restricts_matches() {
    let mut h = Harness::new();
    h.add(json!({"id": "doc", "title": "alpha", "body": "beta"}));

    assert_eq!(h.ids("alpha", json!({"fields": ["title"]})), vec!["doc"]);
    assert!(h.ids("beta", json!({"fields": ["title"]})).is_empty());
    assert_eq!(h.ids("beta", json!({"fields": ["title", "body"]})), vec!["doc"]);
}

#[test]
fn unknown_field_contributes_nothing() {
    let mut h = Harness::new();
    h.add(json!({"id": "doc", "title": "alpha"}));

    assert!(h.ids("alpha", json!({"fields": ["nope"]})).is_empty());
    assert_eq!(h.ids("alpha", json!({"fields": ["nope", "title"]})), vec!["doc"]);
}

#[test]
fn empty_fields_list_means_global() {
    let mut h = Harness::new();
    h.add(json!({"id": "doc", "body": "alpha"}));
    assert_eq!(h.ids("alpha", json!({"fields": []})), vec!["doc"]);
}

#[test]
fn empty_and_short_queries_match_nothing() {
    let mut h = Harness::new();
    h.add(json!({"id": "doc", "body": "alpha to be"}));

    assert!(h.ids("", json!({})).is_empty());
    assert!(h.ids("to be", json!({})).is_empty());
    assert!(h.ids("!!! ??", json!({"fuzzy": true})).is_empty());
    assert_eq!(h.ok("search", json!({})), json!([]));
}

#[test]
fn limit_truncates_after_ranking() {
    let mut h = Harness::new();
    h.add(json!({"id": "a", "body": "alpha"}));
    h.add(json!({"id": "b", "body": "alpha beta"}));
    h.add(json!({"id": "c", "body": "alpha beta gamma"}));

    assert_eq!(h.ids("alpha beta gamma", json!({"limit": 2})), vec!["c", "b"]);
    assert!(h.ids("alpha", json!({"limit": 0})).is_empty());
}

#[test]
fn default_limit_is_fifty() {
    let mut h = Harness::new();
    let docs: Vec<_> = (0..60)
        .map(|i| json!({"id": format!("doc{:02}", i), "body": "common"}))
        .collect();
    h.ok("addDocuments", json!(docs));

    assert_eq!(h.ids("common", json!({})).len(), 50);
    assert_eq!(h.ids("common", json!({"limit": 100})).len(), 60);
}

#[test]
fn non_relevance_sort_keeps_discovery_order() {
    let mut h = Harness::new();
    h.add(json!({"id": "a", "body": "beta"}));
    h.add(json!({"id": "b", "body": "alpha beta"}));

    // discovery follows query-token order: "alpha" finds b, then "beta" finds a
    assert_eq!(
        h.search("alpha beta", json!({"sortBy": "none"})),
        vec![("b".to_string(), 2), ("a".to_string(), 1)]
    );
    assert_eq!(
        h.search("beta alpha", json!({"sortBy": "date"})),
        vec![("a".to_string(), 1), ("b".to_string(), 2)]
    );
    assert_eq!(
        h.search("beta alpha", json!({"sortBy": "relevance"})),
        vec![("b".to_string(), 2), ("a".to_string(), 1)]
    );
}

#[test]
fn hits_carry_stored_document() {
    let mut h = Harness::new();
    h.add(json!({"id": "d", "title": "Alpha", "tags": ["one", "two"], "n": 1}));

    let hits = h.ok("search", json!({"query": "alpha"}));
    assert_eq!(
        hits,
        json!([{
            "id": "d",
            "score": 1,
            "matches": ["alpha"],
            "document": {"title": "Alpha", "tags": ["one", "two"], "n": 1}
        }])
    );
}

#[test]
fn malformed_options_are_reported() {
    let mut h = Harness::new();
    let reply = h.send("search", json!({"query": "alpha", "options": {"limit": -1}}));
    assert!(reply.is_error());
    let reply = h.send("search", json!({"query": ["alpha"]}));
    assert!(reply.is_error());
}

#[test]
fn null_options_use_defaults() {
    let mut h = Harness::new();
    h.add(json!({"id": "a", "body": "alpha"}));
    h.add(json!({"id": "b", "title": "Alpha", "body": "beta"}));

    let options = json!({"fields": null, "fuzzy": null, "limit": null, "sortBy": null});
    let reply = h.send("search", json!({"query": "alpha beta", "options": options.clone()}));
    assert!(!reply.is_error());
    assert_eq!(
        h.search("alpha beta", options),
        vec![("b".to_string(), 2), ("a".to_string(), 1)]
    );
}
