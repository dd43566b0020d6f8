//! Cycle- and depth-safety under the descendant segment
//!
//! `serde_json::Value` owns its children outright, so a genuinely self-referential
//! document (a map containing itself) cannot be built through ordinary construction or
//! parsing in safe Rust: there is no way for a `Value` node to hold a reference back to
//! one of its own ancestors. The cycle guard in `EvalContext` is exercised directly,
//! against a deliberately aliased address, in `jsonpath9535_core::eval`'s own unit
//! tests. What *is* constructible, and what these tests cover, is the companion
//! depth-cap guard: a descendant-segment traversal over an arbitrarily deep (but
//! acyclic) document still terminates and reports why it stopped early.
use jsonpath9535::{JsonPath, WarningKind};
use serde_json::{json, Value};

fn nest(depth: usize, leaf: Value) -> Value {
    let mut v = leaf;
    for _ in 0..depth {
        v = Value::Array(vec![v]);
    }
    v
}

#[test]
fn descendant_wildcard_over_a_deeply_nested_document_terminates() {
    let doc = nest(64, json!("bottom"));
    let path = JsonPath::parse("$..[*]").unwrap();
    let (nodes, warnings) = path.query_collecting_warnings(&doc);
    assert!(!nodes.is_empty());
    assert!(warnings.iter().any(|w| w.kind == WarningKind::Depth));
}

#[test]
fn a_document_within_the_depth_cap_produces_no_warnings() {
    let doc = nest(5, json!("bottom"));
    let path = JsonPath::parse("$..[*]").unwrap();
    let (nodes, warnings) = path.query_collecting_warnings(&doc);
    assert!(warnings.is_empty());
    // 5 arrays nested around one leaf: each level's wildcard selects exactly the one
    // element it contains, so the leaf plus each of the 5 wrapping arrays are visited
    assert_eq!(nodes.len(), 5);
}

#[test]
fn depth_cap_is_reached_without_a_cycle_warning() {
    let doc = nest(64, json!("bottom"));
    let path = JsonPath::parse("$..[*]").unwrap();
    let (_, warnings) = path.query_collecting_warnings(&doc);
    assert!(warnings.iter().all(|w| w.kind != WarningKind::Cycle));
}
