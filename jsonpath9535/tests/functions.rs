//! Exercises the five built-in function extensions in realistic filter contexts
use jsonpath9535::JsonPath;
use serde_json::json;

#[test]
fn length_measures_strings_arrays_and_objects() {
    let doc = json!({
        "items": [
            {"name": "ab", "tags": ["x", "y", "z"], "meta": {"a": 1, "b": 2}},
            {"name": "abcdef", "tags": [], "meta": {}},
        ]
    });

    let by_name = JsonPath::parse("$.items[?length(@.name) < 3]").unwrap();
    assert_eq!(by_name.query(&doc).all(), vec![&doc["items"][0]]);

    let by_tags = JsonPath::parse("$.items[?length(@.tags) == 3]").unwrap();
    assert_eq!(by_tags.query(&doc).len(), 1);

    let by_meta = JsonPath::parse("$.items[?length(@.meta) == 0]").unwrap();
    assert_eq!(by_meta.query(&doc).len(), 1);
}

#[test]
fn length_of_a_non_string_non_container_is_nothing_and_never_compares_true() {
    let path = JsonPath::parse("$[?length(@) == 1]").unwrap();
    let doc = json!([1, true, null]);
    assert!(path.query(&doc).is_empty());
}

#[test]
fn count_reports_the_size_of_a_nodelist() {
    let doc = json!({
        "groups": [
            {"members": ["a"]},
            {"members": ["a", "b", "c"]},
        ]
    });
    let path = JsonPath::parse("$.groups[?count(@.members[*]) > 2]").unwrap();
    assert_eq!(path.query(&doc).all(), vec![&doc["groups"][1]]);
}

#[test]
fn count_of_a_missing_path_is_zero() {
    let doc = json!({"a": 1});
    let path = JsonPath::parse("$[?count(@.missing) == 0]").unwrap();
    assert_eq!(path.query(&doc).all(), vec![&doc["a"]]);
}

#[test]
fn match_anchors_the_whole_string_while_search_does_not() {
    let doc = json!(["2024-01-01", "not a date", "2024-99-99"]);

    let valid_dates = JsonPath::parse(r#"$[?match(@, "\\d{4}-\\d{2}-\\d{2}")]"#).unwrap();
    assert_eq!(valid_dates.query(&doc).len(), 2);

    let contains_digits = JsonPath::parse(r#"$[?search(@, "\\d")]"#).unwrap();
    assert_eq!(contains_digits.query(&doc).len(), 2);
}

#[test]
fn match_against_a_non_string_subject_is_always_false() {
    let doc = json!([1, "abc", null]);
    let path = JsonPath::parse(r#"$[?match(@, "a.*")]"#).unwrap();
    assert_eq!(path.query(&doc).all(), vec![&json!("abc")]);
}

#[test]
fn value_unwraps_a_singleton_nodelist_for_comparison() {
    let doc = json!({
        "a": {"b": 1},
        "c": {"b": 1},
        "d": {"b": 2},
    });
    let path = JsonPath::parse("$[?value(@.b) == value($.a.b)]").unwrap();
    let values = path.query(&doc).all();
    assert_eq!(values.len(), 2);
    assert!(values.contains(&&json!({"b": 1})));
}

#[test]
fn value_of_an_empty_or_multi_node_list_is_nothing() {
    let doc = json!({"a": [1, 2], "b": 9});
    let path = JsonPath::parse("$[?value(@.a[*]) == 9]").unwrap();
    assert!(path.query(&doc).is_empty());
}

#[test]
fn functions_compose_with_logical_operators() {
    let doc = json!({
        "posts": [
            {"title": "short", "body": "a cat sat"},
            {"title": "a very long title indeed", "body": "nothing to see"},
        ]
    });
    let path =
        JsonPath::parse(r#"$.posts[?length(@.title) > 10 && search(@.body, "cat")]"#).unwrap();
    assert!(path.query(&doc).is_empty());

    let path = JsonPath::parse(r#"$.posts[?length(@.title) <= 10 || search(@.body, "nothing")]"#)
        .unwrap();
    assert_eq!(path.query(&doc).len(), 2);
}
