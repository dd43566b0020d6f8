//! End-to-end scenarios exercising indexing, slicing, filters, and function
//! extensions together against whole documents
use jsonpath9535::JsonPath;
use serde_json::json;

#[test]
fn positive_index_selects_a_single_element() {
    let path = JsonPath::parse("$.a[1]").unwrap();
    let doc = json!({"a": [1, 2, 3]});
    assert_eq!(path.query(&doc).all(), vec![&json!(2)]);
    let locs: Vec<String> = path
        .query_located(&doc)
        .locations()
        .map(ToString::to_string)
        .collect();
    assert_eq!(locs, vec!["$['a'][1]"]);
}

#[test]
fn negative_index_selects_from_the_end() {
    let path = JsonPath::parse("$.a[-1]").unwrap();
    let doc = json!({"a": [1, 2, 3]});
    assert_eq!(path.query(&doc).all(), vec![&json!(3)]);
    let locs: Vec<String> = path
        .query_located(&doc)
        .locations()
        .map(ToString::to_string)
        .collect();
    assert_eq!(locs, vec!["$['a'][2]"]);
}

#[test]
fn negative_step_slice_walks_backward() {
    let path = JsonPath::parse("$.a[::-2]").unwrap();
    let doc = json!({"a": [1, 2, 3, 4, 5]});
    assert_eq!(path.query(&doc).all(), vec![&json!(5), &json!(3), &json!(1)]);
    let locs: Vec<String> = path
        .query_located(&doc)
        .locations()
        .map(ToString::to_string)
        .collect();
    assert_eq!(locs, vec!["$['a'][4]", "$['a'][2]", "$['a'][0]"]);
}

#[test]
fn filter_compares_the_current_node_against_a_literal() {
    let path = JsonPath::parse("$.o[?@ > 1]").unwrap();
    let doc = json!({"o": {"p": 1, "q": 2}});
    assert_eq!(path.query(&doc).all(), vec![&json!(2)]);
    let locs: Vec<String> = path
        .query_located(&doc)
        .locations()
        .map(ToString::to_string)
        .collect();
    assert_eq!(locs, vec!["$['o']['q']"]);
}

#[test]
fn filter_existence_test_keeps_only_members_with_the_named_child() {
    let path = JsonPath::parse("$.a[?@.b]").unwrap();
    let doc = json!({"a": [{"b": 1}, {"b": 2}, {"c": 3}]});
    assert_eq!(path.query(&doc).all(), vec![&json!({"b": 1}), &json!({"b": 2})]);
    let locs: Vec<String> = path
        .query_located(&doc)
        .locations()
        .map(ToString::to_string)
        .collect();
    assert_eq!(locs, vec!["$['a'][0]", "$['a'][1]"]);
}

#[test]
fn match_requires_a_full_string_match_unlike_search() {
    let doc = json!({"a": ["abc", "ab", "abcd"]});

    let matched = JsonPath::parse("$.a[?match(@, \"ab.\")]").unwrap();
    assert_eq!(matched.query(&doc).all(), vec![&json!("abc")]);
    let locs: Vec<String> = matched
        .query_located(&doc)
        .locations()
        .map(ToString::to_string)
        .collect();
    assert_eq!(locs, vec!["$['a'][0]"]);

    let searched = JsonPath::parse("$.a[?search(@, \"ab.\")]").unwrap();
    assert_eq!(
        searched.query(&doc).all(),
        vec![&json!("abc"), &json!("abcd")]
    );
}

#[test]
fn descendant_wildcard_visits_every_node_and_selects_its_children() {
    // The descendant segment applies `[*]` at the root and at every descendant node, so
    // the array and object values themselves appear once (selected at the root) and
    // their own elements appear again (selected when the segment is applied to them).
    let path = JsonPath::parse("$..[*]").unwrap();
    let doc = json!({"a": [1, 2], "b": {"c": 3}});
    let values = path.query(&doc).all();
    assert_eq!(values.len(), 5);
    assert!(values.contains(&&json!([1, 2])));
    assert!(values.contains(&&json!({"c": 3})));
    assert!(values.contains(&&json!(1)));
    assert!(values.contains(&&json!(2)));
    assert!(values.contains(&&json!(3)));
}

#[test]
fn length_count_and_value_compose_in_a_filter() {
    let doc = json!({
        "books": [
            {"title": "A", "authors": ["x"]},
            {"title": "Bb", "authors": ["x", "y"]},
        ]
    });
    let path = JsonPath::parse("$.books[?length(@.title) > 1]").unwrap();
    assert_eq!(
        path.query(&doc).all(),
        vec![&json!({"title": "Bb", "authors": ["x", "y"]})]
    );

    let path = JsonPath::parse("$.books[?count(@.authors[*]) > 1]").unwrap();
    assert_eq!(
        path.query(&doc).all(),
        vec![&json!({"title": "Bb", "authors": ["x", "y"]})]
    );
}

#[test]
fn wildcard_and_name_selectors_combine_across_segments() {
    let path = JsonPath::parse("$.store.book[*].title").unwrap();
    let doc = json!({
        "store": {
            "book": [
                {"title": "Sword of Honour"},
                {"title": "Moby Dick"}
            ]
        }
    });
    assert_eq!(
        path.query(&doc).all(),
        vec![&json!("Sword of Honour"), &json!("Moby Dick")]
    );
}

#[test]
fn normalized_path_round_trips_through_display() {
    let path = JsonPath::parse("$.store.book[0].title").unwrap();
    let doc = json!({"store": {"book": [{"title": "x"}]}});
    let located = path.query_located(&doc);
    let loc = located.exactly_one().unwrap().location().to_string();
    assert_eq!(loc, "$['store']['book'][0]['title']");
}
