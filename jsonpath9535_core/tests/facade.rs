//! Exercises the core AST types through the public `jsonpath9535` façade, confirming
//! that the two crates' published versions stay in lockstep
use jsonpath9535::JsonPath;
use serde_json::json;

#[test]
fn core_types_round_trip_through_the_facade() {
    let path = JsonPath::parse("$.store.book[?@.price<10].title").unwrap();
    let doc = json!({
        "store": {
            "book": [
                {"title": "Cheap", "price": 5},
                {"title": "Pricey", "price": 50}
            ]
        }
    });
    let titles: Vec<_> = path.query(&doc).all();
    assert_eq!(titles, vec!["Cheap"]);
}

#[test]
fn normalized_path_is_exposed_through_located_queries() {
    let path = JsonPath::parse("$.a[*]").unwrap();
    let doc = json!({"a": [1, 2, 3]});
    let located = path.query_located(&doc);
    let locs: Vec<String> = located.locations().map(ToString::to_string).collect();
    assert_eq!(locs, vec!["$['a'][0]", "$['a'][1]", "$['a'][2]"]);
}
