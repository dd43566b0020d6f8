//! Edge cases around literal forms, selector validation, and escaping that are easy to
//! get wrong in a hand-rolled lexer/parser
use jsonpath9535::{error::Error, JsonPath};
use serde_json::json;

#[test]
fn negative_zero_is_rejected_as_an_index() {
    let err = JsonPath::parse("$[-0]").unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[test]
fn an_empty_bracketed_segment_is_rejected() {
    let err = JsonPath::parse("$[]").unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[test]
fn a_function_call_with_the_wrong_argument_count_is_rejected() {
    let err = JsonPath::parse("$[?length(@.a, @.b)]").unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[test]
fn a_function_call_with_the_wrong_argument_type_is_rejected() {
    // `count` expects a nodelist, not a bare value
    let err = JsonPath::parse("$[?count(1)]").unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[test]
fn an_unknown_function_name_is_rejected() {
    let err = JsonPath::parse("$[?bogus(@.a)]").unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[test]
fn a_bare_function_returning_a_non_logical_type_cannot_stand_alone_as_a_filter() {
    // `value` returns ValueType, which cannot be used directly as a basic-expr
    let err = JsonPath::parse("$[?value(@.a)]").unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[test]
fn an_out_of_range_integer_literal_is_rejected() {
    let err = JsonPath::parse("$[9007199254740993]").unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[test]
fn a_leading_zero_integer_is_not_a_valid_index() {
    assert!(JsonPath::parse("$[01]").is_err());
}

#[test]
fn an_unterminated_string_literal_is_a_lex_error() {
    let err = JsonPath::parse("$['a").unwrap_err();
    assert!(matches!(err, Error::Lex(_)));
}

#[test]
fn single_and_double_quoted_names_are_equivalent() {
    let doc = json!({"a b": 1});
    let single = JsonPath::parse("$['a b']").unwrap();
    let double = JsonPath::parse("$[\"a b\"]").unwrap();
    assert_eq!(single.query(&doc).all(), double.query(&doc).all());
}

#[test]
fn dot_shorthand_and_bracket_name_selector_are_equivalent() {
    let doc = json!({"store": {"name": "corner"}});
    let dotted = JsonPath::parse("$.store.name").unwrap();
    let bracketed = JsonPath::parse("$['store']['name']").unwrap();
    assert_eq!(dotted.query(&doc).all(), bracketed.query(&doc).all());
    assert_eq!(dotted.to_string(), "$.store.name");
}

#[test]
fn escaped_quote_inside_a_name_selector_round_trips() {
    let doc = json!({"it's": "ok"});
    let path = JsonPath::parse(r"$['it\'s']").unwrap();
    assert_eq!(path.query(&doc).all(), vec![&json!("ok")]);
}

#[test]
fn unicode_member_names_are_supported() {
    let doc = json!({"café": "espresso"});
    let path = JsonPath::parse("$.café").unwrap();
    assert_eq!(path.query(&doc).all(), vec![&json!("espresso")]);
}

#[test]
fn out_of_bounds_index_yields_no_nodes_rather_than_an_error() {
    let path = JsonPath::parse("$[10]").unwrap();
    let doc = json!([1, 2, 3]);
    assert!(path.query(&doc).is_empty());
}

#[test]
fn a_name_selector_against_an_array_yields_no_nodes() {
    let path = JsonPath::parse("$['0']").unwrap();
    let doc = json!([1, 2, 3]);
    assert!(path.query(&doc).is_empty());
}

#[test]
fn multiple_selectors_in_one_segment_preserve_source_order_with_duplicates() {
    let path = JsonPath::parse("$[0, 0, 1]").unwrap();
    let doc = json!(["a", "b", "c"]);
    assert_eq!(path.query(&doc).all(), vec![&json!("a"), &json!("a"), &json!("b")]);
}

#[test]
fn filter_comparison_between_two_absolute_queries_is_allowed() {
    let doc = json!({"threshold": 5, "items": [3, 5, 9]});
    let path = JsonPath::parse("$.items[?@ >= $.threshold]").unwrap();
    assert_eq!(path.query(&doc).all(), vec![&json!(5), &json!(9)]);
}

#[test]
fn a_non_singular_query_cannot_be_compared_directly() {
    let err = JsonPath::parse("$[?@.a[*] == 1]").unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}

#[test]
fn numbers_with_different_representations_compare_equal_in_a_filter() {
    let doc = json!({"a": 1, "b": 1.0});
    // $.a and $.b are absolute, so both of root's children (1 and 1.0) get filtered
    // against the same comparison; it holds for both since 1 == 1.0 numerically
    let path = JsonPath::parse("$[?$.a == $.b]").unwrap();
    assert_eq!(path.query(&doc).len(), 2);
}

#[test]
fn two_absent_members_compare_equal_to_each_other() {
    let doc = json!([1, "two", true]);
    // neither `.a` nor `.b` exists on any element, so both sides are Nothing, which
    // RFC 9535 treats as equal to itself
    let path = JsonPath::parse("$[?@.a == @.b]").unwrap();
    assert_eq!(path.query(&doc).len(), 3);
}

#[test]
fn an_absent_member_never_equals_a_present_value() {
    let doc = json!([{"a": 1}, {}]);
    let path = JsonPath::parse("$[?@.a == 1]").unwrap();
    assert_eq!(path.query(&doc).all(), vec![&json!({"a": 1})]);
}

#[test]
fn null_is_distinct_from_a_missing_member() {
    let doc = json!({"a": null});
    let present = JsonPath::parse("$[?@.a == null]").unwrap();
    assert_eq!(present.query(&doc).len(), 0);

    let exists = JsonPath::parse("$[?@.a]").unwrap();
    let doc2 = json!([{"a": null}, {}]);
    assert_eq!(exists.query(&doc2).all(), vec![&json!({"a": null})]);
}
