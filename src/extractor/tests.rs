use serde::Deserialize;
use serde_json::json;

use super::*;

#[test]
fn test_fenced_json_with_prose_and_trailing_comma() {
    let raw = "Here you go:\n```json\n{\"a\":1,}\n```";
    let value = extract_value(raw, Expect::Object).unwrap();
    assert_eq!(value, json!({ "a": 1 }));
}

#[test]
fn test_array_with_trailing_comma() {
    let raw = r#"[{"x":1},{"y":2},]"#;
    let value = extract_value(raw, Expect::Array).unwrap();
    assert_eq!(value, json!([{ "x": 1 }, { "y": 2 }]));
}

#[test]
fn test_plain_prose_is_malformed() {
    let raw = "Sorry, I can't help with that.";
    let err = extract_value(raw, Expect::Object).unwrap_err();
    assert!(matches!(err, ExtractError::MalformedPayload { .. }));
}

#[test]
fn test_bracket_span_fallback() {
    let raw = r#"prefix {"k":"v"} suffix"#;
    let value = extract_value(raw, Expect::Object).unwrap();
    assert_eq!(value, json!({ "k": "v" }));
}

#[test]
fn test_valid_json_matches_direct_parse() {
    let samples = [
        (r#"{"name":"Budapest","intensity":95,"tags":["a","b"]}"#, Expect::Object),
        (r#"  {"nested":{"deep":[1,2,{"x":null}]}}  "#, Expect::Object),
        (r#"[1, 2, 3]"#, Expect::Array),
        (r#"[{"a":{"b":[]}}]"#, Expect::Array),
    ];

    for (raw, expect) in samples {
        let direct: Value = serde_json::from_str(raw).unwrap();
        assert_eq!(extract_value(raw, expect).unwrap(), direct, "input: {}", raw);
    }
}

#[test]
fn test_fenced_block_wins_over_surrounding_brackets() {
    let raw = "Option {A} was rejected.\n```json\n{\"chosen\": \"B\"}\n```\nThanks {for} reading";
    let value = extract_value(raw, Expect::Object).unwrap();
    assert_eq!(value, json!({ "chosen": "B" }));
}

#[test]
fn test_untagged_fence_is_accepted() {
    let raw = "```\n[\"one\", \"two\"]\n```";
    let value = extract_value(raw, Expect::Array).unwrap();
    assert_eq!(value, json!(["one", "two"]));
}

#[test]
fn test_empty_fence_falls_back_to_bracket_span() {
    let raw = "``````\n{\"ok\": true}";
    let value = extract_value(raw, Expect::Object).unwrap();
    assert_eq!(value, json!({ "ok": true }));
}

#[test]
fn test_fenced_interior_equals_parsing_interior_only() {
    let interior = r#"{"plans": [{"title": "Lean"}, {"title": "Growth"}]}"#;
    let raw = format!("Sure! Below is the result.\n```json\n{}\n```\nLet me know.", interior);
    let expected: Value = serde_json::from_str(interior).unwrap();
    assert_eq!(extract_value(&raw, Expect::Object).unwrap(), expected);
}

#[test]
fn test_multiple_trailing_commas_are_removed() {
    let raw = "{\n  \"a\": [1, 2, 3,\n  ],\n  \"b\": {\"c\": true,},\n}";
    let value = extract_value(raw, Expect::Object).unwrap();
    assert_eq!(value, json!({ "a": [1, 2, 3], "b": { "c": true } }));
}

#[test]
fn test_unbalanced_brackets_are_not_repaired() {
    let raw = r#"{"a": [1, 2"#;
    assert!(extract_value(raw, Expect::Object).is_err());
}

#[test]
fn test_unquoted_keys_are_not_repaired() {
    let raw = "{a: 1}";
    assert!(extract_value(raw, Expect::Object).is_err());
}

#[test]
fn test_close_before_open_uses_whole_text() {
    let raw = "} nothing here {";
    assert_eq!(locate_payload(raw, Expect::Object), "} nothing here {");
}

#[test]
fn test_strip_trailing_commas_is_idempotent() {
    let samples = [
        "[1,2,]",
        "{\"a\":1 , }",
        "[[1,],]",
        "[1,,]",
        "[1, ,\n ]",
        "{\"list\": [\"x\",\n\t],\n}",
        "no commas at all",
    ];

    for sample in samples {
        let once = strip_trailing_commas(sample).into_owned();
        let twice = strip_trailing_commas(&once).into_owned();
        assert_eq!(once, twice, "sample: {:?}", sample);
    }
}

#[test]
fn test_strip_trailing_commas_keeps_whitespace_and_inner_commas() {
    assert_eq!(strip_trailing_commas("[1, 2,\n]"), "[1, 2\n]");
    assert_eq!(strip_trailing_commas("[1, 2]"), "[1, 2]");
}

#[test]
fn test_sanitizer_is_string_unaware() {
    // 字符串内部的 ",]" 也会被改写
    let raw = r#"{"note": "a,]"}"#;
    let value = extract_value(raw, Expect::Object).unwrap();
    assert_eq!(value, json!({ "note": "a]" }));
}

#[derive(Debug, Deserialize, PartialEq)]
struct Probe {
    k: String,
}

#[test]
fn test_extract_structured_decodes_target_type() {
    let probe: Probe = extract_structured("result: {\"k\": \"v\",}", Expect::Object).unwrap();
    assert_eq!(probe, Probe { k: "v".to_string() });
}

#[test]
fn test_malformed_payload_carries_excerpt() {
    let err = extract_value("{\"a\": oops}", Expect::Object).unwrap_err();
    let ExtractError::MalformedPayload { excerpt, .. } = err;
    assert_eq!(excerpt, "{\"a\": oops}");
}
