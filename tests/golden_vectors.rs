//! The literal end-to-end scenarios: fixed input/output pairs that pin
//! down the canonical emitter and parser against drift.

use glyph_codec::{canonicalize, equal, fingerprint, json_to_glyph, parse, CanonOpts, Value};
use serde_json::json;

#[test]
fn scenario_1_search_action_object() {
    let j = json!({"action": "search", "query": "weather in NYC", "max_results": 10});
    let text = json_to_glyph(&j, &CanonOpts::default()).unwrap();
    assert_eq!(text, "{action=search max_results=10 query=\"weather in NYC\"}");
}

#[test]
fn scenario_2_null_under_both_presets() {
    assert_eq!(canonicalize(&Value::null(), &CanonOpts::default()), "\u{2205}");
    assert_eq!(canonicalize(&Value::null(), &CanonOpts::llm()), "_");
}

#[test]
fn scenario_3_sparse_object_list_triggers_tabular() {
    let v = Value::list(vec![
        Value::map(vec![("a".to_string(), Value::int(1))]),
        Value::map(vec![("b".to_string(), Value::int(2))]),
        Value::map(vec![("c".to_string(), Value::int(3))]),
    ]);
    let text = canonicalize(&v, &CanonOpts::default());
    assert_eq!(
        text,
        "@tab _ [a b c]\n|1|\u{2205}|\u{2205}|\n|\u{2205}|2|\u{2205}|\n|\u{2205}|\u{2205}|3|\n@end"
    );
}

#[test]
fn scenario_4_homogeneous_object_list_triggers_tabular() {
    let v = Value::list(vec![
        Value::map(vec![("a".to_string(), Value::int(1)), ("b".to_string(), Value::int(2))]),
        Value::map(vec![("a".to_string(), Value::int(3)), ("b".to_string(), Value::int(4))]),
        Value::map(vec![("a".to_string(), Value::int(5)), ("b".to_string(), Value::int(6))]),
    ]);
    let text = canonicalize(&v, &CanonOpts::default());
    assert_eq!(text, "@tab _ [a b]\n|1|2|\n|3|4|\n|5|6|\n@end");
}

#[test]
fn scenario_5_keys_sort_byte_order() {
    let j = json!({"z": 1, "a": 2, "m": 3});
    let text = json_to_glyph(&j, &CanonOpts::default()).unwrap();
    assert_eq!(text, "{a=2 m=3 z=1}");
}

#[test]
fn scenario_6_id_with_prefix_round_trips() {
    let v = parse("^t:ARS").unwrap();
    assert_eq!(v, Value::id("t", "ARS"));
    assert_eq!(canonicalize(&v, &CanonOpts::default()), "^t:ARS");
}

#[test]
fn scenario_7_fingerprint_is_key_order_insensitive_and_matches_sha256() {
    let a = Value::map(vec![("a".to_string(), Value::int(1)), ("b".to_string(), Value::int(2))]);
    let b = Value::map(vec![("b".to_string(), Value::int(2)), ("a".to_string(), Value::int(1))]);
    assert!(equal(&a, &b));
    assert_eq!(fingerprint(&a), fingerprint(&b));

    use sha2::{Digest, Sha256};
    let expected = hex::encode(Sha256::digest(b"{a=1 b=2}"));
    assert_eq!(fingerprint(&a), expected);
}

#[test]
fn scenario_8_struct_round_trips_byte_identical() {
    let text = "Team{name=Arsenal rank=1}";
    let v = parse(text).unwrap();
    let s = v.as_struct().unwrap();
    assert_eq!(s.type_name, "Team");
    assert_eq!(canonicalize(&v, &CanonOpts::no_tabular()), text);
}
