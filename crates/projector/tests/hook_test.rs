//! Integration suite driving the full `validate -> init -> handle` hook
//! lifecycle against the literal boundary scenarios of the projector's
//! testable-properties section, asserting on raw emitted bytes.

use pretty_assertions::assert_eq;
use projector::config::ProjectorConfig;
use projector::message::{Message, MetadataValue, OwnedMessage, METADATA_KEY};
use projector::{Outcome, Projector};
use serde_json::json;

fn init(entries: serde_json::Value) -> Projector {
    let mut config: ProjectorConfig =
        serde_json::from_value(json!({ "jpointers": entries })).unwrap();
    Projector::validate(&mut config).expect("validate");
    Projector::init(&config).expect("init")
}

#[test]
fn scenario_1_timestamp_minimum() {
    let p = init(json!([["/t", "timestamp", "store", "noop"]]));
    let mut msg = OwnedMessage::new(json!({"t": "2000-01-01T00:00:00Z"}).to_string());
    assert_eq!(p.handle(&mut msg).unwrap(), Outcome::Keep);
    assert_eq!(
        msg.data(),
        &[0x00, 0x01, 0x00, 0x00, 0x00, 0x08, 0, 0, 0, 0, 0, 0, 0, 0]
    );
}

#[test]
fn scenario_2_timestamp_with_fraction() {
    let p = init(json!([["/t", "timestamp", "store", "noop"]]));
    let mut msg = OwnedMessage::new(json!({"t": "2000-01-01T00:00:00.000001Z"}).to_string());
    p.handle(&mut msg).unwrap();
    let micros = i64::from_be_bytes(msg.data()[6..14].try_into().unwrap());
    assert_eq!(micros, 1);
}

#[test]
fn scenario_3_timestamp_truncation() {
    let p = init(json!([["/t", "timestamp", "store", "noop"]]));
    let mut msg = OwnedMessage::new(json!({"t": "2000-01-01T00:00:00.123456789Z"}).to_string());
    p.handle(&mut msg).unwrap();
    let micros = i64::from_be_bytes(msg.data()[6..14].try_into().unwrap());
    assert_eq!(micros, 123_456);
}

#[test]
fn scenario_4_out_of_range_drops_unchanged() {
    let p = init(json!([["/t", "timestamp", "store", "noop"]]));
    let input = json!({"t": "1999-12-31T23:59:59Z"}).to_string();
    let mut msg = OwnedMessage::new(input.clone());
    assert!(p.handle(&mut msg).is_err());
    assert_eq!(msg.data(), input.as_bytes());
}

#[test]
fn scenario_5_filter_match_discard_false() {
    let p = init(json!([["/k", "text", "discard_false", "match", "yes"]]));

    let mut no = OwnedMessage::new(json!({"k": "no"}).to_string());
    assert_eq!(p.handle(&mut no).unwrap(), Outcome::Drop);
    assert_eq!(no.data(), json!({"k": "no"}).to_string().as_bytes());

    let mut yes = OwnedMessage::new(json!({"k": "yes"}).to_string());
    assert_eq!(p.handle(&mut yes).unwrap(), Outcome::Keep);
    assert_eq!(
        yes.data(),
        &[0x00, 0x01, 0x00, 0x00, 0x00, 0x03, b'y', b'e', b's']
    );
}

#[test]
fn scenario_6_missing_pointer_two_stored_needles() {
    let p = init(json!([
        ["/a", "text", "store", "noop"],
        ["/b", "text", "store", "noop"]
    ]));
    let mut msg = OwnedMessage::new(json!({"a": "x"}).to_string());
    p.handle(&mut msg).unwrap();
    assert_eq!(
        msg.data(),
        &[0x00, 0x02, 0x00, 0x00, 0x00, 0x01, b'x', 0xFF, 0xFF, 0xFF, 0xFF]
    );
}

#[test]
fn text_store_over_ascii_string_round_trips_raw_bytes() {
    let p = init(json!(["/s"]));
    let mut msg = OwnedMessage::new(json!({"s": "hello world"}).to_string());
    p.handle(&mut msg).unwrap();
    assert_eq!(&msg.data()[6..], b"hello world");
}

#[test]
fn config_normalization_is_idempotent_across_shapes() {
    let mut config: ProjectorConfig = serde_json::from_value(json!({
        "jpointers": [
            "/bare",
            ["/positional", "timestamp"],
            { "jpointer": "/group", "filter": "substr", "data": "x" }
        ]
    }))
    .unwrap();
    Projector::validate(&mut config).unwrap();
    let first = config.jpointers.clone();
    Projector::validate(&mut config).unwrap();
    assert_eq!(config.jpointers, first);
}

#[test]
fn validate_rejects_missing_filter_arg() {
    let mut config: ProjectorConfig = serde_json::from_value(json!({
        "jpointers": [{ "jpointer": "/a", "filter": "substr" }]
    }))
    .unwrap();
    assert!(Projector::validate(&mut config).is_err());
}

#[test]
fn fields_count_is_fixed_regardless_of_runtime_nulls() {
    let p = init(json!([
        ["/present", "text", "store", "noop"],
        ["/absent", "text", "store", "noop"],
        ["/also_absent", "timestamp", "store", "noop"]
    ]));
    let mut msg = OwnedMessage::new(json!({"present": "v"}).to_string());
    p.handle(&mut msg).unwrap();
    assert_eq!(msg.data()[0..2], [0x00, 0x03]);
}

#[test]
fn store_meta_publishes_last_writer_wins_across_needles() {
    let p = init(json!([
        ["/a", "text", "store_meta", "noop"],
        ["/b", "text", "store_meta", "noop"]
    ]));
    let mut msg = OwnedMessage::new(json!({"a": "first", "b": "second"}).to_string());
    p.handle(&mut msg).unwrap();
    assert_eq!(
        msg.metadata().get(METADATA_KEY),
        Some(&MetadataValue::String("second".to_string()))
    );
}

#[test]
fn discard_true_inverts_filter_result() {
    let p = init(json!([["/k", "text", "discard_true", "match", "drop-me"]]));

    let mut dropped = OwnedMessage::new(json!({"k": "drop-me"}).to_string());
    assert_eq!(p.handle(&mut dropped).unwrap(), Outcome::Drop);

    let mut kept = OwnedMessage::new(json!({"k": "keep-me"}).to_string());
    assert_eq!(p.handle(&mut kept).unwrap(), Outcome::Keep);
}

#[test]
fn store_true_requires_exists_filter_to_pass() {
    let p = init(json!([["/k", "text", "store_true", "exists"]]));

    let mut present = OwnedMessage::new(json!({"k": "v"}).to_string());
    assert_eq!(p.handle(&mut present).unwrap(), Outcome::Keep);

    let mut absent = OwnedMessage::new(json!({}).to_string());
    assert_eq!(p.handle(&mut absent).unwrap(), Outcome::Drop);
}
