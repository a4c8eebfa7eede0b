//! Payload codec behavior.

use blobstate_core::StateValue;
use bytes::Bytes;
use serde_json::json;

#[test]
fn test_raw_bytes_unchanged() {
    let payload = Bytes::from_static(b"\x00\x01binary\xff");
    assert_eq!(
        StateValue::Raw(payload.clone()).into_bytes().unwrap(),
        payload
    );
}

#[test]
fn test_structured_value_stored_as_json_text() {
    let value = json!({"name": "itemX", "qty": 2});
    let encoded = StateValue::from(value.clone()).into_bytes().unwrap();
    // Round-trip type information is not preserved, only the JSON form.
    let decoded: serde_json::Value = serde_json::from_slice(&encoded).unwrap();
    assert_eq!(decoded, value);
}

#[test]
fn test_vec_converts_to_raw() {
    let encoded = StateValue::from(vec![1u8, 2, 3]).into_bytes().unwrap();
    assert_eq!(encoded, Bytes::from_static(&[1, 2, 3]));
}
