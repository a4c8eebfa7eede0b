//! Payload serialization.

use bytes::Bytes;

use crate::Result;

/// A value handed to [`set`](crate::store::VersionedStateStore::set).
///
/// Raw bytes pass through to storage unchanged; any structured value is
/// stored as its JSON text encoding, so the round trip preserves the
/// JSON form rather than the original type. Reads always return raw
/// bytes; decoding is the caller's responsibility.
#[derive(Debug, Clone, PartialEq)]
pub enum StateValue {
    /// Opaque binary payload, stored as-is.
    Raw(Bytes),
    /// Structured value, stored as JSON text.
    Json(serde_json::Value),
}

impl StateValue {
    /// Serialize the value to the bytes that reach the backend.
    pub fn into_bytes(self) -> Result<Bytes> {
        match self {
            StateValue::Raw(data) => Ok(data),
            StateValue::Json(value) => Ok(Bytes::from(serde_json::to_vec(&value)?)),
        }
    }
}

impl From<Bytes> for StateValue {
    fn from(data: Bytes) -> Self {
        StateValue::Raw(data)
    }
}

impl From<Vec<u8>> for StateValue {
    fn from(data: Vec<u8>) -> Self {
        StateValue::Raw(Bytes::from(data))
    }
}

impl From<serde_json::Value> for StateValue {
    fn from(value: serde_json::Value) -> Self {
        StateValue::Json(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_bytes_pass_through() {
        let payload = Bytes::from_static(&[0x00, 0xff, 0x10]);
        let encoded = StateValue::Raw(payload.clone()).into_bytes().unwrap();
        assert_eq!(encoded, payload);
    }

    #[test]
    fn test_json_value_encoded_as_text() {
        let encoded = StateValue::Json(json!({"count": 3}))
            .into_bytes()
            .unwrap();
        assert_eq!(encoded, Bytes::from(r#"{"count":3}"#));
    }

    #[test]
    fn test_json_string_keeps_quotes() {
        // A structured string is stored in its JSON form, quotes included.
        let encoded = StateValue::Json(json!("hello")).into_bytes().unwrap();
        assert_eq!(encoded, Bytes::from(r#""hello""#));
    }
}
