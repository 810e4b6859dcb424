//! Body serialization.
//!
//! Handler return values routinely carry date/time values, unique
//! identifiers and arbitrary-precision decimals. The serde
//! representations chosen here render those as ISO-8601 strings, plain
//! strings and floating-point numbers respectively, so encoded bodies
//! stay plain JSON.

use serde::Serialize;
use serde_json::Value;

/// Convert any serializable value to its JSON tree.
///
/// Date/times become ISO-8601 strings, UUIDs become strings and decimals
/// become floats on the way in, so the resulting tree encodes without
/// custom serializers.
pub fn to_value<T: Serialize>(data: &T) -> Result<Value, Vec<String>> {
    serde_json::to_value(data).map_err(|e| vec![format!("Unknown error: {e}")])
}

/// Serialize a JSON tree to the envelope's body string.
#[must_use]
pub fn encode(value: &Value) -> String {
    value.to_string()
}

/// Parse a body string back into a JSON tree.
pub fn decode(body: &str) -> Result<Value, Vec<String>> {
    serde_json::from_str(body).map_err(|e| vec![format!("Unknown error: {e}")])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use rust_decimal::Decimal;
    use serde_json::json;
    use std::str::FromStr;
    use uuid::Uuid;

    #[derive(serde::Serialize)]
    struct Payload {
        when: DateTime<Utc>,
        id: Uuid,
        price: Decimal,
    }

    #[test]
    fn test_special_types_flatten_to_json_primitives() {
        let when = DateTime::parse_from_rfc3339("2023-04-01T12:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let id = Uuid::parse_str("7f2c79a4-3b7e-4a9f-9f2a-24c52cf0f7d4").unwrap();
        let payload = Payload {
            when,
            id,
            price: Decimal::from_str("12.5").unwrap(),
        };
        let value = to_value(&payload).unwrap();
        assert_eq!(value["when"], json!("2023-04-01T12:30:00Z"));
        assert_eq!(value["id"], json!("7f2c79a4-3b7e-4a9f-9f2a-24c52cf0f7d4"));
        assert_eq!(value["price"], json!(12.5));
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let value = json!({"a": 1, "b": [true, null], "c": {"d": "x"}});
        assert_eq!(decode(&encode(&value)).unwrap(), value);
    }
}
