use medcalc_core::{RawYearRow, ServiceError};
use serde_json::Value;

/// Decode a success body into one row per horizon year.
pub fn decode_rows(body: &[u8]) -> Result<Vec<RawYearRow>, ServiceError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::warn!(bytes = body.len(), "undecodable projection body: {}", e);
        ServiceError::Decode(e.to_string())
    })
}

/// Extract the human-readable `detail` from an error body.
///
/// A string `detail` is returned as-is. A list of validation entries (each
/// with a `msg`) is joined with `"; "`. Anything else, including a body that
/// is not JSON, yields `None`.
pub fn detail_from_body(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;

    match value.get("detail")? {
        Value::String(detail) => Some(detail.clone()),
        Value::Array(entries) => {
            let messages: Vec<&str> = entries
                .iter()
                .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn string_detail_is_returned_verbatim() {
        assert_eq!(
            detail_from_body(br#"{"detail": "Invalid deductible"}"#),
            Some("Invalid deductible".to_string())
        );
    }

    #[test]
    fn validation_entries_are_joined() {
        let body = br#"{"detail": [
            {"loc": ["body", "age"], "msg": "value is not a valid integer"},
            {"loc": ["body", "plan"], "msg": "field required"}
        ]}"#;

        assert_eq!(
            detail_from_body(body),
            Some("value is not a valid integer; field required".to_string())
        );
    }

    #[test]
    fn missing_or_unusable_detail_is_none() {
        assert_eq!(detail_from_body(br#"{"error": "boom"}"#), None);
        assert_eq!(detail_from_body(br#"{"detail": 42}"#), None);
        assert_eq!(detail_from_body(br#"{"detail": []}"#), None);
        assert_eq!(detail_from_body(b"Internal Server Error"), None);
        assert_eq!(detail_from_body(b""), None);
    }

    #[test]
    fn decode_rows_accepts_array_of_rows() {
        let rows = decode_rows(br#"[{"year": 2025, "premium": 1000}, 2000]"#).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].amount("premium"), Some(dec!(1000)));
        assert_eq!(rows[1].amount("value"), Some(dec!(2000)));
    }

    #[test]
    fn decode_rows_rejects_non_array() {
        assert!(matches!(
            decode_rows(br#"{"rows": []}"#),
            Err(ServiceError::Decode(_))
        ));
    }
}
