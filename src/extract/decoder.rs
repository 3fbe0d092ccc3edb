//! Span decoding.
//!
//! A span is only a balanced substring; whether it is a usable record is
//! decided here. Decoding is strict JSON, and a span that fails to decode
//! is dropped so extraction of the rest of the file continues.

use log::debug;
use serde_json::{Map, Value};

/// Decode one object span into a key/value map.
///
/// Returns `None` for spans that are not valid JSON objects (truncated
/// fragments that happened to balance, trailing commas, and the like).
/// Dropped spans are invisible to the caller apart from a debug-level log
/// line.
pub fn decode_span(span: String) -> Option<Map<String, Value>> {
    let mut bytes = span.into_bytes();
    match simd_json::serde::from_slice(&mut bytes) {
        Ok(object) => Some(object),
        Err(err) => {
            debug!("dropping undecodable span of {} bytes: {err}", bytes.len());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decodes_valid_object() {
        let object = decode_span(r#"{"_id":"1","year":2010}"#.to_string()).unwrap();
        assert_eq!(object.get("_id"), Some(&json!("1")));
        assert_eq!(object.get("year"), Some(&json!(2010)));
    }

    #[test]
    fn test_trailing_comma_is_dropped() {
        assert_eq!(decode_span(r#"{"_id":"4",}"#.to_string()), None);
    }

    #[test]
    fn test_truncated_fragment_is_dropped() {
        assert_eq!(decode_span(r#"{"_id":"9"#.to_string()), None);
    }

    #[test]
    fn test_string_typed_price_passes_through() {
        let object = decode_span(r#"{"_id":"3","price":"not-a-number"}"#.to_string()).unwrap();
        assert_eq!(object.get("price"), Some(&json!("not-a-number")));
    }

    #[test]
    fn test_nested_values_survive_decoding() {
        let object =
            decode_span(r#"{"_id":"5","dealer":{"name":"Oto"}}"#.to_string()).unwrap();
        assert_eq!(object.get("dealer"), Some(&json!({"name": "Oto"})));
    }
}
