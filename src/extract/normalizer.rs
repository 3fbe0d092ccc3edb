//! Projection of decoded objects onto the fixed output schema.

use crate::types::{FieldValue, ListingRow};
use serde_json::{Map, Value};

/// Project a decoded object onto the eleven-field listing schema.
///
/// Keys missing from the source map to [`FieldValue::Null`]; keys outside
/// the schema are discarded. Values are taken as decoded, with no type
/// coercion.
pub fn normalize(mut object: Map<String, Value>) -> ListingRow {
    ListingRow {
        id: take(&mut object, "_id"),
        ad_id: take(&mut object, "adId"),
        brand: take(&mut object, "brand"),
        series: take(&mut object, "series"),
        model: take(&mut object, "model"),
        year: take(&mut object, "year"),
        km: take(&mut object, "km"),
        price: take(&mut object, "price"),
        created_at: take(&mut object, "createdAt"),
        updated_at: take(&mut object, "updatedAt"),
        version: take(&mut object, "__v"),
    }
}

fn take(object: &mut Map<String, Value>, key: &str) -> FieldValue {
    object
        .remove(key)
        .map(FieldValue::from)
        .unwrap_or(FieldValue::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object fixture, got {other}"),
        }
    }

    #[test]
    fn test_missing_keys_become_null() {
        let row = normalize(object(json!({"_id": "1", "brand": "Fiat"})));
        assert_eq!(row.id, FieldValue::Str("1".to_string()));
        assert_eq!(row.brand, FieldValue::Str("Fiat".to_string()));
        assert_eq!(row.ad_id, FieldValue::Null);
        assert_eq!(row.series, FieldValue::Null);
        assert_eq!(row.version, FieldValue::Null);
    }

    #[test]
    fn test_keys_outside_the_schema_are_discarded() {
        let with_note = normalize(object(json!({"_id": "2", "note": "{weird}"})));
        let without_note = normalize(object(json!({"_id": "2"})));
        assert_eq!(with_note, without_note);
    }

    #[test]
    fn test_values_keep_their_decoded_type() {
        let row = normalize(object(json!({
            "year": 2010,
            "km": 50000,
            "price": "not-a-number",
        })));
        assert_eq!(row.year, FieldValue::Num(serde_json::Number::from(2010)));
        assert_eq!(row.km, FieldValue::Num(serde_json::Number::from(50000)));
        assert_eq!(row.price, FieldValue::Str("not-a-number".to_string()));
    }

    #[test]
    fn test_explicit_null_matches_missing() {
        let explicit = normalize(object(json!({"_id": "3", "adId": null})));
        let missing = normalize(object(json!({"_id": "3"})));
        assert_eq!(explicit, missing);
    }
}
