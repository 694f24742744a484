//! Tolerant field deserializers.
//!
//! Records written by older clients carry `null` for empty text and numbers
//! typed as strings; both must still decode.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `null` or missing decodes to `T::default()`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `12.5`, `"12.5"`, `"12,5"`, `""` and `null` (the last two as zero).
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(0.0),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| D::Error::custom("number out of range")),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(0.0);
            }
            s.replace(',', ".")
                .parse::<f64>()
                .map_err(|_| D::Error::custom(format!("not a number: {s}")))
        }
        other => Err(D::Error::custom(format!("expected a number, got {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "null_as_default")]
        name: String,
        #[serde(default, deserialize_with = "number")]
        cost: f64,
    }

    #[test]
    fn test_lenient_fields() {
        let row: Row = serde_json::from_value(json!({ "name": null, "cost": "12,5" })).unwrap();
        assert_eq!(row.name, "");
        assert_eq!(row.cost, 12.5);

        let row: Row = serde_json::from_value(json!({})).unwrap();
        assert_eq!(row.cost, 0.0);

        assert!(serde_json::from_value::<Row>(json!({ "cost": "abc" })).is_err());
    }
}
