//! Response envelope decoding.
//!
//! The backend wraps results in `{ value: [ { data: [ { dataRes: ... } ] } ] }`,
//! but some operations answer with flatter shapes. Every endpoint goes through
//! the same decoder: locate the payload, then deserialize it into the typed
//! schema. A missing payload is an empty result, never an error.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid JSON body: {0}")]
    Json(String),
    #[error("unexpected payload shape: {0}")]
    Shape(String),
}

/// Keys the backend uses for human-readable error text, most specific first.
const MESSAGE_KEYS: &[&str] = &["messageUSR", "message", "error", "messageDEV"];

/// Parse a raw response body. An empty body is `Value::Null`.
pub fn parse_body(text: &str) -> Result<Value, DecodeError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| DecodeError::Json(e.to_string()))
}

fn first(v: &Value) -> Option<&Value> {
    match v {
        Value::Array(items) => items.first(),
        _ => None,
    }
}

fn present(v: Option<&Value>) -> Option<&Value> {
    v.filter(|inner| !inner.is_null())
}

/// Find the payload inside the envelope, trying the nested shape first and
/// falling back to progressively flatter ones.
pub fn locate_payload(body: &Value) -> Option<&Value> {
    let nested_value = body.get("value").and_then(first);

    let candidates = [
        nested_value
            .and_then(|v| v.get("data"))
            .and_then(first)
            .and_then(|d| d.get("dataRes")),
        nested_value.and_then(|v| v.get("dataRes")),
        body.get("data").and_then(first).and_then(|d| d.get("dataRes")),
        body.get("dataRes"),
    ];
    if let Some(found) = candidates.into_iter().flatten().find(|v| !v.is_null()) {
        return Some(found);
    }

    // Flat OData-style `{ value: [...] }`, unless it's the wrapper itself.
    if let Some(value) = present(body.get("value")) {
        let is_wrapper = nested_value
            .map(|v| v.get("data").is_some() || v.get("dataRes").is_some())
            .unwrap_or(false);
        if !is_wrapper {
            return Some(value);
        }
        return None;
    }

    if let Some(Value::Array(items)) = present(body.get("data")) {
        let is_wrapper = items
            .first()
            .map(|d| d.get("dataRes").is_some())
            .unwrap_or(false);
        if !is_wrapper {
            return body.get("data");
        }
        return None;
    }

    match body {
        Value::Array(_) => Some(body),
        _ => None,
    }
}

/// Decode a list result. Missing payloads decode to an empty list; a single
/// object decodes to a one-element list.
pub fn decode_list<T: DeserializeOwned>(body: &Value) -> Result<Vec<T>, DecodeError> {
    match locate_payload(body) {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                serde_json::from_value(item.clone()).map_err(|e| DecodeError::Shape(e.to_string()))
            })
            .collect(),
        Some(obj @ Value::Object(_)) => serde_json::from_value(obj.clone())
            .map(|one| vec![one])
            .map_err(|e| DecodeError::Shape(e.to_string())),
        _ => Ok(Vec::new()),
    }
}

/// Decode a single-object result. Arrays yield their first element.
pub fn decode_one<T: DeserializeOwned>(body: &Value) -> Result<Option<T>, DecodeError> {
    let payload = match locate_payload(body) {
        Some(Value::Array(items)) => items.first(),
        Some(obj @ Value::Object(_)) => Some(obj),
        _ => None,
    };
    payload
        .map(|v| serde_json::from_value(v.clone()).map_err(|e| DecodeError::Shape(e.to_string())))
        .transpose()
}

fn message_in(v: &Value) -> Option<String> {
    for key in MESSAGE_KEYS {
        match v.get(*key) {
            Some(Value::String(s)) if !s.trim().is_empty() => return Some(s.trim().to_string()),
            // OData style: { "error": { "code": ..., "message": ... } }
            Some(nested @ Value::Object(_)) => {
                if let Some(msg) = message_in(nested) {
                    return Some(msg);
                }
            }
            _ => {}
        }
    }
    None
}

/// Extract the server-supplied error message, wherever the endpoint put it.
pub fn server_message(body: &Value) -> Option<String> {
    message_in(body).or_else(|| body.get("value").and_then(first).and_then(message_in))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        #[serde(rename = "CATID")]
        id: String,
    }

    #[test]
    fn test_nested_envelope() {
        let body = json!({
            "value": [ { "data": [ { "dataRes": [ { "CATID": "CAT_A" }, { "CATID": "CAT_B" } ] } ] } ]
        });
        let rows: Vec<Row> = decode_list(&body).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].id, "CAT_B");
    }

    #[test]
    fn test_flatter_shapes() {
        let shapes = [
            json!({ "data": [ { "dataRes": [ { "CATID": "X" } ] } ] }),
            json!({ "dataRes": [ { "CATID": "X" } ] }),
            json!({ "value": [ { "CATID": "X" } ] }),
            json!({ "data": [ { "CATID": "X" } ] }),
            json!([ { "CATID": "X" } ]),
        ];
        for body in shapes {
            let rows: Vec<Row> = decode_list(&body).unwrap();
            assert_eq!(rows, vec![Row { id: "X".into() }], "shape: {body}");
        }
    }

    #[test]
    fn test_missing_keys_yield_empty_list() {
        let bodies = [
            Value::Null,
            json!({}),
            json!({ "value": [] }),
            json!({ "value": [ { "data": [] } ] }),
            json!({ "value": [ { "data": [ {} ] } ] }),
            json!({ "value": [ { "data": [ { "dataRes": null } ] } ] }),
            json!({ "ok": true }),
            json!("done"),
        ];
        for body in bodies {
            let rows: Vec<Row> = decode_list(&body).unwrap();
            assert!(rows.is_empty(), "shape: {body}");
        }
    }

    #[test]
    fn test_single_object_payload() {
        let body = json!({ "value": [ { "data": [ { "dataRes": { "CATID": "CAT_ONE" } } ] } ] });
        let list: Vec<Row> = decode_list(&body).unwrap();
        assert_eq!(list.len(), 1);

        let one: Option<Row> = decode_one(&body).unwrap();
        assert_eq!(one.unwrap().id, "CAT_ONE");

        let none: Option<Row> = decode_one(&json!({})).unwrap();
        assert!(none.is_none());
    }

    #[test]
    fn test_malformed_rows_are_errors() {
        let body = json!({ "dataRes": [ { "CATID": 42 } ] });
        let res: Result<Vec<Row>, _> = decode_list(&body);
        assert!(matches!(res, Err(DecodeError::Shape(_))));
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body("  ").unwrap(), Value::Null);
        assert!(parse_body("{oops").is_err());
    }

    #[test]
    fn test_server_message_lookup() {
        assert_eq!(
            server_message(&json!({ "messageUSR": "SKU duplicado", "messageDEV": "E11000" })),
            Some("SKU duplicado".to_string())
        );
        assert_eq!(
            server_message(&json!({ "error": { "code": "400", "message": "Bad field" } })),
            Some("Bad field".to_string())
        );
        assert_eq!(
            server_message(&json!({ "value": [ { "message": "No encontrado" } ] })),
            Some("No encontrado".to_string())
        );
        assert_eq!(server_message(&json!({ "message": "  " })), None);
        assert_eq!(server_message(&Value::Null), None);
    }
}
