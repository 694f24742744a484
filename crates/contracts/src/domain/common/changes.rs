//! Field-level change detection for partial updates.
//!
//! Dialogs keep the record as loaded plus a draft; on save only the fields
//! whose normalized string form differs are sent to `UpdateOne`.

use serde::ser::Error as _;
use serde::Serialize;
use serde_json::{Map, Value};

/// Changed fields keyed by their wire name, holding the draft's value
/// (text trimmed).
pub type ChangeSet = Map<String, Value>;

/// String form used for comparison: trimmed text, integral numbers without
/// a fractional part, `null` as the empty string, containers as compact JSON.
pub fn normalize_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            Some(f) => f.to_string(),
            None => n.to_string(),
        },
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Compare two serialized records field by field.
///
/// A field present in `original` but skipped in `draft` counts as cleared
/// and is reported as `null`.
pub fn changed_fields<T: Serialize>(original: &T, draft: &T) -> Result<ChangeSet, serde_json::Error> {
    let before = serde_json::to_value(original)?;
    let after = serde_json::to_value(draft)?;

    let (Value::Object(before), Value::Object(after)) = (before, after) else {
        return Err(serde_json::Error::custom(
            "change detection needs struct-like records",
        ));
    };

    let mut changes = ChangeSet::new();
    for (key, new_value) in &after {
        let old_value = before.get(key).unwrap_or(&Value::Null);
        if normalize_value(old_value) != normalize_value(new_value) {
            let sent = match new_value {
                Value::String(text) => Value::String(text.trim().to_string()),
                other => other.clone(),
            };
            changes.insert(key.clone(), sent);
        }
    }
    for (key, old_value) in &before {
        if !after.contains_key(key) && !normalize_value(old_value).is_empty() {
            changes.insert(key.clone(), Value::Null);
        }
    }
    Ok(changes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Clone, Serialize)]
    struct Form {
        #[serde(rename = "Nombre")]
        name: String,
        #[serde(rename = "PadreCATID", skip_serializing_if = "Option::is_none")]
        parent: Option<String>,
        #[serde(rename = "Precio")]
        price: f64,
        #[serde(rename = "ACTIVED")]
        active: bool,
    }

    fn base() -> Form {
        Form {
            name: "Herramientas".into(),
            parent: Some("CAT_FERRETERIA".into()),
            price: 10.0,
            active: true,
        }
    }

    #[test]
    fn test_no_changes_is_empty() {
        let changes = changed_fields(&base(), &base()).unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn test_whitespace_only_edit_is_not_a_change() {
        let mut draft = base();
        draft.name = "  Herramientas ".into();
        assert!(changed_fields(&base(), &draft).unwrap().is_empty());
    }

    #[test]
    fn test_only_changed_fields_reported() {
        let mut draft = base();
        draft.name = "Herramientas eléctricas".into();
        draft.price = 12.5;
        let changes = changed_fields(&base(), &draft).unwrap();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes["Nombre"], json!("Herramientas eléctricas"));
        assert_eq!(changes["Precio"], json!(12.5));
        assert!(!changes.contains_key("ACTIVED"));
    }

    #[test]
    fn test_changed_text_is_sent_trimmed() {
        let mut draft = base();
        draft.name = "Caja grande  ".into();
        let changes = changed_fields(&base(), &draft).unwrap();
        assert_eq!(changes["Nombre"], json!("Caja grande"));
    }

    #[test]
    fn test_cleared_optional_is_null() {
        let mut draft = base();
        draft.parent = None;
        let changes = changed_fields(&base(), &draft).unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes["PadreCATID"], Value::Null);
    }

    #[test]
    fn test_normalization() {
        assert_eq!(normalize_value(&json!(10.0)), "10");
        assert_eq!(normalize_value(&json!("10")), "10");
        assert_eq!(normalize_value(&json!(0.25)), "0.25");
        assert_eq!(normalize_value(&Value::Null), "");
        assert_eq!(normalize_value(&json!(["a", "b"])), r#"["a","b"]"#);
    }

    #[test]
    fn test_non_struct_is_error() {
        assert!(changed_fields(&1, &2).is_err());
    }
}
