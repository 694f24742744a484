use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::domain::a006_product_file::{NewProductFile, ProductFile};
use crate::domain::common::lenient::{null_as_default, number};
use crate::domain::common::{normalize_value, AggregateRoot, EntityMetadata};

pub const ENDPOINT: &str = "/api/ztproducts-presentaciones/productsPresentacionesCRUD";

// ============================================================================
// Extra properties
// ============================================================================

/// Free-form key/value pairs of a presentation.
///
/// Sent as a JSON-encoded string; accepted as a string, an object or `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtraProperties(pub Vec<(String, String)>);

impl ExtraProperties {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Object form; rows with a blank key are skipped, later duplicates win.
    pub fn to_object(&self) -> Map<String, Value> {
        let mut map = Map::new();
        for (key, value) in &self.0 {
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            map.insert(key.to_string(), Value::String(value.trim().to_string()));
        }
        map
    }

    pub fn to_json_string(&self) -> String {
        Value::Object(self.to_object()).to_string()
    }

    fn from_object(map: &Map<String, Value>) -> Self {
        Self(
            map.iter()
                .map(|(k, v)| (k.clone(), normalize_value(v)))
                .collect(),
        )
    }
}

impl Serialize for ExtraProperties {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_json_string())
    }
}

impl<'de> Deserialize<'de> for ExtraProperties {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Self::default()),
            Value::Object(map) => Ok(Self::from_object(&map)),
            Value::String(text) if text.trim().is_empty() => Ok(Self::default()),
            Value::String(text) => match serde_json::from_str::<Value>(&text) {
                Ok(Value::Object(map)) => Ok(Self::from_object(&map)),
                Ok(Value::Null) => Ok(Self::default()),
                _ => Err(D::Error::custom("PropiedadesExtras is not a JSON object")),
            },
            other => Err(D::Error::custom(format!(
                "PropiedadesExtras must be an object, got {other}"
            ))),
        }
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Variant of a product (package size, color, kit...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Presentation {
    #[serde(rename = "IdPresentaOK")]
    pub id: String,

    #[serde(rename = "SKUID", default, deserialize_with = "null_as_default")]
    pub sku_id: String,

    #[serde(rename = "NOMBREPRESENTACION", default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(rename = "Descripcion", default, deserialize_with = "null_as_default")]
    pub description: String,

    #[serde(rename = "CostoIni", default, deserialize_with = "number")]
    pub cost_initial: f64,

    #[serde(rename = "CostoFin", default, deserialize_with = "number")]
    pub cost_final: f64,

    #[serde(rename = "PropiedadesExtras", default)]
    pub extra: ExtraProperties,

    #[serde(default, deserialize_with = "null_as_default")]
    pub files: Vec<ProductFile>,

    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl Presentation {
    pub fn to_form(&self) -> PresentationForm {
        PresentationForm {
            name: self.name.clone(),
            description: self.description.clone(),
            cost_initial: self.cost_initial,
            cost_final: self.cost_final,
            extra: self.extra.clone(),
            files: Vec::new(),
        }
    }
}

impl AggregateRoot for Presentation {
    fn key(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.metadata
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn endpoint() -> &'static str {
        ENDPOINT
    }

    fn key_param() -> &'static str {
        "IdPresentaOK"
    }

    fn element_name() -> &'static str {
        "Presentación"
    }

    fn list_name() -> &'static str {
        "Presentaciones"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Create payload, standalone (`AddOne`) or inside the composite product request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPresentation {
    #[serde(rename = "IdPresentaOK")]
    pub id: String,

    #[serde(rename = "SKUID", skip_serializing_if = "String::is_empty")]
    pub sku_id: String,

    #[serde(rename = "NOMBREPRESENTACION")]
    pub name: String,

    #[serde(rename = "Descripcion")]
    pub description: String,

    #[serde(rename = "CostoIni")]
    pub cost_initial: f64,

    #[serde(rename = "CostoFin")]
    pub cost_final: f64,

    #[serde(rename = "PropiedadesExtras")]
    pub extra: ExtraProperties,

    #[serde(rename = "ACTIVED")]
    pub is_active: bool,

    pub files: Vec<NewProductFile>,
}

impl NewPresentation {
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("El identificador de la presentación no puede estar vacío".into());
        }
        validate_common(&self.name, &self.description, self.cost_initial, self.cost_final)?;
        for file in &self.files {
            file.validate()?;
        }
        Ok(())
    }
}

/// Editable part of an existing presentation, diffed on save.
///
/// `files` holds only newly attached files; stored ones are managed through
/// the files endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentationForm {
    #[serde(rename = "NOMBREPRESENTACION")]
    pub name: String,

    #[serde(rename = "Descripcion")]
    pub description: String,

    #[serde(rename = "CostoIni")]
    pub cost_initial: f64,

    #[serde(rename = "CostoFin")]
    pub cost_final: f64,

    #[serde(rename = "PropiedadesExtras")]
    pub extra: ExtraProperties,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<NewProductFile>,
}

impl PresentationForm {
    pub fn validate(&self) -> Result<(), String> {
        validate_common(&self.name, &self.description, self.cost_initial, self.cost_final)?;
        for file in &self.files {
            file.validate()?;
        }
        Ok(())
    }
}

fn validate_common(name: &str, description: &str, cost_ini: f64, cost_fin: f64) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("El nombre de la presentación es obligatorio".into());
    }
    if description.trim().is_empty() {
        return Err("La descripción de la presentación es obligatoria".into());
    }
    if !cost_ini.is_finite() || cost_ini < 0.0 || !cost_fin.is_finite() || cost_fin < 0.0 {
        return Err("Los costos deben ser números mayores o iguales a cero".into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extra_properties_accepts_string_or_object() {
        let from_string: ExtraProperties =
            serde_json::from_value(json!(r#"{"color":"rojo","voltaje":18}"#)).unwrap();
        assert_eq!(from_string.get("color"), Some("rojo"));
        assert_eq!(from_string.get("voltaje"), Some("18"));

        let from_object: ExtraProperties =
            serde_json::from_value(json!({ "color": "rojo", "voltaje": 18 })).unwrap();
        assert_eq!(from_object, from_string);

        let empty: ExtraProperties = serde_json::from_value(json!("")).unwrap();
        assert!(empty.is_empty());

        assert!(serde_json::from_value::<ExtraProperties>(json!("[1,2]")).is_err());
    }

    #[test]
    fn test_extra_properties_sent_as_string() {
        let props = ExtraProperties(vec![
            ("color".into(), " rojo ".into()),
            ("  ".into(), "ignored".into()),
        ]);
        let wire = serde_json::to_value(&props).unwrap();
        assert_eq!(wire, json!(r#"{"color":"rojo"}"#));
    }

    #[test]
    fn test_decode_presentation_with_string_costs() {
        let p: Presentation = serde_json::from_value(json!({
            "IdPresentaOK": "SKU1-CAJA",
            "SKUID": "SKU1",
            "NOMBREPRESENTACION": "Caja",
            "Descripcion": null,
            "CostoIni": "10,5",
            "CostoFin": 12,
            "PropiedadesExtras": "{}",
            "ACTIVED": true
        }))
        .unwrap();
        assert_eq!(p.cost_initial, 10.5);
        assert_eq!(p.cost_final, 12.0);
        assert!(p.files.is_empty());
        assert_eq!(p.key(), "SKU1-CAJA");
    }

    #[test]
    fn test_form_validation() {
        let mut form = PresentationForm {
            name: "Caja".into(),
            description: "Caja con 2 baterías".into(),
            cost_initial: 10.0,
            cost_final: 12.0,
            extra: ExtraProperties::default(),
            files: Vec::new(),
        };
        assert!(form.validate().is_ok());
        form.description = "  ".into();
        assert!(form.validate().is_err());
        form.description = "ok".into();
        form.cost_final = -1.0;
        assert!(form.validate().is_err());
    }
}
