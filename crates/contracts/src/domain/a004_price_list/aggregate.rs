use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::common::lenient::null_as_default;
use crate::domain::common::{AggregateRoot, EntityMetadata};

pub const ENDPOINT: &str = "/api/ztprecios-listas/preciosListasCRUD";

// ============================================================================
// Aggregate Root
// ============================================================================

/// Price list with its validity window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceList {
    #[serde(rename = "IDLISTAOK")]
    pub id: String,

    #[serde(rename = "DESLISTA", default, deserialize_with = "null_as_default")]
    pub description: String,

    #[serde(rename = "FECHAEXPIRAINI", default, deserialize_with = "null_as_default")]
    pub valid_from: String,

    #[serde(rename = "FECHAEXPIRAFIN", default, deserialize_with = "null_as_default")]
    pub valid_to: String,

    #[serde(rename = "IDTIPOLISTAOK", default, deserialize_with = "null_as_default")]
    pub list_type: String,

    #[serde(rename = "IDTIPOFORMULAOK", default, deserialize_with = "null_as_default")]
    pub formula_type: String,

    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl PriceList {
    pub fn to_form(&self) -> PriceListForm {
        PriceListForm {
            id: self.id.clone(),
            description: self.description.clone(),
            valid_from: date_part(&self.valid_from),
            valid_to: date_part(&self.valid_to),
            list_type: self.list_type.clone(),
            formula_type: self.formula_type.clone(),
        }
    }

    /// Validity window as "dd.mm.yyyy - dd.mm.yyyy"
    pub fn validity_label(&self) -> String {
        let fmt = |s: &str| {
            parse_date(s)
                .map(|d| d.format("%d.%m.%Y").to_string())
                .unwrap_or_else(|| "-".to_string())
        };
        format!("{} - {}", fmt(&self.valid_from), fmt(&self.valid_to))
    }
}

impl AggregateRoot for PriceList {
    fn key(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.metadata
    }

    fn aggregate_index() -> &'static str {
        "a004"
    }

    fn endpoint() -> &'static str {
        ENDPOINT
    }

    fn key_param() -> &'static str {
        "IDLISTAOK"
    }

    fn element_name() -> &'static str {
        "Lista de precios"
    }

    fn list_name() -> &'static str {
        "Listas de precios"
    }
}

/// Parse `YYYY-MM-DD`, a full RFC 3339 timestamp, or anything that starts
/// with a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    value
        .get(..10)
        .and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok())
}

/// Value suitable for `<input type="date">`
fn date_part(value: &str) -> String {
    parse_date(value)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

// ============================================================================
// Forms / DTOs
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceListForm {
    #[serde(rename = "IDLISTAOK")]
    pub id: String,

    #[serde(rename = "DESLISTA")]
    pub description: String,

    #[serde(rename = "FECHAEXPIRAINI")]
    pub valid_from: String,

    #[serde(rename = "FECHAEXPIRAFIN")]
    pub valid_to: String,

    #[serde(rename = "IDTIPOLISTAOK")]
    pub list_type: String,

    #[serde(rename = "IDTIPOFORMULAOK")]
    pub formula_type: String,
}

impl PriceListForm {
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("El identificador de la lista es obligatorio".into());
        }
        if self.description.trim().is_empty() {
            return Err("La descripción de la lista es obligatoria".into());
        }
        let from = parse_date(&self.valid_from)
            .ok_or_else(|| "La fecha de inicio no es válida".to_string())?;
        let to = parse_date(&self.valid_to)
            .ok_or_else(|| "La fecha de fin no es válida".to_string())?;
        if from > to {
            return Err("La fecha de inicio no puede ser posterior a la fecha de fin".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> PriceListForm {
        PriceListForm {
            id: "LISTA-2024".into(),
            description: "Lista general 2024".into(),
            valid_from: "2024-01-01".into(),
            valid_to: "2024-12-31".into(),
            list_type: "GENERAL".into(),
            formula_type: "FIJO".into(),
        }
    }

    #[test]
    fn test_parse_date_variants() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15);
        assert_eq!(parse_date("2024-03-15"), expected);
        assert_eq!(parse_date("2024-03-15T14:02:26.000Z"), expected);
        assert_eq!(parse_date("2024-03-15T14:02:26+00:00"), expected);
        assert_eq!(parse_date("15/03/2024"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_date_range_validation() {
        assert!(form().validate().is_ok());

        let mut same_day = form();
        same_day.valid_to = "2024-01-01".into();
        assert!(same_day.validate().is_ok());

        let mut inverted = form();
        inverted.valid_from = "2025-01-01".into();
        assert!(inverted.validate().is_err());

        let mut invalid = form();
        invalid.valid_to = "2024-02-30".into();
        assert_eq!(invalid.validate(), Err("La fecha de fin no es válida".into()));
    }

    #[test]
    fn test_to_form_normalizes_dates() {
        let list: PriceList = serde_json::from_value(serde_json::json!({
            "IDLISTAOK": "L1",
            "DESLISTA": "General",
            "FECHAEXPIRAINI": "2024-01-01T00:00:00.000Z",
            "FECHAEXPIRAFIN": "2024-12-31T00:00:00.000Z"
        }))
        .unwrap();
        let form = list.to_form();
        assert_eq!(form.valid_from, "2024-01-01");
        assert_eq!(form.valid_to, "2024-12-31");
        assert_eq!(list.validity_label(), "01.01.2024 - 31.12.2024");
    }
}
