use serde::{Deserialize, Serialize};

use crate::domain::common::lenient::{null_as_default, number};
use crate::domain::common::{AggregateRoot, EntityMetadata};
use crate::shared::identifiers::price_item_id;

pub const ENDPOINT: &str = "/api/ztprecios-items/preciosItemsCRUD";

// ============================================================================
// Aggregate Root
// ============================================================================

/// Price of one presentation inside one price list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceItem {
    #[serde(rename = "IdPrecioOK")]
    pub id: String,

    #[serde(rename = "IdListaOK", default, deserialize_with = "null_as_default")]
    pub list_id: String,

    #[serde(rename = "IdPresentaOK", default, deserialize_with = "null_as_default")]
    pub presentation_id: String,

    #[serde(rename = "Precio", default, deserialize_with = "number")]
    pub price: f64,

    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl PriceItem {
    pub fn to_form(&self) -> PriceItemForm {
        PriceItemForm {
            id: self.id.clone(),
            list_id: self.list_id.clone(),
            presentation_id: self.presentation_id.clone(),
            price: self.price,
        }
    }
}

impl AggregateRoot for PriceItem {
    fn key(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.presentation_id
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.metadata
    }

    fn aggregate_index() -> &'static str {
        "a005"
    }

    fn endpoint() -> &'static str {
        ENDPOINT
    }

    fn key_param() -> &'static str {
        "IdPrecioOK"
    }

    fn element_name() -> &'static str {
        "Precio"
    }

    fn list_name() -> &'static str {
        "Precios"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceItemForm {
    #[serde(rename = "IdPrecioOK")]
    pub id: String,

    #[serde(rename = "IdListaOK")]
    pub list_id: String,

    #[serde(rename = "IdPresentaOK")]
    pub presentation_id: String,

    #[serde(rename = "Precio")]
    pub price: f64,
}

impl PriceItemForm {
    pub fn for_list(list_id: &str) -> Self {
        Self {
            list_id: list_id.to_string(),
            ..Default::default()
        }
    }

    /// Choose the presentation; `IdPrecioOK` follows it
    pub fn set_presentation(&mut self, presentation_id: &str) {
        self.presentation_id = presentation_id.trim().to_string();
        self.id = price_item_id(&self.list_id, &self.presentation_id);
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.list_id.trim().is_empty() {
            return Err("La lista de precios es obligatoria".into());
        }
        if self.presentation_id.trim().is_empty() {
            return Err("Seleccione una presentación".into());
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err("El precio debe ser un número mayor o igual a cero".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_follows_presentation() {
        let mut form = PriceItemForm::for_list("LISTA-2024");
        form.set_presentation("SKU1-CAJA");
        assert_eq!(form.id, "LISTA-2024-SKU1-CAJA");
        form.set_presentation("SKU1-BOLSA");
        assert_eq!(form.id, "LISTA-2024-SKU1-BOLSA");
    }

    #[test]
    fn test_validation() {
        let mut form = PriceItemForm::for_list("L1");
        assert!(form.validate().is_err());
        form.set_presentation("P1");
        form.price = 99.9;
        assert!(form.validate().is_ok());
        form.price = f64::NAN;
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_decode_string_price() {
        let item: PriceItem = serde_json::from_value(serde_json::json!({
            "IdPrecioOK": "L1-P1",
            "IdListaOK": "L1",
            "IdPresentaOK": "P1",
            "Precio": "149.90"
        }))
        .unwrap();
        assert_eq!(item.price, 149.9);
    }
}
