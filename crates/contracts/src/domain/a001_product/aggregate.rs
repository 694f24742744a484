use serde::{Deserialize, Serialize};

use crate::domain::a002_presentation::NewPresentation;
use crate::domain::common::lenient::null_as_default;
use crate::domain::common::{AggregateRoot, EntityMetadata};

pub const ENDPOINT: &str = "/api/ztproducts/productsCRUD";

/// Creates a product together with its presentations in one call
pub const COMPLETE_ENDPOINT: &str = "/api/ztproducts/crearProductoCompleto";

// ============================================================================
// Aggregate Root
// ============================================================================

/// Product of the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "SKUID")]
    pub sku_id: String,

    #[serde(rename = "PRODUCTNAME", default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(rename = "DESSKU", default, deserialize_with = "null_as_default")]
    pub description: String,

    #[serde(rename = "MARCA", default, deserialize_with = "null_as_default")]
    pub brand: String,

    /// Unit of measure code
    #[serde(rename = "IDUNIDADMEDIDA", default, deserialize_with = "null_as_default")]
    pub unit: String,

    #[serde(rename = "BARCODE", default, deserialize_with = "null_as_default")]
    pub barcode: String,

    #[serde(rename = "INFOAD", default, deserialize_with = "null_as_default")]
    pub extra_info: String,

    /// CATIDs of the categories the product belongs to
    #[serde(rename = "CATEGORIAS", default, deserialize_with = "null_as_default")]
    pub categories: Vec<String>,

    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl Product {
    pub fn to_form(&self) -> ProductForm {
        ProductForm {
            name: self.name.clone(),
            description: self.description.clone(),
            brand: self.brand.clone(),
            unit: self.unit.clone(),
            barcode: self.barcode.clone(),
            extra_info: self.extra_info.clone(),
            categories: self.categories.clone(),
        }
    }

    /// Case-insensitive match over the columns shown in the list
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        [
            &self.sku_id,
            &self.name,
            &self.description,
            &self.brand,
            &self.barcode,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}

impl AggregateRoot for Product {
    fn key(&self) -> &str {
        &self.sku_id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.metadata
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn endpoint() -> &'static str {
        ENDPOINT
    }

    fn key_param() -> &'static str {
        "skuid"
    }

    fn element_name() -> &'static str {
        "Producto"
    }

    fn list_name() -> &'static str {
        "Productos"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Editable product fields. Used both for the diff-based update and as the
/// product part of the composite create request, where the SKU is assigned
/// by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductForm {
    #[serde(rename = "PRODUCTNAME")]
    pub name: String,

    #[serde(rename = "DESSKU")]
    pub description: String,

    #[serde(rename = "MARCA")]
    pub brand: String,

    #[serde(rename = "IDUNIDADMEDIDA")]
    pub unit: String,

    #[serde(rename = "BARCODE")]
    pub barcode: String,

    #[serde(rename = "INFOAD")]
    pub extra_info: String,

    #[serde(rename = "CATEGORIAS")]
    pub categories: Vec<String>,
}

impl ProductForm {
    /// Required before leaving the first wizard step or saving an edit
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("El nombre del producto es obligatorio".into());
        }
        if self.description.trim().is_empty() {
            return Err("La descripción del producto es obligatoria".into());
        }
        if self.brand.trim().is_empty() {
            return Err("La marca es obligatoria".into());
        }
        Ok(())
    }

    pub fn toggle_category(&mut self, cat_id: &str) {
        if let Some(pos) = self.categories.iter().position(|c| c == cat_id) {
            self.categories.remove(pos);
        } else {
            self.categories.push(cat_id.to_string());
        }
    }
}

/// Body of `crearProductoCompleto`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompleteProductRequest {
    pub product: ProductForm,
    pub presentations: Vec<NewPresentation>,
}

impl CompleteProductRequest {
    pub fn validate(&self) -> Result<(), String> {
        self.product.validate()?;
        if self.presentations.is_empty() {
            return Err("Agregue al menos una presentación".into());
        }
        for presentation in &self.presentations {
            presentation.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form() -> ProductForm {
        ProductForm {
            name: "Taladro Inalámbrico".into(),
            description: "Taladro 18V".into(),
            brand: "Truper".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_decode_product() {
        let product: Product = serde_json::from_value(json!({
            "SKUID": "TALADRO-LX1",
            "PRODUCTNAME": "Taladro",
            "MARCA": null,
            "CATEGORIAS": ["CAT_HERRAMIENTAS"],
            "ACTIVED": false,
            "REGUSER": "ana"
        }))
        .unwrap();
        assert_eq!(product.brand, "");
        assert!(!product.is_active());
        assert_eq!(product.categories, vec!["CAT_HERRAMIENTAS"]);
        assert!(product.matches("taladro"));
        assert!(!product.matches("martillo"));
    }

    #[test]
    fn test_form_validation() {
        assert!(form().validate().is_ok());
        let mut missing_brand = form();
        missing_brand.brand = " ".into();
        assert_eq!(missing_brand.validate(), Err("La marca es obligatoria".into()));
    }

    #[test]
    fn test_toggle_category() {
        let mut f = form();
        f.toggle_category("CAT_A");
        f.toggle_category("CAT_B");
        f.toggle_category("CAT_A");
        assert_eq!(f.categories, vec!["CAT_B"]);
    }

    #[test]
    fn test_complete_request_needs_presentations() {
        let request = CompleteProductRequest {
            product: form(),
            presentations: Vec::new(),
        };
        assert!(request.validate().is_err());

        let wire = serde_json::to_value(&request).unwrap();
        assert!(wire["product"].get("SKUID").is_none());
        assert_eq!(wire["product"]["PRODUCTNAME"], json!("Taladro Inalámbrico"));
    }
}
