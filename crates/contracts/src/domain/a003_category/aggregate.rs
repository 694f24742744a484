use serde::{Deserialize, Serialize};

use crate::domain::common::lenient::null_as_default;
use crate::domain::common::{AggregateRoot, EntityMetadata};
use crate::shared::identifiers::category_id;

pub const ENDPOINT: &str = "/api/ztcategorias/categoriasCRUD";

// ============================================================================
// Aggregate Root
// ============================================================================

/// Product category, optionally nested under a parent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "CATID")]
    pub id: String,

    #[serde(rename = "Nombre", default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(rename = "PadreCATID", default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl Category {
    pub fn to_form(&self) -> CategoryForm {
        CategoryForm {
            id: self.id.clone(),
            name: self.name.clone(),
            parent_id: self.parent_id.clone().filter(|p| !p.trim().is_empty()),
        }
    }
}

impl AggregateRoot for Category {
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
        "a003"
    }

    fn endpoint() -> &'static str {
        ENDPOINT
    }

    fn key_param() -> &'static str {
        "catid"
    }

    fn element_name() -> &'static str {
        "Categoría"
    }

    fn list_name() -> &'static str {
        "Categorías"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Create and edit form. The key always follows the name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryForm {
    #[serde(rename = "CATID")]
    pub id: String,

    #[serde(rename = "Nombre")]
    pub name: String,

    #[serde(rename = "PadreCATID", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl CategoryForm {
    /// Set the name and regenerate `CATID` from it
    pub fn rename(&mut self, name: &str) {
        self.name = name.to_string();
        self.id = category_id(name);
    }

    pub fn set_parent(&mut self, parent: &str) {
        let parent = parent.trim();
        self.parent_id = (!parent.is_empty()).then(|| parent.to_string());
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() || self.id.is_empty() {
            return Err("El nombre de la categoría es obligatorio".into());
        }
        if self.parent_id.as_deref() == Some(self.id.as_str()) {
            return Err("Una categoría no puede ser su propia categoría padre".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rename_regenerates_key() {
        let mut form = CategoryForm::default();
        form.rename("Herramientas");
        assert_eq!(form.id, "CAT_HERRAMIENTAS");
        form.rename("Herramientas eléctricas");
        assert_eq!(form.id, "CAT_HERRAMIENTAS_ELECTRICAS");
        form.rename("Herramientas eléctricas");
        assert_eq!(form.id, "CAT_HERRAMIENTAS_ELECTRICAS");
    }

    #[test]
    fn test_parent_rules() {
        let mut form = CategoryForm::default();
        form.rename("Taladros");
        form.set_parent("  ");
        assert_eq!(form.parent_id, None);
        assert!(form.validate().is_ok());

        form.set_parent("CAT_TALADROS");
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut form = CategoryForm::default();
        form.rename("¡!");
        assert!(form.validate().is_err());
    }
}
