//! Presentation being typed in, before it becomes a wire payload.
//!
//! Costs stay as text until submission so half-typed numbers ("12,") do not
//! fight the input. Used by the product wizard and the presentation dialogs.

use crate::shared::attachments::AttachmentList;
use contracts::domain::a002_presentation::{ExtraProperties, NewPresentation, Presentation, PresentationForm};
use contracts::shared::identifiers::presentation_id;
use uuid::Uuid;

/// Parse a cost typed by the user. Empty means zero; a decimal comma is
/// accepted.
pub fn parse_cost(text: &str) -> Result<f64, String> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(0.0);
    }
    let value: f64 = text
        .replace(',', ".")
        .parse()
        .map_err(|_| format!("'{}' no es un costo válido", text))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("'{}' no es un costo válido", text));
    }
    Ok(value)
}

#[derive(Debug, Clone, PartialEq)]
pub struct PresentationDraft {
    /// Identity inside the editor list; never sent
    pub key: String,
    pub name: String,
    pub description: String,
    pub cost_initial: String,
    pub cost_final: String,
    /// Extra property rows; blank keys are dropped on submit
    pub extra: Vec<(String, String)>,
    pub attachments: AttachmentList,
}

impl Default for PresentationDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl PresentationDraft {
    pub fn new() -> Self {
        Self {
            key: Uuid::new_v4().to_string(),
            name: String::new(),
            description: String::new(),
            cost_initial: String::new(),
            cost_final: String::new(),
            extra: Vec::new(),
            attachments: AttachmentList::new(),
        }
    }

    /// Editable copy of a stored presentation. Stored files are not part of
    /// the draft; `has_principal` tells whether one of them is principal.
    pub fn from_presentation(presentation: &Presentation, has_principal: bool) -> Self {
        Self {
            key: presentation.id.clone(),
            name: presentation.name.clone(),
            description: presentation.description.clone(),
            cost_initial: presentation.cost_initial.to_string(),
            cost_final: presentation.cost_final.to_string(),
            extra: presentation.extra.0.clone(),
            attachments: AttachmentList::with_external_principal(has_principal),
        }
    }

    pub fn add_extra_row(&mut self) {
        self.extra.push((String::new(), String::new()));
    }

    pub fn remove_extra_row(&mut self, index: usize) {
        if index < self.extra.len() {
            self.extra.remove(index);
        }
    }

    pub fn set_extra_key(&mut self, index: usize, key: String) {
        if let Some(row) = self.extra.get_mut(index) {
            row.0 = key;
        }
    }

    pub fn set_extra_value(&mut self, index: usize, value: String) {
        if let Some(row) = self.extra.get_mut(index) {
            row.1 = value;
        }
    }

    pub fn extra_properties(&self) -> ExtraProperties {
        ExtraProperties(
            self.extra
                .iter()
                .filter(|(k, _)| !k.trim().is_empty())
                .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
                .collect(),
        )
    }

    /// `IdPresentaOK` this draft gets under `skuid`
    pub fn derived_id(&self, skuid: &str) -> String {
        presentation_id(skuid, &self.name)
    }

    pub fn validate(&self) -> Result<(), String> {
        self.to_form().map(|_| ())
    }

    /// Create payload for a product with `skuid`
    pub fn to_new_presentation(&self, skuid: &str) -> Result<NewPresentation, String> {
        let presentation = NewPresentation {
            id: self.derived_id(skuid),
            sku_id: skuid.trim().to_string(),
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            cost_initial: parse_cost(&self.cost_initial)?,
            cost_final: parse_cost(&self.cost_final)?,
            extra: self.extra_properties(),
            is_active: true,
            files: self.attachments.files().to_vec(),
        };
        presentation.validate()?;
        Ok(presentation)
    }

    /// Update form of an existing presentation; only new files are included
    pub fn to_form(&self) -> Result<PresentationForm, String> {
        let form = PresentationForm {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            cost_initial: parse_cost(&self.cost_initial)?,
            cost_final: parse_cost(&self.cost_final)?,
            extra: self.extra_properties(),
            files: self.attachments.files().to_vec(),
        };
        form.validate()?;
        Ok(form)
    }

    /// One-line summary for review screens
    pub fn summary(&self) -> String {
        let cost = parse_cost(&self.cost_final).unwrap_or_default();
        format!(
            "{} · {:.2} · {} archivo(s)",
            self.name.trim(),
            cost,
            self.attachments.files().len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::attachments::to_data_url;
    use contracts::domain::a006_product_file::{FileType, NewProductFile};
    use serde_json::json;

    fn draft() -> PresentationDraft {
        let mut d = PresentationDraft::new();
        d.name = "Caja con 2 baterías".into();
        d.description = "Incluye cargador".into();
        d.cost_initial = "1200,50".into();
        d.cost_final = "".into();
        d
    }

    #[test]
    fn test_parse_cost() {
        assert_eq!(parse_cost(""), Ok(0.0));
        assert_eq!(parse_cost(" 35,5 "), Ok(35.5));
        assert_eq!(parse_cost("900"), Ok(900.0));
        assert!(parse_cost("-1").is_err());
        assert!(parse_cost("doce").is_err());
    }

    #[test]
    fn test_new_presentation_payload() {
        let mut d = draft();
        d.add_extra_row();
        d.set_extra_key(0, " color ".into());
        d.set_extra_value(0, "rojo".into());
        d.add_extra_row();
        d.attachments.attach(NewProductFile {
            file: to_data_url("image/png", b"png"),
            file_type: FileType::Img,
            original_name: "foto.png".into(),
            principal: false,
            extra_info: String::new(),
        });

        let p = d.to_new_presentation("TALADRO-INALAMBRICO-LX1").unwrap();
        assert_eq!(p.id, "TALADRO-INALAMBRICO-LX1-CAJA-CON-2-BATERIAS");
        assert_eq!(p.cost_initial, 1200.5);
        assert_eq!(p.cost_final, 0.0);
        assert!(p.files[0].principal);

        let wire = serde_json::to_value(&p).unwrap();
        assert_eq!(wire["PropiedadesExtras"], json!("{\"color\":\"rojo\"}"));
    }

    #[test]
    fn test_id_follows_name() {
        let mut d = draft();
        let before = d.derived_id("SKU1");
        d.name = "Caja sola".into();
        assert_ne!(before, d.derived_id("SKU1"));
        assert_eq!(d.derived_id("SKU1"), "SKU1-CAJA-SOLA");
    }

    #[test]
    fn test_invalid_cost_blocks_form() {
        let mut d = draft();
        d.cost_final = "12..4".into();
        assert!(d.to_form().is_err());
        d.cost_final = "12.4".into();
        assert_eq!(d.to_form().unwrap().cost_final, 12.4);
    }

    #[test]
    fn test_round_trip_from_presentation() {
        let stored: Presentation = serde_json::from_value(json!({
            "IdPresentaOK": "SKU1-CAJA",
            "SKUID": "SKU1",
            "NOMBREPRESENTACION": "Caja",
            "Descripcion": "Caja individual",
            "CostoIni": 900,
            "CostoFin": 1150.5,
            "PropiedadesExtras": "{\"peso\":\"2kg\"}"
        }))
        .unwrap();
        let d = PresentationDraft::from_presentation(&stored, true);
        assert_eq!(d.cost_initial, "900");
        assert_eq!(d.cost_final, "1150.5");
        assert_eq!(d.extra, vec![("peso".to_string(), "2kg".to_string())]);
        assert_eq!(d.to_form().unwrap(), stored.to_form());
    }
}
