//! Wizard state without any UI: steps, guards and the final payload.

use crate::domain::a002_presentation::draft::PresentationDraft;
use contracts::domain::a001_product::{CompleteProductRequest, ProductForm};
use contracts::shared::identifiers::{product_sku, SessionSuffix};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    ProductInfo,
    Presentations,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 3] = [WizardStep::ProductInfo, WizardStep::Presentations, WizardStep::Review];

    pub fn index(self) -> usize {
        match self {
            WizardStep::ProductInfo => 0,
            WizardStep::Presentations => 1,
            WizardStep::Review => 2,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::ProductInfo => "Datos del producto",
            WizardStep::Presentations => "Presentaciones",
            WizardStep::Review => "Revisión",
        }
    }

    fn next(self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    fn prev(self) -> Option<Self> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WizardState {
    pub step: WizardStep,
    pub product: ProductForm,
    pub presentations: Vec<PresentationDraft>,
    suffix: SessionSuffix,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardState {
    pub fn new() -> Self {
        Self::with_suffix(SessionSuffix::new())
    }

    pub fn with_suffix(suffix: SessionSuffix) -> Self {
        Self {
            step: WizardStep::ProductInfo,
            product: ProductForm::default(),
            presentations: Vec::new(),
            suffix,
        }
    }

    /// Provisional SKU; only used to derive presentation ids
    pub fn skuid(&self) -> String {
        product_sku(&self.product.name, &self.suffix)
    }

    /// Guard for leaving `step` forward
    pub fn check_step(&self, step: WizardStep) -> Result<(), String> {
        match step {
            WizardStep::ProductInfo => self.product.validate(),
            WizardStep::Presentations => {
                if self.presentations.is_empty() {
                    return Err("Agregue al menos una presentación".into());
                }
                self.presentations.iter().try_for_each(PresentationDraft::validate)
            }
            WizardStep::Review => Ok(()),
        }
    }

    pub fn next(&mut self) -> Result<(), String> {
        self.check_step(self.step)?;
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(())
    }

    /// Going back keeps everything entered on later steps
    pub fn back(&mut self) {
        if let Some(prev) = self.step.prev() {
            self.step = prev;
        }
    }

    /// Jump to an earlier step; forward jumps are ignored
    pub fn go_to(&mut self, step: WizardStep) {
        if step.index() < self.step.index() {
            self.step = step;
        }
    }

    /// Add a draft, or replace the one with the same key
    pub fn upsert_presentation(&mut self, draft: PresentationDraft) -> Result<(), String> {
        draft.validate()?;
        let skuid = self.skuid();
        let id = draft.derived_id(&skuid);
        if self
            .presentations
            .iter()
            .any(|p| p.key != draft.key && p.derived_id(&skuid) == id)
        {
            return Err(format!("Ya existe una presentación con el identificador {}", id));
        }
        match self.presentations.iter_mut().find(|p| p.key == draft.key) {
            Some(existing) => *existing = draft,
            None => self.presentations.push(draft),
        }
        Ok(())
    }

    pub fn remove_presentation(&mut self, key: &str) {
        self.presentations.retain(|p| p.key != key);
    }

    /// Body for `crearProductoCompleto`. Presentation ids are derived from
    /// the current SKU; the SKU itself is left to the backend.
    pub fn build_payload(&self) -> Result<CompleteProductRequest, String> {
        let skuid = self.skuid();
        let presentations = self
            .presentations
            .iter()
            .map(|draft| {
                let mut presentation = draft.to_new_presentation(&skuid)?;
                presentation.sku_id.clear();
                Ok(presentation)
            })
            .collect::<Result<Vec<_>, String>>()?;
        let request = CompleteProductRequest {
            product: self.product.clone(),
            presentations,
        };
        request.validate()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> WizardState {
        let mut s = WizardState::with_suffix(SessionSuffix::from_millis(1_700_000_000_000));
        s.product.name = "Taladro Inalámbrico".into();
        s.product.description = "Taladro 18V".into();
        s.product.brand = "Truper".into();
        s
    }

    fn draft(name: &str) -> PresentationDraft {
        let mut d = PresentationDraft::new();
        d.name = name.into();
        d.description = format!("{} individual", name);
        d.cost_initial = "900".into();
        d.cost_final = "1150".into();
        d
    }

    #[test]
    fn test_cannot_leave_presentations_without_any() {
        let mut s = state();
        s.next().unwrap();
        assert_eq!(s.step, WizardStep::Presentations);
        assert_eq!(s.next(), Err("Agregue al menos una presentación".into()));
        assert_eq!(s.step, WizardStep::Presentations);
    }

    #[test]
    fn test_product_info_guard() {
        let mut s = state();
        s.product.brand.clear();
        assert!(s.next().is_err());
        assert_eq!(s.step, WizardStep::ProductInfo);
    }

    #[test]
    fn test_back_keeps_presentations() {
        let mut s = state();
        s.next().unwrap();
        s.upsert_presentation(draft("Caja")).unwrap();
        s.back();
        assert_eq!(s.step, WizardStep::ProductInfo);
        assert_eq!(s.presentations.len(), 1);
        s.go_to(WizardStep::Review);
        assert_eq!(s.step, WizardStep::ProductInfo);
    }

    #[test]
    fn test_sku_suffix_survives_renames() {
        let mut s = state();
        let first = s.skuid();
        s.product.name = "Taladro Percutor".into();
        let second = s.skuid();
        assert!(first.starts_with("TALADRO-INALAMBRICO-"));
        assert!(second.starts_with("TALADRO-PERCUTOR-"));
        assert_eq!(first.rsplit('-').next(), second.rsplit('-').next());
    }

    #[test]
    fn test_duplicate_presentation_name_rejected() {
        let mut s = state();
        s.upsert_presentation(draft("Caja")).unwrap();
        assert!(s.upsert_presentation(draft("caja")).is_err());

        let mut edited = s.presentations[0].clone();
        edited.cost_final = "1200".into();
        s.upsert_presentation(edited).unwrap();
        assert_eq!(s.presentations.len(), 1);
        assert_eq!(s.presentations[0].cost_final, "1200");
    }

    #[test]
    fn test_payload_follows_current_sku() {
        let mut s = state();
        s.upsert_presentation(draft("Caja")).unwrap();
        s.product.name = "Taladro Percutor".into();
        let payload = s.build_payload().unwrap();
        let id = &payload.presentations[0].id;
        assert!(id.starts_with("TALADRO-PERCUTOR-"));
        assert!(id.ends_with("-CAJA"));
        assert!(payload.presentations[0].sku_id.is_empty());
        assert_eq!(payload.presentations[0].cost_final, 1150.0);
    }
}
