use contracts::domain::common::{changed_fields, ChangeSet};
use serde::Serialize;

/// Loaded form plus the user's working copy
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession<T> {
    original: T,
    pub draft: T,
}

impl<T: Clone + Serialize> EditSession<T> {
    pub fn new(loaded: T) -> Self {
        Self {
            draft: loaded.clone(),
            original: loaded,
        }
    }

    pub fn original(&self) -> &T {
        &self.original
    }

    pub fn changes(&self) -> ChangeSet {
        changed_fields(&self.original, &self.draft).unwrap_or_default()
    }

    pub fn is_dirty(&self) -> bool {
        !self.changes().is_empty()
    }

    pub fn reset(&mut self) {
        self.draft = self.original.clone();
    }

    /// The draft was saved; it becomes the new baseline
    pub fn commit(&mut self) {
        self.original = self.draft.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_product::ProductForm;

    #[test]
    fn test_dirty_tracking() {
        let mut session = EditSession::new(ProductForm {
            name: "Martillo".into(),
            description: "Martillo de uña".into(),
            brand: "Truper".into(),
            ..Default::default()
        });
        assert!(!session.is_dirty());

        session.draft.brand = "  Truper ".into();
        assert!(!session.is_dirty());

        session.draft.toggle_category("CAT_HERRAMIENTAS");
        assert!(session.is_dirty());
        assert_eq!(session.changes().len(), 1);

        session.commit();
        assert!(!session.is_dirty());

        session.draft.name = "Martillo 16oz".into();
        session.reset();
        assert_eq!(session.draft.name, "Martillo");
    }
}
