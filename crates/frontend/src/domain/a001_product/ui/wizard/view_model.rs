use super::state::{WizardState, WizardStep};
use crate::domain::a001_product::api;
use crate::domain::a002_presentation::draft::PresentationDraft;
use crate::domain::a003_category::api as categories_api;
use crate::shared::api_utils::ApiClient;
use crate::shared::task::TaskScope;
use contracts::domain::a001_product::ProductForm;
use contracts::domain::a003_category::Category;
use contracts::domain::common::AggregateRoot;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct ProductWizardVm {
    pub state: RwSignal<WizardState>,
    pub categories: RwSignal<Vec<Category>>,
    /// Presentation currently in the editor
    pub editor: RwSignal<PresentationDraft>,
    /// Key of the draft in the editor; None while the editor is closed
    pub editing: RwSignal<Option<String>>,
    pub error: RwSignal<Option<String>>,
    pub success: RwSignal<Option<String>>,
    pub submitting: RwSignal<bool>,
}

impl ProductWizardVm {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(WizardState::new()),
            categories: RwSignal::new(Vec::new()),
            editor: RwSignal::new(PresentationDraft::new()),
            editing: RwSignal::new(None),
            error: RwSignal::new(None),
            success: RwSignal::new(None),
            submitting: RwSignal::new(false),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.state.with(|s| s.step)
    }

    pub fn skuid(&self) -> String {
        self.state.with(|s| s.skuid())
    }

    pub fn load_categories(&self, api: ApiClient, scope: &TaskScope) {
        let vm = *self;
        scope.spawn(async move {
            match categories_api::fetch_all(&api).await {
                Ok(all) => vm.categories.set(all.into_iter().filter(|c| c.is_active()).collect()),
                Err(e) => vm.error.set(Some(e.to_string())),
            }
        });
    }

    pub fn edit_product(&self, f: impl FnOnce(&mut ProductForm)) {
        self.state.update(|s| f(&mut s.product));
    }

    pub fn next(&self) {
        if self.editing.with_untracked(Option::is_some) {
            self.error.set(Some("Guarde o cancele la presentación en edición".into()));
            return;
        }
        let mut result = Ok(());
        self.state.update(|s| result = s.next());
        self.error.set(result.err());
    }

    pub fn back(&self) {
        self.error.set(None);
        self.state.update(WizardState::back);
    }

    pub fn go_to(&self, step: WizardStep) {
        self.error.set(None);
        self.state.update(|s| s.go_to(step));
    }

    pub fn start_presentation(&self) {
        let draft = PresentationDraft::new();
        self.editing.set(Some(draft.key.clone()));
        self.editor.set(draft);
        self.error.set(None);
    }

    pub fn edit_presentation(&self, key: &str) {
        let Some(draft) = self.state.with_untracked(|s| s.presentations.iter().find(|p| p.key == key).cloned()) else {
            return;
        };
        self.editor.set(draft);
        self.editing.set(Some(key.to_string()));
        self.error.set(None);
    }

    pub fn commit_presentation(&self) {
        let draft = self.editor.get_untracked();
        let mut result = Ok(());
        self.state.update(|s| result = s.upsert_presentation(draft));
        match result {
            Ok(()) => {
                self.editing.set(None);
                self.error.set(None);
            }
            Err(e) => self.error.set(Some(e)),
        }
    }

    pub fn cancel_presentation(&self) {
        self.editing.set(None);
        self.error.set(None);
    }

    pub fn remove_presentation(&self, key: &str) {
        self.state.update(|s| s.remove_presentation(key));
        if self.editing.with_untracked(|k| k.as_deref() == Some(key)) {
            self.editing.set(None);
        }
    }

    /// Send the composite request. On success the confirmation stays visible
    /// for `redirect_ms` before `on_success` runs; on failure all input is kept.
    pub fn submit(&self, api: ApiClient, scope: &TaskScope, redirect_ms: u32, on_success: Callback<()>) {
        if self.submitting.get_untracked() || self.success.with_untracked(Option::is_some) {
            return;
        }
        let payload = match self.state.with_untracked(WizardState::build_payload) {
            Ok(payload) => payload,
            Err(e) => {
                self.error.set(Some(e));
                return;
            }
        };
        let vm = *self;
        self.submitting.set(true);
        self.error.set(None);
        scope.spawn(async move {
            let result = api::create_complete(&api, &payload).await;
            vm.submitting.set(false);
            match result {
                Ok(()) => {
                    log::info!("product '{}' created", payload.product.name);
                    vm.success.set(Some(format!(
                        "Producto \"{}\" creado con {} presentación(es)",
                        payload.product.name.trim(),
                        payload.presentations.len()
                    )));
                    TimeoutFuture::new(redirect_ms).await;
                    on_success.run(());
                }
                Err(e) => vm.error.set(Some(e.to_string())),
            }
        });
    }
}

impl Default for ProductWizardVm {
    fn default() -> Self {
        Self::new()
    }
}
