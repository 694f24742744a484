use crate::domain::a002_presentation::api;
use crate::domain::a002_presentation::draft::PresentationDraft;
use crate::domain::a006_product_file::api as files_api;
use crate::shared::api_utils::{ApiClient, ApiError, SaveOutcome};
use crate::shared::edit_session::EditSession;
use crate::shared::task::TaskScope;
use contracts::domain::a002_presentation::PresentationForm;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct PresentationDetailsVm {
    skuid: StoredValue<String>,
    /// Stored `IdPresentaOK`; None while creating
    key: StoredValue<Option<String>>,
    /// Form as loaded, the diff baseline
    original: StoredValue<Option<PresentationForm>>,
    pub draft: RwSignal<PresentationDraft>,
    pub stored_files: RwSignal<usize>,
    pub error: RwSignal<Option<String>>,
    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
}

impl PresentationDetailsVm {
    pub fn new(skuid: String, key: Option<String>) -> Self {
        let editing = key.is_some();
        Self {
            skuid: StoredValue::new(skuid),
            key: StoredValue::new(key),
            original: StoredValue::new(None),
            draft: RwSignal::new(PresentationDraft::new()),
            stored_files: RwSignal::new(0),
            error: RwSignal::new(None),
            loading: RwSignal::new(editing),
            saving: RwSignal::new(false),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.key.with_value(Option::is_some)
    }

    pub fn skuid(&self) -> String {
        self.skuid.get_value()
    }

    pub fn load(&self, api: ApiClient, scope: &TaskScope) {
        let Some(id) = self.key.get_value() else {
            return;
        };
        let vm = *self;
        scope.spawn(async move {
            let (presentation, files) = futures::join!(
                api::fetch_one(&api, &id),
                files_api::fetch_for_presentation(&api, &id)
            );
            match presentation {
                Ok(p) => {
                    let files = files.unwrap_or_else(|e| {
                        log::error!("files of {}: {}", id, e);
                        p.files.clone()
                    });
                    let has_principal = files.iter().any(|f| f.principal);
                    vm.stored_files.set(files.len());
                    vm.original.set_value(Some(p.to_form()));
                    vm.draft.set(PresentationDraft::from_presentation(&p, has_principal));
                }
                Err(e) => vm.error.set(Some(e.to_string())),
            }
            vm.loading.set(false);
        });
    }

    /// `on_done(true)` after a save, `on_done(false)` when there was nothing to send
    pub fn save(&self, api: ApiClient, scope: &TaskScope, on_done: Callback<bool>) {
        if self.saving.get_untracked() {
            return;
        }
        let vm = *self;
        let key = self.key.get_value();
        let skuid = self.skuid.get_value();
        let original = self.original.get_value();
        let draft = self.draft.get_untracked();
        self.saving.set(true);
        self.error.set(None);
        scope.spawn(async move {
            let result = match key {
                Some(id) => match (original, draft.to_form()) {
                    (Some(original), Ok(form)) => {
                        let mut session = EditSession::new(original);
                        session.draft = form;
                        api::update(&api, &id, session.original(), &session.draft).await
                    }
                    (None, _) => Err(ApiError::Validation("La presentación no se pudo cargar".into())),
                    (_, Err(e)) => Err(ApiError::Validation(e)),
                },
                None => match draft.to_new_presentation(&skuid) {
                    Ok(presentation) => api::create(&api, &presentation).await.map(|_| SaveOutcome::Saved),
                    Err(e) => Err(ApiError::Validation(e)),
                },
            };
            vm.saving.set(false);
            match result {
                Ok(outcome) => on_done.run(outcome == SaveOutcome::Saved),
                Err(e) => vm.error.set(Some(e.to_string())),
            }
        });
    }
}
