use crate::domain::a003_category::api;
use crate::shared::api_utils::{ApiClient, SaveOutcome};
use crate::shared::edit_session::EditSession;
use crate::shared::task::TaskScope;
use contracts::domain::a003_category::{Category, CategoryForm};
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct CategoryDetailsVm {
    /// Stored `CATID`; None while creating
    key: StoredValue<Option<String>>,
    pub session: RwSignal<EditSession<CategoryForm>>,
    /// Candidates for `PadreCATID`
    pub parents: RwSignal<Vec<Category>>,
    pub error: RwSignal<Option<String>>,
    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
}

impl CategoryDetailsVm {
    pub fn new(key: Option<String>) -> Self {
        Self {
            key: StoredValue::new(key),
            session: RwSignal::new(EditSession::new(CategoryForm::default())),
            parents: RwSignal::new(Vec::new()),
            error: RwSignal::new(None),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.key.with_value(Option::is_some)
    }

    pub fn rename(&self, name: String) {
        self.session.update(|s| s.draft.rename(&name));
    }

    pub fn set_parent(&self, parent: String) {
        self.session.update(|s| s.draft.set_parent(&parent));
    }

    /// Parent choices: every other category
    pub fn parent_options(&self) -> Vec<(String, String)> {
        let own = self.key.get_value().unwrap_or_default();
        self.parents.with(|all| {
            all.iter()
                .filter(|c| c.id != own)
                .map(|c| (c.id.clone(), c.name.clone()))
                .collect()
        })
    }

    pub fn load(&self, api: ApiClient, scope: &TaskScope) {
        let vm = *self;
        let key = self.key.get_value();
        self.loading.set(true);
        scope.spawn(async move {
            match api::fetch_all(&api).await {
                Ok(all) => vm.parents.set(all),
                Err(e) => vm.error.set(Some(e.to_string())),
            }
            if let Some(catid) = key {
                match api::fetch_one(&api, &catid).await {
                    Ok(category) => vm.session.set(EditSession::new(category.to_form())),
                    Err(e) => vm.error.set(Some(e.to_string())),
                }
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
        let session = self.session.get_untracked();
        self.saving.set(true);
        self.error.set(None);
        scope.spawn(async move {
            let result = match key {
                Some(catid) => api::update(&api, &catid, session.original(), &session.draft).await,
                None => api::create(&api, &session.draft).await.map(|_| SaveOutcome::Saved),
            };
            vm.saving.set(false);
            match result {
                Ok(outcome) => {
                    vm.session.update(EditSession::commit);
                    on_done.run(outcome == SaveOutcome::Saved);
                }
                Err(e) => vm.error.set(Some(e.to_string())),
            }
        });
    }
}
