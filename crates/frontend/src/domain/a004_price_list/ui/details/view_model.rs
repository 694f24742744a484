use crate::domain::a004_price_list::api;
use crate::shared::api_utils::{ApiClient, SaveOutcome};
use crate::shared::date_utils::today_iso;
use crate::shared::edit_session::EditSession;
use crate::shared::task::TaskScope;
use contracts::domain::a004_price_list::PriceListForm;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct PriceListDetailsVm {
    key: StoredValue<Option<String>>,
    pub session: RwSignal<EditSession<PriceListForm>>,
    pub error: RwSignal<Option<String>>,
    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
}

impl PriceListDetailsVm {
    pub fn new(key: Option<String>) -> Self {
        let blank = PriceListForm {
            valid_from: today_iso(),
            valid_to: today_iso(),
            ..Default::default()
        };
        Self {
            key: StoredValue::new(key),
            session: RwSignal::new(EditSession::new(blank)),
            error: RwSignal::new(None),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.key.with_value(Option::is_some)
    }

    pub fn edit(&self, f: impl FnOnce(&mut PriceListForm)) {
        self.session.update(|s| f(&mut s.draft));
    }

    /// Validation message for the current draft, shown before saving
    pub fn validation_error(&self) -> Option<String> {
        self.session.with(|s| s.draft.validate().err())
    }

    pub fn load(&self, api: ApiClient, scope: &TaskScope) {
        let Some(list_id) = self.key.get_value() else {
            return;
        };
        let vm = *self;
        self.loading.set(true);
        scope.spawn(async move {
            match api::fetch_one(&api, &list_id).await {
                Ok(list) => vm.session.set(EditSession::new(list.to_form())),
                Err(e) => vm.error.set(Some(e.to_string())),
            }
            vm.loading.set(false);
        });
    }

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
                Some(list_id) => api::update(&api, &list_id, session.original(), &session.draft).await,
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
