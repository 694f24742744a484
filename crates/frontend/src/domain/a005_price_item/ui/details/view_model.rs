use crate::domain::a002_presentation::api as presentations_api;
use crate::domain::a002_presentation::draft::parse_cost;
use crate::domain::a005_price_item::api;
use crate::shared::api_utils::{ApiClient, ApiError, SaveOutcome};
use crate::shared::edit_session::EditSession;
use crate::shared::task::TaskScope;
use contracts::domain::a002_presentation::Presentation;
use contracts::domain::a005_price_item::PriceItemForm;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct PriceItemDetailsVm {
    /// Stored `IdPrecioOK`; None while creating
    key: StoredValue<Option<String>>,
    pub session: RwSignal<EditSession<PriceItemForm>>,
    /// Price as typed; parsed on save
    pub price_text: RwSignal<String>,
    pub presentations: RwSignal<Vec<Presentation>>,
    pub error: RwSignal<Option<String>>,
    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
}

impl PriceItemDetailsVm {
    pub fn new(list_id: String, key: Option<String>) -> Self {
        Self {
            key: StoredValue::new(key),
            session: RwSignal::new(EditSession::new(PriceItemForm::for_list(&list_id))),
            price_text: RwSignal::new(String::new()),
            presentations: RwSignal::new(Vec::new()),
            error: RwSignal::new(None),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.key.with_value(Option::is_some)
    }

    pub fn set_presentation(&self, presentation_id: String) {
        self.session.update(|s| s.draft.set_presentation(&presentation_id));
    }

    /// Active presentations for the selector, plus the current one even if inactive
    pub fn presentation_options(&self) -> Vec<(String, String)> {
        let current = self.session.with(|s| s.draft.presentation_id.clone());
        self.presentations.with(|all| {
            all.iter()
                .filter(|p| p.is_active() || p.id == current)
                .map(|p| (p.id.clone(), format!("{} ({})", p.name, p.id)))
                .collect()
        })
    }

    pub fn price_error(&self) -> Option<String> {
        self.price_text.with(|t| parse_cost(t).err())
    }

    pub fn load(&self, api: ApiClient, scope: &TaskScope) {
        let vm = *self;
        let key = self.key.get_value();
        self.loading.set(true);
        scope.spawn(async move {
            match presentations_api::fetch_all(&api).await {
                Ok(all) => vm.presentations.set(all),
                Err(e) => vm.error.set(Some(e.to_string())),
            }
            if let Some(id) = key {
                match api::fetch_one(&api, &id).await {
                    Ok(item) => {
                        vm.price_text.set(item.price.to_string());
                        vm.session.set(EditSession::new(item.to_form()));
                    }
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
        let price = match parse_cost(&self.price_text.get_untracked()) {
            Ok(price) => price,
            Err(e) => {
                self.error.set(Some(e));
                return;
            }
        };
        self.session.update(|s| s.draft.price = price);

        let vm = *self;
        let key = self.key.get_value();
        let session = self.session.get_untracked();
        self.saving.set(true);
        self.error.set(None);
        scope.spawn(async move {
            let result: Result<SaveOutcome, ApiError> = match key {
                Some(id) => api::update(&api, &id, session.original(), &session.draft).await,
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
