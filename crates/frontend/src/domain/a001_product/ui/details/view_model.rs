use crate::domain::a001_product::api;
use crate::domain::a003_category::api as categories_api;
use crate::shared::api_utils::{ApiClient, SaveOutcome};
use crate::shared::edit_session::EditSession;
use crate::shared::task::TaskScope;
use contracts::domain::a001_product::ProductForm;
use contracts::domain::a003_category::Category;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct ProductDetailsVm {
    skuid: StoredValue<String>,
    pub session: RwSignal<EditSession<ProductForm>>,
    pub categories: RwSignal<Vec<Category>>,
    pub error: RwSignal<Option<String>>,
    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
}

impl ProductDetailsVm {
    pub fn new(skuid: String) -> Self {
        Self {
            skuid: StoredValue::new(skuid),
            session: RwSignal::new(EditSession::new(ProductForm::default())),
            categories: RwSignal::new(Vec::new()),
            error: RwSignal::new(None),
            loading: RwSignal::new(true),
            saving: RwSignal::new(false),
        }
    }

    pub fn skuid(&self) -> String {
        self.skuid.get_value()
    }

    pub fn edit(&self, f: impl FnOnce(&mut ProductForm)) {
        self.session.update(|s| f(&mut s.draft));
    }

    pub fn is_dirty(&self) -> bool {
        self.session.with(EditSession::is_dirty)
    }

    /// Active categories, plus inactive ones the product still references
    pub fn category_options(&self) -> Vec<(String, String)> {
        let assigned = self.session.with_untracked(|s| s.draft.categories.clone());
        self.categories.with(|all| {
            all.iter()
                .filter(|c| c.is_active() || assigned.contains(&c.id))
                .map(|c| (c.id.clone(), c.name.clone()))
                .collect()
        })
    }

    pub fn load(&self, api: ApiClient, scope: &TaskScope) {
        let vm = *self;
        let skuid = self.skuid.get_value();
        scope.spawn(async move {
            let (product, categories) = futures::join!(api::fetch_one(&api, &skuid), categories_api::fetch_all(&api));
            // the product first: category options depend on what it references
            match product {
                Ok(product) => vm.session.set(EditSession::new(product.to_form())),
                Err(e) => vm.error.set(Some(e.to_string())),
            }
            match categories {
                Ok(all) => vm.categories.set(all),
                Err(e) => log::error!("categories for {}: {}", skuid, e),
            }
            vm.loading.set(false);
        });
    }

    /// `on_done(true)` after a save, `on_done(false)` when there was nothing to send
    pub fn save(&self, api: ApiClient, scope: &TaskScope, on_done: Callback<bool>) {
        if self.saving.get_untracked() || self.loading.get_untracked() {
            return;
        }
        let vm = *self;
        let skuid = self.skuid.get_value();
        let session = self.session.get_untracked();
        self.saving.set(true);
        self.error.set(None);
        scope.spawn(async move {
            let result = api::update(&api, &skuid, session.original(), &session.draft).await;
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
