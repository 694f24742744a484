//! Tab content registry: maps a tab key to the page it shows.

use super::tab_labels::{
    CATEGORIES_TAB, PRESENTATIONS_TAB_PREFIX, PRICE_ITEMS_TAB_PREFIX, PRICE_LISTS_TAB, PRODUCTS_TAB,
    PRODUCT_WIZARD_TAB,
};
use crate::domain::a001_product::ui::list::ProductList;
use crate::domain::a001_product::ui::wizard::ProductWizard;
use crate::domain::a002_presentation::ui::list::PresentationList;
use crate::domain::a003_category::ui::list::CategoryList;
use crate::domain::a004_price_list::ui::list::PriceListList;
use crate::domain::a005_price_item::ui::list::PriceItemList;
use crate::layout::global_context::AppGlobalContext;
use leptos::logging::log;
use leptos::prelude::*;

pub fn render_tab_content(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    match key {
        PRODUCTS_TAB => view! { <ProductList /> }.into_any(),
        PRODUCT_WIZARD_TAB => {
            let key_for_close = key.to_string();
            view! {
                <ProductWizard on_close=Callback::new(move |_| {
                    tabs_store.close_tab(&key_for_close);
                }) />
            }
            .into_any()
        }
        CATEGORIES_TAB => view! { <CategoryList /> }.into_any(),
        PRICE_LISTS_TAB => view! { <PriceListList /> }.into_any(),
        k if k.starts_with(PRESENTATIONS_TAB_PREFIX) => {
            let skuid = k.trim_start_matches(PRESENTATIONS_TAB_PREFIX).to_string();
            view! { <PresentationList skuid=skuid /> }.into_any()
        }
        k if k.starts_with(PRICE_ITEMS_TAB_PREFIX) => {
            let list_id = k.trim_start_matches(PRICE_ITEMS_TAB_PREFIX).to_string();
            view! { <PriceItemList list_id=list_id /> }.into_any()
        }
        _ => {
            log!("unknown tab key: {}", key);
            view! { <div class="placeholder">"Página no disponible"</div> }.into_any()
        }
    }
}
