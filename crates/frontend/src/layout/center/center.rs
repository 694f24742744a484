use crate::layout::global_context::use_app_context;
use leptos::prelude::*;

#[component]
pub fn Center(children: Children) -> impl IntoView {
    let tabs_store = use_app_context();
    let is_empty = move || tabs_store.opened.with(|t| t.is_empty());

    view! {
        <div data-zone="center" class="app-tabs" style="flex: 1; overflow: auto;">
            <Show when=is_empty>
                <div class="app-tabs__empty">"Seleccione una opción del menú para comenzar"</div>
            </Show>
            {children()}
        </div>
    }
}
