use super::view_model::PriceItemDetailsVm;
use crate::shared::api_utils::use_api;
use crate::shared::components::MessageStrip;
use crate::shared::icons::icon;
use crate::shared::task::use_task_scope;
use leptos::prelude::*;
use thaw::*;

/// Create or edit the price of one presentation in list `list_id`.
/// The presentation is fixed once the item exists.
#[component]
#[allow(non_snake_case)]
pub fn PriceItemDetails(
    list_id: String,
    id: Option<String>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let api_ctx = use_api();
    let scope = use_task_scope();
    let vm = PriceItemDetailsVm::new(list_id.clone(), id);
    vm.load(api_ctx.client(), &scope);

    let on_done = Callback::new(move |saved: bool| {
        if saved {
            on_saved.run(());
        } else {
            on_cancel.run(());
        }
    });
    let handle_save = move |_| vm.save(api_ctx.client(), &scope, on_done);
    let busy = Signal::derive(move || vm.saving.get() || vm.loading.get());

    view! {
        <div class="details-container">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <h2 class="details-title">
                    {move || if vm.is_edit_mode() { "Editar precio" } else { "Nuevo precio" }}
                </h2>
                <span class="details-subtitle">{list_id}</span>
            </Flex>

            <MessageStrip message=vm.error />

            <div class="details-form">
                <div class="form-group">
                    <label for="price-item-presentation">"Presentación"</label>
                    <select
                        id="price-item-presentation"
                        prop:disabled=move || vm.is_edit_mode()
                        on:change=move |ev| vm.set_presentation(event_target_value(&ev))
                    >
                        <option value="">"(seleccione)"</option>
                        {move || vm.presentation_options().into_iter().map(|(id, label)| {
                            let selected_id = id.clone();
                            view! {
                                <option
                                    value=id
                                    selected=move || vm.session.with(|s| s.draft.presentation_id == selected_id)
                                >
                                    {label}
                                </option>
                            }
                        }).collect_view()}
                    </select>
                </div>

                <div class="form-group">
                    <label>"Identificador"</label>
                    <code class="form-group__readonly">
                        {move || vm.session.with(|s| s.draft.id.clone())}
                    </code>
                </div>

                <div class="form-group">
                    <label for="price-item-price">"Precio"</label>
                    <input
                        type="text"
                        inputmode="decimal"
                        id="price-item-price"
                        prop:value=move || vm.price_text.get()
                        on:input=move |ev| vm.price_text.set(event_target_value(&ev))
                        placeholder="0,00"
                    />
                    {move || vm.price_error().map(|e| view! { <span class="form-group__error">{e}</span> })}
                </div>
            </div>

            <Flex justify=FlexJustify::End class="details-actions">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(()) disabled=vm.saving>
                    {icon("x")}
                    " Cancelar"
                </Button>
                <Button appearance=ButtonAppearance::Primary on_click=handle_save disabled=busy>
                    {icon("save")}
                    {move || if vm.saving.get() { " Guardando..." } else { " Guardar" }}
                </Button>
            </Flex>
        </div>
    }
}
