use super::view_model::PriceListDetailsVm;
use crate::shared::api_utils::use_api;
use crate::shared::components::{MessageKind, MessageStrip};
use crate::shared::icons::icon;
use crate::shared::task::use_task_scope;
use contracts::domain::a004_price_list::PriceListForm;
use leptos::prelude::*;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn PriceListDetails(
    id: Option<String>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let api_ctx = use_api();
    let scope = use_task_scope();
    let vm = PriceListDetailsVm::new(id);
    vm.load(api_ctx.client(), &scope);

    let on_done = Callback::new(move |saved: bool| {
        if saved {
            on_saved.run(());
        } else {
            on_cancel.run(());
        }
    });
    let handle_save = move |_| vm.save(api_ctx.client(), &scope, on_done);
    let hint = Signal::derive(move || vm.validation_error());
    let blocked = Signal::derive(move || vm.saving.get() || vm.loading.get() || hint.with(Option::is_some));

    let text_field = move |label: &'static str,
                           get: fn(&PriceListForm) -> String,
                           set: fn(&mut PriceListForm, String),
                           kind: &'static str| {
        view! {
            <div class="form-group">
                <label>{label}</label>
                <input
                    type=kind
                    prop:value=move || vm.session.with(|s| get(&s.draft))
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        vm.edit(|f| set(f, value));
                    }
                />
            </div>
        }
    };

    view! {
        <div class="details-container">
            <h2 class="details-title">
                {move || if vm.is_edit_mode() { "Editar lista de precios" } else { "Nueva lista de precios" }}
            </h2>

            <MessageStrip message=vm.error />
            <MessageStrip message=hint kind=MessageKind::Info />

            <div class="details-form">
                <div class="form-group">
                    <label for="price-list-id">"Identificador"</label>
                    <input
                        type="text"
                        id="price-list-id"
                        prop:value=move || vm.session.with(|s| s.draft.id.clone())
                        prop:disabled=move || vm.is_edit_mode()
                        on:input=move |ev| {
                            let value = event_target_value(&ev).trim().to_uppercase();
                            vm.edit(|f| f.id = value);
                        }
                        placeholder="Ej. LISTA-2024"
                    />
                </div>
                {text_field("Descripción", |f| f.description.clone(), |f, v| f.description = v, "text")}
                <div class="form-row">
                    {text_field("Vigente desde", |f| f.valid_from.clone(), |f, v| f.valid_from = v, "date")}
                    {text_field("Vigente hasta", |f| f.valid_to.clone(), |f, v| f.valid_to = v, "date")}
                </div>
                <div class="form-row">
                    {text_field("Tipo de lista", |f| f.list_type.clone(), |f, v| f.list_type = v, "text")}
                    {text_field("Tipo de fórmula", |f| f.formula_type.clone(), |f, v| f.formula_type = v, "text")}
                </div>
            </div>

            <Flex justify=FlexJustify::End class="details-actions">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(()) disabled=vm.saving>
                    {icon("x")}
                    " Cancelar"
                </Button>
                <Button appearance=ButtonAppearance::Primary on_click=handle_save disabled=blocked>
                    {icon("save")}
                    {move || if vm.saving.get() { " Guardando..." } else { " Guardar" }}
                </Button>
            </Flex>
        </div>
    }
}
