use super::view_model::ProductDetailsVm;
use crate::shared::api_utils::use_api;
use crate::shared::components::{MessageKind, MessageStrip};
use crate::shared::icons::icon;
use crate::shared::task::use_task_scope;
use contracts::domain::a001_product::ProductForm;
use leptos::prelude::*;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn ProductDetails(
    skuid: String,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let api_ctx = use_api();
    let scope = use_task_scope();
    let vm = ProductDetailsVm::new(skuid);
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
    let dirty_hint = Signal::derive(move || vm.is_dirty().then(|| "Hay cambios sin guardar".to_string()));

    let text_field = move |id: &'static str,
                           label: &'static str,
                           get: fn(&ProductForm) -> String,
                           set: fn(&mut ProductForm, String)| {
        view! {
            <div class="form-group">
                <label for=id>{label}</label>
                <input
                    type="text"
                    id=id
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
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <h2 class="details-title">"Editar producto"</h2>
                <code class="details-subtitle">{vm.skuid()}</code>
            </Flex>

            <MessageStrip message=vm.error />
            <MessageStrip message=dirty_hint kind=MessageKind::Info />

            <div class="details-form">
                {text_field("product-edit-name", "Nombre", |f| f.name.clone(), |f, v| f.name = v)}
                <div class="form-group">
                    <label for="product-edit-description">"Descripción"</label>
                    <textarea
                        id="product-edit-description"
                        rows="3"
                        prop:value=move || vm.session.with(|s| s.draft.description.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            vm.edit(|f| f.description = value);
                        }
                    />
                </div>
                <div class="form-row">
                    {text_field("product-edit-brand", "Marca", |f| f.brand.clone(), |f, v| f.brand = v)}
                    {text_field("product-edit-unit", "Unidad de medida", |f| f.unit.clone(), |f, v| f.unit = v)}
                    {text_field("product-edit-barcode", "Código de barras", |f| f.barcode.clone(), |f, v| f.barcode = v)}
                </div>
                {text_field("product-edit-info", "Información adicional", |f| f.extra_info.clone(), |f, v| f.extra_info = v)}

                <div class="form-group">
                    <label>"Categorías"</label>
                    <div class="checkbox-grid">
                        {move || vm.category_options().into_iter().map(|(id, name)| {
                            let id_for_check = id.clone();
                            view! {
                                <label class="checkbox-grid__item">
                                    <input
                                        type="checkbox"
                                        prop:checked=move || vm.session.with(|s| s.draft.categories.contains(&id_for_check))
                                        on:change=move |_| vm.edit(|f| f.toggle_category(&id))
                                    />
                                    {name}
                                </label>
                            }
                        }).collect_view()}
                    </div>
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
