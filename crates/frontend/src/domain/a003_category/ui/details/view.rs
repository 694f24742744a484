use super::view_model::CategoryDetailsVm;
use crate::shared::api_utils::use_api;
use crate::shared::components::MessageStrip;
use crate::shared::icons::icon;
use crate::shared::task::use_task_scope;
use leptos::prelude::*;
use thaw::*;

/// Create (`id = None`) or edit one category. `on_saved` runs after a
/// successful call, `on_cancel` on cancel and when nothing changed.
#[component]
#[allow(non_snake_case)]
pub fn CategoryDetails(
    id: Option<String>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let api_ctx = use_api();
    let scope = use_task_scope();
    let vm = CategoryDetailsVm::new(id);
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
                    {move || if vm.is_edit_mode() { "Editar categoría" } else { "Nueva categoría" }}
                </h2>
            </Flex>

            <MessageStrip message=vm.error />

            <div class="details-form">
                <div class="form-group">
                    <label for="category-name">"Nombre"</label>
                    <input
                        type="text"
                        id="category-name"
                        prop:value=move || vm.session.with(|s| s.draft.name.clone())
                        on:input=move |ev| vm.rename(event_target_value(&ev))
                        placeholder="Ej. Herramientas eléctricas"
                    />
                </div>

                <div class="form-group">
                    <label>"Identificador"</label>
                    <code class="form-group__readonly">
                        {move || vm.session.with(|s| s.draft.id.clone())}
                    </code>
                </div>

                <div class="form-group">
                    <label for="category-parent">"Categoría padre"</label>
                    <select
                        id="category-parent"
                        prop:value=move || vm.session.with(|s| s.draft.parent_id.clone().unwrap_or_default())
                        on:change=move |ev| vm.set_parent(event_target_value(&ev))
                    >
                        <option value="">"(ninguna)"</option>
                        {move || vm.parent_options().into_iter().map(|(id, name)| {
                            let selected_id = id.clone();
                            view! {
                                <option
                                    value=id
                                    selected=move || vm.session.with(|s| s.draft.parent_id.as_deref() == Some(selected_id.as_str()))
                                >
                                    {name}
                                </option>
                            }
                        }).collect_view()}
                    </select>
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
