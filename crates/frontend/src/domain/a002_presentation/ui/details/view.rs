use super::view_model::PresentationDetailsVm;
use crate::domain::a002_presentation::ui::PresentationDraftEditor;
use crate::shared::api_utils::use_api;
use crate::shared::components::{MessageKind, MessageStrip};
use crate::shared::icons::icon;
use crate::shared::task::use_task_scope;
use leptos::prelude::*;
use thaw::*;

/// Create (`id = None`) or edit one presentation of product `skuid`
#[component]
#[allow(non_snake_case)]
pub fn PresentationDetails(
    skuid: String,
    id: Option<String>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let api_ctx = use_api();
    let scope = use_task_scope();
    let vm = PresentationDetailsVm::new(skuid, id);
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
    let stored_hint = Signal::derive(move || {
        let count = vm.stored_files.get();
        (count > 0).then(|| format!("{} archivo(s) guardado(s). Los archivos nuevos se agregan a los existentes.", count))
    });
    let skuid = vm.skuid();
    // the stored id does not follow renames
    let id_preview = (!vm.is_edit_mode()).then(|| skuid.clone());

    view! {
        <div class="details-container">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <h2 class="details-title">
                    {move || if vm.is_edit_mode() { "Editar presentación" } else { "Nueva presentación" }}
                </h2>
                <span class="details-subtitle">{skuid.clone()}</span>
            </Flex>

            <MessageStrip message=vm.error />
            <MessageStrip message=stored_hint kind=MessageKind::Info />

            // The editor copies attachments from the draft once, so it waits for the load
            <Show
                when=move || !vm.loading.get()
                fallback=|| view! { <div class="details-loading">"Cargando..."</div> }
            >
                <PresentationDraftEditor draft=vm.draft skuid=id_preview.clone() />
            </Show>

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
