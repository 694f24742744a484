use crate::domain::a006_product_file::api;
use crate::shared::api_utils::use_api;
use crate::shared::components::{open_confirm, ConfirmAction, ConfirmRequest, MessageStrip};
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use crate::shared::modal_stack::ModalStackService;
use crate::shared::task::use_task_scope;
use contracts::domain::a006_product_file::ProductFile;
use futures::FutureExt;
use leptos::prelude::*;
use std::sync::Arc;
use thaw::*;

/// Stored files of one presentation. Any of them can be made principal or deleted.
#[component]
#[allow(non_snake_case)]
pub fn FilesPanel(
    presentation_id: String,
    #[prop(into)] title: String,
    on_close: Callback<()>,
) -> impl IntoView {
    let modal_stack = use_context::<ModalStackService>().expect("ModalStackService not found in context");
    let api_ctx = use_api();
    let scope = use_task_scope();
    let owner = StoredValue::new(presentation_id);

    let (files, set_files) = signal::<Vec<ProductFile>>(Vec::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let (pending, set_pending) = signal::<Option<String>>(None);

    let fetch = {
        let scope = scope.clone();
        Callback::new(move |_: ()| {
            let client = api_ctx.client();
            let id = owner.get_value();
            set_loading.set(true);
            scope.spawn(async move {
                match api::fetch_for_presentation(&client, &id).await {
                    Ok(v) => {
                        set_files.set(v);
                        set_error.set(None);
                    }
                    Err(e) => set_error.set(Some(e.to_string())),
                }
                set_loading.set(false);
            });
        })
    };
    fetch.run(());

    let make_principal = Callback::new(move |file_id: String| {
        if pending.get_untracked().is_some() {
            return;
        }
        let client = api_ctx.client();
        set_pending.set(Some(file_id.clone()));
        scope.spawn(async move {
            match api::set_principal(&client, &file_id).await {
                Ok(()) => set_files.update(|all| api::mark_principal(all, &file_id)),
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_pending.set(None);
        });
    });

    let confirm_delete = move |file: ProductFile| {
        let request = ConfirmRequest::hard_delete(&format!("el archivo \"{}\"", file.original_name));
        let file_id = file.id.clone();
        let action: ConfirmAction = Arc::new(move || {
            let client = api_ctx.client();
            let file_id = file_id.clone();
            async move { api::delete(&client, &file_id).await }.boxed_local()
        });
        open_confirm(modal_stack, request, action, fetch);
    };

    view! {
        <div class="details-container">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <h2 class="details-title">{format!("Archivos · {}", title)}</h2>
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| fetch.run(()) disabled=loading>
                    {icon("refresh")}
                </Button>
            </Flex>

            <MessageStrip message=error />

            <Show
                when=move || !files.with(Vec::is_empty)
                fallback=move || view! {
                    <div class="files-panel__empty">
                        {move || if loading.get() { "Cargando archivos..." } else { "Esta presentación no tiene archivos." }}
                    </div>
                }
            >
                <ul class="files-panel">
                    <For
                        each=move || files.get()
                        key=|f| (f.id.clone(), f.principal)
                        children=move |file| {
                            let principal = file.principal;
                            let id_for_principal = file.id.clone();
                            let id_for_pending = file.id.clone();
                            let for_delete = file.clone();
                            let preview = if file.is_image() {
                                view! { <img class="files-panel__thumb" src=file.file.clone() alt=file.original_name.clone() /> }.into_any()
                            } else {
                                view! { <span class="files-panel__thumb">{icon("file")}</span> }.into_any()
                            };
                            let uploaded = file.metadata.created_at.as_deref().map(format_datetime).unwrap_or_default();
                            view! {
                                <li class="files-panel__item" class=("files-panel__item--principal", principal)>
                                    {preview}
                                    <div class="files-panel__info">
                                        <a href=file.file.clone() target="_blank" download=file.original_name.clone()>
                                            {file.original_name.clone()}
                                        </a>
                                        <span class="files-panel__meta">{format!("{} {}", file.file_type.as_str(), uploaded)}</span>
                                    </div>
                                    <Button
                                        size=ButtonSize::Small
                                        appearance=if principal { ButtonAppearance::Primary } else { ButtonAppearance::Subtle }
                                        attr:title="Marcar como principal"
                                        disabled=Signal::derive(move || principal || pending.get().as_deref() == Some(id_for_pending.as_str()))
                                        on_click=move |_| make_principal.run(id_for_principal.clone())
                                    >
                                        {icon("star")}
                                    </Button>
                                    <Button
                                        size=ButtonSize::Small
                                        appearance=ButtonAppearance::Subtle
                                        class="button--danger-text"
                                        attr:title="Eliminar archivo"
                                        on_click=move |_| confirm_delete(for_delete.clone())
                                    >
                                        {icon("delete")}
                                    </Button>
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>

            <Flex justify=FlexJustify::End class="details-actions">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                    {icon("x")}
                    " Cerrar"
                </Button>
            </Flex>
        </div>
    }
}
