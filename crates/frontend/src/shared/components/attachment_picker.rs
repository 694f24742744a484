use crate::shared::attachments::{read_file, AttachmentList};
use crate::shared::icons::icon;
use contracts::domain::a006_product_file::FileType;
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

const ACCEPT: &str = "image/*,application/pdf,video/*,.doc,.docx,.xls,.xlsx,.txt";

fn type_label(file_type: FileType) -> &'static str {
    match file_type {
        FileType::Img => "Imagen",
        FileType::Pdf => "PDF",
        FileType::Doc => "Documento",
        FileType::Video => "Video",
        FileType::Other => "Otro",
    }
}

/// File input plus the list of files attached so far. Files are read into
/// data URLs as soon as they are picked.
#[component]
pub fn AttachmentPicker(attachments: RwSignal<AttachmentList>) -> impl IntoView {
    let (reading, set_reading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let on_pick = move |ev: leptos::ev::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(list) = input.files() else {
            return;
        };
        let picked: Vec<web_sys::File> = (0..list.length()).filter_map(|i| list.get(i)).collect();
        // same file can be picked again after removal
        input.set_value("");
        if picked.is_empty() {
            return;
        }

        set_reading.set(true);
        set_error.set(None);
        spawn_local(async move {
            for file in picked {
                match read_file(&file).await {
                    Ok(attachment) => {
                        if attachments.try_update(|a| a.attach(attachment)).is_none() {
                            return;
                        }
                    }
                    Err(e) => {
                        log::error!("{}", e);
                        set_error.set(Some(e));
                    }
                }
            }
            set_reading.set(false);
        });
    };

    view! {
        <div class="attachments">
            <label class="attachments__picker">
                {icon("upload")}
                {move || if reading.get() { " Leyendo archivos..." } else { " Adjuntar archivos" }}
                <input type="file" multiple accept=ACCEPT style="display: none;" on:change=on_pick />
            </label>
            {move || error.get().map(|e| view! { <div class="attachments__error">{e}</div> })}
            <ul class="attachments__list">
                {move || {
                    attachments
                        .get()
                        .files()
                        .iter()
                        .enumerate()
                        .map(|(index, file)| {
                            let principal = file.principal;
                            view! {
                                <li class="attachments__item">
                                    <span class="attachments__type">{type_label(file.file_type)}</span>
                                    <span class="attachments__name">{file.original_name.clone()}</span>
                                    <Button
                                        size=ButtonSize::Small
                                        appearance=if principal { ButtonAppearance::Primary } else { ButtonAppearance::Subtle }
                                        on_click=move |_| attachments.update(|a| a.set_principal(index))
                                        attr:title="Marcar como principal"
                                    >
                                        {icon("star")}
                                    </Button>
                                    <Button
                                        size=ButtonSize::Small
                                        appearance=ButtonAppearance::Subtle
                                        on_click=move |_| attachments.update(|a| a.remove(index))
                                        attr:title="Quitar"
                                    >
                                        {icon("x")}
                                    </Button>
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
        </div>
    }
}
