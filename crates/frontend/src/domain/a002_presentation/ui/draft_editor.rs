use crate::domain::a002_presentation::draft::{parse_cost, PresentationDraft};
use crate::shared::components::AttachmentPicker;
use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

/// Form body for one presentation draft, shared by the product wizard and the
/// presentation dialogs. With `skuid` the derived identifier is shown.
#[component]
#[allow(non_snake_case)]
pub fn PresentationDraftEditor(
    draft: RwSignal<PresentationDraft>,
    #[prop(optional, into)] skuid: MaybeProp<String>,
) -> impl IntoView {
    // The picker works on its own signal; changes are copied into the draft.
    let attachments = RwSignal::new(draft.with_untracked(|d| d.attachments.clone()));
    Effect::new(move |_| {
        let list = attachments.get();
        draft.update(|d| {
            if d.attachments != list {
                d.attachments = list;
            }
        });
    });

    let initial_error = move || draft.with(|d| parse_cost(&d.cost_initial).err());
    let final_error = move || draft.with(|d| parse_cost(&d.cost_final).err());

    view! {
        <div class="details-form presentation-editor">
            {move || skuid.get().map(|sku| view! {
                <div class="form-group">
                    <label>"Identificador"</label>
                    <code class="form-group__readonly">{move || draft.with(|d| d.derived_id(&sku))}</code>
                </div>
            })}

            <div class="form-group">
                <label for="presentation-name">"Nombre"</label>
                <input
                    type="text"
                    id="presentation-name"
                    prop:value=move || draft.with(|d| d.name.clone())
                    on:input=move |ev| draft.update(|d| d.name = event_target_value(&ev))
                    placeholder="Ej. Caja con 2 baterías"
                />
            </div>

            <div class="form-group">
                <label for="presentation-description">"Descripción"</label>
                <textarea
                    id="presentation-description"
                    rows="3"
                    prop:value=move || draft.with(|d| d.description.clone())
                    on:input=move |ev| draft.update(|d| d.description = event_target_value(&ev))
                />
            </div>

            <div class="form-row">
                <div class="form-group">
                    <label for="presentation-cost-ini">"Costo inicial"</label>
                    <input
                        type="text"
                        inputmode="decimal"
                        id="presentation-cost-ini"
                        prop:value=move || draft.with(|d| d.cost_initial.clone())
                        on:input=move |ev| draft.update(|d| d.cost_initial = event_target_value(&ev))
                        placeholder="0,00"
                    />
                    {move || initial_error().map(|e| view! { <span class="form-group__error">{e}</span> })}
                </div>
                <div class="form-group">
                    <label for="presentation-cost-fin">"Costo final"</label>
                    <input
                        type="text"
                        inputmode="decimal"
                        id="presentation-cost-fin"
                        prop:value=move || draft.with(|d| d.cost_final.clone())
                        on:input=move |ev| draft.update(|d| d.cost_final = event_target_value(&ev))
                        placeholder="0,00"
                    />
                    {move || final_error().map(|e| view! { <span class="form-group__error">{e}</span> })}
                </div>
            </div>

            <div class="form-group">
                <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                    <label>"Propiedades extra"</label>
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| draft.update(PresentationDraft::add_extra_row)
                    >
                        {icon("plus")}
                        " Agregar propiedad"
                    </Button>
                </Flex>
                // Keyed by position so inputs keep focus while typing
                <For
                    each=move || 0..draft.with(|d| d.extra.len())
                    key=|index| *index
                    children=move |index| {
                        view! {
                            <div class="extra-row">
                                <input
                                    type="text"
                                    class="extra-row__key"
                                    placeholder="Propiedad"
                                    prop:value=move || draft.with(|d| d.extra.get(index).map(|r| r.0.clone()).unwrap_or_default())
                                    on:input=move |ev| draft.update(|d| d.set_extra_key(index, event_target_value(&ev)))
                                />
                                <input
                                    type="text"
                                    class="extra-row__value"
                                    placeholder="Valor"
                                    prop:value=move || draft.with(|d| d.extra.get(index).map(|r| r.1.clone()).unwrap_or_default())
                                    on:input=move |ev| draft.update(|d| d.set_extra_value(index, event_target_value(&ev)))
                                />
                                <Button
                                    size=ButtonSize::Small
                                    appearance=ButtonAppearance::Subtle
                                    attr:title="Quitar propiedad"
                                    on_click=move |_| draft.update(|d| d.remove_extra_row(index))
                                >
                                    {icon("x")}
                                </Button>
                            </div>
                        }
                    }
                />
            </div>

            <div class="form-group">
                <label>"Archivos"</label>
                <AttachmentPicker attachments=attachments />
            </div>
        </div>
    }
}
