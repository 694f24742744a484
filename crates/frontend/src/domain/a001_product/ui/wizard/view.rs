use super::state::WizardStep;
use super::view_model::ProductWizardVm;
use crate::domain::a002_presentation::ui::PresentationDraftEditor;
use crate::layout::global_context::use_app_context;
use crate::layout::tabs::tab_label_for_key;
use crate::layout::tabs::tab_labels::PRODUCTS_TAB;
use crate::shared::api_utils::use_api;
use crate::shared::components::{MessageKind, MessageStrip};
use crate::shared::config::use_config;
use crate::shared::icons::icon;
use crate::shared::page_frame::{page_id, PageFrame, PAGE_CAT_WIZARD};
use crate::shared::task::use_task_scope;
use contracts::domain::a001_product::ProductForm;
use leptos::prelude::*;
use thaw::*;

/// Product wizard page. `on_close` runs when the wizard is done or abandoned.
#[component]
#[allow(non_snake_case)]
pub fn ProductWizard(on_close: Callback<()>) -> impl IntoView {
    let api_ctx = use_api();
    let ctx = use_app_context();
    let config = use_config();
    let scope = use_task_scope();
    let vm = ProductWizardVm::new();
    vm.load_categories(api_ctx.client(), &scope);

    let on_success = Callback::new(move |_: ()| {
        ctx.refresh_tab(PRODUCTS_TAB);
        ctx.open_tab(PRODUCTS_TAB, &tab_label_for_key(PRODUCTS_TAB));
        on_close.run(());
    });
    let redirect_ms = config.ui.success_redirect_ms;
    let handle_submit = move |_| vm.submit(api_ctx.client(), &scope, redirect_ms, on_success);
    let locked = Signal::derive(move || vm.submitting.get() || vm.success.with(Option::is_some));
    // Only step changes may rebuild the body; field edits must not
    let step = Memo::new(move |_| vm.step());

    view! {
        <PageFrame page_id=page_id("a001_product", PAGE_CAT_WIZARD) category=PAGE_CAT_WIZARD>
            <div class="wizard">
                <h1 class="page__title">"Nuevo producto"</h1>

                <ol class="wizard__steps">
                    {WizardStep::ALL.into_iter().map(|item| {
                        view! {
                            <li
                                class="wizard__step"
                                class=("wizard__step--active", move || step.get() == item)
                                class=("wizard__step--done", move || step.get().index() > item.index())
                                on:click=move |_| vm.go_to(item)
                            >
                                <span class="wizard__step-number">{item.index() + 1}</span>
                                <span class="wizard__step-title">{item.title()}</span>
                            </li>
                        }
                    }).collect_view()}
                </ol>

                <MessageStrip message=vm.error />
                <MessageStrip message=vm.success kind=MessageKind::Success />

                <div class="wizard__body">
                    {move || match step.get() {
                        WizardStep::ProductInfo => view! { <ProductInfoStep vm=vm /> }.into_any(),
                        WizardStep::Presentations => view! { <PresentationsStep vm=vm /> }.into_any(),
                        WizardStep::Review => view! { <ReviewStep vm=vm /> }.into_any(),
                    }}
                </div>

                <Flex justify=FlexJustify::SpaceBetween class="wizard__actions">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(()) disabled=locked>
                        {icon("x")}
                        " Cancelar"
                    </Button>
                    <Space>
                        <Show when=move || step.get() != WizardStep::ProductInfo>
                            <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.back() disabled=locked>
                                {icon("arrow-left")}
                                " Anterior"
                            </Button>
                        </Show>
                        <Show
                            when=move || step.get() == WizardStep::Review
                            fallback=move || view! {
                                <Button appearance=ButtonAppearance::Primary on_click=move |_| vm.next()>
                                    " Siguiente "
                                    {icon("arrow-right")}
                                </Button>
                            }
                        >
                            <Button appearance=ButtonAppearance::Primary on_click=handle_submit.clone() disabled=locked>
                                {icon("check")}
                                {move || if vm.submitting.get() { " Creando..." } else { " Crear producto" }}
                            </Button>
                        </Show>
                    </Space>
                </Flex>
            </div>
        </PageFrame>
    }
}

#[component]
#[allow(non_snake_case)]
fn ProductInfoStep(vm: ProductWizardVm) -> impl IntoView {
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
                    prop:value=move || vm.state.with(|s| get(&s.product))
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        vm.edit_product(|f| set(f, value));
                    }
                />
            </div>
        }
    };

    view! {
        <div class="details-form">
            {text_field("product-name", "Nombre", |f| f.name.clone(), |f, v| f.name = v)}
            <div class="form-group">
                <label>"SKU provisional"</label>
                <code class="form-group__readonly">{move || vm.skuid()}</code>
            </div>
            <div class="form-group">
                <label for="product-description">"Descripción"</label>
                <textarea
                    id="product-description"
                    rows="3"
                    prop:value=move || vm.state.with(|s| s.product.description.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        vm.edit_product(|f| f.description = value);
                    }
                />
            </div>
            <div class="form-row">
                {text_field("product-brand", "Marca", |f| f.brand.clone(), |f, v| f.brand = v)}
                {text_field("product-unit", "Unidad de medida", |f| f.unit.clone(), |f, v| f.unit = v)}
                {text_field("product-barcode", "Código de barras", |f| f.barcode.clone(), |f, v| f.barcode = v)}
            </div>
            {text_field("product-info", "Información adicional", |f| f.extra_info.clone(), |f, v| f.extra_info = v)}

            <div class="form-group">
                <label>"Categorías"</label>
                <div class="checkbox-grid">
                    {move || vm.categories.get().into_iter().map(|category| {
                        let id_for_check = category.id.clone();
                        let id_for_toggle = category.id.clone();
                        view! {
                            <label class="checkbox-grid__item">
                                <input
                                    type="checkbox"
                                    prop:checked=move || vm.state.with(|s| s.product.categories.contains(&id_for_check))
                                    on:change=move |_| vm.edit_product(|f| f.toggle_category(&id_for_toggle))
                                />
                                {category.name}
                            </label>
                        }
                    }).collect_view()}
                </div>
            </div>
        </div>
    }
}

#[component]
#[allow(non_snake_case)]
fn PresentationsStep(vm: ProductWizardVm) -> impl IntoView {
    let skuid = Signal::derive(move || Some(vm.skuid()));

    view! {
        <div class="wizard__presentations">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <h2 class="details-title">
                    {move || format!("Presentaciones ({})", vm.state.with(|s| s.presentations.len()))}
                </h2>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| vm.start_presentation()
                    disabled=Signal::derive(move || vm.editing.with(Option::is_some))
                >
                    {icon("plus")}
                    " Agregar presentación"
                </Button>
            </Flex>

            <ul class="wizard__drafts">
                <For
                    each=move || vm.state.with(|s| s.presentations.clone())
                    key=|d| (d.key.clone(), d.summary())
                    children=move |draft| {
                        let key_for_edit = draft.key.clone();
                        let key_for_remove = draft.key.clone();
                        let key_for_id = draft.key.clone();
                        let id = move || vm.state.with(|s| {
                            s.presentations
                                .iter()
                                .find(|p| p.key == key_for_id)
                                .map(|p| p.derived_id(&s.skuid()))
                                .unwrap_or_default()
                        });
                        view! {
                            <li class="wizard__draft">
                                <div class="wizard__draft-info">
                                    <strong>{draft.summary()}</strong>
                                    <code>{id}</code>
                                </div>
                                <Button
                                    size=ButtonSize::Small
                                    appearance=ButtonAppearance::Subtle
                                    attr:title="Editar"
                                    on_click=move |_| vm.edit_presentation(&key_for_edit)
                                >
                                    {icon("edit")}
                                </Button>
                                <Button
                                    size=ButtonSize::Small
                                    appearance=ButtonAppearance::Subtle
                                    attr:title="Quitar"
                                    on_click=move |_| vm.remove_presentation(&key_for_remove)
                                >
                                    {icon("delete")}
                                </Button>
                            </li>
                        }
                    }
                />
            </ul>

            // Remounted per draft so the attachment picker starts from that draft
            {move || vm.editing.get().map(|_| view! {
                <div class="wizard__editor">
                    <PresentationDraftEditor draft=vm.editor skuid=skuid />
                    <Flex justify=FlexJustify::End>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.cancel_presentation()>
                            {icon("x")}
                            " Cancelar"
                        </Button>
                        <Button appearance=ButtonAppearance::Primary on_click=move |_| vm.commit_presentation()>
                            {icon("save")}
                            " Guardar presentación"
                        </Button>
                    </Flex>
                </div>
            })}
        </div>
    }
}

#[component]
#[allow(non_snake_case)]
fn ReviewStep(vm: ProductWizardVm) -> impl IntoView {
    let product = vm.state.with_untracked(|s| s.product.clone());
    let categories = vm.categories.with_untracked(|all| {
        all.iter()
            .filter(|c| product.categories.contains(&c.id))
            .map(|c| c.name.clone())
            .collect::<Vec<_>>()
            .join(", ")
    });
    let row = |label: &'static str, value: String| {
        view! {
            <tr>
                <th>{label}</th>
                <td>{if value.trim().is_empty() { "-".to_string() } else { value }}</td>
            </tr>
        }
    };

    view! {
        <div class="wizard__review">
            <h2 class="details-title">"Producto"</h2>
            <table class="review-table">
                <tbody>
                    {row("Nombre", product.name.clone())}
                    {row("SKU provisional", vm.skuid())}
                    {row("Descripción", product.description.clone())}
                    {row("Marca", product.brand.clone())}
                    {row("Unidad de medida", product.unit.clone())}
                    {row("Código de barras", product.barcode.clone())}
                    {row("Información adicional", product.extra_info.clone())}
                    {row("Categorías", categories)}
                </tbody>
            </table>

            <h2 class="details-title">"Presentaciones"</h2>
            <ul class="wizard__drafts">
                {vm.state.with_untracked(|s| {
                    let skuid = s.skuid();
                    s.presentations.iter().map(|draft| {
                        let extras = draft.extra_properties().to_json_string();
                        view! {
                            <li class="wizard__draft">
                                <div class="wizard__draft-info">
                                    <strong>{draft.summary()}</strong>
                                    <code>{draft.derived_id(&skuid)}</code>
                                    <span class="wizard__draft-extra">{extras}</span>
                                </div>
                            </li>
                        }
                    }).collect_view()
                })}
            </ul>
        </div>
    }
}
