use crate::domain::a001_product::api;
use crate::domain::a001_product::ui::details::ProductDetails;
use crate::layout::global_context::use_app_context;
use crate::layout::tabs::tab_label_for_key;
use crate::layout::tabs::tab_labels::{presentations_tab_key, PRODUCTS_TAB, PRODUCT_WIZARD_TAB};
use crate::shared::api_utils::{use_api, DeleteMode};
use crate::shared::bulk::{run_bulk, BulkSummary};
use crate::shared::components::{
    open_confirm, ConfirmAction, ConfirmRequest, MessageKind, MessageStrip, SortableHeaderCell, StatusSwitch,
    TableCheckbox, TableHeaderCheckbox, ToggleAction,
};
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use crate::shared::list_utils::{cmp_text, highlight_matches, selection_state, ListState, SearchInput, Searchable, Sortable};
use crate::shared::modal_stack::{ModalOptions, ModalStackService};
use crate::shared::page_frame::{page_id, PageFrame, PageHeader, PAGE_CAT_LIST};
use crate::shared::task::use_task_scope;
use contracts::domain::a001_product::Product;
use contracts::domain::common::AggregateRoot;
use futures::FutureExt;
use leptos::prelude::*;
use std::cmp::Ordering;
use std::sync::Arc;
use thaw::*;

impl Searchable for Product {
    fn matches_filter(&self, filter: &str) -> bool {
        self.matches(filter)
    }
}

impl Sortable for Product {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "sku" => cmp_text(&self.sku_id, &other.sku_id),
            "brand" => cmp_text(&self.brand, &other.brand),
            "active" => self.is_active().cmp(&other.is_active()),
            "modified" => self.metadata.last_change().cmp(&other.metadata.last_change()),
            _ => cmp_text(&self.name, &other.name),
        }
    }
}

#[component]
#[allow(non_snake_case)]
pub fn ProductList() -> impl IntoView {
    let modal_stack = use_context::<ModalStackService>().expect("ModalStackService not found in context");
    let api_ctx = use_api();
    let ctx = use_app_context();
    let scope = use_task_scope();
    let list = ListState::new("name");

    let (items, set_items) = signal::<Vec<Product>>(Vec::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let (info, set_info) = signal::<Option<String>>(None);

    let fetch = Callback::new(move |_: ()| {
        let client = api_ctx.client();
        set_loading.set(true);
        scope.spawn(async move {
            match api::fetch_all(&client).await {
                Ok(v) => {
                    let ids: Vec<String> = v.iter().map(|p| p.sku_id.clone()).collect();
                    list.retain_loaded(&ids);
                    set_items.set(v);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_loading.set(false);
        });
    });

    Effect::new(move |_| {
        let revision = ctx.revision(PRODUCTS_TAB);
        log::debug!("products: load (revision {})", revision);
        fetch.run(());
    });

    let visible = Memo::new(move |_| items.with(|all| list.apply(all)));
    let visible_ids = move || visible.with(|rows| rows.iter().map(|p| p.sku_id.clone()).collect::<Vec<_>>());
    let header_state = Memo::new(move |_| list.selected.with(|sel| selection_state(&visible_ids(), sel)));

    let open_wizard = move |_| ctx.open_tab(PRODUCT_WIZARD_TAB, &tab_label_for_key(PRODUCT_WIZARD_TAB));

    let open_presentations = move |skuid: &str| {
        let key = presentations_tab_key(skuid);
        ctx.open_tab(&key, &tab_label_for_key(&key));
    };

    let open_details = move |skuid: String| {
        modal_stack.push_with(ModalOptions::width("720px"), move |handle| {
            view! {
                <ProductDetails
                    skuid=skuid.clone()
                    on_saved=Callback::new(move |_| {
                        handle.close();
                        fetch.run(());
                    })
                    on_cancel=Callback::new(move |_| handle.close())
                />
            }
            .into_any()
        });
    };

    let confirm_delete = move |product: Product, mode: DeleteMode| {
        let what = format!("el producto \"{}\"", product.name);
        let request = match mode {
            DeleteMode::Logical => ConfirmRequest::logical_delete(&what),
            DeleteMode::Hard => ConfirmRequest::hard_delete(&what),
        };
        let skuid = product.sku_id.clone();
        let action: ConfirmAction = Arc::new(move || {
            let client = api_ctx.client();
            let skuid = skuid.clone();
            async move { api::delete(&client, &skuid, mode).await }.boxed_local()
        });
        open_confirm(modal_stack, request, action, fetch);
    };

    let delete_selected = move |_| {
        let ids = list.selected.get_untracked();
        if ids.is_empty() {
            return;
        }
        let request = ConfirmRequest::logical_delete(&format!("{} producto(s) seleccionado(s)", ids.len()));
        let action: ConfirmAction = Arc::new(move || {
            let client = api_ctx.client();
            // a retry after a partial failure covers only what is still selected
            let ids = list.selected.get_untracked();
            async move {
                let outcomes = run_bulk(ids, |id| {
                    let client = client.clone();
                    async move { api::delete(&client, &id, DeleteMode::Logical).await }
                })
                .await;
                let summary = BulkSummary::from_outcomes(&outcomes);
                list.selected.set(summary.failed_ids());
                if summary.is_complete() {
                    set_info.set(Some(summary.message()));
                } else if !summary.succeeded.is_empty() {
                    fetch.run(());
                }
                summary.into_result()
            }
            .boxed_local()
        });
        open_confirm(modal_stack, request, action, fetch);
    };

    view! {
        <PageFrame page_id=page_id("a001_product", PAGE_CAT_LIST) category=PAGE_CAT_LIST>
            <PageHeader title=Product::list_name() subtitle=Signal::derive(move || Some(format!("{} registro(s)", visible.with(Vec::len))))>
                <Space>
                    <Button appearance=ButtonAppearance::Primary on_click=open_wizard>
                        {icon("wand")}
                        " Nuevo producto"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=delete_selected
                        disabled=Signal::derive(move || list.selected.with(Vec::is_empty))
                    >
                        {icon("delete")}
                        {move || format!(" Eliminar ({})", list.selected.with(Vec::len))}
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch.run(()) disabled=loading>
                        {icon("refresh")}
                        {move || if loading.get() { " Cargando..." } else { " Actualizar" }}
                    </Button>
                </Space>
            </PageHeader>

            <div class="page__toolbar">
                <SearchInput
                    value=list.filter
                    on_change=Callback::new(move |text: String| list.filter.set(text))
                    placeholder="Buscar por nombre, SKU, marca o código de barras..."
                />
            </div>

            <MessageStrip message=error />
            <MessageStrip message=info kind=MessageKind::Success />

            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCheckbox
                            checked=Signal::derive(move || header_state.get().0)
                            indeterminate=Signal::derive(move || header_state.get().1)
                            on_change=Callback::new(move |checked| list.select_all(visible_ids(), checked))
                        />
                        <SortableHeaderCell label="Nombre" field="name" sort=list.sort min_width=220.0 />
                        <SortableHeaderCell label="SKU" field="sku" sort=list.sort min_width=200.0 />
                        <SortableHeaderCell label="Marca" field="brand" sort=list.sort min_width=120.0 />
                        <TableHeaderCell min_width=160.0>"Categorías"</TableHeaderCell>
                        <SortableHeaderCell label="Estado" field="active" sort=list.sort min_width=120.0 />
                        <SortableHeaderCell label="Modificado" field="modified" sort=list.sort min_width=140.0 />
                        <TableHeaderCell min_width=140.0>"Acciones"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || {
                        let filter = list.filter.get();
                        visible.get().into_iter().map(|product| {
                            let skuid = product.sku_id.clone();
                            let id_for_check = skuid.clone();
                            let id_for_select = skuid.clone();
                            let id_for_edit = skuid.clone();
                            let id_for_tab = skuid.clone();
                            let toggle: ToggleAction = {
                                let skuid = skuid.clone();
                                Arc::new(move |active| {
                                    let client = api_ctx.client();
                                    let skuid = skuid.clone();
                                    async move { api::set_active(&client, &skuid, active).await }.boxed_local()
                                })
                            };
                            let categories = product.categories.join(", ");
                            let modified = product.metadata.last_change().map(format_datetime).unwrap_or_default();
                            let name_view = highlight_matches(&product.name, &filter);
                            let sku_view = highlight_matches(&skuid, &filter);
                            let brand_view = highlight_matches(&product.brand, &filter);
                            let active = product.is_active();
                            let for_delete = product.clone();
                            let for_hard_delete = product.clone();
                            view! {
                                <TableRow>
                                    <TableCheckbox
                                        checked=Signal::derive(move || list.is_selected(&id_for_check))
                                        on_change=Callback::new(move |checked| list.select(&id_for_select, checked))
                                    />
                                    <TableCell>
                                        <TableCellLayout>
                                            <a
                                                href="#"
                                                class="table__link"
                                                on:click=move |e| {
                                                    e.prevent_default();
                                                    open_details(id_for_edit.clone());
                                                }
                                            >
                                                {name_view}
                                            </a>
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>{sku_view}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>{brand_view}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>{categories}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>
                                            <StatusSwitch initial=active toggle=toggle />
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>{modified}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>
                                            <Button
                                                size=ButtonSize::Small
                                                appearance=ButtonAppearance::Subtle
                                                attr:title="Presentaciones"
                                                on_click=move |_| open_presentations(&id_for_tab)
                                            >
                                                {icon("layers")}
                                            </Button>
                                            <Button
                                                size=ButtonSize::Small
                                                appearance=ButtonAppearance::Subtle
                                                attr:title="Eliminar"
                                                on_click=move |_| confirm_delete(for_delete.clone(), DeleteMode::Logical)
                                            >
                                                {icon("delete")}
                                            </Button>
                                            <Button
                                                size=ButtonSize::Small
                                                appearance=ButtonAppearance::Subtle
                                                class="button--danger-text"
                                                attr:title="Eliminar permanentemente"
                                                on_click=move |_| confirm_delete(for_hard_delete.clone(), DeleteMode::Hard)
                                            >
                                                {icon("x")}
                                            </Button>
                                        </TableCellLayout>
                                    </TableCell>
                                </TableRow>
                            }
                        }).collect_view()
                    }}
                </TableBody>
            </Table>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product(sku: &str, name: &str, modified: Option<&str>) -> Product {
        serde_json::from_value(json!({
            "SKUID": sku,
            "PRODUCTNAME": name,
            "MARCA": "Truper",
            "MODDATE": modified
        }))
        .unwrap()
    }

    #[test]
    fn test_sort_by_modification_date() {
        let mut rows = vec![
            product("B", "Martillo", Some("2024-05-02T10:00:00Z")),
            product("A", "Taladro", Some("2024-01-15T08:00:00Z")),
        ];
        rows.sort_by(|a, b| a.compare_by_field(b, "modified"));
        assert_eq!(rows[0].sku_id, "A");
    }

    #[test]
    fn test_filter_uses_product_columns() {
        let p = product("TALADRO-LX1", "Taladro Inalámbrico", None);
        assert!(p.matches_filter("truper"));
        assert!(p.matches_filter("lx1"));
        assert!(!p.matches_filter("makita"));
    }
}
