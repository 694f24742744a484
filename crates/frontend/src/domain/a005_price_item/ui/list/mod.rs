use crate::domain::a002_presentation::api as presentations_api;
use crate::domain::a005_price_item::api;
use crate::domain::a005_price_item::ui::details::PriceItemDetails;
use crate::layout::global_context::use_app_context;
use crate::layout::tabs::tab_labels::price_items_tab_key;
use crate::shared::api_utils::{use_api, DeleteMode};
use crate::shared::bulk::{run_bulk, BulkSummary};
use crate::shared::components::{
    open_confirm, ConfirmAction, ConfirmRequest, MessageKind, MessageStrip, SortableHeaderCell, StatusSwitch,
    TableCheckbox, TableHeaderCheckbox, ToggleAction,
};
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    cmp_number, cmp_text, highlight_matches, selection_state, ListState, SearchInput, Searchable, Sortable,
};
use crate::shared::modal_stack::{ModalOptions, ModalStackService};
use crate::shared::page_frame::{page_id, PageFrame, PageHeader, PAGE_CAT_LIST};
use crate::shared::task::use_task_scope;
use contracts::domain::a005_price_item::PriceItem;
use contracts::domain::common::AggregateRoot;
use futures::FutureExt;
use leptos::prelude::*;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use thaw::*;

impl Searchable for PriceItem {
    fn matches_filter(&self, filter: &str) -> bool {
        let filter = filter.to_lowercase();
        self.id.to_lowercase().contains(&filter) || self.presentation_id.to_lowercase().contains(&filter)
    }
}

impl Sortable for PriceItem {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "price" => cmp_number(self.price, other.price),
            "active" => self.is_active().cmp(&other.is_active()),
            _ => cmp_text(&self.presentation_id, &other.presentation_id),
        }
    }
}

/// Prices of list `list_id`
#[component]
#[allow(non_snake_case)]
pub fn PriceItemList(list_id: String) -> impl IntoView {
    let modal_stack = use_context::<ModalStackService>().expect("ModalStackService not found in context");
    let api_ctx = use_api();
    let ctx = use_app_context();
    let scope = use_task_scope();
    let list = ListState::new("presentation");
    let list_id = StoredValue::new(list_id);
    let tab_key = StoredValue::new(price_items_tab_key(&list_id.get_value()));

    let (items, set_items) = signal::<Vec<PriceItem>>(Vec::new());
    // IdPresentaOK -> presentation name
    let (names, set_names) = signal::<HashMap<String, String>>(HashMap::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let (info, set_info) = signal::<Option<String>>(None);

    let fetch = Callback::new(move |_: ()| {
        let client = api_ctx.client();
        let id = list_id.get_value();
        set_loading.set(true);
        scope.spawn(async move {
            let (prices, presentations) = futures::join!(
                api::fetch_for_list(&client, &id),
                presentations_api::fetch_all(&client)
            );
            match prices {
                Ok(v) => {
                    let ids: Vec<String> = v.iter().map(|i| i.id.clone()).collect();
                    list.retain_loaded(&ids);
                    set_items.set(v);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
            // names are cosmetic; ids are shown without them
            if let Ok(all) = presentations {
                set_names.set(all.into_iter().map(|p| (p.id, p.name)).collect());
            }
            set_loading.set(false);
        });
    });

    Effect::new(move |_| {
        let revision = tab_key.with_value(|key| ctx.revision(key));
        log::debug!("prices of {}: load (revision {})", list_id.get_value(), revision);
        fetch.run(());
    });

    let visible = Memo::new(move |_| items.with(|all| list.apply(all)));
    let visible_ids = move || visible.with(|rows| rows.iter().map(|i| i.id.clone()).collect::<Vec<_>>());
    let header_state = Memo::new(move |_| list.selected.with(|sel| selection_state(&visible_ids(), sel)));

    let open_details = move |id: Option<String>| {
        modal_stack.push_with(ModalOptions::width("520px"), move |handle| {
            view! {
                <PriceItemDetails
                    list_id=list_id.get_value()
                    id=id.clone()
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

    let confirm_delete = move |item: PriceItem, mode: DeleteMode| {
        let what = format!("el precio \"{}\"", item.id);
        let request = match mode {
            DeleteMode::Logical => ConfirmRequest::logical_delete(&what),
            DeleteMode::Hard => ConfirmRequest::hard_delete(&what),
        };
        let id = item.id.clone();
        let action: ConfirmAction = Arc::new(move || {
            let client = api_ctx.client();
            let id = id.clone();
            async move { api::delete(&client, &id, mode).await }.boxed_local()
        });
        open_confirm(modal_stack, request, action, fetch);
    };

    let delete_selected = move |_| {
        let ids = list.selected.get_untracked();
        if ids.is_empty() {
            return;
        }
        let request = ConfirmRequest::logical_delete(&format!("{} precio(s) seleccionado(s)", ids.len()));
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

    let subtitle = Signal::derive(move || {
        Some(format!("Lista {} · {} registro(s)", list_id.get_value(), visible.with(Vec::len)))
    });

    view! {
        <PageFrame page_id=page_id("a005_price_item", PAGE_CAT_LIST) category=PAGE_CAT_LIST>
            <PageHeader title=PriceItem::list_name() subtitle=subtitle>
                <Space>
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| open_details(None)>
                        {icon("plus")}
                        " Nuevo precio"
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
                    placeholder="Buscar por presentación..."
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
                        <SortableHeaderCell label="Presentación" field="presentation" sort=list.sort min_width=260.0 />
                        <SortableHeaderCell label="Precio" field="price" sort=list.sort min_width=110.0 />
                        <SortableHeaderCell label="Estado" field="active" sort=list.sort min_width=120.0 />
                        <TableHeaderCell min_width=140.0>"Modificado"</TableHeaderCell>
                        <TableHeaderCell min_width=110.0>"Acciones"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || {
                        let filter = list.filter.get();
                        visible.get().into_iter().map(|item| {
                            let id = item.id.clone();
                            let id_for_check = id.clone();
                            let id_for_select = id.clone();
                            let id_for_edit = id.clone();
                            let toggle: ToggleAction = {
                                let id = id.clone();
                                Arc::new(move |active| {
                                    let client = api_ctx.client();
                                    let id = id.clone();
                                    async move { api::set_active(&client, &id, active).await }.boxed_local()
                                })
                            };
                            let name = names.with(|n| n.get(&item.presentation_id).cloned()).unwrap_or_default();
                            let modified = item.metadata.last_change().map(format_datetime).unwrap_or_default();
                            let presentation_view = highlight_matches(&item.presentation_id, &filter);
                            let price = format!("{:.2}", item.price);
                            let active = item.is_active();
                            let for_delete = item.clone();
                            let for_hard_delete = item.clone();
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
                                                    open_details(Some(id_for_edit.clone()));
                                                }
                                            >
                                                {presentation_view}
                                            </a>
                                            <div class="table__secondary">{name}</div>
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>{price}</TableCellLayout>
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
