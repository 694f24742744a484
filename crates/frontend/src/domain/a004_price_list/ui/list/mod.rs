use crate::domain::a004_price_list::api;
use crate::domain::a004_price_list::ui::details::PriceListDetails;
use crate::layout::global_context::use_app_context;
use crate::layout::tabs::tab_label_for_key;
use crate::layout::tabs::tab_labels::{price_items_tab_key, PRICE_LISTS_TAB};
use crate::shared::api_utils::{use_api, DeleteMode};
use crate::shared::bulk::{run_bulk, BulkSummary};
use crate::shared::components::{
    open_confirm, ConfirmAction, ConfirmRequest, MessageKind, MessageStrip, SortableHeaderCell, StatusSwitch,
    TableCheckbox, TableHeaderCheckbox, ToggleAction,
};
use crate::shared::icons::icon;
use crate::shared::list_utils::{cmp_text, highlight_matches, selection_state, ListState, SearchInput, Searchable, Sortable};
use crate::shared::modal_stack::{ModalOptions, ModalStackService};
use crate::shared::page_frame::{page_id, PageFrame, PageHeader, PAGE_CAT_LIST};
use crate::shared::task::use_task_scope;
use contracts::domain::a004_price_list::{parse_date, PriceList};
use contracts::domain::common::AggregateRoot;
use futures::FutureExt;
use leptos::prelude::*;
use std::cmp::Ordering;
use std::sync::Arc;
use thaw::*;

impl Searchable for PriceList {
    fn matches_filter(&self, filter: &str) -> bool {
        let filter = filter.to_lowercase();
        [&self.id, &self.description, &self.list_type, &self.formula_type]
            .iter()
            .any(|field| field.to_lowercase().contains(&filter))
    }
}

impl Sortable for PriceList {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "id" => cmp_text(&self.id, &other.id),
            "valid_from" => parse_date(&self.valid_from).cmp(&parse_date(&other.valid_from)),
            "type" => cmp_text(&self.list_type, &other.list_type),
            "active" => self.is_active().cmp(&other.is_active()),
            _ => cmp_text(&self.description, &other.description),
        }
    }
}

#[component]
#[allow(non_snake_case)]
pub fn PriceListList() -> impl IntoView {
    let modal_stack = use_context::<ModalStackService>().expect("ModalStackService not found in context");
    let api_ctx = use_api();
    let ctx = use_app_context();
    let scope = use_task_scope();
    let list = ListState::new("description");

    let (items, set_items) = signal::<Vec<PriceList>>(Vec::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let (info, set_info) = signal::<Option<String>>(None);

    let fetch = Callback::new(move |_: ()| {
        let client = api_ctx.client();
        set_loading.set(true);
        scope.spawn(async move {
            match api::fetch_all(&client).await {
                Ok(v) => {
                    let ids: Vec<String> = v.iter().map(|l| l.id.clone()).collect();
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
        ctx.revision(PRICE_LISTS_TAB);
        fetch.run(());
    });

    let visible = Memo::new(move |_| items.with(|all| list.apply(all)));
    let visible_ids = move || visible.with(|rows| rows.iter().map(|l| l.id.clone()).collect::<Vec<_>>());
    let header_state = Memo::new(move |_| list.selected.with(|sel| selection_state(&visible_ids(), sel)));

    let open_details = move |id: Option<String>| {
        modal_stack.push_with(ModalOptions::width("640px"), move |handle| {
            view! {
                <PriceListDetails
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

    let open_prices = move |list_id: String| {
        let key = price_items_tab_key(&list_id);
        ctx.open_tab(&key, &tab_label_for_key(&key));
    };

    let confirm_delete = move |price_list: PriceList, mode: DeleteMode| {
        let what = format!("la lista \"{}\"", price_list.description);
        let request = match mode {
            DeleteMode::Logical => ConfirmRequest::logical_delete(&what),
            DeleteMode::Hard => ConfirmRequest::hard_delete(&what),
        };
        let list_id = price_list.id.clone();
        let action: ConfirmAction = Arc::new(move || {
            let client = api_ctx.client();
            let list_id = list_id.clone();
            async move { api::delete(&client, &list_id, mode).await }.boxed_local()
        });
        open_confirm(modal_stack, request, action, fetch);
    };

    let delete_selected = move |_| {
        let ids = list.selected.get_untracked();
        if ids.is_empty() {
            return;
        }
        let request = ConfirmRequest::logical_delete(&format!("{} lista(s) seleccionada(s)", ids.len()));
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
        <PageFrame page_id=page_id("a004_price_list", PAGE_CAT_LIST) category=PAGE_CAT_LIST>
            <PageHeader title=PriceList::list_name()>
                <Space>
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| open_details(None)>
                        {icon("plus")}
                        " Nueva lista"
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
                        " Actualizar"
                    </Button>
                </Space>
            </PageHeader>

            <div class="page__toolbar">
                <SearchInput value=list.filter on_change=Callback::new(move |text: String| list.filter.set(text)) />
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
                        <SortableHeaderCell label="Identificador" field="id" sort=list.sort min_width=160.0 />
                        <SortableHeaderCell label="Descripción" field="description" sort=list.sort min_width=240.0 />
                        <SortableHeaderCell label="Vigencia" field="valid_from" sort=list.sort min_width=200.0 />
                        <SortableHeaderCell label="Tipo" field="type" sort=list.sort min_width=120.0 />
                        <SortableHeaderCell label="Estado" field="active" sort=list.sort min_width=120.0 />
                        <TableHeaderCell min_width=150.0>"Acciones"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || {
                        let filter = list.filter.get();
                        visible.get().into_iter().map(|price_list| {
                            let id = price_list.id.clone();
                            let id_for_check = id.clone();
                            let id_for_select = id.clone();
                            let id_for_edit = id.clone();
                            let id_for_prices = id.clone();
                            let toggle: ToggleAction = {
                                let id = id.clone();
                                Arc::new(move |active| {
                                    let client = api_ctx.client();
                                    let id = id.clone();
                                    async move { api::set_active(&client, &id, active).await }.boxed_local()
                                })
                            };
                            let validity = price_list.validity_label();
                            let id_view = highlight_matches(&id, &filter);
                            let description_view = highlight_matches(&price_list.description, &filter);
                            let list_type = price_list.list_type.clone();
                            let active = price_list.is_active();
                            let for_delete = price_list.clone();
                            let for_hard_delete = price_list.clone();
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
                                                {id_view}
                                            </a>
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>{description_view}</TableCellLayout>
                                    </TableCell>
                                    <TableCell><TableCellLayout>{validity}</TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout>{list_type}</TableCellLayout></TableCell>
                                    <TableCell>
                                        <TableCellLayout>
                                            <StatusSwitch initial=active toggle=toggle />
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>
                                            <Button
                                                size=ButtonSize::Small
                                                appearance=ButtonAppearance::Subtle
                                                attr:title="Precios de la lista"
                                                on_click=move |_| open_prices(id_for_prices.clone())
                                            >
                                                {icon("dollar")}
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
