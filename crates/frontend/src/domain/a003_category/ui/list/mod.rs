use crate::domain::a003_category::api;
use crate::domain::a003_category::ui::details::CategoryDetails;
use crate::layout::global_context::use_app_context;
use crate::layout::tabs::tab_labels::CATEGORIES_TAB;
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
use contracts::domain::a003_category::Category;
use contracts::domain::common::AggregateRoot;
use futures::FutureExt;
use leptos::prelude::*;
use std::cmp::Ordering;
use std::sync::Arc;
use thaw::*;

impl Searchable for Category {
    fn matches_filter(&self, filter: &str) -> bool {
        let filter = filter.to_lowercase();
        self.id.to_lowercase().contains(&filter)
            || self.name.to_lowercase().contains(&filter)
            || self.parent_id.as_deref().unwrap_or("").to_lowercase().contains(&filter)
    }
}

impl Sortable for Category {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "id" => cmp_text(&self.id, &other.id),
            "parent" => cmp_text(
                self.parent_id.as_deref().unwrap_or(""),
                other.parent_id.as_deref().unwrap_or(""),
            ),
            "active" => self.is_active().cmp(&other.is_active()),
            _ => cmp_text(&self.name, &other.name),
        }
    }
}

#[component]
#[allow(non_snake_case)]
pub fn CategoryList() -> impl IntoView {
    let modal_stack = use_context::<ModalStackService>().expect("ModalStackService not found in context");
    let api_ctx = use_api();
    let ctx = use_app_context();
    let scope = use_task_scope();
    let list = ListState::new("name");

    let (items, set_items) = signal::<Vec<Category>>(Vec::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let (info, set_info) = signal::<Option<String>>(None);

    let fetch = Callback::new(move |_: ()| {
        let client = api_ctx.client();
        set_loading.set(true);
        scope.spawn(async move {
            match api::fetch_all(&client).await {
                Ok(v) => {
                    let ids: Vec<String> = v.iter().map(|c| c.id.clone()).collect();
                    list.retain_loaded(&ids);
                    set_items.set(v);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_loading.set(false);
        });
    });

    // Initial load, then again on every refresh request for this tab
    Effect::new(move |_| {
        let revision = ctx.revision(CATEGORIES_TAB);
        log::debug!("categories: load (revision {})", revision);
        fetch.run(());
    });

    let visible = Memo::new(move |_| items.with(|all| list.apply(all)));
    let visible_ids = move || visible.with(|rows| rows.iter().map(|c| c.id.clone()).collect::<Vec<_>>());
    let header_state = Memo::new(move |_| list.selected.with(|sel| selection_state(&visible_ids(), sel)));

    let open_details = move |id: Option<String>| {
        modal_stack.push_with(ModalOptions::width("560px"), move |handle| {
            view! {
                <CategoryDetails
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

    let confirm_delete = move |category: Category, mode: DeleteMode| {
        let what = format!("la categoría \"{}\"", category.name);
        let request = match mode {
            DeleteMode::Logical => ConfirmRequest::logical_delete(&what),
            DeleteMode::Hard => ConfirmRequest::hard_delete(&what),
        };
        let catid = category.id.clone();
        let action: ConfirmAction = Arc::new(move || {
            let client = api_ctx.client();
            let catid = catid.clone();
            async move { api::delete(&client, &catid, mode).await }.boxed_local()
        });
        open_confirm(modal_stack, request, action, fetch);
    };

    let delete_selected = move |_| {
        let ids = list.selected.get_untracked();
        if ids.is_empty() {
            return;
        }
        let request = ConfirmRequest::logical_delete(&format!("{} categoría(s) seleccionada(s)", ids.len()));
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
        <PageFrame page_id=page_id("a003_category", PAGE_CAT_LIST) category=PAGE_CAT_LIST>
            <PageHeader title=Category::list_name() subtitle=Signal::derive(move || Some(format!("{} registro(s)", visible.with(Vec::len))))>
                <Space>
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| open_details(None)>
                        {icon("plus")}
                        " Nueva categoría"
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
                    placeholder="Buscar por nombre o identificador..."
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
                        <SortableHeaderCell label="Identificador" field="id" sort=list.sort min_width=200.0 />
                        <SortableHeaderCell label="Categoría padre" field="parent" sort=list.sort min_width=180.0 />
                        <SortableHeaderCell label="Estado" field="active" sort=list.sort min_width=120.0 />
                        <TableHeaderCell min_width=140.0>"Modificado"</TableHeaderCell>
                        <TableHeaderCell min_width=110.0>"Acciones"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || {
                        let filter = list.filter.get();
                        visible.get().into_iter().map(|category| {
                            let id = category.id.clone();
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
                            let for_delete = category.clone();
                            let for_hard_delete = category.clone();
                            let name_view = highlight_matches(&category.name, &filter);
                            let id_view = highlight_matches(&id, &filter);
                            let active = category.is_active();
                            let parent = category.parent_id.clone().unwrap_or_else(|| "-".to_string());
                            let modified = category.metadata.last_change().map(format_datetime).unwrap_or_default();
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
                                                {name_view}
                                            </a>
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>{id_view}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>{parent}</TableCellLayout>
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
