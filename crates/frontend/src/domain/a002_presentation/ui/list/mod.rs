use crate::domain::a002_presentation::api;
use crate::domain::a002_presentation::ui::details::PresentationDetails;
use crate::domain::a006_product_file::ui::FilesPanel;
use crate::layout::global_context::use_app_context;
use crate::layout::tabs::tab_labels::presentations_tab_key;
use crate::shared::api_utils::{use_api, DeleteMode};
use crate::shared::bulk::{run_bulk, BulkSummary};
use crate::shared::components::{
    open_confirm, ConfirmAction, ConfirmRequest, MessageKind, MessageStrip, SortableHeaderCell, StatusSwitch,
    TableCheckbox, TableHeaderCheckbox, ToggleAction,
};
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    cmp_number, cmp_text, highlight_matches, selection_state, ListState, SearchInput, Searchable, Sortable,
};
use crate::shared::modal_stack::{ModalOptions, ModalStackService};
use crate::shared::page_frame::{page_id, PageFrame, PageHeader, PAGE_CAT_LIST};
use crate::shared::task::use_task_scope;
use contracts::domain::a002_presentation::Presentation;
use contracts::domain::common::AggregateRoot;
use futures::FutureExt;
use leptos::prelude::*;
use std::cmp::Ordering;
use std::sync::Arc;
use thaw::*;

impl Searchable for Presentation {
    fn matches_filter(&self, filter: &str) -> bool {
        let filter = filter.to_lowercase();
        self.id.to_lowercase().contains(&filter)
            || self.name.to_lowercase().contains(&filter)
            || self.description.to_lowercase().contains(&filter)
    }
}

impl Sortable for Presentation {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "id" => cmp_text(&self.id, &other.id),
            "cost_initial" => cmp_number(self.cost_initial, other.cost_initial),
            "cost_final" => cmp_number(self.cost_final, other.cost_final),
            "active" => self.is_active().cmp(&other.is_active()),
            _ => cmp_text(&self.name, &other.name),
        }
    }
}

fn extra_summary(presentation: &Presentation) -> String {
    presentation
        .extra
        .0
        .iter()
        .map(|(k, v)| format!("{}: {}", k, v))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Presentations of product `skuid`
#[component]
#[allow(non_snake_case)]
pub fn PresentationList(skuid: String) -> impl IntoView {
    let modal_stack = use_context::<ModalStackService>().expect("ModalStackService not found in context");
    let api_ctx = use_api();
    let ctx = use_app_context();
    let scope = use_task_scope();
    let list = ListState::new("name");
    let skuid = StoredValue::new(skuid);
    let tab_key = StoredValue::new(presentations_tab_key(&skuid.get_value()));

    let (items, set_items) = signal::<Vec<Presentation>>(Vec::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let (info, set_info) = signal::<Option<String>>(None);

    let fetch = Callback::new(move |_: ()| {
        let client = api_ctx.client();
        let sku = skuid.get_value();
        set_loading.set(true);
        scope.spawn(async move {
            match api::fetch_by_product(&client, &sku).await {
                Ok(v) => {
                    let ids: Vec<String> = v.iter().map(|p| p.id.clone()).collect();
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
        let revision = tab_key.with_value(|key| ctx.revision(key));
        log::debug!("presentations of {}: load (revision {})", skuid.get_value(), revision);
        fetch.run(());
    });

    let visible = Memo::new(move |_| items.with(|all| list.apply(all)));
    let visible_ids = move || visible.with(|rows| rows.iter().map(|p| p.id.clone()).collect::<Vec<_>>());
    let header_state = Memo::new(move |_| list.selected.with(|sel| selection_state(&visible_ids(), sel)));

    let open_details = move |id: Option<String>| {
        modal_stack.push_with(ModalOptions::width("720px"), move |handle| {
            view! {
                <PresentationDetails
                    skuid=skuid.get_value()
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

    let open_files = move |presentation: Presentation| {
        modal_stack.push_with(ModalOptions::width("640px"), move |handle| {
            view! {
                <FilesPanel
                    presentation_id=presentation.id.clone()
                    title=presentation.name.clone()
                    on_close=Callback::new(move |_| handle.close())
                />
            }
            .into_any()
        });
    };

    let confirm_delete = move |presentation: Presentation, mode: DeleteMode| {
        let what = format!("la presentación \"{}\"", presentation.name);
        let request = match mode {
            DeleteMode::Logical => ConfirmRequest::logical_delete(&what),
            DeleteMode::Hard => ConfirmRequest::hard_delete(&what),
        };
        let id = presentation.id.clone();
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
        let request = ConfirmRequest::logical_delete(&format!("{} presentación(es) seleccionada(s)", ids.len()));
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
        Some(format!("Producto {} · {} registro(s)", skuid.get_value(), visible.with(Vec::len)))
    });

    view! {
        <PageFrame page_id=page_id("a002_presentation", PAGE_CAT_LIST) category=PAGE_CAT_LIST>
            <PageHeader title=Presentation::list_name() subtitle=subtitle>
                <Space>
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| open_details(None)>
                        {icon("plus")}
                        " Nueva presentación"
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
                    placeholder="Buscar por nombre, descripción o identificador..."
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
                        <SortableHeaderCell label="Nombre" field="name" sort=list.sort min_width=200.0 />
                        <SortableHeaderCell label="Identificador" field="id" sort=list.sort min_width=220.0 />
                        <SortableHeaderCell label="Costo inicial" field="cost_initial" sort=list.sort min_width=110.0 />
                        <SortableHeaderCell label="Costo final" field="cost_final" sort=list.sort min_width=110.0 />
                        <TableHeaderCell min_width=180.0>"Propiedades"</TableHeaderCell>
                        <SortableHeaderCell label="Estado" field="active" sort=list.sort min_width=120.0 />
                        <TableHeaderCell min_width=140.0>"Acciones"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || {
                        let filter = list.filter.get();
                        visible.get().into_iter().map(|presentation| {
                            let id = presentation.id.clone();
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
                            let for_files = presentation.clone();
                            let for_delete = presentation.clone();
                            let for_hard_delete = presentation.clone();
                            let extras = extra_summary(&presentation);
                            let name_view = highlight_matches(&presentation.name, &filter);
                            let id_view = highlight_matches(&id, &filter);
                            let cost_initial = format!("{:.2}", presentation.cost_initial);
                            let cost_final = format!("{:.2}", presentation.cost_final);
                            let active = presentation.is_active();
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
                                        <TableCellLayout>{cost_initial}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>{cost_final}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>{extras}</TableCellLayout>
                                    </TableCell>
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
                                                attr:title="Archivos"
                                                on_click=move |_| open_files(for_files.clone())
                                            >
                                                {icon("image")}
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
    use contracts::domain::a002_presentation::ExtraProperties;
    use serde_json::json;

    fn presentation(name: &str, cost: f64) -> Presentation {
        serde_json::from_value(json!({
            "IdPresentaOK": format!("SKU1-{}", name.to_uppercase()),
            "SKUID": "SKU1",
            "NOMBREPRESENTACION": name,
            "Descripcion": "Caja de cartón",
            "CostoFin": cost
        }))
        .unwrap()
    }

    #[test]
    fn test_sort_by_final_cost() {
        let mut rows = vec![presentation("Kit", 300.0), presentation("Caja", 120.5)];
        rows.sort_by(|a, b| a.compare_by_field(b, "cost_final"));
        assert_eq!(rows[0].name, "Caja");
    }

    #[test]
    fn test_search_covers_description() {
        assert!(presentation("Kit", 1.0).matches_filter("cartón"));
        assert!(!presentation("Kit", 1.0).matches_filter("metal"));
    }

    #[test]
    fn test_extra_summary() {
        let mut p = presentation("Kit", 1.0);
        p.extra = ExtraProperties(vec![("color".into(), "rojo".into()), ("voltaje".into(), "18V".into())]);
        assert_eq!(extra_summary(&p), "color: rojo, voltaje: 18V");
    }
}
