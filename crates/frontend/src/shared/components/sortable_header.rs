use crate::shared::list_utils::SortState;
use leptos::prelude::*;
use thaw::*;

/// Column header that toggles the list sort when clicked
#[component]
pub fn SortableHeaderCell(
    #[prop(into)] label: String,
    field: &'static str,
    sort: RwSignal<SortState>,
    #[prop(optional, default = 100.0)] min_width: f64,
) -> impl IntoView {
    view! {
        <TableHeaderCell resizable=true min_width=min_width>
            <div class="table__sortable-header" on:click=move |_| sort.update(|s| s.toggle(field))>
                {label}
                <span class="table__sort-indicator">{move || sort.with(|s| s.indicator(field))}</span>
            </div>
        </TableHeaderCell>
    }
}
