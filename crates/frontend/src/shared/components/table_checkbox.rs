use leptos::prelude::*;

/// Row selection cell. Clicking it never triggers the row click.
#[component]
pub fn TableCheckbox(
    #[prop(into)] checked: Signal<bool>,
    on_change: Callback<bool>,
    #[prop(optional)] disabled: bool,
) -> impl IntoView {
    view! {
        <td class="table__cell table__cell--checkbox" on:click=|e| e.stop_propagation()>
            <input
                type="checkbox"
                class="table__checkbox"
                prop:checked=checked
                prop:disabled=disabled
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
        </td>
    }
}

/// Header cell that selects or clears every visible row
#[component]
pub fn TableHeaderCheckbox(
    /// All visible rows are selected
    #[prop(into)]
    checked: Signal<bool>,
    /// Some, but not all, rows are selected
    #[prop(into)]
    indeterminate: Signal<bool>,
    on_change: Callback<bool>,
) -> impl IntoView {
    view! {
        <th class="table__cell table__cell--checkbox">
            <input
                type="checkbox"
                class="table__checkbox"
                title="Seleccionar todo"
                prop:checked=checked
                prop:indeterminate=indeterminate
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
        </th>
    }
}
