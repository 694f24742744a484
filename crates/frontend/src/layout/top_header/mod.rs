//! TopHeader: sidebar toggle, brand, DB server selector, user and logout.

use crate::layout::global_context::use_app_context;
use crate::shared::api_utils::use_api;
use crate::shared::config::DB_SERVERS;
use crate::shared::icons::icon;
use crate::system::auth::api;
use crate::system::auth::use_session;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_app_context();
    let session = use_session();
    let api_ctx = use_api();

    let toggle_sidebar = move |_| ctx.toggle_left();

    let on_db_change = move |ev: leptos::ev::Event| {
        let name = event_target_value(&ev);
        if name == session.db_server.get_untracked() {
            return;
        }
        session.select_db_server(&name);
        ctx.refresh_open_tabs();
    };

    let logout = move |_| {
        let client = api_ctx.client();
        spawn_local(async move {
            api::logout(&client).await;
            session.sign_out();
        });
    };

    let is_sidebar_visible = move || ctx.left_open.get();

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=toggle_sidebar
                    title=move || if is_sidebar_visible() { "Ocultar menú" } else { "Mostrar menú" }
                >
                    {move || if is_sidebar_visible() {
                        icon("panel-left-close")
                    } else {
                        icon("panel-left-open")
                    }}
                </button>
                <span class="top-header__title">"Catálogo de Productos"</span>
            </div>

            <div class="top-header__actions">
                <label class="top-header__db" title="Servidor de base de datos">
                    {icon("database")}
                    <select
                        prop:value=move || session.db_server.get()
                        on:change=on_db_change
                    >
                        {DB_SERVERS.iter().map(|name| view! {
                            <option value=*name selected=move || session.db_server.get() == *name>{*name}</option>
                        }).collect_view()}
                    </select>
                </label>

                <div class="top-header__user">
                    {icon("user")}
                    <span>{move || session.display_name()}</span>
                </div>

                <button class="top-header__icon-btn" on:click=logout title="Cerrar sesión">
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}
