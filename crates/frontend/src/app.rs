use crate::layout::global_context::AppGlobalContext;
use crate::routes::AppRoutes;
use crate::shared::api_utils::ApiContext;
use crate::shared::config::{load_config, AppConfig};
use crate::shared::modal_stack::{ModalHost, ModalStackService};
use crate::system::auth::{use_session, AuthProvider};
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let config = load_config().unwrap_or_else(|e| {
        log::error!("invalid embedded config, using defaults: {}", e);
        AppConfig::default()
    });

    provide_context(config.clone());
    provide_context(AppGlobalContext::new());
    provide_context(ModalStackService::new());

    let auth_config = config.clone();
    view! {
        <AuthProvider config=auth_config>
            <ApiScope config=config>
                <AppRoutes />
                <ModalHost />
            </ApiScope>
        </AuthProvider>
    }
}

/// Provides `ApiContext` below `AuthProvider`, where the session is known
#[component]
fn ApiScope(config: AppConfig, children: Children) -> impl IntoView {
    provide_context(ApiContext::new(config, use_session()));
    children()
}
