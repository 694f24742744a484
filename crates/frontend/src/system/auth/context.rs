use leptos::prelude::*;

use super::api::AuthSession;
use super::storage;
use crate::shared::config::{AppConfig, DB_SERVERS};

/// Who is acting, against which store, with which token.
///
/// Read at request time by `ApiContext::client`, so no resource service holds
/// its own copy.
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub auth: RwSignal<Option<AuthSession>>,
    pub db_server: RwSignal<String>,
    /// Set by any 401; shows the session-expired dialog
    pub expired: RwSignal<bool>,
}

impl SessionContext {
    pub fn new(restored: Option<AuthSession>, db_server: String) -> Self {
        Self {
            auth: RwSignal::new(restored),
            db_server: RwSignal::new(db_server),
            expired: RwSignal::new(false),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.with(Option::is_some)
    }

    pub fn logged_user_untracked(&self) -> String {
        self.auth
            .with_untracked(|a| a.as_ref().map(|s| s.user.logged_user().to_string()))
            .unwrap_or_default()
    }

    pub fn token_untracked(&self) -> Option<String> {
        self.auth.with_untracked(|a| a.as_ref().map(|s| s.token.clone()))
    }

    pub fn display_name(&self) -> String {
        self.auth
            .with(|a| a.as_ref().map(|s| s.user.display_name().to_string()))
            .unwrap_or_default()
    }

    pub fn sign_in(&self, session: AuthSession) {
        storage::save_session(&session);
        self.expired.set(false);
        self.auth.set(Some(session));
    }

    pub fn sign_out(&self) {
        storage::clear_session();
        self.auth.set(None);
    }

    pub fn select_db_server(&self, name: &str) {
        if !DB_SERVERS.contains(&name) {
            log::warn!("unknown DB server {}", name);
            return;
        }
        storage::save_db_server(name);
        self.db_server.set(name.to_string());
        log::debug!("DB server switched to {}", name);
    }
}

/// Initial store: the stored choice if it is still known, else the configured one
pub fn initial_db_server(stored: Option<String>, config: &AppConfig) -> String {
    stored
        .filter(|s| DB_SERVERS.contains(&s.as_str()))
        .or_else(|| config.api.db_server.clone())
        .unwrap_or_else(|| DB_SERVERS[0].to_string())
}

/// Restores the session from storage and provides `SessionContext`
#[component]
pub fn AuthProvider(config: AppConfig, children: Children) -> impl IntoView {
    let restored = storage::load_session();
    if let Some(session) = &restored {
        log::debug!("session restored for {}", session.user.logged_user());
    }
    let session = SessionContext::new(restored, initial_db_server(storage::load_db_server(), &config));
    provide_context(session);
    children()
}

pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext context not found")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::load_config;

    #[test]
    fn test_initial_db_server() {
        let config = load_config().unwrap();
        assert_eq!(initial_db_server(Some("CosmosDB".into()), &config), "CosmosDB");
        assert_eq!(initial_db_server(Some("Oracle".into()), &config), "MongoDB");
        assert_eq!(initial_db_server(None, &config), "MongoDB");
    }
}
