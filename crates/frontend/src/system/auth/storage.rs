use web_sys::window;

use super::api::AuthSession;

const SESSION_KEY: &str = "catalog_auth_session";
const DB_SERVER_KEY: &str = "catalog_db_server";

fn local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

pub fn save_session(session: &AuthSession) {
    let Some(storage) = local_storage() else {
        return;
    };
    match serde_json::to_string(session) {
        Ok(json) => {
            let _ = storage.set_item(SESSION_KEY, &json);
        }
        Err(e) => log::error!("cannot persist session: {}", e),
    }
}

/// Stored session, if any; a corrupt entry is discarded
pub fn load_session() -> Option<AuthSession> {
    let raw = local_storage()?.get_item(SESSION_KEY).ok()??;
    match serde_json::from_str::<AuthSession>(&raw) {
        Ok(session) if !session.token.is_empty() => Some(session),
        _ => {
            clear_session();
            None
        }
    }
}

pub fn clear_session() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(SESSION_KEY);
    }
}

pub fn save_db_server(name: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(DB_SERVER_KEY, name);
    }
}

pub fn load_db_server() -> Option<String> {
    local_storage()?.get_item(DB_SERVER_KEY).ok()?
}
