use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

use crate::layout::tabs::tab_label_for_key;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub key: String,
    pub title: String,
}

/// Open tabs, the active one, and the sidebar state
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub opened: RwSignal<Vec<Tab>>,
    pub active: RwSignal<Option<String>>,
    pub left_open: RwSignal<bool>,
    /// Bumped to make a tab's content reload its data
    revisions: RwSignal<HashMap<String, u32>>,
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            opened: RwSignal::new(vec![]),
            active: RwSignal::new(None),
            left_open: RwSignal::new(true),
            revisions: RwSignal::new(HashMap::new()),
        }
    }

    /// Restore the tab named in `?active=` and keep the URL in sync afterwards
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        if let Some(key) = active_from_query(&search) {
            self.open_tab(&key, &tab_label_for_key(&key));
        }

        let this = *self;
        Effect::new(move |_| {
            let Some(key) = this.active.get() else {
                return;
            };
            let new_url = active_query(&key);
            let current = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();
            if current != new_url {
                if let Some(history) = window().and_then(|w| w.history().ok()) {
                    let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&new_url));
                }
            }
        });
    }

    pub fn open_tab(&self, key: &str, title: &str) {
        let mut added = false;
        self.opened.update(|tabs| added = insert_tab(tabs, key, title));
        log::debug!("open_tab '{}' ({})", key, if added { "new" } else { "existing" });
        self.activate_tab(key);
    }

    pub fn activate_tab(&self, key: &str) {
        self.active.set(Some(key.to_string()));
    }

    pub fn update_tab_title(&self, key: &str, title: &str) {
        self.opened.update(|tabs| {
            if let Some(tab) = tabs.iter_mut().find(|t| t.key == key) {
                tab.title = title.to_string();
            }
        });
    }

    pub fn close_tab(&self, key: &str) {
        let mut next = None;
        self.opened.update(|tabs| next = remove_tab(tabs, key));
        log::debug!("close_tab '{}'", key);
        if self.active.with_untracked(|a| a.as_deref() == Some(key)) {
            self.active.set(next);
        }
    }

    /// Ask the content of `key` to fetch again
    pub fn refresh_tab(&self, key: &str) {
        self.revisions.update(|r| *r.entry(key.to_string()).or_default() += 1);
    }

    /// Reload every open tab, e.g. after switching the DB server
    pub fn refresh_open_tabs(&self) {
        let keys: Vec<String> = self.opened.with_untracked(|tabs| tabs.iter().map(|t| t.key.clone()).collect());
        self.revisions.update(|r| {
            for key in keys {
                *r.entry(key).or_default() += 1;
            }
        });
    }

    /// Tracked revision counter of `key`
    pub fn revision(&self, key: &str) -> u32 {
        self.revisions.with(|r| r.get(key).copied().unwrap_or_default())
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|open| *open = !*open);
    }
}

pub fn use_app_context() -> AppGlobalContext {
    use_context::<AppGlobalContext>().expect("AppGlobalContext context not found")
}

/// Append a tab unless the key is already open
fn insert_tab(tabs: &mut Vec<Tab>, key: &str, title: &str) -> bool {
    if tabs.iter().any(|t| t.key == key) {
        return false;
    }
    tabs.push(Tab {
        key: key.to_string(),
        title: title.to_string(),
    });
    true
}

/// Remove `key` and return the tab that should become active if it was: the
/// right neighbour, else the left one.
fn remove_tab(tabs: &mut Vec<Tab>, key: &str) -> Option<String> {
    let index = tabs.iter().position(|t| t.key == key)?;
    tabs.remove(index);
    tabs.get(index)
        .or_else(|| index.checked_sub(1).and_then(|i| tabs.get(i)))
        .map(|t| t.key.clone())
}

fn active_from_query(search: &str) -> Option<String> {
    let params: HashMap<String, String> = serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
    params.get("active").filter(|k| !k.is_empty()).cloned()
}

fn active_query(key: &str) -> String {
    let query = serde_qs::to_string(&HashMap::from([("active", key)])).unwrap_or_default();
    format!("?{}", query)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(tabs: &[Tab]) -> Vec<&str> {
        tabs.iter().map(|t| t.key.as_str()).collect()
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut tabs = Vec::new();
        assert!(insert_tab(&mut tabs, "a001_product", "Productos"));
        assert!(!insert_tab(&mut tabs, "a001_product", "Productos"));
        assert_eq!(tabs.len(), 1);
    }

    #[test]
    fn test_close_picks_neighbour() {
        let mut tabs = Vec::new();
        for key in ["a001_product", "a003_category", "a004_price_list"] {
            insert_tab(&mut tabs, key, key);
        }
        assert_eq!(remove_tab(&mut tabs, "a003_category").as_deref(), Some("a004_price_list"));
        assert_eq!(remove_tab(&mut tabs, "a004_price_list").as_deref(), Some("a001_product"));
        assert_eq!(remove_tab(&mut tabs, "a001_product"), None);
        assert_eq!(remove_tab(&mut tabs, "missing"), None);
        assert!(keys(&tabs).is_empty());
    }

    #[test]
    fn test_active_query_round_trip() {
        let key = "a002_presentation_list_TALADRO-INALAMBRICO-LX9K2";
        let query = active_query(key);
        assert!(query.starts_with("?active="));
        assert_eq!(active_from_query(&query).as_deref(), Some(key));
        assert_eq!(active_from_query(""), None);
        assert_eq!(active_from_query("?active="), None);
    }
}
