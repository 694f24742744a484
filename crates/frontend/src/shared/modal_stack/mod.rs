//! Stack of dialogs rendered above the tab area.
//!
//! Catalog dialogs nest (product list → presentation editor → file delete
//! confirmation), so every dialog is pushed here and only the topmost one
//! reacts to Escape or overlay clicks.

use crate::shared::modal_frame::ModalFrame;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use std::sync::Arc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::KeyboardEvent;

type Builder = Arc<dyn Fn(ModalHandle) -> AnyView + Send + Sync>;
type CloseGuard = Arc<dyn Fn() -> bool + Send + Sync>;

/// Presentation options of one dialog
#[derive(Clone, Default)]
pub struct ModalOptions {
    /// CSS width of the dialog surface, e.g. `"720px"`
    pub width: Option<String>,
    /// Returning false blocks Escape and overlay close (used while a save is pending)
    pub can_close: Option<CloseGuard>,
}

impl ModalOptions {
    pub fn width(width: &str) -> Self {
        Self {
            width: Some(width.to_string()),
            can_close: None,
        }
    }

    pub fn guarded(mut self, can_close: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        self.can_close = Some(Arc::new(can_close));
        self
    }
}

#[derive(Clone)]
struct DialogEntry {
    id: u64,
    builder: Builder,
    options: ModalOptions,
}

impl DialogEntry {
    fn may_close(&self) -> bool {
        self.options.can_close.as_ref().map(|f| f()).unwrap_or(true)
    }
}

/// Returned by `push`; closes the dialog it belongs to.
#[derive(Clone, Copy)]
pub struct ModalHandle {
    id: u64,
    svc: ModalStackService,
}

impl ModalHandle {
    pub fn close(&self) {
        self.svc.close_deferred(self.id);
    }
}

#[derive(Clone, Copy)]
pub struct ModalStackService {
    stack: RwSignal<Vec<DialogEntry>>,
    next_id: StoredValue<u64>,
}

impl Default for ModalStackService {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalStackService {
    pub fn new() -> Self {
        Self {
            stack: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(1),
        }
    }

    // Removing a dialog during its own click dispatch drops the handler that is
    // still running, so removal waits for the next tick.
    fn defer(&self, f: impl FnOnce(ModalStackService) + 'static) {
        let svc = *self;
        spawn_local(async move {
            TimeoutFuture::new(0).await;
            f(svc);
        });
    }

    pub fn is_open(&self) -> bool {
        self.stack.with(|s| !s.is_empty())
    }

    pub fn push<F>(&self, builder: F) -> ModalHandle
    where
        F: Fn(ModalHandle) -> AnyView + Send + Sync + 'static,
    {
        self.push_with(ModalOptions::default(), builder)
    }

    pub fn push_with<F>(&self, options: ModalOptions, builder: F) -> ModalHandle
    where
        F: Fn(ModalHandle) -> AnyView + Send + Sync + 'static,
    {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);

        self.stack.update(|s| {
            s.push(DialogEntry {
                id,
                builder: Arc::new(builder),
                options,
            })
        });
        log::debug!("dialog {} opened", id);

        ModalHandle { id, svc: *self }
    }

    pub fn close(&self, id: u64) {
        self.stack.update(|s| s.retain(|e| e.id != id));
    }

    pub fn close_deferred(&self, id: u64) {
        self.defer(move |svc| svc.close(id));
    }

    /// Close the topmost dialog unless its guard refuses
    fn dismiss_top(&self) {
        let allowed = self
            .stack
            .with_untracked(|s| s.last().map(DialogEntry::may_close))
            .unwrap_or(false);
        if allowed {
            self.defer(|svc| {
                svc.stack.update(|s| {
                    s.pop();
                })
            });
        }
    }

    /// Tracked z-index of dialog `id`, following its current stack position
    fn z_index_of(&self, id: u64) -> i32 {
        self.stack.with(|s| stacked_z_index(s.iter().map(|e| e.id), id))
    }

    pub fn clear(&self) {
        self.stack.set(Vec::new());
    }
}

/// Renders the dialog stack. Mounted once at the application root.
#[component]
pub fn ModalHost() -> impl IntoView {
    let svc = use_context::<ModalStackService>().expect("ModalStackService context not found");

    Effect::new(move |_| {
        let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
            if let Some(key) = event.dyn_ref::<KeyboardEvent>() {
                if key.key() == "Escape" && svc.is_open() {
                    svc.dismiss_top();
                }
            }
        }) as Box<dyn FnMut(_)>);

        if let Some(window) = web_sys::window() {
            let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            // lives as long as the app
            closure.forget();
        }
    });

    view! {
        <Show when=move || svc.is_open()>
            <For
                each=move || svc.stack.get()
                key=|entry| entry.id
                children=move |entry| {
                    let id = entry.id;
                    let guard = entry.clone();
                    let on_close = Callback::new(move |_| {
                        if guard.may_close() {
                            svc.close_deferred(guard.id);
                        }
                    });
                    let body = (entry.builder)(ModalHandle { id: entry.id, svc });

                    view! {
                        <ModalFrame
                            z_index=Signal::derive(move || svc.z_index_of(id))
                            on_close=on_close
                            width=entry.options.width.clone().unwrap_or_default()
                        >
                            {body}
                        </ModalFrame>
                    }
                }
            />
        </Show>
    }
}

fn stacked_z_index(ids: impl IntoIterator<Item = u64>, id: u64) -> i32 {
    let depth = ids.into_iter().position(|i| i == id).unwrap_or(0);
    1000 + depth as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_z_index_follows_position() {
        assert_eq!(stacked_z_index([4, 7, 9], 4), 1000);
        assert_eq!(stacked_z_index([4, 7, 9], 9), 1002);
        // dialog 7 closed: 9 moves down one level
        assert_eq!(stacked_z_index([4, 9], 9), 1001);
        assert_eq!(stacked_z_index([4, 9], 12), 1000);
    }
}
