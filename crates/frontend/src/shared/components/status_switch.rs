//! `ACTIVED` switch with optimistic update.
//!
//! The switch moves at once, is locked while the call runs, and snaps back to
//! the previous value if the call fails.

use crate::shared::api_utils::ApiError;
use crate::shared::config::use_config;
use crate::shared::task::use_task_scope;
use futures::future::LocalBoxFuture;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use std::sync::Arc;

pub type ToggleAction = Arc<dyn Fn(bool) -> LocalBoxFuture<'static, Result<(), ApiError>> + Send + Sync>;

#[derive(Debug, Clone, PartialEq)]
pub struct ToggleState {
    pub value: bool,
    pub pending: bool,
    pub error: Option<String>,
    previous: bool,
}

impl ToggleState {
    pub fn new(value: bool) -> Self {
        Self {
            value,
            pending: false,
            error: None,
            previous: value,
        }
    }

    /// Show `target` right away; false if a call is already running
    pub fn begin(&mut self, target: bool) -> bool {
        if self.pending || target == self.value {
            return false;
        }
        self.previous = self.value;
        self.value = target;
        self.pending = true;
        self.error = None;
        true
    }

    pub fn finish(&mut self, result: &Result<(), ApiError>) {
        self.pending = false;
        if let Err(e) = result {
            self.value = self.previous;
            self.error = Some(e.to_string());
        }
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

#[component]
pub fn StatusSwitch(
    initial: bool,
    toggle: ToggleAction,
    /// Runs with the new value after a successful call
    #[prop(optional)]
    on_changed: Option<Callback<bool>>,
) -> impl IntoView {
    let timeout_ms = use_config().ui.message_timeout_ms;
    let scope = use_task_scope();
    let state = RwSignal::new(ToggleState::new(initial));

    let on_change = move |ev: leptos::ev::Event| {
        let target = event_target_checked(&ev);
        let mut started = false;
        state.update(|s| started = s.begin(target));
        if !started {
            return;
        }
        let call = toggle(target);
        let scope_inner = scope.clone();
        scope.spawn(async move {
            let result = call.await;
            state.update(|s| s.finish(&result));
            match result {
                Ok(()) => {
                    if let Some(cb) = on_changed {
                        cb.run(target);
                    }
                }
                Err(_) => scope_inner.spawn(async move {
                    TimeoutFuture::new(timeout_ms).await;
                    state.update(ToggleState::clear_error);
                }),
            }
        });
    };

    view! {
        <span class="status-switch" on:click=|e| e.stop_propagation()>
            <label class="status-switch__track" class=("status-switch__track--pending", move || state.with(|s| s.pending))>
                <input
                    type="checkbox"
                    role="switch"
                    prop:checked=move || state.with(|s| s.value)
                    prop:disabled=move || state.with(|s| s.pending)
                    on:change=on_change
                />
                <span class="status-switch__label">
                    {move || if state.with(|s| s.value) { "Activo" } else { "Inactivo" }}
                </span>
            </label>
            {move || state.with(|s| s.error.clone()).map(|e| {
                let title = e.clone();
                view! { <span class="status-switch__error" title=title>{e}</span> }
            })}
        </span>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_reverts() {
        let mut state = ToggleState::new(true);
        assert!(state.begin(false));
        assert!(!state.value);
        assert!(state.pending);
        assert!(!state.begin(true));

        state.finish(&Err(ApiError::Server {
            status: 500,
            message: "Error al desactivar".into(),
        }));
        assert!(state.value);
        assert!(!state.pending);
        assert_eq!(state.error.as_deref(), Some("Error al desactivar"));

        state.clear_error();
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_success_keeps_new_value() {
        let mut state = ToggleState::new(false);
        assert!(state.begin(true));
        state.finish(&Ok(()));
        assert!(state.value);
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_same_value_is_noop() {
        let mut state = ToggleState::new(true);
        assert!(!state.begin(true));
        assert!(!state.pending);
    }
}
