//! Explicit confirmation before destructive actions.
//!
//! The dialog stays open until the action succeeds. A failure is shown inside
//! the dialog so the user can retry or cancel.

use crate::shared::api_utils::ApiError;
use crate::shared::components::message_strip::MessageStrip;
use crate::shared::icons::icon;
use crate::shared::modal_stack::{ModalOptions, ModalStackService};
use crate::shared::task::use_task_scope;
use futures::future::LocalBoxFuture;
use leptos::prelude::*;
use std::sync::Arc;
use thaw::*;

pub type ConfirmAction = Arc<dyn Fn() -> LocalBoxFuture<'static, Result<(), ApiError>> + Send + Sync>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfirmState {
    pub open: bool,
    pub pending: bool,
    pub error: Option<String>,
}

impl ConfirmState {
    pub fn request(&mut self) {
        *self = Self {
            open: true,
            ..Self::default()
        };
    }

    /// Start the action; false when one is already running
    pub fn begin(&mut self) -> bool {
        if !self.open || self.pending {
            return false;
        }
        self.pending = true;
        self.error = None;
        true
    }

    /// Success closes; failure keeps the dialog open with the message
    pub fn resolve(&mut self, result: &Result<(), ApiError>) {
        self.pending = false;
        match result {
            Ok(()) => self.open = false,
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    pub fn cancel(&mut self) {
        if !self.pending {
            self.open = false;
            self.error = None;
        }
    }
}

#[derive(Clone)]
pub struct ConfirmRequest {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    /// Irreversible action: red confirm button
    pub danger: bool,
}

impl ConfirmRequest {
    pub fn logical_delete(what: &str) -> Self {
        Self {
            title: "Confirmar eliminación".into(),
            message: format!("¿Desactivar {what}? Podrá activarlo de nuevo más tarde."),
            confirm_label: "Eliminar".into(),
            danger: false,
        }
    }

    pub fn hard_delete(what: &str) -> Self {
        Self {
            title: "Eliminar permanentemente".into(),
            message: format!("¿Eliminar {what} de forma permanente? Esta acción no se puede deshacer."),
            confirm_label: "Eliminar definitivamente".into(),
            danger: true,
        }
    }
}

#[component]
pub fn ConfirmDialog(
    request: ConfirmRequest,
    action: ConfirmAction,
    on_confirmed: Callback<()>,
    on_close: Callback<()>,
    state: RwSignal<ConfirmState>,
) -> impl IntoView {
    let scope = use_task_scope();
    state.update(ConfirmState::request);

    let confirm = move |_| {
        let mut started = false;
        state.update(|s| started = s.begin());
        if !started {
            return;
        }
        let fut = action();
        scope.spawn(async move {
            let result = fut.await;
            state.update(|s| s.resolve(&result));
            if result.is_ok() {
                on_confirmed.run(());
                on_close.run(());
            }
        });
    };

    let cancel = move |_| {
        state.update(ConfirmState::cancel);
        if !state.with_untracked(|s| s.open) {
            on_close.run(());
        }
    };

    let pending = Signal::derive(move || state.with(|s| s.pending));
    let error = Signal::derive(move || state.with(|s| s.error.clone()));
    let confirm_class = if request.danger { "button--danger" } else { "" };

    view! {
        <div class="confirm-dialog">
            <h2 class="confirm-dialog__title">{request.title}</h2>
            <p class="confirm-dialog__message">{request.message}</p>
            <MessageStrip message=error />
            <Flex justify=FlexJustify::End>
                <Button appearance=ButtonAppearance::Secondary on_click=cancel disabled=pending>
                    {icon("x")}
                    " Cancelar"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    class=confirm_class
                    on_click=confirm
                    disabled=pending
                >
                    {icon("delete")}
                    {move || if pending.get() { " Procesando...".to_string() } else { format!(" {}", request.confirm_label) }}
                </Button>
            </Flex>
        </div>
    }
}

/// Push a confirmation onto the dialog stack. `on_confirmed` runs after the
/// action succeeds.
pub fn open_confirm(
    modal_stack: ModalStackService,
    request: ConfirmRequest,
    action: ConfirmAction,
    on_confirmed: Callback<()>,
) {
    let state = RwSignal::new(ConfirmState::default());
    let options = ModalOptions::width("440px").guarded(move || !state.with_untracked(|s| s.pending));
    modal_stack.push_with(options, move |handle| {
        view! {
            <ConfirmDialog
                request=request.clone()
                action=action.clone()
                on_confirmed=on_confirmed
                on_close=Callback::new(move |_| handle.close())
                state=state
            />
        }
        .into_any()
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api_utils::testing::{client, MockTransport};
    use crate::shared::api_utils::DeleteMode;
    use contracts::domain::a003_category::Category;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn test_failed_delete_keeps_dialog_open() {
        let mock = MockTransport::new();
        mock.respond(500, json!({ "messageUSR": "No se pudo eliminar la categoría" }));
        let api = client(&mock);

        let mut state = ConfirmState::default();
        state.request();
        assert!(state.begin());
        assert!(!state.begin());

        let result = block_on(api.delete::<Category>("CAT_A", DeleteMode::Hard));
        state.resolve(&result);

        assert!(state.open);
        assert!(!state.pending);
        assert_eq!(state.error.as_deref(), Some("No se pudo eliminar la categoría"));
        assert!(mock.requests()[0].url.contains("ProcessType=DeleteHard"));
    }

    #[test]
    fn test_successful_delete_closes() {
        let mut state = ConfirmState::default();
        state.request();
        state.begin();
        state.resolve(&Ok(()));
        assert!(!state.open);
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_cancel_ignored_while_pending() {
        let mut state = ConfirmState::default();
        state.request();
        state.begin();
        state.cancel();
        assert!(state.open);
        state.resolve(&Err(ApiError::Network("offline".into())));
        state.cancel();
        assert!(!state.open);
    }
}
