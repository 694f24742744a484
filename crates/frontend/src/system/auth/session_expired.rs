use leptos::prelude::*;
use thaw::*;

use super::context::use_session;
use crate::shared::modal_frame::ModalFrame;

/// Blocking dialog shown after a 401. The only way out is a fresh login.
#[component]
pub fn SessionExpiredModal() -> impl IntoView {
    let session = use_session();

    let relogin = move |_| {
        session.sign_out();
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
    };

    view! {
        <Show when=move || session.expired.get()>
            <ModalFrame on_close=Callback::new(|_| {}) z_index=5000 width="420px">
                <div class="confirm-dialog">
                    <h2 class="confirm-dialog__title">"Sesión expirada"</h2>
                    <p class="confirm-dialog__message">
                        "Su sesión ha expirado. Inicie sesión nuevamente para continuar."
                    </p>
                    <Flex justify=FlexJustify::End>
                        <Button appearance=ButtonAppearance::Primary on_click=relogin>
                            "Iniciar sesión"
                        </Button>
                    </Flex>
                </div>
            </ModalFrame>
        </Show>
    }
}
