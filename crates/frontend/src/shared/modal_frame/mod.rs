use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Overlay plus dialog surface. Dialogs render their own header and actions.
#[component]
pub fn ModalFrame(
    on_close: Callback<()>,
    /// Defaults to 1000
    #[prop(optional, into)]
    z_index: Option<Signal<i32>>,
    /// Surface width; empty keeps the stylesheet default
    #[prop(optional, into)]
    width: String,
    children: Children,
) -> impl IntoView {
    let overlay_style = move || format!("z-index: {};", z_index.map(|z| z.get()).unwrap_or(1000));
    let pressed_on_overlay = RwSignal::new(false);

    fn on_overlay_itself(ev: &ev::MouseEvent) -> bool {
        matches!((ev.target(), ev.current_target()), (Some(t), Some(ct)) if t == ct)
    }

    // Close only when both press and release hit the overlay, so a text
    // selection dragged out of the dialog does not dismiss it.
    let on_mouse_down = move |ev: ev::MouseEvent| pressed_on_overlay.set(on_overlay_itself(&ev));
    let on_click = move |ev: ev::MouseEvent| {
        let close = pressed_on_overlay.get_untracked() && on_overlay_itself(&ev);
        pressed_on_overlay.set(false);
        if close {
            spawn_local(async move {
                TimeoutFuture::new(0).await;
                on_close.run(());
            });
        }
    };

    let surface_style = if width.is_empty() {
        "position: relative;".to_string()
    } else {
        format!("position: relative; width: {width}; max-width: 95vw;")
    };

    view! {
        <div
            class="modal-overlay"
            style=overlay_style
            on:mousedown=on_mouse_down
            on:click=on_click
        >
            <div class="modal" style=surface_style on:click=|ev: ev::MouseEvent| ev.stop_propagation()>
                {children()}
            </div>
        </div>
    }
}
