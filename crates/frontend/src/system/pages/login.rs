use leptos::prelude::*;

use crate::shared::api_utils::use_api;
use crate::shared::task::use_task_scope;
use crate::system::auth::api;
use crate::system::auth::context::use_session;
use contracts::system::auth::{LoginRequest, RegisterRequest};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Login,
    Register,
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let api_ctx = use_api();
    let session = use_session();
    let scope = use_task_scope();

    let mode = RwSignal::new(Mode::Login);
    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (info_message, set_info_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if is_loading.get_untracked() {
            return;
        }
        set_is_loading.set(true);
        set_error_message.set(None);
        set_info_message.set(None);

        let client = api_ctx.client();
        let current_mode = mode.get_untracked();
        let email_val = email.get_untracked().trim().to_string();
        let password_val = password.get_untracked();
        let name_val = name.get_untracked().trim().to_string();

        scope.spawn(async move {
            let result = match current_mode {
                Mode::Login => api::login(
                    &client,
                    LoginRequest {
                        email: email_val,
                        password: password_val,
                    },
                )
                .await
                .map(Some),
                Mode::Register => api::register(
                    &client,
                    RegisterRequest {
                        name: name_val,
                        email: email_val,
                        password: password_val,
                    },
                )
                .await,
            };
            set_is_loading.set(false);
            match result {
                // switches the app to the main layout
                Ok(Some(auth)) => session.sign_in(auth),
                Ok(None) => {
                    mode.set(Mode::Login);
                    set_info_message.set(Some("Cuenta creada. Inicie sesión.".into()));
                }
                Err(e) => set_error_message.set(Some(e.to_string())),
            }
        });
    };

    let switch_mode = move |_| {
        mode.update(|m| {
            *m = if *m == Mode::Login {
                Mode::Register
            } else {
                Mode::Login
            }
        });
        set_error_message.set(None);
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"Catálogo de Productos"</h1>
                <h2>{move || if mode.get() == Mode::Login { "Iniciar sesión" } else { "Crear cuenta" }}</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">{move || error_message.get().unwrap_or_default()}</div>
                </Show>
                <Show when=move || info_message.get().is_some()>
                    <div class="info-message">{move || info_message.get().unwrap_or_default()}</div>
                </Show>

                <form on:submit=on_submit>
                    <Show when=move || mode.get() == Mode::Register>
                        <div class="form-group">
                            <label for="name">"Nombre"</label>
                            <input
                                type="text"
                                id="name"
                                prop:value=move || name.get()
                                on:input=move |ev| set_name.set(event_target_value(&ev))
                                disabled=move || is_loading.get()
                            />
                        </div>
                    </Show>

                    <div class="form-group">
                        <label for="email">"Correo"</label>
                        <input
                            type="email"
                            id="email"
                            placeholder="usuario@empresa.com"
                            prop:value=move || email.get()
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">"Contraseña"</label>
                        <input
                            type="password"
                            id="password"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <button type="submit" class="btn-primary" disabled=move || is_loading.get()>
                        {move || match (mode.get(), is_loading.get()) {
                            (_, true) => "Procesando...",
                            (Mode::Login, false) => "Entrar",
                            (Mode::Register, false) => "Registrarse",
                        }}
                    </button>
                </form>

                <button class="login-switch" on:click=switch_mode>
                    {move || if mode.get() == Mode::Login {
                        "¿No tiene cuenta? Regístrese"
                    } else {
                        "¿Ya tiene cuenta? Inicie sesión"
                    }}
                </button>
            </div>
        </div>
    }
}
