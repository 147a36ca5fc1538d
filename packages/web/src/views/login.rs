//! Login page with email/password form.

use dioxus::prelude::*;
use store::{Credentials, SessionStore};
use ui::{make_prefs, use_api, use_auth, AuthState};

use crate::Route;

#[component]
pub fn Login() -> Element {
    let api = use_api();
    let mut auth = use_auth();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);
    let nav = use_navigator();

    // Already signed in: straight to the board.
    use_effect(move || {
        if !auth().loading && auth().session.is_some() {
            nav.replace(Route::Board {});
        }
    });

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let api = api.clone();
        spawn(async move {
            error.set(None);

            let e = email().trim().to_string();
            let p = password();
            if e.is_empty() || !e.contains('@') {
                error.set(Some("Please enter a valid email".to_string()));
                return;
            }
            if p.is_empty() {
                error.set(Some("Password is required".to_string()));
                return;
            }

            loading.set(true);
            let credentials = Credentials { email: e, password: p };
            match SessionStore::new(make_prefs()).login(&api, &credentials).await {
                Ok(session) => {
                    auth.set(AuthState {
                        session: Some(session),
                        loading: false,
                    });
                    nav.replace(Route::Board {});
                }
                Err(err) => {
                    loading.set(false);
                    error.set(Some(err.to_string()));
                }
            }
        });
    };

    rsx! {
        div {
            class: "auth-page",

            h1 { class: "auth-title", "Sign in to TaskFlow" }
            p { class: "auth-subtitle", "Manage your projects with ease" }

            form {
                class: "auth-form",
                onsubmit: handle_login,

                if let Some(err) = error() {
                    div { class: "auth-error", "{err}" }
                }

                input {
                    r#type: "email",
                    placeholder: "Email",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }

                input {
                    r#type: "password",
                    placeholder: "Password",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }

                button {
                    class: "btn btn--primary auth-submit",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Signing in..." } else { "Sign in" }
                }
            }

            p {
                class: "auth-switch",
                "Don't have an account? "
                Link { to: Route::Register {}, "Sign up" }
            }
        }
    }
}
