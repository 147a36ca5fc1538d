//! Registration page with name/email/password/role form.

use dioxus::prelude::*;
use store::{NewIdentity, SessionStore};
use ui::{make_prefs, use_api, use_auth, AuthState};

use crate::Route;

const ROLES: [&str; 3] = ["Team Member", "Manager", "Admin"];

#[component]
pub fn Register() -> Element {
    let api = use_api();
    let mut auth = use_auth();
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut role = use_signal(|| ROLES[0].to_string());
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);
    let nav = use_navigator();

    use_effect(move || {
        if !auth().loading && auth().session.is_some() {
            nav.replace(Route::Board {});
        }
    });

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        let api = api.clone();
        spawn(async move {
            error.set(None);

            let n = name().trim().to_string();
            let e = email().trim().to_string();
            let p = password();

            if n.is_empty() {
                error.set(Some("Name is required".to_string()));
                return;
            }
            if e.is_empty() || !e.contains('@') {
                error.set(Some("Please enter a valid email".to_string()));
                return;
            }
            if p.len() < 8 {
                error.set(Some("Password must be at least 8 characters".to_string()));
                return;
            }
            if p != confirm_password() {
                error.set(Some("Passwords do not match".to_string()));
                return;
            }

            loading.set(true);
            let profile = NewIdentity {
                name: n,
                email: e,
                password: p,
                role: role(),
            };
            match SessionStore::new(make_prefs()).register(&api, &profile).await {
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

            h1 { class: "auth-title", "Join TaskFlow" }
            p { class: "auth-subtitle", "Create your project management account" }

            form {
                class: "auth-form",
                onsubmit: handle_register,

                if let Some(err) = error() {
                    div { class: "auth-error", "{err}" }
                }

                input {
                    r#type: "text",
                    placeholder: "Full name",
                    value: name(),
                    oninput: move |evt: FormEvent| name.set(evt.value()),
                }

                input {
                    r#type: "email",
                    placeholder: "Email",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }

                input {
                    r#type: "password",
                    placeholder: "Password (min 8 characters)",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }

                input {
                    r#type: "password",
                    placeholder: "Confirm password",
                    value: confirm_password(),
                    oninput: move |evt: FormEvent| confirm_password.set(evt.value()),
                }

                select {
                    value: role(),
                    onchange: move |evt| role.set(evt.value()),
                    for r in ROLES {
                        option { key: "{r}", value: "{r}", "{r}" }
                    }
                }

                button {
                    class: "btn btn--primary auth-submit",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Creating account..." } else { "Sign up" }
                }
            }

            p {
                class: "auth-switch",
                "Already have an account? "
                Link { to: Route::Login {}, "Sign in" }
            }
        }
    }
}
