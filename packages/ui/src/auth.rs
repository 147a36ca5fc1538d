//! Authentication context and hooks for the UI.

use api::ApiClient;
use dioxus::prelude::*;
use store::{Caches, Session, SessionStore};

use crate::prefs::make_prefs;

/// Authentication state for the application.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthState {
    pub session: Option<Session>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            session: None,
            loading: true,
        }
    }
}

impl AuthState {
    pub fn identity(&self) -> Option<&store::Identity> {
        self.session.as_ref().map(|s| &s.identity)
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// The shared backend client. Carries the ambient bearer credential for the
/// lifetime of the session; nothing else ever attaches it.
pub fn use_api() -> ApiClient {
    use_context::<ApiClient>()
}

/// The cached remote collections, one signal for the whole board.
pub fn use_caches() -> Signal<Caches> {
    use_context::<Signal<Caches>>()
}

/// Provider component that manages authentication state.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let api = use_context_provider(ApiClient::from_env);
    let mut auth_state = use_context_provider(|| Signal::new(AuthState::default()));
    use_context_provider(|| Signal::new(Caches::new()));

    // Revive a persisted session on mount. Any failure just leaves the
    // login screen showing.
    let _ = use_resource(move || {
        let api = api.clone();
        async move {
            let session = SessionStore::new(make_prefs()).restore(&api).await;
            auth_state.set(AuthState {
                session,
                loading: false,
            });
        }
    });

    rsx! {
        {children}
    }
}

/// Button to log out the current user. Clears the credential, the persisted
/// token, and every cache; safe to press twice.
#[component]
pub fn LogoutButton(
    #[props(default = "Log out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let api = use_api();
    let mut auth_state = use_auth();
    let mut caches = use_caches();

    let onclick = move |_| {
        SessionStore::new(make_prefs()).logout(&api);
        caches.write().clear_all();
        auth_state.set(AuthState {
            session: None,
            loading: false,
        });
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href("/login");
            }
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
