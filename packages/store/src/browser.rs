//! localStorage-backed preference store for the web platform.

use crate::prefs::{PrefStore, StoredPrefs};

const TOKEN_KEY: &str = "taskflow-token";
const THEME_KEY: &str = "taskflow-theme";

/// Stores the token and theme under two localStorage keys. Zero-sized;
/// the browser owns the actual storage.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserPrefs;

impl BrowserPrefs {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl PrefStore for BrowserPrefs {
    fn load(&self) -> StoredPrefs {
        let Some(storage) = Self::storage() else {
            return StoredPrefs::default();
        };
        StoredPrefs {
            token: storage.get_item(TOKEN_KEY).ok().flatten(),
            theme: storage.get_item(THEME_KEY).ok().flatten(),
        }
    }

    fn store(&self, prefs: &StoredPrefs) {
        let Some(storage) = Self::storage() else {
            return;
        };
        match &prefs.token {
            Some(token) => {
                let _ = storage.set_item(TOKEN_KEY, token);
            }
            None => {
                let _ = storage.remove_item(TOKEN_KEY);
            }
        }
        match &prefs.theme {
            Some(theme) => {
                let _ = storage.set_item(THEME_KEY, theme);
            }
            None => {
                let _ = storage.remove_item(THEME_KEY);
            }
        }
    }
}
