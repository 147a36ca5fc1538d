//! Durable client-side preferences.
//!
//! The entirety of persisted local state is one opaque bearer token and one
//! theme choice. [`PrefStore`] abstracts where that pair lives; backends sit
//! in sibling modules: [`crate::MemoryPrefs`] for tests, `FilePrefs` on
//! native targets, and `BrowserPrefs` (localStorage) on the web.

use serde::{Deserialize, Serialize};

/// The persisted pair. A missing or unreadable store is equivalent to the
/// default (nothing remembered).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPrefs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

/// Where the persisted pair lives. Reads and writes swallow their own
/// failures: a broken store degrades to "nothing remembered" rather than
/// taking the app down.
pub trait PrefStore {
    fn load(&self) -> StoredPrefs;
    fn store(&self, prefs: &StoredPrefs);

    /// Read-modify-write helper.
    fn update(&self, apply: impl FnOnce(&mut StoredPrefs)) {
        let mut prefs = self.load();
        apply(&mut prefs);
        self.store(&prefs);
    }
}
