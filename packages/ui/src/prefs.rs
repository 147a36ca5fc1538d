//! Platform-appropriate preference storage.
//!
//! Returns a [`store::PrefStore`] backed by:
//! - **Web** (WASM + `web` feature): `window.localStorage`
//! - **Native** (tests, dev tools): a TOML file under the platform data dir

pub fn make_prefs() -> impl store::PrefStore {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::BrowserPrefs::new()
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("taskflow");
        store::FilePrefs::new(base)
    }
}
