//! Filesystem-backed preference store for native targets.
//!
//! Persists the token/theme pair as a small TOML file, usually under the
//! platform data directory (the caller resolves the base path). Reads and
//! writes swallow their own errors: an unreadable file means "nothing
//! remembered".

use std::path::PathBuf;

use crate::prefs::{PrefStore, StoredPrefs};

#[derive(Clone, Debug)]
pub struct FilePrefs {
    path: PathBuf,
}

impl FilePrefs {
    pub fn new(base: PathBuf) -> Self {
        Self {
            path: base.join("prefs.toml"),
        }
    }
}

impl PrefStore for FilePrefs {
    fn load(&self) -> StoredPrefs {
        std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|raw| toml::from_str(&raw).ok())
            .unwrap_or_default()
    }

    fn store(&self, prefs: &StoredPrefs) {
        if let Some(parent) = self.path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Ok(raw) = toml::to_string_pretty(prefs) {
            let _ = std::fs::write(&self.path, raw);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_disk() {
        let dir = std::env::temp_dir().join(format!("taskflow_test_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let prefs = FilePrefs::new(dir.clone());
        assert_eq!(prefs.load(), StoredPrefs::default());

        prefs.update(|p| {
            p.token = Some("token-1".into());
            p.theme = Some("dark".into());
        });

        // Re-open from the same directory.
        let reopened = FilePrefs::new(dir.clone());
        let loaded = reopened.load();
        assert_eq!(loaded.token.as_deref(), Some("token-1"));
        assert_eq!(loaded.theme.as_deref(), Some("dark"));

        reopened.update(|p| p.token = None);
        assert_eq!(reopened.load().token, None);
        assert_eq!(reopened.load().theme.as_deref(), Some("dark"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
