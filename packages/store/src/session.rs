//! # Session lifecycle
//!
//! [`SessionStore`] owns the authenticated identity + credential pair. It is
//! generic over [`PrefStore`] (where the token is persisted) and takes the
//! [`RemoteApi`] per call, so the same code runs against the HTTP client in
//! the app and against [`crate::MemoryApi`] in tests.
//!
//! Lifecycle rules:
//!
//! - `restore` validates a previously persisted token against the identity
//!   endpoint. Any failure, network or rejection, silently demotes to
//!   unauthenticated and clears the persisted token; the user just sees the
//!   login screen.
//! - `login`/`register` exchange credentials for a token, persist it, and
//!   install it as the ambient credential on the client.
//! - `logout` is synchronous and idempotent: it clears the ambient
//!   credential and the persisted token, nothing else. Callers are
//!   responsible for wiping their caches at the same time; cached resources
//!   must never be shown after logout.

use crate::error::ApiError;
use crate::models::{Credentials, Identity, NewIdentity};
use crate::prefs::PrefStore;
use crate::remote::RemoteApi;

/// The authenticated identity and the bearer token that proves it.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub identity: Identity,
    pub token: String,
}

pub struct SessionStore<P: PrefStore> {
    prefs: P,
}

impl<P: PrefStore> SessionStore<P> {
    pub fn new(prefs: P) -> Self {
        Self { prefs }
    }

    /// Revive a session from a persisted token, if one exists and the
    /// backend still accepts it. Never surfaces an error.
    pub async fn restore<A: RemoteApi>(&self, api: &A) -> Option<Session> {
        let token = self.prefs.load().token?;
        api.set_credential(Some(&token));
        match api.current_user().await {
            Ok(identity) => Some(Session { identity, token }),
            Err(_) => {
                api.set_credential(None);
                self.prefs.update(|p| p.token = None);
                None
            }
        }
    }

    pub async fn login<A: RemoteApi>(
        &self,
        api: &A,
        credentials: &Credentials,
    ) -> Result<Session, ApiError> {
        let auth = api.login(credentials).await?;
        self.prefs.update(|p| p.token = Some(auth.access_token.clone()));
        api.set_credential(Some(&auth.access_token));
        Ok(Session {
            identity: auth.user,
            token: auth.access_token,
        })
    }

    pub async fn register<A: RemoteApi>(
        &self,
        api: &A,
        profile: &NewIdentity,
    ) -> Result<Session, ApiError> {
        let auth = api.register(profile).await?;
        self.prefs.update(|p| p.token = Some(auth.access_token.clone()));
        api.set_credential(Some(&auth.access_token));
        Ok(Session {
            identity: auth.user,
            token: auth.access_token,
        })
    }

    /// Drop the credential, remembered and ambient. Safe to call with no
    /// session active.
    pub fn logout<A: RemoteApi>(&self, api: &A) {
        api.set_credential(None);
        self.prefs.update(|p| p.token = None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Caches;
    use crate::memory::{MemoryApi, MemoryPrefs};

    fn store_and_api() -> (SessionStore<MemoryPrefs>, MemoryApi) {
        let api = MemoryApi::new();
        api.seed_user("Ada", "ada@example.com", "hunter22", "Manager");
        (SessionStore::new(MemoryPrefs::new()), api)
    }

    #[tokio::test]
    async fn restore_without_a_stored_token_makes_no_calls() {
        let (store, api) = store_and_api();
        assert!(store.restore(&api).await.is_none());
        assert_eq!(api.total_calls(), 0);
    }

    #[tokio::test]
    async fn login_persists_a_token_that_restore_accepts() {
        let (store, api) = store_and_api();
        let credentials = Credentials {
            email: "ada@example.com".into(),
            password: "hunter22".into(),
        };
        let session = store.login(&api, &credentials).await.unwrap();
        assert_eq!(session.identity.name, "Ada");

        let restored = store.restore(&api).await.unwrap();
        assert_eq!(restored.identity, session.identity);
        assert_eq!(restored.token, session.token);
    }

    #[tokio::test]
    async fn bad_credentials_surface_the_server_reason() {
        let (store, api) = store_and_api();
        let credentials = Credentials {
            email: "ada@example.com".into(),
            password: "wrong".into(),
        };
        let err = store.login(&api, &credentials).await.unwrap_err();
        assert_eq!(err, ApiError::Auth("Incorrect email or password".into()));
        // Nothing was persisted.
        assert!(store.restore(&api).await.is_none());
    }

    #[tokio::test]
    async fn rejected_stored_token_is_cleared_silently() {
        let (store, api) = store_and_api();
        store.prefs.update(|p| p.token = Some("stale-token".into()));

        assert!(store.restore(&api).await.is_none());
        // The second restore does not even try the network.
        let calls_before = api.total_calls();
        assert!(store.restore(&api).await.is_none());
        assert_eq!(api.total_calls(), calls_before);
    }

    #[tokio::test]
    async fn unreachable_backend_also_demotes_and_clears() {
        let (store, api) = store_and_api();
        let credentials = Credentials {
            email: "ada@example.com".into(),
            password: "hunter22".into(),
        };
        store.login(&api, &credentials).await.unwrap();

        api.set_offline(true);
        assert!(store.restore(&api).await.is_none());

        // Back online, the token is gone for good.
        api.set_offline(false);
        assert!(store.restore(&api).await.is_none());
    }

    #[tokio::test]
    async fn logout_then_restore_yields_empty_everything() {
        let (store, api) = store_and_api();
        let credentials = Credentials {
            email: "ada@example.com".into(),
            password: "hunter22".into(),
        };
        store.login(&api, &credentials).await.unwrap();

        let mut caches = Caches::new();
        caches.notifications.upsert(crate::models::Notification {
            id: "n1".into(),
            kind: crate::models::NotificationKind::Other,
            title: "t".into(),
            message: "m".into(),
            read: false,
            created_at: chrono::Utc::now(),
        });

        store.logout(&api);
        caches.clear_all();
        // Idempotent.
        store.logout(&api);

        assert!(store.restore(&api).await.is_none());
        assert!(caches.is_empty());
        // The ambient credential is gone too: an authed call now fails.
        assert!(api.current_user().await.unwrap_err().is_auth());
    }
}
