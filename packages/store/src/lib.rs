//! # Headless client core for TaskFlow
//!
//! Everything the app knows that is not pixels: domain models, the seam to
//! the backend ([`RemoteApi`]), session lifecycle, the local caches with
//! their refresh-sequencing discipline, board partitioning, ownership and
//! authorship gates, comment threading, dashboard aggregates, and the
//! action layer that ties a remote call to its cache reconciliation.
//!
//! Nothing in this crate depends on a UI framework or on a concrete
//! transport, so the whole synchronization contract is exercised by plain
//! `#[tokio::test]` suites against [`MemoryApi`].

pub mod actions;
pub mod board;
pub mod cache;
pub mod comments;
pub mod error;
pub mod models;
pub mod policy;
pub mod prefs;
pub mod remote;
pub mod session;
pub mod stats;

mod memory;
pub use memory::{MemoryApi, MemoryPrefs};

#[cfg(not(target_arch = "wasm32"))]
mod file_prefs;
#[cfg(not(target_arch = "wasm32"))]
pub use file_prefs::FilePrefs;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod browser;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use browser::BrowserPrefs;

pub use cache::{Caches, Keyed, RequestToken, ResourceCache, ScopeTokens, StateCell};
pub use error::ApiError;
pub use models::{
    AuthToken, Comment, Credentials, FileAttachment, Identity, NewComment, NewFile, NewIdentity,
    NewProject, NewTask, Notification, NotificationKind, Project, Task, TaskStatus,
    MAX_ATTACHMENT_BYTES,
};
pub use prefs::{PrefStore, StoredPrefs};
pub use remote::RemoteApi;
pub use session::{Session, SessionStore};
