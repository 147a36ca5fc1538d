//! # Local copies of the remote collections
//!
//! Each [`ResourceCache`] holds a possibly stale copy of one backend
//! collection. Items keep the order the server returned them in; the client
//! never re-sorts. Lookup is by id via the [`Keyed`] trait.
//!
//! [`ScopeTokens`] closes the lost-update race between overlapping
//! refreshes of the same scope: every refresh takes a monotonically
//! increasing token for its scope string, and a response is applied only if
//! its token is still the latest one issued. Without this, two rapid
//! refreshes of the same project could land out of order and resurrect stale
//! data.
//!
//! [`Caches`] bundles the per-resource caches with the token counters so the
//! UI can hold the whole thing in a single signal, and so logging out can
//! wipe everything at once. All of this is single-owner state on the UI
//! event loop; nothing here is shared across threads.

use std::collections::HashMap;

use crate::models::{Comment, FileAttachment, Identity, Notification, Project, Task};

/// Anything addressable by its server-issued id.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for Identity {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Project {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Task {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Comment {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for FileAttachment {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Notification {
    fn key(&self) -> &str {
        &self.id
    }
}

/// One locally materialized remote collection, in server response order.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceCache<T> {
    items: Vec<T>,
}

impl<T> Default for ResourceCache<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Keyed> ResourceCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard everything and adopt a fresh server listing.
    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
    }

    /// Insert or replace one item without a round trip. A replaced item
    /// keeps its position; a new one is appended.
    pub fn upsert(&mut self, item: T) {
        match self.items.iter_mut().find(|i| i.key() == item.key()) {
            Some(slot) => *slot = item,
            None => self.items.push(item),
        }
    }

    /// Update one cached item in place. Returns false if the id is unknown.
    pub fn patch(&mut self, id: &str, apply: impl FnOnce(&mut T)) -> bool {
        match self.items.iter_mut().find(|i| i.key() == id) {
            Some(item) => {
                apply(item);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.key() != id);
        self.items.len() != before
    }

    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) {
        self.items.retain(keep);
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|i| i.key() == id)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl ResourceCache<Notification> {
    /// How many cached notifications are still unread.
    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.read).count()
    }
}

/// Proof that a refresh was the latest one issued for its scope when its
/// response arrived.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestToken {
    scope: String,
    seq: u64,
}

/// Monotonically increasing refresh counters, one per scope string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScopeTokens {
    latest: HashMap<String, u64>,
}

impl ScopeTokens {
    /// Start a refresh for `scope`, invalidating every token issued for it
    /// earlier.
    pub fn issue(&mut self, scope: &str) -> RequestToken {
        let seq = self.latest.entry(scope.to_string()).or_insert(0);
        *seq += 1;
        RequestToken {
            scope: scope.to_string(),
            seq: *seq,
        }
    }

    /// Whether `token` is still the newest one issued for its scope.
    pub fn is_current(&self, token: &RequestToken) -> bool {
        self.latest.get(&token.scope).copied() == Some(token.seq)
    }
}

/// Everything the board holds locally, plus the refresh counters.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Caches {
    pub projects: ResourceCache<Project>,
    pub users: ResourceCache<Identity>,
    pub tasks: ResourceCache<Task>,
    pub comments: ResourceCache<Comment>,
    pub files: ResourceCache<FileAttachment>,
    pub notifications: ResourceCache<Notification>,
    pub tokens: ScopeTokens,
}

impl Caches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wipe every cache. Must run whenever the session ends: cached
    /// resources must never outlive the credential that fetched them.
    pub fn clear_all(&mut self) {
        self.projects.clear();
        self.users.clear();
        self.tasks.clear();
        self.comments.clear();
        self.files.clear();
        self.notifications.clear();
        self.tokens = ScopeTokens::default();
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
            && self.users.is_empty()
            && self.tasks.is_empty()
            && self.comments.is_empty()
            && self.files.is_empty()
            && self.notifications.is_empty()
    }
}

/// A slot the action layer can read a whole value out of and write it back
/// into. The UI backs this with a reactive signal; tests back it with
/// `Rc<RefCell<_>>`. Implementations must not hold any borrow between the
/// two calls, so a `get`/`set` pair may safely straddle an await point on a
/// cooperative event loop.
pub trait StateCell<T> {
    fn get(&self) -> T;
    fn set(&mut self, value: T);
}

impl<T: Clone> StateCell<T> for std::rc::Rc<std::cell::RefCell<T>> {
    fn get(&self) -> T {
        self.borrow().clone()
    }

    fn set(&mut self, value: T) {
        *self.borrow_mut() = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::models::NotificationKind;

    fn task(id: &str, status: &str) -> Task {
        Task {
            id: id.into(),
            project_id: "p1".into(),
            title: format!("task {id}"),
            description: String::new(),
            status: status.into(),
            due_date: None,
            assignee_id: None,
            created_by: "u1".into(),
            created_at: Utc::now(),
        }
    }

    fn notification(id: &str, read: bool) -> Notification {
        Notification {
            id: id.into(),
            kind: NotificationKind::Comment,
            title: "title".into(),
            message: "message".into(),
            read,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn server_order_is_preserved_across_upserts() {
        let mut cache = ResourceCache::new();
        cache.replace_all(vec![task("b", "To Do"), task("a", "To Do"), task("c", "Done")]);

        // Replacing an existing item must not move it.
        cache.upsert(task("a", "In Progress"));
        let ids: Vec<&str> = cache.items().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["b", "a", "c"]);
        assert_eq!(cache.get("a").unwrap().status, "In Progress");

        // New items are appended.
        cache.upsert(task("d", "To Do"));
        assert_eq!(cache.items().last().unwrap().id, "d");
    }

    #[test]
    fn patch_reports_unknown_ids() {
        let mut cache = ResourceCache::new();
        cache.replace_all(vec![task("a", "To Do")]);

        assert!(cache.patch("a", |t| t.status = "Done".into()));
        assert!(!cache.patch("missing", |t| t.status = "Done".into()));
        assert_eq!(cache.get("a").unwrap().status, "Done");
    }

    #[test]
    fn newer_token_invalidates_older_ones() {
        let mut tokens = ScopeTokens::default();
        let first = tokens.issue("tasks:p1");
        let second = tokens.issue("tasks:p1");
        let other_scope = tokens.issue("tasks:p2");

        assert!(!tokens.is_current(&first));
        assert!(tokens.is_current(&second));
        // Scopes do not interfere with each other.
        assert!(tokens.is_current(&other_scope));
    }

    #[test]
    fn unread_count_only_counts_unread() {
        let mut cache = ResourceCache::new();
        cache.replace_all(vec![
            notification("n1", false),
            notification("n2", true),
            notification("n3", false),
        ]);
        assert_eq!(cache.unread_count(), 2);

        cache.patch("n1", |n| n.read = true);
        assert_eq!(cache.unread_count(), 1);
    }

    #[test]
    fn clear_all_empties_every_cache() {
        let mut caches = Caches::new();
        caches.tasks.upsert(task("a", "To Do"));
        caches.notifications.upsert(notification("n1", false));
        caches.tokens.issue("projects");

        caches.clear_all();
        assert!(caches.is_empty());
    }
}
