//! # Actions: one user intent = one remote call + one cache reconciliation
//!
//! Every function here is the single implementation of an intent, shared by
//! the UI (which backs [`StateCell`] with a signal) and by the tests (which
//! back it with `Rc<RefCell<_>>`). The rules:
//!
//! - **Refreshes** are token-guarded: a response is applied only if its
//!   [`RequestToken`] is still the latest issued for its scope, so
//!   overlapping refreshes cannot resurrect stale listings. A failed
//!   refresh leaves the stale cache in place for the caller to keep
//!   showing.
//! - **Status moves** patch the cache before the remote call resolves and
//!   roll back to the previous status on failure, so the board never
//!   settles on a state the backend rejected.
//! - **Creates, edits, and deletes** reconcile after success only.
//! - **Local gates** (ownership, authorship, validation, same-column
//!   drops) refuse before any network traffic happens.

use crate::board::{self, MovePlan};
use crate::cache::{Caches, RequestToken, StateCell};
use crate::comments;
use crate::error::ApiError;
use crate::models::{
    Comment, FileAttachment, Identity, NewComment, NewFile, NewProject, NewTask, Project, Task,
    TaskStatus,
};
use crate::policy;
use crate::remote::RemoteApi;

const PROJECTS_SCOPE: &str = "projects";
const USERS_SCOPE: &str = "users";
const NOTIFICATIONS_SCOPE: &str = "notifications";

fn tasks_scope(project_id: &str) -> String {
    format!("tasks:{project_id}")
}

fn comments_scope(task_id: &str) -> String {
    format!("comments:{task_id}")
}

fn files_scope(task_id: &str) -> String {
    format!("files:{task_id}")
}

fn update<C: StateCell<Caches>>(state: &mut C, apply: impl FnOnce(&mut Caches)) {
    let mut caches = state.get();
    apply(&mut caches);
    state.set(caches);
}

/// Stamp the start of a refresh, invalidating earlier in-flight refreshes
/// of the same scope.
fn begin<C: StateCell<Caches>>(state: &mut C, scope: &str) -> RequestToken {
    let mut caches = state.get();
    let token = caches.tokens.issue(scope);
    state.set(caches);
    token
}

/// Adopt a task listing unless a newer refresh of the scope has started.
/// Returns false when the response was dropped as stale.
fn apply_tasks<C: StateCell<Caches>>(
    state: &mut C,
    token: &RequestToken,
    tasks: Vec<Task>,
) -> bool {
    let mut caches = state.get();
    let current = caches.tokens.is_current(token);
    if current {
        caches.tasks.replace_all(tasks);
        state.set(caches);
    }
    current
}

pub async fn refresh_projects<A: RemoteApi, C: StateCell<Caches>>(
    api: &A,
    state: &mut C,
) -> Result<(), ApiError> {
    let token = begin(state, PROJECTS_SCOPE);
    let projects = api.list_projects().await?;
    update(state, |c| {
        if c.tokens.is_current(&token) {
            c.projects.replace_all(projects);
        }
    });
    Ok(())
}

pub async fn refresh_users<A: RemoteApi, C: StateCell<Caches>>(
    api: &A,
    state: &mut C,
) -> Result<(), ApiError> {
    let token = begin(state, USERS_SCOPE);
    let users = api.list_users().await?;
    update(state, |c| {
        if c.tokens.is_current(&token) {
            c.users.replace_all(users);
        }
    });
    Ok(())
}

pub async fn refresh_tasks<A: RemoteApi, C: StateCell<Caches>>(
    api: &A,
    state: &mut C,
    project_id: &str,
) -> Result<(), ApiError> {
    let token = begin(state, &tasks_scope(project_id));
    let tasks = api.list_tasks(project_id).await?;
    apply_tasks(state, &token, tasks);
    Ok(())
}

pub async fn refresh_comments<A: RemoteApi, C: StateCell<Caches>>(
    api: &A,
    state: &mut C,
    task_id: &str,
) -> Result<(), ApiError> {
    let token = begin(state, &comments_scope(task_id));
    let listing = api.list_comments(task_id).await?;
    update(state, |c| {
        if c.tokens.is_current(&token) {
            c.comments.replace_all(listing);
        }
    });
    Ok(())
}

pub async fn refresh_files<A: RemoteApi, C: StateCell<Caches>>(
    api: &A,
    state: &mut C,
    task_id: &str,
) -> Result<(), ApiError> {
    let token = begin(state, &files_scope(task_id));
    let listing = api.list_files(task_id).await?;
    update(state, |c| {
        if c.tokens.is_current(&token) {
            c.files.replace_all(listing);
        }
    });
    Ok(())
}

pub async fn refresh_notifications<A: RemoteApi, C: StateCell<Caches>>(
    api: &A,
    state: &mut C,
) -> Result<(), ApiError> {
    let token = begin(state, NOTIFICATIONS_SCOPE);
    let listing = api.list_notifications().await?;
    update(state, |c| {
        if c.tokens.is_current(&token) {
            c.notifications.replace_all(listing);
        }
    });
    Ok(())
}

pub async fn create_project<A: RemoteApi, C: StateCell<Caches>>(
    api: &A,
    state: &mut C,
    draft: &NewProject,
) -> Result<Project, ApiError> {
    draft.validate()?;
    let project = api.create_project(draft).await?;
    update(state, |c| c.projects.upsert(project.clone()));
    Ok(project)
}

/// Owner-gated. Refuses locally with an explanation when the active
/// identity does not own the task's project; the backend may still refuse
/// independently if the local ownership data was stale.
pub async fn create_task<A: RemoteApi, C: StateCell<Caches>>(
    api: &A,
    state: &mut C,
    identity: &Identity,
    draft: &NewTask,
) -> Result<Task, ApiError> {
    let project = state
        .get()
        .projects
        .get(&draft.project_id)
        .cloned()
        .ok_or_else(|| ApiError::Validation("Select a project first".into()))?;
    policy::require_owner(identity, &project, "create tasks")?;
    draft.validate()?;

    let task = api.create_task(draft).await?;
    update(state, |c| c.tasks.upsert(task.clone()));
    Ok(task)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    /// Dropped onto the column it was already in; nothing was sent.
    SameColumn,
}

/// Move a task between columns. The cache is patched before the call so the
/// board reflects the drop immediately; a failed call restores the previous
/// status and returns the error for the caller to surface.
pub async fn move_task<A: RemoteApi, C: StateCell<Caches>>(
    api: &A,
    state: &mut C,
    task_id: &str,
    target: TaskStatus,
) -> Result<MoveOutcome, ApiError> {
    let task = state
        .get()
        .tasks
        .get(task_id)
        .cloned()
        .ok_or_else(|| ApiError::Validation("That task is no longer on the board".into()))?;
    let MovePlan::Move { previous } = board::plan_move(&task, target) else {
        return Ok(MoveOutcome::SameColumn);
    };

    update(state, |c| {
        c.tasks.patch(task_id, |t| t.status = target.as_str().to_string());
    });

    match api.update_task_status(task_id, target).await {
        Ok(updated) => {
            update(state, |c| c.tasks.upsert(updated));
            Ok(MoveOutcome::Moved)
        }
        Err(err) => {
            update(state, |c| {
                c.tasks.patch(task_id, |t| t.status = previous);
            });
            Err(err)
        }
    }
}

pub async fn delete_task<A: RemoteApi, C: StateCell<Caches>>(
    api: &A,
    state: &mut C,
    task_id: &str,
) -> Result<(), ApiError> {
    api.delete_task(task_id).await?;
    update(state, |c| {
        c.tasks.remove(task_id);
        c.comments.retain(|x| x.task_id != task_id);
        c.files.retain(|f| f.task_id != task_id);
    });
    Ok(())
}

/// Owner-gated, like [`create_task`].
pub async fn update_members<A: RemoteApi, C: StateCell<Caches>>(
    api: &A,
    state: &mut C,
    identity: &Identity,
    project_id: &str,
    member_ids: Vec<String>,
) -> Result<Project, ApiError> {
    let project = state
        .get()
        .projects
        .get(project_id)
        .cloned()
        .ok_or_else(|| ApiError::Validation("Select a project first".into()))?;
    policy::require_owner(identity, &project, "manage the team")?;

    let updated = api.update_project_members(project_id, &member_ids).await?;
    update(state, |c| c.projects.upsert(updated.clone()));
    Ok(updated)
}

/// Post a comment, optionally as a reply. Replying to a reply is flattened
/// onto the thread's top-level comment.
pub async fn add_comment<A: RemoteApi, C: StateCell<Caches>>(
    api: &A,
    state: &mut C,
    task_id: &str,
    content: &str,
    reply_to: Option<&str>,
) -> Result<Comment, ApiError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(ApiError::Validation("Comment cannot be empty".into()));
    }
    let parent_id = match reply_to {
        Some(target) => Some(
            comments::resolve_parent(state.get().comments.items(), target).ok_or_else(|| {
                ApiError::Validation("The comment you are replying to no longer exists".into())
            })?,
        ),
        None => None,
    };

    let draft = NewComment {
        task_id: task_id.to_string(),
        content: content.to_string(),
        parent_id,
    };
    let comment = api.create_comment(&draft).await?;
    update(state, |c| c.comments.upsert(comment.clone()));
    Ok(comment)
}

/// Author-gated.
pub async fn edit_comment<A: RemoteApi, C: StateCell<Caches>>(
    api: &A,
    state: &mut C,
    identity: &Identity,
    comment_id: &str,
    content: &str,
) -> Result<Comment, ApiError> {
    let existing = state
        .get()
        .comments
        .get(comment_id)
        .cloned()
        .ok_or_else(|| ApiError::Validation("That comment no longer exists".into()))?;
    if !comments::can_modify(identity, &existing) {
        return Err(ApiError::Forbidden(
            "You can only edit your own comments".into(),
        ));
    }
    let content = content.trim();
    if content.is_empty() {
        return Err(ApiError::Validation("Comment cannot be empty".into()));
    }

    let updated = api.update_comment(comment_id, content).await?;
    update(state, |c| c.comments.upsert(updated.clone()));
    Ok(updated)
}

/// Author-gated. Replies to the deleted comment are dropped locally as
/// well, matching the backend's cascade.
pub async fn delete_comment<A: RemoteApi, C: StateCell<Caches>>(
    api: &A,
    state: &mut C,
    identity: &Identity,
    comment_id: &str,
) -> Result<(), ApiError> {
    let existing = state
        .get()
        .comments
        .get(comment_id)
        .cloned()
        .ok_or_else(|| ApiError::Validation("That comment no longer exists".into()))?;
    if !comments::can_modify(identity, &existing) {
        return Err(ApiError::Forbidden(
            "You can only delete your own comments".into(),
        ));
    }

    api.delete_comment(comment_id).await?;
    update(state, |c| {
        c.comments
            .retain(|x| x.id != comment_id && x.parent_id.as_deref() != Some(comment_id));
    });
    Ok(())
}

/// Size- and field-validated locally; an oversized attachment never reaches
/// the wire.
pub async fn upload_file<A: RemoteApi, C: StateCell<Caches>>(
    api: &A,
    state: &mut C,
    draft: &NewFile,
) -> Result<FileAttachment, ApiError> {
    draft.validate()?;
    let file = api.upload_file(draft).await?;
    update(state, |c| c.files.upsert(file.clone()));
    Ok(file)
}

pub async fn delete_file<A: RemoteApi, C: StateCell<Caches>>(
    api: &A,
    state: &mut C,
    file_id: &str,
) -> Result<(), ApiError> {
    api.delete_file(file_id).await?;
    update(state, |c| {
        c.files.remove(file_id);
    });
    Ok(())
}

/// Flip one notification to read. Already-read notifications are left
/// alone without a remote call, so the unread count can only go down.
pub async fn mark_notification_read<A: RemoteApi, C: StateCell<Caches>>(
    api: &A,
    state: &mut C,
    id: &str,
) -> Result<(), ApiError> {
    let already_read = state.get().notifications.get(id).map(|n| n.read);
    if already_read != Some(false) {
        return Ok(());
    }
    let updated = api.mark_notification_read(id).await?;
    update(state, |c| c.notifications.upsert(updated));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::memory::{MemoryApi, MemoryPrefs};
    use crate::models::Credentials;
    use crate::session::{Session, SessionStore};

    type State = Rc<RefCell<Caches>>;

    async fn sign_in(api: &MemoryApi, email: &str) -> Session {
        let store = SessionStore::new(MemoryPrefs::new());
        let credentials = Credentials {
            email: email.into(),
            password: "pw".into(),
        };
        store.login(api, &credentials).await.unwrap()
    }

    /// One owner signed in, one project cached.
    async fn owner_board() -> (MemoryApi, Identity, Project, State) {
        let api = MemoryApi::new();
        let owner = api.seed_user("Ada", "ada@example.com", "pw", "Manager");
        let project = api.seed_project(&owner.id, "Launch", &[]);
        let session = sign_in(&api, "ada@example.com").await;
        let mut state: State = Rc::new(RefCell::new(Caches::new()));
        refresh_projects(&api, &mut state).await.unwrap();
        (api, session.identity, project, state)
    }

    #[tokio::test]
    async fn refresh_keeps_server_order() {
        let (api, _, project, mut state) = owner_board().await;
        api.seed_task(&project.id, "first", "To Do");
        api.seed_task(&project.id, "second", "Done");
        api.seed_task(&project.id, "third", "To Do");

        refresh_tasks(&api, &mut state, &project.id).await.unwrap();
        let titles: Vec<String> = state
            .borrow()
            .tasks
            .items()
            .iter()
            .map(|t| t.title.clone())
            .collect();
        assert_eq!(titles, ["first", "second", "third"]);
    }

    #[tokio::test]
    async fn stale_refresh_response_is_dropped() {
        let (api, _, project, mut state) = owner_board().await;
        api.seed_task(&project.id, "old", "To Do");

        // A refresh starts and its response is captured, still unapplied.
        let first = begin(&mut state, &tasks_scope(&project.id));
        let first_payload = api.list_tasks(&project.id).await.unwrap();

        // A second refresh starts later and completes first.
        api.seed_task(&project.id, "new", "To Do");
        refresh_tasks(&api, &mut state, &project.id).await.unwrap();
        assert_eq!(state.borrow().tasks.len(), 2);

        // The late response from the first refresh must not clobber it.
        assert!(!apply_tasks(&mut state, &first, first_payload));
        assert_eq!(state.borrow().tasks.len(), 2);
    }

    #[tokio::test]
    async fn failed_refresh_retains_the_stale_cache() {
        let (api, _, project, mut state) = owner_board().await;
        api.seed_task(&project.id, "cached", "To Do");
        refresh_tasks(&api, &mut state, &project.id).await.unwrap();

        api.set_offline(true);
        let err = refresh_tasks(&api, &mut state, &project.id)
            .await
            .unwrap_err();
        assert!(err.is_transport());
        assert_eq!(state.borrow().tasks.len(), 1);
        assert_eq!(state.borrow().tasks.items()[0].title, "cached");
    }

    /// Records every intermediate value the action writes, so the
    /// optimistic patch itself is observable.
    struct RecordingCell {
        inner: State,
        task_id: String,
        statuses: Vec<String>,
    }

    impl StateCell<Caches> for RecordingCell {
        fn get(&self) -> Caches {
            self.inner.borrow().clone()
        }

        fn set(&mut self, value: Caches) {
            if let Some(task) = value.tasks.get(&self.task_id) {
                self.statuses.push(task.status.clone());
            }
            *self.inner.borrow_mut() = value;
        }
    }

    #[tokio::test]
    async fn move_patches_before_the_call_and_confirms_after() {
        let (api, _, project, mut state) = owner_board().await;
        let task = api.seed_task(&project.id, "ship it", "To Do");
        refresh_tasks(&api, &mut state, &project.id).await.unwrap();

        let mut recorder = RecordingCell {
            inner: state,
            task_id: task.id.clone(),
            statuses: Vec::new(),
        };
        let outcome = move_task(&api, &mut recorder, &task.id, TaskStatus::Done)
            .await
            .unwrap();

        assert_eq!(outcome, MoveOutcome::Moved);
        // First write is the optimistic patch, second the confirmation.
        assert_eq!(recorder.statuses, ["Done", "Done"]);
        assert_eq!(api.task(&task.id).unwrap().status, "Done");
    }

    #[tokio::test]
    async fn failed_move_rolls_back_to_the_previous_column() {
        let (api, _, project, mut state) = owner_board().await;
        let task = api.seed_task(&project.id, "ship it", "To Do");
        refresh_tasks(&api, &mut state, &project.id).await.unwrap();

        api.set_offline(true);
        let mut recorder = RecordingCell {
            inner: state,
            task_id: task.id.clone(),
            statuses: Vec::new(),
        };
        let err = move_task(&api, &mut recorder, &task.id, TaskStatus::Done)
            .await
            .unwrap_err();

        assert!(err.is_transport());
        assert_eq!(recorder.statuses, ["Done", "To Do"]);
        let state = recorder.inner;
        let columns = board::partition(state.borrow().tasks.items());
        assert_eq!(columns.todo.len(), 1);
        assert!(columns.done.is_empty());
    }

    #[tokio::test]
    async fn board_settles_on_the_last_successful_update() {
        let (api, _, project, mut state) = owner_board().await;
        let task = api.seed_task(&project.id, "ship it", "To Do");
        refresh_tasks(&api, &mut state, &project.id).await.unwrap();

        move_task(&api, &mut state, &task.id, TaskStatus::InProgress)
            .await
            .unwrap();
        api.set_offline(true);
        move_task(&api, &mut state, &task.id, TaskStatus::Done)
            .await
            .unwrap_err();

        let cached = state.borrow().tasks.get(&task.id).unwrap().clone();
        assert_eq!(cached.status, "In Progress");
        assert_eq!(api.task(&task.id).unwrap().status, "In Progress");
    }

    #[tokio::test]
    async fn same_column_drop_sends_nothing() {
        let (api, _, project, mut state) = owner_board().await;
        let task = api.seed_task(&project.id, "ship it", "In Progress");
        refresh_tasks(&api, &mut state, &project.id).await.unwrap();

        let outcome = move_task(&api, &mut state, &task.id, TaskStatus::InProgress)
            .await
            .unwrap();
        assert_eq!(outcome, MoveOutcome::SameColumn);
        assert_eq!(api.calls("update_task_status"), 0);
    }

    #[tokio::test]
    async fn unrecognized_status_stays_cached_but_unbucketed() {
        let (api, _, project, mut state) = owner_board().await;
        api.seed_task(&project.id, "mystery", "Blocked");
        refresh_tasks(&api, &mut state, &project.id).await.unwrap();

        assert_eq!(state.borrow().tasks.len(), 1);
        let columns = board::partition(state.borrow().tasks.items());
        assert!(columns.todo.is_empty());
        assert!(columns.in_progress.is_empty());
        assert!(columns.done.is_empty());
    }

    #[tokio::test]
    async fn non_owner_create_task_is_refused_without_a_call() {
        let api = MemoryApi::new();
        let owner = api.seed_user("Ada", "ada@example.com", "pw", "Manager");
        let member = api.seed_user("Bob", "bob@example.com", "pw", "Team Member");
        let project = api.seed_project(&owner.id, "Launch", &[&member.id]);

        let session = sign_in(&api, "bob@example.com").await;
        let mut state: State = Rc::new(RefCell::new(Caches::new()));
        refresh_projects(&api, &mut state).await.unwrap();

        let draft = NewTask::new(&project.id, "sneaky");
        let err = create_task(&api, &mut state, &session.identity, &draft)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Forbidden("Only the project owner can create tasks".into())
        );
        assert_eq!(api.calls("create_task"), 0);

        let err = update_members(&api, &mut state, &session.identity, &project.id, vec![])
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Forbidden("Only the project owner can manage the team".into())
        );
        assert_eq!(api.calls("update_project_members"), 0);
    }

    #[tokio::test]
    async fn stale_local_ownership_is_still_refused_remotely() {
        let api = MemoryApi::new();
        let owner = api.seed_user("Ada", "ada@example.com", "pw", "Manager");
        let member = api.seed_user("Bob", "bob@example.com", "pw", "Team Member");
        let project = api.seed_project(&owner.id, "Launch", &[&member.id]);

        let session = sign_in(&api, "bob@example.com").await;
        let mut state: State = Rc::new(RefCell::new(Caches::new()));
        refresh_projects(&api, &mut state).await.unwrap();

        // Local cache wrongly believes Bob owns the project.
        state
            .borrow_mut()
            .projects
            .patch(&project.id, |p| p.owner_id = session.identity.id.clone());

        let draft = NewTask::new(&project.id, "sneaky");
        let err = create_task(&api, &mut state, &session.identity, &draft)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
        assert_eq!(api.calls("create_task"), 1);
        assert!(state.borrow().tasks.is_empty());
    }

    #[tokio::test]
    async fn exactly_ten_mib_uploads_but_one_byte_more_stays_local() {
        let (api, _, project, mut state) = owner_board().await;
        let task = api.seed_task(&project.id, "ship it", "To Do");

        let mut draft = NewFile {
            task_id: task.id.clone(),
            filename: "dump.bin".into(),
            content_type: "application/octet-stream".into(),
            data: vec![0u8; crate::models::MAX_ATTACHMENT_BYTES],
        };
        let file = upload_file(&api, &mut state, &draft).await.unwrap();
        assert_eq!(file.size_bytes as usize, crate::models::MAX_ATTACHMENT_BYTES);
        assert_eq!(api.calls("upload_file"), 1);

        draft.data.push(0);
        let err = upload_file(&api, &mut state, &draft).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(api.calls("upload_file"), 1);
        assert_eq!(state.borrow().files.len(), 1);
    }

    #[tokio::test]
    async fn replying_to_a_reply_attaches_to_the_thread_root() {
        let (api, _, project, mut state) = owner_board().await;
        let task = api.seed_task(&project.id, "ship it", "To Do");

        let root = add_comment(&api, &mut state, &task.id, "first", None)
            .await
            .unwrap();
        let reply = add_comment(&api, &mut state, &task.id, "second", Some(&root.id))
            .await
            .unwrap();
        assert_eq!(reply.parent_id.as_deref(), Some(root.id.as_str()));

        // Reply to the reply: flattened, and accepted by the backend.
        let nested = add_comment(&api, &mut state, &task.id, "third", Some(&reply.id))
            .await
            .unwrap();
        assert_eq!(nested.parent_id.as_deref(), Some(root.id.as_str()));

        let grouped = comments::threads(state.borrow().comments.items());
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].replies.len(), 2);
    }

    #[tokio::test]
    async fn blank_comments_never_reach_the_wire() {
        let (api, _, project, mut state) = owner_board().await;
        let task = api.seed_task(&project.id, "ship it", "To Do");

        let err = add_comment(&api, &mut state, &task.id, "   ", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(api.calls("create_comment"), 0);
    }

    #[tokio::test]
    async fn foreign_comments_cannot_be_edited_or_deleted() {
        let api = MemoryApi::new();
        let owner = api.seed_user("Ada", "ada@example.com", "pw", "Manager");
        let bob = api.seed_user("Bob", "bob@example.com", "pw", "Team Member");
        let project = api.seed_project(&owner.id, "Launch", &[&bob.id]);
        let task = api.seed_task(&project.id, "ship it", "To Do");

        // Bob writes a comment.
        sign_in(&api, "bob@example.com").await;
        let mut state: State = Rc::new(RefCell::new(Caches::new()));
        let comment = add_comment(&api, &mut state, &task.id, "from bob", None)
            .await
            .unwrap();

        // Ada sees it but may not touch it.
        let ada = sign_in(&api, "ada@example.com").await;
        refresh_comments(&api, &mut state, &task.id).await.unwrap();

        let err = edit_comment(&api, &mut state, &ada.identity, &comment.id, "edited")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
        assert_eq!(api.calls("update_comment"), 0);

        let err = delete_comment(&api, &mut state, &ada.identity, &comment.id)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
        assert_eq!(api.calls("delete_comment"), 0);
    }

    #[tokio::test]
    async fn marking_read_decrements_once_and_never_again() {
        let (api, _, _, mut state) = owner_board().await;
        let n1 = api.seed_notification("assigned", false);
        api.seed_notification("due soon", false);

        refresh_notifications(&api, &mut state).await.unwrap();
        assert_eq!(state.borrow().notifications.unread_count(), 2);

        mark_notification_read(&api, &mut state, &n1.id).await.unwrap();
        assert_eq!(state.borrow().notifications.unread_count(), 1);

        // Second attempt is a local no-op.
        mark_notification_read(&api, &mut state, &n1.id).await.unwrap();
        assert_eq!(state.borrow().notifications.unread_count(), 1);
        assert_eq!(api.calls("mark_notification_read"), 1);

        // The locally computed count agrees with the backend's.
        assert_eq!(api.unread_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn notifications_arrive_most_recent_first() {
        let (api, _, _, mut state) = owner_board().await;
        api.seed_notification("older", false);
        api.seed_notification("newer", false);

        refresh_notifications(&api, &mut state).await.unwrap();
        let titles: Vec<String> = state
            .borrow()
            .notifications
            .items()
            .iter()
            .map(|n| n.title.clone())
            .collect();
        assert_eq!(titles, ["newer", "older"]);
    }

    #[tokio::test]
    async fn deleting_a_task_purges_its_comments_and_files() {
        let (api, _, project, mut state) = owner_board().await;
        let task = api.seed_task(&project.id, "ship it", "To Do");
        refresh_tasks(&api, &mut state, &project.id).await.unwrap();
        add_comment(&api, &mut state, &task.id, "note", None)
            .await
            .unwrap();
        let draft = NewFile {
            task_id: task.id.clone(),
            filename: "log.txt".into(),
            content_type: "text/plain".into(),
            data: vec![1, 2, 3],
        };
        upload_file(&api, &mut state, &draft).await.unwrap();

        delete_task(&api, &mut state, &task.id).await.unwrap();
        let caches = state.borrow();
        assert!(caches.tasks.is_empty());
        assert!(caches.comments.is_empty());
        assert!(caches.files.is_empty());
    }

    #[tokio::test]
    async fn created_project_is_cached_without_a_refresh() {
        let (api, _, _, mut state) = owner_board().await;
        let draft = NewProject {
            title: "Second".into(),
            description: String::new(),
        };
        let project = create_project(&api, &mut state, &draft).await.unwrap();

        assert!(state.borrow().projects.get(&project.id).is_some());
        assert_eq!(api.calls("list_projects"), 1);
    }
}
