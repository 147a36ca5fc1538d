//! In-memory backends for tests and offline development.
//!
//! [`MemoryApi`] is a small stand-in for the real backend: it mints ids and
//! tokens, enforces the same ownership and nesting rules the server does,
//! and can be switched "offline" to exercise the transport failure paths.
//! [`MemoryPrefs`] is the matching [`PrefStore`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::error::ApiError;
use crate::models::{
    AuthToken, Comment, Credentials, FileAttachment, Identity, NewComment, NewFile, NewIdentity,
    NewProject, NewTask, Notification, NotificationKind, Project, Task, TaskStatus,
    MAX_ATTACHMENT_BYTES,
};
use crate::prefs::{PrefStore, StoredPrefs};
use crate::remote::RemoteApi;

/// In-memory preference store.
#[derive(Clone, Debug, Default)]
pub struct MemoryPrefs {
    prefs: Arc<Mutex<StoredPrefs>>,
}

impl MemoryPrefs {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PrefStore for MemoryPrefs {
    fn load(&self) -> StoredPrefs {
        self.prefs.lock().unwrap().clone()
    }

    fn store(&self, prefs: &StoredPrefs) {
        *self.prefs.lock().unwrap() = prefs.clone();
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    users: Vec<(Identity, String)>,
    tokens: HashMap<String, String>,
    projects: Vec<Project>,
    tasks: Vec<Task>,
    comments: Vec<Comment>,
    files: Vec<FileAttachment>,
    notifications: Vec<Notification>,
    credential: Option<String>,
    offline: bool,
    next_id: u64,
    calls: HashMap<&'static str, usize>,
}

impl MemoryState {
    fn mint(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }

    fn authed(&self) -> Result<Identity, ApiError> {
        let token = self
            .credential
            .as_ref()
            .ok_or_else(|| ApiError::Auth("Could not validate credentials".into()))?;
        let user_id = self
            .tokens
            .get(token)
            .ok_or_else(|| ApiError::Auth("Could not validate credentials".into()))?;
        self.users
            .iter()
            .find(|(u, _)| u.id == *user_id)
            .map(|(u, _)| u.clone())
            .ok_or_else(|| ApiError::Auth("Could not validate credentials".into()))
    }

    fn accessible(&self, user: &Identity, project_id: &str) -> Result<Project, ApiError> {
        self.projects
            .iter()
            .find(|p| {
                p.id == project_id
                    && (p.owner_id == user.id || p.member_ids.iter().any(|m| *m == user.id))
            })
            .cloned()
            .ok_or_else(|| ApiError::Server {
                status: 404,
                message: "Project not found".into(),
            })
    }
}

/// In-memory backend stand-in.
#[derive(Clone, Debug, Default)]
pub struct MemoryApi {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with a network error.
    pub fn set_offline(&self, offline: bool) {
        self.state.lock().unwrap().offline = offline;
    }

    /// How many times a given remote operation was invoked.
    pub fn calls(&self, method: &'static str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .get(method)
            .copied()
            .unwrap_or(0)
    }

    /// Total remote invocations across all operations.
    pub fn total_calls(&self) -> usize {
        self.state.lock().unwrap().calls.values().sum()
    }

    pub fn seed_user(&self, name: &str, email: &str, password: &str, role: &str) -> Identity {
        let mut state = self.state.lock().unwrap();
        let user = Identity {
            id: state.mint("user"),
            name: name.into(),
            email: email.into(),
            role: role.into(),
        };
        state.users.push((user.clone(), password.into()));
        user
    }

    pub fn seed_project(&self, owner_id: &str, title: &str, member_ids: &[&str]) -> Project {
        let mut state = self.state.lock().unwrap();
        let project = Project {
            id: state.mint("project"),
            title: title.into(),
            description: String::new(),
            owner_id: owner_id.into(),
            member_ids: member_ids.iter().map(|m| m.to_string()).collect(),
            created_at: Utc::now(),
        };
        state.projects.push(project.clone());
        project
    }

    pub fn seed_task(&self, project_id: &str, title: &str, status: &str) -> Task {
        let mut state = self.state.lock().unwrap();
        let task = Task {
            id: state.mint("task"),
            project_id: project_id.into(),
            title: title.into(),
            description: String::new(),
            status: status.into(),
            due_date: None,
            assignee_id: None,
            created_by: String::new(),
            created_at: Utc::now(),
        };
        state.tasks.push(task.clone());
        task
    }

    pub fn seed_notification(&self, title: &str, read: bool) -> Notification {
        let mut state = self.state.lock().unwrap();
        let notification = Notification {
            id: state.mint("notification"),
            kind: NotificationKind::Other,
            title: title.into(),
            message: String::new(),
            read,
            created_at: Utc::now(),
        };
        state.notifications.push(notification.clone());
        notification
    }

    /// Inspect the authoritative copy of a task.
    pub fn task(&self, id: &str) -> Option<Task> {
        self.state.lock().unwrap().tasks.iter().find(|t| t.id == id).cloned()
    }

    fn begin(&self, method: &'static str) -> Result<std::sync::MutexGuard<'_, MemoryState>, ApiError> {
        let mut state = self.state.lock().unwrap();
        *state.calls.entry(method).or_insert(0) += 1;
        if state.offline {
            return Err(ApiError::Network("connection refused".into()));
        }
        Ok(state)
    }
}

impl RemoteApi for MemoryApi {
    fn set_credential(&self, token: Option<&str>) {
        self.state.lock().unwrap().credential = token.map(|t| t.to_string());
    }

    async fn login(&self, credentials: &Credentials) -> Result<AuthToken, ApiError> {
        let mut state = self.begin("login")?;
        let user = state
            .users
            .iter()
            .find(|(u, password)| u.email == credentials.email && *password == credentials.password)
            .map(|(u, _)| u.clone())
            .ok_or_else(|| ApiError::Auth("Incorrect email or password".into()))?;
        let token = state.mint("token");
        state.tokens.insert(token.clone(), user.id.clone());
        Ok(AuthToken {
            access_token: token,
            token_type: "bearer".into(),
            user,
        })
    }

    async fn register(&self, profile: &NewIdentity) -> Result<AuthToken, ApiError> {
        let mut state = self.begin("register")?;
        if state.users.iter().any(|(u, _)| u.email == profile.email) {
            return Err(ApiError::Server {
                status: 400,
                message: "Email already registered".into(),
            });
        }
        let user = Identity {
            id: state.mint("user"),
            name: profile.name.clone(),
            email: profile.email.clone(),
            role: profile.role.clone(),
        };
        state.users.push((user.clone(), profile.password.clone()));
        let token = state.mint("token");
        state.tokens.insert(token.clone(), user.id.clone());
        Ok(AuthToken {
            access_token: token,
            token_type: "bearer".into(),
            user,
        })
    }

    async fn current_user(&self) -> Result<Identity, ApiError> {
        let state = self.begin("current_user")?;
        state.authed()
    }

    async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        let state = self.begin("list_projects")?;
        let user = state.authed()?;
        Ok(state
            .projects
            .iter()
            .filter(|p| p.owner_id == user.id || p.member_ids.iter().any(|m| *m == user.id))
            .cloned()
            .collect())
    }

    async fn create_project(&self, draft: &NewProject) -> Result<Project, ApiError> {
        let mut state = self.begin("create_project")?;
        let user = state.authed()?;
        let project = Project {
            id: state.mint("project"),
            title: draft.title.clone(),
            description: draft.description.clone(),
            owner_id: user.id,
            member_ids: Vec::new(),
            created_at: Utc::now(),
        };
        state.projects.push(project.clone());
        Ok(project)
    }

    async fn update_project_members(
        &self,
        project_id: &str,
        member_ids: &[String],
    ) -> Result<Project, ApiError> {
        let mut state = self.begin("update_project_members")?;
        let user = state.authed()?;
        let project = state
            .projects
            .iter_mut()
            .find(|p| p.id == project_id)
            .ok_or_else(|| ApiError::Server {
                status: 404,
                message: "Project not found".into(),
            })?;
        if project.owner_id != user.id {
            return Err(ApiError::Forbidden(
                "Only the project owner can manage the team".into(),
            ));
        }
        project.member_ids = member_ids.to_vec();
        Ok(project.clone())
    }

    async fn list_users(&self) -> Result<Vec<Identity>, ApiError> {
        let state = self.begin("list_users")?;
        state.authed()?;
        Ok(state.users.iter().map(|(u, _)| u.clone()).collect())
    }

    async fn list_tasks(&self, project_id: &str) -> Result<Vec<Task>, ApiError> {
        let state = self.begin("list_tasks")?;
        let user = state.authed()?;
        state.accessible(&user, project_id)?;
        Ok(state
            .tasks
            .iter()
            .filter(|t| t.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn create_task(&self, draft: &NewTask) -> Result<Task, ApiError> {
        let mut state = self.begin("create_task")?;
        let user = state.authed()?;
        let project = state.accessible(&user, &draft.project_id)?;
        if project.owner_id != user.id {
            return Err(ApiError::Forbidden(
                "Only the project owner can create tasks".into(),
            ));
        }
        let task = Task {
            id: state.mint("task"),
            project_id: draft.project_id.clone(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            status: draft.status.clone(),
            due_date: draft.due_date,
            assignee_id: draft.assignee_id.clone(),
            created_by: user.id,
            created_at: Utc::now(),
        };
        state.tasks.push(task.clone());
        Ok(task)
    }

    async fn update_task_status(
        &self,
        task_id: &str,
        status: TaskStatus,
    ) -> Result<Task, ApiError> {
        let mut state = self.begin("update_task_status")?;
        let user = state.authed()?;
        let project_id = state
            .tasks
            .iter()
            .find(|t| t.id == task_id)
            .map(|t| t.project_id.clone())
            .ok_or_else(|| ApiError::Server {
                status: 404,
                message: "Task not found".into(),
            })?;
        state.accessible(&user, &project_id)?;
        let task = state.tasks.iter_mut().find(|t| t.id == task_id).unwrap();
        task.status = status.as_str().to_string();
        Ok(task.clone())
    }

    async fn delete_task(&self, task_id: &str) -> Result<(), ApiError> {
        let mut state = self.begin("delete_task")?;
        let user = state.authed()?;
        let project_id = state
            .tasks
            .iter()
            .find(|t| t.id == task_id)
            .map(|t| t.project_id.clone())
            .ok_or_else(|| ApiError::Server {
                status: 404,
                message: "Task not found".into(),
            })?;
        state.accessible(&user, &project_id)?;
        state.tasks.retain(|t| t.id != task_id);
        state.comments.retain(|c| c.task_id != task_id);
        state.files.retain(|f| f.task_id != task_id);
        Ok(())
    }

    async fn list_comments(&self, task_id: &str) -> Result<Vec<Comment>, ApiError> {
        let state = self.begin("list_comments")?;
        state.authed()?;
        Ok(state
            .comments
            .iter()
            .filter(|c| c.task_id == task_id)
            .cloned()
            .collect())
    }

    async fn create_comment(&self, draft: &NewComment) -> Result<Comment, ApiError> {
        let mut state = self.begin("create_comment")?;
        let user = state.authed()?;
        if let Some(parent_id) = &draft.parent_id {
            let parent = state
                .comments
                .iter()
                .find(|c| c.id == *parent_id && c.task_id == draft.task_id)
                .ok_or_else(|| ApiError::Server {
                    status: 404,
                    message: "Parent comment not found".into(),
                })?;
            if parent.is_reply() {
                return Err(ApiError::Server {
                    status: 400,
                    message: "Replies cannot be nested".into(),
                });
            }
        }
        let now = Utc::now();
        let comment = Comment {
            id: state.mint("comment"),
            task_id: draft.task_id.clone(),
            author_id: user.id,
            author_name: user.name,
            content: draft.content.clone(),
            parent_id: draft.parent_id.clone(),
            created_at: now,
            updated_at: now,
        };
        state.comments.push(comment.clone());
        Ok(comment)
    }

    async fn update_comment(&self, comment_id: &str, content: &str) -> Result<Comment, ApiError> {
        let mut state = self.begin("update_comment")?;
        let user = state.authed()?;
        let comment = state
            .comments
            .iter_mut()
            .find(|c| c.id == comment_id)
            .ok_or_else(|| ApiError::Server {
                status: 404,
                message: "Comment not found".into(),
            })?;
        if comment.author_id != user.id {
            return Err(ApiError::Forbidden(
                "You can only edit your own comments".into(),
            ));
        }
        comment.content = content.to_string();
        comment.updated_at = Utc::now();
        Ok(comment.clone())
    }

    async fn delete_comment(&self, comment_id: &str) -> Result<(), ApiError> {
        let mut state = self.begin("delete_comment")?;
        let user = state.authed()?;
        let author_id = state
            .comments
            .iter()
            .find(|c| c.id == comment_id)
            .map(|c| c.author_id.clone())
            .ok_or_else(|| ApiError::Server {
                status: 404,
                message: "Comment not found".into(),
            })?;
        if author_id != user.id {
            return Err(ApiError::Forbidden(
                "You can only delete your own comments".into(),
            ));
        }
        state
            .comments
            .retain(|c| c.id != comment_id && c.parent_id.as_deref() != Some(comment_id));
        Ok(())
    }

    async fn list_files(&self, task_id: &str) -> Result<Vec<FileAttachment>, ApiError> {
        let state = self.begin("list_files")?;
        state.authed()?;
        Ok(state
            .files
            .iter()
            .filter(|f| f.task_id == task_id)
            .cloned()
            .collect())
    }

    async fn upload_file(&self, draft: &NewFile) -> Result<FileAttachment, ApiError> {
        let mut state = self.begin("upload_file")?;
        state.authed()?;
        if draft.data.len() > MAX_ATTACHMENT_BYTES {
            return Err(ApiError::Server {
                status: 413,
                message: "Attachment too large".into(),
            });
        }
        let file = FileAttachment {
            id: state.mint("file"),
            task_id: draft.task_id.clone(),
            filename: draft.filename.clone(),
            content_type: draft.content_type.clone(),
            size_bytes: draft.data.len() as u64,
            created_at: Utc::now(),
        };
        state.files.push(file.clone());
        Ok(file)
    }

    async fn delete_file(&self, file_id: &str) -> Result<(), ApiError> {
        let mut state = self.begin("delete_file")?;
        state.authed()?;
        let before = state.files.len();
        state.files.retain(|f| f.id != file_id);
        if state.files.len() == before {
            return Err(ApiError::Server {
                status: 404,
                message: "File not found".into(),
            });
        }
        Ok(())
    }

    async fn list_notifications(&self) -> Result<Vec<Notification>, ApiError> {
        let state = self.begin("list_notifications")?;
        state.authed()?;
        // Most recent first.
        Ok(state.notifications.iter().rev().cloned().collect())
    }

    async fn unread_count(&self) -> Result<u64, ApiError> {
        let state = self.begin("unread_count")?;
        state.authed()?;
        Ok(state.notifications.iter().filter(|n| !n.read).count() as u64)
    }

    async fn mark_notification_read(&self, id: &str) -> Result<Notification, ApiError> {
        let mut state = self.begin("mark_notification_read")?;
        state.authed()?;
        let notification = state
            .notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| ApiError::Server {
                status: 404,
                message: "Notification not found".into(),
            })?;
        notification.read = true;
        Ok(notification.clone())
    }
}
