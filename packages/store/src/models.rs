//! # Domain models shared across the client crates
//!
//! Defines the data shapes exchanged with the backend and held in the local
//! caches. Every type is `Serialize + Deserialize` so it can cross the HTTP
//! boundary unchanged, and `Clone + PartialEq` so it can live inside UI
//! signals.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`Identity`] | A user as the backend reports it: id, name, email, role. |
//! | [`Project`] | A project with its owner and team member ids. |
//! | [`Task`] | A kanban card. `status` stays a wire string; [`Task::bucket`] maps it onto [`TaskStatus`] when it matches one of the three fixed columns. |
//! | [`Comment`] | A task comment, optionally a reply to a top-level comment. |
//! | [`FileAttachment`] | Attachment metadata. The payload itself only travels inside [`NewFile`] and is never cached. |
//! | [`Notification`] | An inbox entry with a read flag, the only field the client mutates. |
//! | [`AuthToken`] | The login/register exchange response: bearer token plus the authenticated [`Identity`]. |
//!
//! The `New*` structs are the create-call payloads. They own the local
//! validation that must reject bad input before any remote call is made:
//! required fields and the [`MAX_ATTACHMENT_BYTES`] upload cap.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Largest attachment accepted for upload: 10 MiB, checked before encoding.
pub const MAX_ATTACHMENT_BYTES: usize = 10 * 1024 * 1024;

/// An authenticated user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

/// The response of a successful credential exchange.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    pub user: Identity,
}

/// A project. Accessible to its owner and to every listed member; only the
/// owner may create tasks or edit the member list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub owner_id: String,
    #[serde(default)]
    pub member_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// One of the three fixed board columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    ToDo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// The exact wire string for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::ToDo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = ();

    /// Exact match only. Anything else is an unrecognized status and the
    /// task belongs to no column.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "To Do" => Ok(TaskStatus::ToDo),
            "In Progress" => Ok(TaskStatus::InProgress),
            "Done" => Ok(TaskStatus::Done),
            _ => Err(()),
        }
    }
}

/// A kanban card. All fields except `status` are fixed at creation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub project_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: String,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub assignee_id: Option<String>,
    #[serde(default)]
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// The column this task belongs to, if its status is one of the three
    /// recognized values.
    pub fn bucket(&self) -> Option<TaskStatus> {
        self.status.parse().ok()
    }
}

/// A comment on a task. `parent_id` points at a top-level comment when this
/// is a reply; replies never nest further.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub task_id: String,
    pub author_id: String,
    #[serde(default)]
    pub author_name: String,
    pub content: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }
}

/// Attachment metadata. The binary payload is not part of this type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FileAttachment {
    pub id: String,
    pub task_id: String,
    pub filename: String,
    pub content_type: String,
    pub size_bytes: u64,
    pub created_at: DateTime<Utc>,
}

/// What triggered a notification. Unknown wire values fold into `Other`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    TaskAssignment,
    DueDate,
    StatusChange,
    Comment,
    FileUpload,
    #[serde(other)]
    Other,
}

/// An inbox entry. `read` is the only field the client ever changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Login form payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Registration form payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewIdentity {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NewProject {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl NewProject {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.title.trim().is_empty() {
            return Err(ApiError::Validation("Project title is required".into()));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    pub project_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "NewTask::default_status")]
    pub status: String,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub assignee_id: Option<String>,
}

impl NewTask {
    fn default_status() -> String {
        TaskStatus::ToDo.as_str().to_string()
    }

    pub fn new(project_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            title: title.into(),
            description: String::new(),
            status: Self::default_status(),
            due_date: None,
            assignee_id: None,
        }
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        if self.title.trim().is_empty() {
            return Err(ApiError::Validation("Task title is required".into()));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewComment {
    pub task_id: String,
    pub content: String,
    #[serde(default)]
    pub parent_id: Option<String>,
}

/// An attachment about to be uploaded. Carries the raw bytes; the transport
/// layer encodes them for the wire.
#[derive(Clone, Debug, PartialEq)]
pub struct NewFile {
    pub task_id: String,
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl NewFile {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.filename.trim().is_empty() {
            return Err(ApiError::Validation("Filename is required".into()));
        }
        if self.data.len() > MAX_ATTACHMENT_BYTES {
            return Err(ApiError::Validation(format!(
                "{} is larger than the 10 MiB attachment limit",
                self.filename
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_exact_strings() {
        for status in [TaskStatus::ToDo, TaskStatus::InProgress, TaskStatus::Done] {
            assert_eq!(status.as_str().parse::<TaskStatus>(), Ok(status));
        }
        assert!("todo".parse::<TaskStatus>().is_err());
        assert!("DONE".parse::<TaskStatus>().is_err());
        assert!("Blocked".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn unknown_notification_kind_folds_into_other() {
        let kind: NotificationKind = serde_json::from_str("\"mention\"").unwrap();
        assert_eq!(kind, NotificationKind::Other);
        let kind: NotificationKind = serde_json::from_str("\"status_change\"").unwrap();
        assert_eq!(kind, NotificationKind::StatusChange);
    }

    #[test]
    fn attachment_limit_is_inclusive() {
        let mut file = NewFile {
            task_id: "t1".into(),
            filename: "build.log".into(),
            content_type: "text/plain".into(),
            data: vec![0u8; MAX_ATTACHMENT_BYTES],
        };
        assert!(file.validate().is_ok());

        file.data.push(0);
        assert!(matches!(file.validate(), Err(ApiError::Validation(_))));
    }

    #[test]
    fn empty_required_fields_are_rejected() {
        assert!(NewProject { title: "  ".into(), description: String::new() }
            .validate()
            .is_err());
        assert!(NewTask::new("p1", " ").validate().is_err());
        assert!(NewFile {
            task_id: "t1".into(),
            filename: "".into(),
            content_type: "text/plain".into(),
            data: vec![1],
        }
        .validate()
        .is_err());
    }
}
