//! The seam between the client and the backend.
//!
//! [`RemoteApi`] has one method per remote operation the client consumes.
//! Implementations live elsewhere: the `api` crate provides the HTTP client
//! used by the app, and [`crate::MemoryApi`] provides an in-memory fake for
//! tests and offline development. Everything above this trait (caches,
//! session store, actions) is written against it and never against a
//! concrete transport.
//!
//! The bearer credential is ambient for the lifetime of a session: the
//! session store calls [`RemoteApi::set_credential`] once on login/restore
//! and callers never attach it per request.

use std::future::Future;

use crate::error::ApiError;
use crate::models::{
    AuthToken, Comment, Credentials, FileAttachment, Identity, NewComment, NewFile, NewIdentity,
    NewProject, NewTask, Notification, Project, Task, TaskStatus,
};

pub trait RemoteApi {
    /// Attach (or clear) the bearer credential sent with every subsequent
    /// call. Synchronous: clearing must take effect immediately on logout.
    fn set_credential(&self, token: Option<&str>);

    // Auth. The two exchanges are the only calls made without a credential.
    fn login(&self, credentials: &Credentials)
        -> impl Future<Output = Result<AuthToken, ApiError>>;
    fn register(&self, profile: &NewIdentity)
        -> impl Future<Output = Result<AuthToken, ApiError>>;
    fn current_user(&self) -> impl Future<Output = Result<Identity, ApiError>>;

    // Projects and users.
    fn list_projects(&self) -> impl Future<Output = Result<Vec<Project>, ApiError>>;
    fn create_project(&self, draft: &NewProject)
        -> impl Future<Output = Result<Project, ApiError>>;
    fn update_project_members(
        &self,
        project_id: &str,
        member_ids: &[String],
    ) -> impl Future<Output = Result<Project, ApiError>>;
    fn list_users(&self) -> impl Future<Output = Result<Vec<Identity>, ApiError>>;

    // Tasks.
    fn list_tasks(&self, project_id: &str) -> impl Future<Output = Result<Vec<Task>, ApiError>>;
    fn create_task(&self, draft: &NewTask) -> impl Future<Output = Result<Task, ApiError>>;
    fn update_task_status(
        &self,
        task_id: &str,
        status: TaskStatus,
    ) -> impl Future<Output = Result<Task, ApiError>>;
    fn delete_task(&self, task_id: &str) -> impl Future<Output = Result<(), ApiError>>;

    // Comments.
    fn list_comments(&self, task_id: &str)
        -> impl Future<Output = Result<Vec<Comment>, ApiError>>;
    fn create_comment(&self, draft: &NewComment)
        -> impl Future<Output = Result<Comment, ApiError>>;
    fn update_comment(
        &self,
        comment_id: &str,
        content: &str,
    ) -> impl Future<Output = Result<Comment, ApiError>>;
    fn delete_comment(&self, comment_id: &str) -> impl Future<Output = Result<(), ApiError>>;

    // Attachments.
    fn list_files(
        &self,
        task_id: &str,
    ) -> impl Future<Output = Result<Vec<FileAttachment>, ApiError>>;
    fn upload_file(&self, draft: &NewFile)
        -> impl Future<Output = Result<FileAttachment, ApiError>>;
    fn delete_file(&self, file_id: &str) -> impl Future<Output = Result<(), ApiError>>;

    // Notifications.
    fn list_notifications(&self) -> impl Future<Output = Result<Vec<Notification>, ApiError>>;
    fn unread_count(&self) -> impl Future<Output = Result<u64, ApiError>>;
    fn mark_notification_read(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Notification, ApiError>>;
}
