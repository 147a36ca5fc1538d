//! # HTTP client for the TaskFlow backend
//!
//! [`ApiClient`] is the production implementation of [`store::RemoteApi`].
//! It owns the base URL, the ambient bearer credential, and the per-request
//! deadline; everything above it (session store, actions, views) stays
//! transport-agnostic.
//!
//! ## Routes
//!
//! | Operation | Route |
//! |-----------|-------|
//! | login / register / current user | `POST /api/auth/login`, `POST /api/auth/register`, `GET /api/auth/me` |
//! | projects | `GET`/`POST /api/projects`, `PUT /api/projects/{id}/team` |
//! | users | `GET /api/users` |
//! | tasks | `GET /api/tasks?project_id=`, `POST /api/tasks`, `PUT /api/tasks/{id}/status`, `DELETE /api/tasks/{id}` |
//! | comments | `GET /api/comments?task_id=`, `POST /api/comments`, `PUT`/`DELETE /api/comments/{id}` |
//! | files | `GET /api/files?task_id=`, `POST /api/files`, `DELETE /api/files/{id}` |
//! | notifications | `GET /api/notifications`, `GET /api/notifications/unread-count`, `PUT /api/notifications/{id}/read` |
//!
//! Error responses carry their reason as `{"detail": "..."}`; the body is
//! folded into the [`ApiError`] taxonomy by HTTP status (401 credential,
//! 403 refusal, anything else server). Transport failures and timeouts are
//! one failure class: the caller keeps stale data and retries later.
//!
//! Attachment payloads are raw bytes in [`store::NewFile`] and travel
//! base64-encoded in the upload body.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use store::{
    ApiError, AuthToken, Comment, Credentials, FileAttachment, Identity, NewComment, NewFile,
    NewIdentity, NewProject, NewTask, Notification, Project, RemoteApi, Task, TaskStatus,
};

pub use store::models;

/// Per-request deadline. A timeout is surfaced as [`ApiError::Timeout`] and
/// handled exactly like a network failure.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    credential: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            credential: Arc::new(RwLock::new(None)),
        }
    }

    /// Base URL baked in at build time via `TASKFLOW_API_URL`, with a local
    /// development default.
    pub fn from_env() -> Self {
        Self::new(option_env!("TASKFLOW_API_URL").unwrap_or(DEFAULT_BASE_URL))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .http
            .request(method, self.url(path))
            .timeout(REQUEST_TIMEOUT);
        if let Some(token) = self.credential.read().unwrap().as_ref() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.request(reqwest::Method::GET, path)
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.request(reqwest::Method::POST, path)
    }

    fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.request(reqwest::Method::PUT, path)
    }

    fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.request(reqwest::Method::DELETE, path)
    }

    async fn send<T: serde::de::DeserializeOwned>(
        builder: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = builder.send().await.map_err(map_transport)?;
        let status = response.status().as_u16();
        if (200..300).contains(&status) {
            response
                .json::<T>()
                .await
                .map_err(|err| ApiError::Network(err.to_string()))
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(map_status(status, &body))
        }
    }

    /// Like [`Self::send`] but discards the response body.
    async fn send_unit(builder: reqwest::RequestBuilder) -> Result<(), ApiError> {
        let response = builder.send().await.map_err(map_transport)?;
        let status = response.status().as_u16();
        if (200..300).contains(&status) {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(map_status(status, &body))
        }
    }
}

fn map_transport(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::Network(err.to_string())
    }
}

/// Error bodies carry their reason as `{"detail": "..."}`.
fn error_detail(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct Body {
        detail: String,
    }
    serde_json::from_str::<Body>(body).ok().map(|b| b.detail)
}

fn map_status(status: u16, body: &str) -> ApiError {
    let message = error_detail(body).unwrap_or_else(|| {
        if body.trim().is_empty() {
            format!("request failed with status {status}")
        } else {
            body.trim().to_string()
        }
    });
    tracing::debug!(status, %message, "backend refused a request");
    match status {
        401 => ApiError::Auth(message),
        403 => ApiError::Forbidden(message),
        _ => ApiError::Server { status, message },
    }
}

#[derive(Serialize)]
struct StatusChange<'a> {
    status: &'a str,
}

#[derive(Serialize)]
struct MemberList<'a> {
    member_ids: &'a [String],
}

#[derive(Serialize)]
struct ContentChange<'a> {
    content: &'a str,
}

#[derive(Serialize)]
struct UploadBody<'a> {
    task_id: &'a str,
    filename: &'a str,
    content_type: &'a str,
    data: String,
}

impl<'a> UploadBody<'a> {
    fn from_draft(draft: &'a NewFile) -> Self {
        Self {
            task_id: &draft.task_id,
            filename: &draft.filename,
            content_type: &draft.content_type,
            data: BASE64.encode(&draft.data),
        }
    }
}

#[derive(Deserialize)]
struct UnreadCount {
    count: u64,
}

impl RemoteApi for ApiClient {
    fn set_credential(&self, token: Option<&str>) {
        *self.credential.write().unwrap() = token.map(|t| t.to_string());
    }

    async fn login(&self, credentials: &Credentials) -> Result<AuthToken, ApiError> {
        Self::send(self.post("/auth/login").json(credentials)).await
    }

    async fn register(&self, profile: &NewIdentity) -> Result<AuthToken, ApiError> {
        Self::send(self.post("/auth/register").json(profile)).await
    }

    async fn current_user(&self) -> Result<Identity, ApiError> {
        Self::send(self.get("/auth/me")).await
    }

    async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        Self::send(self.get("/projects")).await
    }

    async fn create_project(&self, draft: &NewProject) -> Result<Project, ApiError> {
        Self::send(self.post("/projects").json(draft)).await
    }

    async fn update_project_members(
        &self,
        project_id: &str,
        member_ids: &[String],
    ) -> Result<Project, ApiError> {
        let body = MemberList { member_ids };
        Self::send(self.put(&format!("/projects/{project_id}/team")).json(&body)).await
    }

    async fn list_users(&self) -> Result<Vec<Identity>, ApiError> {
        Self::send(self.get("/users")).await
    }

    async fn list_tasks(&self, project_id: &str) -> Result<Vec<Task>, ApiError> {
        Self::send(self.get("/tasks").query(&[("project_id", project_id)])).await
    }

    async fn create_task(&self, draft: &NewTask) -> Result<Task, ApiError> {
        Self::send(self.post("/tasks").json(draft)).await
    }

    async fn update_task_status(
        &self,
        task_id: &str,
        status: TaskStatus,
    ) -> Result<Task, ApiError> {
        let body = StatusChange { status: status.as_str() };
        Self::send(self.put(&format!("/tasks/{task_id}/status")).json(&body)).await
    }

    async fn delete_task(&self, task_id: &str) -> Result<(), ApiError> {
        Self::send_unit(self.delete(&format!("/tasks/{task_id}"))).await
    }

    async fn list_comments(&self, task_id: &str) -> Result<Vec<Comment>, ApiError> {
        Self::send(self.get("/comments").query(&[("task_id", task_id)])).await
    }

    async fn create_comment(&self, draft: &NewComment) -> Result<Comment, ApiError> {
        Self::send(self.post("/comments").json(draft)).await
    }

    async fn update_comment(&self, comment_id: &str, content: &str) -> Result<Comment, ApiError> {
        let body = ContentChange { content };
        Self::send(self.put(&format!("/comments/{comment_id}")).json(&body)).await
    }

    async fn delete_comment(&self, comment_id: &str) -> Result<(), ApiError> {
        Self::send_unit(self.delete(&format!("/comments/{comment_id}"))).await
    }

    async fn list_files(&self, task_id: &str) -> Result<Vec<FileAttachment>, ApiError> {
        Self::send(self.get("/files").query(&[("task_id", task_id)])).await
    }

    async fn upload_file(&self, draft: &NewFile) -> Result<FileAttachment, ApiError> {
        let body = UploadBody::from_draft(draft);
        Self::send(self.post("/files").json(&body)).await
    }

    async fn delete_file(&self, file_id: &str) -> Result<(), ApiError> {
        Self::send_unit(self.delete(&format!("/files/{file_id}"))).await
    }

    async fn list_notifications(&self) -> Result<Vec<Notification>, ApiError> {
        Self::send(self.get("/notifications")).await
    }

    async fn unread_count(&self) -> Result<u64, ApiError> {
        let body: UnreadCount = Self::send(self.get("/notifications/unread-count")).await?;
        Ok(body.count)
    }

    async fn mark_notification_read(&self, id: &str) -> Result<Notification, ApiError> {
        Self::send(self.put(&format!("/notifications/{id}/read"))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_normalization_and_route_prefix() {
        let client = ApiClient::new("http://backend.test/");
        assert_eq!(client.url("/tasks"), "http://backend.test/api/tasks");
        assert_eq!(
            client.url("/notifications/unread-count"),
            "http://backend.test/api/notifications/unread-count"
        );
    }

    #[test]
    fn error_bodies_map_by_status_and_detail() {
        let err = map_status(401, r#"{"detail": "Could not validate credentials"}"#);
        assert_eq!(err, ApiError::Auth("Could not validate credentials".into()));

        let err = map_status(403, r#"{"detail": "Only the project owner can create tasks"}"#);
        assert!(matches!(err, ApiError::Forbidden(_)));

        let err = map_status(500, "");
        assert_eq!(
            err,
            ApiError::Server {
                status: 500,
                message: "request failed with status 500".into()
            }
        );

        // Non-JSON bodies are passed through as-is.
        let err = map_status(502, "Bad Gateway\n");
        assert_eq!(
            err,
            ApiError::Server { status: 502, message: "Bad Gateway".into() }
        );
    }

    #[test]
    fn upload_body_encodes_the_payload() {
        let draft = NewFile {
            task_id: "task-1".into(),
            filename: "logo.png".into(),
            content_type: "image/png".into(),
            data: vec![0x00, 0x01, 0x02, 0xff],
        };
        let body = UploadBody::from_draft(&draft);
        assert_eq!(body.data, "AAEC/w==");

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["task_id"], "task-1");
        assert_eq!(json["content_type"], "image/png");
    }
}
