//! The board view: project picker, owner-gated actions, the kanban board,
//! and the task detail modal with comments and attachments.

use dioxus::prelude::*;
use store::{actions, policy, NewFile, NewProject, NewTask, Project, Task, TaskStatus};
use ui::{
    use_api, use_auth, use_caches, use_notification_poll, AttachmentsPanel, CommentSection,
    ErrorBanner, KanbanBoard, LogoutButton, ModalOverlay, NewProjectDialog, NewTaskDialog,
    NotificationBell, SignalCell, TeamDialog, ThemeToggle,
};

use crate::Route;

#[component]
pub fn Board() -> Element {
    let api = use_api();
    let auth = use_auth();
    let caches = use_caches();
    let nav = use_navigator();

    // Transient view state: which modal is open, which project is selected.
    let mut selected_project = use_signal(|| Option::<String>::None);
    let mut show_project_form = use_signal(|| false);
    let mut show_task_form = use_signal(|| false);
    let mut show_team = use_signal(|| false);
    let mut open_task = use_signal(|| Option::<Task>::None);
    let mut board_error = use_signal(|| Option::<String>::None);
    let mut detail_error = use_signal(|| Option::<String>::None);

    // Unauthenticated visitors land on the login screen.
    use_effect(move || {
        if !auth().loading && auth().session.is_none() {
            nav.replace(Route::Login {});
        }
    });

    // The poll lives exactly as long as this view does.
    use_notification_poll();

    // Initial load: projects (auto-selecting the first one), users for the
    // pickers, notifications for the bell.
    let api_boot = api.clone();
    let _loader = use_resource(move || {
        let api = api_boot.clone();
        async move {
            // Reading the auth signal re-runs this once restore settles.
            let state = auth();
            if state.loading || state.session.is_none() {
                return;
            }
            let mut cell = SignalCell(caches);
            if let Err(err) = actions::refresh_projects(&api, &mut cell).await {
                tracing::warn!("project refresh failed: {err}");
            }
            if selected_project.peek().is_none() {
                let first = caches.peek().projects.items().first().map(|p| p.id.clone());
                if let Some(id) = first {
                    selected_project.set(Some(id));
                }
            }
            if let Err(err) = actions::refresh_users(&api, &mut cell).await {
                tracing::warn!("user refresh failed: {err}");
            }
            if let Err(err) = actions::refresh_notifications(&api, &mut cell).await {
                tracing::debug!("notification refresh failed: {err}");
            }
        }
    });

    // Reload tasks whenever the selection changes.
    let api_tasks = api.clone();
    let _tasks_loader = use_resource(move || {
        let api = api_tasks.clone();
        async move {
            let Some(project_id) = selected_project() else {
                return;
            };
            let mut cell = SignalCell(caches);
            if let Err(err) = actions::refresh_tasks(&api, &mut cell, &project_id).await {
                // Keep whatever the board already shows.
                tracing::warn!("task refresh failed: {err}");
            }
        }
    });

    let identity = auth.read().identity().cloned();
    let projects: Vec<Project> = caches.read().projects.items().to_vec();
    let current_project: Option<Project> =
        selected_project().and_then(|id| caches.read().projects.get(&id).cloned());
    let owns_selected = match (&identity, &current_project) {
        (Some(identity), Some(project)) => policy::is_owner(identity, project),
        _ => false,
    };
    let tasks: Vec<Task> = caches.read().tasks.items().to_vec();
    let role = identity.as_ref().map(|i| i.role.clone()).unwrap_or_default();
    let user_name = identity.as_ref().map(|i| i.name.clone()).unwrap_or_default();

    // Handlers, one remote intent each.
    let api_move = api.clone();
    let handle_move = move |(task_id, target): (String, TaskStatus)| {
        let api = api_move.clone();
        spawn(async move {
            let mut cell = SignalCell(caches);
            if let Err(err) = actions::move_task(&api, &mut cell, &task_id, target).await {
                board_error.set(Some(err.to_string()));
            }
        });
    };

    let api_delete = api.clone();
    let handle_delete_task = move |task_id: String| {
        let api = api_delete.clone();
        spawn(async move {
            let mut cell = SignalCell(caches);
            if let Err(err) = actions::delete_task(&api, &mut cell, &task_id).await {
                board_error.set(Some(err.to_string()));
            }
        });
    };

    let api_open = api.clone();
    let handle_open = move |task: Task| {
        detail_error.set(None);
        let task_id = task.id.clone();
        open_task.set(Some(task));
        let api = api_open.clone();
        spawn(async move {
            let mut cell = SignalCell(caches);
            if let Err(err) = actions::refresh_comments(&api, &mut cell, &task_id).await {
                tracing::warn!("comment refresh failed: {err}");
            }
            if let Err(err) = actions::refresh_files(&api, &mut cell, &task_id).await {
                tracing::warn!("file refresh failed: {err}");
            }
        });
    };

    let api_project = api.clone();
    let handle_create_project = move |draft: NewProject| {
        let api = api_project.clone();
        spawn(async move {
            let mut cell = SignalCell(caches);
            match actions::create_project(&api, &mut cell, &draft).await {
                Ok(project) => {
                    show_project_form.set(false);
                    if selected_project.peek().is_none() {
                        selected_project.set(Some(project.id));
                    }
                }
                Err(err) => board_error.set(Some(err.to_string())),
            }
        });
    };

    let api_task = api.clone();
    let handle_create_task = move |draft: NewTask| {
        let api = api_task.clone();
        let Some(identity) = auth.peek().session.clone().map(|s| s.identity) else {
            return;
        };
        spawn(async move {
            let mut cell = SignalCell(caches);
            match actions::create_task(&api, &mut cell, &identity, &draft).await {
                Ok(_) => show_task_form.set(false),
                Err(err) => board_error.set(Some(err.to_string())),
            }
        });
    };

    let api_team = api.clone();
    let handle_save_team = move |member_ids: Vec<String>| {
        let api = api_team.clone();
        let Some(identity) = auth.peek().session.clone().map(|s| s.identity) else {
            return;
        };
        let Some(project_id) = selected_project.peek().clone() else {
            return;
        };
        spawn(async move {
            let mut cell = SignalCell(caches);
            match actions::update_members(&api, &mut cell, &identity, &project_id, member_ids).await
            {
                Ok(_) => show_team.set(false),
                Err(err) => board_error.set(Some(err.to_string())),
            }
        });
    };

    // The two owner-gated entry points refuse without any remote call.
    let gate_task_form = move |_| {
        if owns_selected {
            board_error.set(None);
            show_task_form.set(true);
        } else {
            board_error.set(Some(
                "Only the project owner can create tasks".to_string(),
            ));
        }
    };
    let gate_team = move |_| {
        if owns_selected {
            board_error.set(None);
            show_team.set(true);
        } else {
            board_error.set(Some(
                "Only the project owner can manage the team".to_string(),
            ));
        }
    };

    rsx! {
        div {
            class: "page",

            header {
                class: "topbar",
                div {
                    class: "topbar-brand",
                    h1 { "TaskFlow" }
                    if !role.is_empty() {
                        span { class: "role-badge", "{role}" }
                    }
                }
                div {
                    class: "topbar-actions",
                    Link { class: "topbar-link", to: Route::Dashboard {}, "Dashboard" }
                    NotificationBell {}
                    ThemeToggle {}
                    span { class: "topbar-user", "Welcome, {user_name}" }
                    LogoutButton { class: "btn btn--danger" }
                }
            }

            main {
                class: "board-page",

                if let Some(err) = board_error() {
                    ErrorBanner {
                        message: err,
                        on_dismiss: move |_| board_error.set(None),
                    }
                }

                div {
                    class: "board-toolbar",
                    div {
                        class: "board-toolbar-project",
                        label { r#for: "project-picker", "Project:" }
                        select {
                            id: "project-picker",
                            value: selected_project().unwrap_or_default(),
                            onchange: move |evt| {
                                let value = evt.value();
                                if !value.is_empty() {
                                    selected_project.set(Some(value));
                                }
                            },
                            for project in &projects {
                                option {
                                    key: "{project.id}",
                                    value: "{project.id}",
                                    "{project.title}"
                                }
                            }
                        }
                    }
                    div {
                        class: "board-toolbar-actions",
                        button {
                            class: "btn btn--secondary",
                            onclick: move |_| show_project_form.set(true),
                            "New Project"
                        }
                        button {
                            class: "btn btn--primary",
                            disabled: current_project.is_none(),
                            onclick: gate_task_form,
                            "New Task"
                        }
                        button {
                            class: "btn btn--outline",
                            disabled: current_project.is_none(),
                            onclick: gate_team,
                            "Team"
                        }
                    }
                }

                if current_project.is_some() {
                    KanbanBoard {
                        tasks,
                        on_move: handle_move,
                        on_open: handle_open,
                        on_delete: handle_delete_task,
                    }
                } else {
                    div {
                        class: "board-empty",
                        p { "No projects yet" }
                        button {
                            class: "btn btn--secondary",
                            onclick: move |_| show_project_form.set(true),
                            "Create Your First Project"
                        }
                    }
                }
            }

            if show_project_form() {
                ModalOverlay {
                    on_close: move |_| show_project_form.set(false),
                    NewProjectDialog {
                        on_create: handle_create_project,
                        on_cancel: move |_| show_project_form.set(false),
                    }
                }
            }

            if show_task_form() {
                if let Some(project) = current_project.clone() {
                    ModalOverlay {
                        on_close: move |_| show_task_form.set(false),
                        NewTaskDialog {
                            project_id: project.id.clone(),
                            users: caches.read().users.items().to_vec(),
                            on_create: handle_create_task,
                            on_cancel: move |_| show_task_form.set(false),
                        }
                    }
                }
            }

            if show_team() {
                if let Some(project) = current_project.clone() {
                    ModalOverlay {
                        on_close: move |_| show_team.set(false),
                        TeamDialog {
                            project,
                            users: caches.read().users.items().to_vec(),
                            on_save: handle_save_team,
                            on_cancel: move |_| show_team.set(false),
                        }
                    }
                }
            }

            if let Some(task) = open_task() {
                if let Some(identity) = identity.clone() {
                    TaskDetail {
                        task,
                        identity,
                        error: detail_error,
                        on_close: move |_| open_task.set(None),
                    }
                }
            }
        }
    }
}

/// Task detail modal: metadata, the comment thread, and attachments.
#[component]
fn TaskDetail(
    task: Task,
    identity: store::Identity,
    error: Signal<Option<String>>,
    on_close: EventHandler<()>,
) -> Element {
    let api = use_api();
    let caches = use_caches();
    let mut error = error;

    let comments = caches.read().comments.items().to_vec();
    let files = caches.read().files.items().to_vec();
    let assignee = task
        .assignee_id
        .as_ref()
        .and_then(|id| caches.read().users.get(id).map(|u| u.name.clone()));
    let due_label = task.due_date.as_ref().map(|d| d.format("%b %e, %Y").to_string());

    let comment_task = task.id.clone();
    let api_comment = api.clone();
    let identity_edit = identity.clone();
    let handle_comment = move |(content, parent): (String, Option<String>)| {
        let api = api_comment.clone();
        let task_id = comment_task.clone();
        spawn(async move {
            let mut cell = SignalCell(caches);
            if let Err(err) =
                actions::add_comment(&api, &mut cell, &task_id, &content, parent.as_deref()).await
            {
                error.set(Some(err.to_string()));
            }
        });
    };

    let api_edit = api.clone();
    let handle_edit = move |(comment_id, content): (String, String)| {
        let api = api_edit.clone();
        let identity = identity_edit.clone();
        spawn(async move {
            let mut cell = SignalCell(caches);
            if let Err(err) =
                actions::edit_comment(&api, &mut cell, &identity, &comment_id, &content).await
            {
                error.set(Some(err.to_string()));
            }
        });
    };

    let api_remove = api.clone();
    let identity_remove = identity.clone();
    let handle_remove = move |comment_id: String| {
        let api = api_remove.clone();
        let identity = identity_remove.clone();
        spawn(async move {
            let mut cell = SignalCell(caches);
            if let Err(err) =
                actions::delete_comment(&api, &mut cell, &identity, &comment_id).await
            {
                error.set(Some(err.to_string()));
            }
        });
    };

    let upload_task = task.id.clone();
    let api_upload = api.clone();
    let handle_upload = move |(filename, content_type, data): (String, String, Vec<u8>)| {
        let api = api_upload.clone();
        let draft = NewFile {
            task_id: upload_task.clone(),
            filename,
            content_type,
            data,
        };
        spawn(async move {
            let mut cell = SignalCell(caches);
            if let Err(err) = actions::upload_file(&api, &mut cell, &draft).await {
                error.set(Some(err.to_string()));
            }
        });
    };

    let api_file_delete = api.clone();
    let handle_file_delete = move |file_id: String| {
        let api = api_file_delete.clone();
        spawn(async move {
            let mut cell = SignalCell(caches);
            if let Err(err) = actions::delete_file(&api, &mut cell, &file_id).await {
                error.set(Some(err.to_string()));
            }
        });
    };

    rsx! {
        ModalOverlay {
            on_close: move |_| on_close.call(()),
            div {
                class: "modal-body task-detail",
                h2 { class: "modal-title", "{task.title}" }

                if let Some(err) = error() {
                    ErrorBanner {
                        message: err,
                        on_dismiss: move |_| error.set(None),
                    }
                }

                div {
                    class: "task-detail-meta",
                    span { class: "task-detail-status", "{task.status}" }
                    if let Some(due) = due_label {
                        span { "Due: {due}" }
                    }
                    if let Some(assignee) = assignee {
                        span { "Assigned to {assignee}" }
                    }
                }

                if !task.description.is_empty() {
                    p { class: "task-detail-desc", "{task.description}" }
                }

                CommentSection {
                    identity: identity.clone(),
                    comments,
                    on_submit: handle_comment,
                    on_edit: handle_edit,
                    on_delete: handle_remove,
                }

                AttachmentsPanel {
                    files,
                    on_upload: handle_upload,
                    on_delete: handle_file_delete,
                }
            }
        }
    }
}
