//! Modal dialogs for creating projects and tasks.

use chrono::{NaiveDate, TimeZone, Utc};
use dioxus::prelude::*;
use store::{Identity, NewProject, NewTask, TaskStatus};

/// A full-screen overlay that centers its children in a modal card.
/// Clicking outside the card triggers `on_close`.
#[component]
pub fn ModalOverlay(on_close: EventHandler<()>, children: Element) -> Element {
    rsx! {
        div {
            class: "modal-overlay",
            onclick: move |_| on_close.call(()),
            div {
                class: "modal-card",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                {children}
            }
        }
    }
}

/// Inline form for creating a new project.
#[component]
pub fn NewProjectDialog(
    on_create: EventHandler<NewProject>,
    on_cancel: EventHandler<()>,
) -> Element {
    let mut title = use_signal(String::new);
    let mut description = use_signal(String::new);

    let handle_submit = move |_| {
        let t = title().trim().to_string();
        if t.is_empty() {
            return;
        }
        on_create.call(NewProject {
            title: t,
            description: description().trim().to_string(),
        });
    };

    rsx! {
        div {
            class: "modal-body",
            h2 { class: "modal-title", "New Project" }

            div {
                class: "modal-field",
                label { r#for: "new-project-title", "Title" }
                input {
                    id: "new-project-title",
                    r#type: "text",
                    placeholder: "Website launch",
                    value: title(),
                    oninput: move |evt: FormEvent| title.set(evt.value()),
                }
            }

            div {
                class: "modal-field",
                label { r#for: "new-project-desc", "Description" }
                textarea {
                    id: "new-project-desc",
                    placeholder: "What is this project about?",
                    value: description(),
                    oninput: move |evt: FormEvent| description.set(evt.value()),
                }
            }

            div {
                class: "modal-actions",
                button {
                    class: "btn btn--primary",
                    onclick: handle_submit,
                    "Create"
                }
                button {
                    class: "btn btn--outline",
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
            }
        }
    }
}

/// Inline form for creating a new task in the selected project.
#[component]
pub fn NewTaskDialog(
    project_id: String,
    users: Vec<Identity>,
    on_create: EventHandler<NewTask>,
    on_cancel: EventHandler<()>,
) -> Element {
    let mut title = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut status = use_signal(|| TaskStatus::ToDo.as_str().to_string());
    let mut due_date = use_signal(String::new);
    let mut assignee = use_signal(String::new);

    let handle_submit = move |_| {
        let t = title().trim().to_string();
        if t.is_empty() {
            return;
        }
        // The picker yields YYYY-MM-DD; an unparsable value means no due date.
        let due = NaiveDate::parse_from_str(due_date().trim(), "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|d| Utc.from_utc_datetime(&d));
        let assignee_id = match assignee().as_str() {
            "" => None,
            id => Some(id.to_string()),
        };
        on_create.call(NewTask {
            project_id: project_id.clone(),
            title: t,
            description: description().trim().to_string(),
            status: status(),
            due_date: due,
            assignee_id,
        });
    };

    rsx! {
        div {
            class: "modal-body",
            h2 { class: "modal-title", "New Task" }

            div {
                class: "modal-field",
                label { r#for: "new-task-title", "Title" }
                input {
                    id: "new-task-title",
                    r#type: "text",
                    placeholder: "Write the announcement post",
                    value: title(),
                    oninput: move |evt: FormEvent| title.set(evt.value()),
                }
            }

            div {
                class: "modal-field",
                label { r#for: "new-task-desc", "Description" }
                textarea {
                    id: "new-task-desc",
                    value: description(),
                    oninput: move |evt: FormEvent| description.set(evt.value()),
                }
            }

            div {
                class: "modal-field",
                label { r#for: "new-task-due", "Due date" }
                input {
                    id: "new-task-due",
                    r#type: "date",
                    value: due_date(),
                    oninput: move |evt: FormEvent| due_date.set(evt.value()),
                }
            }

            div {
                class: "modal-field",
                label { r#for: "new-task-assignee", "Assignee" }
                select {
                    id: "new-task-assignee",
                    value: assignee(),
                    onchange: move |evt| assignee.set(evt.value()),
                    option { value: "", "Unassigned" }
                    for user in &users {
                        option {
                            key: "{user.id}",
                            value: "{user.id}",
                            "{user.name}"
                        }
                    }
                }
            }

            div {
                class: "modal-field",
                label { r#for: "new-task-status", "Status" }
                select {
                    id: "new-task-status",
                    value: status(),
                    onchange: move |evt| status.set(evt.value()),
                    for bucket in store::board::BUCKETS {
                        option {
                            key: "{bucket}",
                            value: "{bucket}",
                            "{bucket}"
                        }
                    }
                }
            }

            div {
                class: "modal-actions",
                button {
                    class: "btn btn--primary",
                    onclick: handle_submit,
                    "Create"
                }
                button {
                    class: "btn btn--outline",
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
            }
        }
    }
}
