//! The kanban board: three fixed columns, HTML drag-and-drop between them.
//!
//! Purely presentational: it partitions whatever tasks it is given and
//! reports drops upward. The caller decides what a drop means; dropping a
//! card onto the column it came from is reported too and ends up a no-op in
//! the action layer.

use dioxus::prelude::*;
use store::board::{self, BUCKETS};
use store::{Task, TaskStatus};

use crate::format_date;
use crate::icons::FaTrash;
use crate::Icon;

#[component]
pub fn KanbanBoard(
    tasks: Vec<Task>,
    on_move: EventHandler<(String, TaskStatus)>,
    on_open: EventHandler<Task>,
    on_delete: EventHandler<String>,
) -> Element {
    let dragged = use_signal(|| Option::<String>::None);
    let columns = board::partition(&tasks);

    rsx! {
        div {
            class: "board",
            for status in BUCKETS {
                BoardColumn {
                    key: "{status}",
                    status,
                    tasks: columns.column(status).to_vec(),
                    dragged,
                    on_move,
                    on_open,
                    on_delete,
                }
            }
        }
    }
}

#[component]
fn BoardColumn(
    status: TaskStatus,
    tasks: Vec<Task>,
    dragged: Signal<Option<String>>,
    on_move: EventHandler<(String, TaskStatus)>,
    on_open: EventHandler<Task>,
    on_delete: EventHandler<String>,
) -> Element {
    let mut dragged = dragged;
    let count = tasks.len();
    let label = status.as_str();
    let slug = slug(status);

    rsx! {
        div {
            class: "board-column board-column--{slug}",
            ondragover: move |evt| evt.prevent_default(),
            ondrop: move |evt| {
                evt.prevent_default();
                if let Some(task_id) = dragged.take() {
                    on_move.call((task_id, status));
                }
            },
            h3 { class: "board-column-title", "{label} ({count})" }
            div {
                class: "board-column-cards",
                for task in tasks {
                    TaskCard {
                        key: "{task.id}",
                        task: task.clone(),
                        dragged,
                        on_open,
                        on_delete,
                    }
                }
            }
        }
    }
}

fn slug(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::ToDo => "todo",
        TaskStatus::InProgress => "in-progress",
        TaskStatus::Done => "done",
    }
}

#[component]
fn TaskCard(
    task: Task,
    dragged: Signal<Option<String>>,
    on_open: EventHandler<Task>,
    on_delete: EventHandler<String>,
) -> Element {
    let mut dragged = dragged;
    let drag_id = task.id.clone();
    let delete_id = task.id.clone();
    let opened = task.clone();

    let due_label = task.due_date.as_ref().map(format_date);
    let created_label = format_date(&task.created_at);

    rsx! {
        div {
            class: "task-card",
            draggable: true,
            ondragstart: move |_| dragged.set(Some(drag_id.clone())),
            onclick: move |_| on_open.call(opened.clone()),
            div {
                class: "task-card-header",
                h4 { class: "task-card-title", "{task.title}" }
                button {
                    class: "task-card-delete",
                    title: "Delete task",
                    onclick: move |evt: Event<MouseData>| {
                        evt.stop_propagation();
                        on_delete.call(delete_id.clone());
                    },
                    Icon { icon: FaTrash, width: 12, height: 12 }
                }
            }
            if !task.description.is_empty() {
                p { class: "task-card-desc", "{task.description}" }
            }
            if let Some(due) = due_label {
                p { class: "task-card-due", "Due: {due}" }
            }
            p { class: "task-card-meta", "Created: {created_label}" }
        }
    }
}
