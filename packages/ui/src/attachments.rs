//! Attachment list and upload control for a task.
//!
//! Files are read through the platform file engine and handed upward as
//! raw bytes; the size gate lives in the action layer so an oversized pick
//! is refused before anything leaves the machine.

use dioxus::prelude::*;
use store::FileAttachment;

use crate::icons::{FaPaperclip, FaTrash};
use crate::{format_size, Icon};

#[component]
pub fn AttachmentsPanel(
    files: Vec<FileAttachment>,
    on_upload: EventHandler<(String, String, Vec<u8>)>,
    on_delete: EventHandler<String>,
) -> Element {
    let count = files.len();

    let handle_pick = move |evt: FormEvent| async move {
        let Some(engine) = evt.files() else {
            return;
        };
        for name in engine.files() {
            if let Some(bytes) = engine.read_file(&name).await {
                let content_type = content_type_for(&name).to_string();
                on_upload.call((name, content_type, bytes));
            }
        }
    };

    rsx! {
        section {
            class: "attachments",
            h3 {
                class: "attachments-title",
                Icon { icon: FaPaperclip, width: 13, height: 13 }
                " Attachments ({count})"
            }

            ul {
                class: "attachments-list",
                for file in files {
                    AttachmentRow { key: "{file.id}", file: file.clone(), on_delete }
                }
            }

            label {
                class: "attachments-upload btn btn--outline",
                "Add file"
                input {
                    r#type: "file",
                    class: "attachments-input",
                    onchange: handle_pick,
                }
            }
        }
    }
}

#[component]
fn AttachmentRow(file: FileAttachment, on_delete: EventHandler<String>) -> Element {
    let size = format_size(file.size_bytes);
    let delete_id = file.id.clone();

    rsx! {
        li {
            class: "attachment",
            span { class: "attachment-name", "{file.filename}" }
            span { class: "attachment-size", "{size}" }
            button {
                class: "attachment-delete",
                title: "Delete attachment",
                onclick: move |_| on_delete.call(delete_id.clone()),
                Icon { icon: FaTrash, width: 12, height: 12 }
            }
        }
    }
}

/// Content type from the file extension; the backend treats the payload as
/// opaque either way.
fn content_type_for(filename: &str) -> &'static str {
    match filename.rsplit('.').next().unwrap_or("") {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "pdf" => "application/pdf",
        "txt" | "log" => "text/plain",
        "md" => "text/markdown",
        "json" => "application/json",
        "zip" => "application/zip",
        _ => "application/octet-stream",
    }
}
