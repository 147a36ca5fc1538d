//! Comment thread for a task: top-level comments with their replies, a
//! composer at the bottom, and author-only edit/delete controls.
//!
//! Presentational: grouping and permission checks come from the store; the
//! caller performs the actual calls and owns the error surface.

use dioxus::prelude::*;
use store::comments::{can_modify, threads};
use store::{Comment, Identity};

use crate::format_datetime;

#[component]
pub fn CommentSection(
    identity: Identity,
    comments: Vec<Comment>,
    on_submit: EventHandler<(String, Option<String>)>,
    on_edit: EventHandler<(String, String)>,
    on_delete: EventHandler<String>,
) -> Element {
    let mut draft = use_signal(String::new);
    // (comment id, author name) of the comment being replied to.
    let mut reply_to = use_signal(|| Option::<(String, String)>::None);

    let handle_submit = move |_| {
        let content = draft().trim().to_string();
        if content.is_empty() {
            return;
        }
        let parent = reply_to().map(|(id, _)| id);
        on_submit.call((content, parent));
        draft.set(String::new());
        reply_to.set(None);
    };

    let grouped = threads(&comments);
    let count = comments.len();

    rsx! {
        section {
            class: "comments",
            h3 { class: "comments-title", "Comments ({count})" }

            div {
                class: "comments-list",
                for thread in grouped {
                    div {
                        key: "{thread.root.id}",
                        class: "comment-thread",
                        CommentRow {
                            identity: identity.clone(),
                            comment: thread.root.clone(),
                            on_edit,
                            on_delete,
                            on_reply: move |(id, author): (String, String)| {
                                reply_to.set(Some((id, author)));
                            },
                        }
                        for reply in thread.replies {
                            div {
                                key: "{reply.id}",
                                class: "comment-reply",
                                CommentRow {
                                    identity: identity.clone(),
                                    comment: reply.clone(),
                                    on_edit,
                                    on_delete,
                                    on_reply: move |(id, author): (String, String)| {
                                        reply_to.set(Some((id, author)));
                                    },
                                }
                            }
                        }
                    }
                }
            }

            div {
                class: "comment-composer",
                if let Some((_, author)) = reply_to() {
                    div {
                        class: "comment-reply-hint",
                        span { "Replying to {author}" }
                        button {
                            onclick: move |_| reply_to.set(None),
                            "\u{00d7}"
                        }
                    }
                }
                textarea {
                    placeholder: "Write a comment...",
                    value: draft(),
                    oninput: move |evt: FormEvent| draft.set(evt.value()),
                }
                button {
                    class: "btn btn--primary",
                    onclick: handle_submit,
                    "Post"
                }
            }
        }
    }
}

#[component]
fn CommentRow(
    identity: Identity,
    comment: Comment,
    on_edit: EventHandler<(String, String)>,
    on_delete: EventHandler<String>,
    on_reply: EventHandler<(String, String)>,
) -> Element {
    let mut editing = use_signal(|| false);
    let mut edit_text = use_signal(String::new);

    let own = can_modify(&identity, &comment);
    let edited = comment.updated_at > comment.created_at;
    let when = format_datetime(&comment.created_at);

    let edit_id = comment.id.clone();
    let delete_id = comment.id.clone();
    let reply_id = comment.id.clone();
    let reply_author = comment.author_name.clone();
    let original = comment.content.clone();

    let save_edit = move |_| {
        let content = edit_text().trim().to_string();
        if content.is_empty() {
            return;
        }
        on_edit.call((edit_id.clone(), content));
        editing.set(false);
    };

    rsx! {
        div {
            class: "comment",
            div {
                class: "comment-header",
                span { class: "comment-author", "{comment.author_name}" }
                span { class: "comment-time", "{when}" }
                if edited {
                    span { class: "comment-edited", "(edited)" }
                }
            }

            if editing() {
                div {
                    class: "comment-edit",
                    textarea {
                        value: edit_text(),
                        oninput: move |evt: FormEvent| edit_text.set(evt.value()),
                    }
                    button { class: "btn btn--primary", onclick: save_edit, "Save" }
                    button {
                        class: "btn btn--outline",
                        onclick: move |_| editing.set(false),
                        "Cancel"
                    }
                }
            } else {
                p { class: "comment-content", "{comment.content}" }
            }

            div {
                class: "comment-actions",
                button {
                    onclick: move |_| on_reply.call((reply_id.clone(), reply_author.clone())),
                    "Reply"
                }
                if own {
                    button {
                        onclick: move |_| {
                            edit_text.set(original.clone());
                            editing.set(true);
                        },
                        "Edit"
                    }
                    button {
                        class: "comment-delete",
                        onclick: move |_| on_delete.call(delete_id.clone()),
                        "Delete"
                    }
                }
            }
        }
    }
}
