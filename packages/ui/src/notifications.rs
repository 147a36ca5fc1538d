//! Notification bell, dropdown, and the background poll.

use dioxus::prelude::*;
use store::actions;
use store::{Notification, NotificationKind};

use crate::auth::{use_api, use_auth, use_caches};
use crate::cell::SignalCell;
use crate::icons::FaBell;
use crate::{format_datetime, Icon};

/// How often the notification cache is refreshed in the background. The
/// only timer-driven activity in the app.
pub const NOTIFICATION_POLL_SECS: u64 = 30;

/// The dropdown shows at most this many entries; the cache keeps them all
/// for the unread count.
pub const NOTIFICATION_DISPLAY_LIMIT: usize = 10;

/// Start the notification poll for as long as the calling component stays
/// mounted. The spawned task belongs to that component's scope, so Dioxus
/// cancels it on unmount; on top of that the loop stops itself as soon as
/// the session is gone, so a tick can never fire against a logged-out
/// client.
pub fn use_notification_poll() {
    let api = use_api();
    let auth = use_auth();
    let caches = use_caches();

    use_effect(move || {
        let api = api.clone();
        spawn(async move {
            loop {
                sleep_secs(NOTIFICATION_POLL_SECS).await;
                // Don't give up while the initial restore is still running.
                if auth.peek().loading {
                    continue;
                }
                if auth.peek().session.is_none() {
                    break;
                }
                let mut cell = SignalCell(caches);
                if let Err(err) = actions::refresh_notifications(&api, &mut cell).await {
                    // Background read: keep the stale cache, log, try again
                    // next tick.
                    tracing::debug!("notification poll failed: {err}");
                }
            }
        });
    });
}

async fn sleep_secs(secs: u64) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(std::time::Duration::from_secs(secs)).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(std::time::Duration::from_secs(secs)).await;
}

#[component]
pub fn NotificationBell() -> Element {
    let api = use_api();
    let caches = use_caches();
    let mut open = use_signal(|| false);

    let unread = caches.read().notifications.unread_count();
    let items: Vec<Notification> = caches
        .read()
        .notifications
        .items()
        .iter()
        .take(NOTIFICATION_DISPLAY_LIMIT)
        .cloned()
        .collect();

    // Callback so every dropdown row can share the same handler.
    let mark_read = use_callback(move |id: String| {
        let api = api.clone();
        spawn(async move {
            let mut cell = SignalCell(caches);
            if let Err(err) = actions::mark_notification_read(&api, &mut cell, &id).await {
                tracing::warn!("could not mark notification read: {err}");
            }
        });
    });

    rsx! {
        div {
            class: "notification-bell",
            button {
                class: "notification-bell-button",
                title: "Notifications",
                onclick: move |_| open.set(!open()),
                Icon { icon: FaBell, width: 16, height: 16 }
                if unread > 0 {
                    span { class: "notification-badge", "{unread}" }
                }
            }

            if open() {
                div {
                    class: "notification-dropdown",
                    if items.is_empty() {
                        p { class: "notification-empty", "Nothing yet" }
                    }
                    for item in items {
                        NotificationRow {
                            key: "{item.id}",
                            notification: item.clone(),
                            on_read: mark_read,
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn NotificationRow(notification: Notification, on_read: Callback<String>) -> Element {
    let id = notification.id.clone();
    let when = format_datetime(&notification.created_at);
    let kind = kind_label(notification.kind);

    rsx! {
        div {
            class: if notification.read { "notification" } else { "notification notification--unread" },
            onclick: move |_| on_read.call(id.clone()),
            div {
                class: "notification-header",
                span { class: "notification-kind", "{kind}" }
                span { class: "notification-time", "{when}" }
            }
            p { class: "notification-title", "{notification.title}" }
            if !notification.message.is_empty() {
                p { class: "notification-message", "{notification.message}" }
            }
        }
    }
}

fn kind_label(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::TaskAssignment => "Assignment",
        NotificationKind::DueDate => "Due date",
        NotificationKind::StatusChange => "Status",
        NotificationKind::Comment => "Comment",
        NotificationKind::FileUpload => "File",
        NotificationKind::Other => "Update",
    }
}
