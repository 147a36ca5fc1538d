//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod prefs;
pub use prefs::make_prefs;

mod cell;
pub use cell::SignalCell;

mod auth;
pub use auth::{use_api, use_auth, use_caches, AuthProvider, AuthState, LogoutButton};

mod theme;
pub use theme::{apply_theme, load_theme, Theme, ThemeProvider, ThemeSignal, ThemeToggle};

mod board;
pub use board::KanbanBoard;

mod dialogs;
pub use dialogs::{ModalOverlay, NewProjectDialog, NewTaskDialog};

mod comments;
pub use comments::CommentSection;

mod attachments;
pub use attachments::AttachmentsPanel;

mod notifications;
pub use notifications::{
    use_notification_poll, NotificationBell, NOTIFICATION_DISPLAY_LIMIT, NOTIFICATION_POLL_SECS,
};

mod team;
pub use team::TeamDialog;

mod dashboard;
pub use dashboard::{ProjectOverview, StatTile};

/// Shared date formatting so cards, comments, and notifications agree.
pub(crate) fn format_date(date: &chrono::DateTime<chrono::Utc>) -> String {
    date.format("%b %e, %Y").to_string()
}

pub(crate) fn format_datetime(date: &chrono::DateTime<chrono::Utc>) -> String {
    date.format("%b %e, %Y %H:%M").to_string()
}

/// Human-readable byte size for attachment rows.
pub(crate) fn format_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;
    if bytes >= MIB {
        format!("{:.1} MiB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1} KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{bytes} B")
    }
}

/// A dismissible inline error banner, used near the action that failed.
#[component]
pub fn ErrorBanner(message: String, on_dismiss: EventHandler<()>) -> Element {
    rsx! {
        div {
            class: "error-banner",
            span { "{message}" }
            button {
                class: "error-banner-dismiss",
                onclick: move |_| on_dismiss.call(()),
                "\u{00d7}"
            }
        }
    }
}
