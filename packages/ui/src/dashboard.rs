//! Dashboard widgets: stat tiles and per-project completion meters, all
//! computed from the caches. Plain CSS bars; no chart engine.

use dioxus::prelude::*;
use store::stats::ProjectStats;

#[component]
pub fn StatTile(label: String, value: String) -> Element {
    rsx! {
        div {
            class: "stat-tile",
            span { class: "stat-tile-value", "{value}" }
            span { class: "stat-tile-label", "{label}" }
        }
    }
}

/// One project's row on the dashboard: bucket counts and a completion bar.
#[component]
pub fn ProjectOverview(title: String, stats: ProjectStats) -> Element {
    let pct = stats.completion_pct();

    rsx! {
        div {
            class: "project-overview",
            div {
                class: "project-overview-header",
                h3 { class: "project-overview-title", "{title}" }
                span { class: "project-overview-pct", "{pct}% done" }
            }
            div {
                class: "completion-bar",
                div {
                    class: "completion-bar-fill",
                    style: "width: {pct}%",
                }
            }
            div {
                class: "project-overview-counts",
                span { "To Do: {stats.todo}" }
                span { "In Progress: {stats.in_progress}" }
                span { "Done: {stats.done}" }
                if stats.unbucketed > 0 {
                    span { class: "project-overview-unbucketed", "Other: {stats.unbucketed}" }
                }
                if stats.overdue > 0 {
                    span { class: "project-overview-overdue", "Overdue: {stats.overdue}" }
                }
            }
        }
    }
}
