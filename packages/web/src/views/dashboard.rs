//! Analytics dashboard: totals across every accessible project plus a
//! per-project completion breakdown, computed client-side from fresh task
//! listings.

use dioxus::prelude::*;
use store::stats::{project_stats, ProjectStats};
use store::{actions, RemoteApi};
use ui::{
    use_api, use_auth, use_caches, LogoutButton, NotificationBell, ProjectOverview, SignalCell,
    StatTile, ThemeToggle,
};

use crate::Route;

#[component]
pub fn Dashboard() -> Element {
    let api = use_api();
    let auth = use_auth();
    let caches = use_caches();
    let nav = use_navigator();

    let mut rows = use_signal(Vec::<(String, ProjectStats)>::new);
    let mut totals = use_signal(ProjectStats::default);
    let mut loading = use_signal(|| true);

    use_effect(move || {
        if !auth().loading && auth().session.is_none() {
            nav.replace(Route::Login {});
        }
    });

    let api_load = api.clone();
    let _loader = use_resource(move || {
        let api = api_load.clone();
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
            let projects = caches.peek().projects.items().to_vec();

            let now = chrono::Utc::now();
            let mut collected = Vec::new();
            let mut sum = ProjectStats::default();
            for project in &projects {
                match api.list_tasks(&project.id).await {
                    Ok(tasks) => {
                        let stats = project_stats(&tasks, now);
                        sum.merge(&stats);
                        collected.push((project.title.clone(), stats));
                    }
                    Err(err) => {
                        tracing::warn!("task listing for {} failed: {err}", project.title);
                    }
                }
            }
            rows.set(collected);
            totals.set(sum);
            loading.set(false);
        }
    });

    let summary = totals();
    let total_label = summary.total.to_string();
    let in_progress_label = summary.in_progress.to_string();
    let done_label = format!("{}%", summary.completion_pct());
    let overdue_label = summary.overdue.to_string();

    rsx! {
        div {
            class: "page",

            header {
                class: "topbar",
                div {
                    class: "topbar-brand",
                    h1 { "TaskFlow" }
                    span { class: "topbar-section", "Dashboard" }
                }
                div {
                    class: "topbar-actions",
                    Link { class: "topbar-link", to: Route::Board {}, "Board" }
                    NotificationBell {}
                    ThemeToggle {}
                    LogoutButton { class: "btn btn--danger" }
                }
            }

            main {
                class: "dashboard-page",

                if loading() {
                    p { class: "dashboard-loading", "Crunching the numbers..." }
                } else {
                    div {
                        class: "stat-row",
                        StatTile { label: "Tasks", value: total_label }
                        StatTile { label: "In progress", value: in_progress_label }
                        StatTile { label: "Completed", value: done_label }
                        StatTile { label: "Overdue", value: overdue_label }
                    }

                    div {
                        class: "dashboard-projects",
                        for (title, stats) in rows() {
                            ProjectOverview {
                                key: "{title}",
                                title: title.clone(),
                                stats: stats.clone(),
                            }
                        }
                    }
                }
            }
        }
    }
}
