//! Aggregates for the analytics dashboard, computed from the task cache.

use chrono::{DateTime, Utc};

use crate::models::{Task, TaskStatus};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectStats {
    pub total: usize,
    pub todo: usize,
    pub in_progress: usize,
    pub done: usize,
    /// Tasks whose status matches none of the three columns.
    pub unbucketed: usize,
    /// Past their due date and not done.
    pub overdue: usize,
}

impl ProjectStats {
    /// Done tasks as a whole percentage of the total, 0 for an empty project.
    pub fn completion_pct(&self) -> u32 {
        if self.total == 0 {
            0
        } else {
            (self.done * 100 / self.total) as u32
        }
    }

    /// Fold another project's counts into this one (for the all-projects
    /// summary row).
    pub fn merge(&mut self, other: &ProjectStats) {
        self.total += other.total;
        self.todo += other.todo;
        self.in_progress += other.in_progress;
        self.done += other.done;
        self.unbucketed += other.unbucketed;
        self.overdue += other.overdue;
    }
}

pub fn project_stats(tasks: &[Task], now: DateTime<Utc>) -> ProjectStats {
    let mut stats = ProjectStats::default();
    for task in tasks {
        stats.total += 1;
        match task.bucket() {
            Some(TaskStatus::ToDo) => stats.todo += 1,
            Some(TaskStatus::InProgress) => stats.in_progress += 1,
            Some(TaskStatus::Done) => stats.done += 1,
            None => stats.unbucketed += 1,
        }
        let overdue = task.bucket() != Some(TaskStatus::Done)
            && task.due_date.is_some_and(|due| due < now);
        if overdue {
            stats.overdue += 1;
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn task(id: &str, status: &str, due_in_hours: Option<i64>) -> Task {
        let now = Utc::now();
        Task {
            id: id.into(),
            project_id: "p1".into(),
            title: format!("task {id}"),
            description: String::new(),
            status: status.into(),
            due_date: due_in_hours.map(|h| now + Duration::hours(h)),
            assignee_id: None,
            created_by: "u1".into(),
            created_at: now,
        }
    }

    #[test]
    fn counts_cover_every_task_exactly_once() {
        let tasks = vec![
            task("a", "To Do", None),
            task("b", "In Progress", Some(-2)),
            task("c", "Done", Some(-2)),
            task("d", "Blocked", None),
        ];
        let stats = project_stats(&tasks, Utc::now());

        assert_eq!(stats.total, 4);
        assert_eq!(stats.todo + stats.in_progress + stats.done + stats.unbucketed, 4);
        assert_eq!(stats.unbucketed, 1);
        // Done tasks are never overdue; unfinished past-due ones are.
        assert_eq!(stats.overdue, 1);
        assert_eq!(stats.completion_pct(), 25);
    }

    #[test]
    fn empty_project_is_zero_percent_complete() {
        assert_eq!(project_stats(&[], Utc::now()).completion_pct(), 0);
    }
}
