//! Kanban board partitioning and move planning.

use crate::models::{Task, TaskStatus};

/// The three fixed columns, in display order.
pub const BUCKETS: [TaskStatus; 3] = [TaskStatus::ToDo, TaskStatus::InProgress, TaskStatus::Done];

/// A project's tasks split into the fixed columns. Within a column, tasks
/// keep server response order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoardColumns {
    pub todo: Vec<Task>,
    pub in_progress: Vec<Task>,
    pub done: Vec<Task>,
}

impl BoardColumns {
    pub fn column(&self, status: TaskStatus) -> &[Task] {
        match status {
            TaskStatus::ToDo => &self.todo,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Done => &self.done,
        }
    }
}

/// Partition tasks by exact status match. A task whose status matches none
/// of the three columns is shown nowhere; it is not coerced into a default
/// column.
pub fn partition(tasks: &[Task]) -> BoardColumns {
    let mut columns = BoardColumns::default();
    for task in tasks {
        match task.bucket() {
            Some(TaskStatus::ToDo) => columns.todo.push(task.clone()),
            Some(TaskStatus::InProgress) => columns.in_progress.push(task.clone()),
            Some(TaskStatus::Done) => columns.done.push(task.clone()),
            None => {}
        }
    }
    columns
}

/// What a drop onto a column should do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MovePlan {
    /// Dropped onto the column it is already in: no remote call.
    NoOp,
    /// A real move. `previous` is the status string to restore if the
    /// remote update fails.
    Move { previous: String },
}

pub fn plan_move(task: &Task, target: TaskStatus) -> MovePlan {
    if task.status == target.as_str() {
        MovePlan::NoOp
    } else {
        MovePlan::Move {
            previous: task.status.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn task(id: &str, status: &str) -> Task {
        Task {
            id: id.into(),
            project_id: "p1".into(),
            title: format!("task {id}"),
            description: String::new(),
            status: status.into(),
            due_date: None,
            assignee_id: None,
            created_by: "u1".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn partition_preserves_response_order_within_columns() {
        let tasks = vec![
            task("a", "Done"),
            task("b", "To Do"),
            task("c", "To Do"),
            task("d", "In Progress"),
        ];
        let columns = partition(&tasks);

        let todo: Vec<&str> = columns.todo.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(todo, ["b", "c"]);
        assert_eq!(columns.in_progress.len(), 1);
        assert_eq!(columns.done.len(), 1);
    }

    #[test]
    fn unrecognized_status_lands_in_no_column() {
        let tasks = vec![task("a", "Blocked"), task("b", "to do"), task("c", "To Do")];
        let columns = partition(&tasks);

        let total = columns.todo.len() + columns.in_progress.len() + columns.done.len();
        assert_eq!(total, 1);
        assert_eq!(columns.todo[0].id, "c");
    }

    #[test]
    fn dropping_onto_the_current_column_is_a_noop() {
        let t = task("a", "In Progress");
        assert_eq!(plan_move(&t, TaskStatus::InProgress), MovePlan::NoOp);
        assert_eq!(
            plan_move(&t, TaskStatus::Done),
            MovePlan::Move { previous: "In Progress".into() }
        );
    }

    #[test]
    fn moves_off_an_unrecognized_status_keep_it_for_rollback() {
        let t = task("a", "Blocked");
        assert_eq!(
            plan_move(&t, TaskStatus::ToDo),
            MovePlan::Move { previous: "Blocked".into() }
        );
    }
}
