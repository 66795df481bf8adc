//! Read-only views over the active list.

use chrono::NaiveDateTime;

use crate::model::{Priority, Task};
use crate::sort::{SortKey, sort_tasks};

/// View criteria. The default shows every active task in list order.
#[derive(Clone, Debug, Default)]
pub struct FilterCriteria {
    pub priority: Option<Priority>,
    pub important_only: bool,
    /// Whether done tasks still sitting in the active list are shown.
    /// `None` shows them. Archived entries never appear here.
    pub include_done: Option<bool>,
    /// Case-insensitive substring of title or description.
    pub query: Option<String>,
    pub sort: SortKey,
    pub desc: bool,
}

pub fn apply<'a>(tasks: &'a [Task], criteria: &FilterCriteria) -> Vec<&'a Task> {
    let query = criteria
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase);
    let include_done = criteria.include_done.unwrap_or(true);

    let mut view: Vec<&Task> = tasks
        .iter()
        .filter(|t| criteria.priority.is_none_or(|p| t.priority == p))
        .filter(|t| !criteria.important_only || t.important)
        .filter(|t| include_done || !t.done)
        .filter(|t| query.as_deref().is_none_or(|q| task_matches(t, q)))
        .collect();

    view.sort_by_key(|t| t.order);
    if criteria.sort != SortKey::Order || criteria.desc {
        sort_tasks(&mut view, criteria.sort, criteria.desc);
    }
    view
}

pub fn is_overdue(task: &Task, now: NaiveDateTime) -> bool {
    !task.done && task.due_at < now
}

pub fn overdue(tasks: &[Task], now: NaiveDateTime) -> Vec<&Task> {
    let mut view: Vec<&Task> = tasks.iter().filter(|t| is_overdue(t, now)).collect();
    sort_tasks(&mut view, SortKey::Due, false);
    view
}

fn task_matches(task: &Task, query: &str) -> bool {
    task.title.to_lowercase().contains(query) || task.description.to_lowercase().contains(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, day)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .unwrap()
    }

    fn task(id: u64, title: &str, priority: Priority, important: bool, day: u32) -> Task {
        Task {
            id,
            title: title.into(),
            description: String::new(),
            due_at: at(day, 10),
            priority,
            done: false,
            important,
            order: id as usize - 1,
        }
    }

    fn sample() -> Vec<Task> {
        vec![
            task(1, "Buy milk", Priority::Medium, false, 3),
            task(2, "Pay rent", Priority::High, true, 1),
            task(3, "Water plants", Priority::Low, true, 2),
        ]
    }

    fn ids(view: &[&Task]) -> Vec<u64> {
        view.iter().map(|t| t.id).collect()
    }

    #[test]
    fn default_keeps_stored_order() {
        let tasks = sample();
        assert_eq!(ids(&apply(&tasks, &FilterCriteria::default())), [1, 2, 3]);
    }

    #[test]
    fn priority_is_exact_match() {
        let tasks = sample();
        let criteria = FilterCriteria {
            priority: Some(Priority::High),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&tasks, &criteria)), [2]);
    }

    #[test]
    fn important_only() {
        let tasks = sample();
        let criteria = FilterCriteria {
            important_only: true,
            ..Default::default()
        };
        assert_eq!(ids(&apply(&tasks, &criteria)), [2, 3]);
    }

    #[test]
    fn include_done_false_hides_pending_done() {
        let mut tasks = sample();
        tasks[0].done = true;
        assert_eq!(ids(&apply(&tasks, &FilterCriteria::default())), [1, 2, 3]);
        let criteria = FilterCriteria {
            include_done: Some(false),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&tasks, &criteria)), [2, 3]);
    }

    #[test]
    fn query_and_sort() {
        let tasks = sample();
        let criteria = FilterCriteria {
            query: Some("  PLANTS ".into()),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&tasks, &criteria)), [3]);

        let by_due = FilterCriteria {
            sort: SortKey::Due,
            ..Default::default()
        };
        assert_eq!(ids(&apply(&tasks, &by_due)), [2, 3, 1]);
    }

    #[test]
    fn apply_leaves_input_untouched() {
        let tasks = sample();
        let before = tasks.clone();
        let _ = apply(
            &tasks,
            &FilterCriteria {
                sort: SortKey::Priority,
                desc: true,
                ..Default::default()
            },
        );
        assert_eq!(tasks, before);
    }

    #[test]
    fn overdue_ignores_done_and_future() {
        let mut tasks = sample();
        tasks[1].done = true;
        let now = at(2, 12);
        assert!(is_overdue(&tasks[2], now));
        assert!(!is_overdue(&tasks[1], now));
        assert!(!is_overdue(&tasks[0], now));
        assert_eq!(ids(&overdue(&tasks, now)), [3]);
    }
}
