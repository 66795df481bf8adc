use chrono::{Local, NaiveDateTime};
use tracing::info;

use crate::error::{Error, Result};
use crate::model::{ArchiveEntry, TaskCollection, truncate_to_minute};
use crate::store::TaskStore;

/// Moves an active task to the end of the archive and closes the gap it
/// leaves in the active ordering. There is no way back.
pub fn complete_task(
    collection: &mut TaskCollection,
    id: u64,
    now: NaiveDateTime,
) -> Result<ArchiveEntry> {
    let pos = collection
        .active_position(id)
        .ok_or_else(|| Error::task_not_found(id))?;
    let mut task = collection.tasks.remove(pos);
    task.done = true;
    let entry = ArchiveEntry {
        task,
        completed_at: Some(truncate_to_minute(now)),
    };
    collection.completed.push(entry.clone());
    collection.compact_order();
    Ok(entry)
}

impl TaskStore {
    pub fn complete(&mut self, id: u64) -> Result<ArchiveEntry> {
        self.complete_at(id, Local::now().naive_local())
    }

    pub fn complete_at(&mut self, id: u64, now: NaiveDateTime) -> Result<ArchiveEntry> {
        let entry = self.edit(|c| complete_task(c, id, now))?;
        info!(id, title = %entry.task.title, "archived task");
        Ok(entry)
    }

    /// Checking a task off archives it immediately.
    pub fn toggle_done(&mut self, id: u64) -> Result<ArchiveEntry> {
        self.complete(id)
    }

    /// Oldest completion first.
    pub fn list_archive(&self) -> &[ArchiveEntry] {
        self.archive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Priority, Task};
    use chrono::NaiveDate;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .and_then(|d| d.and_hms_opt(12, 0, 30))
            .unwrap()
    }

    fn collection(titles: &[&str]) -> TaskCollection {
        let tasks = titles
            .iter()
            .enumerate()
            .map(|(i, title)| Task {
                id: i as u64 + 1,
                title: title.to_string(),
                description: String::new(),
                due_at: noon(),
                priority: Priority::Medium,
                done: false,
                important: false,
                order: i,
            })
            .collect();
        TaskCollection {
            tasks,
            ..Default::default()
        }
    }

    #[test]
    fn completing_middle_task_compacts_order() {
        let mut c = collection(&["a", "b", "c"]);
        let entry = complete_task(&mut c, 2, noon()).unwrap();

        assert!(entry.task.done);
        assert_eq!(
            entry.completed_at.map(|t| t.format("%S").to_string()),
            Some("00".to_string())
        );
        assert_eq!(c.completed.len(), 1);
        let remaining: Vec<(&str, usize)> =
            c.tasks.iter().map(|t| (t.title.as_str(), t.order)).collect();
        assert_eq!(remaining, [("a", 0), ("c", 1)]);
    }

    #[test]
    fn completing_unknown_task_changes_nothing() {
        let mut c = collection(&["a"]);
        let before = c.clone();
        assert!(matches!(
            complete_task(&mut c, 9, noon()),
            Err(Error::NotFound(_))
        ));
        assert_eq!(c, before);
    }

    #[test]
    fn archive_keeps_completion_order() {
        let mut c = collection(&["a", "b", "c"]);
        complete_task(&mut c, 3, noon()).unwrap();
        complete_task(&mut c, 1, noon()).unwrap();
        let archived: Vec<u64> = c.completed.iter().map(|e| e.task.id).collect();
        assert_eq!(archived, [3, 1]);
    }
}
