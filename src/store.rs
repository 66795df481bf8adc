use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{
    ArchiveEntry, Priority, Task, TaskCollection, TaskDraft, TaskPatch, truncate_to_minute,
};
use crate::storage::{load_tasks, save_tasks};

/// Owns the active list and the archive. Every successful mutation is
/// written to disk before it becomes visible in memory.
#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
    collection: TaskCollection,
}

impl TaskStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let collection = load_tasks(&path);
        debug!(
            path = %path.display(),
            active = collection.tasks.len(),
            archived = collection.completed.len(),
            "opened task store"
        );
        Self { path, collection }
    }

    pub fn with_collection(path: impl Into<PathBuf>, collection: TaskCollection) -> Self {
        Self {
            path: path.into(),
            collection,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn collection(&self) -> &TaskCollection {
        &self.collection
    }

    /// Active tasks in list order.
    pub fn list(&self) -> &[Task] {
        &self.collection.tasks
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.collection.tasks.iter().find(|t| t.id == id)
    }

    pub fn add(
        &mut self,
        title: &str,
        description: &str,
        due_at: NaiveDateTime,
        priority: Priority,
    ) -> Result<Task> {
        self.create(TaskDraft {
            description: description.to_string(),
            priority,
            ..TaskDraft::new(title, due_at)
        })
    }

    /// Appends a task built from `draft` in a single write.
    pub fn create(&mut self, draft: TaskDraft) -> Result<Task> {
        let title = validate_title(&draft.title)?;
        self.edit(|c| {
            let task = Task {
                id: c.allocate_id(),
                title,
                description: draft.description.trim().to_string(),
                due_at: truncate_to_minute(draft.due_at),
                priority: draft.priority,
                done: false,
                important: draft.important,
                order: c.tasks.len(),
            };
            c.tasks.push(task.clone());
            debug!(id = task.id, order = task.order, "added task");
            Ok(task)
        })
    }

    pub fn update(&mut self, id: u64, patch: TaskPatch) -> Result<Task> {
        self.edit(|c| {
            let task = c
                .tasks
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(|| Error::task_not_found(id))?;
            if let Some(title) = patch.title.as_deref().map(validate_title).transpose()? {
                task.title = title;
            }
            if let Some(description) = patch.description {
                task.description = description.trim().to_string();
            }
            if let Some(due_at) = patch.due_at {
                task.due_at = truncate_to_minute(due_at);
            }
            if let Some(priority) = patch.priority {
                task.priority = priority;
            }
            if let Some(important) = patch.important {
                task.important = important;
            }
            debug!(id, "updated task");
            Ok(task.clone())
        })
    }

    pub fn toggle_important(&mut self, id: u64) -> Result<Task> {
        self.edit(|c| {
            let task = c
                .tasks
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(|| Error::task_not_found(id))?;
            task.important = !task.important;
            Ok(task.clone())
        })
    }

    /// Deletes from whichever collection holds `id`.
    pub fn remove(&mut self, id: u64) -> Result<()> {
        self.edit(|c| {
            if let Some(pos) = c.active_position(id) {
                c.tasks.remove(pos);
                c.compact_order();
            } else if let Some(pos) = c.completed.iter().position(|e| e.task.id == id) {
                c.completed.remove(pos);
            } else {
                return Err(Error::task_not_found(id));
            }
            debug!(id, "removed task");
            Ok(())
        })
    }

    /// First task matching `pred`, searching the active list before the archive.
    pub fn find(&self, pred: impl Fn(&Task) -> bool) -> Option<&Task> {
        self.collection
            .tasks
            .iter()
            .chain(self.collection.completed.iter().map(|e| &e.task))
            .find(|t| pred(t))
    }

    pub fn archive(&self) -> &[ArchiveEntry] {
        &self.collection.completed
    }

    /// Writes the current state unconditionally, e.g. on shutdown.
    pub fn save(&self) -> Result<()> {
        save_tasks(&self.path, &self.collection)
    }

    /// Runs `f` against a copy of the collection, persists the copy, then
    /// swaps it in. Nothing changes in memory when `f` or the write fails.
    pub(crate) fn edit<R>(
        &mut self,
        f: impl FnOnce(&mut TaskCollection) -> Result<R>,
    ) -> Result<R> {
        let mut next = self.collection.clone();
        let out = f(&mut next)?;
        save_tasks(&self.path, &next)?;
        self.collection = next;
        Ok(out)
    }
}

fn validate_title(title: &str) -> Result<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(Error::validation("task title must not be empty"));
    }
    Ok(trimmed.to_string())
}
