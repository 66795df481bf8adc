use tracing::debug;

use crate::error::{Error, Result};
use crate::model::Task;
use crate::store::TaskStore;

/// Pulls task `id` out of the list and reinserts it at `new_index`. Everyone
/// else keeps their relative order; `order` is renumbered afterwards.
pub fn move_task(tasks: &mut Vec<Task>, id: u64, new_index: usize) -> Result<()> {
    let len = tasks.len();
    if new_index >= len {
        return Err(Error::OutOfRange {
            index: new_index,
            len,
        });
    }
    let from = tasks
        .iter()
        .position(|t| t.id == id)
        .ok_or_else(|| Error::task_not_found(id))?;

    let task = tasks.remove(from);
    tasks.insert(new_index, task);
    for (idx, task) in tasks.iter_mut().enumerate() {
        task.order = idx;
    }
    Ok(())
}

/// Target index for a relative drag of `delta` rows, clamped to the list.
pub fn shifted_index(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    current.saturating_add_signed(delta).min(len - 1)
}

impl TaskStore {
    pub fn move_to(&mut self, id: u64, new_index: usize) -> Result<()> {
        self.edit(|c| move_task(&mut c.tasks, id, new_index))?;
        debug!(id, new_index, "moved task");
        Ok(())
    }
}
