use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Wire format of `due` and `completed_at`, e.g. `01.01.2025 10:00`.
pub const DUE_FORMAT: &str = "%d.%m.%Y %H:%M";

pub const DEFAULT_TASKS_FILE: &str = "tasks.json";

#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum Priority {
    #[serde(alias = "low", alias = "Низкий")]
    Low,
    #[default]
    #[serde(alias = "medium", alias = "Средний")]
    Medium,
    #[serde(alias = "high", alias = "Высокий")]
    High,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" | "низкий" => Ok(Priority::Low),
            "medium" | "средний" => Ok(Priority::Medium),
            "high" | "высокий" => Ok(Priority::High),
            _ => Err("expected low|medium|high".to_string()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub id: u64,
    #[serde(rename = "task")]
    pub title: String,
    #[serde(rename = "desc", default)]
    pub description: String,
    #[serde(rename = "due", with = "due_format")]
    pub due_at: NaiveDateTime,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub important: bool,
    /// Position within the active list; meaningless once archived.
    #[serde(default)]
    pub order: usize,
}

/// A task moved out of the active list. Append-only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveEntry {
    #[serde(flatten)]
    pub task: Task,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "opt_due_format"
    )]
    pub completed_at: Option<NaiveDateTime>,
}

/// The persisted unit: active tasks plus the archive.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCollection {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub completed: Vec<ArchiveEntry>,
    /// Highest id ever handed out, so ids of deleted tasks are not reused.
    #[serde(default)]
    pub last_id: u64,
}

/// Input for creating a task.
#[derive(Clone, Debug)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub due_at: NaiveDateTime,
    pub priority: Priority,
    pub important: bool,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>, due_at: NaiveDateTime) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            due_at,
            priority: Priority::default(),
            important: false,
        }
    }
}

/// Field replacements for `TaskStore::update`. `None` keeps the current value.
#[derive(Clone, Debug, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_at: Option<NaiveDateTime>,
    pub priority: Option<Priority>,
    pub important: Option<bool>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_at.is_none()
            && self.priority.is_none()
            && self.important.is_none()
    }
}

impl TaskCollection {
    pub fn next_id(&self) -> u64 {
        self.tasks
            .iter()
            .map(|t| t.id)
            .chain(self.completed.iter().map(|e| e.task.id))
            .max()
            .unwrap_or(0)
            .max(self.last_id)
            + 1
    }

    /// Hands out the next id and records it as used.
    pub fn allocate_id(&mut self) -> u64 {
        let id = self.next_id();
        self.last_id = id;
        id
    }

    pub fn active_position(&self, id: u64) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    /// Reassigns `order` to match list positions.
    pub fn compact_order(&mut self) {
        for (idx, task) in self.tasks.iter_mut().enumerate() {
            task.order = idx;
        }
    }

    /// Repairs a freshly loaded snapshot: active tasks are put in stored
    /// `order` and renumbered, entries without an id get a fresh one.
    pub fn normalize(&mut self) {
        self.tasks.sort_by_key(|t| t.order);
        self.compact_order();

        let mut next_id = self.next_id();
        let missing = self
            .tasks
            .iter_mut()
            .filter(|t| t.id == 0)
            .chain(self.completed.iter_mut().map(|e| &mut e.task).filter(|t| t.id == 0));
        let mut assigned = false;
        for task in missing {
            task.id = next_id;
            next_id += 1;
            assigned = true;
        }
        if assigned {
            self.last_id = next_id - 1;
        }
    }
}

/// Drops seconds so values survive the minute-precision wire format.
pub fn truncate_to_minute(value: NaiveDateTime) -> NaiveDateTime {
    value
        .with_second(0)
        .and_then(|v| v.with_nanosecond(0))
        .unwrap_or(value)
}

mod due_format {
    use super::DUE_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(DUE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(raw.trim(), DUE_FORMAT).map_err(serde::de::Error::custom)
    }
}

mod opt_due_format {
    use super::DUE_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_some(&v.format(DUE_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| NaiveDateTime::parse_from_str(s.trim(), DUE_FORMAT))
            .transpose()
            .map_err(serde::de::Error::custom)
    }
}
