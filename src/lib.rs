pub mod app;
pub mod archive;
pub mod cli;
pub mod display;
pub mod error;
pub mod export;
pub mod filter;
pub mod model;
pub mod notes;
pub mod profile;
pub mod reorder;
pub mod sort;
pub mod storage;
pub mod store;
pub mod util;

pub use app::run;
pub use error::{Error, Result};
pub use filter::FilterCriteria;
pub use model::{ArchiveEntry, Priority, Task, TaskCollection, TaskDraft, TaskPatch};
pub use notes::NoteDocument;
pub use profile::ProfileManager;
pub use store::TaskStore;
