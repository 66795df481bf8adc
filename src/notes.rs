use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::Result;
use crate::storage::{read_text, write_text};

/// Plain-text notes for one profile, read and written whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDocument {
    path: PathBuf,
    pub content: String,
}

impl NoteDocument {
    /// A missing file reads as an empty document.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = read_text(&path)?;
        debug!(path = %path.display(), chars = content.len(), "loaded notes");
        Ok(Self { path, content })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append_line(&mut self, line: &str) {
        if !self.content.is_empty() && !self.content.ends_with('\n') {
            self.content.push('\n');
        }
        self.content.push_str(line);
        self.content.push('\n');
    }

    pub fn save(&self) -> Result<()> {
        write_text(&self.path, &self.content)
    }
}
