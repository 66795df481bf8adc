use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("index {index} out of range (0..{len})")]
    OutOfRange { index: usize, len: usize },
    #[error("failed to write {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn task_not_found(id: u64) -> Self {
        Self::NotFound(format!("task #{id}"))
    }

    pub fn profile_not_found(name: &str) -> Self {
        Self::NotFound(format!("profile '{name}'"))
    }

    pub fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Persistence {
            path: path.into(),
            source,
        }
    }

    /// Process exit code used by the terminal front-end.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Persistence { .. } => 1,
            _ => 2,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
