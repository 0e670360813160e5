use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SortError {
    #[error("{message}")]
    Argument { message: String },

    #[error("failed to open directory {}: {}", .path.display(), .source)]
    Directory { path: PathBuf, source: io::Error },

    #[error("failed to {} {}: {}", .stage, .path.display(), .source)]
    FileRead {
        path: PathBuf,
        stage: ReadStage,
        source: io::Error,
    },

    #[error("failed to allocate output buffer of {requested} byte(s)")]
    Allocation { requested: usize },
}

impl SortError {
    pub fn argument(message: impl Into<String>) -> Self {
        Self::Argument {
            message: message.into(),
        }
    }

    /// Only per-file read failures are recoverable; everything else ends the run.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::FileRead { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStage {
    Open,
    Stat,
    Read,
}

impl fmt::Display for ReadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReadStage::Open => "open",
            ReadStage::Stat => "read metadata for",
            ReadStage::Read => "read",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::path::PathBuf;

    use super::{ReadStage, SortError};

    #[test]
    fn file_read_errors_are_the_only_recoverable_kind() {
        let read = SortError::FileRead {
            path: PathBuf::from("scripts/fn.a"),
            stage: ReadStage::Open,
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert!(!read.is_fatal());
        assert!(SortError::argument("bad cutoff").is_fatal());
        assert!(SortError::Allocation { requested: 8192 }.is_fatal());
    }

    #[test]
    fn messages_name_the_failing_stage_and_path() {
        let err = SortError::FileRead {
            path: PathBuf::from("scripts/fn.a"),
            stage: ReadStage::Stat,
            source: io::Error::new(io::ErrorKind::Other, "boom"),
        };
        assert_eq!(
            err.to_string(),
            "failed to read metadata for scripts/fn.a: boom"
        );
    }
}
