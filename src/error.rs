use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UpError {
    // Call site
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("starting directory {0:?} does not exist or is not readable")]
    StartDirectory(PathBuf),

    // Markers
    #[error("jump only accepts absolute paths, {0:?} given")]
    RelativeJump(PathBuf),

    #[error("jump target {0:?} is not a directory")]
    JumpNotDirectory(PathBuf),

    #[error("skip only accepts a positive, non-zero level number, got {0}")]
    InvalidSkipLevels(usize),

    // Traversal
    #[error("jump target {0:?} has already been visited")]
    VisitedPath(PathBuf),

    #[error("permission denied")]
    PermissionDenied(PathBuf),

    #[error("IO error")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Third-party extensibility
    #[error("source error: {0}")]
    Source(String),

    #[error("matcher error: {0}")]
    Matcher(String),
}

impl UpError {
    /// The path this error occurred at, if applicable.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::StartDirectory(p)
            | Self::RelativeJump(p)
            | Self::JumpNotDirectory(p)
            | Self::VisitedPath(p)
            | Self::PermissionDenied(p)
            | Self::Io { path: p, .. } => Some(p),
            _ => None,
        }
    }

    /// Whether this error came from constructing a marker with an
    /// out-of-contract payload (relative or missing jump target, zero skip levels).
    pub fn is_invalid_marker(&self) -> bool {
        matches!(
            self,
            Self::RelativeJump(_) | Self::JumpNotDirectory(_) | Self::InvalidSkipLevels(_)
        )
    }
}
