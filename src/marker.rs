use std::path::{Path, PathBuf};

use path_absolutize::Absolutize;

use crate::error::UpError;

// ---------------------------------------------------------------------------
// Markers
// ---------------------------------------------------------------------------

/// Redirects the search to another, not yet visited directory.
///
/// Built with [`jump()`](crate::jump). The target is validated eagerly: it
/// must be absolute and name an existing directory at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JumpMarker {
    path: PathBuf,
}

impl JumpMarker {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, UpError> {
        let path = path.as_ref();

        if !path.is_absolute() {
            return Err(UpError::RelativeJump(path.to_path_buf()));
        }

        if !path.is_dir() {
            return Err(UpError::JumpNotDirectory(path.to_path_buf()));
        }

        // Collapse `.`/`..` so the visited check compares like with like.
        let path = path
            .absolutize()
            .map_err(|source| UpError::Io {
                path: path.to_path_buf(),
                source,
            })?
            .into_owned();

        Ok(Self { path })
    }

    /// The directory the search continues from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn into_path(self) -> PathBuf {
        self.path
    }
}

/// Abandons the rest of the current directory and skips ancestor levels.
///
/// `levels == 1` just moves on to the parent. `levels == n` makes the
/// n-th ancestor of the current directory the next one scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkipMarker {
    levels: usize,
}

impl SkipMarker {
    pub fn new(levels: usize) -> Result<Self, UpError> {
        if levels < 1 {
            return Err(UpError::InvalidSkipLevels(levels));
        }
        Ok(Self { levels })
    }

    pub fn levels(&self) -> usize {
        self.levels
    }
}

/// Terminates the search, optionally with an override result.
///
/// A relative result is resolved against the directory being scanned when
/// the stop was returned; an absolute one is used as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopMarker {
    result: Option<PathBuf>,
}

impl StopMarker {
    pub fn new(result: Option<PathBuf>) -> Self {
        Self { result }
    }

    pub fn result(&self) -> Option<&Path> {
        self.result.as_deref()
    }

    pub(crate) fn into_result(self) -> Option<PathBuf> {
        self.result
    }
}

// ---------------------------------------------------------------------------
// Signal
// ---------------------------------------------------------------------------

/// What a [`Matcher`](crate::Matcher) tells the engine after seeing one entry.
///
/// Interpreted by exhaustive match, so a marker can never be mistaken for a
/// plain acceptance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// Not a match, look at the next entry.
    Continue,

    /// This entry is the result.
    Accept,

    /// Leave the current directory (and possibly more ancestors) behind.
    Skip(SkipMarker),

    /// End the search, with or without an override result.
    Stop(StopMarker),

    /// Continue the search from another directory.
    Jump(JumpMarker),
}

impl From<bool> for Signal {
    fn from(matched: bool) -> Self {
        if matched {
            Signal::Accept
        } else {
            Signal::Continue
        }
    }
}

impl From<SkipMarker> for Signal {
    fn from(marker: SkipMarker) -> Self {
        Signal::Skip(marker)
    }
}

impl From<StopMarker> for Signal {
    fn from(marker: StopMarker) -> Self {
        Signal::Stop(marker)
    }
}

impl From<JumpMarker> for Signal {
    fn from(marker: JumpMarker) -> Self {
        Signal::Jump(marker)
    }
}

// ---------------------------------------------------------------------------
// IntoSignal
// ---------------------------------------------------------------------------

/// Anything a matcher callback may return.
///
/// Covers `bool`, [`Signal`], the three markers, and `Result`s of those, so a
/// callback can hand back `skip(2)` as is and a failed marker construction
/// propagates out of [`find()`](crate::find).
pub trait IntoSignal {
    fn into_signal(self) -> Result<Signal, UpError>;
}

impl IntoSignal for Signal {
    fn into_signal(self) -> Result<Signal, UpError> {
        Ok(self)
    }
}

impl IntoSignal for bool {
    fn into_signal(self) -> Result<Signal, UpError> {
        Ok(self.into())
    }
}

impl IntoSignal for SkipMarker {
    fn into_signal(self) -> Result<Signal, UpError> {
        Ok(self.into())
    }
}

impl IntoSignal for StopMarker {
    fn into_signal(self) -> Result<Signal, UpError> {
        Ok(self.into())
    }
}

impl IntoSignal for JumpMarker {
    fn into_signal(self) -> Result<Signal, UpError> {
        Ok(self.into())
    }
}

impl<T: IntoSignal> IntoSignal for Result<T, UpError> {
    fn into_signal(self) -> Result<Signal, UpError> {
        self.and_then(IntoSignal::into_signal)
    }
}
