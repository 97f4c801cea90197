use std::io;
use std::path::PathBuf;

use path_absolutize::Absolutize;
use tracing::debug;

use crate::engine::{walk, FsSource};
use crate::error::UpError;
use crate::traits::{Matcher, Source};

type DefaultStart = Box<dyn Fn() -> io::Result<PathBuf>>;

// ---------------------------------------------------------------------------
// FindBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring and executing an upward search.
///
/// Created via [`upward::search()`](crate::search). Configure with chained
/// builder methods, then call [`run()`](FindBuilder::run) with a matcher.
///
/// # Example
///
/// ```rust,ignore
/// let config = upward::search()
///     .start("/projects/app/src/bin")
///     .run("Cargo.toml")?;
/// ```
pub struct FindBuilder {
    start:         Option<PathBuf>,
    default_start: Option<DefaultStart>,
    source:        Box<dyn Source>,
}

impl Default for FindBuilder {
    fn default() -> Self {
        Self {
            start:         None,
            default_start: None,
            source:        Box::new(FsSource),
        }
    }
}

impl FindBuilder {
    // ── Start directory ───────────────────────────────────────────────────

    /// The directory the search starts in. It is scanned first.
    ///
    /// Relative paths are taken from the process working directory.
    pub fn start(mut self, dir: impl Into<PathBuf>) -> Self {
        self.start = Some(dir.into());
        self
    }

    /// Where to start when no [`start()`](FindBuilder::start) is given.
    ///
    /// Lets a host inject its own notion of "here" (a project root, the
    /// directory of a config file). Without one the search starts in
    /// [`std::env::current_dir()`].
    pub fn default_start(mut self, f: impl Fn() -> io::Result<PathBuf> + 'static) -> Self {
        self.default_start = Some(Box::new(f));
        self
    }

    // ── Source ────────────────────────────────────────────────────────────

    /// Set the source that lists directories.
    ///
    /// Defaults to [`FsSource`].
    pub fn source(mut self, s: impl Source + 'static) -> Self {
        self.source = Box::new(s);
        self
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Execute the search and return the first match, if any.
    ///
    /// # Errors
    ///
    /// Fails before reading anything if the start directory is empty
    /// ([`UpError::InvalidArgument`]), or missing, unreadable or not
    /// provided by the default-start hook ([`UpError::StartDirectory`]).
    /// During the search, marker errors, jumps to visited directories and
    /// listing failures end it immediately.
    pub fn run<M: Matcher>(self, mut matcher: M) -> Result<Option<PathBuf>, UpError> {
        let start = match self.start {
            Some(dir) => dir,
            None => match self.default_start {
                Some(f) => f(),
                None => std::env::current_dir(),
            }
            .map_err(|e| {
                debug!("no default start directory: {}", e);
                UpError::StartDirectory(PathBuf::new())
            })?,
        };

        if start.as_os_str().is_empty() {
            return Err(UpError::InvalidArgument(
                "expected a directory path, got an empty string".into(),
            ));
        }

        let start = start
            .absolutize()
            .map_err(|_| UpError::StartDirectory(start.clone()))?
            .into_owned();

        if !self.source.is_readable_dir(&start) {
            return Err(UpError::StartDirectory(start));
        }

        walk(self.source.as_ref(), &mut matcher, start)
    }
}
