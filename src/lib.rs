//! # upward
//!
//! Find a file by walking from a directory up toward the filesystem root.
//!
//! Each directory on the way up is listed and every entry is handed to a
//! [`Matcher`]. A literal name matches by equality. A callback sees the entry
//! name and the directory it is in, and answers with a [`Signal`]: keep going,
//! accept this entry, or steer the search with a marker.
//!
//! | Marker                | Effect                                                      |
//! |-----------------------|-------------------------------------------------------------|
//! | [`skip(n)`](skip)     | leave this directory; the n-th ancestor is scanned next     |
//! | [`stop()`](stop)      | end the search with no result                               |
//! | [`stop_with(p)`](stop_with) | end the search with `p`, relative to the current directory |
//! | [`jump(p)`](jump)     | continue from the absolute, unvisited directory `p`         |
//!
//! The filesystem root itself is never scanned.
//!
//! # Quick Start
//!
//! ```rust
//! use std::fs;
//!
//! let tmp = tempfile::tempdir().unwrap();
//! let deep = tmp.path().join("a").join("b").join("c");
//! fs::create_dir_all(&deep).unwrap();
//! fs::write(tmp.path().join("a").join("upward-quickstart-7c1e.toml"), "").unwrap();
//!
//! let found = upward::find("upward-quickstart-7c1e.toml", &deep).unwrap();
//! assert_eq!(found, Some(tmp.path().join("a").join("upward-quickstart-7c1e.toml")));
//! ```
//!
//! # Steering the Search
//!
//! ```rust
//! use std::path::Path;
//! use upward::{skip, stop, Signal, UpError};
//!
//! let tmp = tempfile::tempdir().unwrap();
//! let root = tmp.path().to_path_buf();
//! let start = root.join("a").join("b");
//! std::fs::create_dir_all(&start).unwrap();
//! std::fs::write(start.join("x.txt"), "").unwrap();
//! std::fs::write(root.join("x.txt"), "").unwrap();
//!
//! // Ignore `a/b` and `a`, never look above the temp directory.
//! let found = upward::find(
//!     |name: &str, dir: &Path| -> Result<Signal, UpError> {
//!         if dir == start {
//!             return Ok(skip(2)?.into());
//!         }
//!         if dir != root {
//!             return Ok(stop().into());
//!         }
//!         Ok((name == "x.txt").into())
//!     },
//!     &start,
//! )
//! .unwrap();
//!
//! assert_eq!(found, Some(root.join("x.txt")));
//! ```

#![forbid(unsafe_code)]

mod builder;
mod engine;
mod error;
mod marker;
mod traits;

use std::path::{Path, PathBuf};

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::FindBuilder;
pub use engine::FsSource;
pub use error::UpError;
pub use marker::{IntoSignal, JumpMarker, Signal, SkipMarker, StopMarker};
pub use traits::{Entries, Matcher, Name, Source};

// ── Entry points ──────────────────────────────────────────────────────────────

/// Create a new [`FindBuilder`] to configure and run a search.
///
/// Without [`start()`](FindBuilder::start) the search begins in the
/// working directory.
pub fn search() -> FindBuilder {
    FindBuilder::default()
}

/// Search from `start` upwards and return the first match.
///
/// Shorthand for `search().start(start).run(matcher)`. Returns `Ok(None)`
/// when the root is reached without a match, or when the matcher stopped
/// the search without a result.
pub fn find<M: Matcher>(matcher: M, start: impl AsRef<Path>) -> Result<Option<PathBuf>, UpError> {
    search().start(start.as_ref()).run(matcher)
}

// ── Markers ───────────────────────────────────────────────────────────────────

/// Continue the search from `path`, which must be an absolute path to an
/// existing directory not yet scanned in this search.
pub fn jump(path: impl AsRef<Path>) -> Result<JumpMarker, UpError> {
    JumpMarker::new(path)
}

/// Skip the rest of the current directory and `levels - 1` ancestors.
///
/// `skip(1)` moves on to the parent, `skip(2)` to the grandparent.
pub fn skip(levels: usize) -> Result<SkipMarker, UpError> {
    SkipMarker::new(levels)
}

/// End the search without a result.
pub fn stop() -> StopMarker {
    StopMarker::new(None)
}

/// End the search with `result`, resolved against the directory being scanned
/// if it is relative.
pub fn stop_with(result: impl Into<PathBuf>) -> StopMarker {
    StopMarker::new(Some(result.into()))
}
