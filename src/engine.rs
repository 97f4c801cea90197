use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use path_absolutize::Absolutize;
use tracing::{debug, trace};

use crate::error::UpError;
use crate::marker::Signal;
use crate::traits::{Entries, Matcher, Source};

// ---------------------------------------------------------------------------
// FsSource
// ---------------------------------------------------------------------------

/// Lists real directories, one level deep, with nothing filtered out.
///
/// Hidden files, `.gitignore`d files and the like are all yielded: an upward
/// search has to see exactly what is on disk. Symlinks are not followed and
/// the listing is not sorted.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl Source for FsSource {
    fn entries(&self, dir: &Path) -> Result<Entries<'_>, UpError> {
        let walk = WalkBuilder::new(dir)
            .standard_filters(false)
            .hidden(false)
            .ignore(false)
            .parents(false)
            .follow_links(false)
            .max_depth(Some(1))
            .build();

        let entries = walk.filter_map(|res| match res {
            // Skip the directory itself
            Ok(entry) if entry.depth() == 0 => None,
            Ok(entry) => Some(Ok(entry.file_name().to_os_string())),
            Err(e) => Some(Err(map_ignore_error(e))),
        });

        Ok(Box::new(entries))
    }

    fn is_readable_dir(&self, dir: &Path) -> bool {
        dir.is_dir() && fs::read_dir(dir).is_ok()
    }
}

// ---------------------------------------------------------------------------
// walk()
// ---------------------------------------------------------------------------

/// How the scan of one directory ended.
enum Step {
    /// Entries ran out, or a skip of one level.
    Ascend,
    /// Skip this many levels in total, counting the current directory.
    Skip(usize),
    Jump(PathBuf),
    Found(OsString),
    Stop(Option<PathBuf>),
}

/// Run the upward search from `start`, which must already be absolute.
///
/// Called by `FindBuilder::run()` after validating inputs. The filesystem
/// root itself is never scanned.
pub(crate) fn walk(
    source: &dyn Source,
    matcher: &mut dyn Matcher,
    start: PathBuf,
) -> Result<Option<PathBuf>, UpError> {
    let mut current = start;
    let mut visited: Vec<PathBuf> = Vec::new();

    while !is_root(&current) {
        visited.push(current.clone());
        debug!("scanning {}", current.display());

        match scan(source, matcher, &current, &visited)? {
            Step::Ascend => {}
            Step::Skip(levels) => {
                debug!("skipping {} level(s) from {}", levels, current.display());
                for _ in 1..levels {
                    current = parent_of(&current);
                }
            }
            Step::Jump(target) => {
                debug!("jumping from {} to {}", current.display(), target.display());
                // The target is scanned next, not its parent
                current = target;
                continue;
            }
            Step::Found(name) => {
                let found = resolve(&current, Path::new(&name))?;
                debug!("found {}", found.display());
                return Ok(Some(found));
            }
            Step::Stop(None) => {
                debug!("stopped in {}", current.display());
                return Ok(None);
            }
            Step::Stop(Some(result)) => {
                let found = resolve(&current, &result)?;
                debug!("stopped in {} with {}", current.display(), found.display());
                return Ok(Some(found));
            }
        }

        current = parent_of(&current);
    }

    debug!("reached the root without a match");
    Ok(None)
}

/// Feed every entry of `dir` to the matcher until one of them ends the scan.
///
/// The listing is dropped on return, which releases the directory handle on
/// every path out of here.
fn scan(
    source: &dyn Source,
    matcher: &mut dyn Matcher,
    dir: &Path,
    visited: &[PathBuf],
) -> Result<Step, UpError> {
    for entry in source.entries(dir)? {
        let name = entry?;
        let signal = matcher.check_entry(&name, dir)?;
        trace!(name = ?name, signal = ?signal, "checked entry");

        match signal {
            Signal::Continue => {}
            Signal::Accept => return Ok(Step::Found(name)),
            Signal::Skip(marker) if marker.levels() == 1 => return Ok(Step::Ascend),
            Signal::Skip(marker) => return Ok(Step::Skip(marker.levels())),
            Signal::Stop(marker) => return Ok(Step::Stop(marker.into_result())),
            Signal::Jump(marker) => {
                if visited.iter().any(|v| v == marker.path()) {
                    return Err(UpError::VisitedPath(marker.into_path()));
                }
                return Ok(Step::Jump(marker.into_path()));
            }
        }
    }

    Ok(Step::Ascend)
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// The parent of `path`, or `path` itself at the root.
pub(crate) fn parent_of(path: &Path) -> PathBuf {
    path.parent().unwrap_or(path).to_path_buf()
}

fn is_root(path: &Path) -> bool {
    path.parent().is_none()
}

/// Resolve `name` against `dir`; absolute names are only normalized.
pub(crate) fn resolve(dir: &Path, name: &Path) -> Result<PathBuf, UpError> {
    name.absolutize_from(dir)
        .map(|p| p.into_owned())
        .map_err(|source| UpError::Io {
            path: dir.join(name),
            source,
        })
}

// ---------------------------------------------------------------------------
// Map ignore::Error to UpError
// ---------------------------------------------------------------------------

fn map_ignore_error(e: ignore::Error) -> UpError {
    map_with_path(e, PathBuf::new())
}

/// Peel off the path/depth wrappers, keeping the innermost path.
fn map_with_path(e: ignore::Error, path: PathBuf) -> UpError {
    match e {
        ignore::Error::WithPath { path, err } => map_with_path(*err, path),
        ignore::Error::WithDepth { err, .. } => map_with_path(*err, path),
        ignore::Error::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                UpError::PermissionDenied(path)
            } else {
                UpError::Io { path, source: io_err }
            }
        }
        other => UpError::Source(other.to_string()),
    }
}
