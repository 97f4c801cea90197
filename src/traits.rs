use std::ffi::{OsStr, OsString};
use std::path::Path;

use crate::error::UpError;
use crate::marker::{IntoSignal, Signal};

/// The entries of one directory, as yielded by a [`Source`].
pub type Entries<'a> = Box<dyn Iterator<Item = Result<OsString, UpError>> + 'a>;

/// Lists directories for the engine.
///
/// The default is [`FsSource`](crate::FsSource), which reads the real
/// filesystem. Implement this to search a virtual tree or to control listing
/// order in tests.
///
/// # Resource Handling
///
/// The engine drops the returned iterator as soon as it leaves a directory,
/// whether the entries ran out, a marker cut the scan short, or an error
/// was raised. Sources holding an open handle should release it on drop.
///
/// # Error Handling
///
/// Listing failures should be yielded as `Err(UpError)`. The engine treats
/// every error as fatal and returns it from `find`.
pub trait Source {
    /// The names directly inside `dir`, without `.` and `..`, in whatever
    /// order the underlying store produces them.
    fn entries(&self, dir: &Path) -> Result<Entries<'_>, UpError>;

    /// Whether `dir` exists, is a directory, and can be listed.
    fn is_readable_dir(&self, dir: &Path) -> bool;
}

/// Decides, entry by entry, how the search proceeds.
///
/// Implemented for literal names (`&str`, `String`, [`Name`]) and for any
/// `FnMut(&str, &Path) -> S` where `S` is [`IntoSignal`], i.e. a closure that
/// returns `bool`, a [`Signal`], a marker, or a `Result` of one of those.
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use upward::{Matcher, Signal, UpError};
///
/// /// Accepts the first entry with the given extension.
/// struct Extension(&'static str);
///
/// impl Matcher for Extension {
///     fn check(&mut self, name: &str, _dir: &Path) -> Result<Signal, UpError> {
///         Ok(Path::new(name).extension().map_or(false, |e| e == std::ffi::OsStr::new(self.0)).into())
///     }
/// }
///
/// let mut m = Extension("toml");
/// assert_eq!(m.check("Cargo.toml", Path::new("/")).unwrap(), Signal::Accept);
/// assert_eq!(m.check("main.rs", Path::new("/")).unwrap(), Signal::Continue);
/// ```
pub trait Matcher {
    /// Inspect `name`, found in `dir`, and tell the engine what to do next.
    fn check(&mut self, name: &str, dir: &Path) -> Result<Signal, UpError>;

    /// Called by the engine with the raw entry name.
    ///
    /// Defaults to [`check()`](Matcher::check) on the lossy UTF-8 form of
    /// the name. Literal matchers compare the raw name instead, so a name
    /// that is not valid UTF-8 never equals one that merely looks like it.
    fn check_entry(&mut self, name: &OsStr, dir: &Path) -> Result<Signal, UpError> {
        self.check(&name.to_string_lossy(), dir)
    }
}

/// Matches an entry whose name is exactly the given string.
///
/// Any string is accepted; one that cannot be an entry name (empty, or
/// containing a separator) simply never matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name(pub String);

impl Matcher for Name {
    fn check(&mut self, name: &str, _dir: &Path) -> Result<Signal, UpError> {
        Ok((name == self.0).into())
    }

    fn check_entry(&mut self, name: &OsStr, _dir: &Path) -> Result<Signal, UpError> {
        Ok((name == OsStr::new(&self.0)).into())
    }
}

impl Matcher for &str {
    fn check(&mut self, name: &str, _dir: &Path) -> Result<Signal, UpError> {
        Ok((name == *self).into())
    }

    fn check_entry(&mut self, name: &OsStr, _dir: &Path) -> Result<Signal, UpError> {
        Ok((name == OsStr::new(*self)).into())
    }
}

impl Matcher for String {
    fn check(&mut self, name: &str, _dir: &Path) -> Result<Signal, UpError> {
        Ok((name == self.as_str()).into())
    }

    fn check_entry(&mut self, name: &OsStr, _dir: &Path) -> Result<Signal, UpError> {
        Ok((name == OsStr::new(self.as_str())).into())
    }
}

impl<F, S> Matcher for F
where
    F: FnMut(&str, &Path) -> S,
    S: IntoSignal,
{
    fn check(&mut self, name: &str, dir: &Path) -> Result<Signal, UpError> {
        (self)(name, dir).into_signal()
    }
}
