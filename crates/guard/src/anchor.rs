//! Turning caller-supplied path strings into absolute, normalized paths.

use std::path::{Path, PathBuf};

/// Home and working directory used to anchor relative and `~` paths.
///
/// Captured once at process entry so validation never reads ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    home: Option<PathBuf>,
    cwd: PathBuf,
}

impl Anchor {
    /// Create an anchor from an explicit home and working directory.
    pub fn new(home: Option<PathBuf>, cwd: PathBuf) -> Self {
        Self { home, cwd }
    }

    /// Capture the invoking user's home and the current working directory.
    pub fn from_process() -> std::io::Result<Self> {
        Ok(Self::new(dirs::home_dir(), std::env::current_dir()?))
    }

    /// Expand a leading `~` or `~/...` to the home directory.
    ///
    /// `~user` forms and paths without a home directory are left untouched.
    pub fn expand_home(&self, path: &Path) -> PathBuf {
        match (&self.home, path.strip_prefix("~")) {
            (Some(home), Ok(rest)) if rest.as_os_str().is_empty() => home.clone(),
            (Some(home), Ok(rest)) => home.join(rest),
            _ => path.to_path_buf(),
        }
    }

    /// Expand `~`, resolve against the working directory and normalize.
    pub fn absolutize(&self, path: impl AsRef<Path>) -> PathBuf {
        let expanded = self.expand_home(path.as_ref());
        if expanded.is_absolute() {
            normalize(&expanded)
        } else {
            normalize(&self.cwd.join(expanded))
        }
    }
}

/// Lexically normalize a path: drop `.`, fold `..` and repeated separators.
///
/// No filesystem lookup happens here; `..` above the root stays at the root.
pub fn normalize(path: &Path) -> PathBuf {
    path_clean::clean(path)
}
