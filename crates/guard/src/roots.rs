//! The operator-configured set of allowed directories.

use crate::{Anchor, GuardError};
use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
    sync::Arc,
};

/// How a path is tested for being inside a root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Containment {
    /// Whole path components must match, so `/data/foo` does not admit `/data/foobar`.
    #[default]
    Component,
    /// Raw string prefix comparison, so `/data/foo` also admits `/data/foobar`.
    StringPrefix,
}

impl Containment {
    /// Whether `path` lies under `root` according to this mode.
    pub fn contains(self, root: &Path, path: &Path) -> bool {
        match self {
            Containment::Component => path.starts_with(root),
            Containment::StringPrefix => path
                .to_string_lossy()
                .starts_with(root.to_string_lossy().as_ref()),
        }
    }
}

impl FromStr for Containment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "component" => Ok(Containment::Component),
            "string-prefix" => Ok(Containment::StringPrefix),
            other => Err(format!(
                "unknown containment mode {other:?}, expected \"component\" or \"string-prefix\""
            )),
        }
    }
}

impl fmt::Display for Containment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Containment::Component => f.write_str("component"),
            Containment::StringPrefix => f.write_str("string-prefix"),
        }
    }
}

/// One allowed directory.
///
/// `lexical` is the expanded, normalized form the operator typed; `real` is
/// the same directory with symlinks resolved. The two differ when the root
/// itself sits behind a symlink (e.g. `/tmp` on macOS).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Root {
    lexical: PathBuf,
    real: PathBuf,
}

impl Root {
    pub fn lexical(&self) -> &Path {
        &self.lexical
    }

    pub fn real(&self) -> &Path {
        &self.real
    }
}

/// Ordered, non-empty, immutable set of allowed directories.
#[derive(Debug, Clone)]
pub struct AllowedRoots {
    roots: Arc<[Root]>,
}

impl AllowedRoots {
    /// Resolve and check every configured directory.
    ///
    /// All directories are stat'ed concurrently. Any entry that is missing or
    /// not a directory fails the whole set; so does an empty list. Duplicates
    /// are dropped, keeping the first occurrence.
    pub async fn establish<I, P>(dirs: I, anchor: &Anchor) -> Result<Self, GuardError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let requested: Vec<PathBuf> = dirs.into_iter().map(|d| anchor.absolutize(d)).collect();
        if requested.is_empty() {
            return Err(GuardError::NoRoots);
        }

        let checked = futures::future::try_join_all(requested.into_iter().map(check_root)).await?;
        let mut roots: Vec<Root> = Vec::with_capacity(checked.len());
        for root in checked {
            if !roots.iter().any(|r| r.lexical == root.lexical) {
                roots.push(root);
            }
        }

        tracing::info!(
            roots = ?roots.iter().map(|r| r.lexical.display().to_string()).collect::<Vec<_>>(),
            "allowed directories established"
        );
        Ok(Self {
            roots: roots.into(),
        })
    }

    /// Iterate over the roots in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &Root> {
        self.roots.iter()
    }

    /// The roots as the operator configured them.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.roots.iter().map(|r| r.lexical.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

async fn check_root(lexical: PathBuf) -> Result<Root, GuardError> {
    let meta = tokio::fs::metadata(&lexical)
        .await
        .map_err(|e| GuardError::invalid_root(&lexical, e))?;
    if !meta.is_dir() {
        return Err(GuardError::invalid_root(&lexical, "not a directory"));
    }
    let real = tokio::fs::canonicalize(&lexical)
        .await
        .map_err(|e| GuardError::invalid_root(&lexical, e))?;
    Ok(Root { lexical, real })
}
