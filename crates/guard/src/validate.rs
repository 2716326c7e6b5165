//! Path validation against the allowed directories.
//!
//! All filesystem operations must pass through [`PathGuard::validate`] to
//! ensure the requested path, and anything it links to, stays inside the
//! server's allowed directories.

use crate::{AllowedRoots, Anchor, Containment, GuardError};
use std::path::{Path, PathBuf};

/// Outcome of resolving a path's real location on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The path exists; symlinks are fully resolved.
    Resolved(PathBuf),
    /// The path could not be resolved, usually because it does not exist yet.
    NotFound,
}

impl Resolution {
    /// Resolve the real path of `path`, following every symlink.
    pub async fn of(path: &Path) -> Self {
        match tokio::fs::canonicalize(path).await {
            Ok(real) => Resolution::Resolved(real),
            Err(_) => Resolution::NotFound,
        }
    }
}

/// Gate between untrusted path strings and filesystem I/O.
///
/// Holds only immutable configuration, so clones are cheap and validations
/// can run concurrently.
#[derive(Debug, Clone)]
pub struct PathGuard {
    roots: AllowedRoots,
    anchor: Anchor,
    containment: Containment,
}

impl PathGuard {
    /// Create a guard with component-aware containment.
    pub fn new(roots: AllowedRoots, anchor: Anchor) -> Self {
        Self {
            roots,
            anchor,
            containment: Containment::default(),
        }
    }

    /// Use a different containment mode.
    pub fn with_containment(mut self, containment: Containment) -> Self {
        self.containment = containment;
        self
    }

    pub fn roots(&self) -> &AllowedRoots {
        &self.roots
    }

    /// Validate `candidate` and return the path to use for I/O.
    ///
    /// Steps:
    /// 1. Reject paths containing null bytes
    /// 2. Expand `~`, absolutize and lexically normalize; reject if outside
    ///    every root
    /// 3. If the path exists, return its real path provided that is also
    ///    inside a root
    /// 4. Otherwise require the parent directory to exist with its real path
    ///    inside a root, and return the normalized path unchanged
    pub async fn validate(&self, candidate: &str) -> Result<PathBuf, GuardError> {
        if candidate.contains('\0') {
            return Err(GuardError::NullByte);
        }

        let requested = self.anchor.absolutize(candidate);
        if !self.admits_lexical(&requested) {
            return Err(self.denied(requested));
        }

        match Resolution::of(&requested).await {
            Resolution::Resolved(real) => {
                if !self.admits_real(&real) {
                    return Err(self.denied(real));
                }
                tracing::debug!(path = %real.display(), "path validated");
                Ok(real)
            }
            Resolution::NotFound => {
                // A dangling symlink would let a later write land on an
                // unvalidated target.
                if is_symlink(&requested).await {
                    return Err(self.denied(requested));
                }
                let parent = requested
                    .parent()
                    .ok_or_else(|| GuardError::ParentNotFound(requested.clone()))?;
                match Resolution::of(parent).await {
                    Resolution::NotFound => Err(GuardError::ParentNotFound(parent.to_path_buf())),
                    Resolution::Resolved(real_parent)
                        if !self.admits_real(&real_parent) =>
                    {
                        Err(self.denied(real_parent))
                    }
                    Resolution::Resolved(_) => {
                        tracing::debug!(path = %requested.display(), "new path validated");
                        Ok(requested)
                    }
                }
            }
        }
    }

    /// Lexical paths may sit under either form of a root.
    fn admits_lexical(&self, path: &Path) -> bool {
        self.roots.iter().any(|root| {
            self.containment.contains(root.lexical(), path)
                || self.containment.contains(root.real(), path)
        })
    }

    /// Resolved paths must sit under a root's real form.
    fn admits_real(&self, path: &Path) -> bool {
        self.roots
            .iter()
            .any(|root| self.containment.contains(root.real(), path))
    }

    fn denied(&self, path: PathBuf) -> GuardError {
        tracing::warn!(path = %path.display(), "access denied outside allowed directories");
        GuardError::AccessDenied {
            path,
            roots: self.roots.paths(),
        }
    }
}

async fn is_symlink(path: &Path) -> bool {
    tokio::fs::symlink_metadata(path)
        .await
        .is_ok_and(|meta| meta.file_type().is_symlink())
}

#[cfg(test)]
mod tests {
    use crate::{AllowedRoots, Anchor, Containment, GuardError, PathGuard};
    use std::{fs, path::PathBuf};
    use tempfile::TempDir;

    /// A sandbox laid out as `<tmp>/srv/data` with `<tmp>/srv/secrets` beside it.
    struct Fixture {
        _tmp: TempDir,
        base: PathBuf,
        guard: PathGuard,
    }

    impl Fixture {
        async fn new() -> Self {
            Self::with_containment(Containment::Component).await
        }

        async fn with_containment(containment: Containment) -> Self {
            let tmp = tempfile::tempdir().unwrap();
            let base = tmp.path().canonicalize().unwrap();
            fs::create_dir_all(base.join("srv/data/reports")).unwrap();
            fs::create_dir_all(base.join("srv/data/new")).unwrap();
            fs::create_dir_all(base.join("srv/secrets")).unwrap();
            fs::create_dir_all(base.join("srv/database")).unwrap();
            fs::create_dir_all(base.join("home/ops")).unwrap();
            fs::write(base.join("srv/data/reports/q1.csv"), "a,b\n").unwrap();
            fs::write(base.join("srv/secrets/key.pem"), "secret").unwrap();

            let anchor = Anchor::new(Some(base.join("home/ops")), base.join("srv/data"));
            let roots = AllowedRoots::establish([base.join("srv/data"), base.join("home/ops")], &anchor)
                .await
                .unwrap();
            let guard = PathGuard::new(roots, anchor).with_containment(containment);
            Self {
                _tmp: tmp,
                base,
                guard,
            }
        }

        fn path(&self, rel: &str) -> String {
            self.base.join(rel).to_string_lossy().into_owned()
        }
    }

    #[tokio::test]
    async fn allows_existing_file() {
        let fx = Fixture::new().await;
        let resolved = fx.guard.validate(&fx.path("srv/data/reports/q1.csv")).await.unwrap();
        assert_eq!(resolved, fx.base.join("srv/data/reports/q1.csv"));
    }

    #[tokio::test]
    async fn rejects_dot_dot_escape() {
        let fx = Fixture::new().await;
        let err = fx
            .guard
            .validate(&fx.path("srv/data/../secrets/key.pem"))
            .await
            .unwrap_err();
        match err {
            GuardError::AccessDenied { path, roots } => {
                assert_eq!(path, fx.base.join("srv/secrets/key.pem"));
                assert_eq!(roots.len(), 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn allows_new_file_in_existing_dir() {
        let fx = Fixture::new().await;
        let resolved = fx.guard.validate(&fx.path("srv/data/new/out.txt")).await.unwrap();
        assert_eq!(resolved, fx.base.join("srv/data/new/out.txt"));
        assert!(!resolved.exists());
    }

    #[tokio::test]
    async fn rejects_new_file_in_missing_dir() {
        let fx = Fixture::new().await;
        let err = fx
            .guard
            .validate(&fx.path("srv/data/missingdir/out.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, GuardError::ParentNotFound(p) if p == fx.base.join("srv/data/missingdir")));
    }

    #[tokio::test]
    async fn rejects_path_outside_roots() {
        let fx = Fixture::new().await;
        let result = fx.guard.validate("/etc/passwd").await;
        assert!(matches!(result, Err(GuardError::AccessDenied { .. })));
    }

    #[tokio::test]
    async fn rejects_null_byte() {
        let fx = Fixture::new().await;
        let result = fx.guard.validate(&format!("{}\0x", fx.path("srv/data/a"))).await;
        assert!(matches!(result, Err(GuardError::NullByte)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn rejects_symlink_escape() {
        let fx = Fixture::new().await;
        std::os::unix::fs::symlink(fx.base.join("srv/secrets/key.pem"), fx.base.join("srv/data/key"))
            .unwrap();
        let err = fx.guard.validate(&fx.path("srv/data/key")).await.unwrap_err();
        assert!(matches!(err, GuardError::AccessDenied { path, .. } if path == fx.base.join("srv/secrets/key.pem")));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn rejects_new_file_under_escaping_dir_link() {
        let fx = Fixture::new().await;
        std::os::unix::fs::symlink(fx.base.join("srv/secrets"), fx.base.join("srv/data/out")).unwrap();
        let err = fx.guard.validate(&fx.path("srv/data/out/new.txt")).await.unwrap_err();
        assert!(matches!(err, GuardError::AccessDenied { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn rejects_dangling_symlink() {
        let fx = Fixture::new().await;
        std::os::unix::fs::symlink(fx.base.join("srv/secrets/new.pem"), fx.base.join("srv/data/dangling"))
            .unwrap();
        let err = fx.guard.validate(&fx.path("srv/data/dangling")).await.unwrap_err();
        assert!(matches!(err, GuardError::AccessDenied { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn follows_symlink_within_roots() {
        let fx = Fixture::new().await;
        std::os::unix::fs::symlink(fx.base.join("srv/data/reports/q1.csv"), fx.base.join("home/ops/q1"))
            .unwrap();
        let resolved = fx.guard.validate(&fx.path("home/ops/q1")).await.unwrap();
        assert_eq!(resolved, fx.base.join("srv/data/reports/q1.csv"));
    }

    #[tokio::test]
    async fn expands_home_before_checking() {
        let fx = Fixture::new().await;
        let resolved = fx.guard.validate("~/notes.md").await.unwrap();
        assert_eq!(resolved, fx.base.join("home/ops/notes.md"));
    }

    #[tokio::test]
    async fn resolves_relative_to_cwd() {
        let fx = Fixture::new().await;
        let resolved = fx.guard.validate("reports/q1.csv").await.unwrap();
        assert_eq!(resolved, fx.base.join("srv/data/reports/q1.csv"));
        let err = fx.guard.validate("../secrets/key.pem").await.unwrap_err();
        assert!(matches!(err, GuardError::AccessDenied { .. }));
    }

    #[tokio::test]
    async fn sibling_prefix_depends_on_containment() {
        let fx = Fixture::new().await;
        let sibling = fx.path("srv/database/x.db");
        assert!(matches!(
            fx.guard.validate(&sibling).await,
            Err(GuardError::AccessDenied { .. })
        ));

        let legacy = Fixture::with_containment(Containment::StringPrefix).await;
        let sibling = legacy.path("srv/database/x.db");
        assert_eq!(
            legacy.guard.validate(&sibling).await.unwrap(),
            legacy.base.join("srv/database/x.db")
        );
    }

    #[tokio::test]
    async fn concurrent_validation_is_stable() {
        let fx = Fixture::new().await;
        let path = fx.path("srv/data/reports/q1.csv");
        let (a, b) = tokio::join!(fx.guard.validate(&path), fx.guard.validate(&path));
        assert_eq!(a.unwrap(), b.unwrap());
        assert_eq!(fs::read_dir(fx.base.join("srv/data/reports")).unwrap().count(), 1);
    }
}
