//! Allowed-directory sandbox for filesystem access.
//!
//! Every path an MCP tool wants to read, write or list is passed through
//! [`PathGuard::validate`] first. The guard only admits paths that stay inside
//! the operator-configured [`AllowedRoots`], both lexically and after symlink
//! resolution, including paths that do not exist yet.

pub mod anchor;
pub mod error;
pub mod roots;
pub mod uri;
pub mod validate;

pub use anchor::Anchor;
pub use error::GuardError;
pub use roots::{AllowedRoots, Containment, Root};
pub use validate::{PathGuard, Resolution};
