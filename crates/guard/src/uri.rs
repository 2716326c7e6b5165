//! `file://` URI handling for MCP resources.

use crate::GuardError;
use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use std::path::Path;

/// Characters escaped when a path is rendered into a `file://` URI.
const PATH_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Extract the candidate path string from a `file://` URI.
///
/// The remainder after the scheme is percent-decoded. On Windows the
/// `file:///C:/...` form is accepted and forward slashes become backslashes.
pub fn path_from_uri(uri: &str) -> Result<String, GuardError> {
    decode(uri, cfg!(windows))
}

fn decode(uri: &str, windows: bool) -> Result<String, GuardError> {
    let unsupported = || GuardError::UnsupportedUri(uri.to_string());
    let rest = uri.strip_prefix("file://").ok_or_else(unsupported)?;
    // An empty or `localhost` authority both name this machine.
    let rest = rest
        .strip_prefix("localhost")
        .filter(|path| path.starts_with('/'))
        .unwrap_or(rest);

    let decoded = percent_decode_str(rest)
        .decode_utf8()
        .map_err(|_| unsupported())?;
    if windows {
        let path = decoded.strip_prefix('/').unwrap_or(&*decoded);
        Ok(path.replace('/', "\\"))
    } else {
        Ok(decoded.into_owned())
    }
}

/// Render an absolute path as a `file://` URI.
pub fn uri_from_path(path: &Path) -> String {
    let raw = path.to_string_lossy();
    if cfg!(windows) {
        let forward = raw.replace('\\', "/");
        format!("file:///{}", utf8_percent_encode(&forward, PATH_SET))
    } else {
        format!("file://{}", utf8_percent_encode(&raw, PATH_SET))
    }
}
