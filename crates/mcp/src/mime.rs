//! Minimal extension to MIME type mapping for uploads and resources.

use std::path::Path;

const OCTET_STREAM: &str = "application/octet-stream";

/// Guess a MIME type from the file extension.
pub fn guess(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "txt" | "log" => "text/plain",
        "md" => "text/markdown",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" => "application/javascript",
        "json" => "application/json",
        "xml" => "application/xml",
        "pdf" => "application/pdf",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "mp3" => "audio/mpeg",
        "mp4" => "video/mp4",
        "zip" => "application/zip",
        _ => OCTET_STREAM,
    }
}

/// Whether content of this type is sent as text rather than base64.
pub fn is_text(mime: &str) -> bool {
    mime.starts_with("text/")
        || matches!(
            mime,
            "application/json" | "application/javascript" | "application/xml" | "image/svg+xml"
        )
}

/// Whether the type is the catch-all for unknown extensions.
pub fn is_unknown(mime: &str) -> bool {
    mime == OCTET_STREAM
}
