//! `file://` resources backed by the allowed directories.

use crate::mime;
use base64::Engine;
use pinata_guard::{PathGuard, uri};
use rmcp::{
    ErrorData as McpError,
    model::{AnnotateAble, RawResource, ReadResourceResult, Resource, ResourceContents},
};
use std::path::Path;

/// One resource per allowed directory.
pub fn roots(guard: &PathGuard) -> Vec<Resource> {
    guard
        .roots()
        .iter()
        .map(|root| {
            let path = root.lexical();
            let mut raw = RawResource::new(uri::uri_from_path(path), path.display().to_string());
            raw.description = Some("Allowed directory; read files beneath it with file:// URIs".into());
            raw.no_annotation()
        })
        .collect()
}

/// Read a `file://` resource after validating it against the sandbox.
///
/// Text files come back as text, other files as base64 blobs, and
/// directories as a sorted listing with `/` marking subdirectories.
pub async fn read(guard: &PathGuard, resource_uri: &str) -> Result<ReadResourceResult, McpError> {
    let candidate =
        uri::path_from_uri(resource_uri).map_err(|e| McpError::invalid_params(e.to_string(), None))?;
    let path = guard
        .validate(&candidate)
        .await
        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
    let meta = tokio::fs::metadata(&path).await.map_err(|e| {
        McpError::resource_not_found(format!("File not found: {}: {e}", path.display()), None)
    })?;

    let contents = if meta.is_dir() {
        ResourceContents::TextResourceContents {
            uri: resource_uri.to_string(),
            mime_type: Some("text/plain".into()),
            text: list_dir(&path).await?,
            meta: None,
        }
    } else {
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| McpError::internal_error(format!("Failed to read file: {e}"), None))?;
        file_contents(resource_uri, &path, bytes)
    };
    Ok(ReadResourceResult {
        contents: vec![contents],
    })
}

fn file_contents(resource_uri: &str, path: &Path, bytes: Vec<u8>) -> ResourceContents {
    let guessed = mime::guess(path);
    if mime::is_text(guessed) || mime::is_unknown(guessed) {
        match String::from_utf8(bytes) {
            Ok(text) => {
                let mime_type = if mime::is_unknown(guessed) {
                    "text/plain"
                } else {
                    guessed
                };
                return ResourceContents::TextResourceContents {
                    uri: resource_uri.to_string(),
                    mime_type: Some(mime_type.into()),
                    text,
                    meta: None,
                };
            }
            Err(e) => return blob(resource_uri, guessed, e.into_bytes()),
        }
    }
    blob(resource_uri, guessed, bytes)
}

fn blob(resource_uri: &str, mime_type: &str, bytes: Vec<u8>) -> ResourceContents {
    ResourceContents::BlobResourceContents {
        uri: resource_uri.to_string(),
        mime_type: Some(mime_type.into()),
        blob: base64::engine::general_purpose::STANDARD.encode(bytes),
        meta: None,
    }
}

async fn list_dir(path: &Path) -> Result<String, McpError> {
    let io = |e: std::io::Error| McpError::internal_error(e.to_string(), None);
    let mut entries = Vec::new();
    let mut read_dir = tokio::fs::read_dir(path).await.map_err(io)?;
    while let Some(entry) = read_dir.next_entry().await.map_err(io)? {
        let name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type().await.map_err(io)?.is_dir() {
            entries.push(format!("{name}/"));
        } else {
            entries.push(name);
        }
    }
    entries.sort();
    Ok(entries.join("\n"))
}
