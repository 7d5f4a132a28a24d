//! Self-describing image payloads: `data:<mime>;base64,<bytes>`.

use crate::errors::AppResult;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fs;
use std::path::Path;

pub fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}

pub fn encode_bytes(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

pub fn encode_file(path: &Path) -> AppResult<String> {
    let bytes = fs::read(path)?;
    Ok(encode_bytes(mime_for(path), &bytes))
}

/// Split a data URI into its mime type and decoded size.
pub fn inspect(uri: &str) -> Option<(&str, usize)> {
    let rest = uri.strip_prefix("data:")?;
    let (mime, payload) = rest.split_once(";base64,")?;
    let bytes = STANDARD.decode(payload).ok()?;
    Some((mime, bytes.len()))
}

/// One-line description of a stored photo reference.
pub fn describe(reference: &str) -> String {
    match inspect(reference) {
        Some((mime, size)) => format!("{} image, {} bytes", mime, size),
        None => reference.to_string(),
    }
}
