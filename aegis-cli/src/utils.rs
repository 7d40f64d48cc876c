//! Common utility functions shared across CLI commands.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

/// Guess a declared media type from the file extension.
///
/// Unknown extensions map to `application/octet-stream`, which the classifier
/// reports as unsupported.
pub fn guess_mime(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("tif" | "tiff") => "image/tiff",
        Some("txt" | "log") => "text/plain",
        Some("md" | "markdown") => "text/markdown",
        Some("csv") => "text/csv",
        Some("html" | "htm") => "text/html",
        Some("json") => "application/json",
        Some("pdf") => "application/pdf",
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("mp4") => "video/mp4",
        _ => "application/octet-stream",
    }
}

/// Read a whole input file.
pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    let content = std::fs::read(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    info!(path = %path.display(), bytes = content.len(), "Read file");
    Ok(content)
}
