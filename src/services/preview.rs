use crate::error::AppError;
use crate::models::upload_types::MediaCategory;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

// Previews are bounded re-encodes, never the full-resolution original.
const PREVIEW_MAX_DIMENSION: u32 = 1280;
const PREVIEW_QUALITY: u8 = 80;

#[derive(Clone)]
struct PreviewEntry {
    path: PathBuf,
    category: MediaCategory,
}

/// Revocable registry of preview handles, standing in for object URLs.
/// A handle lives exactly as long as its upload session: sessions register
/// on entry and revoke on every exit path. Revoking twice is a no-op.
pub struct PreviewStore {
    entries: Mutex<HashMap<u64, PreviewEntry>>,
    next_id: AtomicU64,
}

impl PreviewStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn register(&self, path: &Path, category: MediaCategory) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.entries.lock().unwrap().insert(
            id,
            PreviewEntry {
                path: path.to_path_buf(),
                category,
            },
        );
        id
    }

    pub fn revoke(&self, id: u64) {
        self.entries.lock().unwrap().remove(&id);
    }

    /// Build the preview on demand as a data URL. Loading a revoked handle
    /// is a state error, not a crash.
    pub fn load(&self, id: u64) -> Result<String, AppError> {
        let entry = self
            .entries
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::state("Preview is no longer available"))?;

        match entry.category {
            MediaCategory::Image => image_preview(&entry.path),
            _ => raw_preview(&entry.path),
        }
    }
}

impl Default for PreviewStore {
    fn default() -> Self {
        Self::new()
    }
}

fn image_preview(path: &Path) -> Result<String, AppError> {
    let img = match image::open(path) {
        Ok(img) => img,
        // Formats the decoder doesn't handle still preview as raw bytes.
        Err(_) => return raw_preview(path),
    };

    let img = if img.width() > PREVIEW_MAX_DIMENSION || img.height() > PREVIEW_MAX_DIMENSION {
        img.resize(PREVIEW_MAX_DIMENSION, PREVIEW_MAX_DIMENSION, FilterType::Triangle)
    } else {
        img
    };

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, PREVIEW_QUALITY);
    img.into_rgb8().write_with_encoder(encoder)?;

    let b64 = base64::engine::general_purpose::STANDARD.encode(buffer.into_inner());
    Ok(format!("data:image/jpeg;base64,{}", b64))
}

fn raw_preview(path: &Path) -> Result<String, AppError> {
    let bytes = std::fs::read(path)
        .map_err(|e| AppError::state(format!("Failed to read {}: {}", path.display(), e)))?;
    let mime = mime_for(path);
    let b64 = base64::engine::general_purpose::STANDARD.encode(bytes);
    Ok(format!("data:{};base64,{}", mime, b64))
}

fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("mp4") | Some("m4v") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("webm") => "video/webm",
        Some("mkv") => "video/x-matroska",
        Some("avi") => "video/x-msvideo",
        _ => "application/octet-stream",
    }
}
