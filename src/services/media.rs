use crate::error::AppError;
use crate::models::upload_types::{MediaCategory, MediaUpload};
use std::path::Path;

const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "webp", "tiff", "tif", "heic", "avif",
];

const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "mov", "avi", "mkv", "webm", "m4v", "mpg", "mpeg", "wmv", "3gp",
];

pub fn media_category(path: &Path) -> MediaCategory {
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        let ext = ext.to_lowercase();
        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            return MediaCategory::Image;
        }
        if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            return MediaCategory::Video;
        }
    }
    // Unknown or missing extension: sniff the leading bytes instead.
    sniff_category(path)
}

fn sniff_category(path: &Path) -> MediaCategory {
    match infer::get_from_path(path) {
        Ok(Some(kind)) => match kind.matcher_type() {
            infer::MatcherType::Image => MediaCategory::Image,
            infer::MatcherType::Video => MediaCategory::Video,
            _ => MediaCategory::Other,
        },
        _ => MediaCategory::Other,
    }
}

/// File-selection boundary: exactly one existing image or video file.
/// Anything else is a validation rejection and never reaches the workflow.
pub fn validate_selection(paths: &[String]) -> Result<MediaUpload, AppError> {
    if paths.is_empty() {
        return Err(AppError::validation(
            "Please upload only one image or video file.",
        ));
    }
    if paths.len() > 1 {
        return Err(AppError::validation(
            "Only one image or video file is allowed.",
        ));
    }

    let path = Path::new(&paths[0]).to_path_buf();
    if !path.is_file() {
        return Err(AppError::validation(format!(
            "File does not exist: {}",
            path.display()
        )));
    }

    let category = media_category(&path);
    if category == MediaCategory::Other {
        return Err(AppError::validation(
            "Only image and video files are allowed.",
        ));
    }

    let size_bytes = std::fs::metadata(&path)?.len();
    let file_name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    Ok(MediaUpload {
        path,
        file_name,
        size_bytes,
        category,
    })
}
