use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Idle,
    Uploading,
    Uploaded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaCategory {
    Image,
    Video,
    Other,
}

/// A selection that already passed the file-selection boundary:
/// exactly one existing file of category image or video.
#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub path: PathBuf,
    pub file_name: String,
    pub size_bytes: u64,
    pub category: MediaCategory,
}

/// Outcome of one prediction call. Immutable; moved by value between views.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub percentage_morphed: f32,
    pub matches: Vec<String>,
}

/// Point-in-time view of the upload session for the webview.
#[derive(Debug, Clone, Serialize)]
pub struct UploadSnapshot {
    pub status: UploadStatus,
    pub percentage: u8,
    pub file_name: Option<String>,
    pub size_mb: Option<f64>,
    pub preview_id: Option<u64>,
    pub error: Option<String>,
    pub result_ready: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSnapshot {
    pub percentage: u8,
    pub complete: bool,
    pub has_result: bool,
}

/// What the Result view renders. Both fields degrade gracefully when the
/// view is entered without a completed analysis behind it.
#[derive(Debug, Clone, Serialize)]
pub struct ResultPayload {
    pub percentage_morphed: Option<f32>,
    pub matches: Vec<String>,
}

impl ResultPayload {
    pub fn empty() -> Self {
        ResultPayload {
            percentage_morphed: None,
            matches: Vec::new(),
        }
    }
}
