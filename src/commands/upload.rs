use crate::error::AppError;
use crate::models::upload_types::UploadSnapshot;
use crate::services::media;
use crate::services::preview::PreviewStore;
use crate::services::progress::EmitterSink;
use crate::services::upload_manager::UploadManager;
use std::sync::Arc;
use tauri::{AppHandle, State};

#[tauri::command]
pub async fn submit_media(
    app: AppHandle,
    manager: State<'_, UploadManager>,
    paths: Vec<String>,
) -> Result<UploadSnapshot, AppError> {
    // Validation failures never reach the state machine.
    let upload = media::validate_selection(&paths)?;
    Ok(manager.submit(Arc::new(EmitterSink::new(app)), upload))
}

#[tauri::command]
pub fn get_upload_status(manager: State<'_, UploadManager>) -> UploadSnapshot {
    manager.snapshot()
}

#[tauri::command]
pub fn reset_upload(manager: State<'_, UploadManager>) -> Result<(), AppError> {
    manager.reset();
    Ok(())
}

#[tauri::command]
pub fn load_preview(previews: State<'_, Arc<PreviewStore>>, id: u64) -> Result<String, AppError> {
    previews.load(id)
}
