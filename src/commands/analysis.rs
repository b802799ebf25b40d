use crate::error::AppError;
use crate::models::upload_types::{AnalysisSnapshot, ResultPayload};
use crate::services::analysis::AnalysisStage;
use crate::services::progress::EmitterSink;
use crate::services::upload_manager::UploadManager;
use std::sync::Arc;
use tauri::{AppHandle, State};

#[tauri::command]
pub async fn start_analysis(
    app: AppHandle,
    manager: State<'_, UploadManager>,
    stage: State<'_, AnalysisStage>,
) -> Result<AnalysisSnapshot, AppError> {
    // By-value handoff from the upload view; absent when navigated to
    // directly, and the stage runs either way.
    let payload = manager.handoff_result();
    stage.begin(Arc::new(EmitterSink::new(app)), payload);
    Ok(stage.snapshot())
}

#[tauri::command]
pub fn get_analysis_status(stage: State<'_, AnalysisStage>) -> AnalysisSnapshot {
    stage.snapshot()
}

#[tauri::command]
pub fn cancel_analysis(stage: State<'_, AnalysisStage>) -> Result<(), AppError> {
    stage.cancel();
    Ok(())
}

/// Entry point of the Result view. With no completed analysis behind it the
/// payload is the explicit placeholder, never an error.
#[tauri::command]
pub fn enter_result(stage: State<'_, AnalysisStage>) -> ResultPayload {
    match stage.take_result() {
        Some(result) => ResultPayload {
            percentage_morphed: Some(result.percentage_morphed),
            matches: result.matches,
        },
        None => ResultPayload::empty(),
    }
}
