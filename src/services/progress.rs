use crate::models::upload_types::UploadStatus;
use tauri::{AppHandle, Emitter};

/// Events the workflow pushes toward the webview while a command is no
/// longer on the stack.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowEvent {
    UploadProgress {
        percentage: u8,
    },
    UploadStatus {
        status: UploadStatus,
        message: Option<String>,
    },
    AnalysisProgress {
        percentage: u8,
        complete: bool,
    },
}

/// Port for receiving workflow events. The Tauri layer forwards them to the
/// webview; tests collect them on a channel.
pub trait ProgressSink: Send + Sync {
    fn on_event(&self, event: WorkflowEvent);
}

pub struct EmitterSink {
    app: AppHandle,
}

impl EmitterSink {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl ProgressSink for EmitterSink {
    fn on_event(&self, event: WorkflowEvent) {
        match event {
            WorkflowEvent::UploadProgress { percentage } => {
                let _ = self.app.emit("upload-progress", percentage);
            }
            WorkflowEvent::UploadStatus { status, message } => {
                let _ = self.app.emit(
                    "upload-status",
                    serde_json::json!({
                        "status": status,
                        "message": message,
                    }),
                );
            }
            WorkflowEvent::AnalysisProgress { percentage, complete } => {
                let _ = self.app.emit(
                    "analysis-progress",
                    serde_json::json!({
                        "percentage": percentage,
                        "complete": complete,
                    }),
                );
            }
        }
    }
}
