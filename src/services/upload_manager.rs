use crate::models::upload_types::{MediaUpload, PredictionResult, UploadSnapshot, UploadStatus};
use crate::services::prediction_client::Predictor;
use crate::services::preview::PreviewStore;
use crate::services::progress::{ProgressSink, WorkflowEvent};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// The visible upload bar is pacing, not measurement: ten steps on a fixed
// cadence, clamped at 100 even while the network call is still in flight.
pub const SIMULATOR_TICK: Duration = Duration::from_millis(200);
pub const SIMULATOR_STEP: u8 = 10;

struct Session {
    file_name: String,
    size_bytes: u64,
    preview_id: u64,
    percentage: u8,
}

struct WorkflowState {
    status: UploadStatus,
    session: Option<Session>,
    result: Option<PredictionResult>,
    error: Option<String>,
}

/// The upload state machine: `Idle -> Uploading -> {Uploaded | Failed}`.
///
/// Each submission runs two uncorrelated tasks, the cosmetic progress
/// simulator and the real prediction call. Neither task decides the terminal
/// transition by itself; the network outcome is the only authority, and a
/// task whose generation has been superseded exits without touching state.
#[derive(Clone)]
pub struct UploadManager {
    state: Arc<Mutex<WorkflowState>>,
    generation: Arc<AtomicU64>,
    predictor: Arc<dyn Predictor>,
    previews: Arc<PreviewStore>,
    tick: Duration,
}

impl UploadManager {
    pub fn new(predictor: Arc<dyn Predictor>, previews: Arc<PreviewStore>) -> Self {
        Self::with_tick(predictor, previews, SIMULATOR_TICK)
    }

    pub fn with_tick(
        predictor: Arc<dyn Predictor>,
        previews: Arc<PreviewStore>,
        tick: Duration,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(WorkflowState {
                status: UploadStatus::Idle,
                session: None,
                result: None,
                error: None,
            })),
            generation: Arc::new(AtomicU64::new(0)),
            predictor,
            previews,
            tick,
        }
    }

    /// Start a new session for an already-validated selection. A session
    /// still in flight is superseded: its preview is revoked and its tasks
    /// see a stale generation and exit. Latest submission wins.
    pub fn submit(&self, sink: Arc<dyn ProgressSink>, upload: MediaUpload) -> UploadSnapshot {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let preview_id = self.previews.register(&upload.path, upload.category);

        {
            let mut state = self.state.lock().unwrap();
            if let Some(previous) = state.session.take() {
                self.previews.revoke(previous.preview_id);
            }
            state.status = UploadStatus::Uploading;
            state.result = None;
            state.error = None;
            state.session = Some(Session {
                file_name: upload.file_name.clone(),
                size_bytes: upload.size_bytes,
                preview_id,
                percentage: 0,
            });
        }
        tracing::info!(file = %upload.file_name, size = upload.size_bytes, "upload started");

        self.spawn_simulator(generation, sink.clone());
        self.spawn_predict(generation, sink, upload);

        self.snapshot()
    }

    fn spawn_simulator(&self, generation: u64, sink: Arc<dyn ProgressSink>) {
        let manager = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(manager.tick);
            interval.tick().await;
            loop {
                interval.tick().await;
                let percentage = {
                    let mut state = manager.state.lock().unwrap();
                    if manager.generation.load(Ordering::SeqCst) != generation {
                        break;
                    }
                    if state.status != UploadStatus::Uploading {
                        break;
                    }
                    let Some(session) = state.session.as_mut() else {
                        break;
                    };
                    session.percentage = session.percentage.saturating_add(SIMULATOR_STEP).min(100);
                    session.percentage
                };
                sink.on_event(WorkflowEvent::UploadProgress { percentage });
                if percentage >= 100 {
                    break;
                }
            }
        });
    }

    fn spawn_predict(&self, generation: u64, sink: Arc<dyn ProgressSink>, upload: MediaUpload) {
        let manager = self.clone();
        tokio::spawn(async move {
            let outcome = manager.predictor.predict(&upload).await;

            let event = {
                let mut state = manager.state.lock().unwrap();
                if manager.generation.load(Ordering::SeqCst) != generation {
                    // Superseded or reset while in flight; the outcome
                    // belongs to a session that no longer exists.
                    return;
                }
                match outcome {
                    Ok(result) => {
                        state.status = UploadStatus::Uploaded;
                        if let Some(session) = state.session.as_mut() {
                            session.percentage = 100;
                        }
                        state.result = Some(result);
                        None
                    }
                    Err(err) => {
                        let message = err.to_string();
                        state.status = UploadStatus::Failed;
                        state.error = Some(message.clone());
                        if let Some(session) = state.session.take() {
                            manager.previews.revoke(session.preview_id);
                        }
                        Some(message)
                    }
                }
            };

            match event {
                None => {
                    tracing::info!("prediction completed");
                    sink.on_event(WorkflowEvent::UploadProgress { percentage: 100 });
                    sink.on_event(WorkflowEvent::UploadStatus {
                        status: UploadStatus::Uploaded,
                        message: None,
                    });
                }
                Some(message) => {
                    tracing::warn!(error = %message, "prediction failed");
                    sink.on_event(WorkflowEvent::UploadStatus {
                        status: UploadStatus::Failed,
                        message: Some(message),
                    });
                }
            }
        });
    }

    /// The only path back to `Idle`. Safe to call in any state; in-flight
    /// tasks are invalidated and the preview handle is revoked.
    pub fn reset(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();
        if let Some(session) = state.session.take() {
            self.previews.revoke(session.preview_id);
        }
        state.status = UploadStatus::Idle;
        state.result = None;
        state.error = None;
        tracing::info!("upload reset");
    }

    pub fn snapshot(&self) -> UploadSnapshot {
        let state = self.state.lock().unwrap();
        UploadSnapshot {
            status: state.status,
            percentage: state.session.as_ref().map(|s| s.percentage).unwrap_or(0),
            file_name: state.session.as_ref().map(|s| s.file_name.clone()),
            size_mb: state
                .session
                .as_ref()
                .map(|s| (s.size_bytes as f64 / (1024.0 * 1024.0) * 100.0).round() / 100.0),
            preview_id: state.session.as_ref().map(|s| s.preview_id),
            error: state.error.clone(),
            result_ready: state.result.is_some(),
        }
    }

    pub fn status(&self) -> UploadStatus {
        self.state.lock().unwrap().status
    }

    /// By-value copy of the result for the Upload -> Analysis transition.
    /// Present only once the session reached `Uploaded`.
    pub fn handoff_result(&self) -> Option<PredictionResult> {
        let state = self.state.lock().unwrap();
        if state.status != UploadStatus::Uploaded {
            return None;
        }
        state.result.clone()
    }
}
