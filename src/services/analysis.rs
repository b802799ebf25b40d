use crate::models::upload_types::{AnalysisSnapshot, PredictionResult};
use crate::services::handoff::Handoff;
use crate::services::progress::{ProgressSink, WorkflowEvent};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// The prediction is already known when this stage starts; the ticker is
// presentational pacing only. Reaching 100 is what unlocks the Result view.
pub const ANALYSIS_TICK: Duration = Duration::from_millis(50);

struct AnalysisState {
    percentage: u8,
    result: Option<PredictionResult>,
}

/// The analysing stage between upload and result. Runs its own timer from
/// 0 to 100, cannot fail, and forwards the prediction payload, unchanged,
/// into the outgoing handoff once complete.
#[derive(Clone)]
pub struct AnalysisStage {
    state: Arc<Mutex<AnalysisState>>,
    outgoing: Arc<Handoff<PredictionResult>>,
    generation: Arc<AtomicU64>,
    tick: Duration,
}

impl AnalysisStage {
    pub fn new() -> Self {
        Self::with_tick(ANALYSIS_TICK)
    }

    pub fn with_tick(tick: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(AnalysisState {
                percentage: 0,
                result: None,
            })),
            outgoing: Arc::new(Handoff::new()),
            generation: Arc::new(AtomicU64::new(0)),
            tick,
        }
    }

    /// Enter the stage. The payload is the upload's handed-off result; it is
    /// absent when the view was navigated to directly, and the stage still
    /// runs to completion in that case. Re-entering supersedes the previous
    /// run.
    pub fn begin(&self, sink: Arc<dyn ProgressSink>, payload: Option<PredictionResult>) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.outgoing.clear();
        {
            let mut state = self.state.lock().unwrap();
            state.percentage = 0;
            state.result = payload;
        }
        tracing::info!("analysis stage started");

        let stage = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(stage.tick);
            interval.tick().await;
            loop {
                interval.tick().await;
                let percentage = {
                    let mut state = stage.state.lock().unwrap();
                    if stage.generation.load(Ordering::SeqCst) != generation {
                        break;
                    }
                    state.percentage = state.percentage.saturating_add(1).min(100);
                    if state.percentage == 100 {
                        if let Some(result) = state.result.clone() {
                            stage.outgoing.put(result);
                        }
                    }
                    state.percentage
                };
                sink.on_event(WorkflowEvent::AnalysisProgress {
                    percentage,
                    complete: percentage == 100,
                });
                if percentage == 100 {
                    tracing::info!("analysis stage complete");
                    break;
                }
            }
        });
    }

    /// Leaving the view early stops the ticker and drops the payload.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.outgoing.clear();
        let mut state = self.state.lock().unwrap();
        state.result = None;
        state.percentage = 0;
    }

    pub fn snapshot(&self) -> AnalysisSnapshot {
        let state = self.state.lock().unwrap();
        AnalysisSnapshot {
            percentage: state.percentage,
            complete: state.percentage == 100,
            has_result: state.result.is_some(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state.lock().unwrap().percentage == 100
    }

    /// Take-once handoff toward the Result view. Empty until the stage
    /// completes, and empty again after the first take.
    pub fn take_result(&self) -> Option<PredictionResult> {
        self.outgoing.take()
    }
}

impl Default for AnalysisStage {
    fn default() -> Self {
        Self::new()
    }
}
