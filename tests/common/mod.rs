use async_trait::async_trait;
use deepsight_lib::models::upload_types::{MediaCategory, MediaUpload, PredictionResult};
use deepsight_lib::services::prediction_client::{PredictError, Predictor};
use deepsight_lib::services::progress::{ProgressSink, WorkflowEvent};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Semaphore;

/// Write a small real PNG so preview handles can actually load.
pub fn media_fixture(dir: &Path, name: &str) -> MediaUpload {
    let path = dir.join(name);
    let img = image::RgbImage::from_pixel(4, 4, image::Rgb([200, 60, 60]));
    img.save(&path).expect("failed to write fixture image");
    let size_bytes = std::fs::metadata(&path).unwrap().len();
    MediaUpload {
        file_name: name.to_string(),
        size_bytes,
        category: MediaCategory::Image,
        path,
    }
}

pub fn sample_result() -> PredictionResult {
    PredictionResult {
        percentage_morphed: 73.5,
        matches: vec!["http://a".to_string(), "http://b".to_string()],
    }
}

/// Collects every workflow event for later assertions.
pub struct RecordingSink {
    events: Mutex<Vec<WorkflowEvent>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            events: Mutex::new(Vec::new()),
        })
    }

    pub fn events(&self) -> Vec<WorkflowEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn upload_percentages(&self) -> Vec<u8> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                WorkflowEvent::UploadProgress { percentage } => Some(percentage),
                _ => None,
            })
            .collect()
    }
}

impl ProgressSink for RecordingSink {
    fn on_event(&self, event: WorkflowEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub enum StubOutcome {
    Succeed(PredictionResult),
    Fail(String),
}

/// Predictor whose calls block until the test releases them, so the network
/// leg resolves exactly when a test decides it does.
pub struct GatedPredictor {
    gate: Semaphore,
    outcome: Mutex<StubOutcome>,
}

impl GatedPredictor {
    pub fn new(outcome: StubOutcome) -> Arc<Self> {
        Arc::new(Self {
            gate: Semaphore::new(0),
            outcome: Mutex::new(outcome),
        })
    }

    pub fn release(&self, calls: usize) {
        self.gate.add_permits(calls);
    }
}

#[async_trait]
impl Predictor for GatedPredictor {
    async fn predict(&self, _upload: &MediaUpload) -> Result<PredictionResult, PredictError> {
        self.gate.acquire().await.expect("gate closed").forget();
        match &*self.outcome.lock().unwrap() {
            StubOutcome::Succeed(result) => Ok(result.clone()),
            StubOutcome::Fail(message) => Err(PredictError::Service(message.clone())),
        }
    }
}

/// Poll until `condition` holds or the timeout trips.
pub async fn wait_until(mut condition: impl FnMut() -> bool, timeout: Duration) {
    let deadline = tokio::time::Instant::now() + timeout;
    while !condition() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "condition not reached within {:?}",
            timeout
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
