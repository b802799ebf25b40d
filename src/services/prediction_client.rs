use crate::error::AppError;
use crate::models::upload_types::{MediaUpload, PredictionResult};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/predict";
const ENDPOINT_ENV: &str = "DEEPSIGHT_ENDPOINT";

// A request that hangs never resolves the session on its own; cap it so a
// dead service surfaces as a transport failure.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("prediction request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("prediction service returned HTTP {0}")]
    Http(reqwest::StatusCode),
    #[error("prediction service error: {0}")]
    Service(String),
    #[error("unreadable prediction response: {0}")]
    Decode(String),
    #[error("failed to read {0}: {1}")]
    FileRead(String, std::io::Error),
}

impl From<PredictError> for AppError {
    fn from(err: PredictError) -> Self {
        AppError::transport(err.to_string())
    }
}

/// Boundary to the prediction service: one call per submitted file, no
/// internal retry, failure is a single error value.
#[async_trait]
pub trait Predictor: Send + Sync {
    async fn predict(&self, upload: &MediaUpload) -> Result<PredictionResult, PredictError>;
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    percentage_morphed: Option<f32>,
    #[serde(default)]
    search_result: Vec<String>,
    // The service answers HTTP 200 with an error key when the model throws.
    error: Option<String>,
}

fn decode_response(body: &str) -> Result<PredictionResult, PredictError> {
    let parsed: PredictResponse =
        serde_json::from_str(body).map_err(|e| PredictError::Decode(e.to_string()))?;

    if let Some(message) = parsed.error {
        return Err(PredictError::Service(message));
    }

    let percentage_morphed = parsed
        .percentage_morphed
        .ok_or_else(|| PredictError::Decode("missing percentage_morphed".to_string()))?;

    Ok(PredictionResult {
        percentage_morphed,
        matches: parsed.search_result,
    })
}

pub struct HttpPredictionClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpPredictionClient {
    pub fn new() -> Self {
        let endpoint =
            std::env::var(ENDPOINT_ENV).unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        Self::with_endpoint(endpoint)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("failed to build HTTP client"),
            endpoint: endpoint.into(),
        }
    }
}

impl Default for HttpPredictionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Predictor for HttpPredictionClient {
    async fn predict(&self, upload: &MediaUpload) -> Result<PredictionResult, PredictError> {
        let bytes = tokio::fs::read(&upload.path)
            .await
            .map_err(|e| PredictError::FileRead(upload.file_name.clone(), e))?;

        let part = reqwest::multipart::Part::bytes(bytes).file_name(upload.file_name.clone());
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PredictError::Http(status));
        }

        let body = response.text().await?;
        decode_response(&body)
    }
}
