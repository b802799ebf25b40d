mod common;

use common::{media_fixture, sample_result, wait_until, GatedPredictor, RecordingSink, StubOutcome};
use deepsight_lib::models::upload_types::UploadStatus;
use deepsight_lib::services::analysis::AnalysisStage;
use deepsight_lib::services::preview::PreviewStore;
use deepsight_lib::services::progress::WorkflowEvent;
use deepsight_lib::services::upload_manager::UploadManager;
use std::sync::Arc;
use std::time::Duration;

const FAST_TICK: Duration = Duration::from_millis(1);
const PATIENCE: Duration = Duration::from_secs(5);

#[tokio::test]
async fn runs_to_completion_and_unlocks_the_result() {
    let stage = AnalysisStage::with_tick(FAST_TICK);
    let sink = RecordingSink::new();

    stage.begin(sink.clone(), Some(sample_result()));
    assert!(!stage.is_complete());
    // The payload is not released before the stage finishes.
    assert_eq!(stage.take_result(), None);

    wait_until(|| stage.is_complete(), PATIENCE).await;
    let snapshot = stage.snapshot();
    assert_eq!(snapshot.percentage, 100);
    assert!(snapshot.complete);
    assert!(snapshot.has_result);

    // Forwarded unchanged, and taken exactly once.
    assert_eq!(stage.take_result(), Some(sample_result()));
    assert_eq!(stage.take_result(), None);
}

#[tokio::test]
async fn progress_events_end_in_a_complete_marker() {
    let stage = AnalysisStage::with_tick(FAST_TICK);
    let sink = RecordingSink::new();

    stage.begin(sink.clone(), None);
    wait_until(
        || {
            sink.events().iter().any(|e| {
                matches!(e, WorkflowEvent::AnalysisProgress { complete: true, .. })
            })
        },
        PATIENCE,
    )
    .await;

    let analysis_events: Vec<(u8, bool)> = sink
        .events()
        .into_iter()
        .filter_map(|e| match e {
            WorkflowEvent::AnalysisProgress { percentage, complete } => {
                Some((percentage, complete))
            }
            _ => None,
        })
        .collect();

    assert!(!analysis_events.is_empty());
    for window in analysis_events.windows(2) {
        assert!(window[0].0 < window[1].0, "progress must strictly increase");
    }
    assert_eq!(*analysis_events.last().unwrap(), (100, true));
    assert!(analysis_events[..analysis_events.len() - 1]
        .iter()
        .all(|(_, complete)| !complete));
}

#[tokio::test]
async fn absent_payload_still_runs_to_completion() {
    let stage = AnalysisStage::with_tick(FAST_TICK);
    let sink = RecordingSink::new();

    stage.begin(sink, None);
    wait_until(|| stage.is_complete(), PATIENCE).await;

    assert!(!stage.snapshot().has_result);
    assert_eq!(stage.take_result(), None);
}

#[tokio::test]
async fn cancel_stops_the_ticker_and_drops_the_payload() {
    let stage = AnalysisStage::with_tick(Duration::from_millis(20));
    let sink = RecordingSink::new();

    stage.begin(sink, Some(sample_result()));
    tokio::time::sleep(Duration::from_millis(50)).await;
    stage.cancel();

    let snapshot = stage.snapshot();
    assert_eq!(snapshot.percentage, 0);
    assert!(!snapshot.has_result);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(stage.snapshot().percentage, 0, "ticker must not keep running");
    assert_eq!(stage.take_result(), None);
}

#[tokio::test]
async fn re_entering_supersedes_the_previous_run() {
    let stage = AnalysisStage::with_tick(FAST_TICK);
    let sink = RecordingSink::new();

    stage.begin(sink.clone(), Some(sample_result()));
    let mut replacement = sample_result();
    replacement.percentage_morphed = 5.0;
    replacement.matches.clear();
    stage.begin(sink, Some(replacement.clone()));

    wait_until(|| stage.is_complete(), PATIENCE).await;
    assert_eq!(stage.take_result(), Some(replacement));
}

#[tokio::test]
async fn handoff_chain_carries_the_result_end_to_end() {
    let predictor = GatedPredictor::new(StubOutcome::Succeed(sample_result()));
    let previews = Arc::new(PreviewStore::new());
    let manager =
        UploadManager::with_tick(predictor.clone(), previews, Duration::from_millis(10));
    let stage = AnalysisStage::with_tick(FAST_TICK);
    let sink = RecordingSink::new();
    let dir = tempfile::tempdir().unwrap();

    manager.submit(sink.clone(), media_fixture(dir.path(), "face.png"));
    predictor.release(1);
    wait_until(|| manager.status() == UploadStatus::Uploaded, PATIENCE).await;

    // Upload -> Analysis: by-value copy attached to the transition.
    let payload = manager.handoff_result();
    assert_eq!(payload, Some(sample_result()));
    stage.begin(sink, payload);

    wait_until(|| stage.is_complete(), PATIENCE).await;

    // Analysis -> Result: same pair, unchanged.
    assert_eq!(stage.take_result(), Some(sample_result()));
}

#[tokio::test]
async fn entering_result_without_analysis_yields_nothing() {
    let stage = AnalysisStage::with_tick(FAST_TICK);
    // No begin() at all: the Result view finds an empty slot, not stale data.
    assert_eq!(stage.take_result(), None);
    let snapshot = stage.snapshot();
    assert_eq!(snapshot.percentage, 0);
    assert!(!snapshot.complete);
}
