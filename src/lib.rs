mod commands;
pub mod error;
pub mod models;
pub mod services;

use services::analysis::AnalysisStage;
use services::prediction_client::{HttpPredictionClient, Predictor};
use services::preview::PreviewStore;
use services::upload_manager::UploadManager;
use services::viewport::ViewportObserver;
use std::sync::Arc;
use tauri::{Emitter, Manager};

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_window_state::Builder::default().build())
        .setup(|app| {
            let previews = Arc::new(PreviewStore::new());
            let predictor: Arc<dyn Predictor> = Arc::new(HttpPredictionClient::new());

            app.manage(previews.clone());
            app.manage(UploadManager::new(predictor, previews));
            app.manage(AnalysisStage::new());

            let observer = Arc::new(ViewportObserver::new());
            let app_handle = app.handle().clone();
            observer.subscribe(move |class| {
                let _ = app_handle.emit("viewport-changed", serde_json::json!({ "class": class }));
            });
            app.manage(observer);

            Ok(())
        })
        .on_window_event(|window, event| {
            if let tauri::WindowEvent::Resized(size) = event {
                let observer = window.state::<Arc<ViewportObserver>>();
                observer.update(size.width);
            }
        })
        .invoke_handler(tauri::generate_handler![
            commands::upload::submit_media,
            commands::upload::get_upload_status,
            commands::upload::reset_upload,
            commands::upload::load_preview,
            commands::analysis::start_analysis,
            commands::analysis::get_analysis_status,
            commands::analysis::cancel_analysis,
            commands::analysis::enter_result,
            commands::viewport::report_viewport_width,
            commands::viewport::get_size_class,
            commands::gauge::get_ring_geometry,
            commands::gauge::get_gradient_band,
            commands::gauge::get_score_tween,
            commands::gauge::get_gauge_layout,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
