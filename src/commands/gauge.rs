use crate::models::gauge_types::{GaugeLayout, GradientBand, RingGeometry, TweenPlan};
use crate::services::gauge;
use crate::services::viewport::ViewportObserver;
use std::sync::Arc;
use tauri::State;

#[tauri::command]
pub fn get_ring_geometry(percentage: f64, size: f64, stroke_width: f64) -> RingGeometry {
    gauge::ring_geometry(percentage, size, stroke_width)
}

#[tauri::command]
pub fn get_gradient_band(percentage: u8) -> GradientBand {
    gauge::gradient_band(percentage)
}

#[tauri::command]
pub fn get_score_tween(target: f64) -> TweenPlan {
    TweenPlan {
        target,
        increment: gauge::tween_increment(target),
        step_ms: gauge::TWEEN_STEP_MS,
    }
}

#[tauri::command]
pub fn get_gauge_layout(observer: State<'_, Arc<ViewportObserver>>) -> GaugeLayout {
    let class = observer.size_class();
    GaugeLayout {
        class,
        small_screen: class.is_small_screen(),
        gauge: gauge::gauge_dimensions(class),
        semicircle: gauge::semicircle_dimensions(class),
    }
}
