use crate::models::viewport_types::SizeClass;
use serde::Serialize;

/// Geometry for an SVG ring drawn with a dashed stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RingGeometry {
    pub radius: f64,
    pub circumference: f64,
    pub dash_offset: f64,
}

/// Severity tier of the score gauge gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientBand {
    Low,
    Elevated,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GaugeDimensions {
    pub size: u32,
    pub stroke_width: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SemicircleDimensions {
    pub size: u32,
    pub font_size: u32,
}

/// Everything the gauges need for the current window width in one read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GaugeLayout {
    pub class: SizeClass,
    pub small_screen: bool,
    pub gauge: GaugeDimensions,
    pub semicircle: SemicircleDimensions,
}

/// Animation plan for sweeping the result gauge up to the score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TweenPlan {
    pub target: f64,
    pub increment: f64,
    pub step_ms: u64,
}
