use crate::models::gauge_types::{GaugeDimensions, GradientBand, RingGeometry, SemicircleDimensions};
use crate::models::viewport_types::SizeClass;

// Result gauge animates from zero to the score over one second.
pub const TWEEN_DURATION_MS: u64 = 1000;
pub const TWEEN_STEP_MS: u64 = 10;

/// Stroke geometry for a circular indicator at `percentage` percent.
/// The visible arc is drawn by offsetting a dash the length of the
/// full circumference.
pub fn ring_geometry(percentage: f64, size: f64, stroke_width: f64) -> RingGeometry {
    let pct = percentage.clamp(0.0, 100.0);
    let radius = (size - stroke_width) / 2.0;
    let circumference = 2.0 * std::f64::consts::PI * radius;
    let dash_offset = circumference * (1.0 - pct / 100.0);
    RingGeometry {
        radius,
        circumference,
        dash_offset,
    }
}

/// Severity tier for the score gradient. Low scores stay green,
/// the middle band goes yellow, anything above half goes red.
pub fn gradient_band(percentage: u8) -> GradientBand {
    match percentage {
        0..=20 => GradientBand::Low,
        21..=50 => GradientBand::Elevated,
        _ => GradientBand::High,
    }
}

/// Per-step increment that brings the gauge from 0 to `target` over
/// [`TWEEN_DURATION_MS`].
pub fn tween_increment(target: f64) -> f64 {
    target / (TWEEN_DURATION_MS / TWEEN_STEP_MS) as f64
}

/// One animation step, clamped so the gauge never overshoots the score.
pub fn tween_advance(current: f64, target: f64, increment: f64) -> f64 {
    let next = current + increment;
    if next < target {
        next
    } else {
        target
    }
}

pub fn gauge_dimensions(class: SizeClass) -> GaugeDimensions {
    if class == SizeClass::Full {
        GaugeDimensions {
            size: 240,
            stroke_width: 20,
        }
    } else {
        GaugeDimensions {
            size: 192,
            stroke_width: 16,
        }
    }
}

pub fn semicircle_dimensions(class: SizeClass) -> SemicircleDimensions {
    match class {
        SizeClass::Compact => SemicircleDimensions {
            size: 240,
            font_size: 14,
        },
        SizeClass::Narrow => SemicircleDimensions {
            size: 280,
            font_size: 16,
        },
        _ => SemicircleDimensions {
            size: 320,
            font_size: 20,
        },
    }
}
