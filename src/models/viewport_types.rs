use serde::Serialize;

/// Width tier of the app window. Breakpoints match the stylesheet:
/// 560, 720, 840 and 1080 logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    Compact,
    Narrow,
    Medium,
    Wide,
    Full,
}

impl SizeClass {
    pub fn from_width(width: u32) -> Self {
        match width {
            0..=559 => SizeClass::Compact,
            560..=719 => SizeClass::Narrow,
            720..=839 => SizeClass::Medium,
            840..=1079 => SizeClass::Wide,
            _ => SizeClass::Full,
        }
    }

    /// The upload page swaps to its stacked layout below 840px.
    pub fn is_small_screen(&self) -> bool {
        matches!(self, SizeClass::Compact | SizeClass::Narrow | SizeClass::Medium)
    }
}
