use hr_core::Rgb;

/// Axis lines and tick marks.
pub const AXIS_STROKE: &str = "#000";

/// Axis and tick label text.
pub const LABEL_FILL: &str = "#000";

/// Relative luminance (0-1) of an sRGB color, Rec. 709 weights on gamma-encoded values.
pub fn luminance(c: Rgb) -> f64 {
    (0.2126 * c.r as f64 + 0.7152 * c.g as f64 + 0.0722 * c.b as f64) / 255.0
}

/// Outline color for the selected star: dark on bright stars, white on dim ones.
pub fn selection_ring(c: Rgb) -> &'static str {
    if luminance(c) > 0.6 { "rgba(0,0,0,0.85)" } else { "rgba(255,255,255,0.9)" }
}

/// CSS font shorthand for a label of `px` pixels in `family`.
pub fn label_font(px: f64, family: &str) -> String {
    format!("{px:.1}px \"{family}\", sans-serif")
}
