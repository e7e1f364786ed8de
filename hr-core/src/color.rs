//! Blackbody-like color ramp for stellar surface temperatures.
//!
//! The ramp is a fixed table of control points. Temperatures are clamped to
//! the table's span and interpolated linearly per channel between the two
//! bracketing control points.

/// An 8-bit sRGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pack as `0xRRGGBB`.
    pub fn packed(self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// CSS color string, e.g. `rgb(255,50,0)`.
    pub fn to_css(self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// One entry of the color ramp.
#[derive(Clone, Copy, Debug)]
pub struct ColorControlPoint {
    pub temperature: f64,
    pub color: Rgb,
}

const fn cp(temperature: f64, r: u8, g: u8, b: u8) -> ColorControlPoint {
    ColorControlPoint { temperature, color: Rgb::new(r, g, b) }
}

/// Control points, ascending by temperature.
pub const COLOR_CONTROL_POINTS: [ColorControlPoint; 11] = [
    cp(2_000.0, 255, 50, 0),     // deep red
    cp(3_000.0, 255, 80, 0),     // red
    cp(4_000.0, 255, 140, 0),    // orange
    cp(5_000.0, 255, 255, 0),    // yellow
    cp(6_000.0, 255, 255, 240),  // yellowish white
    cp(8_000.0, 255, 255, 255),  // white
    cp(10_000.0, 201, 215, 255), // light blue
    cp(12_000.0, 100, 150, 255),
    cp(20_000.0, 64, 156, 255),  // blue
    cp(30_000.0, 0, 80, 255),    // deep blue
    cp(40_000.0, 0, 0, 255),
];

/// Coolest temperature the ramp distinguishes.
pub const MIN_COLOR_TEMPERATURE: f64 = COLOR_CONTROL_POINTS[0].temperature;
/// Hottest temperature the ramp distinguishes.
pub const MAX_COLOR_TEMPERATURE: f64 = COLOR_CONTROL_POINTS[COLOR_CONTROL_POINTS.len() - 1].temperature;

/// Map a temperature in Kelvin to its display color.
///
/// Out-of-range input is clamped, so every finite input resolves. NaN maps to
/// the coolest color. A temperature sitting exactly on a control point
/// resolves through the *first* bracketing segment, which lands on that
/// control point's color exactly.
pub fn color_for(temperature: f64) -> Rgb {
    let t = if temperature.is_nan() {
        MIN_COLOR_TEMPERATURE
    } else {
        temperature.clamp(MIN_COLOR_TEMPERATURE, MAX_COLOR_TEMPERATURE)
    };

    COLOR_CONTROL_POINTS
        .windows(2)
        .find(|pair| pair[0].temperature <= t && t <= pair[1].temperature)
        .map(|pair| interpolate(&pair[0], &pair[1], t))
        .unwrap_or(COLOR_CONTROL_POINTS[COLOR_CONTROL_POINTS.len() - 1].color)
}

fn interpolate(lo: &ColorControlPoint, hi: &ColorControlPoint, t: f64) -> Rgb {
    let f = (t - lo.temperature) / (hi.temperature - lo.temperature);
    let channel = |a: u8, b: u8| -> u8 {
        let v = a as f64 + f * (b as f64 - a as f64);
        v.round().clamp(0.0, 255.0) as u8
    };
    Rgb {
        r: channel(lo.color.r, hi.color.r),
        g: channel(lo.color.g, hi.color.g),
        b: channel(lo.color.b, hi.color.b),
    }
}
