//! Fixed decorative geometry: axis lines, tick marks and text labels.
//!
//! Everything here is derived from [`AxisConfig`] alone and never depends on
//! the loaded stars.

use nalgebra::Point3;
use crate::axis::AxisConfig;

/// Temperature tick positions (K).
pub const TEMPERATURE_TICKS: [f64; 6] = [3_000.0, 5_000.0, 7_000.0, 9_000.0, 11_000.0, 13_000.0];

/// Luminosity tick positions (L☉), one per decade.
pub const LUMINOSITY_TICKS: [f64; 8] = [0.001, 0.01, 0.1, 1.0, 10.0, 100.0, 1_000.0, 10_000.0];

/// Length of a tick mark in plot units.
pub const TICK_LENGTH: f64 = 10.0;

const TICK_LABEL_SIZE: f64 = 8.0;
const TITLE_SIZE: f64 = 12.0;

/// A straight line between two plot-space points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
}

impl Segment {
    fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            start: Point3::new(x0, y0, 0.0),
            end: Point3::new(x1, y1, 0.0),
        }
    }
}

/// A text label anchored at its baseline-left corner.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub text: String,
    pub anchor: Point3<f64>,
    /// Glyph height in plot units.
    pub size: f64,
    /// Counter-clockwise rotation about the anchor, radians.
    pub rotation: f64,
}

impl Label {
    fn new(text: String, x: f64, y: f64, size: f64) -> Self {
        Self {
            text,
            anchor: Point3::new(x, y, 0.0),
            size,
            rotation: 0.0,
        }
    }
}

/// All decorative geometry of the diagram.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AxisGeometry {
    pub axes: Vec<Segment>,
    pub ticks: Vec<Segment>,
    /// Only drawn once the label font is available.
    pub labels: Vec<Label>,
}

/// Tick label for a temperature, e.g. `3000 K`.
pub fn temperature_label(temperature: f64) -> String {
    format!("{temperature} K")
}

/// Tick label for a luminosity, e.g. `0.001 L☉`.
pub fn luminosity_label(luminosity: f64) -> String {
    format!("{luminosity} L☉")
}

/// Build axis lines, ticks and labels for the given scales.
pub fn build_axes(axis: &AxisConfig) -> AxisGeometry {
    let half_tick = TICK_LENGTH / 2.0;

    // X axis runs along the faintest luminosity, Y axis along the hottest temperature
    let x_axis_y = axis.y_for_luminosity(axis.min_luminosity);
    let y_axis_x = axis.x_for_temperature(axis.max_temperature);

    let axes = vec![
        Segment::new(
            axis.x_for_temperature(axis.max_temperature),
            x_axis_y,
            axis.x_for_temperature(axis.min_temperature),
            x_axis_y,
        ),
        Segment::new(
            y_axis_x,
            axis.y_for_luminosity(axis.min_luminosity),
            y_axis_x,
            axis.y_for_luminosity(axis.max_luminosity),
        ),
    ];

    let mut ticks = Vec::with_capacity(TEMPERATURE_TICKS.len() + LUMINOSITY_TICKS.len());
    let mut labels = Vec::with_capacity(ticks.capacity() + 2);

    for &t in &TEMPERATURE_TICKS {
        let x = axis.x_for_temperature(t);
        ticks.push(Segment::new(x, x_axis_y - half_tick, x, x_axis_y + half_tick));
        labels.push(Label::new(temperature_label(t), x, x_axis_y - 20.0, TICK_LABEL_SIZE));
    }

    for &l in &LUMINOSITY_TICKS {
        let y = axis.y_for_luminosity(l);
        ticks.push(Segment::new(y_axis_x - half_tick, y, y_axis_x + half_tick, y));
        labels.push(Label::new(luminosity_label(l), y_axis_x - 40.0, y - 2.0, TICK_LABEL_SIZE));
    }

    labels.push(Label::new(
        "Temperature (K)".to_string(),
        0.0,
        x_axis_y - 50.0,
        TITLE_SIZE,
    ));
    labels.push(Label {
        rotation: std::f64::consts::FRAC_PI_2,
        ..Label::new(
            "Luminosity (L☉)".to_string(),
            axis.x_offset - 80.0,
            axis.y_for_luminosity(1.0) + 20.0,
            TITLE_SIZE,
        )
    });

    AxisGeometry { axes, ticks, labels }
}
