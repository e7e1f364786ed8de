//! Plot-space scales for the HR diagram.
//!
//! Temperature runs along X on a linear scale, inverted so hotter stars sit
//! further left. Luminosity runs along Y on a log10 scale.

use nalgebra::Point2;
use serde::Deserialize;

/// Scale constants shared by the coordinate mapper and the scene builder.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AxisConfig {
    /// Plot units per Kelvin.
    pub temp_scale: f64,
    /// Plot units per decade of luminosity.
    pub lum_scale: f64,
    /// Star sphere radius in plot units.
    pub size_scale: f64,
    pub min_temperature: f64,
    pub max_temperature: f64,
    pub min_luminosity: f64,
    pub max_luminosity: f64,
    pub x_offset: f64,
    pub y_offset: f64,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            temp_scale: 0.055,
            lum_scale: 60.0,
            size_scale: 2.0,
            min_temperature: 2_000.0,
            max_temperature: 14_000.0,
            min_luminosity: 0.0001,
            max_luminosity: 10_000.0,
            x_offset: -300.0,
            y_offset: 50.0,
        }
    }
}

impl AxisConfig {
    /// X coordinate for a temperature (K).
    pub fn x_for_temperature(&self, temperature: f64) -> f64 {
        (self.max_temperature - temperature) * self.temp_scale + self.x_offset
    }

    /// Y coordinate for a luminosity (L☉). Requires `luminosity > 0`.
    pub fn y_for_luminosity(&self, luminosity: f64) -> f64 {
        luminosity.log10() * self.lum_scale + self.y_offset
    }

    /// Plot-space position of a star.
    pub fn position_for(&self, temperature: f64, luminosity: f64) -> Point2<f64> {
        Point2::new(
            self.x_for_temperature(temperature),
            self.y_for_luminosity(luminosity),
        )
    }

    pub fn temperature_in_range(&self, temperature: f64) -> bool {
        temperature.is_finite()
            && temperature >= self.min_temperature
            && temperature <= self.max_temperature
    }

    pub fn luminosity_in_range(&self, luminosity: f64) -> bool {
        luminosity.is_finite()
            && luminosity >= self.min_luminosity
            && luminosity <= self.max_luminosity
    }

    /// Whether a star with these values belongs on the plot (bounds inclusive).
    pub fn accepts(&self, temperature: f64, luminosity: f64) -> bool {
        self.temperature_in_range(temperature) && self.luminosity_in_range(luminosity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sun_position() {
        let axis = AxisConfig::default();
        let p = axis.position_for(5_778.0, 1.0);
        assert_relative_eq!(p.x, (14_000.0 - 5_778.0) * 0.055 - 300.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 50.0, epsilon = 1e-12);
    }

    #[test]
    fn test_axis_corners() {
        let axis = AxisConfig::default();
        // Hottest star sits on the Y axis
        assert_relative_eq!(axis.x_for_temperature(14_000.0), -300.0);
        assert_relative_eq!(axis.x_for_temperature(2_000.0), 12_000.0 * 0.055 - 300.0, epsilon = 1e-9);
        assert_relative_eq!(axis.y_for_luminosity(0.0001), -190.0, epsilon = 1e-9);
        assert_relative_eq!(axis.y_for_luminosity(10_000.0), 290.0, epsilon = 1e-9);
    }

    #[test]
    fn test_temperature_strictly_decreases_x() {
        let axis = AxisConfig::default();
        let temps = [2_000.0, 2_000.5, 3_500.0, 5_778.0, 9_999.0, 13_999.0, 14_000.0];
        for pair in temps.windows(2) {
            let a = axis.position_for(pair[0], 1.0);
            let b = axis.position_for(pair[1], 1.0);
            assert!(b.x < a.x, "{} K -> {}, {} K -> {}", pair[0], a.x, pair[1], b.x);
            assert_eq!(a.y, b.y);
        }
    }

    #[test]
    fn test_luminosity_strictly_increases_y() {
        let axis = AxisConfig::default();
        let lums = [0.0001, 0.00011, 0.01, 0.5, 1.0, 1.0001, 250.0, 10_000.0];
        for pair in lums.windows(2) {
            let a = axis.position_for(6_000.0, pair[0]);
            let b = axis.position_for(6_000.0, pair[1]);
            assert!(b.y > a.y, "{} -> {}, {} -> {}", pair[0], a.y, pair[1], b.y);
            assert_eq!(a.x, b.x);
        }
    }

    #[test]
    fn test_accepts_inclusive_bounds() {
        let axis = AxisConfig::default();
        assert!(axis.accepts(2_000.0, 0.0001));
        assert!(axis.accepts(14_000.0, 10_000.0));
        assert!(!axis.accepts(1_999.9, 1.0));
        assert!(!axis.accepts(15_000.0, 1.0));
        assert!(!axis.accepts(5_000.0, 0.0));
        assert!(!axis.accepts(5_000.0, 10_000.1));
        assert!(!axis.accepts(f64::NAN, 1.0));
        assert!(!axis.accepts(5_000.0, f64::INFINITY));
    }
}
