//! Viewer settings.
//!
//! Every field has a default, so a config document only needs the keys it
//! wants to change.

use serde::Deserialize;
use crate::axis::AxisConfig;
use crate::camera::CameraConfig;
use crate::error::ConfigError;

/// Font for axis labels.
///
/// With a `url` the font is downloaded and registered under `family` before
/// labels are drawn. Without one, `family` must already be available to the
/// page (a system font).
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct FontSource {
    /// CSS family name the font is registered under.
    pub family: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl Default for FontSource {
    fn default() -> Self {
        Self {
            family: "Helvetica".to_string(),
            url: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Star table location.
    pub data_url: String,
    /// Label font; `null` disables labels.
    pub font: Option<FontSource>,
    /// CSS background color.
    pub background: String,
    pub camera: CameraConfig,
    pub axis: AxisConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            data_url: "assets/stars.csv".to_string(),
            font: Some(FontSource::default()),
            background: "#808080".to_string(),
            camera: CameraConfig::default(),
            axis: AxisConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// Parse and validate a config document.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse an optional config document, logging and falling back to
    /// defaults when it is absent, blank or unusable.
    pub fn from_json_or_default(text: Option<&str>) -> Self {
        let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
            return Self::default();
        };
        match Self::from_json(text) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{e}; using defaults");
                Self::default()
            }
        }
    }

    /// Check the geometric constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let axis = &self.axis;
        let camera = &self.camera;

        for (name, value) in [
            ("axis.temp_scale", axis.temp_scale),
            ("axis.lum_scale", axis.lum_scale),
            ("axis.size_scale", axis.size_scale),
            ("camera.distance", camera.distance),
            ("camera.near", camera.near),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(format!("{name} must be positive, got {value}")));
            }
        }
        for (name, value) in [
            ("axis.min_temperature", axis.min_temperature),
            ("axis.max_temperature", axis.max_temperature),
            ("axis.max_luminosity", axis.max_luminosity),
            ("axis.x_offset", axis.x_offset),
            ("axis.y_offset", axis.y_offset),
            ("camera.far", camera.far),
        ] {
            if !value.is_finite() {
                return Err(invalid(format!("{name} must be finite, got {value}")));
            }
        }

        if !(axis.min_luminosity > 0.0 && axis.min_luminosity < axis.max_luminosity) {
            return Err(invalid(format!(
                "luminosity range must satisfy 0 < min < max, got {}..{}",
                axis.min_luminosity, axis.max_luminosity
            )));
        }
        if axis.min_temperature >= axis.max_temperature {
            return Err(invalid(format!(
                "temperature range must satisfy min < max, got {}..{}",
                axis.min_temperature, axis.max_temperature
            )));
        }
        if camera.near >= camera.far {
            return Err(invalid(format!(
                "camera.near ({}) must be less than camera.far ({})",
                camera.near, camera.far
            )));
        }
        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            return Err(invalid(format!(
                "camera.fov_degrees must be in (0, 180), got {}",
                camera.fov_degrees
            )));
        }
        Ok(())
    }
}

fn invalid(reason: String) -> ConfigError {
    ConfigError::Invalid(reason)
}
