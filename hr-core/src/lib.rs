//! Core of the HR diagram viewer, free of any browser dependency.
//!
//! - [`color`]: temperature → color ramp
//! - [`axis`]: temperature/luminosity → plot position
//! - [`scene`]: axis lines, ticks and labels
//! - [`catalog`]: star table parsing, validation and plotting
//! - [`camera`], [`picker`]: perspective camera and ray-cast selection
//! - [`context`]: the scene context tying these together

pub mod axis;
pub mod camera;
pub mod catalog;
pub mod color;
pub mod config;
pub mod context;
pub mod error;
pub mod picker;
pub mod scene;

pub use axis::AxisConfig;
pub use camera::{Camera, CameraConfig, ScreenPoint, Viewport};
pub use catalog::{load_and_plot, plot_stars, PlotPoint, PlotSummary, StarRecord};
pub use color::{color_for, Rgb};
pub use config::{FontSource, ViewerConfig};
pub use context::SceneContext;
pub use error::{ConfigError, LoadError, RowRejection};
pub use picker::{pick, pick_point};
