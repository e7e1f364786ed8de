//! Perspective camera: projection for drawing, unprojection for picking.

use nalgebra::{Isometry3, Perspective3, Point2, Point3, Vector3};
use serde::Deserialize;

/// Camera settings.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f64,
    pub near: f64,
    pub far: f64,
    /// Distance from the plot plane along +Z.
    pub distance: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1_000.0,
            distance: 400.0,
        }
    }
}

/// Size of the render surface in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Width over height, 1.0 for a collapsed viewport.
    pub fn aspect(&self) -> f64 {
        if self.is_empty() { 1.0 } else { self.width / self.height }
    }

    /// Pointer position to normalized device coordinates (-1..1, +Y up).
    pub fn to_ndc(&self, pointer_x: f64, pointer_y: f64) -> Point2<f64> {
        Point2::new(
            (pointer_x / self.width) * 2.0 - 1.0,
            -(pointer_y / self.height) * 2.0 + 1.0,
        )
    }
}

/// A projected point in viewport pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
    /// Distance in front of the camera along its view axis.
    pub depth: f64,
}

/// Half-line starting at `origin`. `direction` is unit length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Point3<f64>,
    pub direction: Vector3<f64>,
}

impl Ray {
    pub fn at(&self, distance: f64) -> Point3<f64> {
        self.origin + self.direction * distance
    }
}

#[derive(Clone, Debug)]
pub struct Camera {
    eye: Point3<f64>,
    view: Isometry3<f64>,
    projection: Perspective3<f64>,
}

impl Camera {
    /// Camera on the +Z axis looking at the plot origin, +Y up.
    pub fn new(config: &CameraConfig, aspect: f64) -> Self {
        let eye = Point3::new(0.0, 0.0, config.distance);
        let target = Point3::origin();
        Self {
            eye,
            view: Isometry3::look_at_rh(&eye, &target, &Vector3::y()),
            projection: Perspective3::new(
                aspect,
                config.fov_degrees.to_radians(),
                config.near,
                config.far,
            ),
        }
    }

    pub fn eye(&self) -> Point3<f64> {
        self.eye
    }

    pub fn aspect(&self) -> f64 {
        self.projection.aspect()
    }

    /// Update the projection after the render surface changed shape.
    pub fn set_aspect(&mut self, aspect: f64) {
        if aspect.is_finite() && aspect > 0.0 {
            self.projection.set_aspect(aspect);
        }
    }

    /// World-space ray from the eye through a point in normalized device coordinates.
    pub fn ray_through(&self, ndc: &Point2<f64>) -> Ray {
        let far_view = self.projection.unproject_point(&Point3::new(ndc.x, ndc.y, 1.0));
        let far_world = self.view.inverse_transform_point(&far_view);
        Ray {
            origin: self.eye,
            direction: (far_world - self.eye).normalize(),
        }
    }

    /// Project a world point into viewport pixels. `None` outside the near/far range.
    pub fn project(&self, point: &Point3<f64>, viewport: &Viewport) -> Option<ScreenPoint> {
        let view_point = self.view.transform_point(point);
        let depth = -view_point.z;
        if depth < self.projection.znear() || depth > self.projection.zfar() {
            return None;
        }
        let ndc = self.projection.project_point(&view_point);
        Some(ScreenPoint {
            x: (ndc.x + 1.0) * 0.5 * viewport.width,
            y: (1.0 - ndc.y) * 0.5 * viewport.height,
            depth,
        })
    }

    /// How many viewport pixels one world unit spans at `depth`.
    pub fn pixels_per_unit(&self, depth: f64, viewport: &Viewport) -> f64 {
        let focal = 1.0 / (self.projection.fovy() * 0.5).tan();
        focal * viewport.height * 0.5 / depth
    }
}
