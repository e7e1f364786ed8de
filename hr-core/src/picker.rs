//! Ray-cast picking of plotted stars.

use std::cmp::Ordering;
use nalgebra::Point3;
use crate::camera::{Camera, Ray, Viewport};
use crate::catalog::{PlotPoint, StarRecord};

/// A ray hit on a plotted star.
#[derive(Clone, Copy, Debug)]
pub struct Intersection<'a> {
    /// Distance from the ray origin to the hit.
    pub distance: f64,
    pub point: &'a PlotPoint,
}

/// Distance along `ray` to the first hit on a sphere, if any.
///
/// A ray starting inside the sphere reports the exit point.
pub fn intersect_sphere(ray: &Ray, center: &Point3<f64>, radius: f64) -> Option<f64> {
    let oc = ray.origin - *center;
    let b = oc.dot(&ray.direction);
    let c = oc.norm_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let root = disc.sqrt();
    let near = -b - root;
    if near >= 0.0 {
        return Some(near);
    }
    let far = -b + root;
    (far >= 0.0).then_some(far)
}

/// Every star the ray hits, nearest first.
pub fn intersect_points<'a>(ray: &Ray, points: &'a [PlotPoint]) -> Vec<Intersection<'a>> {
    let mut hits: Vec<Intersection<'a>> = points
        .iter()
        .filter_map(|point| {
            intersect_sphere(ray, &point.position, point.radius)
                .map(|distance| Intersection { distance, point })
        })
        .collect();
    hits.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(Ordering::Equal));
    hits
}

/// The plotted point under the pointer, nearest the camera.
pub fn pick_point<'a>(
    pointer_x: f64,
    pointer_y: f64,
    viewport: &Viewport,
    camera: &Camera,
    points: &'a [PlotPoint],
) -> Option<&'a PlotPoint> {
    if points.is_empty() || viewport.is_empty() {
        return None;
    }
    let ray = camera.ray_through(&viewport.to_ndc(pointer_x, pointer_y));
    intersect_points(&ray, points).first().map(|hit| hit.point)
}

/// The star under the pointer, nearest the camera.
///
/// Returns `None` when nothing is hit; callers keep their previous selection.
pub fn pick<'a>(
    pointer_x: f64,
    pointer_y: f64,
    viewport: &Viewport,
    camera: &Camera,
    points: &'a [PlotPoint],
) -> Option<&'a StarRecord> {
    pick_point(pointer_x, pointer_y, viewport, camera, points).map(|p| p.record.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use nalgebra::Vector3;
    use approx::assert_relative_eq;
    use crate::axis::AxisConfig;
    use crate::camera::CameraConfig;
    use crate::color::Rgb;

    fn star_at(id: &str, x: f64, y: f64, z: f64) -> PlotPoint {
        PlotPoint {
            position: Point3::new(x, y, z),
            color: Rgb::new(255, 255, 255),
            radius: 2.0,
            record: Arc::new(StarRecord {
                identifier: Some(id.to_string()),
                temperature: 5_778.0,
                luminosity: 1.0,
            }),
        }
    }

    fn setup() -> (Viewport, Camera) {
        let vp = Viewport::new(1200.0, 800.0);
        let cam = Camera::new(&CameraConfig::default(), vp.aspect());
        (vp, cam)
    }

    #[test]
    fn test_sphere_hit_distance() {
        let ray = Ray {
            origin: Point3::new(0.0, 0.0, 400.0),
            direction: Vector3::new(0.0, 0.0, -1.0),
        };
        let d = intersect_sphere(&ray, &Point3::origin(), 2.0).unwrap();
        assert_relative_eq!(d, 398.0, epsilon = 1e-9);
        assert!(intersect_sphere(&ray, &Point3::new(5.0, 0.0, 0.0), 2.0).is_none());
        // Sphere behind the origin
        assert!(intersect_sphere(&ray, &Point3::new(0.0, 0.0, 500.0), 2.0).is_none());
    }

    #[test]
    fn test_ray_from_inside_reports_exit() {
        let ray = Ray {
            origin: Point3::origin(),
            direction: Vector3::new(1.0, 0.0, 0.0),
        };
        assert_relative_eq!(intersect_sphere(&ray, &Point3::origin(), 3.0).unwrap(), 3.0);
    }

    #[test]
    fn test_no_points_never_picks() {
        let (vp, cam) = setup();
        for (x, y) in [(0.0, 0.0), (600.0, 400.0), (1199.0, 799.0), (-50.0, 9000.0)] {
            assert!(pick(x, y, &vp, &cam, &[]).is_none());
        }
    }

    #[test]
    fn test_single_point_under_pointer() {
        let (vp, cam) = setup();
        let points = vec![star_at("1", 0.0, 0.0, 0.0)];
        let hit = pick(600.0, 400.0, &vp, &cam, &points).unwrap();
        assert_eq!(hit.identifier.as_deref(), Some("1"));
    }

    #[test]
    fn test_miss_keeps_nothing() {
        let (vp, cam) = setup();
        let points = vec![star_at("1", 0.0, 0.0, 0.0)];
        assert!(pick(10.0, 10.0, &vp, &cam, &points).is_none());
    }

    #[test]
    fn test_picks_projected_star() {
        let (vp, cam) = setup();
        let axis = AxisConfig::default();
        let sun = StarRecord {
            identifier: Some("sun".to_string()),
            temperature: 5_778.0,
            luminosity: 1.0,
        };
        let points = vec![
            star_at("other", -200.0, 200.0, 0.0),
            PlotPoint::from_record(sun, &axis),
        ];
        let screen = cam.project(&points[1].position, &vp).unwrap();
        let hit = pick(screen.x, screen.y, &vp, &cam, &points).unwrap();
        assert_eq!(hit.identifier.as_deref(), Some("sun"));
    }

    #[test]
    fn test_nearest_of_overlapping_stars_wins() {
        let (vp, cam) = setup();
        let points = vec![
            star_at("far", 0.0, 0.0, -50.0),
            star_at("near", 0.0, 0.0, 30.0),
            star_at("middle", 0.5, 0.0, 0.0),
        ];
        let ray = cam.ray_through(&vp.to_ndc(600.0, 400.0));
        let hits = intersect_points(&ray, &points);
        let order: Vec<&str> = hits
            .iter()
            .map(|h| h.point.record.identifier.as_deref().unwrap())
            .collect();
        assert_eq!(order, ["near", "middle", "far"]);

        let hit = pick(600.0, 400.0, &vp, &cam, &points).unwrap();
        assert_eq!(hit.identifier.as_deref(), Some("near"));
    }
}
