//! The scene context shared by the builder, the loader and the picker.

use crate::axis::AxisConfig;
use crate::catalog::PlotPoint;
use crate::scene::{build_axes, AxisGeometry};

/// Owns everything that makes up one diagram.
///
/// Points are appended only by the star plotter while a table loads; after
/// that the collection is read-only.
#[derive(Clone, Debug)]
pub struct SceneContext {
    axis: AxisConfig,
    decorations: AxisGeometry,
    points: Vec<PlotPoint>,
}

impl SceneContext {
    pub fn new(axis: AxisConfig) -> Self {
        Self {
            decorations: build_axes(&axis),
            axis,
            points: Vec::new(),
        }
    }

    pub fn axis(&self) -> &AxisConfig {
        &self.axis
    }

    pub fn decorations(&self) -> &AxisGeometry {
        &self.decorations
    }

    /// Pickable points in plotting order.
    pub fn points(&self) -> &[PlotPoint] {
        &self.points
    }

    pub(crate) fn register(&mut self, point: PlotPoint) {
        self.points.push(point);
    }
}

impl Default for SceneContext {
    fn default() -> Self {
        Self::new(AxisConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_context_has_axes_and_no_points() {
        let ctx = SceneContext::default();
        assert!(ctx.points().is_empty());
        assert_eq!(ctx.decorations().axes.len(), 2);
        assert_eq!(*ctx.axis(), AxisConfig::default());
    }

    #[test]
    fn test_decorations_follow_axis_config() {
        let axis = AxisConfig { x_offset: 0.0, ..AxisConfig::default() };
        let ctx = SceneContext::new(axis);
        assert_eq!(ctx.decorations().axes[1].start.x, 0.0);
    }
}
