use std::sync::Arc;
use leptos::prelude::*;
use hr_core::{Camera, SceneContext, StarRecord, Viewport, ViewerConfig};
use crate::types::LoadStatus;

/// Reactive state shared by every component via context.
#[derive(Clone, Copy)]
pub struct ViewerState {
    /// Axis geometry and the pickable stars. Written once by the build stage.
    pub scene: RwSignal<SceneContext>,
    pub camera: RwSignal<Camera>,
    /// Render surface size in CSS pixels.
    pub viewport: RwSignal<Viewport>,
    /// Last star the user clicked. Never cleared by a miss.
    pub selected: RwSignal<Option<Arc<StarRecord>>>,
    pub load_status: RwSignal<LoadStatus>,
    /// Font family for axis labels, set once the font has loaded.
    pub label_family: RwSignal<Option<String>>,
    pub background: StoredValue<String>,
}

impl ViewerState {
    pub fn new(config: &ViewerConfig, viewport: Viewport) -> Self {
        Self {
            scene: RwSignal::new(SceneContext::new(config.axis)),
            camera: RwSignal::new(Camera::new(&config.camera, viewport.aspect())),
            viewport: RwSignal::new(viewport),
            selected: RwSignal::new(None),
            load_status: RwSignal::new(LoadStatus::Idle),
            label_family: RwSignal::new(None),
            background: StoredValue::new(config.background.clone()),
        }
    }

    /// Track a new render surface size, keeping the camera's aspect in step.
    pub fn resize(&self, viewport: Viewport) {
        if viewport.is_empty() {
            return;
        }
        self.viewport.set(viewport);
        self.camera.update(|c| c.set_aspect(viewport.aspect()));
    }
}

/// Current size of the browser window's layout viewport.
pub fn window_viewport() -> Option<Viewport> {
    let window = web_sys::window()?;
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some(Viewport::new(width, height))
}
