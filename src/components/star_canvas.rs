use std::cell::RefCell;
use std::rc::Rc;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, MouseEvent};
use hr_core::pick_point;
use crate::canvas::scene_renderer::{self, FrameInput, SurfaceSize};
use crate::state::{window_viewport, ViewerState};

fn request_animation_frame(f: &Closure<dyn FnMut()>) -> bool {
    let Some(window) = web_sys::window() else { return false };
    match window.request_animation_frame(f.as_ref().unchecked_ref()) {
        Ok(_) => true,
        Err(e) => {
            log::error!("requestAnimationFrame failed: {e:?}");
            false
        }
    }
}

/// Redraw the scene once per display refresh until the viewer state is disposed.
fn start_render_loop(canvas: HtmlCanvasElement, state: ViewerState) {
    let Some(ctx) = scene_renderer::get_canvas_ctx(&canvas) else {
        log::error!("Canvas has no 2d context; nothing will render");
        return;
    };

    let frame_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let next = frame_cb.clone();
    let mut surface = SurfaceSize::default();

    *frame_cb.borrow_mut() = Some(Closure::<dyn FnMut()>::new(move || {
        // Owner gone: stop scheduling frames
        let Some(viewport) = state.viewport.try_get_untracked() else { return };
        if viewport.is_empty() {
            if let Some(cb) = next.borrow().as_ref() {
                request_animation_frame(cb);
            }
            return;
        }
        scene_renderer::fit_canvas(&canvas, &ctx, &viewport, &mut surface);

        let label_family = state.label_family.get_untracked();
        let selected = state.selected.get_untracked();
        state.background.with_value(|background| {
            state.camera.with_untracked(|camera| {
                state.scene.with_untracked(|scene| {
                    scene_renderer::render_frame(
                        &ctx,
                        &FrameInput {
                            scene,
                            camera,
                            viewport,
                            background,
                            label_family: label_family.as_deref(),
                            selected: selected.as_deref(),
                        },
                    );
                })
            })
        });

        if let Some(cb) = next.borrow().as_ref() {
            request_animation_frame(cb);
        }
    }));

    if let Some(cb) = frame_cb.borrow().as_ref() {
        request_animation_frame(cb);
    };
}

/// Full-viewport canvas showing the diagram. Click a star to select it.
#[component]
pub fn StarCanvas() -> impl IntoView {
    let state = expect_context::<ViewerState>();
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
    let loop_started = StoredValue::new(false);

    Effect::new(move || {
        let Some(canvas_el) = canvas_ref.get() else { return };
        if loop_started.get_value() {
            return;
        }
        loop_started.set_value(true);
        let canvas: &HtmlCanvasElement = canvas_el.as_ref();
        start_render_loop(canvas.clone(), state);
    });

    let resize = window_event_listener(leptos::ev::resize, move |_| {
        if let Some(viewport) = window_viewport() {
            state.resize(viewport);
        }
    });
    on_cleanup(move || resize.remove());

    let on_click = move |ev: MouseEvent| {
        let Some(canvas_el) = canvas_ref.get_untracked() else { return };
        let canvas: &HtmlCanvasElement = canvas_el.as_ref();
        let rect = canvas.get_bounding_client_rect();
        let x = ev.client_x() as f64 - rect.left();
        let y = ev.client_y() as f64 - rect.top();

        let viewport = state.viewport.get_untracked();
        let hit = state.scene.with_untracked(|scene| {
            state.camera.with_untracked(|camera| {
                pick_point(x, y, &viewport, camera, scene.points()).map(|p| p.record.clone())
            })
        });
        // A miss keeps whatever was shown before
        if let Some(record) = hit {
            log::debug!("Selected star {:?}", record.identifier);
            state.selected.set(Some(record));
        }
    };

    view! {
        <canvas
            class="hr-canvas"
            style="position: fixed; inset: 0; width: 100vw; height: 100vh; display: block;"
            node_ref=canvas_ref
            on:click=on_click
        />
    }
}
