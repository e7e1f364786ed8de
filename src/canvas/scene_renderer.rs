//! Canvas 2D rendering of the HR diagram through the perspective camera.

use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use hr_core::scene::{Label, Segment};
use hr_core::{Camera, PlotPoint, SceneContext, StarRecord, Viewport};
use crate::canvas::colors::{label_font, selection_ring, AXIS_STROKE, LABEL_FILL};

/// Smallest on-screen star radius in CSS pixels.
const MIN_STAR_RADIUS_PX: f64 = 0.75;

/// Labels smaller than this are skipped.
const MIN_LABEL_PX: f64 = 3.0;

pub fn get_canvas_ctx(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()?
        .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
}

fn device_pixel_ratio() -> f64 {
    web_sys::window()
        .map(|w| w.device_pixel_ratio())
        .unwrap_or(1.0)
}

/// Backing-store size last applied to the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfaceSize {
    css_width: f64,
    css_height: f64,
    dpr: f64,
}

/// Match the canvas backing store to the viewport at device resolution.
///
/// Drawing afterwards uses CSS pixels. Returns `true` if the canvas changed.
pub fn fit_canvas(
    canvas: &HtmlCanvasElement,
    ctx: &CanvasRenderingContext2d,
    viewport: &Viewport,
    last: &mut SurfaceSize,
) -> bool {
    let wanted = SurfaceSize {
        css_width: viewport.width,
        css_height: viewport.height,
        dpr: device_pixel_ratio(),
    };
    if wanted == *last {
        return false;
    }
    canvas.set_width((wanted.css_width * wanted.dpr) as u32);
    canvas.set_height((wanted.css_height * wanted.dpr) as u32);
    // Resizing resets the context transform
    if let Err(e) = ctx.set_transform(wanted.dpr, 0.0, 0.0, wanted.dpr, 0.0, 0.0) {
        log::error!("Failed to scale canvas: {e:?}");
    }
    *last = wanted;
    true
}

/// Everything one frame needs.
pub struct FrameInput<'a> {
    pub scene: &'a SceneContext,
    pub camera: &'a Camera,
    pub viewport: Viewport,
    pub background: &'a str,
    /// `None` until the label font has loaded.
    pub label_family: Option<&'a str>,
    pub selected: Option<&'a StarRecord>,
}

/// Draw a complete frame: background, axes, labels, stars.
pub fn render_frame(ctx: &CanvasRenderingContext2d, frame: &FrameInput) {
    let vp = frame.viewport;
    ctx.set_fill_style_str(frame.background);
    ctx.fill_rect(0.0, 0.0, vp.width, vp.height);

    let decorations = frame.scene.decorations();
    ctx.set_stroke_style_str(AXIS_STROKE);
    ctx.set_line_width(1.0);
    draw_segments(ctx, &decorations.axes, frame.camera, &vp);
    draw_segments(ctx, &decorations.ticks, frame.camera, &vp);

    if let Some(family) = frame.label_family {
        draw_labels(ctx, &decorations.labels, family, frame.camera, &vp);
    }

    draw_stars(ctx, frame.scene.points(), frame.camera, &vp, frame.selected);
}

fn draw_segments(ctx: &CanvasRenderingContext2d, segments: &[Segment], camera: &Camera, vp: &Viewport) {
    ctx.begin_path();
    for seg in segments {
        let (Some(a), Some(b)) = (camera.project(&seg.start, vp), camera.project(&seg.end, vp)) else {
            continue;
        };
        ctx.move_to(a.x, a.y);
        ctx.line_to(b.x, b.y);
    }
    ctx.stroke();
}

fn draw_labels(
    ctx: &CanvasRenderingContext2d,
    labels: &[Label],
    family: &str,
    camera: &Camera,
    vp: &Viewport,
) {
    ctx.set_fill_style_str(LABEL_FILL);
    ctx.set_text_baseline("alphabetic");
    for label in labels {
        let Some(anchor) = camera.project(&label.anchor, vp) else { continue };
        let px = label.size * camera.pixels_per_unit(anchor.depth, vp);
        if px < MIN_LABEL_PX {
            continue;
        }
        ctx.save();
        ctx.set_font(&label_font(px, family));
        let placed = ctx
            .translate(anchor.x, anchor.y)
            // Canvas Y points down, so a counter-clockwise plot rotation is negative here
            .and_then(|_| ctx.rotate(-label.rotation))
            .and_then(|_| ctx.fill_text(&label.text, 0.0, 0.0));
        if let Err(e) = placed {
            log::warn!("Failed to draw label {:?}: {e:?}", label.text);
        }
        ctx.restore();
    }
}

fn draw_stars(
    ctx: &CanvasRenderingContext2d,
    points: &[PlotPoint],
    camera: &Camera,
    vp: &Viewport,
    selected: Option<&StarRecord>,
) {
    // Back to front so nearer stars cover farther ones
    let mut projected: Vec<_> = points
        .iter()
        .filter_map(|p| camera.project(&p.position, vp).map(|s| (p, s)))
        .collect();
    projected.sort_by(|a, b| b.1.depth.partial_cmp(&a.1.depth).unwrap_or(std::cmp::Ordering::Equal));

    for (point, screen) in &projected {
        let radius = (point.radius * camera.pixels_per_unit(screen.depth, vp)).max(MIN_STAR_RADIUS_PX);
        ctx.set_fill_style_str(&point.color.to_css());
        ctx.begin_path();
        let _ = ctx.arc(screen.x, screen.y, radius, 0.0, TAU);
        ctx.fill();

        if selected.is_some_and(|s| std::ptr::eq(s, point.record.as_ref())) {
            ctx.set_stroke_style_str(selection_ring(point.color));
            ctx.set_line_width(1.5);
            ctx.begin_path();
            let _ = ctx.arc(screen.x, screen.y, radius + 2.5, 0.0, TAU);
            ctx.stroke();
        }
    }
}
