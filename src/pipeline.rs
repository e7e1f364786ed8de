//! One-shot resource loads.
//!
//! The star table goes through two stages joined by an `.await`: a fetch
//! stage that only produces text, and a build stage that turns the text into
//! plotted stars. The label font is a separate single-stage load. Each load
//! reports its own failure once and is never retried.

use leptos::prelude::*;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{FontFace, Response};
use hr_core::{load_and_plot, FontSource, LoadError, PlotSummary, SceneContext, ViewerConfig};
use crate::state::ViewerState;
use crate::types::LoadStatus;

/// Element holding an optional JSON viewer config.
const CONFIG_ELEMENT_ID: &str = "hr-config";

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no browser window")]
    NoWindow,

    #[error("request for {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("could not read {url}: {reason}")]
    Body { url: String, reason: String },

    #[error("font {family:?} failed to load: {reason}")]
    Font { family: String, reason: String },

    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Best-effort message from a thrown JS value.
fn describe(err: &JsValue) -> String {
    if let Some(e) = err.dyn_ref::<js_sys::Error>() {
        return String::from(e.message());
    }
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

/// Read the viewer config from the page, falling back to defaults.
pub fn read_config() -> ViewerConfig {
    let text = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());
    ViewerConfig::from_json_or_default(text.as_deref())
}

/// Fetch stage: download a text resource.
pub async fn fetch_text(url: &str) -> Result<String, PipelineError> {
    let window = web_sys::window().ok_or(PipelineError::NoWindow)?;
    let request_err = |e: JsValue| PipelineError::Request {
        url: url.to_string(),
        reason: describe(&e),
    };
    let body_err = |e: JsValue| PipelineError::Body {
        url: url.to_string(),
        reason: describe(&e),
    };

    let response: Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(request_err)?
        .dyn_into()
        .map_err(request_err)?;

    if !response.ok() {
        return Err(PipelineError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }

    let text = JsFuture::from(response.text().map_err(body_err)?)
        .await
        .map_err(body_err)?;
    text.as_string().ok_or_else(|| PipelineError::Body {
        url: url.to_string(),
        reason: "response body is not text".to_string(),
    })
}

/// Plot a fetched table into `ctx`. On failure the axes stay and no stars are added.
fn plot_into(text: &str, ctx: &mut SceneContext) -> Result<PlotSummary, PipelineError> {
    Ok(load_and_plot(text, ctx)?)
}

/// Build stage: plot a fetched table into the shared scene.
pub fn build_scene(text: &str, state: ViewerState) -> Result<PlotSummary, PipelineError> {
    let mut result = Ok(PlotSummary::default());
    state.scene.update(|ctx| result = plot_into(text, ctx));
    result
}

/// Fetch then build the star table, recording the outcome in `state`.
pub async fn load_stars(url: String, state: ViewerState) {
    state.load_status.set(LoadStatus::Loading);
    let outcome = match fetch_text(&url).await {
        Ok(text) => build_scene(&text, state),
        Err(e) => Err(e),
    };
    match outcome {
        Ok(summary) => state.load_status.set(LoadStatus::Loaded(summary)),
        Err(e) => {
            // Axes still render; the scene just has no stars
            log::error!("Star table {url}: {e}");
            state.load_status.set(LoadStatus::Failed(e.to_string()));
        }
    }
}

/// Make the label font available to the canvas.
///
/// A source without a URL names a font the page already has, so there is
/// nothing to load.
pub async fn load_font(source: &FontSource) -> Result<(), PipelineError> {
    let Some(url) = source.url.as_deref() else {
        return Ok(());
    };
    let font_err = |e: JsValue| PipelineError::Font {
        family: source.family.clone(),
        reason: describe(&e),
    };
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(PipelineError::NoWindow)?;

    let face = FontFace::new_with_str(&source.family, &format!("url(\"{url}\")"))
        .map_err(font_err)?;
    JsFuture::from(face.load().map_err(font_err)?)
        .await
        .map_err(font_err)?;
    document.fonts().add(&face).map_err(font_err)?;
    Ok(())
}

/// Kick off every resource load for a freshly created viewer.
pub fn start(state: ViewerState, config: &ViewerConfig) {
    spawn_local(load_stars(config.data_url.clone(), state));

    match config.font.clone() {
        Some(source) => spawn_local(async move {
            match load_font(&source).await {
                Ok(()) => {
                    log::debug!("Label font {:?} ready", source.family);
                    state.label_family.set(Some(source.family));
                }
                Err(e) => log::error!("{e}; axis labels disabled"),
            }
        }),
        None => log::info!("No label font configured; axis labels disabled"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_build_keeps_axes_without_stars() {
        let mut ctx = SceneContext::default();
        let axes_before = ctx.decorations().axes.len();
        let labels_before = ctx.decorations().labels.len();

        let result = plot_into("name,magnitude\nSirius,-1.46\n", &mut ctx);
        assert!(matches!(result, Err(PipelineError::Load(LoadError::MissingColumn(_)))));
        assert!(ctx.points().is_empty());
        assert_eq!(ctx.decorations().axes.len(), axes_before);
        assert_eq!(ctx.decorations().labels.len(), labels_before);
        assert!(axes_before > 0);
    }

    #[test]
    fn test_successful_build_adds_stars() {
        let mut ctx = SceneContext::default();
        let summary = plot_into(
            "hip,temperature,luminosity\n1,5778,1\n2,15000,1\n",
            &mut ctx,
        )
        .unwrap();
        assert_eq!(summary, PlotSummary { plotted: 1, skipped: 1 });
        assert_eq!(ctx.points().len(), 1);
    }
}
