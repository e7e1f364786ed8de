use leptos::prelude::*;
use hr_core::Viewport;
use crate::components::star_canvas::StarCanvas;
use crate::components::star_info::StarInfoPanel;
use crate::pipeline;
use crate::state::{window_viewport, ViewerState};

#[component]
pub fn App() -> impl IntoView {
    let config = pipeline::read_config();
    let viewport = window_viewport().unwrap_or(Viewport::new(1280.0, 720.0));
    let state = ViewerState::new(&config, viewport);
    provide_context(state);
    pipeline::start(state, &config);

    view! {
        <div class="app">
            <StarCanvas />
            <StarInfoPanel />
            <StatusLine />
        </div>
    }
}

#[component]
fn StatusLine() -> impl IntoView {
    let state = expect_context::<ViewerState>();
    let text = move || state.load_status.with(|s| s.label());

    view! {
        <div
            class="status-line"
            style="position: absolute; bottom: 8px; left: 12px; font: 12px sans-serif; \
                   color: #222; pointer-events: none;"
        >
            {text}
        </div>
    }
}
