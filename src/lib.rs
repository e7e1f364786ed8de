pub mod canvas;
pub mod components;
pub mod pipeline;
pub mod state;
pub mod types;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    if let Err(e) = console_log::init_with_level(level) {
        web_sys::console::warn_1(&format!("Logger already set: {e}").into());
    }
    leptos::mount::mount_to_body(components::app::App);
}
