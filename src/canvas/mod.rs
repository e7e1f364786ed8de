pub mod colors;
pub mod scene_renderer;
