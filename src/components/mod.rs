pub mod app;
pub mod star_canvas;
pub mod star_info;
