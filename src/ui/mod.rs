pub mod board;
pub mod icons;

pub use board::{BoardRenderOptions, render_json, render_text};
