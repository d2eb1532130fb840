pub mod renderer;

pub use renderer::{render, Surface, TextSurface};
