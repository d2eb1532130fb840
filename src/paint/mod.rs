pub mod controller;

pub use controller::{CellChange, PaintController, PaintState, PointerEvent};
