pub mod store;

pub use store::Grid;
