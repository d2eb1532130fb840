//! Client configuration constants

/// Grid width in cells
pub const GRID_WIDTH: usize = 50;

/// Grid height in cells
pub const GRID_HEIGHT: usize = 50;

/// Well-known engine endpoint
pub const DEFAULT_ENGINE_URL: &str = "ws://localhost:8080/game";

/// Status report cadence in milliseconds
pub const STATUS_INTERVAL_MS: u64 = 1000;
