pub mod config;
pub mod error;
pub mod grid;
pub mod paint;
pub mod sync;
pub mod view;

use std::sync::Arc;
use tokio::sync::RwLock;

use error::LifegridError;
use grid::Grid;
use view::Surface;

/// Application state shared between the paint loop and the sync client.
///
/// Writers take the grid lock first, then the surface lock, so the two
/// mutation paths (local painting, remote updates) never deadlock.
pub struct AppState<S> {
    pub grid: Arc<RwLock<Grid>>,
    pub surface: Arc<RwLock<S>>,
}

impl<S: Surface> AppState<S> {
    pub fn new(width: usize, height: usize, surface: S) -> Result<Self, LifegridError> {
        Ok(Self {
            grid: Arc::new(RwLock::new(Grid::new(width, height)?)),
            surface: Arc::new(RwLock::new(surface)),
        })
    }
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            grid: Arc::clone(&self.grid),
            surface: Arc::clone(&self.surface),
        }
    }
}
