use crate::error::LifegridError;

/// The boolean cell matrix, indexed `[row][col]` (row = y, col = x) to match
/// the wire format. Dimensions are fixed for the grid's lifetime; local edits
/// mutate cells in place and remote updates swap the whole matrix.
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Vec<bool>>,
}

impl Grid {
    /// Create a grid with every cell dead.
    pub fn new(width: usize, height: usize) -> Result<Self, LifegridError> {
        if width == 0 || height == 0 {
            return Err(LifegridError::InvalidDimensions { width, height });
        }

        Ok(Self {
            width,
            height,
            cells: vec![vec![false; width]; height],
        })
    }

    /// Read one cell. Coordinates must be in range; callers that derive
    /// coordinates from user input guard with [`Grid::contains`] first.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[y][x]
    }

    /// Checked read. Returns `None` when the backing rows lack the
    /// coordinate, which can happen after a [`Grid::replace`] with a
    /// mismatched matrix.
    pub fn cell(&self, x: usize, y: usize) -> Option<bool> {
        self.cells.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Overwrite one cell. Idempotent. A coordinate the backing rows lack
    /// (possible after a mismatched [`Grid::replace`]) is skipped with a
    /// warning instead of panicking.
    pub fn set(&mut self, x: usize, y: usize, alive: bool) {
        match self.cells.get_mut(y).and_then(|row| row.get_mut(x)) {
            Some(cell) => *cell = alive,
            None => tracing::warn!("Set on missing coordinate: ({}, {})", x, y),
        }
    }

    /// Swap the entire matrix, as when applying a remote update. The new
    /// matrix is not validated against the stored dimensions; the renderer
    /// tolerates a mismatch by skipping missing coordinates.
    pub fn replace(&mut self, new_cells: Vec<Vec<bool>>) {
        self.cells = new_cells;
    }

    /// Whether a coordinate lies within the nominal bounds.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Count the alive cells.
    pub fn num_alive(&self) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|&&alive| alive).count())
            .sum()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[Vec<bool>] {
        &self.cells
    }
}
