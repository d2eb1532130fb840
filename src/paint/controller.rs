use crate::grid::Grid;

/// Pointer events driving the paint gesture. `Up` carries no coordinate
/// because releasing the pointer anywhere ends the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Down { x: usize, y: usize },
    Enter { x: usize, y: usize },
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintState {
    Idle,
    Painting { paint_value: bool },
}

/// A single cell mutation, reported so the caller can mirror it to the view
/// without a full redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellChange {
    pub x: usize,
    pub y: usize,
    pub alive: bool,
}

/// The cell-painting state machine.
///
/// Pointer-down anchors the paint value to the negation of the first cell
/// touched, so one drag gesture either draws or erases a contiguous region
/// depending on where it started.
#[derive(Debug)]
pub struct PaintController {
    state: PaintState,
}

impl PaintController {
    pub fn new() -> Self {
        Self {
            state: PaintState::Idle,
        }
    }

    pub fn state(&self) -> PaintState {
        self.state
    }

    /// Apply one pointer event, mutating the grid as needed. Returns the
    /// cell that changed, if any.
    pub fn handle(&mut self, event: PointerEvent, grid: &mut Grid) -> Option<CellChange> {
        match (self.state, event) {
            (PaintState::Idle, PointerEvent::Down { x, y }) => {
                if !grid.contains(x, y) {
                    tracing::warn!("Pointer down outside grid: ({}, {})", x, y);
                    return None;
                }

                // The backing rows can be smaller than the nominal bounds
                // after a mismatched remote update; a missing cell is
                // ignored like any other out-of-range target.
                let Some(current) = grid.cell(x, y) else {
                    tracing::warn!("Pointer down on missing cell: ({}, {})", x, y);
                    return None;
                };

                let paint_value = !current;
                grid.set(x, y, paint_value);
                self.state = PaintState::Painting { paint_value };

                Some(CellChange {
                    x,
                    y,
                    alive: paint_value,
                })
            }
            (PaintState::Painting { paint_value }, PointerEvent::Enter { x, y }) => {
                if !grid.contains(x, y) {
                    tracing::warn!("Pointer enter outside grid: ({}, {})", x, y);
                    return None;
                }

                if grid.cell(x, y).is_none() {
                    tracing::warn!("Pointer enter on missing cell: ({}, {})", x, y);
                    return None;
                }

                grid.set(x, y, paint_value);

                Some(CellChange {
                    x,
                    y,
                    alive: paint_value,
                })
            }
            (PaintState::Painting { .. }, PointerEvent::Up) => {
                self.state = PaintState::Idle;
                None
            }
            // Enter while idle, down while painting, up while idle: no-ops.
            _ => None,
        }
    }
}

impl Default for PaintController {
    fn default() -> Self {
        Self::new()
    }
}
