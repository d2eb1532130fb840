use crate::grid::Grid;

/// A renderable view of the grid. Implementations own their own mark storage;
/// the renderer never assumes the surface matches the grid's dimensions.
pub trait Surface {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Mark one coordinate alive or clear it.
    fn mark(&mut self, x: usize, y: usize, alive: bool);
}

/// Redraw the whole surface from the grid.
///
/// Walks the grid's nominal bounds and skips any coordinate the surface or
/// the backing rows lack, so a dimension mismatch between a remote update
/// and the rendered surface degrades to missing cells instead of a panic.
pub fn render<S: Surface + ?Sized>(grid: &Grid, surface: &mut S) {
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            if x >= surface.width() || y >= surface.height() {
                continue;
            }

            let Some(alive) = grid.cell(x, y) else {
                continue;
            };

            surface.mark(x, y, alive);
        }
    }
}

/// Terminal-friendly surface: a fixed mark matrix dumped as text, one row
/// per line, `#` for alive and `.` for dead.
#[derive(Debug)]
pub struct TextSurface {
    width: usize,
    height: usize,
    marks: Vec<Vec<bool>>,
}

impl TextSurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            marks: vec![vec![false; width]; height],
        }
    }

    pub fn to_text(&self) -> String {
        self.marks
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&alive| if alive { '#' } else { '.' })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Surface for TextSurface {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn mark(&mut self, x: usize, y: usize, alive: bool) {
        self.marks[y][x] = alive;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_mirrors_grid() {
        let mut grid = Grid::new(3, 2).unwrap();
        grid.set(0, 0, true);
        grid.set(2, 1, true);

        let mut surface = TextSurface::new(3, 2);
        render(&grid, &mut surface);

        assert_eq!(surface.to_text(), "#..\n..#");
    }

    #[test]
    fn test_render_clears_stale_marks() {
        let mut grid = Grid::new(2, 2).unwrap();
        let mut surface = TextSurface::new(2, 2);
        surface.mark(0, 0, true);
        surface.mark(1, 1, true);

        render(&grid, &mut surface);

        assert_eq!(surface.to_text(), "..\n..");
    }

    #[test]
    fn test_render_skips_coordinates_missing_from_surface() {
        let mut grid = Grid::new(4, 4).unwrap();
        grid.set(0, 0, true);
        grid.set(3, 3, true);

        // Surface is smaller than the grid: out-of-surface cells are skipped.
        let mut surface = TextSurface::new(2, 2);
        render(&grid, &mut surface);

        assert_eq!(surface.to_text(), "#.\n..");
    }

    #[test]
    fn test_render_skips_rows_missing_from_grid() {
        let mut grid = Grid::new(3, 3).unwrap();
        // Simulate a mismatched remote update: fewer and shorter rows.
        grid.replace(vec![vec![true, true]]);

        let mut surface = TextSurface::new(3, 3);
        surface.mark(2, 2, true);
        render(&grid, &mut surface);

        // The present cells render, the missing ones are left untouched.
        assert_eq!(surface.to_text(), "##.\n...\n..#");
    }
}
