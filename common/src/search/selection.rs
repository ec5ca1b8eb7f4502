use crate::grid::{Cell, Grid, Point};

/// Picks the next unknown cell for [`Backtracking`](super::Backtracking) to branch on.
pub trait Selection {
    /// Called once with the grid a search starts from.
    fn prepare(&mut self, _grid: &Grid) {}

    /// The next cell to assign, or `None` when no unknown cell is left.
    /// Must only return cells that are currently unknown.
    fn select(&mut self, grid: &Grid) -> Option<Point>;
}

impl<S: Selection + ?Sized> Selection for Box<S> {
    fn prepare(&mut self, grid: &Grid) {
        (**self).prepare(grid)
    }

    fn select(&mut self, grid: &Grid) -> Option<Point> {
        (**self).select(grid)
    }
}

/// Cells in row-major order.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowMajor;

impl Selection for RowMajor {
    fn select(&mut self, grid: &Grid) -> Option<Point> {
        grid.unknowns().next()
    }
}

/// Cells with the most clue neighbours first, so that the most constrained
/// cells are decided while a wrong guess is still cheap to undo.
///
/// Ties go to the later cell in row-major order.
#[derive(Debug, Clone, Default)]
pub struct ClueAdjacency {
    order: Vec<Point>,
}

impl ClueAdjacency {
    pub fn order(&self) -> &[Point] {
        &self.order
    }
}

impl Selection for ClueAdjacency {
    fn prepare(&mut self, grid: &Grid) {
        let mut ranked: Vec<(usize, Point)> = grid
            .unknowns()
            .map(|p| {
                let clues = grid.neighbors(p).filter(|&n| grid.get(n).is_clue()).count();
                (clues, p)
            })
            .collect();
        ranked.sort_by(|a, b| (b.0, b.1.y, b.1.x).cmp(&(a.0, a.1.y, a.1.x)));
        self.order = ranked.into_iter().map(|(_, p)| p).collect();
    }

    fn select(&mut self, grid: &Grid) -> Option<Point> {
        self.order
            .iter()
            .copied()
            .find(|&p| grid.get(p) == Cell::Unknown)
    }
}
