//! Ready-made puzzles: three fixed reference grids and a random generator.

use rand::Rng;

use crate::grid::{Cell, Grid, Point};

/// The three reference puzzles: a dense 5x5, a sparse 11x11 and a sparse 28x20.
pub fn canned() -> Vec<Grid> {
    vec![small(), medium(), large()]
}

fn small() -> Grid {
    let rows = [
        [2, -1, -1, 1, -1],
        [-1, 5, 4, 2, -1],
        [3, -1, -1, 2, 1],
        [3, -1, 6, -1, 1],
        [2, -1, -1, 2, 1],
    ];
    let cells = rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|&k| if k < 0 { Cell::Unknown } else { Cell::Clue(k as u8) })
                .collect()
        })
        .collect();
    from_cells(cells)
}

fn medium() -> Grid {
    sparse(
        11,
        11,
        &[
            (0, 0, 3),
            (0, 10, 2),
            (2, 2, 3),
            (2, 8, 3),
            (4, 4, 4),
            (4, 6, 4),
            (6, 4, 4),
            (6, 6, 4),
            (8, 2, 3),
            (8, 8, 3),
            (10, 0, 3),
            (10, 10, 2),
        ],
    )
}

fn large() -> Grid {
    sparse(
        28,
        20,
        &[
            (0, 0, 3),
            (0, 19, 2),
            (3, 2, 3),
            (3, 17, 3),
            (6, 4, 4),
            (6, 15, 4),
            (9, 6, 4),
            (9, 13, 4),
            (12, 8, 5),
            (12, 11, 5),
            (15, 8, 5),
            (15, 11, 5),
            (18, 6, 4),
            (18, 13, 4),
            (21, 4, 4),
            (21, 15, 4),
            (24, 2, 3),
            (24, 17, 3),
            (27, 0, 3),
            (27, 19, 2),
        ],
    )
}

/// Clues at the given `(row, col, value)` positions, every other cell unknown.
fn sparse(rows: usize, cols: usize, clues: &[(usize, usize, u8)]) -> Grid {
    let mut cells = vec![vec![Cell::Unknown; cols]; rows];
    for &(row, col, k) in clues {
        cells[row][col] = Cell::Clue(k);
    }
    from_cells(cells)
}

fn from_cells(cells: Vec<Vec<Cell>>) -> Grid {
    match Grid::new(cells) {
        Ok(grid) => grid,
        Err(err) => unreachable!("sample grids are rectangular and non-empty: {err}"),
    }
}

/// Parameters of [`random`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomOptions {
    /// Probability that a non-clue cell hides a trap.
    pub density: f64,
    /// Probability that a cell is revealed as a clue.
    pub clue_ratio: f64,
}

impl Default for RandomOptions {
    fn default() -> Self {
        RandomOptions {
            density: 0.3,
            clue_ratio: 0.35,
        }
    }
}

/// A generated puzzle together with the layout it was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub puzzle: Grid,
    pub solution: Grid,
}

/// Draws a hidden trap layout, reveals a share of the cells as clues carrying
/// their true trap count, and leaves the rest unknown. The hidden layout is a
/// solution, so the puzzle is always satisfiable.
///
/// Probabilities outside `[0, 1]` are clamped and NaN counts as 0. `rows` and
/// `cols` must be non-zero.
pub fn random<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    options: RandomOptions,
    rng: &mut R,
) -> Generated {
    let density = probability(options.density);
    let clue_ratio = probability(options.clue_ratio);

    let mut cells = vec![vec![Cell::Gem; cols]; rows];
    for row in cells.iter_mut() {
        for cell in row.iter_mut() {
            if rng.random_bool(clue_ratio) {
                *cell = Cell::Clue(0);
            } else if rng.random_bool(density) {
                *cell = Cell::Trap;
            }
        }
    }

    // Clue placeholders carry no trap, so the counts come out right.
    let layout = from_cells(cells);
    let reveal = |p: Point| match layout.get(p) {
        Cell::Clue(_) => Cell::Clue(layout.neighbor_counts(p).traps as u8),
        cell => cell,
    };
    let solution = from_cells(
        (0..rows)
            .map(|y| (0..cols).map(|x| reveal(Point { x, y })).collect())
            .collect(),
    );

    let puzzle = from_cells(
        solution
            .cells()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&c| if c.is_resolved() { Cell::Unknown } else { c })
                    .collect()
            })
            .collect(),
    );

    Generated { puzzle, solution }
}

fn probability(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}
