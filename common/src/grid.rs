use std::fmt;
use std::str::FromStr;

use crate::error::{BadCell, GridError};

/// Represents a 2D coordinate on the grid. `x` is the column, `y` the row.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub fn new(row: usize, col: usize) -> Self {
        Point { x: col, y: row }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.y, self.x)
    }
}

/// The state of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Cell {
    Trap,
    Gem,
    Unknown,
    Clue(u8), // Exact number of traps among the 8 neighbours.
}

impl Cell {
    pub fn is_clue(self) -> bool {
        matches!(self, Cell::Clue(_))
    }

    pub fn clue_value(self) -> Option<u8> {
        match self {
            Cell::Clue(k) => Some(k),
            _ => None,
        }
    }

    /// Trap and Gem are the two resolved states of a non-clue cell.
    pub fn is_resolved(self) -> bool {
        matches!(self, Cell::Trap | Cell::Gem)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Trap => f.write_str("T"),
            Cell::Gem => f.write_str("G"),
            Cell::Unknown => f.write_str("_"),
            Cell::Clue(k) => write!(f, "{k}"),
        }
    }
}

impl FromStr for Cell {
    type Err = BadCell;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let bad = || BadCell(token.to_string());
        match token {
            "T" => Ok(Cell::Trap),
            "G" => Ok(Cell::Gem),
            "_" => Ok(Cell::Unknown),
            digits if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
                digits.parse().map(Cell::Clue).map_err(|_| bad())
            }
            _ => Err(bad()),
        }
    }
}

/// Trap, gem and unknown tallies over the neighbourhood of one cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NeighborCounts {
    pub traps: usize,
    pub gems: usize,
    pub unknowns: usize,
}

/// A rectangular puzzle grid.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    /// Builds a grid from rows of cells. Rows must be non-empty and of equal length.
    pub fn new(cells: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        let height = cells.len();
        let width = cells.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(GridError::Empty);
        }
        if let Some((row, ragged)) = cells.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(GridError::Ragged {
                row,
                expected: width,
                found: ragged.len(),
            });
        }
        Ok(Grid {
            width,
            height,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.height
    }

    pub fn cols(&self) -> usize {
        self.width
    }

    pub fn get(&self, at: Point) -> Cell {
        self.cells[at.y][at.x]
    }

    /// Overwrites a non-clue cell. Clues are fixed once the grid is loaded.
    pub fn set(&mut self, at: Point, cell: Cell) {
        debug_assert!(!self.get(at).is_clue(), "clue at {at} is immutable");
        debug_assert!(!cell.is_clue(), "cannot place a clue at {at}");
        self.cells[at.y][at.x] = cell;
    }

    pub fn cells(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    /// Every point of the grid in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + use<> {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| Point { x, y }))
    }

    pub fn unknowns(&self) -> impl Iterator<Item = Point> + '_ {
        self.points().filter(|&p| self.get(p) == Cell::Unknown)
    }

    /// Clue cells together with their value, in row-major order.
    pub fn clues(&self) -> impl Iterator<Item = (Point, u8)> + '_ {
        self.points()
            .filter_map(|p| self.get(p).clue_value().map(|k| (p, k)))
    }

    pub fn count_unknown(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|c| matches!(c, Cell::Unknown))
            .count()
    }

    pub fn is_resolved(&self) -> bool {
        self.count_unknown() == 0
    }

    /// All valid neighbour coordinates of a point, clipped to the grid edges.
    pub fn neighbors(&self, point: Point) -> impl Iterator<Item = Point> + use<> {
        let width = self.width;
        let height = self.height;

        (-1..=1).flat_map(move |dy| {
            (-1..=1).filter_map(move |dx| {
                if dx == 0 && dy == 0 {
                    return None;
                }

                let nx = point.x as isize + dx;
                let ny = point.y as isize + dy;

                if nx >= 0 && nx < width as isize && ny >= 0 && ny < height as isize {
                    Some(Point {
                        x: nx as usize,
                        y: ny as usize,
                    })
                } else {
                    None
                }
            })
        })
    }

    pub fn neighbor_counts(&self, point: Point) -> NeighborCounts {
        let mut counts = NeighborCounts::default();
        for neighbor in self.neighbors(point) {
            match self.get(neighbor) {
                Cell::Trap => counts.traps += 1,
                Cell::Gem => counts.gems += 1,
                Cell::Unknown => counts.unknowns += 1,
                Cell::Clue(_) => {}
            }
        }
        counts
    }

    /// Deserializes a grid from its bcs encoding.
    pub fn from_bytes(bts: &[u8]) -> anyhow::Result<Self> {
        let grid: Grid = bcs::from_bytes(bts)?;
        // Re-run the shape checks: the bytes may come from an untrusted caller.
        Ok(Grid::new(grid.cells)?)
    }

    /// Serializes the grid to bytes.
    pub fn to_bytes(&self) -> anyhow::Result<Vec<u8>> {
        Ok(bcs::to_bytes(self)?)
    }
}

impl FromStr for Grid {
    type Err = GridError;

    /// Parses the comma-separated text format, one row per line.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let cells = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(row, line)| {
                line.split(',')
                    .enumerate()
                    .map(|(col, token)| {
                        let token = token.trim();
                        token.parse().map_err(|BadCell(token)| GridError::BadToken {
                            row,
                            col,
                            token,
                        })
                    })
                    .collect::<Result<Vec<Cell>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Grid::new(cells)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line = row.iter().map(Cell::to_string).collect::<Vec<_>>().join(",");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
