use log::debug;

use crate::grid::{Cell, Grid, Point};

/// Forces every cell that a single clue fully determines, repeating sweeps
/// until one changes nothing. Returns the number of cells forced.
///
/// - If the traps still missing around a clue equal its unknown neighbours,
///   they are all traps.
/// - If a clue already sees its value in traps, its unknown neighbours are gems.
///
/// Never guesses and never fails. A contradiction it runs into is left for the
/// consistency checker to find.
pub fn propagate(grid: &mut Grid) -> usize {
    let mut forced = 0;
    let mut sweeps = 0;

    loop {
        sweeps += 1;
        let mut changed = 0;

        for point in grid.points() {
            let Some(k) = grid.get(point).clue_value() else {
                continue;
            };
            let k = k as usize;
            let unknowns: Vec<Point> = grid
                .neighbors(point)
                .filter(|&n| grid.get(n) == Cell::Unknown)
                .collect();
            if unknowns.is_empty() {
                continue;
            }
            let traps = grid.neighbor_counts(point).traps;

            let value = if traps == k {
                Cell::Gem
            } else if k.checked_sub(traps) == Some(unknowns.len()) {
                Cell::Trap
            } else {
                continue;
            };
            for cell in unknowns {
                grid.set(cell, value);
                changed += 1;
            }
        }

        forced += changed;
        if changed == 0 {
            break;
        }
    }

    debug!("propagation forced {forced} cells in {sweeps} sweeps");
    forced
}
