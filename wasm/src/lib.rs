use trapgrid as tg;
use wasm_bindgen::prelude::*;

/// Parses the comma-separated text format into grid bytes.
#[wasm_bindgen]
pub fn parse_grid(text: &str) -> Result<Vec<u8>, String> {
    console_error_panic_hook::set_once();

    let grid: tg::Grid = text.parse().map_err(|e: tg::GridError| e.to_string())?;
    grid.to_bytes().map_err(|e| e.to_string())
}

/// Solves the grid with the strategy numbered by its position in
/// `sat, enumerate, backtrack, clause-search`. Returns the solved grid's bytes
/// followed by a status byte: 0 solved, 1 no solution.
#[wasm_bindgen]
pub fn solve(bts: Vec<u8>, strategy: u8) -> Result<Vec<u8>, String> {
    console_error_panic_hook::set_once();

    let grid = tg::Grid::from_bytes(&bts).map_err(|e| e.to_string())?;
    let kind = *tg::StrategyKind::ALL
        .get(strategy as usize)
        .ok_or("unknown_strategy")?;
    let mut strategy = kind.build(&tg::StrategyConfig::default());
    let outcome = tg::solve(&grid, strategy.as_mut(), &tg::SolveOptions::default())
        .map_err(|e| e.to_string())?;

    let (result, status) = match outcome {
        tg::Outcome::Solved(solved) => (solved, 0),
        tg::Outcome::NoSolution => (grid, 1),
    };
    let mut xs = result.to_bytes().map_err(|e| e.to_string())?;
    xs.push(status);
    Ok(xs)
}

/// Whether a fully resolved grid satisfies every clue.
#[wasm_bindgen]
pub fn validate(bts: Vec<u8>) -> bool {
    console_error_panic_hook::set_once();

    match tg::Grid::from_bytes(&bts) {
        Ok(grid) => grid.is_resolved() && tg::check::is_valid(&grid),
        Err(_) => false,
    }
}

/// Flattened cells, row-major: -1 unknown, -2 trap, -3 gem, clue values as is.
/// Clues span the whole `u8` range, hence the wider element type.
#[wasm_bindgen]
pub fn get_cells(bts: Vec<u8>) -> Result<Vec<i16>, String> {
    console_error_panic_hook::set_once();

    let grid = tg::Grid::from_bytes(&bts).map_err(|e| e.to_string())?;
    Ok(grid
        .cells()
        .iter()
        .flat_map(|row| {
            row.iter().map(|cell| match cell {
                tg::Cell::Unknown => -1,
                tg::Cell::Trap => -2,
                tg::Cell::Gem => -3,
                tg::Cell::Clue(n) => i16::from(*n),
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes(text: &str) -> Vec<u8> {
        parse_grid(text).unwrap()
    }

    #[test]
    fn test_solve_appends_status_byte() {
        // Backtracking tries gem first, so the solution is deterministic.
        let mut xs = solve(bytes("_,1,_"), 2).unwrap();
        assert_eq!(xs.pop(), Some(0));
        let solved = tg::Grid::from_bytes(&xs).unwrap();
        assert_eq!(solved.to_string(), "G,1,T\n");

        // The 1 needs (0,1) to be a trap, the 0 needs it to be a gem.
        let unsolvable = bytes("1,_,0\nG,G,G");
        for strategy in 0..4 {
            let mut xs = solve(unsolvable.clone(), strategy).unwrap();
            assert_eq!(xs.pop(), Some(1));
            assert_eq!(xs, unsolvable);
        }
    }

    #[test]
    fn test_solve_rejects_unknown_strategy() {
        assert_eq!(solve(bytes("_,1,_"), 4), Err("unknown_strategy".to_string()));
    }

    #[test]
    fn test_solve_reports_invalid_grid() {
        let err = solve(bytes("_,_\n_,4"), 0).unwrap_err();
        assert!(err.contains("Grid is invalid"), "{err}");
    }

    #[test]
    fn test_parse_grid_errors() {
        assert_eq!(
            parse_grid("_,_\n_"),
            Err("Row 1 has 1 cells, expected 2".to_string())
        );
    }

    #[test]
    fn test_validate() {
        assert!(validate(bytes("G,1,T")));
        assert!(!validate(bytes("T,1,T")));
        // Partially resolved grids are never valid.
        assert!(!validate(bytes("G,1,_")));
        assert!(!validate(vec![0xff]));
    }

    #[test]
    fn test_get_cells_keeps_large_clues_apart_from_markers() {
        let cells = get_cells(bytes("255,_\n254,G\nT,3")).unwrap();
        assert_eq!(cells, vec![255, -1, 254, -3, -2, 3]);
    }
}
