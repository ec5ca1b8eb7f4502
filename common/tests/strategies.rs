use rand::SeedableRng;
use rand::rngs::StdRng;
use trapgrid::check;
use trapgrid::samples::{self, RandomOptions};
use trapgrid::search::{
    Backtracking, ClauseSearch, ClueAdjacency, Enumeration, Pruning, RowMajor, SatStrategy,
    ValueOrder, Varisat,
};
use trapgrid::{Cell, Grid, Outcome, SolveError, SolveOptions, Strategy, solve};

fn backtrackers() -> Vec<Box<dyn Strategy>> {
    let mut strategies: Vec<Box<dyn Strategy>> = vec![];
    for pruning in [Pruning::Global, Pruning::Local] {
        for values in [ValueOrder::GemFirst, ValueOrder::TrapFirst] {
            strategies.push(Box::new(
                Backtracking::new(RowMajor)
                    .with_pruning(pruning)
                    .with_values(values),
            ));
            strategies.push(Box::new(
                Backtracking::new(ClueAdjacency::default())
                    .with_pruning(pruning)
                    .with_values(values),
            ));
        }
    }
    strategies
}

fn sat(grid: &Grid, options: &SolveOptions) -> Outcome {
    solve(grid, &mut SatStrategy::new(Varisat), options).unwrap()
}

fn assert_sound(grid: &Grid, outcome: &Outcome) {
    if let Outcome::Solved(solved) = outcome {
        assert!(solved.is_resolved());
        assert!(check::is_valid(solved));
        // Only unknown cells may change.
        for p in grid.points() {
            if grid.get(p) != Cell::Unknown {
                assert_eq!(solved.get(p), grid.get(p));
            }
        }
    }
}

#[test]
fn small_sample_has_a_single_answer() {
    let grid = &samples::canned()[0];
    let expected: Grid = "2,T,T,1,G\n\
                          T,5,4,2,G\n\
                          3,T,T,2,1\n\
                          3,T,6,T,1\n\
                          2,T,T,2,1"
        .parse()
        .unwrap();

    for propagate in [true, false] {
        let options = SolveOptions { propagate };
        let mut strategies = backtrackers();
        strategies.push(Box::new(SatStrategy::new(Varisat)));
        strategies.push(Box::new(Enumeration::default()));
        strategies.push(Box::new(ClauseSearch::default()));

        for mut strategy in strategies {
            let outcome = solve(grid, strategy.as_mut(), &options).unwrap();
            assert_eq!(outcome, Outcome::Solved(expected.clone()), "{}", strategy.name());
        }
    }
}

#[test]
fn sparse_samples_are_solved_by_sat_and_backtracking() {
    let options = SolveOptions::default();
    for grid in &samples::canned()[1..] {
        let outcome = sat(grid, &options);
        assert!(outcome.is_solved());
        assert_sound(grid, &outcome);

        let mut row_major = Backtracking::new(RowMajor);
        let outcome = solve(grid, &mut row_major, &options).unwrap();
        assert!(outcome.is_solved());
        assert_sound(grid, &outcome);

        let mut clause_search = ClauseSearch::default();
        let outcome = solve(grid, &mut clause_search, &options).unwrap();
        assert!(outcome.is_solved());
        assert_sound(grid, &outcome);
    }
}

#[test]
fn enumeration_refuses_sparse_samples() {
    let grid = &samples::canned()[1];
    let err = solve(grid, &mut Enumeration::default(), &SolveOptions::default()).unwrap_err();
    assert!(matches!(err, SolveError::TooManyVariables { limit: 24, .. }));
}

#[test]
fn random_puzzles_are_solved_soundly_by_every_strategy() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..40 {
        let generated = samples::random(4, 5, RandomOptions::default(), &mut rng);
        let grid = &generated.puzzle;

        for propagate in [true, false] {
            let options = SolveOptions { propagate };
            let mut strategies = backtrackers();
            strategies.push(Box::new(SatStrategy::new(Varisat)));
            strategies.push(Box::new(Enumeration::default()));
            strategies.push(Box::new(ClauseSearch::default()));

            for mut strategy in strategies {
                let outcome = solve(grid, strategy.as_mut(), &options).unwrap();
                assert!(outcome.is_solved(), "{} failed on\n{grid}", strategy.name());
                assert_sound(grid, &outcome);
            }
        }
    }
}

/// Flips one clue of a satisfiable puzzle and checks that every complete
/// strategy agrees with the SAT oracle about the result.
#[test]
fn strategies_agree_with_sat_on_perturbed_puzzles() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut unsat_seen = 0;

    for round in 0..60 {
        let generated = samples::random(4, 4, RandomOptions::default(), &mut rng);
        let Some((point, k)) = generated.puzzle.clues().nth(round % 3) else {
            continue;
        };
        let mut cells = generated.puzzle.cells().to_vec();
        cells[point.y][point.x] = Cell::Clue((k + 1 + round as u8 % 2) % 4);
        let grid = Grid::new(cells).unwrap();
        if !check::check_grid_validity(&grid) {
            continue;
        }

        for propagate in [true, false] {
            let options = SolveOptions { propagate };
            let oracle = sat(&grid, &options);
            assert_sound(&grid, &oracle);
            if !oracle.is_solved() {
                unsat_seen += 1;
            }

            let mut strategies = backtrackers();
            strategies.push(Box::new(Enumeration::default()));
            strategies.push(Box::new(ClauseSearch::default()));
            for mut strategy in strategies {
                let outcome = solve(&grid, strategy.as_mut(), &options).unwrap();
                assert_eq!(
                    outcome.is_solved(),
                    oracle.is_solved(),
                    "{} disagrees with sat on\n{grid}",
                    strategy.name()
                );
                assert_sound(&grid, &outcome);
            }
        }
    }

    assert!(unsat_seen > 0);
}

#[test]
fn conflicting_neighbours_have_no_solution() {
    // (1,1) must be a trap for the 1 and a gem for the 0.
    let grid: Grid = "G,G,G,G\n1,_,0,G\nG,G,G,G".parse().unwrap();
    for propagate in [true, false] {
        let options = SolveOptions { propagate };
        assert_eq!(sat(&grid, &options), Outcome::NoSolution);
        for mut strategy in backtrackers() {
            assert_eq!(
                solve(&grid, strategy.as_mut(), &options).unwrap(),
                Outcome::NoSolution
            );
        }
    }
}

#[test]
fn clue_above_neighbour_count_is_rejected() {
    let grid: Grid = "_,_,_\n_,_,_\n_,_,6".parse().unwrap();
    for mut strategy in backtrackers() {
        let err = solve(&grid, strategy.as_mut(), &SolveOptions::default()).unwrap_err();
        assert!(matches!(err, SolveError::InvalidGrid(v) if v.clue == 6 && v.unknowns == 3));
    }
    assert!(matches!(
        solve(&grid, &mut SatStrategy::new(Varisat), &SolveOptions::default()),
        Err(SolveError::InvalidGrid(_))
    ));
}
