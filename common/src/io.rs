//! Reading and writing grids in the comma-separated text format.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::grid::Grid;
use crate::search::StrategyKind;

pub fn read_grid(path: &Path) -> anyhow::Result<Grid> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file {}", path.display()))?;
    text.parse()
        .with_context(|| format!("Failed to parse grid in {}", path.display()))
}

pub fn write_grid(path: &Path, grid: &Grid) -> anyhow::Result<()> {
    fs::write(path, grid.to_string())
        .with_context(|| format!("Failed to write file {}", path.display()))
}

/// Where a strategy's result goes. The SAT result keeps `path` as is, the
/// others get their name appended to the file stem: `out.txt` becomes
/// `out_backtrack.txt`.
pub fn output_path(path: &Path, strategy: StrategyKind) -> PathBuf {
    if strategy == StrategyKind::Sat {
        return path.to_path_buf();
    }
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let suffix = strategy_suffix(strategy);
    let file_name = match path.extension() {
        Some(ext) => format!("{stem}_{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{suffix}"),
    };
    path.with_file_name(file_name)
}

fn strategy_suffix(strategy: StrategyKind) -> &'static str {
    match strategy {
        StrategyKind::Sat => "sat",
        StrategyKind::Enumerate => "enumerate",
        StrategyKind::Backtrack => "backtrack",
        StrategyKind::ClauseSearch => "clause_search",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path() {
        let path = Path::new("testcases/output_1.txt");
        assert_eq!(output_path(path, StrategyKind::Sat), path);
        assert_eq!(
            output_path(path, StrategyKind::Backtrack),
            Path::new("testcases/output_1_backtrack.txt")
        );
        assert_eq!(
            output_path(Path::new("out"), StrategyKind::ClauseSearch),
            Path::new("out_clause_search")
        );
    }

    #[test]
    fn test_write_then_read() {
        let dir = std::env::temp_dir().join(format!("trapgrid-io-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("grid.txt");

        let grid: Grid = "2,_,T\nG,_,1".parse().unwrap();
        write_grid(&path, &grid).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "2,_,T\nG,_,1\n");
        assert_eq!(read_grid(&path).unwrap(), grid);

        fs::write(&path, "2,_\n_").unwrap();
        let err = read_grid(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Row 1 has 1 cells, expected 2"));

        fs::remove_dir_all(&dir).unwrap();
        assert!(read_grid(&path).is_err());
    }
}
