use rand::RngExt;
use rand::seq::SliceRandom;

use crate::board::{Grid, empty_grid};
use crate::difficulty::Difficulty;
use crate::validation::is_valid_placement;

/// Fill every empty cell of `grid` in place using randomized backtracking.
/// Returns true if a complete valid grid was reached.
///
/// Cells are visited in row-major order. At each empty cell the candidates
/// 1-9 are tried in a freshly shuffled order; on downstream failure the
/// placement is undone (reset to 0) and the next candidate is tried.
/// Pre-filled cells are left untouched, so a partially seeded grid is
/// completed around its givens.
pub fn fill_grid<R: RngExt>(grid: &mut Grid, rng: &mut R) -> bool {
    for row in 0..9 {
        for col in 0..9 {
            if grid[row][col] == 0 {
                let mut vals: Vec<u8> = (1..=9).collect();
                vals.shuffle(rng);
                for val in vals {
                    if is_valid_placement(grid, row, col, val) {
                        grid[row][col] = val;
                        if fill_grid(grid, rng) {
                            return true;
                        }
                        grid[row][col] = 0;
                    }
                }
                return false;
            }
        }
    }
    true
}

/// Generate a complete valid solution grid.
///
/// Starting from an empty grid the fill always succeeds; the shuffled
/// candidate order is what makes successive generations diverge.
pub fn generate_complete_board<R: RngExt>(rng: &mut R) -> Grid {
    let mut grid = empty_grid();
    let filled = fill_grid(&mut grid, rng);
    debug_assert!(filled, "backtracking fill cannot fail from an empty grid");
    grid
}

/// Derive a puzzle from a complete solution by blanking cells.
///
/// All 81 positions are shuffled uniformly and the first
/// `difficulty.cells_to_remove()` of them are zeroed. The result is not
/// checked for solution uniqueness; a puzzle with multiple solutions is an
/// accepted property of this generator.
pub fn derive_puzzle<R: RngExt>(solution: &Grid, difficulty: Difficulty, rng: &mut R) -> Grid {
    let cells_to_remove = difficulty.cells_to_remove();

    let mut positions: Vec<(usize, usize)> = Vec::with_capacity(81);
    for r in 0..9 {
        for c in 0..9 {
            positions.push((r, c));
        }
    }
    positions.shuffle(rng);

    let mut puzzle = *solution;
    for &(r, c) in positions.iter().take(cells_to_remove) {
        puzzle[r][c] = 0;
    }

    log::debug!(
        "derived {} puzzle: removed {} cells",
        difficulty.label(),
        cells_to_remove
    );
    puzzle
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::filled_count;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Each row, column and 3x3 box contains 1..=9 exactly once.
    fn assert_valid_solution(grid: &Grid) {
        for r in 0..9 {
            let mut row: Vec<u8> = grid[r].to_vec();
            row.sort();
            assert_eq!(row, (1..=9).collect::<Vec<u8>>(), "row {r}");
        }
        for c in 0..9 {
            let mut col: Vec<u8> = (0..9).map(|r| grid[r][c]).collect();
            col.sort();
            assert_eq!(col, (1..=9).collect::<Vec<u8>>(), "col {c}");
        }
        for box_r in (0..9).step_by(3) {
            for box_c in (0..9).step_by(3) {
                let mut vals: Vec<u8> = (box_r..box_r + 3)
                    .flat_map(|r| (box_c..box_c + 3).map(move |c| grid[r][c]))
                    .collect();
                vals.sort();
                assert_eq!(vals, (1..=9).collect::<Vec<u8>>(), "box ({box_r},{box_c})");
            }
        }
    }

    #[test]
    fn generates_complete_valid_grid() {
        let mut rng = StdRng::seed_from_u64(42);
        let grid = generate_complete_board(&mut rng);
        assert_eq!(filled_count(&grid), 81);
        assert_valid_solution(&grid);
    }

    #[test]
    fn generation_is_deterministic_per_seed() {
        let a = generate_complete_board(&mut StdRng::seed_from_u64(7));
        let b = generate_complete_board(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn seeded_rows_survive_the_fill() {
        let mut grid = empty_grid();
        grid[0] = [5, 3, 0, 0, 7, 0, 0, 0, 0];

        let mut rng = StdRng::seed_from_u64(1);
        assert!(fill_grid(&mut grid, &mut rng));
        assert_valid_solution(&grid);
        assert_eq!(grid[0][0], 5);
        assert_eq!(grid[0][1], 3);
        assert_eq!(grid[0][4], 7);
    }

    #[test]
    fn removal_count_per_difficulty() {
        let mut rng = StdRng::seed_from_u64(99);
        let solution = generate_complete_board(&mut rng);

        for &d in Difficulty::all() {
            let puzzle = derive_puzzle(&solution, d, &mut rng);
            assert_eq!(filled_count(&puzzle), 81 - d.cells_to_remove());
        }
    }

    #[test]
    fn remaining_cells_match_solution() {
        let mut rng = StdRng::seed_from_u64(123);
        let solution = generate_complete_board(&mut rng);
        let puzzle = derive_puzzle(&solution, Difficulty::Hard, &mut rng);

        for r in 0..9 {
            for c in 0..9 {
                if puzzle[r][c] != 0 {
                    assert_eq!(puzzle[r][c], solution[r][c]);
                }
            }
        }
    }
}
