use rand::RngExt;
use rand::rng;
use serde::{Deserialize, Serialize};

use crate::board::{Grid, empty_grid, is_full};
use crate::difficulty::Difficulty;
use crate::puzzle::{derive_puzzle, generate_complete_board};
use crate::validation::is_valid_placement;

/// Whole-game lifecycle. `Solved` is reached only when the working grid has
/// no empty cells and equals the solution cell-for-cell; any other state of
/// a started game is `InProgress`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    NotStarted,
    InProgress,
    Solved,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// No working-grid cell is empty.
    pub complete: bool,
    /// The working grid equals the solution. Only meaningful when `complete`.
    pub correct: bool,
}

/// One game of Sudoku: the three grids plus lifecycle state.
///
/// The session is the only owner of its grids; fixed cells (non-zero in the
/// initial grid) are never writable through any operation. Contract
/// violations such as writing a fixed cell or an out-of-range value are
/// silently ignored rather than panicking, so the grid invariants hold for
/// any call sequence.
pub struct GameSession {
    solution: Grid,
    initial: Grid,
    working: Grid,
    difficulty: Difficulty,
    status: GameStatus,
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            solution: empty_grid(),
            initial: empty_grid(),
            working: empty_grid(),
            difficulty: Difficulty::default(),
            status: GameStatus::NotStarted,
        }
    }

    /// Start a fresh game: generate a solution, derive the puzzle from it,
    /// and reset the working grid to the puzzle.
    pub fn new_game(&mut self, difficulty: Difficulty) {
        self.new_game_with_rng(difficulty, &mut rng());
    }

    /// Seeded variant of [`new_game`](Self::new_game) for deterministic
    /// generation.
    pub fn new_game_with_rng<R: RngExt>(&mut self, difficulty: Difficulty, rng: &mut R) {
        self.solution = generate_complete_board(rng);
        self.initial = derive_puzzle(&self.solution, difficulty, rng);
        self.working = self.initial;
        self.difficulty = difficulty;
        self.status = GameStatus::InProgress;
        log::debug!(
            "new {} game, {} givens",
            difficulty.label(),
            81 - difficulty.cells_to_remove()
        );
    }

    /// Set a working-grid cell. A value of 0 clears the cell. Writes to
    /// fixed cells and values above 9 are ignored.
    pub fn set_cell(&mut self, row: usize, col: usize, value: u8) {
        if self.status == GameStatus::NotStarted {
            return;
        }
        if self.initial[row][col] != 0 || value > 9 {
            return;
        }
        self.working[row][col] = value;
        self.update_status();
    }

    /// Whether `num` can go at (row, col) on the current working grid. The
    /// probed cell must be empty; see
    /// [`validation::is_valid_placement`](crate::validation::is_valid_placement).
    pub fn is_valid_placement(&self, row: usize, col: usize, num: u8) -> bool {
        is_valid_placement(&self.working, row, col, num)
    }

    pub fn check_complete(&self) -> CheckResult {
        CheckResult {
            complete: is_full(&self.working),
            correct: self.working == self.solution,
        }
    }

    /// Pick a cell that still needs the player's attention, uniformly at
    /// random among non-fixed cells that are empty or hold a wrong value.
    /// Returns `None` when every such cell is already correct.
    pub fn hint_cell(&self) -> Option<(usize, usize)> {
        self.hint_cell_with_rng(&mut rng())
    }

    /// Seeded variant of [`hint_cell`](Self::hint_cell).
    pub fn hint_cell_with_rng<R: RngExt>(&self, rng: &mut R) -> Option<(usize, usize)> {
        if self.status == GameStatus::NotStarted {
            return None;
        }

        let mut candidates = Vec::new();
        for r in 0..9 {
            for c in 0..9 {
                // The solution never holds 0, so this also catches empty cells.
                if self.initial[r][c] == 0 && self.working[r][c] != self.solution[r][c] {
                    candidates.push((r, c));
                }
            }
        }
        if candidates.is_empty() {
            return None;
        }
        Some(candidates[rng.random_range(0..candidates.len())])
    }

    /// Reveal the solution's value at (row, col). Fixed cells are left
    /// alone.
    pub fn apply_hint(&mut self, row: usize, col: usize) {
        if self.status == GameStatus::NotStarted || self.initial[row][col] != 0 {
            return;
        }
        self.working[row][col] = self.solution[row][col];
        self.update_status();
    }

    /// Zero every non-fixed working-grid cell.
    pub fn clear_user_inputs(&mut self) {
        if self.status == GameStatus::NotStarted {
            return;
        }
        for r in 0..9 {
            for c in 0..9 {
                if self.initial[r][c] == 0 {
                    self.working[r][c] = 0;
                }
            }
        }
        self.update_status();
    }

    /// Copy the initial grid back over the working grid. The solution is
    /// kept, so the same puzzle restarts from scratch.
    pub fn reset_to_initial(&mut self) {
        if self.status == GameStatus::NotStarted {
            return;
        }
        self.working = self.initial;
        self.update_status();
    }

    fn update_status(&mut self) {
        if is_full(&self.working) && self.working == self.solution {
            if self.status != GameStatus::Solved {
                log::info!("puzzle solved");
            }
            self.status = GameStatus::Solved;
        } else {
            self.status = GameStatus::InProgress;
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn solution(&self) -> &Grid {
        &self.solution
    }

    pub fn initial_grid(&self) -> &Grid {
        &self.initial
    }

    pub fn working_grid(&self) -> &Grid {
        &self.working
    }

    pub fn working(&self, row: usize, col: usize) -> u8 {
        self.working[row][col]
    }

    /// Whether (row, col) is a given cell of the puzzle.
    pub fn is_given(&self, row: usize, col: usize) -> bool {
        self.initial[row][col] != 0
    }

    /// Whether (row, col) holds the solution's value. Empty cells are not
    /// correct.
    pub fn is_correct(&self, row: usize, col: usize) -> bool {
        self.working[row][col] != 0 && self.working[row][col] == self.solution[row][col]
    }
}
