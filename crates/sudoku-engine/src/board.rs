/// A 9x9 grid of digits. 0 means empty, 1-9 are placed values.
///
/// One game holds three of these with distinct lifecycles: the solution
/// (immutable once generated), the initial grid (the puzzle as presented,
/// immutable; a non-zero entry marks a given cell), and the working grid
/// (the player's live state).
pub type Grid = [[u8; 9]; 9];

pub fn empty_grid() -> Grid {
    [[0u8; 9]; 9]
}

/// True when no cell is empty.
pub fn is_full(grid: &Grid) -> bool {
    grid.iter().all(|row| row.iter().all(|&v| v != 0))
}

/// Number of non-empty cells.
pub fn filled_count(grid: &Grid) -> usize {
    grid.iter()
        .map(|row| row.iter().filter(|&&v| v != 0).count())
        .sum()
}
