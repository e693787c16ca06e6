//! Match detection
//!
//! Columns are scanned top to bottom for runs of same-kind tiles. Rows reuse
//! the column scan on the transposed board. A cell is cleared when either scan
//! marks it; clearing is idempotent, so horizontal and vertical runs that
//! cross need no tie-break.

use crate::board::Board;
use crate::error::EngineError;
use crate::grid::Grid;
use crate::transform::transpose;

/// Result of one match-detection pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Board with every matched tile removed
    pub board: Board,
    /// Number of cells that were emptied
    pub cleared: usize,
}

impl MatchOutcome {
    pub fn is_board_unchanged(&self) -> bool {
        self.cleared == 0
    }
}

/// Remove every run of at least `num_to_match` same-kind tiles
///
/// The board must be fully populated; an empty slot means the falling cycle
/// was skipped and is reported as an invariant violation.
pub fn remove_matches(board: &Board, num_to_match: usize) -> Result<MatchOutcome, EngineError> {
    if let Some((coord, _)) = board.iter().find(|(_, cell)| cell.is_none()) {
        return Err(EngineError::UnexpectedEmptyCell {
            x: coord.x,
            y: coord.y,
        });
    }

    let vertical = mark_runs_in_columns(board, num_to_match);
    let horizontal = transpose(&mark_runs_in_columns(&transpose(board), num_to_match));

    let mut cleared = 0;
    let mut index = 0;
    let after = board.map(|cell| {
        let hit = vertical.cells()[index] || horizontal.cells()[index];
        index += 1;
        if hit {
            cleared += 1;
            None
        } else {
            *cell
        }
    });

    Ok(MatchOutcome {
        board: after,
        cleared,
    })
}

/// Mask of cells that belong to a vertical run of at least `num_to_match`
fn mark_runs_in_columns(board: &Board, num_to_match: usize) -> Grid<bool> {
    let n = board.size();
    let mut mask = Grid::filled(n, false);

    for x in 0..n {
        let kinds: Vec<_> = board.column(x).map(|cell| cell.map(|t| t.kind())).collect();

        let mut run_start = 0;
        for y in 1..=n {
            let run_continues = y < n && kinds[y] == kinds[run_start];
            if run_continues {
                continue;
            }
            if y - run_start >= num_to_match {
                for run_y in run_start..y {
                    mask.set(x, run_y, true);
                }
            }
            run_start = y;
        }
    }

    mask
}
