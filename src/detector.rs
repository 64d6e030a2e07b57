//! Mutant signature detection over square DNA matrices.
//!
//! A matrix is mutant when more than one run of four identical bases occurs
//! across the four scan directions (horizontal, vertical, and both
//! diagonals). Runs are counted by starting position, so overlapping runs
//! count separately: five identical bases in a row contribute two.
//!
//! Validation failures classify as human rather than erroring. The inherited
//! contract makes "malformed" and "not a mutant" indistinguishable to
//! callers; preserve that exactly.

use tracing::{debug, info, warn};

/// Length of a qualifying base run.
pub const SEQUENCE_LENGTH: usize = 4;

/// Classify a DNA matrix. Returns `true` when more than one run of four
/// identical bases exists in any direction.
///
/// Malformed input (empty, smaller than 4x4, non-square, or containing
/// bases outside `{A, T, C, G}`) returns `false`. Rows are expected in
/// uppercase; callers normalize case before reaching the detector.
pub fn is_mutant(dna: &[String]) -> bool {
    let grid = match validate(dna) {
        Some(grid) => grid,
        None => return false,
    };
    let n = grid.len();
    debug!("analyzing DNA matrix of size {}x{}", n, n);

    let mut sequences = 0usize;
    for row in 0..n {
        for col in 0..n {
            let base = grid[row][col];

            // Horizontal (right)
            if col + SEQUENCE_LENGTH <= n && run_right(&grid, row, col, base) {
                sequences += 1;
                debug!("horizontal run at ({}, {}): {}", row, col, base as char);
                if sequences > 1 {
                    info!("mutant detected after {} runs, stopping scan", sequences);
                    return true;
                }
            }

            // Vertical (down)
            if row + SEQUENCE_LENGTH <= n && run_down(&grid, row, col, base) {
                sequences += 1;
                debug!("vertical run at ({}, {}): {}", row, col, base as char);
                if sequences > 1 {
                    info!("mutant detected after {} runs, stopping scan", sequences);
                    return true;
                }
            }

            // Descending diagonal (down-right)
            if row + SEQUENCE_LENGTH <= n
                && col + SEQUENCE_LENGTH <= n
                && run_down_right(&grid, row, col, base)
            {
                sequences += 1;
                debug!("descending diagonal run at ({}, {}): {}", row, col, base as char);
                if sequences > 1 {
                    info!("mutant detected after {} runs, stopping scan", sequences);
                    return true;
                }
            }

            // Ascending diagonal (up-right)
            if row >= SEQUENCE_LENGTH - 1
                && col + SEQUENCE_LENGTH <= n
                && run_up_right(&grid, row, col, base)
            {
                sequences += 1;
                debug!("ascending diagonal run at ({}, {}): {}", row, col, base as char);
                if sequences > 1 {
                    info!("mutant detected after {} runs, stopping scan", sequences);
                    return true;
                }
            }
        }
    }

    info!("scan complete: human ({} run(s) found)", sequences);
    false
}

/// Check shape and alphabet, returning the matrix as borrowed byte rows.
/// First failure wins; every rejection is a human verdict upstream.
fn validate(dna: &[String]) -> Option<Vec<&[u8]>> {
    if dna.is_empty() {
        warn!("DNA rejected: empty matrix");
        return None;
    }

    let n = dna.len();
    if n < SEQUENCE_LENGTH {
        warn!("DNA rejected: {} rows is below the minimum of {}", n, SEQUENCE_LENGTH);
        return None;
    }

    let mut grid = Vec::with_capacity(n);
    for (i, row) in dna.iter().enumerate() {
        let bytes = row.as_bytes();
        if bytes.len() != n {
            warn!(
                "DNA rejected: row {} has length {} (expected {})",
                i,
                bytes.len(),
                n
            );
            return None;
        }
        if let Some(&bad) = bytes
            .iter()
            .find(|&&b| !matches!(b, b'A' | b'T' | b'C' | b'G'))
        {
            warn!("DNA rejected: invalid base '{}' in row {}", bad as char, i);
            return None;
        }
        grid.push(bytes);
    }
    Some(grid)
}

// Direct comparisons, no inner loop: the run length is fixed at 4 and the
// caller has already checked bounds.

fn run_right(grid: &[&[u8]], row: usize, col: usize, base: u8) -> bool {
    grid[row][col + 1] == base && grid[row][col + 2] == base && grid[row][col + 3] == base
}

fn run_down(grid: &[&[u8]], row: usize, col: usize, base: u8) -> bool {
    grid[row + 1][col] == base && grid[row + 2][col] == base && grid[row + 3][col] == base
}

fn run_down_right(grid: &[&[u8]], row: usize, col: usize, base: u8) -> bool {
    grid[row + 1][col + 1] == base
        && grid[row + 2][col + 2] == base
        && grid[row + 3][col + 3] == base
}

fn run_up_right(grid: &[&[u8]], row: usize, col: usize, base: u8) -> bool {
    grid[row - 1][col + 1] == base
        && grid[row - 2][col + 2] == base
        && grid[row - 3][col + 3] == base
}
