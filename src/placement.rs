//! Random scattering of single-cell ships that never touch, not even diagonally.

use alloc::vec::Vec;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::Board;
use crate::common::BoardError;

/// Fresh sampled layouts tried before switching to a lattice layout.
const MAX_RESTARTS: usize = 32;

/// Largest ship count accepted for a board of side `size`: `ceil(size / 2)^2`.
pub fn max_ships(size: usize) -> usize {
    let half = size.div_ceil(2);
    half * half
}

/// Returns `true` if neither (x, y) nor any of its neighbours holds a ship.
pub fn is_valid_position(board: &Board, x: usize, y: usize) -> bool {
    if x >= board.size() || y >= board.size() {
        return false;
    }
    for ny in y.saturating_sub(1)..=y + 1 {
        for nx in x.saturating_sub(1)..=x + 1 {
            if board.is_ship(nx, ny) {
                return false;
            }
        }
    }
    true
}

fn has_free_cell(board: &Board) -> bool {
    (0..board.size()).any(|y| (0..board.size()).any(|x| is_valid_position(board, x, y)))
}

/// Scatter `count` ships over an empty `board`.
///
/// Each candidate cell is drawn uniformly and kept only when its 8-neighbourhood
/// is clear. When no admissible cell is left before `count` is reached the board
/// is cleared and sampling starts over. Dense layouts that keep dead-ending are
/// finished with [`place_on_lattice`], so every count up to [`max_ships`] succeeds.
pub fn place_ships<R: Rng>(
    board: &mut Board,
    count: usize,
    rng: &mut R,
) -> Result<(), BoardError> {
    let size = board.size();
    if count > max_ships(size) {
        return Err(BoardError::TooManyShips { ships: count, size });
    }
    if count == 0 {
        return Ok(());
    }

    for _ in 0..MAX_RESTARTS {
        board.clear();
        let mut placed = 0;
        let mut misses = 0;
        while placed < count {
            let x = rng.random_range(0..size);
            let y = rng.random_range(0..size);
            if is_valid_position(board, x, y) {
                board.place(x, y)?;
                placed += 1;
                misses = 0;
                continue;
            }
            misses += 1;
            if misses >= size * size {
                if !has_free_cell(board) {
                    break;
                }
                misses = 0;
            }
        }
        if placed == count {
            return Ok(());
        }
    }
    #[cfg(feature = "std")]
    log::debug!(
        "sampling kept dead-ending for {} ships on size {}, using lattice",
        count,
        size
    );
    place_on_lattice(board, count, rng)
}

/// Place `count` ships on a random subset of a lattice with spacing 2.
///
/// Each 2x2 block of the board holds at most one lattice point, giving
/// `max_ships(size)` points in total. Each axis is anchored at a random edge.
pub fn place_on_lattice<R: Rng>(
    board: &mut Board,
    count: usize,
    rng: &mut R,
) -> Result<(), BoardError> {
    let size = board.size();
    if count > max_ships(size) {
        return Err(BoardError::TooManyShips { ships: count, size });
    }
    let cols = lattice_axis(size, rng.random_bool(0.5));
    let rows = lattice_axis(size, rng.random_bool(0.5));
    let mut points: Vec<(usize, usize)> = rows
        .iter()
        .flat_map(|&y| cols.iter().map(move |&x| (x, y)))
        .collect();
    points.shuffle(rng);

    board.clear();
    for &(x, y) in points.iter().take(count) {
        board.place(x, y)?;
    }
    Ok(())
}

/// Every second index along one axis, counted from the near or the far edge.
fn lattice_axis(size: usize, from_far_edge: bool) -> Vec<usize> {
    (0..size.div_ceil(2))
        .map(|i| if from_far_edge { size - 1 - 2 * i } else { 2 * i })
        .collect()
}
