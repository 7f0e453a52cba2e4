//! One B3/S23 generation over the flat cell grid

use super::cells::CellState;
use super::dimensions::GridDimensions;
use clap::ValueEnum;
use serde::Deserialize;

/// How neighbor lookups behave at the grid border
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EdgePolicy {
    /// Out-of-range flat indices read as dead. Top and bottom are padded but
    /// horizontal neighbors leak across row seams.
    Flat,
    /// Everything past any of the four borders reads as dead
    #[default]
    Bounded,
    /// Both axes wrap around
    Toroidal,
}

/// Result of one generation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generation {
    /// Ascending indices that flipped
    pub dirty: Vec<usize>,
    pub alive: usize,
    pub dead: usize,
}

/// Advance `state` by one generation in place.
///
/// Every rule evaluation reads the pre-generation state: flips are collected
/// in a full pass and only applied afterwards.
pub fn advance(state: &mut CellState, dims: &GridDimensions, edge: EdgePolicy) -> Generation {
    let mut dirty = Vec::new();
    advance_into(state, dims, edge, &mut dirty)
        .map(|(alive, dead)| Generation { dirty, alive, dead })
        .unwrap_or_default()
}

/// Like [`advance`] but reuses the caller's dirty buffer. Returns the
/// alive/dead counts, or `None` when the state does not match `dims`.
pub fn advance_into(
    state: &mut CellState,
    dims: &GridDimensions,
    edge: EdgePolicy,
    dirty: &mut Vec<usize>,
) -> Option<(usize, usize)> {
    dirty.clear();
    let count = dims.cell_count;
    if count == 0 || state.len() != count {
        return None;
    }

    let mut alive = 0;
    for i in 0..count {
        let was_alive = state.get(i);
        let neighbors = neighbor_sum(state, dims, edge, i);
        let next_alive = matches!((was_alive, neighbors), (true, 2) | (true, 3) | (false, 3));
        if next_alive != was_alive {
            dirty.push(i);
        }
        if next_alive {
            alive += 1;
        }
    }

    for &i in dirty.iter() {
        state.toggle(i);
    }

    Some((alive, count - alive))
}

/// Alive neighbors of cell `i` under the given edge policy
#[inline]
pub fn neighbor_sum(state: &CellState, dims: &GridDimensions, edge: EdgePolicy, i: usize) -> u8 {
    match edge {
        EdgePolicy::Flat => flat_sum(state, dims, i),
        EdgePolicy::Bounded => grid_sum(state, dims, i, false),
        EdgePolicy::Toroidal => grid_sum(state, dims, i, true),
    }
}

fn flat_sum(state: &CellState, dims: &GridDimensions, i: usize) -> u8 {
    let row = dims.row_size() as isize;
    let i = i as isize;
    let offsets = [-row - 1, -row, -row + 1, -1, 1, row - 1, row, row + 1];
    offsets
        .iter()
        .map(|&off| i + off)
        .filter(|&n| n >= 0 && state.get(n as usize))
        .count() as u8
}

/// With `wrap`, axes narrower than 3 alias: a 2-wide axis counts the same
/// neighbor twice and a 1-wide axis counts the cell itself.
fn grid_sum(state: &CellState, dims: &GridDimensions, i: usize, wrap: bool) -> u8 {
    let rows = dims.rows as isize;
    let cols = dims.cols as isize;
    let r = (i / dims.cols) as isize;
    let c = (i % dims.cols) as isize;
    let mut count = 0u8;
    for dr in -1..=1 {
        for dc in -1..=1 {
            if dr == 0 && dc == 0 {
                continue;
            }
            let (mut nr, mut nc) = (r + dr, c + dc);
            if wrap {
                nr = nr.rem_euclid(rows);
                nc = nc.rem_euclid(cols);
            } else if nr < 0 || nr >= rows || nc < 0 || nc >= cols {
                continue;
            }
            if state.get((nr * cols + nc) as usize) {
                count += 1;
            }
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(rows: u16, cols: u16) -> GridDimensions {
        // rows = h + 1, cols = w + 1 at cell size 1
        GridDimensions::new(cols - 1, rows - 1, 1, 0)
    }

    fn grid_with(dims: &GridDimensions, alive: &[(usize, usize)]) -> CellState {
        let mut state = CellState::dead(dims.cell_count);
        for &(r, c) in alive {
            state.set(r * dims.cols + c, true);
        }
        state
    }

    #[test]
    fn blinker_oscillates() {
        let d = dims(5, 5);
        let mut state = grid_with(&d, &[(2, 1), (2, 2), (2, 3)]);
        let generation = advance(&mut state, &d, EdgePolicy::Bounded);
        assert_eq!(generation.dirty, vec![7, 11, 13, 17]);
        assert_eq!(generation.alive, 3);
        assert_eq!(generation.alive + generation.dead, d.cell_count);
    }

    #[test]
    fn flat_policy_leaks_across_row_seam() {
        let d = dims(4, 4);
        // Vertical bar on the right edge of row 0..=2 sits beside col 0 of the next row
        let mut flat = grid_with(&d, &[(0, 3), (1, 3), (2, 3)]);
        let mut bounded = flat.clone();
        assert_eq!(neighbor_sum(&flat, &d, EdgePolicy::Flat, 4), 2);
        assert_eq!(neighbor_sum(&bounded, &d, EdgePolicy::Bounded, 4), 0);
        advance(&mut flat, &d, EdgePolicy::Flat);
        advance(&mut bounded, &d, EdgePolicy::Bounded);
        assert_ne!(flat, bounded);
    }

    #[test]
    fn toroidal_policy_wraps_both_axes() {
        let d = dims(4, 4);
        let state = grid_with(&d, &[(3, 3)]);
        assert_eq!(neighbor_sum(&state, &d, EdgePolicy::Toroidal, 0), 1);
        assert_eq!(neighbor_sum(&state, &d, EdgePolicy::Bounded, 0), 0);
        assert_eq!(neighbor_sum(&state, &d, EdgePolicy::Flat, 0), 0);
    }

    #[test]
    fn narrow_torus_aliases_neighbors() {
        // cell size 2 over a 1 x 4 viewport: 3 rows, 1 column
        let d = GridDimensions::new(1, 4, 2, 0);
        assert_eq!((d.rows, d.cols), (3, 1));
        let state = grid_with(&d, &[(1, 0)]);
        assert_eq!(neighbor_sum(&state, &d, EdgePolicy::Toroidal, 1), 2);
        assert_eq!(neighbor_sum(&state, &d, EdgePolicy::Toroidal, 0), 3);
        assert_eq!(neighbor_sum(&state, &d, EdgePolicy::Bounded, 1), 0);
    }

    #[test]
    fn mismatched_state_is_a_no_op() {
        let d = dims(4, 4);
        let mut state = CellState::dead(3);
        assert_eq!(advance(&mut state, &d, EdgePolicy::Bounded), Generation::default());
    }
}
