//! Dense alive/dead cell store and the randomizer that seeds it

use rand::Rng;

/// Upper bound of the randomness bias; higher bias means more dead cells
pub const MAX_BIAS: u8 = 100;

/// Flat row-major alive/dead grid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellState {
    cells: Vec<bool>,
}

impl CellState {
    /// An all-dead grid
    pub fn dead(cell_count: usize) -> Self {
        Self { cells: vec![false; cell_count] }
    }

    pub fn from_cells(cells: Vec<bool>) -> Self {
        Self { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Alive flag, dead for out-of-range indices
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        self.cells.get(index).copied().unwrap_or(false)
    }

    /// Set a cell. Returns true if its value changed.
    pub fn set(&mut self, index: usize, alive: bool) -> bool {
        match self.cells.get_mut(index) {
            Some(cell) if *cell != alive => {
                *cell = alive;
                true
            }
            _ => false,
        }
    }

    #[inline]
    pub fn toggle(&mut self, index: usize) {
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = !*cell;
        }
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.cells
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.cells.truncate(len);
    }

    pub(crate) fn extend(&mut self, fresh: impl IntoIterator<Item = bool>) {
        self.cells.extend(fresh);
    }
}

/// Probability of a fresh cell being alive for a bias in `0..=100`:
/// bias 0 gives 50%, bias 100 gives 0%
pub fn alive_probability(bias: u8) -> f64 {
    let bias = bias.min(MAX_BIAS) as f64;
    (50.0 - bias / 2.0) / 100.0
}

/// Draw `count` independent cells under the given bias
pub fn fresh_cells<R: Rng>(count: usize, bias: u8, rng: &mut R) -> impl Iterator<Item = bool> + '_ {
    let p = alive_probability(bias);
    (0..count).map(move |_| rng.gen_bool(p))
}

/// A newly randomized grid
pub fn randomize<R: Rng>(cell_count: usize, bias: u8, rng: &mut R) -> CellState {
    CellState { cells: fresh_cells(cell_count, bias, rng).collect() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn probability_follows_bias() {
        assert!((alive_probability(0) - 0.5).abs() < f64::EPSILON);
        assert!((alive_probability(50) - 0.25).abs() < f64::EPSILON);
        assert_eq!(alive_probability(100), 0.0);
        assert_eq!(alive_probability(255), 0.0);
    }

    #[test]
    fn full_bias_is_all_dead() {
        let mut rng = StdRng::seed_from_u64(7);
        let state = randomize(500, MAX_BIAS, &mut rng);
        assert_eq!(state.len(), 500);
        assert_eq!(state.alive_count(), 0);
    }

    #[test]
    fn zero_bias_is_roughly_half_alive() {
        let mut rng = StdRng::seed_from_u64(7);
        let state = randomize(10_000, 0, &mut rng);
        let alive = state.alive_count();
        assert!((4_000..6_000).contains(&alive), "alive = {alive}");
    }

    #[test]
    fn set_reports_changes() {
        let mut state = CellState::dead(4);
        assert!(state.set(2, true));
        assert!(!state.set(2, true));
        assert!(!state.set(9, true));
        assert!(state.get(2));
        assert!(!state.get(9));
        state.toggle(2);
        assert!(!state.get(2));
    }
}
