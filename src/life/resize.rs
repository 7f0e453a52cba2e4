//! Grow/shrink the cell state and color table when the cell count changes

use super::cells::{fresh_cells, CellState};
use super::palette::ColorTable;
use rand::Rng;

/// What a resize did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resize {
    Unchanged,
    Grew { added: usize },
    Shrank { removed: usize },
}

/// Bring `cells` and `colors` to `new_len`.
///
/// Shrinking keeps the first `new_len` cells. This is a crop of the flat
/// buffer, not a spatial rescale: once the column count changes, surviving
/// cells land on different rows. Growing keeps every existing cell and
/// appends fresh random cells under `bias` with fresh palette colors.
pub fn apply<R: Rng>(
    cells: &mut CellState,
    colors: &mut ColorTable,
    new_len: usize,
    bias: u8,
    rng: &mut R,
) -> Resize {
    let old_len = cells.len();
    let outcome = if new_len > old_len {
        let added = new_len - old_len;
        cells.extend(fresh_cells(added, bias, rng));
        Resize::Grew { added }
    } else if new_len < old_len {
        cells.truncate(new_len);
        Resize::Shrank { removed: old_len - new_len }
    } else {
        Resize::Unchanged
    };

    // Colors follow the cell count even if they drifted apart
    if colors.len() > new_len {
        colors.truncate(new_len);
    } else if colors.len() < new_len {
        colors.grow(new_len - colors.len(), rng);
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::life::palette::Palette;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn grow_keeps_prefix_and_appends() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut cells = CellState::from_cells(vec![true, false, true]);
        let mut colors = ColorTable::initialize(3, Palette::new(&[0x0000aa]), &mut rng);
        let r = apply(&mut cells, &mut colors, 8, 0, &mut rng);
        assert_eq!(r, Resize::Grew { added: 5 });
        assert_eq!(cells.len(), 8);
        assert_eq!(colors.len(), 8);
        assert_eq!(&cells.as_slice()[..3], &[true, false, true]);
    }

    #[test]
    fn shrink_crops() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut cells = CellState::from_cells(vec![true, false, true, true]);
        let mut colors = ColorTable::initialize(4, Palette::new(&[0x0000aa]), &mut rng);
        let r = apply(&mut cells, &mut colors, 2, 0, &mut rng);
        assert_eq!(r, Resize::Shrank { removed: 2 });
        assert_eq!(cells.as_slice(), &[true, false]);
        assert_eq!(colors.len(), 2);
    }

    #[test]
    fn grow_with_full_bias_adds_dead_cells() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut cells = CellState::dead(0);
        let mut colors = ColorTable::initialize(0, Palette::new(&[0x0000aa]), &mut rng);
        apply(&mut cells, &mut colors, 100, 100, &mut rng);
        assert_eq!(cells.alive_count(), 0);
        assert_eq!(colors.rgb_at(99), Some(0x0000aa));
    }
}
