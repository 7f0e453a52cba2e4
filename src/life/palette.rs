//! Palette and per-cell color table
//!
//! Colors are stored packed as `0xRRGGBB` and only unpacked to hex strings
//! on read. A cell keeps its color while dead so it comes back with the same
//! color when it is reborn.

use crate::colors::{greyscale, parse_hex, to_hex};
use crate::error::PaletteError;
use rand::Rng;

/// Most entries a palette may hold
pub const MAX_PALETTE_SIZE: usize = 10;

/// Bounded, ordered list of selectable colors. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<u32>,
}

impl Palette {
    /// Build from packed colors, keeping at most [`MAX_PALETTE_SIZE`].
    /// Falls back to white when `colors` is empty.
    pub fn new(colors: &[u32]) -> Self {
        let mut colors: Vec<u32> = colors.iter().map(|c| c & 0xff_ffff).take(MAX_PALETTE_SIZE).collect();
        if colors.is_empty() {
            colors.push(0xffffff);
        }
        Self { colors }
    }

    /// Build from hex strings; malformed entries are skipped
    pub fn from_hex<S: AsRef<str>>(entries: &[S]) -> Self {
        let colors: Vec<u32> = entries.iter().filter_map(|s| parse_hex(s.as_ref())).collect();
        Self::new(&colors)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, slot: usize) -> Option<u32> {
        self.colors.get(slot).copied()
    }

    pub fn colors(&self) -> &[u32] {
        &self.colors
    }

    /// A uniformly random entry
    pub fn pick<R: Rng>(&self, rng: &mut R) -> u32 {
        self.colors[rng.gen_range(0..self.colors.len())]
    }
}

/// One packed color per cell, sized in lockstep with the cell state
#[derive(Debug, Clone)]
pub struct ColorTable {
    palette: Palette,
    colors: Vec<u32>,
}

impl ColorTable {
    /// Assign every cell a random palette entry
    pub fn initialize<R: Rng>(cell_count: usize, palette: Palette, rng: &mut R) -> Self {
        let colors = (0..cell_count).map(|_| palette.pick(rng)).collect();
        Self { palette, colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Packed color of a cell
    pub fn rgb_at(&self, index: usize) -> Option<u32> {
        self.colors.get(index).copied()
    }

    /// Color of a cell as 6 hex digits
    pub fn color_at(&self, index: usize) -> Option<String> {
        self.rgb_at(index).map(to_hex)
    }

    /// Deterministic grey for a dead cell
    pub fn greyscale_at(&self, index: usize) -> String {
        to_hex(greyscale(index))
    }

    pub(crate) fn set(&mut self, index: usize, packed: u32) {
        if let Some(color) = self.colors.get_mut(index) {
            *color = packed & 0xff_ffff;
        }
    }

    /// Replace palette slot `slot`; cells holding the old color follow it
    pub fn patch_palette_entry(&mut self, hex: &str, slot: usize) -> Result<(), PaletteError> {
        let packed = parse_hex(hex).ok_or_else(|| PaletteError::InvalidHex(hex.to_string()))?;
        let len = self.palette.len();
        let old = self.palette.get(slot).ok_or(PaletteError::InvalidSlot { slot, len })?;
        self.palette.colors[slot] = packed;
        for color in self.colors.iter_mut().filter(|c| **c == old) {
            *color = packed;
        }
        Ok(())
    }

    /// Append a palette entry. Existing cell colors are untouched.
    pub fn add_palette_entry(&mut self, hex: &str) -> Result<usize, PaletteError> {
        if self.palette.len() >= MAX_PALETTE_SIZE {
            return Err(PaletteError::Full(MAX_PALETTE_SIZE));
        }
        let packed = parse_hex(hex).ok_or_else(|| PaletteError::InvalidHex(hex.to_string()))?;
        self.palette.colors.push(packed);
        Ok(self.palette.len() - 1)
    }

    /// Drop palette slot `slot`; cells holding its color get a random
    /// remaining entry
    pub fn remove_palette_entry<R: Rng>(&mut self, slot: usize, rng: &mut R) -> Result<u32, PaletteError> {
        let len = self.palette.len();
        if slot >= len {
            return Err(PaletteError::InvalidSlot { slot, len });
        }
        if len == 1 {
            return Err(PaletteError::LastEntry);
        }
        let removed = self.palette.colors.remove(slot);
        if !self.palette.colors.contains(&removed) {
            for color in self.colors.iter_mut().filter(|c| **c == removed) {
                *color = self.palette.pick(rng);
            }
        }
        Ok(removed)
    }

    /// Swap in a new palette and recolor every cell from it
    pub fn set_palette<R: Rng>(&mut self, palette: Palette, rng: &mut R) {
        self.palette = palette;
        self.recolor_all(rng);
    }

    /// Give every cell a fresh random palette entry
    pub fn recolor_all<R: Rng>(&mut self, rng: &mut R) {
        for color in &mut self.colors {
            *color = self.palette.pick(rng);
        }
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.colors.truncate(len);
    }

    pub(crate) fn grow<R: Rng>(&mut self, additional: usize, rng: &mut R) {
        self.colors.reserve(additional);
        for _ in 0..additional {
            let color = self.palette.pick(rng);
            self.colors.push(color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn table(cells: usize, colors: &[u32]) -> ColorTable {
        ColorTable::initialize(cells, Palette::new(colors), &mut rng())
    }

    #[test]
    fn initialize_draws_from_palette() {
        let t = table(200, &[0x111111, 0x222222]);
        assert_eq!(t.len(), 200);
        for i in 0..200 {
            let c = t.rgb_at(i).unwrap();
            assert!(c == 0x111111 || c == 0x222222);
        }
        assert_eq!(t.color_at(200), None);
    }

    #[test]
    fn color_at_is_hex() {
        let t = table(3, &[0x00ff80]);
        assert_eq!(t.color_at(1).as_deref(), Some("00ff80"));
    }

    #[test]
    fn empty_palette_falls_back() {
        let p = Palette::from_hex(&["nope", "#12"]);
        assert_eq!(p.colors(), &[0xffffff]);
    }

    #[test]
    fn add_rejected_at_capacity() {
        let full: Vec<u32> = (0..MAX_PALETTE_SIZE as u32).collect();
        let mut t = table(4, &full);
        assert_eq!(t.add_palette_entry("ffffff"), Err(PaletteError::Full(MAX_PALETTE_SIZE)));
        assert_eq!(t.palette().len(), MAX_PALETTE_SIZE);
    }

    #[test]
    fn add_and_bad_hex() {
        let mut t = table(4, &[0x000001]);
        assert_eq!(t.add_palette_entry("#abcdef"), Ok(1));
        assert!(matches!(t.add_palette_entry("xyz"), Err(PaletteError::InvalidHex(_))));
        assert_eq!(t.palette().colors(), &[0x000001, 0xabcdef]);
    }

    #[test]
    fn patch_rewrites_cells_of_old_color() {
        let mut t = table(10, &[0x000001]);
        t.patch_palette_entry("ff0000", 0).unwrap();
        assert_eq!(t.palette().colors(), &[0xff0000]);
        assert!((0..10).all(|i| t.rgb_at(i) == Some(0xff0000)));
        assert_eq!(
            t.patch_palette_entry("ff0000", 3),
            Err(PaletteError::InvalidSlot { slot: 3, len: 1 })
        );
    }

    #[test]
    fn remove_reassigns_and_keeps_last() {
        let mut t = table(50, &[0x000001, 0x000002]);
        assert_eq!(t.remove_palette_entry(0, &mut rng()), Ok(0x000001));
        assert!((0..50).all(|i| t.rgb_at(i) == Some(0x000002)));
        assert_eq!(t.remove_palette_entry(0, &mut rng()), Err(PaletteError::LastEntry));
        assert_eq!(
            t.remove_palette_entry(5, &mut rng()),
            Err(PaletteError::InvalidSlot { slot: 5, len: 1 })
        );
    }

    #[test]
    fn greyscale_at_is_deterministic() {
        let t = table(4, &[0x000001]);
        assert_eq!(t.greyscale_at(3), t.greyscale_at(3));
        let grey = t.greyscale_at(3);
        assert_eq!(&grey[0..2], &grey[2..4]);
    }
}
