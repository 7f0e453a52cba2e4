//! Cellular-automaton state engine
//!
//! [`Life`] owns the grid dimensions, the alive/dead cells, the per-cell
//! colors and the brush. Every mutation goes through a `&mut self` method
//! that reports what it touched, so the driver decides between a full and
//! an incremental redraw.

pub mod cells;
pub mod dimensions;
pub mod evolve;
pub mod paint;
pub mod palette;
pub mod resize;

pub use cells::CellState;
pub use dimensions::GridDimensions;
pub use evolve::{EdgePolicy, Generation};
pub use paint::{PaintState, Tool};
pub use palette::{ColorTable, Palette};

use crate::colors::greyscale;
use crate::config::LifeConfig;
use crate::error::PaletteError;
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use resize::Resize;

/// What the renderer needs for one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView {
    pub index: usize,
    pub row: usize,
    pub col: usize,
    pub alive: bool,
    /// Cell color when alive, a grey when dead and corpses are shown
    pub color: Option<u32>,
}

/// Counters for the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub generation: u64,
    pub alive: usize,
    pub dead: usize,
    pub dims: GridDimensions,
}

pub struct Life {
    dims: GridDimensions,
    cells: CellState,
    colors: ColorTable,
    paint: PaintState,
    edge: EdgePolicy,
    randomness: u8,
    show_corpses: bool,
    dirty: Vec<usize>,
    full_redraw: bool,
    generation: u64,
    alive: usize,
    rng: StdRng,
}

impl Life {
    /// Build a randomized grid filling a `width` x `height` viewport
    pub fn new(config: &LifeConfig, width: u16, height: u16) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut dims = GridDimensions::new(width, height, config.cell_size, config.spacing);
        if config.grid_lines {
            dims.toggle_grid_lines();
        }
        let randomness = config.randomness.min(cells::MAX_BIAS);
        let cells = cells::randomize(dims.cell_count, randomness, &mut rng);
        let colors = ColorTable::initialize(dims.cell_count, Palette::new(&config.palette), &mut rng);
        let alive = cells.alive_count();
        Self {
            dims,
            cells,
            colors,
            paint: PaintState::new(Tool::Pen, config.brush_size, None),
            edge: config.edge,
            randomness,
            show_corpses: config.show_corpses,
            dirty: Vec::new(),
            full_redraw: true,
            generation: 0,
            alive,
            rng,
        }
    }

    pub fn dims(&self) -> &GridDimensions {
        &self.dims
    }

    pub fn cells(&self) -> &CellState {
        &self.cells
    }

    pub fn colors(&self) -> &ColorTable {
        &self.colors
    }

    pub fn paint_state(&self) -> &PaintState {
        &self.paint
    }

    pub fn paint_state_mut(&mut self) -> &mut PaintState {
        &mut self.paint
    }

    pub fn edge(&self) -> EdgePolicy {
        self.edge
    }

    pub fn set_edge(&mut self, edge: EdgePolicy) {
        self.edge = edge;
    }

    pub fn randomness(&self) -> u8 {
        self.randomness
    }

    /// Bias used by the next reset or grow, clamped to `0..=100`
    pub fn set_randomness(&mut self, bias: u8) {
        self.randomness = bias.min(cells::MAX_BIAS);
    }

    pub fn show_corpses(&self) -> bool {
        self.show_corpses
    }

    pub fn toggle_corpses(&mut self) {
        self.show_corpses = !self.show_corpses;
        self.full_redraw = true;
    }

    /// Indices flipped by the last [`advance`](Self::advance)
    pub fn dirty(&self) -> &[usize] {
        &self.dirty
    }

    /// Apply a new viewport size. Returns true if the grid was resized.
    pub fn resize_viewport(&mut self, width: u16, height: u16) -> bool {
        let before = (self.dims.width_px, self.dims.height_px);
        self.dims.resize_viewport(width, height);
        if before != (width, height) {
            self.full_redraw = true;
        }
        self.sync_len()
    }

    /// Returns false if the new size would leave the allowed range
    pub fn change_cell_size(&mut self, delta: i32) -> bool {
        if !self.dims.change_cell_size(delta) {
            return false;
        }
        self.full_redraw = true;
        self.sync_len();
        true
    }

    pub fn change_spacing(&mut self, delta: i32) -> bool {
        let changed = self.dims.change_spacing(delta);
        self.full_redraw |= changed;
        changed
    }

    pub fn toggle_grid_lines(&mut self) -> bool {
        let changed = self.dims.toggle_grid_lines();
        self.full_redraw |= changed;
        changed
    }

    /// Run one generation and return the flipped indices
    pub fn advance(&mut self) -> &[usize] {
        match evolve::advance_into(&mut self.cells, &self.dims, self.edge, &mut self.dirty) {
            Some((alive, _)) => {
                self.alive = alive;
                self.generation += 1;
            }
            None => self.alive = self.cells.alive_count(),
        }
        &self.dirty
    }

    /// Stroke the current brush at a viewport coordinate
    pub fn paint_at(&mut self, x: u16, y: u16) -> Vec<usize> {
        let PaintState { tool, pen_color, .. } = self.paint;
        let brush = self.paint.brush_size();
        self.paint(x, y, brush, tool, pen_color)
    }

    /// Stroke an explicit brush. Returns the changed indices; the generation
    /// dirty list is left alone.
    pub fn paint(&mut self, x: u16, y: u16, brush_size: u16, tool: Tool, pen_color: Option<u32>) -> Vec<usize> {
        let changed = paint::paint(
            &mut self.cells,
            &mut self.colors,
            &self.dims,
            x,
            y,
            brush_size,
            tool,
            pen_color,
        );
        match tool {
            Tool::Pen => self.alive += changed.len(),
            Tool::Eraser => self.alive -= changed.len(),
            Tool::None => {}
        }
        changed
    }

    /// Re-seed every cell under the current randomness bias
    pub fn reset(&mut self) {
        self.cells = cells::randomize(self.dims.cell_count, self.randomness, &mut self.rng);
        self.colors = ColorTable::initialize(self.dims.cell_count, self.colors.palette().clone(), &mut self.rng);
        self.alive = self.cells.alive_count();
        self.dirty.clear();
        self.generation = 0;
        self.full_redraw = true;
        debug!("reset {} cells, {} alive (bias {})", self.dims.cell_count, self.alive, self.randomness);
    }

    /// Kill every cell, keeping colors
    pub fn clear(&mut self) {
        self.cells = CellState::dead(self.dims.cell_count);
        self.alive = 0;
        self.dirty.clear();
        self.full_redraw = true;
    }

    pub fn recolor_all(&mut self) {
        self.colors.recolor_all(&mut self.rng);
        self.full_redraw = true;
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.colors.set_palette(palette, &mut self.rng);
        self.full_redraw = true;
    }

    pub fn patch_palette_entry(&mut self, hex: &str, slot: usize) -> Result<(), PaletteError> {
        let old = self.colors.palette().get(slot);
        self.colors.patch_palette_entry(hex, slot)?;
        if old.is_some() && self.paint.pen_color == old {
            self.paint.pen_color = self.colors.palette().get(slot);
        }
        self.full_redraw = true;
        Ok(())
    }

    pub fn add_palette_entry(&mut self, hex: &str) -> Result<usize, PaletteError> {
        self.colors.add_palette_entry(hex)
    }

    pub fn remove_palette_entry(&mut self, slot: usize) -> Result<u32, PaletteError> {
        let removed = self.colors.remove_palette_entry(slot, &mut self.rng)?;
        if self.paint.pen_color == Some(removed) && !self.colors.palette().colors().contains(&removed) {
            self.paint.pen_color = None;
        }
        self.full_redraw = true;
        Ok(removed)
    }

    /// Render info for one cell
    pub fn cell_view(&self, index: usize) -> Option<CellView> {
        if index >= self.cells.len() {
            return None;
        }
        let alive = self.cells.get(index);
        let color = if alive {
            self.colors.rgb_at(index)
        } else if self.show_corpses {
            Some(greyscale(index))
        } else {
            None
        };
        let cols = self.dims.cols.max(1);
        Some(CellView { index, row: index / cols, col: index % cols, alive, color })
    }

    /// Every cell, for a full redraw
    pub fn snapshot(&self) -> impl Iterator<Item = CellView> + '_ {
        (0..self.cells.len()).filter_map(move |i| self.cell_view(i))
    }

    /// Cells flipped by the last generation, for an incremental redraw
    pub fn changes(&self) -> impl Iterator<Item = CellView> + '_ {
        self.dirty.iter().filter_map(move |&i| self.cell_view(i))
    }

    /// Whether the next frame must be redrawn in full. Clears the flag.
    pub fn take_full_redraw(&mut self) -> bool {
        std::mem::take(&mut self.full_redraw)
    }

    pub fn stats(&self) -> Stats {
        Stats {
            generation: self.generation,
            alive: self.alive,
            dead: self.cells.len() - self.alive,
            dims: self.dims,
        }
    }

    fn sync_len(&mut self) -> bool {
        let outcome = resize::apply(
            &mut self.cells,
            &mut self.colors,
            self.dims.cell_count,
            self.randomness,
            &mut self.rng,
        );
        if outcome == Resize::Unchanged {
            return false;
        }
        debug!("resized grid to {}x{} ({:?})", self.dims.cols, self.dims.rows, outcome);
        self.dirty.clear();
        self.alive = self.cells.alive_count();
        self.full_redraw = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LifeConfig {
        LifeConfig { seed: Some(9), randomness: 100, ..LifeConfig::default() }
    }

    #[test]
    fn stats_sum_to_cell_count() {
        let mut life = Life::new(&LifeConfig { seed: Some(1), ..LifeConfig::default() }, 30, 12);
        for _ in 0..20 {
            life.advance();
            let stats = life.stats();
            assert_eq!(stats.alive + stats.dead, stats.dims.cell_count);
            assert_eq!(stats.alive, life.cells().alive_count());
        }
        assert_eq!(life.stats().generation, 20);
    }

    #[test]
    fn resize_discards_dirty_and_forces_full_redraw() {
        let mut life = Life::new(&config(), 10, 10);
        assert!(life.take_full_redraw());
        life.paint(3, 3, 1, Tool::Pen, None);
        life.advance();
        assert_eq!(life.dirty(), &[36]);
        assert!(!life.take_full_redraw());

        assert!(life.resize_viewport(14, 10));
        assert!(life.dirty().is_empty());
        assert!(life.take_full_redraw());
        assert_eq!(life.cells().len(), life.dims().cell_count);
        assert_eq!(life.colors().len(), life.dims().cell_count);
    }

    #[test]
    fn degenerate_viewport_is_inert() {
        let mut life = Life::new(&config(), 0, 0);
        assert!(life.advance().is_empty());
        assert!(life.paint(0, 0, 3, Tool::Pen, None).is_empty());
        assert_eq!(life.snapshot().count(), 0);
        assert_eq!(life.stats().generation, 0);
    }

    #[test]
    fn paint_tracks_population() {
        let mut life = Life::new(&config(), 10, 10);
        assert_eq!(life.stats().alive, 0);
        assert_eq!(life.paint(5, 5, 3, Tool::Pen, None).len(), 9);
        assert_eq!(life.stats().alive, 9);
        assert_eq!(life.paint(5, 5, 1, Tool::Eraser, None).len(), 1);
        assert_eq!(life.stats().alive, 8);
        assert!(life.dirty().is_empty());
    }

    #[test]
    fn corpses_render_grey() {
        let mut life = Life::new(&config(), 4, 4);
        assert_eq!(life.cell_view(0).unwrap().color, None);
        life.toggle_corpses();
        assert_eq!(life.cell_view(0).unwrap().color, Some(greyscale(0)));
    }

    #[test]
    fn reset_clears_generation() {
        let mut life = Life::new(&LifeConfig { seed: Some(2), ..LifeConfig::default() }, 20, 20);
        life.advance();
        life.advance();
        life.take_full_redraw();
        life.reset();
        assert_eq!(life.stats().generation, 0);
        assert!(life.dirty().is_empty());
        assert!(life.take_full_redraw());
    }

    #[test]
    fn removing_pen_color_clears_override() {
        let mut life = Life::new(&config(), 4, 4);
        life.set_palette(Palette::new(&[0x000001, 0x000002]));
        life.paint_state_mut().pen_color = Some(0x000002);
        assert_eq!(life.remove_palette_entry(1), Ok(0x000002));
        assert_eq!(life.paint_state().pen_color, None);
    }

    #[test]
    fn patching_pen_color_follows_the_slot() {
        let mut life = Life::new(&config(), 4, 4);
        life.set_palette(Palette::new(&[0x000001, 0x000002]));
        life.paint_state_mut().pen_color = Some(0x000002);
        assert_eq!(life.patch_palette_entry("#00ff00", 1), Ok(()));
        assert_eq!(life.paint_state().pen_color, Some(0x00ff00));
        assert_eq!(life.paint_at(1, 1), vec![6]);
        assert_eq!(life.colors().rgb_at(6), Some(0x00ff00));

        life.paint_state_mut().pen_color = Some(0x000001);
        assert!(life.patch_palette_entry("zz", 0).is_err());
        assert_eq!(life.paint_state().pen_color, Some(0x000001));
    }
}
