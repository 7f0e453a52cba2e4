//! Brush-based manual edits, applied outside the generation cycle

use super::cells::CellState;
use super::dimensions::GridDimensions;
use super::palette::ColorTable;

/// Largest brush side
pub const MAX_BRUSH_SIZE: u16 = 15;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tool {
    #[default]
    Pen,
    Eraser,
    None,
}

impl Tool {
    pub fn label(&self) -> &'static str {
        match self {
            Tool::Pen => "pen",
            Tool::Eraser => "eraser",
            Tool::None => "none",
        }
    }
}

/// Current brush settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaintState {
    pub tool: Tool,
    brush_size: u16,
    /// Color given to cells the pen brings to life; `None` keeps theirs
    pub pen_color: Option<u32>,
}

impl Default for PaintState {
    fn default() -> Self {
        Self { tool: Tool::Pen, brush_size: 1, pen_color: None }
    }
}

impl PaintState {
    pub fn new(tool: Tool, brush_size: u16, pen_color: Option<u32>) -> Self {
        Self { tool, brush_size: odd_brush(brush_size), pen_color }
    }

    pub fn brush_size(&self) -> u16 {
        self.brush_size
    }

    /// Step the brush by two so it stays odd. Returns false at the limits.
    pub fn change_brush(&mut self, delta: i32) -> bool {
        let next = self.brush_size as i32 + 2 * delta.signum();
        if delta == 0 || next < 1 || next > MAX_BRUSH_SIZE as i32 {
            return false;
        }
        self.brush_size = next as u16;
        true
    }
}

/// Round a brush size up to the nearest odd value in `1..=MAX_BRUSH_SIZE`
pub fn odd_brush(size: u16) -> u16 {
    (size.max(1) | 1).min(MAX_BRUSH_SIZE)
}

/// Apply one brush stroke centered under the viewport coordinate.
///
/// Returns the indices whose alive/dead value changed. Brush cells off the
/// grid, including columns that would spill into a neighboring row, are
/// skipped individually.
#[allow(clippy::too_many_arguments)]
pub fn paint(
    cells: &mut CellState,
    colors: &mut ColorTable,
    dims: &GridDimensions,
    x_px: u16,
    y_px: u16,
    brush_size: u16,
    tool: Tool,
    pen_color: Option<u32>,
) -> Vec<usize> {
    let mut changed = Vec::new();
    if tool == Tool::None || cells.len() != dims.cell_count {
        return changed;
    }
    let Some(center) = dims.index_at(x_px, y_px) else {
        return changed;
    };

    let row_size = dims.row_size() as isize;
    let count = dims.cell_count as isize;
    let center_col = center as isize % row_size;
    let reach = (odd_brush(brush_size) / 2) as isize;

    for dr in -reach..=reach {
        let row_start = center as isize + dr * row_size;
        for dc in -reach..=reach {
            let col = center_col + dc;
            if col < 0 || col >= row_size {
                continue;
            }
            let i = row_start + dc;
            if i < 0 || i >= count {
                continue;
            }
            let i = i as usize;
            match tool {
                Tool::Pen => {
                    if cells.set(i, true) {
                        if let Some(color) = pen_color {
                            colors.set(i, color);
                        }
                        changed.push(i);
                    }
                }
                Tool::Eraser => {
                    if cells.set(i, false) {
                        changed.push(i);
                    }
                }
                Tool::None => {}
            }
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::life::palette::Palette;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn setup() -> (CellState, ColorTable, GridDimensions) {
        let dims = GridDimensions::new(9, 9, 1, 0); // 10x10
        let colors = ColorTable::initialize(dims.cell_count, Palette::new(&[0x111111]), &mut StdRng::seed_from_u64(3));
        (CellState::dead(dims.cell_count), colors, dims)
    }

    #[test]
    fn brush_size_is_odd() {
        assert_eq!(odd_brush(0), 1);
        assert_eq!(odd_brush(2), 3);
        assert_eq!(odd_brush(3), 3);
        assert_eq!(odd_brush(100), MAX_BRUSH_SIZE);
        let mut state = PaintState::new(Tool::Pen, 1, None);
        assert!(!state.change_brush(-1));
        assert!(state.change_brush(1));
        assert_eq!(state.brush_size(), 3);
    }

    #[test]
    fn pen_override_colors_only_new_cells() {
        let (mut cells, mut colors, dims) = setup();
        cells.set(55, true);
        let changed = paint(&mut cells, &mut colors, &dims, 5, 5, 3, Tool::Pen, Some(0xff0000));
        assert_eq!(changed.len(), 8);
        assert!(!changed.contains(&55));
        assert_eq!(colors.rgb_at(55), Some(0x111111));
        assert_eq!(colors.rgb_at(44), Some(0xff0000));
    }

    #[test]
    fn brush_does_not_spill_across_rows() {
        let (mut cells, mut colors, dims) = setup();
        let changed = paint(&mut cells, &mut colors, &dims, 9, 5, 3, Tool::Pen, None);
        assert_eq!(changed, vec![48, 49, 58, 59, 68, 69]);
    }

    #[test]
    fn eraser_keeps_color() {
        let (mut cells, mut colors, dims) = setup();
        paint(&mut cells, &mut colors, &dims, 2, 2, 1, Tool::Pen, Some(0x00ff00));
        let changed = paint(&mut cells, &mut colors, &dims, 2, 2, 5, Tool::Eraser, None);
        assert_eq!(changed, vec![22]);
        assert_eq!(colors.rgb_at(22), Some(0x00ff00));
        assert_eq!(cells.alive_count(), 0);
    }

    #[test]
    fn no_tool_and_off_grid_are_no_ops() {
        let (mut cells, mut colors, dims) = setup();
        assert!(paint(&mut cells, &mut colors, &dims, 1, 1, 3, Tool::None, None).is_empty());
        assert!(paint(&mut cells, &mut colors, &dims, 200, 1, 3, Tool::Pen, None).is_empty());
    }
}
