//! Grid dimensions derived from the viewport size and cell size

/// Smallest allowed cell size (viewport units per cell)
pub const MIN_CELL_SIZE: u16 = 1;
/// Largest allowed cell size
pub const MAX_CELL_SIZE: u16 = 8;

/// Rows, columns and cell count for a viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDimensions {
    pub width_px: u16,
    pub height_px: u16,
    pub cell_size_px: u16,
    /// Gap drawn inside each cell, always below `cell_size_px`
    pub spacing_px: u16,
    pub grid_lines: bool,
    pub rows: usize,
    pub cols: usize,
    pub cell_count: usize,
}

impl GridDimensions {
    pub fn new(width_px: u16, height_px: u16, cell_size_px: u16, spacing_px: u16) -> Self {
        let cell_size_px = cell_size_px.clamp(MIN_CELL_SIZE, MAX_CELL_SIZE);
        let mut dims = Self {
            width_px,
            height_px,
            cell_size_px,
            spacing_px: spacing_px.min(cell_size_px - 1),
            grid_lines: false,
            rows: 0,
            cols: 0,
            cell_count: 0,
        };
        dims.recompute();
        dims
    }

    /// Row stride in the flat cell index
    pub fn row_size(&self) -> usize {
        self.cols
    }

    /// Apply a new viewport size. Returns true if the cell count changed.
    pub fn resize_viewport(&mut self, width_px: u16, height_px: u16) -> bool {
        self.width_px = width_px;
        self.height_px = height_px;
        self.recompute()
    }

    /// Grow or shrink the cell size. Out-of-range results are rejected and
    /// leave the dimensions untouched.
    pub fn change_cell_size(&mut self, delta: i32) -> bool {
        let next = self.cell_size_px as i32 + delta;
        if delta == 0 || next < MIN_CELL_SIZE as i32 || next > MAX_CELL_SIZE as i32 {
            return false;
        }
        self.cell_size_px = next as u16;
        if self.spacing_px >= self.cell_size_px {
            self.set_spacing(self.cell_size_px - 1);
        }
        self.recompute();
        true
    }

    /// Grow or shrink the in-cell spacing, which must stay in `0..cell_size`
    pub fn change_spacing(&mut self, delta: i32) -> bool {
        let next = self.spacing_px as i32 + delta;
        if delta == 0 || next < 0 || next >= self.cell_size_px as i32 {
            return false;
        }
        self.set_spacing(next as u16);
        true
    }

    /// Toggle grid lines; they cannot be shown without spacing
    pub fn toggle_grid_lines(&mut self) -> bool {
        if self.spacing_px == 0 {
            self.grid_lines = false;
            return false;
        }
        self.grid_lines = !self.grid_lines;
        true
    }

    /// Cell index under a viewport coordinate
    pub fn index_at(&self, x_px: u16, y_px: u16) -> Option<usize> {
        if self.cell_count == 0 {
            return None;
        }
        let col = (x_px / self.cell_size_px) as usize;
        let row = (y_px / self.cell_size_px) as usize;
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    /// Viewport origin of a cell
    pub fn origin_of(&self, index: usize) -> (u16, u16) {
        let cols = self.cols.max(1);
        let row = index / cols;
        let col = index % cols;
        let size = self.cell_size_px as usize;
        ((col * size).min(u16::MAX as usize) as u16, (row * size).min(u16::MAX as usize) as u16)
    }

    fn set_spacing(&mut self, spacing: u16) {
        self.spacing_px = spacing;
        if spacing == 0 {
            self.grid_lines = false;
        }
    }

    fn recompute(&mut self) -> bool {
        let before = self.cell_count;
        if self.width_px == 0 || self.height_px == 0 {
            self.rows = 0;
            self.cols = 0;
        } else {
            self.rows = (self.height_px / self.cell_size_px) as usize + 1;
            self.cols = (self.width_px / self.cell_size_px) as usize + 1;
        }
        self.cell_count = self.rows * self.cols;
        self.cell_count != before
    }
}
