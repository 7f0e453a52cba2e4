use crossterm::event::KeyCode;
use crossterm::style::Color;

/// Preset palettes selectable with Shift+digit, as packed 0xRRGGBB values
pub const PRESETS: [(&str, &[u32]); 10] = [
    ("matrix", &[0x006400, 0x00a000, 0x00d000, 0x7cfc00]),
    ("fire", &[0x8b0000, 0xff2400, 0xff8c00, 0xffd700]),
    ("ice", &[0x00008b, 0x1e90ff, 0x00bfff, 0xe0ffff]),
    ("pink", &[0x8b008b, 0xff00ff, 0xff69b4, 0xffc0cb]),
    ("gold", &[0xb8860b, 0xdaa520, 0xffd700, 0xfffacd]),
    ("electric", &[0x008b8b, 0x00ffff, 0x7fffd4, 0xffffff]),
    ("lava", &[0x8b0000, 0xff0000, 0xc71585, 0xff4500]),
    ("mono", &[0x808080, 0xa9a9a9, 0xd3d3d3, 0xffffff]),
    ("rainbow", &[0xff0000, 0xffa500, 0xffff00, 0x00ff00, 0x0000ff, 0x8b00ff]),
    ("neon", &[0x00008b, 0x4169e1, 0xff00ff, 0x39ff14]),
];

/// Palette used when nothing else is configured
pub const DEFAULT_PRESET: usize = 8;

/// Shared palette preset state
#[derive(Clone, Copy)]
pub struct PresetState {
    pub preset: usize,
}

impl PresetState {
    pub fn new(default_preset: usize) -> Self {
        Self { preset: default_preset.min(PRESETS.len() - 1) }
    }

    /// Handle preset key input. Returns true if key was handled.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('!') => self.preset = 1,  // Shift+1: fire
            KeyCode::Char('@') => self.preset = 2,  // Shift+2: ice
            KeyCode::Char('#') => self.preset = 3,  // Shift+3: pink
            KeyCode::Char('$') => self.preset = 4,  // Shift+4: gold
            KeyCode::Char('%') => self.preset = 5,  // Shift+5: electric
            KeyCode::Char('^') => self.preset = 6,  // Shift+6: lava
            KeyCode::Char('&') => self.preset = 7,  // Shift+7: mono
            KeyCode::Char('*') => self.preset = 8,  // Shift+8: rainbow
            KeyCode::Char('(') => self.preset = 9,  // Shift+9: neon
            KeyCode::Char(')') => self.preset = 0,  // Shift+0: matrix
            _ => return false,
        }
        true
    }

    pub fn name(&self) -> &'static str {
        PRESETS[self.preset].0
    }

    pub fn colors(&self) -> &'static [u32] {
        PRESETS[self.preset].1
    }
}

/// Parse `rrggbb` or `#rrggbb` into a packed color
pub fn parse_hex(s: &str) -> Option<u32> {
    let digits = s.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

/// Format a packed color as 6 lowercase hex digits
pub fn to_hex(packed: u32) -> String {
    format!("{:06x}", packed & 0xff_ffff)
}

pub fn unpack(packed: u32) -> (u8, u8, u8) {
    ((packed >> 16) as u8, (packed >> 8) as u8, packed as u8)
}

/// Terminal color for a packed value
pub fn to_color(packed: u32) -> Color {
    let (r, g, b) = unpack(packed);
    Color::Rgb { r, g, b }
}

/// Deterministic grey for a cell index, in the 0x30..0x80 range so corpses
/// stay darker than most live colors
pub fn greyscale(index: usize) -> u32 {
    let h = (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15) >> 59;
    let v = 0x30 + (h as u32) * 0x50 / 32;
    (v << 16) | (v << 8) | v
}
