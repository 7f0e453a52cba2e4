use crate::colors::{parse_hex, DEFAULT_PRESET, PRESETS};
use crate::life::EdgePolicy;
use crate::settings::LifeSettings;
use log::warn;

/// Default seconds per generation
pub const DEFAULT_TIME_STEP: f32 = 0.05;
/// Default cell size in terminal characters
pub const DEFAULT_CELL_SIZE: u16 = 1;
/// Default randomness bias (0 = half alive, 100 = all dead)
pub const DEFAULT_RANDOMNESS: u8 = 40;

/// Runtime configuration for the simulator
#[derive(Clone, Debug)]
pub struct LifeConfig {
    pub time_step: f32,
    pub seed: Option<u64>,
    pub draw_char: char,
    pub cell_size: u16,
    pub spacing: u16,
    pub randomness: u8,
    pub brush_size: u16,
    pub edge: EdgePolicy,
    pub show_corpses: bool,
    pub grid_lines: bool,
    pub palette: Vec<u32>,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            time_step: DEFAULT_TIME_STEP,
            seed: None,
            draw_char: '█',
            cell_size: DEFAULT_CELL_SIZE,
            spacing: 0,
            randomness: DEFAULT_RANDOMNESS,
            brush_size: 1,
            edge: EdgePolicy::default(),
            show_corpses: false,
            grid_lines: false,
            palette: PRESETS[DEFAULT_PRESET].1.to_vec(),
        }
    }
}

impl LifeConfig {
    /// Defaults overridden by whatever the settings file provides
    pub fn from_settings(settings: &LifeSettings) -> Self {
        let mut config = Self::default();
        if let Some(t) = settings.time_step {
            config.time_step = t;
        }
        if let Some(c) = settings.draw_char.as_deref().and_then(|s| s.chars().next()) {
            config.draw_char = c;
        }
        if let Some(size) = settings.cell_size {
            config.cell_size = size;
        }
        if let Some(spacing) = settings.spacing {
            config.spacing = spacing;
        }
        if let Some(r) = settings.randomness {
            config.randomness = r;
        }
        if let Some(b) = settings.brush_size {
            config.brush_size = b;
        }
        if let Some(edge) = settings.edge {
            config.edge = edge;
        }
        config.show_corpses = settings.corpses.unwrap_or(config.show_corpses);
        config.grid_lines = settings.grid_lines.unwrap_or(config.grid_lines);
        if let Some(entries) = &settings.palette {
            let palette: Vec<u32> = entries
                .iter()
                .filter_map(|hex| {
                    let parsed = parse_hex(hex);
                    if parsed.is_none() {
                        warn!("ignoring palette entry {hex:?}");
                    }
                    parsed
                })
                .collect();
            if !palette.is_empty() {
                config.palette = palette;
            }
        } else if let Some(name) = settings.preset.as_deref() {
            match PRESETS.iter().find(|(n, _)| n.eq_ignore_ascii_case(name)) {
                Some((_, colors)) => config.palette = colors.to_vec(),
                None => warn!("unknown palette preset {name:?}"),
            }
        }
        config
    }
}
