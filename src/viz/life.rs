//! Conway's Game of Life viewer

use super::{command_for, Command, VizState};
use crate::colors::{to_color, to_hex, PresetState, DEFAULT_PRESET};
use crate::config::LifeConfig;
use crate::help::render_help_overlay;
use crate::life::{CellView, EdgePolicy, GridDimensions, Life, Palette, Stats, Tool};
use crate::terminal::{Rect, Terminal};
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::style::Color;
use log::{debug, info, warn};
use rand::Rng;
use std::collections::VecDeque;
use std::io;
use std::time::{Duration, Instant};

const HELP_TEXT: &str = "\
GAME OF LIFE
─────────────────────────
Space  Play/pause
s/→    Single step
1-9,0  Speed
Mouse  Left paint, right erase
p/e/n  Pen / eraser / no tool
[ ]    Brush size
o      Cycle pen color
+/-    Cell size
< >    Spacing
g      Grid lines
d      Show dead cells
w      Cycle edge policy
{ }    Randomness
r      Reset   x  Clear
c      Recolor cells
A/X    Add/remove color
!-()   Palette preset
?      Close help
q/Esc  Quit";

/// Viewport changes are applied once the size has been stable this long
const RESIZE_DEBOUNCE: Duration = Duration::from_millis(150);
/// Longest wait for input between frames
const MAX_POLL: Duration = Duration::from_millis(50);
/// Generations kept for the status line sparkline
const TREND_LEN: usize = 24;

/// Recent population counts for the status line
pub struct PopulationTrend {
    samples: VecDeque<usize>,
    capacity: usize,
}

impl PopulationTrend {
    pub fn new(capacity: usize) -> Self {
        Self { samples: VecDeque::with_capacity(capacity), capacity: capacity.max(1) }
    }

    pub fn push(&mut self, alive: usize) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(alive);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Block-character sparkline scaled between the window's min and max
    pub fn sparkline(&self) -> String {
        const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
        let (Some(&min), Some(&max)) = (self.samples.iter().min(), self.samples.iter().max()) else {
            return String::new();
        };
        let span = (max - min).max(1);
        self.samples
            .iter()
            .map(|&v| BARS[(v - min) * (BARS.len() - 1) / span])
            .collect()
    }
}

/// Run the interactive viewer until the user quits
pub fn run(term: &mut Terminal, config: &LifeConfig) -> io::Result<()> {
    let _mouse_guard = MouseCaptureGuard::enable()?;

    let (mut term_w, mut term_h) = term.size();
    let mut life = Life::new(config, term_w, grid_height(term_h));
    let mut state = VizState::new(config.time_step);
    let mut presets = PresetState::new(DEFAULT_PRESET);
    let mut trend = PopulationTrend::new(TREND_LEN);
    let mut pending_size: Option<((u16, u16), Instant)> = None;
    let mut last_tick = Instant::now();
    let mut rng = rand::thread_rng();

    info!(
        "starting {}x{} grid ({} cells)",
        life.dims().cols,
        life.dims().rows,
        life.dims().cell_count
    );

    loop {
        // Check for terminal resize - uses crossterm directly to get fresh size
        if let Ok(size) = crossterm::terminal::size() {
            if size != (term_w, term_h) && pending_size.map(|(s, _)| s) != Some(size) {
                pending_size = Some((size, Instant::now()));
            }
        }
        if let Some(((w, h), since)) = pending_size {
            if since.elapsed() >= RESIZE_DEBOUNCE {
                pending_size = None;
                term_w = w;
                term_h = h;
                term.resize(w, h);
                term.clear_screen()?;
                life.resize_viewport(w, grid_height(h));
                debug!("viewport now {w}x{h}");
            }
        }

        let mut painted = Vec::new();
        let until_tick = Duration::from_secs_f32(state.speed).saturating_sub(last_tick.elapsed());
        if let Some(event) = term.poll_event(until_tick.min(MAX_POLL))? {
            match event {
                Event::Key(key) => {
                    if presets.handle_key(key.code) {
                        life.set_palette(Palette::new(presets.colors()));
                        debug!("palette preset {}", presets.name());
                    } else if let Some(command) = command_for(key.code, key.modifiers) {
                        if command == Command::Quit {
                            break;
                        }
                        if command == Command::ToggleHelp && state.show_help {
                            // Closing the overlay uncovers cells
                            state.handle(command);
                            term.clear();
                            draw_all(term, &life, config.draw_char);
                            term.render()?;
                        } else if !state.handle(command) {
                            apply(&mut life, command, &mut trend, &mut rng);
                        }
                    }
                }
                Event::Mouse(mouse) => {
                    painted = handle_mouse(&mut life, mouse, grid_height(term_h));
                }
                _ => {}
            }
        }

        let mut rects = Vec::new();
        if state.due(last_tick.elapsed().as_secs_f32()) {
            last_tick = Instant::now();
            life.advance();
            trend.push(life.stats().alive);
            rects.extend(life.changes().map(|view| draw_cell(term, life.dims(), &view, config.draw_char)));
        }
        rects.extend(
            painted
                .iter()
                .filter_map(|&i| life.cell_view(i))
                .map(|view| draw_cell(term, life.dims(), &view, config.draw_char)),
        );

        let full = life.take_full_redraw();
        if full {
            term.clear();
            draw_all(term, &life, config.draw_char);
        }

        draw_status(term, &life.stats(), &life, &trend, presets.name(), state.paused);
        rects.push(Rect { x: 0, y: term_h.saturating_sub(1), width: term_w, height: 1 });

        if state.show_help {
            rects.extend(render_help_overlay(term, HELP_TEXT));
        }

        if full {
            term.render()?;
        } else {
            term.render_rects(&rects)?;
        }
    }

    Ok(())
}

/// Rows available to the grid; the bottom row is the status line
fn grid_height(term_h: u16) -> u16 {
    term_h.saturating_sub(1)
}

/// Apply an engine command
fn apply<R: Rng>(life: &mut Life, command: Command, trend: &mut PopulationTrend, rng: &mut R) {
    match command {
        Command::Tool(tool) => life.paint_state_mut().tool = tool,
        Command::Brush(delta) => {
            life.paint_state_mut().change_brush(delta);
        }
        Command::PenColor => {
            let next = next_pen_color(life.colors().palette(), life.paint_state().pen_color);
            life.paint_state_mut().pen_color = next;
        }
        Command::CellSize(delta) => {
            if life.change_cell_size(delta) {
                trend.clear();
            }
        }
        Command::Spacing(delta) => {
            life.change_spacing(delta);
        }
        Command::GridLines => {
            life.toggle_grid_lines();
        }
        Command::Corpses => life.toggle_corpses(),
        Command::Edge => {
            let next = match life.edge() {
                EdgePolicy::Flat => EdgePolicy::Bounded,
                EdgePolicy::Bounded => EdgePolicy::Toroidal,
                EdgePolicy::Toroidal => EdgePolicy::Flat,
            };
            life.set_edge(next);
        }
        Command::Randomness(delta) => {
            let bias = (life.randomness() as i32 + delta).clamp(0, 100) as u8;
            life.set_randomness(bias);
        }
        Command::Reset => {
            life.reset();
            trend.clear();
        }
        Command::Clear => life.clear(),
        Command::Recolor => life.recolor_all(),
        Command::AddColor => {
            let hex = to_hex(rng.gen::<u32>());
            if let Err(e) = life.add_palette_entry(&hex) {
                warn!("add color: {e}");
            }
        }
        Command::RemoveColor => {
            let last = life.colors().palette().len().saturating_sub(1);
            if let Err(e) = life.remove_palette_entry(last) {
                warn!("remove color: {e}");
            }
        }
        Command::Quit | Command::TogglePause | Command::Step | Command::Speed(_) | Command::ToggleHelp => {}
    }
}

/// Cycle the pen override through the palette, then back to none
fn next_pen_color(palette: &Palette, current: Option<u32>) -> Option<u32> {
    let colors = palette.colors();
    match current.and_then(|c| colors.iter().position(|&p| p == c)) {
        None if current.is_none() => colors.first().copied(),
        None => None,
        Some(i) => colors.get(i + 1).copied(),
    }
}

fn handle_mouse(life: &mut Life, mouse: MouseEvent, grid_h: u16) -> Vec<usize> {
    if mouse.row >= grid_h {
        return Vec::new();
    }
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
            life.paint_at(mouse.column, mouse.row)
        }
        MouseEventKind::Down(MouseButton::Right) | MouseEventKind::Drag(MouseButton::Right) => {
            let brush = life.paint_state().brush_size();
            life.paint(mouse.column, mouse.row, brush, Tool::Eraser, None)
        }
        _ => Vec::new(),
    }
}

fn draw_all(term: &mut Terminal, life: &Life, draw_char: char) {
    for view in life.snapshot() {
        draw_cell(term, life.dims(), &view, draw_char);
    }
}

/// Draw one cell into the back buffer and return the area it covers
pub fn draw_cell(term: &mut Terminal, dims: &GridDimensions, view: &CellView, draw_char: char) -> Rect {
    let (x, y) = dims.origin_of(view.index);
    let size = dims.cell_size_px;
    let fill = size - dims.spacing_px;
    let limit = dims.height_px;
    for dy in 0..size {
        let py = y.saturating_add(dy);
        if py >= limit {
            break;
        }
        for dx in 0..size {
            let px = x.saturating_add(dx) as i32;
            let (ch, fg) = if dx < fill && dy < fill {
                match view.color {
                    Some(c) => (draw_char, Some(to_color(c))),
                    None => (' ', None),
                }
            } else if dims.grid_lines {
                ('·', Some(Color::DarkGrey))
            } else {
                (' ', None)
            };
            term.set(px, py as i32, ch, fg, false);
        }
    }
    Rect { x, y, width: size, height: size.min(limit.saturating_sub(y)) }
}

fn draw_status(
    term: &mut Terminal,
    stats: &Stats,
    life: &Life,
    trend: &PopulationTrend,
    preset: &str,
    paused: bool,
) {
    let (w, h) = term.size();
    if h == 0 {
        return;
    }
    let y = h as i32 - 1;
    let paint = life.paint_state();
    let pen = paint.pen_color.map(to_hex).unwrap_or_else(|| "cell".into());
    let line = format!(
        " gen {} | alive {} dead {} | {}x{} cell {} | {} {} pen {} | edge {:?} | bias {} | {} {}{} | ? help",
        stats.generation,
        stats.alive,
        stats.dead,
        stats.dims.cols,
        stats.dims.rows,
        stats.dims.cell_size_px,
        paint.tool.label(),
        paint.brush_size(),
        pen,
        life.edge(),
        life.randomness(),
        preset,
        trend.sparkline(),
        if paused { " | PAUSED" } else { "" },
    );
    for x in 0..w as i32 {
        term.set(x, y, ' ', None, false);
    }
    term.set_str(0, y, &line, Some(Color::Grey), false);
}

struct MouseCaptureGuard;

impl MouseCaptureGuard {
    fn enable() -> io::Result<Self> {
        let mut stdout = io::stdout();
        execute!(stdout, EnableMouseCapture)?;
        Ok(Self)
    }
}

impl Drop for MouseCaptureGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, DisableMouseCapture);
    }
}
