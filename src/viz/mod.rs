//! Interactive viewer
//!
//! Keys are translated into [`Command`]s by [`command_for`]; timing state
//! lives in [`VizState`] and everything else is applied to the engine by
//! the run loop in [`life`].

pub mod life;

use crate::life::Tool;
use crossterm::event::{KeyCode, KeyModifiers};

/// Something the user asked for
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Quit,
    TogglePause,
    Step,
    Speed(f32),
    ToggleHelp,
    Tool(Tool),
    Brush(i32),
    PenColor,
    CellSize(i32),
    Spacing(i32),
    GridLines,
    Corpses,
    Edge,
    Randomness(i32),
    Reset,
    Clear,
    Recolor,
    AddColor,
    RemoveColor,
}

/// Map a keypress to a command. Shift+digit palette keys are handled
/// separately by [`crate::colors::PresetState`].
pub fn command_for(code: KeyCode, modifiers: KeyModifiers) -> Option<Command> {
    let code = normalize_key(code, modifiers);
    let command = match code {
        KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
        KeyCode::Char(' ') => Command::TogglePause,
        KeyCode::Char('s') | KeyCode::Right => Command::Step,
        KeyCode::Char('?') => Command::ToggleHelp,
        // Number keys: change speed (1=fastest, 9=slowest, 0=very slow)
        KeyCode::Char(c) if c.is_ascii_digit() => Command::Speed(match c {
            '1' => 0.005,
            '2' => 0.01,
            '3' => 0.02,
            '4' => 0.03,
            '5' => 0.05,
            '6' => 0.07,
            '7' => 0.1,
            '8' => 0.15,
            '9' => 0.2,
            _ => 0.5,
        }),
        KeyCode::Char('p') => Command::Tool(Tool::Pen),
        KeyCode::Char('e') => Command::Tool(Tool::Eraser),
        KeyCode::Char('n') => Command::Tool(Tool::None),
        KeyCode::Char('[') => Command::Brush(-1),
        KeyCode::Char(']') => Command::Brush(1),
        KeyCode::Char('o') => Command::PenColor,
        KeyCode::Char('+') | KeyCode::Char('=') => Command::CellSize(1),
        KeyCode::Char('-') | KeyCode::Char('_') => Command::CellSize(-1),
        KeyCode::Char('>') | KeyCode::Char('.') => Command::Spacing(1),
        KeyCode::Char('<') | KeyCode::Char(',') => Command::Spacing(-1),
        KeyCode::Char('g') => Command::GridLines,
        KeyCode::Char('d') => Command::Corpses,
        KeyCode::Char('w') => Command::Edge,
        KeyCode::Char('{') => Command::Randomness(-10),
        KeyCode::Char('}') => Command::Randomness(10),
        KeyCode::Char('r') => Command::Reset,
        KeyCode::Char('x') => Command::Clear,
        KeyCode::Char('c') => Command::Recolor,
        KeyCode::Char('A') => Command::AddColor,
        KeyCode::Char('X') => Command::RemoveColor,
        _ => return None,
    };
    Some(command)
}

fn normalize_key(code: KeyCode, mods: KeyModifiers) -> KeyCode {
    if code == KeyCode::Char('/') && mods.contains(KeyModifiers::SHIFT) {
        KeyCode::Char('?')
    } else {
        code
    }
}

/// Timing and overlay state of the viewer
pub struct VizState {
    pub speed: f32, // Seconds per generation
    pub paused: bool,
    pub show_help: bool,
    step_once: bool,
}

impl VizState {
    pub fn new(initial_speed: f32) -> Self {
        Self {
            speed: initial_speed.max(0.001),
            paused: false,
            show_help: false,
            step_once: false,
        }
    }

    /// Apply timing commands. Returns true if the command was consumed.
    pub fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::TogglePause => self.paused = !self.paused,
            Command::Speed(s) => self.speed = s,
            Command::ToggleHelp => self.show_help = !self.show_help,
            Command::Step => {
                self.paused = true;
                self.step_once = true;
            }
            _ => return false,
        }
        true
    }

    /// Whether a generation should run now, given the time since the last one
    pub fn due(&mut self, since_last: f32) -> bool {
        if std::mem::take(&mut self.step_once) {
            return true;
        }
        !self.paused && since_last >= self.speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_presets() {
        let mut state = VizState::new(1.0);
        let cmd = command_for(KeyCode::Char('1'), KeyModifiers::NONE).unwrap();
        assert!(state.handle(cmd));
        assert!((state.speed - 0.005).abs() < f32::EPSILON);
        let cmd = command_for(KeyCode::Char('0'), KeyModifiers::NONE).unwrap();
        state.handle(cmd);
        assert!((state.speed - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn step_pauses_and_fires_once() {
        let mut state = VizState::new(0.05);
        assert!(state.handle(Command::Step));
        assert!(state.paused);
        assert!(state.due(0.0));
        assert!(!state.due(10.0));
    }

    #[test]
    fn due_respects_speed() {
        let mut state = VizState::new(0.1);
        assert!(!state.due(0.05));
        assert!(state.due(0.1));
    }

    #[test]
    fn shifted_slash_is_help() {
        assert_eq!(command_for(KeyCode::Char('/'), KeyModifiers::SHIFT), Some(Command::ToggleHelp));
        assert_eq!(command_for(KeyCode::Char('/'), KeyModifiers::NONE), None);
    }

    #[test]
    fn engine_commands_are_not_consumed() {
        let mut state = VizState::new(0.1);
        assert!(!state.handle(Command::Reset));
        assert_eq!(command_for(KeyCode::Char('e'), KeyModifiers::NONE), Some(Command::Tool(Tool::Eraser)));
    }
}
