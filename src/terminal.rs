use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{poll, read, Event},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::io::{self, stdout, Write};
use std::time::Duration;

/// Terminal abstraction for rendering
pub struct Terminal {
    width: u16,
    height: u16,
    buffer: Vec<Vec<Cell>>,
    alternate_screen: bool,
}

/// A single cell in the terminal buffer
#[derive(Clone, PartialEq, Debug)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Color>,
    pub bold: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: None,
            bold: false,
        }
    }
}

/// Screen rectangle, used for partial redraws
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Terminal {
    /// Initialize the terminal for drawing
    pub fn new(alternate_screen: bool) -> io::Result<Self> {
        let (width, height) = size()?;

        if alternate_screen {
            enable_raw_mode()?;
            execute!(stdout(), EnterAlternateScreen, Hide)?;
        }

        Ok(Self::offscreen(width, height))
    }

    /// A buffer-only terminal of fixed size (print mode)
    pub fn offscreen(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            buffer: vec![vec![Cell::default(); width as usize]; height as usize],
            alternate_screen: false,
        }
    }

    /// Get terminal dimensions
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Reallocate the back buffer for a new size
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.buffer = vec![vec![Cell::default(); width as usize]; height as usize];
    }

    /// Clear the buffer
    pub fn clear(&mut self) {
        for row in &mut self.buffer {
            row.fill(Cell::default());
        }
    }

    /// Clear the actual terminal
    pub fn clear_screen(&self) -> io::Result<()> {
        execute!(stdout(), Clear(ClearType::All))?;
        Ok(())
    }

    /// Set a character at position with optional color
    pub fn set(&mut self, x: i32, y: i32, ch: char, fg: Option<Color>, bold: bool) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.buffer[y as usize][x as usize] = Cell { ch, fg, bold };
        }
    }

    /// Set a string starting at position
    pub fn set_str(&mut self, x: i32, y: i32, s: &str, fg: Option<Color>, bold: bool) {
        for (i, ch) in s.chars().enumerate() {
            self.set(x + i as i32, y, ch, fg, bold);
        }
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.buffer.get(y as usize)?.get(x as usize)
    }

    /// Render the entire buffer to screen
    pub fn render(&self) -> io::Result<()> {
        self.render_rects(&[Rect { x: 0, y: 0, width: self.width, height: self.height }])
    }

    /// Render only the given regions of the buffer
    pub fn render_rects(&self, rects: &[Rect]) -> io::Result<()> {
        let mut out = stdout().lock();
        for rect in rects {
            let x_end = rect.x.saturating_add(rect.width).min(self.width);
            let y_end = rect.y.saturating_add(rect.height).min(self.height);
            if rect.x >= x_end {
                continue;
            }
            for y in rect.y..y_end {
                queue!(out, MoveTo(rect.x, y))?;
                for cell in &self.buffer[y as usize][rect.x as usize..x_end as usize] {
                    queue_cell(&mut out, cell)?;
                }
            }
        }
        out.flush()
    }

    /// Wait up to `timeout` for an input event
    pub fn poll_event(&self, timeout: Duration) -> io::Result<Option<Event>> {
        if poll(timeout)? {
            return Ok(Some(read()?));
        }
        Ok(None)
    }

    /// Write the buffer with ANSI colors (for print mode)
    pub fn write_ansi<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for row in &self.buffer {
            let end = row.iter().rposition(|c| c.ch != ' ').map_or(0, |i| i + 1);
            for cell in &row[..end] {
                if cell.ch == ' ' {
                    write!(out, " ")?;
                    continue;
                }
                if cell.bold {
                    write!(out, "\x1b[1m")?;
                }
                match cell.fg {
                    Some(Color::Rgb { r, g, b }) => write!(out, "\x1b[38;2;{};{};{}m", r, g, b)?,
                    Some(Color::AnsiValue(v)) => write!(out, "\x1b[38;5;{}m", v)?,
                    Some(Color::DarkGrey) => write!(out, "\x1b[90m")?,
                    Some(Color::Grey) => write!(out, "\x1b[37m")?,
                    Some(Color::White) => write!(out, "\x1b[97m")?,
                    _ => {}
                }
                write!(out, "{}\x1b[0m", cell.ch)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    pub fn print_to_stdout(&self) -> io::Result<()> {
        let mut out = stdout().lock();
        self.write_ansi(&mut out)?;
        out.flush()
    }
}

fn queue_cell<W: Write>(out: &mut W, cell: &Cell) -> io::Result<()> {
    if cell.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }

    if let Some(color) = cell.fg {
        queue!(out, SetForegroundColor(color), Print(cell.ch), ResetColor)?;
    } else {
        queue!(out, Print(cell.ch))?;
    }

    if cell.bold {
        queue!(out, SetAttribute(Attribute::Reset))?;
    }
    Ok(())
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if self.alternate_screen {
            let _ = execute!(stdout(), Show, LeaveAlternateScreen);
            let _ = disable_raw_mode();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_clips_to_bounds() {
        let mut term = Terminal::offscreen(4, 2);
        term.set(-1, 0, 'x', None, false);
        term.set(4, 1, 'x', None, false);
        term.set(3, 1, 'y', None, false);
        assert_eq!(term.get(3, 1).map(|c| c.ch), Some('y'));
        assert_eq!(term.get(4, 1), None);
    }

    #[test]
    fn write_ansi_trims_and_colors() {
        let mut term = Terminal::offscreen(5, 2);
        term.set(1, 0, '#', Some(Color::Rgb { r: 1, g: 2, b: 3 }), false);
        let mut out = Vec::new();
        term.write_ansi(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, " \x1b[38;2;1;2;3m#\x1b[0m\n\n");
    }

    #[test]
    fn resize_reallocates() {
        let mut term = Terminal::offscreen(2, 2);
        term.resize(6, 3);
        assert_eq!(term.size(), (6, 3));
        assert!(term.get(5, 2).is_some());
    }
}
