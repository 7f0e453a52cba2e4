use crate::terminal::{Rect, Terminal};
use crossterm::style::Color;

/// Draw a centered help box into the back buffer. Returns the area it
/// covers so the caller can redraw just that region.
pub fn render_help_overlay(term: &mut Terminal, help_text: &str) -> Option<Rect> {
    if help_text.is_empty() {
        return None;
    }

    let (width, height) = term.size();
    let lines: Vec<&str> = help_text.lines().collect();
    let max_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let box_width = max_width + 4; // 2 chars padding each side
    let box_height = lines.len() + 2;

    let start_x = (width as usize).saturating_sub(box_width) / 2;
    let start_y = (height as usize).saturating_sub(box_height) / 2;
    let (x0, y0) = (start_x as i32, start_y as i32);
    let (x1, y1) = ((start_x + box_width - 1) as i32, (start_y + box_height - 1) as i32);

    let border = Some(Color::White);
    let text = Some(Color::Grey);

    let horizontal = "─".repeat(box_width - 2);
    term.set(x0, y0, '┌', border, false);
    term.set_str(x0 + 1, y0, &horizontal, border, false);
    term.set(x1, y0, '┐', border, false);

    for (i, line) in lines.iter().enumerate() {
        let y = y0 + 1 + i as i32;
        let padding = max_width.saturating_sub(line.chars().count());
        term.set(x0, y, '│', border, false);
        term.set_str(x0 + 1, y, &format!(" {}{} ", line, " ".repeat(padding)), text, false);
        term.set(x1, y, '│', border, false);
    }

    term.set(x0, y1, '└', border, false);
    term.set_str(x0 + 1, y1, &horizontal, border, false);
    term.set(x1, y1, '┘', border, false);

    Some(Rect {
        x: start_x as u16,
        y: start_y as u16,
        width: box_width as u16,
        height: box_height as u16,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_is_centered() {
        let mut term = Terminal::offscreen(20, 10);
        let rect = render_help_overlay(&mut term, "ab\ncdef").unwrap();
        assert_eq!(rect, Rect { x: 6, y: 3, width: 8, height: 4 });
        assert_eq!(term.get(6, 3).map(|c| c.ch), Some('┌'));
        assert_eq!(term.get(8, 4).map(|c| c.ch), Some('a'));
        assert_eq!(term.get(13, 6).map(|c| c.ch), Some('┘'));
    }

    #[test]
    fn empty_text_draws_nothing() {
        let mut term = Terminal::offscreen(20, 10);
        assert!(render_help_overlay(&mut term, "").is_none());
    }
}
