//! Terminal drawing surface and message overlay.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use crate::session::GameSession;

pub const CELL_W: usize = 2;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Glyph {
    Player,
    Exit,
    Wall,
    Open,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Cell {
    pub glyph: Glyph,
    pub color: Color,
}

pub struct Renderer {
    last: Vec<Cell>,
    last_hud: String,
    message: Option<String>,
    last_message: Option<String>,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            last: vec![
                Cell {
                    glyph: Glyph::Open,
                    color: Color::Reset,
                };
                width * height
            ],
            last_hud: String::new(),
            message: None,
            last_message: None,
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }

    /// Shows `text` under the maze until dismissed or replaced.
    pub fn notify(&mut self, text: String) {
        self.message = Some(text);
    }

    pub fn dismiss(&mut self) {
        self.message = None;
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Draws what changed since the last call on a `term_w` x `term_h` screen.
    pub fn render<W: Write, S>(
        &mut self,
        out: &mut W,
        session: &GameSession<S>,
        (term_w, term_h): (u16, u16),
    ) -> io::Result<()> {
        let grid = session.grid();
        let (width, height) = (grid.width(), grid.height());
        if self.last.len() != width * height {
            *self = Self {
                message: self.message.take(),
                ..Self::new(width, height)
            };
        }
        let needed_h = (height + 3) as u16;
        let needed_w = (width * CELL_W) as u16;

        out.queue(MoveTo(0, 0))?;

        if term_w < needed_w || term_h < needed_h {
            out.queue(Clear(ClearType::All))?;
            let msg = format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                needed_w, needed_h, term_w, term_h
            );
            out.queue(Print(msg))?;
            out.flush()?;
            self.needs_full = true;
            return Ok(());
        }

        let origin_x = (term_w - needed_w) / 2;
        let origin_y = (term_h - needed_h) / 2 + 1;
        if origin_x != self.origin_x || origin_y != self.origin_y {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.needs_full = true;
        }
        if self.needs_full {
            out.queue(Clear(ClearType::All))?;
        }

        let hud = format!(
            "Level: {}/{}  (arrows or hjkl to move, q to quit)",
            session.level(),
            session.max_level()
        );
        if self.needs_full || hud != self.last_hud {
            out.queue(MoveTo(self.origin_x, self.origin_y - 1))?;
            out.queue(SetForegroundColor(Color::White))?;
            out.queue(Clear(ClearType::CurrentLine))?;
            out.queue(Print(&hud))?;
            out.queue(ResetColor)?;
            self.last_hud = hud;
        }

        for y in 0..height {
            for x in 0..width {
                let cell = cell_for(session, x, y);
                let idx = y * width + x;
                if self.needs_full || cell != self.last[idx] {
                    self.last[idx] = cell;
                    self.draw_cell(out, x, y, cell)?;
                }
            }
        }

        if self.needs_full || self.message != self.last_message {
            out.queue(MoveTo(self.origin_x, self.origin_y + height as u16 + 1))?;
            out.queue(Clear(ClearType::CurrentLine))?;
            if let Some(message) = &self.message {
                out.queue(SetForegroundColor(Color::Yellow))?;
                out.queue(Print(format!("{message}  [Enter to close]")))?;
                out.queue(ResetColor)?;
            }
            self.last_message = self.message.clone();
        }
        self.needs_full = false;

        out.flush()
    }

    fn draw_cell<W: Write>(&self, out: &mut W, x: usize, y: usize, cell: Cell) -> io::Result<()> {
        let text = match cell.glyph {
            Glyph::Player => "😃",
            Glyph::Exit => "🚪",
            Glyph::Wall => "██",
            Glyph::Open => "· ",
        };
        out.queue(MoveTo(
            self.origin_x + (x * CELL_W) as u16,
            self.origin_y + y as u16,
        ))?;
        out.queue(SetForegroundColor(cell.color))?;
        out.queue(Print(text))?;
        let pad = CELL_W.saturating_sub(UnicodeWidthStr::width(text));
        if pad > 0 {
            out.queue(Print(" ".repeat(pad)))?;
        }
        out.queue(ResetColor)?;
        Ok(())
    }
}

/// Final banner after the last level; the caller waits for `q`.
pub fn render_finished<W: Write, S>(
    out: &mut W,
    session: &GameSession<S>,
    text: &str,
    (term_w, term_h): (u16, u16),
) -> io::Result<()> {
    let grid = session.grid();
    let needed_h = (grid.height() + 3) as u16;
    let needed_w = (grid.width() * CELL_W) as u16;
    let row = if term_w < needed_w || term_h < needed_h {
        MoveTo(0, needed_h)
    } else {
        MoveTo(
            (term_w - needed_w) / 2,
            (term_h - needed_h) / 2 + 1 + grid.height() as u16 + 1,
        )
    };
    out.queue(row)?;
    out.queue(Clear(ClearType::CurrentLine))?;
    out.queue(SetForegroundColor(Color::Green))?;
    out.queue(Print(format!("{text} (press q to quit)")))?;
    out.queue(ResetColor)?;
    out.flush()
}

/// What to draw at grid cell (x, y). Player wins over exit, exit over terrain.
pub fn cell_for<S>(session: &GameSession<S>, x: usize, y: usize) -> Cell {
    let step = session.config().cell_step;
    let here = Some((x, y));
    if session.player().to_cell(step) == here {
        return Cell {
            glyph: Glyph::Player,
            color: Color::Blue,
        };
    }
    if session.exit().to_cell(step) == here {
        return Cell {
            glyph: Glyph::Exit,
            color: Color::Yellow,
        };
    }
    if session.grid().is_open(x, y) {
        Cell {
            glyph: Glyph::Open,
            color: Color::DarkGrey,
        }
    } else {
        Cell {
            glyph: Glyph::Wall,
            color: Color::Grey,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Direction;
    use crate::config::GameConfig;
    use crate::maze::test_support::FirstChoice;

    fn session() -> GameSession<FirstChoice> {
        GameSession::new(GameConfig::with_grid(7, 5, 20), FirstChoice).unwrap()
    }

    #[test]
    fn cells_follow_session_state() {
        let mut session = session();
        assert_eq!(cell_for(&session, 1, 1).glyph, Glyph::Player);
        assert_eq!(cell_for(&session, 5, 3).glyph, Glyph::Exit);
        assert_eq!(cell_for(&session, 0, 0).glyph, Glyph::Wall);
        assert_eq!(cell_for(&session, 2, 1).glyph, Glyph::Open);

        session.attempt_move(Direction::Right);
        assert_eq!(cell_for(&session, 1, 1).glyph, Glyph::Open);
        assert_eq!(cell_for(&session, 2, 1).glyph, Glyph::Player);
    }

    fn frame(renderer: &mut Renderer, session: &GameSession<FirstChoice>) -> String {
        let mut out = Vec::new();
        renderer.render(&mut out, session, (80, 24)).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn message_line_follows_notify_and_dismiss() {
        let mut session = session();
        let mut renderer = Renderer::new(7, 5);
        assert!(!frame(&mut renderer, &session).contains("Enter to close"));

        renderer.notify("You won level 1!".to_string());
        assert!(frame(&mut renderer, &session).contains("You won level 1!"));

        // A partial redraw after a move keeps the line untouched.
        session.attempt_move(Direction::Right);
        let partial = frame(&mut renderer, &session);
        assert!(partial.contains("😃"));
        assert!(!partial.contains("You won level 1!"));
        assert_eq!(renderer.message(), Some("You won level 1!"));

        renderer.notify("You won level 2!".to_string());
        assert!(frame(&mut renderer, &session).contains("You won level 2!"));

        renderer.dismiss();
        let cleared = frame(&mut renderer, &session);
        assert!(!cleared.contains("You won"));
        assert!(!cleared.is_empty());
    }

    #[test]
    fn small_terminal_gets_a_warning() {
        let session = session();
        let mut renderer = Renderer::new(7, 5);
        let mut out = Vec::new();
        renderer.render(&mut out, &session, (10, 4)).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("Terminal too small"));
    }

    #[test]
    fn notify_and_dismiss() {
        let mut renderer = Renderer::new(7, 5);
        assert_eq!(renderer.message(), None);
        renderer.notify("You won level 1!".to_string());
        assert_eq!(renderer.message(), Some("You won level 1!"));
        renderer.dismiss();
        assert_eq!(renderer.message(), None);
    }
}
