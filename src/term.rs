use crate::TermInt;
use std::{io::{Stdout, Write, stdout}, time::Instant};

use anyhow::{Context, Result};
use log::error;
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};

pub type ScreenPos = (TermInt, TermInt);

/// Owns the terminal while the game runs. Everything printed is mirrored in
/// `screen`, so cells that already show the right glyph are not re-sent.
/// Once `setup` has started, the terminal is handed back on `restore` or on drop,
/// whichever comes first.
pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    screen: Vec<char>,
    active: bool,
}

impl TermManager {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size().context("Error reading terminal size")?;
        Ok(Self::with_size(width, height))
    }

    fn with_size(width: TermInt, height: TermInt) -> Self {
        let stdout = stdout();
        let screen = vec![' '; width as usize * height as usize];
        TermManager { width, height, stdout, screen, active: false }
    }

    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn setup(&mut self) -> Result<()> {
        // Set first so a failure halfway through still gets undone
        self.active = true;
        execute!(self.stdout, EnterAlternateScreen).context("Error entering alt screen")?;
        terminal::enable_raw_mode().context("Error setting raw mode")?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)
            .context("Error hiding cursor")?;
        self.clear()
    }

    /// Undoes `setup`. A no-op if the terminal was never taken or is already back.
    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        terminal::disable_raw_mode().context("Error unsetting raw mode")?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
            .context("Error leaving alt screen")?;
        Ok(())
    }

    /// Collects every key event that arrives before `deadline`.
    pub fn read_key_events_until(&self, deadline: Instant) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        loop {
            let now = Instant::now();
            if now >= deadline || !poll(deadline - now)? {
                break;
            }
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
        }

        Ok(events)
    }

    pub fn get_terminal_size(&self) -> ScreenPos {
        (self.width, self.height)
    }

    /// Frames the rectangle whose corners are `top_left` and `bottom_right`.
    pub fn draw_borders(&mut self, top_left: ScreenPos, bottom_right: ScreenPos) -> Result<()> {
        let (x0, y0) = top_left;
        let (x1, y1) = bottom_right;

        for x in x0..=x1 {
            let ch = if x == x0 || x == x1 {'+'} else {'-'};
            self.print_at((x, y0), ch)?;
            self.print_at((x, y1), ch)?;
        }

        for y in y0 + 1..y1 {
            self.print_at((x0, y), '|')?;
            self.print_at((x1, y), '|')?;
        }

        Ok(())
    }

    pub fn print_str_at(&mut self, pos: ScreenPos, text: &str) -> Result<()> {
        for (i, ch) in text.chars().enumerate() {
            self.print_at((pos.0 + i as TermInt, pos.1), ch)?;
        }
        Ok(())
    }

    pub fn print_at(&mut self, pos: ScreenPos, ch: char) -> Result<()> {
        if pos.0 >= self.width || pos.1 >= self.height {
            return Ok(());
        }

        let idx = self.width as usize * pos.1 as usize + pos.0 as usize;
        if self.screen[idx] != ch {
            queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))?;
            self.screen[idx] = ch;
        }
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All)).context("Error clearing")?;
        self.screen = vec![' '; self.width as usize * self.height as usize];
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush().context("Error flushing")
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            error!("{:#}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restore_without_setup_leaves_terminal_alone() {
        let mut term = TermManager::with_size(80, 24);
        assert!(!term.is_active());

        term.restore().unwrap();
        term.restore().unwrap();
        assert!(!term.is_active());
        assert_eq!(term.get_terminal_size(), (80, 24));
    }

    #[test]
    fn dropping_an_untouched_manager_is_quiet() {
        let term = TermManager::with_size(10, 5);
        drop(term);
    }
}
