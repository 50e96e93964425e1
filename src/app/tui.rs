//! Terminal management system
//!
//! Handles crossterm backend initialization, raw mode and alternate screen,
//! and keyboard polling at a fixed redraw rate.

use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, Stdout},
    time::{Duration, Instant},
};

use crate::{QuizError, Result};

/// Redraw rate; fine enough for a one-second countdown
pub const DEFAULT_TICK_RATE: Duration = Duration::from_millis(250);

/// Terminal wrapper that owns the crossterm backend
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    active: bool,
    last_tick: Instant,
    tick_rate: Duration,
}

impl Tui {
    /// Create a new TUI instance with crossterm backend
    pub fn new() -> Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)
            .map_err(|e| QuizError::TuiError(format!("Failed to open terminal: {}", e)))?;

        Ok(Self {
            terminal,
            active: false,
            last_tick: Instant::now(),
            tick_rate: DEFAULT_TICK_RATE,
        })
    }

    /// Enter raw mode and the alternate screen
    pub fn init(&mut self) -> Result<()> {
        enable_raw_mode()?;
        // restore must undo raw mode even if the alternate screen fails
        self.active = true;
        execute!(io::stdout(), EnterAlternateScreen)?;
        self.terminal.hide_cursor()?;
        self.terminal.clear()?;
        Ok(())
    }

    /// Restore terminal to original state
    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Draw the UI using the provided render function
    pub fn draw<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }

    /// Wait up to the rest of the current tick for a key press
    pub fn next_key(&mut self) -> Result<Option<KeyEvent>> {
        let timeout = poll_timeout(self.tick_rate, self.last_tick.elapsed());

        let mut pressed = None;
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Windows reports releases too
                if key.kind == KeyEventKind::Press {
                    pressed = Some(key);
                }
            }
        }

        if self.last_tick.elapsed() >= self.tick_rate {
            self.last_tick = Instant::now();
        }

        Ok(pressed)
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        // Ensure terminal is restored even if restore() wasn't called
        let _ = self.restore();
    }
}

fn poll_timeout(tick_rate: Duration, elapsed: Duration) -> Duration {
    tick_rate.checked_sub(elapsed).unwrap_or(Duration::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_timeout_within_tick() {
        assert_eq!(
            poll_timeout(DEFAULT_TICK_RATE, Duration::from_millis(100)),
            Duration::from_millis(150)
        );
    }

    #[test]
    fn test_poll_timeout_after_tick() {
        assert_eq!(
            poll_timeout(DEFAULT_TICK_RATE, Duration::from_millis(400)),
            Duration::ZERO
        );
    }
}
