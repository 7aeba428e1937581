//! Scoped raw-mode handling
//!
//! Raw mode is process-wide terminal state. It is never held for the lifetime
//! of a session: every read takes a [`RawModeGuard`], which switches raw mode
//! on if needed and puts the terminal back the way it found it on drop, on
//! every return path.

use std::io;

use crossterm::terminal;
use tracing::{debug, warn};

/// Backend that can query and toggle terminal raw mode
pub trait TerminalMode {
    fn is_raw(&self) -> io::Result<bool>;
    fn set_raw(&self, enabled: bool) -> io::Result<()>;
}

/// Raw mode through crossterm (termios on Unix, console modes on Windows)
#[derive(Clone, Copy, Debug, Default)]
pub struct CrosstermMode;

impl TerminalMode for CrosstermMode {
    fn is_raw(&self) -> io::Result<bool> {
        terminal::is_raw_mode_enabled()
    }

    fn set_raw(&self, enabled: bool) -> io::Result<()> {
        if enabled {
            terminal::enable_raw_mode()
        } else {
            terminal::disable_raw_mode()
        }
    }
}

/// Enables raw mode on construction, restores the previous mode on drop
pub struct RawModeGuard<'a> {
    mode: &'a dyn TerminalMode,
    was_raw: bool,
}

impl<'a> RawModeGuard<'a> {
    pub fn acquire(mode: &'a dyn TerminalMode) -> io::Result<Self> {
        let was_raw = mode.is_raw()?;
        if !was_raw {
            mode.set_raw(true)?;
            debug!("raw mode enabled");
        }
        Ok(Self { mode, was_raw })
    }
}

impl Drop for RawModeGuard<'_> {
    fn drop(&mut self) {
        if self.was_raw {
            return;
        }
        match self.mode.set_raw(false) {
            Ok(()) => debug!("raw mode restored"),
            Err(e) => warn!("failed to restore terminal mode: {}", e),
        }
    }
}
