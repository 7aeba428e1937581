//! Terminal session
//!
//! Owns the input and output streams of the terminal a prompt draws on.
//! Output is written as-is: the session does no cursor bookkeeping, callers
//! know where their output lands or ask with [`TerminalSession::get_pos`].
//!
//! Input is shared between two kinds of reads that must never overlap:
//! key reads (one raw read of up to [`KEY_BUF_LEN`] bytes) and cursor
//! position replies (buffered, up to the `R` terminator). Key reads never
//! fill the line buffer; if a reply read left typed-ahead bytes behind, the
//! next key read drains those first.

use std::fmt;
use std::io::{self, BufRead, BufReader, Read, Write};

use crossterm::cursor::MoveTo;
use crossterm::{Command, QueueableCommand};
use tracing::debug;

use super::keys::{self, KeyEvent};
use super::raw::{CrosstermMode, RawModeGuard, TerminalMode};
use crate::error::{PromptError, Result};

/// Maximum bytes consumed by one key read
pub const KEY_BUF_LEN: usize = 8;

/// Cursor position request (DSR 6)
const CURSOR_POSITION_REQUEST: &[u8] = b"\x1b[6n";

/// Cursor position, 1-indexed like the terminal reports it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CursorPos {
    pub row: u16,
    pub col: u16,
}

impl CursorPos {
    pub const fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }
}

/// A terminal the prompts read keys from and draw on
pub struct TerminalSession<R: Read, W: Write, M: TerminalMode = CrosstermMode> {
    input: BufReader<R>,
    output: W,
    mode: M,
}

impl TerminalSession<io::Stdin, io::Stdout, CrosstermMode> {
    /// Session over the process's stdin/stdout
    pub fn stdio() -> Self {
        Self::new(io::stdin(), io::stdout(), CrosstermMode)
    }
}

impl<R: Read, W: Write, M: TerminalMode> TerminalSession<R, W, M> {
    pub fn new(input: R, output: W, mode: M) -> Self {
        Self {
            input: BufReader::new(input),
            output,
            mode,
        }
    }

    /// Write text to the terminal
    pub fn print(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Write formatted text to the terminal
    pub fn print_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        self.output.write_fmt(args)?;
        Ok(())
    }

    /// Queue a crossterm command (cursor movement, clearing, styling)
    pub fn queue(&mut self, command: impl Command) -> Result<()> {
        self.output.queue(command)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.output.flush()?;
        Ok(())
    }

    /// Move the cursor. The move is not verified.
    pub fn set_pos(&mut self, row: u16, col: u16) -> Result<()> {
        self.queue(MoveTo(col.saturating_sub(1), row.saturating_sub(1)))
    }

    /// Block until one key press is read and decoded
    pub fn read_key(&mut self) -> Result<KeyEvent> {
        let _guard = RawModeGuard::acquire(&self.mode)?;

        let mut buf = [0u8; KEY_BUF_LEN];
        let pending = self.input.buffer();
        let n = if pending.is_empty() {
            self.input.get_mut().read(&mut buf)?
        } else {
            let n = pending.len().min(KEY_BUF_LEN);
            buf[..n].copy_from_slice(&pending[..n]);
            self.input.consume(n);
            n
        };
        if n == 0 {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
        }

        let key = keys::decode(&buf[..n]);
        match &key {
            Ok(key) => debug!("key: {}", key),
            Err(_) => debug!("undecodable input: {:?}", &buf[..n]),
        }
        key
    }

    /// Ask the terminal where the cursor is
    ///
    /// Must not be called while a key read is outstanding: both are answered
    /// from the same input stream.
    pub fn get_pos(&mut self) -> Result<CursorPos> {
        let _guard = RawModeGuard::acquire(&self.mode)?;

        self.output.write_all(CURSOR_POSITION_REQUEST)?;
        self.output.flush()?;

        let mut reply = Vec::new();
        if self.input.read_until(b'R', &mut reply)? == 0 {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
        }
        parse_position_reply(&String::from_utf8_lossy(&reply))
    }

    /// Read one line of cooked input, including the trailing newline
    ///
    /// Served from the same buffer as position replies, so it must not be
    /// called while a key read or a [`get_pos`](Self::get_pos) is outstanding.
    /// Returns an empty string at end of input.
    pub fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        debug!(len = line.len(), "line read");
        Ok(line)
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn mode(&self) -> &M {
        &self.mode
    }
}

/// Parse an `ESC [ <row> ; <col> R` reply
pub fn parse_position_reply(reply: &str) -> Result<CursorPos> {
    let body = reply.strip_prefix("\x1b[").unwrap_or(reply);
    let body = body.strip_suffix('R').unwrap_or(body);

    let malformed = || PromptError::MalformedReply(body.to_string());
    let (row, col) = body.split_once(';').ok_or_else(malformed)?;
    let row = row.parse::<u16>().map_err(|_| malformed())?;
    let col = col.parse::<u16>().map_err(|_| malformed())?;
    Ok(CursorPos::new(row, col))
}
