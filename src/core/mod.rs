//! Low-level terminal access.
//!
//! - **keys**: decoding raw input bytes into key events
//! - **raw**: scoped raw-mode guard and the backend that toggles it
//! - **session**: the terminal session prompts read from and draw on
//!
//! # Architecture
//!
//! ```text
//! TerminalSession
//! ├── BufReader<input> (key reads + cursor position replies)
//! ├── output (text + crossterm commands)
//! └── TerminalMode (raw mode, acquired per read via RawModeGuard)
//! ```

pub mod keys;
pub mod raw;
pub mod session;

pub use keys::{KeyEvent, NamedKey};
pub use raw::{CrosstermMode, RawModeGuard, TerminalMode};
pub use session::{CursorPos, TerminalSession};
