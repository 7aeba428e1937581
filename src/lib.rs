//! skiff - inline terminal prompts
//!
//! skiff draws small interactive prompts directly in the terminal, below the
//! current output, without taking over the screen.
//!
//! # Features
//!
//! - **Selection lists**: scrollable view over any number of items
//! - **Fuzzy search**: `/` re-ranks every item against a live query
//! - **Confirmations**: `[y/n]` questions with an optional default
//! - **Configurable keys**: every binding is a set of key names
//! - **Themes**: swappable line renderers and color palettes
//!
//! # Example
//!
//! ```no_run
//! use skiff::{ListConfig, ListPrompt, TerminalSession};
//!
//! let mut session = TerminalSession::stdio();
//! let mut prompt = ListPrompt::new(ListConfig::default());
//! let index = prompt.prompt(&mut session, &["apple", "banana", "cherry"])?;
//! println!("picked {}", index);
//! # Ok::<(), skiff::PromptError>(())
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod rank;
pub mod text;
pub mod ui;

pub use crate::config::{Config, ConfirmConfig, ListConfig, ListKeys};
pub use crate::core::{CursorPos, KeyEvent, NamedKey, TerminalSession};
pub use crate::error::{PromptError, Result};
pub use crate::rank::{FuzzyRanker, Ranker};
pub use crate::text::TextInput;
pub use crate::ui::{ConfirmPrompt, ListPrompt, Palette, Theme};
