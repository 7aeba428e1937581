//! Interactive prompts and how they are drawn.
//!
//! - **list**: scrollable, fuzzy-searchable selection list
//! - **confirm**: yes/no question
//! - **theme**: line renderer capabilities, default theme and palettes
//!
//! Both prompts draw inline, below whatever is already on screen, and
//! redraw their block in place using absolute cursor moves to rows learned
//! from cursor position queries.

pub mod confirm;
pub mod list;
pub mod theme;

pub use confirm::ConfirmPrompt;
pub use list::{ListPrompt, ListState, Mode, Step};
pub use theme::{InfoRenderer, ItemRenderer, LabelRenderer, Palette, SearchRenderer, Theme};
