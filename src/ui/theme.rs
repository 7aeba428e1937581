//! Line renderers and color palettes.
//!
//! Each line a prompt draws comes from a renderer capability. [`Theme`]
//! implements all of them; a prompt can swap any single one out at
//! construction (`ListPrompt::with_item_renderer`, ...). Plain closures with
//! the right signature work as item, info and label renderers.
//!
//! # Available Palettes
//!
//! - `default` - Terminal default foreground, grey for muted text
//! - `solarized-dark` - Ethan Schoonover's Solarized
//! - `nord` - Arctic, bluish color palette
//! - `gruvbox-dark` - Retro groove colors

use crossterm::style::{style, Color, Stylize};

use crate::config::{ConfirmConfig, ListConfig};
use crate::core::keys::key_symbol;

/// Renders one item line of the list
pub trait ItemRenderer {
    fn render_item(&self, item: &str, selected: bool, config: &ListConfig) -> String;
}

/// Renders the info line shown above the list while browsing
pub trait InfoRenderer {
    /// `position` is 1-based
    fn render_info(&self, position: usize, total: usize, config: &ListConfig) -> String;
}

/// Renders the text around the search input while searching
pub trait SearchRenderer {
    fn render_prefix(&self, config: &ListConfig) -> String;
    fn render_suffix(&self, config: &ListConfig) -> String;
}

/// Renders the question of the confirm prompt
pub trait LabelRenderer {
    fn render_label(&self, config: &ConfirmConfig) -> String;
}

impl<F> ItemRenderer for F
where
    F: Fn(&str, bool, &ListConfig) -> String,
{
    fn render_item(&self, item: &str, selected: bool, config: &ListConfig) -> String {
        self(item, selected, config)
    }
}

impl<F> InfoRenderer for F
where
    F: Fn(usize, usize, &ListConfig) -> String,
{
    fn render_info(&self, position: usize, total: usize, config: &ListConfig) -> String {
        self(position, total, config)
    }
}

impl<F> LabelRenderer for F
where
    F: Fn(&ConfirmConfig) -> String,
{
    fn render_label(&self, config: &ConfirmConfig) -> String {
        self(config)
    }
}

/// Colors used by the default renderers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Unselected items, help text
    pub muted: Color,
    /// The selected item
    pub emphasis: Color,
    /// Highlighted default answer
    pub success: Color,
    /// Error messages
    pub error: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self::default_scheme()
    }
}

impl Palette {
    /// Default palette
    pub fn default_scheme() -> Self {
        Self {
            muted: Color::DarkGrey,
            emphasis: Color::Reset,
            success: Color::Green,
            error: Color::Red,
        }
    }

    /// Solarized Dark palette
    pub fn solarized_dark() -> Self {
        Self {
            muted: Color::Rgb { r: 88, g: 110, b: 117 },
            emphasis: Color::Rgb { r: 38, g: 139, b: 210 },
            success: Color::Rgb { r: 133, g: 153, b: 0 },
            error: Color::Rgb { r: 220, g: 50, b: 47 },
        }
    }

    /// Nord palette
    pub fn nord() -> Self {
        Self {
            muted: Color::Rgb { r: 76, g: 86, b: 106 },
            emphasis: Color::Rgb { r: 136, g: 192, b: 208 },
            success: Color::Rgb { r: 163, g: 190, b: 140 },
            error: Color::Rgb { r: 191, g: 97, b: 106 },
        }
    }

    /// Gruvbox Dark palette
    pub fn gruvbox_dark() -> Self {
        Self {
            muted: Color::Rgb { r: 146, g: 131, b: 116 },
            emphasis: Color::Rgb { r: 215, g: 153, b: 33 },
            success: Color::Rgb { r: 152, g: 151, b: 26 },
            error: Color::Rgb { r: 204, g: 36, b: 29 },
        }
    }

    /// Get palette by name
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "solarized-dark" | "solarized_dark" => Self::solarized_dark(),
            "nord" => Self::nord(),
            "gruvbox-dark" | "gruvbox_dark" | "gruvbox" => Self::gruvbox_dark(),
            _ => Self::default_scheme(),
        }
    }

    /// List available palettes
    pub fn list() -> Vec<&'static str> {
        vec!["default", "solarized-dark", "nord", "gruvbox-dark"]
    }
}

/// Default renderers for every prompt line
#[derive(Debug, Clone, Copy, Default)]
pub struct Theme {
    pub palette: Palette,
}

impl Theme {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    /// Style text as an error message
    pub fn error(&self, text: &str) -> String {
        style(text).with(self.palette.error).to_string()
    }
}

/// Concatenated display symbols for a set of binding names
fn symbols(keys: &[String]) -> String {
    keys.iter().map(|k| key_symbol(k)).collect()
}

impl ItemRenderer for Theme {
    fn render_item(&self, item: &str, selected: bool, _config: &ListConfig) -> String {
        if selected {
            style(format!("  > {}", item))
                .with(self.palette.emphasis)
                .to_string()
        } else {
            style(format!("    {}", item))
                .with(self.palette.muted)
                .to_string()
        }
    }
}

impl InfoRenderer for Theme {
    fn render_info(&self, position: usize, total: usize, config: &ListConfig) -> String {
        let keys = &config.keys;
        let mut help = format!(
            "{}/{} | up:{} | down:{}",
            position,
            total,
            symbols(&keys.up),
            symbols(&keys.down)
        );
        if config.allow_search {
            help.push_str(&format!(" | search:{}", symbols(&keys.search)));
        }
        help.push_str(&format!(" | select:{} |", symbols(&keys.select)));
        style(help).with(self.palette.muted).to_string()
    }
}

impl SearchRenderer for Theme {
    fn render_prefix(&self, _config: &ListConfig) -> String {
        style("Search: ").with(self.palette.muted).to_string()
    }

    fn render_suffix(&self, config: &ListConfig) -> String {
        style(format!(" | exit: {} |", symbols(&config.keys.exit_search)))
            .with(self.palette.muted)
            .to_string()
    }
}

impl LabelRenderer for Theme {
    fn render_label(&self, config: &ConfirmConfig) -> String {
        let (yes, no) = (&config.true_option, &config.false_option);
        let options = if !config.allow_default {
            format!("[{}/{}]", yes, no)
        } else if config.default_value {
            format!("[{}/{}]", yes.as_str().with(self.palette.success), no)
        } else {
            format!("[{}/{}]", yes, no.as_str().with(self.palette.success))
        };
        format!("{} {}: ", config.label, options)
    }
}
