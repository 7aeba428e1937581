//! Yes/no confirmation prompt
//!
//! Draws `<label> [y/n]: <answer>` on one line and redraws that line in place
//! as the answer is edited. The caret column comes from a cursor position
//! query after the label and the text before the caret are written.

use std::io::{Read, Write};

use crossterm::style::{Attribute, SetAttribute};
use crossterm::terminal::{Clear, ClearType};
use tracing::{debug, info};

use crate::config::ConfirmConfig;
use crate::core::raw::TerminalMode;
use crate::core::session::TerminalSession;
use crate::error::{PromptError, Result};
use crate::text::TextInput;
use crate::ui::theme::{LabelRenderer, Theme};

/// Interactive yes/no prompt
pub struct ConfirmPrompt {
    config: ConfirmConfig,
    label_renderer: Box<dyn LabelRenderer>,
    theme: Theme,
    text: TextInput,
    /// Screen row of the prompt line
    row: u16,
}

impl ConfirmPrompt {
    pub fn new(config: ConfirmConfig) -> Self {
        Self {
            config,
            label_renderer: Box::new(Theme::default()),
            theme: Theme::default(),
            text: TextInput::new(),
            row: 0,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.label_renderer = Box::new(theme);
        self.theme = theme;
        self
    }

    pub fn with_label_renderer(mut self, renderer: impl LabelRenderer + 'static) -> Self {
        self.label_renderer = Box::new(renderer);
        self
    }

    pub fn config(&self) -> &ConfirmConfig {
        &self.config
    }

    pub fn reset(&mut self) {
        self.text.reset();
    }

    /// Ask the question and block until it is answered
    pub fn prompt<R, W, M>(&mut self, session: &mut TerminalSession<R, W, M>) -> Result<bool>
    where
        R: Read,
        W: Write,
        M: TerminalMode,
    {
        info!(label = %self.config.label, "confirm prompt started");
        self.text.reset();

        let result = self.run(session);

        // Leave the cursor on a fresh line whatever happened
        let _ = session.queue(SetAttribute(Attribute::Reset));
        let _ = session.print("\n");
        let _ = session.flush();

        match &result {
            Ok(answer) => info!(answer, "confirm prompt answered"),
            Err(e) => info!("confirm prompt ended: {}", e),
        }
        result
    }

    fn run<R: Read, W: Write, M: TerminalMode>(
        &mut self,
        session: &mut TerminalSession<R, W, M>,
    ) -> Result<bool> {
        self.draw(session, true)?;
        loop {
            let key = session.read_key()?;
            if key.matches(&self.config.abort_keys) {
                return Err(PromptError::UserAborted);
            }
            if key.matches(&self.config.select_keys) {
                if let Some(answer) = self.resolve(&self.text.value()) {
                    return Ok(answer);
                }
                debug!(answer = %self.text.value(), "invalid confirm answer");
                session.queue(SetAttribute(Attribute::Reset))?;
                session.print_fmt(format_args!("\n{}\n", self.theme.error("Invalid input")))?;
                self.text.reset();
                self.draw(session, true)?;
                continue;
            }
            self.text.apply(&key);
            self.draw(session, false)?;
        }
    }

    /// Write the prompt line and park the cursor at the caret
    fn draw<R: Read, W: Write, M: TerminalMode>(
        &mut self,
        session: &mut TerminalSession<R, W, M>,
        initial: bool,
    ) -> Result<()> {
        if !initial {
            session.set_pos(self.row, 1)?;
            session.queue(Clear(ClearType::CurrentLine))?;
        }
        let label = self.label_renderer.render_label(&self.config);
        session.queue(SetAttribute(Attribute::Reset))?;
        session.print_fmt(format_args!("{}", label))?;
        session.queue(SetAttribute(Attribute::Reset))?;
        session.print(&self.text.before())?;

        let caret = session.get_pos()?;
        self.row = caret.row;

        session.print(&self.text.after())?;
        session.set_pos(caret.row, caret.col)?;
        session.flush()
    }

    /// Map a typed answer to yes/no, or `None` if it must be asked again
    pub fn resolve(&self, answer: &str) -> Option<bool> {
        if self.same(answer, &self.config.true_option) {
            Some(true)
        } else if self.same(answer, &self.config.false_option) {
            Some(false)
        } else if self.config.allow_default {
            Some(self.config.default_value)
        } else {
            None
        }
    }

    fn same(&self, answer: &str, option: &str) -> bool {
        if self.config.case_sensitive {
            answer == option
        } else {
            answer.to_lowercase() == option.to_lowercase()
        }
    }
}
