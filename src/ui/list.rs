//! Scrollable, searchable selection list
//!
//! [`ListState`] is the pure selection/scroll/search state machine;
//! [`ListPrompt`] drives it from key presses and redraws it in place on the
//! terminal.
//!
//! # Layout
//!
//! ```text
//! Select option                          <- label, written once
//! 2/5 | up:↑k | down:↓j | ... |          <- info_row: info or search line
//!     apple                              <- `size` item lines
//!   > banana
//!     cherry
//! _                                      <- region_end, where the cursor lands
//! ```
//!
//! The rows are learned once, from a cursor position query after the first
//! frame. Every redraw jumps back to `info_row` and overwrites the block.

use std::io::{Read, Write};

use crossterm::cursor::{Hide, Show};
use crossterm::style::{Attribute, SetAttribute};
use crossterm::terminal::{Clear, ClearType};
use tracing::{debug, info, warn};

use crate::config::ListConfig;
use crate::core::keys::KeyEvent;
use crate::core::raw::TerminalMode;
use crate::core::session::{CursorPos, TerminalSession};
use crate::error::{PromptError, Result};
use crate::rank::{FuzzyRanker, Ranker};
use crate::text::TextInput;
use crate::ui::theme::{InfoRenderer, ItemRenderer, SearchRenderer, Theme};

/// Input mode of the list
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Browsing,
    Searching,
}

/// Result of feeding one key to the list
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Continue,
    /// Original index of the chosen item
    Selected(usize),
    Aborted,
}

/// Selection, scroll window and search state of one prompt
#[derive(Clone, Debug)]
pub struct ListState {
    items: Vec<String>,
    /// Original item indices in display order. Searching reorders this, it
    /// never drops entries.
    results: Vec<usize>,
    /// Index into `results`
    selected: usize,
    /// First visible index into `results`. Signed: wrapping upwards seeds it
    /// below zero and the window adjustment pulls it back.
    window_start: isize,
    view_size: usize,
    mode: Mode,
    search: TextInput,
}

impl ListState {
    pub fn new(items: Vec<String>, view_size: usize) -> Self {
        let results = (0..items.len()).collect();
        Self {
            items,
            results,
            selected: 0,
            window_start: 0,
            view_size,
            mode: Mode::Browsing,
            search: TextInput::new(),
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn results(&self) -> &[usize] {
        &self.results
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn window_start(&self) -> usize {
        self.window_start.max(0) as usize
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn search(&self) -> &TextInput {
        &self.search
    }

    /// Number of rows the list occupies on screen
    pub fn size(&self) -> usize {
        self.view_size.min(self.items.len())
    }

    /// Original index of the selected item
    pub fn selected_item(&self) -> Option<usize> {
        self.results.get(self.selected).copied()
    }

    /// Visible rows as `(results index, item)`
    pub fn visible(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        let start = self.window_start();
        let end = (start + self.size()).min(self.results.len());
        (start..end).map(move |i| (i, self.items[self.results[i]].as_str()))
    }

    pub fn move_down(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected += 1;
        if self.selected >= self.items.len() {
            self.selected = 0;
            self.window_start = 0;
        }
        self.adjust_window();
    }

    pub fn move_up(&mut self) {
        if self.items.is_empty() {
            return;
        }
        if self.selected == 0 {
            self.selected = self.items.len() - 1;
            self.window_start = self.selected as isize - self.size() as isize;
        } else {
            self.selected -= 1;
        }
        self.adjust_window();
    }

    /// Scroll the window by at most one row so the selection is visible
    ///
    /// Selection never moves more than one row per key, so one step is enough.
    pub fn adjust_window(&mut self) {
        let size = self.size() as isize;
        let last = self.items.len() as isize - 1;

        let d = self.selected as isize - self.window_start;
        if d >= size {
            self.window_start += 1;
        } else if d < 0 {
            self.window_start -= 1;
        }
        self.window_start = self.window_start.max(0).min(last.max(0));
    }

    /// Switch to search mode with an empty query and the original order
    pub fn enter_search(&mut self, ranker: &dyn Ranker) {
        self.mode = Mode::Searching;
        self.search.reset();
        self.selected = 0;
        self.window_start = 0;
        self.rerank(ranker);
    }

    /// Leave search mode, keeping the current order and selection
    pub fn exit_search(&mut self) {
        self.mode = Mode::Browsing;
    }

    /// Feed an editing key to the query, re-ranking if the query changed
    pub fn edit_search(&mut self, key: &KeyEvent, ranker: &dyn Ranker) {
        if self.search.apply(key) {
            self.rerank(ranker);
        }
    }

    /// Reorder `results` by descending score for the current query
    ///
    /// The sort is unstable: items with equal scores have no guaranteed
    /// relative order, and it may differ between identical queries. An empty
    /// query restores the original order.
    fn rerank(&mut self, ranker: &dyn Ranker) {
        let query = self.search.value();
        if query.is_empty() {
            self.results = (0..self.items.len()).collect();
            return;
        }

        let scores = ranker.rank(&query, &self.items);
        let score = |i: usize| scores.get(i).copied().unwrap_or(0);
        self.results.sort_unstable_by(|&a, &b| score(b).cmp(&score(a)));
        debug!(query = %query, best = ?self.results.first(), "re-ranked");
    }

    /// Back to the initial browsing state, keeping the items
    pub fn reset(&mut self) {
        self.mode = Mode::Browsing;
        self.search.reset();
        self.selected = 0;
        self.window_start = 0;
        self.results = (0..self.items.len()).collect();
    }
}

/// Interactive list prompt
pub struct ListPrompt {
    config: ListConfig,
    ranker: Box<dyn Ranker>,
    item_renderer: Box<dyn ItemRenderer>,
    info_renderer: Box<dyn InfoRenderer>,
    search_renderer: Box<dyn SearchRenderer>,
    state: ListState,
    /// Screen row of the info/search line
    info_row: u16,
    /// Screen row just below the last item
    region_end: u16,
}

impl ListPrompt {
    /// Create a list prompt with the default theme and fuzzy ranking
    pub fn new(config: ListConfig) -> Self {
        let view_size = config.view_size;
        Self {
            config,
            ranker: Box::new(FuzzyRanker::new()),
            item_renderer: Box::new(Theme::default()),
            info_renderer: Box::new(Theme::default()),
            search_renderer: Box::new(Theme::default()),
            state: ListState::new(Vec::new(), view_size),
            info_row: 0,
            region_end: 0,
        }
    }

    /// Use `theme` for every line
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.item_renderer = Box::new(theme);
        self.info_renderer = Box::new(theme);
        self.search_renderer = Box::new(theme);
        self
    }

    pub fn with_ranker(mut self, ranker: impl Ranker + 'static) -> Self {
        self.ranker = Box::new(ranker);
        self
    }

    pub fn with_item_renderer(mut self, renderer: impl ItemRenderer + 'static) -> Self {
        self.item_renderer = Box::new(renderer);
        self
    }

    pub fn with_info_renderer(mut self, renderer: impl InfoRenderer + 'static) -> Self {
        self.info_renderer = Box::new(renderer);
        self
    }

    pub fn with_search_renderer(mut self, renderer: impl SearchRenderer + 'static) -> Self {
        self.search_renderer = Box::new(renderer);
        self
    }

    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    /// Clear the selection, scroll window and search query
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Show the list and block until an item is chosen
    ///
    /// Returns the original index of the chosen item. Pressing an abort key
    /// yields [`PromptError::UserAborted`].
    pub fn prompt<R, W, M, S>(
        &mut self,
        session: &mut TerminalSession<R, W, M>,
        items: &[S],
    ) -> Result<usize>
    where
        R: Read,
        W: Write,
        M: TerminalMode,
        S: AsRef<str>,
    {
        if items.is_empty() {
            return Err(PromptError::EmptyInput);
        }
        self.config.validate()?;

        self.load(items.iter().map(|s| s.as_ref().to_string()).collect());
        info!(items = items.len(), view_size = self.config.view_size, "list prompt started");

        let result = self.run(session);
        self.finish(session);

        match &result {
            Ok(index) => info!(index, "list prompt selected"),
            Err(e) => info!("list prompt ended: {}", e),
        }
        result
    }

    fn load(&mut self, items: Vec<String>) {
        self.state = ListState::new(items, self.config.view_size);
        self.info_row = 0;
        self.region_end = 0;
    }

    fn run<R: Read, W: Write, M: TerminalMode>(
        &mut self,
        session: &mut TerminalSession<R, W, M>,
    ) -> Result<usize> {
        session.queue(Hide)?;
        session.print_fmt(format_args!("{}\n", self.config.label))?;
        self.render(session, true)?;

        let landing = session.get_pos()?;
        self.region_end = landing.row;
        let rows = u16::try_from(self.state.size()).unwrap_or(u16::MAX);
        self.info_row = landing.row.saturating_sub(rows).saturating_sub(1);
        debug!(info_row = self.info_row, region_end = self.region_end, "list region");

        loop {
            let key = session.read_key()?;
            match self.handle_key(&key) {
                Step::Continue => self.render(session, false)?,
                Step::Selected(index) => return Ok(index),
                Step::Aborted => return Err(PromptError::UserAborted),
            }
        }
    }

    /// Apply one key press to the list state
    pub fn handle_key(&mut self, key: &KeyEvent) -> Step {
        let keys = &self.config.keys;

        if key.matches(&keys.abort) {
            return Step::Aborted;
        }
        if key.matches(&keys.select) {
            if self.state.mode == Mode::Searching {
                debug!("search committed");
                self.state.exit_search();
                return Step::Continue;
            }
            return match self.state.selected_item() {
                Some(index) => Step::Selected(index),
                None => Step::Continue,
            };
        }

        match self.state.mode {
            Mode::Browsing => {
                if self.config.allow_search && key.matches(&keys.search) {
                    debug!("search started");
                    self.state.enter_search(self.ranker.as_ref());
                } else if key.matches(&keys.down) {
                    self.state.move_down();
                } else if key.matches(&keys.up) {
                    self.state.move_up();
                }
            }
            Mode::Searching => {
                if key.matches(&keys.exit_search) {
                    debug!("search exited");
                    self.state.exit_search();
                } else {
                    self.state.edit_search(key, self.ranker.as_ref());
                }
            }
        }
        Step::Continue
    }

    /// Draw the info/search line and the visible items
    ///
    /// The first frame is written wherever the cursor is; later frames start
    /// by jumping back to `info_row`.
    fn render<R: Read, W: Write, M: TerminalMode>(
        &mut self,
        session: &mut TerminalSession<R, W, M>,
        initial: bool,
    ) -> Result<()> {
        if !initial {
            session.set_pos(self.info_row, 1)?;
        }
        self.state.adjust_window();

        let mut caret = None;
        match self.state.mode {
            Mode::Searching => {
                session.queue(Show)?;
                session.queue(SetAttribute(Attribute::Reset))?;
                session.queue(Clear(ClearType::CurrentLine))?;
                let prefix = self.search_renderer.render_prefix(&self.config);
                session.print_fmt(format_args!("{}{}", prefix, self.state.search.before()))?;

                caret = Some(session.get_pos().unwrap_or_else(|e| {
                    warn!("caret position query failed: {}", e);
                    CursorPos::new(self.region_end, 1)
                }));

                let suffix = self.search_renderer.render_suffix(&self.config);
                session.queue(SetAttribute(Attribute::Reset))?;
                session.print_fmt(format_args!("{}{}\n", self.state.search.after(), suffix))?;
            }
            Mode::Browsing => {
                session.queue(Hide)?;
                session.queue(SetAttribute(Attribute::Reset))?;
                session.queue(Clear(ClearType::CurrentLine))?;
                let info = self.info_renderer.render_info(
                    self.state.selected + 1,
                    self.state.items.len(),
                    &self.config,
                );
                session.print_fmt(format_args!("{}\n", info))?;
            }
        }

        for (index, item) in self.state.visible() {
            let line = self
                .item_renderer
                .render_item(item, index == self.state.selected, &self.config);
            session.queue(SetAttribute(Attribute::Reset))?;
            session.queue(Clear(ClearType::CurrentLine))?;
            session.print_fmt(format_args!("{}\n", line))?;
        }

        if let Some(caret) = caret {
            session.set_pos(caret.row, caret.col)?;
        }
        session.queue(SetAttribute(Attribute::Reset))?;
        session.flush()
    }

    /// Park the cursor below the list and show it again, best-effort
    fn finish<R: Read, W: Write, M: TerminalMode>(&self, session: &mut TerminalSession<R, W, M>) {
        let _ = session.queue(Show);
        if self.region_end != 0 {
            let _ = session.set_pos(self.region_end, 1);
        }
        let _ = session.queue(SetAttribute(Attribute::Reset));
        let _ = session.flush();
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::core::keys::NamedKey;
    use crate::core::raw::testing::FakeMode;
    use crate::core::session::testing::{output_text, session, ScriptedInput};

    const DOWN: KeyEvent = KeyEvent::Named(NamedKey::ArrowDown);
    const UP: KeyEvent = KeyEvent::Named(NamedKey::ArrowUp);
    const ENTER: KeyEvent = KeyEvent::Named(NamedKey::Enter);
    const ESC: KeyEvent = KeyEvent::Named(NamedKey::Escape);

    fn items(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    /// Scores 1 for items containing the query, 0 otherwise
    fn contains_ranker(query: &str, items: &[String]) -> Vec<u32> {
        items.iter().map(|i| u32::from(i.contains(query))).collect()
    }

    fn prompt_over(names: &[&str], view_size: usize) -> ListPrompt {
        let mut prompt = ListPrompt::new(ListConfig {
            view_size,
            ..ListConfig::default()
        })
        .with_ranker(contains_ranker);
        prompt.load(items(names));
        prompt
    }

    fn assert_window_invariant(state: &ListState) {
        let start = state.window_start();
        let n = state.items().len();
        assert!(start <= state.selected(), "window {} past selection {}", start, state.selected());
        assert!(state.selected() < start + state.size());
        assert!(start <= n.saturating_sub(1));
    }

    #[test]
    fn test_down_scrolls_then_wraps() {
        let mut state = ListState::new(items(&["a", "b", "c", "d", "e"]), 3);
        let mut seen = vec![(state.selected(), state.window_start())];
        for _ in 0..5 {
            state.move_down();
            assert_window_invariant(&state);
            seen.push((state.selected(), state.window_start()));
        }
        assert_eq!(seen, vec![(0, 0), (1, 0), (2, 0), (3, 1), (4, 2), (0, 0)]);
    }

    #[test]
    fn test_up_wraps_to_tail() {
        let mut state = ListState::new(items(&["a", "b", "c", "d", "e"]), 3);
        state.move_up();
        assert_eq!(state.selected(), 4);
        assert_eq!(state.window_start(), 2);
        let visible: Vec<_> = state.visible().map(|(_, item)| item).collect();
        assert_eq!(visible, vec!["c", "d", "e"]);

        state.move_up();
        state.move_up();
        state.move_up();
        assert_eq!(state.selected(), 1);
        assert_eq!(state.window_start(), 1);
    }

    #[test]
    fn test_up_wrap_with_short_list() {
        // Pre-seed goes negative and is pulled back to zero
        let mut state = ListState::new(items(&["a", "b"]), 4);
        state.move_up();
        assert_eq!(state.selected(), 1);
        assert_eq!(state.window_start(), 0);
        assert_window_invariant(&state);
    }

    #[test]
    fn test_window_invariant_holds_for_any_walk() {
        for n in 1..8 {
            for view in 1..6 {
                let names: Vec<String> = (0..n).map(|i| i.to_string()).collect();
                let mut state = ListState::new(names, view);
                // Deterministic mixed walk
                for step in 0..40 {
                    if (step * 7 + n) % 3 == 0 {
                        state.move_up();
                    } else {
                        state.move_down();
                    }
                    assert_window_invariant(&state);
                }
            }
        }
    }

    #[test]
    fn test_search_round_trip_resets_to_identity() {
        let mut prompt = prompt_over(&["a", "b", "c", "d", "e"], 3);
        prompt.handle_key(&DOWN);
        prompt.handle_key(&DOWN);
        prompt.handle_key(&DOWN);
        assert_eq!(prompt.state().selected(), 3);

        prompt.handle_key(&KeyEvent::Printable('/'));
        assert_eq!(prompt.state().mode(), Mode::Searching);
        prompt.handle_key(&ESC);

        let state = prompt.state();
        assert_eq!(state.mode(), Mode::Browsing);
        assert_eq!(state.results(), &[0, 1, 2, 3, 4]);
        assert_eq!(state.selected(), 0);
        assert_eq!(state.window_start(), 0);
    }

    #[test]
    fn test_search_reorders_without_filtering() {
        let mut prompt = prompt_over(&["apple", "banana", "cherry"], 4);
        prompt.handle_key(&KeyEvent::Printable('/'));
        prompt.handle_key(&KeyEvent::Printable('n'));

        let results = prompt.state().results();
        assert_eq!(results[0], 1);
        let mut all = results.to_vec();
        all.sort_unstable();
        assert_eq!(all, vec![0, 1, 2]);
    }

    #[test]
    fn test_fuzzy_ranking_puts_matches_first() {
        let mut prompt = ListPrompt::new(ListConfig::default());
        prompt.load(items(&["apple", "apply", "banana"]));
        for key in ['/', 'a', 'p', 'p', 'l'] {
            prompt.handle_key(&KeyEvent::Printable(key));
        }
        assert_eq!(prompt.state().search().value(), "appl");

        // Order between the two matches is up to the ranker
        let mut top: Vec<usize> = prompt.state().results()[..2].to_vec();
        top.sort_unstable();
        assert_eq!(top, vec![0, 1]);
    }

    #[test]
    fn test_search_keys_are_typed_while_searching() {
        let mut prompt = prompt_over(&["jk/", "b"], 4);
        prompt.handle_key(&KeyEvent::Printable('/'));
        for key in ['j', 'k', '/'] {
            assert_eq!(prompt.handle_key(&KeyEvent::Printable(key)), Step::Continue);
        }
        assert_eq!(prompt.state().search().value(), "jk/");
        assert_eq!(prompt.state().mode(), Mode::Searching);
    }

    #[test]
    fn test_select_commits_search_before_choosing() {
        let mut prompt = prompt_over(&["apple", "banana", "cherry"], 4);
        prompt.handle_key(&KeyEvent::Printable('/'));
        prompt.handle_key(&KeyEvent::Printable('c'));
        assert_eq!(prompt.handle_key(&ENTER), Step::Continue);
        assert_eq!(prompt.state().mode(), Mode::Browsing);
        assert_eq!(prompt.handle_key(&ENTER), Step::Selected(2));
    }

    #[test]
    fn test_search_disabled() {
        let mut prompt = prompt_over(&["a", "b"], 4);
        prompt.config.allow_search = false;
        prompt.handle_key(&KeyEvent::Printable('/'));
        assert_eq!(prompt.state().mode(), Mode::Browsing);
    }

    #[test]
    fn test_abort_from_any_mode() {
        let ctrl_c = KeyEvent::Named(NamedKey::CtrlC);
        let mut prompt = prompt_over(&["a", "b"], 4);
        assert_eq!(prompt.handle_key(&ctrl_c), Step::Aborted);
        prompt.handle_key(&KeyEvent::Printable('/'));
        assert_eq!(prompt.handle_key(&ctrl_c), Step::Aborted);
    }

    #[test]
    fn test_reset_clears_selection_and_search() {
        let mut prompt = prompt_over(&["a", "b", "c"], 2);
        prompt.handle_key(&UP);
        prompt.handle_key(&KeyEvent::Printable('/'));
        prompt.handle_key(&KeyEvent::Printable('c'));
        prompt.reset();
        let state = prompt.state();
        assert_eq!(state.mode(), Mode::Browsing);
        assert_eq!(state.selected(), 0);
        assert_eq!(state.window_start(), 0);
        assert!(state.search().is_empty());
        assert_eq!(state.results(), &[0, 1, 2]);
    }

    #[test]
    fn test_prompt_end_to_end() {
        let mut s = session([
            "\x1b[10;1R", // landing row after the first frame
            "\x1b[B",
            "\x1b[B",
            "\x1b[B",
            "\x1b[B",
            "\r",
        ]);
        let mut prompt = ListPrompt::new(ListConfig {
            view_size: 3,
            ..ListConfig::default()
        });

        let index = prompt.prompt(&mut s, &["a", "b", "c", "d", "e"]).unwrap();
        assert_eq!(index, 4);
        assert_eq!(prompt.state().window_start(), 2);

        let out = output_text(&s);
        assert!(out.starts_with("\x1b[?25lSelect option\n"));
        // Redraws start at the info line: 10 - 3 items - 1
        assert!(out.contains("\x1b[6;1H"));
        // Parked below the list, cursor visible again
        assert!(out.ends_with("\x1b[?25h\x1b[10;1H\x1b[0m"));
        assert!(!s.mode().raw.get());
    }

    #[test]
    fn test_prompt_search_flow() {
        let mut s = session([
            "\x1b[10;1R",
            "/",
            "\x1b[6;9R", // caret after "Search: "
            "c",
            "\x1b[6;10R",
            "\r", // commit search
            "\r", // choose
        ]);
        let mut prompt = ListPrompt::new(ListConfig::default()).with_ranker(contains_ranker);

        let index = prompt.prompt(&mut s, &["apple", "banana", "cherry"]).unwrap();
        assert_eq!(index, 2);
        // Caret parked after each search frame
        let out = output_text(&s);
        assert!(out.contains("\x1b[6;9H"));
        assert!(out.contains("\x1b[6;10H"));
    }

    #[test]
    fn test_prompt_abort() {
        let mut s = session(["\x1b[5;1R", "\x03"]);
        let mut prompt = ListPrompt::new(ListConfig::default());
        let err = prompt.prompt(&mut s, &["a"]).unwrap_err();
        assert!(err.is_abort());
        assert!(output_text(&s).ends_with("\x1b[?25h\x1b[5;1H\x1b[0m"));
    }

    #[test]
    fn test_prompt_propagates_decode_failure() {
        let mut s = session(["\x1b[5;1R", "\t"]);
        let mut prompt = ListPrompt::new(ListConfig::default());
        let err = prompt.prompt(&mut s, &["a", "b"]).unwrap_err();
        assert!(matches!(err, PromptError::UnrecognizedSequence(_)));
        assert!(!s.mode().raw.get());
    }

    #[test]
    fn test_empty_input_rejected_before_rendering() {
        let mut s = session(Vec::<&str>::new());
        let mut prompt = ListPrompt::new(ListConfig::default());
        let err = prompt.prompt(&mut s, &[] as &[&str]).unwrap_err();
        assert!(matches!(err, PromptError::EmptyInput));
        assert!(s.output().is_empty());
    }

    #[test]
    fn test_zero_view_size_rejected_before_rendering() {
        let mut s = session(Vec::<&str>::new());
        let mut prompt = ListPrompt::new(ListConfig {
            view_size: 0,
            ..ListConfig::default()
        });
        let err = prompt.prompt(&mut s, &["a"]).unwrap_err();
        assert!(matches!(err, PromptError::InvalidConfig(_)));
        assert!(s.output().is_empty());
    }

    /// Output that breaks when the terminal is asked for the cursor position
    struct BrokenOnQuery;

    impl io::Write for BrokenOnQuery {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if buf.starts_with(b"\x1b[6n") {
                return Err(io::Error::from(io::ErrorKind::BrokenPipe));
            }
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Output that is already closed
    struct Closed;

    impl io::Write for Closed {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn test_write_failure_during_query_restores_mode() {
        let mut s = TerminalSession::new(
            ScriptedInput::new(["\x1b[5;1R"]),
            BrokenOnQuery,
            FakeMode::default(),
        );
        let mut prompt = ListPrompt::new(ListConfig::default());
        let err = prompt.prompt(&mut s, &["a", "b"]).unwrap_err();
        assert!(matches!(err, PromptError::Io(ref e) if e.kind() == io::ErrorKind::BrokenPipe));
        assert!(!s.mode().raw.get());
        assert_eq!(*s.mode().toggles.borrow(), vec![true, false]);
    }

    #[test]
    fn test_closed_output_is_io_error() {
        let mut s = TerminalSession::new(
            ScriptedInput::new(Vec::<&str>::new()),
            Closed,
            FakeMode::default(),
        );
        let mut prompt = ListPrompt::new(ListConfig::default());
        let err = prompt.prompt(&mut s, &["a"]).unwrap_err();
        assert!(matches!(err, PromptError::Io(_)));
        assert!(!s.mode().raw.get());
    }

    #[test]
    fn test_stray_control_keys_are_ignored() {
        let mut s = session([
            "\x1b[6;1R",
            "\x1c",
            "\x00",
            "/",
            "\x1b[3;9R",
            "\x1f",
            "\x1b[3;9R",
            "\x1b",
            "\r",
        ]);
        let mut prompt = ListPrompt::new(ListConfig::default());
        assert_eq!(prompt.prompt(&mut s, &["a", "b"]).unwrap(), 0);
        assert!(prompt.state().search().is_empty());
    }

    #[test]
    fn test_custom_renderers_drive_the_frame() {
        let mut s = session([
            "\x1b[5;1R",
            "\x1b[B",
            "/",
            "\x1b[1;2R",
            "\x1b",
            "\x1b[B",
            "\r",
        ]);
        let mut prompt = ListPrompt::new(ListConfig {
            view_size: 2,
            ..ListConfig::default()
        })
        .with_item_renderer(|item: &str, selected: bool, _: &ListConfig| {
            if selected {
                format!("[*{}]", item)
            } else {
                format!("[{}]", item)
            }
        })
        .with_info_renderer(|position: usize, total: usize, _: &ListConfig| {
            format!("<{} of {}>", position, total)
        })
        .with_search_renderer(Brackets);

        assert_eq!(prompt.prompt(&mut s, &["a", "b", "c"]).unwrap(), 1);

        let out = output_text(&s);
        assert!(out.contains("<1 of 3>\n"));
        assert!(out.contains("[*a]\n"));
        assert!(out.contains("<2 of 3>\n"));
        assert!(out.contains("[*b]\n"));
        assert!(out.contains("{\x1b[6n"));
        assert!(out.contains("}\n"));
        assert!(!out.contains("Search: "));
    }

    struct Brackets;

    impl SearchRenderer for Brackets {
        fn render_prefix(&self, _config: &ListConfig) -> String {
            "{".to_string()
        }

        fn render_suffix(&self, _config: &ListConfig) -> String {
            "}".to_string()
        }
    }
}
