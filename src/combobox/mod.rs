//! Searchable dropdown widget state and its interaction state machine.

mod error;
pub mod filter;
mod input;
pub mod listeners;
mod mount;

pub use self::error::ComboboxError;
pub use self::filter::{MatchMode, filter_options, normalize};
use self::input::QueryInput;
pub use self::mount::MountedCombobox;
use crossterm::event::KeyCode;
use ratatui::layout::{Position, Rect};
use tracing::{debug, info};

/// Text shown in the panel when a non-empty query matches nothing.
pub const DEFAULT_NOTFOUND: &str = "notfound";

type OnSelect = Box<dyn FnMut(&str)>;

/// User intent delivered to [`Combobox::handle`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ComboboxEvent {
    Focus,
    ClickInput,
    Input(char),
    Backspace,
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
    ClickOption(usize),
    ClickOutside,
}

/// Observable result of a single event.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Transition {
    Ignored,
    Opened,
    Closed,
    QueryChanged,
    FocusMoved(usize),
    Selected(String),
    Dismissed,
}

/// What the dropdown panel should show.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DropdownView<'a> {
    Closed,
    NotFound(&'a str),
    List {
        items: Vec<&'a str>,
        focused: usize,
        offset: usize,
    },
}

/// Screen areas occupied by the widget during the last render.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct ComboboxLayout {
    pub input: Rect,
    pub panel: Option<Rect>,
    /// Rows of the panel that hold option entries.
    pub list: Option<Rect>,
}

/// A text input paired with a filtered, keyboard-navigable option list.
pub struct Combobox {
    options: Vec<String>,
    input: QueryInput,
    open: bool,
    focused_index: usize,
    scroll_offset: usize,
    viewport_height: usize,
    layout: Option<ComboboxLayout>,
    disabled: bool,
    placeholder: String,
    notfound: String,
    match_mode: MatchMode,
    on_select: OnSelect,
}

impl std::fmt::Debug for Combobox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Combobox")
            .field("options", &self.options)
            .field("input", &self.input)
            .field("open", &self.open)
            .field("focused_index", &self.focused_index)
            .field("scroll_offset", &self.scroll_offset)
            .field("disabled", &self.disabled)
            .field("match_mode", &self.match_mode)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Combobox`]. Only the selection callback is required.
#[derive(Default)]
pub struct ComboboxBuilder {
    options: Vec<String>,
    on_select: Option<OnSelect>,
    disabled: bool,
    placeholder: String,
    notfound: Option<String>,
    match_mode: MatchMode,
}

impl ComboboxBuilder {
    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the callback invoked once per confirmed selection.
    ///
    /// The callback runs while the widget is mid-transition and must not
    /// call back into the same combobox.
    pub fn on_select<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&str) + 'static,
    {
        self.on_select = Some(Box::new(callback));
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn notfound(mut self, notfound: impl Into<String>) -> Self {
        self.notfound = Some(notfound.into());
        self
    }

    pub fn match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    pub fn build(self) -> Result<Combobox, ComboboxError> {
        let on_select = self.on_select.ok_or(ComboboxError::MissingOnSelect)?;

        Ok(Combobox {
            options: self.options,
            input: QueryInput::default(),
            open: false,
            focused_index: 0,
            scroll_offset: 0,
            viewport_height: 0,
            layout: None,
            disabled: self.disabled,
            placeholder: self.placeholder,
            notfound: self
                .notfound
                .unwrap_or_else(|| DEFAULT_NOTFOUND.to_owned()),
            match_mode: self.match_mode,
            on_select,
        })
    }
}

impl Combobox {
    pub fn builder() -> ComboboxBuilder {
        ComboboxBuilder::default()
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Options matching the current query, recomputed on every call.
    pub fn filtered_options(&self) -> Vec<&str> {
        filter_options(&self.options, self.input.query(), self.match_mode)
    }

    pub fn query(&self) -> &str {
        self.input.query()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_focused(&self) -> bool {
        self.input.is_focused()
    }

    pub fn focused_index(&self) -> usize {
        self.focused_index
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn notfound(&self) -> &str {
        &self.notfound
    }

    pub fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    pub fn layout(&self) -> Option<ComboboxLayout> {
        self.layout
    }

    /// Applies one event to the state machine.
    pub fn handle(&mut self, event: ComboboxEvent) -> Transition {
        match event {
            ComboboxEvent::Focus => self.focus(),
            ComboboxEvent::ClickInput => self.click_input(),
            ComboboxEvent::Input(ch) => self.input_char(ch),
            ComboboxEvent::Backspace => self.backspace(),
            ComboboxEvent::ArrowDown => self.move_down(),
            ComboboxEvent::ArrowUp => self.move_up(),
            ComboboxEvent::Enter => self.confirm(),
            ComboboxEvent::Escape => self.dismiss(),
            ComboboxEvent::ClickOption(index) => self.select_index(index),
            ComboboxEvent::ClickOutside => self.click_outside(),
        }
    }

    /// Gives the input focus and opens the panel.
    pub fn focus(&mut self) -> Transition {
        if self.disabled {
            return Transition::Ignored;
        }

        self.input.focus();
        if self.open {
            return Transition::Ignored;
        }
        self.open_panel();
        Transition::Opened
    }

    /// Toggles the panel. Closing this way keeps the query.
    pub fn click_input(&mut self) -> Transition {
        if self.disabled {
            return Transition::Ignored;
        }

        self.input.focus();
        if self.open {
            self.close_panel();
            Transition::Closed
        } else {
            self.open_panel();
            Transition::Opened
        }
    }

    /// Appends a typed character to the query.
    ///
    /// Typing into a focused input whose panel was closed reopens it.
    pub fn input_char(&mut self, ch: char) -> Transition {
        if self.disabled || !self.input.is_focused() || ch.is_control() {
            return Transition::Ignored;
        }

        self.input.push_char(ch);
        self.query_changed();
        Transition::QueryChanged
    }

    pub fn backspace(&mut self) -> Transition {
        if self.disabled || !self.input.is_focused() {
            return Transition::Ignored;
        }
        if !self.input.backspace() {
            return Transition::Ignored;
        }

        self.query_changed();
        Transition::QueryChanged
    }

    pub fn move_down(&mut self) -> Transition {
        if !self.open {
            return Transition::Ignored;
        }

        let len = self.filtered_options().len();
        if self.focused_index + 1 >= len {
            return Transition::Ignored;
        }
        self.focused_index += 1;
        self.keep_focused_visible();
        Transition::FocusMoved(self.focused_index)
    }

    pub fn move_up(&mut self) -> Transition {
        if !self.open || self.focused_index == 0 {
            return Transition::Ignored;
        }

        self.focused_index -= 1;
        self.keep_focused_visible();
        Transition::FocusMoved(self.focused_index)
    }

    /// Commits the option under the keyboard focus.
    pub fn confirm(&mut self) -> Transition {
        self.select_index(self.focused_index)
    }

    /// Commits the filtered option at `index`.
    pub fn select_index(&mut self, index: usize) -> Transition {
        if !self.open {
            return Transition::Ignored;
        }

        let Some(choice) = self
            .filtered_options()
            .get(index)
            .map(|option| (*option).to_owned())
        else {
            return Transition::Ignored;
        };

        self.input.set(&choice);
        self.close_panel();
        info!(selection = %choice, "combobox selection confirmed");
        (self.on_select)(&choice);
        Transition::Selected(choice)
    }

    /// Clears the query and closes the panel without selecting. The query is
    /// cleared even when the panel was already closed; only an open panel
    /// reports [`Transition::Dismissed`].
    pub fn dismiss(&mut self) -> Transition {
        self.input.clear();
        if !self.open {
            return Transition::Ignored;
        }

        self.close_panel();
        debug!("combobox dismissed");
        Transition::Dismissed
    }

    /// Dismisses the panel and drops input focus.
    pub fn click_outside(&mut self) -> Transition {
        let transition = self.dismiss();
        self.input.blur();
        transition
    }

    /// Routes a key press received by a global keyboard listener.
    pub fn handle_key(&mut self, code: KeyCode) -> Transition {
        match code {
            KeyCode::Esc => self.dismiss(),
            KeyCode::Down => self.move_down(),
            KeyCode::Up => self.move_up(),
            KeyCode::Enter => self.confirm(),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Char(ch) => self.input_char(ch),
            _ => Transition::Ignored,
        }
    }

    /// Routes a pointer press using the layout recorded by the last render.
    pub fn handle_pointer_down(&mut self, position: Position) -> Transition {
        let Some(layout) = self.layout else {
            return Transition::Ignored;
        };

        if layout.input.contains(position) {
            return self.click_input();
        }

        if self.open {
            if let Some(list) = layout.list
                && list.contains(position)
            {
                let row = usize::from(position.y - list.y);
                return self.select_index(self.scroll_offset + row);
            }
            if layout.panel.is_some_and(|panel| panel.contains(position)) {
                return Transition::Ignored;
            }
        }

        self.click_outside()
    }

    /// Records where the widget was drawn, for pointer hit-testing.
    pub fn record_layout(&mut self, layout: ComboboxLayout) {
        self.layout = Some(layout);
    }

    /// Sets how many option rows fit in the panel and re-scrolls so the
    /// focused option stays visible.
    pub fn set_viewport_height(&mut self, height: u16) {
        self.viewport_height = usize::from(height);
        self.keep_focused_visible();
    }

    /// Returns what the dropdown panel should display.
    pub fn view(&self) -> DropdownView<'_> {
        if !self.open {
            return DropdownView::Closed;
        }

        let items = self.filtered_options();
        if items.is_empty() && !self.input.is_empty() {
            return DropdownView::NotFound(&self.notfound);
        }

        DropdownView::List {
            items,
            focused: self.focused_index,
            offset: self.scroll_offset,
        }
    }

    fn open_panel(&mut self) {
        self.open = true;
        self.focused_index = 0;
        self.scroll_offset = 0;
        debug!("combobox opened");
    }

    fn close_panel(&mut self) {
        self.open = false;
        self.focused_index = 0;
        self.scroll_offset = 0;
        debug!("combobox closed");
    }

    fn query_changed(&mut self) {
        if self.open {
            self.focused_index = 0;
            self.scroll_offset = 0;
        } else {
            self.open_panel();
        }
    }

    fn keep_focused_visible(&mut self) {
        if self.viewport_height == 0 {
            return;
        }

        if self.focused_index < self.scroll_offset {
            self.scroll_offset = self.focused_index;
        } else if self.focused_index >= self.scroll_offset + self.viewport_height {
            self.scroll_offset = self.focused_index + 1 - self.viewport_height;
        }
    }
}
