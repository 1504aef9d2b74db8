use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::storage::FileStorage;
use crate::io::workspace::Workspace;
use crate::model::item::{Filter, Item, ItemId};
use crate::ops::store::{Store, StoreError, ValidationError};
use crate::ops::view::{self, Counts};

use super::input;
use super::render;
use super::text_input::TextInput;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Moving through the list
    Navigate,
    /// Typing a new item in the input line
    Input,
    /// Edit modal open
    Edit,
    /// Delete confirmation open
    Confirm,
    /// Read-only detail modal open
    View,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Warning,
    Error,
}

/// One-shot message shown in the status row until the next key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

/// Item being edited in the edit modal
#[derive(Debug, Clone)]
pub struct EditState {
    pub id: ItemId,
    pub input: TextInput,
}

/// Main application state
pub struct App {
    pub store: Store<FileStorage>,
    pub filter: Filter,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    /// Cursor index into the filtered list
    pub cursor: usize,
    /// First visible row of the list
    pub scroll_offset: usize,
    /// New-item input line
    pub input: TextInput,
    pub edit: Option<EditState>,
    /// Item awaiting delete confirmation
    pub pending_delete: Option<ItemId>,
    /// Item shown in the detail modal
    pub viewing: Option<ItemId>,
    pub status: Option<StatusMessage>,
}

impl App {
    pub fn new(store: Store<FileStorage>, theme: Theme) -> Self {
        App {
            store,
            filter: Filter::All,
            // Start with the input line focused
            mode: Mode::Input,
            should_quit: false,
            theme,
            cursor: 0,
            scroll_offset: 0,
            input: TextInput::new(),
            edit: None,
            pending_delete: None,
            viewing: None,
            status: None,
        }
    }

    /// Items under the current filter
    pub fn visible_items(&self) -> Vec<&Item> {
        view::filtered(self.store.snapshot(), self.filter)
    }

    pub fn counts(&self) -> Counts {
        view::counts(self.store.snapshot())
    }

    pub fn selected(&self) -> Option<&Item> {
        self.visible_items().get(self.cursor).copied()
    }

    fn selected_id(&self) -> Option<ItemId> {
        self.selected().map(|item| item.id)
    }

    /// Keep the cursor inside the filtered list
    pub fn clamp_cursor(&mut self) {
        let len = self.visible_items().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.visible_items().len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = self.cursor.saturating_add_signed(delta).min(len - 1);
    }

    pub fn cursor_to_end(&mut self) {
        self.cursor = self.visible_items().len().saturating_sub(1);
    }

    pub fn set_filter(&mut self, filter: Filter) {
        if self.filter != filter {
            self.filter = filter;
            self.cursor = 0;
            self.scroll_offset = 0;
        }
    }

    fn select_id(&mut self, id: ItemId) {
        if let Some(pos) = self.visible_items().iter().position(|item| item.id == id) {
            self.cursor = pos;
        }
    }

    pub fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    /// Show a store error in the status row. Persistence errors are
    /// warnings: the change is still in memory.
    fn report(&mut self, err: StoreError) {
        match err {
            StoreError::Persistence(e) => {
                self.set_status(StatusKind::Warning, format!("Not saved: {}", e))
            }
            StoreError::NotFound(_) => {
                self.set_status(StatusKind::Error, "That todo no longer exists")
            }
            err @ (StoreError::Validation(_) | StoreError::IdsExhausted(_)) => {
                self.set_status(StatusKind::Error, err.to_string())
            }
        }
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    /// Add the input line as a new item
    pub fn submit_input(&mut self) {
        match self.store.add(self.input.text()) {
            Ok(item) => {
                self.input.clear();
                self.select_id(item.id);
            }
            Err(StoreError::Validation(ValidationError::EmptyText)) => {
                self.set_status(StatusKind::Error, "Please enter a todo!");
            }
            Err(err) => {
                if err.is_persistence() {
                    // Added in memory regardless
                    self.input.clear();
                    self.cursor = 0;
                }
                self.report(err);
            }
        }
    }

    pub fn toggle_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        if let Err(err) = self.store.toggle(id) {
            self.report(err);
        }
        // The item may have left the current filter
        self.clamp_cursor();
    }

    pub fn begin_edit(&mut self) {
        let Some((id, text)) = self.selected().map(|item| (item.id, item.text.clone())) else {
            return;
        };
        self.edit = Some(EditState {
            id,
            input: TextInput::with_text(&text),
        });
        self.viewing = None;
        self.mode = Mode::Edit;
    }

    /// Save the edit modal. Invalid text keeps the modal open.
    pub fn save_edit(&mut self) {
        let Some(edit) = &self.edit else {
            return;
        };
        match self.store.edit(edit.id, edit.input.text()) {
            Ok(_) => self.close_modal(),
            Err(StoreError::Validation(ValidationError::EmptyText)) => {
                self.set_status(StatusKind::Error, "Todo cannot be empty!");
            }
            Err(err @ StoreError::Validation(_)) => self.report(err),
            Err(err) => {
                self.close_modal();
                self.report(err);
            }
        }
    }

    pub fn begin_delete(&mut self) {
        if let Some(id) = self.selected_id() {
            self.pending_delete = Some(id);
            self.mode = Mode::Confirm;
        }
    }

    pub fn confirm_delete(&mut self) {
        if let Some(id) = self.pending_delete.take()
            && let Err(err) = self.store.remove(id)
        {
            self.report(err);
        }
        self.close_modal();
        self.clamp_cursor();
    }

    pub fn open_view(&mut self) {
        if let Some(id) = self.selected_id() {
            self.viewing = Some(id);
            self.mode = Mode::View;
        }
    }

    /// Close whichever modal is open and return to the list
    pub fn close_modal(&mut self) {
        self.edit = None;
        self.pending_delete = None;
        self.viewing = None;
        self.mode = Mode::Navigate;
    }
}

/// Run the TUI application
pub fn run(start: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let workspace = Workspace::open(start)?;
    let store = workspace.open_store();
    let theme = Theme::from_config(&workspace.config.ui);
    let mut app = App::new(store, theme);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Restore the terminal before the panic message is printed
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
