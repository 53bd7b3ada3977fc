use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::dispatch::ThreadedDispatcher;
use crate::io::store::ItemStore;
use crate::model::{ItemId, UiConfig};
use crate::ops::{Request, ViewState};
use crate::util::text::TextField;

use super::input;
use super::render;
use super::theme::Theme;

/// Event loop tick; also the spinner frame rate
const TICK: Duration = Duration::from_millis(100);

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Moving over the list
    Navigate,
    /// Typing into the new-item field
    Input,
    /// Inline rename of one item
    Edit,
}

/// Main application state
pub struct App {
    pub state: ViewState,
    pub mode: Mode,
    pub theme: Theme,
    /// Cursor index into `state.rows()`
    pub cursor: usize,
    /// First visible list row
    pub scroll_offset: usize,
    /// New-item field; its text mirrors `state.new_title()`
    pub input: TextField,
    /// Rename field; its text mirrors the edit draft
    pub edit_field: TextField,
    pub show_help: bool,
    pub show_key_hints: bool,
    pub should_quit: bool,
    /// Advances every tick while something is pending
    pub spinner_frame: usize,
    /// Requests produced by key handling, waiting to be dispatched
    outbox: Vec<Request>,
}

impl App {
    pub fn new(state: ViewState, ui: &UiConfig) -> Self {
        App {
            state,
            mode: Mode::Input,
            theme: Theme::from_config(ui),
            cursor: 0,
            scroll_offset: 0,
            input: TextField::default(),
            edit_field: TextField::default(),
            show_help: false,
            show_key_hints: ui.show_key_hints,
            should_quit: false,
            spinner_frame: 0,
            outbox: Vec::new(),
        }
    }

    /// Queue requests for the event loop to dispatch
    pub fn send(&mut self, requests: Vec<Request>) {
        self.outbox.extend(requests);
    }

    pub fn take_outbox(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.outbox)
    }

    /// Id of the item under the cursor. The placeholder row has none.
    pub fn cursor_item(&self) -> Option<ItemId> {
        self.state
            .rows()
            .get(self.cursor)
            .filter(|row| !row.placeholder)
            .map(|row| row.item.id)
    }

    pub fn row_count(&self) -> usize {
        self.state.rows().len()
    }

    /// Reconcile UI-only state with the view state after anything changed:
    /// keep the cursor in range, mirror text fields, follow focus requests.
    pub fn sync(&mut self) {
        let rows = self.row_count();
        if rows == 0 {
            self.cursor = 0;
        } else if self.cursor >= rows {
            self.cursor = rows - 1;
        }

        if self.input.text() != self.state.new_title() {
            self.input.set(self.state.new_title());
        }
        if self.state.take_focus_request() && self.mode != Mode::Edit {
            self.mode = Mode::Input;
        }
        if self.mode == Mode::Edit && self.state.edit().is_none() {
            self.mode = Mode::Navigate;
        }
    }

    /// Advance time: expire the error banner and animate spinners.
    pub fn tick(&mut self, now: Instant) {
        self.state.tick(now);
        if self.state.placeholder().is_some() || !self.state.pending_ids().is_empty() {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
    }
}

/// Run the TUI application
pub fn run(
    state: ViewState,
    store: Arc<dyn ItemStore>,
    ui: &UiConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(state, ui);
    let dispatcher = ThreadedDispatcher::new(store);
    dispatcher.dispatch(app.state.load());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, &dispatcher);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if app.state.in_flight() > 0 {
        tracing::info!(
            in_flight = app.state.in_flight(),
            "exiting with requests still in flight"
        );
    }
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    dispatcher: &ThreadedDispatcher,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut last_tick = Instant::now();
    loop {
        for completion in dispatcher.poll() {
            app.state.complete(completion, Instant::now());
        }
        if last_tick.elapsed() >= TICK {
            app.tick(Instant::now());
            last_tick = Instant::now();
        }
        app.sync();

        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(TICK)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key, Instant::now());
                }
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
            dispatcher.dispatch(app.take_outbox());
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
