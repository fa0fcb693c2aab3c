use std::io::{self, Stdout};
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Context;
use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use flashdeck_core::{update, AppState, AppViewModel, DisplayMode, Msg};
use flashdeck_logging::{deck_error, deck_info};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use super::config::load_config;
use super::effects::EffectRunner;
use super::logging::{self, LogDestination};
use super::ui::keymap::{map_key, FocusZone, UiAction};
use super::ui::render::GRID_COLUMNS;
use super::ui::{self, UiState};

type Term = Terminal<CrosstermBackend<Stdout>>;

const TICK: Duration = Duration::from_millis(50);

pub fn run_app() -> anyhow::Result<()> {
    logging::initialize(LogDestination::from_env());

    let cwd = std::env::current_dir().context("resolve working directory")?;
    let config = load_config(&cwd);
    deck_info!("Starting flashdeck with model {}", config.generator.model);

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(&config, msg_tx).context("start generation engine")?;

    let mut terminal = setup_terminal().context("set up terminal")?;
    let result = App::new(runner, msg_rx).run(&mut terminal);
    if let Err(err) = restore_terminal(&mut terminal) {
        deck_error!("Failed to restore terminal: {}", err);
    }
    result
}

fn setup_terminal() -> io::Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut Term) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()
}

struct App {
    state: AppState,
    view: AppViewModel,
    ui: UiState,
    runner: EffectRunner,
    msg_rx: mpsc::Receiver<Msg>,
    needs_redraw: bool,
    quit: bool,
}

impl App {
    fn new(runner: EffectRunner, msg_rx: mpsc::Receiver<Msg>) -> Self {
        let state = AppState::new();
        let view = state.view();
        Self {
            state,
            view,
            ui: UiState::default(),
            runner,
            msg_rx,
            needs_redraw: true,
            quit: false,
        }
    }

    fn run(&mut self, terminal: &mut Term) -> anyhow::Result<()> {
        while !self.quit {
            self.process_pending_messages();

            if self.needs_redraw {
                terminal
                    .draw(|frame| ui::render::render(frame, &self.view, &self.ui))
                    .context("draw frame")?;
                self.needs_redraw = false;
            }

            if event::poll(TICK).context("poll terminal events")? {
                match event::read().context("read terminal event")? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    Event::Paste(text) => self.insert_text(&text),
                    Event::Resize(..) => self.needs_redraw = true,
                    _ => {}
                }
            }
        }
        Ok(())
    }

    fn process_pending_messages(&mut self) {
        let mut inbox: Vec<Msg> = self.msg_rx.try_iter().collect();
        inbox.extend(self.runner.poll_engine());
        for msg in inbox {
            self.dispatch_msg(msg);
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            self.view = state.view();
            self.ui.clamp_selection(self.view.cards.len());
            self.needs_redraw = true;
        }
        self.state = state;
        self.runner.enqueue(effects);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match map_key(key, self.ui.zone) {
            UiAction::Quit => self.quit = true,
            UiAction::InsertChar(c) => {
                let mut topic = self.view.topic.clone();
                topic.push(c);
                self.dispatch_msg(Msg::InputChanged(topic));
            }
            UiAction::InsertNewline => self.insert_text("\n"),
            UiAction::Backspace => {
                let mut topic = self.view.topic.clone();
                topic.pop();
                self.dispatch_msg(Msg::InputChanged(topic));
            }
            UiAction::ClearInput => self.dispatch_msg(Msg::InputChanged(String::new())),
            UiAction::Generate => self.dispatch_msg(Msg::GenerateClicked),
            UiAction::SwitchZone => {
                self.ui.zone = match self.ui.zone {
                    FocusZone::Input => FocusZone::Deck,
                    FocusZone::Deck => FocusZone::Input,
                };
                self.needs_redraw = true;
            }
            UiAction::ToggleMode => self.dispatch_msg(Msg::ToggleModeClicked),
            UiAction::Shuffle => self.dispatch_msg(Msg::ShuffleClicked {
                seed: rand::random(),
            }),
            UiAction::Flip => {
                if let Some(card_id) = self.target_card() {
                    self.dispatch_msg(Msg::CardClicked(card_id));
                }
            }
            UiAction::Delete => {
                if let Some(card_id) = self.target_card() {
                    self.dispatch_msg(Msg::DeleteClicked(card_id));
                }
            }
            UiAction::Left => self.step(-1, Msg::PrevClicked),
            UiAction::Right => self.step(1, Msg::NextClicked),
            UiAction::Up => self.step(-(GRID_COLUMNS as isize), Msg::PrevClicked),
            UiAction::Down => self.step(GRID_COLUMNS as isize, Msg::NextClicked),
            UiAction::Ignore => {}
        }
    }

    fn insert_text(&mut self, text: &str) {
        let mut topic = self.view.topic.clone();
        topic.push_str(&text.replace("\r\n", "\n").replace('\r', "\n"));
        self.dispatch_msg(Msg::InputChanged(topic));
    }

    /// Focus mode navigates the deck; grid mode moves the cursor.
    fn step(&mut self, grid_delta: isize, focus_msg: Msg) {
        match self.view.mode {
            DisplayMode::Focus => self.dispatch_msg(focus_msg),
            DisplayMode::Grid => {
                self.ui.move_selection(grid_delta, self.view.cards.len());
                self.needs_redraw = true;
            }
        }
    }

    /// The card a flip or delete applies to.
    fn target_card(&self) -> Option<flashdeck_core::CardId> {
        match self.view.mode {
            DisplayMode::Focus => self.view.active_card().map(|card| card.card_id),
            DisplayMode::Grid => self.view.cards.get(self.ui.selected).map(|card| card.card_id),
        }
    }
}
