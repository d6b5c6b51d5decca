//! Application state: the machine plus what is on screen.
//!
//! The view is only ever changed by notifications from the machine. Key
//! presses become intents; the machine decides what they do.

use crossterm::event::KeyCode;
use tictactoe_model::{
    CELL_COUNT, Cell, EventReceiver, GameEvent, GameMachine, GameState, IgnoreReason,
    KeyValueStore, Mode, Outcome, Player, Resume, TurnOutcome,
};
use tracing::{debug, instrument};

use crate::input::{Intent, intent_for};

/// What the screen currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct View {
    /// Which screen to draw.
    pub mode: Mode,
    /// Marks on the board, row-major.
    pub board: [Option<Player>; CELL_COUNT],
    /// Player shown as "current".
    pub current_player: Option<Player>,
    /// How the game ended, as decided by the machine.
    pub outcome: Option<Outcome>,
}

impl View {
    /// Redraws everything from a full state.
    fn render(&mut self, state: &GameState) {
        self.mode = state.mode();
        self.board = state.board();
        self.current_player = state.current_player();
        self.outcome = state.outcome().copied();
    }

    /// Applies one notification.
    pub fn apply(&mut self, event: &GameEvent) {
        match event {
            GameEvent::ModeChanged(state) => self.render(state),
            GameEvent::TurnTaken(turn) => self.board[turn.cell.index()] = Some(turn.player),
            GameEvent::PlayerSwitched(player) => self.current_player = Some(*player),
        }
    }
}

/// Main application state.
#[derive(Debug)]
pub struct App<S> {
    machine: GameMachine<S>,
    events: EventReceiver,
    view: View,
    cursor: Cell,
    notice: Option<String>,
    resume: Resume,
    should_quit: bool,
}

impl<S: KeyValueStore> App<S> {
    /// Subscribes to the machine, loads the saved game and draws it.
    #[instrument(skip(machine))]
    pub fn new(mut machine: GameMachine<S>) -> Self {
        let events = machine.subscribe();
        let resume = machine.resume();
        let mut app = Self {
            machine,
            events,
            view: View::default(),
            cursor: Cell::CENTER,
            notice: None,
            resume,
            should_quit: false,
        };
        app.sync();
        app
    }

    /// Applies every pending notification to the view.
    pub fn sync(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            debug!(?event, "Render");
            self.view.apply(&event);
        }
    }

    /// Handles one key press.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, key: KeyCode) {
        if let Some(intent) = intent_for(key, self.cursor) {
            self.handle_intent(intent);
        }
    }

    /// Forwards an intent to the machine and refreshes the view.
    #[instrument(skip(self))]
    pub fn handle_intent(&mut self, intent: Intent) {
        self.notice = None;
        match intent {
            Intent::Select(player) => self.machine.select_player_and_start(player),
            Intent::Play(index) => {
                if let TurnOutcome::Ignored(IgnoreReason::Occupied(cell)) =
                    self.machine.submit_turn(index)
                {
                    self.notice = Some(format!("Square {} is already taken", cell.index() + 1));
                }
                if let Some(cell) = Cell::new(index) {
                    self.cursor = cell;
                }
            }
            Intent::Cursor(cell) => self.cursor = cell,
            Intent::Restart => self.machine.restart(),
            Intent::Quit => self.should_quit = true,
        }
        self.sync();
    }

    /// Returns what is on screen.
    pub fn view(&self) -> &View {
        &self.view
    }

    /// Returns the highlighted cell.
    pub fn cursor(&self) -> Cell {
        self.cursor
    }

    /// Returns a one-off hint about the last key, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Returns how the session started.
    pub fn resume(&self) -> Resume {
        self.resume
    }

    /// Returns the machine.
    pub fn machine(&self) -> &GameMachine<S> {
        &self.machine
    }

    /// Returns true once the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Status line for the current screen.
    pub fn status(&self) -> String {
        match self.view.mode {
            Mode::Start => "Start as X or O (press x / o)".to_string(),
            Mode::Game => match self.view.current_player {
                Some(player) => format!("Current player is {}", player),
                None => String::new(),
            },
            Mode::Results => match &self.view.outcome {
                Some(outcome) => format!("{} Press r to restart.", outcome),
                None => "Game over. Press r to restart.".to_string(),
            },
        }
    }
}
