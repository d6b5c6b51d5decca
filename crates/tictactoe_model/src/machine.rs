//! The game-state machine.
//!
//! START -> GAME -> RESULTS -> (restart) -> START. Intents that do not
//! apply to the current mode are ignored, never reported as errors.

use crate::clock::{Clock, SystemClock};
use crate::error::StoreErrorKind;
use crate::events::{EventReceiver, GameEvent, Notifier};
use crate::rules::{self, WinLine};
use crate::state::{GameState, Rejection, validate_state};
use crate::storage::{self, KeyValueStore, STORAGE_KEY};
use crate::types::{Cell, Mode, Outcome, Player, Turn};
use tracing::{debug, info, instrument, warn};

/// Why a turn was not taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum IgnoreReason {
    /// Turns are only taken in [`Mode::Game`].
    #[display("not playing (mode is {})", _0)]
    NotInGame(Mode),
    /// The index is not a board cell.
    #[display("cell {} is off the board", _0)]
    OffBoard(usize),
    /// The cell was already played.
    #[display("cell {} is taken", _0)]
    Occupied(Cell),
}

/// What a call to [`GameMachine::submit_turn`] did.
///
/// Every accepted turn produces exactly one of `Won`, `Draw` or
/// `Switched`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Nothing changed.
    Ignored(IgnoreReason),
    /// The mover completed this line; the game is over.
    Won(WinLine),
    /// The board filled up; the game is over.
    Draw,
    /// The game goes on with this player to move.
    Switched(Player),
}

impl TurnOutcome {
    /// Returns true if the turn was recorded.
    pub fn is_accepted(&self) -> bool {
        !matches!(self, TurnOutcome::Ignored(_))
    }
}

/// Why the machine started from scratch instead of resuming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum FreshReason {
    /// Nothing was saved.
    #[display("nothing saved")]
    Absent,
    /// The store could not be read.
    #[display("store unreadable")]
    Unreadable,
    /// The saved blob could not be decoded.
    #[display("saved data malformed")]
    Malformed,
    /// The saved state decoded but may not be resumed.
    #[display("saved state rejected: {}", _0)]
    Rejected(Rejection),
}

/// Result of [`GameMachine::resume`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resume {
    /// The saved game was adopted.
    Resumed,
    /// The machine kept the fresh start state.
    Fresh(FreshReason),
}

/// Tic-tac-toe game-state machine.
///
/// Owns the state, persists it to an injected key-value store after every
/// change of mode or player, and announces changes to subscribers.
#[derive(Debug)]
pub struct GameMachine<S> {
    state: GameState,
    store: S,
    key: String,
    clock: Box<dyn Clock>,
    notifier: Notifier,
}

impl<S: KeyValueStore> GameMachine<S> {
    /// Creates a machine in the fresh start state.
    ///
    /// Nothing is loaded until [`resume`](Self::resume) is called.
    pub fn new(store: S) -> Self {
        Self {
            state: GameState::new(),
            store,
            key: STORAGE_KEY.to_string(),
            clock: Box::new(SystemClock),
            notifier: Notifier::default(),
        }
    }

    /// Uses a different storage slot.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Uses a different time source for turn timestamps.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Opens a new notification channel.
    pub fn subscribe(&mut self) -> EventReceiver {
        self.notifier.subscribe()
    }

    /// Returns the current state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the mode.
    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    /// Returns the player to move.
    pub fn current_player(&self) -> Option<Player> {
        self.state.current_player()
    }

    /// Returns the recorded turns.
    pub fn turns(&self) -> &[Turn] {
        self.state.turns()
    }

    /// Returns how the game ended, once it has.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.state.outcome()
    }

    /// Returns the storage slot name.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the backing store mutably.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Loads the saved game, adopts it if it may be resumed, and announces
    /// the starting state.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn resume(&mut self) -> Resume {
        let resume = match self.load() {
            Ok(saved) => match validate_state(&saved) {
                Ok(()) => {
                    self.state = saved;
                    Resume::Resumed
                }
                Err(rejection) => Resume::Fresh(FreshReason::Rejected(rejection)),
            },
            Err(reason) => Resume::Fresh(reason),
        };

        match resume {
            Resume::Resumed => info!(
                mode = %self.state.mode(),
                turns = self.state.turns().len(),
                "Resumed saved game"
            ),
            Resume::Fresh(reason) => info!(%reason, "Starting fresh game"),
        }

        self.notifier.emit(GameEvent::ModeChanged(self.state.clone()));
        resume
    }

    /// Picks the player to move and enters [`Mode::Game`].
    ///
    /// Accepted in every mode. Turns already on the board are kept.
    #[instrument(skip(self))]
    pub fn select_player_and_start(&mut self, player: Player) {
        info!(%player, from = %self.state.mode(), "Player selected");
        self.state.set_current_player(player);
        self.state.set_outcome(None);
        self.set_mode(Mode::Game);
    }

    /// Plays the current player's mark at `index`.
    ///
    /// Ignored outside [`Mode::Game`], for indices off the board and for
    /// cells already played.
    #[instrument(skip(self))]
    pub fn submit_turn(&mut self, index: usize) -> TurnOutcome {
        if self.state.mode() != Mode::Game {
            return self.ignore(IgnoreReason::NotInGame(self.state.mode()));
        }
        let Some(player) = self.state.current_player() else {
            return self.ignore(IgnoreReason::NotInGame(self.state.mode()));
        };
        let Some(cell) = Cell::new(index) else {
            return self.ignore(IgnoreReason::OffBoard(index));
        };
        if self.state.is_occupied(cell) {
            return self.ignore(IgnoreReason::Occupied(cell));
        }

        let turn = Turn::new(cell, player, self.clock.now_millis());
        self.state.push_turn(turn);
        debug!(%turn, turns = self.state.turns().len(), "Turn taken");
        self.notifier.emit(GameEvent::TurnTaken(turn));

        if let Some(line) = self.is_win() {
            info!(%player, %line, "Game won");
            self.state.set_outcome(Some(Outcome::Winner { player, line }));
            self.set_mode(Mode::Results);
            TurnOutcome::Won(line)
        } else if self.is_draw() {
            info!("Game drawn");
            self.state.set_outcome(Some(Outcome::Draw));
            self.set_mode(Mode::Results);
            TurnOutcome::Draw
        } else {
            let next = player.opponent();
            self.state.set_current_player(next);
            self.persist();
            self.notifier.emit(GameEvent::PlayerSwitched(next));
            TurnOutcome::Switched(next)
        }
    }

    /// Discards the game and returns to [`Mode::Start`].
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        info!("Restarting");
        self.state = GameState::new();
        self.set_mode(Mode::Start);
    }

    /// The first line held entirely by the current player.
    pub fn is_win(&self) -> Option<WinLine> {
        let player = self.state.current_player()?;
        rules::winning_line(self.state.turns(), player)
    }

    /// True once all nine cells are played.
    pub fn is_draw(&self) -> bool {
        rules::is_full(self.state.turns())
    }

    fn set_mode(&mut self, mode: Mode) {
        self.state.set_mode(mode);
        self.persist();
        self.notifier.emit(GameEvent::ModeChanged(self.state.clone()));
    }

    fn ignore(&self, reason: IgnoreReason) -> TurnOutcome {
        debug!(%reason, "Turn ignored");
        TurnOutcome::Ignored(reason)
    }

    /// Best-effort save. Failures leave the in-memory state authoritative.
    fn persist(&mut self) {
        let result = storage::encode(&self.state)
            .and_then(|text| self.store.set(&self.key, &text));
        if let Err(e) = result {
            warn!(error = %e, "Saving game state failed");
        }
    }

    fn load(&self) -> Result<GameState, FreshReason> {
        let text = match self.store.get(&self.key) {
            Ok(Some(text)) => text,
            Ok(None) => return Err(FreshReason::Absent),
            Err(e) => {
                warn!(error = %e, "Loading game state failed");
                return Err(match e.kind {
                    StoreErrorKind::Malformed => FreshReason::Malformed,
                    StoreErrorKind::Unavailable | StoreErrorKind::Io => FreshReason::Unreadable,
                });
            }
        };
        storage::decode(&text).map_err(|e| {
            warn!(error = %e, "Saved game state is not valid JSON");
            FreshReason::Malformed
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::storage::MemoryStore;

    fn machine() -> GameMachine<MemoryStore> {
        GameMachine::new(MemoryStore::new()).with_clock(FixedClock(1_000))
    }

    #[test]
    fn test_new_machine_is_fresh() {
        let m = machine();
        assert_eq!(m.mode(), Mode::Start);
        assert_eq!(m.current_player(), None);
        assert!(m.turns().is_empty());
        assert_eq!(m.store().write_count(), 0);
    }

    #[test]
    fn test_select_player_starts_game_and_saves() {
        let mut m = machine();
        m.select_player_and_start(Player::O);
        assert_eq!(m.mode(), Mode::Game);
        assert_eq!(m.current_player(), Some(Player::O));
        let saved = storage::decode(m.store().peek(STORAGE_KEY).unwrap()).unwrap();
        assert_eq!(&saved, m.state());
    }

    #[test]
    fn test_turn_uses_clock() {
        let mut m = machine();
        m.select_player_and_start(Player::X);
        m.submit_turn(4);
        assert_eq!(m.turns()[0].time, 1_000);
    }

    #[test]
    fn test_turn_switches_player() {
        let mut m = machine();
        m.select_player_and_start(Player::X);
        assert_eq!(m.submit_turn(4), TurnOutcome::Switched(Player::O));
        assert_eq!(m.current_player(), Some(Player::O));
    }

    #[test]
    fn test_off_board_index_ignored() {
        let mut m = machine();
        m.select_player_and_start(Player::X);
        let writes = m.store().write_count();
        let mut rx = m.subscribe();
        assert_eq!(
            m.submit_turn(9),
            TurnOutcome::Ignored(IgnoreReason::OffBoard(9))
        );
        assert!(m.turns().is_empty());
        assert_eq!(m.store().write_count(), writes);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_win_records_outcome() {
        let mut m = machine();
        m.select_player_and_start(Player::X);
        for cell in [0, 3, 1, 4] {
            m.submit_turn(cell);
        }
        assert_eq!(m.submit_turn(2), TurnOutcome::Won(WinLine::TopRow));
        assert_eq!(m.mode(), Mode::Results);
        assert_eq!(
            m.outcome(),
            Some(&Outcome::Winner {
                player: Player::X,
                line: WinLine::TopRow
            })
        );
    }

    #[test]
    fn test_custom_key() {
        let mut m = machine().with_key("slot");
        m.select_player_and_start(Player::X);
        assert!(m.store().peek("slot").is_some());
        assert!(m.store().peek(STORAGE_KEY).is_none());
        assert_eq!(m.key(), "slot");
    }

    #[test]
    fn test_reselect_from_results_clears_outcome() {
        let mut m = machine();
        m.select_player_and_start(Player::X);
        for cell in [0, 3, 1, 4, 2] {
            m.submit_turn(cell);
        }
        m.select_player_and_start(Player::O);
        assert_eq!(m.mode(), Mode::Game);
        assert!(m.outcome().is_none());
        assert_eq!(m.turns().len(), 5);
    }
}
