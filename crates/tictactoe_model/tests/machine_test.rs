//! Tests for the game-state machine transitions and notifications.

use tictactoe_model::{
    EventReceiver, FixedClock, GameEvent, GameMachine, IgnoreReason, MemoryStore, Mode, Outcome,
    Player, TurnOutcome, WinLine,
};

fn machine() -> GameMachine<MemoryStore> {
    GameMachine::new(MemoryStore::new()).with_clock(FixedClock(1_530_000_000_000))
}

fn drain(rx: &mut EventReceiver) -> Vec<GameEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[test]
fn test_x_wins_top_row() {
    let mut m = machine();
    m.select_player_and_start(Player::X);

    // X takes 0, 1, 2 while O takes 3, 4.
    for cell in [0, 3, 1, 4] {
        assert!(m.submit_turn(cell).is_accepted());
    }
    let result = m.submit_turn(2);

    assert_eq!(result, TurnOutcome::Won(WinLine::TopRow));
    assert_eq!(m.is_win(), Some(WinLine::TopRow));
    assert_eq!(m.mode(), Mode::Results);
    assert_eq!(m.current_player(), Some(Player::X));
    assert_eq!(m.outcome().and_then(Outcome::winner), Some(Player::X));
}

#[test]
fn test_full_board_without_line_is_draw() {
    let mut m = machine();
    m.select_player_and_start(Player::X);

    // X O X / X O O / O X X
    let cells = [0, 1, 2, 4, 3, 5, 7, 6, 8];
    for &cell in &cells[..8] {
        assert!(matches!(m.submit_turn(cell), TurnOutcome::Switched(_)));
    }
    assert_eq!(m.submit_turn(cells[8]), TurnOutcome::Draw);

    assert_eq!(m.mode(), Mode::Results);
    assert_eq!(m.turns().len(), 9);
    assert_eq!(m.is_win(), None);
    assert!(m.is_draw());
    assert_eq!(m.outcome(), Some(&Outcome::Draw));
}

#[test]
fn test_win_on_last_cell_is_not_draw() {
    let mut m = machine();
    m.select_player_and_start(Player::X);

    // X fills the left column on the ninth move.
    // Board: X O X / X O O / X X O  -> X: 0,2,3,7,6 ; O: 1,4,5,8
    for cell in [0, 1, 2, 4, 3, 5, 7, 8] {
        assert!(matches!(m.submit_turn(cell), TurnOutcome::Switched(_)));
    }
    assert_eq!(m.submit_turn(6), TurnOutcome::Won(WinLine::LeftColumn));
    assert_eq!(m.outcome().and_then(Outcome::winner), Some(Player::X));
}

#[test]
fn test_turn_in_start_mode_is_noop() {
    let mut m = machine();
    let mut rx = m.subscribe();

    assert_eq!(
        m.submit_turn(5),
        TurnOutcome::Ignored(IgnoreReason::NotInGame(Mode::Start))
    );
    assert_eq!(m.mode(), Mode::Start);
    assert!(m.turns().is_empty());
    assert_eq!(m.current_player(), None);
    assert!(drain(&mut rx).is_empty());
    assert_eq!(m.store().write_count(), 0);
}

#[test]
fn test_turn_in_results_mode_is_noop() {
    let mut m = machine();
    m.select_player_and_start(Player::O);
    for cell in [0, 3, 1, 4, 2] {
        m.submit_turn(cell);
    }
    let before = m.state().clone();
    let mut rx = m.subscribe();

    assert_eq!(
        m.submit_turn(8),
        TurnOutcome::Ignored(IgnoreReason::NotInGame(Mode::Results))
    );
    assert_eq!(m.state(), &before);
    assert!(drain(&mut rx).is_empty());
}

#[test]
fn test_occupied_cell_is_noop() {
    let mut m = machine();
    m.select_player_and_start(Player::X);
    m.submit_turn(4);
    let before = m.state().clone();
    let writes = m.store().write_count();
    let mut rx = m.subscribe();

    let result = m.submit_turn(4);

    assert!(matches!(
        result,
        TurnOutcome::Ignored(IgnoreReason::Occupied(cell)) if cell.index() == 4
    ));
    assert_eq!(m.state(), &before);
    assert_eq!(m.current_player(), Some(Player::O));
    assert_eq!(m.store().write_count(), writes);
    assert!(drain(&mut rx).is_empty());
}

#[test]
fn test_restart_resets_everything() {
    let mut m = machine();
    m.select_player_and_start(Player::X);
    m.submit_turn(0);
    m.submit_turn(4);

    m.restart();

    assert_eq!(m.mode(), Mode::Start);
    assert!(m.turns().is_empty());
    assert_eq!(m.current_player(), None);
    assert!(m.outcome().is_none());
}

#[test]
fn test_restart_from_start_still_notifies() {
    let mut m = machine();
    let mut rx = m.subscribe();
    m.restart();
    let events = drain(&mut rx);
    assert_eq!(events.len(), 1);
    assert!(matches!(&events[0], GameEvent::ModeChanged(s) if s.mode() == Mode::Start));
    assert_eq!(m.store().write_count(), 1);
}

#[test]
fn test_select_player_notifies_mode_change() {
    let mut m = machine();
    let mut rx = m.subscribe();

    m.select_player_and_start(Player::O);

    let events = drain(&mut rx);
    assert_eq!(events.len(), 1);
    match &events[0] {
        GameEvent::ModeChanged(state) => {
            assert_eq!(state.mode(), Mode::Game);
            assert_eq!(state.current_player(), Some(Player::O));
        }
        other => panic!("unexpected event {:?}", other),
    }
}

#[test]
fn test_switching_turn_emits_turn_then_switch() {
    let mut m = machine();
    m.select_player_and_start(Player::X);
    let mut rx = m.subscribe();

    m.submit_turn(8);

    let events = drain(&mut rx);
    assert_eq!(events.len(), 2);
    match &events[0] {
        GameEvent::TurnTaken(turn) => {
            assert_eq!(turn.cell.index(), 8);
            assert_eq!(turn.player, Player::X);
            assert_eq!(turn.time, 1_530_000_000_000);
        }
        other => panic!("unexpected event {:?}", other),
    }
    assert_eq!(events[1], GameEvent::PlayerSwitched(Player::O));
}

#[test]
fn test_winning_turn_emits_turn_then_mode_change() {
    let mut m = machine();
    m.select_player_and_start(Player::X);
    for cell in [2, 0, 4, 1] {
        m.submit_turn(cell);
    }
    let mut rx = m.subscribe();

    assert_eq!(m.submit_turn(6), TurnOutcome::Won(WinLine::AntiDiagonal));

    let events = drain(&mut rx);
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], GameEvent::TurnTaken(_)));
    match &events[1] {
        GameEvent::ModeChanged(state) => {
            assert_eq!(state.mode(), Mode::Results);
            assert_eq!(
                state.outcome(),
                Some(&Outcome::Winner {
                    player: Player::X,
                    line: WinLine::AntiDiagonal
                })
            );
        }
        other => panic!("unexpected event {:?}", other),
    }
}

#[test]
fn test_player_selection_accepted_mid_game() {
    let mut m = machine();
    m.select_player_and_start(Player::X);
    m.submit_turn(0);
    assert_eq!(m.current_player(), Some(Player::O));

    m.select_player_and_start(Player::X);

    assert_eq!(m.mode(), Mode::Game);
    assert_eq!(m.current_player(), Some(Player::X));
    assert_eq!(m.turns().len(), 1);
}

#[test]
fn test_o_may_open() {
    let mut m = machine();
    m.select_player_and_start(Player::O);
    m.submit_turn(4);
    assert_eq!(m.turns()[0].player, Player::O);
    assert_eq!(m.current_player(), Some(Player::X));
}

#[test]
fn test_every_subscriber_sees_changes() {
    let mut m = machine();
    let mut a = m.subscribe();
    let mut b = m.subscribe();
    m.select_player_and_start(Player::X);
    assert_eq!(drain(&mut a).len(), 1);
    assert_eq!(drain(&mut b).len(), 1);
}
