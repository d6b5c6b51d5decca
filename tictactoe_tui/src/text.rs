//! Plain-text rendering of a saved game, for `tictactoe show`.

use tictactoe_model::{GameState, KeyValueStore, Mode, decode, validate_state};
use tracing::instrument;

/// Renders the board as three text rows. Empty squares show their key (1-9).
pub fn render_board(state: &GameState) -> String {
    let board = state.board();
    let mut out = String::new();
    for row in 0..3 {
        let cells: Vec<String> = (0..3)
            .map(|col| {
                let index = row * 3 + col;
                match board[index] {
                    Some(player) => player.to_string().to_uppercase(),
                    None => (index + 1).to_string(),
                }
            })
            .collect();
        out.push_str(&format!(" {} | {} | {} \n", cells[0], cells[1], cells[2]));
        if row < 2 {
            out.push_str("---+---+---\n");
        }
    }
    out
}

/// One-line status of a state, as the game screen would show it.
pub fn status_line(state: &GameState) -> String {
    match (state.mode(), state.current_player(), state.outcome()) {
        (Mode::Start, _, _) => "Waiting for a player to be picked".to_string(),
        (Mode::Game, Some(player), _) => format!("Current player is {}", player),
        (Mode::Game, None, _) => "In game with no current player".to_string(),
        (Mode::Results, _, Some(outcome)) => outcome.to_string(),
        (Mode::Results, _, None) => "Game over".to_string(),
    }
}

/// Describes a saved state: board, status and whether it would be resumed.
pub fn describe(state: &GameState) -> String {
    let verdict = match validate_state(state) {
        Ok(()) => "Would resume: yes".to_string(),
        Err(rejection) => format!("Would resume: no ({})", rejection),
    };
    format!(
        "{}\n{}\nTurns played: {}\n{}\n",
        render_board(state),
        status_line(state),
        state.turns().len(),
        verdict
    )
}

/// Describes whatever is stored under `key` without changing it.
#[instrument(skip(store))]
pub fn describe_slot<S: KeyValueStore>(store: &S, key: &str) -> String {
    match store.get(key) {
        Err(e) => format!("Saved game could not be read: {}\n", e),
        Ok(None) => "No saved game.\n".to_string(),
        Ok(Some(text)) => match decode(&text) {
            Ok(state) => describe(&state),
            Err(e) => format!("Saved game is malformed and would be ignored: {}\n", e),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_model::{Cell, MemoryStore, Player, Turn, encode};

    fn turn(cell: usize, player: Player) -> Turn {
        Turn::new(Cell::new(cell).unwrap(), player, 0)
    }

    #[test]
    fn test_empty_board_shows_keys() {
        let text = render_board(&GameState::new());
        assert_eq!(text, " 1 | 2 | 3 \n---+---+---\n 4 | 5 | 6 \n---+---+---\n 7 | 8 | 9 \n");
    }

    #[test]
    fn test_marks_are_uppercase() {
        let state = GameState::from_parts(
            Mode::Game,
            Some(Player::X),
            vec![turn(0, Player::X), turn(4, Player::O)],
            None,
        );
        let text = render_board(&state);
        assert!(text.starts_with(" X | 2 | 3 "));
        assert!(text.contains(" 4 | O | 6 "));
    }

    #[test]
    fn test_describe_game_in_progress() {
        let state =
            GameState::from_parts(Mode::Game, Some(Player::O), vec![turn(0, Player::X)], None);
        let text = describe(&state);
        assert!(text.contains("Current player is o"));
        assert!(text.contains("Turns played: 1"));
        assert!(text.contains("Would resume: yes"));
    }

    #[test]
    fn test_describe_start_is_not_resumed() {
        let text = describe(&GameState::new());
        assert!(text.contains("Would resume: no"));
    }

    #[test]
    fn test_describe_slot_cases() {
        assert_eq!(describe_slot(&MemoryStore::new(), "gameData"), "No saved game.\n");

        let broken = MemoryStore::with_entry("gameData", "{not json");
        assert!(describe_slot(&broken, "gameData").starts_with("Saved game is malformed"));

        let state = GameState::from_parts(Mode::Game, Some(Player::X), vec![], None);
        let saved = MemoryStore::with_entry("gameData", encode(&state).unwrap());
        assert!(describe_slot(&saved, "gameData").contains("Would resume: yes"));
    }

    #[test]
    fn test_describe_slot_unavailable() {
        let mut store = MemoryStore::new();
        store.set_unavailable(true);
        assert!(describe_slot(&store, "gameData").starts_with("Saved game could not be read"));
    }
}
