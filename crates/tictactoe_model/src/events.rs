//! Outbound change notifications.
//!
//! Intents flow into the machine through its methods. Changes flow out
//! through these events, one channel per subscriber.

use crate::state::GameState;
use crate::types::{Player, Turn};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{debug, trace};

/// A change the presentation layer should react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The mode changed (or the game was (re)announced). Carries the full
    /// state so a subscriber can redraw everything.
    ModeChanged(GameState),
    /// A turn was recorded.
    TurnTaken(Turn),
    /// The move passed to the other player.
    PlayerSwitched(Player),
}

/// Receiving end of a subscription.
///
/// The channel needs no async runtime: drain it with `try_recv`.
pub type EventReceiver = UnboundedReceiver<GameEvent>;

/// Fans events out to every live subscriber.
#[derive(Debug, Default)]
pub(crate) struct Notifier {
    subscribers: Vec<UnboundedSender<GameEvent>>,
}

impl Notifier {
    pub(crate) fn subscribe(&mut self) -> EventReceiver {
        let (tx, rx) = unbounded_channel();
        self.subscribers.push(tx);
        debug!(subscribers = self.subscribers.len(), "New subscriber");
        rx
    }

    /// Sends to every subscriber, dropping those whose receiver is gone.
    pub(crate) fn emit(&mut self, event: GameEvent) {
        trace!(?event, "Emitting");
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.subscribers.len()
    }
}
