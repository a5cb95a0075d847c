//! Event queue between widgets and board handlers.
//!
//! Widgets only enqueue; the queue is drained at the start of the next frame
//! and every event runs to completion before the next one is taken.

use board_core::{BoardController, BoardView};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use shared::protocol::BoardEvent;

use crate::controller::events::UiError;

pub const EVENT_QUEUE_CAPACITY: usize = 256;

pub fn queue_event(event_tx: &Sender<BoardEvent>, event: BoardEvent) -> Result<(), UiError> {
    let name = event.name();
    match event_tx.try_send(event) {
        Ok(()) => {
            tracing::trace!(event = name, "queued board event");
            Ok(())
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(event = name, "board event queue is full");
            Err(UiError::queue(name, "too many pending actions; please retry"))
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(event = name, "board event queue disconnected");
            Err(UiError::queue(name, "board event processing stopped"))
        }
    }
}

/// Dispatches every queued event in arrival order. Returns the failures;
/// a failing event never stops the ones behind it.
pub fn drain_events<V: BoardView>(
    event_rx: &Receiver<BoardEvent>,
    board: &mut BoardController<V>,
) -> Vec<UiError> {
    let mut errors = Vec::new();
    while let Ok(event) = event_rx.try_recv() {
        let name = event.name();
        if let Err(err) = board.dispatch(event) {
            tracing::warn!(event = name, error = %err, "board event rejected");
            errors.push(UiError::from_board_error(name, &err));
        }
    }
    errors
}
