use std::collections::VecDeque;

use navcube_core::Move;
use web_time::Duration;

use crate::{Completion, MoveError};

/// Move waiting to be played.
#[derive(Debug, Clone)]
pub struct QueuedMove {
    /// Move to play.
    pub mv: Move,
    /// How long the move takes.
    pub duration: Duration,
    /// Resolved when the move has fully snapped, or when it is discarded.
    pub completion: Completion,
}

/// FIFO of moves waiting to be played, plus the waiter for the drain in
/// progress.
///
/// Moves are only ever appended at the back and popped from the front.
#[derive(Debug, Default, Clone)]
pub struct MoveQueue {
    pending: VecDeque<QueuedMove>,
    /// Resolved when the queue next becomes empty and the engine idle.
    drain: Option<Completion>,
    /// Number of drains started so far.
    drains_started: usize,
}
impl MoveQueue {
    /// Appends a move and returns its completion handle.
    pub fn enqueue(&mut self, mv: Move, duration: Duration) -> Completion {
        let completion = Completion::new();
        self.pending.push_back(QueuedMove {
            mv,
            duration,
            completion: completion.clone(),
        });
        completion
    }
    /// Removes the next move to play.
    pub fn pop_front(&mut self) -> Option<QueuedMove> {
        self.pending.pop_front()
    }

    /// Returns the number of moves waiting.
    pub fn len(&self) -> usize {
        self.pending.len()
    }
    /// Returns whether no moves are waiting.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
    /// Returns the moves waiting, in the order they will be played.
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.pending.iter().map(|queued| queued.mv)
    }

    /// Returns the waiter for the drain in progress, starting a new drain if
    /// there is none. Moves enqueued during a drain join it.
    pub fn drain(&mut self) -> Completion {
        if let Some(drain) = &self.drain {
            return drain.clone();
        }
        self.drains_started += 1;
        log::trace!("starting drain #{} with {} moves", self.drains_started, self.len());
        self.drain.insert(Completion::new()).clone()
    }
    /// Returns whether a drain is in progress.
    pub fn is_draining(&self) -> bool {
        self.drain.is_some()
    }
    /// Returns the number of drains started so far.
    pub fn drains_started(&self) -> usize {
        self.drains_started
    }

    /// Resolves the drain waiter, if any. Called once the queue is empty and
    /// the last move has snapped.
    pub(crate) fn finish_drain(&mut self) {
        if let Some(drain) = self.drain.take() {
            log::trace!("drain #{} finished", self.drains_started);
            drain.resolve(Ok(()));
        }
    }

    /// Discards every waiting move and resolves the drain waiter with
    /// `error`. Returns the number of moves discarded.
    pub fn abort(&mut self, error: MoveError) -> usize {
        let count = self.pending.len();
        for queued in self.pending.drain(..) {
            queued.completion.resolve(Err(MoveError::Discarded));
        }
        if let Some(drain) = self.drain.take() {
            drain.resolve(Err(error));
        }
        count
    }
}
