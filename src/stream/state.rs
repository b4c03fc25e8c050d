//! Shared stream-handle state: health, first-failure status, position.

use crate::status::Status;

/// Health of a stream handle.
///
/// `Healthy` is the only state in which operations may succeed. The other
/// three are terminal: once entered, no operation on the handle returns
/// success again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Health {
    Healthy,
    /// Closed cleanly. Not a failure; further operations are no-ops.
    Closed,
    /// Failed; the stored status describes the first failure.
    Failed,
    /// Abandoned without finalization. Not a failure for reporting
    /// purposes, but no further operations succeed.
    Cancelled,
}

/// Health flag, failure status, and the monotone position counter shared by
/// every buffered stream handle.
#[derive(Debug)]
pub struct StreamState {
    health: Health,
    status: Status,
    limit_pos: u64,
}

impl StreamState {
    pub fn new() -> Self {
        StreamState {
            health: Health::Healthy,
            status: Status::ok(),
            limit_pos: 0,
        }
    }

    pub fn health(&self) -> Health {
        self.health
    }

    pub fn healthy(&self) -> bool {
        self.health == Health::Healthy
    }

    /// The first failure recorded, or ok.
    pub fn status(&self) -> Status {
        self.status.clone()
    }

    /// Marks the handle failed with `status`. Returns `false` so call sites
    /// can write `return state.fail(...)`.
    ///
    /// A later failure never overwrites an earlier one; the first message is
    /// the most specific.
    pub fn fail(&mut self, status: Status) -> bool {
        debug_assert!(!status.is_ok());
        if self.health == Health::Healthy || self.health == Health::Closed {
            self.health = Health::Failed;
            self.status = status;
        }
        false
    }

    pub fn mark_closed(&mut self) {
        if self.health == Health::Healthy {
            self.health = Health::Closed;
        }
    }

    pub fn mark_cancelled(&mut self) {
        if self.health == Health::Healthy {
            self.health = Health::Cancelled;
        }
    }

    /// Position of the stream end delivered so far across the primitive
    /// boundary. Only ever advances.
    pub fn limit_pos(&self) -> u64 {
        self.limit_pos
    }

    pub fn advance_limit_pos(&mut self, n: usize) {
        self.limit_pos += n as u64;
    }
}

impl Default for StreamState {
    fn default() -> Self {
        StreamState::new()
    }
}
