//! The pull side of the byte-stream protocol.
//!
//! A [`Reader`] exposes a window of available bytes (`chunk`) and refills it
//! on demand (`pull`). Three "no data" outcomes are kept distinct
//! throughout: the stream ended cleanly, no data is available *yet* (a
//! later call may succeed), or the stream failed. The primitive refill path
//! reports them as an explicit [`ReadOutcome`]; the public surface exposes
//! them through `pull()` + [`hope_for_more`](Reader::hope_for_more) +
//! [`healthy`](Reader::healthy).

use crate::status::Status;
use crate::stream::state::StreamState;

/// Result of a slow-path refill ([`ReadSource::read_internal`]).
///
/// Every variant carries the number of bytes delivered before the exit, so
/// partial progress is reflected on failure paths too.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// At least the requested minimum was delivered. The handle may still
    /// have turned unhealthy if an error followed the minimum; callers must
    /// check health separately.
    Delivered(usize),
    /// The stream ended cleanly before the minimum was reached.
    Exhausted(usize),
    /// No data available yet; a future call may deliver more.
    Pending(usize),
    /// The stream failed before the minimum; the state holds the status.
    Failed(usize),
}

impl ReadOutcome {
    /// Bytes delivered before this exit.
    pub fn delivered(self) -> usize {
        match self {
            ReadOutcome::Delivered(n)
            | ReadOutcome::Exhausted(n)
            | ReadOutcome::Pending(n)
            | ReadOutcome::Failed(n) => n,
        }
    }

    /// Whether the minimum-delivery contract was met.
    pub fn is_delivered(self) -> bool {
        matches!(self, ReadOutcome::Delivered(_))
    }
}

/// Refill primitive driven by [`BufferedReader`](crate::stream::BufferedReader).
///
/// Implementations produce bytes (from a codec engine, a file, ...) into a
/// caller buffer, advancing `state.limit_pos` by exactly the bytes
/// delivered on every exit path.
pub trait ReadSource {
    /// Delivers between `min_length` and `dest.len()` bytes into `dest`, or
    /// fewer only when the stream is exhausted, pending, or failed.
    ///
    /// `min_length` must be positive and at most `dest.len()`.
    fn read_internal(
        &mut self,
        state: &mut StreamState,
        dest: &mut [u8],
        min_length: usize,
    ) -> ReadOutcome;

    /// Whether the source has permanently run out of data (e.g. the codec
    /// engine saw its end-of-frame). Lets the buffering layer skip buffer
    /// allocation and refill attempts.
    fn exhausted(&self) -> bool {
        false
    }

    /// Whether a future refill could produce data when none is buffered.
    /// Health is checked by the caller.
    fn hope_for_more(&self) -> bool {
        !self.exhausted()
    }

    /// Close-time hook: detect trailing incomplete data, close an owned
    /// underlying handle (propagating its failure), and release all
    /// resources. Must be idempotent. `has_buffered` tells whether the
    /// outer buffer still holds undelivered bytes.
    fn done(&mut self, state: &mut StreamState, has_buffered: bool);

    /// Abrupt teardown: release resources without finalizing. Never touches
    /// an underlying handle beyond dropping an owned one.
    fn cancel(&mut self) {}
}

/// A pull-based byte stream.
pub trait Reader {
    /// Ensures at least one byte is available, refilling if needed. Returns
    /// `false` when no byte can be made available right now; consult
    /// [`hope_for_more`](Reader::hope_for_more) and
    /// [`healthy`](Reader::healthy) to tell the three outcomes apart.
    fn pull(&mut self) -> bool;

    /// The window of available bytes. May be empty; `pull()` first.
    fn chunk(&self) -> &[u8];

    /// Advances past `n` bytes of the window. `n` must not exceed
    /// `chunk().len()`.
    fn consume(&mut self, n: usize);

    /// `true` when a future `pull()` might succeed; `false` when the stream
    /// is permanently exhausted, failed, or cancelled.
    fn hope_for_more(&self) -> bool;

    fn healthy(&self) -> bool;

    /// The first failure recorded, or ok.
    fn status(&self) -> Status;

    /// Bytes delivered across this interface so far (consumed by the
    /// caller), independent of internal buffering.
    fn pos(&self) -> u64;

    /// Closes the stream: verifies a clean end where the source defines
    /// one, closes an owned underlying handle, releases resources. Returns
    /// `true` iff the handle is cleanly closed. Closing again has no
    /// further effect.
    fn close(&mut self) -> bool;

    /// Releases resources without attempting a clean finalize. A borrowed
    /// underlying handle is left untouched. Terminal.
    fn cancel(&mut self);

    /// Reads exactly `dest.len()` bytes. On `false` the stream could not
    /// supply them; `dest` may be partially overwritten.
    fn read(&mut self, dest: &mut [u8]) -> bool {
        let mut copied = 0;
        while copied < dest.len() {
            if !self.pull() {
                return false;
            }
            let chunk = self.chunk();
            let n = chunk.len().min(dest.len() - copied);
            dest[copied..copied + n].copy_from_slice(&chunk[..n]);
            self.consume(n);
            copied += n;
        }
        true
    }

    /// Reads everything until clean exhaustion into `dest`. Returns `false`
    /// if the stream fails or reports a transient stall instead of ending.
    fn read_to_end(&mut self, dest: &mut Vec<u8>) -> bool {
        while self.pull() {
            dest.extend_from_slice(self.chunk());
            let n = self.chunk().len();
            self.consume(n);
        }
        self.healthy() && !self.hope_for_more()
    }
}
