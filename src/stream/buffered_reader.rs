//! Generic buffering over a [`ReadSource`] refill primitive.

use crate::status::Status;
use crate::stream::reader::{ReadOutcome, ReadSource, Reader};
use crate::stream::state::{Health, StreamState};

/// A [`Reader`] that manages a backing buffer and delegates refills to a
/// [`ReadSource`].
///
/// The buffer is allocated lazily on the first refill and skipped entirely
/// once the source reports exhaustion, so a stream that ends before anyone
/// pulls never allocates. `limit_pos` tracks the stream position of the
/// buffer end; [`pos`](Reader::pos) subtracts what is still buffered.
#[derive(Debug)]
pub struct BufferedReader<S: ReadSource> {
    state: StreamState,
    source: S,
    buf: Vec<u8>,
    start: usize,
    limit: usize,
    buffer_size: usize,
}

impl<S: ReadSource> BufferedReader<S> {
    /// `buffer_size` must be positive.
    pub fn with_source(source: S, buffer_size: usize) -> Self {
        assert!(buffer_size > 0, "buffer size must be positive");
        BufferedReader {
            state: StreamState::new(),
            source,
            buf: Vec::new(),
            start: 0,
            limit: 0,
            buffer_size,
        }
    }

    /// Bytes currently available without refilling.
    pub fn available(&self) -> usize {
        self.limit - self.start
    }

    /// Marks the handle failed. Intended for sources and adapter
    /// constructors; returns `false` for tail-call style.
    pub fn fail(&mut self, status: Status) -> bool {
        self.state.fail(status)
    }

    /// The refill source. Adapters use this to expose codec-specific
    /// accessors.
    pub fn source(&self) -> &S {
        &self.source
    }

    fn pull_slow(&mut self) -> bool {
        debug_assert_eq!(self.available(), 0);
        if !self.state.healthy() {
            return false;
        }
        // Skip allocating the buffer after the source already ended.
        if self.source.exhausted() {
            return false;
        }
        if self.buf.is_empty() {
            self.buf = vec![0; self.buffer_size];
        }
        let outcome = self
            .source
            .read_internal(&mut self.state, self.buf.as_mut_slice(), 1);
        let n = outcome.delivered();
        self.start = 0;
        self.limit = n;
        n > 0
    }

    fn release(&mut self) {
        self.buf = Vec::new();
        self.start = 0;
        self.limit = 0;
    }
}

impl<S: ReadSource> Reader for BufferedReader<S> {
    fn pull(&mut self) -> bool {
        if self.start < self.limit {
            return true;
        }
        self.pull_slow()
    }

    fn chunk(&self) -> &[u8] {
        &self.buf[self.start..self.limit]
    }

    fn consume(&mut self, n: usize) {
        debug_assert!(n <= self.available());
        self.start += n;
    }

    fn hope_for_more(&self) -> bool {
        self.available() > 0 || (self.state.healthy() && self.source.hope_for_more())
    }

    fn healthy(&self) -> bool {
        self.state.healthy()
    }

    fn status(&self) -> Status {
        self.state.status()
    }

    fn pos(&self) -> u64 {
        self.state.limit_pos() - self.available() as u64
    }

    fn read(&mut self, dest: &mut [u8]) -> bool {
        let buffered = self.available().min(dest.len());
        dest[..buffered].copy_from_slice(&self.buf[self.start..self.start + buffered]);
        self.start += buffered;
        let mut copied = buffered;
        if copied == dest.len() {
            return true;
        }
        if !self.state.healthy() {
            return false;
        }
        let rest = dest.len() - copied;
        if rest >= self.buffer_size {
            // Large remainder: bypass the buffer, min == max == rest.
            let outcome = self
                .source
                .read_internal(&mut self.state, &mut dest[copied..], rest);
            return outcome.is_delivered();
        }
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

    fn close(&mut self) -> bool {
        match self.state.health() {
            Health::Closed => return true,
            Health::Cancelled => return false,
            Health::Failed | Health::Healthy => {}
        }
        let has_buffered = self.available() > 0;
        self.source.done(&mut self.state, has_buffered);
        self.release();
        if self.state.healthy() {
            self.state.mark_closed();
            true
        } else {
            false
        }
    }

    fn cancel(&mut self) {
        if self.state.healthy() {
            self.source.cancel();
            self.state.mark_cancelled();
            self.release();
        }
    }
}
