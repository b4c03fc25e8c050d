//! Generic buffering over a [`WriteSink`] drain primitive.

use crate::status::Status;
use crate::stream::state::{Health, StreamState};
use crate::stream::writer::{FlushType, WriteSink, Writer};

/// A [`Writer`] that accumulates bytes up to a fixed size and drains them
/// through a [`WriteSink`].
///
/// Writes larger than the buffer bypass it and go straight to the sink.
/// `pos()` counts bytes accepted across the outer interface, including
/// bytes still sitting in this buffer.
#[derive(Debug)]
pub struct BufferedWriter<S: WriteSink> {
    state: StreamState,
    sink: S,
    buf: Vec<u8>,
    buffer_size: usize,
}

impl<S: WriteSink> BufferedWriter<S> {
    /// `buffer_size` must be positive.
    pub fn with_sink(sink: S, buffer_size: usize) -> Self {
        assert!(buffer_size > 0, "buffer size must be positive");
        BufferedWriter {
            state: StreamState::new(),
            sink,
            buf: Vec::new(),
            buffer_size,
        }
    }

    /// Bytes accepted but not yet drained to the sink.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// Marks the handle failed. Intended for sinks and adapter
    /// constructors; returns `false` for tail-call style.
    pub fn fail(&mut self, status: Status) -> bool {
        self.state.fail(status)
    }

    /// The drain sink. Adapters use this to expose codec-specific
    /// accessors.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn drain(&mut self) -> bool {
        if self.buf.is_empty() {
            return true;
        }
        let ok = self.sink.write_internal(&mut self.state, &self.buf);
        self.buf.clear();
        ok
    }

    fn release(&mut self) {
        self.buf = Vec::new();
    }
}

impl<S: WriteSink> Writer for BufferedWriter<S> {
    fn write(&mut self, src: &[u8]) -> bool {
        if !self.state.healthy() {
            return false;
        }
        if self.buf.len() + src.len() <= self.buffer_size {
            if self.buf.capacity() == 0 {
                self.buf.reserve(self.buffer_size);
            }
            self.buf.extend_from_slice(src);
            self.state.advance_limit_pos(src.len());
            return true;
        }
        if !self.drain() {
            return false;
        }
        if src.len() >= self.buffer_size {
            // Oversized write: hand it to the sink directly.
            if !self.sink.write_internal(&mut self.state, src) {
                return false;
            }
        } else {
            self.buf.extend_from_slice(src);
        }
        self.state.advance_limit_pos(src.len());
        true
    }

    fn flush(&mut self, flush_type: FlushType) -> bool {
        if !self.state.healthy() {
            return false;
        }
        if !self.drain() {
            return false;
        }
        self.sink.flush_internal(&mut self.state, flush_type)
    }

    fn healthy(&self) -> bool {
        self.state.healthy()
    }

    fn status(&self) -> Status {
        self.state.status()
    }

    fn pos(&self) -> u64 {
        self.state.limit_pos()
    }

    fn close(&mut self) -> bool {
        match self.state.health() {
            Health::Closed => return true,
            Health::Cancelled => return false,
            Health::Failed | Health::Healthy => {}
        }
        if self.state.healthy() {
            self.drain();
        }
        self.sink.done(&mut self.state);
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
            self.sink.cancel();
            self.state.mark_cancelled();
            self.release();
        }
    }
}
