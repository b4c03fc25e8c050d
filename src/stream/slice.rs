//! In-memory protocol endpoints.
//!
//! [`SliceReader`] serves a borrowed byte slice; the whole remainder is the
//! available window, so `pull()` never copies. [`VecWriter`] appends to an
//! owned `Vec<u8>`. Both are direct protocol implementations with no
//! buffering layer of their own.

use crate::status::Status;
use crate::stream::reader::Reader;
use crate::stream::state::{Health, StreamState};
use crate::stream::writer::{FlushType, Writer};

/// Reads from a byte slice.
#[derive(Debug)]
pub struct SliceReader<'a> {
    data: &'a [u8],
    at: usize,
    state: StreamState,
}

impl<'a> SliceReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        SliceReader {
            data,
            at: 0,
            state: StreamState::new(),
        }
    }
}

impl Reader for SliceReader<'_> {
    fn pull(&mut self) -> bool {
        self.state.healthy() && self.at < self.data.len()
    }

    fn chunk(&self) -> &[u8] {
        if self.state.healthy() {
            &self.data[self.at..]
        } else {
            &[]
        }
    }

    fn consume(&mut self, n: usize) {
        debug_assert!(n <= self.data.len() - self.at);
        self.at += n;
        self.state.advance_limit_pos(n);
    }

    fn hope_for_more(&self) -> bool {
        // The whole slice is present up front; once drained, nothing more
        // will ever come.
        self.state.healthy() && self.at < self.data.len()
    }

    fn healthy(&self) -> bool {
        self.state.healthy()
    }

    fn status(&self) -> Status {
        self.state.status()
    }

    fn pos(&self) -> u64 {
        self.at as u64
    }

    fn close(&mut self) -> bool {
        match self.state.health() {
            Health::Closed => true,
            Health::Cancelled | Health::Failed => false,
            Health::Healthy => {
                self.state.mark_closed();
                true
            }
        }
    }

    fn cancel(&mut self) {
        self.state.mark_cancelled();
    }
}

/// Appends to an owned `Vec<u8>`.
#[derive(Debug, Default)]
pub struct VecWriter {
    dest: Vec<u8>,
    state: StreamState,
}

impl VecWriter {
    pub fn new() -> Self {
        VecWriter::default()
    }

    /// The bytes written so far.
    pub fn as_slice(&self) -> &[u8] {
        &self.dest
    }

    /// Recovers the destination vector.
    pub fn into_vec(self) -> Vec<u8> {
        self.dest
    }
}

impl Writer for VecWriter {
    fn write(&mut self, src: &[u8]) -> bool {
        if !self.state.healthy() {
            return false;
        }
        self.dest.extend_from_slice(src);
        self.state.advance_limit_pos(src.len());
        true
    }

    fn flush(&mut self, _flush_type: FlushType) -> bool {
        // Nothing is buffered and there is nothing beneath to sync.
        self.state.healthy()
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
            Health::Closed => true,
            Health::Cancelled | Health::Failed => false,
            Health::Healthy => {
                self.state.mark_closed();
                true
            }
        }
    }

    fn cancel(&mut self) {
        self.state.mark_cancelled();
    }
}
