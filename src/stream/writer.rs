//! The push side of the byte-stream protocol.

use crate::status::Status;
use crate::stream::state::StreamState;

/// How far a flush must reach before it returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushType {
    /// Push this object's buffers to the underlying writer; do not flush
    /// the underlying writer itself.
    FromObject,
    /// Additionally flush the underlying writer's own buffers.
    FromProcess,
    /// Additionally force data out of the process (e.g. fsync for files).
    FromMachine,
}

/// Drain primitive driven by [`BufferedWriter`](crate::stream::BufferedWriter).
pub trait WriteSink {
    /// Consumes all of `src` or fails (recording the status in `state` and
    /// returning `false`). Partial consumption is not an outcome.
    fn write_internal(&mut self, state: &mut StreamState, src: &[u8]) -> bool;

    /// Pushes pending sink-internal output (e.g. codec-engine state) to the
    /// underlying writer, forwarding `flush_type` when it reaches past this
    /// object.
    fn flush_internal(&mut self, state: &mut StreamState, flush_type: FlushType) -> bool;

    /// Close-time hook: finalize the output (e.g. end the compressed
    /// frame), close an owned underlying handle (propagating its failure),
    /// release all resources. Must be idempotent. Skips finalization when
    /// `state` is already unhealthy but still releases.
    fn done(&mut self, state: &mut StreamState);

    /// Abrupt teardown: release resources without finalizing.
    fn cancel(&mut self) {}
}

/// A push-based byte stream.
pub trait Writer {
    /// Accepts all of `src` or fails. Never a partial accept.
    fn write(&mut self, src: &[u8]) -> bool;

    /// Makes buffered output reach the underlying sink, to the depth
    /// requested by `flush_type`.
    fn flush(&mut self, flush_type: FlushType) -> bool;

    fn healthy(&self) -> bool;

    /// The first failure recorded, or ok.
    fn status(&self) -> Status;

    /// Bytes accepted across this interface so far.
    fn pos(&self) -> u64;

    /// Finalizes and closes the stream. Returns `true` iff cleanly closed.
    /// Closing again has no further effect.
    fn close(&mut self) -> bool;

    /// Releases resources without finalizing; buffered data is abandoned.
    /// A borrowed underlying handle is left untouched. Terminal.
    fn cancel(&mut self);
}
