//! Streaming decompression adapter.

use zstd_safe::{DCtx, InBuffer, OutBuffer};

use crate::ownership::MaybeOwned;
use crate::status::Status;
use crate::stream::{BufferedReader, ReadOutcome, ReadSource, Reader, StreamState};
use crate::zstd::{engine_failure, ZstdReaderOptions};

/// Refill primitive that decompresses a zstd frame pulled from an
/// underlying [`Reader`].
///
/// The decompression context is exclusively owned here. It is released the
/// moment the engine reports a clean end-of-frame; the resulting `None` is
/// the terminal "exhausted" marker and is never reused.
pub struct ZstdSource<'a, R: Reader> {
    src: Option<MaybeOwned<'a, R>>,
    dctx: Option<DCtx<'static>>,
}

/// A [`Reader`] producing the decompressed bytes of a zstd frame read from
/// another reader.
pub type ZstdReader<'a, R> = BufferedReader<ZstdSource<'a, R>>;

impl<'a, R: Reader> BufferedReader<ZstdSource<'a, R>> {
    /// Wraps `src`, which is either transferred (`R`) or borrowed
    /// (`&mut R`); an owned source is closed together with this reader.
    pub fn new(src: impl Into<MaybeOwned<'a, R>>, options: ZstdReaderOptions) -> Self {
        options.validate();
        let dctx = DCtx::try_create();
        let failed = dctx.is_none();
        let mut reader = BufferedReader::with_source(
            ZstdSource {
                src: Some(src.into()),
                dctx,
            },
            options.buffer_size,
        );
        if failed {
            reader.fail(Status::internal("cannot create zstd decompression context"));
        }
        reader
    }
}

impl<R: Reader> ReadSource for ZstdSource<'_, R> {
    fn read_internal(
        &mut self,
        state: &mut StreamState,
        dest: &mut [u8],
        min_length: usize,
    ) -> ReadOutcome {
        debug_assert!(min_length >= 1 && min_length <= dest.len());
        // Taken out for the duration of the call; put back on every exit
        // except a clean end-of-frame, where staying `None` marks the
        // stream exhausted.
        let mut dctx = match self.dctx.take() {
            Some(d) => d,
            None => return ReadOutcome::Exhausted(0),
        };
        let src = match self.src.as_mut() {
            Some(s) => s,
            None => return ReadOutcome::Exhausted(0),
        };
        let mut out = OutBuffer::around(dest);
        loop {
            let mut input = InBuffer::around(src.chunk());
            let result = dctx.decompress_stream(&mut out, &mut input);
            let consumed = input.pos;
            drop(input);
            src.consume(consumed);
            match result {
                Ok(0) => {
                    let n = out.pos();
                    state.advance_limit_pos(n);
                    return if n >= min_length {
                        ReadOutcome::Delivered(n)
                    } else {
                        ReadOutcome::Exhausted(n)
                    };
                }
                Err(code) => {
                    self.dctx = Some(dctx);
                    let n = out.pos();
                    state.advance_limit_pos(n);
                    state.fail(engine_failure("zstd decompression failed", code));
                    // Bytes produced before the fault still count towards
                    // the minimum; callers check health separately.
                    return if n >= min_length {
                        ReadOutcome::Delivered(n)
                    } else {
                        ReadOutcome::Failed(n)
                    };
                }
                Ok(_) => {
                    let n = out.pos();
                    if n >= min_length {
                        self.dctx = Some(dctx);
                        state.advance_limit_pos(n);
                        return ReadOutcome::Delivered(n);
                    }
                    debug_assert_eq!(src.chunk().len(), 0);
                    if !src.pull() {
                        self.dctx = Some(dctx);
                        state.advance_limit_pos(n);
                        if src.hope_for_more() {
                            return ReadOutcome::Pending(n);
                        }
                        if src.healthy() {
                            state.fail(Status::data_loss("truncated zstd stream"));
                        } else {
                            state.fail(src.status());
                        }
                        return ReadOutcome::Failed(n);
                    }
                }
            }
        }
    }

    fn exhausted(&self) -> bool {
        self.dctx.is_none()
    }

    fn hope_for_more(&self) -> bool {
        self.dctx.is_some()
    }

    fn done(&mut self, state: &mut StreamState, has_buffered: bool) {
        // Drive the engine over whatever input remains: reaching the frame
        // end here is a clean close, anything else with a live engine means
        // the stream was cut short.
        if !has_buffered && self.dctx.is_some() && state.healthy() {
            let mut scratch = [0u8; 1];
            let outcome = self.read_internal(state, &mut scratch, 1);
            if outcome.delivered() == 0 && state.healthy() && self.dctx.is_some() {
                state.fail(Status::data_loss("truncated zstd stream"));
            }
        }
        if state.healthy() {
            if let Some(src) = self.src.take() {
                if let Some(mut owned) = src.into_owned() {
                    if !owned.close() {
                        state.fail(owned.status());
                    }
                }
            }
        } else {
            self.src = None;
        }
        self.dctx = None;
    }

    fn cancel(&mut self) {
        // Free the engine; an owned source is dropped unclosed, a borrowed
        // one is simply released.
        self.dctx = None;
        self.src = None;
    }
}
