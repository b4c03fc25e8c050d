//! Streaming compression adapter.

use zstd_safe::{CCtx, CParameter, InBuffer, OutBuffer};

use crate::ownership::MaybeOwned;
use crate::status::Status;
use crate::stream::{BufferedWriter, FlushType, StreamState, WriteSink, Writer};
use crate::zstd::{engine_failure, ZstdWriterOptions};

/// Drain primitive that compresses buffered bytes and pushes the produced
/// frame to an underlying [`Writer`].
///
/// The compression context is exclusively owned here; it is released when
/// the stream is closed or cancelled and never reused.
pub struct ZstdSink<'a, W: Writer> {
    dest: Option<MaybeOwned<'a, W>>,
    cctx: Option<CCtx<'static>>,
    scratch: Vec<u8>,
}

/// A [`Writer`] producing a zstd frame on another writer.
pub type ZstdWriter<'a, W> = BufferedWriter<ZstdSink<'a, W>>;

impl<'a, W: Writer> BufferedWriter<ZstdSink<'a, W>> {
    /// Wraps `dest`, which is either transferred (`W`) or borrowed
    /// (`&mut W`); an owned destination is closed together with this
    /// writer. The size hint, when present, is pledged to the engine so the
    /// frame header records the content size.
    pub fn new(dest: impl Into<MaybeOwned<'a, W>>, options: ZstdWriterOptions) -> Self {
        options.validate();
        let mut init_failure = None;
        let cctx = match CCtx::try_create() {
            None => {
                init_failure = Some(Status::internal("cannot create zstd compression context"));
                None
            }
            Some(mut cctx) => {
                let mut result =
                    cctx.set_parameter(CParameter::CompressionLevel(options.compression_level));
                if result.is_ok() {
                    if let Some(hint) = options.size_hint {
                        result = cctx.set_pledged_src_size(Some(hint));
                    }
                }
                if let Err(code) = result {
                    init_failure = Some(Status::internal(format!(
                        "cannot configure zstd compression context: {}",
                        zstd_safe::get_error_name(code)
                    )));
                }
                Some(cctx)
            }
        };
        let mut writer = BufferedWriter::with_sink(
            ZstdSink {
                dest: Some(dest.into()),
                cctx,
                scratch: vec![0; options.buffer_size],
            },
            options.buffer_size,
        );
        if let Some(status) = init_failure {
            writer.fail(status);
        }
        writer
    }
}

impl<W: Writer> ZstdSink<'_, W> {
    /// Loops the engine's flush (or frame-end) primitive until it reports
    /// the request fully drained, pushing produced bytes to the underlying
    /// writer as they appear.
    fn drain_engine(&mut self, state: &mut StreamState, end_frame: bool) -> bool {
        let cctx = match self.cctx.as_mut() {
            Some(c) => c,
            None => return state.fail(Status::failed_precondition("zstd stream is closed")),
        };
        let dest = match self.dest.as_mut() {
            Some(d) => d,
            None => return state.fail(Status::failed_precondition("zstd stream is closed")),
        };
        loop {
            let mut out = OutBuffer::around(self.scratch.as_mut_slice());
            let result = if end_frame {
                cctx.end_stream(&mut out)
            } else {
                cctx.flush_stream(&mut out)
            };
            let produced = out.pos();
            drop(out);
            let remaining = match result {
                Ok(r) => r,
                Err(code) => {
                    let context = if end_frame {
                        "zstd frame finalization failed"
                    } else {
                        "zstd flush failed"
                    };
                    return state.fail(engine_failure(context, code));
                }
            };
            if produced > 0 && !dest.write(&self.scratch[..produced]) {
                return state.fail(dest.status());
            }
            if remaining == 0 {
                return true;
            }
        }
    }
}

impl<W: Writer> WriteSink for ZstdSink<'_, W> {
    fn write_internal(&mut self, state: &mut StreamState, src: &[u8]) -> bool {
        let cctx = match self.cctx.as_mut() {
            Some(c) => c,
            None => return state.fail(Status::failed_precondition("zstd stream is closed")),
        };
        let dest = match self.dest.as_mut() {
            Some(d) => d,
            None => return state.fail(Status::failed_precondition("zstd stream is closed")),
        };
        let mut input = InBuffer::around(src);
        while input.pos < src.len() {
            let mut out = OutBuffer::around(self.scratch.as_mut_slice());
            let result = cctx.compress_stream(&mut out, &mut input);
            let produced = out.pos();
            drop(out);
            if let Err(code) = result {
                return state.fail(engine_failure("zstd compression failed", code));
            }
            if produced > 0 && !dest.write(&self.scratch[..produced]) {
                return state.fail(dest.status());
            }
        }
        true
    }

    fn flush_internal(&mut self, state: &mut StreamState, flush_type: FlushType) -> bool {
        if !self.drain_engine(state, false) {
            return false;
        }
        match flush_type {
            FlushType::FromObject => true,
            FlushType::FromProcess | FlushType::FromMachine => {
                let dest = match self.dest.as_mut() {
                    Some(d) => d,
                    None => return state.fail(Status::failed_precondition("zstd stream is closed")),
                };
                if dest.flush(flush_type) {
                    true
                } else {
                    state.fail(dest.status())
                }
            }
        }
    }

    fn done(&mut self, state: &mut StreamState) {
        if state.healthy() {
            self.drain_engine(state, true);
        }
        if state.healthy() {
            if let Some(dest) = self.dest.take() {
                if let Some(mut owned) = dest.into_owned() {
                    if !owned.close() {
                        state.fail(owned.status());
                    }
                }
            }
        } else {
            self.dest = None;
        }
        self.cctx = None;
        self.scratch = Vec::new();
    }

    fn cancel(&mut self) {
        // Free the engine without ending the frame; an owned destination is
        // dropped unclosed, a borrowed one is simply released.
        self.cctx = None;
        self.dest = None;
        self.scratch = Vec::new();
    }
}
