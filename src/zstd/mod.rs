//! Zstandard codec adapters for the stream protocol.
//!
//! [`ZstdReader`] decompresses while pulling from an underlying
//! [`Reader`](crate::stream::Reader); [`ZstdWriter`] compresses while
//! pushing to an underlying [`Writer`](crate::stream::Writer). Both drive
//! the `zstd-safe` streaming contexts across buffer boundaries and speak
//! the standard self-describing zstd frame; the frame format itself lives
//! entirely in the engine.

pub mod options;
pub mod reader;
pub mod writer;

pub use options::{
    ZstdReaderOptions, ZstdWriterOptions, DEFAULT_COMPRESSION_LEVEL, MAX_COMPRESSION_LEVEL,
    MIN_COMPRESSION_LEVEL,
};
pub use reader::{ZstdReader, ZstdSource};
pub use writer::{ZstdSink, ZstdWriter};

use crate::status::Status;

/// Wraps an engine diagnostic in a data-loss status, preserving the
/// engine's message.
fn engine_failure(context: &str, code: zstd_safe::ErrorCode) -> Status {
    Status::data_loss(format!("{context}: {}", zstd_safe::get_error_name(code)))
}
