//! zstdio — buffered streaming I/O with pluggable compression codecs.
//!
//! Byte-oriented producers and consumers ([`Reader`]s and [`Writer`]s) can
//! be chained — e.g. "decompress while reading from an underlying byte
//! source" — while sharing one buffering discipline, one ownership model,
//! and one error-propagation convention: a health flag plus a classified
//! [`Status`], never panics for stream failures.
//!
//! # Example
//!
//! ```
//! use zstdio::stream::{Reader, SliceReader, VecWriter, Writer};
//! use zstdio::zstd::{ZstdReader, ZstdReaderOptions, ZstdWriter, ZstdWriterOptions};
//!
//! // Compress into a borrowed writer so the output can be taken back out.
//! let mut dest = VecWriter::new();
//! let mut writer = ZstdWriter::<VecWriter>::new(&mut dest, ZstdWriterOptions::default());
//! assert!(writer.write(b"hello zstdio"));
//! assert!(writer.close());
//! drop(writer);
//!
//! let mut reader = ZstdReader::new(
//!     SliceReader::new(dest.as_slice()),
//!     ZstdReaderOptions::default(),
//! );
//! let mut out = Vec::new();
//! assert!(reader.read_to_end(&mut out));
//! assert!(reader.close());
//! assert_eq!(out, b"hello zstdio");
//! ```

pub mod errno;
pub mod ownership;
pub mod status;
pub mod stream;
pub mod zstd;

pub use errno::errno_to_status;
pub use ownership::MaybeOwned;
pub use status::{Status, StatusCode};
pub use stream::{Reader, Writer};

/// Buffer size used when options do not override it.
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;
