//! Construction-time configuration snapshots for the zstd streams.
//!
//! Plain structs, captured at construction and never mutated afterwards.
//! Invalid configuration is a programmer error and panics at construction.

use crate::DEFAULT_BUFFER_SIZE;

/// Lowest accepted compression level.
pub const MIN_COMPRESSION_LEVEL: i32 = 1;
/// Highest accepted compression level.
pub const MAX_COMPRESSION_LEVEL: i32 = 22;
/// Level used when none is configured.
pub const DEFAULT_COMPRESSION_LEVEL: i32 = 9;

/// Configuration for [`ZstdReader`](crate::zstd::ZstdReader).
#[derive(Debug, Clone, Copy)]
pub struct ZstdReaderOptions {
    /// Size of the decompressed-side buffer. Must be positive.
    pub buffer_size: usize,
}

impl Default for ZstdReaderOptions {
    fn default() -> Self {
        ZstdReaderOptions {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl ZstdReaderOptions {
    pub(crate) fn validate(&self) {
        assert!(self.buffer_size > 0, "buffer size must be positive");
    }
}

/// Configuration for [`ZstdWriter`](crate::zstd::ZstdWriter).
#[derive(Debug, Clone, Copy)]
pub struct ZstdWriterOptions {
    /// Compression level, between [`MIN_COMPRESSION_LEVEL`] and
    /// [`MAX_COMPRESSION_LEVEL`].
    pub compression_level: i32,
    /// Size of the uncompressed-side buffer. Must be positive.
    pub buffer_size: usize,
    /// Announced destination size. Stored in the frame header and may
    /// improve compression density. Purely advisory: a wrong hint degrades
    /// the size reported to decompressors, not correctness.
    pub size_hint: Option<u64>,
}

impl Default for ZstdWriterOptions {
    fn default() -> Self {
        ZstdWriterOptions {
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            buffer_size: DEFAULT_BUFFER_SIZE,
            size_hint: None,
        }
    }
}

impl ZstdWriterOptions {
    pub(crate) fn validate(&self) {
        assert!(
            (MIN_COMPRESSION_LEVEL..=MAX_COMPRESSION_LEVEL).contains(&self.compression_level),
            "compression level must be between {MIN_COMPRESSION_LEVEL} and {MAX_COMPRESSION_LEVEL}"
        );
        assert!(self.buffer_size > 0, "buffer size must be positive");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        ZstdReaderOptions::default().validate();
        ZstdWriterOptions::default().validate();
    }

    #[test]
    #[should_panic(expected = "compression level")]
    fn rejects_out_of_range_level() {
        ZstdWriterOptions {
            compression_level: 23,
            ..Default::default()
        }
        .validate();
    }

    #[test]
    #[should_panic(expected = "buffer size")]
    fn rejects_zero_buffer_size() {
        ZstdReaderOptions { buffer_size: 0 }.validate();
    }
}
