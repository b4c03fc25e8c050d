//! File-backed endpoints, on real files in a temp directory.

use std::fs;

use tempfile::TempDir;

use zstdio::status::StatusCode;
use zstdio::stream::{FileReader, FileWriter, FlushType, Reader, Writer};
use zstdio::zstd::{ZstdReader, ZstdReaderOptions, ZstdWriter, ZstdWriterOptions};
use zstdio::DEFAULT_BUFFER_SIZE;

// ─────────────────────────────────────────────────────────────────────────────
// Plain file round trips
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn file_writer_then_reader_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.bin");
    let payload: Vec<u8> = (0..=255u8).cycle().take(100_000).collect();

    let mut writer = FileWriter::create(&path, 4096);
    for piece in payload.chunks(1234) {
        assert!(writer.write(piece), "write failed: {}", writer.status());
    }
    assert!(writer.flush(FlushType::FromMachine));
    assert!(writer.close(), "close failed: {}", writer.status());
    assert_eq!(writer.pos(), payload.len() as u64);

    let mut reader = FileReader::open(&path, 4096);
    let mut out = Vec::new();
    assert!(reader.read_to_end(&mut out), "read failed: {}", reader.status());
    assert_eq!(out, payload);
    assert_eq!(reader.pos(), payload.len() as u64);
    assert!(reader.close());
}

#[test]
fn flush_makes_bytes_visible_before_close() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("flushed.bin");

    let mut writer = FileWriter::create(&path, 4096);
    assert!(writer.write(b"visible"));
    assert!(writer.flush(FlushType::FromProcess));
    // The handle is still open; the bytes must already be on disk.
    assert_eq!(fs::read(&path).unwrap(), b"visible");
    assert!(writer.close());
}

// ─────────────────────────────────────────────────────────────────────────────
// Construction failures surface through the health flag
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn opening_a_missing_file_yields_a_failed_handle() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("does-not-exist");

    let mut reader = FileReader::open(&path, DEFAULT_BUFFER_SIZE);
    assert!(!reader.healthy());
    assert_eq!(reader.status().code(), Some(StatusCode::NotFound));
    assert!(reader.status().message().contains("does-not-exist"));
    assert!(!reader.pull());
    assert!(!reader.close());
}

#[test]
fn creating_a_file_in_a_missing_directory_yields_a_failed_handle() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no-such-dir").join("out.bin");

    let mut writer = FileWriter::create(&path, DEFAULT_BUFFER_SIZE);
    assert!(!writer.healthy());
    assert_eq!(writer.status().code(), Some(StatusCode::NotFound));
    assert!(!writer.write(b"x"));
    assert!(!writer.close());
}

// ─────────────────────────────────────────────────────────────────────────────
// Compressed file-to-file pipeline
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn zstd_file_pipeline_roundtrip() {
    let dir = TempDir::new().unwrap();
    let plain = dir.path().join("plain.txt");
    let packed = dir.path().join("plain.txt.zst");

    let payload = b"line of text\n".repeat(5_000);
    fs::write(&plain, &payload).unwrap();

    // plain -> packed, with the file endpoints owned by the adapters.
    {
        let mut src = FileReader::open(&plain, 4096);
        let mut dest = ZstdWriter::new(
            FileWriter::create(&packed, 4096),
            ZstdWriterOptions {
                size_hint: Some(payload.len() as u64),
                ..Default::default()
            },
        );
        while src.pull() {
            let n = src.chunk().len();
            assert!(dest.write(src.chunk()));
            src.consume(n);
        }
        assert!(src.healthy());
        assert!(src.close());
        assert!(dest.close(), "close failed: {}", dest.status());
    }

    let on_disk = fs::metadata(&packed).unwrap().len();
    assert!(on_disk > 0 && on_disk < payload.len() as u64, "text must shrink");

    // packed -> memory.
    let mut reader = ZstdReader::new(
        FileReader::open(&packed, 4096),
        ZstdReaderOptions::default(),
    );
    let mut out = Vec::new();
    assert!(reader.read_to_end(&mut out), "decode failed: {}", reader.status());
    assert_eq!(out, payload);
    assert!(reader.close());
}
