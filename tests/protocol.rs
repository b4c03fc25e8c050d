//! Protocol guarantees at the public reader/writer surface:
//! minimum-delivery on `read()`, the large-read bypass, window/consume
//! discipline, and position accounting independent of buffering.

use rand::{RngCore, SeedableRng};

use zstdio::stream::{Reader, SliceReader, VecWriter, Writer};
use zstdio::zstd::{ZstdReader, ZstdReaderOptions, ZstdWriter, ZstdWriterOptions};

fn random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut data = vec![0u8; len];
    rand::rngs::StdRng::seed_from_u64(seed).fill_bytes(&mut data);
    data
}

fn zcompress(data: &[u8]) -> Vec<u8> {
    let mut dest = VecWriter::new();
    {
        let mut writer = ZstdWriter::<VecWriter>::new(&mut dest, ZstdWriterOptions::default());
        assert!(writer.write(data));
        assert!(writer.close());
    }
    dest.into_vec()
}

// ─────────────────────────────────────────────────────────────────────────────
// read(): all-or-nothing delivery
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn read_fills_the_whole_destination_or_reports_failure() {
    let data = random_bytes(4_096, 1);
    let compressed = zcompress(&data);
    let mut reader = ZstdReader::new(
        SliceReader::new(&compressed),
        ZstdReaderOptions { buffer_size: 64 },
    );

    // Odd-sized requests crossing many refills, each fully satisfied.
    let mut got = Vec::new();
    for len in [1usize, 63, 64, 65, 1000] {
        let mut dest = vec![0u8; len];
        assert!(reader.read(&mut dest), "read of {len} bytes");
        got.extend_from_slice(&dest);
    }
    assert_eq!(got, data[..got.len()]);

    // Asking for more than remains cannot be satisfied.
    let remaining = data.len() - got.len();
    let mut too_much = vec![0u8; remaining + 1];
    assert!(!reader.read(&mut too_much));
}

#[test]
fn large_read_bypasses_the_internal_buffer() {
    let data = random_bytes(32_768, 2);
    let compressed = zcompress(&data);
    // Buffer far smaller than the request: the whole read goes through the
    // direct path instead of 32768/64 refills.
    let mut reader = ZstdReader::new(
        SliceReader::new(&compressed),
        ZstdReaderOptions { buffer_size: 64 },
    );
    let mut dest = vec![0u8; data.len()];
    assert!(reader.read(&mut dest));
    assert_eq!(dest, data);
    assert_eq!(reader.pos(), data.len() as u64);
}

// ─────────────────────────────────────────────────────────────────────────────
// pull()/chunk()/consume() discipline
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn window_shrinks_under_partial_consumes() {
    let data = random_bytes(1_000, 3);
    let compressed = zcompress(&data);
    let mut reader = ZstdReader::new(
        SliceReader::new(&compressed),
        ZstdReaderOptions::default(),
    );

    let mut got = Vec::new();
    while reader.pull() {
        let window = reader.chunk().len();
        assert!(window > 0, "a successful pull guarantees a non-empty window");
        // Take the window three bytes at a time; unconsumed bytes must
        // still be there on the next look.
        let n = window.min(3);
        got.extend_from_slice(&reader.chunk()[..n]);
        reader.consume(n);
        assert_eq!(reader.pos(), got.len() as u64);
    }
    assert_eq!(got, data);
    assert!(reader.close());
}

#[test]
fn pull_is_idempotent_while_data_is_buffered() {
    let compressed = zcompress(b"steady window");
    let mut reader = ZstdReader::new(
        SliceReader::new(&compressed),
        ZstdReaderOptions::default(),
    );
    assert!(reader.pull());
    let first = reader.chunk().to_vec();
    assert!(reader.pull());
    assert_eq!(reader.chunk(), first, "pull without consume keeps the window");
    assert_eq!(reader.pos(), 0, "unconsumed bytes do not advance pos");
}

// ─────────────────────────────────────────────────────────────────────────────
// Writer position accounting
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn writer_pos_counts_accepted_bytes_not_compressed_output() {
    let data = random_bytes(6_000, 4);
    let mut dest = VecWriter::new();
    {
        let mut writer = ZstdWriter::<VecWriter>::new(&mut dest, ZstdWriterOptions::default());
        let mut written = 0u64;
        for piece in data.chunks(777) {
            assert!(writer.write(piece));
            written += piece.len() as u64;
            assert_eq!(writer.pos(), written);
        }
        assert!(writer.close());
        assert_eq!(writer.pos(), data.len() as u64);
    }
    // The frame on the wire is a different length entirely.
    assert_ne!(dest.as_slice().len(), data.len());
}

#[test]
fn empty_writes_are_accepted_and_do_not_move_pos() {
    let mut dest = VecWriter::new();
    let mut writer = ZstdWriter::<VecWriter>::new(&mut dest, ZstdWriterOptions::default());
    assert!(writer.write(b""));
    assert_eq!(writer.pos(), 0);
    assert!(writer.write(b"abc"));
    assert!(writer.write(b""));
    assert_eq!(writer.pos(), 3);
    assert!(writer.close());
}
