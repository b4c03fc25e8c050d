//! Criterion benchmarks for the zstd streaming adapters.
//!
//! Run with:
//!   cargo bench --bench roundtrip

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{Rng, RngCore, SeedableRng};

use zstdio::stream::{Reader, SliceReader, VecWriter, Writer};
use zstdio::zstd::{ZstdReader, ZstdReaderOptions, ZstdWriter, ZstdWriterOptions};

/// Synthetic but compressible payload: runs of repeated bytes with
/// pseudo-random lengths, roughly log-like in character.
fn payload(len: usize) -> Vec<u8> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(0x5eed);
    let mut data = Vec::with_capacity(len);
    while data.len() < len {
        let byte = rng.gen::<u8>() % 32 + b'a';
        let run = rng.gen_range(1..64).min(len - data.len());
        data.resize(data.len() + run, byte);
    }
    data
}

fn incompressible_payload(len: usize) -> Vec<u8> {
    let mut data = vec![0u8; len];
    rand::rngs::StdRng::seed_from_u64(0x6e6f).fill_bytes(&mut data);
    data
}

fn compress_all(data: &[u8], options: ZstdWriterOptions) -> Vec<u8> {
    let mut dest = VecWriter::new();
    {
        let mut writer = ZstdWriter::new(&mut dest, options);
        assert!(writer.write(data));
        assert!(writer.close());
    }
    dest.into_vec()
}

fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("zstd_compress");

    for &size in &[65_536usize, 1_048_576] {
        let data = payload(size);
        for level in [1, 9] {
            group.throughput(Throughput::Bytes(size as u64));
            group.bench_with_input(
                BenchmarkId::new(format!("level_{level}"), size),
                &data,
                |b, data| {
                    b.iter(|| {
                        compress_all(
                            data,
                            ZstdWriterOptions {
                                compression_level: level,
                                size_hint: Some(data.len() as u64),
                                ..Default::default()
                            },
                        )
                    })
                },
            );
        }
    }

    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("zstd_decompress");

    for &size in &[65_536usize, 1_048_576] {
        let data = payload(size);
        let compressed = compress_all(&data, ZstdWriterOptions::default());

        let mut out = vec![0u8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(
            BenchmarkId::new("read_exact", size),
            &compressed,
            |b, compressed| {
                b.iter(|| {
                    let mut reader = ZstdReader::new(
                        SliceReader::new(compressed),
                        ZstdReaderOptions::default(),
                    );
                    assert!(reader.read(&mut out));
                })
            },
        );
    }

    group.finish();
}

fn bench_incompressible(c: &mut Criterion) {
    let mut group = c.benchmark_group("zstd_incompressible");

    let size = 1_048_576usize;
    let data = incompressible_payload(size);

    group.throughput(Throughput::Bytes(size as u64));
    group.bench_with_input(BenchmarkId::new("compress_level_1", size), &data, |b, data| {
        b.iter(|| {
            compress_all(
                data,
                ZstdWriterOptions {
                    compression_level: 1,
                    ..Default::default()
                },
            )
        })
    });

    group.finish();
}

criterion_group!(benches, bench_compress, bench_decompress, bench_incompressible);
criterion_main!(benches);
