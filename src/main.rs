//! Binary entry point for the `zstdio` command-line tool.
//!
//! A thin demonstration surface over the library: compresses (default) or
//! decompresses a single file into another, streaming through the buffered
//! file endpoints and the zstd adapters. When compressing, the input file
//! size is pledged as the destination-size hint so the frame header records
//! the content size.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use zstdio::stream::{FileReader, FileWriter, Reader, Writer};
use zstdio::zstd::{
    ZstdReader, ZstdReaderOptions, ZstdWriter, ZstdWriterOptions, MAX_COMPRESSION_LEVEL,
    MIN_COMPRESSION_LEVEL,
};
use zstdio::{Status, DEFAULT_BUFFER_SIZE};

#[derive(Parser)]
#[command(name = "zstdio", version, about = "Streaming zstd compression between files")]
struct Args {
    /// Decompress instead of compress.
    #[arg(short = 'd', long)]
    decompress: bool,

    /// Compression level (1-22).
    #[arg(short = 'l', long, default_value_t = 9)]
    level: i32,

    /// I/O buffer size in bytes.
    #[arg(short = 'b', long, default_value_t = DEFAULT_BUFFER_SIZE)]
    buffer_size: usize,

    /// Source file.
    input: PathBuf,

    /// Destination file.
    output: PathBuf,
}

/// Turns a failed stream status into an error with context.
fn stream_err(status: Status, what: &str) -> anyhow::Error {
    anyhow::Error::new(status).context(what.to_string())
}

/// Pulls everything out of `src` and pushes it into `dest`.
fn pump(src: &mut impl Reader, dest: &mut impl Writer) -> Result<()> {
    while src.pull() {
        let n = src.chunk().len();
        if !dest.write(src.chunk()) {
            return Err(stream_err(dest.status(), "writing output"));
        }
        src.consume(n);
    }
    if !src.healthy() {
        return Err(stream_err(src.status(), "reading input"));
    }
    Ok(())
}

fn compress(args: &Args) -> Result<()> {
    let size_hint = fs::metadata(&args.input)
        .with_context(|| format!("inspecting {}", args.input.display()))?
        .len();
    let mut src = FileReader::open(&args.input, args.buffer_size);
    let mut dest = ZstdWriter::new(
        FileWriter::create(&args.output, args.buffer_size),
        ZstdWriterOptions {
            compression_level: args.level,
            buffer_size: args.buffer_size,
            size_hint: Some(size_hint),
        },
    );
    pump(&mut src, &mut dest)?;
    if !dest.close() {
        return Err(stream_err(dest.status(), "finalizing output"));
    }
    if !src.close() {
        return Err(stream_err(src.status(), "closing input"));
    }
    Ok(())
}

fn decompress(args: &Args) -> Result<()> {
    let mut src = ZstdReader::new(
        FileReader::open(&args.input, args.buffer_size),
        ZstdReaderOptions {
            buffer_size: args.buffer_size,
        },
    );
    let mut dest = FileWriter::create(&args.output, args.buffer_size);
    pump(&mut src, &mut dest)?;
    if !src.close() {
        return Err(stream_err(src.status(), "closing input"));
    }
    if !dest.close() {
        return Err(stream_err(dest.status(), "finalizing output"));
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    if !(MIN_COMPRESSION_LEVEL..=MAX_COMPRESSION_LEVEL).contains(&args.level) {
        bail!(
            "compression level must be between {MIN_COMPRESSION_LEVEL} and {MAX_COMPRESSION_LEVEL}"
        );
    }
    if args.buffer_size == 0 {
        bail!("buffer size must be positive");
    }
    if args.decompress {
        decompress(&args)
    } else {
        compress(&args)
    }
}
