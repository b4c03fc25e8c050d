//! The byte-stream protocol and its reusable buffering layer.
//!
//! [`Reader`] and [`Writer`] are the pull/push contracts everything in this
//! crate speaks. [`BufferedReader`] and [`BufferedWriter`] implement them
//! over a backing buffer, delegating the actual refill/drain work to a
//! [`ReadSource`]/[`WriteSink`] primitive supplied by an endpoint (memory,
//! file) or a codec adapter (see [`crate::zstd`]).

pub mod buffered_reader;
pub mod buffered_writer;
pub mod file;
pub mod reader;
pub mod slice;
pub mod state;
pub mod writer;

pub use buffered_reader::BufferedReader;
pub use buffered_writer::BufferedWriter;
pub use file::{FileReader, FileWriter};
pub use reader::{ReadOutcome, ReadSource, Reader};
pub use slice::{SliceReader, VecWriter};
pub use state::{Health, StreamState};
pub use writer::{FlushType, WriteSink, Writer};
