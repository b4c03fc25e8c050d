//! File-backed protocol endpoints.
//!
//! [`FileReader`] and [`FileWriter`] put the generic buffering layer over
//! `std::fs::File`. OS failures are classified through
//! [`errno_to_status`](crate::errno::errno_to_status). A failed `open`
//! returns a handle that is already failed, so call sites handle
//! construction and I/O errors through the same health surface.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use crate::errno::errno_to_status;
use crate::status::Status;
use crate::stream::buffered_reader::BufferedReader;
use crate::stream::buffered_writer::BufferedWriter;
use crate::stream::reader::{ReadOutcome, ReadSource};
use crate::stream::state::StreamState;
use crate::stream::writer::{FlushType, WriteSink};

fn io_status(e: &io::Error, message: &str) -> Status {
    match e.raw_os_error() {
        Some(n) => errno_to_status(n, message),
        None => Status::unknown(format!("{message}: {e}")),
    }
}

/// Refill primitive reading from a file.
#[derive(Debug)]
pub struct FileSource {
    file: Option<File>,
    eof: bool,
}

impl ReadSource for FileSource {
    fn read_internal(
        &mut self,
        state: &mut StreamState,
        dest: &mut [u8],
        min_length: usize,
    ) -> ReadOutcome {
        let file = match self.file.as_mut() {
            Some(f) => f,
            None => return ReadOutcome::Exhausted(0),
        };
        let mut n = 0;
        while n < min_length {
            match file.read(&mut dest[n..]) {
                Ok(0) => {
                    self.eof = true;
                    state.advance_limit_pos(n);
                    return ReadOutcome::Exhausted(n);
                }
                Ok(k) => n += k,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    state.advance_limit_pos(n);
                    state.fail(io_status(&e, "reading file"));
                    return ReadOutcome::Failed(n);
                }
            }
        }
        state.advance_limit_pos(n);
        ReadOutcome::Delivered(n)
    }

    fn exhausted(&self) -> bool {
        self.eof || self.file.is_none()
    }

    fn done(&mut self, _state: &mut StreamState, _has_buffered: bool) {
        // Closing a file mid-read is legal; there is no trailing-data check.
        self.file = None;
    }

    fn cancel(&mut self) {
        self.file = None;
    }
}

/// A buffered [`Reader`](crate::stream::Reader) over a file.
pub type FileReader = BufferedReader<FileSource>;

impl BufferedReader<FileSource> {
    /// Opens `path` for reading. Open failures produce an already-failed
    /// handle rather than an error return.
    pub fn open(path: impl AsRef<Path>, buffer_size: usize) -> Self {
        let path = path.as_ref();
        match File::open(path) {
            Ok(file) => BufferedReader::with_source(
                FileSource {
                    file: Some(file),
                    eof: false,
                },
                buffer_size,
            ),
            Err(e) => {
                let mut reader = BufferedReader::with_source(
                    FileSource {
                        file: None,
                        eof: true,
                    },
                    buffer_size,
                );
                reader.fail(io_status(&e, &format!("opening {}", path.display())));
                reader
            }
        }
    }
}

/// Drain primitive writing to a file.
#[derive(Debug)]
pub struct FileSink {
    file: Option<File>,
}

impl WriteSink for FileSink {
    fn write_internal(&mut self, state: &mut StreamState, src: &[u8]) -> bool {
        let file = match self.file.as_mut() {
            Some(f) => f,
            None => return state.fail(Status::failed_precondition("file is closed")),
        };
        match file.write_all(src) {
            Ok(()) => true,
            Err(e) => state.fail(io_status(&e, "writing file")),
        }
    }

    fn flush_internal(&mut self, state: &mut StreamState, flush_type: FlushType) -> bool {
        let file = match self.file.as_mut() {
            Some(f) => f,
            None => return state.fail(Status::failed_precondition("file is closed")),
        };
        let result = match flush_type {
            FlushType::FromObject | FlushType::FromProcess => file.flush(),
            FlushType::FromMachine => file.sync_all(),
        };
        match result {
            Ok(()) => true,
            Err(e) => state.fail(io_status(&e, "flushing file")),
        }
    }

    fn done(&mut self, _state: &mut StreamState) {
        self.file = None;
    }

    fn cancel(&mut self) {
        self.file = None;
    }
}

/// A buffered [`Writer`](crate::stream::Writer) over a file.
pub type FileWriter = BufferedWriter<FileSink>;

impl BufferedWriter<FileSink> {
    /// Creates or truncates `path` for writing. Failures produce an
    /// already-failed handle.
    pub fn create(path: impl AsRef<Path>, buffer_size: usize) -> Self {
        let path = path.as_ref();
        match File::create(path) {
            Ok(file) => BufferedWriter::with_sink(FileSink { file: Some(file) }, buffer_size),
            Err(e) => {
                let mut writer = BufferedWriter::with_sink(FileSink { file: None }, buffer_size);
                writer.fail(io_status(&e, &format!("creating {}", path.display())));
                writer
            }
        }
    }
}
