//! Byte acquisition for targets and checksum listings.
//!
//! The target name `-` denotes standard input, which is a single-consumption
//! stream: [`FsSource`] hands it out once per run and refuses later opens.

use std::cell::Cell;
use std::fs::File;
use std::io::{self, Read};

use crate::error::Unreadable;

/// Target name that selects standard input.
pub const STDIN_TARGET: &str = "-";

/// Default read size for [`FsSource`].
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Something that can open named targets for sequential reading.
pub trait StreamSource {
    fn open(&self, target: &str) -> Result<Box<dyn Read + '_>, Unreadable>;

    /// Read size used by [`buffers`](Self::buffers).
    fn buffer_size(&self) -> usize {
        DEFAULT_BUFFER_SIZE
    }

    /// Open `target` as a lazy sequence of bounded buffers.
    fn buffers(&self, target: &str) -> Result<ByteStream<'_>, Unreadable> {
        let reader = self.open(target)?;
        Ok(ByteStream::new(target, reader, self.buffer_size()))
    }
}

/// Finite, non-restartable sequence of buffers read from one target.
pub struct ByteStream<'a> {
    target: String,
    reader: Box<dyn Read + 'a>,
    buf: Vec<u8>,
    done: bool,
}

impl<'a> ByteStream<'a> {
    pub fn new(target: impl Into<String>, reader: Box<dyn Read + 'a>, buffer_size: usize) -> Self {
        Self {
            target: target.into(),
            reader,
            buf: vec![0u8; buffer_size.max(1)],
            done: false,
        }
    }

    /// Next non-empty buffer, or `None` at end of stream.
    pub fn next_buffer(&mut self) -> Result<Option<&[u8]>, Unreadable> {
        if self.done {
            return Ok(None);
        }
        loop {
            match self.reader.read(&mut self.buf) {
                Ok(0) => {
                    self.done = true;
                    return Ok(None);
                }
                Ok(n) => return Ok(Some(&self.buf[..n])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.done = true;
                    return Err(Unreadable::from_io(self.target.clone(), &e));
                }
            }
        }
    }
}

/// Files on disk, plus standard input for `-`.
#[derive(Debug)]
pub struct FsSource {
    buffer_size: usize,
    stdin_taken: Cell<bool>,
}

impl FsSource {
    pub fn new(buffer_size: usize) -> Self {
        Self {
            buffer_size: buffer_size.max(1),
            stdin_taken: Cell::new(false),
        }
    }
}

impl Default for FsSource {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_SIZE)
    }
}

impl StreamSource for FsSource {
    fn open(&self, target: &str) -> Result<Box<dyn Read + '_>, Unreadable> {
        if target == STDIN_TARGET {
            if self.stdin_taken.replace(true) {
                return Err(Unreadable::new(
                    target,
                    "standard input has already been consumed",
                ));
            }
            return Ok(Box::new(io::stdin().lock()));
        }
        let file = File::open(target).map_err(|e| Unreadable::from_io(target, &e))?;
        Ok(Box::new(file))
    }

    fn buffer_size(&self) -> usize {
        self.buffer_size
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory source for pipeline tests. Like [`FsSource`], it serves the
    //! `-` entry only once.

    use super::*;
    use std::collections::HashMap;

    pub(crate) struct MemorySource {
        files: HashMap<String, Vec<u8>>,
        buffer_size: usize,
        stdin_taken: Cell<bool>,
    }

    impl MemorySource {
        pub(crate) fn new() -> Self {
            Self {
                files: HashMap::new(),
                buffer_size: 7,
                stdin_taken: Cell::new(false),
            }
        }

        pub(crate) fn with(mut self, name: &str, data: impl Into<Vec<u8>>) -> Self {
            self.files.insert(name.to_string(), data.into());
            self
        }
    }

    impl StreamSource for MemorySource {
        fn open(&self, target: &str) -> Result<Box<dyn Read + '_>, Unreadable> {
            if target == STDIN_TARGET && self.stdin_taken.replace(true) {
                return Err(Unreadable::new(
                    target,
                    "standard input has already been consumed",
                ));
            }
            match self.files.get(target) {
                Some(data) => Ok(Box::new(data.as_slice())),
                None => Err(Unreadable::new(target, "No such file or directory")),
            }
        }

        fn buffer_size(&self) -> usize {
            self.buffer_size
        }
    }
}
