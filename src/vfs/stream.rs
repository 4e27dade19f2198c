use crate::bounded::BoundedStream;
use std::{
    fs,
    io::{self, Read, Seek, SeekFrom},
};

/// A readable, seekable handle to one file in a [`Vfs`](crate::vfs::Vfs).
#[derive(Debug)]
pub enum Stream {
    /// An entry inside a container.
    Archived(BoundedStream<fs::File>),
    /// A file on disk.
    Loose(fs::File),
}

impl Stream {
    #[must_use]
    pub fn is_archived(&self) -> bool {
        matches!(self, Self::Archived(_))
    }

    /// The total size of the file, in bytes.
    pub fn len(&self) -> io::Result<u64> {
        match self {
            Self::Archived(x) => Ok(x.len()),
            Self::Loose(x) => x.metadata().map(|x| x.len()),
        }
    }
}

impl Read for Stream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Archived(x) => x.read(buf),
            Self::Loose(x) => x.read(buf),
        }
    }
}

impl Seek for Stream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match self {
            Self::Archived(x) => x.seek(pos),
            Self::Loose(x) => x.seek(pos),
        }
    }

    fn stream_position(&mut self) -> io::Result<u64> {
        match self {
            Self::Archived(x) => x.stream_position(),
            Self::Loose(x) => x.stream_position(),
        }
    }
}
