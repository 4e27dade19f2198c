use std::io::{self, BufRead, Read, Seek, SeekFrom};

const CHUNK_SIZE: usize = 0x1000;

#[derive(Debug, thiserror::Error)]
enum Error {
    #[error("seek to {target:?} falls outside of the bounded range [{start}, {end}]")]
    OutOfBounds {
        target: SeekFrom,
        start: u64,
        end: u64,
    },
}

impl From<Error> for io::Error {
    fn from(value: Error) -> Self {
        Self::new(io::ErrorKind::InvalidInput, value)
    }
}

/// A read-only view over the byte range `[start, end)` of another stream.
///
/// Offsets seen by the user are relative to `start`. Reads stop at `end` and seeks that would leave
/// `[start, end]` are refused without moving the stream. The view exclusively owns its backing
/// stream, which is closed when the view is dropped.
#[derive(Debug)]
pub struct BoundedStream<R> {
    inner: R,
    start: u64,
    end: u64,
    buf: Box<[u8]>,
    buf_start: u64,
    filled: usize,
    consumed: usize,
}

impl<R> BoundedStream<R>
where
    R: Read + Seek,
{
    /// Wraps `inner`, exposing only `[start, end)`.
    ///
    /// `start <= end` is assumed.
    #[must_use]
    pub fn new(inner: R, start: u64, end: u64) -> Self {
        Self {
            inner,
            start,
            end,
            buf: vec![0u8; CHUNK_SIZE].into_boxed_slice(),
            buf_start: start,
            filled: 0,
            consumed: 0,
        }
    }

    #[must_use]
    pub fn start(&self) -> u64 {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> u64 {
        self.end
    }

    #[must_use]
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn absolute_position(&self) -> u64 {
        self.buf_start + self.consumed as u64
    }

    fn discard_buffer(&mut self, position: u64) {
        self.buf_start = position;
        self.filled = 0;
        self.consumed = 0;
    }
}

impl<R> Read for BoundedStream<R>
where
    R: Read + Seek,
{
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        let available = self.fill_buf()?;
        let len = available.len().min(out.len());
        out[..len].copy_from_slice(&available[..len]);
        self.consume(len);
        Ok(len)
    }
}

impl<R> BufRead for BoundedStream<R>
where
    R: Read + Seek,
{
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.consumed >= self.filled {
            let position = self.absolute_position();
            let remaining = self.end.saturating_sub(position);
            let want = usize::try_from(remaining).map_or(CHUNK_SIZE, |x| x.min(CHUNK_SIZE));
            self.discard_buffer(position);
            if want > 0 {
                // the backing cursor may have been moved by someone else since the last fill
                self.inner.seek(SeekFrom::Start(position))?;
                self.filled = self.inner.read(&mut self.buf[..want])?;
            }
        }

        Ok(&self.buf[self.consumed..self.filled])
    }

    fn consume(&mut self, amt: usize) {
        self.consumed = (self.consumed + amt).min(self.filled);
    }
}

impl<R> Seek for BoundedStream<R>
where
    R: Read + Seek,
{
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(offset) => self.start.checked_add(offset),
            SeekFrom::Current(offset) => self.absolute_position().checked_add_signed(offset),
            SeekFrom::End(offset) => self.end.checked_add_signed(offset),
        };

        match target {
            Some(absolute) if (self.start..=self.end).contains(&absolute) => {
                self.inner.seek(SeekFrom::Start(absolute))?;
                self.discard_buffer(absolute);
                Ok(absolute - self.start)
            }
            _ => Err(Error::OutOfBounds {
                target: pos,
                start: self.start,
                end: self.end,
            }
            .into()),
        }
    }

    fn stream_position(&mut self) -> io::Result<u64> {
        Ok(self.absolute_position() - self.start)
    }
}
