use std::{
    io::{self, Read, Seek, SeekFrom},
    mem,
};

/// A value with a fixed little-endian encoding.
pub trait BinaryStreamable {
    type Item;

    fn from_le_stream<R: Read>(stream: &mut R) -> io::Result<Self::Item>;
}

macro_rules! make_binary_streamable {
    ($t:ty) => {
        impl BinaryStreamable for $t {
            type Item = $t;

            fn from_le_stream<R: Read>(stream: &mut R) -> io::Result<Self::Item> {
                let mut bytes = [0u8; mem::size_of::<Self::Item>()];
                stream.read_exact(&mut bytes)?;
                Ok(Self::from_le_bytes(bytes))
            }
        }
    };
}

make_binary_streamable!(u16);
make_binary_streamable!(u32);

impl<const N: usize> BinaryStreamable for [u8; N] {
    type Item = [u8; N];

    fn from_le_stream<R: Read>(stream: &mut R) -> io::Result<Self::Item> {
        let mut bytes = [0u8; N];
        stream.read_exact(&mut bytes)?;
        Ok(bytes)
    }
}

impl<T0, T1> BinaryStreamable for (T0, T1)
where
    T0: BinaryStreamable,
    T1: BinaryStreamable,
{
    type Item = (T0::Item, T1::Item);

    fn from_le_stream<R: Read>(stream: &mut R) -> io::Result<Self::Item> {
        Ok((T0::from_le_stream(stream)?, T1::from_le_stream(stream)?))
    }
}

pub struct Source<'a, R>
where
    R: Read + Seek,
{
    stream: &'a mut R,
}

impl<'a, R> Source<'a, R>
where
    R: Read + Seek,
{
    pub fn new(stream: &'a mut R) -> Self {
        Self { stream }
    }

    pub fn read<T>(&mut self) -> io::Result<T>
    where
        T: BinaryStreamable<Item = T>,
    {
        T::from_le_stream(&mut self.stream)
    }

    pub fn stream_position(&mut self) -> io::Result<u64> {
        self.stream.stream_position()
    }

    pub fn stream_len(&mut self) -> io::Result<u64> {
        let position = self.stream.stream_position()?;
        let len = self.stream.seek(SeekFrom::End(0))?;
        self.stream.seek(SeekFrom::Start(position))?;
        Ok(len)
    }

    pub fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.stream.seek(pos)
    }
}
