use crate::{
    bounded::BoundedStream,
    bsa::{Error, Name, Result, NAME_LEN},
    io::Source,
    Reader, Sealed,
};
use std::{
    collections::{btree_map, BTreeMap},
    fs,
    io::{self, Read, Seek, SeekFrom},
    path::{Path, PathBuf},
};
use tracing::{debug, info, trace};

mod constants {
    use crate::bsa::NAME_LEN;

    pub const NAMED_RECORD_SIZE: u64 = NAME_LEN as u64 + 0x2 + 0x4;
    pub const NUMERIC_RECORD_SIZE: u64 = 0x4 + 0x4;
    pub const TYPE_NAMED: u16 = 0x0100;
    pub const TYPE_NUMERIC: u16 = 0x0200;
}

/// The flavor of a container, as declared by its header.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Kind {
    /// Entries are keyed by 12-byte names.
    Named,
    /// Entries are keyed by 32-bit ids.
    Numeric,
}

impl Kind {
    #[must_use]
    pub(crate) fn from_tag(tag: u16) -> Option<Self> {
        match tag {
            constants::TYPE_NAMED => Some(Self::Named),
            constants::TYPE_NUMERIC => Some(Self::Numeric),
            _ => None,
        }
    }

    #[must_use]
    fn record_size(self) -> u64 {
        match self {
            Self::Named => constants::NAMED_RECORD_SIZE,
            Self::Numeric => constants::NUMERIC_RECORD_SIZE,
        }
    }
}

/// The location of one entry's data within its container, as `[start, end)`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Entry {
    pub start: u64,
    pub end: u64,
}

impl Entry {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }
}

#[derive(Debug)]
enum Index {
    Named(BTreeMap<Name, Entry>),
    Numeric(BTreeMap<u32, Entry>),
}

struct Header {
    count: u16,
    kind: Kind,
}

/// Rebuilds entry ranges from the lengths stored in the footer.
///
/// Entries are packed back to back in footer order, the first one starting wherever the header
/// ended.
struct Layout {
    next: u64,
    footer: u64,
    index: usize,
}

impl Layout {
    fn next_entry(&mut self, len: u32) -> Result<Entry> {
        let start = self.next;
        let end = start + u64::from(len);
        if end > self.footer {
            return Err(Error::EntryOutOfBounds {
                index: self.index,
                end,
                footer: self.footer,
            });
        }

        self.next = end;
        self.index += 1;
        Ok(Entry { start, end })
    }
}

/// An index over one container file.
///
/// Only the index is kept in memory. Every call to [`open`](Archive::open) or
/// [`open_id`](Archive::open_id) opens the container anew, so any number of entries may be read
/// at the same time.
#[derive(Debug)]
pub struct Archive {
    path: PathBuf,
    index: Index,
}

impl Sealed for Archive {}

impl Reader<&Path> for Archive {
    type Error = Error;
    type Item = Archive;

    fn read(source: &Path) -> Result<Self::Item> {
        let mut fd = fs::File::open(source).map_err(|err| Error::Open {
            path: source.to_path_buf(),
            source: err,
        })?;
        let mut source_stream = Source::new(&mut fd);
        let index = Self::do_read(&mut source_stream, source)?;
        let result = Self {
            path: source.to_path_buf(),
            index,
        };
        info!(
            "loaded {:?} archive {:?} with {} entries",
            result.kind(),
            result.path,
            result.len()
        );
        Ok(result)
    }
}

impl Archive {
    /// Opens the entry with the given name as a stream.
    ///
    /// Returns `None` if there is no such entry, or if the container can no longer be opened.
    #[must_use]
    pub fn open<K>(&self, name: K) -> Option<BoundedStream<fs::File>>
    where
        K: AsRef<[u8]>,
    {
        let entry = self.entry(name)?;
        self.open_entry(entry)
    }

    /// Opens the entry with the given id as a stream.
    ///
    /// Returns `None` if there is no such entry, or if the container can no longer be opened.
    #[must_use]
    pub fn open_id(&self, id: u32) -> Option<BoundedStream<fs::File>> {
        let entry = self.entry_id(id)?;
        self.open_entry(entry)
    }

    #[must_use]
    pub fn exists<K>(&self, name: K) -> bool
    where
        K: AsRef<[u8]>,
    {
        self.entry(name).is_some()
    }

    #[must_use]
    pub fn exists_id(&self, id: u32) -> bool {
        self.entry_id(id).is_some()
    }

    #[must_use]
    pub fn entry<K>(&self, name: K) -> Option<Entry>
    where
        K: AsRef<[u8]>,
    {
        match &self.index {
            Index::Named(map) => map.get(&Name::from_lookup(name.as_ref())?).copied(),
            Index::Numeric(_) => None,
        }
    }

    #[must_use]
    pub fn entry_id(&self, id: u32) -> Option<Entry> {
        match &self.index {
            Index::Named(_) => None,
            Index::Numeric(map) => map.get(&id).copied(),
        }
    }

    /// The names of every entry, in ascending order. Empty for numeric containers.
    pub fn list(&self) -> impl Iterator<Item = &Name> {
        let names = match &self.index {
            Index::Named(map) => Some(map.keys()),
            Index::Numeric(_) => None,
        };
        names.into_iter().flatten()
    }

    /// The ids of every entry, in ascending order. Empty for named containers.
    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        let ids = match &self.index {
            Index::Named(_) => None,
            Index::Numeric(map) => Some(map.keys().copied()),
        };
        ids.into_iter().flatten()
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        match self.index {
            Index::Named(_) => Kind::Named,
            Index::Numeric(_) => Kind::Numeric,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match &self.index {
            Index::Named(map) => map.len(),
            Index::Numeric(map) => map.len(),
        }
    }

    fn open_entry(&self, entry: Entry) -> Option<BoundedStream<fs::File>> {
        trace!("opening [{}, {}) from {:?}", entry.start, entry.end, self.path);
        let result = fs::File::open(&self.path).and_then(|mut fd| {
            fd.seek(SeekFrom::Start(entry.start))?;
            Ok(fd)
        });
        match result {
            Ok(fd) => Some(BoundedStream::new(fd, entry.start, entry.end)),
            Err(err) => {
                debug!("failed to reopen archive {:?}: {err}", self.path);
                None
            }
        }
    }

    fn do_read<R>(source: &mut Source<R>, path: &Path) -> Result<Index>
    where
        R: Read + Seek,
    {
        let header = Self::read_header(source)?;
        match header.kind {
            Kind::Named => Self::read_named(source, header.count, path).map(Index::Named),
            Kind::Numeric => Self::read_numeric(source, header.count, path).map(Index::Numeric),
        }
    }

    fn read_header<R>(source: &mut Source<R>) -> Result<Header>
    where
        R: Read + Seek,
    {
        let (count, tag): (u16, u16) = source.read()?;
        match Kind::from_tag(tag) {
            Some(kind) => Ok(Header { count, kind }),
            None => Err(Error::InvalidType(tag)),
        }
    }

    fn locate_footer<R>(source: &mut Source<R>, count: u16, kind: Kind) -> Result<Layout>
    where
        R: Read + Seek,
    {
        let base = source.stream_position()?;
        let footer = Self::seek_footer(source, u64::from(count) * kind.record_size())
            .map_err(|err| Error::FooterSeek { count, source: err })?;
        Ok(Layout {
            next: base,
            footer,
            index: 0,
        })
    }

    fn seek_footer<R>(source: &mut Source<R>, footer_len: u64) -> io::Result<u64>
    where
        R: Read + Seek,
    {
        let len = source.stream_len()?;
        let offset = len.checked_sub(footer_len).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("footer of {footer_len} bytes does not fit in {len} bytes"),
            )
        })?;
        source.seek(SeekFrom::Start(offset))
    }

    fn read_named<R>(
        source: &mut Source<R>,
        count: u16,
        path: &Path,
    ) -> Result<BTreeMap<Name, Entry>>
    where
        R: Read + Seek,
    {
        let mut layout = Self::locate_footer(source, count, Kind::Named)?;
        let mut map = BTreeMap::new();
        for _ in 0..count {
            let (name, compression): ([u8; NAME_LEN], u16) =
                source.read().map_err(Error::FooterRead)?;
            if compression != 0 {
                return Err(Error::Compressed);
            }

            let len: u32 = source.read().map_err(Error::FooterRead)?;
            let entry = layout.next_entry(len)?;
            match map.entry(Name::new(name)) {
                btree_map::Entry::Vacant(slot) => {
                    slot.insert(entry);
                }
                btree_map::Entry::Occupied(slot) => {
                    return Err(Error::DuplicateName {
                        name: slot.key().trimmed().to_owned(),
                        path: path.to_path_buf(),
                    });
                }
            }
        }

        Ok(map)
    }

    fn read_numeric<R>(
        source: &mut Source<R>,
        count: u16,
        path: &Path,
    ) -> Result<BTreeMap<u32, Entry>>
    where
        R: Read + Seek,
    {
        let mut layout = Self::locate_footer(source, count, Kind::Numeric)?;
        let mut map = BTreeMap::new();
        for _ in 0..count {
            let (id, len): (u32, u32) = source.read().map_err(Error::FooterRead)?;
            let entry = layout.next_entry(len)?;
            if let Some(previous) = map.insert(id, entry) {
                debug!(
                    "duplicate id {id} in archive {path:?}: replacing [{}, {}) with [{}, {})",
                    previous.start, previous.end, entry.start, entry.end
                );
            }
        }

        Ok(map)
    }
}
