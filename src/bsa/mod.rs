//! Daggerfall's BSA containers
//!
//! A container packs many entries back to back right after a 4-byte header, and describes them in a
//! directory of fixed-size records at the very end of the file. Each record carries only a key and
//! a length, so the position of every entry is recovered by accumulating the lengths in directory
//! order. Two flavors exist, selected by the header's type tag:
//!
//! * [`Named`](ArchiveKind::Named) containers key their entries with 12-byte names.
//! * [`Numeric`](ArchiveKind::Numeric) containers key their entries with 32-bit ids.
//!
//! # Reading
//! ```rust
//! use dfvfs::{bsa::Archive, prelude::*};
//! use std::{io::Read as _, path::Path};
//!
//! fn example() -> Option<()> {
//!     let archive = Archive::read(Path::new("path/to/daggerfall/arena2/MAPS.BSA")).ok()?;
//!     let mut stream = archive.open("MAPNAMES.000")?;
//!     let mut bytes = Vec::new();
//!     stream.read_to_end(&mut bytes).ok()?;
//!     Some(())
//! }
//! ```

mod archive;
mod name;

pub use self::{
    archive::{Archive, Entry, Kind as ArchiveKind},
    name::{Name, NAME_LEN},
};

use bstr::BString;
use std::{io, path::PathBuf};

/// Coarse classification of everything that can abort loading a container.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// The container could not be opened, seeked or read.
    Io,
    /// The container is malformed.
    Format,
    /// The container uses a feature this library does not implement.
    Unsupported,
}

#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("compressed entries not supported")]
    Compressed,

    #[error("duplicate entry name {name:?} in archive: {path:?}")]
    DuplicateName { name: BString, path: PathBuf },

    #[error("entry at index {index} ends at {end}, past the start of the footer at {footer}")]
    EntryOutOfBounds { index: usize, end: u64, footer: u64 },

    #[error("failed reading archive footer")]
    FooterRead(#[source] io::Error),

    #[error("failed to seek to the footer of an archive with {count} entries")]
    FooterSeek {
        count: u16,
        #[source]
        source: io::Error,
    },

    #[error("invalid type tag read from archive header: {0:#06x}")]
    InvalidType(u16),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("failed to open archive: {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) | Self::FooterRead(_) | Self::FooterSeek { .. } | Self::Open { .. } => {
                ErrorKind::Io
            }
            Self::DuplicateName { .. } | Self::EntryOutOfBounds { .. } | Self::InvalidType(_) => {
                ErrorKind::Format
            }
            Self::Compressed => ErrorKind::Unsupported,
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
