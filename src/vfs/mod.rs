//! The layered namespace the rest of the engine reads its assets through
//!
//! A [`Vfs`] unions any number of loose-file data directories with the containers found in the
//! game's data directory. Lookups by name try the containers first and the directories second,
//! and within each group whatever was added last wins. Architecture meshes and sound effects are
//! addressed by id instead, and are served only by their own dedicated containers.
//!
//! # Reading
//! ```rust
//! use dfvfs::vfs::Vfs;
//! use std::io::Read as _;
//!
//! fn example() -> Option<()> {
//!     let mut vfs = Vfs::new("path/to/daggerfall/arena2").ok()?;
//!     vfs.add_data_path("path/to/mods");
//!     let mut stream = vfs.open("TEXTURE.000")?;
//!     let mut bytes = Vec::new();
//!     stream.read_to_end(&mut bytes).ok()?;
//!     let _sound = vfs.open_sound_id(3)?;
//!     Some(())
//! }
//! ```

mod filesystem;
mod options;
mod stream;

pub use self::{
    filesystem::Vfs,
    options::{Options, OptionsBuilder},
    stream::Stream,
};

use crate::bsa;
use std::path::PathBuf;

#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to load archive: {path:?}")]
    Archive {
        path: PathBuf,
        #[source]
        source: bsa::Error,
    },

    #[error("invalid glob pattern: {pattern:?}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

pub type Result<T> = core::result::Result<T, Error>;
