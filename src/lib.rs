//! Read-only access to Daggerfall's game data. Learn more about the containers themselves in [`bsa`], or about how containers and loose files are layered into a single namespace in [`vfs`].

#![warn(
    clippy::pedantic,
    clippy::single_char_lifetime_names,
    clippy::std_instead_of_core
)]
#![allow(
    unknown_lints,
    clippy::enum_glob_use,
    clippy::missing_errors_doc,
    clippy::struct_field_names
)]

mod bounded;
pub mod bsa;
mod glob;
mod guess;
mod host;
mod io;
#[cfg(test)]
mod testing;
pub mod vfs;

pub use bounded::BoundedStream;
pub use glob::Pattern;
pub use guess::guess_format;
pub use host::{HostIo, ResourceOpener};

mod private {
    pub trait Sealed {}
}

use private::Sealed;

/// A trait that enables reading from various sources.
pub trait Reader<T>: Sealed {
    type Error;
    type Item;

    /// Reads an instance of `Self::Item` from the given source.
    fn read(source: T) -> core::result::Result<Self::Item, Self::Error>;
}

pub use bstr::{BStr, BString, ByteSlice};

/// Convenience using statements for traits that are needed to work with the library.
pub mod prelude {
    pub use crate::Reader as _;
}
