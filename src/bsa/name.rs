use bstr::{BStr, ByteSlice as _};
use core::fmt::{self, Display, Formatter};

/// The width of a name field in a [`Named`](crate::bsa::ArchiveKind::Named) container's footer.
pub const NAME_LEN: usize = 12;

/// The key of an entry in a [`Named`](crate::bsa::ArchiveKind::Named) container.
///
/// The stored bytes are kept verbatim, padding included, and keys are ordered by those bytes.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Name([u8; NAME_LEN]);

impl Name {
    #[must_use]
    pub fn new(bytes: [u8; NAME_LEN]) -> Self {
        Self(bytes)
    }

    /// Builds the key a lookup for `name` should use.
    ///
    /// Shorter names are padded with NUL bytes. Names longer than [`NAME_LEN`] can not exist in a
    /// container, so `None` is returned for them.
    #[must_use]
    pub fn from_lookup(name: &[u8]) -> Option<Self> {
        if name.len() > NAME_LEN {
            return None;
        }

        let mut bytes = [0u8; NAME_LEN];
        bytes[..name.len()].copy_from_slice(name);
        Some(Self(bytes))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; NAME_LEN] {
        &self.0
    }

    /// The name without its trailing NUL padding.
    #[must_use]
    pub fn trimmed(&self) -> &BStr {
        let len = self.0.iter().rposition(|&x| x != 0).map_or(0, |x| x + 1);
        self.0[..len].as_bstr()
    }
}

impl From<[u8; NAME_LEN]> for Name {
    fn from(value: [u8; NAME_LEN]) -> Self {
        Self(value)
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self.trimmed(), f)
    }
}
