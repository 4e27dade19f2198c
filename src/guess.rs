use crate::bsa::ArchiveKind;
use std::io::Read;

/// Sniffs the container flavor from the first four bytes of `source`.
///
/// Returns `None` if the header is truncated or carries an unknown type tag.
#[allow(clippy::module_name_repetitions)]
pub fn guess_format<In>(source: &mut In) -> Option<ArchiveKind>
where
    In: ?Sized + Read,
{
    let mut buf = [0u8; 4];
    source.read_exact(&mut buf).ok()?;
    let tag = u16::from_le_bytes([buf[2], buf[3]]);
    ArchiveKind::from_tag(tag)
}
