use crate::bsa::NAME_LEN;
use std::{fs, io, path::Path};

const TYPE_NAMED: u16 = 0x0100;
const TYPE_NUMERIC: u16 = 0x0200;

/// Synthesizes container files byte for byte.
pub(crate) struct ArchiveBuilder {
    tag: u16,
    count: Option<u16>,
    data: Vec<u8>,
    footer: Vec<u8>,
    records: u16,
}

impl ArchiveBuilder {
    fn with_tag(tag: u16) -> Self {
        Self {
            tag,
            count: None,
            data: Vec::new(),
            footer: Vec::new(),
            records: 0,
        }
    }

    pub(crate) fn named() -> Self {
        Self::with_tag(TYPE_NAMED)
    }

    pub(crate) fn numeric() -> Self {
        Self::with_tag(TYPE_NUMERIC)
    }

    pub(crate) fn tagged(tag: u16) -> Self {
        Self::with_tag(tag)
    }

    /// Overrides the record count written to the header.
    pub(crate) fn count(mut self, count: u16) -> Self {
        self.count = Some(count);
        self
    }

    pub(crate) fn name(self, name: &[u8], data: &[u8]) -> Self {
        self.name_with_flag(name, 0, data)
    }

    pub(crate) fn name_with_flag(mut self, name: &[u8], compression: u16, data: &[u8]) -> Self {
        assert!(name.len() <= NAME_LEN);
        let mut field = [0u8; NAME_LEN];
        field[..name.len()].copy_from_slice(name);
        self.data.extend_from_slice(data);
        self.footer.extend_from_slice(&field);
        self.footer.extend_from_slice(&compression.to_le_bytes());
        self.push_len(data.len());
        self
    }

    /// Adds a named footer record that claims `len` bytes without writing any data for it.
    pub(crate) fn name_without_data(mut self, name: &[u8], compression: u16, len: u32) -> Self {
        assert!(name.len() <= NAME_LEN);
        let mut field = [0u8; NAME_LEN];
        field[..name.len()].copy_from_slice(name);
        self.footer.extend_from_slice(&field);
        self.footer.extend_from_slice(&compression.to_le_bytes());
        self.footer.extend_from_slice(&len.to_le_bytes());
        self.records += 1;
        self
    }

    pub(crate) fn id(mut self, id: u32, data: &[u8]) -> Self {
        self.data.extend_from_slice(data);
        self.footer.extend_from_slice(&id.to_le_bytes());
        self.push_len(data.len());
        self
    }

    /// Adds a footer record that claims `len` bytes without writing any data for it.
    pub(crate) fn id_without_data(mut self, id: u32, len: u32) -> Self {
        self.footer.extend_from_slice(&id.to_le_bytes());
        self.footer.extend_from_slice(&len.to_le_bytes());
        self.records += 1;
        self
    }

    fn push_len(&mut self, len: usize) {
        let len = u32::try_from(len).expect("test data fits in a footer record");
        self.footer.extend_from_slice(&len.to_le_bytes());
        self.records += 1;
    }

    pub(crate) fn build(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&self.count.unwrap_or(self.records).to_le_bytes());
        bytes.extend_from_slice(&self.tag.to_le_bytes());
        bytes.extend_from_slice(&self.data);
        bytes.extend_from_slice(&self.footer);
        bytes
    }

    pub(crate) fn write(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.build())
    }
}

/// Writes a loose file, creating its parent directories.
pub(crate) fn write_loose(path: &Path, data: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, data)
}
