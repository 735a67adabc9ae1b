use binrw::BinWrite;
use std::io::{Cursor, Write};

use crate::{encode_name, DirectoryEntry, WadError, WadHeader, WadKind, LUMP_NAME_LEN};

/// Assembles a WAD container from an ordered list of lump payloads.
///
/// The directory is written straight after the header and the payloads follow
/// it, so each lump's offset is `12 + 16 * count` plus the sizes of the lumps
/// before it. All payloads are held until [`build`](Self::build) so offsets
/// are only computed once every size is known.
#[derive(Debug, Clone, Default)]
pub struct WadWriter {
    kind: WadKind,
    lumps: Vec<(EntryName, Vec<u8>)>,
}

#[derive(Debug, Clone)]
enum EntryName {
    /// Encoded and validated when the container is built.
    Text(String),
    /// Written back byte for byte.
    Raw([u8; LUMP_NAME_LEN]),
}

impl EntryName {
    fn encode(&self) -> Result<[u8; LUMP_NAME_LEN], WadError> {
        match self {
            EntryName::Text(name) => encode_name::<LUMP_NAME_LEN>(name),
            EntryName::Raw(raw) => Ok(*raw),
        }
    }
}

impl WadWriter {
    pub fn new(kind: WadKind) -> Self {
        Self {
            kind,
            lumps: Vec::new(),
        }
    }

    /// Append a lump, builder style.
    pub fn with_lump(mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.push_lump(name, data);
        self
    }

    pub fn push_lump(&mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) {
        self.lumps.push((EntryName::Text(name.into()), data.into()));
    }

    /// Append a lump under a directory name field taken verbatim from another
    /// container, such as [`Lump::raw_name`](crate::Lump::raw_name).
    pub fn push_raw_lump(&mut self, raw_name: [u8; LUMP_NAME_LEN], data: impl Into<Vec<u8>>) {
        self.lumps.push((EntryName::Raw(raw_name), data.into()));
    }

    pub fn len(&self) -> usize {
        self.lumps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lumps.is_empty()
    }

    /// Build the container into a fresh buffer.
    pub fn build(&self) -> Result<Vec<u8>, WadError> {
        let mut cursor = Cursor::new(Vec::with_capacity(self.encoded_size()));
        self.write_to(&mut cursor)?;
        Ok(cursor.into_inner())
    }

    pub fn write_to<W: Write + std::io::Seek>(&self, writer: &mut W) -> Result<(), WadError> {
        let total = self.encoded_size();
        if u32::try_from(total).is_err() {
            return Err(WadError::ContainerTooLarge { size: total });
        }

        let directory_size = self.lumps.len() * DirectoryEntry::SIZE;
        WadHeader {
            magic: self.kind.magic(),
            lump_count: self.lumps.len() as u32,
            directory_offset: WadHeader::SIZE as u32,
        }
        .write(writer)?;

        let mut offset = WadHeader::SIZE + directory_size;
        for (name, data) in &self.lumps {
            DirectoryEntry {
                offset: offset as u32,
                size: data.len() as u32,
                name: name.encode()?,
            }
            .write(writer)?;
            offset += data.len();
        }

        for (_, data) in &self.lumps {
            writer.write_all(data)?;
        }

        Ok(())
    }

    fn encoded_size(&self) -> usize {
        WadHeader::SIZE
            + self.lumps.len() * DirectoryEntry::SIZE
            + self.lumps.iter().map(|(_, data)| data.len()).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Wad;

    #[test]
    fn test_offsets_follow_directory() {
        let bytes = WadWriter::new(WadKind::Iwad)
            .with_lump("PLAYPAL", vec![1; 10])
            .with_lump("F_START", Vec::new())
            .with_lump("FLAT1", vec![2; 6])
            .build()
            .unwrap();

        assert_eq!(&bytes[..4], b"IWAD");
        assert_eq!(bytes.len(), 12 + 3 * 16 + 16);

        let wad = Wad::from_bytes(bytes).unwrap();
        let offsets = wad
            .lumps()
            .iter()
            .map(|lump| (lump.offset, lump.size))
            .collect::<Vec<_>>();
        assert_eq!(offsets, [(60, 10), (70, 0), (70, 6)]);
        assert_eq!(wad.read_named("FLAT1").unwrap(), Some(&[2; 6][..]));
    }

    #[test]
    fn test_rejects_long_names() {
        let result = WadWriter::new(WadKind::Pwad)
            .with_lump("WAYTOOLONG", vec![0])
            .build();
        assert!(matches!(result, Err(WadError::InvalidLumpName { .. })));
    }

    #[test]
    fn test_raw_names_written_verbatim() {
        let mut writer = WadWriter::new(WadKind::Pwad);
        writer.push_raw_lump(*b"DEMO\xE9\0\0\0", vec![7]);
        let bytes = writer.build().unwrap();

        assert_eq!(&bytes[20..28], b"DEMO\xE9\0\0\0");
        let wad = Wad::from_bytes(bytes).unwrap();
        assert_eq!(wad.read(&wad.lumps()[0]).unwrap(), &[7]);
    }

    #[test]
    fn test_empty_container() {
        let bytes = WadWriter::default().build().unwrap();
        assert_eq!(bytes, b"PWAD\0\0\0\0\x0c\0\0\0");
    }
}
