use binrw::BinRead;
use std::{io::Cursor, path::Path};

use crate::{canonical_name, DirectoryEntry, WadError, WadHeader, WadKind, LUMP_NAME_LEN};

/// A named byte range inside a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lump {
    /// Canonical (upper-case, trimmed) name.
    pub name: String,
    /// The name field exactly as stored in the directory.
    pub raw_name: [u8; LUMP_NAME_LEN],
    pub offset: u32,
    pub size: u32,
}

impl Lump {
    /// Zero-size lumps are used as namespace markers (`F_START`, `P_END`, ...).
    pub fn is_marker(&self) -> bool {
        self.size == 0
    }
}

/// An opened WAD container.
///
/// The whole file is held in memory. Every directory entry is bounds-checked
/// when the container is opened, so reading a lump afterwards cannot run past
/// the end of the data.
#[derive(Debug, Clone)]
pub struct Wad {
    kind: WadKind,
    lumps: Vec<Lump>,
    data: Vec<u8>,
}

impl Wad {
    pub fn from_path<P: AsRef<Path> + ?Sized>(path: &P) -> Result<Self, WadError> {
        let data = std::fs::read(path)?;
        Self::from_bytes(data)
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Self, WadError> {
        if data.len() < WadHeader::SIZE {
            return Err(WadError::TruncatedHeader { len: data.len() });
        }

        let mut reader = Cursor::new(&data[..]);
        let header = WadHeader::read(&mut reader)?;
        let kind = WadKind::from_magic(header.magic).ok_or(WadError::BadMagic(header.magic))?;

        let directory_end = header.directory_offset as u64
            + header.lump_count as u64 * DirectoryEntry::SIZE as u64;
        if directory_end > data.len() as u64 {
            return Err(WadError::BadDirectory {
                offset: header.directory_offset,
                count: header.lump_count,
                file_len: data.len(),
            });
        }

        reader.set_position(header.directory_offset as u64);
        let mut lumps = Vec::with_capacity(header.lump_count as usize);
        for _ in 0..header.lump_count {
            let entry = DirectoryEntry::read(&mut reader)?;
            let name = canonical_name(&entry.name);

            if entry.offset as u64 + entry.size as u64 > data.len() as u64 {
                return Err(WadError::LumpOutOfBounds {
                    name,
                    offset: entry.offset,
                    size: entry.size,
                    file_len: data.len(),
                });
            }

            lumps.push(Lump {
                name,
                raw_name: entry.name,
                offset: entry.offset,
                size: entry.size,
            });
        }

        tracing::debug!(
            "Opened {} with {} lumps ({} bytes)",
            kind,
            lumps.len(),
            data.len()
        );

        Ok(Self { kind, lumps, data })
    }

    pub fn kind(&self) -> WadKind {
        self.kind
    }

    /// The directory, in file order.
    pub fn lumps(&self) -> &[Lump] {
        &self.lumps
    }

    /// Total size of the container in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// First lump with the given name.
    pub fn lump(&self, name: &str) -> Option<&Lump> {
        self.lumps.iter().find(|lump| lump.name == name)
    }

    /// Every lump with the given name, in directory order. Map lumps such as
    /// `SIDEDEFS` repeat once per map.
    pub fn lumps_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Lump> + 'a {
        self.lumps.iter().filter(move |lump| lump.name == name)
    }

    pub fn read(&self, lump: &Lump) -> Result<&[u8], WadError> {
        let start = lump.offset as usize;
        let end = start + lump.size as usize;
        self.data
            .get(start..end)
            .ok_or_else(|| WadError::LumpOutOfBounds {
                name: lump.name.clone(),
                offset: lump.offset,
                size: lump.size,
                file_len: self.data.len(),
            })
    }

    /// Read the first lump with the given name, if present.
    pub fn read_named(&self, name: &str) -> Result<Option<&[u8]>, WadError> {
        match self.lump(name) {
            Some(lump) => self.read(lump).map(Some),
            None => Ok(None),
        }
    }

    /// The run of lumps strictly between the first `start` marker and the
    /// following `end` marker. An unterminated run extends to the end of the
    /// directory; a missing `start` yields nothing.
    pub fn lumps_between(&self, start: &str, end: &str) -> Vec<&Lump> {
        self.lumps
            .iter()
            .skip_while(|lump| lump.name != start)
            .skip(1)
            .take_while(|lump| lump.name != end)
            .collect()
    }

    /// Every lump inside any range opened by one of `starts` and closed by one
    /// of `ends`, in directory order. Handles containers with several marker
    /// blocks and with mixed spellings (`FF_START` ... `F_END`).
    pub fn lumps_in_ranges(&self, starts: &[&str], ends: &[&str]) -> Vec<&Lump> {
        let mut in_range = false;
        let mut lumps = Vec::new();

        for lump in &self.lumps {
            if in_range {
                if ends.contains(&lump.name.as_str()) {
                    in_range = false;
                } else {
                    lumps.push(lump);
                }
            } else if starts.contains(&lump.name.as_str()) {
                in_range = true;
            }
        }

        lumps
    }
}
