use binrw::binrw;
use std::fmt::Display;

/// The two container roles, identified by the header magic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WadKind {
    /// A complete base game container.
    Iwad,
    /// A patch container layered over a base.
    #[default]
    Pwad,
}

impl WadKind {
    pub fn magic(self) -> [u8; 4] {
        match self {
            WadKind::Iwad => *b"IWAD",
            WadKind::Pwad => *b"PWAD",
        }
    }

    pub fn from_magic(magic: [u8; 4]) -> Option<Self> {
        match &magic {
            b"IWAD" => Some(WadKind::Iwad),
            b"PWAD" => Some(WadKind::Pwad),
            _ => None,
        }
    }
}

impl Display for WadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                WadKind::Iwad => "IWAD",
                WadKind::Pwad => "PWAD",
            }
        )
    }
}

#[binrw]
#[brw(little)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WadHeader {
    pub magic: [u8; 4],
    pub lump_count: u32,
    pub directory_offset: u32,
}

impl WadHeader {
    pub const SIZE: usize = 12;
}

#[binrw]
#[brw(little)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectoryEntry {
    pub offset: u32,
    pub size: u32,
    pub name: [u8; 8],
}

impl DirectoryEntry {
    pub const SIZE: usize = 16;
}
