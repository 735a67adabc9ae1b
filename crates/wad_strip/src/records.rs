//! Fixed-size on-disk records of the structural and map lumps.

use binrw::{binrw, BinRead, BinWrite, Endian};
use byteorder::{ByteOrder, LE};
use std::io::Cursor;

use crate::error::{Error, Result};

/// A record with a fixed encoded size.
pub trait Record {
    const SIZE: usize;
}

/// Texture header inside `TEXTURE1`/`TEXTURE2`, followed by `patch_count`
/// [`RawMapPatch`] records.
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawTextureHeader {
    pub name: [u8; 8],
    pub masked: u32,
    pub width: u16,
    pub height: u16,
    pub columndir: u32,
    pub patch_count: u16,
}

impl Record for RawTextureHeader {
    const SIZE: usize = 22;
}

#[binrw]
#[brw(little)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawMapPatch {
    pub x: i16,
    pub y: i16,
    pub patch_index: u16,
    pub stepdir: u16,
    pub colormap: u16,
}

impl Record for RawMapPatch {
    const SIZE: usize = 10;
}

/// One `ANIMATED` entry. Note the last frame is stored before the first.
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawAnimation {
    pub kind: u8,
    pub last: [u8; 9],
    pub first: [u8; 9],
    pub speed: u32,
}

impl Record for RawAnimation {
    const SIZE: usize = 23;
}

/// One `SWITCHES` entry. An `episode` of zero terminates the table.
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawSwitch {
    pub off: [u8; 9],
    pub on: [u8; 9],
    pub episode: u16,
}

impl Record for RawSwitch {
    const SIZE: usize = 20;
}

/// Map sidedef. Texture fields are upper, lower, middle in file order.
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawSideDef {
    pub x_offset: i16,
    pub y_offset: i16,
    pub upper: [u8; 8],
    pub lower: [u8; 8],
    pub middle: [u8; 8],
    pub sector: u16,
}

impl Record for RawSideDef {
    const SIZE: usize = 30;
}

#[binrw]
#[brw(little)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawSector {
    pub floor_height: i16,
    pub ceiling_height: i16,
    pub floor: [u8; 8],
    pub ceiling: [u8; 8],
    pub light: i16,
    pub special: u16,
    pub tag: u16,
}

impl Record for RawSector {
    const SIZE: usize = 26;
}

/// Decode the record at `offset` inside the lump `lump`.
pub fn read_record<T>(lump: &str, data: &[u8], offset: usize) -> Result<T>
where
    T: Record + for<'a> BinRead<Args<'a> = ()>,
{
    let bytes = offset
        .checked_add(T::SIZE)
        .and_then(|end| data.get(offset..end))
        .ok_or_else(|| Error::Truncated {
            lump: lump.to_string(),
            offset,
        })?;

    let mut reader = Cursor::new(bytes);
    Ok(T::read_options(&mut reader, Endian::Little, ())?)
}

pub fn write_record<T>(writer: &mut Cursor<Vec<u8>>, record: &T) -> Result<()>
where
    T: for<'a> BinWrite<Args<'a> = ()>,
{
    record.write_options(writer, Endian::Little, ())?;
    Ok(())
}

pub fn read_u32(lump: &str, data: &[u8], offset: usize) -> Result<u32> {
    data.get(offset..offset + 4)
        .map(LE::read_u32)
        .ok_or_else(|| Error::Truncated {
            lump: lump.to_string(),
            offset,
        })
}
