//! Texture and flat references found in map geometry.

use wad_io::{canonical_name, Wad};

use crate::error::Result;
use crate::names::NameSet;
use crate::records::{read_record, RawSector, RawSideDef, Record};

pub const SIDEDEFS: &str = "SIDEDEFS";
pub const SECTORS: &str = "SECTORS";

/// Sidedef texture name meaning "no texture".
pub const NO_TEXTURE: &str = "-";

/// Wall texture names used by every map's `SIDEDEFS`, in first-seen order.
pub fn sidedef_textures(wad: &Wad) -> Result<NameSet> {
    let mut textures = NameSet::new();

    for lump in wad.lumps_named(SIDEDEFS) {
        let data = wad.read(lump)?;
        for offset in record_offsets::<RawSideDef>(data.len()) {
            let sidedef: RawSideDef = read_record(SIDEDEFS, data, offset)?;
            for field in [&sidedef.upper, &sidedef.middle, &sidedef.lower] {
                let name = canonical_name(field);
                if !name.is_empty() && name != NO_TEXTURE {
                    textures.insert(&name);
                }
            }
        }
    }

    Ok(textures)
}

/// Floor and ceiling flat names used by every map's `SECTORS`.
pub fn sector_flats(wad: &Wad) -> Result<NameSet> {
    let mut flats = NameSet::new();

    for lump in wad.lumps_named(SECTORS) {
        let data = wad.read(lump)?;
        for offset in record_offsets::<RawSector>(data.len()) {
            let sector: RawSector = read_record(SECTORS, data, offset)?;
            for field in [&sector.floor, &sector.ceiling] {
                let name = canonical_name(field);
                if !name.is_empty() {
                    flats.insert(&name);
                }
            }
        }
    }

    Ok(flats)
}

/// Record start offsets covering `len` bytes. A trailing partial record
/// yields one last offset so that reading it reports the truncation.
fn record_offsets<T: Record>(len: usize) -> impl Iterator<Item = usize> {
    (0..len).step_by(T::SIZE)
}
