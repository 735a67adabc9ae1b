//! Typed view of the texture-related lumps of one container.
//!
//! A [`Catalog`] is decoded once per container and never changes afterwards.
//! It holds:
//!
//! - the `PNAMES` patch name table,
//! - every composite texture from `TEXTURE1` and `TEXTURE2`, with map patch
//!   indices already resolved to patch names,
//! - the flat names found between the `F_START`/`F_END` (or `FF_START`/`FF_END`)
//!   markers, in directory order,
//! - the raw `ANIMATED` and `SWITCHES` tables.
//!
//! Animation records only name the first and last frame of a cycle; the
//! frames in between are whatever sits between them in the texture or flat
//! list. [`AnimationDef::materialize`] recovers the full cycle from a name list,
//! which is why every list here keeps its source order.

use std::fmt::Display;

use wad_io::{canonical_name, Lump, Wad};

use crate::error::{Error, Result};
use crate::records::{
    read_record, read_u32, RawAnimation, RawMapPatch, RawSwitch, RawTextureHeader, Record,
};

pub const PNAMES: &str = "PNAMES";
pub const TEXTURE1: &str = "TEXTURE1";
pub const TEXTURE2: &str = "TEXTURE2";
pub const TEXTURE_LUMPS: [&str; 2] = [TEXTURE1, TEXTURE2];
pub const ANIMATED: &str = "ANIMATED";
pub const SWITCHES: &str = "SWITCHES";

pub const FLAT_START_MARKERS: [&str; 2] = ["F_START", "FF_START"];
pub const FLAT_END_MARKERS: [&str; 2] = ["F_END", "FF_END"];

/// `kind` value ending the `ANIMATED` table.
pub const ANIMATED_TERMINATOR: u8 = 0xFF;

/// Placement of one patch inside a composite texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapPatch {
    /// Patch name, resolved through `PNAMES` when the texture was decoded.
    pub patch: String,
    pub x: i16,
    pub y: i16,
    pub stepdir: u16,
    pub colormap: u16,
}

/// A composite wall texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    pub name: String,
    pub masked: u32,
    pub width: u16,
    pub height: u16,
    pub columndir: u32,
    pub patches: Vec<MapPatch>,
}

/// The textures of one `TEXTUREn` lump, in lump order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureTable {
    pub lump: String,
    pub textures: Vec<Texture>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationKind {
    Flat,
    Texture,
}

impl AnimationKind {
    /// Bit 0 of the record kind selects textures. Higher bits carry port
    /// specific flags and do not change the namespace.
    pub fn from_raw(kind: u8) -> Self {
        if kind & 1 == 1 {
            AnimationKind::Texture
        } else {
            AnimationKind::Flat
        }
    }
}

impl Display for AnimationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                AnimationKind::Flat => "flat",
                AnimationKind::Texture => "texture",
            }
        )
    }
}

/// One record of the `ANIMATED` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationDef {
    pub kind: AnimationKind,
    pub first: String,
    pub last: String,
    pub speed: u32,
    pub(crate) record: RawAnimation,
}

/// A full animation cycle recovered from a name list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationGroup {
    pub kind: AnimationKind,
    pub members: Vec<String>,
}

impl AnimationGroup {
    pub fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|member| member == name)
    }
}

impl AnimationDef {
    /// Collect the contiguous run of `names` from `first` through the next
    /// `last`, inclusive.
    pub fn materialize<S: AsRef<str>>(&self, names: &[S]) -> Result<AnimationGroup> {
        let not_found = || Error::AnimationRangeNotFound {
            kind: self.kind,
            first: self.first.clone(),
            last: self.last.clone(),
        };

        let start = names
            .iter()
            .position(|name| name.as_ref() == self.first)
            .ok_or_else(not_found)?;
        let len = names[start..]
            .iter()
            .position(|name| name.as_ref() == self.last)
            .ok_or_else(not_found)?;

        Ok(AnimationGroup {
            kind: self.kind,
            members: names[start..=start + len]
                .iter()
                .map(|name| name.as_ref().to_string())
                .collect(),
        })
    }
}

/// One record of the `SWITCHES` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchPair {
    pub off: String,
    pub on: String,
    pub episode: u16,
    pub(crate) record: RawSwitch,
}

impl SwitchPair {
    pub fn contains(&self, name: &str) -> bool {
        self.off == name || self.on == name
    }
}

/// Decoded texture resources of one container.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    patch_names: Vec<String>,
    texture_tables: Vec<TextureTable>,
    flats: Vec<String>,
    animations: Vec<AnimationDef>,
    switches: Vec<SwitchPair>,
}

impl Catalog {
    pub fn load(wad: &Wad) -> Result<Self> {
        let patch_names = match wad.read_named(PNAMES)? {
            Some(data) => decode_patch_names(data)?,
            None => {
                tracing::debug!("No {} lump, patch table is empty", PNAMES);
                Vec::new()
            }
        };

        let mut texture_tables = Vec::new();
        for lump in TEXTURE_LUMPS {
            if let Some(data) = wad.read_named(lump)? {
                texture_tables.push(decode_texture_table(lump, data, &patch_names)?);
            }
        }

        let flats = wad
            .lumps_in_ranges(&FLAT_START_MARKERS, &FLAT_END_MARKERS)
            .into_iter()
            .filter(|lump| !is_sub_marker(lump))
            .map(|lump| lump.name.clone())
            .collect::<Vec<_>>();

        let animations = match wad.read_named(ANIMATED)? {
            Some(data) => decode_animations(data)?,
            None => {
                tracing::debug!("No {} lump, animation table is empty", ANIMATED);
                Vec::new()
            }
        };

        let switches = match wad.read_named(SWITCHES)? {
            Some(data) => decode_switches(data)?,
            None => {
                tracing::debug!("No {} lump, switch table is empty", SWITCHES);
                Vec::new()
            }
        };

        let catalog = Self {
            patch_names,
            texture_tables,
            flats,
            animations,
            switches,
        };

        tracing::info!(
            "Loaded {} catalog patches={} textures={} flats={} animations={} switches={}",
            wad.kind(),
            catalog.patch_names.len(),
            catalog.textures().count(),
            catalog.flats.len(),
            catalog.animations.len(),
            catalog.switches.len()
        );

        Ok(catalog)
    }

    /// `PNAMES` entries in table order.
    pub fn patch_names(&self) -> &[String] {
        &self.patch_names
    }

    pub fn texture_tables(&self) -> &[TextureTable] {
        &self.texture_tables
    }

    pub fn texture_table(&self, lump: &str) -> Option<&TextureTable> {
        self.texture_tables.iter().find(|table| table.lump == lump)
    }

    /// Every texture of every table, `TEXTURE1` first.
    pub fn textures(&self) -> impl Iterator<Item = &Texture> {
        self.texture_tables
            .iter()
            .flat_map(|table| table.textures.iter())
    }

    pub fn texture_names(&self) -> impl Iterator<Item = &str> {
        self.textures().map(|texture| texture.name.as_str())
    }

    /// Flat names in directory order.
    pub fn flats(&self) -> &[String] {
        &self.flats
    }

    pub fn animations(&self) -> &[AnimationDef] {
        &self.animations
    }

    pub fn switches(&self) -> &[SwitchPair] {
        &self.switches
    }
}

/// Zero-size markers nested inside the flat range, such as `F1_START`.
fn is_sub_marker(lump: &Lump) -> bool {
    lump.is_marker() && (lump.name.ends_with("_START") || lump.name.ends_with("_END"))
}

fn decode_patch_names(data: &[u8]) -> Result<Vec<String>> {
    let count = read_u32(PNAMES, data, 0)? as usize;
    let mut names = Vec::with_capacity(count.min(data.len() / 8));

    for i in 0..count {
        let offset = 4 + i * 8;
        let raw = data.get(offset..offset + 8).ok_or_else(|| Error::Truncated {
            lump: PNAMES.to_string(),
            offset,
        })?;
        names.push(canonical_name(raw));
    }

    Ok(names)
}

fn decode_texture_table(lump: &str, data: &[u8], patch_names: &[String]) -> Result<TextureTable> {
    let count = read_u32(lump, data, 0)? as usize;
    let mut textures = Vec::with_capacity(count.min(data.len() / 4));

    for index in 0..count {
        let offset = read_u32(lump, data, 4 + index * 4)? as usize;
        if offset >= data.len() {
            return Err(Error::TextureOffsetOutOfRange {
                lump: lump.to_string(),
                index,
                offset,
            });
        }

        let header: RawTextureHeader = read_record(lump, data, offset)?;
        let name = canonical_name(&header.name);

        let mut patches = Vec::with_capacity(header.patch_count as usize);
        for i in 0..header.patch_count as usize {
            let record_offset = offset + RawTextureHeader::SIZE + i * RawMapPatch::SIZE;
            let raw: RawMapPatch = read_record(lump, data, record_offset)?;

            let patch = patch_names
                .get(raw.patch_index as usize)
                .ok_or_else(|| Error::PatchIndexOutOfRange {
                    texture: name.clone(),
                    index: raw.patch_index as usize,
                    count: patch_names.len(),
                })?;

            patches.push(MapPatch {
                patch: patch.clone(),
                x: raw.x,
                y: raw.y,
                stepdir: raw.stepdir,
                colormap: raw.colormap,
            });
        }

        textures.push(Texture {
            name,
            masked: header.masked,
            width: header.width,
            height: header.height,
            columndir: header.columndir,
            patches,
        });
    }

    Ok(TextureTable {
        lump: lump.to_string(),
        textures,
    })
}

fn decode_animations(data: &[u8]) -> Result<Vec<AnimationDef>> {
    let mut animations = Vec::new();

    let mut offset = 0;
    while offset + RawAnimation::SIZE <= data.len() {
        let record: RawAnimation = read_record(ANIMATED, data, offset)?;
        if record.kind == ANIMATED_TERMINATOR {
            break;
        }

        animations.push(AnimationDef {
            kind: AnimationKind::from_raw(record.kind),
            first: canonical_name(&record.first),
            last: canonical_name(&record.last),
            speed: record.speed,
            record,
        });
        offset += RawAnimation::SIZE;
    }

    Ok(animations)
}

fn decode_switches(data: &[u8]) -> Result<Vec<SwitchPair>> {
    let mut switches = Vec::new();

    let mut offset = 0;
    while offset + RawSwitch::SIZE <= data.len() {
        let record: RawSwitch = read_record(SWITCHES, data, offset)?;
        if record.episode == 0 {
            break;
        }

        switches.push(SwitchPair {
            off: canonical_name(&record.off),
            on: canonical_name(&record.on),
            episode: record.episode,
            record,
        });
        offset += RawSwitch::SIZE;
    }

    Ok(switches)
}
