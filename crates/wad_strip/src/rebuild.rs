//! Re-emission of the overlay container without dead resources.
//!
//! Structural lumps are encoded from scratch out of the catalog and the live
//! sets; every other surviving lump is copied byte for byte. The directory is
//! laid out by [`WadWriter`] once all payloads exist.

use byteorder::{WriteBytesExt, LE};
use std::collections::HashMap;
use std::io::{Cursor, Write};

use wad_io::{encode_name, Wad, WadWriter, LUMP_NAME_LEN};

use crate::catalog::{
    AnimationDef, AnimationKind, Catalog, SwitchPair, TextureTable, ANIMATED,
    ANIMATED_TERMINATOR, PNAMES, SWITCHES, TEXTURE1, TEXTURE2,
};
use crate::error::{Error, Result};
use crate::liveness::{Analysis, Unresolved, UsedSet};
use crate::names::NameSet;
use crate::options::StripOptions;
use crate::records::{write_record, RawMapPatch, RawSwitch, RawTextureHeader, Record};

/// Output of a rebuild.
#[derive(Debug, Clone)]
pub struct Rebuilt {
    /// The complete new container.
    pub bytes: Vec<u8>,
    pub report: StripReport,
}

/// What a rebuild kept and dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StripReport {
    pub input_size: usize,
    pub output_size: usize,
    pub lumps_kept: usize,
    /// Patch and flat lumps dropped as unused, in directory order.
    pub removed_lumps: Vec<String>,
    /// Editor metadata lumps dropped by prefix.
    pub private_lumps: Vec<String>,
    pub textures_kept: usize,
    pub textures_removed: usize,
    pub patch_names_kept: usize,
    pub patch_names_removed: usize,
    pub animations_removed: usize,
    pub switches_removed: usize,
    pub unresolved: Unresolved,
}

impl StripReport {
    pub fn bytes_saved(&self) -> usize {
        self.input_size.saturating_sub(self.output_size)
    }
}

pub fn rebuild(
    overlay: &Wad,
    catalog: &Catalog,
    analysis: &Analysis,
    options: &StripOptions,
) -> Result<Rebuilt> {
    let used = &analysis.used;

    // PNAMES keeps only what this container's own live textures place
    let placed = catalog
        .textures()
        .filter(|texture| used.textures.contains(&texture.name))
        .flat_map(|texture| texture.patches.iter().map(|p| p.patch.as_str()))
        .collect::<NameSet>();
    let patch_names = catalog
        .patch_names()
        .iter()
        .map(String::as_str)
        .filter(|name| placed.contains(name))
        .collect::<NameSet>();
    let patch_index = patch_names
        .iter()
        .enumerate()
        .map(|(index, name)| (name, index))
        .collect::<HashMap<_, _>>();

    let mut report = summarize(catalog, used, &patch_names);
    report.input_size = overlay.size();
    report.unresolved = analysis.unresolved.clone();

    let mut writer = WadWriter::new(overlay.kind());
    for lump in overlay.lumps() {
        let name = lump.name.as_str();

        if options.is_private(name) {
            tracing::debug!("Dropping private lump {}", name);
            report.private_lumps.push(lump.name.clone());
            continue;
        }

        if analysis.prunable.contains(name)
            && !used.patches.contains(name)
            && !used.flats.contains(name)
        {
            tracing::debug!("Dropping unused lump {} ({} bytes)", name, lump.size);
            report.removed_lumps.push(lump.name.clone());
            continue;
        }

        let data = match name {
            PNAMES => encode_patch_names(&patch_names)?,
            ANIMATED => encode_animations(catalog.animations(), used)?,
            SWITCHES => encode_switches(catalog.switches(), used)?,
            TEXTURE1 | TEXTURE2 => match catalog.texture_table(name) {
                Some(table) => encode_texture_table(table, &used.textures, &patch_index)?,
                None => overlay.read(lump)?.to_vec(),
            },
            _ => overlay.read(lump)?.to_vec(),
        };
        writer.push_raw_lump(lump.raw_name, data);
    }

    report.lumps_kept = writer.len();
    let bytes = writer.build()?;
    report.output_size = bytes.len();

    Ok(Rebuilt { bytes, report })
}

fn summarize(catalog: &Catalog, used: &UsedSet, patch_names: &NameSet) -> StripReport {
    let textures_kept = catalog
        .textures()
        .filter(|texture| used.textures.contains(&texture.name))
        .count();

    StripReport {
        textures_kept,
        textures_removed: catalog.textures().count() - textures_kept,
        patch_names_kept: patch_names.len(),
        patch_names_removed: catalog.patch_names().len().saturating_sub(patch_names.len()),
        animations_removed: catalog
            .animations()
            .iter()
            .filter(|def| !animation_is_live(def, used))
            .count(),
        switches_removed: catalog
            .switches()
            .iter()
            .filter(|switch| !switch_is_live(switch, used))
            .count(),
        ..Default::default()
    }
}

fn animation_is_live(def: &AnimationDef, used: &UsedSet) -> bool {
    match def.kind {
        AnimationKind::Texture => used.textures.contains(&def.first),
        AnimationKind::Flat => used.flats.contains(&def.first),
    }
}

fn switch_is_live(switch: &SwitchPair, used: &UsedSet) -> bool {
    used.textures.contains(&switch.on)
}

fn encode_patch_names(names: &NameSet) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(4 + names.len() * LUMP_NAME_LEN);
    out.write_u32::<LE>(names.len() as u32)?;
    for name in names {
        out.write_all(&encode_name::<LUMP_NAME_LEN>(name)?)?;
    }
    Ok(out)
}

/// Encode the live textures of `table` in their original order, pointing
/// each map patch at its slot in the rebuilt `PNAMES`.
fn encode_texture_table(
    table: &TextureTable,
    live: &NameSet,
    patch_index: &HashMap<&str, usize>,
) -> Result<Vec<u8>> {
    let textures = table
        .textures
        .iter()
        .filter(|texture| live.contains(&texture.name))
        .collect::<Vec<_>>();

    let too_large = || Error::LumpTooLarge {
        lump: table.lump.clone(),
    };

    let mut out = Cursor::new(Vec::new());
    out.write_u32::<LE>(textures.len() as u32)?;

    let mut offset = 4 + 4 * textures.len();
    for texture in &textures {
        out.write_u32::<LE>(u32::try_from(offset).map_err(|_| too_large())?)?;
        offset += RawTextureHeader::SIZE + RawMapPatch::SIZE * texture.patches.len();
    }

    for texture in textures {
        let header = RawTextureHeader {
            name: encode_name::<LUMP_NAME_LEN>(&texture.name)?,
            masked: texture.masked,
            width: texture.width,
            height: texture.height,
            columndir: texture.columndir,
            patch_count: texture.patches.len() as u16,
        };
        write_record(&mut out, &header)?;

        for map_patch in &texture.patches {
            let index = patch_index
                .get(map_patch.patch.as_str())
                .and_then(|&index| u16::try_from(index).ok())
                .ok_or_else(|| Error::UnresolvedPatch {
                    texture: texture.name.clone(),
                    patch: map_patch.patch.clone(),
                })?;

            let record = RawMapPatch {
                x: map_patch.x,
                y: map_patch.y,
                patch_index: index,
                stepdir: map_patch.stepdir,
                colormap: map_patch.colormap,
            };
            write_record(&mut out, &record)?;
        }
    }

    Ok(out.into_inner())
}

fn encode_animations(animations: &[AnimationDef], used: &UsedSet) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    for def in animations.iter().filter(|def| animation_is_live(def, used)) {
        write_record(&mut out, &def.record)?;
    }
    out.write_u8(ANIMATED_TERMINATOR)?;
    Ok(out.into_inner())
}

fn encode_switches(switches: &[SwitchPair], used: &UsedSet) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    for switch in switches.iter().filter(|switch| switch_is_live(switch, used)) {
        write_record(&mut out, &switch.record)?;
    }
    write_record(&mut out, &RawSwitch::default())?;
    Ok(out.into_inner())
}
