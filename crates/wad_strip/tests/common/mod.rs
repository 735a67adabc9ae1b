//! In-memory WAD fixtures.

#![allow(dead_code)]

use byteorder::{WriteBytesExt, LE};
use std::io::Write;

use wad_io::{encode_name, Wad, WadKind, WadWriter};
use wad_strip::Catalog;

pub fn name8(name: &str) -> [u8; 8] {
    encode_name::<8>(name).unwrap()
}

pub fn name9(name: &str) -> [u8; 9] {
    encode_name::<9>(name).unwrap()
}

pub fn pnames(names: &[&str]) -> Vec<u8> {
    let mut out = Vec::new();
    out.write_u32::<LE>(names.len() as u32).unwrap();
    for name in names {
        out.write_all(&name8(name)).unwrap();
    }
    out
}

/// A texture table; each texture lists the `PNAMES` indices it places.
pub fn textures(defs: &[(&str, &[u16])]) -> Vec<u8> {
    let mut out = Vec::new();
    out.write_u32::<LE>(defs.len() as u32).unwrap();

    let mut offset = 4 + 4 * defs.len();
    for (_, patches) in defs {
        out.write_u32::<LE>(offset as u32).unwrap();
        offset += 22 + 10 * patches.len();
    }

    for (name, patches) in defs {
        out.write_all(&name8(name)).unwrap();
        out.write_u32::<LE>(0).unwrap();
        out.write_u16::<LE>(64).unwrap();
        out.write_u16::<LE>(128).unwrap();
        out.write_u32::<LE>(0).unwrap();
        out.write_u16::<LE>(patches.len() as u16).unwrap();
        for (i, &index) in patches.iter().enumerate() {
            out.write_i16::<LE>(i as i16 * 32).unwrap();
            out.write_i16::<LE>(0).unwrap();
            out.write_u16::<LE>(index).unwrap();
            out.write_u16::<LE>(1).unwrap();
            out.write_u16::<LE>(0).unwrap();
        }
    }
    out
}

/// Sidedefs given as (upper, middle, lower) texture names.
pub fn sidedefs(sides: &[(&str, &str, &str)]) -> Vec<u8> {
    let mut out = Vec::new();
    for (upper, middle, lower) in sides {
        out.write_i16::<LE>(0).unwrap();
        out.write_i16::<LE>(0).unwrap();
        out.write_all(&name8(upper)).unwrap();
        out.write_all(&name8(lower)).unwrap();
        out.write_all(&name8(middle)).unwrap();
        out.write_u16::<LE>(0).unwrap();
    }
    out
}

/// Sectors given as (floor, ceiling) flat names.
pub fn sectors(sectors: &[(&str, &str)]) -> Vec<u8> {
    let mut out = Vec::new();
    for (floor, ceiling) in sectors {
        out.write_i16::<LE>(0).unwrap();
        out.write_i16::<LE>(128).unwrap();
        out.write_all(&name8(floor)).unwrap();
        out.write_all(&name8(ceiling)).unwrap();
        out.write_i16::<LE>(160).unwrap();
        out.write_u16::<LE>(0).unwrap();
        out.write_u16::<LE>(0).unwrap();
    }
    out
}

pub const ANIM_FLAT: u8 = 0;
pub const ANIM_TEXTURE: u8 = 1;

/// `ANIMATED` records given as (kind, first, last), terminated.
pub fn animated(records: &[(u8, &str, &str)]) -> Vec<u8> {
    let mut out = Vec::new();
    for &(kind, first, last) in records {
        out.write_u8(kind).unwrap();
        out.write_all(&name9(last)).unwrap();
        out.write_all(&name9(first)).unwrap();
        out.write_u32::<LE>(8).unwrap();
    }
    out.write_u8(0xFF).unwrap();
    out
}

/// `SWITCHES` records given as (off, on), terminated.
pub fn switches(pairs: &[(&str, &str)]) -> Vec<u8> {
    let mut out = Vec::new();
    for (off, on) in pairs {
        out.write_all(&name9(off)).unwrap();
        out.write_all(&name9(on)).unwrap();
        out.write_u16::<LE>(1).unwrap();
    }
    out.write_all(&[0; 20]).unwrap();
    out
}

pub fn wad(kind: WadKind, lumps: Vec<(&str, Vec<u8>)>) -> Wad {
    let mut writer = WadWriter::new(kind);
    for (name, data) in lumps {
        writer.push_lump(name, data);
    }
    Wad::from_bytes(writer.build().unwrap()).unwrap()
}

pub fn marker(name: &str) -> (&str, Vec<u8>) {
    (name, Vec::new())
}

/// A stand-in for patch or flat pixel data.
pub fn graphic(name: &str) -> (&str, Vec<u8>) {
    (name, vec![0x5A; 64])
}

/// A base container with no maps and no texture resources.
pub fn empty_base() -> Wad {
    wad(WadKind::Iwad, vec![("PLAYPAL", vec![0; 768])])
}

pub fn lump_names(wad: &Wad) -> Vec<String> {
    wad.lumps().iter().map(|lump| lump.name.clone()).collect()
}

pub fn texture_names(wad: &Wad) -> Vec<String> {
    Catalog::load(wad)
        .unwrap()
        .texture_names()
        .map(str::to_string)
        .collect()
}

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
