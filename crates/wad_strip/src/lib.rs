//! Removes unreferenced wall textures, patches and flats from a PWAD.
//!
//! The pipeline has three stages:
//!
//! - **Catalog**: decode `PNAMES`, `TEXTURE1`/`TEXTURE2`, the flat range,
//!   `ANIMATED` and `SWITCHES` of each container into a [`Catalog`].
//! - **Liveness**: find every texture and flat the maps of either container
//!   reference, close over animation cycles and switches, and derive the
//!   patches those textures are built from ([`analyze`]).
//! - **Rebuild**: re-encode the overlay's structural lumps without the dead
//!   entries, renumber map patch indices, drop unused patch and flat lumps
//!   and lay out a fresh directory ([`rebuild`]).
//!
//! [`strip`] runs all three.
//!
//! # Example
//!
//! ```no_run
//! use wad_io::Wad;
//! use wad_strip::{strip, StripOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let base = Wad::from_path("doom2.wad")?;
//! let overlay = Wad::from_path("mymap.wad")?;
//!
//! let rebuilt = strip(&base, &overlay, &StripOptions::default())?;
//! println!("Saved {} bytes", rebuilt.report.bytes_saved());
//! std::fs::write("mymap-stripped.wad", &rebuilt.bytes)?;
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod error;
pub mod geometry;
pub mod liveness;
mod names;
mod options;
pub mod rebuild;
mod records;
mod strip;

pub use catalog::{
    AnimationDef, AnimationGroup, AnimationKind, Catalog, MapPatch, SwitchPair, Texture,
    TextureTable,
};
pub use error::{Error, Result};
pub use liveness::{analyze, Analysis, Source, Unresolved, UsedSet};
pub use names::NameSet;
pub use options::{StripOptions, DEFAULT_PRIVATE_PREFIXES, DEFAULT_SKY_TEXTURES};
pub use rebuild::{rebuild, Rebuilt, StripReport};
pub use strip::strip;
