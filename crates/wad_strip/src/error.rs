//! Error types for catalog loading, analysis and rebuilding.
//!
//! Every failure here is fatal: the pipeline stops before any output is
//! produced. Variants carry the lump name and byte offset involved so a bad
//! input can be located.

use thiserror::Error;

use crate::catalog::AnimationKind;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The container itself is malformed.
    #[error("WAD error: {0}")]
    Wad(#[from] wad_io::WadError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Record decode error: {0}")]
    Decode(#[from] binrw::Error),

    /// A record or count runs past the end of its lump.
    #[error("Lump '{lump}' is truncated at offset {offset}")]
    Truncated { lump: String, offset: usize },

    /// A texture directory entry points outside the texture lump.
    #[error("Texture #{index} in '{lump}' points to offset {offset}, outside the lump")]
    TextureOffsetOutOfRange {
        lump: String,
        index: usize,
        offset: usize,
    },

    /// A map patch references a `PNAMES` slot that does not exist.
    #[error("Texture '{texture}' uses patch index {index}, but PNAMES has {count} entries")]
    PatchIndexOutOfRange {
        texture: String,
        index: usize,
        count: usize,
    },

    /// An `ANIMATED` record names frames missing from the name range.
    #[error("{kind} animation {first}..{last} not found in the {kind} list")]
    AnimationRangeNotFound {
        kind: AnimationKind,
        first: String,
        last: String,
    },

    /// A live texture references a patch absent from the rebuilt `PNAMES`.
    #[error("Texture '{texture}' references patch '{patch}', which is not in the rebuilt PNAMES")]
    UnresolvedPatch { texture: String, patch: String },

    /// A rebuilt structural lump cannot be addressed with 32-bit offsets.
    #[error("Rebuilt lump '{lump}' is too large")]
    LumpTooLarge { lump: String },
}
