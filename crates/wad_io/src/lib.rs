//! Reader and writer for WAD resource containers.
//!
//! A WAD is a 12-byte header (magic, lump count, directory offset), a
//! directory of 16-byte entries (offset, size, 8-byte name) and the lump
//! payloads those entries point at. [`Wad`] opens and validates a container;
//! [`WadWriter`] lays a new one out from an ordered list of payloads.

mod error;
mod header;
mod name;
mod wad;
mod writer;

pub use error::WadError;
pub use header::{DirectoryEntry, WadHeader, WadKind};
pub use name::{canonical_name, encode_name, LUMP_NAME_LEN};
pub use wad::{Lump, Wad};
pub use writer::WadWriter;
