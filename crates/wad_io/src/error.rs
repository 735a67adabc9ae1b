use thiserror::Error;

/// Errors raised while reading or writing a WAD container.
#[derive(Error, Debug)]
pub enum WadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("binrw error: {0}")]
    BinRw(#[from] binrw::Error),

    /// The file is shorter than the fixed 12-byte header.
    #[error("truncated header: file is {len} bytes long")]
    TruncatedHeader { len: usize },

    #[error("bad magic: {0:?} (expected IWAD or PWAD)")]
    BadMagic([u8; 4]),

    /// The directory described by the header does not fit inside the file.
    #[error("bad directory: {count} entries at offset {offset} exceed file size {file_len}")]
    BadDirectory {
        offset: u32,
        count: u32,
        file_len: usize,
    },

    #[error("lump '{name}' (offset {offset}, size {size}) exceeds file size {file_len}")]
    LumpOutOfBounds {
        name: String,
        offset: u32,
        size: u32,
        file_len: usize,
    },

    /// A name cannot be stored in a fixed-width name field.
    #[error("invalid lump name '{name}': must be ASCII and at most {max_len} bytes")]
    InvalidLumpName { name: String, max_len: usize },

    /// The container would not be addressable with 32-bit offsets.
    #[error("container too large: {size} bytes")]
    ContainerTooLarge { size: usize },
}
