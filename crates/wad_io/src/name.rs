use crate::WadError;

/// Width of a lump name in the directory.
pub const LUMP_NAME_LEN: usize = 8;

/// Canonicalize a fixed-width name field.
///
/// The name ends at the first NUL or space byte and is upper-cased, so
/// `b"door1\0\0\0"` and `b"DOOR1   "` both become `"DOOR1"`.
pub fn canonical_name(raw: &[u8]) -> String {
    let end = raw
        .iter()
        .position(|&b| b == 0 || b == b' ')
        .unwrap_or(raw.len());
    String::from_utf8_lossy(&raw[..end]).to_ascii_uppercase()
}

/// Encode a name into a NUL-padded field of `N` bytes.
pub fn encode_name<const N: usize>(name: &str) -> Result<[u8; N], WadError> {
    if !name.is_ascii() || name.len() > N {
        return Err(WadError::InvalidLumpName {
            name: name.to_string(),
            max_len: N,
        });
    }

    let mut field = [0u8; N];
    field[..name.len()].copy_from_slice(name.as_bytes());
    Ok(field)
}
