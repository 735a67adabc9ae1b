/// Sky textures are selected by the engine per episode/map, never through a
/// sidedef, so they are always live.
pub const DEFAULT_SKY_TEXTURES: [&str; 3] = ["SKY1", "SKY2", "SKY3"];

/// Lumps starting with these prefixes hold editor metadata and are never
/// shipped.
pub const DEFAULT_PRIVATE_PREFIXES: [&str; 2] = ["_", "\\"];

/// Tunables of a strip run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripOptions {
    /// Texture names kept unconditionally.
    pub sky_textures: Vec<String>,
    /// Name prefixes of lumps dropped from the output.
    pub private_prefixes: Vec<String>,
}

impl Default for StripOptions {
    fn default() -> Self {
        Self {
            sky_textures: DEFAULT_SKY_TEXTURES.iter().map(|s| s.to_string()).collect(),
            private_prefixes: DEFAULT_PRIVATE_PREFIXES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl StripOptions {
    pub fn is_private(&self, lump_name: &str) -> bool {
        self.private_prefixes
            .iter()
            .any(|prefix| !prefix.is_empty() && lump_name.starts_with(prefix.as_str()))
    }
}
