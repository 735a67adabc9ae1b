//! Strip configuration loading.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io;

use wad_strip::StripOptions;

use crate::errors::CliError;

pub const CONFIG_FILE_NAME: &str = "wad-strip.toml";

/// Settings read from `wad-strip.toml`. Missing keys keep the built-in
/// defaults.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct StripConfig {
    pub sky_textures: Vec<String>,
    pub private_prefixes: Vec<String>,
}

impl Default for StripConfig {
    fn default() -> Self {
        let options = StripOptions::default();
        Self {
            sky_textures: options.sky_textures,
            private_prefixes: options.private_prefixes,
        }
    }
}

impl From<StripConfig> for StripOptions {
    fn from(config: StripConfig) -> Self {
        Self {
            sky_textures: config
                .sky_textures
                .into_iter()
                .map(|name| name.to_ascii_uppercase())
                .collect(),
            private_prefixes: config.private_prefixes,
        }
    }
}

/// Returns the directory where the current executable resides.
pub fn install_dir() -> Option<Utf8PathBuf> {
    let exe = env::current_exe().ok()?;
    let parent = exe.parent()?;
    Utf8PathBuf::from_path_buf(parent.to_path_buf()).ok()
}

/// Returns the default configuration file path (next to the executable).
pub fn default_config_path() -> Option<Utf8PathBuf> {
    install_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

pub fn parse_config(path: &Utf8Path, content: &str) -> Result<StripConfig, CliError> {
    toml::from_str(content).map_err(|e| CliError::invalid_config(path.to_owned(), e))
}

/// Loads the configuration.
///
/// An explicit path must exist and parse. Without one, the default file is
/// used when present and the built-in defaults otherwise.
pub fn load_config(explicit: Option<&Utf8Path>) -> Result<StripConfig, CliError> {
    let (path, required) = match explicit {
        Some(path) => (path.to_owned(), true),
        None => match default_config_path() {
            Some(path) => (path, false),
            None => return Ok(StripConfig::default()),
        },
    };

    match fs::read_to_string(&path) {
        Ok(content) => {
            tracing::debug!("Loaded config from {}", path);
            parse_config(&path, &content)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound && !required => Ok(StripConfig::default()),
        Err(e) => Err(CliError::invalid_config(path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_partial_config_keeps_defaults() {
        let config = parse_config(
            Utf8Path::new("wad-strip.toml"),
            r#"sky_textures = ["sky1", "RSKY1"]"#,
        )
        .unwrap();

        assert_eq!(config.sky_textures, ["sky1", "RSKY1"]);
        assert_eq!(config.private_prefixes, ["_", "\\"]);

        let options = StripOptions::from(config);
        assert_eq!(options.sky_textures, ["SKY1", "RSKY1"]);
    }

    #[test]
    fn parse_rejects_unknown_keys() {
        let result = parse_config(Utf8Path::new("wad-strip.toml"), "skies = []");
        assert!(matches!(result, Err(CliError::InvalidConfig { .. })));
    }

    #[test]
    fn load_explicit_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "private_prefixes = [\"_\", \"ZZ\"]").unwrap();

        let path = Utf8Path::from_path(file.path()).unwrap();
        let config = load_config(Some(path)).unwrap();
        assert_eq!(config.private_prefixes, ["_", "ZZ"]);
    }

    #[test]
    fn load_missing_explicit_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("missing.toml")).unwrap();
        assert!(matches!(
            load_config(Some(&path)),
            Err(CliError::InvalidConfig { .. })
        ));
    }
}
