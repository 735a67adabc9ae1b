use camino::Utf8PathBuf;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    #[error("Failed to read WAD: {path}")]
    #[diagnostic(
        code(wad::read_failed),
        help("Make sure the file exists and is a valid IWAD or PWAD")
    )]
    ReadFailed {
        path: Utf8PathBuf,
        #[source]
        source: wad_io::WadError,
    },

    #[error("Failed to write output: {path}")]
    #[diagnostic(
        code(fs::write_failed),
        help("Check file permissions and available disk space")
    )]
    WriteFailed {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration file: {path}")]
    #[diagnostic(
        code(config::invalid),
        help("The config accepts `sky_textures` and `private_prefixes`, both lists of strings")
    )]
    InvalidConfig {
        path: Utf8PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Stripping failed")]
    #[diagnostic(
        code(strip::failed),
        help("The overlay or base contains a malformed texture, animation or map lump")
    )]
    Strip {
        #[from]
        source: wad_strip::Error,
    },
}

impl CliError {
    pub fn read_failed(path: Utf8PathBuf, source: wad_io::WadError) -> Self {
        Self::ReadFailed { path, source }
    }

    pub fn write_failed(path: Utf8PathBuf, source: std::io::Error) -> Self {
        Self::WriteFailed { path, source }
    }

    pub fn invalid_config(
        path: Utf8PathBuf,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::InvalidConfig {
            path,
            source: source.into(),
        }
    }
}
