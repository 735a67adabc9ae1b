use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use colored::Colorize;
use miette::Result;
use tempfile::NamedTempFile;
use wad_io::Wad;
use wad_strip::{strip, StripOptions, StripReport};

use crate::errors::CliError;
use crate::println_pad;
use crate::utils::config::load_config;
use crate::utils::format_size;

pub struct StripWadArgs {
    pub base: Utf8PathBuf,
    pub overlay: Utf8PathBuf,
    pub output: Utf8PathBuf,
    pub config: Option<Utf8PathBuf>,
    pub dry_run: bool,
}

pub fn strip_wad(args: StripWadArgs) -> Result<()> {
    let options = StripOptions::from(load_config(args.config.as_deref())?);

    let base = open_wad(&args.base)?;
    let overlay = open_wad(&args.overlay)?;
    if overlay.kind() != wad_io::WadKind::Pwad {
        tracing::warn!("{} is an {}, stripping it anyway", args.overlay, overlay.kind());
    }

    let rebuilt = strip(&base, &overlay, &options).map_err(CliError::from)?;

    if args.dry_run {
        println_pad!("{}", "Dry run, nothing written".bright_yellow());
    } else {
        write_atomic(&args.output, &rebuilt.bytes)?;
    }

    print_report(&args.overlay, &args.output, &rebuilt.report, args.dry_run);
    Ok(())
}

fn open_wad(path: &Utf8Path) -> Result<Wad, CliError> {
    tracing::debug!("Reading {}", path);
    Wad::from_path(path).map_err(|e| CliError::read_failed(path.to_owned(), e))
}

/// Writes `bytes` to a temporary file beside `path` and renames it into
/// place, so a failed run never leaves a half-written output.
pub fn write_atomic(path: &Utf8Path, bytes: &[u8]) -> Result<(), CliError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let fail = |e: std::io::Error| CliError::write_failed(path.to_owned(), e);

    let mut file = NamedTempFile::new_in(dir).map_err(fail)?;
    file.write_all(bytes).map_err(fail)?;
    file.as_file().sync_all().map_err(fail)?;
    file.persist(path).map_err(|e| fail(e.error))?;

    tracing::info!("Wrote {} ({} bytes)", path, bytes.len());
    Ok(())
}

fn print_report(overlay: &Utf8Path, output: &Utf8Path, report: &StripReport, dry_run: bool) {
    println_pad!(
        "{} {}",
        "🧹 Stripped:".bright_blue().bold(),
        overlay.as_str().bright_cyan().bold()
    );
    if !dry_run {
        println_pad!(
            "{} {}",
            "💾 Output:".bright_green(),
            output.as_str().bright_white().bold()
        );
    }

    println_pad!(
        "{} {} kept, {} removed",
        "🧱 Textures:".bright_yellow(),
        report.textures_kept.to_string().bright_white(),
        report.textures_removed.to_string().bright_red()
    );
    println_pad!(
        "{} {} kept, {} removed",
        "🧩 Patch names:".bright_yellow(),
        report.patch_names_kept.to_string().bright_white(),
        report.patch_names_removed.to_string().bright_red()
    );
    println_pad!(
        "{} {} animations, {} switches removed",
        "🔁 Aliases:".bright_yellow(),
        report.animations_removed.to_string().bright_red(),
        report.switches_removed.to_string().bright_red()
    );
    println_pad!(
        "{} {} kept, {} unused, {} private",
        "📄 Lumps:".bright_yellow(),
        report.lumps_kept.to_string().bright_white(),
        report.removed_lumps.len().to_string().bright_red(),
        report.private_lumps.len().to_string().bright_red()
    );

    if !report.removed_lumps.is_empty() {
        println_pad!("\n{}", "🗑️  Removed lumps:".bright_magenta().bold());
        for name in &report.removed_lumps {
            println_pad!("   {} {}", "•".bright_cyan(), name);
        }
    }

    let unresolved = &report.unresolved;
    if !unresolved.is_empty() {
        println_pad!("\n{}", "⚠️  Unresolved references:".bright_red().bold());
        for name in &unresolved.textures {
            println_pad!("   {} {} {}", "•".bright_red(), name, "(texture)".dimmed());
        }
        for name in &unresolved.flats {
            println_pad!("   {} {} {}", "•".bright_red(), name, "(flat)".dimmed());
        }
    }

    println_pad!(
        "\n{} {} → {} ({} saved)",
        "📦 Size:".bright_blue().bold(),
        format_size(report.input_size),
        format_size(report.output_size),
        format_size(report.bytes_saved()).bright_green().bold()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_atomic_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("out.wad")).unwrap();
        std::fs::write(&path, b"old contents").unwrap();

        write_atomic(&path, b"PWAD").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"PWAD");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn write_atomic_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("nope").join("out.wad")).unwrap();

        assert!(matches!(
            write_atomic(&path, b"PWAD"),
            Err(CliError::WriteFailed { .. })
        ));
    }
}
