use camino::Utf8PathBuf;
use clap::builder::{styling::AnsiColor, Styles};
use clap::ColorChoice;
use clap::{CommandFactory, FromArgMatches, Parser};
use commands::{strip_wad, StripWadArgs};
use miette::Result;
use tracing_subscriber::EnvFilter;

mod commands;
mod errors;
mod utils;

/// Remove textures, patches and flats that no map can reach from a PWAD.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The base IWAD, read only
    base: Utf8PathBuf,

    /// The PWAD to strip
    overlay: Utf8PathBuf,

    /// Where to write the stripped PWAD
    output: Utf8PathBuf,

    /// TOML config with sky textures and private lump prefixes
    #[arg(short, long)]
    config: Option<Utf8PathBuf>,

    /// Analyse and print the report without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

fn parse_args() -> Args {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default())
        .placeholder(AnsiColor::Blue.on_default());

    let matches = Args::command()
        .styles(styles)
        .color(ColorChoice::Auto)
        .get_matches();

    Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose {
        "wad_strip=debug,wad_io=debug"
    } else {
        "wad_strip=info,wad_io=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let args = parse_args();
    init_logging(args.verbose);

    strip_wad(StripWadArgs {
        base: args.base,
        overlay: args.overlay,
        output: args.output,
        config: args.config,
        dry_run: args.dry_run,
    })
}
